//! Object path validation.
//!
//! An object path names the instance a method call targets or a signal
//! originates from. The wire format encodes it exactly like a `STRING`
//! (4-byte length prefix, NUL terminator) but restricts its contents to a
//! small grammar, checked by [`is_valid_object_path`].

pub use self::validation::is_valid_object_path;
mod validation;

pub use self::object_path_error::ObjectPathError;
mod object_path_error;

pub use self::object_path::ObjectPath;
mod object_path;

pub use self::iter::Iter;
mod iter;

#[cfg(test)]
mod tests;
