//! Signature parsing.
//!
//! A signature string names a sequence of complete types. Parsing produces
//! a flat, vectorized sequence of [`DBusType`] instead of a tree: container
//! types are followed by a length marker and their children inline, so the
//! whole signature lives in one allocation and can be walked with index
//! arithmetic.

pub use self::dbus_type::DBusType;
mod dbus_type;

mod validation;

pub use self::signature::Signature;
mod signature;

pub use self::signature_error::SignatureError;
mod signature_error;

pub use self::iter::{Iter, Type};
pub(crate) use self::iter::complete_len;
mod iter;

#[cfg(test)]
mod tests;

/// Maximum length of a signature string, per the D-Bus specification.
pub(crate) const MAX_SIGNATURE: usize = 255;

/// Maximum nesting depth of a single container kind (arrays, or structs).
pub(crate) const MAX_CONTAINER_DEPTH: usize = 32;

/// Maximum total nesting depth across all container kinds combined.
pub(crate) const MAX_DEPTH: usize = MAX_CONTAINER_DEPTH * 2;
