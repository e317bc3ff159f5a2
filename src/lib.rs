//! A D-Bus wire-format codec.
//!
//! This crate decodes the D-Bus wire protocol: [`Signature`] parses and
//! renders type signature strings into a flat, vectorized representation;
//! [`Reader`] performs aligned, endian-aware reads of primitives, strings,
//! and containers out of a byte buffer; and [`header::decode_header`] turns
//! a complete message buffer into a [`header::MessageHeader`] plus a
//! [`Reader`] positioned at the start of the body.
//!
//! This crate only decodes. Encoding, transport, authentication, and a
//! connection abstraction are out of scope.

#[doc(inline)]
pub use self::error::{Error, Result};
mod error;

#[doc(inline)]
pub use self::protocol::{Endianness, Flags};
pub mod protocol;

mod frame;

#[doc(inline)]
pub use self::object_path::{is_valid_object_path, ObjectPath, ObjectPathError};
pub mod object_path;

#[doc(inline)]
pub use self::signature::{DBusType, Signature, SignatureError};
pub mod signature;

#[doc(inline)]
pub use self::reader::Reader;
mod reader;

#[doc(inline)]
pub use self::header::{decode_header, HeaderField, HeaderWarning, MessageHeader, MessageType};
pub mod header;
