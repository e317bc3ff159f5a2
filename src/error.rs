use std::error;
use std::fmt;
use std::str::Utf8Error;

use crate::header::RequiredField;
use crate::object_path::ObjectPathError;
use crate::protocol::HeaderFieldCode;
use crate::signature::SignatureError;

/// Result alias using an [`Error`] as the error type by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error raised by this crate.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    #[inline]
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Self { kind }
    }
}

impl From<SignatureError> for Error {
    #[inline]
    fn from(error: SignatureError) -> Self {
        Self::new(ErrorKind::Signature(error))
    }
}

impl From<ObjectPathError> for Error {
    #[inline]
    fn from(error: ObjectPathError) -> Self {
        Self::new(ErrorKind::ObjectPath(error))
    }
}

impl From<Utf8Error> for Error {
    #[inline]
    fn from(error: Utf8Error) -> Self {
        Self::new(ErrorKind::InvalidUtf8(error))
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ErrorKind::Signature(error) => error.fmt(f),
            ErrorKind::ObjectPath(error) => error.fmt(f),
            ErrorKind::InvalidUtf8(error) => error.fmt(f),
            ErrorKind::EndOfStream => write!(f, "End of stream"),
            ErrorKind::InvalidAlignment => write!(f, "Read position is misaligned"),
            ErrorKind::InvalidLength => write!(f, "Length prefix exceeds the remaining buffer"),
            ErrorKind::MissingNul => write!(f, "String is not NUL terminated"),
            ErrorKind::NonZeroPadding => write!(f, "Alignment padding byte is not zero"),
            ErrorKind::InvalidBoolean(value) => {
                write!(f, "{value} is not a valid BOOLEAN (must be 0 or 1)")
            }
            ErrorKind::ArrayTooLong(length) => {
                write!(f, "Array of length {length} is too long (max is 67108864)")
            }
            ErrorKind::InvalidEndian(byte) => {
                write!(f, "Invalid endianness byte {byte:#x}, expected `l` or `B`")
            }
            ErrorKind::InvalidMsgType(byte) => {
                write!(f, "Invalid or unknown message type {byte}")
            }
            ErrorKind::InvalidFlags(byte) => {
                write!(f, "Unknown bits set in header flags: {byte:#010b}")
            }
            ErrorKind::InvalidVersion(version) => {
                write!(f, "Unsupported protocol major version {version}, expected 1")
            }
            ErrorKind::InvalidHeaderField(code) => {
                write!(f, "Header field {code:?} has an unexpected variant signature")
            }
            ErrorKind::DuplicateHeaderField(code) => {
                write!(f, "Header field {code:?} appears more than once")
            }
            ErrorKind::RequiredFieldMissing(field) => {
                write!(f, "Message is missing required header field {field:?}")
            }
            ErrorKind::BodyTooLong(length) => {
                write!(f, "Body of length {length} is too long (max is 134217728)")
            }
            ErrorKind::MessageTooLong(length) => {
                write!(f, "Message of length {length} exceeds the 128 MiB maximum")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Signature(error) => Some(error),
            ErrorKind::ObjectPath(error) => Some(error),
            ErrorKind::InvalidUtf8(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Signature(SignatureError),
    ObjectPath(ObjectPathError),
    InvalidUtf8(Utf8Error),
    EndOfStream,
    InvalidAlignment,
    InvalidLength,
    MissingNul,
    NonZeroPadding,
    InvalidBoolean(u32),
    ArrayTooLong(u32),
    InvalidEndian(u8),
    InvalidMsgType(u8),
    InvalidFlags(u8),
    InvalidVersion(u8),
    InvalidHeaderField(HeaderFieldCode),
    DuplicateHeaderField(HeaderFieldCode),
    RequiredFieldMissing(RequiredField),
    BodyTooLong(u32),
    MessageTooLong(u64),
}
