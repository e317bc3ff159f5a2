use std::error;
use std::fmt;

/// Detailed errors raised when parsing a signature string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureError {
    pub(super) kind: SignatureErrorKind,
}

impl SignatureError {
    #[inline]
    pub(crate) const fn new(kind: SignatureErrorKind) -> Self {
        Self { kind }
    }

    /// A variant's inline signature was empty; it must name exactly one
    /// complete type.
    #[inline]
    pub(crate) const fn empty_signature() -> Self {
        Self::new(SignatureErrorKind::EmptySignature)
    }

    /// A variant's inline signature named more than one complete type.
    #[inline]
    pub(crate) const fn variant_not_single_type() -> Self {
        Self::new(SignatureErrorKind::VariantNotSingleType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignatureErrorKind {
    EmptySignature,
    VariantNotSingleType,
    UnknownTypeCode,
    UnbalancedStruct,
    UnbalancedDict,
    EmptyStruct,
    DictKeyNotBasic,
    ArrayMissingElement,
    TooDeep,
    TooLong,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SignatureErrorKind::EmptySignature => write!(f, "Variant signature is empty"),
            SignatureErrorKind::VariantNotSingleType => {
                write!(f, "Variant signature names more than one complete type")
            }
            SignatureErrorKind::UnknownTypeCode => write!(f, "Unknown type code"),
            SignatureErrorKind::UnbalancedStruct => {
                write!(f, "Struct started but not ended, or ended but not started")
            }
            SignatureErrorKind::UnbalancedDict => write!(
                f,
                "Dict entry malformed: not inside an array, missing a field, or not closed"
            ),
            SignatureErrorKind::EmptyStruct => write!(f, "Struct has no fields"),
            SignatureErrorKind::DictKeyNotBasic => write!(f, "Dict entry key is not a basic type"),
            SignatureErrorKind::ArrayMissingElement => {
                write!(f, "Array is missing its element type")
            }
            SignatureErrorKind::TooDeep => write!(f, "Signature exceeds maximum container depth"),
            SignatureErrorKind::TooLong => write!(f, "Signature exceeds maximum length"),
        }
    }
}

impl error::Error for SignatureError {}
