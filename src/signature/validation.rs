use super::dbus_type::DBusType;
use super::signature_error::SignatureErrorKind;
use super::{SignatureError, MAX_CONTAINER_DEPTH, MAX_DEPTH, MAX_SIGNATURE};

/// Parse a signature string into its vectorized [`DBusType`] sequence.
///
/// Recursive-descent, single pass, left-to-right: each complete type is
/// consumed in one call and containers recurse into themselves. `STRUCT`
/// and `DICT_ENTRY` markers are backfilled with their child count once their
/// closing token is seen.
pub(super) fn parse(bytes: &[u8]) -> Result<Vec<DBusType>, SignatureError> {
    if bytes.len() > MAX_SIGNATURE {
        return Err(SignatureError::new(SignatureErrorKind::TooLong));
    }

    let mut parser = Parser {
        bytes,
        pos: 0,
        array_depth: 0,
        struct_depth: 0,
        depth: 0,
    };

    let mut out = Vec::new();

    while parser.pos < parser.bytes.len() {
        parser.complete_type(&mut out)?;
    }

    Ok(out)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    array_depth: usize,
    struct_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Parse exactly one single complete type, pushing its vectorized form
    /// onto `out`.
    fn complete_type(&mut self, out: &mut Vec<DBusType>) -> Result<(), SignatureError> {
        use SignatureErrorKind::*;

        let b = self.bump().ok_or(SignatureError::new(UnbalancedStruct))?;

        match b {
            b'a' => self.array(out),
            b'(' => self.r#struct(out),
            b'{' => Err(SignatureError::new(UnbalancedDict)),
            b')' | b'}' => Err(SignatureError::new(UnbalancedStruct)),
            b => {
                out.push(scalar(b).ok_or(SignatureError::new(UnknownTypeCode))?);
                Ok(())
            }
        }
    }

    fn enter(&mut self) -> Result<(), SignatureError> {
        self.depth += 1;

        if self.depth > MAX_DEPTH {
            return Err(SignatureError::new(SignatureErrorKind::TooDeep));
        }

        Ok(())
    }

    fn array(&mut self, out: &mut Vec<DBusType>) -> Result<(), SignatureError> {
        use SignatureErrorKind::*;

        self.array_depth += 1;

        if self.array_depth > MAX_CONTAINER_DEPTH {
            return Err(SignatureError::new(TooDeep));
        }

        self.enter()?;

        out.push(DBusType::Array);

        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                self.dict_entry(out)?;
            }
            Some(_) => {
                self.complete_type(out)?;
            }
            None => return Err(SignatureError::new(ArrayMissingElement)),
        }

        self.array_depth -= 1;
        self.depth -= 1;
        Ok(())
    }

    fn r#struct(&mut self, out: &mut Vec<DBusType>) -> Result<(), SignatureError> {
        use SignatureErrorKind::*;

        self.struct_depth += 1;

        if self.struct_depth > MAX_CONTAINER_DEPTH {
            return Err(SignatureError::new(TooDeep));
        }

        self.enter()?;

        out.push(DBusType::Struct);
        let length_at = out.len();
        out.push(DBusType::StructLength(0));

        let mut count: u8 = 0;

        loop {
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(SignatureError::new(UnbalancedStruct)),
                Some(_) => {
                    self.complete_type(out)?;
                    count = count
                        .checked_add(1)
                        .ok_or(SignatureError::new(SignatureErrorKind::TooLong))?;
                }
            }
        }

        if count == 0 {
            return Err(SignatureError::new(EmptyStruct));
        }

        out[length_at] = DBusType::StructLength(count);

        self.struct_depth -= 1;
        self.depth -= 1;
        Ok(())
    }

    /// Parse a dict-entry body; the caller has already consumed `a{`.
    fn dict_entry(&mut self, out: &mut Vec<DBusType>) -> Result<(), SignatureError> {
        use SignatureErrorKind::*;

        self.enter()?;

        out.push(DBusType::DictEntry);
        out.push(DBusType::DictEntryLength(2));

        if matches!(self.peek(), Some(b'}') | None) {
            return Err(SignatureError::new(UnbalancedDict));
        }

        let key_at = out.len();
        self.complete_type(out)?;

        if !out[key_at].is_basic() {
            return Err(SignatureError::new(DictKeyNotBasic));
        }

        if matches!(self.peek(), Some(b'}') | None) {
            return Err(SignatureError::new(UnbalancedDict));
        }

        self.complete_type(out)?;

        match self.bump() {
            Some(b'}') => {}
            _ => return Err(SignatureError::new(UnbalancedDict)),
        }

        self.depth -= 1;
        Ok(())
    }
}

const fn scalar(b: u8) -> Option<DBusType> {
    Some(match b {
        b'y' => DBusType::Byte,
        b'b' => DBusType::Boolean,
        b'n' => DBusType::Int16,
        b'q' => DBusType::UInt16,
        b'i' => DBusType::Int32,
        b'u' => DBusType::UInt32,
        b'x' => DBusType::Int64,
        b't' => DBusType::UInt64,
        b'd' => DBusType::Double,
        b'h' => DBusType::UnixFd,
        b's' => DBusType::String,
        b'o' => DBusType::ObjectPath,
        b'g' => DBusType::Signature,
        b'v' => DBusType::Variant,
        _ => return None,
    })
}
