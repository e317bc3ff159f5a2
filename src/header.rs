//! The message-header decoder.
//!
//! Turns a complete message byte buffer into a [`MessageHeader`] plus a body
//! [`Reader`], deferring interpretation of the body itself to a caller that
//! knows what signature to expect.

use crate::error::{Error, ErrorKind, Result};
use crate::object_path::ObjectPath;
use crate::protocol::{Endianness, Flags, HeaderFieldCode, MessageType as RawMessageType};
use crate::reader::{align_up, Reader};
use crate::signature::{DBusType, Signature};

/// Maximum total message length (header + body), per the D-Bus
/// specification (2²⁷, 128 MiB).
pub(crate) const MAX_MESSAGE_LENGTH: u64 = 1 << 27;

/// The kind of a decoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    MethodCall,
    MethodReturn,
    Error,
    Signal,
}

/// A header field code for which [`MessageHeader`]'s invariants require a
/// value, by message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Path,
    Interface,
    Member,
    ErrorName,
    ReplySerial,
}

/// A non-fatal observation made while decoding a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderWarning {
    /// The message carries a serial of zero. Permitted by the wire format
    /// but never produced by a well-behaved peer.
    ZeroSerial,
}

/// A single entry of the `a(yv)` header-field array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderField<'de> {
    Path(&'de ObjectPath),
    Interface(&'de str),
    Member(&'de str),
    ErrorName(&'de str),
    ReplySerial(u32),
    Destination(&'de str),
    Sender(&'de str),
    Signature(Signature),
    UnixFds(u32),
}

impl<'de> HeaderField<'de> {
    fn code(&self) -> HeaderFieldCode {
        match self {
            HeaderField::Path(..) => HeaderFieldCode::PATH,
            HeaderField::Interface(..) => HeaderFieldCode::INTERFACE,
            HeaderField::Member(..) => HeaderFieldCode::MEMBER,
            HeaderField::ErrorName(..) => HeaderFieldCode::ERROR_NAME,
            HeaderField::ReplySerial(..) => HeaderFieldCode::REPLY_SERIAL,
            HeaderField::Destination(..) => HeaderFieldCode::DESTINATION,
            HeaderField::Sender(..) => HeaderFieldCode::SENDER,
            HeaderField::Signature(..) => HeaderFieldCode::SIGNATURE,
            HeaderField::UnixFds(..) => HeaderFieldCode::UNIX_FDS,
        }
    }
}

/// A decoded D-Bus message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader<'de> {
    pub endian: Endianness,
    pub msg_type: MessageType,
    pub flags: Flags,
    pub version: u8,
    pub body_length: u32,
    pub serial: u32,
    pub fields: Vec<HeaderField<'de>>,
    pub warnings: Vec<HeaderWarning>,
}

impl<'de> MessageHeader<'de> {
    /// The value of the `Path` field, if present.
    pub fn path(&self) -> Option<&'de ObjectPath> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Path(v) => Some(*v),
            _ => None,
        })
    }

    /// The value of the `Interface` field, if present.
    pub fn interface(&self) -> Option<&'de str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Interface(v) => Some(*v),
            _ => None,
        })
    }

    /// The value of the `Member` field, if present.
    pub fn member(&self) -> Option<&'de str> {
        self.fields.iter().find_map(|f| match f {
            HeaderField::Member(v) => Some(*v),
            _ => None,
        })
    }

    /// The value of the `Signature` field, or the empty signature when
    /// absent (meaning the body is empty).
    pub fn signature(&self) -> Signature {
        self.fields
            .iter()
            .find_map(|f| match f {
                HeaderField::Signature(v) => Some(v.clone()),
                _ => None,
            })
            .unwrap_or_else(Signature::empty)
    }

    fn require(&self, field: RequiredField, present: bool) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::RequiredFieldMissing(field)))
        }
    }

    /// Check that the fields required for this header's message type are
    /// present (Path+Member for MethodCall/Signal; Interface for Signal;
    /// ErrorName+ReplySerial for Error; ReplySerial for MethodReturn).
    ///
    /// This is a separate, opt-in step from [`decode_header`]: the wire
    /// decode itself is purely mechanical and never rejects a
    /// structurally-valid header for missing application-level fields.
    pub fn check_required_fields(&self) -> Result<()> {
        use RequiredField::*;

        let has = |code: HeaderFieldCode| self.fields.iter().any(|f| f.code() == code);

        match self.msg_type {
            MessageType::MethodCall => {
                self.require(Path, has(HeaderFieldCode::PATH))?;
                self.require(Member, has(HeaderFieldCode::MEMBER))?;
            }
            MessageType::Signal => {
                self.require(Path, has(HeaderFieldCode::PATH))?;
                self.require(Interface, has(HeaderFieldCode::INTERFACE))?;
                self.require(Member, has(HeaderFieldCode::MEMBER))?;
            }
            MessageType::Error => {
                self.require(ErrorName, has(HeaderFieldCode::ERROR_NAME))?;
                self.require(ReplySerial, has(HeaderFieldCode::REPLY_SERIAL))?;
            }
            MessageType::MethodReturn => {
                self.require(ReplySerial, has(HeaderFieldCode::REPLY_SERIAL))?;
            }
        }

        Ok(())
    }
}

/// Decode a complete message buffer into its [`MessageHeader`] and a
/// [`Reader`] positioned at the start of the (still-undecoded) body.
pub fn decode_header(buf: &[u8]) -> Result<(MessageHeader<'_>, Reader<'_>)> {
    let &endian_byte = buf.first().ok_or(Error::new(ErrorKind::EndOfStream))?;

    let endian = match endian_byte {
        b'l' => Endianness::LITTLE,
        b'B' => Endianness::BIG,
        other => return Err(Error::new(ErrorKind::InvalidEndian(other))),
    };

    let mut reader = Reader::new(buf, endian);
    reader.skip(1)?;

    let msg_type_byte = reader.read_primitive::<u8>()?;
    let msg_type = match RawMessageType(msg_type_byte) {
        RawMessageType::METHOD_CALL => MessageType::MethodCall,
        RawMessageType::METHOD_RETURN => MessageType::MethodReturn,
        RawMessageType::ERROR => MessageType::Error,
        RawMessageType::SIGNAL => MessageType::Signal,
        _ => return Err(Error::new(ErrorKind::InvalidMsgType(msg_type_byte))),
    };

    let flags_byte = reader.read_primitive::<u8>()?;

    if flags_byte & !Flags::ALL != 0 {
        return Err(Error::new(ErrorKind::InvalidFlags(flags_byte)));
    }

    let flags = Flags(flags_byte);

    let version = reader.read_primitive::<u8>()?;

    if version != 1 {
        return Err(Error::new(ErrorKind::InvalidVersion(version)));
    }

    let body_length = reader.read_primitive::<u32>()?;

    if u64::from(body_length) > MAX_MESSAGE_LENGTH {
        return Err(Error::new(ErrorKind::BodyTooLong(body_length)));
    }

    let serial = reader.read_primitive::<u32>()?;

    let mut warnings = Vec::new();

    if serial == 0 {
        warnings.push(HeaderWarning::ZeroSerial);
    }

    let fields_length = reader.read_primitive::<u32>()?;

    let message_length =
        align_up(16 + fields_length as usize, 8) as u64 + u64::from(body_length);

    if message_length > MAX_MESSAGE_LENGTH {
        return Err(Error::new(ErrorKind::MessageTooLong(message_length)));
    }

    let fields_end = 16 + fields_length as usize;
    let mut fields = Vec::new();
    let mut seen = [false; 10];

    while reader.pos() < fields_end {
        reader.align_to(8)?;

        let code = reader.read_primitive::<u8>()?;
        let signature = reader.read_variant()?;

        let field = decode_field(&mut reader, HeaderFieldCode(code), &signature)?;

        if let Some(field) = field {
            if (1..=9).contains(&code) {
                let slot = &mut seen[code as usize];

                if *slot {
                    return Err(Error::new(ErrorKind::DuplicateHeaderField(
                        HeaderFieldCode(code),
                    )));
                }

                *slot = true;
            }

            fields.push(field);
        }
    }

    reader.align_to(8)?;

    let header = MessageHeader {
        endian,
        msg_type,
        flags,
        version,
        body_length,
        serial,
        fields,
        warnings,
    };

    Ok((header, reader))
}

/// Decode one `(yv)` field-array entry, dispatching on `code`. Unknown codes
/// still consume the self-describing variant value so the reader stays
/// aligned, then are discarded.
fn decode_field<'de>(
    reader: &mut Reader<'de>,
    code: HeaderFieldCode,
    signature: &Signature,
) -> Result<Option<HeaderField<'de>>> {
    let expected = expected_type(code);

    if let Some(expected) = expected {
        if signature.types() != [expected].as_slice() {
            return Err(Error::new(ErrorKind::InvalidHeaderField(code)));
        }
    }

    let field = match code {
        HeaderFieldCode::PATH => HeaderField::Path(reader.read_object_path()?),
        HeaderFieldCode::INTERFACE => HeaderField::Interface(reader.read_string()?),
        HeaderFieldCode::MEMBER => HeaderField::Member(reader.read_string()?),
        HeaderFieldCode::ERROR_NAME => HeaderField::ErrorName(reader.read_string()?),
        HeaderFieldCode::REPLY_SERIAL => HeaderField::ReplySerial(reader.read_primitive::<u32>()?),
        HeaderFieldCode::DESTINATION => HeaderField::Destination(reader.read_string()?),
        HeaderFieldCode::SENDER => HeaderField::Sender(reader.read_string()?),
        HeaderFieldCode::SIGNATURE => HeaderField::Signature(reader.read_signature()?),
        HeaderFieldCode::UNIX_FDS => HeaderField::UnixFds(reader.read_primitive::<u32>()?),
        _ => {
            skip_value(reader, signature.types())?;
            return Ok(None);
        }
    };

    Ok(Some(field))
}

/// The single type a known header field's variant must carry.
fn expected_type(code: HeaderFieldCode) -> Option<DBusType> {
    Some(match code {
        HeaderFieldCode::PATH => DBusType::ObjectPath,
        HeaderFieldCode::INTERFACE => DBusType::String,
        HeaderFieldCode::MEMBER => DBusType::String,
        HeaderFieldCode::ERROR_NAME => DBusType::String,
        HeaderFieldCode::REPLY_SERIAL => DBusType::UInt32,
        HeaderFieldCode::DESTINATION => DBusType::String,
        HeaderFieldCode::SENDER => DBusType::String,
        HeaderFieldCode::SIGNATURE => DBusType::Signature,
        HeaderFieldCode::UNIX_FDS => DBusType::UInt32,
        _ => return None,
    })
}

/// Advance `reader` past one complete value described by `types`, without
/// interpreting it. Used to stay aligned across header fields this crate
/// doesn't know the meaning of.
fn skip_value(reader: &mut Reader<'_>, types: &[DBusType]) -> Result<()> {
    match types[0] {
        DBusType::Byte => {
            reader.read_primitive::<u8>()?;
        }
        DBusType::Boolean => {
            reader.read_bool()?;
        }
        DBusType::Int16 => {
            reader.read_primitive::<i16>()?;
        }
        DBusType::UInt16 => {
            reader.read_primitive::<u16>()?;
        }
        DBusType::Int32 => {
            reader.read_primitive::<i32>()?;
        }
        DBusType::UInt32 | DBusType::UnixFd => {
            reader.read_primitive::<u32>()?;
        }
        DBusType::Int64 => {
            reader.read_primitive::<i64>()?;
        }
        DBusType::UInt64 => {
            reader.read_primitive::<u64>()?;
        }
        DBusType::Double => {
            reader.read_primitive::<f64>()?;
        }
        DBusType::String | DBusType::ObjectPath => {
            reader.read_string()?;
        }
        DBusType::Signature => {
            reader.read_signature()?;
        }
        DBusType::Variant => {
            let inner = reader.read_variant()?;
            skip_value(reader, inner.types())?;
        }
        DBusType::Array => {
            let element = &types[1..];
            let align = element[0].align();
            let mut sub = reader.read_array_frame(align)?;

            while !sub.is_empty() {
                skip_value(&mut sub, element)?;
            }
        }
        DBusType::Struct => {
            reader.align_to(8)?;
            let DBusType::StructLength(n) = types[1] else {
                unreachable!("STRUCT must be followed by StructLength")
            };
            let mut rest = &types[2..];

            for _ in 0..n {
                skip_value(reader, rest)?;
                rest = &rest[crate::signature::complete_len(rest)..];
            }
        }
        DBusType::DictEntry => {
            reader.align_to(8)?;
            let DBusType::DictEntryLength(n) = types[1] else {
                unreachable!("DICT_ENTRY must be followed by DictEntryLength")
            };
            let mut rest = &types[2..];

            for _ in 0..n {
                skip_value(reader, rest)?;
                rest = &rest[crate::signature::complete_len(rest)..];
            }
        }
        DBusType::StructLength(_) | DBusType::DictEntryLength(_) => {
            unreachable!("length markers are never a value on their own")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_header, MessageType};

    fn pad(buf: &mut Vec<u8>, align: usize) {
        while !buf.len().is_multiple_of(align) {
            buf.push(0);
        }
    }

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_string_field(buf: &mut Vec<u8>, code: u8, type_code: u8, s: &str) {
        pad(buf, 8);
        buf.push(code);
        buf.push(1);
        buf.push(type_code);
        buf.push(0);
        pad(buf, 4);
        push_u32(buf, s.len() as u32);
        buf.extend_from_slice(s.as_bytes());
        buf.push(0);
    }

    fn minimal_header(msg_type: u8, serial: u32, fields: &[u8]) -> Vec<u8> {
        let mut buf = vec![b'l', msg_type, 0, 1];
        push_u32(&mut buf, 0);
        push_u32(&mut buf, serial);
        push_u32(&mut buf, fields.len() as u32);
        buf.extend_from_slice(fields);
        pad(&mut buf, 8);
        buf
    }

    #[test]
    fn minimal_method_call_header_little_endian() {
        let buf = minimal_header(1, 0, &[]);
        assert_eq!(
            buf,
            [0x6C, 0x01, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );

        let (header, body) = decode_header(&buf).unwrap();
        assert_eq!(header.msg_type, MessageType::MethodCall);
        assert_eq!(header.version, 1);
        assert_eq!(header.body_length, 0);
        assert_eq!(header.serial, 0);
        assert!(header.fields.is_empty());
        assert_eq!(header.warnings, [super::HeaderWarning::ZeroSerial]);
        assert!(body.is_empty());
    }

    #[test]
    fn method_call_with_path_and_member() {
        let mut fields = Vec::new();
        push_string_field(&mut fields, 1, b'o', "/foo");
        push_string_field(&mut fields, 3, b's', "Bar");

        let buf = minimal_header(1, 5, &fields);
        let (header, _) = decode_header(&buf).unwrap();

        assert_eq!(header.path().unwrap().as_str(), "/foo");
        assert_eq!(header.member(), Some("Bar"));
        assert!(header.warnings.is_empty());
        header.check_required_fields().unwrap();
    }

    #[test]
    fn missing_required_field_is_detected_separately_from_decode() {
        let mut fields = Vec::new();
        push_string_field(&mut fields, 1, b'o', "/foo");

        let buf = minimal_header(1, 5, &fields);
        let (header, _) = decode_header(&buf).unwrap();
        assert!(header.check_required_fields().is_err());
    }

    #[test]
    fn duplicate_header_field_is_rejected() {
        let mut fields = Vec::new();
        push_string_field(&mut fields, 1, b'o', "/foo");
        push_string_field(&mut fields, 1, b'o', "/bar");

        let buf = minimal_header(1, 5, &fields);
        assert!(decode_header(&buf).is_err());
    }

    #[test]
    fn invalid_endian_byte_is_rejected() {
        let buf = minimal_header(1, 0, &[]);
        let mut buf = buf;
        buf[0] = b'x';
        assert!(decode_header(&buf).is_err());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut buf = minimal_header(1, 0, &[]);
        buf[3] = 2;
        assert!(decode_header(&buf).is_err());
    }
}
