/// A single entry in a parsed, vectorized [`Signature`].
///
/// Container types are flattened into the surrounding sequence rather than
/// nested in a tree: a `STRUCT` is immediately followed by a
/// `StructLength(k)` marker and then exactly `k` complete child entries, and
/// a `DictEntry` is immediately followed by `DictEntryLength(2)` and its key
/// and value entries. This keeps a whole signature in one flat allocation
/// and lets callers walk it with plain index arithmetic instead of pointer
/// chasing.
///
/// [`Signature`]: super::Signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DBusType {
    Byte,
    Boolean,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Double,
    UnixFd,
    String,
    ObjectPath,
    Signature,
    Variant,
    Struct,
    /// Child count of the `Struct` this immediately follows.
    StructLength(u8),
    Array,
    DictEntry,
    /// Child count of the `DictEntry` this immediately follows. Always 2.
    DictEntryLength(u8),
}

impl DBusType {
    /// Natural alignment of this type's value on the wire.
    ///
    /// `StructLength`/`DictEntryLength` are bookkeeping markers with no wire
    /// representation of their own; asking for their alignment is a bug in
    /// the caller.
    pub(crate) fn align(self) -> usize {
        match self {
            DBusType::Byte => 1,
            DBusType::Boolean => 4,
            DBusType::Int16 | DBusType::UInt16 => 2,
            DBusType::Int32 | DBusType::UInt32 | DBusType::UnixFd => 4,
            DBusType::Int64 | DBusType::UInt64 | DBusType::Double => 8,
            DBusType::String | DBusType::ObjectPath => 4,
            DBusType::Signature | DBusType::Variant => 1,
            DBusType::Array => 4,
            DBusType::Struct | DBusType::DictEntry => 8,
            DBusType::StructLength(_) | DBusType::DictEntryLength(_) => {
                unreachable!("length markers have no wire alignment")
            }
        }
    }

    /// Single-byte type code this entry corresponds to, as used in a
    /// signature string. Returns `None` for the vectorized-only length
    /// markers.
    pub(crate) const fn code(self) -> Option<u8> {
        Some(match self {
            DBusType::Byte => b'y',
            DBusType::Boolean => b'b',
            DBusType::Int16 => b'n',
            DBusType::UInt16 => b'q',
            DBusType::Int32 => b'i',
            DBusType::UInt32 => b'u',
            DBusType::Int64 => b'x',
            DBusType::UInt64 => b't',
            DBusType::Double => b'd',
            DBusType::UnixFd => b'h',
            DBusType::String => b's',
            DBusType::ObjectPath => b'o',
            DBusType::Signature => b'g',
            DBusType::Variant => b'v',
            DBusType::Struct => b'(',
            DBusType::Array => b'a',
            DBusType::DictEntry => b'{',
            DBusType::StructLength(_) | DBusType::DictEntryLength(_) => return None,
        })
    }

    /// Whether this is a basic (non-container) type, the only kind allowed
    /// as a dict-entry key.
    pub(crate) const fn is_basic(self) -> bool {
        matches!(
            self,
            DBusType::Byte
                | DBusType::Boolean
                | DBusType::Int16
                | DBusType::UInt16
                | DBusType::Int32
                | DBusType::UInt32
                | DBusType::Int64
                | DBusType::UInt64
                | DBusType::Double
                | DBusType::UnixFd
                | DBusType::String
                | DBusType::ObjectPath
                | DBusType::Signature
        )
    }
}
