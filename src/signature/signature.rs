use std::fmt;
use std::str::from_utf8_unchecked;

use super::dbus_type::DBusType;
use super::validation::parse;
use super::{Iter, SignatureError};

/// A parsed D-Bus signature: an ordered, vectorized sequence of [`DBusType`].
///
/// # Examples
///
/// ```
/// use dbus_wire::Signature;
///
/// let sig = Signature::parse(b"a{ys}").unwrap();
/// assert_eq!(sig.render(), b"a{ys}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    types: Vec<DBusType>,
}

impl Signature {
    /// The empty signature, as used for a message with no body.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// Parse a signature string into its vectorized representation.
    ///
    /// An empty string is accepted and produces an empty signature: D-Bus
    /// defines a signature as "zero or more single complete types".
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::Signature;
    ///
    /// assert!(Signature::parse(b"").unwrap().is_empty());
    /// assert!(Signature::parse(b"aai").is_ok());
    /// assert!(Signature::parse(b"(a)").is_err());
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, SignatureError> {
        Ok(Self {
            types: parse(bytes)?,
        })
    }

    /// Test if the signature names zero complete types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The vectorized type sequence.
    pub fn types(&self) -> &[DBusType] {
        &self.types
    }

    /// Iterate over the top-level complete types.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::signature::Type;
    /// use dbus_wire::{DBusType, Signature};
    ///
    /// let sig = Signature::parse(b"ii").unwrap();
    /// let items: Vec<_> = sig.iter().collect();
    /// assert_eq!(
    ///     items,
    ///     [Type::Scalar(DBusType::Int32), Type::Scalar(DBusType::Int32)]
    /// );
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.types)
    }

    /// Render this signature back into its canonical byte-string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use dbus_wire::Signature;
    ///
    /// let sig = Signature::parse(b"(y(y(y(y))))").unwrap();
    /// assert_eq!(sig.render(), b"(y(y(y(y))))");
    /// ```
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut i = 0;

        while i < self.types.len() {
            i += render_one(&self.types[i..], &mut out);
        }

        out
    }
}

fn render_one(types: &[DBusType], out: &mut Vec<u8>) -> usize {
    match types[0] {
        DBusType::Array => {
            out.push(b'a');
            1 + render_one(&types[1..], out)
        }
        DBusType::Struct => {
            let DBusType::StructLength(n) = types[1] else {
                unreachable!("STRUCT must be followed by StructLength")
            };

            out.push(b'(');
            let mut i = 2;

            for _ in 0..n {
                i += render_one(&types[i..], out);
            }

            out.push(b')');
            i
        }
        DBusType::DictEntry => {
            let DBusType::DictEntryLength(n) = types[1] else {
                unreachable!("DICT_ENTRY must be followed by DictEntryLength")
            };

            out.push(b'{');
            let mut i = 2;

            for _ in 0..n {
                i += render_one(&types[i..], out);
            }

            out.push(b'}');
            i
        }
        DBusType::StructLength(_) | DBusType::DictEntryLength(_) => {
            unreachable!("length markers are never rendered on their own")
        }
        scalar => {
            out.push(scalar.code().expect("scalar type always has a code"));
            1
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render();
        // The signature grammar only ever produces ASCII bytes.
        f.write_str(unsafe { from_utf8_unchecked(&rendered) })
    }
}
