use crate::protocol::Endianness;

/// A fixed-size, fixed-alignment scalar that can be read directly out of an
/// aligned byte buffer.
///
/// Every bit pattern of a `Frame`'s wire width is a valid value, which is
/// what makes it safe to decode straight out of attacker-controlled bytes.
/// `BOOLEAN` is deliberately not a `Frame`: its wire width is 4 bytes like
/// `UINT32`, but only `0` and `1` are valid, so [`Reader`](crate::Reader)
/// validates it separately after loading a `u32`.
pub(crate) trait Frame: Copy {
    /// Natural alignment of this frame, in bytes.
    const ALIGN: usize;
    /// Size of this frame on the wire, in bytes.
    const SIZE: usize;

    /// Decode `self` from exactly `Self::SIZE` bytes, honoring `endian`.
    fn from_bytes(bytes: &[u8], endian: Endianness) -> Self;
}

impl Frame for u8 {
    const ALIGN: usize = 1;
    const SIZE: usize = 1;

    #[inline]
    fn from_bytes(bytes: &[u8], _: Endianness) -> Self {
        bytes[0]
    }
}

impl Frame for i8 {
    const ALIGN: usize = 1;
    const SIZE: usize = 1;

    #[inline]
    fn from_bytes(bytes: &[u8], _: Endianness) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_frame {
    ($ty:ty, $size:expr) => {
        impl Frame for $ty {
            const ALIGN: usize = $size;
            const SIZE: usize = $size;

            #[inline]
            fn from_bytes(bytes: &[u8], endian: Endianness) -> Self {
                let array = bytes[..$size].try_into().expect("slice has exact length");

                match endian {
                    Endianness::LITTLE => <$ty>::from_le_bytes(array),
                    _ => <$ty>::from_be_bytes(array),
                }
            }
        }
    };
}

impl_frame!(u16, 2);
impl_frame!(i16, 2);
impl_frame!(u32, 4);
impl_frame!(i32, 4);
impl_frame!(u64, 8);
impl_frame!(i64, 8);

impl Frame for f64 {
    const ALIGN: usize = 8;
    const SIZE: usize = 8;

    #[inline]
    fn from_bytes(bytes: &[u8], endian: Endianness) -> Self {
        f64::from_bits(u64::from_bytes(bytes, endian))
    }
}
