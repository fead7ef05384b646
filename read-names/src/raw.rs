//! types for working with raw big-endian bytes

/// A trait for scalars that can be read from raw big-endian bytes.
///
/// You do not usually need to use this trait directly; it exists so that
/// [`FontData`][crate::FontData] and [`Cursor`][crate::Cursor] can read any
/// fixed-width field type.
pub trait Scalar: Sized {
    /// The size of the encoded value, in bytes.
    const RAW_BYTE_LEN: usize;

    /// Read an instance of this type from the front of `bytes`.
    ///
    /// Returns `None` if `bytes` is shorter than
    /// [`RAW_BYTE_LEN`](Self::RAW_BYTE_LEN).
    fn read(bytes: &[u8]) -> Option<Self>;
}

macro_rules! int_scalar {
    ($ty:ty) => {
        impl Scalar for $ty {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$ty>();

            fn read(bytes: &[u8]) -> Option<Self> {
                bytes
                    .get(..Self::RAW_BYTE_LEN)
                    .map(|raw| Self::from_be_bytes(raw.try_into().unwrap()))
            }
        }
    };
}

int_scalar!(u8);
int_scalar!(i8);
int_scalar!(u16);
int_scalar!(i16);
int_scalar!(u32);
int_scalar!(i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input() {
        assert_eq!(u16::read(&[0x04]), None);
        assert_eq!(u16::read(&[0x04, 0x09]), Some(0x0409));
    }

    #[test]
    fn extra_bytes_ignored() {
        assert_eq!(u16::read(&[0x00, 0x01, 0xFF]), Some(1));
    }
}
