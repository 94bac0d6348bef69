//! Fixed-width binary encoding for elements paged to secondary storage.
//!
//! All multi-byte values are little-endian. There is no header, tag or
//! padding: an encoded sequence is just `len * BYTE_WIDTH` bytes.

use num_complex::Complex;

/// An element with a fixed-width byte encoding.
///
/// `encode` writes exactly `BYTE_WIDTH` bytes into `out[..BYTE_WIDTH]`;
/// `decode` reads exactly that many from `bytes[..BYTE_WIDTH]`.
pub trait ByteCodec: Sized {
    /// Encoded width in bytes.
    const BYTE_WIDTH: usize;

    /// Encode `self` into the first `BYTE_WIDTH` bytes of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < BYTE_WIDTH`.
    fn encode(&self, out: &mut [u8]);

    /// Decode a value from the first `BYTE_WIDTH` bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() < BYTE_WIDTH`.
    fn decode(bytes: &[u8]) -> Self;
}

macro_rules! impl_le_codec {
    ($($t:ty),* $(,)?) => {
        $(
            impl ByteCodec for $t {
                const BYTE_WIDTH: usize = std::mem::size_of::<$t>();

                fn encode(&self, out: &mut [u8]) {
                    out[..Self::BYTE_WIDTH].copy_from_slice(&self.to_le_bytes());
                }

                fn decode(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(&bytes[..Self::BYTE_WIDTH]);
                    <$t>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_le_codec!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl ByteCodec for bool {
    const BYTE_WIDTH: usize = 1;

    fn encode(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl<T: ByteCodec> ByteCodec for Complex<T> {
    const BYTE_WIDTH: usize = 2 * T::BYTE_WIDTH;

    fn encode(&self, out: &mut [u8]) {
        self.re.encode(&mut out[..T::BYTE_WIDTH]);
        self.im.encode(&mut out[T::BYTE_WIDTH..Self::BYTE_WIDTH]);
    }

    fn decode(bytes: &[u8]) -> Self {
        Complex::new(
            T::decode(&bytes[..T::BYTE_WIDTH]),
            T::decode(&bytes[T::BYTE_WIDTH..Self::BYTE_WIDTH]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_primitive_sizes() {
        assert_eq!(<u8 as ByteCodec>::BYTE_WIDTH, 1);
        assert_eq!(<i64 as ByteCodec>::BYTE_WIDTH, 8);
        assert_eq!(<Complex<f32> as ByteCodec>::BYTE_WIDTH, 8);
        assert_eq!(<Complex<f64> as ByteCodec>::BYTE_WIDTH, 16);
    }

    #[test]
    fn encoding_is_little_endian() {
        let mut buf = [0u8; 4];
        0x0403_0201u32.encode(&mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn complex_encodes_real_then_imaginary() {
        let mut buf = [0u8; 16];
        let z = Complex::new(1.5f64, -2.0);
        z.encode(&mut buf);
        assert_eq!(f64::decode(&buf[..8]), 1.5);
        assert_eq!(f64::decode(&buf[8..]), -2.0);
        assert_eq!(Complex::<f64>::decode(&buf), z);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let buf = [7u8, 0, 0xff, 0xff];
        assert_eq!(u16::decode(&buf), 7);
        assert!(bool::decode(&[1, 0]));
    }
}
