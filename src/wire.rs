//! The wire codec.
//!
//! A message is its envelope immediately followed by its payload fields in declaration order,
//! with no padding. Integers are fixed-width little-endian, `f64` is its IEEE-754 bit pattern in
//! little-endian, `bool` is a single `0`/`1` byte, and fixed-length arrays keep element order.
use crate::function::Function;

pub use armlink_derive::Wire;

/// Errors produced while encoding or decoding messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The buffer ended before the value did.
    #[error("buffer too small: needed {needed} bytes, {available} available")]
    BufferTooSmall {
        /// Bytes required up to the end of the value.
        needed: usize,
        /// Bytes the buffer holds.
        available: usize,
    },
    /// Bytes were left over after a complete message.
    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
    /// The function tag is not in the catalog.
    #[error("unknown function identifier {0}")]
    UnknownFunction(u32),
    /// The function tag names a different command than the one being decoded.
    #[error("message belongs to {actual}, expected {expected}")]
    FunctionMismatch {
        /// The command being decoded.
        expected: Function,
        /// The command named by the tag.
        actual: Function,
    },
    /// The status value is not in the command's status set.
    #[error("unknown status {value} for {function}")]
    UnknownStatus {
        /// The command the status belongs to.
        function: Function,
        /// The raw status value.
        value: u32,
    },
    /// An enumerated payload field holds an undefined value.
    #[error("invalid {kind} value {value}")]
    InvalidDiscriminant {
        /// Name of the enumeration.
        kind: &'static str,
        /// The raw value.
        value: u32,
    },
    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {0:#04x}")]
    InvalidBool(u8),
    /// A slice had the wrong number of elements for a fixed-length field.
    #[error("expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// The fixed length of the field.
        expected: usize,
        /// The length supplied.
        actual: usize,
    },
}

/// Writes values into a byte buffer.
#[derive(Debug)]
pub struct Encoder<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Encoder<'a> {
    /// Create an encoder writing from the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Append raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        let end = self.pos + bytes.len();
        let available = self.buf.len();
        let dest = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(WireError::BufferTooSmall {
                needed: end,
                available,
            })?;
        dest.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// Reads values out of a byte buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder reading from the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume exactly `N` bytes.
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let end = self.pos + N;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or(WireError::BufferTooSmall {
                needed: end,
                available: self.buf.len(),
            })?;
        self.pos = end;
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Ensure the whole buffer was consumed.
    pub fn finish(self) -> Result<(), WireError> {
        match self.remaining() {
            0 => Ok(()),
            left => Err(WireError::TrailingBytes(left)),
        }
    }
}

/// A value with a fixed-size wire representation.
pub trait Wire: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Append the encoded value.
    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError>;

    /// Read one value.
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError>;

    /// Encode into the start of `buf`, returning the number of bytes written.
    fn encode_to_slice(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut encoder = Encoder::new(buf);
        self.encode(&mut encoder)?;
        Ok(encoder.position())
    }

    /// Decode a value that spans all of `bytes`.
    fn decode_from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        let mut decoder = Decoder::new(bytes);
        let value = Self::decode(&mut decoder)?;
        decoder.finish()?;
        Ok(value)
    }

    /// Encode into a freshly allocated buffer.
    #[cfg(feature = "std")]
    fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        let mut buf = vec![0; Self::SIZE];
        let written = self.encode_to_slice(&mut buf)?;
        buf.truncate(written);
        Ok(buf)
    }
}

macro_rules! le_wire {
    ($name:ident) => {
        impl Wire for $name {
            const SIZE: usize = core::mem::size_of::<$name>();

            fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
                encoder.write_bytes(&self.to_le_bytes())
            }

            fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
                Ok($name::from_le_bytes(decoder.read_bytes()?))
            }
        }
    };
    ($($name:ident),+) => {
        $(
            le_wire!($name);
        )+
    };
}

le_wire!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Wire for bool {
    const SIZE: usize = 1;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        encoder.write_bytes(&[u8::from(*self)])
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        match decoder.read_bytes::<1>()? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(WireError::InvalidBool(other)),
        }
    }
}

impl<T, const N: usize> Wire for [T; N]
where
    T: Wire + Copy + Default,
{
    const SIZE: usize = T::SIZE * N;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        self.iter().try_for_each(|item| item.encode(encoder))
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        let mut out = [T::default(); N];
        for slot in out.iter_mut() {
            *slot = T::decode(decoder)?;
        }
        Ok(out)
    }
}

/// Copy a slice into a fixed-length array, rejecting any other length.
pub fn fixed<T: Copy + Default, const N: usize>(values: &[T]) -> Result<[T; N], WireError> {
    <[T; N]>::try_from(values).map_err(|_| WireError::LengthMismatch {
        expected: N,
        actual: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_integers() {
        let mut buf = [0u8; 4];
        assert_eq!(0x0102_0304u32.encode_to_slice(&mut buf), Ok(4));
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(u32::decode_from_slice(&buf), Ok(0x0102_0304));
    }

    #[test]
    fn test_f64_bits() {
        let mut buf = [0u8; 8];
        1.5f64.encode_to_slice(&mut buf).unwrap();
        assert_eq!(buf, 1.5f64.to_bits().to_le_bytes());
        assert_eq!(f64::decode_from_slice(&buf), Ok(1.5));
    }

    #[test]
    fn test_bool_is_one_byte() {
        assert_eq!(bool::SIZE, 1);
        assert_eq!(bool::decode_from_slice(&[1]), Ok(true));
        assert_eq!(bool::decode_from_slice(&[0]), Ok(false));
        assert_eq!(bool::decode_from_slice(&[2]), Err(WireError::InvalidBool(2)));
    }

    #[test]
    fn test_array_size_has_no_padding() {
        assert_eq!(<[f64; 16]>::SIZE, 128);
        assert_eq!(<[bool; 6]>::SIZE, 6);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 3];
        assert_eq!(
            7u32.encode_to_slice(&mut buf),
            Err(WireError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(
            u32::decode_from_slice(&buf),
            Err(WireError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        assert_eq!(
            u16::decode_from_slice(&[1, 0, 9]),
            Err(WireError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_fixed_rejects_wrong_length() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(fixed::<f64, 3>(&values), Ok([1.0, 2.0, 3.0]));
        assert_eq!(
            fixed::<f64, 4>(&values),
            Err(WireError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}
