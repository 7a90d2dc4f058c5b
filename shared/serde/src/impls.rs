use crate::{
    byte_buffer::ByteBuffer,
    error::SerdeErr,
    serde::{ConstByteLength, Serde},
};

// Numbers are written with their native width, little-endian, regardless of
// the host platform.
macro_rules! impl_serde_for_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serde for $ty {
                fn ser(&self, buffer: &mut ByteBuffer) {
                    buffer.write_bytes(&self.to_le_bytes());
                }

                fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
                    let bytes = buffer.read_array::<{ std::mem::size_of::<$ty>() }>()?;
                    Ok(<$ty>::from_le_bytes(bytes))
                }

                fn byte_length(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }

            impl ConstByteLength for $ty {
                fn const_byte_length() -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_serde_for_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Serde for bool {
    fn ser(&self, buffer: &mut ByteBuffer) {
        buffer.write(u8::from(*self));
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        match buffer.read::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerdeErr::InvalidValue {
                type_name: "bool",
                value: u64::from(other),
            }),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl ConstByteLength for bool {
    fn const_byte_length() -> usize {
        1
    }
}

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, buffer: &mut ByteBuffer) {
        match self {
            Some(value) => {
                buffer.write(true);
                value.ser(buffer);
            }
            None => {
                buffer.write(false);
            }
        }
    }

    fn de(buffer: &mut ByteBuffer) -> Result<Self, SerdeErr> {
        if buffer.read::<bool>()? {
            Ok(Some(T::de(buffer)?))
        } else {
            Ok(None)
        }
    }

    fn byte_length(&self) -> usize {
        1 + self.as_ref().map_or(0, T::byte_length)
    }
}
