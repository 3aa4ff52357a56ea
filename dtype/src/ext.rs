use super::*;

/// Maps a Rust native scalar type to its IR [`Type`].
pub trait HasType {
    const TYPE: Type;
}

macro_rules! impl_has_type {
    ($($ty:ty => $ir:expr),* $(,)?) => {
        $(impl HasType for $ty { const TYPE: Type = $ir; })*
    };
}

impl_has_type! {
    bool => Type::BOOL,
    i8 => Type::INT8, i16 => Type::INT16, i32 => Type::INT32, i64 => Type::INT64,
    u8 => Type::UINT8, u16 => Type::UINT16, u32 => Type::UINT32, u64 => Type::UINT64,
    f32 => Type::FLOAT32, f64 => Type::FLOAT64,
}
