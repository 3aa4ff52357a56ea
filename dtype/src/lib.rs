//! Value type descriptors for the tessera IR.
//!
//! A [`Type`] describes the value an expression produces: a [`TypeCode`]
//! (signed/unsigned integer, float, boolean, or opaque handle), a bit width,
//! and a vector lane count (1 meaning scalar). Types are small `Copy` values
//! and are compared structurally.

use std::fmt;

pub mod ext;

#[cfg(feature = "proptest")]
pub mod proptest_gen;


/// Kind of value a [`Type`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumIter)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
pub enum TypeCode {
    Int,
    UInt,
    Float,
    Bool,
    /// Opaque pointer-sized handle. Carries no arithmetic.
    Handle,
}

/// Value descriptor: type code, bit width, vector lane count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type {
    code: TypeCode,
    bits: u8,
    lanes: u16,
}

impl Type {
    pub const fn int(bits: u8, lanes: u16) -> Self {
        Self { code: TypeCode::Int, bits, lanes }
    }

    pub const fn uint(bits: u8, lanes: u16) -> Self {
        Self { code: TypeCode::UInt, bits, lanes }
    }

    pub const fn float(bits: u8, lanes: u16) -> Self {
        Self { code: TypeCode::Float, bits, lanes }
    }

    /// Boolean type. Always one bit wide.
    pub const fn bool(lanes: u16) -> Self {
        Self { code: TypeCode::Bool, bits: 1, lanes }
    }

    /// Opaque handle type (pointer-sized, scalar).
    pub const fn handle() -> Self {
        Self { code: TypeCode::Handle, bits: 64, lanes: 1 }
    }

    pub const INT8: Self = Self::int(8, 1);
    pub const INT16: Self = Self::int(16, 1);
    pub const INT32: Self = Self::int(32, 1);
    pub const INT64: Self = Self::int(64, 1);
    pub const UINT8: Self = Self::uint(8, 1);
    pub const UINT16: Self = Self::uint(16, 1);
    pub const UINT32: Self = Self::uint(32, 1);
    pub const UINT64: Self = Self::uint(64, 1);
    pub const FLOAT16: Self = Self::float(16, 1);
    pub const FLOAT32: Self = Self::float(32, 1);
    pub const FLOAT64: Self = Self::float(64, 1);
    pub const BOOL: Self = Self::bool(1);

    pub const fn code(&self) -> TypeCode {
        self.code
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn lanes(&self) -> u16 {
        self.lanes
    }

    pub const fn is_int(&self) -> bool {
        matches!(self.code, TypeCode::Int)
    }

    pub const fn is_uint(&self) -> bool {
        matches!(self.code, TypeCode::UInt)
    }

    pub const fn is_float(&self) -> bool {
        matches!(self.code, TypeCode::Float)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self.code, TypeCode::Bool)
    }

    pub const fn is_handle(&self) -> bool {
        matches!(self.code, TypeCode::Handle)
    }

    pub const fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    pub const fn is_vector(&self) -> bool {
        self.lanes > 1
    }

    /// The scalar element type: the same code and bits with lanes stripped
    /// to 1.
    pub const fn element_of(&self) -> Self {
        Self { code: self.code, bits: self.bits, lanes: 1 }
    }

    /// The same element type with a different lane count.
    pub const fn with_lanes(&self, lanes: u16) -> Self {
        Self { code: self.code, bits: self.bits, lanes }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            TypeCode::Int => write!(f, "int{}", self.bits)?,
            TypeCode::UInt => write!(f, "uint{}", self.bits)?,
            TypeCode::Float => write!(f, "float{}", self.bits)?,
            TypeCode::Bool => write!(f, "bool")?,
            TypeCode::Handle => write!(f, "handle")?,
        }
        if self.lanes > 1 {
            write!(f, "x{}", self.lanes)?;
        }
        Ok(())
    }
}
