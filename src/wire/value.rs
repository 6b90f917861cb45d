//! Operand values passed to the encoder and produced by the dispatcher.

use crate::prelude::*;
use crate::shared::catalog::Scalar;

macro_rules! impl_values {
    ( $( $variant:ident : $ty:ident ),+ ) => {
        /// An operand value.
        #[derive(Copy, Clone, Debug, PartialEq)]
        pub enum Value {
            $( $variant($ty), )+
            /// Heap handle of a memory operand.
            Handle(u32),
            /// Absent nullable memory operand. Travels as handle `0`.
            Null,
            /// Enum map member, identified by its position in the map.
            Member(u64),
        }

        impl Value {
            /// Scalar type of an immediate value, `None` for handles, null and enum members.
            pub fn scalar(self: &Self) -> Option<Scalar> {
                match self {
                    $( Value::$variant(_) => Some(Scalar::$ty), )+
                    _ => None,
                }
            }
            /// Converts a member position into a value of the given underlying scalar.
            pub(crate) fn from_index(scalar: Scalar, index: u64) -> Value {
                match scalar {
                    $( Scalar::$ty => Value::$variant(index as $ty), )+
                }
            }
        }
    };
}

impl_values! {
    U8: u8, I8: i8, U16: u16, I16: i16, U32: u32, I32: i32, U64: u64, I64: i64, F32: f32, F64: f64
}

impl Value {
    /// Interprets an integer value as member position. `None` for negative values and floats.
    pub(crate) fn to_index(self: &Self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v as u64),
            Value::U16(v) => Some(v as u64),
            Value::U32(v) => Some(v as u64),
            Value::U64(v) => Some(v),
            Value::I8(v) => u64::try_from(v).ok(),
            Value::I16(v) => u64::try_from(v).ok(),
            Value::I32(v) => u64::try_from(v).ok(),
            Value::I64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }
}

/// Signed immediates are listed with their sign, `-1` as `$0x-1`.
fn signed_hex(f: &mut fmt::Formatter<'_>, v: i64) -> fmt::Result {
    if v < 0 {
        write!(f, "$0x-{:x}", v.unsigned_abs())
    } else {
        write!(f, "$0x{:x}", v)
    }
}

impl Display for Value {
    /// Formats the value the way the disassembler lists it.
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::U8(v) => write!(f, "$0x{:x}", v),
            Value::I8(v) => signed_hex(f, *v as i64),
            Value::U16(v) => write!(f, "$0x{:x}", v),
            Value::I16(v) => signed_hex(f, *v as i64),
            Value::U32(v) => write!(f, "$0x{:x}", v),
            Value::I32(v) => signed_hex(f, *v as i64),
            Value::U64(v) => write!(f, "$0x{:x}", v),
            Value::I64(v) => signed_hex(f, *v as i64),
            Value::F32(v) => write!(f, "${}", v),
            Value::F64(v) => write!(f, "${}", v),
            Value::Handle(v) => write!(f, "%0x{:x}", v),
            Value::Null => write!(f, "%0x0"),
            Value::Member(v) => write!(f, "$0x{:x}", v),
        }
    }
}
