use core::num::NonZeroUsize;
use crate::prelude::*;

/// Macro to implement typesafe ids.
macro_rules! impl_typed_id {
    ($name:ident, $string:expr) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[doc = $string]
        pub struct $name(NonZeroUsize);
        impl $name {
            /// Converts the typed id into a usize. Useful to avoid `Into::<usize>::into(self)` when inference fails.
            pub fn into_usize(self: Self) -> usize {
                self.into()
            }
            /// Creates a new typed id from given usize.
            pub const fn new(input: usize) -> Self {
                Self(match NonZeroUsize::new(input + 1) {
                    Some(v) => v,
                    None => panic!("Input usize overflowed"),
                })
            }
        }
        impl From<$name> for usize {
            fn from(input: $name) -> usize {
                Into::<usize>::into(input.0) - 1
            }
        }
        impl From<usize> for $name {
            fn from(input: usize) -> $name {
                Self::new(input)
            }
        }
        impl Debug for $name {
            fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.into_usize())
            }
        }
    };
}

impl_typed_id!(OpcodeId, "Position of an opcode in declaration order.");
impl_typed_id!(EnumMapId, "Position of an enum map in declaration order.");
impl_typed_id!(HeapTypeId, "Position of a heap type in the type catalog.");
