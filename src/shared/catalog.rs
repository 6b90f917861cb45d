//! Static catalog of the types operands may refer to.

use crate::prelude::*;
use crate::shared::typed_ids::HeapTypeId;

/// Parameter kind of an operand in the generated host encoder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HostKind {
    /// Plain host number, used for all scalars up to 32 bit and for floats.
    Number,
    /// Wide host integer, used for 64 bit integers.
    BigInt,
    /// Numeric heap handle.
    Handle,
}

impl HostKind {
    /// Type name used in the generated host encoder signature.
    pub fn host_name(self: Self) -> &'static str {
        match self {
            HostKind::Number => "number",
            HostKind::BigInt => "bigint",
            HostKind::Handle => "MemOp",
        }
    }
}

/// Implements the scalar catalog from a table of `name: size, host kind, native type, reader/writer tag, type id`.
macro_rules! impl_scalars {
    ( $( $name:ident : $size:literal, $host:ident, $native:literal, $tag:ident, $id:literal; )+ ) => {
        /// Scalar wire types.
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Scalar {
            $( $name, )+
        }

        impl Scalar {
            /// All scalars in type id order.
            pub const ALL: &'static [ Scalar ] = &[ $( Scalar::$name ),+ ];

            /// Looks up a scalar by its DSL token.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( stringify!($name) => Some(Scalar::$name), )+
                    _ => None,
                }
            }
            /// DSL token of the scalar.
            pub fn name(self: Self) -> &'static str {
                match self {
                    $( Scalar::$name => stringify!($name), )+
                }
            }
            /// Wire size in bytes.
            pub fn size(self: Self) -> usize {
                match self {
                    $( Scalar::$name => $size, )+
                }
            }
            /// Parameter kind in the host encoder.
            pub fn host_kind(self: Self) -> HostKind {
                match self {
                    $( Scalar::$name => HostKind::$host, )+
                }
            }
            /// Native storage type.
            pub fn native_type(self: Self) -> &'static str {
                match self {
                    $( Scalar::$name => $native, )+
                }
            }
            /// Suffix of the reader/writer method, e.g. `Uint16` for `writeUint16Unsafe`.
            pub fn rw_tag(self: Self) -> &'static str {
                match self {
                    $( Scalar::$name => stringify!($tag), )+
                }
            }
            /// Operand type id reported in the disassembler metadata. `0` is reserved for memory operands.
            pub fn type_id(self: Self) -> u8 {
                match self {
                    $( Scalar::$name => $id, )+
                }
            }
        }
    };
}

impl_scalars! {
    u8  : 1, Number, "uint8_t",  Uint8,   1;
    i8  : 1, Number, "int8_t",   Int8,    2;
    u16 : 2, Number, "uint16_t", Uint16,  3;
    i16 : 2, Number, "int16_t",  Int16,   4;
    u32 : 4, Number, "uint32_t", Uint32,  5;
    i32 : 4, Number, "int32_t",  Int32,   6;
    u64 : 8, BigInt, "uint64_t", Uint64,  7;
    i64 : 8, BigInt, "int64_t",  Int64,   8;
    f32 : 4, Number, "float",    Float32, 9;
    f64 : 8, Number, "double",   Float64, 10;
}

impl Scalar {
    /// Whether the scalar is an integer type.
    pub fn is_integer(self: Self) -> bool {
        !matches!(self, Scalar::f32 | Scalar::f64)
    }
    /// Whether the scalar is signed.
    pub fn is_signed(self: Self) -> bool {
        matches!(self, Scalar::i8 | Scalar::i16 | Scalar::i32 | Scalar::i64 | Scalar::f32 | Scalar::f64)
    }
    /// Number of distinct non-negative values the scalar can carry, i.e. the maximum number of
    /// enum members it can encode. Zero for floats.
    pub fn index_capacity(self: Self) -> u64 {
        match self {
            Scalar::u8  => 1 << 8,
            Scalar::i8  => 1 << 7,
            Scalar::u16 => 1 << 16,
            Scalar::i16 => 1 << 15,
            Scalar::u32 => 1 << 32,
            Scalar::i32 => 1 << 31,
            Scalar::u64 => u64::MAX,
            Scalar::i64 => i64::MAX as u64,
            Scalar::f32 | Scalar::f64 => 0,
        }
    }
}

impl Display for Scalar {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A heap object type. Only legal as memory operand.
#[derive(Clone, Debug, PartialEq)]
pub struct HeapType {
    /// DSL token.
    pub name: String,
    /// Native type the heap stores objects of this type as.
    pub native_type: String,
}

/// Result of a catalog lookup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CatalogEntry {
    Scalar(Scalar),
    Heap(HeapTypeId),
}

/// Type catalog consulted by the resolver. Holds the fixed scalar set and an extensible list of heap types.
#[derive(Clone, Debug)]
pub struct Catalog {
    heap_types: Vec<HeapType>,
}

impl Catalog {
    /// Creates a catalog without heap types.
    pub fn scalars_only() -> Self {
        Catalog { heap_types: Vec::new() }
    }
    /// Adds or replaces a heap type.
    pub fn with_heap_type(mut self: Self, name: &str, native_type: &str) -> Self {
        let heap_type = HeapType { name: name.to_string(), native_type: native_type.to_string() };
        match self.heap_types.iter_mut().find(|h| h.name == name) {
            Some(existing) => *existing = heap_type,
            None => self.heap_types.push(heap_type),
        }
        self
    }
    /// Looks up a type token.
    pub fn lookup(self: &Self, name: &str) -> Option<CatalogEntry> {
        if let Some(scalar) = Scalar::from_name(name) {
            Some(CatalogEntry::Scalar(scalar))
        } else {
            self.heap_types.iter().position(|h| h.name == name).map(|index| CatalogEntry::Heap(index.into()))
        }
    }
    /// Returns the heap type for the given id.
    pub fn heap_type(self: &Self, heap_type_id: HeapTypeId) -> &HeapType {
        &self.heap_types[heap_type_id.into_usize()]
    }
    /// Returns all heap types.
    pub fn heap_types(self: &Self) -> &[ HeapType ] {
        &self.heap_types
    }
}

impl Default for Catalog {
    /// The canvas object types understood by the native heap.
    fn default() -> Self {
        [
            ("string",          "SkString"),
            ("u32array",        "MoeHeap::U32Array"),
            ("f32array",        "MoeHeap::F32Array"),
            ("vec2",            "SkV2"),
            ("vec3",            "SkV3"),
            ("vec4",            "SkV4"),
            ("mat3x3",          "SkMatrix"),
            ("mat4x4",          "SkM44"),
            ("rect",            "SkRect"),
            ("rrect",           "SkRRect"),
            ("region",          "SkRegion"),
            ("path",            "SkPath"),
            ("paint",           "SkPaint"),
            ("samplingoptions", "SkSamplingOptions"),
            ("shader",          "sk_sp<SkShader>"),
            ("blender",         "sk_sp<SkBlender>"),
            ("colorfilter",     "sk_sp<SkColorFilter>"),
            ("imagefilter",     "sk_sp<SkImageFilter>"),
            ("maskfilter",      "sk_sp<SkMaskFilter>"),
            ("patheffect",      "sk_sp<SkPathEffect>"),
            ("bitmap",          "std::shared_ptr<SkBitmap>"),
            ("image",           "sk_sp<SkImage>"),
            ("picture",         "sk_sp<SkPicture>"),
        ].iter().fold(Catalog::scalars_only(), |catalog, (name, native)| catalog.with_heap_type(name, native))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_table() {
        assert_eq!(Scalar::ALL.len(), 10);
        for (index, scalar) in Scalar::ALL.iter().enumerate() {
            assert_eq!(scalar.type_id() as usize, index + 1);
            assert_eq!(Scalar::from_name(scalar.name()), Some(*scalar));
        }
        assert_eq!(Scalar::u64.host_kind(), HostKind::BigInt);
        assert_eq!(Scalar::f64.host_kind(), HostKind::Number);
        assert_eq!(Scalar::i16.size(), 2);
        assert_eq!(Scalar::f32.rw_tag(), "Float32");
    }

    #[test]
    fn default_heap_types() {
        let catalog = Catalog::default();
        match catalog.lookup("rect") {
            Some(CatalogEntry::Heap(id)) => assert_eq!(catalog.heap_type(id).native_type, "SkRect"),
            other => panic!("unexpected lookup result {:?}", other),
        }
        assert_eq!(catalog.lookup("f32"), Some(CatalogEntry::Scalar(Scalar::f32)));
        assert_eq!(catalog.lookup("widget"), None);
    }

    #[test]
    fn heap_type_replacement() {
        let catalog = Catalog::scalars_only().with_heap_type("blob", "Blob").with_heap_type("blob", "BlobRef");
        assert_eq!(catalog.heap_types().len(), 1);
        assert_eq!(catalog.heap_types()[0].native_type, "BlobRef");
    }
}
