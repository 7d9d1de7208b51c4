//! Element types of dataset variables

/// Element type of a variable
///
/// Tags follow the storage format's external type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    I8 = 1,
    Char = 2,
    I16 = 3,
    I32 = 4,
    F32 = 5,
    F64 = 6,
    U8 = 7,
    U16 = 8,
    U32 = 9,
    I64 = 10,
    U64 = 11,
    /// Variable-length string
    String = 12,
}

/// Host representation a variable is marshalled into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Int,
    Double,
    Text,
    Strings,
}

impl DType {
    /// Try to convert from a storage type code
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(DType::I8),
            2 => Some(DType::Char),
            3 => Some(DType::I16),
            4 => Some(DType::I32),
            5 => Some(DType::F32),
            6 => Some(DType::F64),
            7 => Some(DType::U8),
            8 => Some(DType::U16),
            9 => Some(DType::U32),
            10 => Some(DType::I64),
            11 => Some(DType::U64),
            12 => Some(DType::String),
            _ => None,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::I8
                | DType::U8
                | DType::I16
                | DType::U16
                | DType::I32
                | DType::U32
                | DType::I64
                | DType::U64
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Host representation for this element type
    ///
    /// Integers that fit a host `i32` stay integers; wider integers and
    /// floats travel as doubles.
    pub fn host_kind(self) -> HostKind {
        match self {
            DType::I8 | DType::U8 | DType::I16 | DType::U16 | DType::I32 => HostKind::Int,
            DType::U32 | DType::I64 | DType::U64 | DType::F32 | DType::F64 => HostKind::Double,
            DType::Char => HostKind::Text,
            DType::String => HostKind::Strings,
        }
    }
}
