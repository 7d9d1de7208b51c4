//! Host-side arrays returned by reads and accepted by writes

/// Values in host layout
///
/// `dims` lists the result dimensions in host order (fastest-varying axis
/// first) with degenerate axes dropped. `data` is in the storage engine's
/// row-major order, which is the host's column-major order over `dims`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray<T> {
    pub dims: Vec<usize>,
    pub data: Vec<T>,
}

impl<T> HostArray<T> {
    pub fn new(dims: Vec<usize>, data: Vec<T>) -> Self {
        Self { dims, data }
    }

    /// Total number of elements
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }
}

/// Result of a type-dispatched read
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    Int(HostArray<i32>),
    Double(HostArray<f64>),
    /// Fixed-width text, one string per slot of the non-character axes
    Text(HostArray<String>),
    /// Variable-length strings
    Strings(HostArray<String>),
}

impl HostData {
    pub fn dims(&self) -> &[usize] {
        match self {
            HostData::Int(a) => &a.dims,
            HostData::Double(a) => &a.dims,
            HostData::Text(a) | HostData::Strings(a) => &a.dims,
        }
    }

    /// Try to get as host integers
    pub fn as_int(&self) -> Option<&HostArray<i32>> {
        match self {
            HostData::Int(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as host doubles
    pub fn as_double(&self) -> Option<&HostArray<f64>> {
        match self {
            HostData::Double(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as strings (fixed-width text or variable-length)
    pub fn as_strings(&self) -> Option<&HostArray<String>> {
        match self {
            HostData::Text(a) | HostData::Strings(a) => Some(a),
            _ => None,
        }
    }
}
