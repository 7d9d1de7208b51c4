//! Identifiers and descriptors of dataset variables

use super::DType;

/// Group (namespace) identifier; the dataset root is a group too
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

impl GroupId {
    pub const ROOT: GroupId = GroupId(0);
}

/// Variable identifier, local to its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// Fully qualified variable identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarRef {
    pub group: GroupId,
    pub var: VarId,
}

impl VarRef {
    pub fn new(group: GroupId, var: VarId) -> Self {
        Self { group, var }
    }
}

/// Variable metadata as reported by the storage engine
///
/// Fetched fresh for every access: unlimited dimensions may have grown
/// since the last call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: VarRef,
    pub name: String,
    pub dtype: DType,
    /// Dimension lengths in storage order (slowest-varying first)
    pub shape: Vec<usize>,
}

impl Variable {
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements (1 for a scalar)
    pub fn num_elements(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of axes longer than 1
    pub fn non_degenerate_dims(&self) -> usize {
        self.shape.iter().filter(|&&len| len > 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(shape: Vec<usize>) -> Variable {
        Variable {
            id: VarRef::new(GroupId::ROOT, VarId(0)),
            name: "temp".into(),
            dtype: DType::F32,
            shape,
        }
    }

    #[test]
    fn counts() {
        let v = var(vec![1, 4, 1, 3]);
        assert_eq!(v.ndims(), 4);
        assert_eq!(v.num_elements(), 12);
        assert_eq!(v.non_degenerate_dims(), 2);
    }

    #[test]
    fn scalar_has_one_element() {
        let v = var(vec![]);
        assert_eq!(v.ndims(), 0);
        assert_eq!(v.num_elements(), 1);
    }
}
