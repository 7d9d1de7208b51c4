//! Storage engine boundary
//!
//! Everything this crate needs from the engine that owns the dataset. The
//! engine is assumed to perform each transfer atomically; this crate
//! validates addresses before calling it and never retries.

use crate::error::EngineError;
use crate::types::{GroupId, VarId, VarRef, Values, Variable};

/// Result of a single engine call
pub type EngineResult<T> = std::result::Result<T, EngineError>;

pub trait Storage {
    /// Name, element type and current shape of a variable
    fn inq_var(&self, var: VarRef) -> EngineResult<Variable>;

    /// Variable id by name within a group, `None` if absent
    fn inq_varid(&self, group: GroupId, name: &str) -> EngineResult<Option<VarId>>;

    /// Child group by name, `None` if absent
    fn inq_grp(&self, parent: GroupId, name: &str) -> EngineResult<Option<GroupId>>;

    /// All variables of a group, in definition order
    fn inq_varids(&self, group: GroupId) -> EngineResult<Vec<VarId>>;

    /// Whether a dimension with this name is defined in the group
    fn has_dim(&self, group: GroupId, name: &str) -> EngineResult<bool>;

    /// Numeric attribute of a variable, `None` if absent
    fn get_att_double(&self, var: VarRef, name: &str) -> EngineResult<Option<f64>>;

    /// Bulk read of a fully resolved slice, in the variable's element type
    fn get_vara(&self, var: VarRef, start: &[usize], count: &[usize]) -> EngineResult<Values>;

    /// Bulk write of a fully resolved slice
    fn put_vara(
        &mut self,
        var: VarRef,
        start: &[usize],
        count: &[usize],
        values: &Values,
    ) -> EngineResult<()>;
}
