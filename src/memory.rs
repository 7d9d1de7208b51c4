//! In-memory storage engine
//!
//! A small tree of groups holding dimensions, variables and numeric
//! attributes, with row-major element storage. Useful for hosts without a
//! dataset on disk and for exercising the dispatchers.

use std::cell::Cell;

use crate::error::EngineError;
use crate::slice::Address;
use crate::storage::{EngineResult, Storage};
use crate::types::{DType, GroupId, Values, VarId, VarRef, Variable};

#[derive(Debug)]
struct Group {
    name: String,
    parent: Option<GroupId>,
    children: Vec<(String, GroupId)>,
    dims: Vec<(String, usize)>,
    vars: Vec<Var>,
}

impl Group {
    fn new(name: &str, parent: Option<GroupId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            dims: Vec::new(),
            vars: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Var {
    name: String,
    dtype: DType,
    shape: Vec<usize>,
    attributes: Vec<(String, f64)>,
    data: Values,
}

#[derive(Debug)]
pub struct MemoryStore {
    groups: Vec<Group>,
    transfers: Cell<usize>,
    fail_after: Option<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty dataset holding only the root group
    pub fn new() -> Self {
        Self {
            groups: vec![Group::new("", None)],
            transfers: Cell::new(0),
            fail_after: None,
        }
    }

    /// Define a child group
    pub fn def_grp(&mut self, parent: GroupId, name: &str) -> EngineResult<GroupId> {
        if self.group(parent)?.children.iter().any(|(n, _)| n == name) {
            return Err(EngineError::new(format!("group {name:?} already defined")));
        }
        let id = GroupId(self.groups.len());
        self.groups.push(Group::new(name, Some(parent)));
        self.group_mut(parent)?.children.push((name.to_string(), id));
        Ok(id)
    }

    /// Define a dimension in a group
    pub fn def_dim(&mut self, group: GroupId, name: &str, len: usize) -> EngineResult<()> {
        let dims = &mut self.group_mut(group)?.dims;
        if dims.iter().any(|(n, _)| n == name) {
            return Err(EngineError::new(format!("dimension {name:?} already defined")));
        }
        dims.push((name.to_string(), len));
        Ok(())
    }

    /// Define a variable over named dimensions, slowest-varying first
    ///
    /// Dimensions are looked up in `group` and then its ancestors. Elements
    /// start out as the default fill value of `dtype`.
    pub fn def_var(
        &mut self,
        group: GroupId,
        name: &str,
        dtype: DType,
        dims: &[&str],
    ) -> EngineResult<VarRef> {
        if self.group(group)?.vars.iter().any(|v| v.name == name) {
            return Err(EngineError::new(format!("variable {name:?} already defined")));
        }
        let shape = dims
            .iter()
            .map(|dim| self.find_dim(group, dim))
            .collect::<EngineResult<Vec<_>>>()?;
        let len = shape.iter().product();

        let vars = &mut self.group_mut(group)?.vars;
        let id = VarRef::new(group, VarId(vars.len()));
        vars.push(Var {
            name: name.to_string(),
            dtype,
            shape,
            attributes: Vec::new(),
            data: Values::default_fill(dtype, len),
        });
        Ok(id)
    }

    /// Attach (or replace) a numeric attribute
    pub fn put_att_double(&mut self, var: VarRef, name: &str, value: f64) -> EngineResult<()> {
        let attributes = &mut self.var_mut(var)?.attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Group name ("" for the root)
    pub fn group_name(&self, group: GroupId) -> EngineResult<&str> {
        Ok(&self.group(group)?.name)
    }

    /// Number of bulk transfers attempted so far
    pub fn transfer_count(&self) -> usize {
        self.transfers.get()
    }

    /// Make every transfer after the first `n` fail
    pub fn fail_transfers_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    /// Undo `fail_transfers_after`
    pub fn stop_failing(&mut self) {
        self.fail_after = None;
    }

    fn group(&self, id: GroupId) -> EngineResult<&Group> {
        self.groups
            .get(id.0)
            .ok_or_else(|| EngineError::new(format!("no group with id {}", id.0)))
    }

    fn group_mut(&mut self, id: GroupId) -> EngineResult<&mut Group> {
        self.groups
            .get_mut(id.0)
            .ok_or_else(|| EngineError::new(format!("no group with id {}", id.0)))
    }

    fn var(&self, id: VarRef) -> EngineResult<&Var> {
        self.group(id.group)?
            .vars
            .get(id.var.0)
            .ok_or_else(|| EngineError::new(format!("no variable with id {}", id.var.0)))
    }

    fn var_mut(&mut self, id: VarRef) -> EngineResult<&mut Var> {
        self.group_mut(id.group)?
            .vars
            .get_mut(id.var.0)
            .ok_or_else(|| EngineError::new(format!("no variable with id {}", id.var.0)))
    }

    fn find_dim(&self, group: GroupId, name: &str) -> EngineResult<usize> {
        let mut current = Some(group);
        while let Some(id) = current {
            let g = self.group(id)?;
            if let Some((_, len)) = g.dims.iter().find(|(n, _)| n == name) {
                return Ok(*len);
            }
            current = g.parent;
        }
        Err(EngineError::new(format!("dimension {name:?} not found")))
    }

    /// Count a transfer, failing it once the injected limit is reached
    fn begin_transfer(&self) -> EngineResult<()> {
        let n = self.transfers.get();
        self.transfers.set(n + 1);
        match self.fail_after {
            Some(limit) if n >= limit => Err(EngineError::new(format!(
                "transfer {n} failed: injected failure"
            ))),
            _ => Ok(()),
        }
    }
}

/// Validate `start`/`count` against `shape`, returning element offsets
fn locate(shape: &[usize], start: &[usize], count: &[usize]) -> EngineResult<Vec<usize>> {
    if start.len() != shape.len() || count.len() != shape.len() {
        return Err(EngineError::new(format!(
            "start/count of rank {}/{} for a variable of rank {}",
            start.len(),
            count.len(),
            shape.len()
        )));
    }
    let address = Address {
        start: start.to_vec(),
        count: count.to_vec(),
    };
    address
        .check_bounds(shape)
        .map_err(|e| EngineError::new(e.to_string()))?;
    Ok(address.offsets(shape))
}

impl Storage for MemoryStore {
    fn inq_var(&self, var: VarRef) -> EngineResult<Variable> {
        let v = self.var(var)?;
        Ok(Variable {
            id: var,
            name: v.name.clone(),
            dtype: v.dtype,
            shape: v.shape.clone(),
        })
    }

    fn inq_varid(&self, group: GroupId, name: &str) -> EngineResult<Option<VarId>> {
        Ok(self
            .group(group)?
            .vars
            .iter()
            .position(|v| v.name == name)
            .map(VarId))
    }

    fn inq_grp(&self, parent: GroupId, name: &str) -> EngineResult<Option<GroupId>> {
        Ok(self
            .group(parent)?
            .children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id))
    }

    fn inq_varids(&self, group: GroupId) -> EngineResult<Vec<VarId>> {
        Ok((0..self.group(group)?.vars.len()).map(VarId).collect())
    }

    fn has_dim(&self, group: GroupId, name: &str) -> EngineResult<bool> {
        Ok(self.group(group)?.dims.iter().any(|(n, _)| n == name))
    }

    fn get_att_double(&self, var: VarRef, name: &str) -> EngineResult<Option<f64>> {
        Ok(self
            .var(var)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v))
    }

    fn get_vara(&self, var: VarRef, start: &[usize], count: &[usize]) -> EngineResult<Values> {
        self.begin_transfer()?;
        let v = self.var(var)?;
        let offsets = locate(&v.shape, start, count)?;
        Ok(v.data.select(&offsets))
    }

    fn put_vara(
        &mut self,
        var: VarRef,
        start: &[usize],
        count: &[usize],
        values: &Values,
    ) -> EngineResult<()> {
        self.begin_transfer()?;
        let v = self.var_mut(var)?;
        let offsets = locate(&v.shape, start, count)?;
        v.data.assign(&offsets, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_2x3() -> (MemoryStore, VarRef) {
        let mut store = MemoryStore::new();
        store.def_dim(GroupId::ROOT, "y", 2).unwrap();
        store.def_dim(GroupId::ROOT, "x", 3).unwrap();
        let var = store
            .def_var(GroupId::ROOT, "v", DType::I32, &["y", "x"])
            .unwrap();
        (store, var)
    }

    #[test]
    fn new_variables_hold_fill_values() {
        let (store, var) = store_2x3();
        let values = store.get_vara(var, &[0, 0], &[2, 3]).unwrap();
        assert_eq!(values, Values::I32(vec![-2147483647; 6]));
    }

    #[test]
    fn put_then_get_sub_block() {
        let (mut store, var) = store_2x3();
        store
            .put_vara(var, &[0, 1], &[2, 2], &Values::I32(vec![1, 2, 3, 4]))
            .unwrap();
        assert_eq!(
            store.get_vara(var, &[1, 0], &[1, 3]).unwrap(),
            Values::I32(vec![-2147483647, 3, 4])
        );
        assert_eq!(store.transfer_count(), 2);
    }

    #[test]
    fn out_of_bounds_transfers_fail() {
        let (store, var) = store_2x3();
        assert!(store.get_vara(var, &[1, 2], &[1, 2]).is_err());
        assert!(store.get_vara(var, &[0], &[1]).is_err());
    }

    #[test]
    fn dims_found_in_ancestors() {
        let mut store = MemoryStore::new();
        store.def_dim(GroupId::ROOT, "t", 4).unwrap();
        let child = store.def_grp(GroupId::ROOT, "obs").unwrap();
        let var = store.def_var(child, "temp", DType::F32, &["t"]).unwrap();
        assert_eq!(store.inq_var(var).unwrap().shape, vec![4]);
        assert_eq!(store.inq_grp(GroupId::ROOT, "obs").unwrap(), Some(child));
        assert_eq!(store.group_name(child).unwrap(), "obs");
        assert!(!store.has_dim(child, "t").unwrap());
        assert!(store.def_var(child, "bad", DType::F32, &["nope"]).is_err());
    }

    #[test]
    fn injected_failures() {
        let (mut store, var) = store_2x3();
        store.fail_transfers_after(1);
        assert!(store.get_vara(var, &[0, 0], &[1, 1]).is_ok());
        assert!(store.get_vara(var, &[0, 0], &[1, 1]).is_err());
        assert_eq!(store.transfer_count(), 2);
        store.stop_failing();
        assert!(store.get_vara(var, &[0, 0], &[1, 1]).is_ok());
    }

    #[test]
    fn attributes_replace() {
        let (mut store, var) = store_2x3();
        assert_eq!(store.get_att_double(var, "missing_value").unwrap(), None);
        store.put_att_double(var, "missing_value", -1.0).unwrap();
        store.put_att_double(var, "missing_value", -2.0).unwrap();
        assert_eq!(
            store.get_att_double(var, "missing_value").unwrap(),
            Some(-2.0)
        );
    }
}
