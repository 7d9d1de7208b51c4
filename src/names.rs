//! Variable lookup by hierarchical name

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::types::{GroupId, VarRef};

/// Resolve a slash-separated variable path (e.g., "model1/surface/temp")
/// starting from `root`
///
/// Returns `Ok(None)` when the final variable does not exist. A path that
/// starts with '/' or names a missing group is an error.
pub fn resolve<S: Storage + ?Sized>(
    store: &S,
    root: GroupId,
    path: &str,
) -> Result<Option<VarRef>> {
    if path.starts_with('/') {
        return Err(Error::MalformedPath(path.to_string()));
    }

    let mut group = root;
    let mut rest = path;
    while let Some((name, tail)) = rest.split_once('/') {
        group = store
            .inq_grp(group, name)?
            .ok_or_else(|| Error::GroupNotFound {
                name: name.to_string(),
                path: path.to_string(),
            })?;
        log::debug!("entered group {:?} ({:?}) resolving {:?}", name, group, path);
        rest = tail;
    }

    Ok(store
        .inq_varid(group, rest)?
        .map(|var| VarRef::new(group, var)))
}

/// The only data variable of a group
///
/// Coordinate variables (those named like a dimension) are skipped. Returns
/// `None` when the group holds zero or several data variables.
pub fn only_var<S: Storage + ?Sized>(store: &S, group: GroupId) -> Result<Option<VarRef>> {
    let mut found = None;
    for var in store.inq_varids(group)? {
        let id = VarRef::new(group, var);
        let name = store.inq_var(id)?.name;
        if store.has_dim(group, &name)? {
            continue;
        }
        if found.is_some() {
            log::debug!("group {:?} holds more than one data variable", group);
            return Ok(None);
        }
        found = Some(id);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::types::{DType, VarId};

    fn nested() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.def_dim(GroupId::ROOT, "x", 3).unwrap();
        let a = store.def_grp(GroupId::ROOT, "a").unwrap();
        let b = store.def_grp(a, "b").unwrap();
        store.def_var(b, "temp", DType::F32, &["x"]).unwrap();
        store.def_var(GroupId::ROOT, "top", DType::I32, &["x"]).unwrap();
        store
    }

    #[test]
    fn walks_groups() {
        let store = nested();
        let var = resolve(&store, GroupId::ROOT, "a/b/temp").unwrap().unwrap();
        assert_eq!(var.var, VarId(0));
        assert_eq!(store.inq_var(var).unwrap().name, "temp");
    }

    #[test]
    fn plain_name_in_root() {
        let store = nested();
        let var = resolve(&store, GroupId::ROOT, "top").unwrap().unwrap();
        assert_eq!(var.group, GroupId::ROOT);
    }

    #[test]
    fn missing_variable_is_none() {
        let store = nested();
        assert_eq!(resolve(&store, GroupId::ROOT, "a/b/nope").unwrap(), None);
    }

    #[test]
    fn missing_group_names_the_segment() {
        let store = nested();
        match resolve(&store, GroupId::ROOT, "a/c/temp") {
            Err(Error::GroupNotFound { name, path }) => {
                assert_eq!(name, "c");
                assert_eq!(path, "a/c/temp");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn leading_slash_rejected() {
        let store = nested();
        assert!(matches!(
            resolve(&store, GroupId::ROOT, "/a/b/temp"),
            Err(Error::MalformedPath(_))
        ));
    }

    #[test]
    fn only_var_skips_coordinates() {
        let mut store = MemoryStore::new();
        store.def_dim(GroupId::ROOT, "time", 5).unwrap();
        store.def_var(GroupId::ROOT, "time", DType::F64, &["time"]).unwrap();
        let data = store.def_var(GroupId::ROOT, "rain", DType::F32, &["time"]).unwrap();
        assert_eq!(only_var(&store, GroupId::ROOT).unwrap(), Some(data));

        store.def_var(GroupId::ROOT, "snow", DType::F32, &["time"]).unwrap();
        assert_eq!(only_var(&store, GroupId::ROOT).unwrap(), None);
    }
}
