//! Type-dispatched slice reads and writes
//!
//! Every call fetches the variable's metadata fresh, resolves the host
//! request against its current shape, and performs one bulk transfer (text
//! writes of rank 2 and above use one transfer per string).

mod read;
mod write;

pub use read::{read_double, read_int, read_strings, read_text};
pub use write::{write_double, write_int, write_strings, write_text};

use crate::error::{Error, Result};
use crate::names;
use crate::slice::SliceRequest;
use crate::storage::Storage;
use crate::types::{GroupId, HostData, HostKind, ReadOptions, VarRef};

/// Read a slice in the host representation matching the variable's type
///
/// Small integer types come back as `HostData::Int`, wide integers and
/// floats as `HostData::Double`, fixed-width text as `HostData::Text` and
/// variable-length strings as `HostData::Strings`.
pub fn read<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostData> {
    let variable = store.inq_var(var)?;
    Ok(match variable.dtype.host_kind() {
        HostKind::Int => HostData::Int(read::int(store, &variable, request, options)?),
        HostKind::Double => HostData::Double(read::double(store, &variable, request, options)?),
        HostKind::Text => HostData::Text(read::text_slice(store, &variable, request)?),
        HostKind::Strings => HostData::Strings(read::strings(store, &variable, request)?),
    })
}

/// Read a variable named by a slash path below `root`
pub fn read_path<S: Storage + ?Sized>(
    store: &S,
    root: GroupId,
    path: &str,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostData> {
    let var = names::resolve(store, root, path)?
        .ok_or_else(|| Error::VariableNotFound(path.to_string()))?;
    read(store, var, request, options)
}

/// Read by path, or the group's only data variable when no path is given
///
/// Missing-value handling comes from the variable's attributes.
pub fn read_auto<S: Storage + ?Sized>(
    store: &S,
    group: GroupId,
    path: Option<&str>,
    request: &SliceRequest,
) -> Result<HostData> {
    let var = match path {
        Some(path) => names::resolve(store, group, path)?
            .ok_or_else(|| Error::VariableNotFound(path.to_string()))?,
        None => names::only_var(store, group)?.ok_or(Error::AmbiguousVariable)?,
    };
    let options = ReadOptions::from_attributes(store, var)?;
    read(store, var, request, &options)
}

/// Write a host array into a slice, converting to the variable's type
///
/// `HostData::Text` goes through the fixed-width packer and requires a text
/// variable; `HostData::Strings` requires a string variable.
pub fn write<S: Storage + ?Sized>(
    store: &mut S,
    var: VarRef,
    request: &SliceRequest,
    data: &HostData,
) -> Result<()> {
    let variable = store.inq_var(var)?;
    match data {
        HostData::Int(a) => write::int(store, &variable, request, &a.data),
        HostData::Double(a) => write::double(store, &variable, request, &a.data),
        HostData::Text(a) => write::text_slice(store, &variable, request, &a.data),
        HostData::Strings(a) => write::strings(store, &variable, request, &a.data),
    }
}
