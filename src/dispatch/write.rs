//! Typed writes

use crate::error::{Error, Result};
use crate::slice::{self, Address, SliceRequest};
use crate::storage::Storage;
use crate::text;
use crate::types::{DType, Values, VarRef, Variable};

/// Write host doubles into a numeric slice
///
/// Values are converted to the variable's element type. Host sentinels are
/// written as they are; see `sentinel::fill_no_data` to replace them first.
pub fn write_double<S: Storage + ?Sized>(
    store: &mut S,
    var: VarRef,
    request: &SliceRequest,
    data: &[f64],
) -> Result<()> {
    let variable = store.inq_var(var)?;
    double(store, &variable, request, data)
}

/// Write host integers into a numeric slice
pub fn write_int<S: Storage + ?Sized>(
    store: &mut S,
    var: VarRef,
    request: &SliceRequest,
    data: &[i32],
) -> Result<()> {
    let variable = store.inq_var(var)?;
    int(store, &variable, request, data)
}

/// Write strings into a fixed-width text slice
pub fn write_text<S, T>(
    store: &mut S,
    var: VarRef,
    request: &SliceRequest,
    strings: &[T],
) -> Result<()>
where
    S: Storage + ?Sized,
    T: AsRef<str>,
{
    let variable = store.inq_var(var)?;
    text_slice(store, &variable, request, strings)
}

/// Write a slice of variable-length strings
pub fn write_strings<S, T>(
    store: &mut S,
    var: VarRef,
    request: &SliceRequest,
    strings: &[T],
) -> Result<()>
where
    S: Storage + ?Sized,
    T: AsRef<str>,
{
    let variable = store.inq_var(var)?;
    self::strings(store, &variable, request, strings)
}

pub(super) fn double<S: Storage + ?Sized>(
    store: &mut S,
    variable: &Variable,
    request: &SliceRequest,
    data: &[f64],
) -> Result<()> {
    let address = slice::resolve(&variable.shape, request)?;
    check_len(&address, data.len())?;
    let values = Values::from_f64(variable.dtype, data).ok_or(Error::TypeMismatch {
        operation: "double write",
        dtype: variable.dtype,
    })?;
    put(store, variable, &address, &values)
}

pub(super) fn int<S: Storage + ?Sized>(
    store: &mut S,
    variable: &Variable,
    request: &SliceRequest,
    data: &[i32],
) -> Result<()> {
    let address = slice::resolve(&variable.shape, request)?;
    check_len(&address, data.len())?;
    let values = Values::from_i32(variable.dtype, data).ok_or(Error::TypeMismatch {
        operation: "integer write",
        dtype: variable.dtype,
    })?;
    put(store, variable, &address, &values)
}

pub(super) fn text_slice<S, T>(
    store: &mut S,
    variable: &Variable,
    request: &SliceRequest,
    strings: &[T],
) -> Result<()>
where
    S: Storage + ?Sized,
    T: AsRef<str>,
{
    if variable.dtype != DType::Char {
        return Err(Error::TypeMismatch {
            operation: "text write",
            dtype: variable.dtype,
        });
    }
    let address = slice::resolve(&variable.shape, request)?;
    text::write(store, variable.id, &address, strings)
}

pub(super) fn strings<S, T>(
    store: &mut S,
    variable: &Variable,
    request: &SliceRequest,
    strings: &[T],
) -> Result<()>
where
    S: Storage + ?Sized,
    T: AsRef<str>,
{
    if variable.dtype != DType::String {
        return Err(Error::TypeMismatch {
            operation: "string write",
            dtype: variable.dtype,
        });
    }
    let address = slice::resolve(&variable.shape, request)?;
    check_len(&address, strings.len())?;
    let values = Values::Strings(strings.iter().map(|s| s.as_ref().to_string()).collect());
    put(store, variable, &address, &values)
}

fn check_len(address: &Address, actual: usize) -> Result<()> {
    let expected = address.num_elements();
    if actual != expected {
        return Err(Error::DataLengthMismatch { expected, actual });
    }
    Ok(())
}

/// One bulk transfer of a resolved address
fn put<S: Storage + ?Sized>(
    store: &mut S,
    variable: &Variable,
    address: &Address,
    values: &Values,
) -> Result<()> {
    store
        .put_vara(variable.id, &address.start, &address.count, values)
        .map_err(|e| {
            log::warn!(
                "write of {} (ndims {}) failed at start {:?} count {:?}: {}",
                variable.name,
                variable.ndims(),
                address.start,
                address.count,
                e
            );
            Error::Engine(e)
        })
}
