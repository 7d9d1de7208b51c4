//! Typed reads

use crate::error::{Error, Result};
use crate::sentinel::{self, Sentinel};
use crate::slice::{self, Address, SliceRequest};
use crate::storage::Storage;
use crate::text;
use crate::types::{ByteStyle, DType, HostArray, HostKind, ReadOptions, Values, VarRef, Variable};

/// Read a numeric slice as host doubles
pub fn read_double<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostArray<f64>> {
    let variable = store.inq_var(var)?;
    double(store, &variable, request, options)
}

/// Read an integer slice (types that fit `i32`) as host integers
pub fn read_int<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostArray<i32>> {
    let variable = store.inq_var(var)?;
    int(store, &variable, request, options)
}

/// Read a fixed-width text slice, one string per non-character slot
pub fn read_text<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    request: &SliceRequest,
) -> Result<HostArray<String>> {
    let variable = store.inq_var(var)?;
    text_slice(store, &variable, request)
}

/// Read a slice of variable-length strings
pub fn read_strings<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    request: &SliceRequest,
) -> Result<HostArray<String>> {
    let variable = store.inq_var(var)?;
    strings(store, &variable, request)
}

pub(super) fn double<S: Storage + ?Sized>(
    store: &S,
    variable: &Variable,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostArray<f64>> {
    if !variable.dtype.is_numeric() {
        return Err(mismatch("double read", variable.dtype));
    }
    let address = slice::resolve(&variable.shape, request)?;
    let values = get(store, variable, &address)?;
    let mut data = values
        .to_f64()
        .ok_or_else(|| mismatch("double read", values.dtype()))?;

    if options.fix_missing {
        let replaced = sentinel::translate_read(&mut data, options.missing, variable.dtype);
        log::debug!("{}: {} values read as no data", variable.name, replaced);
    }
    Ok(HostArray::new(address.host_dims(), data))
}

pub(super) fn int<S: Storage + ?Sized>(
    store: &S,
    variable: &Variable,
    request: &SliceRequest,
    options: &ReadOptions,
) -> Result<HostArray<i32>> {
    if variable.dtype.host_kind() != HostKind::Int {
        return Err(mismatch("integer read", variable.dtype));
    }
    let address = slice::resolve(&variable.shape, request)?;
    let values = get(store, variable, &address)?;
    let mut data = values
        .to_i32()
        .ok_or_else(|| mismatch("integer read", values.dtype()))?;

    if options.fix_missing {
        let replaced = sentinel::translate_read(&mut data, options.missing, variable.dtype);
        log::debug!("{}: {} values read as no data", variable.name, replaced);
    }
    if variable.dtype == DType::I8 && options.byte_style == ByteStyle::Unsigned {
        fold_unsigned(&mut data);
    }
    Ok(HostArray::new(address.host_dims(), data))
}

pub(super) fn text_slice<S: Storage + ?Sized>(
    store: &S,
    variable: &Variable,
    request: &SliceRequest,
) -> Result<HostArray<String>> {
    if variable.dtype != DType::Char {
        return Err(mismatch("text read", variable.dtype));
    }
    let address = slice::resolve(&variable.shape, request)?;
    let strings = text::read(store, variable.id, &address).inspect_err(|e| {
        log::warn!("text read of {} failed: {}", variable.name, e);
    })?;

    // the character axis is consumed by the strings themselves
    let outer = &address.count[..address.rank() - 1];
    Ok(HostArray::new(slice::host_dims(outer), strings))
}

pub(super) fn strings<S: Storage + ?Sized>(
    store: &S,
    variable: &Variable,
    request: &SliceRequest,
) -> Result<HostArray<String>> {
    if variable.dtype != DType::String {
        return Err(mismatch("string read", variable.dtype));
    }
    let address = slice::resolve(&variable.shape, request)?;
    match get(store, variable, &address)? {
        Values::Strings(data) => Ok(HostArray::new(address.host_dims(), data)),
        other => Err(mismatch("string read", other.dtype())),
    }
}

/// Fold signed bytes into 0..=255, leaving "no data" alone
fn fold_unsigned(data: &mut [i32]) {
    for value in data.iter_mut() {
        if *value < 0 && !value.is_no_data() {
            *value += 256;
        }
    }
}

/// One bulk transfer of a resolved address
fn get<S: Storage + ?Sized>(store: &S, variable: &Variable, address: &Address) -> Result<Values> {
    let values = store
        .get_vara(variable.id, &address.start, &address.count)
        .inspect_err(|e| {
            log::warn!(
                "read of {} (ndims {}) failed at start {:?} count {:?}: {}",
                variable.name,
                variable.ndims(),
                address.start,
                address.count,
                e
            );
        })?;

    let expected = address.num_elements();
    if values.len() != expected {
        return Err(Error::DataLengthMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

fn mismatch(operation: &'static str, dtype: DType) -> Error {
    Error::TypeMismatch { operation, dtype }
}
