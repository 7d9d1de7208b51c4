//! Slice requests and their resolution into storage addresses
//!
//! `resolve` is a pure function of a variable's shape and a host request;
//! it never talks to the storage engine.

pub mod convert;

pub use convert::UNSPECIFIED;

use crate::error::{Error, Result};

/// A slice in host convention: reversed axis order, 1-based start
///
/// Either vector may be the single-element `[UNSPECIFIED]` shorthand, or
/// cover only the non-degenerate axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRequest {
    pub start: Vec<i64>,
    pub count: Vec<i64>,
}

impl SliceRequest {
    pub fn new(start: impl Into<Vec<i64>>, count: impl Into<Vec<i64>>) -> Self {
        Self {
            start: start.into(),
            count: count.into(),
        }
    }

    /// The whole variable
    pub fn all() -> Self {
        Self::new([UNSPECIFIED], [UNSPECIFIED])
    }

    /// Everything from `start` to the end of each axis
    pub fn from_start(start: impl Into<Vec<i64>>) -> Self {
        Self::new(start, [UNSPECIFIED])
    }
}

impl Default for SliceRequest {
    fn default() -> Self {
        Self::all()
    }
}

/// A fully resolved slice in storage convention (forward order, 0-based)
///
/// Always has one entry per variable dimension; a scalar has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub start: Vec<usize>,
    pub count: Vec<usize>,
}

impl Address {
    /// The single element of a zero-rank variable
    pub fn scalar() -> Self {
        Self {
            start: Vec::new(),
            count: Vec::new(),
        }
    }

    pub fn rank(&self) -> usize {
        self.count.len()
    }

    /// Total number of elements addressed (1 for a scalar)
    pub fn num_elements(&self) -> usize {
        self.count.iter().product()
    }

    /// Result dimensions in host order, degenerate axes dropped
    ///
    /// Never empty: a slice with only degenerate axes has dims `[1]`.
    pub fn host_dims(&self) -> Vec<usize> {
        host_dims(&self.count)
    }

    /// Check `start + count <= shape` on every axis
    pub fn check_bounds(&self, shape: &[usize]) -> Result<()> {
        for (axis, ((&start, &count), &len)) in
            self.start.iter().zip(&self.count).zip(shape).enumerate()
        {
            let end = start.checked_add(count);
            if end.is_none_or(|end| end > len) {
                return Err(Error::OutOfRange {
                    axis,
                    start,
                    count,
                    len,
                });
            }
        }
        Ok(())
    }

    /// Row-major linear offsets of every addressed element within `shape`
    pub fn offsets(&self, shape: &[usize]) -> Vec<usize> {
        let total = self.num_elements();
        let mut out = Vec::with_capacity(total);
        if total == 0 {
            return out;
        }

        let rank = self.rank();
        let mut strides = vec![1usize; rank];
        for axis in (0..rank.saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }

        let mut index = vec![0usize; rank];
        loop {
            out.push(
                index
                    .iter()
                    .zip(&self.start)
                    .zip(&strides)
                    .map(|((i, s), stride)| (i + s) * stride)
                    .sum(),
            );
            if !advance(&mut index, &self.count) {
                return out;
            }
        }
    }
}

/// Host-order dimensions of a storage-order extent, degenerate axes dropped
pub(crate) fn host_dims(count: &[usize]) -> Vec<usize> {
    let dims: Vec<usize> = count.iter().rev().copied().filter(|&c| c != 1).collect();
    if dims.is_empty() { vec![1] } else { dims }
}

/// Step a row-major multi-index through `extent`; false once it wraps around
pub(crate) fn advance(index: &mut [usize], extent: &[usize]) -> bool {
    for axis in (0..index.len()).rev() {
        index[axis] += 1;
        if index[axis] < extent[axis] {
            return true;
        }
        index[axis] = 0;
    }
    false
}

/// Resolve a host request against a variable shape
///
/// Bounds are checked here, so every address that leaves this function can
/// be handed to the engine as is.
pub fn resolve(shape: &[usize], request: &SliceRequest) -> Result<Address> {
    if shape.is_empty() {
        return resolve_scalar(request);
    }

    let start = convert::storage_start(shape, &request.start)?;
    let count = convert::storage_count(shape, &start, &request.count)?;
    let address = Address { start, count };
    address.check_bounds(shape)?;

    log::debug!(
        "resolved start {:?} count {:?} against shape {:?} to start {:?} count {:?}",
        request.start,
        request.count,
        shape,
        address.start,
        address.count
    );
    Ok(address)
}

fn resolve_scalar(request: &SliceRequest) -> Result<Address> {
    let start_ok = request.start == [0] || convert::is_unspecified(&request.start);
    let count_ok = request.count == [1] || convert::is_unspecified(&request.count);
    if start_ok && count_ok {
        Ok(Address::scalar())
    } else {
        Err(Error::ScalarRequest {
            start: request.start.clone(),
            count: request.count.clone(),
        })
    }
}
