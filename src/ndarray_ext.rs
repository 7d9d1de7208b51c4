//! ndarray integration for host arrays
//!
//! A `HostArray` keeps its elements column-major over `dims`, so it maps
//! onto an `ArrayD` with Fortran layout and the same axis order.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::HostArray;
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NdarrayError {
    /// Dims don't match data length
    #[error("dims {dims:?} don't match data length {data_len}")]
    ShapeMismatch { dims: Vec<usize>, data_len: usize },
}

impl<T: Clone> HostArray<T> {
    /// Convert to an ndarray `ArrayD` indexed in host axis order
    pub fn to_ndarray(&self) -> Result<ArrayD<T>, NdarrayError> {
        ArrayD::from_shape_vec(IxDyn(&self.dims).f(), self.data.clone()).map_err(|_| {
            NdarrayError::ShapeMismatch {
                dims: self.dims.clone(),
                data_len: self.data.len(),
            }
        })
    }

    /// Create a host array from any ndarray, whatever its memory layout
    ///
    /// Axis 0 becomes the fastest-varying host dimension.
    pub fn from_ndarray(arr: ArrayD<T>) -> Self {
        let dims = arr.shape().to_vec();
        let data = arr.reversed_axes().iter().cloned().collect();
        HostArray::new(dims, data)
    }
}
