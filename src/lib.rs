//! ncslice - Slice addressing and value marshalling for dimensioned datasets
//!
//! Moves rectangular slices of multi-dimensional variables between a host
//! environment and a dataset storage engine. The host numbers axes in the
//! reverse order from the engine and counts from 1; the engine stores
//! elements row-major and counts from 0.
//!
//! # Features
//!
//! - Slice requests in host convention, with whole-variable and
//!   non-degenerate shorthands
//! - Missing-value translation to and from the host "no data" sentinel
//! - Fixed-width text packed as one string per slot (up to 4 dimensions)
//! - Variables addressed by slash-separated group paths
//! - Type-dispatched reads and writes over any `Storage` engine
//!
//! # Example
//!
//! ```rust
//! use ncslice::{DType, GroupId, MemoryStore, ReadOptions, SliceRequest, dispatch};
//!
//! let mut store = MemoryStore::new();
//! store.def_dim(GroupId::ROOT, "lat", 2).unwrap();
//! store.def_dim(GroupId::ROOT, "lon", 3).unwrap();
//! let temp = store
//!     .def_var(GroupId::ROOT, "temp", DType::F32, &["lat", "lon"])
//!     .unwrap();
//!
//! // host order: lon first, 1-based
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! dispatch::write_double(&mut store, temp, &SliceRequest::all(), &data).unwrap();
//!
//! let row = dispatch::read_double(
//!     &store,
//!     temp,
//!     &SliceRequest::new([1, 2], [3, 1]),
//!     &ReadOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(row.dims, vec![3]);
//! assert_eq!(row.data, vec![4.0, 5.0, 6.0]);
//! ```

pub mod dispatch;
pub mod error;
pub mod memory;
pub mod names;
pub mod sentinel;
pub mod slice;
pub mod storage;
pub mod text;
pub mod types;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{EngineError, Error, Result};
pub use memory::MemoryStore;
pub use slice::{Address, SliceRequest, UNSPECIFIED};
pub use storage::Storage;
pub use types::{
    ByteStyle, DType, GroupId, HostArray, HostData, HostKind, MissingValue, ReadOptions, Values,
    VarId, VarRef, Variable,
};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
