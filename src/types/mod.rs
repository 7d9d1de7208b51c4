//! Core types for ncslice

mod dtype;
mod host;
mod options;
mod values;
mod variable;

pub use dtype::{DType, HostKind};
pub use host::{HostArray, HostData};
pub use options::{ByteStyle, MissingValue, ReadOptions};
pub use values::Values;
pub use variable::{GroupId, VarId, VarRef, Variable};
