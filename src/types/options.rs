//! Per-call read configuration

use super::VarRef;
use crate::error::Result;
use crate::sentinel;
use crate::storage::Storage;

/// Missing-value declaration of a variable, as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingValue {
    /// No missing value declared; data is never altered
    #[default]
    None,
    /// The declared missing value already is the host's "no data" sentinel
    NoData,
    /// A concrete numeric missing value
    Value(f64),
}

/// How signed single-byte variables are presented to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteStyle {
    #[default]
    Signed,
    /// Fold negative bytes into 0..=255
    Unsigned,
}

/// Options for numeric reads
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadOptions {
    pub missing: MissingValue,
    /// Replace values matching `missing` with the host sentinel
    pub fix_missing: bool,
    pub byte_style: ByteStyle,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, missing: MissingValue) -> Self {
        self.missing = missing;
        self
    }

    pub fn with_fix_missing(mut self, fix_missing: bool) -> Self {
        self.fix_missing = fix_missing;
        self
    }

    pub fn with_byte_style(mut self, byte_style: ByteStyle) -> Self {
        self.byte_style = byte_style;
        self
    }

    /// Options derived from the variable's `missing_value` attribute
    ///
    /// Falls back to the default fill constants when the attribute is absent,
    /// and always enables translation.
    pub fn from_attributes<S: Storage + ?Sized>(store: &S, var: VarRef) -> Result<Self> {
        let variable = store.inq_var(var)?;
        let missing = sentinel::missing_or_default(store, var, variable.dtype)?;
        Ok(Self::new().with_missing(missing).with_fix_missing(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_data_alone() {
        let opts = ReadOptions::default();
        assert_eq!(opts.missing, MissingValue::None);
        assert!(!opts.fix_missing);
        assert_eq!(opts.byte_style, ByteStyle::Signed);
    }

    #[test]
    fn builder() {
        let opts = ReadOptions::new()
            .with_missing(MissingValue::Value(-999.0))
            .with_fix_missing(true)
            .with_byte_style(ByteStyle::Unsigned);
        assert_eq!(opts.missing, MissingValue::Value(-999.0));
        assert!(opts.fix_missing);
        assert_eq!(opts.byte_style, ByteStyle::Unsigned);
    }
}
