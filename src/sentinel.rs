//! Translation between storage missing values and the host "no data" sentinel

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::types::{DType, MissingValue, VarRef};

/// Host "no data" for doubles: a NaN with payload 1954
pub const NO_DATA_F64: f64 = f64::from_bits(0x7FF0_0000_0000_07A2);

/// Host "no data" for integers
pub const NO_DATA_I32: i32 = i32::MIN;

/// Missing value assumed for integer variables without a `missing_value` attribute
pub const DEFAULT_INT_MISSING: i32 = -2147483647;

/// Missing value assumed for float variables without a `missing_value` attribute
pub const DEFAULT_FLOAT_MISSING: f64 = 1.0e30;

/// Attribute holding a variable's declared missing value
pub const MISSING_VALUE_ATTR: &str = "missing_value";

/// Host element types with a "no data" sentinel
pub trait Sentinel: Copy {
    const NO_DATA: Self;

    fn is_no_data(self) -> bool;

    /// Lossless view of the value for comparison with a declared missing value
    fn to_f64(self) -> f64;
}

impl Sentinel for f64 {
    const NO_DATA: f64 = NO_DATA_F64;

    fn is_no_data(self) -> bool {
        self.is_nan()
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Sentinel for i32 {
    const NO_DATA: i32 = NO_DATA_I32;

    fn is_no_data(self) -> bool {
        self == NO_DATA_I32
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// Whether a stored value of `dtype` should be read back as "no data"
///
/// Integer storage types need an exact match. Floats match within `1e-10`
/// of a zero missing value, or within `|missing| * 1e-5` otherwise.
pub fn matches_missing(value: f64, missing: f64, dtype: DType) -> bool {
    if dtype.is_integer() {
        return value == missing;
    }
    let tol = if missing == 0.0 {
        1.0e-10
    } else {
        missing.abs() * 1.0e-5
    };
    (value - missing).abs() < tol
}

/// Replace values of a `dtype` variable matching the declared missing value
/// with `T::NO_DATA`
///
/// Only a concrete missing value triggers translation. Returns the number
/// of replaced values.
pub fn translate_read<T: Sentinel>(
    data: &mut [T],
    missing: MissingValue,
    dtype: DType,
) -> usize {
    let MissingValue::Value(missing) = missing else {
        return 0;
    };

    let mut replaced = 0;
    for value in data.iter_mut().filter(|v| matches_missing(v.to_f64(), missing, dtype)) {
        *value = T::NO_DATA;
        replaced += 1;
    }
    replaced
}

/// Replace every host sentinel with `fill`; returns the number replaced
pub fn replace_no_data(data: &mut [f64], fill: f64) -> usize {
    let mut replaced = 0;
    for value in data.iter_mut().filter(|v| v.is_no_data()) {
        *value = fill;
        replaced += 1;
    }
    replaced
}

/// Fill value that host sentinels become when writing to `dtype`
///
/// Only float destinations are supported: a concrete declared missing value
/// is used when there is one, NaN otherwise.
pub fn write_fill(dtype: DType, missing: MissingValue) -> Result<f64> {
    if !dtype.is_float() {
        return Err(Error::NoFillValue(dtype));
    }
    Ok(match missing {
        MissingValue::Value(v) => v,
        MissingValue::None | MissingValue::NoData => f64::NAN,
    })
}

/// Prepare host doubles for writing: sentinels become the destination's fill
pub fn fill_no_data(data: &mut [f64], dtype: DType, missing: MissingValue) -> Result<usize> {
    let fill = write_fill(dtype, missing)?;
    Ok(replace_no_data(data, fill))
}

/// Missing-value state declared by the variable's attribute
pub fn declared_missing<S: Storage + ?Sized>(store: &S, var: VarRef) -> Result<MissingValue> {
    Ok(match store.get_att_double(var, MISSING_VALUE_ATTR)? {
        None => MissingValue::None,
        Some(v) if v.is_nan() => MissingValue::NoData,
        Some(v) => MissingValue::Value(v),
    })
}

/// Declared missing value, or the default for `dtype` when none is declared
pub fn missing_or_default<S: Storage + ?Sized>(
    store: &S,
    var: VarRef,
    dtype: DType,
) -> Result<MissingValue> {
    Ok(match declared_missing(store, var)? {
        MissingValue::None if dtype.is_integer() => {
            MissingValue::Value(f64::from(DEFAULT_INT_MISSING))
        }
        MissingValue::None if dtype.is_float() => MissingValue::Value(DEFAULT_FLOAT_MISSING),
        declared => declared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_missing_uses_absolute_tolerance() {
        let mut data = vec![0.0, 5e-11, -9e-11, 2e-10, 1.0];
        let n = translate_read(&mut data, MissingValue::Value(0.0), DType::F64);
        assert_eq!(n, 3);
        assert!(data[0].is_no_data());
        assert!(data[1].is_no_data());
        assert!(data[2].is_no_data());
        assert_eq!(data[3], 2e-10);
        assert_eq!(data[4], 1.0);
    }

    #[test]
    fn relative_tolerance() {
        // tolerance is 500 * 1e-5 = 0.005
        let mut data = vec![500.0, 500.004, 499.996, 500.006, 499.994];
        let n = translate_read(&mut data, MissingValue::Value(500.0), DType::F32);
        assert_eq!(n, 3);
        assert!(data[..3].iter().all(|v| v.is_no_data()));
        assert_eq!(&data[3..], &[500.006, 499.994]);
    }

    #[test]
    fn integers_need_exact_match() {
        let mut data = vec![-999, -998, 7, -999];
        let n = translate_read(&mut data, MissingValue::Value(-999.0), DType::I32);
        assert_eq!(n, 2);
        assert_eq!(data, vec![NO_DATA_I32, -998, 7, NO_DATA_I32]);
    }

    #[test]
    fn integer_types_ignore_tolerance() {
        // a float tolerance around 1e6 would be +-10
        let mut data = vec![1_000_000.0, 1_000_005.0];
        assert_eq!(translate_read(&mut data, MissingValue::Value(1.0e6), DType::I32), 1);
        assert!(data[0].is_no_data());
        assert_eq!(data[1], 1_000_005.0);

        let mut data = vec![-2147480000.0, -2147483647.0];
        let missing = MissingValue::Value(f64::from(DEFAULT_INT_MISSING));
        assert_eq!(translate_read(&mut data, missing, DType::I64), 1);
        assert_eq!(data[0], -2147480000.0);
    }

    #[test]
    fn fractional_missing_never_matches_integers() {
        let mut data = vec![-999, 3];
        assert_eq!(translate_read(&mut data, MissingValue::Value(-999.5), DType::I32), 0);
        assert_eq!(data, vec![-999, 3]);

        let mut data = vec![i32::MAX];
        assert_eq!(translate_read(&mut data, MissingValue::Value(3.0e9), DType::I32), 0);
        assert_eq!(data, vec![i32::MAX]);
    }

    #[test]
    fn other_states_leave_data_alone() {
        let mut data = vec![1e30, 0.0];
        assert_eq!(translate_read(&mut data, MissingValue::None, DType::F64), 0);
        assert_eq!(translate_read(&mut data, MissingValue::NoData, DType::F64), 0);
        assert_eq!(data, vec![1e30, 0.0]);
    }

    #[test]
    fn no_data_is_nan_with_payload() {
        assert!(NO_DATA_F64.is_nan());
        assert_eq!(NO_DATA_F64.to_bits() & 0xFFFF_FFFF, 1954);
    }

    #[test]
    fn write_side_replacement() {
        let mut data = vec![1.0, NO_DATA_F64, 3.0, f64::NAN];
        let n = fill_no_data(&mut data, DType::F32, MissingValue::Value(-1.0)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(data, vec![1.0, -1.0, 3.0, -1.0]);

        let mut data = vec![NO_DATA_F64];
        fill_no_data(&mut data, DType::F64, MissingValue::None).unwrap();
        assert!(data[0].is_nan());
    }

    #[test]
    fn write_side_rejects_integers() {
        let mut data = vec![NO_DATA_F64];
        assert!(matches!(
            fill_no_data(&mut data, DType::I32, MissingValue::Value(-1.0)),
            Err(Error::NoFillValue(DType::I32))
        ));
    }
}
