//! Typed element buffers exchanged with the storage engine

use super::DType;
use crate::error::EngineError;

/// Elements of one bulk transfer, in the variable's own element type
///
/// Fixed-width text travels as raw bytes (`Text`), variable-length strings
/// as owned strings (`Strings`).
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Text(Vec<u8>),
    Strings(Vec<String>),
}

// Evaluate `$body` with `$v` bound to the inner vector, whatever the variant.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            Values::I8($v) => $body,
            Values::U8($v) => $body,
            Values::I16($v) => $body,
            Values::U16($v) => $body,
            Values::I32($v) => $body,
            Values::U32($v) => $body,
            Values::I64($v) => $body,
            Values::U64($v) => $body,
            Values::F32($v) => $body,
            Values::F64($v) => $body,
            Values::Text($v) => $body,
            Values::Strings($v) => $body,
        }
    };
}

// Like `with_values!`, rewrapping the result in the same variant.
macro_rules! map_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            Values::I8($v) => Values::I8($body),
            Values::U8($v) => Values::U8($body),
            Values::I16($v) => Values::I16($body),
            Values::U16($v) => Values::U16($body),
            Values::I32($v) => Values::I32($body),
            Values::U32($v) => Values::U32($body),
            Values::I64($v) => Values::I64($body),
            Values::U64($v) => Values::U64($body),
            Values::F32($v) => Values::F32($body),
            Values::F64($v) => Values::F64($body),
            Values::Text($v) => Values::Text($body),
            Values::Strings($v) => Values::Strings($body),
        }
    };
}

// Numeric `as` casts from a host slice into the variant for `$dtype`.
macro_rules! cast_numeric {
    ($data:expr, $dtype:expr) => {
        match $dtype {
            DType::I8 => Values::I8($data.iter().map(|&x| x as i8).collect()),
            DType::U8 => Values::U8($data.iter().map(|&x| x as u8).collect()),
            DType::I16 => Values::I16($data.iter().map(|&x| x as i16).collect()),
            DType::U16 => Values::U16($data.iter().map(|&x| x as u16).collect()),
            DType::I32 => Values::I32($data.iter().map(|&x| x as i32).collect()),
            DType::U32 => Values::U32($data.iter().map(|&x| x as u32).collect()),
            DType::I64 => Values::I64($data.iter().map(|&x| x as i64).collect()),
            DType::U64 => Values::U64($data.iter().map(|&x| x as u64).collect()),
            DType::F32 => Values::F32($data.iter().map(|&x| x as f32).collect()),
            DType::F64 => Values::F64($data.iter().map(|&x| x as f64).collect()),
            DType::Char | DType::String => return None,
        }
    };
}

impl Values {
    /// `len` elements holding the storage format's default fill value for `dtype`
    pub fn default_fill(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::I8 => Values::I8(vec![-127; len]),
            DType::U8 => Values::U8(vec![255; len]),
            DType::I16 => Values::I16(vec![-32767; len]),
            DType::U16 => Values::U16(vec![65535; len]),
            DType::I32 => Values::I32(vec![-2147483647; len]),
            DType::U32 => Values::U32(vec![4294967295; len]),
            DType::I64 => Values::I64(vec![-9223372036854775806; len]),
            DType::U64 => Values::U64(vec![18446744073709551614; len]),
            DType::F32 => Values::F32(vec![9.969_21e36; len]),
            DType::F64 => Values::F64(vec![9.969_209_968_386_869e36; len]),
            DType::Char => Values::Text(vec![0; len]),
            DType::String => Values::Strings(vec![String::new(); len]),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Values::I8(_) => DType::I8,
            Values::U8(_) => DType::U8,
            Values::I16(_) => DType::I16,
            Values::U16(_) => DType::U16,
            Values::I32(_) => DType::I32,
            Values::U32(_) => DType::U32,
            Values::I64(_) => DType::I64,
            Values::U64(_) => DType::U64,
            Values::F32(_) => DType::F32,
            Values::F64(_) => DType::F64,
            Values::Text(_) => DType::Char,
            Values::Strings(_) => DType::String,
        }
    }

    /// Number of elements (bytes for `Text`)
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gather the elements at `offsets`, in order
    pub fn select(&self, offsets: &[usize]) -> Values {
        map_values!(self, v => offsets.iter().map(|&i| v[i].clone()).collect())
    }

    /// Scatter `src` into the elements at `offsets`
    pub fn assign(&mut self, offsets: &[usize], src: &Values) -> Result<(), EngineError> {
        if offsets.len() != src.len() {
            return Err(EngineError::new(format!(
                "{} values supplied for {} elements",
                src.len(),
                offsets.len()
            )));
        }
        match (self, src) {
            (Values::I8(dst), Values::I8(src)) => scatter(dst, offsets, src),
            (Values::U8(dst), Values::U8(src)) => scatter(dst, offsets, src),
            (Values::I16(dst), Values::I16(src)) => scatter(dst, offsets, src),
            (Values::U16(dst), Values::U16(src)) => scatter(dst, offsets, src),
            (Values::I32(dst), Values::I32(src)) => scatter(dst, offsets, src),
            (Values::U32(dst), Values::U32(src)) => scatter(dst, offsets, src),
            (Values::I64(dst), Values::I64(src)) => scatter(dst, offsets, src),
            (Values::U64(dst), Values::U64(src)) => scatter(dst, offsets, src),
            (Values::F32(dst), Values::F32(src)) => scatter(dst, offsets, src),
            (Values::F64(dst), Values::F64(src)) => scatter(dst, offsets, src),
            (Values::Text(dst), Values::Text(src)) => scatter(dst, offsets, src),
            (Values::Strings(dst), Values::Strings(src)) => scatter(dst, offsets, src),
            (dst, src) => {
                return Err(EngineError::new(format!(
                    "cannot store {:?} values in a {:?} variable",
                    src.dtype(),
                    dst.dtype()
                )));
            }
        }
        Ok(())
    }

    /// Widen numeric values to host doubles
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        let out = match self {
            Values::I8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::U8(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::I16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::U16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::I32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::U32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::I64(v) => v.iter().map(|&x| x as f64).collect(),
            Values::U64(v) => v.iter().map(|&x| x as f64).collect(),
            Values::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Values::F64(v) => v.clone(),
            Values::Text(_) | Values::Strings(_) => return None,
        };
        Some(out)
    }

    /// Widen integer values that fit a host `i32`
    ///
    /// Signed bytes are widened as signed; unsigned folding is the caller's job.
    pub fn to_i32(&self) -> Option<Vec<i32>> {
        let out = match self {
            Values::I8(v) => v.iter().map(|&x| i32::from(x)).collect(),
            Values::U8(v) => v.iter().map(|&x| i32::from(x)).collect(),
            Values::I16(v) => v.iter().map(|&x| i32::from(x)).collect(),
            Values::U16(v) => v.iter().map(|&x| i32::from(x)).collect(),
            Values::I32(v) => v.clone(),
            _ => return None,
        };
        Some(out)
    }

    /// Narrow host doubles into `dtype` (saturating float-to-int casts)
    pub fn from_f64(dtype: DType, data: &[f64]) -> Option<Self> {
        Some(cast_numeric!(data, dtype))
    }

    /// Convert host integers into `dtype` (wrapping integer casts)
    pub fn from_i32(dtype: DType, data: &[i32]) -> Option<Self> {
        Some(cast_numeric!(data, dtype))
    }
}

fn scatter<T: Clone>(dst: &mut [T], offsets: &[usize], src: &[T]) {
    for (&offset, value) in offsets.iter().zip(src) {
        dst[offset] = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fill_matches_dtype() {
        for code in 1..=12u8 {
            let dtype = DType::from_u8(code).unwrap();
            let values = Values::default_fill(dtype, 3);
            assert_eq!(values.dtype(), dtype);
            assert_eq!(values.len(), 3);
        }
        assert_eq!(
            Values::default_fill(DType::I32, 1),
            Values::I32(vec![-2147483647])
        );
    }

    #[test]
    fn select_and_assign() {
        let mut values = Values::F64(vec![0.0; 6]);
        let src = Values::F64(vec![1.5, 2.5]);
        values.assign(&[1, 4], &src).unwrap();
        assert_eq!(values.select(&[4, 1, 0]), Values::F64(vec![2.5, 1.5, 0.0]));
    }

    #[test]
    fn assign_rejects_other_type() {
        let mut values = Values::I16(vec![0; 2]);
        let err = values.assign(&[0], &Values::F32(vec![1.0])).unwrap_err();
        assert!(err.message.contains("F32"));
    }

    #[test]
    fn assign_rejects_length_mismatch() {
        let mut values = Values::Text(vec![0; 4]);
        assert!(values.assign(&[0, 1], &Values::Text(b"a".to_vec())).is_err());
    }

    #[test]
    fn widening() {
        assert_eq!(Values::I8(vec![-1, 5]).to_i32(), Some(vec![-1, 5]));
        assert_eq!(Values::U8(vec![200]).to_i32(), Some(vec![200]));
        assert_eq!(Values::I64(vec![1]).to_i32(), None);
        assert_eq!(Values::F32(vec![0.5]).to_f64(), Some(vec![0.5]));
        assert_eq!(Values::Text(b"ab".to_vec()).to_f64(), None);
    }

    #[test]
    fn narrowing() {
        assert_eq!(
            Values::from_f64(DType::I16, &[1.9, -2.0]),
            Some(Values::I16(vec![1, -2]))
        );
        assert_eq!(
            Values::from_i32(DType::I8, &[255]),
            Some(Values::I8(vec![-1]))
        );
        assert_eq!(Values::from_f64(DType::Char, &[1.0]), None);
        let nan = Values::from_f64(DType::F32, &[f64::NAN]).unwrap();
        match nan {
            Values::F32(v) => assert!(v[0].is_nan()),
            other => panic!("unexpected {:?}", other),
        }
    }
}
