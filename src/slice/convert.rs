//! Host-to-storage conversion of start and count vectors
//!
//! The host lists axes fastest-varying first and counts from 1; the storage
//! engine lists them slowest-varying first and counts from 0. Callers may
//! also leave out degenerate (length 1) axes altogether.

use crate::error::{Error, Result};

/// Host value meaning "unspecified": start at the first element, or read to
/// the end of the axis
pub const UNSPECIFIED: i64 = -1;

/// True for the single-element `[-1]` shorthand
pub fn is_unspecified(values: &[i64]) -> bool {
    values == [UNSPECIFIED]
}

/// Number of axes longer than 1
pub fn non_degenerate(shape: &[usize]) -> usize {
    shape.iter().filter(|&&len| len > 1).count()
}

/// Convert a host `start` into 0-based storage order
pub fn storage_start(shape: &[usize], start: &[i64]) -> Result<Vec<usize>> {
    if is_unspecified(start) {
        return Ok(vec![0; shape.len()]);
    }

    let reversed: Vec<i64> = start.iter().rev().copied().collect();
    let expanded = expand_degenerate(shape, reversed, 1, "start")?;

    expanded
        .into_iter()
        .enumerate()
        .map(|(axis, s)| {
            s.checked_sub(1)
                .and_then(|s| usize::try_from(s).ok())
                .ok_or(Error::InvalidIndex {
                    arg: "start",
                    axis,
                    value: s,
                })
        })
        .collect()
}

/// Convert a host `count` into storage order, given the converted start
///
/// `-1`, either as the whole vector or for a single axis, means "to the end
/// of the axis".
pub fn storage_count(shape: &[usize], start: &[usize], count: &[i64]) -> Result<Vec<usize>> {
    let rest = |axis: usize| shape[axis].saturating_sub(start[axis]);

    if is_unspecified(count) {
        return Ok((0..shape.len()).map(rest).collect());
    }

    let reversed: Vec<i64> = count.iter().rev().copied().collect();
    let expanded = expand_degenerate(shape, reversed, 1, "count")?;

    expanded
        .into_iter()
        .enumerate()
        .map(|(axis, c)| match c {
            UNSPECIFIED => Ok(rest(axis)),
            c => usize::try_from(c).map_err(|_| Error::InvalidIndex {
                arg: "count",
                axis,
                value: c,
            }),
        })
        .collect()
}

/// Re-insert degenerate axes into a vector that only covers the
/// non-degenerate ones
///
/// A full-length vector is returned as is.
fn expand_degenerate(
    shape: &[usize],
    values: Vec<i64>,
    degenerate: i64,
    arg: &'static str,
) -> Result<Vec<i64>> {
    let ndims = shape.len();
    if values.len() == ndims {
        return Ok(values);
    }

    let non_degenerate = non_degenerate(shape);
    if values.len() != non_degenerate {
        return Err(Error::BadRequestLength {
            arg,
            len: values.len(),
            ndims,
            non_degenerate,
        });
    }

    let mut supplied = values.into_iter();
    Ok(shape
        .iter()
        .map(|&len| {
            if len > 1 {
                // lengths match, so this never runs dry
                supplied.next().unwrap_or(degenerate)
            } else {
                degenerate
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_start_is_zero() {
        assert_eq!(storage_start(&[4, 1, 3], &[-1]).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn start_is_reversed_and_zero_based() {
        // host (x, y, z) = (2, 3, 1) -> storage (z, y, x) = (0, 2, 1)
        assert_eq!(storage_start(&[2, 5, 6], &[2, 3, 1]).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn start_for_non_degenerate_axes_only() {
        // storage shape (t=1, y=5, x=6); host gives only (x, y)
        assert_eq!(storage_start(&[1, 5, 6], &[3, 2]).unwrap(), vec![0, 1, 2]);
        assert_eq!(
            storage_start(&[1, 5, 6], &[3, 2]).unwrap(),
            storage_start(&[1, 5, 6], &[3, 2, 1]).unwrap()
        );
    }

    #[test]
    fn start_of_wrong_length_is_rejected() {
        let err = storage_start(&[1, 5, 6], &[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::BadRequestLength {
                arg: "start",
                len: 1,
                ndims: 3,
                non_degenerate: 2
            }
        ));
    }

    #[test]
    fn zero_start_is_invalid() {
        let err = storage_start(&[5, 6], &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIndex {
                arg: "start",
                axis: 1,
                value: 0
            }
        ));
    }

    #[test]
    fn extreme_start_is_invalid() {
        let err = storage_start(&[4], &[i64::MIN]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIndex {
                arg: "start",
                axis: 0,
                value: i64::MIN
            }
        ));
    }

    #[test]
    fn unspecified_count_reads_to_end() {
        assert_eq!(
            storage_count(&[4, 5, 6], &[1, 0, 2], &[-1]).unwrap(),
            vec![3, 5, 4]
        );
    }

    #[test]
    fn per_axis_unspecified_count() {
        // host count (x=2, y=rest)
        assert_eq!(
            storage_count(&[5, 6], &[1, 0], &[2, -1]).unwrap(),
            vec![4, 2]
        );
    }

    #[test]
    fn count_for_non_degenerate_axes_only() {
        assert_eq!(
            storage_count(&[5, 1, 6], &[0, 0, 0], &[6, 5]).unwrap(),
            vec![5, 1, 6]
        );
    }

    #[test]
    fn count_of_wrong_length_is_rejected() {
        assert!(matches!(
            storage_count(&[5, 1, 6], &[0, 0, 0], &[6]),
            Err(Error::BadRequestLength { arg: "count", .. })
        ));
    }

    #[test]
    fn negative_count_is_invalid() {
        assert!(matches!(
            storage_count(&[5], &[0], &[-2]),
            Err(Error::InvalidIndex {
                arg: "count",
                value: -2,
                ..
            })
        ));
    }

    #[test]
    fn all_degenerate_accepts_empty_vectors() {
        assert_eq!(storage_start(&[1, 1], &[]).unwrap(), vec![0, 0]);
        assert_eq!(storage_count(&[1, 1], &[0, 0], &[]).unwrap(), vec![1, 1]);
    }
}
