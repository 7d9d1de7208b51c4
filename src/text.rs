//! Fixed-width text packing
//!
//! The storage engine keeps a text variable as one contiguous block of
//! characters whose innermost axis is the character axis. The host holds an
//! array of independent strings, one per slot of the remaining axes.

use crate::error::{Error, Result};
use crate::slice::{self, Address};
use crate::storage::Storage;
use crate::types::{Values, VarRef};

/// Highest text slice rank handled (character axis included)
pub const MAX_TEXT_RANK: usize = 4;

/// Reject ranks outside 1..=4 before any transfer
pub fn check_rank(rank: usize) -> Result<()> {
    if (1..=MAX_TEXT_RANK).contains(&rank) {
        Ok(())
    } else {
        Err(Error::UnsupportedTextRank(rank))
    }
}

/// Number of strings in a text slice: product of the non-character counts
pub fn string_count(count: &[usize]) -> usize {
    match count.split_last() {
        Some((_, outer)) => outer.iter().product(),
        None => 0,
    }
}

/// Split a flat buffer into fixed-width strings
///
/// `buffer` must hold `product(count)` bytes. Each slot is as wide as the
/// character axis and ends at its first NUL.
pub fn unpack(buffer: &[u8], count: &[usize]) -> Result<Vec<String>> {
    let Some(&width) = count.last() else {
        return Ok(Vec::new());
    };
    let nstrings = string_count(count);

    let mut strings = Vec::new();
    strings
        .try_reserve_exact(nstrings)
        .map_err(|_| Error::Allocation {
            elements: nstrings,
        })?;
    strings.extend((0..nstrings).map(|i| {
        let slot = &buffer[i * width..(i + 1) * width];
        let end = slot.iter().position(|&b| b == 0).unwrap_or(width);
        String::from_utf8_lossy(&slot[..end]).into_owned()
    }));
    Ok(strings)
}

/// A string of `len` spaces
pub fn blank(len: usize) -> String {
    " ".repeat(len)
}

/// Read a text slice and unpack it into strings
pub fn read<S: Storage + ?Sized>(store: &S, var: VarRef, address: &Address) -> Result<Vec<String>> {
    check_rank(address.rank())?;
    match store.get_vara(var, &address.start, &address.count)? {
        Values::Text(buffer) => {
            let expected = address.num_elements();
            if buffer.len() != expected {
                return Err(Error::DataLengthMismatch {
                    expected,
                    actual: buffer.len(),
                });
            }
            unpack(&buffer, &address.count)
        }
        other => Err(Error::TypeMismatch {
            operation: "text read",
            dtype: other.dtype(),
        }),
    }
}

/// Write strings into a text slice, one transfer per string
///
/// Each string is truncated to the character-axis count; shorter strings
/// leave the rest of their slot untouched. A failed transfer stops the
/// write, leaving the strings before it in place.
pub fn write<S, T>(store: &mut S, var: VarRef, address: &Address, strings: &[T]) -> Result<()>
where
    S: Storage + ?Sized,
    T: AsRef<str>,
{
    let rank = address.rank();
    check_rank(rank)?;

    let expected = string_count(&address.count);
    if strings.len() != expected {
        return Err(Error::StringCountMismatch {
            expected,
            actual: strings.len(),
        });
    }

    let width = address.count[rank - 1];

    if rank == 1 {
        let bytes = strings[0].as_ref().as_bytes();
        let len = width.min(bytes.len());
        return store
            .put_vara(
                var,
                &address.start,
                &[len],
                &Values::Text(bytes[..len].to_vec()),
            )
            .map_err(|source| Error::TextTransfer { index: 0, source });
    }

    let outer_start = &address.start[..rank - 1];
    let outer_count = &address.count[..rank - 1];
    let mut index = vec![0usize; rank - 1];

    for (i, s) in strings.iter().enumerate() {
        let bytes = s.as_ref().as_bytes();
        let len = width.min(bytes.len());

        let mut start: Vec<usize> = outer_start
            .iter()
            .zip(&index)
            .map(|(base, offset)| base + offset)
            .collect();
        start.push(0);
        let mut count = vec![1usize; rank - 1];
        count.push(len);

        store
            .put_vara(var, &start, &count, &Values::Text(bytes[..len].to_vec()))
            .map_err(|source| {
                log::warn!(
                    "text write stopped at string {} (start {:?} count {:?}): {}",
                    i,
                    start,
                    count,
                    source
                );
                Error::TextTransfer { index: i, source }
            })?;

        slice::advance(&mut index, outer_count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_fixed_width() {
        let buffer = b"ab\0\0cdefgh\0\0";
        let strings = unpack(buffer, &[3, 4]).unwrap();
        assert_eq!(strings, vec!["ab", "cdef", "gh"]);
    }

    #[test]
    fn unpack_ignores_bytes_after_nul() {
        let strings = unpack(b"a\0zz", &[1, 4]).unwrap();
        assert_eq!(strings, vec!["a"]);
    }

    #[test]
    fn unpack_three_dims() {
        let buffer = b"aabbccddeeff";
        let strings = unpack(buffer, &[2, 3, 2]).unwrap();
        assert_eq!(strings, vec!["aa", "bb", "cc", "dd", "ee", "ff"]);
    }

    #[test]
    fn unpack_single_string() {
        assert_eq!(unpack(b"hello", &[5]).unwrap(), vec!["hello"]);
    }

    #[test]
    fn string_counts() {
        assert_eq!(string_count(&[7]), 1);
        assert_eq!(string_count(&[2, 3, 8]), 6);
        assert_eq!(string_count(&[0, 8]), 0);
        assert_eq!(string_count(&[]), 0);
    }

    #[test]
    fn rank_limits() {
        assert!(check_rank(1).is_ok());
        assert!(check_rank(4).is_ok());
        assert!(matches!(check_rank(0), Err(Error::UnsupportedTextRank(0))));
        assert!(matches!(check_rank(5), Err(Error::UnsupportedTextRank(5))));
    }

    #[test]
    fn blank_strings() {
        assert_eq!(blank(3), "   ");
        assert_eq!(blank(0), "");
    }
}
