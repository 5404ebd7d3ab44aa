//! Sparse ↔ dense histogram conversion and binned decoding.
//!
//! The dense form is indexed `0..=max_key` with zeros filled in; the sparse
//! form omits zero counts. `to_sparse(to_dense(h)) == h` always holds. The
//! reverse round trip drops trailing zeros past the last non-zero index,
//! which is intended: a sparse histogram has no notion of length.

use super::schema::{validate_geometry, BinnedHistogram};
use crate::utils::config::MAX_DENSE_LEN;
use crate::utils::error::MrcError;
use log::debug;
use std::collections::BTreeMap;

/// Expand a sparse histogram into a dense array
///
/// The result has `max_key + 1` entries whatever the number of non-zero
/// counts, so memory grows with the largest key: a single key near 2^40
/// would need terabytes. Lengths above [`MAX_DENSE_LEN`] are refused.
///
/// # Errors
/// * `MrcError::EmptyInput` - the sparse histogram has no entries, so the
///   dense length is undefined
/// * `MrcError::MalformedInput` - the dense length would exceed
///   [`MAX_DENSE_LEN`]
pub fn to_dense<T>(sparse: &BTreeMap<u64, T>) -> Result<Vec<T>, MrcError>
where
    T: Copy + Default,
{
    let max_key = sparse
        .keys()
        .next_back()
        .copied()
        .ok_or_else(|| MrcError::EmptyInput("cannot densify an empty histogram".to_string()))?;

    if max_key >= MAX_DENSE_LEN {
        return Err(MrcError::MalformedInput(format!(
            "histogram key {} needs a dense array longer than {} entries",
            max_key, MAX_DENSE_LEN
        )));
    }
    let length = max_key as usize + 1;

    let mut dense = vec![T::default(); length];
    for (&key, &count) in sparse {
        dense[key as usize] = count;
    }
    Ok(dense)
}

/// Collapse a dense array into a sparse histogram, dropping zero counts
pub fn to_sparse<T>(dense: &[T]) -> BTreeMap<u64, T>
where
    T: Copy + Default + PartialEq,
{
    let zero = T::default();
    dense
        .iter()
        .enumerate()
        .filter(|(_, count)| **count != zero)
        .map(|(index, &count)| (index as u64, count))
        .collect()
}

/// Decode a binned histogram from its string-keyed distance → count map
///
/// Each raw key is scaled by `bin_size`. The false-infinity bucket is placed
/// at `num_bins * bin_size` and the infinity bucket last.
///
/// # Errors
/// * `MrcError::MalformedInput` - zero geometry, or a key that is not a
///   non-negative integer
pub fn decode_binned<'a, I>(
    num_bins: u64,
    bin_size: u64,
    false_infinity: f64,
    infinity: f64,
    histogram: I,
) -> Result<BinnedHistogram, MrcError>
where
    I: IntoIterator<Item = (&'a String, &'a f64)>,
{
    validate_geometry(num_bins, bin_size)?;

    let mut bins: BTreeMap<u64, f64> = BTreeMap::new();
    for (raw_key, &count) in histogram {
        let key = parse_raw_key(raw_key)?;
        let scaled = key.checked_mul(bin_size).ok_or_else(|| {
            MrcError::MalformedInput(format!("key {} overflows when scaled by {}", key, bin_size))
        })?;
        *bins.entry(scaled).or_insert(0.0) += count;
    }

    debug!(
        "Decoded {} bins (num_bins={}, bin_size={})",
        bins.len(),
        num_bins,
        bin_size
    );

    Ok(BinnedHistogram::from_parts(
        num_bins,
        bin_size,
        bins,
        false_infinity,
        infinity,
    ))
}

/// Parse a JSON object key into a raw distance
///
/// Integer strings are accepted directly; integral float strings such as
/// `"3.0"` are accepted as well.
fn parse_raw_key(raw_key: &str) -> Result<u64, MrcError> {
    if let Ok(key) = raw_key.parse::<u64>() {
        return Ok(key);
    }
    match raw_key.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => Ok(value as u64),
        _ => Err(MrcError::MalformedInput(format!(
            "histogram key '{}' is not a non-negative integer",
            raw_key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::schema::Distance;

    #[test]
    fn test_to_dense_fills_zeros() {
        let mut sparse = BTreeMap::new();
        sparse.insert(1u64, 4u64);
        sparse.insert(4, 2);

        assert_eq!(to_dense(&sparse).unwrap(), vec![0, 4, 0, 0, 2]);
    }

    #[test]
    fn test_to_dense_empty() {
        let sparse: BTreeMap<u64, u64> = BTreeMap::new();
        assert!(matches!(to_dense(&sparse), Err(MrcError::EmptyInput(_))));
    }

    #[test]
    fn test_to_sparse_drops_zeros() {
        let sparse = to_sparse(&[0.0, 1.5, 0.0, 2.0, 0.0]);
        assert_eq!(sparse.len(), 2);
        assert_eq!(sparse[&1], 1.5);
        assert_eq!(sparse[&3], 2.0);
    }

    #[test]
    fn test_dense_round_trip_drops_trailing_zeros() {
        let dense = vec![3u64, 0, 1, 0, 0];
        let back = to_dense(&to_sparse(&dense)).unwrap();
        assert_eq!(back, vec![3, 0, 1]);
    }

    #[test]
    fn test_sparse_dense_sparse_is_identity() {
        let cases: Vec<BTreeMap<u64, u64>> = vec![
            [(0, 7)].into_iter().collect(),
            [(0, 1), (3, 2), (9, 5)].into_iter().collect(),
            [(2, 4), (5, 1)].into_iter().collect(),
            [(100_000, 3)].into_iter().collect(),
        ];
        for sparse in cases {
            assert_eq!(to_sparse(&to_dense(&sparse).unwrap()), sparse);
        }

        let fractional: BTreeMap<u64, f64> = [(1, 0.25), (4, 1.5), (6, 1e-9)].into_iter().collect();
        assert_eq!(to_sparse(&to_dense(&fractional).unwrap()), fractional);
    }

    #[test]
    fn test_to_dense_refuses_huge_key() {
        let mut sparse = BTreeMap::new();
        sparse.insert(1u64 << 40, 1u64);
        assert!(matches!(to_dense(&sparse), Err(MrcError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_binned() {
        let mut raw = BTreeMap::new();
        raw.insert("0".to_string(), 2.0);
        raw.insert("3".to_string(), 1.0);
        raw.insert("1.0".to_string(), 5.0);

        let hist = decode_binned(10, 4, 7.0, 9.0, &raw).unwrap();
        let entries: Vec<_> = hist.entries().iter().map(|(k, v)| (*k, *v)).collect();

        assert_eq!(
            entries,
            vec![
                (Distance::Finite(0), 2.0),
                (Distance::Finite(4), 5.0),
                (Distance::Finite(12), 1.0),
                (Distance::Finite(40), 7.0),
                (Distance::Infinite, 9.0),
            ]
        );
    }

    #[test]
    fn test_decode_binned_bad_key() {
        let mut raw = BTreeMap::new();
        raw.insert("-1".to_string(), 2.0);
        assert!(decode_binned(10, 1, 0.0, 0.0, &raw).is_err());

        let mut raw = BTreeMap::new();
        raw.insert("2.5".to_string(), 2.0);
        assert!(decode_binned(10, 1, 0.0, 0.0, &raw).is_err());
    }
}
