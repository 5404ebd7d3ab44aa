//! Area between two piecewise-linear curves.
//!
//! Each pair of consecutive x-values bounds a trapezoid with vertical sides.
//! Where the curves cross inside it, the trapezoid is split at the crossing
//! so the unsigned area does not cancel across the two halves.

use super::geometry::{intersect, CurvePoint, Intersection, Segment};
use crate::utils::config::MAX_SPLIT_DEPTH;
use crate::utils::error::MrcError;

/// Area between oracle segment `a0→a1` and output segment `b0→b1`
///
/// Signed area counts oracle-above-output as positive. Unsigned area takes
/// each endpoint difference in absolute value.
///
/// # Errors
/// * `MrcError::GeometricDegeneracy` - the sides are not vertical
///   (`a0.x != b0.x` or `a1.x != b1.x`), `a0.x > a1.x`, or crossings keep
///   splitting past the depth cap
pub fn trapezoid_area(
    a0: CurvePoint,
    a1: CurvePoint,
    b0: CurvePoint,
    b1: CurvePoint,
    signed: bool,
) -> Result<f64, MrcError> {
    split_area(a0, a1, b0, b1, signed, 0)
}

fn split_area(
    a0: CurvePoint,
    a1: CurvePoint,
    b0: CurvePoint,
    b1: CurvePoint,
    signed: bool,
    depth: u32,
) -> Result<f64, MrcError> {
    if a0.x != b0.x || a1.x != b1.x {
        return Err(MrcError::GeometricDegeneracy(format!(
            "trapezoid sides are not vertical: a0.x={} b0.x={} a1.x={} b1.x={}",
            a0.x, b0.x, a1.x, b1.x
        )));
    }
    if a0.x > a1.x {
        return Err(MrcError::GeometricDegeneracy(format!(
            "x-values are decreasing: {} > {}",
            a0.x, a1.x
        )));
    }
    if depth > MAX_SPLIT_DEPTH {
        return Err(MrcError::GeometricDegeneracy(format!(
            "crossing split exceeded depth {}",
            MAX_SPLIT_DEPTH
        )));
    }

    let dx = a1.x - a0.x;
    if dx == 0.0 {
        return Ok(0.0);
    }

    if a0 != b0 && a1 != b1 {
        let oracle = Segment::new(a0, a1);
        let output = Segment::new(b0, b1);
        match intersect(&oracle, &output) {
            Intersection::NoIntersection => {}
            Intersection::Coincident => return Ok(0.0),
            Intersection::Point(p) => {
                let left = split_area(a0, p, b0, p, signed, depth + 1)?;
                let right = split_area(p, a1, p, b1, signed, depth + 1)?;
                return Ok(left + right);
            }
        }
    }

    let (d0, d1) = (a0.y - b0.y, a1.y - b1.y);
    if signed {
        Ok(dx * (d0 + d1) / 2.0)
    } else {
        Ok(dx * (d0.abs() + d1.abs()) / 2.0)
    }
}

/// Total area between two curves sampled on the same x-grid
///
/// # Errors
/// * `MrcError::MalformedInput` - the three series differ in length
/// * `MrcError::GeometricDegeneracy` - see [`trapezoid_area`]
pub fn mean_absolute_error(
    xs: &[f64],
    oracle_ys: &[f64],
    output_ys: &[f64],
    signed: bool,
) -> Result<f64, MrcError> {
    if xs.len() != oracle_ys.len() || xs.len() != output_ys.len() {
        return Err(MrcError::MalformedInput(format!(
            "series lengths differ: xs={} oracle={} output={}",
            xs.len(),
            oracle_ys.len(),
            output_ys.len()
        )));
    }

    let mut total = 0.0;
    for i in 1..xs.len() {
        total += trapezoid_area(
            CurvePoint::new(xs[i - 1], oracle_ys[i - 1]),
            CurvePoint::new(xs[i], oracle_ys[i]),
            CurvePoint::new(xs[i - 1], output_ys[i - 1]),
            CurvePoint::new(xs[i], output_ys[i]),
            signed,
        )?;
    }
    Ok(total)
}

/// Signed area between an `(x, value)` series and the zero line
pub fn calculate_average_error(diff: &[(f64, f64)]) -> Result<f64, MrcError> {
    let xs: Vec<f64> = diff.iter().map(|&(x, _)| x).collect();
    let ys: Vec<f64> = diff.iter().map(|&(_, y)| y).collect();
    mean_absolute_error(&xs, &ys, &vec![0.0; ys.len()], true)
}

/// [`calculate_average_error`] divided by the width of the x-range
///
/// # Errors
/// * `MrcError::EmptyInput` - fewer than two points
/// * `MrcError::GeometricDegeneracy` - the x-range has zero width
pub fn normalized_average_error(diff: &[(f64, f64)]) -> Result<f64, MrcError> {
    if diff.len() < 2 {
        return Err(MrcError::EmptyInput(
            "average error needs at least two points".to_string(),
        ));
    }
    let min = diff.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let max = diff.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    let width = max - min;
    if width == 0.0 {
        return Err(MrcError::GeometricDegeneracy(
            "x-range has zero width".to_string(),
        ));
    }
    Ok(calculate_average_error(diff)? / width)
}

/// Index-wise mean absolute error between two dense MRCs
///
/// The shorter curve is padded with its last value.
pub fn dense_mean_absolute_error(lhs: &[f64], rhs: &[f64]) -> Result<f64, MrcError> {
    dense_mean_error(lhs, rhs, f64::abs)
}

/// Index-wise mean squared error between two dense MRCs
///
/// The shorter curve is padded with its last value.
pub fn dense_mean_squared_error(lhs: &[f64], rhs: &[f64]) -> Result<f64, MrcError> {
    dense_mean_error(lhs, rhs, |diff| diff * diff)
}

fn dense_mean_error(lhs: &[f64], rhs: &[f64], loss: impl Fn(f64) -> f64) -> Result<f64, MrcError> {
    let (longer, shorter) = if lhs.len() >= rhs.len() {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };
    if longer.is_empty() {
        return Ok(0.0);
    }
    let Some(&pad) = shorter.last() else {
        return Err(MrcError::EmptyInput(
            "cannot compare a curve against an empty curve".to_string(),
        ));
    };

    let sum: f64 = longer
        .iter()
        .enumerate()
        .map(|(i, &value)| loss(value - shorter.get(i).copied().unwrap_or(pad)))
        .sum();
    Ok(sum / longer.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> CurvePoint {
        CurvePoint::new(x, y)
    }

    #[test]
    fn test_parallel_trapezoid() {
        let area = trapezoid_area(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0), false);
        assert_eq!(area.unwrap(), 1.0);
    }

    #[test]
    fn test_crossing_unsigned() {
        let area = trapezoid_area(pt(0.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0), pt(1.0, 0.0), false);
        assert_eq!(area.unwrap(), 0.5);
    }

    #[test]
    fn test_crossing_signed_cancels() {
        let area = trapezoid_area(pt(0.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0), pt(1.0, 0.0), true);
        assert_eq!(area.unwrap(), 0.0);
    }

    #[test]
    fn test_identical_lines() {
        let area = trapezoid_area(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 0.0), pt(1.0, 0.0), true);
        assert_eq!(area.unwrap(), 0.0);
    }

    #[test]
    fn test_identical_points() {
        let p = pt(0.0, 0.0);
        assert_eq!(trapezoid_area(p, p, p, p, true).unwrap(), 0.0);
    }

    #[test]
    fn test_shared_endpoint_uses_formula() {
        // Lines meet only at x=0; no split needed
        let area = trapezoid_area(pt(0.0, 1.0), pt(2.0, 1.0), pt(0.0, 1.0), pt(2.0, 0.0), false);
        assert_eq!(area.unwrap(), 1.0);
    }

    #[test]
    fn test_coincident_overlap_is_zero() {
        let area = trapezoid_area(pt(0.0, 0.0), pt(2.0, 2.0), pt(0.0, 0.0), pt(2.0, 2.0), false);
        assert_eq!(area.unwrap(), 0.0);
    }

    #[test]
    fn test_precondition_violation() {
        let result = trapezoid_area(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.5, 1.0), pt(1.0, 1.0), true);
        assert!(matches!(result, Err(MrcError::GeometricDegeneracy(_))));

        let result = trapezoid_area(pt(1.0, 0.0), pt(0.0, 0.0), pt(1.0, 1.0), pt(0.0, 1.0), true);
        assert!(matches!(result, Err(MrcError::GeometricDegeneracy(_))));
    }

    #[test]
    fn test_full_signed_area() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let area = mean_absolute_error(&xs, &[1.0; 4], &[0.0; 4], true).unwrap();
        assert_eq!(area, 3.0);
    }

    #[test]
    fn test_full_alternating_unsigned() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let oracle = [1.0, 0.0, 1.0, 0.0];
        let output = [0.0, 1.0, 0.0, 1.0];
        assert_eq!(mean_absolute_error(&xs, &oracle, &output, false).unwrap(), 1.5);
    }

    #[test]
    fn test_length_mismatch() {
        let result = mean_absolute_error(&[0.0, 1.0], &[1.0], &[1.0, 1.0], true);
        assert!(matches!(result, Err(MrcError::MalformedInput(_))));
    }

    #[test]
    fn test_average_error() {
        let diff = [(0.0, 2.0), (2.0, 2.0), (4.0, 2.0)];
        assert_eq!(calculate_average_error(&diff).unwrap(), 8.0);
        assert_eq!(normalized_average_error(&diff).unwrap(), 2.0);
        assert!(normalized_average_error(&diff[..1]).is_err());
    }

    #[test]
    fn test_dense_errors_pad_shorter_curve() {
        let lhs = [1.0, 0.5];
        let rhs = [1.0, 0.5, 0.25, 0.0];
        // Padded lhs: [1.0, 0.5, 0.5, 0.5]
        assert_eq!(dense_mean_absolute_error(&lhs, &rhs).unwrap(), 0.75 / 4.0);
        assert_eq!(dense_mean_squared_error(&lhs, &rhs).unwrap(), 0.3125 / 4.0);
    }

    #[test]
    fn test_dense_errors_empty() {
        assert_eq!(dense_mean_absolute_error(&[], &[]).unwrap(), 0.0);
        assert!(matches!(
            dense_mean_squared_error(&[], &[1.0]),
            Err(MrcError::EmptyInput(_))
        ));
    }
}
