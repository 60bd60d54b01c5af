//! Scale functions for data-to-pixel mappings and tick generation.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale from data values to pixel positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain has zero width or is not finite.
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!("non-finite domain {domain:?}")));
        }
        if is_singular(domain.0, domain.1, f64::EPSILON) {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Whether `value` lies inside the domain (inclusive).
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        value >= lo && value <= hi
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let span = self.domain_max - self.domain_min;
        let t = if span.is_finite() {
            (value - self.domain_min) / span
        } else {
            // Halve everything when the domain is wider than f64::MAX.
            (value / 2.0 - self.domain_min / 2.0) / (self.domain_max / 2.0 - self.domain_min / 2.0)
        };
        self.range_min + (t as f32) * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Data extent `(min, max)` of finite values, or `None` if there are none.
#[must_use]
pub fn extent<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Merge two optional extents.
#[must_use]
pub fn union(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (x, None) | (None, x) => x,
    }
}

/// Relative width below which an extent is treated as a single value.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Largest integer an f64 counts to without gaps.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Whether `[lo, hi]` is narrower than `tolerance` relative to its magnitude.
fn is_singular(lo: f64, hi: f64, tolerance: f64) -> bool {
    let width = (hi - lo).abs();
    width == 0.0 || width <= lo.abs().max(hi.abs()) * tolerance
}

/// Pad an extent by `margin` of its width on both sides.
///
/// An extent too narrow for its magnitude is widened around its values so it
/// can still be scaled; a missing extent becomes the unit interval.
#[must_use]
pub fn padded(extent: Option<(f64, f64)>, margin: f64) -> (f64, f64) {
    match extent {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo.abs().max(hi.abs()) < 1e6 * f64::MIN_POSITIVE => (-0.055, 0.055),
        Some((lo, hi)) if is_singular(lo, hi, SINGULAR_TOLERANCE) => (lo - lo.abs() * 0.055, hi + hi.abs() * 0.055),
        Some((lo, hi)) => {
            let pad = hi * margin - lo * margin;
            ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
        }
    }
}

/// Round tick values covering `[min, max]` with steps of 1, 2, 2.5 or 5
/// times a power of ten and at most `max_ticks` ticks.
///
/// Falls back to the two ends when no step can be represented exactly or no
/// multiple of the step lies inside the range.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let limit = max_ticks.max(2);
    let span = max - min;
    if !min.is_finite() || !max.is_finite() || span <= 0.0 {
        return vec![min];
    }
    if !span.is_finite() {
        return vec![min, max];
    }

    let mut step = nice_step(span / (limit - 1) as f64);
    let representable = |step: f64| {
        step.is_finite() && step >= f64::MIN_POSITIVE && (min / step).abs() <= MAX_EXACT_INT && (max / step).abs() <= MAX_EXACT_INT
    };
    if !representable(step) {
        return vec![min, max];
    }

    // Grow the step until the count fits.
    loop {
        if let Some(ticks) = ticks_for_step(min, max, step, limit) {
            return if ticks.is_empty() { vec![min, max] } else { ticks };
        }
        let next = nice_step(step * 1.01);
        if next <= step || !representable(next) {
            return vec![min, max];
        }
        step = next;
    }
}

/// Smallest "nice" step not below `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Multiples of `step` inside `[min, max]`, or `None` if there are more than `limit`.
fn ticks_for_step(min: f64, max: f64, step: f64, limit: usize) -> Option<Vec<f64>> {
    let eps = step * 1e-9;
    let first = (min / step).ceil();
    let last = ((max + eps) / step).floor();
    if last < first {
        return Some(Vec::new());
    }
    let count = last - first + 1.0;
    if count > limit as f64 {
        return None;
    }

    let ticks = (0..count as usize)
        .map(|i| {
            let v = (first + i as f64) * step;
            // Normalize -0.0 and float noise near zero.
            if v.abs() < eps {
                0.0
            } else {
                v
            }
        })
        .collect();
    Some(ticks)
}

/// Format a tick value; very small or very large magnitudes print in
/// scientific notation, integral values without decimals, other values with
/// up to four trimmed decimals.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        let text = format!("{value:.3e}");
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        return format!("{mantissa}e{exponent}");
    }
    if (value - value.round()).abs() < 1e-9 {
        let rounded = value.round();
        return format!("{}", if rounded == 0.0 { 0.0 } else { rounded });
    }

    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 500.0)).unwrap();
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 250.0);
        assert_relative_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_inverted_range() {
        let scale = LinearScale::new((0.0, 10.0), (200.0, 100.0)).unwrap();
        assert_relative_eq!(scale.scale(0.0), 200.0);
        assert_relative_eq!(scale.scale(10.0), 100.0);
    }

    #[test]
    fn test_degenerate_domain_rejected() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_extent_skips_nan() {
        let data = [3.0, f64::NAN, -1.0, 7.5];
        assert_eq!(extent(&data), Some((-1.0, 7.5)));
        assert_eq!(extent(&[] as &[f64]), None);
    }

    #[test]
    fn test_union() {
        assert_eq!(union(Some((0.0, 1.0)), Some((-2.0, 0.5))), Some((-2.0, 1.0)));
        assert_eq!(union(None, Some((1.0, 2.0))), Some((1.0, 2.0)));
        assert_eq!(union(None, None), None);
    }

    #[test]
    fn test_padded() {
        let (lo, hi) = padded(Some((0.0, 10.0)), 0.05);
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);

        let (lo, hi) = padded(Some((3.0, 3.0)), 0.05);
        assert!(lo < 3.0 && hi > 3.0);

        assert_eq!(padded(None, 0.05), (0.0, 1.0));
    }

    #[test]
    fn test_padded_near_constant_large_values() {
        let (lo, hi) = padded(Some((1e17, 1e17 + 16.0)), 0.05);
        assert!(lo < 1e17 && hi > 1e17 + 16.0);
        assert!(LinearScale::new((lo, hi), (0.0, 100.0)).is_ok());
    }

    #[test]
    fn test_padded_tiny_range_keeps_its_width() {
        let (lo, hi) = padded(Some((1e-18, 1.7e-18)), 0.05);
        assert_relative_eq!(lo, 0.965e-18, max_relative = 1e-9);
        assert_relative_eq!(hi, 1.735e-18, max_relative = 1e-9);
        assert!(LinearScale::new((lo, hi), (0.0, 100.0)).is_ok());

        let (lo, hi) = padded(Some((1e-17, 1e-17)), 0.05);
        assert!(lo < 1e-17 && hi > 1e-17);
        assert!(LinearScale::new((lo, hi), (0.0, 100.0)).is_ok());

        assert_eq!(padded(Some((0.0, 0.0)), 0.05), (-0.055, 0.055));
    }

    #[test]
    fn test_padded_huge_range_stays_finite() {
        let (lo, hi) = padded(Some((-1e308, 1e308)), 0.05);
        assert!(lo.is_finite() && hi.is_finite());
        let scale = LinearScale::new((lo, hi), (0.0, 100.0)).unwrap();
        assert_relative_eq!(scale.scale(0.0), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tiny_domain_accepted() {
        let scale = LinearScale::new((1e-18, 2e-18), (0.0, 100.0)).unwrap();
        assert_relative_eq!(scale.scale(1.5e-18), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_nice_ticks_unrepresentable_step_falls_back() {
        let ticks = nice_ticks(1e17, 1e17 + 16.0, 10);
        assert_eq!(ticks, vec![1e17, 1e17 + 16.0]);
    }

    #[test]
    fn test_nice_ticks_tiny_range() {
        let ticks = nice_ticks(1e-18, 1.7e-18, 8);
        assert!(!ticks.is_empty() && ticks.len() <= 8);
        assert!(ticks.iter().all(|t| (1e-18 * (1.0 - 1e-9)..=1.7e-18 * (1.0 + 1e-9)).contains(t)));
    }

    #[test]
    fn test_nice_ticks_round_values() {
        let ticks = nice_ticks(-10.5, 10.5, 9);
        assert_eq!(ticks, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);

        let ticks = nice_ticks(0.0, 1.0, 6);
        assert_eq!(ticks.len(), 6);
        for (tick, expected) in ticks.iter().zip([0.0, 0.2, 0.4, 0.6, 0.8, 1.0]) {
            assert_relative_eq!(*tick, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nice_ticks_without_inner_multiple() {
        assert_eq!(nice_ticks(1.1, 1.9, 2), vec![1.1, 1.9]);
    }

    #[test]
    fn test_nice_ticks_respects_limit() {
        for max_ticks in 2..10 {
            let ticks = nice_ticks(0.0, 977.0, max_ticks);
            assert!(ticks.len() <= max_ticks, "{ticks:?} exceeds {max_ticks}");
            assert!(!ticks.is_empty());
        }
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(0.125), "0.125");
        assert_eq!(format_tick(1.0 / 3.0), "0.3333");
        assert_eq!(format_tick(1.5e-18), "1.5e-18");
        assert_eq!(format_tick(-2e-5), "-2e-5");
        assert_eq!(format_tick(1e17), "1e17");
        assert_eq!(format_tick(123_456.0), "123456");
    }
}
