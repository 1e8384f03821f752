use crate::error::{GeometryError, Result};

/// Remainders smaller than this fraction of the max size are dropped.
const REMAINDER_EPSILON: f64 = 1e-9;

/// One box-sized span along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub size: f64,
    pub offset: f64,
}

/// The partition of one total axis length into box segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLayout {
    pub segments: Vec<Segment>,
}

impl AxisLayout {
    /// Splits `total` into `ceil(total / max)` segments of size `max`,
    /// the last one taking whatever remains.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if either length is not
    /// positive and finite.
    pub fn partition(total: f64, max: f64) -> Result<Self> {
        for (what, value) in [("total length", total), ("max box size", max)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidDimensions { what, value }.into());
            }
        }

        let mut sizes = Vec::new();
        let mut remaining = total;
        while remaining > max * (1.0 + REMAINDER_EPSILON) {
            sizes.push(max);
            remaining -= max;
        }
        if remaining > max * REMAINDER_EPSILON || sizes.is_empty() {
            sizes.push(remaining);
        }

        let mut offset = 0.0;
        let segments = sizes
            .into_iter()
            .map(|size| {
                let seg = Segment { size, offset };
                offset += size;
                seg
            })
            .collect();
        Ok(Self { segments })
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment sizes in order.
    #[must_use]
    pub fn sizes(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.size).collect()
    }

    /// Sum of all segment sizes.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.segments.iter().map(|s| s.size).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn remainder_goes_to_last_segment() {
        let axis = AxisLayout::partition(250.0, 100.0).unwrap();
        assert_eq!(axis.sizes(), vec![100.0, 100.0, 50.0]);
        assert_relative_eq!(axis.segments[2].offset, 200.0);
    }

    #[test]
    fn exact_multiple_has_no_remainder() {
        let axis = AxisLayout::partition(300.0, 100.0).unwrap();
        assert_eq!(axis.sizes(), vec![100.0, 100.0, 100.0]);
    }

    #[test]
    fn short_axis_is_one_segment() {
        let axis = AxisLayout::partition(80.0, 100.0).unwrap();
        assert_eq!(axis.sizes(), vec![80.0]);
        assert_relative_eq!(axis.total(), 80.0);
    }

    #[test]
    fn float_noise_does_not_add_sliver() {
        let axis = AxisLayout::partition(0.3, 0.1).unwrap();
        assert_eq!(axis.len(), 3);
        assert_relative_eq!(axis.total(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_lengths_rejected() {
        assert!(AxisLayout::partition(0.0, 100.0).is_err());
        assert!(AxisLayout::partition(100.0, -5.0).is_err());
        assert!(AxisLayout::partition(f64::INFINITY, 10.0).is_err());
    }
}
