use crate::error::{GeometryError, OperationError, Result};

/// Parameters describing a set of boxes over one footprint.
///
/// Lengths share one unit (millimetres by convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    pub total_width: f64,
    pub total_depth: f64,
    pub wall_thickness: f64,
    /// Outer corner radius before feasibility clamping.
    pub corner_radius: f64,
    pub wall_height: f64,
    /// Generate a floor solid under every box.
    pub has_bottom: bool,
    pub min_box_width: f64,
    pub min_box_depth: f64,
    pub max_box_width: f64,
    pub max_box_depth: f64,
    /// Split the footprint into boxes; otherwise one box covers it.
    pub use_multiple_boxes: bool,
    /// Points generated per rounded corner, at least 2 (the arc endpoints).
    pub segments_per_corner: usize,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            total_width: 200.0,
            total_depth: 150.0,
            wall_thickness: 2.0,
            corner_radius: 5.0,
            wall_height: 50.0,
            has_bottom: true,
            min_box_width: 20.0,
            min_box_depth: 20.0,
            max_box_width: 100.0,
            max_box_depth: 100.0,
            use_multiple_boxes: true,
            segments_per_corner: 8,
        }
    }
}

impl BoxParams {
    /// Checks that all values are usable.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidDimensions` for non-positive or non-finite
    ///   lengths, or a negative corner radius
    /// - `OperationError::InvalidInput` if a min box size exceeds its max
    ///   or fewer than 2 corner segments are requested
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [
            ("total width", self.total_width),
            ("total depth", self.total_depth),
            ("wall thickness", self.wall_thickness),
            ("wall height", self.wall_height),
            ("min box width", self.min_box_width),
            ("min box depth", self.min_box_depth),
            ("max box width", self.max_box_width),
            ("max box depth", self.max_box_depth),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::InvalidDimensions { what, value }.into());
            }
        }
        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return Err(GeometryError::InvalidDimensions {
                what: "corner radius",
                value: self.corner_radius,
            }
            .into());
        }
        if self.min_box_width > self.max_box_width || self.min_box_depth > self.max_box_depth {
            return Err(OperationError::InvalidInput(format!(
                "min box size {} x {} exceeds max {} x {}",
                self.min_box_width, self.min_box_depth, self.max_box_width, self.max_box_depth
            ))
            .into());
        }
        if self.segments_per_corner < 2 {
            return Err(OperationError::InvalidInput(format!(
                "segments per corner must be at least 2, got {}",
                self.segments_per_corner
            ))
            .into());
        }
        Ok(())
    }

    /// Max box size per axis, or the whole footprint in single-box mode.
    #[must_use]
    pub fn axis_limits(&self) -> (f64, f64) {
        if self.use_multiple_boxes {
            (self.max_box_width, self.max_box_depth)
        } else {
            (self.total_width, self.total_depth)
        }
    }

    /// Corner radius clamped to what a `width x depth` box can hold.
    ///
    /// The radius never exceeds half the smaller side minus the wall
    /// thickness, and is never negative.
    #[must_use]
    pub fn effective_corner_radius(&self, width: f64, depth: f64) -> f64 {
        let feasible = width.min(depth) * 0.5 - self.wall_thickness;
        self.corner_radius.min(feasible).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        assert!(BoxParams::default().validate().is_ok());
    }

    #[test]
    fn non_positive_lengths_rejected() {
        let params = BoxParams {
            wall_height: 0.0,
            ..BoxParams::default()
        };
        assert!(params.validate().is_err());

        let params = BoxParams {
            total_width: f64::NAN,
            ..BoxParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn min_above_max_rejected() {
        let params = BoxParams {
            min_box_width: 150.0,
            ..BoxParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn fewer_than_two_segments_rejected() {
        for segments_per_corner in [0, 1] {
            let params = BoxParams {
                segments_per_corner,
                ..BoxParams::default()
            };
            assert!(params.validate().is_err());
        }
        let params = BoxParams {
            segments_per_corner: 2,
            ..BoxParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn single_box_mode_uses_footprint() {
        let params = BoxParams {
            use_multiple_boxes: false,
            ..BoxParams::default()
        };
        assert_eq!(params.axis_limits(), (200.0, 150.0));
    }

    #[test]
    fn corner_radius_is_clamped() {
        let params = BoxParams {
            corner_radius: 30.0,
            wall_thickness: 2.0,
            ..BoxParams::default()
        };
        assert_relative_eq!(params.effective_corner_radius(40.0, 100.0), 18.0);
        assert_relative_eq!(params.effective_corner_radius(100.0, 100.0), 30.0);
        assert_relative_eq!(params.effective_corner_radius(3.0, 3.0), 0.0);
    }
}
