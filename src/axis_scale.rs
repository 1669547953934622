//! The per-axis data range owner and data <-> drawing transform.

use crate::geometry::AxisRange;

/// Drawing lengths below this are clamped so the transform stays invertible.
const MINIMUM_DRAWING_LENGTH: f64 = 1.0;

/// Data range an axis scale starts with.
const DEFAULT_DATA_RANGE: (f64, f64) = (0.0, 10.0);

/// Axis direction on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// In-flight transition between two data ranges, advanced cooperatively by
/// the host redraw cycle.
#[derive(Debug, Clone, Copy)]
struct RangeAnimation {
    from: AxisRange,
    to: AxisRange,
    progress: f64,
}

/// The stateful transform and range owner for one axis of one plot.
///
/// Maps between data space and the drawing range `[0, drawing_length]`.
/// Vertical scales invert the mapping (increasing data value maps to a
/// decreasing drawing coordinate) to match top-down drawing surfaces.
///
/// Axis scales are owned by a [`PlotCanvas`](crate::PlotCanvas); tools refer
/// to them by [`AxisScaleId`](crate::AxisScaleId) and mutate them through the
/// canvas so autoscale bookkeeping observes every transition.
#[derive(Debug, Clone)]
pub struct AxisScale {
    orientation: Orientation,
    data_range: AxisRange,
    drawing_length: f64,
    auto_scale_enabled: bool,
    normalization_enabled: bool,
    normalization_range: AxisRange,
    waterfall_amount: f64,
    log_scale_enabled: bool,
    animation: Option<RangeAnimation>,
}

impl AxisScale {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            data_range: AxisRange::new(DEFAULT_DATA_RANGE.0, DEFAULT_DATA_RANGE.1),
            drawing_length: 100.0,
            auto_scale_enabled: false,
            normalization_enabled: false,
            normalization_range: AxisRange::new(0.0, 1.0),
            waterfall_amount: 0.0,
            log_scale_enabled: false,
            animation: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The stored data range. Never empty: degenerate requests are padded on
    /// the way in.
    pub fn data_range(&self) -> AxisRange {
        self.data_range
    }

    pub fn min(&self) -> f64 {
        self.data_range.min()
    }

    pub fn max(&self) -> f64 {
        self.data_range.max()
    }

    pub fn drawing_length(&self) -> f64 {
        self.drawing_length
    }

    /// Set the length of the drawing range `[0, drawing_length]`.
    pub fn set_drawing_length(&mut self, length: f64) {
        self.drawing_length = length.max(MINIMUM_DRAWING_LENGTH);
    }

    pub fn auto_scale_enabled(&self) -> bool {
        self.auto_scale_enabled
    }

    /// Toggle autoscaling. Returns whether the flag actually changed, so the
    /// owning canvas can schedule a recompute on a transition to enabled.
    pub fn set_auto_scale_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.auto_scale_enabled != enabled;
        self.auto_scale_enabled = enabled;
        changed
    }

    pub fn normalization_enabled(&self) -> bool {
        self.normalization_enabled
    }

    pub fn normalization_range(&self) -> AxisRange {
        self.normalization_range
    }

    /// Enable or disable normalization. While enabled, transforms run against
    /// `range` instead of the stored data range; the stored range is never
    /// modified.
    pub fn set_normalization(&mut self, enabled: bool, range: AxisRange) {
        self.normalization_enabled = enabled;
        self.normalization_range = range.padded_to_minimum();
    }

    pub fn waterfall_amount(&self) -> f64 {
        self.waterfall_amount
    }

    /// Per-item stagger along this axis, applied at paint time in proportion
    /// to each item's position among the items targeting this scale. Zero
    /// disables the effect.
    pub fn set_waterfall_amount(&mut self, amount: f64) {
        self.waterfall_amount = amount;
    }

    pub fn log_scale_enabled(&self) -> bool {
        self.log_scale_enabled
    }

    /// Base-10 logarithmic display. Only engages while the effective range is
    /// strictly positive; otherwise the transform stays linear.
    pub fn set_log_scale_enabled(&mut self, enabled: bool) {
        self.log_scale_enabled = enabled;
    }

    /// Set the data range directly. This is the manual entry point used by
    /// tools and hosts: it disables autoscaling for this scale, on the
    /// assumption that the caller is taking over range control. Re-enable
    /// explicitly if automatic fitting should resume.
    pub fn set_data_range(&mut self, range: AxisRange) {
        self.auto_scale_enabled = false;
        self.apply_range(range);
    }

    /// Like [`AxisScale::set_data_range`], but transitions to the new range
    /// over subsequent [`AxisScale::advance_animation`] calls instead of
    /// immediately.
    pub fn set_data_range_animated(&mut self, range: AxisRange) {
        self.auto_scale_enabled = false;
        self.animation = Some(RangeAnimation {
            from: self.data_range,
            to: range.padded_to_minimum(),
            progress: 0.0,
        });
    }

    /// Range application reserved for the autoscale recompute: identical to a
    /// manual set except the autoscale flag is left untouched. Keeping this a
    /// separate operation is what stops automatic fitting from silently
    /// disabling itself.
    pub(crate) fn apply_autoscale_range(&mut self, range: AxisRange) {
        self.apply_range(range);
    }

    fn apply_range(&mut self, range: AxisRange) {
        self.animation = None;
        self.data_range = range.padded_to_minimum();
    }

    /// Advance an in-flight range animation by `amount` of its total progress
    /// (1.0 completes it). Returns whether an animation was active.
    pub fn advance_animation(&mut self, amount: f64) -> bool {
        let Some(animation) = &mut self.animation else {
            return false;
        };
        animation.progress = (animation.progress + amount).min(1.0);
        self.data_range = animation.from.lerp(animation.to, animation.progress);
        if animation.progress >= 1.0 {
            self.animation = None;
        }
        true
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The range transforms map from: the normalization range while
    /// normalization is enabled, the stored data range otherwise.
    pub fn effective_data_range(&self) -> AxisRange {
        if self.normalization_enabled {
            self.normalization_range
        } else {
            self.data_range
        }
    }

    // Returns (basis min, basis span, log-active) for the affine transform,
    // in log10 space when the log display engages.
    fn transform_basis(&self) -> (f64, f64, bool) {
        let range = self.effective_data_range();
        if self.log_scale_enabled && range.min() > 0.0 {
            let min = range.min().log10();
            let span = range.max().log10() - min;
            if span > 0.0 {
                return (min, span, true);
            }
        }
        (range.min(), range.span(), false)
    }

    /// Map a data value to a drawing coordinate in `[0, drawing_length]`.
    pub fn map_data_to_drawing(&self, value: f64) -> f64 {
        let (min, span, log) = self.transform_basis();
        let value = if log {
            // Non-representable values clamp to the low edge.
            if value > 0.0 { value.log10() } else { min }
        } else {
            value
        };
        let fraction = (value - min) / span;
        match self.orientation {
            Orientation::Horizontal => fraction * self.drawing_length,
            Orientation::Vertical => (1.0 - fraction) * self.drawing_length,
        }
    }

    /// Map a drawing coordinate back to a data value.
    pub fn map_drawing_to_data(&self, coordinate: f64) -> f64 {
        let (min, span, log) = self.transform_basis();
        let fraction = match self.orientation {
            Orientation::Horizontal => coordinate / self.drawing_length,
            Orientation::Vertical => 1.0 - coordinate / self.drawing_length,
        };
        let value = min + fraction * span;
        if log { 10f64.powf(value) } else { value }
    }

    /// Map a drawing-space interval to data space. The result is normalized,
    /// which absorbs the endpoint swap a vertical scale produces.
    pub fn map_drawing_to_data_range(&self, range: AxisRange) -> AxisRange {
        AxisRange::new(
            self.map_drawing_to_data(range.min()),
            self.map_drawing_to_data(range.max()),
        )
    }
}
