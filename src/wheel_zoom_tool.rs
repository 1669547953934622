//! Scroll-wheel zoom anchored at the pointer, in the style of CAD
//! navigation.

use glam::DVec2;

use crate::axis_scale::Orientation;
use crate::canvas::{AxisScaleId, PlotCanvas, StandardAxis};
use crate::event::{EventResponse, PointerEvent, PointerEventKind};
use crate::geometry::AxisRange;
use crate::tool::Tool;

/// Fraction of the axis range added or removed per wheel detent.
const DEFAULT_ZOOM_INCREMENT: f64 = 0.25;

/// Wheel delta corresponding to one detent (15 degrees on most mice).
const WHEEL_UNIT_DELTA: f64 = 120.0;

/// Cap on how much of the range a single wheel event may remove.
const MAX_ZOOM_STEP: f64 = 0.9;

/// Zooms the target axis scales in and out about the pointer location.
///
/// The data point under the pointer stays fixed while the range scales:
/// with scale factor `F`, each edge moves to `anchor + F * (edge - anchor)`,
/// which shrinks (or grows) the span by `F` while keeping the anchor's
/// fractional position in the range constant.
pub struct WheelZoomTool {
    zoom_increment: f64,
    target_axes: Vec<AxisScaleId>,
}

impl Default for WheelZoomTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelZoomTool {
    /// A wheel zoomer over the default Left, Bottom and Right axis scales.
    pub fn new() -> Self {
        Self::with_increment(DEFAULT_ZOOM_INCREMENT)
    }

    pub fn with_increment(zoom_increment: f64) -> Self {
        Self {
            zoom_increment: zoom_increment.abs(),
            target_axes: vec![
                StandardAxis::Left.into(),
                StandardAxis::Bottom.into(),
                StandardAxis::Right.into(),
            ],
        }
    }

    /// Fraction of the axis range added or removed per wheel detent
    /// (0.25 = 25% by default).
    pub fn zoom_increment(&self) -> f64 {
        self.zoom_increment
    }

    pub fn set_zoom_increment(&mut self, zoom_increment: f64) {
        self.zoom_increment = zoom_increment.abs();
    }

    pub fn target_axes(&self) -> &[AxisScaleId] {
        &self.target_axes
    }

    pub fn set_target_axes(&mut self, axes: Vec<AxisScaleId>) {
        self.target_axes = axes;
    }

    fn wheel(&mut self, canvas: &mut PlotCanvas, position: DVec2, delta: f64) {
        let mut factor =
            1.0 - (self.zoom_increment * delta.abs() / WHEEL_UNIT_DELTA).min(MAX_ZOOM_STEP);
        // Scrolling the other way zooms out by the reciprocal.
        if delta < 0.0 {
            factor = 1.0 / factor;
        }

        for &id in &self.target_axes {
            let Some(scale) = canvas.axis_scale(id) else {
                continue;
            };
            let drawing_pos = match scale.orientation() {
                Orientation::Vertical => position.y,
                Orientation::Horizontal => position.x,
            };
            let anchor = scale.map_drawing_to_data(drawing_pos);
            let new_min = anchor + factor * (scale.min() - anchor);
            let new_max = anchor + factor * (scale.max() - anchor);
            let _ = canvas.set_axis_data_range(id, AxisRange::new(new_min, new_max));
        }
    }
}

impl Tool for WheelZoomTool {
    fn handle_event(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse {
        match event.kind {
            PointerEventKind::Wheel { delta } if delta != 0.0 => {
                self.wheel(canvas, event.position, delta);
                EventResponse::Consumed
            }
            _ => EventResponse::Ignored,
        }
    }
}
