//! Rubber-band drag zoom with a recall stack.

use glam::DVec2;

use crate::axis_scale::Orientation;
use crate::canvas::{AxisScaleId, PlotCanvas, StandardAxis};
use crate::event::{EventResponse, PointerButton, PointerEvent, PointerEventKind};
use crate::geometry::{AxisRange, Rect};
use crate::tool::Tool;

/// Pointer travel (manhattan distance, drawing units) a pressed pointer must
/// cover before the press counts as a drag rather than a click.
const DRAG_DEADZONE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Left button is down but the pointer has not yet left the deadzone.
    Armed { press: DVec2 },
    Dragging { press: DVec2, current: DVec2 },
}

/// Prior ranges of the target axis scales, captured as a unit when a drag
/// zoom commits.
type ZoomEntry = Vec<(AxisScaleId, AxisRange)>;

/// Zoom into a dragged-out rectangle; zoom back out through the history.
///
/// A left drag past the deadzone shows a rubber-band rectangle
/// ([`DragZoomTool::selection_rect`]) and, on release, zooms every target
/// axis scale to the dragged extent, pushing the previous ranges onto a
/// stack. A right-button release recalls the most recent entry; with an
/// empty stack it re-enables autoscaling instead.
pub struct DragZoomTool {
    state: DragState,
    target_axes: Vec<AxisScaleId>,
    zoom_stack: Vec<ZoomEntry>,
}

impl Default for DragZoomTool {
    fn default() -> Self {
        Self::new()
    }
}

impl DragZoomTool {
    /// A drag zoomer over the default Left, Bottom and Right axis scales.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            target_axes: vec![
                StandardAxis::Left.into(),
                StandardAxis::Bottom.into(),
                StandardAxis::Right.into(),
            ],
            zoom_stack: Vec::new(),
        }
    }

    pub fn target_axes(&self) -> &[AxisScaleId] {
        &self.target_axes
    }

    pub fn set_target_axes(&mut self, axes: Vec<AxisScaleId>) {
        self.target_axes = axes;
    }

    /// The rubber-band rectangle while a drag is in progress, in plot-area
    /// drawing coordinates, for the host to draw.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.state {
            DragState::Dragging { press, current } => Some(Rect::new(press, current)),
            _ => None,
        }
    }

    /// Number of zoom entries available for recall.
    pub fn zoom_stack_depth(&self) -> usize {
        self.zoom_stack.len()
    }

    fn moved(&mut self, canvas: &mut PlotCanvas, position: DVec2) {
        match self.state {
            DragState::Armed { press } => {
                let travel = (press - position).abs();
                if travel.x + travel.y > DRAG_DEADZONE {
                    // A real drag: the user is taking over manual control, so
                    // stop the ranges from jumping underneath them.
                    for &id in &self.target_axes {
                        let _ = canvas.set_auto_scale_enabled(id, false);
                    }
                    self.state = DragState::Dragging {
                        press,
                        current: position,
                    };
                }
            }
            DragState::Dragging { press, .. } => {
                self.state = DragState::Dragging {
                    press,
                    current: position,
                };
            }
            DragState::Idle => {}
        }
    }

    fn commit(&mut self, canvas: &mut PlotCanvas, press: DVec2, release: DVec2) {
        let mut entry: ZoomEntry = Vec::with_capacity(self.target_axes.len());
        for &id in &self.target_axes {
            let Some(scale) = canvas.axis_scale(id) else {
                continue;
            };
            entry.push((id, scale.data_range()));

            let drawing = match scale.orientation() {
                Orientation::Vertical => AxisRange::new(press.y, release.y),
                Orientation::Horizontal => AxisRange::new(press.x, release.x),
            };
            let new_range = scale.map_drawing_to_data_range(drawing);
            let _ = canvas.set_axis_data_range(id, new_range);
        }
        self.zoom_stack.push(entry);
    }

    fn recall(&mut self, canvas: &mut PlotCanvas) {
        if let Some(entry) = self.zoom_stack.pop() {
            for (id, range) in entry {
                // An axis scale dropped from the target set since the push is
                // no longer ours to modify.
                if !self.target_axes.contains(&id) {
                    continue;
                }
                let _ = canvas.set_axis_data_range(id, range);
            }
        } else {
            // Nothing left to recall: fall back to automatic fitting.
            for &id in &self.target_axes {
                let _ = canvas.set_auto_scale_enabled(id, true);
            }
        }
    }
}

impl Tool for DragZoomTool {
    fn handle_event(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse {
        match event.kind {
            PointerEventKind::Press(PointerButton::Left) => {
                if self.state == DragState::Idle {
                    self.state = DragState::Armed {
                        press: event.position,
                    };
                }
                EventResponse::Consumed
            }
            PointerEventKind::Move => {
                let active = self.state != DragState::Idle;
                self.moved(canvas, event.position);
                if active {
                    EventResponse::Consumed
                } else {
                    EventResponse::Ignored
                }
            }
            PointerEventKind::Release(PointerButton::Left) => match self.state {
                DragState::Dragging { press, .. } => {
                    self.state = DragState::Idle;
                    self.commit(canvas, press, event.position);
                    EventResponse::Consumed
                }
                DragState::Armed { .. } => {
                    self.state = DragState::Idle;
                    EventResponse::Consumed
                }
                DragState::Idle => EventResponse::Ignored,
            },
            PointerEventKind::Release(PointerButton::Right) => {
                if matches!(self.state, DragState::Dragging { .. }) {
                    // A right release mid-drag neither commits nor recalls.
                    EventResponse::Ignored
                } else {
                    self.recall(canvas);
                    EventResponse::Consumed
                }
            }
            _ => EventResponse::Ignored,
        }
    }
}
