//! Placement and readout of any number of plot cursors.

use glam::DVec2;
use log::warn;

use crate::canvas::{AxisScaleId, PlotCanvas, StandardAxis};
use crate::event::{EventResponse, PointerButton, PointerEvent, PointerEventKind};
use crate::item::{ItemId, MarkerShape, PointItem};
use crate::message::PlotEvent;
use crate::tool::Tool;

#[derive(Debug, Clone, Copy)]
struct CursorHandle {
    item: ItemId,
    x_axis: Option<AxisScaleId>,
    y_axis: Option<AxisScaleId>,
    position: DVec2,
}

/// Places one or more cursors on the plot and reads their locations.
///
/// Each cursor is backed by an unselectable [`PointItem`] the tool adds to
/// (and removes from) the canvas. A left click moves the active cursor to
/// the clicked location and advances the rotation, so successive clicks
/// place each cursor in turn — the same rotation idea the selector tool uses
/// for stacked items.
pub struct CursorTool {
    cursors: Vec<CursorHandle>,
    active_index: usize,
    attached: bool,
}

impl Default for CursorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorTool {
    pub fn new() -> Self {
        Self {
            cursors: Vec::new(),
            active_index: 0,
            attached: false,
        }
    }

    pub fn num_cursors(&self) -> usize {
        self.cursors.len()
    }

    /// Data-space position of cursor `index`. Out-of-range indices read as
    /// the zero point.
    pub fn value(&self, index: usize) -> DVec2 {
        self.cursors
            .get(index)
            .map(|cursor| cursor.position)
            .unwrap_or(DVec2::ZERO)
    }

    /// The backing canvas item of cursor `index`, for adjusting its marker
    /// or repositioning it manually.
    pub fn cursor_item(&self, index: usize) -> Option<ItemId> {
        self.cursors.get(index).map(|cursor| cursor.item)
    }

    /// Add a cursor bound to the given axis scales and place it at
    /// `initial`.
    ///
    /// The marker follows the bindings: x-only is a vertical beam, y-only a
    /// horizontal beam, anything else a crosshair. A coordinate with no
    /// bound axis is never remapped by clicks and its readout keeps whatever
    /// value it was given.
    ///
    /// The tool must already be installed on a tool stack; until then this
    /// reports the misuse and does nothing.
    pub fn add_cursor(
        &mut self,
        canvas: &mut PlotCanvas,
        x_axis: Option<AxisScaleId>,
        y_axis: Option<AxisScaleId>,
        initial: DVec2,
    ) -> Option<ItemId> {
        if !self.attached {
            warn!("CursorTool: cursors cannot be added until the tool is installed on a stack");
            return None;
        }

        let marker = match (x_axis, y_axis) {
            (Some(_), None) => MarkerShape::VerticalBeam,
            (None, Some(_)) => MarkerShape::HorizontalBeam,
            _ => MarkerShape::Cross,
        };

        let id = canvas.add_item(
            PointItem::new(initial)
                .with_marker(marker)
                .with_selectable(false),
        );
        let _ = canvas.set_item_axis_targets(
            id,
            x_axis.unwrap_or(StandardAxis::Bottom.into()),
            y_axis.unwrap_or(StandardAxis::Left.into()),
        );

        self.cursors.push(CursorHandle {
            item: id,
            x_axis,
            y_axis,
            position: initial,
        });
        Some(id)
    }

    /// Remove the most recently added cursor and detach its item from the
    /// canvas.
    pub fn remove_cursor(&mut self, canvas: &mut PlotCanvas) {
        if let Some(handle) = self.cursors.pop() {
            let _ = canvas.remove_item(handle.item);
        }
    }

    fn press(&mut self, canvas: &mut PlotCanvas, position: DVec2) {
        if self.cursors.is_empty() {
            return;
        }
        let index = self.active_index % self.cursors.len();
        let handle = &mut self.cursors[index];

        // Map the pointer per this cursor's own bindings; an unbound
        // coordinate keeps its current value.
        let mut value = handle.position;
        if let Some(axis) = handle.x_axis
            && let Some(scale) = canvas.axis_scale(axis)
        {
            value.x = scale.map_drawing_to_data(position.x);
        }
        if let Some(axis) = handle.y_axis
            && let Some(scale) = canvas.axis_scale(axis)
        {
            value.y = scale.map_drawing_to_data(position.y);
        }
        handle.position = value;
        let item = handle.item;

        if let Some(point) = canvas.item_as_mut::<PointItem>(item) {
            point.set_value(value);
            canvas.notify_bounds_changed(item);
        }
        canvas.push_event(PlotEvent::CursorMoved {
            cursor: index,
            position: value,
        });

        self.active_index = self.active_index.wrapping_add(1);
    }
}

impl Tool for CursorTool {
    fn on_attached(&mut self, _canvas: &mut PlotCanvas) {
        self.attached = true;
    }

    fn on_detached(&mut self, canvas: &mut PlotCanvas) {
        self.attached = false;
        while !self.cursors.is_empty() {
            self.remove_cursor(canvas);
        }
    }

    fn handle_event(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse {
        if let PointerEventKind::Press(PointerButton::Left) = event.kind {
            self.press(canvas, event.position);
        }
        // Placement never swallows the press; tools below still see it.
        EventResponse::Ignored
    }
}
