//! Interactive tool plumbing: the [`Tool`] trait and the priority-ordered
//! [`ToolStack`] that routes pointer events.

use crate::canvas::PlotCanvas;
use crate::event::{EventResponse, PointerEvent, PointerEventKind};

/// An interactive tool driven by pointer events.
///
/// Tools never own canvas state: they hold axis-scale and item ids and
/// receive `&mut PlotCanvas` with every call. A tool signals with
/// [`EventResponse::Consumed`] that tools below it in the stack must not see
/// the event.
pub trait Tool: std::any::Any {
    /// Called when the tool is installed on a stack.
    fn on_attached(&mut self, canvas: &mut PlotCanvas) {
        let _ = canvas;
    }

    /// Called when the tool is removed from a stack. Tools that created
    /// canvas-owned resources release them here.
    fn on_detached(&mut self, canvas: &mut PlotCanvas) {
        let _ = canvas;
    }

    /// Handle one pointer event. `event.position` is in plot-area drawing
    /// coordinates.
    fn handle_event(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse;
}

/// The tools installed on a canvas, in priority order.
///
/// Dispatch visits the most recently installed tool first and stops at the
/// first consumer, so a tool stacked on top can shadow the ones below per
/// event.
#[derive(Default)]
pub struct ToolStack {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `tool` on top of the stack, returning its slot index.
    pub fn push(&mut self, canvas: &mut PlotCanvas, mut tool: impl Tool) -> usize {
        tool.on_attached(canvas);
        self.tools.push(Box::new(tool));
        self.tools.len() - 1
    }

    /// Remove and return the tool at `index`, after its
    /// [`Tool::on_detached`] hook has run.
    pub fn remove(&mut self, canvas: &mut PlotCanvas, index: usize) -> Option<Box<dyn Tool>> {
        if index >= self.tools.len() {
            return None;
        }
        let mut tool = self.tools.remove(index);
        tool.on_detached(canvas);
        Some(tool)
    }

    /// Detach and drop every installed tool, top-most first.
    pub fn clear(&mut self, canvas: &mut PlotCanvas) {
        while let Some(mut tool) = self.tools.pop() {
            tool.on_detached(canvas);
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Access the tool at `index` as its concrete type.
    pub fn tool_mut<T: Tool>(&mut self, index: usize) -> Option<&mut T> {
        let any: &mut dyn std::any::Any = self.tools.get_mut(index)?.as_mut();
        any.downcast_mut::<T>()
    }

    /// Route one pointer event (scene coordinates) through the stack.
    ///
    /// Presses, double-clicks and wheel input landing outside the plot area
    /// are dropped; moves and releases are always delivered so a drag that
    /// leaves the area can still finish.
    pub fn dispatch(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse {
        match event.kind {
            PointerEventKind::Press(_)
            | PointerEventKind::DoubleClick(_)
            | PointerEventKind::Wheel { .. }
                if !canvas.plot_area().contains(event.position) =>
            {
                return EventResponse::Ignored;
            }
            _ => {}
        }

        let local = event.with_position(canvas.scene_to_drawing(event.position));
        for tool in self.tools.iter_mut().rev() {
            if tool.handle_event(canvas, &local).is_consumed() {
                return EventResponse::Consumed;
            }
        }
        EventResponse::Ignored
    }
}
