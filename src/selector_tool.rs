//! Click selection of plot items, with disambiguation between stacked items.

use glam::DVec2;

use crate::canvas::PlotCanvas;
use crate::event::{EventResponse, PointerEvent, PointerEventKind};
use crate::geometry::Rect;
use crate::item::ItemId;
use crate::message::PlotEvent;
use crate::tool::Tool;

/// Half-width of the pick region around a click, in drawing units. A click
/// counts as "on" an item if the item's shape intersects this region.
const DEFAULT_SELECTION_TOLERANCE: f64 = 10.0;

/// Selects an item on the plot by clicking near it.
///
/// When several selectable items overlap under the pointer, successive clicks
/// at the same spot cycle through them one at a time: the candidate set is
/// collected in item order and a rotating index picks which candidate wins
/// this click.
pub struct SelectorTool {
    selected_item: Option<ItemId>,
    rotation_index: usize,
    tolerance: f64,
}

impl Default for SelectorTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorTool {
    pub fn new() -> Self {
        Self {
            selected_item: None,
            rotation_index: 0,
            tolerance: DEFAULT_SELECTION_TOLERANCE,
        }
    }

    /// The currently selected item, if any.
    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected_item
    }

    /// Set the pick-region half-width in drawing units.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.abs();
    }

    fn press(&mut self, canvas: &mut PlotCanvas, position: DVec2) {
        let region = Rect::new(
            position - DVec2::splat(self.tolerance),
            position + DVec2::splat(self.tolerance),
        );

        // Every selectable item whose shape the click region touches, in
        // item order.
        let mut candidates: Vec<ItemId> = Vec::new();
        for id in canvas.item_ids() {
            let Some(item_region) = canvas.drawing_region_to_item_data(id, region) else {
                continue;
            };
            let Some(item) = canvas.item(id) else {
                continue;
            };
            if item.selectable() && item.hit_test(item_region) {
                candidates.push(id);
            }
        }

        let picked = if candidates.is_empty() {
            None
        } else {
            let choice = candidates[self.rotation_index % candidates.len()];
            self.rotation_index = self.rotation_index.wrapping_add(1);
            Some(choice)
        };

        match picked {
            Some(new) if Some(new) != self.selected_item => {
                if let Some(old) = self.selected_item.take() {
                    let _ = canvas.set_item_selected(old, false);
                }
                let _ = canvas.set_item_selected(new, true);
                self.selected_item = Some(new);
                canvas.push_event(PlotEvent::ItemSelected(new));
            }
            Some(_) => {}
            None => {
                // Clicked empty space: clear any existing selection.
                if let Some(old) = self.selected_item.take() {
                    let _ = canvas.set_item_selected(old, false);
                    canvas.push_event(PlotEvent::Deselected);
                }
            }
        }
    }
}

impl Tool for SelectorTool {
    fn handle_event(&mut self, canvas: &mut PlotCanvas, event: &PointerEvent) -> EventResponse {
        if let PointerEventKind::Press(_) = event.kind {
            self.press(canvas, event.position);
        }
        // The press always propagates so tools below still see it.
        EventResponse::Ignored
    }
}
