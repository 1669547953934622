use glam::DVec2;

use crate::item::ItemId;

/// Notifications emitted by the canvas and its tools in response to user
/// interaction, drained by the host with
/// [`PlotCanvas::take_events`](crate::PlotCanvas::take_events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotEvent {
    /// The selector tool picked an item.
    ItemSelected(ItemId),
    /// The selector click landed on nothing and the previous selection was
    /// cleared.
    Deselected,
    /// An item's selected flag changed state.
    SelectionChanged { item: ItemId, selected: bool },
    /// A cursor was placed at a new data-space position.
    CursorMoved { cursor: usize, position: DVec2 },
}
