//! The contract between the canvas and anything plotted on it, plus the two
//! built-in item types.

use core::fmt;
use std::any::Any;

use glam::DVec2;

use crate::geometry::Rect;

/// Unique identifier for an item hosted on a [`PlotCanvas`](crate::PlotCanvas).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    /// Mint a new unique id (0, 1, 2, ...).
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Marker shapes for point items.
///
/// The beam variants span the full plot area along one axis; the cursor tool
/// derives them from which axis scales a cursor is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// A crosshair spanning the plot area in both directions.
    Cross,
    /// A full-height line at the marker's x position.
    VerticalBeam,
    /// A full-width line at the marker's y position.
    HorizontalBeam,
    /// A filled circle.
    FilledCircle,
    /// A square.
    Square,
}

/// What the canvas requires from anything plotted on it.
///
/// Items own their geometry in data space; the canvas owns the axis scales
/// their coordinates are interpreted through. When an item's geometry
/// changes, the change must be reported via
/// [`PlotCanvas::notify_bounds_changed`](crate::PlotCanvas::notify_bounds_changed)
/// (or by mutating through
/// [`PlotCanvas::update_item`](crate::PlotCanvas::update_item), which reports
/// it for you) so autoscaling axes can refit.
pub trait PlotItem: Any {
    /// Bounding rectangle of the item's geometry, in data coordinates.
    fn data_bounds(&self) -> Rect;

    /// Whether the selector tool may pick this item.
    fn selectable(&self) -> bool {
        true
    }

    fn set_selected(&mut self, selected: bool);

    fn selected(&self) -> bool;

    /// Hit-test against `region`, given in this item's data coordinates.
    ///
    /// The default implementation intersects the bounding rectangle; items
    /// with sparse shapes (a polyline, say) should override with something
    /// tighter.
    fn hit_test(&self, region: Rect) -> bool {
        region.intersects(&self.data_bounds())
    }
}

/// A zero-size marker at a single data-space value.
///
/// Used directly as a simple annotation, and by the cursor tool as the
/// backing item for each cursor.
#[derive(Debug, Clone, Copy)]
pub struct PointItem {
    value: DVec2,
    marker: MarkerShape,
    selectable: bool,
    selected: bool,
}

impl PointItem {
    pub fn new(value: DVec2) -> Self {
        Self {
            value,
            marker: MarkerShape::FilledCircle,
            selectable: true,
            selected: false,
        }
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn value(&self) -> DVec2 {
        self.value
    }

    pub fn set_value(&mut self, value: DVec2) {
        self.value = value;
    }

    pub fn marker(&self) -> MarkerShape {
        self.marker
    }

    pub fn set_marker(&mut self, marker: MarkerShape) {
        self.marker = marker;
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }
}

impl PlotItem for PointItem {
    fn data_bounds(&self) -> Rect {
        Rect::point(self.value)
    }

    fn selectable(&self) -> bool {
        self.selectable
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn selected(&self) -> bool {
        self.selected
    }
}

/// A data-space rectangle, useful for highlighting a region of interest.
#[derive(Debug, Clone, Copy)]
pub struct RectItem {
    rect: Rect,
    selectable: bool,
    selected: bool,
}

impl RectItem {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            selectable: true,
            selected: false,
        }
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

impl PlotItem for RectItem {
    fn data_bounds(&self) -> Rect {
        self.rect
    }

    fn selectable(&self) -> bool {
        self.selectable
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn selected(&self) -> bool {
        self.selected
    }
}
