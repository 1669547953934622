//! The chart container: axis scales, plotted items, layout, and the deferred
//! autoscale state.

use core::fmt;

use glam::DVec2;
use indexmap::IndexMap;
use log::warn;

use crate::autoscale::AutoscaleCoordinator;
use crate::axis_scale::{AxisScale, Orientation};
use crate::geometry::{AxisRange, Rect};
use crate::item::{ItemId, PlotItem};
use crate::message::PlotEvent;

/// Margin around the plot area, in percent of the canvas rect.
const DEFAULT_MARGIN_PERCENT: f64 = 10.0;

/// Handle to an axis scale owned by a [`PlotCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisScaleId(pub(crate) usize);

/// The axis scales every canvas starts with, usable wherever an
/// [`AxisScaleId`] is expected.
///
/// The `Relative` pair is fixed to the range [0, 1] and never autoscaled;
/// it is convenient for annotations positioned as a fraction of the plot
/// area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardAxis {
    Left = 0,
    Bottom = 1,
    Right = 2,
    Top = 3,
    VerticalRelative = 4,
    HorizontalRelative = 5,
}

impl From<StandardAxis> for AxisScaleId {
    fn from(axis: StandardAxis) -> Self {
        AxisScaleId(axis as usize)
    }
}

/// Errors from canvas operations handed a stale handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotError {
    ItemNotFound(ItemId),
    AxisScaleNotFound(AxisScaleId),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "no such item on this canvas: {id}"),
            Self::AxisScaleNotFound(id) => {
                write!(f, "no such axis scale on this canvas: index {}", id.0)
            }
        }
    }
}

impl std::error::Error for PlotError {}

pub(crate) struct ItemEntry {
    pub(crate) item: Box<dyn PlotItem>,
    pub(crate) x_axis: AxisScaleId,
    pub(crate) y_axis: AxisScaleId,
}

/// The charting surface container.
///
/// Exclusively owns the axis scales and the plotted items; tools and hosts
/// refer to both by id. All range- and flag-mutation goes through canvas
/// methods so that every transition the autoscale coordinator cares about is
/// observed.
pub struct PlotCanvas {
    rect: Rect,
    /// Left, bottom, right, top, in percent of the canvas rect.
    margins: [f64; 4],
    plot_area: Rect,
    axis_scales: Vec<AxisScale>,
    pub(crate) items: IndexMap<ItemId, ItemEntry>,
    autoscale: AutoscaleCoordinator,
    tearing_down: bool,
    events: Vec<PlotEvent>,
}

impl Default for PlotCanvas {
    fn default() -> Self {
        Self::new(Rect::new(DVec2::ZERO, DVec2::new(100.0, 100.0)))
    }
}

impl PlotCanvas {
    /// Create a canvas filling `rect` (scene coordinates, y down), with the
    /// six standard axis scales and default margins.
    pub fn new(rect: Rect) -> Self {
        let mut relative_vertical = AxisScale::new(Orientation::Vertical);
        relative_vertical.set_data_range(AxisRange::new(0.0, 1.0));
        let mut relative_horizontal = AxisScale::new(Orientation::Horizontal);
        relative_horizontal.set_data_range(AxisRange::new(0.0, 1.0));

        let axis_scales = vec![
            AxisScale::new(Orientation::Vertical),   // Left
            AxisScale::new(Orientation::Horizontal), // Bottom
            AxisScale::new(Orientation::Vertical),   // Right
            AxisScale::new(Orientation::Horizontal), // Top
            relative_vertical,
            relative_horizontal,
        ];

        let mut canvas = Self {
            rect,
            margins: [DEFAULT_MARGIN_PERCENT; 4],
            plot_area: rect,
            axis_scales,
            items: IndexMap::new(),
            autoscale: AutoscaleCoordinator::default(),
            tearing_down: false,
            events: Vec::new(),
        };
        canvas.set_rect(rect);
        canvas
    }

    // ---- Layout ----

    /// The rectangle filled by this canvas, in scene coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The margin-inset rectangle items are drawn in, in scene coordinates.
    pub fn plot_area(&self) -> Rect {
        self.plot_area
    }

    /// Resize the canvas. Recomputes the plot area from the margins and
    /// pushes the new drawing lengths into every axis scale.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.update_layout();
    }

    pub fn margin(&self, side: StandardAxis) -> f64 {
        margin_index(side).map_or(0.0, |i| self.margins[i])
    }

    /// Set one margin in percent of the canvas rect. Only the four outer
    /// sides (`Left`, `Bottom`, `Right`, `Top`) carry margins.
    pub fn set_margin(&mut self, side: StandardAxis, percent: f64) {
        let Some(index) = margin_index(side) else {
            warn!("PlotCanvas: {side:?} does not name a margin side");
            return;
        };
        self.margins[index] = percent.max(0.0);
        self.update_layout();
    }

    fn update_layout(&mut self) {
        let left = self.rect.width() * self.margins[0] / 100.0;
        let bottom = self.rect.height() * self.margins[1] / 100.0;
        let right = self.rect.width() * self.margins[2] / 100.0;
        let top = self.rect.height() * self.margins[3] / 100.0;

        // Scene y grows downward, so the top margin insets `min` and the
        // bottom margin insets `max`.
        let min = self.rect.min + DVec2::new(left, top);
        let max = self.rect.max - DVec2::new(right, bottom);
        self.plot_area = Rect::new(min, max.max(min));

        for scale in &mut self.axis_scales {
            let length = match scale.orientation() {
                Orientation::Horizontal => self.plot_area.width(),
                Orientation::Vertical => self.plot_area.height(),
            };
            scale.set_drawing_length(length);
        }
    }

    /// Translate a scene position into plot-area drawing coordinates.
    pub fn scene_to_drawing(&self, scene: DVec2) -> DVec2 {
        scene - self.plot_area.min
    }

    // ---- Axis scales ----

    pub fn num_axis_scales(&self) -> usize {
        self.axis_scales.len()
    }

    pub fn axis_scale(&self, id: AxisScaleId) -> Option<&AxisScale> {
        self.axis_scales.get(id.0)
    }

    /// Add a user axis scale. Its drawing length is immediately set from the
    /// current layout.
    pub fn add_axis_scale(&mut self, mut scale: AxisScale) -> AxisScaleId {
        let length = match scale.orientation() {
            Orientation::Horizontal => self.plot_area.width(),
            Orientation::Vertical => self.plot_area.height(),
        };
        scale.set_drawing_length(length);
        self.axis_scales.push(scale);
        AxisScaleId(self.axis_scales.len() - 1)
    }

    /// Set an axis scale's data range directly (the manual path: autoscaling
    /// for that scale is disabled as a side effect).
    pub fn set_axis_data_range(
        &mut self,
        id: AxisScaleId,
        range: AxisRange,
    ) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        scale.set_data_range(range);
        Ok(())
    }

    /// As [`PlotCanvas::set_axis_data_range`], but animated over subsequent
    /// [`PlotCanvas::advance_animations`] calls.
    pub fn set_axis_data_range_animated(
        &mut self,
        id: AxisScaleId,
        range: AxisRange,
    ) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        scale.set_data_range_animated(range);
        Ok(())
    }

    /// Toggle autoscaling for one axis scale. Enabling schedules a deferred
    /// recompute so the new fit is in place before the next redraw.
    pub fn set_auto_scale_enabled(
        &mut self,
        id: AxisScaleId,
        enabled: bool,
    ) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        let changed = scale.set_auto_scale_enabled(enabled);
        if changed && enabled {
            self.autoscale.schedule();
        }
        Ok(())
    }

    /// Enable or disable normalization on one axis scale. See
    /// [`AxisScale::set_normalization`] and
    /// [`PlotCanvas::normalized_item_value`].
    pub fn enable_axis_normalization(
        &mut self,
        id: AxisScaleId,
        enabled: bool,
        range: AxisRange,
    ) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        scale.set_normalization(enabled, range);
        Ok(())
    }

    /// Set the waterfall stagger for one axis scale. A typical amount is 0.2
    /// data units per item; 0 disables the effect.
    pub fn set_axis_waterfall(&mut self, id: AxisScaleId, amount: f64) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        scale.set_waterfall_amount(amount);
        Ok(())
    }

    pub fn set_axis_log_scale(&mut self, id: AxisScaleId, enabled: bool) -> Result<(), PlotError> {
        let scale = self
            .axis_scales
            .get_mut(id.0)
            .ok_or(PlotError::AxisScaleNotFound(id))?;
        scale.set_log_scale_enabled(enabled);
        Ok(())
    }

    /// Advance every in-flight range animation. Returns whether any axis was
    /// still animating.
    pub fn advance_animations(&mut self, amount: f64) -> bool {
        let mut any = false;
        for scale in &mut self.axis_scales {
            any |= scale.advance_animation(amount);
        }
        any
    }

    // ---- Items ----

    /// Append an item, targeted to the default Bottom/Left axis pair.
    pub fn add_item(&mut self, item: impl PlotItem) -> ItemId {
        self.add_item_targeted(item, StandardAxis::Bottom.into(), StandardAxis::Left.into())
    }

    /// Append an item targeted to the given axis scales.
    pub fn add_item_targeted(
        &mut self,
        item: impl PlotItem,
        x_axis: AxisScaleId,
        y_axis: AxisScaleId,
    ) -> ItemId {
        let id = ItemId::new();
        self.items.insert(
            id,
            ItemEntry {
                item: Box::new(item),
                x_axis,
                y_axis,
            },
        );
        self.autoscale.schedule();
        id
    }

    /// Insert an item at `index` in the item order (clamped to the current
    /// count), targeted to the default axis pair.
    pub fn insert_item(&mut self, index: usize, item: impl PlotItem) -> ItemId {
        let id = ItemId::new();
        let index = index.min(self.items.len());
        self.items.shift_insert(
            index,
            id,
            ItemEntry {
                item: Box::new(item),
                x_axis: StandardAxis::Bottom.into(),
                y_axis: StandardAxis::Left.into(),
            },
        );
        self.autoscale.schedule();
        id
    }

    /// Remove an item, returning it to the caller. Triggers a deferred
    /// autoscale unless the canvas is tearing down.
    pub fn remove_item(&mut self, id: ItemId) -> Result<Box<dyn PlotItem>, PlotError> {
        let entry = self
            .items
            .shift_remove(&id)
            .ok_or(PlotError::ItemNotFound(id))?;
        if !self.tearing_down {
            self.autoscale.schedule();
        }
        Ok(entry.item)
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Item ids in insertion order.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }

    /// The id of the item at `index` in the item order.
    pub fn item_id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get_index(index).map(|(id, _)| *id)
    }

    pub fn item(&self, id: ItemId) -> Option<&dyn PlotItem> {
        self.items.get(&id).map(|entry| entry.item.as_ref())
    }

    /// Downcast an item to its concrete type.
    pub fn item_as<T: PlotItem>(&self, id: ItemId) -> Option<&T> {
        let any: &dyn std::any::Any = self.items.get(&id)?.item.as_ref();
        any.downcast_ref::<T>()
    }

    /// Downcast an item to its concrete type, mutably. Report geometry
    /// changes made this way with [`PlotCanvas::notify_bounds_changed`], or
    /// prefer [`PlotCanvas::update_item`].
    pub fn item_as_mut<T: PlotItem>(&mut self, id: ItemId) -> Option<&mut T> {
        let any: &mut dyn std::any::Any = self.items.get_mut(&id)?.item.as_mut();
        any.downcast_mut::<T>()
    }

    /// Mutate an item and report the (possible) geometry change in one step.
    pub fn update_item(
        &mut self,
        id: ItemId,
        f: impl FnOnce(&mut dyn PlotItem),
    ) -> Result<(), PlotError> {
        let entry = self.items.get_mut(&id).ok_or(PlotError::ItemNotFound(id))?;
        f(entry.item.as_mut());
        self.notify_bounds_changed(id);
        Ok(())
    }

    /// The axis pair an item's coordinates are interpreted through.
    pub fn item_targets(&self, id: ItemId) -> Option<(AxisScaleId, AxisScaleId)> {
        self.items.get(&id).map(|entry| (entry.x_axis, entry.y_axis))
    }

    /// Retarget an item to a different axis pair. `x_axis` must name a
    /// horizontal scale and `y_axis` a vertical one; a mismatched component
    /// is reported and left unchanged. Retargeting schedules a deferred
    /// autoscale, since both the old and new scales' fits may be stale.
    pub fn set_item_axis_targets(
        &mut self,
        id: ItemId,
        x_axis: AxisScaleId,
        y_axis: AxisScaleId,
    ) -> Result<(), PlotError> {
        let Some(entry) = self.items.get_mut(&id) else {
            return Err(PlotError::ItemNotFound(id));
        };
        let x_ok = match self.axis_scales.get(x_axis.0) {
            Some(scale) if scale.orientation() == Orientation::Horizontal => true,
            Some(_) => {
                warn!("PlotCanvas: x-axis target {x_axis:?} is not horizontal; keeping previous");
                false
            }
            None => return Err(PlotError::AxisScaleNotFound(x_axis)),
        };
        let y_ok = match self.axis_scales.get(y_axis.0) {
            Some(scale) if scale.orientation() == Orientation::Vertical => true,
            Some(_) => {
                warn!("PlotCanvas: y-axis target {y_axis:?} is not vertical; keeping previous");
                false
            }
            None => return Err(PlotError::AxisScaleNotFound(y_axis)),
        };

        if x_ok {
            entry.x_axis = x_axis;
        }
        if y_ok {
            entry.y_axis = y_axis;
        }
        self.autoscale.schedule();
        Ok(())
    }

    /// Report that an item's geometry changed. Schedules a deferred autoscale
    /// iff one of the item's target scales is autoscaling.
    pub fn notify_bounds_changed(&mut self, id: ItemId) {
        let Some(entry) = self.items.get(&id) else {
            return;
        };
        let affected = [entry.x_axis, entry.y_axis]
            .into_iter()
            .filter_map(|axis| self.axis_scales.get(axis.0))
            .any(|scale| scale.auto_scale_enabled());
        if affected {
            self.autoscale.schedule();
        }
    }

    /// Set an item's selected flag, emitting
    /// [`PlotEvent::SelectionChanged`] on an actual change.
    pub fn set_item_selected(&mut self, id: ItemId, selected: bool) -> Result<(), PlotError> {
        let entry = self.items.get_mut(&id).ok_or(PlotError::ItemNotFound(id))?;
        if entry.item.selected() != selected {
            entry.item.set_selected(selected);
            self.events.push(PlotEvent::SelectionChanged { item: id, selected });
        }
        Ok(())
    }

    // ---- Paint-time transforms ----

    /// The additive paint-time shift for an item: on each axis it targets,
    /// the scale's waterfall amount times the item's position among the items
    /// targeting that scale (insertion order). Zero when no waterfall is
    /// configured.
    pub fn waterfall_offset(&self, id: ItemId) -> DVec2 {
        let Some(entry) = self.items.get(&id) else {
            return DVec2::ZERO;
        };
        DVec2::new(
            self.waterfall_component(id, entry.x_axis),
            self.waterfall_component(id, entry.y_axis),
        )
    }

    fn waterfall_component(&self, id: ItemId, axis: AxisScaleId) -> f64 {
        let Some(scale) = self.axis_scales.get(axis.0) else {
            return 0.0;
        };
        let amount = scale.waterfall_amount();
        if amount == 0.0 {
            return 0.0;
        }
        let mut position = 0usize;
        for (item_id, entry) in &self.items {
            let target = match scale.orientation() {
                Orientation::Horizontal => entry.x_axis,
                Orientation::Vertical => entry.y_axis,
            };
            if target != axis {
                continue;
            }
            if *item_id == id {
                return amount * position as f64;
            }
            position += 1;
        }
        0.0
    }

    /// Paint-time normalization: rescale `value` from `item`'s own extent
    /// along `axis` into the scale's normalization range, so items of
    /// differing magnitude draw comparably. Identity when normalization is
    /// off or the item's extent is degenerate. The stored data is untouched.
    pub fn normalized_item_value(&self, axis: AxisScaleId, item: ItemId, value: f64) -> f64 {
        let Some(scale) = self.axis_scales.get(axis.0) else {
            return value;
        };
        if !scale.normalization_enabled() {
            return value;
        }
        let Some(entry) = self.items.get(&item) else {
            return value;
        };
        let bounds = entry.item.data_bounds();
        let extent = match scale.orientation() {
            Orientation::Horizontal => bounds.x_range(),
            Orientation::Vertical => bounds.y_range(),
        };
        if !extent.min().is_finite() || !extent.max().is_finite() || extent.span() <= 0.0 {
            return value;
        }
        let fraction = (value - extent.min()) / extent.span();
        let target = scale.normalization_range();
        target.min() + fraction * target.span()
    }

    /// Map a drawing-space region into `item`'s data coordinates through its
    /// target scales, compensating for the item's waterfall shift. This is
    /// the region the item's own hit-test runs against.
    pub fn drawing_region_to_item_data(&self, id: ItemId, region: Rect) -> Option<Rect> {
        let entry = self.items.get(&id)?;
        let x_scale = self.axis_scales.get(entry.x_axis.0)?;
        let y_scale = self.axis_scales.get(entry.y_axis.0)?;
        let x = x_scale.map_drawing_to_data_range(region.x_range());
        let y = y_scale.map_drawing_to_data_range(region.y_range());
        Some(Rect::from_ranges(x, y).translate(-self.waterfall_offset(id)))
    }

    // ---- Deferred autoscale ----

    pub fn autoscale_pending(&self) -> bool {
        self.autoscale.pending()
    }

    /// Run the deferred autoscale recompute if one is pending. The host
    /// should call this once per redraw, before painting. Returns whether a
    /// recompute ran.
    pub fn run_pending_autoscale(&mut self) -> bool {
        if !self.autoscale.pending() {
            return false;
        }
        self.autoscale.run(&mut self.axis_scales, &self.items);
        true
    }

    /// Recompute autoscaled ranges immediately, pending or not. For callers
    /// operating outside a redraw cycle (offscreen rendering, tests).
    pub fn autoscale_now(&mut self) {
        self.autoscale.run(&mut self.axis_scales, &self.items);
    }

    /// Flag that this canvas is being torn down: item removal stops
    /// triggering autoscale recomputes, which is pure waste when everything
    /// is going away.
    pub fn begin_teardown(&mut self) {
        self.tearing_down = true;
    }

    pub fn is_tearing_down(&self) -> bool {
        self.tearing_down
    }

    // ---- Events ----

    pub(crate) fn push_event(&mut self, event: PlotEvent) {
        self.events.push(event);
    }

    /// Drain the interaction events accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<PlotEvent> {
        std::mem::take(&mut self.events)
    }
}

fn margin_index(side: StandardAxis) -> Option<usize> {
    match side {
        StandardAxis::Left => Some(0),
        StandardAxis::Bottom => Some(1),
        StandardAxis::Right => Some(2),
        StandardAxis::Top => Some(3),
        StandardAxis::VerticalRelative | StandardAxis::HorizontalRelative => None,
    }
}
