//! Deferred autoscale recomputation.
//!
//! Bounds changes are cheap to report and expensive to react to, so reactions
//! are batched: every trigger just marks a recompute pending, and the host
//! runs the single pending recompute once before the next redraw. Headless
//! callers use [`PlotCanvas::autoscale_now`](crate::PlotCanvas::autoscale_now)
//! instead.

use indexmap::IndexMap;

use crate::axis_scale::{AxisScale, Orientation};
use crate::canvas::{AxisScaleId, ItemEntry};
use crate::geometry::Rect;
use crate::item::ItemId;

/// Collapses any number of bounds-change notifications into one range
/// recompute per scheduling cycle.
#[derive(Debug, Default)]
pub(crate) struct AutoscaleCoordinator {
    pending: bool,
}

impl AutoscaleCoordinator {
    /// Request a deferred recompute. Idempotent: scheduling while one is
    /// already pending changes nothing.
    pub(crate) fn schedule(&mut self) {
        self.pending = true;
    }

    pub(crate) fn pending(&self) -> bool {
        self.pending
    }

    /// Refit every autoscaling axis scale to the union of the data bounds of
    /// the items targeting it, and clear the pending flag.
    ///
    /// A scale with no targeting items (or only items with non-finite bounds)
    /// keeps its current range. Ranges are applied through the
    /// autoscale-reserved path, which leaves the autoscale flag alone.
    pub(crate) fn run(&mut self, scales: &mut [AxisScale], items: &IndexMap<ItemId, ItemEntry>) {
        self.pending = false;

        for (index, scale) in scales.iter_mut().enumerate() {
            if !scale.auto_scale_enabled() {
                continue;
            }

            let mut union = Rect::NOTHING;
            let mut any = false;
            for entry in items.values() {
                let target = match scale.orientation() {
                    Orientation::Horizontal => entry.x_axis,
                    Orientation::Vertical => entry.y_axis,
                };
                if target != AxisScaleId(index) {
                    continue;
                }
                let bounds = entry.item.data_bounds();
                if !bounds.is_finite() {
                    continue;
                }
                union = union.union(&bounds);
                any = true;
            }
            if !any {
                continue;
            }

            let range = match scale.orientation() {
                Orientation::Horizontal => union.x_range(),
                Orientation::Vertical => union.y_range(),
            };
            scale.apply_autoscale_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::geometry::AxisRange;
    use crate::item::RectItem;

    fn entry(rect: Rect, x_axis: usize, y_axis: usize) -> ItemEntry {
        ItemEntry {
            item: Box::new(RectItem::new(rect)),
            x_axis: AxisScaleId(x_axis),
            y_axis: AxisScaleId(y_axis),
        }
    }

    #[test]
    fn refits_to_union_of_targeting_items() {
        let mut coordinator = AutoscaleCoordinator::default();
        let mut scales = vec![AxisScale::new(Orientation::Horizontal)];
        scales[0].set_auto_scale_enabled(true);

        let mut items = IndexMap::new();
        items.insert(
            ItemId::new(),
            entry(
                Rect::new(DVec2::new(0.0, 1.0), DVec2::new(5.0, 2.0)),
                0,
                1,
            ),
        );
        items.insert(
            ItemId::new(),
            entry(
                Rect::new(DVec2::new(3.0, 0.0), DVec2::new(10.0, 4.0)),
                0,
                1,
            ),
        );

        coordinator.schedule();
        coordinator.run(&mut scales, &items);
        assert!(!coordinator.pending());
        assert_eq!(scales[0].data_range(), AxisRange::new(0.0, 10.0));
        assert!(scales[0].auto_scale_enabled());
    }

    #[test]
    fn untargeted_scale_keeps_its_range() {
        let mut coordinator = AutoscaleCoordinator::default();
        let mut scales = vec![AxisScale::new(Orientation::Vertical)];
        scales[0].apply_autoscale_range(AxisRange::new(-2.0, 2.0));
        scales[0].set_auto_scale_enabled(true);

        let items = IndexMap::new();
        coordinator.run(&mut scales, &items);
        assert_eq!(scales[0].data_range(), AxisRange::new(-2.0, 2.0));
    }

    #[test]
    fn non_finite_bounds_are_ignored() {
        let mut coordinator = AutoscaleCoordinator::default();
        let mut scales = vec![AxisScale::new(Orientation::Horizontal)];
        scales[0].apply_autoscale_range(AxisRange::new(0.0, 1.0));
        scales[0].set_auto_scale_enabled(true);

        let mut items = IndexMap::new();
        items.insert(ItemId::new(), entry(Rect::NOTHING, 0, 0));
        coordinator.run(&mut scales, &items);
        assert_eq!(scales[0].data_range(), AxisRange::new(0.0, 1.0));
    }
}
