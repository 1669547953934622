//! A headless interactive 2D charting surface.
//!
//! - Per-axis data <-> drawing transforms with autoscaling, normalization,
//!   waterfall stacking, and log display
//! - Deferred (batched) autoscale recomputation, run once per host redraw
//! - Pointer tools: item selection with stacked-item disambiguation, wheel
//!   zoom anchored at the pointer, rubber-band drag zoom with a recall
//!   stack, and multi-cursor placement/readout
//!
//! Rendering is up to the host: items expose data-space bounds and the axis
//! scales expose the transforms to paint them with.
//!
//! Quick start:
//!
//! ```
//! use plot_surface::{
//!     DVec2, PlotCanvas, PointerEvent, RectItem, Rect, SelectorTool, ToolStack, WheelZoomTool,
//! };
//!
//! let mut canvas = PlotCanvas::default();
//! canvas.add_item(RectItem::new(Rect::new(
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(5.0, 2.0),
//! )));
//!
//! let mut tools = ToolStack::new();
//! tools.push(&mut canvas, SelectorTool::new());
//! tools.push(&mut canvas, WheelZoomTool::new());
//!
//! // Host event loop: route pointer input, then settle before painting.
//! tools.dispatch(&mut canvas, &PointerEvent::wheel(DVec2::new(50.0, 50.0), 120.0));
//! canvas.run_pending_autoscale();
//! for event in canvas.take_events() {
//!     println!("{event:?}");
//! }
//! ```
pub mod axis_scale;
pub mod canvas;
pub mod cursor_tool;
pub mod drag_zoom_tool;
pub mod event;
pub mod geometry;
pub mod item;
pub mod message;
pub mod selector_tool;
pub mod tool;
pub mod wheel_zoom_tool;

pub(crate) mod autoscale;

// Geometry re-export.
pub use glam::DVec2;

// Re-exports of public types.
pub use axis_scale::{AxisScale, Orientation};
pub use canvas::{AxisScaleId, PlotCanvas, PlotError, StandardAxis};
pub use cursor_tool::CursorTool;
pub use drag_zoom_tool::DragZoomTool;
pub use event::{EventResponse, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{AxisRange, Rect};
pub use item::{ItemId, MarkerShape, PlotItem, PointItem, RectItem};
pub use message::PlotEvent;
pub use selector_tool::SelectorTool;
pub use tool::{Tool, ToolStack};
pub use wheel_zoom_tool::WheelZoomTool;
