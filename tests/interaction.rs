//! Interaction scenarios routed through the tool stack, the way a host
//! event loop drives the surface.
//!
//! The canvas under test is the 100x100 default with 10% margins: the plot
//! area spans (10,10)..(90,90), every axis scale has drawing length 80, and
//! all scales start at the data range [0, 10].

use plot_surface::{
    AxisRange, CursorTool, DVec2, DragZoomTool, MarkerShape, PlotCanvas, PlotEvent, PlotItem,
    PointItem, PointerButton, PointerEvent, Rect, RectItem, SelectorTool, StandardAxis, ToolStack,
    WheelZoomTool,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pos(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
    Rect::new(pos(x0, y0), pos(x1, y1))
}

fn range_of(canvas: &PlotCanvas, axis: StandardAxis) -> AxisRange {
    canvas.axis_scale(axis.into()).unwrap().data_range()
}

fn autoscaling(canvas: &PlotCanvas, axis: StandardAxis) -> bool {
    canvas.axis_scale(axis.into()).unwrap().auto_scale_enabled()
}

// ---- Wheel zoom ----

#[test]
fn wheel_zoom_scales_about_the_pointer() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, WheelZoomTool::new());

    // Scene (50, 50) is the plot-area center: data (5, 5) on both axes.
    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(50.0, 50.0), 120.0));

    for axis in [StandardAxis::Bottom, StandardAxis::Left, StandardAxis::Right] {
        let range = range_of(&canvas, axis);
        // One detent at increment 0.25 shrinks the span to 75%.
        assert!(approx(range.span(), 7.5), "{axis:?}: {range:?}");
        // The anchor keeps its fractional position in the range.
        assert!(approx((5.0 - range.min()) / range.span(), 0.5));
        assert!(approx(range.min(), 1.25));
        assert!(approx(range.max(), 8.75));
    }
}

#[test]
fn wheel_zoom_out_uses_the_reciprocal_factor() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, WheelZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(50.0, 50.0), 120.0));
    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(50.0, 50.0), -120.0));

    // Zooming in then out about the same anchor is the identity.
    let range = range_of(&canvas, StandardAxis::Bottom);
    assert!(approx(range.min(), 0.0) && approx(range.max(), 10.0));
}

#[test]
fn wheel_zoom_does_not_reenable_autoscale() {
    let mut canvas = PlotCanvas::default();
    canvas
        .set_auto_scale_enabled(StandardAxis::Bottom.into(), true)
        .unwrap();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, WheelZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(50.0, 50.0), 120.0));
    assert!(!autoscaling(&canvas, StandardAxis::Bottom));
}

#[test]
fn consumed_wheel_never_reaches_lower_tools() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, WheelZoomTool::new());
    tools.push(&mut canvas, WheelZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(50.0, 50.0), 120.0));

    // Had both tools zoomed, the span would be 10 * 0.75^2.
    assert!(approx(range_of(&canvas, StandardAxis::Bottom).span(), 7.5));
}

#[test]
fn wheel_outside_the_plot_area_is_dropped() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, WheelZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::wheel(pos(2.0, 2.0), 120.0));
    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
}

// ---- Selector ----

fn selected_events(canvas: &mut PlotCanvas) -> Vec<PlotEvent> {
    canvas
        .take_events()
        .into_iter()
        .filter(|event| matches!(event, PlotEvent::ItemSelected(_) | PlotEvent::Deselected))
        .collect()
}

#[test]
fn repeated_clicks_cycle_through_stacked_items() {
    let mut canvas = PlotCanvas::default();
    let a = canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));
    let b = canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));
    let c = canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    let selector = tools.push(&mut canvas, SelectorTool::new());

    // All three rectangles sit under scene (50, 50); four clicks without
    // moving wrap around to the first again.
    for _ in 0..4 {
        tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));
        tools.dispatch(&mut canvas, &PointerEvent::release(pos(50.0, 50.0), PointerButton::Left));
    }

    assert_eq!(
        selected_events(&mut canvas),
        vec![
            PlotEvent::ItemSelected(a),
            PlotEvent::ItemSelected(b),
            PlotEvent::ItemSelected(c),
            PlotEvent::ItemSelected(a),
        ]
    );
    assert_eq!(
        tools.tool_mut::<SelectorTool>(selector).unwrap().selected_item(),
        Some(a)
    );
    assert!(canvas.item(a).unwrap().selected());
    assert!(!canvas.item(b).unwrap().selected());
    assert!(!canvas.item(c).unwrap().selected());
}

#[test]
fn clicking_empty_space_deselects() {
    let mut canvas = PlotCanvas::default();
    let a = canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    let selector = tools.push(&mut canvas, SelectorTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));
    assert_eq!(selected_events(&mut canvas), vec![PlotEvent::ItemSelected(a)]);

    // Inside the plot area, but nowhere near the rectangle.
    tools.dispatch(&mut canvas, &PointerEvent::press(pos(15.0, 15.0), PointerButton::Left));
    assert_eq!(selected_events(&mut canvas), vec![PlotEvent::Deselected]);
    assert!(tools.tool_mut::<SelectorTool>(selector).unwrap().selected_item().is_none());
    assert!(!canvas.item(a).unwrap().selected());
}

#[test]
fn unselectable_items_are_never_candidates() {
    let mut canvas = PlotCanvas::default();
    canvas.add_item(PointItem::new(pos(5.0, 5.0)).with_selectable(false));
    let b = canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    tools.push(&mut canvas, SelectorTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));
    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));

    // Both clicks land on the only selectable item; no rotation onto the
    // unselectable point.
    assert_eq!(selected_events(&mut canvas), vec![PlotEvent::ItemSelected(b)]);
}

#[test]
fn press_outside_the_plot_area_changes_nothing() {
    let mut canvas = PlotCanvas::default();
    canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    tools.push(&mut canvas, SelectorTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(5.0, 5.0), PointerButton::Left));
    assert!(canvas.take_events().is_empty());
}

// ---- Drag zoom ----

fn drag(tools: &mut ToolStack, canvas: &mut PlotCanvas, from: DVec2, to: DVec2) {
    tools.dispatch(canvas, &PointerEvent::press(from, PointerButton::Left));
    tools.dispatch(canvas, &PointerEvent::moved(to));
    tools.dispatch(canvas, &PointerEvent::release(to, PointerButton::Left));
}

fn recall(tools: &mut ToolStack, canvas: &mut PlotCanvas) {
    tools.dispatch(canvas, &PointerEvent::release(pos(50.0, 50.0), PointerButton::Right));
}

#[test]
fn drag_zoom_commits_the_dragged_extent() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let zoomer = tools.push(&mut canvas, DragZoomTool::new());

    // Scene (30,70) -> (70,30) covers data [2.5, 7.5] on both axes (the
    // vertical axis sees the endpoints inverted and re-normalized).
    drag(&mut tools, &mut canvas, pos(30.0, 70.0), pos(70.0, 30.0));

    for axis in [StandardAxis::Bottom, StandardAxis::Left] {
        let range = range_of(&canvas, axis);
        assert!(approx(range.min(), 2.5), "{axis:?}: {range:?}");
        assert!(approx(range.max(), 7.5));
    }
    assert_eq!(
        tools.tool_mut::<DragZoomTool>(zoomer).unwrap().zoom_stack_depth(),
        1
    );
}

#[test]
fn recall_restores_the_exact_prior_ranges() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let zoomer = tools.push(&mut canvas, DragZoomTool::new());

    let before: Vec<_> = [StandardAxis::Left, StandardAxis::Bottom, StandardAxis::Right]
        .into_iter()
        .map(|axis| range_of(&canvas, axis))
        .collect();

    drag(&mut tools, &mut canvas, pos(30.0, 70.0), pos(70.0, 30.0));
    recall(&mut tools, &mut canvas);

    let after: Vec<_> = [StandardAxis::Left, StandardAxis::Bottom, StandardAxis::Right]
        .into_iter()
        .map(|axis| range_of(&canvas, axis))
        .collect();
    assert_eq!(before, after);
    assert_eq!(
        tools.tool_mut::<DragZoomTool>(zoomer).unwrap().zoom_stack_depth(),
        0
    );
}

#[test]
fn recall_on_an_empty_stack_reenables_autoscale() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    tools.push(&mut canvas, DragZoomTool::new());

    recall(&mut tools, &mut canvas);

    for axis in [StandardAxis::Left, StandardAxis::Bottom, StandardAxis::Right] {
        assert!(autoscaling(&canvas, axis), "{axis:?}");
    }
    // And the recompute is queued for the next redraw.
    assert!(canvas.autoscale_pending());
}

#[test]
fn recall_skips_axes_no_longer_targeted() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let zoomer = tools.push(&mut canvas, DragZoomTool::new());

    drag(&mut tools, &mut canvas, pos(30.0, 70.0), pos(70.0, 30.0));
    let zoomed_left = range_of(&canvas, StandardAxis::Left);

    tools
        .tool_mut::<DragZoomTool>(zoomer)
        .unwrap()
        .set_target_axes(vec![StandardAxis::Bottom.into()]);
    recall(&mut tools, &mut canvas);

    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
    // Left was dropped from the target set after the push: never forced back.
    assert_eq!(range_of(&canvas, StandardAxis::Left), zoomed_left);
}

#[test]
fn movement_inside_the_deadzone_is_a_click_not_a_drag() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let zoomer = tools.push(&mut canvas, DragZoomTool::new());

    drag(&mut tools, &mut canvas, pos(30.0, 70.0), pos(31.0, 71.0));

    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
    assert_eq!(
        tools.tool_mut::<DragZoomTool>(zoomer).unwrap().zoom_stack_depth(),
        0
    );
}

#[test]
fn crossing_the_deadzone_disables_autoscale_and_shows_the_rubber_band() {
    let mut canvas = PlotCanvas::default();
    canvas
        .set_auto_scale_enabled(StandardAxis::Bottom.into(), true)
        .unwrap();
    canvas.run_pending_autoscale();

    let mut tools = ToolStack::new();
    let zoomer = tools.push(&mut canvas, DragZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(30.0, 70.0), PointerButton::Left));
    assert!(tools.tool_mut::<DragZoomTool>(zoomer).unwrap().selection_rect().is_none());

    tools.dispatch(&mut canvas, &PointerEvent::moved(pos(45.0, 55.0)));
    let band = tools
        .tool_mut::<DragZoomTool>(zoomer)
        .unwrap()
        .selection_rect()
        .expect("rubber band tracks the drag");
    assert_eq!(band, rect(20.0, 45.0, 35.0, 60.0));
    assert!(!autoscaling(&canvas, StandardAxis::Bottom));

    tools.dispatch(&mut canvas, &PointerEvent::release(pos(45.0, 55.0), PointerButton::Left));
    assert!(tools.tool_mut::<DragZoomTool>(zoomer).unwrap().selection_rect().is_none());
}

#[test]
fn drag_zoom_on_top_shadows_the_selector_press() {
    let mut canvas = PlotCanvas::default();
    canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    let selector = tools.push(&mut canvas, SelectorTool::new());
    tools.push(&mut canvas, DragZoomTool::new());

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));
    tools.dispatch(&mut canvas, &PointerEvent::release(pos(50.0, 50.0), PointerButton::Left));

    assert!(selected_events(&mut canvas).is_empty());
    assert!(tools.tool_mut::<SelectorTool>(selector).unwrap().selected_item().is_none());
}

// ---- Cursor tool ----

#[test]
fn cursors_require_an_attached_tool() {
    let mut canvas = PlotCanvas::default();
    let mut tool = CursorTool::new();

    // Not yet installed: reported and ignored.
    assert!(tool.add_cursor(&mut canvas, None, None, pos(1.0, 1.0)).is_none());
    assert_eq!(canvas.num_items(), 0);

    let mut tools = ToolStack::new();
    let cursors = tools.push(&mut canvas, tool);
    let added = tools
        .tool_mut::<CursorTool>(cursors)
        .unwrap()
        .add_cursor(&mut canvas, None, None, pos(1.0, 1.0));
    assert!(added.is_some());
    assert_eq!(canvas.num_items(), 1);
}

#[test]
fn horizontal_beam_cursor_reads_only_its_bound_axis() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let cursors = tools.push(&mut canvas, CursorTool::new());

    let id = tools
        .tool_mut::<CursorTool>(cursors)
        .unwrap()
        .add_cursor(&mut canvas, None, Some(StandardAxis::Left.into()), pos(0.0, 5.0))
        .unwrap();

    let point = canvas.item_as::<PointItem>(id).unwrap();
    assert_eq!(point.marker(), MarkerShape::HorizontalBeam);
    assert!(!point.selectable());
    assert_eq!(tools.tool_mut::<CursorTool>(cursors).unwrap().value(0), pos(0.0, 5.0));

    // Scene y=70 is drawing y=60, i.e. data 2.5 on the inverted left axis.
    // The unbound x coordinate never moves.
    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 70.0), PointerButton::Left));

    let value = tools.tool_mut::<CursorTool>(cursors).unwrap().value(0);
    assert!(approx(value.x, 0.0));
    assert!(approx(value.y, 2.5));
    assert!(canvas.take_events().contains(&PlotEvent::CursorMoved {
        cursor: 0,
        position: value,
    }));
}

#[test]
fn cursor_markers_follow_the_axis_bindings() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let cursors = tools.push(&mut canvas, CursorTool::new());

    let bottom = Some(StandardAxis::Bottom.into());
    let left = Some(StandardAxis::Left.into());
    let cases = [
        (bottom, left, MarkerShape::Cross),
        (bottom, None, MarkerShape::VerticalBeam),
        (None, left, MarkerShape::HorizontalBeam),
        (None, None, MarkerShape::Cross),
    ];
    for (x_axis, y_axis, expected) in cases {
        let id = tools
            .tool_mut::<CursorTool>(cursors)
            .unwrap()
            .add_cursor(&mut canvas, x_axis, y_axis, DVec2::ZERO)
            .unwrap();
        assert_eq!(canvas.item_as::<PointItem>(id).unwrap().marker(), expected);
    }
}

#[test]
fn presses_rotate_through_the_cursors() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let cursors = tools.push(&mut canvas, CursorTool::new());

    let bottom = Some(StandardAxis::Bottom.into());
    let left = Some(StandardAxis::Left.into());
    for _ in 0..2 {
        tools
            .tool_mut::<CursorTool>(cursors)
            .unwrap()
            .add_cursor(&mut canvas, bottom, left, DVec2::ZERO)
            .unwrap();
    }

    tools.dispatch(&mut canvas, &PointerEvent::press(pos(30.0, 50.0), PointerButton::Left));
    tools.dispatch(&mut canvas, &PointerEvent::press(pos(70.0, 50.0), PointerButton::Left));
    tools.dispatch(&mut canvas, &PointerEvent::press(pos(50.0, 50.0), PointerButton::Left));

    let moved: Vec<_> = canvas
        .take_events()
        .into_iter()
        .filter_map(|event| match event {
            PlotEvent::CursorMoved { cursor, .. } => Some(cursor),
            _ => None,
        })
        .collect();
    assert_eq!(moved, vec![0, 1, 0]);

    let tool = tools.tool_mut::<CursorTool>(cursors).unwrap();
    assert!(approx(tool.value(0).x, 5.0)); // re-placed by the third press
    assert!(approx(tool.value(1).x, 7.5));
}

#[test]
fn cursors_are_removed_lifo_and_on_detach() {
    let mut canvas = PlotCanvas::default();
    let mut tools = ToolStack::new();
    let cursors = tools.push(&mut canvas, CursorTool::new());

    let (first, second) = {
        let tool = tools.tool_mut::<CursorTool>(cursors).unwrap();
        let first = tool.add_cursor(&mut canvas, None, None, pos(1.0, 1.0)).unwrap();
        let second = tool.add_cursor(&mut canvas, None, None, pos(2.0, 2.0)).unwrap();
        (first, second)
    };

    tools.tool_mut::<CursorTool>(cursors).unwrap().remove_cursor(&mut canvas);
    assert!(canvas.item(second).is_none());
    assert!(canvas.item(first).is_some());

    // Detaching the tool releases the rest.
    tools.remove(&mut canvas, cursors);
    assert_eq!(canvas.num_items(), 0);
}

#[test]
fn out_of_range_cursor_queries_read_as_zero() {
    let tool = CursorTool::new();
    assert_eq!(tool.value(7), DVec2::ZERO);
    assert!(tool.cursor_item(7).is_none());
}

// ---- Host settle cycle ----

#[test]
fn forced_autoscale_runs_without_a_redraw_cycle() {
    let mut canvas = PlotCanvas::default();
    canvas.add_item(RectItem::new(rect(0.0, 1.0, 5.0, 2.0)));
    canvas.add_item(RectItem::new(rect(3.0, 0.0, 10.0, 4.0)));
    canvas
        .set_auto_scale_enabled(StandardAxis::Bottom.into(), true)
        .unwrap();
    canvas
        .set_auto_scale_enabled(StandardAxis::Left.into(), true)
        .unwrap();

    canvas.autoscale_now();

    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
    assert_eq!(range_of(&canvas, StandardAxis::Left), AxisRange::new(0.0, 4.0));
}

#[test]
fn animated_range_changes_settle_over_host_ticks() {
    let mut canvas = PlotCanvas::default();
    canvas
        .set_axis_data_range_animated(StandardAxis::Bottom.into(), AxisRange::new(2.0, 4.0))
        .unwrap();

    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
    while canvas.advance_animations(0.25) {}
    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(2.0, 4.0));
}

#[test]
fn double_clicks_pass_through_every_shipped_tool() {
    let mut canvas = PlotCanvas::default();
    canvas.add_item(RectItem::new(rect(4.0, 4.0, 6.0, 6.0)));

    let mut tools = ToolStack::new();
    tools.push(&mut canvas, SelectorTool::new());
    tools.push(&mut canvas, WheelZoomTool::new());
    tools.push(&mut canvas, DragZoomTool::new());
    tools.push(&mut canvas, CursorTool::new());

    let response = tools.dispatch(
        &mut canvas,
        &PointerEvent::double_click(pos(50.0, 50.0), PointerButton::Left),
    );
    assert!(!response.is_consumed());
    assert!(canvas.take_events().is_empty());
    assert_eq!(range_of(&canvas, StandardAxis::Bottom), AxisRange::new(0.0, 10.0));
}
