//! The pointer event model delivered by the host event system.

use glam::DVec2;

/// Pointer buttons the tools distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// What happened, independent of where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    Press(PointerButton),
    Move,
    Release(PointerButton),
    DoubleClick(PointerButton),
    /// Scroll input. `delta` is in eighth-of-a-degree wheel units; one detent
    /// on most mice is 120. Positive deltas zoom in.
    Wheel { delta: f64 },
}

/// A pointer event with its position.
///
/// Hosts construct events in scene coordinates; the tool stack translates the
/// position into plot-area drawing coordinates before tools see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: DVec2,
    pub kind: PointerEventKind,
}

impl PointerEvent {
    pub fn press(position: DVec2, button: PointerButton) -> Self {
        Self {
            position,
            kind: PointerEventKind::Press(button),
        }
    }

    pub fn moved(position: DVec2) -> Self {
        Self {
            position,
            kind: PointerEventKind::Move,
        }
    }

    pub fn release(position: DVec2, button: PointerButton) -> Self {
        Self {
            position,
            kind: PointerEventKind::Release(button),
        }
    }

    pub fn double_click(position: DVec2, button: PointerButton) -> Self {
        Self {
            position,
            kind: PointerEventKind::DoubleClick(button),
        }
    }

    pub fn wheel(position: DVec2, delta: f64) -> Self {
        Self {
            position,
            kind: PointerEventKind::Wheel { delta },
        }
    }

    /// The same event at a different position.
    pub(crate) fn with_position(&self, position: DVec2) -> Self {
        Self {
            position,
            kind: self.kind,
        }
    }
}

/// Whether a tool consumed an event or let it pass to the tools below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Consumed,
    Ignored,
}

impl EventResponse {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
