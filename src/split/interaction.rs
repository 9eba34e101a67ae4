use egui::Pos2;
use log::{debug, trace};

use super::geometry::Constraints;
use super::state::{DragState, SplitState};

/// Identity of an input pointer (mouse, touch contact, pen).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: Self = Self(0);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Press,
    Drag,
    Release,
    Cancel,
}

/// A pointer sample in the widget's local pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub kind: PointerKind,
    pub pos: Pos2,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            pointer,
            kind,
            pos: Pos2::new(x, y),
        }
    }
}

/// Anything the host may deliver to a widget during a frame. Hosts may
/// forward keyboard and focus events too; the split view ignores them.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Pointer(PointerEvent),
    Key(egui::Key),
    Focus(bool),
}

impl From<PointerEvent> for Event {
    fn from(ev: PointerEvent) -> Self {
        Event::Pointer(ev)
    }
}

impl SplitState {
    /// Run this frame's events, in delivery order, through the drag state
    /// machine. `bounds` is the widget's current constraint; drag samples
    /// outside its horizontal extent are dropped.
    pub fn process_events<I>(&mut self, events: I, bounds: Constraints)
    where
        I: IntoIterator<Item = Event>,
    {
        for ev in events {
            if let Event::Pointer(ev) = ev {
                self.process_pointer(ev, bounds);
            }
        }
    }

    fn process_pointer(&mut self, ev: PointerEvent, bounds: Constraints) {
        match (ev.kind, self.drag) {
            (PointerKind::Press, DragState::Idle) => {
                debug!("split {:?}: drag started by {:?} at x={}", self.id, ev.pointer, ev.pos.x);
                self.drag = DragState::Dragging {
                    pointer: ev.pointer,
                    last_x: ev.pos.x,
                };
            }
            (PointerKind::Press, DragState::Dragging { .. }) => {}

            (PointerKind::Drag, DragState::Dragging { pointer, last_x }) if pointer == ev.pointer => {
                let width = bounds.max.width;
                if width <= 0 || !bounds.contains_x(ev.pos.x) {
                    trace!("split {:?}: dropped drag sample at x={}", self.id, ev.pos.x);
                    return;
                }
                let delta = ev.pos.x - last_x;
                self.ratio += delta * 2.0 / width as f32;
                self.drag = DragState::Dragging {
                    pointer,
                    last_x: ev.pos.x,
                };
            }
            (PointerKind::Drag, _) => {}

            (PointerKind::Release, DragState::Dragging { pointer, .. }) if pointer == ev.pointer => {
                debug!("split {:?}: drag released, ratio={}", self.id, self.ratio);
                self.drag = DragState::Idle;
            }
            (PointerKind::Release, _) => {}

            // A cancel means the host took the pointers away, whoever owned the drag.
            (PointerKind::Cancel, DragState::Dragging { .. }) => {
                debug!("split {:?}: drag cancelled, ratio={}", self.id, self.ratio);
                self.drag = DragState::Idle;
            }
            (PointerKind::Cancel, DragState::Idle) => {}
        }
    }
}
