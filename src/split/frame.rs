use std::collections::HashMap;

use egui::{Color32, CursorIcon, Id};

use super::geometry::{dp_to_px, resolve_bar_px, Constraints, PxPoint, PxRect, PxSize, SplitGeometry};
use super::interaction::{Event, PointerKind};
use super::state::{Dp, SplitState};

/// Pointer kinds the divider listens for.
pub const BAR_EVENTS: &[PointerKind] = &[PointerKind::Press, PointerKind::Drag, PointerKind::Release];

/// An input region registered for the next frame's hit testing.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub tag: Id,
    /// Absolute bounds, in the root frame's pixels.
    pub rect: PxRect,
    /// Where the owning widget's local origin sits, so hosts can hand out
    /// events in widget coordinates.
    pub origin: PxPoint,
    pub accepts: &'static [PointerKind],
    /// Keep delivering to this region while the pointer is outside it.
    pub grab: bool,
}

impl HitRegion {
    pub fn accepts(&self, kind: PointerKind) -> bool {
        self.accepts.contains(&kind)
    }
}

/// A side effect requested from the host by a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    FillRect { rect: PxRect, color: Color32 },
    HitRegion(HitRegion),
    Cursor { rect: PxRect, icon: CursorIcon },
}

impl Effect {
    fn translate(self, by: PxPoint) -> Self {
        match self {
            Effect::FillRect { rect, color } => Effect::FillRect {
                rect: rect.translate(by),
                color,
            },
            Effect::HitRegion(region) => Effect::HitRegion(HitRegion {
                rect: region.rect.translate(by),
                origin: region.origin.offset(by),
                ..region
            }),
            Effect::Cursor { rect, icon } => Effect::Cursor {
                rect: rect.translate(by),
                icon,
            },
        }
    }
}

/// Events queued by the host for each widget since the last frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    queues: HashMap<Id, Vec<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: Id, event: impl Into<Event>) {
        self.queues.entry(tag).or_default().push(event.into());
    }

    /// Remove and return everything queued for `tag`, oldest first.
    pub fn take(&mut self, tag: Id) -> Vec<Event> {
        self.queues.remove(&tag).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.values().all(Vec::is_empty)
    }
}

/// Context handed to a widget for one layout pass.
///
/// Carries the constraint the widget lays out in, the pixel scale, its queued
/// events and the sink collecting its effects. Children get a derived frame
/// through [`Frame::child`].
pub struct Frame<'a> {
    pub constraints: Constraints,
    /// Physical pixels per [`Dp`].
    pub px_per_dp: f32,
    origin: PxPoint,
    events: &'a mut EventQueue,
    effects: &'a mut Vec<Effect>,
}

impl<'a> Frame<'a> {
    pub fn new(
        constraints: Constraints,
        px_per_dp: f32,
        events: &'a mut EventQueue,
        effects: &'a mut Vec<Effect>,
    ) -> Self {
        Self {
            constraints,
            px_per_dp,
            origin: PxPoint::ZERO,
            events,
            effects,
        }
    }

    pub fn px(&self, dp: Dp) -> i32 {
        dp_to_px(dp, self.px_per_dp)
    }

    /// Absolute position of this frame's local origin.
    pub fn origin(&self) -> PxPoint {
        self.origin
    }

    /// Drain the events queued for `tag`.
    pub fn events(&mut self, tag: Id) -> Vec<Event> {
        self.events.take(tag)
    }

    /// Record an effect given in local coordinates.
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect.translate(self.origin));
    }

    /// A frame for a child laid out at `offset` under `constraints`.
    pub fn child(&mut self, constraints: Constraints, offset: PxPoint) -> Frame<'_> {
        Frame {
            constraints,
            px_per_dp: self.px_per_dp,
            origin: self.origin.offset(offset),
            events: &mut *self.events,
            effects: &mut *self.effects,
        }
    }
}

impl SplitState {
    /// Lay out the split view for this frame.
    ///
    /// Handles queued drag input, registers the divider for hit testing and
    /// paints it, then lays out `left` and `right` beside it. Always reports the
    /// full available extent, whatever the children return.
    pub fn layout<L, R>(&mut self, frame: &mut Frame<'_>, left: L, right: R) -> PxSize
    where
        L: FnOnce(&mut Frame<'_>) -> PxSize,
        R: FnOnce(&mut Frame<'_>) -> PxSize,
    {
        let max = frame.constraints.max;
        let bar_px = resolve_bar_px(self.bar, frame.px_per_dp);
        let geometry = SplitGeometry::compute(self.ratio, bar_px, max.width, max.height);

        let events = frame.events(self.id);
        self.process_events(events, frame.constraints);

        frame.emit(Effect::HitRegion(HitRegion {
            tag: self.id,
            rect: geometry.bar,
            origin: PxPoint::ZERO,
            accepts: BAR_EVENTS,
            grab: self.is_dragging(),
        }));
        frame.emit(Effect::Cursor {
            rect: geometry.bar,
            icon: CursorIcon::ResizeColumn,
        });
        frame.emit(Effect::FillRect {
            rect: geometry.bar,
            color: self.bar_color,
        });

        left(&mut frame.child(Constraints::loose(geometry.left_size()), PxPoint::ZERO));
        right(&mut frame.child(
            Constraints::loose(geometry.right_size()),
            PxPoint::new(geometry.right_offset, 0),
        ));

        max
    }
}
