// Routes raw pointer samples to the widgets whose hit regions they land in.
// Regions come from the previous frame's effects, which is what the widgets
// registered them for.

use std::collections::HashMap;

use egui::{Id, Pos2};
use log::trace;

use crate::split::{Effect, EventQueue, HitRegion, PointerEvent, PointerId, PointerKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer sample straight from the platform, in absolute pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawPointer {
    pub pointer: PointerId,
    pub phase: Phase,
    pub pos: Pos2,
}

impl RawPointer {
    pub fn new(pointer: PointerId, phase: Phase, x: f32, y: f32) -> Self {
        Self {
            pointer,
            phase,
            pos: Pos2::new(x, y),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PointerRouter {
    regions: Vec<HitRegion>,
    /// Pointers that went down on a region, and whose region that was.
    captured: HashMap<PointerId, Id>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known regions with those registered in `effects`.
    pub fn update_regions(&mut self, effects: &[Effect]) {
        self.regions.clear();
        self.regions.extend(effects.iter().filter_map(|e| match e {
            Effect::HitRegion(region) => Some(region.clone()),
            _ => None,
        }));
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    pub fn captured_by(&self, pointer: PointerId) -> Option<Id> {
        self.captured.get(&pointer).copied()
    }

    fn region(&self, tag: Id) -> Option<&HitRegion> {
        self.regions.iter().find(|r| r.tag == tag)
    }

    /// Queue the widget event `raw` turns into, if any.
    pub fn route(&mut self, raw: RawPointer, queue: &mut EventQueue) {
        match raw.phase {
            Phase::Down => {
                if self.captured.contains_key(&raw.pointer) {
                    return;
                }
                // Later registrations are painted on top.
                let hit = self
                    .regions
                    .iter()
                    .rev()
                    .find(|r| r.accepts(PointerKind::Press) && r.rect.contains(raw.pos.x, raw.pos.y));
                if let Some(region) = hit {
                    self.captured.insert(raw.pointer, region.tag);
                    queue.push(region.tag, local(region, raw, PointerKind::Press));
                }
            }
            Phase::Move => {
                let Some(region) = self.captured.get(&raw.pointer).and_then(|tag| self.region(*tag)) else {
                    return;
                };
                if !region.accepts(PointerKind::Drag) {
                    return;
                }
                if region.grab || region.rect.contains(raw.pos.x, raw.pos.y) {
                    queue.push(region.tag, local(region, raw, PointerKind::Drag));
                } else {
                    trace!("pointer {:?} left region {:?} without grab", raw.pointer, region.tag);
                }
            }
            Phase::Up => {
                let Some(tag) = self.captured.remove(&raw.pointer) else {
                    return;
                };
                if let Some(region) = self.region(tag).filter(|r| r.accepts(PointerKind::Release)) {
                    queue.push(tag, local(region, raw, PointerKind::Release));
                }
            }
            Phase::Cancel => {
                let Some(tag) = self.captured.remove(&raw.pointer) else {
                    return;
                };
                if let Some(region) = self.region(tag) {
                    queue.push(tag, local(region, raw, PointerKind::Cancel));
                }
            }
        }
    }
}

fn local(region: &HitRegion, raw: RawPointer, kind: PointerKind) -> PointerEvent {
    PointerEvent::new(
        raw.pointer,
        kind,
        raw.pos.x - region.origin.x as f32,
        raw.pos.y - region.origin.y as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{Event, PxPoint, PxRect, BAR_EVENTS};

    const MOUSE: PointerId = PointerId::MOUSE;

    fn router_with(grab: bool, origin: PxPoint) -> (PointerRouter, Id) {
        let tag = Id::new("bar");
        let mut router = PointerRouter::new();
        router.update_regions(&[
            Effect::Cursor {
                rect: PxRect::new(0, 0, 1, 1),
                icon: egui::CursorIcon::Default,
            },
            Effect::HitRegion(HitRegion {
                tag,
                rect: PxRect::new(100, 0, 110, 50),
                origin,
                accepts: BAR_EVENTS,
                grab,
            }),
        ]);
        (router, tag)
    }

    fn kinds(events: &[Event]) -> Vec<PointerKind> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Pointer(p) => Some(p.kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn only_hit_regions_are_kept() {
        let (router, tag) = router_with(false, PxPoint::ZERO);
        assert_eq!(router.regions().len(), 1);
        assert_eq!(router.regions()[0].tag, tag);
    }

    #[test]
    fn press_outside_region_is_not_delivered() {
        let (mut router, tag) = router_with(false, PxPoint::ZERO);
        let mut queue = EventQueue::new();
        router.route(RawPointer::new(MOUSE, Phase::Down, 50.0, 10.0), &mut queue);
        assert!(queue.take(tag).is_empty());
        assert_eq!(router.captured_by(MOUSE), None);
    }

    #[test]
    fn press_drag_release_inside_region() {
        let (mut router, tag) = router_with(false, PxPoint::new(20, 0));
        let mut queue = EventQueue::new();
        router.route(RawPointer::new(MOUSE, Phase::Down, 105.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Move, 107.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Up, 107.0, 10.0), &mut queue);

        let events = queue.take(tag);
        assert_eq!(
            kinds(&events),
            vec![PointerKind::Press, PointerKind::Drag, PointerKind::Release]
        );
        // Positions are local to the widget's origin.
        assert_eq!(events[0], Event::Pointer(PointerEvent::new(MOUSE, PointerKind::Press, 85.0, 10.0)));
        assert_eq!(router.captured_by(MOUSE), None);
    }

    #[test]
    fn moves_outside_need_grab() {
        let (mut router, tag) = router_with(false, PxPoint::ZERO);
        let mut queue = EventQueue::new();
        router.route(RawPointer::new(MOUSE, Phase::Down, 105.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Move, 300.0, 10.0), &mut queue);
        assert_eq!(kinds(&queue.take(tag)), vec![PointerKind::Press]);

        let (mut router, tag) = router_with(true, PxPoint::ZERO);
        router.route(RawPointer::new(MOUSE, Phase::Down, 105.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Move, 300.0, 10.0), &mut queue);
        assert_eq!(kinds(&queue.take(tag)), vec![PointerKind::Press, PointerKind::Drag]);
    }

    #[test]
    fn uncaptured_moves_and_releases_are_dropped() {
        let (mut router, tag) = router_with(true, PxPoint::ZERO);
        let mut queue = EventQueue::new();
        router.route(RawPointer::new(MOUSE, Phase::Move, 105.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Up, 105.0, 10.0), &mut queue);
        router.route(RawPointer::new(MOUSE, Phase::Cancel, 105.0, 10.0), &mut queue);
        assert!(queue.take(tag).is_empty());
    }

    #[test]
    fn cancel_ends_capture() {
        let (mut router, tag) = router_with(true, PxPoint::ZERO);
        let mut queue = EventQueue::new();
        let touch = PointerId(7);
        router.route(RawPointer::new(touch, Phase::Down, 101.0, 1.0), &mut queue);
        router.route(RawPointer::new(touch, Phase::Cancel, 101.0, 1.0), &mut queue);
        router.route(RawPointer::new(touch, Phase::Move, 102.0, 1.0), &mut queue);

        assert_eq!(kinds(&queue.take(tag)), vec![PointerKind::Press, PointerKind::Cancel]);
        assert_eq!(router.captured_by(touch), None);
    }
}
