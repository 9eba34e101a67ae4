// Runs a SplitState inside an egui Ui.
//
// egui input is turned into raw pointer samples, routed against the divider
// region from the previous frame, and the effects of the layout pass are
// applied with egui's painter and cursor API.

use egui::{Event, Layout, PointerButton, Pos2, Rect, Response, Rounding, Sense, TouchPhase, Ui, UiBuilder, Vec2};
use log::trace;

use crate::router::{Phase, PointerRouter, RawPointer};
use crate::split::{Constraints, Effect, EventQueue, Frame, PointerId, PxPoint, PxRect, PxSize, SplitState};

/// Shows a [`SplitState`] filling the remaining space of a `Ui`.
pub struct SplitView<'s> {
    state: &'s mut SplitState,
}

impl<'s> SplitView<'s> {
    pub fn new(state: &'s mut SplitState) -> Self {
        Self { state }
    }

    /// Lay out both panes. Each callback gets a child `Ui` covering its pane.
    pub fn show(self, ui: &mut Ui, left: impl FnOnce(&mut Ui), right: impl FnOnce(&mut Ui)) -> Response {
        let area = ui.available_rect_before_wrap();
        let ppp = ui.ctx().pixels_per_point();
        let to_px = |pos: Pos2| ((pos - area.min) * ppp).to_pos2();

        let router_id = self.state.id().with("router");
        let mut router: PointerRouter = ui.data_mut(|d| d.get_temp(router_id).unwrap_or_default());

        let mut queue = EventQueue::new();
        for raw in ui.input(|i| raw_pointers(&i.events, to_px)) {
            router.route(raw, &mut queue);
        }

        let size = PxSize::new((area.width() * ppp).round() as i32, (area.height() * ppp).round() as i32);
        let mut effects = Vec::new();
        let mut panes = [(PxPoint::ZERO, PxSize::ZERO); 2];
        {
            let mut frame = Frame::new(Constraints::loose(size), ppp, &mut queue, &mut effects);
            let [left_pane, right_pane] = &mut panes;
            self.state.layout(
                &mut frame,
                |f| {
                    *left_pane = (f.origin(), f.constraints.max);
                    f.constraints.max
                },
                |f| {
                    *right_pane = (f.origin(), f.constraints.max);
                    f.constraints.max
                },
            );
        }

        router.update_regions(&effects);
        ui.data_mut(|d| d.insert_temp(router_id, router));

        let to_points = |r: PxRect| {
            Rect::from_min_max(
                area.min + Vec2::new(r.min_x as f32, r.min_y as f32) / ppp,
                area.min + Vec2::new(r.max_x as f32, r.max_y as f32) / ppp,
            )
        };
        let dragging = self.state.is_dragging();
        for effect in &effects {
            match effect {
                Effect::FillRect { rect, color } => {
                    ui.painter().rect_filled(to_points(*rect), Rounding::ZERO, *color);
                }
                Effect::Cursor { rect, icon } => {
                    let hovered = ui
                        .ctx()
                        .pointer_hover_pos()
                        .is_some_and(|p| to_points(*rect).contains(p));
                    if hovered || dragging {
                        ui.ctx().set_cursor_icon(*icon);
                    }
                }
                Effect::HitRegion(_) => {}
            }
        }

        // Negative extents are empty panes.
        let [left_rect, right_rect] = panes.map(|(origin, max)| {
            to_points(PxRect::new(
                origin.x,
                origin.y,
                origin.x.saturating_add(max.width.max(0)),
                origin.y.saturating_add(max.height.max(0)),
            ))
        });
        left(&mut pane_ui(ui, left_rect));
        right(&mut pane_ui(ui, right_rect));

        if dragging {
            trace!("split {:?}: ratio {}", self.state.id(), self.state.ratio);
        }

        ui.allocate_rect(area, Sense::hover())
    }
}

fn pane_ui(ui: &mut Ui, rect: Rect) -> Ui {
    let mut child = ui.new_child(UiBuilder::new().max_rect(rect).layout(Layout::default()));
    child.set_clip_rect(rect.intersect(ui.clip_rect()));
    child
}

/// Mouse is pointer 0, touch contacts are offset by one.
fn touch_pointer(id: egui::TouchId) -> PointerId {
    PointerId(id.0.wrapping_add(1))
}

fn raw_pointers(events: &[Event], to_px: impl Fn(Pos2) -> Pos2) -> Vec<RawPointer> {
    let mut out = Vec::new();
    let mouse = |phase, pos: Pos2| RawPointer {
        pointer: PointerId::MOUSE,
        phase,
        pos,
    };

    for event in events {
        match event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                let phase = if *pressed { Phase::Down } else { Phase::Up };
                out.push(mouse(phase, to_px(*pos)));
            }
            Event::PointerMoved(pos) => out.push(mouse(Phase::Move, to_px(*pos))),
            // Leaving the window keeps the button held, the drag goes on.
            Event::PointerGone => {}
            Event::Touch { id, phase, pos, .. } => {
                let phase = match phase {
                    TouchPhase::Start => Phase::Down,
                    TouchPhase::Move => Phase::Move,
                    TouchPhase::End => Phase::Up,
                    TouchPhase::Cancel => Phase::Cancel,
                };
                out.push(RawPointer {
                    pointer: touch_pointer(*id),
                    phase,
                    pos: to_px(*pos),
                });
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn egui_events_become_raw_pointers() {
        let events = vec![
            Event::PointerButton {
                pos: Pos2::new(15.0, 5.0),
                button: PointerButton::Primary,
                pressed: true,
                modifiers: Default::default(),
            },
            Event::PointerButton {
                pos: Pos2::new(15.0, 5.0),
                button: PointerButton::Secondary,
                pressed: true,
                modifiers: Default::default(),
            },
            Event::PointerMoved(Pos2::new(20.0, 5.0)),
            Event::Text("x".to_owned()),
            Event::PointerGone,
        ];
        let origin = Pos2::new(10.0, 0.0);
        let raw = raw_pointers(&events, |p| ((p - origin) * 2.0).to_pos2());

        assert_eq!(
            raw,
            vec![
                RawPointer::new(PointerId::MOUSE, Phase::Down, 10.0, 10.0),
                RawPointer::new(PointerId::MOUSE, Phase::Move, 20.0, 10.0),
            ]
        );
    }

    struct Shown {
        left: Rect,
        right: Rect,
        cursor: egui::CursorIcon,
    }

    /// Run one egui frame over a 200x100 point screen with the split view
    /// filling it.
    fn show_frame(ctx: &egui::Context, state: &mut SplitState, events: Vec<Event>) -> Shown {
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 100.0))),
            events,
            ..Default::default()
        };
        let mut left = Rect::NOTHING;
        let mut right = Rect::NOTHING;
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    SplitView::new(&mut *state).show(ui, |ui| left = ui.max_rect(), |ui| right = ui.max_rect());
                });
        });
        Shown {
            left,
            right,
            cursor: output.platform_output.cursor_icon,
        }
    }

    fn button(x: f32, pressed: bool) -> Vec<Event> {
        let pos = Pos2::new(x, 50.0);
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                modifiers: Default::default(),
            },
        ]
    }

    fn move_to(x: f32) -> Vec<Event> {
        vec![Event::PointerMoved(Pos2::new(x, 50.0))]
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-5, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn drag_across_frames_moves_ratio() {
        let ctx = egui::Context::default();
        let mut state = SplitState::new("split");

        let shown = show_frame(&ctx, &mut state, Vec::new());
        assert_eq!(shown.left, Rect::from_min_max(Pos2::ZERO, Pos2::new(90.0, 100.0)));
        assert_eq!(shown.right, Rect::from_min_max(Pos2::new(100.0, 0.0), Pos2::new(200.0, 100.0)));

        show_frame(&ctx, &mut state, button(95.0, true));
        assert_eq!(state.drag_pointer(), Some(PointerId::MOUSE));
        assert_eq!(state.ratio, 0.0);

        // The cursor is off the bar, the drag keeps the resize cursor.
        let shown = show_frame(&ctx, &mut state, move_to(115.0));
        assert_close(state.ratio, 0.2);
        assert_eq!(shown.cursor, egui::CursorIcon::ResizeColumn);

        show_frame(&ctx, &mut state, button(115.0, false));
        assert!(!state.is_dragging());
        assert_close(state.ratio, 0.2);

        let shown = show_frame(&ctx, &mut state, move_to(180.0));
        assert_eq!(shown.left.width(), 110.0);
        assert_eq!(shown.cursor, egui::CursorIcon::Default);
        assert_close(state.ratio, 0.2);
    }

    #[test]
    fn drag_survives_leaving_the_window() {
        let ctx = egui::Context::default();
        let mut state = SplitState::new("split");

        show_frame(&ctx, &mut state, Vec::new());
        show_frame(&ctx, &mut state, button(95.0, true));
        show_frame(&ctx, &mut state, move_to(150.0));
        assert_close(state.ratio, 0.55);

        show_frame(&ctx, &mut state, vec![Event::PointerGone]);
        assert_eq!(state.drag_pointer(), Some(PointerId::MOUSE));

        show_frame(&ctx, &mut state, move_to(170.0));
        assert_close(state.ratio, 0.75);
        assert!(state.is_dragging());

        show_frame(&ctx, &mut state, button(170.0, false));
        assert!(!state.is_dragging());
    }

    #[test]
    fn collapsed_left_pane_gets_empty_rect() {
        let ctx = egui::Context::default();
        let mut state = SplitState::new("split").with_ratio(-1.0);

        let shown = show_frame(&ctx, &mut state, Vec::new());
        assert_eq!(shown.left.width(), 0.0);
        assert_eq!(shown.left.min, Pos2::ZERO);
        assert_eq!(shown.right, Rect::from_min_max(Pos2::ZERO, Pos2::new(200.0, 100.0)));
    }

    #[test]
    fn drag_delta_is_scaled_to_pixels() {
        let ctx = egui::Context::default();
        ctx.set_pixels_per_point(2.0);
        let mut state = SplitState::new("split");

        // The new scale may only apply from the next frame on.
        show_frame(&ctx, &mut state, Vec::new());
        let shown = show_frame(&ctx, &mut state, Vec::new());
        assert_eq!(ctx.pixels_per_point(), 2.0);
        // 400px wide, 20px bar: the bar starts at 180px, 90 points.
        assert_eq!(shown.left.width(), 90.0);

        show_frame(&ctx, &mut state, button(95.0, true));
        assert!(state.is_dragging());
        show_frame(&ctx, &mut state, move_to(115.0));
        show_frame(&ctx, &mut state, button(115.0, false));
        assert_close(state.ratio, 0.2);

        let shown = show_frame(&ctx, &mut state, Vec::new());
        assert_eq!(shown.left.width(), 110.0);
    }

    #[test]
    fn touches_get_their_own_pointer() {
        assert_eq!(touch_pointer(egui::TouchId(0)), PointerId(1));
        assert_ne!(touch_pointer(egui::TouchId(3)), PointerId::MOUSE);
    }
}
