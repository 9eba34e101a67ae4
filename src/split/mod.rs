//! Horizontal split view: two panes side by side with a draggable divider.
//!
//! The caller owns a [`SplitState`] and calls [`SplitState::layout`] once per
//! frame. Input arrives through the frame's [`EventQueue`] and everything the
//! widget wants from the host comes back as [`Effect`]s, so the whole thing
//! runs without a rendering backend.

pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod state;


pub use frame::{Effect, EventQueue, Frame, HitRegion, BAR_EVENTS};
pub use geometry::{resolve_bar_px, Constraints, PxPoint, PxRect, PxSize, SplitGeometry};
pub use interaction::{Event, PointerEvent, PointerId, PointerKind};
pub use state::{Dp, DragState, SplitState, DEFAULT_BAR};
