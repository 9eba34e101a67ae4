use std::hash::Hash;

use egui::{Color32, Id};
use serde::{Deserialize, Serialize};

use super::interaction::PointerId;

/// A device-independent length. Converted to physical pixels through the
/// frame's scale, see [`crate::split::Frame::px`].
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Dp(pub f32);

/// Bar thickness used when the configured one is unset or too thin to hit.
pub const DEFAULT_BAR: Dp = Dp(10.0);

/// Whether a pointer currently owns the divider.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        pointer: PointerId,
        /// x of the owning pointer at the last accepted sample.
        last_x: f32,
    },
}

/// Persistent state of a horizontal split view.
///
/// Owned by the caller and handed to [`SplitState::layout`] once per frame.
/// `ratio` is the only source of pane proportions; pixel geometry is derived
/// from it anew every frame.
#[derive(Clone, Debug)]
pub struct SplitState {
    pub(crate) id: Id,
    /// 0 is centered, -1 collapses the left pane, 1 collapses the right one.
    /// Not clamped.
    pub ratio: f32,
    /// Requested divider thickness. Values that resolve to 1px or less fall
    /// back to [`DEFAULT_BAR`].
    pub bar: Dp,
    pub bar_color: Color32,
    pub(crate) drag: DragState,
}

impl SplitState {
    /// Create a new split view state, centered, with the default bar.
    pub fn new(id_source: impl Hash) -> Self {
        Self {
            id: Id::new(id_source),
            ratio: 0.0,
            bar: DEFAULT_BAR,
            bar_color: Color32::GRAY,
            drag: DragState::Idle,
        }
    }

    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_bar(mut self, bar: Dp) -> Self {
        self.bar = bar;
        self
    }

    pub fn with_bar_color(mut self, color: Color32) -> Self {
        self.bar_color = color;
        self
    }

    /// Identity used to tag the divider's hit region and to key its events.
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The pointer owning the active drag, if any.
    pub fn drag_pointer(&self) -> Option<PointerId> {
        match self.drag {
            DragState::Dragging { pointer, .. } => Some(pointer),
            DragState::Idle => None,
        }
    }

    pub fn last_drag_x(&self) -> Option<f32> {
        match self.drag {
            DragState::Dragging { last_x, .. } => Some(last_x),
            DragState::Idle => None,
        }
    }
}
