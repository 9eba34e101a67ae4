pub mod config;
pub mod host;
pub mod router;
pub mod split;
pub mod theme;

pub use host::SplitView;
pub use split::{Dp, Frame, SplitState};
