//! The floating comment panel: when it shows (`policy`) and what it holds
//! (`comment_panel`).

pub mod comment_panel;
pub mod policy;

pub use comment_panel::{CommentPanel, PanelButtons, PanelProps};
pub use policy::{PanelState, SelectionSnapshot, decide_visibility};
