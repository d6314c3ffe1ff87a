//! Activity modules for the TUI.

pub mod main;
pub mod plot;

pub use main::MainActivity;
pub use main::Msg;
pub use plot::PlotActivity;
