//! Palette swatch widget with picker-driven editing, bounded undo, and
//! two-way sync against a host model.
//!
//! The [`engine::SyncEngine`] owns the widget's color list, per-swatch
//! controllers and undo history. It talks to its surroundings only through
//! [`host::HostBinding`]; [`widget::SwatchWidget`] pairs the two and delivers
//! host notices back to the engine.

pub mod cli;
pub mod color;
pub mod color_list;
pub mod config;
pub mod engine;
pub mod history;
pub mod host;
pub mod logging;
pub mod picker;
pub mod plot;
pub mod style;
pub mod swatch;
pub mod tui;
pub mod widget;
