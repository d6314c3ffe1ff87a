//! TUI components using tui-realm.

pub mod help;
pub mod picker;
pub mod style;
pub mod swatches;

pub use help::{MAIN_FOOTER_ACTIONS, PLOT_FOOTER_ACTIONS, format_footer, render_help};
pub use picker::PickerPanel;
pub use style::StyleView;
pub use swatches::{StripData, SwatchStrip, swatch_at};
