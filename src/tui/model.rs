//! Application model for the TUI.

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use ratatui::layout::{Position, Rect};
use tuirealm::Update;

use crate::config::SwatchConfig;
use crate::engine::{KeyChord, KeyOutcome};
use crate::host::{HostBinding, LocalHost};
use crate::picker::{ColorPicker, HsvPicker, HsvValues};
use crate::style::mplstyle;
use crate::widget::SwatchWidget;

use super::activities::Msg;
use super::components::swatch_at;

/// Application model containing all state.
pub struct Model {
    pub widget: SwatchWidget<LocalHost, HsvPicker>,
    /// Colors the host is reset to on request
    pub initial_colors: Vec<String>,

    // UI state
    pub selected: usize,
    /// Where the swatch strip was last drawn, for pointer hit-testing
    pub strip_area: Rect,
    pub show_help: bool,
    pub quit: bool,
    pub message: Option<String>,
    pub export_path: PathBuf,
}

impl Model {
    pub fn new(config: SwatchConfig) -> Self {
        let initial_colors = config.widget.colors.clone().into_vec();
        Self {
            widget: SwatchWidget::with_options(config.widget),
            initial_colors,
            selected: 0,
            strip_area: Rect::default(),
            show_help: false,
            quit: false,
            message: None,
            export_path: config.export.path,
        }
    }

    /// Index, slider values and preview color of the open picker.
    pub fn open_picker(&self) -> Option<(usize, HsvValues, String)> {
        let index = self.widget.open_picker_index()?;
        let picker = self.widget.engine().controller(index)?.picker();
        Some((index, picker.values(), picker.selection()?))
    }

    pub fn select(&mut self, index: usize) {
        if index < self.widget.engine().len() {
            self.selected = index;
        }
    }

    fn open_selected(&mut self) {
        self.widget.open_picker(self.selected);
        self.widget.pump_pickers();
    }

    fn adjust_picker(&mut self, values: HsvValues) {
        let Some(index) = self.widget.open_picker_index() else {
            return;
        };
        if let Some(picker) = self.widget.picker_mut(index) {
            picker.adjust(values);
        }
        self.widget.pump_pickers();
    }

    fn save_picker(&mut self) {
        let Some(index) = self.widget.open_picker_index() else {
            return;
        };
        if let Some(picker) = self.widget.picker_mut(index) {
            picker.save();
        }
        if self.widget.pump_pickers() > 0 {
            self.message = self
                .widget
                .colors()
                .get(index)
                .map(|color| format!("Swatch {index} set to {color}"));
        }
    }

    fn cancel_picker(&mut self) {
        if let Some(index) = self.widget.open_picker_index() {
            self.widget.cancel_picker(index);
            self.widget.pump_pickers();
        }
    }

    /// Returns whether hover state changed.
    fn pointer_moved(&mut self, column: u16, row: u16) -> bool {
        let inside = self.strip_area.contains(Position::new(column, row));
        if inside == self.widget.engine().is_hovered() {
            return false;
        }
        if inside {
            self.widget.pointer_enter();
        } else {
            self.widget.pointer_leave();
        }
        true
    }

    fn pointer_pressed(&mut self, column: u16, row: u16) -> bool {
        self.pointer_moved(column, row);
        let count = self.widget.engine().len();
        let Some(index) = swatch_at(self.strip_area, count, Position::new(column, row)) else {
            return false;
        };
        self.select(index);
        self.open_selected();
        true
    }

    /// Returns whether the chord changed anything on screen.
    fn undo_shortcut(&mut self, chord: KeyChord) -> bool {
        let before = self.widget.engine().history().len();
        let message = match self.widget.handle_key(chord) {
            KeyOutcome::Consumed if before > 0 => "Undone",
            KeyOutcome::Consumed => "Nothing to undo",
            KeyOutcome::Ignored if chord.is_undo() => "Hover over the swatches to undo",
            KeyOutcome::Ignored => return false,
        };
        self.message = Some(message.to_string());
        true
    }

    fn reset_colors(&mut self) {
        let outcomes = self.widget.set_colors_external(self.initial_colors.clone());
        tracing::debug!(?outcomes, "Reset colors from host");
        self.message = Some("Colors reset".to_string());
    }

    /// Export the current colors as a .mplstyle file.
    pub fn export(&mut self) -> Result<()> {
        let content = mplstyle(&self.widget.colors());
        std::fs::write(&self.export_path, content)
            .wrap_err_with(|| format!("Failed to write to {}", self.export_path.display()))?;
        self.message = Some(format!("Exported to {}", self.export_path.display()));
        Ok(())
    }

    /// Unsubscribe the widget from its host.
    pub fn shutdown(self) {
        let host = self.widget.teardown();
        tracing::info!(colors = ?host.colors(), "Editor closed");
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }

            Msg::SelectSwatch(index) => {
                self.select(index);
                Some(Msg::Sync)
            }
            Msg::OpenPicker => {
                self.open_selected();
                Some(Msg::Sync)
            }

            Msg::PickerAdjusted(values) => {
                self.adjust_picker(values);
                Some(Msg::Sync)
            }
            Msg::PickerSave => {
                self.save_picker();
                Some(Msg::Sync)
            }
            Msg::PickerCancel => {
                self.cancel_picker();
                Some(Msg::Sync)
            }

            Msg::PointerMoved { column, row } => {
                self.pointer_moved(column, row).then_some(Msg::Sync)
            }
            Msg::PointerPressed { column, row } => {
                self.pointer_pressed(column, row).then_some(Msg::Sync)
            }
            Msg::UndoShortcut(chord) => self.undo_shortcut(chord).then_some(Msg::Sync),

            Msg::ResetColors => {
                self.reset_colors();
                Some(Msg::Sync)
            }

            Msg::DoExport => {
                if let Err(e) = self.export() {
                    tracing::error!("{e:#}");
                    self.message = Some(format!("Export failed: {e}"));
                }
                None
            }

            // Handled by the activity
            Msg::Sync | Msg::SwitchToPlot => None,
        }
    }
}
