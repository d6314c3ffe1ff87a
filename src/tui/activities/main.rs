//! Main activity - the swatch editing screen.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, Update};

use crate::engine::KeyChord;
use crate::picker::HsvValues;
use crate::tui::Model;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    MAIN_FOOTER_ACTIONS, PickerPanel, StripData, StyleView, SwatchStrip, format_footer,
    render_help,
};

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

/// Unique identifiers for all components in MainActivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Swatches,
    Picker,
    Style,
}

// ============================================================================
// Messages (scoped to MainActivity)
// ============================================================================

/// All possible messages that can be sent in MainActivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,

    // Swatch strip
    SelectSwatch(usize),
    OpenPicker,

    // Picker panel
    PickerAdjusted(HsvValues),
    PickerSave,
    PickerCancel,

    // Pointer and shortcut routing
    PointerMoved { column: u16, row: u16 },
    PointerPressed { column: u16, row: u16 },
    UndoShortcut(KeyChord),

    // Host-side reset (outside writer)
    ResetColors,

    // Export flow
    DoExport,

    // Chained after any change that alters what components show
    Sync,

    // Activity transition
    SwitchToPlot,
}

// ============================================================================
// User events
// ============================================================================

/// No custom events are injected; the swatch strip only reacts to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// MainActivity
// ============================================================================

/// The swatch editing activity.
#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    /// Create and configure the tui-realm application.
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn strip_for(model: &Model) -> SwatchStrip {
        SwatchStrip::new(StripData {
            colors: model.widget.colors(),
            selected: model.selected,
            hovered: model.widget.engine().is_hovered(),
            open: model.widget.open_picker_index(),
        })
    }

    /// Remount every component from the current model and move focus to the
    /// picker while one is open.
    fn sync_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) {
        let _ = app.umount(&Id::Swatches);
        let _ = app.mount(Id::Swatches, Box::new(Self::strip_for(model)), vec![]);

        let _ = app.umount(&Id::Style);
        let _ = app.mount(
            Id::Style,
            Box::new(StyleView::new(&model.widget.colors())),
            vec![],
        );

        let _ = app.umount(&Id::Picker);
        if let Some((index, values, preview)) = model.open_picker() {
            let _ = app.mount(
                Id::Picker,
                Box::new(PickerPanel::new(index, values, preview)),
                vec![],
            );
            let _ = app.active(&Id::Picker);
        } else {
            let _ = app.active(&Id::Swatches);
        }
    }

    fn render_picker_hint(frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default().title(" Picker ").borders(Borders::ALL);
        let hint = Paragraph::new("Select a swatch and press Enter (or click it) to edit.")
            .style(Style::default().add_modifier(Modifier::DIM))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        Self::sync_components(&mut app, &context.model);
        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_mut()) else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };
        let model = &mut context.model;

        let picker_open = model.widget.open_picker_index().is_some();
        let mut strip_area = Rect::default();

        terminal.draw(|frame| {
            let area = frame.area();

            let main_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Length(6), // Swatches
                    Constraint::Min(8),    // Picker + style
                    Constraint::Length(1), // Status
                ])
                .split(area);

            let history = model.widget.engine().history();
            let title = format!(
                " swatches - {} colors, undo {}/{} ",
                model.widget.engine().len(),
                history.len(),
                history.capacity()
            );
            let title_widget =
                Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, main_rows[0]);

            strip_area = main_rows[1];
            app.view(&Id::Swatches, frame, main_rows[1]);

            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(main_rows[2]);

            if picker_open {
                app.view(&Id::Picker, frame, cols[0]);
            } else {
                Self::render_picker_hint(frame, cols[0]);
            }
            app.view(&Id::Style, frame, cols[1]);

            let status = model
                .message
                .clone()
                .unwrap_or_else(|| format_footer(MAIN_FOOTER_ACTIONS, &[("undo", "Ctrl+Z")]));
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, main_rows[3]);

            if model.show_help {
                render_help(frame);
            }
        })?;

        model.strip_area = strip_area;

        // Help modal intercepts all input when visible
        if model.show_help {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                        model.show_help = false;
                    }
                    _ => {}
                }
            }
            return Ok(());
        }

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            let mut needs_sync = false;

            for msg in messages {
                match msg {
                    Msg::Quit => {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    Msg::SwitchToPlot => {
                        self.exit_reason = Some(ExitReason::SwitchToPlot);
                        return Ok(());
                    }
                    _ => {}
                }

                // Process through model, handle chained messages
                let mut current = Some(msg);
                while let Some(m) = current {
                    if matches!(m, Msg::Sync) {
                        needs_sync = true;
                    }
                    current = model.update(Some(m));
                }
            }

            if needs_sync {
                Self::sync_components(app, model);
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
