//! Interactive TUI for editing a swatch palette.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance and message types.

mod activities;
mod activity;
mod components;
mod model;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::event::{DisableMouseCapture, EnableMouseCapture},
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};
use tuirealm::event::{Key, KeyEvent, KeyModifiers, MouseEventKind};

use crate::config::SwatchConfig;
use crate::engine::KeyChord;

pub use model::Model;

use activities::Msg;
use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Switch to the plot preview screen
    PlotPreview,
    /// Write the .mplstyle file
    Export,
    /// Increment value by small step
    ValueIncrementSmall,
    /// Decrement value by small step
    ValueDecrementSmall,
    /// Increment value by large step
    ValueIncrementLarge,
    /// Decrement value by large step
    ValueDecrementLarge,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::PlotPreview)
            .key(keys::char('p'))
            .description("View sample plot")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::Export)
            .key(keys::char('e'))
            .description("Export style file")
            .build(),
    );

    // Value adjustment bindings: [/] for small steps, {/} for large steps
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueDecrementSmall)
            .key(keys::char('['))
            .description("Decrease value")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueIncrementSmall)
            .key(keys::char(']'))
            .description("Increase value")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueDecrementLarge)
            .key(keys::char('{'))
            .description("Decrease value (10x)")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ValueIncrementLarge)
            .key(keys::char('}'))
            .description("Increase value (10x)")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::Tui(TuiEvent::App(AppEvent::Refresh)) => Some(Msg::ResetColors),
        AppAction::PlotPreview => Some(Msg::SwitchToPlot),
        AppAction::Export => Some(Msg::DoExport),
        _ => None,
    }
}

/// Control plus either case of `z`, taken before the dispatcher so editing
/// defaults never claim it. The engine decides whether the chord is undo.
pub fn undo_candidate(key: &KeyEvent) -> Option<KeyChord> {
    let Key::Char(c @ ('z' | 'Z')) = key.code else {
        return None;
    };
    key.modifiers
        .contains(KeyModifiers::CONTROL)
        .then(|| KeyChord {
            key: c,
            ctrl: true,
            alt: key.modifiers.contains(KeyModifiers::ALT),
            shift: key.modifiers.contains(KeyModifiers::SHIFT),
        })
}

/// Events every main-screen component forwards regardless of its own role:
/// the undo shortcut and pointer movement.
pub fn handle_shared_events(ev: &tuirealm::Event<activities::main::UserEvent>) -> Option<Msg> {
    match ev {
        tuirealm::Event::Keyboard(key) => undo_candidate(key).map(Msg::UndoShortcut),
        tuirealm::Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Msg::PointerMoved {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::Down(_) => Some(Msg::PointerPressed {
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive TUI using activity-based architecture.
pub fn run(config: SwatchConfig) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let model = Model::new(config);
    tracing::info!(colors = ?model.widget.colors(), "Starting interactive editor");

    let context = Context { model };
    let mut manager = ActivityManager::new(context);

    let result = manager.run(&mut terminal);

    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
