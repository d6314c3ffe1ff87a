//! Help modal and footer text built from the dispatcher's bindings.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Row, Table},
};

use crate::tui::{AppAction, dispatcher};

/// Actions to display in a keybinding group.
struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

/// Groups of actions for the help modal, with semantic organization.
const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::Tui(TuiEvent::App(AppEvent::Refresh)),
            AppAction::Export,
        ],
    },
    KeybindingGroup {
        title: "Views",
        actions: &[AppAction::PlotPreview],
    },
    KeybindingGroup {
        title: "Swatches",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
        ],
    },
    KeybindingGroup {
        title: "Picker",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
            AppAction::ValueDecrementSmall,
            AppAction::ValueIncrementSmall,
            AppAction::ValueDecrementLarge,
            AppAction::ValueIncrementLarge,
        ],
    },
];

/// Bindings handled outside the dispatcher.
/// Format: (description, keys)
const EXTRA_BINDINGS: &[(&str, &str)] = &[
    ("Open picker", "Enter / click"),
    ("Save picker color", "Enter"),
    ("Cancel picker", "Esc"),
    ("Undo (while hovering)", "Ctrl+Z"),
];

/// Actions shown in the main activity footer.
pub const MAIN_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Export,
    AppAction::PlotPreview,
    AppAction::Tui(TuiEvent::App(AppEvent::Refresh)),
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Actions shown in the plot preview footer.
pub const PLOT_FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::PlotPreview,
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// One footer hint per action, as `"verb: key"`, followed by `extras`.
///
/// Only the first word of a description and the first bound key are shown.
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();
    actions
        .iter()
        .filter_map(|action| {
            let entry = help_entries.get(action)?;
            let key = entry.keys.first()?;
            let verb = entry.description?.split_whitespace().next()?;
            Some(format!("{}: {key}", verb.to_lowercase()))
        })
        .chain(extras.iter().map(|(desc, key)| format!("{desc}: {key}")))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Rows of the help table: a `None` key marks a section heading.
fn help_rows() -> Vec<(String, Option<String>)> {
    let help_entries = dispatcher().config().help_entries();
    let mut rows = Vec::new();
    for group in HELP_GROUPS {
        rows.push((group.title.to_string(), None));
        rows.extend(group.actions.iter().filter_map(|action| {
            let entry = help_entries.get(action)?;
            let keys = entry
                .keys
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Some((entry.description.unwrap_or("-").to_string(), Some(keys)))
        }));
    }
    rows.push(("Editing".to_string(), None));
    rows.extend(
        EXTRA_BINDINGS
            .iter()
            .map(|(desc, keys)| ((*desc).to_string(), Some((*keys).to_string()))),
    );
    rows
}

/// Render the help modal centered over the current frame.
pub fn render_help(frame: &mut Frame) {
    let rows = help_rows();
    let height = u16::try_from(rows.len()).unwrap_or(u16::MAX).saturating_add(4);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(52)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_bottom(Line::from(" Esc / ? / Enter to close ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let heading = Style::default().add_modifier(Modifier::BOLD);
    let keys_style = Style::default().fg(Color::Gray);
    let table_rows = rows.into_iter().map(|(label, keys)| match keys {
        None => Row::new([Cell::from(label).style(heading)]).top_margin(1),
        Some(keys) => Row::new([
            Cell::from(format!("  {label}")),
            Cell::from(keys).style(keys_style),
        ]),
    });
    let table = Table::new(table_rows, [Constraint::Length(26), Constraint::Min(10)]).block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_appends_extras_after_bound_actions() {
        let footer = format_footer(&[AppAction::Export], &[("undo", "Ctrl+Z")]);
        assert!(footer.starts_with("export: "));
        assert!(footer.ends_with(" | undo: Ctrl+Z"));
    }

    #[test]
    fn help_rows_start_with_a_heading_per_group() {
        let rows = help_rows();
        assert_eq!(rows[0], ("Global".to_string(), None));
        let headings = rows.iter().filter(|(_, keys)| keys.is_none()).count();
        assert_eq!(headings, HELP_GROUPS.len() + 1);
        let undo = ("Undo (while hovering)".to_string(), Some("Ctrl+Z".to_string()));
        assert!(rows.contains(&undo));
    }
}
