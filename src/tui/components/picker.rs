//! Picker panel Component with H/S/V sliders.

use crossterm_actions::{NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::color::parse_rgb;
use crate::picker::HsvValues;
use crate::tui::activities::{Msg, main::UserEvent};
use crate::tui::{AppAction, dispatcher, handle_global_app_events, handle_shared_events};

/// Which slider is focused within the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HsvFocus {
    #[default]
    Hue,
    Saturation,
    Value,
}

impl HsvFocus {
    fn next(self) -> Self {
        match self {
            Self::Hue => Self::Saturation,
            Self::Saturation => Self::Value,
            Self::Value => Self::Hue,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Hue => Self::Value,
            Self::Saturation => Self::Hue,
            Self::Value => Self::Saturation,
        }
    }

    const ALL: [Self; 3] = [Self::Hue, Self::Saturation, Self::Value];

    /// One small step in this channel's units.
    fn step(self) -> f32 {
        match self {
            Self::Hue => 1.0,
            Self::Saturation | Self::Value => 0.01,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Value => "Value",
        }
    }

    fn read(self, values: &HsvValues) -> f32 {
        match self {
            Self::Hue => values.hue,
            Self::Saturation => values.saturation,
            Self::Value => values.value,
        }
    }

    fn write(self, values: &mut HsvValues, value: f32) {
        match self {
            Self::Hue => values.hue = value,
            Self::Saturation => values.saturation = value,
            Self::Value => values.value = value,
        }
    }

    /// Position within the slider track, `0.0..=1.0`.
    fn ratio(self, values: &HsvValues) -> f64 {
        let max = if self == Self::Hue { 360.0 } else { 1.0 };
        f64::from(self.read(values) / max).clamp(0.0, 1.0)
    }

    fn readout(self, values: &HsvValues) -> String {
        match self {
            Self::Hue => format!("{:>4.0}°", values.hue),
            Self::Saturation | Self::Value => format!("{:>4.0}%", self.read(values) * 100.0),
        }
    }
}

/// Working-selection editor for one swatch's picker.
pub struct PickerPanel {
    props: Props,
    index: usize,
    values: HsvValues,
    preview: String,
    sub_focus: HsvFocus,
}

impl PickerPanel {
    pub fn new(index: usize, values: HsvValues, preview: String) -> Self {
        Self {
            props: Props::default(),
            index,
            values,
            preview,
            sub_focus: HsvFocus::Hue,
        }
    }

    /// Move the focused channel by `steps` small steps.
    fn adjust_current(&mut self, steps: f32) {
        let channel = self.sub_focus;
        let moved = channel.read(&self.values) + steps * channel.step();
        channel.write(&mut self.values, moved);
        self.values = self.values.normalized();
    }
}

fn channel_gauge(channel: HsvFocus, values: &HsvValues, active: bool) -> LineGauge<'static> {
    let accent = if active { Color::Cyan } else { Color::Gray };
    let label = Line::from(vec![
        Span::styled(
            format!("{:<11}", channel.label()),
            if active {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
        Span::styled(channel.readout(values), Style::default().fg(accent)),
    ]);
    LineGauge::default()
        .label(label)
        .ratio(channel.ratio(values))
        .line_set(symbols::line::THICK)
        .filled_style(Style::default().fg(accent))
        .unfilled_style(Style::default().fg(Color::DarkGray))
}

impl MockComponent for PickerPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let block = Block::default()
            .title(format!(" Picker: swatch {} ", self.index))
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Preview + hex
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hue
                Constraint::Length(1), // Saturation
                Constraint::Length(1), // Value
                Constraint::Min(0),
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let header_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(6), Constraint::Min(10)])
            .split(rows[0]);
        let swatch_style = parse_rgb(&self.preview)
            .map(|rgb| Style::default().bg(Color::Rgb(rgb.red, rgb.green, rgb.blue)))
            .unwrap_or_default();
        frame.render_widget(Paragraph::new("    ").style(swatch_style), header_cols[0]);
        frame.render_widget(
            Paragraph::new(self.preview.clone())
                .style(Style::default().add_modifier(Modifier::BOLD)),
            header_cols[1],
        );

        for (channel, row) in HsvFocus::ALL.into_iter().zip(&rows[2..5]) {
            let active = focused && self.sub_focus == channel;
            frame.render_widget(channel_gauge(channel, &self.values, active), *row);
        }

        let hint = Paragraph::new("Enter: save | Esc: cancel")
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(hint, rows[6]);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::Tup3((
            StateValue::F64(f64::from(self.values.hue)),
            StateValue::F64(f64::from(self.values.saturation)),
            StateValue::F64(f64::from(self.values.value)),
        ))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(CmdDirection::Up) => {
                self.sub_focus = self.sub_focus.prev();
                CmdResult::None
            }
            Cmd::Move(CmdDirection::Down) => {
                self.sub_focus = self.sub_focus.next();
                CmdResult::None
            }
            Cmd::Move(CmdDirection::Left) => {
                self.adjust_current(-1.0);
                CmdResult::Changed(self.state())
            }
            Cmd::Move(CmdDirection::Right) => {
                self.adjust_current(1.0);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for PickerPanel {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if let Some(msg) = handle_shared_events(&ev) {
            return Some(msg);
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        match key_event.code {
            Key::Enter => return Some(Msg::PickerSave),
            Key::Esc => return Some(Msg::PickerCancel),
            _ => {}
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Move(CmdDirection::Up));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Move(CmdDirection::Down));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
            | AppAction::ValueDecrementSmall => {
                self.perform(Cmd::Move(CmdDirection::Left));
                Some(Msg::PickerAdjusted(self.values))
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right))
            | AppAction::ValueIncrementSmall => {
                self.perform(Cmd::Move(CmdDirection::Right));
                Some(Msg::PickerAdjusted(self.values))
            }
            AppAction::ValueDecrementLarge => {
                self.adjust_current(-10.0);
                Some(Msg::PickerAdjusted(self.values))
            }
            AppAction::ValueIncrementLarge => {
                self.adjust_current(10.0);
                Some(Msg::PickerAdjusted(self.values))
            }
            _ => None,
        }
    }
}
