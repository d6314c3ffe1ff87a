//! Read-only view of the generated matplotlib style.

use ratatui::Frame;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State,
    command::{Cmd, CmdResult},
    props::{AttrValue, Attribute, Props},
};

use crate::color::parse_rgb;
use crate::style::mplstyle;
use crate::tui::activities::{Msg, main::UserEvent};

pub struct StyleView {
    props: Props,
    colors: Vec<String>,
    text: String,
}

impl StyleView {
    pub fn new(colors: &[String]) -> Self {
        Self {
            props: Props::default(),
            colors: colors.to_vec(),
            text: mplstyle(colors),
        }
    }
}

impl MockComponent for StyleView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Style ").borders(Borders::ALL);

        let mut lines: Vec<Line> = self.text.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        // Color key under the style text
        lines.extend(self.colors.iter().enumerate().map(|(i, color)| {
            let patch = parse_rgb(color)
                .map(|rgb| Style::default().bg(Color::Rgb(rgb.red, rgb.green, rgb.blue)))
                .unwrap_or_default();
            Line::from(vec![
                Span::styled("  ", patch),
                Span::raw(format!(" C{i} {color}")),
            ])
        }));

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for StyleView {
    fn on(&mut self, _ev: Event<UserEvent>) -> Option<Msg> {
        // Read-only component, no events handled
        None
    }
}
