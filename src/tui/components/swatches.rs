//! Swatch strip Component showing one patch per color.

use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::color::{parse_rgb, prefers_dark_text};
use crate::tui::activities::{Msg, main::UserEvent};
use crate::tui::{AppAction, dispatcher, handle_global_app_events, handle_shared_events};

/// What the strip renders.
#[derive(Debug, Clone, Default)]
pub struct StripData {
    pub colors: Vec<String>,
    pub selected: usize,
    pub hovered: bool,
    /// Swatch whose picker is open
    pub open: Option<usize>,
}

pub struct SwatchStrip {
    props: Props,
    data: StripData,
}

fn strip_block() -> Block<'static> {
    Block::default().title(" Swatches ").borders(Borders::ALL)
}

/// Equal-width columns for `count` swatches inside the strip's border.
pub fn swatch_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let inner = strip_block().inner(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count as u32); count])
        .split(inner)
        .to_vec()
}

/// Index of the swatch drawn at `position`, if any.
pub fn swatch_at(area: Rect, count: usize, position: Position) -> Option<usize> {
    swatch_areas(area, count)
        .iter()
        .position(|rect| rect.contains(position))
}

impl SwatchStrip {
    pub fn new(data: StripData) -> Self {
        Self {
            props: Props::default(),
            data,
        }
    }

    fn draw_swatch(&self, frame: &mut Frame, area: Rect, index: usize, color: &str) {
        let style = match parse_rgb(color) {
            Some(rgb) => {
                let fg = if prefers_dark_text(rgb) {
                    Color::Black
                } else {
                    Color::White
                };
                Style::default()
                    .bg(Color::Rgb(rgb.red, rgb.green, rgb.blue))
                    .fg(fg)
            }
            None => Style::default().bg(Color::DarkGray).fg(Color::White),
        };

        let marker = if self.data.open == Some(index) {
            "editing"
        } else if self.data.selected == index {
            "▲"
        } else {
            ""
        };
        let label_style = if self.data.selected == index {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };

        let mut lines = vec![Line::from(Span::styled(color.to_string(), label_style))];
        if area.height >= 3 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(marker, style)));

        let paragraph = Paragraph::new(lines).style(style).centered();
        frame.render_widget(paragraph, area);
    }

    fn move_selection(&mut self, direction: CmdDirection) -> Option<usize> {
        let count = self.data.colors.len();
        if count == 0 {
            return None;
        }
        self.data.selected = match direction {
            CmdDirection::Left => (self.data.selected + count - 1) % count,
            _ => (self.data.selected + 1) % count,
        };
        Some(self.data.selected)
    }
}

impl MockComponent for SwatchStrip {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let border_style = if self.data.hovered {
            Style::default().fg(Color::Cyan)
        } else if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(strip_block().border_style(border_style), area);

        if self.data.colors.is_empty() {
            frame.render_widget(Paragraph::new("No colors"), strip_block().inner(area));
            return;
        }

        let areas = swatch_areas(area, self.data.colors.len());
        for (index, (rect, color)) in areas.iter().zip(&self.data.colors).enumerate() {
            self.draw_swatch(frame, *rect, index, color);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.data.selected))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Move(direction) => match self.move_selection(direction) {
                Some(_) => CmdResult::Changed(self.state()),
                None => CmdResult::None,
            },
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for SwatchStrip {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        if let Some(msg) = handle_shared_events(&ev) {
            return Some(msg);
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if key_event.code == Key::Enter {
            return Some(Msg::OpenPicker);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        let direction = match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left))
            | AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => CmdDirection::Left,
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right))
            | AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => CmdDirection::Right,
            _ => return None,
        };
        match self.perform(Cmd::Move(direction)) {
            CmdResult::Changed(_) => Some(Msg::SelectSwatch(self.data.selected)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatches_split_the_inner_area() {
        let area = Rect::new(0, 0, 32, 5);
        let areas = swatch_areas(area, 3);
        assert_eq!(areas.len(), 3);
        assert!(areas.iter().all(|rect| rect.y == 1 && rect.height == 3));
        assert_eq!(areas.iter().map(|rect| rect.width).sum::<u16>(), 30);
    }

    #[test]
    fn hit_test_ignores_the_border() {
        let area = Rect::new(0, 0, 32, 5);
        assert_eq!(swatch_at(area, 3, Position::new(0, 2)), None);
        assert_eq!(swatch_at(area, 3, Position::new(1, 2)), Some(0));
        assert_eq!(swatch_at(area, 3, Position::new(30, 2)), Some(2));
        assert_eq!(swatch_at(area, 0, Position::new(5, 2)), None);
    }

    #[test]
    fn selection_wraps() {
        let mut strip = SwatchStrip::new(StripData {
            colors: vec!["#111111".into(), "#222222".into()],
            ..StripData::default()
        });
        assert_eq!(strip.move_selection(CmdDirection::Left), Some(1));
        assert_eq!(strip.move_selection(CmdDirection::Right), Some(0));
    }
}
