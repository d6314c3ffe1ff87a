//! Plot preview activity - one sine curve per palette color.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use tuirealm::{
    Application, Component, Event, EventListenerCfg, MockComponent, PollStrategy, State,
    command::{Cmd, CmdResult},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crate::color::parse_rgb;
use crate::plot::{SamplePlot, TITLE, X_LABEL, Y_LABEL, sample_plot};
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{PLOT_FOOTER_ACTIONS, format_footer};
use crate::tui::{dispatcher, handle_global_app_events};

// ============================================================================
// Component identifiers (scoped to PlotActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    PlotView,
}

// ============================================================================
// Messages (scoped to PlotActivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Quit,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// PlotView Component
// ============================================================================

pub struct PlotView {
    props: Props,
    plot: SamplePlot,
}

impl PlotView {
    pub fn new(colors: &[String]) -> Self {
        Self {
            props: Props::default(),
            plot: sample_plot(colors),
        }
    }
}

impl MockComponent for PlotView {
    fn view(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let datasets: Vec<Dataset> = self
            .plot
            .series
            .iter()
            .enumerate()
            .map(|(i, series)| {
                let color = parse_rgb(&series.color)
                    .map(|rgb| Color::Rgb(rgb.red, rgb.green, rgb.blue))
                    .unwrap_or(Color::Gray);
                Dataset::default()
                    .name(format!("C{i}"))
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(color))
                    .data(&series.points)
            })
            .collect();

        let [y_min, y_max] = self.plot.y_bounds();
        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" {TITLE} "))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title(X_LABEL)
                    .style(Style::default().fg(Color::Gray))
                    .bounds(self.plot.x_bounds())
                    .labels(["0", "π", "2π"]),
            )
            .y_axis(
                Axis::default()
                    .title(Y_LABEL)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels([format!("{y_min:.0}"), format!("{y_max:.0}")]),
            );
        frame.render_widget(chart, area);
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

impl Component<Msg, UserEvent> for PlotView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Esc goes back (not mapped in dispatcher)
        if key_event.code == Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;

        match handle_global_app_events(&action)? {
            super::Msg::Quit => Some(Msg::Quit),
            super::Msg::SwitchToPlot => Some(Msg::Back), // Toggle back
            _ => None,
        }
    }
}

// ============================================================================
// PlotActivity
// ============================================================================

#[derive(Default)]
pub struct PlotActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl PlotActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }
}

impl Activity for PlotActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        let plot_view = PlotView::new(&context.model.widget.colors());
        if let Err(e) = app.mount(Id::PlotView, Box::new(plot_view), vec![]) {
            tracing::error!("Failed to mount plot view: {}", e);
        }
        let _ = app.active(&Id::PlotView);

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let Some(app) = self.app.as_mut() else {
            self.exit_reason = Some(ExitReason::Quit);
            return Ok(());
        };

        terminal.draw(|frame| {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Title
                    Constraint::Min(10),   // Chart
                    Constraint::Length(1), // Status
                ])
                .split(frame.area());

            let title_widget = Paragraph::new(" Plot Preview ")
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title_widget, rows[0]);

            app.view(&Id::PlotView, frame, rows[1]);

            let status = format_footer(PLOT_FOOTER_ACTIONS, &[("back", "Esc")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, rows[2]);
        })?;

        if let Ok(messages) = app.tick(PollStrategy::Once)
            && let Some(msg) = messages.into_iter().next()
        {
            self.exit_reason = Some(match msg {
                Msg::Quit => ExitReason::Quit,
                Msg::Back => ExitReason::SwitchToMain,
            });
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
