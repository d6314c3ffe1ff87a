//! Screens of the editor and the loop that moves between them.
//!
//! The [`Context`] (and with it the mounted swatch widget) survives every
//! switch; only the tui-realm application is rebuilt per screen.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};

use super::Model;
use super::activities::{MainActivity, PlotActivity};

/// State handed from one screen to the next.
pub struct Context {
    pub model: Model,
}

/// Why a screen stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchToMain,
    SwitchToPlot,
}

/// One screen with its own tui-realm application.
pub trait Activity {
    /// Take ownership of the context and mount components.
    fn on_create(&mut self, context: Context);

    /// Draw one frame, then process at most one poll of input.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// `Some` once the screen wants to close.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Drop the application and give the context back.
    fn on_destroy(&mut self) -> Option<Context>;
}

/// Screens the manager can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Main,
    Plot,
}

impl ActivityType {
    fn create(self) -> Box<dyn Activity> {
        match self {
            Self::Main => Box::<MainActivity>::default(),
            Self::Plot => Box::<PlotActivity>::default(),
        }
    }
}

/// Runs one activity at a time and hands the context to the next.
pub struct ActivityManager {
    context: Option<Context>,
    current: ActivityType,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            current: ActivityType::Main,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity context was not returned"))?;
            let mut activity = self.current.create();
            activity.on_create(context);

            let reason = loop {
                activity.on_draw(terminal)?;
                if let Some(reason) = activity.will_umount() {
                    break reason.clone();
                }
            };
            self.context = activity.on_destroy();

            self.current = match reason {
                ExitReason::SwitchToMain => ActivityType::Main,
                ExitReason::SwitchToPlot => ActivityType::Plot,
                ExitReason::Quit => {
                    if let Some(context) = self.context.take() {
                        context.model.shutdown();
                    }
                    return Ok(());
                }
            };
        }
    }
}
