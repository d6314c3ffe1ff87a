//! A mounted swatch widget: one host model plus the engine bound to it.
//!
//! Every entry point runs one engine operation and then delivers whatever
//! change notices the host queued, one at a time, so callers always observe
//! a settled widget.

use serde::{Deserialize, Serialize};

use crate::color_list::InitialColors;
use crate::engine::{KeyChord, KeyOutcome, RefreshOutcome, SyncEngine};
use crate::history::DEFAULT_HISTORY_LENGTH;
use crate::host::{HostBinding, LocalHost};
use crate::picker::{ColorPicker, HsvPicker};

/// Construction options recognized by the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// A single color or a list; fixed length once mounted
    pub colors: InitialColors,
    /// Maximum undo depth
    pub history_length: usize,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            colors: InitialColors::default(),
            history_length: DEFAULT_HISTORY_LENGTH.get(),
        }
    }
}

/// Host and engine for one widget instance.
#[derive(Debug)]
pub struct SwatchWidget<H, P> {
    host: H,
    engine: SyncEngine<P>,
}

impl SwatchWidget<LocalHost, HsvPicker> {
    /// Mount a widget over a fresh in-process host.
    pub fn with_options(options: WidgetOptions) -> Self {
        let host = LocalHost::new(options.colors.into_vec(), options.history_length);
        Self::mount(host, |_, color| HsvPicker::create(color))
    }

    /// Replace the host's list as an outside writer would.
    pub fn set_colors_external(&mut self, colors: Vec<String>) -> Vec<RefreshOutcome> {
        self.host.set_colors_external(colors);
        self.settle()
    }
}

impl<H: HostBinding, P: ColorPicker> SwatchWidget<H, P> {
    pub fn mount<F>(mut host: H, make_picker: F) -> Self
    where
        F: FnMut(usize, &str) -> P,
    {
        let engine = SyncEngine::mount(&mut host, make_picker);
        Self { host, engine }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn engine(&self) -> &SyncEngine<P> {
        &self.engine
    }

    /// Current system-of-record colors.
    pub fn colors(&self) -> Vec<String> {
        self.host.colors()
    }

    /// Open the picker for `index`, closing any other open picker.
    pub fn open_picker(&mut self, index: usize) {
        self.engine.open_picker(index);
    }

    /// Index of the swatch whose picker is open, if any.
    pub fn open_picker_index(&self) -> Option<usize> {
        self.engine
            .controllers()
            .iter()
            .position(|controller| controller.is_open())
    }

    /// Close the picker for `index` without committing its working color.
    pub fn cancel_picker(&mut self, index: usize) {
        if let Some(controller) = self.engine.controller_mut(index) {
            controller.cancel();
        }
    }

    /// Mutable access to one picker, for driving its working selection.
    pub fn picker_mut(&mut self, index: usize) -> Option<&mut P> {
        self.engine
            .controller_mut(index)
            .map(|controller| controller.picker_mut())
    }

    /// Process picker events (saves become commits) and settle.
    pub fn pump_pickers(&mut self) -> usize {
        let applied = self.engine.pump_pickers(&mut self.host);
        self.settle();
        applied
    }

    /// Commit `color` at `index` as if confirmed in its picker.
    pub fn commit(&mut self, index: usize, color: Option<&str>) -> bool {
        let applied = self.engine.commit(&mut self.host, index, color);
        self.settle();
        applied
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.engine.undo(&mut self.host);
        self.settle();
        undone
    }

    pub fn pointer_enter(&mut self) {
        self.engine.pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    pub fn handle_key(&mut self, chord: KeyChord) -> KeyOutcome {
        let outcome = self.engine.handle_key(&mut self.host, chord);
        self.settle();
        outcome
    }

    /// Deliver queued host notices to the engine until none remain.
    pub fn settle(&mut self) -> Vec<RefreshOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let notices = self.host.take_notices();
            if notices.is_empty() {
                return outcomes;
            }
            for notice in &notices {
                outcomes.push(self.engine.on_host_change(&self.host, notice));
            }
        }
    }

    /// Unsubscribe and hand the host back.
    pub fn teardown(mut self) -> H {
        self.engine.teardown(&mut self.host);
        self.host
    }
}
