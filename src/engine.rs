//! State synchronization and undo for a row of swatches.
//!
//! The engine owns the widget-side mirror of the color list, one
//! [`SwatchController`] per color, and the undo history. It mutates the host
//! on user commits and undo, and refreshes the controllers when the host
//! reports a change it did not cause.
//!
//! Every operation runs `Idle -> InternalMutation -> Idle` or
//! `Idle -> ExternalRefresh -> Idle` to completion. Outside `Idle`, change
//! notices and picker events are ignored.
//! Because host notices are queued, each internal commit also carries a
//! [`MutationToken`]; a notice that comes back with this engine's widget id
//! is an echo and is dropped.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, instrument, trace, warn};

use crate::color_list::ColorList;
use crate::history::{DEFAULT_HISTORY_LENGTH, HistoryStack};
use crate::host::{
    ChangeNotice, HostBinding, HostEvent, ModelKey, ModelValue, MutationToken, Origin,
    SubscriptionId, WidgetId,
};
use crate::picker::ColorPicker;
use crate::swatch::{SwatchCommit, SwatchController};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Where the engine is within one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    #[default]
    Idle,
    InternalMutation,
    ExternalRefresh,
}

/// A key press as seen by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyChord {
    pub const fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    pub const fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            alt: false,
            shift: false,
        }
    }

    /// Control plus a lowercase `z`, with no other modifier.
    pub fn is_undo(&self) -> bool {
        self.ctrl && !self.alt && !self.shift && self.key == 'z'
    }
}

/// Whether the widget took a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled; the default action must not run.
    Consumed,
    Ignored,
}

/// Result of delivering a change notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Arrived while another operation was running.
    Suppressed,
    /// This engine caused the change.
    Echo,
    /// Not a `change:colors` notice for this engine's subscription.
    Unrelated,
    /// Controllers were refreshed; holds how many.
    Refreshed(usize),
}

/// Orchestrates controllers, history and the host.
#[derive(Debug)]
pub struct SyncEngine<P> {
    id: WidgetId,
    colors: ColorList,
    controllers: Vec<SwatchController<P>>,
    history: HistoryStack,
    hovered: bool,
    phase: EnginePhase,
    next_seq: u64,
    subscription: Option<SubscriptionId>,
}

impl<P: ColorPicker> SyncEngine<P> {
    /// Build controllers from the host's colors and subscribe to
    /// `change:colors`.
    ///
    /// `make_picker` is called once per swatch with its index and initial
    /// color. A zero history length falls back to the default.
    pub fn mount<H, F>(host: &mut H, mut make_picker: F) -> Self
    where
        H: HostBinding,
        F: FnMut(usize, &str) -> P,
    {
        let colors = ColorList::new(host.colors());
        let capacity = NonZeroUsize::new(host.history_length()).unwrap_or(DEFAULT_HISTORY_LENGTH);
        let controllers = colors
            .read()
            .iter()
            .enumerate()
            .map(|(index, color)| SwatchController::new(index, color, make_picker(index, color)))
            .collect();
        let subscription = host.on(HostEvent::Change(ModelKey::Colors));
        let id = WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed));

        debug!(
            widget = id.0,
            swatches = colors.len(),
            history = capacity.get(),
            "Swatch widget mounted"
        );

        Self {
            id,
            colors,
            controllers,
            history: HistoryStack::new(capacity),
            hovered: false,
            phase: EnginePhase::Idle,
            next_seq: 0,
            subscription: Some(subscription),
        }
    }

    /// Drop the host subscription. Further notices are ignored.
    pub fn teardown<H: HostBinding>(&mut self, host: &mut H) {
        if let Some(subscription) = self.subscription.take() {
            host.off(subscription);
            debug!(widget = self.id.0, "Swatch widget torn down");
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn colors(&self) -> &[String] {
        self.colors.read()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[SwatchController<P>] {
        &self.controllers
    }

    pub fn controller(&self, index: usize) -> Option<&SwatchController<P>> {
        self.controllers.get(index)
    }

    pub fn controller_mut(&mut self, index: usize) -> Option<&mut SwatchController<P>> {
        self.controllers.get_mut(index)
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Open the picker for `index` and close every other one.
    pub fn open_picker(&mut self, index: usize) {
        for controller in &mut self.controllers {
            if controller.index() == index {
                controller.open();
            } else {
                controller.close();
            }
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// User commit path: snapshot, replace, notify, update the swatch.
    ///
    /// Empty payloads and out-of-range indices are dropped without touching
    /// history. Returns whether the list was mutated.
    #[instrument(level = "debug", skip(self, host), fields(widget = self.id.0))]
    pub fn commit<H: HostBinding>(
        &mut self,
        host: &mut H,
        index: usize,
        color: Option<&str>,
    ) -> bool {
        let Some(color) = color.filter(|c| !c.trim().is_empty()) else {
            debug!("Ignoring commit without a color");
            return false;
        };
        let Some(next) = self.colors.with_color(index, color) else {
            debug!(len = self.colors.len(), "Ignoring commit for a missing swatch");
            return false;
        };

        self.history.push_snapshot(self.colors.read());

        self.phase = EnginePhase::InternalMutation;
        self.replace_and_notify(host, next);
        if let Some(controller) = self.controllers.get_mut(index) {
            controller.apply_color(color, false);
            // The picker already holds `color`; anything it queued is an echo.
            controller.picker_mut().take_events();
        }
        self.phase = EnginePhase::Idle;

        debug!(history = self.history.len(), "Committed swatch color");
        true
    }

    /// Drain every picker and run the commit path for each save.
    /// Returns the number of commits applied.
    pub fn pump_pickers<H: HostBinding>(&mut self, host: &mut H) -> usize {
        if self.phase != EnginePhase::Idle {
            for controller in &mut self.controllers {
                controller.picker_mut().take_events();
            }
            return 0;
        }
        let commits: Vec<SwatchCommit> = self
            .controllers
            .iter_mut()
            .flat_map(SwatchController::drain_commits)
            .collect();
        let mut applied = 0;
        for commit in commits {
            if self.commit(host, commit.index, Some(&commit.color)) {
                applied += 1;
            }
        }
        applied
    }

    /// External change path: refresh controllers from the host's list.
    ///
    /// Refreshes index by index up to the shorter of the host list and the
    /// controller count. Never touches history or the host.
    #[instrument(level = "trace", skip(self, host, notice), fields(widget = self.id.0))]
    pub fn on_host_change<H: HostBinding>(
        &mut self,
        host: &H,
        notice: &ChangeNotice,
    ) -> RefreshOutcome {
        if self.subscription != Some(notice.subscription)
            || notice.event != HostEvent::Change(ModelKey::Colors)
        {
            return RefreshOutcome::Unrelated;
        }
        if self.phase != EnginePhase::Idle {
            trace!(phase = ?self.phase, "Change notice while busy");
            return RefreshOutcome::Suppressed;
        }
        if let Origin::Widget(token) = notice.origin
            && token.widget == self.id
        {
            trace!(seq = token.seq, "Dropping own echo");
            return RefreshOutcome::Echo;
        }

        self.phase = EnginePhase::ExternalRefresh;
        let incoming = host.colors();
        if incoming.len() != self.controllers.len() {
            warn!(
                incoming = incoming.len(),
                swatches = self.controllers.len(),
                "External color list length differs; refreshing overlap only"
            );
        }
        let mut refreshed = 0;
        for (controller, color) in self.controllers.iter_mut().zip(&incoming) {
            controller.apply_color(color, true);
            refreshed += 1;
        }
        self.colors.overlay(&incoming);
        self.phase = EnginePhase::Idle;

        debug!(refreshed, "Refreshed swatches from host");
        RefreshOutcome::Refreshed(refreshed)
    }

    /// Undo path: restore the newest snapshot. No-op on empty history.
    #[instrument(level = "debug", skip(self, host), fields(widget = self.id.0))]
    pub fn undo<H: HostBinding>(&mut self, host: &mut H) -> bool {
        let Some(snapshot) = self.history.pop_snapshot() else {
            debug!("Nothing to undo");
            return false;
        };

        self.phase = EnginePhase::InternalMutation;
        self.replace_and_notify(host, snapshot.clone());
        for (controller, color) in self.controllers.iter_mut().zip(&snapshot) {
            controller.apply_color(color, true);
        }
        self.phase = EnginePhase::Idle;

        debug!(remaining = self.history.len(), "Undid last commit");
        true
    }

    /// Run the undo shortcut if the pointer is over the widget.
    pub fn handle_key<H: HostBinding>(&mut self, host: &mut H, chord: KeyChord) -> KeyOutcome {
        if !self.hovered || !chord.is_undo() {
            return KeyOutcome::Ignored;
        }
        self.undo(host);
        KeyOutcome::Consumed
    }

    fn replace_and_notify<H: HostBinding>(&mut self, host: &mut H, next: Vec<String>) {
        if let Err(e) = self.colors.replace(next.clone()) {
            warn!(error = %e, "Dropping replacement");
            return;
        }
        let token = MutationToken {
            widget: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        host.set(ModelKey::Colors, ModelValue::Colors(next));
        host.save_changes(Origin::Widget(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LocalHost;
    use crate::picker::{HsvPicker, PickerEvent};

    /// Picker that records how it was driven.
    #[derive(Debug, Default)]
    struct RecordingPicker {
        selection: Option<String>,
        silent_sets: usize,
        loud_sets: usize,
        open: bool,
        events: Vec<PickerEvent>,
    }

    impl ColorPicker for RecordingPicker {
        fn selection(&self) -> Option<String> {
            self.selection.clone()
        }

        fn set_color(&mut self, color: &str, silent: bool) -> bool {
            self.selection = Some(color.to_string());
            if silent {
                self.silent_sets += 1;
            } else {
                self.loud_sets += 1;
                self.events.push(PickerEvent::Save(self.selection.clone()));
            }
            true
        }

        fn save(&mut self) {
            self.events.push(PickerEvent::Save(self.selection.clone()));
        }

        fn show(&mut self) {
            self.open = true;
        }

        fn hide(&mut self) {
            self.open = false;
        }

        fn is_open(&self) -> bool {
            self.open
        }

        fn take_events(&mut self) -> Vec<PickerEvent> {
            std::mem::take(&mut self.events)
        }
    }

    fn colors(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| (*c).to_string()).collect()
    }

    fn mount(list: &[&str], history_length: usize) -> (LocalHost, SyncEngine<RecordingPicker>) {
        let mut host = LocalHost::new(colors(list), history_length);
        let engine = SyncEngine::mount(&mut host, |_, color| RecordingPicker {
            selection: Some(color.to_string()),
            ..Default::default()
        });
        (host, engine)
    }

    fn deliver(
        host: &mut LocalHost,
        engine: &mut SyncEngine<RecordingPicker>,
    ) -> Vec<RefreshOutcome> {
        host.take_notices()
            .iter()
            .map(|notice| engine.on_host_change(&*host, notice))
            .collect()
    }

    #[test]
    fn mount_builds_one_controller_per_color() {
        let (host, engine) = mount(&["#111111", "#222222", "#333333"], 5);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.history().capacity(), 5);
        assert_eq!(host.subscription_count(), 1);
        assert_eq!(engine.controller(2).unwrap().visual().label, "#333333");
    }

    #[test]
    fn zero_history_length_uses_default() {
        let (_, engine) = mount(&["#111111"], 0);
        assert_eq!(engine.history().capacity(), 10);
    }

    #[test]
    fn commit_changes_only_its_index() {
        let (mut host, mut engine) = mount(&["#111111", "#222222", "#333333"], 10);
        assert!(engine.commit(&mut host, 1, Some("#ABCDEF")));
        assert_eq!(engine.colors(), ["#111111", "#ABCDEF", "#333333"]);
        assert_eq!(host.colors(), ["#111111", "#ABCDEF", "#333333"]);
        assert_eq!(engine.controller(1).unwrap().visual().background, "#ABCDEF");
        assert_eq!(engine.controller(0).unwrap().color(), "#111111");
    }

    #[test]
    fn commit_pushes_pre_mutation_snapshot() {
        let (mut host, mut engine) = mount(&["#111111", "#222222"], 10);
        engine.commit(&mut host, 0, Some("#333333"));
        let snapshots: Vec<&[String]> = engine.history().iter().collect();
        assert_eq!(snapshots, [&colors(&["#111111", "#222222"])[..]]);
    }

    #[test]
    fn commit_echo_is_dropped() {
        let (mut host, mut engine) = mount(&["#111111", "#222222"], 10);
        engine.commit(&mut host, 0, Some("#333333"));
        assert_eq!(deliver(&mut host, &mut engine), [RefreshOutcome::Echo]);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn empty_payload_is_ignored() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        assert!(!engine.commit(&mut host, 0, None));
        assert!(!engine.commit(&mut host, 0, Some("  ")));
        assert!(engine.history().is_empty());
        assert_eq!(host.colors(), ["#111111"]);
        assert_eq!(host.pending_notices(), 0);
    }

    #[test]
    fn out_of_range_commit_is_ignored() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        assert!(!engine.commit(&mut host, 4, Some("#222222")));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn history_evicts_oldest_beyond_capacity() {
        let (mut host, mut engine) = mount(&["#000000"], 3);
        for color in ["#000001", "#000002", "#000003", "#000004", "#000005"] {
            engine.commit(&mut host, 0, Some(color));
        }
        let kept: Vec<String> = engine.history().iter().map(|s| s[0].clone()).collect();
        assert_eq!(kept, ["#000002", "#000003", "#000004"]);
    }

    #[test]
    fn external_change_refreshes_silently_once() {
        let (mut host, mut engine) = mount(&["#111111", "#222222"], 10);
        host.set_colors_external(colors(&["#AAAAAA", "#BBBBBB"]));

        assert_eq!(deliver(&mut host, &mut engine), [RefreshOutcome::Refreshed(2)]);
        assert_eq!(engine.phase(), EnginePhase::Idle);
        assert_eq!(engine.colors(), ["#AAAAAA", "#BBBBBB"]);
        for controller in engine.controllers() {
            assert_eq!(controller.picker().silent_sets, 1);
            assert_eq!(controller.picker().loud_sets, 0);
        }
        assert!(engine.history().is_empty());
        assert_eq!(host.pending_notices(), 0);
        assert_eq!(engine.pump_pickers(&mut host), 0);
    }

    #[test]
    fn shorter_external_list_refreshes_overlap() {
        let (mut host, mut engine) = mount(&["#111111", "#222222", "#333333"], 10);
        host.set_colors_external(colors(&["#AAAAAA"]));
        assert_eq!(deliver(&mut host, &mut engine), [RefreshOutcome::Refreshed(1)]);
        assert_eq!(engine.colors(), ["#AAAAAA", "#222222", "#333333"]);
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn longer_external_list_is_truncated_to_swatches() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        host.set_colors_external(colors(&["#AAAAAA", "#BBBBBB"]));
        assert_eq!(deliver(&mut host, &mut engine), [RefreshOutcome::Refreshed(1)]);
        assert_eq!(engine.colors(), ["#AAAAAA"]);
    }

    #[test]
    fn notices_during_internal_mutation_are_suppressed() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        host.set_colors_external(colors(&["#AAAAAA"]));
        let notices = host.take_notices();
        for busy in [EnginePhase::InternalMutation, EnginePhase::ExternalRefresh] {
            engine.phase = busy;
            assert_eq!(
                engine.on_host_change(&host, &notices[0]),
                RefreshOutcome::Suppressed
            );
        }
        engine.phase = EnginePhase::Idle;
        assert_eq!(
            engine.on_host_change(&host, &notices[0]),
            RefreshOutcome::Refreshed(1)
        );
    }

    #[test]
    fn another_widget_on_the_same_host_is_refreshed() {
        let mut host = LocalHost::new(colors(&["#111111", "#222222"]), 10);
        let mut left = SyncEngine::mount(&mut host, |_, c| HsvPicker::create(c));
        let mut right = SyncEngine::mount(&mut host, |_, c| HsvPicker::create(c));
        assert_ne!(left.id(), right.id());

        left.commit(&mut host, 0, Some("#333333"));
        let outcomes: Vec<_> = host
            .take_notices()
            .iter()
            .map(|n| (left.on_host_change(&host, n), right.on_host_change(&host, n)))
            .collect();

        assert!(outcomes.contains(&(RefreshOutcome::Echo, RefreshOutcome::Unrelated)));
        assert!(outcomes.contains(&(RefreshOutcome::Unrelated, RefreshOutcome::Refreshed(2))));
        assert_eq!(right.colors(), ["#333333", "#222222"]);
        assert!(right.history().is_empty());
    }

    #[test]
    fn undo_restores_and_walks_backward() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        engine.commit(&mut host, 0, Some("#222222"));
        engine.commit(&mut host, 0, Some("#333333"));

        assert!(engine.undo(&mut host));
        assert_eq!(host.colors(), ["#222222"]);
        assert_eq!(engine.controller(0).unwrap().visual().label, "#222222");
        assert!(engine.undo(&mut host));
        assert_eq!(host.colors(), ["#111111"]);
        assert!(!engine.undo(&mut host));
        assert_eq!(host.colors(), ["#111111"]);
    }

    #[test]
    fn undo_applies_silently_and_does_not_grow_history() {
        let (mut host, mut engine) = mount(&["#111111", "#222222"], 10);
        engine.commit(&mut host, 1, Some("#999999"));
        host.take_notices();
        let loud_before = engine.controller(1).unwrap().picker().loud_sets;

        engine.undo(&mut host);
        assert_eq!(engine.controller(1).unwrap().picker().loud_sets, loud_before);
        assert_eq!(engine.pump_pickers(&mut host), 0);
        assert!(engine.history().is_empty());
        assert_eq!(deliver(&mut host, &mut engine), [RefreshOutcome::Echo]);
    }

    #[test]
    fn shortcut_requires_hover_and_ctrl_z() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        engine.commit(&mut host, 0, Some("#222222"));

        assert_eq!(
            engine.handle_key(&mut host, KeyChord::ctrl('z')),
            KeyOutcome::Ignored
        );
        assert_eq!(host.colors(), ["#222222"]);

        engine.pointer_enter();
        assert_eq!(
            engine.handle_key(&mut host, KeyChord::plain('z')),
            KeyOutcome::Ignored
        );
        let shifted = KeyChord {
            shift: true,
            ..KeyChord::ctrl('Z')
        };
        let alt = KeyChord {
            alt: true,
            ..KeyChord::ctrl('z')
        };
        for chord in [shifted, alt, KeyChord::ctrl('Z')] {
            assert_eq!(engine.handle_key(&mut host, chord), KeyOutcome::Ignored);
        }
        assert_eq!(host.colors(), ["#222222"]);
        assert_eq!(
            engine.handle_key(&mut host, KeyChord::ctrl('y')),
            KeyOutcome::Ignored
        );
        assert_eq!(
            engine.handle_key(&mut host, KeyChord::ctrl('z')),
            KeyOutcome::Consumed
        );
        assert_eq!(host.colors(), ["#111111"]);

        // Still consumed with nothing left to undo.
        assert_eq!(
            engine.handle_key(&mut host, KeyChord::ctrl('z')),
            KeyOutcome::Consumed
        );

        engine.pointer_leave();
        assert_eq!(
            engine.handle_key(&mut host, KeyChord::ctrl('z')),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn picker_save_flows_through_commit_path() {
        let mut host = LocalHost::new(colors(&["#FF0000", "#00FF00"]), 10);
        let mut engine = SyncEngine::mount(&mut host, |_, c| HsvPicker::create(c));

        let picker = engine.controller_mut(1).unwrap().picker_mut();
        let mut values = picker.values();
        values.hue = 240.0;
        picker.adjust(values);
        picker.save();

        assert_eq!(engine.pump_pickers(&mut host), 1);
        assert_eq!(host.colors(), ["#FF0000", "#0000FF"]);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn teardown_unsubscribes() {
        let (mut host, mut engine) = mount(&["#111111"], 10);
        engine.teardown(&mut host);
        assert_eq!(host.subscription_count(), 0);
        host.set_colors_external(colors(&["#AAAAAA"]));
        assert!(deliver(&mut host, &mut engine).is_empty());
    }
}
