//! Boundary between a swatch widget and the model that owns its data.
//!
//! The host is the system of record. A widget reads and stages values
//! through [`HostBinding`], commits them with `save_changes`, and learns
//! about changes through queued [`ChangeNotice`]s.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use crate::color_list::DEFAULT_COLOR;
use crate::history::DEFAULT_HISTORY_LENGTH;

/// Errors from parsing host key and event names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("unknown model key '{0}'")]
    UnknownKey(String),
    #[error("unknown host event '{0}'")]
    UnknownEvent(String),
}

/// The keys a swatch widget syncs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKey {
    Colors,
    HistoryLength,
}

impl ModelKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Colors => "colors",
            Self::HistoryLength => "history_length",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colors" => Ok(Self::Colors),
            "history_length" => Ok(Self::HistoryLength),
            other => Err(HostError::UnknownKey(other.to_string())),
        }
    }
}

/// A typed value for one of the [`ModelKey`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValue {
    Colors(Vec<String>),
    HistoryLength(usize),
}

impl ModelValue {
    pub fn key(&self) -> ModelKey {
        match self {
            Self::Colors(_) => ModelKey::Colors,
            Self::HistoryLength(_) => ModelKey::HistoryLength,
        }
    }
}

/// Events a widget can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Change(ModelKey),
}

impl FromStr for HostEvent {
    type Err = HostError;

    /// Parses `change:<key>`, e.g. `change:colors`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(key) = s.strip_prefix("change:") else {
            return Err(HostError::UnknownEvent(s.to_string()));
        };
        key.parse()
            .map(Self::Change)
            .map_err(|_| HostError::UnknownEvent(s.to_string()))
    }
}

/// Identifies one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

/// Origin token attached to a widget-initiated commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationToken {
    pub widget: WidgetId,
    pub seq: u64,
}

/// Who caused a committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A write from outside any widget (user code, another cell, a reset).
    External,
    /// A write made by a widget; the token comes back in the notice.
    Widget(MutationToken),
}

/// Handle for an active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A queued change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub subscription: SubscriptionId,
    pub event: HostEvent,
    pub origin: Origin,
}

/// Narrow interface to the host model.
pub trait HostBinding {
    /// Current committed value for `key`.
    fn get(&self, key: ModelKey) -> ModelValue;

    /// Stage a value. Values whose type does not match `key` are ignored.
    fn set(&mut self, key: ModelKey, value: ModelValue);

    /// Commit staged values and queue one notice per subscription whose key
    /// changed.
    fn save_changes(&mut self, origin: Origin);

    fn on(&mut self, event: HostEvent) -> SubscriptionId;

    fn off(&mut self, subscription: SubscriptionId);

    /// Drain queued notices in delivery order.
    fn take_notices(&mut self) -> Vec<ChangeNotice>;

    fn colors(&self) -> Vec<String> {
        match self.get(ModelKey::Colors) {
            ModelValue::Colors(colors) => colors,
            ModelValue::HistoryLength(_) => Vec::new(),
        }
    }

    fn history_length(&self) -> usize {
        match self.get(ModelKey::HistoryLength) {
            ModelValue::HistoryLength(n) => n,
            ModelValue::Colors(_) => DEFAULT_HISTORY_LENGTH.get(),
        }
    }
}

/// In-process host model.
#[derive(Debug)]
pub struct LocalHost {
    colors: Vec<String>,
    history_length: usize,
    staged_colors: Option<Vec<String>>,
    staged_history_length: Option<usize>,
    subscriptions: Vec<(SubscriptionId, HostEvent)>,
    notices: VecDeque<ChangeNotice>,
    next_subscription: u64,
}

impl LocalHost {
    pub fn new(colors: Vec<String>, history_length: usize) -> Self {
        Self {
            colors,
            history_length,
            staged_colors: None,
            staged_history_length: None,
            subscriptions: Vec::new(),
            notices: VecDeque::new(),
            next_subscription: 0,
        }
    }

    /// Set and commit the color list from outside any widget.
    pub fn set_colors_external(&mut self, colors: Vec<String>) {
        self.set(ModelKey::Colors, ModelValue::Colors(colors));
        self.save_changes(Origin::External);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    fn queue_change(&mut self, key: ModelKey, origin: Origin) {
        let event = HostEvent::Change(key);
        for (subscription, subscribed) in &self.subscriptions {
            if *subscribed == event {
                self.notices.push_back(ChangeNotice {
                    subscription: *subscription,
                    event,
                    origin,
                });
            }
        }
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new(vec![DEFAULT_COLOR.to_string()], DEFAULT_HISTORY_LENGTH.get())
    }
}

impl HostBinding for LocalHost {
    fn get(&self, key: ModelKey) -> ModelValue {
        match key {
            ModelKey::Colors => ModelValue::Colors(self.colors.clone()),
            ModelKey::HistoryLength => ModelValue::HistoryLength(self.history_length),
        }
    }

    fn set(&mut self, key: ModelKey, value: ModelValue) {
        match (key, value) {
            (ModelKey::Colors, ModelValue::Colors(colors)) => self.staged_colors = Some(colors),
            (ModelKey::HistoryLength, ModelValue::HistoryLength(n)) => {
                self.staged_history_length = Some(n);
            }
            (key, value) => {
                warn!(%key, value_key = %value.key(), "Ignoring value of the wrong type");
            }
        }
    }

    fn save_changes(&mut self, origin: Origin) {
        if let Some(colors) = self.staged_colors.take()
            && colors != self.colors
        {
            self.colors = colors;
            self.queue_change(ModelKey::Colors, origin);
        }
        if let Some(n) = self.staged_history_length.take()
            && n != self.history_length
        {
            self.history_length = n;
            self.queue_change(ModelKey::HistoryLength, origin);
        }
        debug!(?origin, pending = self.notices.len(), "Host changes saved");
    }

    fn on(&mut self, event: HostEvent) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push((id, event));
        id
    }

    fn off(&mut self, subscription: SubscriptionId) {
        self.subscriptions.retain(|(id, _)| *id != subscription);
        self.notices.retain(|n| n.subscription != subscription);
    }

    fn take_notices(&mut self) -> Vec<ChangeNotice> {
        self.notices.drain(..).collect()
    }
}
