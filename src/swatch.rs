//! One swatch: a visual color patch, its text label, and its picker.

use tracing::debug;

use crate::picker::{ColorPicker, PickerEvent};

/// What the swatch currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchVisual {
    pub background: String,
    pub label: String,
}

/// A user-confirmed color for one swatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchCommit {
    pub index: usize,
    pub color: String,
}

/// Keeps one swatch's visuals and picker consistent with a single color.
#[derive(Debug)]
pub struct SwatchController<P> {
    index: usize,
    color: String,
    visual: SwatchVisual,
    picker: P,
}

impl<P: ColorPicker> SwatchController<P> {
    /// The picker is created once here, bound to `color`, and lives as long
    /// as the controller.
    pub fn new(index: usize, color: &str, picker: P) -> Self {
        Self {
            index,
            color: color.to_string(),
            visual: SwatchVisual {
                background: color.to_string(),
                label: color.to_string(),
            },
            picker,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn visual(&self) -> &SwatchVisual {
        &self.visual
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    /// Show `color` on the swatch, its label and its picker.
    ///
    /// With `silent` the picker queues no events. A picker already showing
    /// `color` is left alone.
    pub fn apply_color(&mut self, color: &str, silent: bool) {
        self.color = color.to_string();
        self.visual.background = color.to_string();
        self.visual.label = color.to_string();
        if self.picker.selection().as_deref() != Some(color) {
            self.picker.set_color(color, silent);
        }
    }

    pub fn open(&mut self) {
        self.picker.show();
    }

    pub fn close(&mut self) {
        self.picker.hide();
    }

    pub fn is_open(&self) -> bool {
        self.picker.is_open()
    }

    /// Revert the picker's working selection to the applied color and close.
    pub fn cancel(&mut self) {
        let color = self.color.clone();
        self.picker.set_color(&color, true);
        self.picker.hide();
    }

    /// Drain picker events, turning saves into commits.
    pub fn drain_commits(&mut self) -> Vec<SwatchCommit> {
        self.picker
            .take_events()
            .into_iter()
            .filter_map(|event| self.handle_picker_event(event))
            .collect()
    }

    /// A save with a non-empty payload becomes a commit; every save closes
    /// the picker.
    pub fn handle_picker_event(&mut self, event: PickerEvent) -> Option<SwatchCommit> {
        let PickerEvent::Save(payload) = event else {
            return None;
        };
        self.picker.hide();
        match payload {
            Some(color) if !color.trim().is_empty() => Some(SwatchCommit {
                index: self.index,
                color,
            }),
            _ => {
                debug!(index = self.index, "Dropping save without a color");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::HsvPicker;

    fn controller(color: &str) -> SwatchController<HsvPicker> {
        SwatchController::new(0, color, HsvPicker::create(color))
    }

    #[test]
    fn apply_updates_all_three_views() {
        let mut swatch = controller("#111111");
        swatch.apply_color("#ABCDEF", true);
        assert_eq!(swatch.color(), "#ABCDEF");
        assert_eq!(swatch.visual().background, "#ABCDEF");
        assert_eq!(swatch.visual().label, "#ABCDEF");
        assert_eq!(swatch.picker().selection().as_deref(), Some("#ABCDEF"));
    }

    #[test]
    fn silent_apply_never_commits() {
        let mut swatch = controller("#111111");
        for color in ["#222222", "#333333", "#444444"] {
            swatch.apply_color(color, true);
        }
        assert!(swatch.drain_commits().is_empty());
    }

    #[test]
    fn loud_apply_of_a_new_color_commits() {
        let mut swatch = controller("#111111");
        swatch.apply_color("#222222", false);
        assert_eq!(
            swatch.drain_commits(),
            [SwatchCommit {
                index: 0,
                color: "#222222".into()
            }]
        );
    }

    #[test]
    fn apply_matching_picker_selection_leaves_picker_alone() {
        let mut swatch = controller("#111111");
        swatch.apply_color("#111111", false);
        assert!(swatch.drain_commits().is_empty());
    }

    #[test]
    fn save_commits_and_closes() {
        let mut swatch = controller("#111111");
        swatch.open();
        swatch.picker_mut().save();
        let commits = swatch.drain_commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].color, "#111111");
        assert!(!swatch.is_open());
    }

    #[test]
    fn empty_save_payload_is_dropped() {
        let mut swatch = controller("#111111");
        assert!(swatch.handle_picker_event(PickerEvent::Save(None)).is_none());
        assert!(
            swatch
                .handle_picker_event(PickerEvent::Save(Some(String::new())))
                .is_none()
        );
    }

    #[test]
    fn cancel_reverts_working_selection() {
        let mut swatch = controller("#FF0000");
        swatch.open();
        let mut values = swatch.picker().values();
        values.hue = 240.0;
        swatch.picker_mut().adjust(values);
        swatch.cancel();
        assert_eq!(swatch.picker().selection().as_deref(), Some("#FF0000"));
        assert!(!swatch.is_open());
        assert!(swatch.drain_commits().is_empty());
    }
}
