//! Color picker abstraction and the hue/saturation/value picker.
//!
//! A picker holds a working selection that the user adjusts freely. Only an
//! explicit save produces a [`PickerEvent::Save`]; intermediate adjustments
//! produce [`PickerEvent::Change`].

use palette::{FromColor, Hsv, Srgb};

use crate::color::{parse_color, to_hexa};

/// Events a picker queues for its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// The working selection moved (drag, slider step). Not a commit.
    Change(String),
    /// The user confirmed a color. `None` when the picker had no color.
    Save(Option<String>),
    Show,
    Hide,
}

/// Operations the swatch controller needs from a picker.
pub trait ColorPicker {
    /// Canonical serialization of the working selection.
    fn selection(&self) -> Option<String>;

    /// Parse and select `color`. A non-silent set also applies the color,
    /// which queues a [`PickerEvent::Save`]. Returns `false` when `color`
    /// cannot be parsed; the selection is then unchanged.
    fn set_color(&mut self, color: &str, silent: bool) -> bool;

    /// Confirm the working selection.
    fn save(&mut self);

    fn show(&mut self);

    fn hide(&mut self);

    fn is_open(&self) -> bool;

    fn take_events(&mut self) -> Vec<PickerEvent>;
}

/// Hue in degrees, saturation and value in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvValues {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl HsvValues {
    pub fn from_srgb(rgb: Srgb<u8>) -> Self {
        let hsv: Hsv = Hsv::from_color(rgb.into_format::<f32>());
        Self {
            hue: hsv.hue.into_positive_degrees(),
            saturation: hsv.saturation,
            value: hsv.value,
        }
    }

    pub fn to_srgb(self) -> Srgb<u8> {
        let hsv: Hsv = Hsv::new(self.hue, self.saturation, self.value);
        Srgb::<f32>::from_color(hsv).into_format::<u8>()
    }

    /// Clamp saturation/value and wrap hue into `0..360`.
    pub fn normalized(self) -> Self {
        Self {
            hue: self.hue.rem_euclid(360.0),
            saturation: self.saturation.clamp(0.0, 1.0),
            value: self.value.clamp(0.0, 1.0),
        }
    }
}

/// Picker with hue, saturation and value channels.
#[derive(Debug, Clone)]
pub struct HsvPicker {
    values: HsvValues,
    alpha: f32,
    open: bool,
    events: Vec<PickerEvent>,
}

impl HsvPicker {
    /// Create a picker bound to `default`. Unparsable defaults select black.
    pub fn create(default: &str) -> Self {
        let mut picker = Self {
            values: HsvValues::default(),
            alpha: 1.0,
            open: false,
            events: Vec::new(),
        };
        picker.set_color(default, true);
        picker
    }

    pub fn values(&self) -> HsvValues {
        self.values
    }

    /// Move the working selection without committing it.
    pub fn adjust(&mut self, values: HsvValues) {
        let values = values.normalized();
        if values == self.values {
            return;
        }
        self.values = values;
        self.events.push(PickerEvent::Change(self.hexa()));
    }

    fn hexa(&self) -> String {
        to_hexa(self.values.to_srgb(), self.alpha)
    }
}

impl ColorPicker for HsvPicker {
    fn selection(&self) -> Option<String> {
        Some(self.hexa())
    }

    fn set_color(&mut self, color: &str, silent: bool) -> bool {
        let Ok((rgb, alpha)) = parse_color(color) else {
            return false;
        };
        self.values = HsvValues::from_srgb(rgb);
        self.alpha = alpha;
        if !silent {
            self.events.push(PickerEvent::Save(self.selection()));
        }
        true
    }

    fn save(&mut self) {
        self.events.push(PickerEvent::Save(self.selection()));
    }

    fn show(&mut self) {
        if !self.open {
            self.open = true;
            self.events.push(PickerEvent::Show);
        }
    }

    fn hide(&mut self) {
        if self.open {
            self.open = false;
            self.events.push(PickerEvent::Hide);
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn take_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }
}
