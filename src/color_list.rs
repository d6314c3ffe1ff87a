//! The ordered color list a swatch widget edits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color used when a widget is constructed without any colors.
pub const DEFAULT_COLOR: &str = "#335791";

/// Errors from list replacement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorListError {
    #[error("replacement has {actual} colors, list holds {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Initial colors as accepted at construction: a single color or a list.
///
/// Deserializes from either a TOML/JSON string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialColors {
    One(String),
    Many(Vec<String>),
}

impl InitialColors {
    /// Coerce into a list; a single color becomes a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(color) => vec![color],
            Self::Many(colors) => colors,
        }
    }
}

impl Default for InitialColors {
    fn default() -> Self {
        Self::One(DEFAULT_COLOR.to_string())
    }
}

impl From<&str> for InitialColors {
    fn from(color: &str) -> Self {
        Self::One(color.to_string())
    }
}

impl From<Vec<String>> for InitialColors {
    fn from(colors: Vec<String>) -> Self {
        Self::Many(colors)
    }
}

impl From<&[&str]> for InitialColors {
    fn from(colors: &[&str]) -> Self {
        Self::Many(colors.iter().map(|c| (*c).to_string()).collect())
    }
}

/// Fixed-length ordered sequence of color strings.
///
/// Index `i` names the same swatch for the list's lifetime. Every mutation
/// replaces the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorList {
    colors: Vec<String>,
}

impl ColorList {
    pub fn new(colors: impl Into<InitialColors>) -> Self {
        Self {
            colors: colors.into().into_vec(),
        }
    }

    pub fn read(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// Replace the whole sequence. The length must match.
    pub fn replace(&mut self, next: Vec<String>) -> Result<(), ColorListError> {
        if next.len() != self.colors.len() {
            return Err(ColorListError::LengthMismatch {
                expected: self.colors.len(),
                actual: next.len(),
            });
        }
        self.colors = next;
        Ok(())
    }

    /// A copy of the list with `index` set to `color`, or `None` when the
    /// index is out of range.
    pub fn with_color(&self, index: usize, color: &str) -> Option<Vec<String>> {
        if index >= self.colors.len() {
            return None;
        }
        let mut next = self.colors.clone();
        next[index] = color.to_string();
        Some(next)
    }

    /// Copy `next` over the overlapping prefix, keeping this list's length.
    /// Returns how many entries were written.
    pub fn overlay(&mut self, next: &[String]) -> usize {
        let written = next.len().min(self.colors.len());
        let mut next_colors = self.colors.clone();
        next_colors[..written].clone_from_slice(&next[..written]);
        self.colors = next_colors;
        written
    }
}
