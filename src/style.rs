//! Matplotlib style output derived from the current colors.

use serde::Serialize;

/// Machine-readable summary of a palette's style output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleReport {
    pub colors: Vec<String>,
    pub prop_cycle: String,
}

impl StyleReport {
    pub fn new(colors: &[String]) -> Self {
        Self {
            colors: colors.to_vec(),
            prop_cycle: prop_cycle(colors),
        }
    }
}

/// The `axes.prop_cycle` rc line for `colors`, leading `#` stripped.
///
/// ```
/// let colors = vec!["#335791".to_string(), "#db4e4e".to_string()];
/// assert_eq!(
///     swatches::style::prop_cycle(&colors),
///     "axes.prop_cycle: cycler('color', ['335791', 'db4e4e'])"
/// );
/// ```
pub fn prop_cycle(colors: &[String]) -> String {
    format!("axes.prop_cycle: cycler('color', {})", hex_codes(colors))
}

/// Contents of a `.mplstyle` file carrying the color cycle.
pub fn mplstyle(colors: &[String]) -> String {
    format!(
        "# Generated by swatches ({} colors)\n{}\n",
        colors.len(),
        prop_cycle(colors)
    )
}

/// Python list rendering of the hex codes, e.g. `['335791', 'db4e4e']`.
fn hex_codes(colors: &[String]) -> String {
    let quoted: Vec<String> = colors
        .iter()
        .map(|c| format!("'{}'", c.trim_start_matches('#')))
        .collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn strips_every_leading_hash() {
        assert_eq!(
            prop_cycle(&colors(&["##abc", "def"])),
            "axes.prop_cycle: cycler('color', ['abc', 'def'])"
        );
    }

    #[test]
    fn empty_list_renders_empty_cycle() {
        assert_eq!(prop_cycle(&[]), "axes.prop_cycle: cycler('color', [])");
    }

    #[test]
    fn mplstyle_ends_with_newline() {
        let text = mplstyle(&colors(&["#335791"]));
        assert!(text.ends_with("['335791'])\n"));
        assert!(text.starts_with('#'));
    }
}
