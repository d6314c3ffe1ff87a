//! Sample plot data: one offset sine curve per palette color.

use std::f64::consts::TAU;

/// Number of samples across one period.
pub const SAMPLES: usize = 360;

pub const TITLE: &str = "Color Theme Test";
pub const X_LABEL: &str = "θ [rad]";
pub const Y_LABEL: &str = "y";

/// One curve and the color it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

/// Curves for a palette preview, in palette order.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePlot {
    pub series: Vec<Series>,
}

impl SamplePlot {
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, TAU]
    }

    /// Curve `i` spans `i - 1 ..= i + 1`.
    pub fn y_bounds(&self) -> [f64; 2] {
        [-1.0, self.series.len().max(1) as f64]
    }
}

/// `samples` evenly spaced points over `[0, 2π]`, endpoints included.
pub fn linspace(samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| TAU * i as f64 / (n - 1) as f64).collect(),
    }
}

/// Curve `i` is `y = i + sin(x)`.
pub fn sample_plot(colors: &[String]) -> SamplePlot {
    let xs = linspace(SAMPLES);
    let series = colors
        .iter()
        .enumerate()
        .map(|(i, color)| Series {
            color: color.clone(),
            points: xs.iter().map(|&x| (x, i as f64 + x.sin())).collect(),
        })
        .collect();
    SamplePlot { series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(SAMPLES);
        assert_eq!(xs.len(), SAMPLES);
        assert_relative_eq!(xs[0], 0.0);
        assert_relative_eq!(xs[SAMPLES - 1], TAU);
    }

    #[test]
    fn curves_are_offset_by_index() {
        let colors = vec!["#111111".to_string(), "#222222".to_string()];
        let plot = sample_plot(&colors);
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[1].color, "#222222");

        let quarter = SAMPLES / 4;
        let (x, y) = plot.series[1].points[quarter];
        assert_relative_eq!(y, 1.0 + x.sin());
        assert_relative_eq!(plot.series[0].points[0].1, 0.0);
        assert_eq!(plot.y_bounds(), [-1.0, 2.0]);
    }
}
