//! Snapshot tests for derived style output and the undo walk.
//!
//! Uses insta to capture exact text; these tests detect regressions.

use swatches::config::SwatchConfig;
use swatches::style::{StyleReport, mplstyle};
use swatches::widget::{SwatchWidget, WidgetOptions};

#[test]
fn snapshot_default_palette_mplstyle() {
    let colors = SwatchConfig::default().widget.colors.into_vec();
    insta::assert_snapshot!("default_palette_mplstyle", mplstyle(&colors));
}

#[test]
fn snapshot_style_report_json() {
    let colors = vec!["#335791".to_string(), "#db4e4e".to_string()];
    let json = serde_json::to_string_pretty(&StyleReport::new(&colors)).unwrap();
    insta::assert_snapshot!("style_report_json", json);
}

#[test]
fn snapshot_commit_and_undo_walk() {
    let mut widget = SwatchWidget::with_options(WidgetOptions {
        colors: (&["#111111", "#222222"][..]).into(),
        history_length: 2,
    });

    let mut transcript = Vec::new();
    let mut record = |step: &str, widget: &SwatchWidget<_, _>| {
        transcript.push(format!(
            "{step:<16} colors={:?} history={}",
            widget.colors(),
            widget.engine().history().len()
        ));
    };

    record("mount", &widget);
    widget.commit(0, Some("#333333"));
    record("commit 0", &widget);
    widget.commit(1, Some("#444444"));
    record("commit 1", &widget);
    widget.commit(0, Some("#555555"));
    record("commit 0", &widget);
    for _ in 0..3 {
        widget.undo();
        record("undo", &widget);
    }

    insta::assert_snapshot!("commit_and_undo_walk", transcript.join("\n"));
}
