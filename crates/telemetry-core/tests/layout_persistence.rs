// File: crates/telemetry-core/tests/layout_persistence.rs
// Purpose: Saving and loading chart layouts, including fatal defects that abort a load.

use telemetry_core::charts::{export_charts, import_charts, AnyChart};
use telemetry_core::config::Shared;
use telemetry_core::{Chart, ChartKind, DatasetRegistry, LayoutError, LineQueue, MemoryDataset, Rgba};

fn registry() -> DatasetRegistry {
    let mut registry = DatasetRegistry::new();
    registry.register(MemoryDataset::new("Pump", "state"));
    registry.register(MemoryDataset::new("Valve", "state"));
    registry
}

fn indicator(chart: &AnyChart) -> &telemetry_core::charts::IndicatorChart {
    match chart {
        AnyChart::Indicator(c) => c,
        AnyChart::PlanPosition(_) => panic!("expected an indicator"),
    }
}

#[test]
fn edited_layout_survives_a_save_and_load() {
    let datasets = registry();
    let mut chart = ChartKind::Indicator.create(&datasets);
    let layout = chart.layout_mut();
    assert!(layout.edit("Dataset", "valve"));
    assert!(layout.edit("Label if on", "Open"));
    assert!(layout.edit("Background color if off", "0x336699FF"));
    assert!(layout.edit("Decimal places", "2"));

    let saved = export_charts([&chart]);
    assert_eq!(saved[0], "chart type = Indicator");
    assert!(saved.contains(&"dataset = Valve".to_string()));

    let restored = import_charts(&mut LineQueue::from_lines(saved.clone()), &datasets).unwrap();
    let settings = indicator(&restored[0]).settings();
    assert_eq!(settings.dataset.get(), "Valve");
    assert_eq!(settings.on_label.get(), "Open");
    assert_eq!(settings.off_background.get(), Rgba::rgb(0x33, 0x66, 0x99));
    assert_eq!(settings.precision.get(), 2);
    assert_eq!(export_charts(&restored), saved);
}

#[test]
fn live_edit_clamps_but_persisted_value_is_fatal() {
    let datasets = registry();
    let mut chart = ChartKind::Indicator.create(&datasets);
    chart.layout_mut().edit("Decimal places", "7");
    assert_eq!(indicator(&chart).settings().precision.get(), 6);

    let mut saved = export_charts([&chart]);
    let line = saved.iter().position(|l| l.starts_with("decimal places")).unwrap();
    saved[line] = "decimal places = 7".to_string();
    match import_charts(&mut LineQueue::from_lines(saved), &datasets) {
        Err(LayoutError::OutOfRange { line: n, key, .. }) => {
            assert_eq!(n, line + 1);
            assert_eq!(key, "decimal places");
        }
        other => panic!("unexpected {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn defective_layout_leaves_chart_untouched() {
    let datasets = registry();
    let mut chart = ChartKind::Indicator.create(&datasets);
    let before = chart.layout().export_state();

    let mut lines: Vec<String> = before.clone();
    lines[0] = "dataset = Valve".to_string();
    lines[4] = "foreground color if on = #FFFFFF".to_string();
    let err = chart.layout_mut().import_state(&mut LineQueue::from_lines(lines)).unwrap_err();
    assert!(matches!(err, LayoutError::Malformed { line: 5, .. }));
    assert_eq!(chart.layout().export_state(), before);
    assert_eq!(indicator(&chart).settings().dataset.get(), "Pump");
}

#[test]
fn unknown_dataset_and_mismatched_keys_are_rejected() {
    let datasets = registry();
    let mut saved = export_charts([&ChartKind::Indicator.create(&datasets)]);
    saved[1] = "dataset = Compressor".to_string();
    assert!(matches!(
        import_charts(&mut LineQueue::from_lines(saved.clone()), &datasets),
        Err(LayoutError::OutOfRange { line: 2, .. })
    ));

    saved[1] = "data set = Pump".to_string();
    assert!(matches!(
        import_charts(&mut LineQueue::from_lines(saved), &datasets),
        Err(LayoutError::KeyMismatch { line: 2, .. })
    ));
}

#[test]
fn truncated_layout_reports_missing_field() {
    let datasets = registry();
    let mut saved = export_charts([&ChartKind::PlanPosition.create(&datasets)]);
    saved.pop();
    match import_charts(&mut LineQueue::from_lines(saved), &datasets) {
        Err(LayoutError::UnexpectedEnd { key }) => assert_eq!(key, "show label"),
        other => panic!("unexpected {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn multi_line_label_cannot_break_a_saved_layout() {
    let datasets = registry();
    let mut chart = ChartKind::Indicator.create(&datasets);
    chart.layout_mut().edit("Chart label", "Pump\nA");
    chart.layout_mut().edit("Label if on", "Run\r");
    assert_eq!(indicator(&chart).settings().chart_label.get(), "Data");
    assert_eq!(indicator(&chart).settings().on_label.get(), "Run");

    let saved = export_charts([&chart]);
    assert_eq!(saved.len(), 1 + chart.layout().field_count());
    let text = saved.join("\n");
    let restored = import_charts(&mut LineQueue::from_text(&text), &datasets).unwrap();
    assert_eq!(export_charts(&restored), saved);
}
