//! Request flags through to the rendered view

use chrono::NaiveDate;
use evm_charts_calc::ValueUnit;
use evm_charts_cli::{build_view, load_settings, summary_lines, RequestArgs};
use evm_charts_config::EvmSettings;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn dataset() -> NamedTempFile {
    write_file(
        ".json",
        r#"{
  "issues": [
    { "id": 1, "subject": "Plan", "start_date": "2024-01-01", "due_date": "2024-01-10",
      "planned_effort": 80, "done_ratio": 50, "updated_on": "2024-01-05", "tracker_id": 3 },
    { "id": 2, "subject": "Ship", "start_date": "2024-01-11", "due_date": "2024-01-20",
      "planned_effort": 40, "tracker_id": 4 }
  ],
  "costs": [
    { "spent_on": "2024-01-03", "hours": 40, "issue_id": 1 }
  ]
}"#,
    )
}

fn args(dataset: PathBuf) -> RequestArgs {
    RequestArgs {
        dataset,
        basis_date: Some("2024-01-05".to_string()),
        ..RequestArgs::default()
    }
}

#[test]
fn test_flags_become_params() {
    let args = RequestArgs {
        forecast: true,
        tracker: Some("3,4".to_string()),
        etc_method: Some("method3".to_string()),
        ..args(PathBuf::from("unused.json"))
    };
    let params = args.to_params();

    assert_eq!(params.get("basis_date"), Some("2024-01-05"));
    assert_eq!(params.flag("forecast").unwrap(), Some(true));
    assert_eq!(params.flag("display_performance").unwrap(), None);
    assert_eq!(params.ids("selected_tracker_ids").unwrap(), vec![3, 4]);
    assert_eq!(params.get("etc_method"), Some("method3"));
}

#[test]
fn test_settings_supply_defaults() {
    let settings_file = write_file(".toml", "forecast = true\nworking_hours = 4.0\n");
    let settings = load_settings(Some(settings_file.path())).unwrap();
    let dataset = dataset();

    let view = build_view(&args(dataset.path().to_path_buf()), &settings, date(2024, 6, 1)).unwrap();
    assert!(view.chart.bac.iter().any(Option::is_some));
    assert_eq!(view.basis_date, date(2024, 1, 5));
}

#[test]
fn test_missing_settings_file_is_error() {
    let result = load_settings(Some(PathBuf::from("/nonexistent/evm.yaml").as_path()));
    assert!(result.is_err());
    assert_eq!(load_settings(None).unwrap(), EvmSettings::default());
}

#[test]
fn test_invalid_basis_date_is_error() {
    let dataset = dataset();
    let args = RequestArgs {
        basis_date: Some("05/01/2024".to_string()),
        ..args(dataset.path().to_path_buf())
    };
    assert!(build_view(&args, &EvmSettings::default(), date(2024, 6, 1)).is_err());
}

#[test]
fn test_summary_in_days() {
    let dataset = dataset();
    let args = RequestArgs {
        days: true,
        incomplete: true,
        ..args(dataset.path().to_path_buf())
    };
    assert_eq!(args.unit(), ValueUnit::Days);

    let view = build_view(&args, &EvmSettings::default(), date(2024, 6, 1)).unwrap();
    let lines = summary_lines(view.indicators.as_ref().unwrap());

    assert!(lines.contains(&"BAC: 15d".to_string()));
    assert!(lines.contains(&"EV: 5d".to_string()));
    assert_eq!(view.incomplete.len(), 1);
}

#[test]
fn test_tracker_scope() {
    let dataset = dataset();
    let args = RequestArgs {
        tracker: Some("4".to_string()),
        ..args(dataset.path().to_path_buf())
    };
    let view = build_view(&args, &EvmSettings::default(), date(2024, 6, 1)).unwrap();
    let indicators = view.indicators.unwrap();

    assert_eq!(indicators.bac, 40.0);
    assert_eq!(indicators.today_ac, None);
}
