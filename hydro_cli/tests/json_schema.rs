use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn run_json(args: &[&str]) -> (i32, serde_json::Value, String) {
    let mut cmd = Command::cargo_bin("hydro").unwrap();
    cmd.arg("--json").args(args);
    let out = cmd.output().unwrap();
    let code = out.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    let v = if code == 0 {
        serde_json::from_str(stdout.trim()).unwrap()
    } else {
        // last stderr line is the structured error
        let last = stderr.lines().last().unwrap_or_default().to_string();
        serde_json::from_str(&last).unwrap()
    };
    (code, v, stderr)
}

#[test]
fn evaluate_schema() {
    let (code, v, _) = run_json(&["evaluate", "--sensor", "ec", "--value", "1.8"]);
    assert_eq!(code, 0);
    assert_eq!(v["sensor"], "ec");
    assert_eq!(v["unit"], "mS/cm");
    assert_eq!(v["severity"], "ok");
    assert_eq!(v["label"], "Ideal");
    assert_eq!(v["ideal"]["min"], 1.2);
    assert_eq!(v["ideal"]["max"], 2.4);
}

#[test]
fn dashboard_schema() {
    let (code, v, _) = run_json(&["dashboard"]);
    assert_eq!(code, 0);
    assert_eq!(v["plant"], "Lettuce (Romaine)");
    assert_eq!(v["health"], "Healthy");
    assert_eq!(v["health_color"], "#27ae60");
    assert_eq!(v["theme"]["dark_mode"], false);
    let readings = v["readings"].as_array().unwrap();
    assert_eq!(readings.len(), 7);
    for r in readings {
        for key in ["sensor", "value", "unit", "severity", "label", "color", "ideal", "line"] {
            assert!(r.get(key).is_some(), "missing {key} in {r}");
        }
    }
    assert_eq!(v["pump"]["status"], "Due in 2 days");
}

#[test]
fn pump_schema() {
    let (code, v, _) = run_json(&["pump", "--mode", "high", "--max-mode", "high"]);
    assert_eq!(code, 0);
    assert_eq!(v["mode"], "High");
    assert_eq!(v["max_mode"], "High");
    assert_eq!(v["status"], "Triggered (Pump at Max)");
}

#[test]
fn self_check_schema() {
    let (code, v, _) = run_json(&["self-check"]);
    assert_eq!(code, 0);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["mode"], "graduated");
    assert_eq!(v["ranges"].as_array().unwrap().len(), 7);
}

#[test]
fn error_schema_for_unknown_sensor() {
    let (code, v, _) = run_json(&["evaluate", "--sensor", "nitrate", "--value", "3"]);
    assert_eq!(code, 3);
    assert_eq!(v["reason"], "Configuration");
    assert!(v["message"].as_str().unwrap().contains("nitrate"));
}

#[test]
fn series_schema() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("s.csv");
    fs::write(&csv, "label,value\nmorning,19.0\nnoon,23.5\n").unwrap();
    let (code, v, _) = run_json(&[
        "series",
        "--sensor",
        "temperature",
        "--csv",
        csv.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert_eq!(v["points"], 2);
    assert_eq!(v["worst"], "critical");
    assert_eq!(v["worst_at"], "noon");
    assert_eq!(v["latest"]["label"], "noon");
}

#[test]
fn error_schema_for_invalid_config() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[ranges.ph]\nmin = 7.0\nmax = 6.0\n").unwrap();
    let (code, v, _) = run_json(&["--config", cfg.to_str().unwrap(), "self-check"]);
    assert_eq!(code, 3);
    assert_eq!(v["reason"], "Configuration");
    assert!(v["message"].as_str().unwrap().contains("ranges.ph: min must be <= max"));
}
