use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const EXPECTED_ROOT_HELP: &str = "Outlay - expenditure reports from bank exports

Usage:
  outlay report [--data-filename <name>] [--report-dir <dir>] [--config <path>] [--dry-run] [--json]

Start here:
  outlay report --dry-run
  outlay report --help
";

const SAMPLE: &str = "Statement\nAccount\n\nFrom\nTo\n\n\
Ημ/νία συναλλαγής;Ποσό (EUR);Κατηγορία δαπάνης\n\
10/01/2024;-10,00;Food\n\
20/01/2024;-5,00;Food\n\
01/02/2024;-20,00;Transport\n";

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

fn unique_test_root() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "outlay-cli-test-{}-{stamp}-{sequence}",
        std::process::id()
    ));
    path
}

struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new(csv: &str) -> Self {
        let root = unique_test_root();
        let data_dir = root.join("data");
        assert!(fs::create_dir_all(&data_dir).is_ok());
        assert!(fs::write(data_dir.join("sample_data.csv"), csv).is_ok());
        let config = format!(
            "data_directory = {}\nreport_directory = {}\n",
            toml_string(&data_dir),
            toml_string(&root.join("report"))
        );
        assert!(fs::write(root.join("outlay.toml"), config).is_ok());
        Self { root }
    }

    fn report_dir(&self) -> PathBuf {
        self.root.join("report")
    }

    fn run(&self, args: &[&str]) -> (Option<i32>, String) {
        run_cli(args, Some(&self.root.join("outlay.toml")), &self.root)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn toml_string(path: &Path) -> String {
    let escaped = path.display().to_string().replace('\\', "\\\\");
    format!("\"{escaped}\"")
}

fn run_cli(args: &[&str], config: Option<&Path>, home: &Path) -> (Option<i32>, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_outlay"));
    command.args(args);
    command.env("HOME", home);
    command.env_remove("OUTLAY_LOG");
    match config {
        Some(path) => command.env("OUTLAY_CONFIG", path),
        None => command.env_remove("OUTLAY_CONFIG"),
    };

    let output = command.output();
    assert!(output.is_ok());
    if let Ok(result) = output {
        let stdout = String::from_utf8(result.stdout);
        assert!(stdout.is_ok());
        if let Ok(text) = stdout {
            return (result.status.code(), text);
        }
    }
    (None, String::new())
}

fn parse_json(body: &str) -> Option<Value> {
    let parsed: Result<Value, _> = serde_json::from_str(body);
    assert!(parsed.is_ok());
    parsed.ok()
}

#[test]
fn no_arguments_prints_root_help() {
    let home = unique_test_root();
    let (code, body) = run_cli(&[], None, &home);
    assert_eq!(code, Some(0));
    assert_eq!(body, EXPECTED_ROOT_HELP);
}

#[test]
fn report_writes_files_and_lists_them() {
    let fixture = Fixture::new(SAMPLE);
    let (code, body) = fixture.run(&["report"]);
    assert_eq!(code, Some(0));

    let report_path = fixture.report_dir().join("report.txt");
    let lines = body.lines().collect::<Vec<&str>>();
    assert_eq!(
        lines[0],
        format!("Report saved to {}", report_path.display())
    );
    assert_eq!(
        lines[1],
        format!("Figures saved in {}", fixture.report_dir().display())
    );
    assert_eq!(
        lines
            .iter()
            .filter(|line| line.trim_start().ends_with(".png"))
            .count(),
        5
    );
    assert!(report_path.is_file());
    assert!(
        fixture
            .report_dir()
            .join("expenditure_per_category_last_month.png")
            .is_file()
    );
}

#[test]
fn dry_run_prints_report_without_writing() {
    let fixture = Fixture::new(SAMPLE);
    let (code, body) = fixture.run(&["report", "--dry-run"]);
    assert_eq!(code, Some(0));
    assert!(body.starts_with("Report Date Range: 10/01/2024 to 01/02/2024\n"));
    assert!(body.contains("Total Expenditure: 35.00"));
    assert!(!fixture.report_dir().exists());
}

#[test]
fn json_mode_prints_success_envelope() {
    let fixture = Fixture::new(SAMPLE);
    let (code, body) = fixture.run(&["report", "--dry-run", "--json"]);
    assert_eq!(code, Some(0));
    if let Some(value) = parse_json(&body) {
        assert_eq!(value["ok"], Value::Bool(true));
        assert_eq!(value["command"], Value::String("report".to_string()));
        assert_eq!(value["data"]["summary"]["day_count"], Value::from(23));
        assert_eq!(
            value["data"]["summary"]["monthly"][0]["month"],
            Value::String("2024-01".to_string())
        );
    }
}

#[test]
fn report_dir_flag_overrides_config() {
    let fixture = Fixture::new(SAMPLE);
    let custom = fixture.root.join("elsewhere");
    let custom_arg = custom.display().to_string();
    let (code, _) = fixture.run(&["report", "--report-dir", &custom_arg]);
    assert_eq!(code, Some(0));
    assert!(custom.join("report.txt").is_file());
    assert!(!fixture.report_dir().exists());
}

#[test]
fn missing_input_exits_with_user_error() {
    let fixture = Fixture::new(SAMPLE);
    let (code, body) = fixture.run(&["report", "--data-filename", "absent.csv"]);
    assert_eq!(code, Some(1));
    assert!(body.contains("  Error:    file_not_found"));
    assert!(body.contains("What to do next:"));
}

#[test]
fn malformed_row_json_error_carries_line() {
    let csv = format!("{SAMPLE}31/02/2024;-1,00;Food\n");
    let fixture = Fixture::new(&csv);
    let (code, body) = fixture.run(&["report", "--json"]);
    assert_eq!(code, Some(1));
    if let Some(value) = parse_json(&body) {
        assert_eq!(
            value["error"]["code"],
            Value::String("malformed_date".to_string())
        );
        assert_eq!(value["error"]["data"]["line"], Value::from(11));
        assert!(value.get("ok").is_none());
    }
    assert!(!fixture.report_dir().exists());
}

#[test]
fn unwritable_report_dir_exits_with_output_failure() {
    let fixture = Fixture::new(SAMPLE);
    let blocker = fixture.root.join("blocker");
    assert!(fs::write(&blocker, "file").is_ok());
    let target = blocker.join("report").display().to_string();
    let (code, body) = fixture.run(&["report", "--report-dir", &target]);
    assert_eq!(code, Some(2));
    assert!(body.contains("  Error:    write_failed"));
}

#[test]
fn unknown_flag_is_invalid_argument() {
    let fixture = Fixture::new(SAMPLE);
    let (code, body) = fixture.run(&["report", "--bogus", "--json"]);
    assert_eq!(code, Some(1));
    if let Some(value) = parse_json(&body) {
        assert_eq!(
            value["error"]["code"],
            Value::String("invalid_argument".to_string())
        );
    }
}

#[test]
fn invalid_config_is_reported() {
    let fixture = Fixture::new(SAMPLE);
    assert!(fs::write(fixture.root.join("outlay.toml"), "chart_format = \"gif\"\n").is_ok());
    let (code, body) = fixture.run(&["report", "--dry-run"]);
    assert_eq!(code, Some(1));
    assert!(body.contains("  Error:    invalid_config"));
}
