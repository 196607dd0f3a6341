//! Integration tests for the `pulse convert` and `pulse check` commands.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const ENTRIES: &str = r#"[
  {
    "id": 123456789,
    "workspace_id": 12345,
    "project_id": 67890,
    "description": "Working on feature X",
    "start": "2025-01-01T08:00:00Z",
    "stop": "2025-01-01T10:30:00Z",
    "duration": 9000,
    "billable": true,
    "tags": ["development", "backend"],
    "user_id": 98765,
    "created_with": "web",
    "at": "2025-01-01T10:30:15Z",
    "server_deleted_at": null
  },
  {
    "id": 777888999,
    "workspace_id": 12345,
    "project_id": 11111,
    "description": "Bug fix: Issue #123 | \"Quote\" test",
    "start": "2025-01-04T13:00:00Z",
    "stop": "2025-01-04T14:30:00Z",
    "duration": 5400,
    "billable": true,
    "tags": ["bugfix", "high-priority"]
  },
  {
    "id": 111222333,
    "workspace_id": 12345,
    "description": "Current task",
    "start": "2025-01-05T09:00:00+01:00",
    "duration": -1736064000,
    "tags": []
  }
]"#;

/// Builds a `pulse` command isolated from the user's config and environment.
fn pulse(home: &TempDir) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pulse"));
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("PULSE_SKIP_RUNNING")
        .env_remove("PULSE_OUTPUT")
        .env_remove("RUST_LOG");
    command
}

fn run_with_stdin(mut command: Command, stdin: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn pulse");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for pulse")
}

#[test]
fn test_convert_from_stdin() {
    let home = TempDir::new().unwrap();
    let mut command = pulse(&home);
    command.arg("convert");

    let output = run_with_stdin(command, ENTRIES);
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        r#"toggl_time_entry,billable=true,project_id=67890,tags=development|backend,workspace_id=12345 duration=9000,description="Working on feature X" 1735718400000"#
    );
    assert!(lines[1].contains(r#"\"Quote\""#));
    assert_eq!(
        lines[2],
        r#"toggl_time_entry,billable=false,project_id=unknown,workspace_id=12345 duration=-1736064000,description="Current task" 1736064000000"#
    );
}

#[test]
fn test_convert_file_to_file_skipping_running() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("entries.json");
    let output_path = home.path().join("points.lp");
    std::fs::write(&input, ENTRIES).unwrap();

    let output = pulse(&home)
        .arg("convert")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output_path)
        .arg("--skip-running")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.ends_with('\n'));
}

#[test]
fn test_convert_uses_config_file() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("from-config.lp");
    let config_path = home.path().join("pulse.toml");
    std::fs::write(
        &config_path,
        format!(
            "skip_running = true\noutput = \"{}\"\n",
            output_path.display()
        ),
    )
    .unwrap();

    let mut command = pulse(&home);
    command.arg("--config").arg(&config_path).arg("convert");
    let output = run_with_stdin(command, ENTRIES);
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written.lines().count(), 2);
}

#[test]
fn test_convert_fails_whole_batch_on_naive_start() {
    let home = TempDir::new().unwrap();
    let input = r#"[
        {"id": 1, "workspace_id": 1, "start": "2025-01-01T08:00:00Z", "stop": "2025-01-01T09:00:00Z", "duration": 3600},
        {"id": 2, "workspace_id": 1, "start": "2025-01-01T10:00:00", "stop": "2025-01-01T11:00:00Z", "duration": 3600}
    ]"#;

    let mut command = pulse(&home);
    command.arg("convert");
    let output = run_with_stdin(command, input);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid timestamp for time entry 2"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_failed_convert_keeps_existing_output_file() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("points.lp");
    std::fs::write(&output_path, "previous good data\n").unwrap();
    let input = r#"[{"id": 5, "workspace_id": 1, "start": "2025-01-01T10:00:00", "stop": "2025-01-01T11:00:00Z", "duration": 3600}]"#;

    let mut command = pulse(&home);
    command.arg("convert").arg("--output").arg(&output_path);
    let output = run_with_stdin(command, input);

    assert!(!output.status.success());
    assert_eq!(
        std::fs::read_to_string(&output_path).unwrap(),
        "previous good data\n"
    );
}

#[test]
fn test_no_skip_running_overrides_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("pulse.toml");
    std::fs::write(&config_path, "skip_running = true\n").unwrap();

    let mut command = pulse(&home);
    command
        .arg("--config")
        .arg(&config_path)
        .arg("convert")
        .arg("--no-skip-running");
    let output = run_with_stdin(command, ENTRIES);
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
}

#[test]
fn test_convert_empty_input_writes_nothing() {
    let home = TempDir::new().unwrap();
    let mut command = pulse(&home);
    command.arg("convert");

    let output = run_with_stdin(command, "[]");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_check_reports_summary() {
    let home = TempDir::new().unwrap();
    let mut command = pulse(&home);
    command.arg("check").arg("--input").arg("-");

    let output = run_with_stdin(command, ENTRIES);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "Entries: 3\nRunning: 1\nNaive starts: 0\n");
}
