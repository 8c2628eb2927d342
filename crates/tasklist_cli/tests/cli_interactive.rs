use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_store_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
}

fn run_interactive(store_dir: &PathBuf, script: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tasklist"))
        .env("TASKLIST_STORE_DIR", store_dir)
        .env("TASKLIST_CONFIG_PATH", store_dir.join("no-config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tasklist");

    child
        .stdin
        .as_mut()
        .expect("stdin should be piped")
        .write_all(script.as_bytes())
        .expect("failed to write script");

    child.wait_with_output().expect("failed to wait for tasklist")
}

#[test]
fn interactive_session_runs_commands_until_exit() {
    let store_dir = temp_store_dir("cli-interactive");
    let output = run_interactive(&store_dir, "add \"buy milk\"\ndone 0\nlist\nexit\n");

    std::fs::remove_dir_all(&store_dir).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: buy milk (0)"));
    assert!(stdout.contains("Marked done: buy milk (0)"));
    assert!(stdout.contains("buy milk"));
}

#[test]
fn interactive_session_reports_errors_and_continues() {
    let store_dir = temp_store_dir("cli-interactive-errors");
    let output = run_interactive(&store_dir, "remove 5\nadd \"still works\"\nexit\n");

    std::fs::remove_dir_all(&store_dir).ok();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: still works (0)"));
}

#[test]
fn interactive_session_rejects_unterminated_quote() {
    let store_dir = temp_store_dir("cli-interactive-quote");
    let output = run_interactive(&store_dir, "add \"unterminated\nexit\n");

    std::fs::remove_dir_all(&store_dir).ok();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated quote"));
}
