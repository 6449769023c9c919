use std::path::PathBuf;
use std::process::Command;

fn challenges() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_challenges"));
    cmd.arg("--log-file").arg(log_path());
    cmd
}

fn log_path() -> PathBuf {
    std::env::temp_dir().join(format!("challenges_cli_test_{}.log", std::process::id()))
}

#[test]
fn test_challenges_help() {
    let output = challenges()
        .arg("--help")
        .output()
        .expect("Failed to execute challenges");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Usage: challenges"));
    assert!(stdout.contains("employees"));
}

#[test]
fn test_challenges_routes() {
    let output = challenges()
        .arg("routes")
        .output()
        .expect("Failed to execute challenges routes");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for path in [
        "/mouseFollowingCircle",
        "/scrollNotifier",
        "/infiniteScrolling",
        "/domChangeTracker",
        "/paginatedEmpList",
    ] {
        assert!(stdout.contains(path), "missing {path}");
    }
}

#[test]
fn test_challenges_employees_salary_range() {
    let output = challenges()
        .args(["employees", "--min", "50000", "--max", "90000", "--per-page", "50"])
        .output()
        .expect("Failed to execute challenges employees");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Showing 1 to"));
    for line in stdout.lines().filter(|l| l.contains('$')) {
        let salary: f64 = line
            .split_whitespace()
            .find(|w| w.starts_with('$'))
            .unwrap()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .unwrap();
        assert!((50000.0..=90000.0).contains(&salary), "{line}");
    }
}

#[test]
fn test_challenges_employees_no_match() {
    let output = challenges()
        .args(["employees", "--search", "zzzz-nobody"])
        .output()
        .expect("Failed to execute challenges employees");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No employees found matching your criteria"));
}

#[test]
fn test_challenges_employees_page_out_of_range() {
    let output = challenges()
        .args(["employees", "--page", "999"])
        .output()
        .expect("Failed to execute challenges employees");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_challenges_missing_config_is_an_error() {
    let output = challenges()
        .args(["--config", "/nonexistent/ui-challenges/config.toml", "routes"])
        .output()
        .expect("Failed to execute challenges");

    assert!(!output.status.success());
}
