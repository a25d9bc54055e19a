use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_intersection_sim"))
        .args(args)
        .env("RUST_LOG", "warn,intersection_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Extract the number logged after `label`
fn logged_count(stderr: &str, label: &str) -> u32 {
    let line = stderr
        .lines()
        .find(|line| line.contains(label))
        .unwrap_or_else(|| panic!("Could not find '{}' line", label));

    // Handle log format with timestamp and module prefix
    let parts: Vec<&str> = line.split(label).collect();
    parts
        .get(1)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| panic!("Could not parse count from line: {}", line))
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "400", "--seed", "7", "--report-every", "0"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="));
    assert!(stdout.contains("--- Congestion ---"));
}

/// Test that simulation statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&["--ticks", "400", "--seed", "7", "--report-every", "0"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for label in [
        "Ticks:",
        "Total vehicles spawned:",
        "Emergency vehicles spawned:",
        "Total vehicles exited:",
        "Active vehicles:",
        "Preemptions:",
        "Throughput:",
    ] {
        assert!(stderr.contains(label), "Missing '{}' statistic", label);
    }

    assert_eq!(logged_count(&stderr, "Ticks:"), 400);
    assert_eq!(logged_count(&stderr, "Total vehicles spawned:"), 10);
}

/// Test that the map is drawn when requested
#[test]
fn test_map_output() {
    let output = run_headless(&["--ticks", "120", "--seed", "1", "--report-every", "60", "--map"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Intersection Map ==="));
    assert!(stdout.contains("--- After tick 60 ---"));
    assert!(stdout.contains("Vehicles:"));
}

/// Test that invalid options are refused before the simulation starts
#[test]
fn test_invalid_options_rejected() {
    let output = run_headless(&["--ticks", "10", "--emergency-chance", "2.0"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Emergency chance"), "stderr: {}", stderr);
}
