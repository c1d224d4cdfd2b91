//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own temporary HOME, so the
//! session starts from the seeded demo data.

use serde_json::Value;
use std::process::Command;
use tempfile::TempDir;

struct Cli {
    home: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_juggler"))
            .args(args)
            .env("HOME", self.home.path())
            .env_remove("JUGGLER_ENV")
            .env_remove("API_KEY")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        stdout
    }

    fn json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.ok(args)).expect("Failed to parse JSON output")
    }
}

#[test]
fn test_fresh_session_is_seeded() {
    let cli = Cli::new();
    let projects = cli.json(&["project", "list", "--json"]);
    assert_eq!(projects.as_array().unwrap().len(), 3);

    let tasks = cli.json(&["task", "list", "--json"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 5);

    let ratings: Vec<f64> = tasks
        .iter()
        .map(|t| t["flow_rating"].as_f64().unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]), "{ratings:?}");
    assert!(cli.home.path().join(".config/juggler/session.json").exists());
}

#[test]
fn test_dashboard_reports_red_and_suggests_pause() {
    let cli = Cli::new();
    let dash = cli.json(&["dashboard", "--json"]);
    assert_eq!(dash["load"]["total_effort"], 30);
    assert_eq!(dash["load"]["tier"], "RED");
    assert_eq!(dash["load"]["meter_percentage"], 75.0);
    assert_eq!(dash["critical_few"].as_array().unwrap().len(), 3);
    assert_eq!(dash["suggestion"]["state"], "pending");
    assert_eq!(dash["suggestion"]["suggestion"]["project"]["name"], "Freelance Gig");

    let text = cli.ok(&["dashboard"]);
    assert!(text.contains("Burnout Risk"));
    assert!(text.contains("Freelance Gig"));
}

#[test]
fn test_accept_pauses_project() {
    let cli = Cli::new();
    let out = cli.ok(&["suggestion", "accept"]);
    assert!(out.contains("Paused 'Freelance Gig'"));

    let dash = cli.json(&["dashboard", "--json"]);
    assert_eq!(dash["load"]["total_effort"], 23);
    assert_eq!(dash["load"]["tier"], "YELLOW");
    assert_eq!(dash["suggestion"]["state"], "idle");

    let (_, stderr, code) = cli.run(&["suggestion", "accept"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No pause suggestion is pending"));
}

#[test]
fn test_dismiss_for_today_snoozes() {
    let cli = Cli::new();
    cli.ok(&["suggestion", "dismiss", "--today"]);
    let state = cli.json(&["suggestion", "show", "--json"]);
    assert_eq!(state["state"], "suppressed");

    cli.ok(&["suggestion", "reset"]);
    let state = cli.json(&["suggestion", "show", "--json"]);
    assert_eq!(state["state"], "pending");
}

#[test]
fn test_project_and_task_validation() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["project", "add", "Too big", "--impact", "6"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("impact_score"), "{stderr}");

    cli.ok(&["project", "add", "Garden", "--dna", "routine-maintenance", "--impact", "2"]);
    let (_, stderr, code) = cli.run(&["task", "add", "Garden", "Weed the beds", "--effort", "11"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("effort_score"), "{stderr}");

    let out = cli.ok(&["task", "add", "Garden", "Weed the beds", "--effort", "3", "--deadline", "+2d"]);
    assert!(out.contains("Task created:"));

    let tasks = cli.json(&["task", "list", "--project", "garden", "--json"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}

#[test]
fn test_task_show_and_focus() {
    let cli = Cli::new();
    let tasks = cli.json(&["task", "list", "--json"]);
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let shown = cli.json(&["task", "show", &id, "--json"]);
    assert!(shown["calendar_link"]
        .as_str()
        .unwrap()
        .starts_with("https://calendar.google.com/render?action=TEMPLATE"));

    cli.ok(&["focus", "start", &id[..8]]);
    let status = cli.json(&["focus", "status", "--json"]);
    assert_eq!(status["task_id"], id.as_str());

    let (_, stderr, code) = cli.run(&["focus", "start", &id]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already"), "{stderr}");

    let finished = cli.json(&["focus", "stop", "--json"]);
    assert_eq!(finished["task_id"], id.as_str());
    let status = cli.json(&["focus", "status", "--json"]);
    assert!(status.is_null());
}

#[test]
fn test_offline_decompose_apply() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "assistant.provider", "offline"]);

    let subtasks = cli.json(&["plan", "decompose", "Launch an online store", "--json"]);
    assert_eq!(subtasks.as_array().unwrap().len(), 5);
    assert_eq!(cli.json(&["task", "list", "--json"]).as_array().unwrap().len(), 5);

    cli.ok(&[
        "plan",
        "decompose",
        "Launch an online store",
        "--project",
        "Capstone Project",
        "--apply",
    ]);
    assert_eq!(cli.json(&["task", "list", "--json"]).as_array().unwrap().len(), 10);
}

#[test]
fn test_offline_day_plan() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "assistant.provider", "offline"]);
    let plan = cli.json(&["plan", "day", "--json"]);
    let plan = plan.as_array().unwrap();
    assert_eq!(plan.len(), 5);
    assert_eq!(plan[0]["start_time"], "9:00 AM");
}

#[test]
fn test_config_roundtrip() {
    let cli = Cli::new();
    assert_eq!(cli.ok(&["config", "get", "energy.available"]).trim(), "7.0");

    let (_, _, code) = cli.run(&["config", "set", "energy.available", "11"]);
    assert_ne!(code, 0);

    cli.ok(&["config", "set", "energy.available", "3"]);
    let value: f64 = cli.ok(&["config", "get", "energy.available"]).trim().parse().unwrap();
    assert_eq!(value, 3.0);

    let dash = cli.json(&["dashboard", "--json"]);
    assert_eq!(dash["available_energy"], 3.0);

    let (_, _, code) = cli.run(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_templates_and_completions() {
    let cli = Cli::new();
    let templates = cli.json(&["project", "templates", "--json"]);
    assert_eq!(templates.as_array().unwrap().len(), 3);

    let out = cli.ok(&["project", "from-template", "hackathon prep", "--deadline", "+3d"]);
    assert!(out.contains("Project created:"));
    assert_eq!(cli.json(&["project", "list", "--json"]).as_array().unwrap().len(), 4);

    let script = cli.ok(&["completions", "bash"]);
    assert!(script.contains("juggler"));
}

#[test]
fn test_huge_relative_deadline_is_rejected() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&[
        "task",
        "add",
        "Capstone Project",
        "Far future",
        "--deadline",
        "+1000000000d",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: relative deadline out of range"), "{stderr}");
    assert_eq!(cli.json(&["task", "list", "--json"]).as_array().unwrap().len(), 5);
}
