use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gamesense"));
        cmd.args(args)
            .arg("--data-dir")
            .arg(self.data_dir())
            .arg("--news-item-secs")
            .arg("0");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute binary")
    }

    fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn binary");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

const REFERENCE_CALC: &[&str] = &[
    "calculate",
    "-g",
    "codm",
    "--mode",
    "multiplayer",
    "--dpi",
    "440",
    "--refresh-rate",
    "120",
    "--screen-size",
    "6.67",
    "--fingers",
    "2",
    "--skill",
    "intermediate",
    "--aiming",
    "index",
];

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn stats_on_fresh_data_dir() {
    let ctx = TestContext::new();
    let output = ctx.run(&["stats"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No statistics recorded yet"));
}

#[test]
fn non_interactive_calculation_persists_results() {
    let ctx = TestContext::new();
    let mut args = REFERENCE_CALC.to_vec();
    args.push("--accept-defaults");

    let output = ctx.run(&args);
    let out = stdout(&output);
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        out,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(out.contains("150.0"), "{}", out);
    assert!(out.contains("165.0"), "{}", out);
    assert!(out.contains("Gyro sensitivity not available"));
    let saved = Regex::new(r"Saved to \S+sensitivity_result\.txt and \S+sensitivity_result\.json").unwrap();
    assert!(saved.is_match(&out), "{}", out);

    let game_dir = ctx.data_dir().join("games").join("call_of_duty_mobile");
    let json = fs::read_to_string(game_dir.join("sensitivity_result.json")).unwrap();
    assert!(json.contains("Not Available"));
    assert!(json.contains("\"mode\": \"Multiplayer\""));
    assert!(game_dir.join("sensitivity_result.txt").exists());
    assert!(ctx.data_dir().join("session.json").exists());
    assert!(ctx.data_dir().join("logs.txt").exists());

    let stats = stdout(&ctx.run(&["stats"]));
    assert!(stats.contains("Total Calculations"));
    assert!(stats.contains("Call of Duty Mobile"));
    assert!(stats.contains("Last Camera Sensitivity"), "{}", stats);
    assert!(stats.contains("Last Gyro Sensitivity: Not Available"), "{}", stats);
}

#[test]
fn interactive_preview_and_calibration() {
    let ctx = TestContext::new();
    // 110% on No ADS, keep the rest, rate "Too Low", decline sharing
    let output = ctx.run_with_input(REFERENCE_CALC, "110\n\n\n\n\n\n\n2\nn\n");
    let out = stdout(&output);
    assert!(output.status.success(), "{}", out);
    assert!(out.contains("SENSITIVITY PREVIEW FOR CALL OF DUTY MOBILE"));
    assert!(out.contains("181.5"), "{}", out);
    assert!(!ctx.data_dir().join("community_db.json").exists());
}

#[test]
fn shared_settings_show_up_in_community() {
    let ctx = TestContext::new();
    let mut args = REFERENCE_CALC.to_vec();
    args.extend(["--model", "TestPhone", "--accept-defaults", "--share"]);
    assert!(ctx.run(&args).status.success());
    assert!(ctx.data_dir().join("community_db.json").exists());

    let out = stdout(&ctx.run(&[
        "community",
        "-g",
        "codm",
        "--device",
        "TestPhone",
        "--skill",
        "intermediate",
    ]));
    assert!(out.contains("150.0"), "{}", out);
}

#[test]
fn feedback_is_used_by_the_next_calculation() {
    let ctx = TestContext::new();
    // camera too high, firing too low, skip gyro
    let output = ctx.run_with_input(&["feedback", "-g", "codm"], "1\n2\n4\n");
    let out = stdout(&output);
    assert!(output.status.success(), "{}", out);
    assert!(ctx.data_dir().join("feedback_log.json").exists());
    let saved = Regex::new(r"Feedback saved to \S+feedback_log\.json: camera 0\.9x, firing 1\.1x, gyro 1\.0x").unwrap();
    assert!(saved.is_match(&out), "{}", out);

    let mut args = REFERENCE_CALC.to_vec();
    args.push("--accept-defaults");
    let out = stdout(&ctx.run(&args));
    // 150 * 0.9 and 165 * 1.1
    assert!(out.contains("135.0"), "{}", out);
    assert!(out.contains("181.5"), "{}", out);
}

#[test]
fn stats_clear_names_the_removed_log() {
    let ctx = TestContext::new();
    let mut args = REFERENCE_CALC.to_vec();
    args.push("--accept-defaults");
    assert!(ctx.run(&args).status.success());
    assert!(ctx.data_dir().join("stats.jsonl").exists());

    let out = stdout(&ctx.run(&["stats", "--clear"]));
    assert!(out.contains("Statistics cleared ("), "{}", out);
    assert!(out.contains("stats.jsonl"), "{}", out);
    assert!(!ctx.data_dir().join("stats.jsonl").exists());
}

#[test]
fn unknown_game_is_rejected() {
    let ctx = TestContext::new();
    let output = ctx.run(&["calculate", "-g", "tetris", "--accept-defaults"]);
    assert!(!output.status.success());
}

#[test]
fn menu_index_zero_is_an_error_not_a_crash() {
    let ctx = TestContext::new();
    let output = ctx.run(&["calculate", "-g", "0", "--accept-defaults"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "{}", stderr);
}

#[test]
fn help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_gamesense"))
        .arg("--help")
        .output()
        .unwrap();
    let out = stdout(&output);
    for sub in ["calculate", "feedback", "stats", "benchmark", "community", "update", "tutorial"] {
        assert!(out.contains(sub), "missing {} in {}", sub, out);
    }
}

#[test]
fn menu_exits_on_end_of_input() {
    let ctx = TestContext::new();
    let output = ctx.run(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("MAIN MENU"));
}
