mod common;

use common::{run_acta, BinEnv};

#[test]
fn help_lists_all_subcommands() {
    let output = run_acta(&["--help"]);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("scaffold"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("completions"));
}

#[test]
fn version_flag_reports_version() {
    let output = run_acta(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn serve_fails_fast_without_a_model_file() {
    let output = run_acta(&["serve"]);

    assert!(
        !output.status.success(),
        "serve should fail when no model is present\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Whisper model not found"),
        "expected missing model error, got:\n{}",
        stderr
    );
}

#[test]
fn config_path_points_into_config_dir() {
    let env = BinEnv::new();
    let path = env.config_path();

    assert!(path.ends_with("config.toml"));
}

#[test]
fn config_init_then_show_round_trips() {
    let env = BinEnv::new();

    let output = env.run(&["config", "init"]);
    assert!(
        output.status.success(),
        "config init should succeed\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = env.run(&["config", "show"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("[whisper]"));
    assert!(stdout.contains("[llm]"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let env = BinEnv::new();

    assert!(env.run(&["config", "init"]).status.success());

    let output = env.run(&["config", "init"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));

    assert!(env.run(&["config", "init", "--force"]).status.success());
}

#[test]
fn completions_subcommand_emits_a_script() {
    let output = run_acta(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}
