//! Integration tests for the `weekmenu` binary.
//!
//! Each test runs the real executable against a scratch directory holding the
//! catalog, the log, and an isolated XDG config home.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use weekmenu_test_utils::{SCENARIO_CATALOG_JSON, SCENARIO_CATALOG_TOML, Scratch};

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn weekmenu(scratch: &Scratch, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_weekmenu"))
        .args(args)
        .env("XDG_CONFIG_HOME", scratch.path().join("config"))
        .env_remove("WEEKMENU_CATALOG")
        .env_remove("WEEKMENU_LOG")
        .env_remove("RUST_LOG")
        .current_dir(scratch.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn weekmenu");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for weekmenu")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[test]
fn plan_finalize_then_history_and_shop() {
    let scratch = Scratch::new();
    let catalog = scratch.write("recipes.json", SCENARIO_CATALOG_JSON);
    let log = scratch.log_path();
    let flags = [
        "--catalog",
        catalog.to_str().unwrap(),
        "--log",
        log.to_str().unwrap(),
    ];

    let mut args = flags.to_vec();
    args.extend(["plan", "--empty"]);
    let output = weekmenu(
        &scratch,
        &args,
        "set monday breakfast Eggs\n\
         set monday lunch Salad\n\
         set monday lunch side Rice\n\
         set monday dinner Soup\n\
         finalize\n\
         quit\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(
        out.contains("Shopping List\nbroth\negg\nlettuce\nrice\n"),
        "{out}"
    );

    let raw = std::fs::read_to_string(&log).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["menu"]["Monday"]["Dinner"]["side"], "None");

    let mut args = flags.to_vec();
    args.push("history");
    let output = weekmenu(&scratch, &args, "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Eggs, Rice, Salad, Soup"));

    let mut args = flags.to_vec();
    args.push("shop");
    let output = weekmenu(&scratch, &args, "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("broth\negg\nlettuce\nrice\n"));
}

#[test]
fn quit_without_finalize_records_nothing() {
    let scratch = Scratch::new();
    scratch.write("recipes.toml", SCENARIO_CATALOG_TOML);

    let output = weekmenu(
        &scratch,
        &["--catalog", "recipes.toml", "plan", "--seed", "7"],
        "show\nquit\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Monday"));
    assert!(!scratch.log_path().exists());
}

#[test]
fn config_file_supplies_paths() {
    let scratch = Scratch::new();
    let catalog = scratch.write("kitchen.json", SCENARIO_CATALOG_JSON);

    let output = weekmenu(
        &scratch,
        &["--catalog", catalog.to_str().unwrap(), "init"],
        "",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(scratch.path().join("config/weekmenu/config.toml").exists());

    // A second init without --force refuses to overwrite.
    let output = weekmenu(&scratch, &["init"], "");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));

    let output = weekmenu(&scratch, &["options"], "");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("4 recipes in catalog"));
}

#[test]
fn missing_catalog_is_fatal() {
    let scratch = Scratch::new();
    let output = weekmenu(&scratch, &["--catalog", "absent.json", "random"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("cannot load recipe catalog"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn random_with_seed_is_reproducible() {
    let scratch = Scratch::new();
    scratch.write("recipes.json", SCENARIO_CATALOG_JSON);

    let first = weekmenu(&scratch, &["random", "--seed", "42"], "");
    let second = weekmenu(&scratch, &["random", "--seed", "42"], "");
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(first.stdout, second.stdout);
}
