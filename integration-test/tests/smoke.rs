use std::fs;
use std::process::Command;
use std::sync::Once;
use test_driver::{SessionOutput, TestSession};

fn target_dir() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/../target/debug")
}

fn heatsite_binary() -> String {
    format!("{}/heatsite", target_dir())
}

fn lex_binary() -> String {
    format!("{}/heatargs-lex", target_dir())
}

static BUILD_INIT: Once = Once::new();

/// Build heatsite and heatargs-lex if not already done.
fn ensure_binaries() {
    BUILD_INIT.call_once(|| {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let workspace_root = format!("{manifest_dir}/..");
        let status = Command::new("cargo")
            .args(["build", "-p", "heatsite", "-p", "heatargs"])
            .current_dir(&workspace_root)
            .status()
            .expect("failed to run cargo build");
        assert!(status.success(), "cargo build -p heatsite -p heatargs failed");
    });
}

fn heatsite(args: &[&str], expected_code: i32) -> SessionOutput {
    heatsite_with(args, &[], 80, expected_code)
}

fn heatsite_with(
    args: &[&str],
    env: &[(&str, &str)],
    columns: u16,
    expected_code: i32,
) -> SessionOutput {
    ensure_binaries();
    TestSession::spawn_in(&heatsite_binary(), args, env, None, columns)
        .expect("failed to spawn heatsite")
        .wait_exit(expected_code)
}

// ── Group 1: accepted command lines ─────────────────────────────

#[test]
fn required_arguments_only() {
    let out = heatsite(&["/root:web", "/src:..\\Web\\"], 0);
    let lines = out.stdout_lines();
    assert_eq!(lines[0], "HeatSite version: 2.0.0");
    assert!(lines.contains(&"Component group: site.content"));
    assert!(lines.contains(&"Output path:     HeatSiteOutput.wxs"));
    assert!(lines.contains(&"Root:            web"));
    assert!(lines.contains(&"Source:          ..\\Web\\"));
    assert!(lines.contains(&"Config files:    overwritten"));
    assert_eq!(out.stderr, "");
}

#[test]
fn response_file_supplies_options() {
    let dir = tempfile::tempdir().unwrap();
    let rsp = dir.path().join("site.rsp");
    fs::write(
        &rsp,
        "# heatsite options\n/root:web\n\"/src:my source\"   # quoted\n/dontOverwriteConfigs+\n",
    )
    .unwrap();
    let at = format!("@{}", rsp.display());

    let out = heatsite(&[at.as_str(), "/comp:web.files"], 0);
    let lines = out.stdout_lines();
    assert!(lines.contains(&"Source:          my source"));
    assert!(lines.contains(&"Component group: web.files"));
    assert!(lines.contains(&"Config files:    never overwritten"));
}

// ── Group 2: rejected command lines ─────────────────────────────

#[test]
fn missing_required_prints_diagnostics_and_usage() {
    let out = heatsite(&[], 2);
    assert_eq!(
        out.stderr_lines(),
        vec![
            "Missing required argument '/Root'.",
            "Missing required argument '/Source'.",
        ]
    );
    assert!(out.stdout.contains("/Root:<string>"));
    assert!(out.stdout.contains("Read response file for more options"));
}

#[test]
fn help_request_prints_usage_only() {
    let out = heatsite(&["/root:web", "/src:x", "/?"], 2);
    assert_eq!(out.stderr, "");
    assert!(out.stdout.starts_with("HeatSite version: "));
    assert!(out.stdout.contains("@<file>"));
}

#[test]
fn unknown_and_duplicate_arguments() {
    let out = heatsite(&["/root:a", "/Root:b", "/src:x", "/bogus"], 2);
    assert_eq!(
        out.stderr_lines(),
        vec![
            "Duplicate 'Root' argument",
            "Unrecognized command line argument '/bogus'",
        ]
    );
}

#[test]
fn unreadable_response_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.rsp");
    let at = format!("@{}", missing.display());
    let out = heatsite(&["/root:a", "/src:b", at.as_str()], 2);
    let lines = out.stderr_lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with(&format!(
            "Error: Can't open command line argument file '{}' : '",
            missing.display()
        )),
        "{}",
        lines[0]
    );
}

// ── Group 3: usage layout follows the terminal ──────────────────

#[test]
fn wide_terminal_keeps_help_on_one_line() {
    let out = heatsite_with(&["/?"], &[], 200, 2);
    let line = out
        .stdout_lines()
        .into_iter()
        .find(|l| l.starts_with("/ComponentGroupName:<string>"))
        .expect("no ComponentGroupName line")
        .to_string();
    assert!(line.ends_with(
        "The component group name given to the fragments Default value:'site.content' (short form /comp)"
    ));
}

#[test]
fn narrow_terminal_falls_back_to_column_five() {
    let out = heatsite_with(&["/?"], &[], 40, 2);
    assert!(out
        .stdout
        .contains("/ComponentGroupName:<string>\n     The component group name"));
    for line in out.stdout_lines().iter().filter(|l| l.starts_with(' ')) {
        assert!(line.chars().count() <= 40, "line too long: {:?}", line);
    }
}

#[test]
fn columns_variable_overrides_terminal() {
    let out = heatsite_with(&["/?"], &[("COLUMNS", "200")], 40, 2);
    assert!(out.stdout_lines().iter().any(|l| l.starts_with("/ComponentGroupName:<string>")
        && l.contains("(short form /comp)")));
}

// ── Group 4: response-file dumper ───────────────────────────────

#[test]
fn lex_dump_lists_tokens() {
    ensure_binaries();
    let dir = tempfile::tempdir().unwrap();
    let rsp = dir.path().join("dump.rsp");
    fs::write(&rsp, "a \"b c\" d\\\"e # trailing\n").unwrap();
    let path = rsp.display().to_string();
    let header = format!("{}: 3 tokens", path);

    let out = TestSession::spawn(&lex_binary(), &[path.as_str()], &[])
        .expect("failed to spawn heatargs-lex")
        .wait_exit(0);
    assert_eq!(
        out.stdout_lines(),
        vec![
            header.as_str(),
            "'a'",
            "'b c'",
            "'d\"e'",
            "",
        ]
    );
}

#[test]
fn lex_dump_without_files_prints_usage() {
    ensure_binaries();
    let out = TestSession::spawn(&lex_binary(), &[], &[])
        .expect("failed to spawn heatargs-lex")
        .wait_exit(1);
    assert!(out.stdout.starts_with("usage: heatargs-lex"));
}
