//! Tests for the CLI: argument parsing, precedence and report output.

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use codemod_cli::{Cli, Outcome, emit_report, execute, resolve_config};
use codemod_core::CancellationFlag;

const SOURCE: &str = "bad = f\"hello\"\ngood = f\"{2+3}\"\n";

fn project() -> TempDir {
    let dir = TempDir::new().expect("Create temp dir");
    fs::write(dir.path().join("a.py"), SOURCE).expect("Write a.py");
    fs::create_dir_all(dir.path().join("tests")).expect("Create tests dir");
    fs::write(dir.path().join("tests/test_a.py"), SOURCE).expect("Write test_a.py");
    dir
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("codemod").chain(args.iter().copied()))
        .expect("Parse arguments")
}

fn dir_arg(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

#[test]
fn test_directory_required_unless_listing() {
    assert!(Cli::try_parse_from(["codemod"]).is_err());
    let cli = parse(&["--list"]);
    match execute(&cli, CancellationFlag::new()).expect("List") {
        Outcome::Listed(listing) => {
            assert!(listing.contains("remove-unnecessary-f-str"));
            assert!(listing.contains("MERGE_AFTER_REVIEW"));
            assert_eq!(listing.lines().count(), 3);
        }
        Outcome::Ran { .. } => panic!("expected a listing"),
    }
}

#[test]
fn test_overlay_splits_comma_lists() {
    let cli = parse(&["/repo", "--path-exclude", "tests/*, docs/*", "--dry-run"]);
    let overlay = cli.settings_overlay();
    assert_eq!(
        overlay.path_exclude,
        Some(vec!["tests/*".to_string(), "docs/*".to_string()])
    );
    assert_eq!(overlay.dry_run, Some(true));
    assert_eq!(overlay.path_include, None);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let dir = project();
    let cli = parse(&[&dir_arg(&dir), "--dry-run", "--path-exclude", "tests/*"]);

    let Outcome::Ran { report, stats } = execute(&cli, CancellationFlag::new()).expect("Run")
    else {
        panic!("expected a run");
    };

    assert_eq!(fs::read_to_string(dir.path().join("a.py")).expect("Read"), SOURCE);
    assert_eq!(report.run.changed_files, vec!["a.py"]);
    assert!(!stats.cancelled);
}

#[test]
fn test_cli_flags_override_settings_file() {
    let dir = project();
    fs::write(
        dir.path().join(".codemod.yaml"),
        "dry_run: true\npath_exclude: [\"a.py\"]\ncodemod_include: [\"remove-unnecessary-f-str\"]\n",
    )
    .expect("Write settings");

    let cli = parse(&[&dir_arg(&dir), "--path-exclude", "tests/*"]);
    let config = resolve_config(&cli, dir.path()).expect("Resolve");

    assert!(config.dry_run);
    assert_eq!(config.path_exclude, vec!["tests/*"]);
    assert_eq!(config.codemod_include, vec!["remove-unnecessary-f-str"]);
}

#[test]
fn test_configuration_errors_are_reported() {
    let dir = project();

    let missing_root = parse(&[&format!("{}/missing", dir_arg(&dir))]);
    assert!(execute(&missing_root, CancellationFlag::new()).is_err());

    let unknown_codemod = parse(&[&dir_arg(&dir), "--codemod-include", "nope"]);
    assert!(execute(&unknown_codemod, CancellationFlag::new()).is_err());

    let bad_lines = parse(&[&dir_arg(&dir), "--line-exclude", "a.py:x"]);
    assert!(execute(&bad_lines, CancellationFlag::new()).is_err());

    let missing_config = parse(&[&dir_arg(&dir), "--config", "/definitely/not/here.yaml"]);
    assert!(execute(&missing_config, CancellationFlag::new()).is_err());

    assert_eq!(fs::read_to_string(dir.path().join("a.py")).expect("Read"), SOURCE);
}

#[test]
fn test_line_exclude_and_findings_flags() {
    let dir = TempDir::new().expect("Create temp dir");
    fs::write(dir.path().join("io.py"), "a = f.readline()\nb = f.readline()\n").expect("Write");
    let findings = dir.path().join("findings.json");
    fs::write(
        &findings,
        r#"[{"filePath": "io.py", "line": 1, "ruleRef": "limit-readline"},
            {"filePath": "io.py", "line": 2, "ruleRef": "limit-readline"}]"#,
    )
    .expect("Write findings");

    let cli = parse(&[
        &dir_arg(&dir),
        "--codemod-include",
        "limit-readline",
        "--findings",
        &findings.display().to_string(),
        "--line-exclude",
        "io.py:2",
    ]);
    execute(&cli, CancellationFlag::new()).expect("Run");

    assert_eq!(
        fs::read_to_string(dir.path().join("io.py")).expect("Read"),
        "a = f.readline(5_000_000)\nb = f.readline()\n"
    );
}

#[test]
fn test_report_written_to_output_file() {
    let dir = project();
    let output = dir.path().join("report.json");
    let cli = parse(&[&dir_arg(&dir), "--dry-run", "--output", &output.display().to_string()]);

    let Outcome::Ran { report, .. } = execute(&cli, CancellationFlag::new()).expect("Run") else {
        panic!("expected a run");
    };
    let stdout = emit_report(&report, cli.output.as_deref()).expect("Emit");
    assert!(stdout.is_none());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(Path::new(&output)).expect("Read report"))
            .expect("Parse report");
    assert_eq!(json["results"][0]["codemod"], "remove-unnecessary-f-str");
    assert_eq!(
        json["results"][0]["changeset"][0]["changes"][0]["lineNumber"],
        "1"
    );
}
