//! End-to-end tests for `run`: selection, gating, failures, dry-run,
//! cancellation and report determinism.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use codemod_core::{
    CancellationFlag, Change, Codemod, CodemodError, CodemodRegistry, EngineError, FileContext,
    LineFilterSpec, RegistryError, ReviewRisk, RuleDescriptor, RunConfig, SelectorError,
    SemanticFinding, SourceTree, TransformOutput, builtin_codemods, default_registry, run,
};

const F_STR_SOURCE: &str = "bad = f\"hello\"\ngood = f\"{2+3}\"\n";
const F_STR_DIFF: &str =
    "--- \n+++ \n@@ -1,2 +1,2 @@\n-bad = f\"hello\"\n+bad = \"hello\"\n good = f\"{2+3}\"\n";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("Create dirs");
    fs::write(path, content).expect("Write file");
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).expect("Read file")
}

fn registry() -> Arc<CodemodRegistry> {
    Arc::new(default_registry().expect("Build registry"))
}

fn only(dir: &Path, id: &str) -> RunConfig {
    let mut config = RunConfig::new(dir);
    config.codemod_include = vec![id.to_string()];
    config
}

#[test]
fn test_unnecessary_f_string_scenario() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "unnecessary_f_str.py", F_STR_SOURCE);

    let outcome = run(
        registry(),
        &only(dir.path(), "remove-unnecessary-f-str"),
        CancellationFlag::new(),
    )
    .expect("Run");

    assert_eq!(
        read(dir.path(), "unnecessary_f_str.py"),
        "bad = \"hello\"\ngood = f\"{2+3}\"\n"
    );
    let results = &outcome.report.results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].codemod, "remove-unnecessary-f-str");
    let change_set = &results[0].changeset[0];
    assert_eq!(change_set.path, "unnecessary_f_str.py");
    assert_eq!(change_set.diff, F_STR_DIFF);
    assert_eq!(
        change_set.changes,
        vec![Change::new(1, "Remove unnecessary f-string")]
    );
    assert_eq!(outcome.stats.files_changed, 1);
}

#[test]
fn test_second_run_is_idempotent() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);
    let config = only(dir.path(), "remove-unnecessary-f-str");

    run(registry(), &config, CancellationFlag::new()).expect("First run");
    let second = run(registry(), &config, CancellationFlag::new()).expect("Second run");

    assert!(second.report.results.is_empty());
    assert!(second.context.get_changed_files().is_empty());
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);

    let config = only(dir.path(), "remove-unnecessary-f-str").dry_run(true);
    let outcome = run(registry(), &config, CancellationFlag::new()).expect("Run");

    assert_eq!(read(dir.path(), "a.py"), F_STR_SOURCE);
    assert_eq!(outcome.report.results[0].changeset[0].diff, F_STR_DIFF);
    assert!(outcome.report.run.dry_run);
}

#[test]
fn test_dry_run_chains_codemods_in_memory() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "manage.py", "import sys\n");
    write(dir.path(), "app/settings.py", "DEBUG = f\"x\"\n");

    let outcome = run(
        registry(),
        &RunConfig::new(dir.path()).dry_run(true),
        CancellationFlag::new(),
    )
    .expect("Run");

    assert_eq!(read(dir.path(), "app/settings.py"), "DEBUG = f\"x\"\n");
    let f_str = outcome
        .report
        .results
        .iter()
        .find(|r| r.codemod == "remove-unnecessary-f-str")
        .expect("f-string section");
    assert!(f_str.changeset[0].diff.contains(" SESSION_COOKIE_SECURE = True\n"));
    assert_eq!(outcome.report.run.changed_files, vec!["app/settings.py"]);
}

#[test]
fn test_line_exclusion_suppresses_only_that_edit() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", "x = f\"a\"\ny = 1\nz = f\"b\"\n");

    let mut filters = LineFilterSpec::new();
    filters.add_exclude_arg("a.py:1").expect("Parse filter");
    let config = only(dir.path(), "remove-unnecessary-f-str").with_line_filters(filters);
    let outcome = run(registry(), &config, CancellationFlag::new()).expect("Run");

    assert_eq!(read(dir.path(), "a.py"), "x = f\"a\"\ny = 1\nz = \"b\"\n");
    let lines: Vec<usize> = outcome.report.results[0].changeset[0]
        .changes
        .iter()
        .map(|c| c.line)
        .collect();
    assert_eq!(lines, vec![3]);
}

#[test]
fn test_line_include_restricts_edits() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", "x = f\"a\"\ny = 1\nz = f\"b\"\n");

    let mut filters = LineFilterSpec::new();
    filters.add_include_arg("a.py:1-2").expect("Parse filter");
    let config = only(dir.path(), "remove-unnecessary-f-str").with_line_filters(filters);
    run(registry(), &config, CancellationFlag::new()).expect("Run");

    assert_eq!(read(dir.path(), "a.py"), "x = \"a\"\ny = 1\nz = f\"b\"\n");
}

#[test]
fn test_findings_gate_limit_readline() {
    let dir = TempDir::new().expect("Create temp dir");
    let source = "with open(p) as f:\n    a = f.readline()\n    b = f.readline()\n";
    write(dir.path(), "io.py", source);
    write(dir.path(), "other.py", "c = g.readline()\n");

    let absolute = dir.path().join("io.py").display().to_string();
    let config = only(dir.path(), "limit-readline").with_findings(vec![SemanticFinding::new(
        absolute,
        3,
        9,
        "limit-readline.yaml",
    )]);
    let outcome = run(registry(), &config, CancellationFlag::new()).expect("Run");

    assert_eq!(
        read(dir.path(), "io.py"),
        "with open(p) as f:\n    a = f.readline()\n    b = f.readline(5_000_000)\n"
    );
    assert_eq!(read(dir.path(), "other.py"), "c = g.readline()\n");
    assert_eq!(outcome.report.run.changed_files, vec!["io.py"]);
}

#[test]
fn test_parse_failure_is_isolated() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);
    write(dir.path(), "broken.py", "def broken(:\n");

    let outcome = run(
        registry(),
        &only(dir.path(), "remove-unnecessary-f-str"),
        CancellationFlag::new(),
    )
    .expect("Run");

    let section = &outcome.report.results[0];
    assert_eq!(section.failed_files, vec!["broken.py"]);
    assert_eq!(section.changeset.len(), 1);
    assert_eq!(section.changeset[0].path, "a.py");
    assert_eq!(outcome.report.run.failed_files, vec!["broken.py"]);
    assert_eq!(outcome.stats.failures, 1);
    assert_eq!(read(dir.path(), "broken.py"), "def broken(:\n");
}

struct Panics(RuleDescriptor);

impl Codemod for Panics {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.0
    }

    fn transform(
        &self,
        _tree: SourceTree,
        _file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        panic!("rule bug");
    }
}

#[test]
fn test_panicking_codemod_recorded_as_failure() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);
    write(dir.path(), "b.py", "x = 1\n");

    let mut registry = CodemodRegistry::new();
    registry
        .register(Arc::new(Panics(
            RuleDescriptor::new("panics", "Always panics", ReviewRisk::ManualReview)
                .always_eligible(),
        )))
        .expect("Register");
    for codemod in builtin_codemods() {
        registry.register(codemod).expect("Register builtin");
    }
    registry.close();

    let outcome = run(
        Arc::new(registry),
        &RunConfig::new(dir.path()),
        CancellationFlag::new(),
    )
    .expect("Run");

    assert_eq!(outcome.context.get_failures("panics"), vec!["a.py", "b.py"]);
    assert_eq!(read(dir.path(), "a.py"), "bad = \"hello\"\ngood = f\"{2+3}\"\n");
    assert!(outcome.report.results.iter().all(|r| r.codemod != "panics"));
    assert_eq!(outcome.report.run.failed_files, vec!["a.py", "b.py"]);
}

#[test]
fn test_cancelled_run_dispatches_nothing() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);

    let cancel = CancellationFlag::new();
    cancel.cancel();
    let outcome = run(registry(), &RunConfig::new(dir.path()), cancel).expect("Run");

    assert!(outcome.stats.cancelled);
    assert_eq!(outcome.stats.files_scanned, 0);
    assert!(outcome.report.results.is_empty());
    assert_eq!(read(dir.path(), "a.py"), F_STR_SOURCE);
}

#[test]
fn test_reports_are_deterministic() {
    let dir = TempDir::new().expect("Create temp dir");
    for i in 0..12 {
        write(dir.path(), &format!("pkg{}/m{i}.py", i % 3), F_STR_SOURCE);
    }
    let mut config = RunConfig::new(dir.path()).dry_run(true);
    config.options.workers = 4;

    let first = run(registry(), &config, CancellationFlag::new()).expect("First run");
    let second = run(registry(), &config, CancellationFlag::new()).expect("Second run");

    let first_json = first.report.to_json_pretty().expect("Serialize");
    assert_eq!(first_json, second.report.to_json_pretty().expect("Serialize"));

    let paths: Vec<&str> = first.report.results[0]
        .changeset
        .iter()
        .map(|cs| cs.path.as_str())
        .collect();
    let mut sorted = paths.clone();
    sorted.sort_unstable();
    assert_eq!(paths, sorted);
    assert_eq!(paths.len(), 12);
}

#[test]
fn test_configuration_errors_abort_before_work() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", F_STR_SOURCE);

    let unknown = only(dir.path(), "no-such-codemod");
    assert!(matches!(
        run(registry(), &unknown, CancellationFlag::new()),
        Err(EngineError::Registry(RegistryError::NotFound(_)))
    ));

    let missing = RunConfig::new(dir.path().join("missing"));
    assert!(matches!(
        run(registry(), &missing, CancellationFlag::new()),
        Err(EngineError::Selector(SelectorError::RootNotFound(_)))
    ));

    let mut bad_glob = RunConfig::new(dir.path());
    bad_glob.path_exclude = vec!["[".to_string()];
    assert!(matches!(
        run(registry(), &bad_glob, CancellationFlag::new()),
        Err(EngineError::Selector(SelectorError::InvalidPattern { .. }))
    ));

    assert_eq!(read(dir.path(), "a.py"), F_STR_SOURCE);
}

#[test]
fn test_chained_readline_fixed_in_one_run() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "io.py", "x = f.readline().readline()\n");
    let config = only(dir.path(), "limit-readline").with_findings(vec![SemanticFinding::new(
        "io.py",
        1,
        5,
        "limit-readline.yaml",
    )]);

    let first = run(registry(), &config, CancellationFlag::new()).expect("First run");
    assert_eq!(
        read(dir.path(), "io.py"),
        "x = f.readline(5_000_000).readline(5_000_000)\n"
    );
    assert_eq!(first.report.results[0].changeset[0].changes.len(), 2);

    let second = run(registry(), &config, CancellationFlag::new()).expect("Second run");
    assert!(second.report.results.is_empty());
    assert!(second.context.get_changed_files().is_empty());
}

/// Tags each file with a marker comment and reports one dependency.
struct RequiresX(RuleDescriptor);

impl Codemod for RequiresX {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.0
    }

    fn transform(
        &self,
        tree: SourceTree,
        _file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        if tree.source().starts_with("# uses x\n") {
            return Ok(TransformOutput::unchanged(tree));
        }
        let tagged = SourceTree::parse(format!("# uses x\n{}", tree.source()))?;
        Ok(TransformOutput::rewritten(tagged, vec![Change::new(1, "Tag file")]).with_dependency("x"))
    }
}

#[test]
fn test_codemod_dependencies_reach_report_once() {
    let dir = TempDir::new().expect("Create temp dir");
    write(dir.path(), "a.py", "a = 1\n");
    write(dir.path(), "b.py", "b = 2\n");

    let mut registry = CodemodRegistry::new();
    registry
        .register(Arc::new(RequiresX(
            RuleDescriptor::new("requires-x", "Needs x", ReviewRisk::AutoFix).always_eligible(),
        )))
        .expect("Register");
    registry.close();

    let outcome = run(
        Arc::new(registry),
        &RunConfig::new(dir.path()),
        CancellationFlag::new(),
    )
    .expect("Run");

    assert_eq!(outcome.report.run.changed_files, vec!["a.py", "b.py"]);
    assert_eq!(outcome.report.run.dependencies, vec!["x"]);
}
