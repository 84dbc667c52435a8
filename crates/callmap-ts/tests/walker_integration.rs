//! Integration test: whole-tree extraction via `DirectoryWalker`.
//!
//! Builds small source trees in a temp directory and checks discovery,
//! merging and the run-level invariants of the resulting call graph.

use callmap_core::{report, CallGraphEntry, Language};
use callmap_ts::{DirectoryWalker, ExtractionEngine};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn callees(result: &callmap_core::AnalysisResult, caller: &str) -> Vec<String> {
    result
        .graph
        .get(caller)
        .map(CallGraphEntry::to_vec)
        .unwrap_or_default()
}

fn cpp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        root,
        "src/foo.cpp",
        "namespace NS { class Foo { void bar() { baz(); baz(); qux(); } }; }\n",
    );
    write(root, "src/main.CC", "int main() { NS::Foo f; run(f); return 0; }\n");
    write(root, "include/util.hpp", "inline void helper() { log(); }\n");
    write(root, "README.md", "void not_code() { nope(); }\n");
    write(root, "scripts/tool.py", "def tool():\n    go()\n");
    tmp
}

// ── Discovery ──

#[test]
fn discovers_only_claimed_extensions() {
    let tmp = cpp_tree();
    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let files = DirectoryWalker::new(tmp.path()).discover(&engine).unwrap();

    let rel: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(tmp.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(rel, vec!["include/util.hpp", "src/foo.cpp", "src/main.CC"]);
}

#[test]
fn honours_exclude_patterns() {
    let tmp = cpp_tree();
    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let files = DirectoryWalker::new(tmp.path())
        .excludes(["**/include/**"])
        .discover(&engine)
        .unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| !p.to_string_lossy().contains("include")));
}

#[test]
fn gitignore_is_opt_in() {
    let tmp = cpp_tree();
    fs::write(tmp.path().join(".gitignore"), "include/\n").unwrap();
    let engine = ExtractionEngine::new(Language::Cpp).unwrap();

    let all = DirectoryWalker::new(tmp.path()).discover(&engine).unwrap();
    assert_eq!(all.len(), 3);

    let ignored = DirectoryWalker::new(tmp.path())
        .respect_gitignore(true)
        .discover(&engine)
        .unwrap();
    assert_eq!(ignored.len(), 2);
}

#[test]
fn stray_ignore_files_do_not_hide_sources() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "main.cpp", "int main() { api(); }\n");
    write(tmp.path(), "gen/api.cpp", "void api() { send(); }\n");
    write(tmp.path(), ".gitignore", "gen/\n");
    write(tmp.path(), "gen/.ignore", "*.cpp\n");

    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let result = DirectoryWalker::new(tmp.path()).run(&engine).unwrap();

    let callers: Vec<_> = result.graph.iter().map(|(caller, _)| caller).collect();
    assert_eq!(callers, vec!["api", "main"]);
}

#[cfg(unix)]
#[test]
fn symlinked_sources_are_followed() {
    let target = TempDir::new().unwrap();
    write(target.path(), "real.cpp", "void linked() { work(); }\n");
    write(target.path(), "lib/deep.cpp", "void deep() { dig(); }\n");

    let tmp = TempDir::new().unwrap();
    std::os::unix::fs::symlink(target.path().join("real.cpp"), tmp.path().join("link.cpp"))
        .unwrap();
    std::os::unix::fs::symlink(target.path().join("lib"), tmp.path().join("lib")).unwrap();

    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let walker = DirectoryWalker::new(tmp.path());
    assert_eq!(walker.discover(&engine).unwrap().len(), 2);

    let result = walker.run(&engine).unwrap();
    assert_eq!(callees(&result, "linked"), vec!["work"]);
    assert_eq!(callees(&result, "deep"), vec!["dig"]);
}

// ── Whole-tree runs ──

#[test]
fn cpp_tree_produces_expected_graph() {
    let tmp = cpp_tree();
    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let result = DirectoryWalker::new(tmp.path()).run(&engine).unwrap();

    assert_eq!(result.files_processed, 3);
    assert!(!result.has_failures());
    assert_eq!(callees(&result, "NS::Foo::bar"), vec!["baz", "qux"]);
    assert_eq!(callees(&result, "main"), vec!["run"]);
    assert_eq!(callees(&result, "helper"), vec!["log"]);
    assert!(result.graph.get("not_code").is_none());
    assert!(result.graph.get("tool").is_none());
}

#[test]
fn python_tree_with_nested_functions() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "pkg/service.py",
        "class Foo:\n    def bar(self):\n        self.baz()\n        qux()\n\ndef outer():\n    def inner():\n        work()\n    return inner()\n",
    );
    let engine = ExtractionEngine::new(Language::Python).unwrap();
    let result = DirectoryWalker::new(tmp.path()).run(&engine).unwrap();

    let report = report::text_report(&result.graph);
    assert_eq!(
        report,
        "Foo.bar calls: baz qux\nouter calls: inner work\nouter.inner calls: work\n"
    );
}

#[test]
fn duplicate_names_resolve_to_lexically_last_file() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a/dup.py", "def shared():\n    from_a()\n");
    write(tmp.path(), "b/dup.py", "def shared():\n    from_b()\n");
    write(tmp.path(), "c/other.py", "def unrelated():\n    pass\n");

    let engine = ExtractionEngine::new(Language::Python).unwrap();
    for workers in [Some(1), Some(4), None] {
        let result = DirectoryWalker::new(tmp.path())
            .parallelism(workers)
            .run(&engine)
            .unwrap();
        assert_eq!(callees(&result, "shared"), vec!["from_b"], "workers={workers:?}");
    }
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let tmp = TempDir::new().unwrap();
    for i in 0..20 {
        write(
            tmp.path(),
            &format!("m{i:02}.py"),
            &format!("def f{i}():\n    g{i}()\n    common()\n"),
        );
    }
    let engine = ExtractionEngine::new(Language::Python).unwrap();
    let seq = DirectoryWalker::new(tmp.path())
        .parallelism(Some(1))
        .run(&engine)
        .unwrap();
    let par = DirectoryWalker::new(tmp.path())
        .parallelism(Some(4))
        .run(&engine)
        .unwrap();

    assert_eq!(seq.graph, par.graph);
    assert_eq!(seq.graph.len(), 20);
    assert_eq!(seq.graph.edge_count(), 40);
}

#[test]
fn every_caller_name_is_non_empty() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "broken.cpp", "class { void ( { x(; } ; int f() { g(); }\n");
    write(tmp.path(), "ok.cpp", "void fine() { h(); }\n");

    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let result = DirectoryWalker::new(tmp.path()).run(&engine).unwrap();

    assert_eq!(result.files_processed, 2);
    assert!(result.graph.iter().all(|(caller, _)| !caller.is_empty()));
    assert_eq!(callees(&result, "fine"), vec!["h"]);
}

#[test]
fn empty_tree_yields_empty_graph() {
    let tmp = TempDir::new().unwrap();
    let engine = ExtractionEngine::new(Language::Cpp).unwrap();
    let result = DirectoryWalker::new(tmp.path()).run(&engine).unwrap();
    assert!(result.graph.is_empty());
    assert_eq!(result.files_processed, 0);
}
