//! Integration tests for snapdoc file-set resolution.

use std::path::{Path, PathBuf};
use tempfile::tempdir;

use snapdoc_indexer::{fence_tag, PatternMatcher};

/// Helper to create a small backend project layout
fn create_test_project(base: &Path) -> PathBuf {
    let project = base.join("backend");
    let files = [
        ("pom.xml", "<project/>"),
        ("src/main/java/com/acme/App.java", "class App {}"),
        ("src/main/java/com/acme/web/Controller.java", "class Controller {}"),
        ("src/main/resources/application.yml", "server:\n  port: 8080\n"),
        ("src/main/resources/db/V1__init.sql", "create table t (id int);"),
        ("src/test/java/com/acme/AppTest.java", "class AppTest {}"),
        ("src/main/java/com/acme/.Hidden.java", "class Hidden {}"),
    ];
    for (rel, content) in files {
        let path = project.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    project
}

#[test]
fn test_resolution_is_deterministic() {
    let temp_dir = tempdir().unwrap();
    let project = create_test_project(temp_dir.path());
    let matcher = PatternMatcher::new(&project).unwrap();

    let globs = ["src/**/*.java", "src/main/resources/**/*", "pom.xml"];
    let excludes = ["src/test/*"];

    let first = matcher.resolve(&globs, &excludes);
    let second = matcher.resolve(&globs, &excludes);

    assert_eq!(first.files, second.files);
    assert_eq!(
        first.rel_paths(),
        vec![
            "pom.xml",
            "src/main/java/com/acme/App.java",
            "src/main/java/com/acme/web/Controller.java",
            "src/main/resources/application.yml",
            "src/main/resources/db/V1__init.sql",
        ]
    );
}

#[test]
fn test_wildcards_skip_dot_files() {
    let temp_dir = tempdir().unwrap();
    let project = create_test_project(temp_dir.path());
    let matcher = PatternMatcher::new(&project).unwrap();

    let set = matcher.resolve(&["src/main/java/**/*.java"], &[]);
    assert!(set.rel_paths().iter().all(|p| !p.contains(".Hidden")));

    // A literal dot still matches
    let set = matcher.resolve(&["src/main/java/com/acme/.*.java"], &[]);
    assert_eq!(set.rel_paths(), vec!["src/main/java/com/acme/.Hidden.java"]);
}

#[test]
fn test_matched_files_carry_fence_tags() {
    let temp_dir = tempdir().unwrap();
    let project = create_test_project(temp_dir.path());
    let matcher = PatternMatcher::new(&project).unwrap();

    let set = matcher.resolve(&["src/main/resources/**/*"], &[]);
    let tags: Vec<_> = set.files.iter().map(|f| fence_tag(&f.path)).collect();
    assert_eq!(tags, vec!["yaml", "sql"]);
}

#[test]
fn test_absolute_pattern_is_not_rerooted() {
    let temp_dir = tempdir().unwrap();
    let project = create_test_project(temp_dir.path());
    let matcher = PatternMatcher::new(&project).unwrap();

    let absolute = format!("{}/pom.xml", project.display());
    let set = matcher.resolve(&[absolute.as_str()], &[]);
    assert_eq!(set.rel_paths(), vec!["pom.xml"]);
}
