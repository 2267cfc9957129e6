use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use treewalk::{walk, VisitError, WalkError};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```
/// tmp/
///   a.txt
///   b.txt
///   sub/
///     c.txt
///     deeper/
///       d.txt
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), "alpha").unwrap();
    fs::write(root.join("b.txt"), "beta").unwrap();

    let sub = root.join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("c.txt"), "gamma").unwrap();

    let deeper = sub.join("deeper");
    fs::create_dir(&deeper).unwrap();
    fs::write(deeper.join("d.txt"), "delta").unwrap();

    dir
}

/// Run a collecting walk and return the visited paths as a set.
fn visited_set(root: &Path) -> BTreeSet<PathBuf> {
    walk(root)
        .collect_paths(true)
        .run()
        .unwrap()
        .paths
        .into_iter()
        .collect()
}

/// Permission-bit tests are meaningless under euid 0; they skip themselves.
#[cfg(unix)]
fn running_as_root() -> bool {
    std::process::Command::new("id")
        .arg("-u")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim() == "0")
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn visits_every_regular_file_exactly_once() {
    let dir = setup_test_dir();

    let mut counts: std::collections::HashMap<PathBuf, usize> = Default::default();
    let report = walk(dir.path())
        .for_each(|path| *counts.entry(path.to_path_buf()).or_default() += 1)
        .run()
        .unwrap();

    assert_eq!(report.visited, 4, "should visit all 4 regular files");
    assert_eq!(counts.len(), 4);
    assert!(counts.values().all(|&n| n == 1), "no path visited twice");
    assert!(report.is_clean());
}

#[test]
fn two_file_scenario_visits_exactly_those_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), "b").unwrap();

    let expected: BTreeSet<PathBuf> =
        [root.join("a.txt"), root.join("sub").join("b.txt")].into();

    assert_eq!(visited_set(root), expected);
}

#[test]
fn empty_root_visits_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let report = walk(dir.path()).run().unwrap();

    assert_eq!(report.visited, 0);
    assert_eq!(report.stats.files, 0);
    assert_eq!(report.stats.dirs, 1, "the root scope itself was opened");
    assert!(report.is_clean());
}

#[test]
fn dot_entries_are_never_visited() {
    let dir = setup_test_dir();

    let report = walk(dir.path()).collect_paths(true).run().unwrap();

    assert!(report
        .paths
        .iter()
        .all(|p| p.file_name().map(|n| n != "." && n != "..").unwrap_or(false)));
}

#[test]
fn non_recursive_visits_the_root_exactly_once() {
    // A directory root: the visitor still gets it, kind never inspected.
    let dir = setup_test_dir();

    let mut seen = Vec::new();
    let report = walk(dir.path())
        .recursive(false)
        .for_each(|path| seen.push(path.to_path_buf()))
        .run()
        .unwrap();

    assert_eq!(seen, vec![dir.path().to_path_buf()]);
    assert_eq!(report.visited, 1);
    assert_eq!(report.stats.dirs, 0, "no directory scope was opened");
}

#[test]
fn non_recursive_on_a_file_visits_it() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("only.txt");
    fs::write(&file, "x").unwrap();

    let mut seen = Vec::new();
    walk(&file)
        .recursive(false)
        .for_each(|path| seen.push(path.to_path_buf()))
        .run()
        .unwrap();

    assert_eq!(seen, vec![file]);
}

#[test]
fn file_root_is_visited_in_recursive_mode() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("only.txt");
    fs::write(&file, "x").unwrap();

    let report = walk(&file).collect_paths(true).run().unwrap();

    assert_eq!(report.paths, vec![file]);
    assert_eq!(report.stats.dirs, 0);
}

#[test]
fn nonexistent_root_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_entry");

    let mut visits = 0;
    let err = walk(&missing)
        .for_each(|_| visits += 1)
        .run()
        .unwrap_err();

    assert!(matches!(err, WalkError::NotFound(_)));
    assert_eq!(err.path(), missing.as_path());
    assert!(!err.is_recoverable());
    assert_eq!(visits, 0, "visitor must never run on a failed open");
}

#[cfg(unix)]
#[test]
fn unreadable_root_is_permission_denied() {
    use std::os::unix::fs::PermissionsExt;

    if running_as_root() {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let mut visits = 0;
    let err = walk(&locked).for_each(|_| visits += 1).run().unwrap_err();

    // Restore so the tempdir can be cleaned up.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(err, WalkError::PermissionDenied(_)));
    assert_eq!(visits, 0);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_absorbed() {
    use std::os::unix::fs::PermissionsExt;

    if running_as_root() {
        return;
    }

    let dir = setup_test_dir();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let report = walk(dir.path()).collect_errors(true).run().unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(report.subtree_failures, 1, "the locked scope was abandoned");
    assert_eq!(report.visited, 4, "siblings of the locked scope still visited");
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0], WalkError::PermissionDenied(_)));
}

#[cfg(unix)]
#[test]
fn stat_failure_aborts_the_scope() {
    use std::os::unix::fs::PermissionsExt;

    if running_as_root() {
        return;
    }

    // Readable but not searchable: entries can be listed but not statted.
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("listed");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();
    fs::set_permissions(&root, fs::Permissions::from_mode(0o444)).unwrap();

    let mut visits = 0;
    let err = walk(&root).for_each(|_| visits += 1).run().unwrap_err();

    fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(err, WalkError::Stat { .. }));
    assert!(!err.is_recoverable());
    assert_eq!(visits, 0, "the scope is abandoned before any dispatch");
}

#[test]
fn visitor_failure_does_not_stop_siblings() {
    let dir = setup_test_dir();
    let reject = dir.path().join("b.txt");

    let report = walk(dir.path())
        .with_visitor(move |path: &Path| -> Result<(), VisitError> {
            if path == reject {
                return Err("refused".into());
            }
            Ok(())
        })
        .collect_errors(true)
        .run()
        .unwrap();

    assert_eq!(report.visited, 3);
    assert_eq!(report.visit_failures, 1);
    assert!(!report.is_clean());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].is_recoverable());
    assert!(report.errors[0].path().ends_with("b.txt"));
}

#[test]
fn visitor_failure_on_the_root_itself_is_returned() {
    // When the root is the visited path there is no scope to absorb the
    // failure; the caller gets it.
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("only.txt");
    fs::write(&file, "x").unwrap();

    let err = walk(&file)
        .with_visitor(|_: &Path| -> Result<(), VisitError> { Err("refused".into()) })
        .run()
        .unwrap_err();

    assert!(matches!(err, WalkError::Visit { .. }));
    assert!(err.is_recoverable());
}

#[cfg(unix)]
#[test]
fn symlinks_are_skipped_without_recursion() {
    use std::os::unix::fs::symlink;

    let dir = setup_test_dir();
    let root = dir.path();
    symlink(root.join("a.txt"), root.join("link_to_file")).unwrap();
    symlink(root.join("sub"), root.join("link_to_dir")).unwrap();

    let report = walk(root).collect_paths(true).run().unwrap();

    assert_eq!(report.visited, 4, "links add nothing to the visit set");
    assert_eq!(report.stats.skipped, 2);
    assert!(report
        .paths
        .iter()
        .all(|p| !p.to_string_lossy().contains("link_to_")));
}

#[cfg(unix)]
#[test]
fn fifos_are_skipped_without_a_visit() {
    let dir = tempfile::tempdir().unwrap();
    let fifo = dir.path().join("pipe");
    let made = std::process::Command::new("mkfifo")
        .arg(&fifo)
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if !made {
        return;
    }
    fs::write(dir.path().join("real.txt"), "x").unwrap();

    let report = walk(dir.path()).collect_paths(true).run().unwrap();

    assert_eq!(report.paths, vec![dir.path().join("real.txt")]);
    assert_eq!(report.stats.skipped, 1);
}

#[test]
fn idempotent_over_an_unchanged_tree() {
    let dir = setup_test_dir();

    let first = visited_set(dir.path());
    let second = visited_set(dir.path());

    assert_eq!(first, second);
}

#[test]
fn visited_set_matches_walkdir_enumeration() {
    let dir = setup_test_dir();

    let reference: BTreeSet<PathBuf> = walkdir::WalkDir::new(dir.path())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();

    assert_eq!(visited_set(dir.path()), reference);
}

#[test]
fn stats_are_populated() {
    let dir = setup_test_dir();

    let report = walk(dir.path()).run().unwrap();

    assert!(report.stats.duration.as_nanos() > 0);
    assert_eq!(report.stats.files, 4);
    assert_eq!(report.stats.dirs, 3, "root, sub and deeper");
}

#[test]
fn paths_empty_when_not_collecting() {
    let dir = setup_test_dir();

    let report = walk(dir.path()).run().unwrap();

    assert!(
        report.paths.is_empty(),
        "paths should be empty when collect_paths is false"
    );
    assert_eq!(report.visited, 4, "visits should still be counted");
}

#[test]
fn errors_empty_when_not_collecting() {
    let dir = setup_test_dir();

    let report = walk(dir.path())
        .with_visitor(|_: &Path| -> Result<(), VisitError> { Err("refused".into()) })
        .run()
        .unwrap();

    assert!(
        report.errors.is_empty(),
        "errors should be empty when collect_errors is false"
    );
    assert_eq!(report.visit_failures, 4, "failures should still be counted");
}

#[test]
fn borrowing_visitor_accumulates_into_a_local() {
    let dir = setup_test_dir();

    let mut total = 0u64;
    walk(dir.path())
        .with_visitor(|path: &Path| -> Result<(), VisitError> {
            total += fs::metadata(path)?.len();
            Ok(())
        })
        .run()
        .unwrap();

    assert_eq!(total, 19); // alpha + beta + gamma + delta
}
