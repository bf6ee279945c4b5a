use assert_fs::prelude::*;
use predicates::prelude::*;
use replica_fs::DirectorySnapshot;
use rstest::rstest;
use std::ffi::OsStr;

#[rstest]
#[case(&[], 0)]
#[case(&["a.txt"], 1)]
#[case(&["a.txt", "b.txt", ".hidden"], 3)]
fn snapshot_counts_regular_files(#[case] files: &[&str], #[case] expected: usize) {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in files {
        temp.child(name).write_str("content").unwrap();
    }
    temp.child("subdir").create_dir_all().unwrap();

    let snapshot = DirectorySnapshot::take(temp.path()).unwrap();

    assert_eq!(snapshot.len(), expected);
}

#[test]
fn snapshot_is_not_affected_by_later_changes() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a.txt").write_str("a").unwrap();

    let snapshot = DirectorySnapshot::take(temp.path()).unwrap();
    temp.child("b.txt").write_str("b").unwrap();

    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot.contains(OsStr::new("b.txt")));
    temp.child("b.txt").assert(predicate::path::exists());
}

#[test]
fn snapshot_does_not_descend() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("nested/deep.txt").write_str("deep").unwrap();

    let snapshot = DirectorySnapshot::take(temp.path()).unwrap();

    assert!(snapshot.is_empty());
}

#[test]
fn path_for_joins_onto_root() {
    let temp = assert_fs::TempDir::new().unwrap();
    let snapshot = DirectorySnapshot::take(temp.path()).unwrap();

    assert_eq!(
        snapshot.path_for(OsStr::new("new.txt")),
        temp.path().join("new.txt")
    );
}
