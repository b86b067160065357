use crate::common::command::{head_commit_id, repository_dir, run_gitlet_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_repository_with_initial_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(repository_dir.path().join(".gitlet").is_dir());

    let log = stdout_of(run_gitlet_command(repository_dir.path(), &["log"]))?;
    let oid = head_commit_id(repository_dir.path())?;
    assert_eq!(
        log,
        format!("===\ncommit {oid}\nDate: Thu Jan 1 00:00:00 1970 +0000\ninitial commit\n\n")
    );

    Ok(())
}

#[rstest]
fn initial_commit_is_identical_across_repositories() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    for dir in [&first, &second] {
        run_gitlet_command(dir.path(), &["init"]).assert().success();
    }

    assert_eq!(
        head_commit_id(first.path())?,
        head_commit_id(second.path())?
    );

    Ok(())
}

#[rstest]
fn init_twice_is_rejected(repository_dir: TempDir) {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout("A Gitlet version-control system already exists in the current directory.\n");
}

#[rstest]
fn interrupted_init_can_be_rerun(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    // what an init killed before writing the branch table leaves behind
    std::fs::create_dir_all(repository_dir.path().join(".gitlet/objects"))?;

    run_gitlet_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout("Not in an initialized Gitlet directory.\n");

    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    run_gitlet_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*main\n"));

    Ok(())
}

#[rstest]
#[case(&["status"])]
#[case(&["log"])]
#[case(&["add", "wug.txt"])]
#[case(&["branch", "cool-beans"])]
#[case(&["merge", "main"])]
fn commands_require_a_repository(repository_dir: TempDir, #[case] args: &[&str]) {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout("Not in an initialized Gitlet directory.\n");

    assert!(!repository_dir.path().join(".gitlet").exists());
}

#[rstest]
#[case::no_command(&[], "Please enter a command.\n")]
#[case::unknown_command(&["push"], "No command with that name exists.\n")]
#[case::missing_operand(&["add"], "Incorrect operands.\n")]
#[case::extra_operand(&["log", "extra"], "Incorrect operands.\n")]
#[case::extra_operand_for_init(&["init", "extra"], "Incorrect operands.\n")]
fn usage_errors_are_reported(
    repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] expected: &str,
) {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .success()
        .stdout(expected.to_string());
}
