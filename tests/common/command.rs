use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Commit date used by every test commit unless a test picks its own
pub const DEFAULT_COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `wug.txt` ("This is a wug.\n") committed on `main`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("wug.txt"),
        "This is a wug.\n".to_string(),
    ));
    run_gitlet_command(repository_dir.path(), &["add", "wug.txt"])
        .assert()
        .success();
    gitlet_commit(repository_dir.path(), "added wug")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("GITLET_COMMIT_DATE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    gitlet_commit_at(dir, message, DEFAULT_COMMIT_DATE)
}

pub fn gitlet_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["commit", message]);
    cmd.env("GITLET_COMMIT_DATE", date);
    cmd
}

/// Write `content` to `name`, stage it and commit
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_gitlet_command(dir, &["add", name]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

pub fn gitlet_merge(dir: &Path, branch: &str) -> Command {
    let mut cmd = run_gitlet_command(dir, &["merge", branch]);
    cmd.env("GITLET_COMMIT_DATE", DEFAULT_COMMIT_DATE);
    cmd
}

/// Run a command that must succeed and return its stdout
pub fn stdout_of(mut cmd: Command) -> Result<String, Box<dyn std::error::Error>> {
    let output = cmd.assert().success().get_output().stdout.clone();
    Ok(String::from_utf8(output)?)
}

/// ID of the commit the current branch points at, taken from `log`
pub fn head_commit_id(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let log = stdout_of(run_gitlet_command(dir, &["log"]))?;

    log.lines()
        .find_map(|line| line.strip_prefix("commit "))
        .map(str::to_string)
        .ok_or_else(|| "log printed no commit".into())
}

/// The status section that starts with `=== <title> ===`, one entry per line
pub fn status_section(status: &str, title: &str) -> Vec<String> {
    let header = format!("=== {} ===", title);

    status
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
