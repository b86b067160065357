use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::error::{RepositoryError, as_user_error};
use gitlet::artifacts::core::pager::PagerWriter;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "Gitlet keeps snapshots of the files in the current directory, \
    with branches, a staging area and three-way merges. \
    Repository data lives in the .gitlet directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots HEAD's files with the staged additions and removals applied, \
        then advances the current branch to the new commit."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current branch, following first parents"
    )]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches, staged changes and working tree status"
    )]
    Status,
    #[command(
        name = "restore",
        about = "Restore a file from HEAD or another commit",
        long_about = "This command overwrites the working copy of a file with its version in HEAD, \
        or in another commit given as `restore <commit> -- <file>` or `restore --source <commit> <file>`. \
        Abbreviated commit ids are accepted. The staging area is not changed."
    )]
    Restore {
        #[arg(short, long, help = "The commit to restore from")]
        source: Option<String>,
        #[arg(
            required = true,
            num_args = 1..=3,
            allow_hyphen_values = true,
            trailing_var_arg = true,
            value_name = "OPERANDS",
            help = "<file>, -- <file> or <commit> -- <file>"
        )]
        operands: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch to delete")]
        name: String,
    },
    #[command(name = "switch", about = "Check out a branch")]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id (abbreviations are accepted)")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_usage_error(error),
    };

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match as_user_error(&error) {
            Some(user_error) => {
                println!("{}", user_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("fatal: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn report_usage_error(error: clap::Error) -> ExitCode {
    let message = match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            return ExitCode::SUCCESS;
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            "Please enter a command."
        }
        ErrorKind::InvalidSubcommand => "No command with that name exists.",
        _ => "Incorrect operands.",
    };

    println!("{}", message);
    ExitCode::SUCCESS
}

/// Split `restore` operands into the commit to restore from and the file
///
/// `--` is kept as an operand once the commit has been given, and swallowed by the
/// parser when it comes first.
fn restore_operands<'a>(
    source: Option<&'a str>,
    operands: &'a [String],
) -> Result<(Option<&'a str>, &'a str), RepositoryError> {
    match (source, operands) {
        (source, [file]) => Ok((source, file.as_str())),
        (None, [separator, file]) if separator == "--" => Ok((None, file.as_str())),
        (None, [commit, separator, file]) if separator == "--" => {
            Ok((Some(commit.as_str()), file.as_str()))
        }
        _ => Err(RepositoryError::IncorrectOperands),
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    let pager = (command.is_paged() && PagerWriter::should_page()).then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };
    let mut repository = Repository::new(&pwd.to_string_lossy(), writer)?;

    match command {
        Commands::Init => repository.init().await?,
        Commands::Add { file } => repository.add(&file).await?,
        Commands::Commit { message } => {
            repository
                .commit(message.as_deref().unwrap_or_default())
                .await?
        }
        Commands::Rm { file } => repository.rm(&file).await?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(&message)?,
        Commands::Status => repository.status().await?,
        Commands::Restore { source, operands } => {
            let (commit, file) = restore_operands(source.as_deref(), &operands)?;
            repository.restore(commit, file)?
        }
        Commands::Branch { name } => repository.branch(&name)?,
        Commands::RmBranch { name } => repository.rm_branch(&name)?,
        Commands::Switch { name } => repository.switch(&name).await?,
        Commands::Reset { commit } => repository.reset(&commit).await?,
        Commands::Merge { branch } => repository.merge(&branch).await?,
    }

    repository.writer().flush()?;
    drop(repository);

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
