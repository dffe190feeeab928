use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
};

mod card;
mod clear;
mod delete;
mod history;
mod init;
mod pool;
mod post;
mod show;
mod status;
mod terminal;

use clap::ArgAction;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory the board is kept in
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(status::Command::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show open and matched counts per date (default)
    Status(status::Command),

    /// Set up a board in the root directory
    Init(init::Command),

    /// Post the seat you have and the seat you want
    ///
    /// If someone has already posted the opposite swap for the same date,
    /// both postings are matched immediately.
    Post(post::Command),

    /// List postings still waiting for a match
    ///
    /// Contact handles are hidden until a posting is matched.
    Pool(pool::Command),

    /// List every posting on this board, with contacts
    History(history::Command),

    /// Show one posting and, if matched, its counterpart
    Show(show::Command),

    /// Delete a posting
    Delete(delete::Command),

    /// Delete every posting on this board
    Clear(clear::Command),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init(command) => command.run(root)?,
            Self::Post(command) => command.run(root)?,
            Self::Pool(command) => command.run(root)?,
            Self::History(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Delete(command) => command.run(root)?,
            Self::Clear(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Output formats shared by the listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn prompt_to_proceed() -> io::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}
