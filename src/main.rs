//! CLI entry point for `al-scaffold`.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use al_scaffold::{Command, CommandContext, CommandStatus, ConsoleHost, ToolConfig, execute};

#[derive(Parser)]
#[command(
    name = "al-scaffold",
    version,
    about = "Scaffold editor settings, launch targets and permission sets for AL projects"
)]
struct Cli {
    /// Project root
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Tool configuration file (defaults to <root>/.al-scaffold.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// log4rs YAML configuration; replaces the console logger
    #[arg(long, global = true)]
    log_config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Answer yes to overwrite questions
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Create .vscode/settings.json with the standard AL preferences
    InitSettings {
        /// Object prefix; prompted for when omitted
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Move the sidebar to the left
    SidebarLeft,
    /// Move the sidebar to the right
    SidebarRight,
    /// Add or remove the AppSourceCop analyzer
    ToggleAppSourceCop,
    /// Append a launch target to .vscode/launch.json
    AddLaunchTarget {
        /// Environment name; prompted for when omitted
        #[arg(long)]
        environment: Option<String>,
    },
    /// Generate Admin/Edit/Read/Objects permission sets from the project's objects
    GeneratePermissionSets {
        /// Base name of the permission sets; prompted for when omitted
        #[arg(long)]
        name: Option<String>,
    },
}

impl CliCommand {
    fn split(self) -> (Command, Option<String>) {
        match self {
            CliCommand::InitSettings { prefix } => (Command::ScaffoldSettings, prefix),
            CliCommand::SidebarLeft => (Command::SidebarLeft, None),
            CliCommand::SidebarRight => (Command::SidebarRight, None),
            CliCommand::ToggleAppSourceCop => (Command::ToggleAppSourceCop, None),
            CliCommand::AddLaunchTarget { environment } => (Command::AddLaunchTarget, environment),
            CliCommand::GeneratePermissionSets { name } => (Command::GeneratePermissionSets, name),
        }
    }
}

fn init_logging(cli: &Cli) {
    if let Some(path) = &cli.log_config {
        match log4rs::init_file(path, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Failed to load log config {}: {e}", path.display()),
        }
    }

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = match ToolConfig::load(&cli.root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    };

    let assume_yes = cli.yes;
    let root = cli.root.clone();
    let (command, answer) = cli.command.split();

    let mut host = ConsoleHost::new(assume_yes);
    if let Some(answer) = answer {
        host = host.with_answer(answer);
    }

    let context = CommandContext::new(root, config);
    match execute(command, &context, &host) {
        CommandStatus::Completed | CommandStatus::Cancelled => {}
        CommandStatus::Failed => process::exit(1),
    }
}
