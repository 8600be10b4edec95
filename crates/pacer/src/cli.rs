use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pacer")]
#[command(author, version, about)]
#[command(long_about = "A presentation pacing timer.\n\n\
    Give every slide a time budget, then keep your talk aligned with it.\n\n\
    Examples:\n  \
    pacer talk.yaml              Run the timer for a plan\n  \
    pacer talk.yaml --auto       Let the clock drive the slide position\n  \
    pacer init talk.yaml         Create a starter plan\n  \
    pacer edit talk.yaml         Edit a plan interactively\n  \
    pacer generate talk.yaml --topic \"Q4 strategy\"   Draft a plan with AI")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Plan file to run
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Let the clock drive the slide position (auto-advance)
    #[arg(long, global = false)]
    pub auto: bool,

    /// Start on a specific slide (1-indexed, manual mode only)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure AI provider for plan generation
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Draft a slide plan with AI
    Generate {
        /// Plan file to write
        file: PathBuf,

        /// What the talk is about
        #[arg(short, long)]
        topic: String,

        /// Number of slides (defaults from config)
        #[arg(long)]
        slides: Option<usize>,

        /// Total talk length in minutes (defaults from config)
        #[arg(long)]
        minutes: Option<u64>,

        /// Overwrite an existing plan file
        #[arg(long)]
        force: bool,
    },

    /// Create a starter plan file
    Init {
        /// Plan file to create
        file: PathBuf,

        /// Number of slides (defaults from config)
        #[arg(long)]
        slides: Option<usize>,

        /// Total talk length in minutes (defaults from config)
        #[arg(long)]
        minutes: Option<u64>,

        /// Overwrite an existing plan file
        #[arg(long)]
        force: bool,
    },

    /// Edit a plan interactively
    Edit {
        /// Plan file to edit
        file: PathBuf,
    },

    /// Print a plan's timeline
    Show {
        /// Plan file to print
        file: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum AiCommands {
    /// Set up an AI provider for plan generation
    Init,

    /// Show current AI provider configuration
    Status,

    /// Remove AI configuration
    Remove,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.slides, defaults.minutes)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Ai { command }) => crate::commands::ai::run(command),
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Generate {
                file,
                topic,
                slides,
                minutes,
                force,
            }) => crate::commands::generate::run(&file, &topic, slides, minutes, force, self.quiet),
            Some(Commands::Init {
                file,
                slides,
                minutes,
                force,
            }) => crate::commands::init::run(&file, slides, minutes, force, self.quiet),
            Some(Commands::Edit { file }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::edit::run(&file)
            }
            Some(Commands::Show { file }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::show::run(&file)
            }
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::commands::run::run(&file, self.auto, self.slide, self.quiet)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
