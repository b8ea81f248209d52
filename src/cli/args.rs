//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Mandal - a meditation challenge tracker.
#[derive(Debug, Parser)]
#[command(name = "mandal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding saved state and config.yml
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

use super::commands::challenge::ChallengeArgs;
use super::commands::playlist::PlaylistArgs;
use super::commands::session::SessionArgs;

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the dashboard (default if no command specified)
    Status(StatusArgs),

    /// Create, show or clear the active Mandal
    Challenge(ChallengeArgs),

    /// Record, delete or annotate sessions
    Session(SessionArgs),

    /// List recorded sessions
    History(HistoryArgs),

    /// Run a timed meditation session
    Timer(TimerArgs),

    /// Manage the YouTube and SoundCloud playlists
    Playlist(PlaylistArgs),

    /// Toggle the history sort order
    Sort,

    /// Toggle between the light and dark theme
    Theme,

    /// Set the name shown on the dashboard
    Name(NameArgs),

    /// Write all data to a JSON file
    Export(ExportArgs),

    /// Load data from a JSON file
    Import(ImportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Hide the per-day grid
    #[arg(long)]
    pub no_grid: bool,
}

/// Arguments for the `history` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct HistoryArgs {
    /// Only show sessions whose notes contain this text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the `timer` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TimerArgs {
    /// Notes to attach to the recorded session
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the `name` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NameArgs {
    /// New name (prompted for when omitted)
    pub name: Option<String>,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Output file (defaults to meditation_data.json)
    pub path: Option<PathBuf>,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportArgs {
    /// JSON file previously written by `export`
    pub path: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::challenge::ChallengeSubcommand;
    use crate::cli::commands::playlist::PlaylistSubcommand;
    use crate::cli::commands::session::SessionSubcommand;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["mandal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["mandal", "status", "--data-dir", "/tmp/m", "-q"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/m")));
        assert!(cli.quiet);
    }

    #[test]
    fn challenge_create_parses() {
        let cli =
            Cli::try_parse_from(["mandal", "challenge", "create", "Spring", "--days", "40"])
                .unwrap();
        match cli.command {
            Some(Commands::Challenge(args)) => match args.command {
                ChallengeSubcommand::Create { name, days, start } => {
                    assert_eq!(name.as_deref(), Some("Spring"));
                    assert_eq!(days, Some(40));
                    assert!(start.is_none());
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn session_delete_rejects_id_and_index() {
        let result =
            Cli::try_parse_from(["mandal", "session", "delete", "abc123", "--index", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn session_add_parses_date() {
        let cli = Cli::try_parse_from([
            "mandal", "session", "add", "--date", "2024-03-01", "--evening", "--notes", "calm",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Session(args)) => match args.command {
                SessionSubcommand::Add(add) => {
                    assert_eq!(add.date.map(|d| d.to_string()).as_deref(), Some("2024-03-01"));
                    assert!(add.evening);
                    assert_eq!(add.notes.as_deref(), Some("calm"));
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn playlist_remove_parses_index() {
        let cli = Cli::try_parse_from(["mandal", "playlist", "remove", "youtube", "2"]).unwrap();
        match cli.command {
            Some(Commands::Playlist(args)) => match args.command {
                PlaylistSubcommand::Remove { kind, index } => {
                    assert_eq!(kind, "youtube");
                    assert_eq!(index, 2);
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn history_search_parses() {
        let cli = Cli::try_parse_from(["mandal", "history", "--search", "calm"]).unwrap();
        match cli.command {
            Some(Commands::History(args)) => assert_eq!(args.search.as_deref(), Some("calm")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
