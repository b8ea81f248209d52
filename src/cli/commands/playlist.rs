//! Playlist command implementation.
//!
//! Provides `mandal playlist add`, `mandal playlist remove` and
//! `mandal playlist list`.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::error::{MandalError, Result};
use crate::media::MediaLink;
use crate::state::{PlaylistKind, Store};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{open_store, Command, CommandResult};
use super::display;

/// Arguments for the playlist command.
#[derive(Debug, Clone, Args)]
pub struct PlaylistArgs {
    #[command(subcommand)]
    pub command: PlaylistSubcommand,
}

/// Playlist subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PlaylistSubcommand {
    /// Add a YouTube or SoundCloud link.
    Add {
        /// Link to the video or track.
        url: String,
        /// Playlist to add to (detected from the link when omitted).
        #[arg(long)]
        kind: Option<String>,
        /// Title for the entry (derived from the link when omitted).
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove an entry by its position.
    Remove {
        /// Playlist: youtube or soundcloud.
        kind: String,
        /// Position as shown by `playlist list`.
        index: usize,
    },
    /// Show both playlists.
    List,
}

/// The playlist command implementation.
pub struct PlaylistCommand {
    data_dir: PathBuf,
    args: PlaylistArgs,
}

impl PlaylistCommand {
    /// Create a new playlist command.
    pub fn new(data_dir: &Path, args: PlaylistArgs) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            args,
        }
    }
}

impl Command for PlaylistCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = open_store(&self.data_dir, ui)?;

        let exit_code = match &self.args.command {
            PlaylistSubcommand::Add { url, kind, title } => {
                add(&mut store, url, kind.as_deref(), title.as_deref(), ui)?
            }
            PlaylistSubcommand::Remove { kind, index } => remove(&mut store, kind, *index, ui)?,
            PlaylistSubcommand::List => {
                list(&store, ui);
                0
            }
        };

        display::report_storage(&mut store, ui);
        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn add(
    store: &mut Store,
    url: &str,
    kind: Option<&str>,
    title: Option<&str>,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let outcome = match kind {
        Some(kind) => {
            let title = title.map(String::from).unwrap_or_else(|| {
                MediaLink::parse(url)
                    .map(|link| link.title())
                    .unwrap_or_else(|_| url.to_string())
            });
            store.add_to_playlist(kind, url, &title)?
        }
        None => {
            let added = match title {
                None => store.add_media_link(url).map(|(_, outcome)| outcome),
                Some(title) => MediaLink::parse(url).and_then(|link| {
                    store.add_to_playlist(link.kind().as_str(), link.url(), title)
                }),
            };
            match added {
                Ok(outcome) => outcome,
                Err(
                    MandalError::InvalidInput { message }
                    | MandalError::InvalidMediaUrl { message },
                ) => {
                    ui.error(&message);
                    return Ok(1);
                }
                Err(e @ MandalError::UnsupportedMedia { .. }) => {
                    ui.error(&e.to_string());
                    return Ok(1);
                }
                Err(e) => return Err(e),
            }
        }
    };

    if outcome.is_added() {
        ui.success(&outcome.notice());
        Ok(0)
    } else {
        ui.warning(&outcome.notice());
        Ok(1)
    }
}

fn remove(
    store: &mut Store,
    kind: &str,
    position: usize,
    ui: &mut dyn UserInterface,
) -> Result<i32> {
    let parsed: PlaylistKind = kind.parse()?;
    let len = store.state().playlists.entries(parsed).len();
    let Some(index) = position.checked_sub(1).filter(|i| *i < len) else {
        return Err(MandalError::PlaylistIndexOutOfRange {
            kind: parsed.to_string(),
            index: position,
            len,
        });
    };

    let removed = store.remove_from_playlist(kind, index)?;
    ui.success(&format!(
        "Removed '{}' from the {} playlist.",
        removed.title,
        parsed.label()
    ));
    Ok(0)
}

fn list(store: &Store, ui: &mut dyn UserInterface) {
    let capacity = store.settings().playlist_capacity;
    let details = ui.output_mode().shows_details();

    for kind in PlaylistKind::ALL {
        let entries = store.state().playlists.entries(kind);
        ui.show_header(&format!("{} ({}/{})", kind.label(), entries.len(), capacity));

        if entries.is_empty() {
            ui.message("No entries yet.");
            continue;
        }

        let mut headers = vec!["#", "Title", "URL"];
        if details {
            headers.push("Player");
        }
        let mut table = Table::new(headers);
        for (i, entry) in entries.iter().enumerate() {
            let mut row = vec![(i + 1).to_string(), entry.title.clone(), entry.url.clone()];
            if details {
                let player = MediaLink::parse(&entry.url)
                    .map(|link| link.play_url())
                    .unwrap_or_default();
                row.push(player);
            }
            table.add_row(row);
        }
        ui.message(&table.render());
    }
}
