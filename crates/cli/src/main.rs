use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use huemark_types::Bookmark;
use huemark_util::{random_palette, BookmarkStore, JsonBookmarkStore};

#[derive(Parser)]
#[command(name = "huemark", version, about = "Palette generator and bookmark manager")]
struct Cli {
    /// Bookmarks file location; beats the HUEMARK_BOOKMARKS_PATH env var
    #[arg(long, global = true, value_name = "FILE")]
    bookmarks_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print five freshly generated colors
    Palette,
    /// Manage stored bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Print bookmarks in insertion order
    List,
    /// Validate and append a bookmark
    Add { name: String, url: String },
    /// Remove every bookmark matching both fields exactly
    Remove { name: String, url: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = open_store(&cli)?;

    // No subcommand => TUI
    let Some(command) = cli.command else {
        return huemark_tui::run(store);
    };

    match command {
        Command::Palette => {
            let palette = random_palette(&mut rand::rng());
            for color in palette.colors() {
                println!("{color}");
            }
        }
        Command::Bookmark { action } => run_bookmark_action(store.as_ref(), action)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the JSON store, resolving its location. The `--bookmarks-path`
/// flag wins; without it the store falls back to the env var or the
/// config directory default.
fn open_store(cli: &Cli) -> Result<Arc<JsonBookmarkStore>> {
    let store = JsonBookmarkStore::new(cli.bookmarks_path.clone())?;
    tracing::debug!("bookmarks file: {}", store.path().display());
    Ok(Arc::new(store))
}

fn run_bookmark_action(store: &dyn BookmarkStore, action: BookmarkAction) -> Result<()> {
    match action {
        BookmarkAction::List => {
            for bookmark in store.list()? {
                println!("{}\t{}", bookmark.name, bookmark.url);
            }
        }
        BookmarkAction::Add { name, url } => {
            let bookmark = match Bookmark::new(&name, &url) {
                Ok(bookmark) => bookmark,
                Err(error) => bail!("{error}"),
            };
            store.append(bookmark.clone())?;
            println!("Added {bookmark}");
        }
        BookmarkAction::Remove { name, url } => {
            let removed = store.remove_matching(name.trim(), url.trim())?;
            println!("Removed {removed} bookmark(s)");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use huemark_util::InMemoryBookmarkStore;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bookmarks_path_flag_beats_env_override() {
        let dir = tempfile::tempdir().unwrap();
        let flag_path = dir.path().join("flag.json");
        let env_path = dir.path().join("env.json");

        temp_env::with_var(
            huemark_util::BOOKMARKS_PATH_ENV,
            Some(env_path.to_str().unwrap()),
            || {
                let cli = Cli::try_parse_from([
                    "huemark",
                    "--bookmarks-path",
                    flag_path.to_str().unwrap(),
                    "bookmark",
                    "list",
                ])
                .unwrap();
                let store = open_store(&cli).unwrap();
                assert_eq!(store.path(), flag_path.as_path());

                // Without the flag, the env var decides the location.
                let cli = Cli::try_parse_from(["huemark", "bookmark", "list"]).unwrap();
                let store = open_store(&cli).unwrap();
                assert_eq!(store.path(), env_path.as_path());
            },
        );
    }

    #[test]
    fn add_then_remove_round_trips_through_the_store() {
        let store = InMemoryBookmarkStore::new();
        run_bookmark_action(
            &store,
            BookmarkAction::Add {
                name: "GitHub".into(),
                url: "https://github.com".into(),
            },
        )
        .unwrap();
        assert_eq!(store.list().unwrap().len(), 1);

        run_bookmark_action(
            &store,
            BookmarkAction::Remove {
                name: "GitHub".into(),
                url: "https://github.com".into(),
            },
        )
        .unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn add_rejects_invalid_urls() {
        let store = InMemoryBookmarkStore::new();
        let result = run_bookmark_action(
            &store,
            BookmarkAction::Add {
                name: "x".into(),
                url: "ftp://x".into(),
            },
        );
        assert!(result.is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
