//! Persistence and generation helpers shared by the Huemark TUI and CLI.

pub mod bookmark_store;
pub mod palette;

pub use bookmark_store::{
    BookmarkStore, InMemoryBookmarkStore, JsonBookmarkStore, StoreError, BOOKMARKS_FILE_NAME,
    BOOKMARKS_PATH_ENV,
};
pub use palette::{random_color, random_palette};
