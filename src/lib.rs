//! # clipshelf
//!
//! Live filter-and-browse over a folder of saved web clips.
//!
//! Clips are Markdown notes with frontmatter (title, author, description,
//! source, image) kept in one folder of a vault. Typing a query shows the
//! matching clips, newest first, capped at a fixed count; each row links to
//! the original page and to the local note.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────┐   ┌─────────────┐
//! │ Vault folder │──▶│ clipshelf-core engine │──▶│ Output sink │
//! │ (connector)  │   │ select ▸ render       │   │ plain/html… │
//! └──────────────┘   └───────────▲───────────┘   └─────────────┘
//!                                │
//!                     query events (CLI / stdin)
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`connector_fs`] | Vault folder document source |
//! | [`frontmatter`] | Clip frontmatter parsing |
//! | [`output`] | Display sinks (plain, markdown, json, html) |
//! | [`search`] | One-shot search and interactive browse |
//! | [`sources`] | Collection health listing |
//! | [`logging`] | stderr diagnostics |

pub mod config;
pub mod connector_fs;
pub mod frontmatter;
pub mod logging;
pub mod output;
pub mod search;
pub mod sources;
