//! taox - terminal explorer for Subtensor chains
//!
//! Browses extrinsics, events, calls, accounts, account statistics and
//! subnet owners served by a GraphQL indexer.
//!
//! ## Architecture
//!
//! - [`table`]: generic, renderer-neutral tables. Domain code describes a
//!   table as a list of descriptors; the table turns a [`resource::Resource`]
//!   into a [`table::TableView`].
//! - [`tables`]: the descriptor lists for every entity the explorer shows.
//! - [`indexer`] and [`services`]: GraphQL transport and per-domain fetch and
//!   transform services.
//! - [`pagination`], [`sort`], [`resource`], [`fetch`]: the value models
//!   that connect fetches to tables.
//! - [`app`], [`router`], [`ui`]: screen state, deep links and the ratatui
//!   painter.
//!
//! The terminal binary lives in `src/bin/taox.rs`:
//! ```bash
//! cargo run --features native -- taox://v1/subnets
//! ```

// Value models
pub mod pagination;
pub mod resource;
pub mod sort;
pub mod types;

// Generic tables and their domain configurations
pub mod table;
pub mod tables;

// Fetch / transform layer
pub mod args;
pub mod fetch;
pub mod indexer;
pub mod net;
pub mod services;

// Text helpers
pub mod json_view;
pub mod util_text;

// Screens
pub mod app;
pub mod config;
pub mod router;
pub mod theme;
pub mod ui;

// System clipboard (native-only)
#[cfg(feature = "native")]
pub mod clipboard;

// Re-export commonly used types
pub use app::{App, Effect, InputMode};
pub use config::Config;
pub use types::AppEvent;
