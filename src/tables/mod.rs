//! Domain table definitions: descriptor lists for the generic tables.
//!
//! Nothing here fetches or holds state. Each function builds a table over
//! one entity type; screens pass it a resource and an [`ExplorerContext`].

mod account;
mod account_stats;
mod call;
mod event;
mod events;
mod extrinsic;
mod extrinsics;
mod subnet_owners;

pub use account::account_info_table;
pub use account_stats::{account_stats_table, AccountStatsSort};
pub use call::call_info_table;
pub use event::event_info_table;
pub use events::{events_table, EventsSort};
pub use extrinsic::extrinsic_info_table;
pub use extrinsics::{extrinsics_table, ExtrinsicsSort};
pub use subnet_owners::subnet_owners_table;

use chrono::{DateTime, Utc};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Text};
use serde_json::Value;

use crate::router::Route;
use crate::table::Content;
use crate::util_text::{format_time_ago, format_time_utc, truncate_middle};

/// Extra context every descriptor receives next to the entity.
#[derive(Clone, Debug)]
pub struct ExplorerContext {
    pub network: String,
    pub ss58_prefix: u16,
    /// Reference time for relative timestamps, fixed per frame.
    pub now: DateTime<Utc>,
}

impl ExplorerContext {
    pub fn new(network: impl Into<String>, ss58_prefix: u16, now: DateTime<Utc>) -> Self {
        Self {
            network: network.into(),
            ss58_prefix,
            now,
        }
    }
}

const LINK: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
const MUTED: Style = Style::new().fg(Color::DarkGray);

pub(crate) fn link_text(s: impl Into<String>) -> Content {
    Text::from(Span::styled(s.into(), LINK))
}

pub(crate) fn muted(s: impl Into<String>) -> Content {
    Text::from(Span::styled(s.into(), MUTED))
}

pub(crate) fn time_utc(ts: Option<&DateTime<Utc>>) -> Content {
    match ts {
        Some(ts) => Text::from(format_time_utc(ts)),
        None => muted("unknown"),
    }
}

pub(crate) fn time_ago(ts: Option<&DateTime<Utc>>, ctx: &ExplorerContext) -> Content {
    match ts {
        Some(ts) => Text::from(format_time_ago(ts, &ctx.now)),
        None => muted("unknown"),
    }
}

pub(crate) fn result_chip(success: bool) -> Content {
    if success {
        Text::from(Span::styled("✓ Success", Style::new().fg(Color::Green)))
    } else {
        Text::from(Span::styled("✗ Fail", Style::new().fg(Color::Red)))
    }
}

pub(crate) fn qualified_name(pallet: &str, name: &str) -> String {
    format!("{pallet}.{name}")
}

pub(crate) fn search_route(pallet: &str, name: &str) -> Route {
    Route::Search {
        query: qualified_name(pallet, name),
    }
}

/// Short form of an address for grid cells.
pub(crate) fn short_address(address: &str) -> Content {
    link_text(truncate_middle(address, 17))
}

pub(crate) fn args_pretty(args: &Value) -> Content {
    Text::from(crate::json_view::pretty_lines(args))
}

pub(crate) fn args_compact(args: Option<&Value>) -> Content {
    match args {
        Some(v) => Text::from(crate::json_view::compact_line(v, 60)),
        None => muted("-"),
    }
}

pub(crate) fn spec_version(v: Option<u32>) -> Content {
    match v {
        Some(v) => Text::from(v.to_string()),
        None => muted("-"),
    }
}

pub(crate) fn account_route(address: &str) -> Route {
    Route::Account {
        address: address.to_string(),
    }
}
