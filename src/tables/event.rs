//! Event detail table.

use ratatui::text::Text;

use super::{args_pretty, link_text, muted, qualified_name, search_route, spec_version, time_ago, time_utc, ExplorerContext};
use crate::router::Route;
use crate::table::info::{InfoTable, InfoTableAttribute};
use crate::types::Event;

type EventAttribute<'a> = InfoTableAttribute<'a, Event, ExplorerContext>;

pub fn event_info_table<'a>() -> InfoTable<'a, Event, ExplorerContext> {
    InfoTable::new(vec![
        EventAttribute::new("Timestamp", |e: &Event, _: &ExplorerContext| time_utc(e.timestamp.as_ref())),
        EventAttribute::new("Block time", |e: &Event, ctx: &ExplorerContext| time_ago(e.timestamp.as_ref(), ctx)),
        EventAttribute::new("Block", |e: &Event, _: &ExplorerContext| e.block_height.to_string())
            .copy_to_clipboard(|e: &Event, _: &ExplorerContext| Some(e.block_height.to_string())),
        EventAttribute::new("Extrinsic", |e: &Event, _: &ExplorerContext| match e.extrinsic_ref() {
            Some(id) => link_text(id),
            None => muted("none"),
        })
        .copy_to_clipboard(|e: &Event, _: &ExplorerContext| e.extrinsic_ref())
        .link(|e: &Event, _: &ExplorerContext| e.extrinsic_ref().map(|id| Route::Extrinsic { id })),
        EventAttribute::new("Call", |e: &Event, _: &ExplorerContext| match &e.call_id {
            Some(id) => link_text(id.clone()),
            None => Text::default(),
        })
        .copy_to_clipboard(|e: &Event, _: &ExplorerContext| e.call_id.clone())
        .link(|e: &Event, _: &ExplorerContext| e.call_id.clone().map(|id| Route::Call { id })),
        EventAttribute::new("Name", |e: &Event, _: &ExplorerContext| {
            link_text(qualified_name(&e.pallet_name, &e.event_name))
        })
        .link(|e: &Event, _: &ExplorerContext| Some(search_route(&e.pallet_name, &e.event_name))),
        EventAttribute::new("Parameters", |e: &Event, _: &ExplorerContext| {
            e.args.as_ref().map(args_pretty).unwrap_or_default()
        })
        .copy_to_clipboard(|e: &Event, _: &ExplorerContext| e.args.as_ref().and_then(|a| serde_json::to_string_pretty(a).ok()))
        .hide(|e: &Event, _: &ExplorerContext| e.args.is_none()),
        EventAttribute::new("Spec version", |e: &Event, _: &ExplorerContext| spec_version(e.spec_version)),
    ])
    .not_found_message("No event found")
}
