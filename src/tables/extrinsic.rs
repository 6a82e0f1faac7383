//! Extrinsic detail table.

use ratatui::text::Text;

use super::{account_route, args_pretty, link_text, muted, qualified_name, result_chip, search_route, ExplorerContext};
use crate::table::info::{InfoTable, InfoTableAttribute};
use crate::types::Extrinsic;
use crate::util_text::format_tao;

type ExtrinsicAttribute<'a> = InfoTableAttribute<'a, Extrinsic, ExplorerContext>;

pub fn extrinsic_info_table<'a>() -> InfoTable<'a, Extrinsic, ExplorerContext> {
    InfoTable::new(vec![
        ExtrinsicAttribute::new("Hash", |e: &Extrinsic, _: &ExplorerContext| e.tx_hash.clone())
            .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| Some(e.tx_hash.clone())),
        ExtrinsicAttribute::new("Block", |e: &Extrinsic, _: &ExplorerContext| e.block_height.to_string())
            .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| Some(e.block_height.to_string())),
        ExtrinsicAttribute::new("Sender", |e: &Extrinsic, _: &ExplorerContext| {
            link_text(e.signer.clone().unwrap_or_default())
        })
        .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| e.signer.clone())
        .link(|e: &Extrinsic, _: &ExplorerContext| e.signer.as_deref().map(account_route))
        .hide(|e: &Extrinsic, _: &ExplorerContext| e.signer.is_none()),
        ExtrinsicAttribute::new("Result", |e: &Extrinsic, _: &ExplorerContext| result_chip(e.success)),
        ExtrinsicAttribute::new("Name", |e: &Extrinsic, _: &ExplorerContext| {
            link_text(qualified_name(&e.pallet_name, &e.call_name))
        })
        .link(|e: &Extrinsic, _: &ExplorerContext| Some(search_route(&e.pallet_name, &e.call_name))),
        ExtrinsicAttribute::new("Tip", |e: &Extrinsic, _: &ExplorerContext| {
            if e.tip == 0 {
                muted(format_tao(0))
            } else {
                Text::from(format_tao(e.tip))
            }
        }),
        ExtrinsicAttribute::new("Version", |e: &Extrinsic, _: &ExplorerContext| e.version.to_string()),
        ExtrinsicAttribute::new("Parameters", |e: &Extrinsic, _: &ExplorerContext| args_pretty(&e.args))
            .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| serde_json::to_string_pretty(&e.args).ok()),
    ])
    .not_found_message("No extrinsic found")
}
