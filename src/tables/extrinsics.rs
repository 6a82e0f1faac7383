//! Extrinsic list columns.

use ratatui::layout::Constraint;

use super::{account_route, link_text, qualified_name, result_chip, search_route, short_address, ExplorerContext};
use crate::router::Route;
use crate::sort::{SortDirection, SortProperty};
use crate::table::items::{ItemsTable, ItemsTableAttribute};
use crate::types::Extrinsic;
use crate::util_text::truncate_middle;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExtrinsicsSort {
    Id,
    BlockHeight,
}

impl SortProperty for ExtrinsicsSort {
    fn order_prefix(&self) -> &'static str {
        match self {
            ExtrinsicsSort::Id => "ID",
            ExtrinsicsSort::BlockHeight => "BLOCK_HEIGHT",
        }
    }
}

type ExtrinsicsColumn<'a> = ItemsTableAttribute<'a, Extrinsic, ExplorerContext, ExtrinsicsSort>;

/// Unsigned extrinsics have no sender; their name cell spans the sender
/// column instead.
pub fn extrinsics_table<'a>() -> ItemsTable<'a, Extrinsic, ExplorerContext, ExtrinsicsSort> {
    ItemsTable::new(vec![
        ExtrinsicsColumn::new("Extrinsic", |e: &Extrinsic, _: &ExplorerContext| link_text(e.id.clone()))
            .width(Constraint::Length(16))
            .sortable(ExtrinsicsSort::Id, SortDirection::Desc)
            .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| Some(e.id.clone()))
            .link(|e: &Extrinsic, _: &ExplorerContext| Some(Route::Extrinsic { id: e.id.clone() })),
        ExtrinsicsColumn::new("Name", |e: &Extrinsic, _: &ExplorerContext| {
            link_text(qualified_name(&e.pallet_name, &e.call_name))
        })
        .width(Constraint::Length(36))
        .col_span(|e: &Extrinsic, _: &ExplorerContext| if e.signer.is_none() { 2 } else { 1 })
        .link(|e: &Extrinsic, _: &ExplorerContext| Some(search_route(&e.pallet_name, &e.call_name))),
        ExtrinsicsColumn::new("Sender", |e: &Extrinsic, _: &ExplorerContext| {
            short_address(e.signer.as_deref().unwrap_or_default())
        })
        .width(Constraint::Length(18))
        .hide(|e: &Extrinsic, _: &ExplorerContext| e.signer.is_none())
        .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| e.signer.clone())
        .link(|e: &Extrinsic, _: &ExplorerContext| e.signer.as_deref().map(account_route)),
        ExtrinsicsColumn::new("Hash", |e: &Extrinsic, _: &ExplorerContext| truncate_middle(&e.tx_hash, 15))
            .width(Constraint::Length(16))
            .copy_to_clipboard(|e: &Extrinsic, _: &ExplorerContext| Some(e.tx_hash.clone())),
        ExtrinsicsColumn::new("Block", |e: &Extrinsic, _: &ExplorerContext| e.block_height.to_string())
            .width(Constraint::Length(12))
            .sortable(ExtrinsicsSort::BlockHeight, SortDirection::Desc),
        ExtrinsicsColumn::new("Result", |e: &Extrinsic, _: &ExplorerContext| result_chip(e.success))
            .width(Constraint::Min(10)),
    ])
    .not_found_message("No extrinsics found")
}
