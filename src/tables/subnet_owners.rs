//! Ranked subnet owners.

use ratatui::layout::Constraint;

use super::{account_route, link_text, ExplorerContext};
use crate::table::items::{ItemsTable, ItemsTableAttribute};
use crate::types::SubnetOwner;

/// Subnet registrations, ranked. Not sortable.
pub fn subnet_owners_table<'a>() -> ItemsTable<'a, SubnetOwner, ExplorerContext, ()> {
    ItemsTable::new(vec![
        ItemsTableAttribute::new("Block", |s: &SubnetOwner, _: &ExplorerContext| s.height.to_string())
            .width(Constraint::Length(12)),
        ItemsTableAttribute::new("Owner", |s: &SubnetOwner, _: &ExplorerContext| link_text(s.owner.clone()))
            .width(Constraint::Min(48))
            .copy_to_clipboard(|s: &SubnetOwner, _: &ExplorerContext| Some(s.owner.clone()))
            .link(|s: &SubnetOwner, _: &ExplorerContext| Some(account_route(&s.owner))),
    ])
    .show_rank(true)
    .not_found_message("No subnet owners found")
}
