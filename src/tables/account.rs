//! Account detail table.

use super::{muted, ExplorerContext};
use crate::table::info::{InfoTable, InfoTableAttribute};
use crate::types::Account;

type AccountAttribute<'a> = InfoTableAttribute<'a, Account, ExplorerContext>;

pub fn account_info_table<'a>() -> InfoTable<'a, Account, ExplorerContext> {
    InfoTable::new(vec![
        AccountAttribute::new("Address", |a: &Account, _: &ExplorerContext| a.address.clone())
            .copy_to_clipboard(|a: &Account, _: &ExplorerContext| Some(a.address.clone())),
        AccountAttribute::new("Identity", |a: &Account, _: &ExplorerContext| a.identity.clone().unwrap_or_default())
            .hide(|a: &Account, _: &ExplorerContext| a.identity.is_none()),
        AccountAttribute::new("Network", |_: &Account, ctx: &ExplorerContext| ctx.network.clone()),
        AccountAttribute::new("SS58 prefix", |_: &Account, ctx: &ExplorerContext| {
            muted(ctx.ss58_prefix.to_string())
        }),
    ])
    .not_found_message("No account found")
}
