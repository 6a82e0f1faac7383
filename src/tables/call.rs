//! Call detail table.

use super::{
    account_route, args_pretty, link_text, qualified_name, result_chip, search_route, spec_version, time_ago, time_utc,
    ExplorerContext,
};
use crate::router::Route;
use crate::table::info::{InfoTable, InfoTableAttribute};
use crate::types::Call;

type CallAttribute<'a> = InfoTableAttribute<'a, Call, ExplorerContext>;

pub fn call_info_table<'a>() -> InfoTable<'a, Call, ExplorerContext> {
    InfoTable::new(vec![
        CallAttribute::new("Timestamp", |c: &Call, _: &ExplorerContext| time_utc(c.timestamp.as_ref())),
        CallAttribute::new("Block time", |c: &Call, ctx: &ExplorerContext| time_ago(c.timestamp.as_ref(), ctx)),
        CallAttribute::new("Block", |c: &Call, _: &ExplorerContext| c.block_height.to_string())
            .copy_to_clipboard(|c: &Call, _: &ExplorerContext| c.block_id.clone()),
        CallAttribute::new("Extrinsic", |c: &Call, _: &ExplorerContext| link_text(c.extrinsic_id.clone()))
            .copy_to_clipboard(|c: &Call, _: &ExplorerContext| Some(c.extrinsic_id.clone()))
            .link(|c: &Call, _: &ExplorerContext| {
                Some(Route::Extrinsic {
                    id: c.extrinsic_id.clone(),
                })
            }),
        CallAttribute::new("Parent call", |c: &Call, _: &ExplorerContext| {
            link_text(c.parent_id.clone().unwrap_or_default())
        })
        .copy_to_clipboard(|c: &Call, _: &ExplorerContext| c.parent_id.clone())
        .link(|c: &Call, _: &ExplorerContext| c.parent_id.clone().map(|id| Route::Call { id }))
        .hide(|c: &Call, _: &ExplorerContext| c.parent_id.is_none()),
        CallAttribute::new("Sender", |c: &Call, _: &ExplorerContext| link_text(c.caller.clone().unwrap_or_default()))
            .copy_to_clipboard(|c: &Call, _: &ExplorerContext| c.caller.clone())
            .link(|c: &Call, _: &ExplorerContext| c.caller.as_deref().map(account_route))
            .hide(|c: &Call, _: &ExplorerContext| c.caller.is_none()),
        CallAttribute::new("Result", |c: &Call, _: &ExplorerContext| result_chip(c.success)),
        CallAttribute::new("Name", |c: &Call, _: &ExplorerContext| link_text(qualified_name(&c.pallet_name, &c.call_name)))
            .link(|c: &Call, _: &ExplorerContext| Some(search_route(&c.pallet_name, &c.call_name))),
        CallAttribute::new("Parameters", |c: &Call, _: &ExplorerContext| args_pretty(&c.args))
            .copy_to_clipboard(|c: &Call, _: &ExplorerContext| serde_json::to_string_pretty(&c.args).ok()),
        CallAttribute::new("Spec version", |c: &Call, _: &ExplorerContext| spec_version(c.spec_version)),
    ])
    .not_found_message("No call found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use crate::table::plain;
    use crate::tables::fixtures;

    fn labels(call: Call) -> Vec<String> {
        let view = call_info_table().render(&Resource::ready(call), &fixtures::ctx());
        view.ready().unwrap().iter().map(|r| plain(&r.label)).collect()
    }

    #[test]
    fn top_level_call_hides_parent_and_sender() {
        let labels = labels(fixtures::call(None, None));
        assert!(!labels.iter().any(|l| l == "Parent call"));
        assert!(!labels.iter().any(|l| l == "Sender"));
        assert_eq!(labels.first().map(String::as_str), Some("Timestamp"));
        assert_eq!(labels.last().map(String::as_str), Some("Spec version"));
    }

    #[test]
    fn nested_call_links_parent() {
        let view = call_info_table().render(&Resource::ready(fixtures::call(Some("3014339-0002-0"), Some("5Grw"))), &fixtures::ctx());
        let rows = view.ready().unwrap();
        let parent = rows.iter().find(|r| plain(&r.label) == "Parent call").unwrap();
        assert_eq!(parent.link, Some(Route::Call { id: "3014339-0002-0".into() }));
        let result = rows.iter().find(|r| plain(&r.label) == "Result").unwrap();
        assert_eq!(plain(&result.value), "✗ Fail");
    }

    #[test]
    fn not_found_message_is_call_specific() {
        let view = call_info_table().render(&Resource::not_found(), &fixtures::ctx());
        assert_eq!(
            view,
            crate::table::TableView::NotFound {
                message: "No call found".into()
            }
        );
    }
}
