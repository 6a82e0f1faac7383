//! Generic table behaviour through the public API: state priority, row
//! order, hidden cells, ranks across pages, sort toggles, copy values and
//! structure stability.

use anyhow::anyhow;
use taox::pagination::Pagination;
use taox::resource::Resource;
use taox::sort::{SortDirection, SortOrder};
use taox::table::info::{InfoTable, InfoTableAttribute};
use taox::table::items::{ItemsTable, ItemsTableAttribute};
use taox::table::{plain, Identified, TableView};

struct Validator {
    hotkey: String,
    stake: u64,
    name: Option<String>,
}

impl Identified for Validator {
    fn id(&self) -> &str {
        &self.hotkey
    }
}

#[derive(Clone, Debug, PartialEq)]
enum By {
    Stake,
}

fn validator(hotkey: &str, stake: u64, name: Option<&str>) -> Validator {
    Validator {
        hotkey: hotkey.to_string(),
        stake,
        name: name.map(str::to_string),
    }
}

fn info_table<'a>() -> InfoTable<'a, Validator, ()> {
    InfoTable::new(vec![
        InfoTableAttribute::new("Hotkey", |v: &Validator, _: &()| v.hotkey.clone())
            .copy_to_clipboard(|v: &Validator, _: &()| Some(v.hotkey.clone())),
        InfoTableAttribute::new("Name", |v: &Validator, _: &()| v.name.clone().unwrap_or_default())
            .hide(|v: &Validator, _: &()| v.name.is_none()),
        InfoTableAttribute::new("Stake", |v: &Validator, _: &()| v.stake.to_string()),
    ])
}

fn items_table<'a>() -> ItemsTable<'a, Validator, (), By> {
    ItemsTable::new(vec![
        ItemsTableAttribute::new("Hotkey", |v: &Validator, _: &()| v.hotkey.clone())
            .copy_to_clipboard(|v: &Validator, _: &()| (v.stake > 0).then(|| v.hotkey.clone())),
        ItemsTableAttribute::new("Name", |v: &Validator, _: &()| v.name.clone().unwrap_or_default())
            .hide(|v: &Validator, _: &()| v.name.is_none()),
        ItemsTableAttribute::new("Stake", |v: &Validator, _: &()| v.stake.to_string())
            .sortable(By::Stake, SortDirection::Desc),
    ])
    .show_rank(true)
    .not_found_message("No validators")
}

fn resource<T>(data: Option<T>, loading: bool, not_found: bool, failed: bool) -> Resource<T> {
    Resource {
        data,
        loading,
        not_found,
        error: failed.then(|| anyhow!("indexer unreachable")),
    }
}

#[test]
fn loading_wins_over_every_other_state() {
    let view = info_table().render(&resource(Some(validator("a", 1, None)), true, true, true), &());
    assert_eq!(view, TableView::Loading);
    let view = items_table().render(&resource(Some(vec![]), true, true, true), &(), None, None);
    assert_eq!(view, TableView::Loading);
}

#[test]
fn not_found_wins_over_error_and_data() {
    let view = items_table().render(&resource(Some(vec![validator("a", 1, None)]), false, true, true), &(), None, None);
    assert_eq!(view, TableView::NotFound { message: "No validators".into() });
    let view = info_table().render(&resource(Some(validator("a", 1, None)), false, true, true), &());
    assert_eq!(view, TableView::NotFound { message: "No item found".into() });
}

#[test]
fn error_wins_over_data_and_is_reported() {
    let view = info_table().render(&resource(Some(validator("a", 1, None)), false, false, true), &());
    match view {
        TableView::Error { message, details, reported } => {
            assert_eq!(message, "Unexpected error occured while fetching data");
            assert!(details.contains("indexer unreachable"));
            assert!(reported);
        }
        other => panic!("expected error view, got {other:?}"),
    }
}

#[test]
fn info_rows_follow_descriptor_order_and_skip_hidden() {
    let view = info_table().render(&Resource::ready(validator("5F", 7, None)), &());
    let rows = view.ready().unwrap();
    let labels: Vec<String> = rows.iter().map(|r| plain(&r.label)).collect();
    assert_eq!(labels, ["Hotkey", "Stake"]);
    assert_eq!(rows[0].copy_value.as_deref(), Some("5F"));
    assert_eq!(rows[1].copy_value, None);
}

#[test]
fn rows_keep_input_order_with_continuous_ranks() {
    let items = vec![validator("c", 3, Some("gamma")), validator("a", 0, None), validator("b", 9, Some("beta"))];
    let pagination = Pagination {
        offset: 20,
        limit: 10,
        after: None,
        end_cursor: None,
        has_next_page: false,
        has_previous_page: true,
        total_count: Some(23),
    };
    let view = items_table().render(&Resource::ready(items), &(), None, Some(&pagination));
    let grid = view.ready().unwrap();

    let keys: Vec<&str> = grid.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, ["c", "a", "b"]);
    let ranks: Vec<Option<u64>> = grid.rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, [Some(21), Some(22), Some(23)]);
    assert_eq!(grid.pagination.as_ref().unwrap().range_label(), "21-23 of 23");

    // Hidden name cell is omitted; the others still render.
    let columns: Vec<usize> = grid.rows[1].cells.iter().map(|c| c.column).collect();
    assert_eq!(columns, [0, 2]);
    assert_eq!(plain(&grid.rows[1].cells[1].content), "0");

    // Copy value only where the descriptor yields one.
    assert_eq!(grid.rows[0].cells[0].copy_value.as_deref(), Some("c"));
    assert_eq!(grid.rows[1].cells[0].copy_value, None);

    // Structure does not depend on the data.
    assert_eq!(grid.colgroup.len(), 3);
    assert_eq!(grid.header.len(), 3);
}

#[test]
fn sort_toggle_starts_desc_then_flips() {
    let table = items_table();
    let first = table.click_sort(2, None).unwrap();
    assert_eq!(first, SortOrder::new(By::Stake, SortDirection::Desc));
    let second = table.click_sort(2, Some(&first)).unwrap();
    assert_eq!(second.direction, SortDirection::Asc);
    assert!(table.click_sort(0, Some(&second)).is_none());
}
