//! Event list columns.

use ratatui::layout::Constraint;

use super::{args_compact, link_text, muted, qualified_name, search_route, ExplorerContext};
use crate::router::Route;
use crate::sort::{SortDirection, SortProperty};
use crate::table::items::{ItemsTable, ItemsTableAttribute};
use crate::types::Event;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventsSort {
    BlockHeight,
    Id,
}

impl SortProperty for EventsSort {
    fn order_prefix(&self) -> &'static str {
        match self {
            EventsSort::BlockHeight => "BLOCK_HEIGHT",
            EventsSort::Id => "ID",
        }
    }
}

type EventsColumn<'a> = ItemsTableAttribute<'a, Event, ExplorerContext, EventsSort>;

pub fn events_table<'a>(show_extrinsic: bool) -> ItemsTable<'a, Event, ExplorerContext, EventsSort> {
    let mut columns = vec![
        EventsColumn::new("Event", |e: &Event, _: &ExplorerContext| link_text(e.id.clone()))
            .width(Constraint::Length(18))
            .copy_to_clipboard(|e: &Event, _: &ExplorerContext| Some(e.id.clone()))
            .link(|e: &Event, _: &ExplorerContext| Some(Route::Event { id: e.id.clone() })),
        EventsColumn::new("Name", |e: &Event, _: &ExplorerContext| {
            link_text(qualified_name(&e.pallet_name, &e.event_name))
        })
        .width(Constraint::Length(36))
        .link(|e: &Event, _: &ExplorerContext| Some(search_route(&e.pallet_name, &e.event_name))),
    ];
    if show_extrinsic {
        columns.push(
            EventsColumn::new("Extrinsic", |e: &Event, _: &ExplorerContext| match e.extrinsic_ref() {
                Some(id) => link_text(id),
                None => muted("-"),
            })
            .width(Constraint::Length(16))
            .link(|e: &Event, _: &ExplorerContext| e.extrinsic_ref().map(|id| Route::Extrinsic { id })),
        );
    }
    columns.push(
        EventsColumn::new("Block", |e: &Event, _: &ExplorerContext| e.block_height.to_string())
            .width(Constraint::Length(12))
            .sortable(EventsSort::BlockHeight, SortDirection::Desc),
    );
    columns.push(
        EventsColumn::new("Parameters", |e: &Event, _: &ExplorerContext| args_compact(e.args.as_ref()))
            .width(Constraint::Min(20))
            .copy_to_clipboard(|e: &Event, _: &ExplorerContext| e.args.as_ref().map(|a| a.to_string())),
    );
    ItemsTable::new(columns).not_found_message("No events found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::resource::Resource;
    use crate::sort::SortOrder;
    use crate::table::items::SortIndicator;
    use crate::table::plain;
    use crate::tables::fixtures;

    #[test]
    fn extrinsic_column_is_optional() {
        assert_eq!(events_table(true).column_count(), 5);
        assert_eq!(events_table(false).column_count(), 4);
    }

    #[test]
    fn block_column_toggles_from_desc() {
        let table = events_table(false);
        let block = table.first_sortable().unwrap();
        let first = table.click_sort(block, None).unwrap();
        assert_eq!(first.order_by(), "BLOCK_HEIGHT_DESC");
        let second = table.click_sort(block, Some(&first)).unwrap();
        assert_eq!(second.order_by(), "BLOCK_HEIGHT_ASC");
    }

    #[test]
    fn grid_reflects_sort_and_links() {
        let table = events_table(true);
        let sort = SortOrder::new(EventsSort::BlockHeight, SortDirection::Desc);
        let pagination = Pagination {
            offset: 0,
            limit: 10,
            after: None,
            end_cursor: None,
            has_next_page: false,
            has_previous_page: false,
            total_count: Some(1),
        };
        let view = table.render(
            &Resource::ready(vec![fixtures::event("0002", None)]),
            &fixtures::ctx(),
            Some(&sort),
            Some(&pagination),
        );
        let grid = view.ready().unwrap();
        assert_eq!(grid.header[3].sort, Some(SortIndicator::Toggle { active: Some(SortDirection::Desc) }));
        let row = &grid.rows[0];
        assert_eq!(row.key, "3014339-0002-1");
        assert_eq!(row.cells[2].link, Some(Route::Extrinsic { id: "3014339-0002".into() }));
        assert_eq!(plain(&row.cells[4].content), "-");
        assert_eq!(row.cells[4].copy_value, None);
    }
}
