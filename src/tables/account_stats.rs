//! Account statistics per block height.

use ratatui::layout::Constraint;

use super::{time_utc, ExplorerContext};
use crate::sort::{SortDirection, SortProperty};
use crate::table::items::{ItemsTable, ItemsTableAttribute, SortOption};
use crate::types::AccountStats;
use crate::util_text::format_count;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccountStatsSort {
    Height,
}

impl SortProperty for AccountStatsSort {
    fn order_prefix(&self) -> &'static str {
        match self {
            AccountStatsSort::Height => "HEIGHT",
        }
    }
}

type StatsColumn<'a> = ItemsTableAttribute<'a, AccountStats, ExplorerContext, AccountStatsSort>;

fn count_column<'a>(label: &'static str, value: fn(&AccountStats) -> u64) -> StatsColumn<'a> {
    StatsColumn::new(label, move |s: &AccountStats, _: &ExplorerContext| format_count(value(s)))
        .width(Constraint::Length(14))
        .copy_to_clipboard(move |s: &AccountStats, _: &ExplorerContext| Some(value(s).to_string()))
}

pub fn account_stats_table<'a>() -> ItemsTable<'a, AccountStats, ExplorerContext, AccountStatsSort> {
    ItemsTable::new(vec![
        StatsColumn::new("Height", |s: &AccountStats, _: &ExplorerContext| s.height.to_string())
            .width(Constraint::Length(12))
            .sort_options(vec![
                SortOption::new("Oldest first", AccountStatsSort::Height, SortDirection::Asc),
                SortOption::new("Newest first", AccountStatsSort::Height, SortDirection::Desc),
            ]),
        StatsColumn::new("Timestamp", |s: &AccountStats, _: &ExplorerContext| time_utc(s.timestamp.as_ref()))
            .width(Constraint::Length(26)),
        count_column("Total", |s| s.total),
        count_column("Holders", |s| s.holders),
        count_column("Active", |s| s.active),
        count_column("Active holders", |s| s.active_holders),
    ])
    .not_found_message("No account statistics found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use crate::sort::SortOrder;
    use crate::table::plain;
    use crate::tables::fixtures;

    fn stats(height: u64) -> AccountStats {
        AccountStats {
            id: height.to_string(),
            height,
            active: 1_200,
            holders: 50_000,
            total: 1_234_567,
            active_holders: 900,
            timestamp: None,
        }
    }

    #[test]
    fn counts_are_grouped_and_copy_raw() {
        let view = account_stats_table().render(&Resource::ready(vec![stats(100)]), &fixtures::ctx(), None, None);
        let row = &view.ready().unwrap().rows[0];
        assert_eq!(plain(&row.cells[2].content), "1,234,567");
        assert_eq!(row.cells[2].copy_value.as_deref(), Some("1234567"));
    }

    #[test]
    fn height_options_flip_between_oldest_and_newest() {
        let table = account_stats_table();
        let asc = SortOrder::new(AccountStatsSort::Height, SortDirection::Asc);
        let next = table.click_sort(0, Some(&asc)).unwrap();
        assert_eq!(next.order_by(), "HEIGHT_DESC");
        assert_eq!(table.select_sort_option(0, 0).unwrap().order_by(), "HEIGHT_ASC");
    }
}
