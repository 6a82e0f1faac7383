//! Multi-entity table: a grid of column descriptors over a collection, with
//! sort affordances in the header and an optional pagination control.
//!
//! The table holds no sort or page state. Activating a sort affordance
//! returns the next [`SortOrder`] (and calls the column's `on_sort_change`
//! hook when one is set); the pagination control only reports which page
//! intents are available. The caller turns both into new fetches.

use ratatui::layout::Constraint;

use super::{select, Content, DataFn, Identified, TableView};
use crate::pagination::Pagination;
use crate::resource::Resource;
use crate::router::Route;
use crate::sort::{SortDirection, SortOrder};

pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "No items found";
pub const DEFAULT_ERROR_MESSAGE: &str = "Unexpected error occured while fetching items";
pub const RANK_LABEL: &str = "Rank";

/// An entry of a column's sort options selector.
#[derive(Clone, Debug, PartialEq)]
pub struct SortOption<S> {
    pub label: String,
    pub value: SortOrder<S>,
}

impl<S> SortOption<S> {
    pub fn new(label: impl Into<String>, property: S, direction: SortDirection) -> Self {
        Self {
            label: label.into(),
            value: SortOrder::new(property, direction),
        }
    }
}

/// How a column can be sorted.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnSort<S> {
    /// Binary toggle on one property.
    Toggle { property: S, start_direction: SortDirection },
    /// Explicit list of orders to pick from.
    Options(Vec<SortOption<S>>),
}

pub type SortChangeFn<'a, S> = Box<dyn Fn(&SortOrder<S>) + 'a>;

/// Describes one column of an [`ItemsTable`].
pub struct ItemsTableAttribute<'a, T, A, S> {
    label: Content,
    width: Option<Constraint>,
    sort: Option<ColumnSort<S>>,
    on_sort_change: Option<SortChangeFn<'a, S>>,
    render: DataFn<'a, T, A, Content>,
    col_span: Option<DataFn<'a, T, A, u16>>,
    hide: Option<DataFn<'a, T, A, bool>>,
    copy: Option<DataFn<'a, T, A, Option<String>>>,
    link: Option<DataFn<'a, T, A, Option<Route>>>,
}

impl<'a, T, A, S> ItemsTableAttribute<'a, T, A, S> {
    pub fn new<C: Into<Content>>(label: impl Into<Content>, render: impl Fn(&T, &A) -> C + 'a) -> Self {
        Self {
            label: label.into(),
            width: None,
            sort: None,
            on_sort_change: None,
            render: Box::new(move |item, extra| render(item, extra).into()),
            col_span: None,
            hide: None,
            copy: None,
            link: None,
        }
    }

    pub fn width(mut self, width: Constraint) -> Self {
        self.width = Some(width);
        self
    }

    /// Make the column a binary sort toggle on `property`.
    pub fn sortable(mut self, property: S, start_direction: SortDirection) -> Self {
        self.sort = Some(ColumnSort::Toggle {
            property,
            start_direction,
        });
        self
    }

    /// Give the column an options selector instead of a toggle.
    pub fn sort_options(mut self, options: Vec<SortOption<S>>) -> Self {
        self.sort = Some(ColumnSort::Options(options));
        self
    }

    pub fn on_sort_change(mut self, f: impl Fn(&SortOrder<S>) + 'a) -> Self {
        self.on_sort_change = Some(Box::new(f));
        self
    }

    pub fn col_span(mut self, f: impl Fn(&T, &A) -> u16 + 'a) -> Self {
        self.col_span = Some(Box::new(f));
        self
    }

    /// Omit the cell when `f` returns true.
    pub fn hide(mut self, f: impl Fn(&T, &A) -> bool + 'a) -> Self {
        self.hide = Some(Box::new(f));
        self
    }

    pub fn copy_to_clipboard(mut self, f: impl Fn(&T, &A) -> Option<String> + 'a) -> Self {
        self.copy = Some(Box::new(f));
        self
    }

    pub fn link(mut self, f: impl Fn(&T, &A) -> Option<Route> + 'a) -> Self {
        self.link = Some(Box::new(f));
        self
    }

    pub fn sort(&self) -> Option<&ColumnSort<S>> {
        self.sort.as_ref()
    }
}

/// Sort affordance state shown in a header cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortIndicator {
    /// `active` is the current direction when this column is sorted on.
    Toggle { active: Option<SortDirection> },
    Options { labels: Vec<String>, selected: Option<usize> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderCell {
    pub label: Content,
    pub sort: Option<SortIndicator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemsCell {
    /// Index of the column descriptor that produced this cell.
    pub column: usize,
    pub content: Content,
    pub col_span: u16,
    pub copy_value: Option<String>,
    pub link: Option<Route>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemsRow {
    pub key: String,
    /// 1-based position across pages, when the table shows ranks.
    pub rank: Option<u64>,
    pub cells: Vec<ItemsCell>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageIntent {
    Next,
    Previous,
}

/// Pagination control state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablePagination {
    pub offset: u64,
    pub limit: u32,
    pub rows: usize,
    pub total_count: Option<u64>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl TablePagination {
    fn new(p: &Pagination, rows: usize) -> Self {
        Self {
            offset: p.offset,
            limit: p.limit,
            rows,
            total_count: p.total_count,
            has_next_page: p.has_next_page,
            has_previous_page: p.has_previous_page,
        }
    }

    /// Intents the control can emit right now.
    pub fn intents(&self) -> Vec<PageIntent> {
        let mut out = Vec::with_capacity(2);
        if self.has_previous_page {
            out.push(PageIntent::Previous);
        }
        if self.has_next_page {
            out.push(PageIntent::Next);
        }
        out
    }

    pub fn allows(&self, intent: PageIntent) -> bool {
        match intent {
            PageIntent::Next => self.has_next_page,
            PageIntent::Previous => self.has_previous_page,
        }
    }

    /// "21-30 of 35", or "21-30" when the total is unknown.
    pub fn range_label(&self) -> String {
        if self.rows == 0 {
            return "0 items".to_string();
        }
        let first = self.offset + 1;
        let last = self.offset + self.rows as u64;
        match self.total_count {
            Some(total) => format!("{first}-{last} of {}", crate::util_text::format_count(total)),
            None => format!("{first}-{last}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemsGrid {
    /// One width hint per declared column.
    pub colgroup: Vec<Option<Constraint>>,
    pub header: Vec<HeaderCell>,
    /// Leading rank column header, when ranks are shown.
    pub rank_header: Option<Content>,
    pub rows: Vec<ItemsRow>,
    pub pagination: Option<TablePagination>,
}

pub struct ItemsTable<'a, T, A, S> {
    columns: Vec<ItemsTableAttribute<'a, T, A, S>>,
    show_rank: bool,
    not_found_message: String,
    error_message: String,
}

impl<'a, T, A, S> ItemsTable<'a, T, A, S>
where
    T: Identified,
    S: Clone + PartialEq,
{
    pub fn new(columns: Vec<ItemsTableAttribute<'a, T, A, S>>) -> Self {
        Self {
            columns,
            show_rank: false,
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn show_rank(mut self, show: bool) -> Self {
        self.show_rank = show;
        self
    }

    pub fn not_found_message(mut self, message: impl Into<String>) -> Self {
        self.not_found_message = message.into();
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ItemsTableAttribute<'a, T, A, S>] {
        &self.columns
    }

    pub fn colgroup(&self) -> Vec<Option<Constraint>> {
        self.columns.iter().map(|c| c.width).collect()
    }

    pub fn header(&self, sort: Option<&SortOrder<S>>) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| HeaderCell {
                label: column.label.clone(),
                sort: column.sort.as_ref().map(|s| match s {
                    ColumnSort::Toggle { property, .. } => SortIndicator::Toggle {
                        active: SortOrder::direction_of(sort, property),
                    },
                    ColumnSort::Options(options) => SortIndicator::Options {
                        labels: options.iter().map(|o| o.label.clone()).collect(),
                        selected: sort.and_then(|cur| options.iter().position(|o| o.value == *cur)),
                    },
                }),
            })
            .collect()
    }

    pub fn render(
        &self,
        resource: &Resource<Vec<T>>,
        extra: &A,
        sort: Option<&SortOrder<S>>,
        pagination: Option<&Pagination>,
    ) -> TableView<ItemsGrid> {
        let items = match select(resource, &self.not_found_message, &self.error_message) {
            Ok(items) => items.map(Vec::as_slice).unwrap_or_default(),
            Err(view) => return view,
        };
        let offset = pagination.map(|p| p.offset).unwrap_or(0);
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemsRow {
                key: item.id().to_string(),
                rank: self.show_rank.then_some(offset + index as u64 + 1),
                cells: self.cells(item, extra),
            })
            .collect();
        TableView::Ready(ItemsGrid {
            colgroup: self.colgroup(),
            header: self.header(sort),
            rank_header: self.show_rank.then(|| Content::from(RANK_LABEL)),
            rows,
            pagination: pagination.map(|p| TablePagination::new(p, items.len())),
        })
    }

    fn cells(&self, item: &T, extra: &A) -> Vec<ItemsCell> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| !column.hide.as_ref().is_some_and(|hide| hide(item, extra)))
            .map(|(index, column)| ItemsCell {
                column: index,
                content: (column.render)(item, extra),
                col_span: column.col_span.as_ref().map_or(1, |span| span(item, extra).max(1)),
                copy_value: column
                    .copy
                    .as_ref()
                    .and_then(|copy| copy(item, extra))
                    .filter(|v| !v.is_empty()),
                link: column.link.as_ref().and_then(|link| link(item, extra)),
            })
            .collect()
    }

    /// Activate the sort affordance of `column`.
    ///
    /// A toggle yields its start direction when the current sort is on
    /// another property (or absent) and the flipped direction otherwise. An
    /// options selector advances to the option after the current one. The
    /// column's `on_sort_change` hook sees the result before it is returned.
    pub fn click_sort(&self, column: usize, current: Option<&SortOrder<S>>) -> Option<SortOrder<S>> {
        let col = self.columns.get(column)?;
        let next = match col.sort.as_ref()? {
            ColumnSort::Toggle {
                property,
                start_direction,
            } => SortOrder::toggle(current, property, *start_direction),
            ColumnSort::Options(options) => {
                let index = current
                    .and_then(|cur| options.iter().position(|o| o.value == *cur))
                    .map_or(0, |i| (i + 1) % options.len());
                options.get(index)?.value.clone()
            }
        };
        Self::notify(col, &next);
        Some(next)
    }

    /// Pick option `index` of the options selector in `column`.
    pub fn select_sort_option(&self, column: usize, index: usize) -> Option<SortOrder<S>> {
        let col = self.columns.get(column)?;
        let next = match col.sort.as_ref()? {
            ColumnSort::Options(options) => options.get(index)?.value.clone(),
            ColumnSort::Toggle { .. } => return None,
        };
        Self::notify(col, &next);
        Some(next)
    }

    /// Index of the first sortable column, if any.
    pub fn first_sortable(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.sort.is_some())
    }

    /// `preferred` when that column is sortable, else the first sortable one.
    pub fn sort_column(&self, preferred: usize) -> Option<usize> {
        match self.columns.get(preferred) {
            Some(c) if c.sort.is_some() => Some(preferred),
            _ => self.first_sortable(),
        }
    }

    fn notify(column: &ItemsTableAttribute<'a, T, A, S>, order: &SortOrder<S>) {
        if let Some(hook) = &column.on_sort_change {
            hook(order);
        }
    }
}
