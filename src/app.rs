use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::Config;
use crate::fetch::{Loadable, PagedLoadable, Ticket};
use crate::pagination::PaginationOptions;
use crate::router::{self, Route};
use crate::services::{self, accounts, events as events_svc, extrinsics as extrinsics_svc, FetchOutcome, FetchRequest};
use crate::sort::{SortDirection, SortOrder, SortProperty};
use crate::table::info::InfoRows;
use crate::table::items::{ItemsGrid, PageIntent};
use crate::table::TableView;
use crate::tables::{self, AccountStatsSort, EventsSort, ExplorerContext, ExtrinsicsSort};
use crate::theme::Theme;
use crate::types::{Account, AccountStats, AppEvent, Call, Event, Extrinsic, SubnetOwner};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Goto,
}

/// Side effect requested by a key handler. The binary runs fetches on the
/// runtime and writes copies to the system clipboard.
#[derive(Debug)]
pub enum Effect {
    Fetch(FetchRequest),
    Copy(String),
}

/// One pane of a screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    ExtrinsicInfo,
    EventInfo,
    CallInfo,
    AccountInfo,
    Extrinsics,
    Events,
    AccountStats,
    SubnetOwners,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::ExtrinsicInfo => "Extrinsic",
            Section::EventInfo => "Event",
            Section::CallInfo => "Call",
            Section::AccountInfo => "Account",
            Section::Extrinsics => "Extrinsics",
            Section::Events => "Events",
            Section::AccountStats => "Account statistics",
            Section::SubnetOwners => "Subnet owners",
        }
    }

    fn is_list(&self) -> bool {
        matches!(
            self,
            Section::Extrinsics | Section::Events | Section::AccountStats | Section::SubnetOwners
        )
    }
}

/// Render output of a section for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionView {
    Info(TableView<InfoRows>),
    Items(TableView<ItemsGrid>),
}

impl SectionView {
    pub fn row_count(&self) -> usize {
        match self {
            SectionView::Info(TableView::Ready(rows)) => rows.len(),
            SectionView::Items(TableView::Ready(grid)) => grid.rows.len(),
            _ => 0,
        }
    }

    /// Copy value and link of the cell under the cursor. Falls back to the
    /// first copyable / linked cell of the row.
    fn target(&self, cursor: SectionCursor) -> (Option<String>, Option<Route>) {
        match self {
            SectionView::Info(TableView::Ready(rows)) => match rows.get(cursor.row) {
                Some(row) => (row.copy_value.clone(), row.link.clone()),
                None => (None, None),
            },
            SectionView::Items(TableView::Ready(grid)) => {
                let Some(row) = grid.rows.get(cursor.row) else {
                    return (None, None);
                };
                let cell = row.cells.iter().find(|c| c.column == cursor.column);
                let copy = cell
                    .and_then(|c| c.copy_value.clone())
                    .or_else(|| row.cells.iter().find_map(|c| c.copy_value.clone()));
                let link = cell
                    .and_then(|c| c.link.clone())
                    .or_else(|| row.cells.iter().find_map(|c| c.link.clone()));
                (copy, link)
            }
            _ => (None, None),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionCursor {
    pub row: usize,
    pub column: usize,
}

#[derive(Clone, Debug)]
enum ListSource {
    Filter(Value),
    /// `Pallet.Name` search.
    Name(String),
}

#[derive(Copy, Clone, Debug)]
enum PageStep {
    Current,
    Restart,
    Next,
    Previous,
}

/// A paginated section: data, sort and what to query.
struct ListSlot<T, S> {
    data: PagedLoadable<T>,
    sort: Option<SortOrder<S>>,
    default_order: &'static str,
    source: ListSource,
}

impl<T, S> ListSlot<T, S> {
    fn new(limit: u32, sort: Option<SortOrder<S>>, default_order: &'static str) -> Self {
        Self {
            data: PagedLoadable::new(limit),
            sort,
            default_order,
            source: ListSource::Filter(Value::Null),
        }
    }

    fn step(&mut self, step: PageStep) -> Option<(Ticket, PaginationOptions)> {
        match step {
            PageStep::Current => Some(self.data.begin()),
            PageStep::Restart => Some(self.data.restart()),
            PageStep::Next => self.data.next_page(),
            PageStep::Previous => self.data.previous_page(),
        }
    }
}

impl<T, S: SortProperty> ListSlot<T, S> {
    fn order(&self) -> String {
        self.sort
            .as_ref()
            .map(SortOrder::order_by)
            .unwrap_or_else(|| self.default_order.to_string())
    }
}

/// State of the screen for one route.
struct Page {
    route: Route,
    sections: Vec<Section>,
    extrinsic: Loadable<Extrinsic>,
    event: Loadable<Event>,
    call: Loadable<Call>,
    account: Loadable<Account>,
    extrinsics: ListSlot<Extrinsic, ExtrinsicsSort>,
    events: ListSlot<Event, EventsSort>,
    stats: ListSlot<AccountStats, AccountStatsSort>,
    subnet_owners: ListSlot<SubnetOwner, ()>,
    /// Events belong to the extrinsic: fetched and shown only while it is found.
    events_follow_extrinsic: bool,
    focus: usize,
    cursors: HashMap<Section, SectionCursor>,
}

impl Page {
    fn new(route: Route, limit: u32) -> Self {
        let mut extrinsics = ListSlot::new(
            limit,
            Some(SortOrder::new(ExtrinsicsSort::Id, SortDirection::Desc)),
            extrinsics_svc::DEFAULT_ORDER,
        );
        let mut events = ListSlot::new(
            limit,
            Some(SortOrder::new(EventsSort::BlockHeight, SortDirection::Desc)),
            events_svc::DEFAULT_ORDER,
        );
        let stats = ListSlot::new(
            limit,
            Some(SortOrder::new(AccountStatsSort::Height, SortDirection::Asc)),
            accounts::STATS_DEFAULT_ORDER,
        );
        let subnet_owners = ListSlot::new(limit, None, "");
        let mut events_follow_extrinsic = false;

        let sections = match &route {
            Route::Home => vec![Section::Extrinsics, Section::Events],
            Route::Extrinsic { id } => match parse_extrinsic_id(id) {
                Some((height, index)) => {
                    events.source = ListSource::Filter(events_svc::by_extrinsic(height, index));
                    events.sort = None;
                    events.default_order = events_svc::NATURAL_ORDER;
                    events_follow_extrinsic = true;
                    vec![Section::ExtrinsicInfo, Section::Events]
                }
                None => vec![Section::ExtrinsicInfo],
            },
            Route::Event { .. } => vec![Section::EventInfo],
            Route::Call { .. } => vec![Section::CallInfo],
            Route::Account { address } => {
                extrinsics.source = ListSource::Filter(extrinsics_svc::by_signer(address));
                vec![Section::AccountInfo, Section::Extrinsics]
            }
            Route::Search { query } => {
                extrinsics.source = ListSource::Name(query.clone());
                events.source = ListSource::Name(query.clone());
                vec![Section::Extrinsics, Section::Events]
            }
            Route::Subnets => vec![Section::SubnetOwners],
            Route::AccountStats => vec![Section::AccountStats],
        };

        Self {
            route,
            sections,
            extrinsic: Loadable::new(),
            event: Loadable::new(),
            call: Loadable::new(),
            account: Loadable::new(),
            extrinsics,
            events,
            stats,
            subnet_owners,
            events_follow_extrinsic,
            focus: 0,
            cursors: HashMap::new(),
        }
    }

    /// Insert or drop the events pane after the extrinsic settles.
    fn set_events_visible(&mut self, visible: bool) {
        let shown = self.sections.contains(&Section::Events);
        if visible && !shown {
            let at = self
                .sections
                .iter()
                .position(|s| *s == Section::ExtrinsicInfo)
                .map_or(self.sections.len(), |i| i + 1);
            self.sections.insert(at, Section::Events);
        } else if !visible && shown {
            self.sections.retain(|s| *s != Section::Events);
            self.cursors.remove(&Section::Events);
            self.focus = self.focus.min(self.sections.len().saturating_sub(1));
        }
    }

    fn fetch(&mut self, section: Section, step: PageStep) -> Option<FetchRequest> {
        let route = self.route.clone();
        match (section, route) {
            (Section::ExtrinsicInfo, Route::Extrinsic { id }) => Some(FetchRequest::Extrinsic {
                ticket: self.extrinsic.begin(),
                id,
            }),
            (Section::EventInfo, Route::Event { id }) => Some(FetchRequest::Event {
                ticket: self.event.begin(),
                id,
            }),
            (Section::CallInfo, Route::Call { id }) => Some(FetchRequest::Call {
                ticket: self.call.begin(),
                id,
            }),
            (Section::AccountInfo, Route::Account { address }) => Some(FetchRequest::Account {
                ticket: self.account.begin(),
                address,
            }),
            (Section::Extrinsics, _) => {
                let order = self.extrinsics.order();
                let (ticket, options) = self.extrinsics.step(step)?;
                Some(match &self.extrinsics.source {
                    ListSource::Filter(filter) => FetchRequest::Extrinsics {
                        ticket,
                        filter: filter.clone(),
                        order,
                        options,
                    },
                    ListSource::Name(name) => FetchRequest::ExtrinsicsByName {
                        ticket,
                        name: name.clone(),
                        order,
                        options,
                    },
                })
            }
            (Section::Events, _) => {
                let order = self.events.order();
                let (ticket, options) = self.events.step(step)?;
                Some(match &self.events.source {
                    ListSource::Filter(filter) => FetchRequest::Events {
                        ticket,
                        filter: filter.clone(),
                        order,
                        options,
                    },
                    ListSource::Name(name) => FetchRequest::EventsByName {
                        ticket,
                        name: name.clone(),
                        order,
                        options,
                    },
                })
            }
            (Section::AccountStats, _) => {
                let order = self.stats.order();
                let (ticket, options) = self.stats.step(step)?;
                Some(FetchRequest::AccountStats { ticket, order, options })
            }
            (Section::SubnetOwners, _) => {
                let (ticket, options) = self.subnet_owners.step(step)?;
                Some(FetchRequest::SubnetOwners { ticket, options })
            }
            (section, route) => {
                log::debug!("[app] {section:?} has nothing to fetch on {route}");
                None
            }
        }
    }
}

/// `<block>-<index>` extrinsic id, e.g. `3014339-0002`.
fn parse_extrinsic_id(id: &str) -> Option<(u64, i64)> {
    let (height, index) = id.trim().split_once('-')?;
    Some((height.parse().ok()?, index.parse().ok()?))
}

fn is_numeric_id(s: &str, parts: usize) -> bool {
    let segments: Vec<&str> = s.split('-').collect();
    segments.len() == parts
        && segments
            .iter()
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()))
}

/// Route for whatever the user typed into the goto prompt.
///
/// Links and paths go through the router. Otherwise an address opens the
/// account, `a-b-c` an event, `a-b` an extrinsic and `Pallet.Name` a search.
pub fn resolve_goto(input: &str) -> Option<Route> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains("://") || s.starts_with('/') || s.starts_with('#') {
        return router::parse(s);
    }
    if accounts::is_valid_address(s) {
        return Some(Route::Account { address: s.to_string() });
    }
    if is_numeric_id(s, 3) {
        return Some(Route::Event { id: s.to_string() });
    }
    if is_numeric_id(s, 2) {
        return Some(Route::Extrinsic { id: s.to_string() });
    }
    if services::split_name(s).is_ok() {
        return Some(Route::Search { query: s.to_string() });
    }
    router::parse(s)
}

const TOAST_DURATION: Duration = Duration::from_secs(2);
const HISTORY_LIMIT: usize = 50;

pub struct App {
    quit: bool,
    page: Page,
    history: Vec<Route>,
    page_size: u32,

    fps: u32,
    fps_choices: Vec<u32>,
    theme: Theme,

    network: String,
    ss58_prefix: u16,

    input_mode: InputMode,
    goto_input: String,

    // (message, is_error, shown at)
    toast: Option<(String, bool, Instant)>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            quit: false,
            page: Page::new(config.initial_route.clone(), config.page_size),
            history: Vec::new(),
            page_size: config.page_size,
            fps: config.render_fps,
            fps_choices: vec![10, 20, 30, 60],
            theme: config.theme,
            network: config.network.clone(),
            ss58_prefix: config.ss58_prefix,
            input_mode: InputMode::Normal,
            goto_input: String::new(),
            toast: None,
        }
    }

    // ----- accessors -----
    pub fn quit_flag(&self) -> bool {
        self.quit
    }
    pub fn fps(&self) -> u32 {
        self.fps
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn route(&self) -> &Route {
        &self.page.route
    }
    pub fn sections(&self) -> &[Section] {
        &self.page.sections
    }
    pub fn focus(&self) -> usize {
        self.page.focus
    }
    pub fn focused_section(&self) -> Option<Section> {
        self.page.sections.get(self.page.focus).copied()
    }
    pub fn cursor(&self, section: Section) -> SectionCursor {
        self.page.cursors.get(&section).copied().unwrap_or_default()
    }
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }
    pub fn goto_input(&self) -> &str {
        &self.goto_input
    }
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Descriptor context for a frame rendered at `now`.
    pub fn context(&self, now: DateTime<Utc>) -> ExplorerContext {
        ExplorerContext::new(self.network.clone(), self.ss58_prefix, now)
    }

    /// Show a toast notification for 2 seconds
    pub fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), false, Instant::now()));
    }

    pub fn show_error_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), true, Instant::now()));
    }

    /// Current toast and whether it reports an error, while still visible.
    pub fn toast_message(&self) -> Option<(&str, bool)> {
        self.toast.as_ref().and_then(|(msg, is_error, at)| {
            if at.elapsed() < TOAST_DURATION {
                Some((msg.as_str(), *is_error))
            } else {
                None
            }
        })
    }

    // ----- knobs -----
    pub fn cycle_fps(&mut self) {
        let idx = self.fps_choices.iter().position(|&v| v == self.fps).unwrap_or(0);
        self.fps = self.fps_choices[(idx + 1) % self.fps_choices.len()];
        self.show_toast(format!("{} fps", self.fps));
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.show_toast(format!("Theme: {}", self.theme));
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    // ----- rendering -----
    pub fn section_view(&self, section: Section, ctx: &ExplorerContext) -> SectionView {
        let p = &self.page;
        match section {
            Section::ExtrinsicInfo => SectionView::Info(tables::extrinsic_info_table().render(p.extrinsic.resource(), ctx)),
            Section::EventInfo => SectionView::Info(tables::event_info_table().render(p.event.resource(), ctx)),
            Section::CallInfo => SectionView::Info(tables::call_info_table().render(p.call.resource(), ctx)),
            Section::AccountInfo => SectionView::Info(tables::account_info_table().render(p.account.resource(), ctx)),
            Section::Extrinsics => SectionView::Items(tables::extrinsics_table().render(
                p.extrinsics.data.items(),
                ctx,
                p.extrinsics.sort.as_ref(),
                p.extrinsics.data.pagination(),
            )),
            Section::Events => SectionView::Items(tables::events_table(self.events_show_extrinsic()).render(
                p.events.data.items(),
                ctx,
                p.events.sort.as_ref(),
                p.events.data.pagination(),
            )),
            Section::AccountStats => SectionView::Items(tables::account_stats_table().render(
                p.stats.data.items(),
                ctx,
                p.stats.sort.as_ref(),
                p.stats.data.pagination(),
            )),
            Section::SubnetOwners => SectionView::Items(tables::subnet_owners_table().render(
                p.subnet_owners.data.items(),
                ctx,
                None,
                p.subnet_owners.data.pagination(),
            )),
        }
    }

    /// Section title with the known total, e.g. "Events (1,204)".
    pub fn section_title(&self, section: Section) -> String {
        let p = &self.page;
        let total = match section {
            Section::Extrinsics => p.extrinsics.data.pagination().and_then(|pg| pg.total_count),
            Section::Events => p.events.data.pagination().and_then(|pg| pg.total_count),
            Section::AccountStats => p.stats.data.pagination().and_then(|pg| pg.total_count),
            Section::SubnetOwners => p.subnet_owners.data.pagination().and_then(|pg| pg.total_count),
            _ => None,
        };
        match total {
            Some(n) => format!("{} ({})", section.title(), crate::util_text::format_count(n)),
            None => section.title().to_string(),
        }
    }

    fn events_show_extrinsic(&self) -> bool {
        !matches!(self.page.route, Route::Extrinsic { .. })
    }

    fn now_view(&self, section: Section) -> SectionView {
        self.section_view(section, &self.context(Utc::now()))
    }

    fn column_count(&self, section: Section) -> usize {
        match section {
            Section::Extrinsics => tables::extrinsics_table().column_count(),
            Section::Events => tables::events_table(self.events_show_extrinsic()).column_count(),
            Section::AccountStats => tables::account_stats_table().column_count(),
            Section::SubnetOwners => tables::subnet_owners_table().column_count(),
            _ => 1,
        }
    }

    // ----- navigation -----

    /// Open the initial route. Returns the fetches it needs.
    pub fn start(&mut self) -> Vec<Effect> {
        log::info!("[app] opening {}", self.page.route);
        self.fetch_all(PageStep::Current)
    }

    pub fn navigate(&mut self, route: Route) -> Vec<Effect> {
        if route == self.page.route {
            return self.refetch();
        }
        log::info!("[app] navigate {} -> {}", self.page.route, route);
        let prev = std::mem::replace(&mut self.page, Page::new(route, self.page_size));
        self.history.push(prev.route);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.fetch_all(PageStep::Current)
    }

    pub fn back(&mut self) -> Vec<Effect> {
        let Some(route) = self.history.pop() else {
            return Vec::new();
        };
        log::info!("[app] back to {route}");
        self.page = Page::new(route, self.page_size);
        self.fetch_all(PageStep::Current)
    }

    /// Reload every section of the current screen.
    pub fn refetch(&mut self) -> Vec<Effect> {
        self.fetch_all(PageStep::Current)
    }

    fn fetch_all(&mut self, step: PageStep) -> Vec<Effect> {
        let deferred = self.page.events_follow_extrinsic;
        let sections = self.page.sections.clone();
        sections
            .into_iter()
            .filter(|s| !(deferred && *s == Section::Events))
            .filter_map(|s| self.page.fetch(s, step))
            .map(Effect::Fetch)
            .collect()
    }

    // ----- fetch results -----
    pub fn on_event(&mut self, ev: AppEvent) -> Vec<Effect> {
        match ev {
            AppEvent::Quit => {
                self.quit = true;
                Vec::new()
            }
            AppEvent::Fetched(outcome) => self.on_fetched(outcome),
        }
    }

    /// Settle the slot the outcome belongs to. Stale outcomes are ignored.
    /// May return follow-up fetches.
    pub fn on_fetched(&mut self, outcome: FetchOutcome) -> Vec<Effect> {
        let p = &mut self.page;
        match outcome {
            FetchOutcome::Extrinsic { ticket, result } => {
                let found = matches!(result, Ok(Some(_)));
                if p.extrinsic.settle(ticket, result) && p.events_follow_extrinsic {
                    p.set_events_visible(found);
                    if found {
                        return p
                            .fetch(Section::Events, PageStep::Current)
                            .map(Effect::Fetch)
                            .into_iter()
                            .collect();
                    }
                }
            }
            FetchOutcome::Event { ticket, result } => {
                p.event.settle(ticket, result);
            }
            FetchOutcome::Call { ticket, result } => {
                p.call.settle(ticket, result);
            }
            FetchOutcome::Account { ticket, result } => {
                p.account.settle(ticket, result);
            }
            FetchOutcome::Events { ticket, result } => {
                p.events.data.settle(ticket, result);
            }
            FetchOutcome::Extrinsics { ticket, result } => {
                p.extrinsics.data.settle(ticket, result);
            }
            FetchOutcome::AccountStats { ticket, result } => {
                p.stats.data.settle(ticket, result);
            }
            FetchOutcome::SubnetOwners { ticket, result } => {
                p.subnet_owners.data.settle(ticket, result);
            }
        }
        Vec::new()
    }

    // ----- focus and cursor -----
    pub fn next_section(&mut self) {
        let n = self.page.sections.len().max(1);
        self.page.focus = (self.page.focus + 1) % n;
    }

    pub fn prev_section(&mut self) {
        let n = self.page.sections.len().max(1);
        self.page.focus = (self.page.focus + n - 1) % n;
    }

    fn update_cursor(&mut self, f: impl FnOnce(&mut SectionCursor, usize, usize)) {
        let Some(section) = self.focused_section() else {
            return;
        };
        let rows = self.now_view(section).row_count();
        let columns = self.column_count(section);
        let cursor = self.page.cursors.entry(section).or_default();
        f(cursor, rows, columns);
    }

    pub fn up(&mut self) {
        self.update_cursor(|c, _, _| c.row = c.row.saturating_sub(1));
    }

    pub fn down(&mut self) {
        self.update_cursor(|c, rows, _| {
            if c.row + 1 < rows {
                c.row += 1;
            }
        });
    }

    pub fn left(&mut self) {
        self.update_cursor(|c, _, _| c.column = c.column.saturating_sub(1));
    }

    pub fn right(&mut self) {
        self.update_cursor(|c, _, columns| {
            if c.column + 1 < columns {
                c.column += 1;
            }
        });
    }

    pub fn home(&mut self) {
        self.update_cursor(|c, _, _| c.row = 0);
    }

    pub fn end(&mut self) {
        self.update_cursor(|c, rows, _| c.row = rows.saturating_sub(1));
    }

    // ----- actions -----

    /// Follow the link under the cursor.
    pub fn activate(&mut self) -> Vec<Effect> {
        let Some(section) = self.focused_section() else {
            return Vec::new();
        };
        match self.now_view(section).target(self.cursor(section)).1 {
            Some(route) => self.navigate(route),
            None => Vec::new(),
        }
    }

    pub fn copy_selected(&mut self) -> Vec<Effect> {
        let Some(section) = self.focused_section() else {
            return Vec::new();
        };
        match self.now_view(section).target(self.cursor(section)).0 {
            Some(value) => {
                self.show_toast("Copied");
                vec![Effect::Copy(value)]
            }
            None => {
                self.show_toast("Nothing to copy");
                Vec::new()
            }
        }
    }

    /// Copy the deep link of the current screen.
    pub fn copy_route(&mut self) -> Vec<Effect> {
        self.show_toast("Copied link");
        vec![Effect::Copy(self.page.route.to_string())]
    }

    /// Activate the sort affordance of the focused column (or of the first
    /// sortable column) and reload from the first page.
    pub fn sort_focused(&mut self) -> Vec<Effect> {
        let Some(section) = self.focused_section() else {
            return Vec::new();
        };
        let column = self.cursor(section).column;
        let changed = match section {
            Section::Extrinsics => {
                let table = tables::extrinsics_table();
                let next = table
                    .sort_column(column)
                    .and_then(|c| table.click_sort(c, self.page.extrinsics.sort.as_ref()));
                if let Some(order) = next {
                    self.page.extrinsics.sort = Some(order);
                    true
                } else {
                    false
                }
            }
            Section::Events => {
                let table = tables::events_table(self.events_show_extrinsic());
                let next = table
                    .sort_column(column)
                    .and_then(|c| table.click_sort(c, self.page.events.sort.as_ref()));
                if let Some(order) = next {
                    self.page.events.sort = Some(order);
                    true
                } else {
                    false
                }
            }
            Section::AccountStats => {
                let table = tables::account_stats_table();
                let next = table
                    .sort_column(column)
                    .and_then(|c| table.click_sort(c, self.page.stats.sort.as_ref()));
                if let Some(order) = next {
                    self.page.stats.sort = Some(order);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
        if !changed {
            return Vec::new();
        }
        self.page.cursors.entry(section).or_default().row = 0;
        self.page.fetch(section, PageStep::Restart).map(Effect::Fetch).into_iter().collect()
    }

    /// Move the focused list (or the first list on screen) one page.
    pub fn page(&mut self, intent: PageIntent) -> Vec<Effect> {
        let section = self
            .focused_section()
            .filter(Section::is_list)
            .or_else(|| self.page.sections.iter().copied().find(Section::is_list));
        let Some(section) = section else {
            return Vec::new();
        };
        let step = match intent {
            PageIntent::Next => PageStep::Next,
            PageIntent::Previous => PageStep::Previous,
        };
        match self.page.fetch(section, step) {
            Some(request) => {
                self.page.cursors.entry(section).or_default().row = 0;
                vec![Effect::Fetch(request)]
            }
            None => Vec::new(),
        }
    }

    // ----- goto prompt -----
    pub fn start_goto(&mut self) {
        self.input_mode = InputMode::Goto;
        self.goto_input.clear();
    }

    pub fn goto_add_char(&mut self, ch: char) {
        self.goto_input.push(ch);
    }

    pub fn goto_backspace(&mut self) {
        self.goto_input.pop();
    }

    pub fn cancel_goto(&mut self) {
        self.input_mode = InputMode::Normal;
        self.goto_input.clear();
    }

    pub fn submit_goto(&mut self) -> Vec<Effect> {
        let input = std::mem::take(&mut self.goto_input);
        self.input_mode = InputMode::Normal;
        match resolve_goto(&input) {
            Some(route) => self.navigate(route),
            None => {
                if !input.trim().is_empty() {
                    self.show_error_toast(format!("Nothing to open for '{}'", input.trim()));
                }
                Vec::new()
            }
        }
    }
}
