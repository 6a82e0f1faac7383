//! Paint full screens into a ratatui `TestBackend` and check what lands in
//! the buffer.

use anyhow::anyhow;
use chrono::{TimeZone, Utc};
use ratatui::{backend::TestBackend, Terminal};
use taox::app::{App, Effect};
use taox::config::{from_args, CliArgs};
use taox::pagination::ItemsResponse;
use taox::router::Route;
use taox::services::{FetchOutcome, FetchRequest};
use taox::tables::ExplorerContext;
use taox::types::SubnetOwner;
use taox::ui;

fn app_at(route: Route) -> (App, Vec<FetchRequest>) {
    let mut cfg = from_args(CliArgs::default()).unwrap();
    cfg.initial_route = route;
    let mut app = App::new(&cfg);
    let requests = app
        .start()
        .into_iter()
        .filter_map(|e| match e {
            Effect::Fetch(r) => Some(r),
            Effect::Copy(_) => None,
        })
        .collect();
    (app, requests)
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    let ctx = ExplorerContext::new("bittensor", 42, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    terminal.draw(|f| ui::draw_with(f, app, &ctx)).unwrap();

    let buf = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn loading_screen_shows_placeholder() {
    let (app, requests) = app_at(Route::Subnets);
    assert_eq!(requests.len(), 1);
    let out = screen(&app);
    assert!(out.contains("Subnet owners"));
    assert!(out.contains("Loading…"));
}

#[test]
fn subnet_owners_grid_with_ranks() {
    let (mut app, requests) = app_at(Route::Subnets);
    app.on_fetched(FetchOutcome::SubnetOwners {
        ticket: requests[0].ticket(),
        result: Ok(ItemsResponse {
            data: vec![
                SubnetOwner {
                    id: "1".into(),
                    height: 812,
                    owner: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".into(),
                },
                SubnetOwner {
                    id: "2".into(),
                    height: 9000,
                    owner: "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty".into(),
                },
            ],
            end_cursor: None,
            has_next_page: false,
            has_previous_page: false,
            total_count: Some(2),
        }),
    });

    let out = screen(&app);
    assert!(out.contains("Subnet owners (2)"), "{out}");
    assert!(out.contains("Rank"));
    assert!(out.contains("812"));
    assert!(out.contains("9000"));
    assert!(out.contains("1-2 of 2"));
}

#[test]
fn failed_fetch_shows_reported_error() {
    let (mut app, requests) = app_at(Route::Event { id: "3014339-0002-1".into() });
    app.on_fetched(FetchOutcome::Event {
        ticket: requests[0].ticket(),
        result: Err(anyhow!("graphql: unknown field")),
    });

    let out = screen(&app);
    assert!(out.contains("Unexpected error occured while fetching data"));
    assert!(out.contains("graphql: unknown field"));
    assert!(out.contains("This error has been reported."));
}

#[test]
fn missing_entity_shows_not_found_message() {
    let (mut app, requests) = app_at(Route::Call { id: "1-0001".into() });
    app.on_fetched(FetchOutcome::Call {
        ticket: requests[0].ticket(),
        result: Ok(None),
    });
    assert!(screen(&app).contains("No call found"));
}
