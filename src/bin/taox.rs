// Native binary for taox - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use taox::{
    app::{App, Effect, InputMode},
    clipboard,
    config::load,
    indexer::{HttpIndexer, IndexerTransport},
    router::Route,
    services,
    table::items::PageIntent,
    types::AppEvent,
    ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();
    init_logging();

    let cfg = load().context("Failed to load configuration")?;
    cfg.log_summary();

    let indexer: Arc<dyn IndexerTransport> = Arc::new(HttpIndexer::new(cfg.indexer_settings()));

    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // app + channels
    let (tx, rx) = unbounded_channel::<AppEvent>();
    let mut app = App::new(&cfg);
    let initial = app.start();
    run_effects(initial, &mut app, &indexer, &tx);

    // Ctrl+C outside raw mode (e.g. while the terminal is being restored)
    let quit_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = quit_tx.send(AppEvent::Quit);
        }
    });

    // main loop
    let result = run_loop(&mut app, &mut terminal, rx, &indexer, &tx).await;

    // cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// `RUST_LOG` filtering, default `warn`. Stderr shares the terminal with the
/// UI, so without `TAOX_LOG_FILE` logging stays off unless `RUST_LOG` asks.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let file = std::env::var("TAOX_LOG_FILE")
        .ok()
        .and_then(|path| std::fs::OpenOptions::new().create(true).append(true).open(path).ok());
    match file {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    builder.init();
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
    indexer: &Arc<dyn IndexerTransport>,
    tx: &UnboundedSender<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();
    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps().max(1)) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input
        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    let effects = handle_key(app, k);
                    run_effects(effects, app, indexer, tx);
                }
            }
        }

        // fetch results
        while let Ok(ev) = rx.try_recv() {
            let effects = app.on_event(ev);
            run_effects(effects, app, indexer, tx);
        }

        if last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

/// Spawn fetches and perform clipboard writes requested by the app.
fn run_effects(effects: Vec<Effect>, app: &mut App, indexer: &Arc<dyn IndexerTransport>, tx: &UnboundedSender<AppEvent>) {
    for effect in effects {
        match effect {
            Effect::Fetch(request) => {
                let indexer = Arc::clone(indexer);
                let tx = tx.clone();
                log::debug!("[main] spawn fetch {:?}", request.ticket());
                tokio::spawn(async move {
                    let outcome = services::execute(indexer.as_ref(), request).await;
                    let _ = tx.send(AppEvent::Fetched(outcome));
                });
            }
            Effect::Copy(text) => {
                if let Err(e) = clipboard::copy_to_clipboard(&text) {
                    log::warn!("[main] {e:#}");
                    app.show_error_toast("Copy failed");
                }
            }
        }
    }
}

fn handle_key(app: &mut App, k: KeyEvent) -> Vec<Effect> {
    // Goto prompt takes every key until it is closed
    if app.input_mode() == InputMode::Goto {
        match k.code {
            KeyCode::Char(c) => app.goto_add_char(c),
            KeyCode::Backspace => app.goto_backspace(),
            KeyCode::Enter => return app.submit_goto(),
            KeyCode::Esc => app.cancel_goto(),
            _ => {}
        }
        return Vec::new();
    }

    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => app.request_quit(),

        // Section focus (circular)
        (KeyCode::Tab, _) => app.next_section(),
        (KeyCode::BackTab, _) => app.prev_section(),

        // Cursor within the focused section
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.down(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.left(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.right(),
        (KeyCode::Home, _) => app.home(),
        (KeyCode::End, _) => app.end(),

        (KeyCode::Enter, _) => return app.activate(),
        (KeyCode::Backspace, _) => return app.back(),
        (KeyCode::Char('s'), _) => return app.sort_focused(),
        (KeyCode::Char('n'), _) | (KeyCode::PageDown, _) => return app.page(PageIntent::Next),
        (KeyCode::Char('p'), _) | (KeyCode::PageUp, _) => return app.page(PageIntent::Previous),
        (KeyCode::Char('r'), _) => return app.refetch(),
        (KeyCode::Char('c'), _) => return app.copy_selected(),
        (KeyCode::Char('y'), _) => return app.copy_route(),
        (KeyCode::Char('g'), _) | (KeyCode::Char('/'), _) => app.start_goto(),

        // Screen shortcuts
        (KeyCode::Char('1'), _) => return app.navigate(Route::Home),
        (KeyCode::Char('2'), _) => return app.navigate(Route::Subnets),
        (KeyCode::Char('3'), _) => return app.navigate(Route::AccountStats),

        (KeyCode::Char('t'), _) => app.cycle_theme(),
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => app.cycle_fps(),
        _ => {}
    }
    Vec::new()
}
