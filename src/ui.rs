use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, InputMode, Section, SectionCursor, SectionView};
use crate::table::info::InfoRows;
use crate::table::items::{ItemsGrid, PageIntent, SortIndicator};
use crate::table::{plain, TableView};
use crate::tables::ExplorerContext;
use crate::theme::ColorScheme;

const RANK_WIDTH: u16 = 6;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, app: &App) {
    let ctx = app.context(Utc::now());
    draw_with(f, app, &ctx);
}

/// Draw with an explicit descriptor context (fixed clock in tests).
pub fn draw_with(f: &mut Frame, app: &App, ctx: &ExplorerContext) {
    let colors = app.theme().colors();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(2)])
        .split(f.area());

    header(f, chunks[0], app, &colors);
    body(f, chunks[1], app, ctx, &colors);
    footer(f, chunks[2], app, &colors);

    // Overlays render last
    if app.input_mode() == InputMode::Goto {
        draw_goto_overlay(f, app, &colors);
    }
    if let Some((message, is_error)) = app.toast_message() {
        draw_toast_modal(f, message, is_error, &colors);
    }
}

// ===============================
// Header / Footer
// ===============================
fn header(f: &mut Frame, area: Rect, app: &App, colors: &ColorScheme) {
    let mut spans = vec![
        Span::styled(" taox ", Style::default().fg(colors.label).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(colors.text_dim)),
        Span::styled(app.route().title(), Style::default().fg(colors.text)),
    ];
    if app.can_go_back() {
        spans.push(Span::styled("  ⌫ back", Style::default().fg(colors.text_dim)));
    }
    let right = format!("{} · {} ", app.context(Utc::now()).network, app.route());

    let cols = Layout::horizontal([Constraint::Min(0), Constraint::Length(right.chars().count() as u16)]).split(area);
    let left = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(colors.unfocused_border)));
    let right = Paragraph::new(right)
        .alignment(Alignment::Right)
        .style(Style::default().fg(colors.text_dim))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(colors.unfocused_border)));
    f.render_widget(left, cols[0]);
    f.render_widget(right, cols[1]);
}

fn footer(f: &mut Frame, area: Rect, app: &App, colors: &ColorScheme) {
    let key = Style::default().fg(colors.focus_border);
    let hints: [(&str, &str); 10] = [
        ("Tab", "section"),
        ("↑↓←→", "move"),
        ("Enter", "open"),
        ("s", "sort"),
        ("n/p", "page"),
        ("c", "copy"),
        ("g", "go to"),
        ("r", "reload"),
        ("t", "theme"),
        ("q", "quit"),
    ];
    let mut spans: Vec<Span> = Vec::with_capacity(hints.len() * 2 + 2);
    for (i, (k, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(*k, key));
        spans.push(Span::raw(if i + 1 == hints.len() { format!(" {label}") } else { format!(" {label} │ ") }));
    }
    spans.push(Span::styled(format!(" │ FPS {}", app.fps()), Style::default().fg(colors.text_dim)));

    let w = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.text))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain).border_style(Style::default().fg(colors.unfocused_border)));
    f.render_widget(w, area);
}

// ===============================
// Body
// ===============================
fn body(f: &mut Frame, area: Rect, app: &App, ctx: &ExplorerContext, colors: &ColorScheme) {
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning_text = format!(
            "Terminal too small!\n\nMinimum size: {}×{}\nCurrent size: {}×{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        );
        let warning = Paragraph::new(warning_text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors.toast_error).add_modifier(Modifier::BOLD));
        f.render_widget(warning, area);
        return;
    }

    let sections = app.sections();
    if sections.is_empty() {
        return;
    }
    let constraints: Vec<Constraint> = sections.iter().map(|_| Constraint::Ratio(1, sections.len() as u32)).collect();
    let areas = Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    for (i, section) in sections.iter().enumerate() {
        render_section(f, areas[i], app, *section, i == app.focus(), ctx, colors);
    }
}

fn render_section(
    f: &mut Frame,
    area: Rect,
    app: &App,
    section: Section,
    focused: bool,
    ctx: &ExplorerContext,
    colors: &ColorScheme,
) {
    let title = if focused {
        format!(" [ {} ] ", app.section_title(section))
    } else {
        format!(" {} ", app.section_title(section))
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Double } else { BorderType::Rounded })
        .border_style(
            Style::default()
                .fg(if focused { colors.focus_border } else { colors.unfocused_border })
                .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }),
        );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cursor = app.cursor(section);
    match app.section_view(section, ctx) {
        SectionView::Info(TableView::Ready(rows)) => render_info(f, inner, &rows, cursor, focused, colors),
        SectionView::Items(TableView::Ready(grid)) => render_grid(f, inner, &grid, cursor, focused, colors),
        SectionView::Info(view) => render_state(f, inner, &view, colors),
        SectionView::Items(view) => render_state(f, inner, &view, colors),
    }
}

/// Loading, not-found and error placeholders.
fn render_state<R>(f: &mut Frame, area: Rect, view: &TableView<R>, colors: &ColorScheme) {
    let text = match view {
        TableView::Loading => Text::from(Span::styled("Loading…", Style::default().fg(colors.text_dim))),
        TableView::NotFound { message } => Text::from(Span::styled(message.clone(), Style::default().fg(colors.text_dim))),
        TableView::Error { message, details, reported } => {
            let mut lines = vec![
                Line::from(Span::styled(message.clone(), Style::default().fg(colors.error).add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(details.clone(), Style::default().fg(colors.text_dim))),
            ];
            if *reported {
                lines.push(Line::from(Span::styled("This error has been reported.", Style::default().fg(colors.text_dim))));
            }
            Text::from(lines)
        }
        TableView::Ready(_) => return,
    };
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn render_info(f: &mut Frame, area: Rect, rows: &InfoRows, cursor: SectionCursor, focused: bool, colors: &ColorScheme) {
    let label_width = rows
        .iter()
        .map(|r| plain(&r.label).chars().count() as u16)
        .max()
        .unwrap_or(8)
        .clamp(8, 24)
        + 2;

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|r| {
            let height = r.value.lines.len().max(1) as u16;
            Row::new(vec![
                Cell::from(r.label.clone()).style(Style::default().fg(colors.label)),
                Cell::from(r.value.clone()).style(Style::default().fg(colors.text)),
            ])
            .height(height)
        })
        .collect();

    let mut state = TableState::default();
    if focused && !rows.is_empty() {
        state.select(Some(cursor.row.min(rows.len() - 1)));
    }
    let table = Table::new(table_rows, [Constraint::Length(label_width), Constraint::Min(10)])
        .row_highlight_style(Style::default().bg(colors.selection_bg).fg(colors.selection_fg));
    f.render_stateful_widget(table, area, &mut state);
}

/// Column rectangles for one grid line, rank column first when present.
fn column_rects(area: Rect, grid: &ItemsGrid) -> (Option<Rect>, Vec<Rect>) {
    let mut constraints = Vec::with_capacity(grid.colgroup.len() + 1);
    if grid.rank_header.is_some() {
        constraints.push(Constraint::Length(RANK_WIDTH));
    }
    constraints.extend(grid.colgroup.iter().map(|c| c.unwrap_or(Constraint::Fill(1))));
    let rects = Layout::horizontal(constraints).spacing(1).split(area);
    if grid.rank_header.is_some() {
        (Some(rects[0]), rects[1..].to_vec())
    } else {
        (None, rects.to_vec())
    }
}

/// Union of the rects of `span` columns starting at `column`.
fn spanned(rects: &[Rect], column: usize, span: u16) -> Option<Rect> {
    let first = *rects.get(column)?;
    let last = column + span.max(1) as usize - 1;
    Some(rects[column..=last.min(rects.len() - 1)].iter().fold(first, |acc, r| acc.union(*r)))
}

fn first_line(content: &Text<'static>) -> Line<'static> {
    content.lines.first().cloned().unwrap_or_default()
}

/// Grid painted cell by cell so spanned cells cover their neighbours.
fn render_grid(f: &mut Frame, area: Rect, grid: &ItemsGrid, cursor: SectionCursor, focused: bool, colors: &ColorScheme) {
    if area.height < 3 {
        return;
    }
    let header_area = Rect { height: 1, ..area };
    let footer_area = Rect { y: area.y + area.height - 1, height: 1, ..area };
    let rows_area = Rect { y: area.y + 1, height: area.height - 2, ..area };

    // Header with sort indicators
    let (rank_rect, rects) = column_rects(header_area, grid);
    if let (Some(rect), Some(label)) = (rank_rect, grid.rank_header.as_ref()) {
        f.render_widget(Paragraph::new(first_line(label)).style(Style::default().fg(colors.label).add_modifier(Modifier::BOLD)), rect);
    }
    for (i, cell) in grid.header.iter().enumerate() {
        let Some(rect) = rects.get(i) else { continue };
        let mut spans = first_line(&cell.label).spans;
        match &cell.sort {
            Some(SortIndicator::Toggle { active: Some(direction) }) => {
                spans.push(Span::styled(format!(" {}", direction.arrow()), Style::default().fg(colors.sort_active)));
            }
            Some(SortIndicator::Toggle { active: None }) => {
                spans.push(Span::styled(" ↕", Style::default().fg(colors.text_dim)));
            }
            Some(SortIndicator::Options { labels, selected }) => {
                let label = selected.and_then(|s| labels.get(s)).map(String::as_str).unwrap_or("sort");
                spans.push(Span::styled(format!(" [{label}]"), Style::default().fg(colors.sort_active)));
            }
            None => {}
        }
        let style = Style::default().fg(colors.label).add_modifier(Modifier::BOLD);
        let style = if focused && i == cursor.column { style.add_modifier(Modifier::UNDERLINED) } else { style };
        f.render_widget(Paragraph::new(Line::from(spans)).style(style), *rect);
    }

    // Rows, scrolled to keep the cursor visible
    let visible = rows_area.height as usize;
    let selected = cursor.row.min(grid.rows.len().saturating_sub(1));
    let offset = selected.saturating_sub(visible.saturating_sub(1));
    for (line, row) in grid.rows.iter().skip(offset).take(visible).enumerate() {
        let row_area = Rect { y: rows_area.y + line as u16, height: 1, ..rows_area };
        let is_selected = focused && offset + line == selected;
        let base = if is_selected {
            Style::default().bg(colors.selection_bg).fg(colors.selection_fg)
        } else {
            Style::default().fg(colors.text)
        };
        f.render_widget(Block::default().style(base), row_area);

        let (rank_rect, rects) = column_rects(row_area, grid);
        if let (Some(rect), Some(rank)) = (rank_rect, row.rank) {
            f.render_widget(Paragraph::new(rank.to_string()).style(base.fg(colors.text_dim)), rect);
        }
        for cell in &row.cells {
            let Some(rect) = spanned(&rects, cell.column, cell.col_span) else { continue };
            let style = if is_selected && cell.column == cursor.column { base.add_modifier(Modifier::BOLD) } else { base };
            f.render_widget(Paragraph::new(first_line(&cell.content)).style(style), rect);
        }
    }

    // Pagination control
    if let Some(p) = &grid.pagination {
        let mut spans = Vec::with_capacity(3);
        let dim = Style::default().fg(colors.text_dim);
        let on = Style::default().fg(colors.focus_border);
        spans.push(Span::styled("◀ p ", if p.allows(PageIntent::Previous) { on } else { dim }));
        spans.push(Span::styled(p.range_label(), Style::default().fg(colors.text)));
        spans.push(Span::styled(" n ▶", if p.allows(PageIntent::Next) { on } else { dim }));
        f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Right), footer_area);
    }
}

// ===============================
// Overlays
// ===============================
fn draw_goto_overlay(f: &mut Frame, app: &App, colors: &ColorScheme) {
    let area = f.area();
    let width = (area.width * 7) / 10;
    let height = 5;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 3;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Go to ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.focus_border))
        .style(Style::default().bg(colors.background));
    let input = app.goto_input();
    let text = Text::from(vec![
        Line::from(Span::styled(input.to_string(), Style::default().fg(colors.text))),
        Line::default(),
        Line::from(Span::styled(
            "extrinsic 123-0001 · event 123-0001-2 · address · Pallet.Name · taox://v1/...",
            Style::default().fg(colors.text_dim),
        )),
    ]);
    f.render_widget(Paragraph::new(text).block(block), overlay);

    if overlay.width > 2 {
        let cx = overlay.x + 1 + (input.chars().count().min(overlay.width.saturating_sub(3) as usize) as u16);
        f.set_cursor_position((cx, overlay.y + 1));
    }
}

fn draw_toast_modal(f: &mut Frame, message: &str, is_error: bool, colors: &ColorScheme) {
    let color = if is_error { colors.toast_error } else { colors.toast_success };
    let mark = if is_error { "✗" } else { "✓" };

    // Small centered box (40% width, 3 lines height)
    let area = f.area();
    let width = ((area.width * 4) / 10).max(20).min(area.width);
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height };

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let text = Paragraph::new(format!("{mark} {message}"))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(block);
    f.render_widget(text, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_cell_covers_neighbours() {
        let rects = vec![Rect::new(0, 0, 10, 1), Rect::new(11, 0, 10, 1), Rect::new(22, 0, 5, 1)];
        assert_eq!(spanned(&rects, 0, 2), Some(Rect::new(0, 0, 21, 1)));
        assert_eq!(spanned(&rects, 2, 3), Some(Rect::new(22, 0, 5, 1)));
        assert_eq!(spanned(&rects, 1, 0), Some(Rect::new(11, 0, 10, 1)));
        assert_eq!(spanned(&rects, 5, 1), None);
    }
}
