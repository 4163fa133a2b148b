use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use wc_winners::callbacks::{COUNTRY_STATS, CallbackRegistry, WINNERS_LIST, WidgetKey, YEAR_STATS};
use wc_winners::config::DashboardConfig;
use wc_winners::figure::{ChoroplethFigure, Rgb, centroid};
use wc_winners::logging;
use wc_winners::snapshot::DashboardSnapshot;
use wc_winners::state::AppState;

const TITLE: &str = "FIFA World Cup Dashboard";

struct App {
    state: AppState,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    fn new(state: AppState, tick_rate: Duration) -> Self {
        Self {
            state,
            should_quit: false,
            tick_rate,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('l') | KeyCode::Right => self.state.next_country(),
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_country(),
            KeyCode::Char('j') | KeyCode::Down => self.state.next_year(),
            KeyCode::Char('k') | KeyCode::Up => self.state.prev_year(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = DashboardConfig::from_env();
    let _log_guard = match config.log_dir.as_deref() {
        Some(dir) => match logging::init_file_logging(dir) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("warning: file logging disabled: {err:#}");
                None
            }
        },
        None => None,
    };

    // A bad dataset is fatal before the terminal is touched.
    let snapshot: Arc<DashboardSnapshot> = DashboardSnapshot::load(&config.data_path)
        .with_context(|| format!("load dataset {}", config.data_path.display()))?;
    let registry = CallbackRegistry::standard().context("register callbacks")?;
    tracing::info!(
        records = snapshot.records.len(),
        countries = snapshot.aggregate.len(),
        "dashboard snapshot ready"
    );

    let state = AppState::new(snapshot, registry, &config);
    let mut app = App::new(state, config.tick_rate);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_map(frame, chunks[1], &app.state);
    render_panels(frame, chunks[2], &app.state);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    format!(
        "{TITLE}\n{} finals | {} winning nations",
        state.snapshot.records.len(),
        state.snapshot.aggregate.len()
    )
}

fn footer_text(state: &AppState) -> String {
    let keys = "←/→ Country | ↑/↓ Year | ? Help | q Quit";
    match state.logs.back() {
        Some(last) => format!("{keys} | {last}"),
        None => keys.to_string(),
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn render_map(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(figure) = state.figure() else {
        let empty = Paragraph::new("Map unavailable")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Map").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(figure.title.as_str())
                .borders(Borders::ALL),
        )
        .marker(Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            if figure.geo.draws_coastline_outline() {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
            }
            ctx.layer();
            for loc in &figure.locations {
                let Some((lon, lat)) = centroid(loc.iso_code) else {
                    continue;
                };
                let color = to_color(loc.color);
                ctx.draw(&Points {
                    coords: &[(lon, lat)],
                    color,
                });
                ctx.print(
                    lon + 3.0,
                    lat,
                    Span::styled(
                        loc.wins.to_string(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, sections[0]);
    frame.render_widget(Paragraph::new(legend_line(figure)), sections[1]);
}

fn legend_line(figure: &ChoroplethFigure) -> Line<'static> {
    const STEPS: usize = 16;
    let mut spans = vec![Span::raw(format!(" Wins {} ", figure.cmin))];
    for i in 0..STEPS {
        let t = i as f64 / (STEPS - 1) as f64;
        let color = to_color(figure.color_scale.sample(t));
        spans.push(Span::styled("█", Style::default().fg(color)));
    }
    spans.push(Span::raw(format!(" {}", figure.cmax)));
    spans.push(Span::styled(
        "  (coastlines only)",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn render_panels(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let country = state.selected_country().unwrap_or("-");
    let country_label = format!("Select a Country: ◀ {country} ▶");
    render_output_panel(frame, cols[0], "Country", &country_label, state, COUNTRY_STATS);

    let year = state
        .selected_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    let year_label = format!("Select a Year: ▲ {year} ▼");
    render_output_panel(frame, cols[1], "Year", &year_label, state, YEAR_STATS);

    render_output_panel(
        frame,
        cols[2],
        "Winners",
        "All World Cup Winners:",
        state,
        WINNERS_LIST,
    );
}

fn render_output_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    label: &str,
    state: &AppState,
    key: WidgetKey,
) {
    let mut lines = vec![Line::styled(
        label.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    match state.fragment(key) {
        Some(fragment) => {
            let style = if fragment.is_notice() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.extend(
                fragment
                    .lines()
                    .into_iter()
                    .map(|text| Line::styled(text, style)),
            );
        }
        None => lines.push(Line::styled(
            "No data yet",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "World Cup Dashboard - Help",
        "",
        "  ← / h        Previous country",
        "  → / l        Next country",
        "  ↑ / k        Previous year",
        "  ↓ / j        Next year",
        "  ?            Toggle help",
        "  q / Esc      Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
