use std::time::Instant;

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Span, Spans};
use tui::widgets::canvas::{Canvas, Context, Line};
use tui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::Frame;

use crate::app::App;
use crate::chart::{BarGeometry, ChartState, MedianGeometry, PyramidChart, Side};

const MALE_COLOR: Color = Color::Rgb(123, 154, 255);
const FEMALE_COLOR: Color = Color::Rgb(255, 192, 203);
const MEDIAN_COLOR: Color = Color::Red;
const AXIS_COLOR: Color = Color::Gray;

/// Horizontal strokes used to fill one bar.
const FILL_STROKES: usize = 8;
const DASH: f64 = 8.0;
const GAP: f64 = 4.0;

const HELP: &str = "q quit | \u{2190}/\u{2192} year | 1-9 jump | Tab section | Enter toggle | Esc hide tooltip";

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &mut App, now: Instant) {
    let size = f.size();

    let mut constraints = vec![Constraint::Length(3)];
    for section in app.sections() {
        constraints.push(Constraint::Length(section_height(&section.body, section.expanded(), size.width)));
    }
    constraints.push(Constraint::Min(10));
    constraints.push(Constraint::Length(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    draw_header(f, app, chunks[0]);
    for (i, section) in app.sections().iter().enumerate() {
        let focused = i == app.focused_section();
        let marker = if section.expanded() { "\u{25be}" } else { "\u{25b8}" };
        let title_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let title = Span::styled(format!("{} {}", marker, section.title), title_style);
        if section.expanded() {
            let body = Paragraph::new(section.body.clone())
                .block(Block::default().title(title).borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            f.render_widget(body, chunks[i + 1]);
        } else {
            f.render_widget(Paragraph::new(Spans::from(vec![title])), chunks[i + 1]);
        }
    }

    let charts_area = chunks[chunks.len() - 2];
    let panel_count = app.panels().len().max(1) as u32;
    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            app.panels()
                .iter()
                .map(|_| Constraint::Ratio(1, panel_count))
                .collect::<Vec<_>>(),
        )
        .split(charts_area);

    let mut areas = Vec::new();
    for (panel, area) in app.panels().iter().zip(chart_chunks.iter()) {
        areas.push(draw_chart(f, &panel.chart, *area, now));
    }
    app.set_chart_areas(areas);

    draw_status(f, app, chunks[chunks.len() - 1]);
    draw_tooltip(f, app, size);
}

fn section_height(body: &str, expanded: bool, width: u16) -> u16 {
    if !expanded {
        return 1;
    }
    let inner = usize::from(width.saturating_sub(2).max(1));
    let lines = body.chars().count() / inner + 1;
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
}

fn draw_header<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let years = app
        .years()
        .iter()
        .map(|year| Spans::from(Span::raw(year.label.clone())))
        .collect();
    let tabs = Tabs::new(years)
        .select(app.selected())
        .block(Block::default().title("Year").borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, header_chunks[0]);

    let info = Paragraph::new(Spans::from(vec![Span::styled(
        format!("Loaded {}", app.loaded_at().format("%Y-%m-%d %H:%M:%S")),
        Style::default().fg(Color::Green),
    )]))
    .block(Block::default().title("Data").borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(info, header_chunks[1]);
}

/// Draws one pyramid and returns the canvas area used for hit-testing.
fn draw_chart<B: Backend>(f: &mut Frame<B>, chart: &PyramidChart, area: Rect, now: Instant) -> Rect {
    let title = match (chart.state(), chart.chrome()) {
        (ChartState::Rendered(_), Some(chrome)) => chrome.title.clone(),
        _ => format!("{} (no data)", chart.id()),
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL);
    let inner = block.inner(area);

    let x_bounds = chart.x_bounds();
    let [top, bottom] = chart.y_bounds();
    let units_per_column = (x_bounds[1] - x_bounds[0]) / f64::from(inner.width.max(1));
    let scene = Scene {
        bars: chart.bars(now),
        median: chart.median(now),
        units_per_column,
        x_bounds,
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds(x_bounds)
        // chart y grows downwards, canvas y upwards
        .y_bounds([-bottom, -top])
        .paint(|ctx| scene.paint(ctx, chart));
    f.render_widget(canvas, area);
    inner
}

struct Scene {
    bars: Vec<BarGeometry>,
    median: Option<MedianGeometry>,
    units_per_column: f64,
    x_bounds: [f64; 2],
}

impl Scene {
    fn paint(&self, ctx: &mut Context, chart: &PyramidChart) {
        let (width, height) = chart.inner_size();

        for bar in &self.bars {
            if bar.width.abs() < f64::EPSILON {
                continue;
            }
            let color = side_color(bar.side);
            for stroke in 0..FILL_STROKES {
                let y = bar.y + bar.height * stroke as f64 / (FILL_STROKES - 1) as f64;
                ctx.draw(&Line {
                    x1: bar.x,
                    y1: -y,
                    x2: bar.x + bar.width,
                    y2: -y,
                    color,
                });
            }
        }

        ctx.draw(&Line {
            x1: 0.0,
            y1: -height,
            x2: width,
            y2: -height,
            color: AXIS_COLOR,
        });
        ctx.draw(&Line {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: -height,
            color: AXIS_COLOR,
        });
        let zero = chart.x_scale().scale(0.0);
        ctx.draw(&Line {
            x1: zero,
            y1: 0.0,
            x2: zero,
            y2: -height,
            color: Color::DarkGray,
        });

        if let Some(median) = &self.median {
            let mut x = 0.0;
            while x < width {
                ctx.draw(&Line {
                    x1: x,
                    y1: -median.y,
                    x2: (x + DASH).min(width),
                    y2: -median.y,
                    color: MEDIAN_COLOR,
                });
                x += DASH + GAP;
            }
        }

        let Some(chrome) = chart.chrome() else {
            return;
        };
        let margin = chart.margin();
        for tick in &chrome.x_ticks {
            let x = self.centred(tick.position, &tick.label);
            ctx.print(x, -(height + margin.bottom / 2.0), Span::raw(tick.label.clone()));
        }
        for tick in &chrome.y_ticks {
            let x = (-self.text_width(&tick.label) - self.units_per_column).max(self.x_bounds[0]);
            ctx.print(x, -tick.position, Span::raw(tick.label.clone()));
        }
        for entry in &chrome.legend {
            ctx.print(
                entry.x,
                -(entry.y + entry.size / 2.0),
                Span::styled(format!("\u{25a0} {}", entry.label), Style::default().fg(side_color(entry.side))),
            );
        }
        if let Some(median) = &self.median {
            let x = self.centred(width, &median.label);
            ctx.print(
                x,
                -(median.y - 6.0),
                Span::styled(median.label.clone(), Style::default().fg(MEDIAN_COLOR)),
            );
        }
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.units_per_column
    }

    /// Left edge that centres `text` on `x` while keeping it on the canvas.
    fn centred(&self, x: f64, text: &str) -> f64 {
        let w = self.text_width(text);
        (x - w / 2.0).min(self.x_bounds[1] - w).max(self.x_bounds[0])
    }
}

fn side_color(side: Side) -> Color {
    match side {
        Side::Male => MALE_COLOR,
        Side::Female => FEMALE_COLOR,
    }
}

fn draw_status<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let line = match app.status() {
        Some(message) => Span::styled(message.to_string(), Style::default().fg(Color::Red)),
        None => Span::styled(HELP, Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(Spans::from(vec![line])), area);
}

fn draw_tooltip<B: Backend>(f: &mut Frame<B>, app: &App, size: Rect) {
    let tooltip = app.tooltip();
    if !tooltip.visible() {
        return;
    }
    let lines: Vec<Spans> = tooltip
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Spans::from(Span::styled(line.clone(), style))
        })
        .collect();
    let text_width = tooltip.lines().iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = u16::try_from(text_width + 2).unwrap_or(u16::MAX).min(size.width);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX).min(size.height);
    let (column, row) = tooltip.anchor();
    let area = Rect::new(
        column.min(size.width.saturating_sub(width)),
        row.min(size.height.saturating_sub(height)),
        width,
        height,
    );
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL)), area);
}
