use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tui::backend::{Backend, CrosstermBackend};
use tui::Terminal;

use crate::app::App;
use crate::config::AppConfig;

mod age_bucket;
mod app;
mod chart;
mod config;
mod csv_reader;
mod dataset;
mod error;
mod normalizer;
mod scale;
mod tooltip;
mod transition;
mod ui;

/// Interactive population pyramids for a locality and its national reference.
#[derive(Parser, Debug)]
#[command(name = "pyramid", version)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long, env = "PYRAMID_CONFIG")]
    config: Option<PathBuf>,

    /// Directory that relative data file paths are resolved against
    #[arg(long, env = "PYRAMID_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log file used while the terminal UI is running
    #[arg(long, default_value = "pyramid.log")]
    log_file: PathBuf,

    /// Print the settled charts for YEAR as JSON instead of starting the UI
    #[arg(long, value_name = "YEAR")]
    snapshot: Option<String>,
}

enum Event<I> {
    Input(I),
    Tick,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;
    info!("Starting pyramid v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.resolve_paths(dir);
    }

    let mut app = match App::load(&config, Instant::now()) {
        Ok(app) => app,
        Err(e) => {
            error!("chart initialization aborted: {}", e);
            eprintln!("pyramid: {}", e);
            process::exit(1);
        }
    };

    if let Some(year) = &args.snapshot {
        return print_snapshot(&mut app, year);
    }
    run(&mut app, Duration::from_millis(config.tick_rate_ms))
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if args.snapshot.is_some() {
        builder.with_writer(io::stderr).init();
    } else {
        let file = File::create(&args.log_file)?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    Ok(())
}

fn print_snapshot(app: &mut App, year: &str) -> Result<(), Box<dyn Error>> {
    let now = Instant::now();
    if let Err(e) = app.select_year(year, now) {
        eprintln!("pyramid: {}", e);
        process::exit(1);
    }
    let snapshots = app.settled_snapshots(now);
    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}

fn run(app: &mut App, tick_rate: Duration) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(Event::Input(ev)).is_err() {
                            return;
                        }
                    }
                    Err(_) => return,
                },
                Ok(false) => {}
                Err(_) => return,
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, app, &rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    info!("exiting");
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mpsc::Receiver<Event<CEvent>>,
) -> Result<(), Box<dyn Error>> {
    let mut dirty = true;
    let mut was_animating = false;
    loop {
        let now = Instant::now();
        app.tick(now);
        // one more frame once transitions settle so exited bars are cleared
        let animating = app.is_animating(now);
        if dirty || animating || was_animating {
            terminal.draw(|f| ui::draw(f, app, now))?;
        }
        was_animating = animating;
        dirty = true;

        // year selection failures are logged and shown on the status line
        match rx.recv()? {
            Event::Input(CEvent::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Left => {
                    let _ = app.previous_year(Instant::now());
                }
                KeyCode::Right => {
                    let _ = app.next_year(Instant::now());
                }
                KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                    if let Some(digit) = c.to_digit(10) {
                        let _ = app.select_year_index(digit as usize - 1, Instant::now());
                    }
                }
                KeyCode::Tab => app.focus_next_section(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_focused_section(),
                KeyCode::Esc => app.hide_tooltip(),
                _ => {}
            },
            Event::Input(CEvent::Mouse(mouse)) => {
                if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                    app.pointer_moved(mouse.column, mouse.row, Instant::now());
                }
            }
            Event::Input(_) => {}
            Event::Tick => dirty = false,
        }
    }
    Ok(())
}
