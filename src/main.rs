mod app;
mod client;
mod parse;
mod record;
mod render;
mod router;

use crate::app::{App, PageLoad};
use crate::client::SpeciesClient;
use crate::parse::Args;
use crate::render::ui;
use crate::router::Route;
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::event::{Event, EventStream};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use log::{LevelFilter, info};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Set up env_logger. The TUI owns the screen, so logs only go out when a
/// log file is given or `RUST_LOG` asks for them.
fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    match &args.log_file {
        Some(path) => {
            builder
                .filter_level(level)
                .target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
        }
        None => {
            if args.verbose {
                eprintln!("--verbose has no effect without --log-file; logging stays off");
            }
            builder.filter_level(LevelFilter::Off);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draw, wait for a key or a finished request, apply it, repeat.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut loads: UnboundedReceiver<PageLoad>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    app.start();

    loop {
        terminal.draw(|frame| ui(frame, &app))?;

        tokio::select! {
            Some(load) = loads.recv() => app.receive_page(load),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.on_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }

        if app.should_quit {
            break;
        }
    }

    info!("Leaving with {} fish in the catalog", app.fishes.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    if !io::stdout().is_terminal() {
        eprintln!("fish-catalog needs a real terminal.");
        return Ok(());
    }

    let client = SpeciesClient::new()?
        .with_base_url(&args.api_url)?
        .with_timeout(args.timeout)?;
    info!("Using species API at {}", args.api_url);
    let route = Route::from_path(&args.route)
        .ok_or_else(|| format!("unknown route '{}'", args.route))?;
    let (mut app, loads) = App::new(Arc::new(client));
    app.navigate(route);

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, app, loads).await;
    restore_terminal(&mut terminal)?;
    result?;

    Ok(())
}
