use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, time::Duration};

use alistui::app::App;
use alistui::config::Config;
use alistui::store::JsonFileStore;
use alistui::{handlers, log_debug, set_debug, ui};

/// AList/OpenList terminal client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp directory
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: <config dir>/alistui/config.yaml)
    #[arg(short, long)]
    config: Option<String>,

    /// Server URL, pre-filled on the connect screen
    #[arg(short, long)]
    server: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        // An explicitly named config file must exist
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => {
            let default_path = dirs::config_dir()
                .map(|dir| dir.join("alistui").join("config.yaml"))
                .filter(|path| path.exists());
            match default_path {
                Some(path) => Config::load_from(&path)?,
                None => Config::default(),
            }
        }
    };
    if let Some(server) = &args.server {
        config.server = Some(server.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    set_debug(args.debug);
    if args.debug {
        log_debug("Debug mode enabled");
    }

    let config = load_config(&args)?;
    let store = Box::new(JsonFileStore::new()?);
    let mouse = config.mouse;
    let mut app = App::new(config, store)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // The haptic stand-in flashes for exactly one frame
        app.model.ui.pull.tick = false;

        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            return Ok(());
        }

        // Apply everything the background tasks produced since last frame
        while let Ok(response) = app.api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        // Long press fires on hold, without any new mouse event arriving
        let now = app.now();
        if let Some(gesture) = app.recognizer.poll(now) {
            handlers::pointer::apply_gesture(app, gesture);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => handlers::handle_key(app, key),
                Event::Mouse(mouse) => handlers::handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
}
