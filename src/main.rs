use std::time::Duration;

use clap::Parser;

use favorites_editor::app::App;
use favorites_editor::cli::{self, Cli, Commands, EditArgs};
use favorites_editor::config::AppConfig;
use favorites_editor::error::Result;
use favorites_editor::event::{Event, EventHandler};
use favorites_editor::handler::{self, read_document};
use favorites_editor::logging;
use favorites_editor::tui::{install_panic_hook, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.config_overrides()));
    let level = logging::parse_level(config.log_level())?;

    match &cli.command {
        Some(Commands::Convert(args)) => {
            logging::init_stderr_logger(level)?;
            let written = cli::run_convert(args, &config).await?;
            println!("{}", written.display());
        }
        Some(Commands::Show(args)) => {
            logging::init_stderr_logger(level)?;
            println!("{}", cli::run_show(&args.input, args.from).await?);
        }
        _ => {
            let args = cli.editor_args().unwrap_or_default();
            run_editor(&config, args, level).await?;
        }
    }

    Ok(())
}

async fn run_editor(config: &AppConfig, args: EditArgs, level: log::LevelFilter) -> Result<()> {
    // The terminal belongs to the editor, so logs go to a file or nowhere.
    if let Some(log_file) = config.log_file() {
        if let Err(e) = logging::init_file_logger(level, &log_file) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    let mut app = App::new(config);
    if let Some(path) = args.file {
        let result = read_document(&path, args.from).await;
        app.handle_import_finished(path, result);
    }

    install_panic_hook();
    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(100));
    let event_tx = events.sender();
    log::info!("editor started");

    let outcome = loop {
        if let Err(e) = tui.draw(&mut app) {
            break Err(e);
        }

        match events.next().await {
            Ok(Event::Key(key)) => handler::handle_key_event(&mut app, key, &event_tx),
            Ok(Event::Tick) | Ok(Event::Resize(_, _)) => {}
            Ok(Event::ImportFinished { path, result }) => app.handle_import_finished(path, result),
            Ok(Event::ExportFinished {
                path,
                platform,
                result,
            }) => app.handle_export_finished(path, platform, result),
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    tui.restore()?;
    log::info!("editor closed");
    outcome
}
