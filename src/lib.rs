pub mod cli;
pub mod core;
pub mod shared;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;

use cli::{CliArgs, Command};
use crate::core::clipboard::{ClipboardWriter, LogNotifier, MemoryClipboard, SystemClipboard};
use crate::core::features::translator::TranslatorService;
use crate::core::session::SessionServices;
use shared::emit::ChannelEmitter;
use shared::events::AppEvent;
use shared::settings::AppSettings;
use shared::types::{ResponseOrdering, SessionSnapshot};

pub use crate::core::session::runtime::{spawn_session, spawn_session_with_state, SessionHandle};
pub use crate::core::session::{SessionState, TranslationSession};
pub use shared::error::{AppError, AppResult};

pub fn run() {
    let args = CliArgs::parse();
    let filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("FATAL: Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_terminal(args)) {
        eprintln!("FATAL: {}", e);
        std::process::exit(1);
    }
}

async fn load_settings(args: &CliArgs) -> AppResult<AppSettings> {
    let mut settings = match &args.config {
        Some(path) => AppSettings::load_from(path).await?,
        None => AppSettings::load().await.unwrap_or_else(|e| {
            log::warn!("[Settings] Failed to load settings: {}", e);
            AppSettings::default()
        }),
    };

    if let Some(endpoint) = &args.endpoint {
        settings.api.endpoint = endpoint.clone();
    }
    if args.last_arrival_wins {
        settings.session.ordering = ResponseOrdering::LastArrivalWins;
    }
    settings.validate()?;
    Ok(settings)
}

async fn run_terminal(args: CliArgs) -> AppResult<()> {
    let settings = load_settings(&args).await?;

    let backend = TranslatorService::new(&settings.api)?;
    log::info!("[Translator] Using endpoint {}", backend.endpoint());

    let clipboard: Arc<dyn ClipboardWriter> = match SystemClipboard::new() {
        Ok(system) => Arc::new(system),
        Err(e) => {
            log::warn!("[Clipboard] System clipboard unavailable ({}), copying in-process only", e);
            Arc::new(MemoryClipboard::new())
        }
    };

    let (event_tx, mut event_rx) = unbounded_channel();
    let services = SessionServices {
        backend: Arc::new(backend),
        clipboard,
        notifier: Arc::new(LogNotifier),
        emitter: Arc::new(ChannelEmitter::new(event_tx)),
    };
    let (handle, task) = spawn_session(settings.session.clone(), services);

    let printer = tokio::spawn(async move {
        let mut last_output = String::new();
        while let Some(event) = event_rx.recv().await {
            if let AppEvent::SessionUpdated(snapshot) = event {
                if snapshot.translated_text != last_output {
                    println!("{}: {}", snapshot.output_label, snapshot.output_display);
                    last_output = snapshot.translated_text;
                }
            }
        }
    });

    println!("{}", cli::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Text(text) => handle.text_changed(text)?,
            Command::Swap => handle.toggle_direction()?,
            Command::Copy => {
                if let Err(e) = handle.copy().await {
                    println!("Copy failed: {}", e);
                }
            }
            Command::Key(ch) => handle.append_character(ch)?,
            Command::Keys => println!("{}", cli::format_keys()),
            Command::Show => print_snapshot(&handle.snapshot().await?),
            Command::Help => println!("{}", cli::HELP),
            Command::Invalid(message) => println!("{}", message),
            Command::Quit => break,
        }
    }

    handle.shutdown()?;
    task.await.map_err(|e| AppError::System(e.to_string()))?;
    printer.await.map_err(|e| AppError::System(e.to_string()))?;
    Ok(())
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    let input = if snapshot.input_text.is_empty() {
        snapshot.input_placeholder.as_str()
    } else {
        snapshot.input_text.as_str()
    };
    println!("{}: {}", snapshot.input_label, input);
    println!("{}: {}", snapshot.output_label, snapshot.output_display);
    if snapshot.picker_visible {
        println!("{}", cli::format_keys());
    }
}
