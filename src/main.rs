use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use musicplayer_lib::app::{playback_screen, MusicPlayerApp};
use musicplayer_lib::audio::engine::RodioEngine;
use musicplayer_lib::audio::events::{EventEmitter, PlayerEvent};
use musicplayer_lib::ui::ButtonId;
use musicplayer_lib::{PlayerConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "musicplayer", about = "Toggle a remote stream and a bundled track")]
struct Cli {
    /// Remote audio URL for the first button
    #[arg(long)]
    url: Option<String>,

    /// Local audio file for the second button
    #[arg(long)]
    file: Option<PathBuf>,

    /// Config file (JSON); defaults to the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("musicplayer={0},musicplayer_lib={0}", cli.log_level))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PlayerConfig::load(cli.config.as_deref())?
        .with_resource_base(PlayerConfig::resource_dir().as_deref())
        .with_overrides(cli.url, cli.file);
    log::info!("URL button: {}", config.remote_url);
    log::info!("File button: {}", config.local_resource.display());

    let (emitter, events) = EventEmitter::channel();
    let volume = config.volume;
    let engine_emitter = emitter.clone();
    let app = Rc::new(RefCell::new(
        MusicPlayerApp::new(config, move || RodioEngine::new(volume, engine_emitter.clone()))
            .with_emitter(emitter),
    ));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let mut screen = playback_screen(&app);
        println!("{}", screen.layout());
        print!("[u] URL  [f] file  [s] status  [q] quit > ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match line.trim() {
            "u" => screen.click(ButtonId::PlayPauseUrl),
            "f" => screen.click(ButtonId::PlayPauseFile),
            "s" => print_status(&app.borrow()),
            "q" => break,
            "" => {}
            other => println!("Unknown key: {}", other),
        }

        for event in events.try_iter() {
            match event {
                PlayerEvent::Status(status) if status.error.is_some() => {
                    println!("Playback error: {}", status.error.unwrap_or_default());
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    app.borrow_mut().teardown();
    Ok(())
}

fn print_status<F>(app: &MusicPlayerApp<RodioEngine, F>)
where
    F: FnMut() -> Result<RodioEngine>,
{
    match app.engine() {
        Some(engine) => match serde_json::to_string_pretty(&engine.status()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Cannot render status: {}", e),
        },
        None => println!("Engine not started"),
    }
}
