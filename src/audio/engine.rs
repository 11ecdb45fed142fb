//! Player engine implementation using Rodio.
//!
//! Architecture:
//! - `RodioEngine`: owned handle that sends commands to the audio thread
//! - `AudioThread`: dedicated thread that owns the audio output and processes commands
//! - Uses crossbeam channels for thread-safe command passing
//! - SharedStatus (Arc<RwLock<EngineStatus>>) for reading status from any thread

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bytes::Bytes;
use crossbeam_channel::{bounded, Receiver, Sender};
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::audio::events::{self, EventEmitter};
use crate::audio::player::PlayerEngine;
use crate::audio::source::{MediaItem, PlaybackSource};
use crate::audio::state::{create_shared_status, EngineStatus, SharedStatus};
use crate::error::{PlayerError, Result};

/// Interval for track-end checks
const TICK_INTERVAL: Duration = Duration::from_millis(250);

type BoxedSource = Box<dyn Source<Item = i16> + Send>;

/// Commands sent to the audio thread
#[derive(Debug)]
enum AudioCommand {
    SetMediaItem(MediaItem),
    Prepare,
    Play,
    Pause,
    Shutdown,
}

/// Engine handle owned by the app.
///
/// The Rodio output stream is not `Send`, so it lives on its own thread and
/// this handle only talks to it over a channel.
pub struct RodioEngine {
    cmd_tx: Option<Sender<AudioCommand>>,
    thread: Option<JoinHandle<()>>,
    status: SharedStatus,
}

impl RodioEngine {
    /// Open the default output device on a new audio thread.
    pub fn new(volume: f32, emitter: EventEmitter) -> Result<Self> {
        let (cmd_tx, cmd_rx) = bounded::<AudioCommand>(32);
        let (ready_tx, ready_rx) = bounded::<std::result::Result<(), String>>(1);
        let status = create_shared_status();

        let status_clone = status.clone();
        let thread = thread::Builder::new()
            .name("musicplayer-audio".into())
            .spawn(move || {
                AudioThread::run(cmd_rx, ready_tx, status_clone, emitter, volume);
            })
            .map_err(PlayerError::ThreadSpawn)?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(PlayerError::OutputUnavailable(e));
            }
            Err(_) => {
                let _ = thread.join();
                return Err(PlayerError::OutputUnavailable(
                    "audio thread exited during startup".into(),
                ));
            }
        }

        log::info!("Audio engine initialized");
        Ok(Self {
            cmd_tx: Some(cmd_tx),
            thread: Some(thread),
            status,
        })
    }

    /// Current status as last written by the audio thread.
    pub fn status(&self) -> EngineStatus {
        self.status.read().clone()
    }

    fn send(&self, cmd: AudioCommand) {
        match &self.cmd_tx {
            Some(tx) => {
                if let Err(e) = tx.send(cmd) {
                    log::warn!("Audio thread not responding: {}", e);
                }
            }
            None => log::warn!("Engine already released, dropping {:?}", cmd),
        }
    }
}

impl PlayerEngine for RodioEngine {
    fn set_media_item(&mut self, item: MediaItem) {
        self.send(AudioCommand::SetMediaItem(item));
    }

    fn prepare(&mut self) {
        self.send(AudioCommand::Prepare);
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn release(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(AudioCommand::Shutdown);
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Audio thread panicked");
            }
        }
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.release();
    }
}

/// The audio processing thread.
///
/// Owns the Rodio OutputStream and Sink, which are not Send.
struct AudioThread {
    _stream: OutputStream,
    sink: Sink,
    status: SharedStatus,
    emitter: EventEmitter,
    current: Option<MediaItem>,
    /// Whether `current` has been decoded into the sink
    prepared: bool,
}

impl AudioThread {
    fn run(
        cmd_rx: Receiver<AudioCommand>,
        ready_tx: Sender<std::result::Result<(), String>>,
        status: SharedStatus,
        emitter: EventEmitter,
        volume: f32,
    ) {
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to open audio output: {}", e);
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };

        let sink = match Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to create audio sink: {}", e);
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
        };
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.pause();

        let _ = ready_tx.send(Ok(()));
        log::info!("Audio thread started");

        let mut thread = Self {
            _stream: stream,
            sink,
            status,
            emitter,
            current: None,
            prepared: false,
        };

        loop {
            match cmd_rx.recv_timeout(TICK_INTERVAL) {
                Ok(AudioCommand::Shutdown) => break,
                Ok(cmd) => thread.handle_command(cmd),
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => thread.tick(),
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
            }
        }

        thread.sink.stop();
        log::info!("Audio thread shutting down");
    }

    fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::SetMediaItem(item) => self.set_media_item(item),
            AudioCommand::Prepare => self.prepare(),
            AudioCommand::Play => self.play(),
            AudioCommand::Pause => self.pause(),
            AudioCommand::Shutdown => {}
        }
    }

    /// Track-end detection
    fn tick(&mut self) {
        if self.sink.empty() && self.status.read().is_playing {
            log::debug!("Track ended");
            self.prepared = false;
            self.status.write().is_playing = false;
            self.emit_status();
        }
    }

    fn set_media_item(&mut self, item: MediaItem) {
        self.sink.stop();
        self.prepared = false;
        {
            let mut status = self.status.write();
            status.current_item = Some(item.uri.clone());
            status.is_playing = false;
            status.error = None;
        }
        self.current = Some(item);
        self.emit_status();
    }

    fn prepare(&mut self) {
        let Some(item) = self.current.clone() else {
            log::warn!("Prepare called with no media item");
            return;
        };

        self.status.write().is_loading = true;
        self.emit_status();

        let result = match &item.source {
            PlaybackSource::LocalResource { path } => load_local_file(path),
            PlaybackSource::RemoteUrl { url } => load_http_stream(url),
        };

        let error = result.as_ref().err().map(ToString::to_string);
        match result {
            Ok(decoder) => {
                self.sink.stop();
                self.sink.pause();
                self.sink.append(decoder);
                self.prepared = true;
                log::debug!("Prepared {}", item.uri);
            }
            Err(e) => log::error!("Failed to load {}: {}", item.uri, e),
        }
        record_load_result(&mut self.status.write(), error);
        self.emit_status();
    }

    fn play(&mut self) {
        // Can't play if nothing is loaded
        if !self.prepared || self.sink.empty() {
            return;
        }
        if self.status.read().is_playing {
            return;
        }

        self.sink.play();
        self.status.write().is_playing = true;
        self.emit_status();
        log::debug!("Playing");
    }

    fn pause(&mut self) {
        if !self.status.read().is_playing {
            return;
        }

        self.sink.pause();
        self.status.write().is_playing = false;
        self.emit_status();
        log::debug!("Paused");
    }

    fn emit_status(&self) {
        let status = self.status.read();
        events::emit_status(&self.emitter, &status);
    }
}

/// Loading is over either way; a failure stays visible until the next item.
fn record_load_result(status: &mut EngineStatus, error: Option<String>) {
    status.is_loading = false;
    if error.is_some() {
        status.is_playing = false;
        status.error = error;
    }
}

fn load_local_file(path: &Path) -> Result<BoxedSource> {
    log::debug!("Loading local file: {}", path.display());

    let file = File::open(path).map_err(|source| PlayerError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| PlayerError::UnsupportedFormat(e.to_string()))?;
    Ok(Box::new(decoder))
}

fn load_http_stream(url: &str) -> Result<BoxedSource> {
    log::debug!("Loading HTTP stream: {}", url);

    let response = reqwest::blocking::get(url)
        .map_err(|e| PlayerError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PlayerError::HttpStatus(response.status().as_u16()));
    }

    let bytes = response
        .bytes()
        .map_err(|e| PlayerError::Network(e.to_string()))?;

    log::debug!("Downloaded {} bytes", bytes.len());

    let decoder: Decoder<Cursor<Bytes>> = Decoder::new(Cursor::new(bytes))
        .map_err(|e| PlayerError::UnsupportedFormat(e.to_string()))?;
    Ok(Box::new(decoder))
}
