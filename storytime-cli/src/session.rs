//! Interactive viewing sessions.
//!
//! A session owns the viewer, its wall-clock timer, and the library. Three
//! sources feed the loop, all over crossbeam channels:
//!
//! ```text
//! stdin reader thread ──lines──┐
//! ThreadTimer ─────────ticks───┼──► select! ──► viewer ──► render
//! viewer (VisitSink) ──commands┘                  │
//!                                                 └──► library.apply_pending
//! ```

use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver};
use tracing::{debug, info};

use st_common::{PlaybackConfig, StoryError};
use st_library::{LibraryCommand, StoryLibrary};
use st_playback::{
    Playlist, SceneViewer, ShortsController, TapZone, ThreadTimer, TimerTick, ViewerIntent,
};

use crate::render;

pub const SHORTS_HELP: &str =
    "keys: p play/pause, n next, b previous, l like, m mute, s share, t <0..1> tap, q quit";
pub const VIEW_HELP: &str = "keys: p play/pause, n next scene, b previous scene, q quit";

/// Map one input line to a shorts intent.
pub fn parse_shorts_input(line: &str) -> Option<ViewerIntent> {
    let mut words = line.split_whitespace();
    let intent = match words.next()? {
        "p" | "play" | "pause" => ViewerIntent::TogglePlayPause,
        "n" | "next" => ViewerIntent::NextStory,
        "b" | "back" | "prev" => ViewerIntent::PrevStory,
        "l" | "like" => ViewerIntent::ToggleLike,
        "m" | "mute" => ViewerIntent::ToggleMute,
        "s" | "share" => ViewerIntent::Share,
        "q" | "quit" | "close" => ViewerIntent::Close,
        "t" | "tap" => {
            let fraction: f32 = words.next()?.parse().ok()?;
            ViewerIntent::Tap(TapZone::from_vertical_fraction(fraction))
        }
        _ => return None,
    };
    Some(intent)
}

/// Forward stdin lines until EOF. The thread is left blocked on stdin when
/// the session ends; it dies with the process.
fn spawn_input_reader() -> Result<Receiver<String>> {
    let (tx, rx) = channel::unbounded();
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn stdin reader thread")?;
    Ok(rx)
}

enum Event {
    Tick(TimerTick),
    Input(String),
    Disconnected,
}

fn next_event(tick_rx: &Receiver<TimerTick>, input_rx: &Receiver<String>) -> Event {
    crossbeam::select! {
        recv(tick_rx) -> tick => tick.map_or(Event::Disconnected, Event::Tick),
        recv(input_rx) -> line => line.map_or(Event::Disconnected, Event::Input),
    }
}

/// Run the shorts viewer over the whole library, starting at `start`.
pub fn run_shorts(library: &mut StoryLibrary, config: &PlaybackConfig, start: usize) -> Result<()> {
    let (tick_tx, tick_rx) = channel::unbounded();
    let (cmd_tx, cmd_rx) = channel::unbounded::<LibraryCommand>();
    let timer = ThreadTimer::spawn(tick_tx).context("Failed to spawn playback timer thread")?;
    let mut viewer = ShortsController::new(config.clone(), timer, cmd_tx);

    viewer.open(Playlist::from_library(library), start);
    if !viewer.is_open() {
        println!("No stories to play.");
        return Ok(());
    }

    let input_rx = spawn_input_reader()?;
    println!("{SHORTS_HELP}");

    let mut redraw = true;
    while viewer.is_open() {
        library.apply_pending(&cmd_rx);
        if redraw {
            if let Some(snap) = viewer.snapshot() {
                println!("{}", render::shorts_frame(&snap, library));
            }
        }

        redraw = match next_event(&tick_rx, &input_rx) {
            Event::Tick(tick) => viewer.on_timer_fired(tick),
            Event::Input(line) => match parse_shorts_input(&line) {
                Some(intent) => {
                    debug!(?intent, "Viewer intent");
                    if let Some(notice) = viewer.handle(intent) {
                        println!("{notice}");
                    }
                    true
                }
                None => {
                    println!("{SHORTS_HELP}");
                    false
                }
            },
            Event::Disconnected => {
                viewer.close();
                false
            }
        };
    }

    let applied = library.apply_pending(&cmd_rx);
    info!(applied, "Shorts session ended");
    Ok(())
}

/// Run the scene viewer on the story at `index`.
pub fn run_scene_viewer(library: &StoryLibrary, index: usize) -> Result<()> {
    let story = library.get(index).ok_or(StoryError::InvalidIndex {
        index,
        len: library.len(),
    })?;

    let (tick_tx, tick_rx) = channel::unbounded();
    let timer = ThreadTimer::spawn(tick_tx).context("Failed to spawn playback timer thread")?;
    let mut viewer = SceneViewer::new(timer);
    viewer.open(story);

    let input_rx = spawn_input_reader()?;
    println!("{}\n{VIEW_HELP}", story.title);

    let mut redraw = true;
    while viewer.is_open() {
        if redraw {
            if let Some(snap) = viewer.snapshot() {
                println!("{}", render::scene_frame(&snap, library));
            }
        }

        redraw = match next_event(&tick_rx, &input_rx) {
            Event::Tick(tick) => {
                // The last scene pauses the viewer without moving.
                viewer.on_timer_fired(tick);
                true
            }
            Event::Input(line) => match line.trim() {
                "p" | "play" | "pause" => {
                    viewer.toggle_play_pause();
                    true
                }
                "n" | "next" => viewer.next_scene(),
                "b" | "back" | "prev" => viewer.prev_scene(),
                "q" | "quit" | "close" => {
                    viewer.close();
                    false
                }
                _ => {
                    println!("{VIEW_HELP}");
                    false
                }
            },
            Event::Disconnected => {
                viewer.close();
                false
            }
        };
    }
    Ok(())
}
