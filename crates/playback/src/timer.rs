//! Playback timers: single-shot, restartable delays.
//!
//! A timer is armed with [`PlaybackTimer::schedule`] and delivers the
//! [`TimerTick`] it was armed with once the interval elapses. Arming again
//! replaces the previous arm; [`PlaybackTimer::cancel`] disarms.
//!
//! Two implementations:
//!
//! - [`ManualTimer`]: a virtual clock advanced explicitly. Deterministic,
//!   used by tests and simulations.
//! - [`ThreadTimer`]: wall-clock timer on a background thread. Fired ticks
//!   arrive on a crossbeam channel owned by the host loop.
//!
//! ```text
//! Host loop                       Timer thread
//! ┌──────────────────┐  command  ┌──────────────────┐
//! │ schedule/cancel  │──────────►│ recv_timeout     │
//! │ on_timer_fired() │◄── tick ──│  (deadline)      │
//! └──────────────────┘  channel  └──────────────────┘
//! ```
//!
//! With a thread timer a tick can already sit in the channel when the host
//! cancels. Owners therefore compare every delivered tick with the one they
//! armed last and drop anything else.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

/// Token identifying one `schedule` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerTick(pub u64);

/// A one-shot, restartable delay.
pub trait PlaybackTimer {
    /// Arm the timer to deliver `tick` after `interval`, replacing any
    /// previous arm.
    fn schedule(&mut self, interval: Duration, tick: TimerTick);

    /// Disarm the timer. No effect if nothing is armed.
    fn cancel(&mut self);
}

impl<T: PlaybackTimer + ?Sized> PlaybackTimer for Box<T> {
    fn schedule(&mut self, interval: Duration, tick: TimerTick) {
        (**self).schedule(interval, tick)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

// ---------------------------------------------------------------------------
// Manual (virtual clock) timer
// ---------------------------------------------------------------------------

/// Deterministic timer driven by [`advance`](Self::advance).
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    armed: Option<(Duration, TimerTick)>,
    schedules: u64,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Virtual time at which the armed tick fires.
    pub fn deadline(&self) -> Option<Duration> {
        self.armed.map(|(deadline, _)| deadline)
    }

    /// Time left until the armed tick fires.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline().map(|d| d.saturating_sub(self.now))
    }

    /// Number of `schedule` calls so far.
    pub fn schedule_count(&self) -> u64 {
        self.schedules
    }

    /// Move the clock forward. Returns the armed tick if its deadline was
    /// reached; the timer is disarmed in that case.
    pub fn advance(&mut self, by: Duration) -> Option<TimerTick> {
        self.now = self.now.saturating_add(by);
        match self.armed {
            Some((deadline, tick)) if deadline <= self.now => {
                self.armed = None;
                Some(tick)
            }
            _ => None,
        }
    }

    /// Jump straight to the armed deadline and return its tick.
    pub fn fire(&mut self) -> Option<TimerTick> {
        let remaining = self.remaining()?;
        self.advance(remaining)
    }
}

impl PlaybackTimer for ManualTimer {
    fn schedule(&mut self, interval: Duration, tick: TimerTick) {
        self.schedules += 1;
        self.armed = Some((self.now.saturating_add(interval), tick));
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}

// ---------------------------------------------------------------------------
// Wall-clock timer thread
// ---------------------------------------------------------------------------

/// Commands sent from the owner to the timer thread.
enum TimerCommand {
    Arm { interval: Duration, tick: TimerTick },
    Disarm,
    Shutdown,
}

/// Wall-clock timer backed by a dedicated thread.
///
/// Dropping the timer stops and joins the thread.
pub struct ThreadTimer {
    cmd_tx: Sender<TimerCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

impl ThreadTimer {
    /// Spawn the timer thread. Fired ticks are sent on `fired_tx`.
    pub fn spawn(fired_tx: Sender<TimerTick>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = channel::unbounded::<TimerCommand>();
        let spawned = thread::Builder::new()
            .name("playback-timer".into())
            .spawn(move || run_timer(cmd_rx, fired_tx));
        Self::from_spawned(cmd_tx, spawned)
    }

    fn from_spawned(
        cmd_tx: Sender<TimerCommand>,
        spawned: io::Result<thread::JoinHandle<()>>,
    ) -> io::Result<Self> {
        match spawned {
            Ok(handle) => Ok(Self {
                cmd_tx,
                worker: Some(handle),
            }),
            Err(e) => {
                warn!(error = %e, "Failed to spawn playback timer thread");
                Err(e)
            }
        }
    }

    fn send(&self, command: TimerCommand) {
        if self.cmd_tx.send(command).is_err() {
            warn!("Playback timer thread is gone; command dropped");
        }
    }
}

fn run_timer(cmd_rx: Receiver<TimerCommand>, fired_tx: Sender<TimerTick>) {
    let mut deadline: Option<(Instant, TimerTick)> = None;
    loop {
        let command = match deadline {
            Some((at, _)) => {
                let wait = at.saturating_duration_since(Instant::now());
                match cmd_rx.recv_timeout(wait) {
                    Ok(cmd) => Some(cmd),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match cmd_rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            },
        };

        match command {
            Some(TimerCommand::Arm { interval, tick }) => {
                // An interval past the end of the clock never fires.
                deadline = Instant::now().checked_add(interval).map(|at| (at, tick));
                if deadline.is_none() {
                    debug!(tick = tick.0, "Timer interval out of range; tick will not fire");
                }
            }
            Some(TimerCommand::Disarm) => deadline = None,
            Some(TimerCommand::Shutdown) => break,
            None => {
                if let Some((_, tick)) = deadline.take() {
                    if fired_tx.send(tick).is_err() {
                        break;
                    }
                }
            }
        }
    }
    debug!("Playback timer thread exiting");
}

impl PlaybackTimer for ThreadTimer {
    fn schedule(&mut self, interval: Duration, tick: TimerTick) {
        self.send(TimerCommand::Arm { interval, tick });
    }

    fn cancel(&mut self) {
        self.send(TimerCommand::Disarm);
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(TimerCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
