//! Background session timer.
//!
//! A [`Timer`] owns one worker thread at a time. The worker counts whole
//! intervals and reports them over a channel; it never touches store state.
//! [`run_session`] drives a store from those events until the session ends.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::error::{MandalError, Result};
use crate::state::{SessionId, Store, TickOutcome};

/// Event emitted by the timer worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One more interval has elapsed.
    Tick { seconds: u64 },
    /// The worker has stopped; always the last event.
    Stopped { seconds: u64 },
}

#[derive(Debug)]
enum Control {
    Stop,
}

/// Handle that stops a running timer from another thread.
#[derive(Debug, Clone)]
pub struct TimerStopper {
    control: Sender<Control>,
}

impl TimerStopper {
    /// Ask the timer to stop. Does nothing if it already has.
    pub fn stop(&self) {
        let _ = self.control.send(Control::Stop);
    }
}

/// Periodic counter on a background thread.
#[derive(Debug)]
pub struct Timer {
    interval: Duration,
    control: Option<Sender<Control>>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    /// A timer that ticks once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            control: None,
            handle: None,
        }
    }

    /// A timer using the configured tick interval.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_interval())
    }

    /// Start counting from zero.
    ///
    /// A timer that is already running is stopped first.
    pub fn start(&mut self) -> Receiver<TimerEvent> {
        self.stop();

        let (control_tx, control_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let interval = self.interval;

        self.handle = Some(thread::spawn(move || {
            count(interval, &control_rx, &event_tx);
        }));
        self.control = Some(control_tx);

        event_rx
    }

    /// Whether a worker is running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// A handle for stopping the current run from elsewhere.
    pub fn stopper(&self) -> Option<TimerStopper> {
        self.control.as_ref().map(|control| TimerStopper {
            control: control.clone(),
        })
    }

    /// Ask the worker to stop without waiting for it.
    pub fn request_stop(&self) {
        if let Some(control) = &self.control {
            let _ = control.send(Control::Stop);
        }
    }

    /// Stop the worker and wait for it to exit.
    pub fn stop(&mut self) {
        if let Some(control) = self.control.take() {
            let _ = control.send(Control::Stop);
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Timer thread panicked");
            }
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn count(interval: Duration, control: &Receiver<Control>, events: &Sender<TimerEvent>) {
    let mut seconds = 0;
    let mut next = Instant::now() + interval;

    loop {
        let wait = next.saturating_duration_since(Instant::now());
        match control.recv_timeout(wait) {
            Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => {
                let _ = events.send(TimerEvent::Stopped { seconds });
                return;
            }
            Err(RecvTimeoutError::Timeout) => {
                seconds += 1;
                next += interval;
                if events.send(TimerEvent::Tick { seconds }).is_err() {
                    return;
                }
            }
        }
    }
}

/// Run one timed session against `store`.
///
/// Marks the store's timer as running, feeds it every tick, stops the
/// timer once the session length is reached, and records the session when
/// the worker reports it has stopped.
pub fn run_session(store: &mut Store, timer: &mut Timer) -> Result<SessionId> {
    let events = timer.start();
    drive_session(store, timer, events)
}

/// Like [`run_session`] for a timer the caller has already started.
///
/// Callers start the timer themselves when they need a [`TimerStopper`]
/// before events flow. Stopping early records the shorter session.
pub fn drive_session(
    store: &mut Store,
    timer: &mut Timer,
    events: Receiver<TimerEvent>,
) -> Result<SessionId> {
    store.start_timer();

    let mut stop_requested = false;
    for event in events.iter() {
        match event {
            TimerEvent::Tick { seconds } => {
                if store.record_tick(seconds) == TickOutcome::Complete && !stop_requested {
                    tracing::debug!(seconds, "Session length reached");
                    stop_requested = true;
                    timer.request_stop();
                }
            }
            TimerEvent::Stopped { seconds } => {
                timer.stop();
                store.stop_timer();
                return Ok(store.record_timer_session(seconds));
            }
        }
    }

    store.stop_timer();
    Err(MandalError::Other(anyhow::anyhow!(
        "Timer stopped without reporting elapsed time"
    )))
}
