//! Brew session driver
//!
//! A `BrewSession` is a tokio task that owns one `TimerEngine` and its
//! once-per-second tick schedule. The host talks to it only through a
//! `SessionHandle`: commands go in over an mpsc channel, snapshots come out
//! over a watch channel.
//!
//! The tick interval only exists while the engine is running. It is created
//! with its first tick one full period after arming (so a resume never ticks
//! immediately) and dropped on pause, reset, finish and shutdown, so no tick
//! can reach a discarded engine.

mod error;

#[cfg(test)]
mod session_tests;

pub use error::SessionError;

use std::sync::Arc;
use std::time::Duration;

use brewlog_types::AppConfig;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::audio::AudioCues;
use crate::timeline::RecipeTimeline;
use crate::timer::{TickOutcome, TimerEngine, TimerState};

/// Tuning for the session driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Real time per engine tick. One second outside tests and demos.
    pub tick_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
        }
    }
}

enum SessionCommand {
    Toggle(oneshot::Sender<TimerState>),
    Reset(oneshot::Sender<TimerState>),
    SetSound(bool, oneshot::Sender<TimerState>),
    Shutdown(oneshot::Sender<()>),
}

/// The task side of a session
pub struct BrewSession {
    engine: TimerEngine,
    commands: mpsc::Receiver<SessionCommand>,
    state_tx: watch::Sender<TimerState>,
    ticker: Option<Interval>,
    tick_interval: Duration,
}

impl BrewSession {
    /// Spawn the session task on the current tokio runtime.
    pub fn spawn(
        timeline: Arc<RecipeTimeline>,
        audio: AudioCues,
        options: SessionOptions,
    ) -> SessionHandle {
        let engine = TimerEngine::new(timeline.clone(), audio);
        let (state_tx, state_rx) = watch::channel(engine.snapshot());
        let (command_tx, command_rx) = mpsc::channel(16);

        tracing::info!(
            steps = timeline.len(),
            total_secs = timeline.total_duration_secs(),
            "Brew session started"
        );

        let session = BrewSession {
            engine,
            commands: command_rx,
            state_tx,
            ticker: None,
            tick_interval: options.tick_interval,
        };
        let task = tokio::spawn(session.run());

        SessionHandle {
            commands: command_tx,
            state: state_rx,
            timeline,
            task: Some(task),
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    if let Some(ack) = self.handle_command(command) {
                        self.stop();
                        let _ = ack.send(());
                        return;
                    }
                }
                _ = next_tick(&mut self.ticker) => self.on_tick(),
            }
        }
        self.stop();
    }

    /// Returns the shutdown acknowledgement when the session should stop.
    fn handle_command(&mut self, command: SessionCommand) -> Option<oneshot::Sender<()>> {
        tracing::debug!(?command, "Session command");
        let reply = match command {
            SessionCommand::Toggle(reply) => {
                self.engine.toggle();
                reply
            }
            SessionCommand::Reset(reply) => {
                self.engine.reset();
                reply
            }
            SessionCommand::SetSound(enabled, reply) => {
                self.engine.set_sound_enabled(enabled);
                reply
            }
            SessionCommand::Shutdown(ack) => return Some(ack),
        };

        self.sync_ticker();
        let state = self.publish();
        let _ = reply.send(state);
        None
    }

    fn on_tick(&mut self) {
        if self.engine.tick() == TickOutcome::Ignored {
            // A tick raced a pause; the interval is already gone
            self.ticker = None;
            return;
        }
        self.sync_ticker();
        self.publish();
    }

    /// Arm the interval when running, drop it otherwise
    fn sync_ticker(&mut self) {
        if !self.engine.run_state().is_running() {
            self.ticker = None;
        } else if self.ticker.is_none() {
            let period = self.tick_interval;
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.ticker = Some(ticker);
        }
    }

    fn publish(&self) -> TimerState {
        let state = self.engine.snapshot();
        self.state_tx.send_replace(state);
        state
    }

    fn stop(&mut self) {
        self.ticker = None;
        self.engine.teardown();
        self.publish();
        tracing::info!("Brew session stopped");
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// The host's handle to a running session. Dropping it aborts the task.
#[derive(Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    state: watch::Receiver<TimerState>,
    timeline: Arc<RecipeTimeline>,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Start, pause or resume. Resolves to the snapshot after the change.
    pub async fn toggle(&self) -> Result<TimerState, SessionError> {
        self.request(SessionCommand::Toggle).await
    }

    pub async fn reset(&self) -> Result<TimerState, SessionError> {
        self.request(SessionCommand::Reset).await
    }

    pub async fn set_sound(&self, enabled: bool) -> Result<TimerState, SessionError> {
        self.request(|reply| SessionCommand::SetSound(enabled, reply))
            .await
    }

    /// Latest published snapshot
    pub fn state(&self) -> TimerState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.state.clone()
    }

    pub fn timeline(&self) -> &Arc<RecipeTimeline> {
        &self.timeline
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Stop the task, cancel any pending tick and release audio.
    pub async fn shutdown(&mut self) -> Result<(), SessionError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Shutdown(ack_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        let acked = ack_rx.await.map_err(|_| SessionError::Closed);

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        acked
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<TimerState>) -> SessionCommand,
    ) -> Result<TimerState, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for SessionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionCommand::Toggle(_) => f.write_str("Toggle"),
            SessionCommand::Reset(_) => f.write_str("Reset"),
            SessionCommand::SetSound(enabled, _) => write!(f, "SetSound({enabled})"),
            SessionCommand::Shutdown(_) => f.write_str("Shutdown"),
        }
    }
}
