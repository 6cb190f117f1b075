use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use serde::Serialize;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::{DurationInput, TickOutcome, TimerDurations, TimerPhase, TimerState};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// What a view needs to draw the timer.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub durations: TimerDurations,
}

impl TimerSnapshot {
    /// `MM:SS`, minutes unbounded.
    pub fn clock_label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: state.phase(),
            remaining_seconds: state.remaining_seconds(),
            running: state.is_running(),
            durations: state.durations(),
        }
    }
}

struct Ticker {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.handle.abort();
    }
}

struct TimerCore {
    state: TimerState,
    ticker: Option<Ticker>,
}

/// Owns the timer state and the one-second ticker that drives it.
///
/// Each operation publishes a fresh [`TimerSnapshot`] before releasing the
/// state lock, so subscribers see every transition in order.
#[derive(Clone)]
pub struct TimerController {
    core: Arc<Mutex<TimerCore>>,
    snapshots: Arc<watch::Sender<TimerSnapshot>>,
    tick_interval: Duration,
}

impl TimerController {
    pub fn new(durations: TimerDurations) -> Self {
        Self::with_tick_interval(durations, Duration::from_secs(1))
    }

    pub fn with_tick_interval(durations: TimerDurations, tick_interval: Duration) -> Self {
        let state = TimerState::new(durations);
        let (snapshots, _) = watch::channel(TimerSnapshot::from(&state));

        Self {
            core: Arc::new(Mutex::new(TimerCore {
                state,
                ticker: None,
            })),
            snapshots: Arc::new(snapshots),
            tick_interval,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        let core = self.core.lock().await;
        TimerSnapshot::from(&core.state)
    }

    /// Begins ticking. A second call while running changes nothing.
    pub async fn start(&self) -> TimerSnapshot {
        let mut core = self.core.lock().await;
        if core.ticker.is_some() {
            return TimerSnapshot::from(&core.state);
        }

        core.state.set_running(true);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_ticker(
            Arc::downgrade(&self.core),
            self.snapshots.clone(),
            self.tick_interval,
            cancel.clone(),
        ));
        core.ticker = Some(Ticker { handle, cancel });

        log_info!(
            "timer started in {} with {}s left",
            core.state.phase().as_str(),
            core.state.remaining_seconds()
        );
        self.publish(&core.state)
    }

    /// Stops ticking. Idempotent.
    pub async fn pause(&self) -> TimerSnapshot {
        let mut core = self.core.lock().await;
        if core.ticker.take().is_some() {
            log_info!("timer paused with {}s left", core.state.remaining_seconds());
        }
        core.state.set_running(false);
        self.publish(&core.state)
    }

    /// Pauses and reloads the current phase from the last configured
    /// durations. The phase itself is kept.
    pub async fn reset(&self) -> TimerSnapshot {
        let mut core = self.core.lock().await;
        core.ticker = None;
        core.state.set_running(false);
        core.state.reset_remaining();
        self.publish(&core.state)
    }

    pub async fn configure(
        &self,
        focus: impl Into<DurationInput>,
        brk: impl Into<DurationInput>,
    ) -> TimerSnapshot {
        let mut core = self.core.lock().await;
        core.state.configure(focus, brk);
        self.publish(&core.state)
    }

    fn publish(&self, state: &TimerState) -> TimerSnapshot {
        let snapshot = TimerSnapshot::from(state);
        self.snapshots.send_replace(snapshot);
        snapshot
    }
}

async fn run_ticker(
    core: Weak<Mutex<TimerCore>>,
    snapshots: Arc<watch::Sender<TimerSnapshot>>,
    period: Duration,
    cancel: CancellationToken,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                let Some(core) = core.upgrade() else {
                    break;
                };
                let mut guard = core.lock().await;
                // pause() may have won the lock while this tick was pending
                if cancel.is_cancelled() || !guard.state.is_running() {
                    break;
                }

                if let TickOutcome::PhaseChanged(phase) = guard.state.tick() {
                    log_info!(
                        "timer switched to {} for {}s",
                        phase.as_str(),
                        guard.state.remaining_seconds()
                    );
                }
                snapshots.send_replace(TimerSnapshot::from(&guard.state));
            }
        }
    }
}
