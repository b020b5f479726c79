//! Study timer background task

use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Periodic clock feeding the countdown
pub trait TickSource: Send {
    /// Restart the cadence so the next tick lands one full period from now
    fn restart(&mut self);

    /// Wait for the next tick
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Wall-clock tick source backed by a tokio interval
#[derive(Debug)]
pub struct IntervalTicks {
    interval: Interval,
}

impl IntervalTicks {
    /// Must be called from within a tokio runtime
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicks {
    fn restart(&mut self) {
        self.interval.reset();
    }

    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Background task that ticks the timer while it is running.
///
/// Sleeps on the snapshot channel while paused and stops ticking as soon as
/// the timer reports it is no longer running.
pub async fn study_timer_task<T: TickSource>(state: Arc<AppState>, mut ticks: T) {
    info!("Starting study timer task");

    let mut timer_rx = state.watch_timer();

    loop {
        // Wait for the countdown to be started
        let started = timer_rx.wait_for(|snapshot| snapshot.is_running).await.map(|_| ());
        if started.is_err() {
            warn!("Timer update channel closed, stopping study timer task");
            return;
        }

        debug!("Countdown running, starting tick driver");
        ticks.restart();

        loop {
            tokio::select! {
                _ = ticks.next_tick() => {
                    match state.tick_timer() {
                        Ok((Some(switch), snapshot)) => {
                            info!("Interval finished, next up: {} ({})", snapshot.title, snapshot.countdown);
                            debug!("Mode switch: {:?}", switch);
                            break;
                        }
                        Ok((None, snapshot)) => {
                            if !snapshot.is_running {
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to tick timer: {}, stopping study timer task", e);
                            return;
                        }
                    }
                }

                changed = timer_rx.changed() => {
                    if changed.is_err() {
                        warn!("Timer update channel closed, stopping study timer task");
                        return;
                    }
                    let running = timer_rx.borrow_and_update().is_running;
                    if !running {
                        debug!("Countdown paused, stopping tick driver");
                        break;
                    }
                }
            }
        }
    }
}
