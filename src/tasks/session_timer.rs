//! Session countdown background task

use std::sync::Arc;
use tokio::{
    sync::broadcast::error::RecvError,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, SessionKind, TickOutcome};

/// Background task that ticks one session once per tick period while it is counting down.
///
/// The task arms from the current state, counts with an interval and disarms
/// as soon as a snapshot with a different generation arrives or a tick is
/// rejected as stale. Returns when the state change channel closes or the
/// zone state can no longer be locked.
pub async fn session_timer_task(state: Arc<AppState>, kind: SessionKind) {
    info!("Starting {} timer task", kind);

    // Subscribe before the first look at the state so no change is missed
    let mut state_rx = state.state_change_tx.subscribe();

    loop {
        let generation = match state.armed_generation(kind) {
            Ok(Some(generation)) => generation,
            Ok(None) => {
                // Idle or paused, wait for the next state change
                match state_rx.recv().await {
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("{} timer lagged {} snapshots", kind, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            Err(e) => {
                // A poisoned lock never recovers
                error!("Failed to read {} session state: {}, stopping timer", kind, e);
                return;
            }
        };

        debug!("{} timer armed at generation {}", kind, generation);

        let mut interval = interval_at(Instant::now() + state.tick_period, state.tick_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick(kind, generation) {
                        Ok(TickOutcome::Running) => {}
                        Ok(TickOutcome::Finished) => {
                            debug!("{} countdown reached zero", kind);
                            break;
                        }
                        Ok(TickOutcome::Stale) => {
                            debug!("Dropped stale {} tick for generation {}", kind, generation);
                            break;
                        }
                        Err(e) => {
                            error!("Failed to tick {} session: {}", kind, e);
                            break;
                        }
                    }
                }

                changed = state_rx.recv() => {
                    match changed {
                        // Snapshots queued before arming carry older generations
                        Ok(snapshot) if snapshot.generation(kind) <= generation => {}
                        Ok(_) => {
                            debug!("{} session changed, disarming timer", kind);
                            break;
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("{} timer lagged {} snapshots, re-arming", kind, skipped);
                            break;
                        }
                        Err(RecvError::Closed) => {
                            info!("{} timer task stopping", kind);
                            return;
                        }
                    }
                }
            }
        }
    }

    info!("{} timer task stopping", kind);
}
