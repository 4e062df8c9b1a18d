//! Opening-hours gate.
//!
//! The store is open while the local hour is in `[open_hour, close_hour)`.
//! There is no signal for crossing an hour boundary, so the status is polled.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::StoreConfig;

/// Whether orders can be placed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreStatus {
    Open,
    Closed,
}

/// Opening-hours predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityGate {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl AvailabilityGate {
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open_hour,
            close_hour,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.open_hour, config.close_hour)
    }

    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        let hour = time.hour();
        hour >= self.open_hour && hour < self.close_hour
    }

    pub fn status_at(&self, now: NaiveDateTime) -> StoreStatus {
        if self.is_open_at(now.time()) {
            StoreStatus::Open
        } else {
            StoreStatus::Closed
        }
    }

    /// Banner shown in the header.
    pub fn banner(&self, status: StoreStatus) -> String {
        match status {
            StoreStatus::Open => format!("Aberto agora! Fechamos às {:02}:00", self.close_hour),
            StoreStatus::Closed => {
                format!("Fechado no momento. Abrimos às {:02}:00", self.open_hour)
            }
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStatus::Open => write!(f, "open"),
            StoreStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Background poller reporting open/closed transitions.
///
/// Evaluates immediately, then once per interval, and sends a status only when
/// it differs from the previous one. Dropping the watcher stops the thread.
pub struct OpenStatusWatcher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl OpenStatusWatcher {
    pub fn spawn<C>(
        clock: C,
        gate: AvailabilityGate,
        interval: Duration,
        on_change: Sender<StoreStatus>,
    ) -> std::io::Result<Self>
    where
        C: Clock + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("open-status".to_string())
            .spawn(move || {
                let mut last = None;
                loop {
                    let status = gate.status_at(clock.now());
                    if last != Some(status) {
                        info!("Store is now {}", status);
                        if on_change.send(status).is_err() {
                            debug!("Status receiver gone, stopping watcher");
                            break;
                        }
                        last = Some(status);
                    }

                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop polling and wait for the thread to exit.
    pub fn stop(&mut self) {
        // Dropping the sender wakes the thread with `Disconnected`.
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Open-status watcher thread panicked");
            }
        }
    }
}

impl Drop for OpenStatusWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn gate() -> AvailabilityGate {
        AvailabilityGate::from_config(&StoreConfig::default())
    }

    #[test]
    fn test_open_window_bounds() {
        let gate = gate();
        assert_eq!(gate.status_at(at(18, 59)), StoreStatus::Closed);
        assert_eq!(gate.status_at(at(19, 0)), StoreStatus::Open);
        assert_eq!(gate.status_at(at(22, 59)), StoreStatus::Open);
        assert_eq!(gate.status_at(at(23, 0)), StoreStatus::Closed);
        assert_eq!(gate.status_at(at(3, 0)), StoreStatus::Closed);
    }

    #[test]
    fn test_banner() {
        let gate = gate();
        assert_eq!(gate.banner(StoreStatus::Open), "Aberto agora! Fechamos às 23:00");
        assert_eq!(
            gate.banner(StoreStatus::Closed),
            "Fechado no momento. Abrimos às 19:00"
        );
    }

    #[test]
    fn test_watcher_reports_initial_status() {
        let (tx, rx) = mpsc::channel();
        let watcher =
            OpenStatusWatcher::spawn(FixedClock(at(20, 0)), gate(), Duration::from_secs(60), tx)
                .unwrap();

        let status = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(status, StoreStatus::Open);
        drop(watcher);
    }

    struct SettableClock(Mutex<NaiveDateTime>);

    impl Clock for SettableClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn test_watcher_reports_only_transitions() {
        let clock = Arc::new(SettableClock(Mutex::new(at(18, 59))));
        let (tx, rx) = mpsc::channel();
        let mut watcher =
            OpenStatusWatcher::spawn(clock.clone(), gate(), Duration::from_millis(5), tx).unwrap();

        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            StoreStatus::Closed
        );

        *clock.0.lock().unwrap() = at(19, 0);
        assert_eq!(
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            StoreStatus::Open
        );

        watcher.stop();
        // Thread has exited, so the sender is gone and nothing else arrives.
        assert!(rx.recv().is_err());
    }
}
