//! Cancellable countdown clock driving forced submission.
//!
//! The countdown is the only source of asynchronous state mutation in the
//! system. It ticks once per elapsed second on a spawned task, publishes
//! the remaining seconds over a watch channel, and signals expiry exactly
//! once. Cancellation is idempotent and also happens on drop, so no tick
//! can fire after the session has left the in-progress state.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Remaining-seconds threshold at which the display flags the timer as low.
pub const LOW_WATER_SECS: u64 = 60;

/// Default sitting duration: 3 hours.
pub const DEFAULT_DURATION_SECS: u64 = 3 * 60 * 60;

/// A running countdown.
pub struct Countdown {
    remaining: watch::Receiver<u64>,
    expired: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start counting down from `duration_secs` whole seconds.
    pub fn start(duration_secs: u64) -> Self {
        let (remaining_tx, remaining_rx) = watch::channel(duration_secs);
        let (expired_tx, expired_rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            let mut left = duration_secs;
            if left == 0 {
                let _ = expired_tx.send(()).await;
                return;
            }

            let mut ticker = interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately.
            ticker.tick().await;

            while left > 0 {
                ticker.tick().await;
                left -= 1;
                if remaining_tx.send(left).is_err() {
                    // Receiver gone; nobody is watching this sitting.
                    return;
                }
            }

            // Exactly one expiry signal, then the task ends; the clock
            // never goes negative and never fires twice.
            let _ = expired_tx.send(()).await;
        });

        Self {
            remaining: remaining_rx,
            expired: expired_rx,
            handle,
        }
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    /// Whether the display should flag the clock as running low.
    pub fn is_low(&self) -> bool {
        self.remaining() <= LOW_WATER_SECS
    }

    /// Wait for the countdown to reach zero.
    ///
    /// Resolves at most once per countdown. After cancellation it never
    /// resolves.
    pub async fn expired(&mut self) -> Option<()> {
        self.expired.recv().await
    }

    /// Stop the countdown and release the ticking task. Idempotent; called
    /// automatically on drop.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero_and_expires_once() {
        let mut countdown = Countdown::start(5);
        assert_eq!(countdown.remaining(), 5);
        // Let the spawned task anchor its interval before time advances.
        tokio::task::yield_now().await;

        for expected in (0..5).rev() {
            advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
            assert_eq!(countdown.remaining(), expected);
        }

        assert_eq!(countdown.expired().await, Some(()));
        assert_eq!(countdown.remaining(), 0);

        // Stops ticking after zero: more elapsed time changes nothing and
        // no second expiry arrives.
        advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.expired().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn never_goes_negative() {
        let mut countdown = Countdown::start(2);
        assert_eq!(countdown.expired().await, Some(()));
        assert_eq!(countdown.remaining(), 0);

        advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_expires_immediately() {
        let mut countdown = Countdown::start(0);
        assert_eq!(countdown.expired().await, Some(()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticks_and_expiry() {
        let mut countdown = Countdown::start(3);
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining(), 2);

        countdown.cancel();
        countdown.cancel(); // idempotent
        tokio::task::yield_now().await;

        advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining(), 2);
        assert_eq!(countdown.expired().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn low_water_flag() {
        let countdown = Countdown::start(61);
        assert!(!countdown.is_low());
        tokio::task::yield_now().await;

        advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(countdown.remaining(), 60);
        assert!(countdown.is_low());
    }
}
