//! Interrupt wiring and interruptible waits.
//!
//! A `Shutdown` handle pairs an `AtomicBool` with a crossbeam channel: the
//! Ctrl+C handler stores the flag and signals the channel, and the dashboard
//! loop blocks on [`Shutdown::wait`] with a timeout, so a signal received
//! mid-sleep takes effect within channel wakeup latency instead of after the
//! full interval. `manual` builds an uninstalled handle for tests.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

#[cfg(test)]
use crossbeam_channel::Sender;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use dash_common::{DashboardError, Result};
use log::info;

/// Cancellation handle observed by the dashboard loop.
pub struct Shutdown {
    flag: Arc<AtomicBool>,
    rx: Receiver<()>,
}

impl Shutdown {
    /// Install the Ctrl+C handler and return the handle observing it.
    pub fn install() -> Result<Self> {
        let flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = bounded::<()>(1);
        {
            let flag = flag.clone();
            ctrlc::set_handler(move || {
                info!("Ctrl+C received. Shutting down dashboard...");
                flag.store(true, Ordering::SeqCst);
                let _ = tx.try_send(());
            })
            .map_err(|e| {
                DashboardError::Format(format!("Failed to set Ctrl+C handler: {e}"))
            })?;
        }
        Ok(Self { flag, rx })
    }

    /// Uninstalled handle triggered through the returned sender. Test hook.
    #[cfg(test)]
    pub fn manual() -> (Self, Sender<()>) {
        let flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = bounded::<()>(1);
        (Self { flag, rx }, tx)
    }

    /// True once cancellation was requested.
    pub fn is_triggered(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        match self.rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                self.flag.store(true, Ordering::Relaxed);
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    /// Block for up to `timeout`; returns `true` if cancellation arrived
    /// before the timeout elapsed.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_triggered() {
            return true;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                self.flag.store(true, Ordering::Relaxed);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn wait_returns_early_on_signal() {
        let (shutdown, tx) = Shutdown::manual();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send(()).unwrap();
        });

        let started = Instant::now();
        assert!(shutdown.wait(Duration::from_secs(60)));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(shutdown.is_triggered());
    }

    #[test]
    fn wait_times_out_without_signal() {
        let (shutdown, _tx) = Shutdown::manual();
        assert!(!shutdown.wait(Duration::from_millis(5)));
        assert!(!shutdown.is_triggered());
    }

    #[test]
    fn dropped_sender_counts_as_cancellation() {
        let (shutdown, tx) = Shutdown::manual();
        drop(tx);
        assert!(shutdown.is_triggered());
    }
}
