//! The dashboard loop: a small state machine driving
//! fetch, render, display, and sleep forever.
//!
//! Failure policy per cycle:
//! - A symbol-scoped fetch error is recorded in its `FetchResult`, logged at
//!   warn, and costs that symbol its row and chart for the cycle.
//! - A cycle-level fetch error (`FeedUnreachable`, I/O) or an output-port
//!   error abandons the cycle: an error frame is shown and the loop backs
//!   off before retrying. No error escapes `run`.
//! - Cancellation is observed at the top of the fetch phase and during both
//!   sleep phases, and is the only way to reach `Terminated`.

use std::time::Duration;

use chrono::Local;
use dash_common::{FetchResult, QuoteSource, Result, Ticker};
use log::{debug, error, info, warn};
use strum_macros::Display;

use crate::chart::ChartRenderer;
use crate::frame::{self, Frame};
use crate::holdings::Holding;
use crate::port::FramePort;
use crate::shutdown::Shutdown;

/// Dashboard loop configuration, immutable once the loop starts.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Symbols to fetch, in display order.
    pub watchlist: Vec<Ticker>,
    /// Static holdings shown next to the watchlist.
    pub holdings: Vec<Holding>,
    /// Sleep between successful cycles.
    pub refresh: Duration,
    /// Sleep after a cycle-level failure.
    pub backoff: Duration,
    /// How many leading watchlist symbols get a chart.
    pub chart_count: usize,
}

/// Phase of the dashboard loop.
#[derive(Debug, Display)]
pub enum LoopState {
    /// Pulling one snapshot per watchlist symbol.
    Fetching,
    /// Composing a frame from this cycle's fetch results.
    Rendering(Vec<FetchResult>),
    /// Handing the composed frame to the output port.
    Displaying(Frame),
    /// Waiting out the refresh interval.
    Sleeping,
    /// Waiting out the backoff interval after a cycle-level failure.
    BackoffSleeping(String),
    /// Final state; only cancellation leads here.
    Terminated,
}

/// The dashboard loop over a quote source and an output port.
pub struct Dashboard<S, P> {
    config: DashboardConfig,
    renderer: ChartRenderer,
    source: S,
    port: P,
    shutdown: Shutdown,
}

impl<S: QuoteSource, P: FramePort> Dashboard<S, P> {
    /// Assemble a loop; nothing runs until [`Self::run`].
    pub fn new(
        config: DashboardConfig,
        renderer: ChartRenderer,
        source: S,
        port: P,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            config,
            renderer,
            source,
            port,
            shutdown,
        }
    }

    /// Drive the state machine until cancellation.
    pub fn run(&mut self) {
        info!(
            "Dashboard starting: {} symbols, refresh {:?}, backoff {:?}",
            self.config.watchlist.len(),
            self.config.refresh,
            self.config.backoff
        );

        let mut state = LoopState::Fetching;
        loop {
            state = self.step(state);
            debug!("Dashboard state: {state}");
            if matches!(state, LoopState::Terminated) {
                break;
            }
        }
        info!("Dashboard loop terminated.");
    }

    /// Advance the loop by one transition. Exposed so tests can drive the
    /// machine phase by phase without real sleeps.
    pub fn step(&mut self, state: LoopState) -> LoopState {
        match state {
            LoopState::Fetching => {
                if self.shutdown.is_triggered() {
                    return LoopState::Terminated;
                }
                match self.fetch_watchlist() {
                    Ok(results) => LoopState::Rendering(results),
                    Err(err) => {
                        error!("Fetch cycle failed: {err}");
                        LoopState::BackoffSleeping(err.to_string())
                    }
                }
            }
            LoopState::Rendering(results) => {
                let composed = frame::compose(
                    &results,
                    &self.config.holdings,
                    &self.renderer,
                    self.config.chart_count,
                    self.config.refresh.as_secs(),
                    Local::now(),
                );
                LoopState::Displaying(composed)
            }
            LoopState::Displaying(composed) => match self.port.present(&composed) {
                Ok(()) => LoopState::Sleeping,
                Err(err) => {
                    error!("Frame display failed: {err}");
                    LoopState::BackoffSleeping(err.to_string())
                }
            },
            LoopState::Sleeping => self.pause(self.config.refresh),
            LoopState::BackoffSleeping(cause) => {
                let error_frame =
                    frame::compose_error(&cause, self.config.backoff.as_secs(), Local::now());
                if let Err(err) = self.port.present(&error_frame) {
                    error!("Error frame display failed: {err}");
                }
                self.pause(self.config.backoff)
            }
            LoopState::Terminated => LoopState::Terminated,
        }
    }

    /// Fetch every watchlist symbol once, isolating symbol-scoped failures.
    ///
    /// Returns `Err` only for cycle-level causes, which abandon the sweep
    /// mid-watchlist.
    fn fetch_watchlist(&mut self) -> Result<Vec<FetchResult>> {
        let mut results = Vec::with_capacity(self.config.watchlist.len());
        for ticker in &self.config.watchlist {
            match self.source.fetch_quote(ticker) {
                Ok(snapshot) => results.push(FetchResult {
                    ticker: ticker.clone(),
                    outcome: Ok(snapshot),
                }),
                Err(err) if err.is_cycle_level() => return Err(err),
                Err(err) => {
                    warn!("Skipping {ticker} this cycle: {err}");
                    results.push(FetchResult {
                        ticker: ticker.clone(),
                        outcome: Err(err),
                    });
                }
            }
        }
        Ok(results)
    }

    fn pause(&self, interval: Duration) -> LoopState {
        if self.shutdown.wait(interval) {
            LoopState::Terminated
        } else {
            LoopState::Fetching
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Instant;

    use crossbeam_channel::Sender;
    use dash_common::{DashboardError, QuoteSnapshot};

    fn snapshot(ticker: &Ticker) -> QuoteSnapshot {
        QuoteSnapshot {
            ticker: ticker.clone(),
            name: ticker.to_string(),
            price: Some(100.0),
            previous_close: Some(100.0),
            day_high: Some(101.0),
            day_low: Some(99.0),
            volume: Some(1_000),
            closes: vec![99.0, 100.0, 101.0],
            timestamp: 0,
        }
    }

    fn ok_for(symbol: &str) -> Result<QuoteSnapshot> {
        let ticker: Ticker = symbol.parse().unwrap();
        Ok(snapshot(&ticker))
    }

    /// Feed that replays scripted outcomes per fetch call, then keeps
    /// succeeding once the script runs out.
    struct ScriptedSource {
        script: VecDeque<Result<QuoteSnapshot>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<QuoteSnapshot>>) -> Self {
            Self {
                script: script.into(),
            }
        }
    }

    impl QuoteSource for ScriptedSource {
        fn fetch_quote(&mut self, ticker: &Ticker) -> Result<QuoteSnapshot> {
            self.script.pop_front().unwrap_or_else(|| Ok(snapshot(ticker)))
        }
    }

    /// Port that records every presented frame behind a shared handle.
    #[derive(Default, Clone)]
    struct CapturePort {
        frames: Arc<Mutex<Vec<Frame>>>,
    }

    impl FramePort for CapturePort {
        fn present(&mut self, frame: &Frame) -> Result<()> {
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }
    }

    /// Port that always fails, standing in for a broken terminal.
    struct FailingPort;

    impl FramePort for FailingPort {
        fn present(&mut self, _frame: &Frame) -> Result<()> {
            Err(DashboardError::Io(std::io::Error::other("terminal gone")))
        }
    }

    fn config(symbols: &[&str]) -> DashboardConfig {
        DashboardConfig {
            watchlist: symbols.iter().map(|s| s.parse().unwrap()).collect(),
            holdings: Vec::new(),
            refresh: Duration::from_millis(5),
            backoff: Duration::from_millis(5),
            chart_count: 1,
        }
    }

    fn dashboard<S: QuoteSource, P: FramePort>(
        config: DashboardConfig,
        source: S,
        port: P,
    ) -> (Dashboard<S, P>, Sender<()>) {
        let (shutdown, tx) = Shutdown::manual();
        let renderer = ChartRenderer::new(10, 4).unwrap();
        (Dashboard::new(config, renderer, source, port, shutdown), tx)
    }

    #[test]
    fn cycle_walks_through_all_phases() {
        let port = CapturePort::default();
        let view = port.clone();
        let (mut dash, _tx) = dashboard(config(&["A"]), ScriptedSource::new(vec![]), port);

        let state = dash.step(LoopState::Fetching);
        assert!(matches!(state, LoopState::Rendering(_)));
        let state = dash.step(state);
        assert!(matches!(state, LoopState::Displaying(_)));
        let state = dash.step(state);
        assert!(matches!(state, LoopState::Sleeping));
        let state = dash.step(state);
        assert!(matches!(state, LoopState::Fetching));

        assert_eq!(view.frames.lock().unwrap().len(), 1);
    }

    #[test]
    fn symbol_failure_is_isolated_to_its_row() {
        let source = ScriptedSource::new(vec![
            ok_for("A"),
            Err(DashboardError::QuoteUnavailable {
                ticker: "B".to_string(),
                reason: "halted".to_string(),
            }),
        ]);
        let (mut dash, _tx) = dashboard(config(&["A", "B"]), source, CapturePort::default());

        let state = dash.step(LoopState::Fetching);
        let LoopState::Rendering(results) = state else {
            panic!("expected Rendering after a symbol-scoped failure");
        };
        assert_eq!(results.len(), 2);
        assert!(results[0].outcome.is_ok());
        assert!(results[1].outcome.is_err());

        let state = dash.step(LoopState::Rendering(results));
        let LoopState::Displaying(composed) = &state else {
            panic!("expected Displaying");
        };
        assert_eq!(composed.watchlist.rows.len(), 1);
        assert_eq!(composed.watchlist.rows[0][0].text, "A");
        assert_eq!(composed.skipped.len(), 1);
        assert!(composed.notice.is_none());
    }

    #[test]
    fn transport_failure_shows_error_frame_and_backs_off() {
        let source = ScriptedSource::new(vec![Err(DashboardError::FeedUnreachable(
            "dns down".to_string(),
        ))]);
        let port = CapturePort::default();
        let view = port.clone();
        let (mut dash, _tx) = dashboard(config(&["A", "B"]), source, port);

        let state = dash.step(LoopState::Fetching);
        let LoopState::BackoffSleeping(cause) = &state else {
            panic!("expected BackoffSleeping after a transport failure");
        };
        assert!(cause.contains("dns down"));

        let state = dash.step(state);
        assert!(matches!(state, LoopState::Fetching));

        let frames = view.frames.lock().unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].status.text, "RETRY");
        assert!(frames[0].notice.as_ref().unwrap().text.contains("dns down"));
    }

    #[test]
    fn display_failure_backs_off_instead_of_crashing() {
        let (mut dash, _tx) = dashboard(config(&["A"]), ScriptedSource::new(vec![]), FailingPort);

        let state = dash.step(LoopState::Fetching);
        let state = dash.step(state);
        let state = dash.step(state);
        assert!(matches!(state, LoopState::BackoffSleeping(_)));

        // The error frame fails to display too; the loop still waits and
        // comes back around.
        let state = dash.step(state);
        assert!(matches!(state, LoopState::Fetching));
    }

    #[test]
    fn interrupt_before_fetch_terminates() {
        let (mut dash, tx) = dashboard(config(&["A"]), ScriptedSource::new(vec![]), CapturePort::default());
        tx.send(()).unwrap();
        assert!(matches!(dash.step(LoopState::Fetching), LoopState::Terminated));
    }

    #[test]
    fn interrupt_during_sleep_terminates_promptly() {
        let mut cfg = config(&["A"]);
        cfg.refresh = Duration::from_secs(60);
        let (mut dash, tx) = dashboard(cfg, ScriptedSource::new(vec![]), CapturePort::default());

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send(()).unwrap();
        });

        let started = Instant::now();
        assert!(matches!(dash.step(LoopState::Sleeping), LoopState::Terminated));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn interrupt_during_backoff_terminates_promptly() {
        let mut cfg = config(&["A"]);
        cfg.backoff = Duration::from_secs(60);
        let port = CapturePort::default();
        let (mut dash, tx) = dashboard(cfg, ScriptedSource::new(vec![]), port);

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            tx.send(()).unwrap();
        });

        let started = Instant::now();
        let state = dash.step(LoopState::BackoffSleeping("feed down".to_string()));
        assert!(matches!(state, LoopState::Terminated));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn run_completes_cycles_until_interrupted() {
        let port = CapturePort::default();
        let view = port.clone();
        let (mut dash, tx) = dashboard(config(&["A", "B"]), ScriptedSource::new(vec![]), port);

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(60));
            tx.send(()).unwrap();
        });

        let started = Instant::now();
        dash.run();
        assert!(started.elapsed() < Duration::from_secs(10));

        let frames = view.frames.lock().unwrap();
        assert!(!frames.is_empty());
        assert_eq!(frames[0].status.text, "LIVE");
        assert_eq!(frames[0].watchlist.rows.len(), 2);
    }
}
