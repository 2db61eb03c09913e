use futures::future::{AbortHandle, AbortRegistration};
use thiserror::Error;

use crate::domain::{
    errors::{DashboardResult, Notice},
    logging::{LogComponent, get_logger},
    market_data::{PriceBatch, SeriesStore, Symbol, Timestamp},
};
use crate::{log_debug, log_error, log_info, log_warn};

/// Monotonic id of one poll loop; a response is only applied while its loop is current.
pub type Generation = u64;

/// Handle to the running loop. Cancelling aborts the tick stream registered with it.
#[derive(Debug)]
pub struct PollHandle {
    generation: Generation,
    abort: AbortHandle,
}

impl PollHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    fn cancel(self) {
        self.abort.abort();
    }
}

#[derive(Debug, Default)]
pub enum PollState {
    #[default]
    Idle,
    Running {
        tracked: Vec<Symbol>,
        handle: PollHandle,
    },
    Cancelled,
}

/// What the timer driver needs to run a freshly started loop.
///
/// The registration ties the driver's tick stream to the poller: once the
/// poller stops, the stream ends.
#[derive(Debug)]
pub struct PollLease {
    pub generation: Generation,
    pub symbols: Vec<Symbol>,
    pub registration: AbortRegistration,
}

/// Issued when a tick fires; carried through the fetch and presented back on completion.
#[derive(Debug, Clone, PartialEq)]
pub struct TickTicket {
    pub generation: Generation,
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Batch applied to the store; the chart needs a redraw.
    Recorded { observations: usize },
    /// Fetch failed; alert for this tick only, the loop keeps going.
    Failed(Notice),
    /// Response belongs to a stopped or superseded loop and was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartRejected {
    #[error("no symbols to track")]
    NoSymbols,
}

/// Owner of the single recurring fetch-and-record loop.
#[derive(Debug, Default)]
pub struct LivePoller {
    state: PollState,
    last_generation: Generation,
}

impl LivePoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `symbols`, stopping any loop that is already running.
    ///
    /// An empty set is rejected and leaves the poller untouched: for the chart
    /// "no symbols" means "track nothing".
    pub fn start(&mut self, symbols: Vec<Symbol>) -> Result<PollLease, StartRejected> {
        if symbols.is_empty() {
            get_logger().warn(
                LogComponent::Application("LivePoller"),
                "Start rejected: empty symbol set",
            );
            return Err(StartRejected::NoSymbols);
        }

        self.stop();

        self.last_generation += 1;
        let generation = self.last_generation;
        let (abort, registration) = AbortHandle::new_pair();

        log_info!(LogComponent::Application("LivePoller"), "Loop #{} tracking {}", generation, join_symbols(&symbols));

        self.state = PollState::Running {
            tracked: symbols.clone(),
            handle: PollHandle { generation, abort },
        };

        Ok(PollLease { generation, symbols, registration })
    }

    /// Cancel the running loop, if any. Returns whether a loop was stopped.
    pub fn stop(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            PollState::Running { handle, .. } => {
                log_info!(LogComponent::Application("LivePoller"), "Loop #{} stopped", handle.generation());
                handle.cancel();
                self.state = PollState::Cancelled;
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PollState::Running { .. })
    }

    pub fn active_generation(&self) -> Option<Generation> {
        match &self.state {
            PollState::Running { handle, .. } => Some(handle.generation()),
            _ => None,
        }
    }

    pub fn tracked_symbols(&self) -> &[Symbol] {
        match &self.state {
            PollState::Running { tracked, .. } => tracked,
            _ => &[],
        }
    }

    /// Ticket for the tick that just fired, or `None` when nothing is running.
    pub fn begin_tick(&self) -> Option<TickTicket> {
        match &self.state {
            PollState::Running { tracked, handle } => Some(TickTicket {
                generation: handle.generation(),
                symbols: tracked.clone(),
            }),
            _ => None,
        }
    }

    pub fn accepts(&self, ticket: &TickTicket) -> bool {
        self.active_generation() == Some(ticket.generation)
    }

    /// Apply one tick's response.
    ///
    /// Responses may arrive late, overlap or come out of order; only the
    /// ticket's generation decides whether the store may be touched. Symbols
    /// outside the ticket's tracked set are dropped before recording.
    pub fn complete_tick(
        &self,
        ticket: &TickTicket,
        result: DashboardResult<PriceBatch>,
        at: Timestamp,
        store: &mut SeriesStore,
    ) -> TickOutcome {
        if !self.accepts(ticket) {
            log_debug!(LogComponent::Application("LivePoller"), "Discarding response for loop #{} (active: {:?})", ticket.generation, self.active_generation());
            return TickOutcome::Stale;
        }

        match result {
            Ok(mut batch) => {
                let dropped = batch.retain_symbols(|symbol| ticket.symbols.contains(symbol));
                if !dropped.is_empty() {
                    log_warn!(LogComponent::Application("LivePoller"), "Ignoring untracked symbols in response: {}", join_symbols(&dropped));
                }
                let observations = store.record_batch(at, &batch);
                TickOutcome::Recorded { observations }
            }
            Err(err) => {
                log_error!(LogComponent::Application("LivePoller"), "Tick for loop #{} failed: {}", ticket.generation, err);
                TickOutcome::Failed(Notice::tick_failed(&err))
            }
        }
    }
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::value).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DashboardError, ErrorKind};
    use crate::domain::market_data::Price;

    fn symbols(list: &[&str]) -> Vec<Symbol> {
        list.iter().map(|s| Symbol::from(*s)).collect()
    }

    fn batch(entries: &[(&str, f64)]) -> PriceBatch {
        entries.iter().map(|(s, p)| (*s, *p)).collect()
    }

    #[test]
    fn empty_start_is_rejected_and_stays_idle() {
        let mut poller = LivePoller::new();
        assert_eq!(poller.start(Vec::new()).unwrap_err(), StartRejected::NoSymbols);
        assert!(matches!(poller.state(), PollState::Idle));
        assert!(poller.begin_tick().is_none());
    }

    #[test]
    fn restart_aborts_previous_loop() {
        let mut poller = LivePoller::new();
        let first = poller.start(symbols(&["BTC"])).unwrap();
        let second = poller.start(symbols(&["ETH"])).unwrap();

        assert!(second.generation > first.generation);
        assert_eq!(poller.active_generation(), Some(second.generation));
        assert_eq!(poller.tracked_symbols(), &symbols(&["ETH"])[..]);

        let (first_stream, second_stream) = (
            futures::future::Abortable::new(futures::stream::pending::<()>(), first.registration),
            futures::future::Abortable::new(futures::stream::pending::<()>(), second.registration),
        );
        assert!(first_stream.is_aborted());
        assert!(!second_stream.is_aborted());
    }

    #[test]
    fn stop_moves_to_cancelled() {
        let mut poller = LivePoller::new();
        poller.start(symbols(&["BTC"])).unwrap();
        assert!(poller.stop());
        assert!(matches!(poller.state(), PollState::Cancelled));
        assert!(!poller.stop());
    }

    #[test]
    fn successful_tick_records_batch() {
        let mut poller = LivePoller::new();
        let mut store = SeriesStore::new();
        poller.start(symbols(&["BTC", "ETH"])).unwrap();
        let ticket = poller.begin_tick().unwrap();

        let outcome = poller.complete_tick(&ticket, Ok(batch(&[("BTC", 1.0), ("ETH", 2.0)])), Timestamp::from_millis(7), &mut store);

        assert_eq!(outcome, TickOutcome::Recorded { observations: 2 });
        assert_eq!(store.series(&Symbol::from("ETH")).unwrap()[0].price, Price::new(2.0));
    }

    #[test]
    fn untracked_symbols_are_not_recorded() {
        let mut poller = LivePoller::new();
        let mut store = SeriesStore::new();
        poller.start(symbols(&["BTC"])).unwrap();
        let ticket = poller.begin_tick().unwrap();

        poller.complete_tick(&ticket, Ok(batch(&[("BTC", 1.0), ("DOGE", 0.1)])), Timestamp::from_millis(1), &mut store);

        assert!(store.series(&Symbol::from("DOGE")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failure_alerts_but_keeps_running() {
        let mut poller = LivePoller::new();
        let mut store = SeriesStore::new();
        poller.start(symbols(&["BTC"])).unwrap();
        let ticket = poller.begin_tick().unwrap();

        let outcome = poller.complete_tick(&ticket, Err(DashboardError::TickFetch("HTTP 503".into())), Timestamp::from_millis(1), &mut store);

        match outcome {
            TickOutcome::Failed(notice) => assert_eq!(notice.kind, ErrorKind::TickFetchFailure),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(poller.is_running());
        assert!(poller.begin_tick().is_some());
        assert!(store.is_empty());
    }

    #[test]
    fn response_after_stop_is_stale() {
        let mut poller = LivePoller::new();
        let mut store = SeriesStore::new();
        poller.start(symbols(&["BTC"])).unwrap();
        let ticket = poller.begin_tick().unwrap();
        poller.stop();

        let outcome = poller.complete_tick(&ticket, Ok(batch(&[("BTC", 1.0)])), Timestamp::from_millis(1), &mut store);

        assert_eq!(outcome, TickOutcome::Stale);
        assert!(store.is_empty());
    }

    #[test]
    fn failure_after_stop_is_stale_not_alerted() {
        let mut poller = LivePoller::new();
        let mut store = SeriesStore::new();
        poller.start(symbols(&["BTC"])).unwrap();
        let ticket = poller.begin_tick().unwrap();
        poller.start(symbols(&["ETH"])).unwrap();

        let outcome = poller.complete_tick(&ticket, Err(DashboardError::TickFetch("late".into())), Timestamp::from_millis(1), &mut store);
        assert_eq!(outcome, TickOutcome::Stale);
    }
}
