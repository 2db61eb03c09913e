use std::cell::RefCell;
use std::rc::Rc;

use super::view_controller::{UiCommand, ViewController};
use crate::domain::{
    logging::{LogComponent, get_logger, get_time_provider},
    market_data::{CatalogSource, PriceFeed, Timestamp},
};
use crate::log_trace;

/// Shared handle to the controller; only ever touched from the UI thread.
pub type SharedController = Rc<RefCell<ViewController>>;

fn wall_clock() -> Timestamp {
    Timestamp::from_millis(get_time_provider().current_timestamp())
}

/// Use Case: one-shot startup catalog load
pub struct LoadCatalogUseCase<S: CatalogSource + ?Sized> {
    source: Rc<S>,
    controller: SharedController,
}

impl<S: CatalogSource + ?Sized> LoadCatalogUseCase<S> {
    pub fn new(source: Rc<S>, controller: SharedController) -> Self {
        Self { source, controller }
    }

    pub async fn execute(&self) -> Vec<UiCommand> {
        get_logger().info(LogComponent::Application("LoadCatalog"), "Fetching coin catalog");
        let result = self.source.fetch_catalog().await;
        self.controller.borrow_mut().catalog_loaded(result)
    }
}

/// Use Case: a single live-price tick, from ticket to render instructions.
///
/// The controller is never borrowed across the fetch, so other ticks and user
/// actions run freely while a request is in flight.
pub struct PollTickUseCase<F: PriceFeed + ?Sized> {
    feed: Rc<F>,
    controller: SharedController,
    clock: fn() -> Timestamp,
}

impl<F: PriceFeed + ?Sized> Clone for PollTickUseCase<F> {
    fn clone(&self) -> Self {
        Self { feed: Rc::clone(&self.feed), controller: Rc::clone(&self.controller), clock: self.clock }
    }
}

impl<F: PriceFeed + ?Sized> PollTickUseCase<F> {
    pub fn new(feed: Rc<F>, controller: SharedController) -> Self {
        Self { feed, controller, clock: wall_clock }
    }

    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Empty when no loop is running or the response turned out stale.
    pub async fn execute(&self) -> Vec<UiCommand> {
        let Some(ticket) = self.controller.borrow().begin_tick() else {
            return Vec::new();
        };

        log_trace!(LogComponent::Application("PollTick"), "Tick for loop #{} ({} symbols)", ticket.generation, ticket.symbols.len());

        let result = self.feed.fetch_prices(&ticket.symbols).await;
        let at = (self.clock)();
        self.controller.borrow_mut().complete_tick(&ticket, result, at)
    }
}
