//! Drives a started poll loop with a browser interval timer.

use std::rc::Rc;

use futures::StreamExt;
use futures::future::Abortable;
use gloo_timers::future::IntervalStream;
use wasm_bindgen_futures::spawn_local;

use crate::application::{PollLease, PollTickUseCase, UiCommand};
use crate::domain::{
    logging::LogComponent,
    market_data::PriceFeed,
};
use crate::{log_debug, log_info};

/// Receives the render instructions produced by each tick.
pub type CommandSink = Rc<dyn Fn(Vec<UiCommand>)>;

/// Fire a tick every `period_ms` until the lease's loop is stopped.
///
/// Each tick runs as its own task, so a slow response never delays the next
/// tick. The timer stream ends as soon as the poller aborts the lease; ticks
/// already in flight are dropped by the generation check instead.
pub fn spawn_poll_loop(
    tick: PollTickUseCase<dyn PriceFeed>,
    lease: PollLease,
    period_ms: u32,
    sink: CommandSink,
) {
    let generation = lease.generation;
    log_info!(LogComponent::Infrastructure("Scheduler"), "Loop #{} every {} ms for {} symbols", generation, period_ms, lease.symbols.len());

    let ticks = Abortable::new(IntervalStream::new(period_ms), lease.registration);

    spawn_local(async move {
        futures::pin_mut!(ticks);
        while ticks.next().await.is_some() {
            let tick = tick.clone();
            let sink = Rc::clone(&sink);
            spawn_local(async move {
                let commands = tick.execute().await;
                if !commands.is_empty() {
                    sink(commands);
                }
            });
        }

        log_debug!(LogComponent::Infrastructure("Scheduler"), "Loop #{} timer released", generation);
    });
}
