use coin_watch_wasm::application::LivePoller;
use coin_watch_wasm::domain::market_data::{PriceBatch, SeriesStore, Symbol, Timestamp};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use std::collections::BTreeSet;

/// Non-empty set of distinct upper-case tickers
#[derive(Debug, Clone)]
struct Tickers(Vec<Symbol>);

impl Arbitrary for Tickers {
    fn arbitrary(g: &mut Gen) -> Self {
        const POOL: [&str; 8] = ["BTC", "ETH", "USDT", "BNB", "XRP", "ADA", "DOGE", "SOL"];
        let mut picked = BTreeSet::new();
        let count = 1 + usize::arbitrary(g) % POOL.len();
        for _ in 0..count {
            picked.insert(*g.choose(&POOL).unwrap_or(&"BTC"));
        }
        Tickers(picked.into_iter().map(Symbol::from).collect())
    }
}

fn batch_for(symbols: &[Symbol], price: f64) -> PriceBatch {
    symbols.iter().map(|s| (s.clone(), price)).collect()
}

#[quickcheck]
fn every_tick_appends_one_point_per_symbol(tickers: Tickers, ticks: u8, start: u32) -> TestResult {
    let ticks = ticks % 20;
    let mut store = SeriesStore::new();
    let mut poller = LivePoller::new();
    if poller.start(tickers.0.clone()).is_err() {
        return TestResult::failed();
    }

    for i in 0..ticks as u64 {
        let Some(ticket) = poller.begin_tick() else {
            return TestResult::failed();
        };
        let at = Timestamp::from_millis(start as u64 + i * 2_000);
        poller.complete_tick(&ticket, Ok(batch_for(&tickers.0, i as f64)), at, &mut store);
    }

    let ok = tickers.0.iter().all(|symbol| {
        store.series(symbol).map_or(ticks == 0, |series| {
            series.len() == ticks as usize && series.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
        })
    });
    TestResult::from_bool(ok)
}

#[quickcheck]
fn stopped_loop_never_touches_the_store(tickers: Tickers, recorded: u8) -> bool {
    let mut store = SeriesStore::new();
    let mut poller = LivePoller::new();
    if poller.start(tickers.0.clone()).is_err() {
        return false;
    }

    for i in 0..(recorded % 5) as u64 {
        if let Some(ticket) = poller.begin_tick() {
            poller.complete_tick(&ticket, Ok(batch_for(&tickers.0, 1.0)), Timestamp::from_millis(i), &mut store);
        }
    }

    let Some(in_flight) = poller.begin_tick() else {
        return false;
    };
    let before = store.snapshot();
    poller.stop();
    poller.complete_tick(&in_flight, Ok(batch_for(&tickers.0, 2.0)), Timestamp::from_millis(99), &mut store);

    store.snapshot() == before
}

#[quickcheck]
fn empty_symbol_set_is_never_started(restarts: u8) -> bool {
    let mut poller = LivePoller::new();
    (0..restarts % 4).all(|_| poller.start(Vec::new()).is_err()) && !poller.is_running()
}
