use coin_watch_wasm::application::{SEARCH_PLACEHOLDER, SearchArea, UiCommand, ViewController, ViewMode};
use coin_watch_wasm::domain::errors::{DashboardError, ErrorKind};
use coin_watch_wasm::domain::market_data::{Coin, FilterSlot, Price, PriceBatch, Symbol, Timestamp};

fn catalog() -> Vec<Coin> {
    vec![
        Coin::new("bitcoin", "btc", "Bitcoin"),
        Coin::new("ethereum", "eth", "Ethereum"),
        Coin::new("tether", "usdt", "Tether"),
    ]
}

fn loaded() -> ViewController {
    let mut vc = ViewController::new();
    vc.catalog_loaded(Ok(catalog()));
    vc
}

fn quotes(entries: &[(&str, f64)]) -> PriceBatch {
    entries.iter().map(|(s, p)| (*s, *p)).collect()
}

#[test]
fn btc_tick_then_about_drops_late_response() {
    let mut vc = loaded();

    let transition = vc.submit_chart_filter("btc");
    assert_eq!(vc.mode(), ViewMode::LiveChart);
    let lease = transition.poll.expect("loop started");
    assert_eq!(lease.symbols, vec![Symbol::from("BTC")]);

    let t0 = Timestamp::from_millis(1_700_000_000_000);
    let first = vc.begin_tick().unwrap();
    let commands = vc.complete_tick(&first, Ok(quotes(&[("BTC", 50000.0)])), t0);

    let [UiCommand::RenderChart(payload)] = &commands[..] else {
        panic!("expected a single render, got {commands:?}");
    };
    assert_eq!(payload.series.len(), 1);
    assert_eq!(payload.series[0].name, "Bitcoin");
    let series = vc.session().series.series(&Symbol::from("BTC")).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].timestamp, t0);
    assert_eq!(series[0].price, Price::new(50000.0));

    // A second tick goes out, then the user leaves before it lands
    let in_flight = vc.begin_tick().unwrap();
    vc.select_about_view();
    let late = vc.complete_tick(&in_flight, Ok(quotes(&[("BTC", 50100.0)])), Timestamp::from_millis(t0.value() + 2_000));

    assert!(late.is_empty());
    assert!(vc.session().series.is_empty());
    assert!(vc.begin_tick().is_none());
}

#[test]
fn unknown_symbol_shows_placeholder_and_never_polls() {
    let mut vc = loaded();

    let transition = vc.submit_chart_filter("zzz");

    assert!(transition.poll.is_none());
    assert_eq!(vc.session().filters.chart(), &FilterSlot::NoMatch);
    assert!(transition.commands.contains(&UiCommand::ShowSearch(SearchArea::Chart)));
    assert!(transition.commands.contains(&UiCommand::RenderPlaceholder(SEARCH_PLACEHOLDER.to_string())));
    assert!(!vc.session().poller.is_running());
    assert!(vc.session().series.is_empty());
}

#[test]
fn reentering_chart_restarts_with_new_set_and_fresh_store() {
    let mut vc = loaded();

    let first = vc.submit_chart_filter("btc").poll.unwrap();
    let ticket = vc.begin_tick().unwrap();
    vc.complete_tick(&ticket, Ok(quotes(&[("BTC", 1.0)])), Timestamp::from_millis(1));

    let second = vc.submit_chart_filter("eth").poll.unwrap();
    assert!(second.generation > first.generation);
    assert_eq!(second.symbols, vec![Symbol::from("ETH")]);
    assert!(vc.session().series.is_empty());

    // The old loop's in-flight answer is ignored even though it carries data
    assert!(vc.complete_tick(&ticket, Ok(quotes(&[("BTC", 2.0)])), Timestamp::from_millis(2)).is_empty());

    let ticket = vc.begin_tick().unwrap();
    assert_eq!(ticket.symbols, vec![Symbol::from("ETH")]);
    vc.complete_tick(&ticket, Ok(quotes(&[("ETH", 3000.0)])), Timestamp::from_millis(3));
    assert_eq!(vc.session().series.symbols().cloned().collect::<Vec<_>>(), vec![Symbol::from("ETH")]);
}

#[test]
fn tick_failure_alerts_without_stopping_the_loop() {
    let mut vc = loaded();
    vc.submit_chart_filter("btc");

    let ticket = vc.begin_tick().unwrap();
    let commands = vc.complete_tick(&ticket, Err(DashboardError::TickFetch("HTTP 503".into())), Timestamp::from_millis(1));

    assert!(matches!(&commands[..], [UiCommand::Alert(n)] if n.kind == ErrorKind::TickFetchFailure));
    assert!(vc.session().poller.is_running());
    assert!(vc.session().series.is_empty());
}

#[test]
fn list_filter_narrows_catalog_and_no_match_shows_everything() {
    let mut vc = loaded();

    let narrowed = vc.submit_list_filter("ETH");
    let rendered = narrowed.commands.iter().find_map(|c| match c {
        UiCommand::RenderCatalog(coins) => Some(coins.clone()),
        _ => None,
    });
    assert_eq!(rendered.map(|coins| coins.len()), Some(1));

    let fallback = vc.submit_list_filter("nothing-like-this");
    let rendered = fallback.commands.iter().find_map(|c| match c {
        UiCommand::RenderCatalog(coins) => Some(coins.len()),
        _ => None,
    });
    assert_eq!(rendered, Some(3));
}

#[test]
fn catalog_failure_leaves_chart_search_matching_nothing() {
    let mut vc = ViewController::new();
    let commands = vc.catalog_loaded(Err(DashboardError::CatalogFetch("offline".into())));
    assert!(matches!(&commands[0], UiCommand::Alert(n) if n.kind == ErrorKind::CatalogFetchFailure));

    let transition = vc.submit_chart_filter("btc");
    assert!(transition.poll.is_none());
    assert_eq!(vc.session().filters.chart(), &FilterSlot::NoMatch);
}
