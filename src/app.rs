use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

use crate::{
    application::{LoadCatalogUseCase, PollTickUseCase, SearchArea, SharedController, Transition, UiCommand, ViewController, ViewMode},
    config::DashboardConfig,
    domain::{
        logging::LogComponent,
        market_data::{CatalogSource, Coin, PriceFeed, QuoteCurrency},
    },
    global_state::{about_text, catalog_cards, chart_payload, chart_query, last_notice, list_query, placeholder, search_area, view_mode},
    infrastructure::{
        CommandSink,
        http::{CoinGeckoClient, CryptoCompareClient},
        rendering::CanvasChartRenderer,
        spawn_poll_loop,
    },
};
use crate::log_warn;

pub const CHART_CANVAS_ID: &str = "live-chart";

/// Connects the view controller to the upstream clients and the UI signals.
#[derive(Clone)]
pub struct Dashboard {
    controller: SharedController,
    catalog_source: Rc<dyn CatalogSource>,
    price_feed: Rc<dyn PriceFeed>,
    poll_period_ms: u32,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        let price_feed =
            CryptoCompareClient::new(&config.price_url, config.quote_currency).with_api_key(config.api_key.clone());
        Self {
            controller: Rc::new(RefCell::new(ViewController::new())),
            catalog_source: Rc::new(CoinGeckoClient::new(&config.catalog_url)),
            price_feed: Rc::new(price_feed),
            poll_period_ms: config.poll_period_ms,
        }
    }

    /// Startup fetch; runs once, failures are alerted and never retried.
    pub fn load_catalog(&self) {
        let use_case = LoadCatalogUseCase::new(Rc::clone(&self.catalog_source), Rc::clone(&self.controller));
        spawn_local(async move {
            apply_commands(use_case.execute().await);
        });
    }

    pub fn select(&self, mode: ViewMode) {
        let transition = {
            let mut controller = self.controller.borrow_mut();
            match mode {
                ViewMode::Catalog => controller.select_catalog_view(),
                ViewMode::LiveChart => controller.select_chart_view(),
                ViewMode::About => controller.select_about_view(),
            }
        };
        self.dispatch(transition);
    }

    pub fn submit_list_filter(&self, text: &str) {
        let transition = self.controller.borrow_mut().submit_list_filter(text);
        self.dispatch(transition);
    }

    pub fn submit_chart_filter(&self, text: &str) {
        let transition = self.controller.borrow_mut().submit_chart_filter(text);
        self.dispatch(transition);
    }

    fn dispatch(&self, transition: Transition) {
        let Transition { commands, poll } = transition;
        view_mode().set(self.controller.borrow().mode());
        apply_commands(commands);

        if let Some(lease) = poll {
            let tick = PollTickUseCase::new(Rc::clone(&self.price_feed), Rc::clone(&self.controller));
            let sink: CommandSink = Rc::new(apply_commands);
            spawn_poll_loop(tick, lease, self.poll_period_ms, sink);
        }
    }
}

/// Write controller output into the global signals, in order.
pub fn apply_commands(commands: Vec<UiCommand>) {
    for command in commands {
        match command {
            UiCommand::ShowSearch(area) => search_area().set(area),
            UiCommand::ClearSearchInputs => {
                list_query().set(String::new());
                chart_query().set(String::new());
            }
            UiCommand::ClearPanels => {
                catalog_cards().set(Vec::new());
                chart_payload().set(None);
                placeholder().set(None);
                about_text().set(None);
                last_notice().set(None);
            }
            UiCommand::RenderCatalog(coins) => catalog_cards().set(coins),
            UiCommand::RenderChart(payload) => chart_payload().set(Some(payload)),
            UiCommand::RenderPlaceholder(text) => placeholder().set(Some(text)),
            UiCommand::RenderAbout(text) => about_text().set(Some(text)),
            UiCommand::Alert(notice) => {
                gloo::dialogs::alert(&notice.message);
                last_notice().set(Some(notice));
            }
        }
    }
}

fn nav_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Catalog => "Currencies",
        ViewMode::LiveChart => "Live Reports",
        ViewMode::About => "About",
    }
}

#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let dashboard = Dashboard::new(&config);
    dashboard.load_catalog();

    view! {
        <style>
            {r#"
            .coin-watch-app {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                max-width: 960px;
                margin: 0 auto;
                padding: 20px;
                color: #222;
            }

            .nav {
                display: flex;
                gap: 8px;
                margin-bottom: 16px;
            }

            .nav-btn {
                background: #eef2f7;
                border: 1px solid #c8d2de;
                border-radius: 6px;
                padding: 8px 16px;
                cursor: pointer;
            }

            .nav-btn.active {
                background: #4f81bc;
                color: white;
            }

            .search-box {
                display: flex;
                gap: 6px;
                margin-bottom: 12px;
            }

            .coin-grid {
                display: grid;
                grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
                gap: 12px;
            }

            .coin-card {
                border: 1px solid #dde3ea;
                border-radius: 8px;
                padding: 12px;
            }

            .coin-symbol {
                font-weight: 700;
                font-size: 18px;
            }

            .coin-details img {
                width: 25px;
                height: 25px;
            }

            .status {
                color: #4f81bc;
                font-size: 13px;
                min-height: 18px;
                margin-bottom: 8px;
            }

            .notice {
                color: #c0392b;
                margin-left: 8px;
            }
            "#}
        </style>
        <div class="coin-watch-app">
            <NavBar dashboard=dashboard.clone() />
            <SearchPanel dashboard=dashboard />
            <StatusLine />
            <main class="panels">
                <CatalogGrid />
                <LiveChart width=config.canvas_width height=config.canvas_height />
                <TextPanels />
            </main>
        </div>
    }
}

#[component]
fn NavBar(dashboard: Dashboard) -> impl IntoView {
    let current = view_mode();

    view! {
        <nav class="nav">
            {ViewMode::iter()
                .map(|mode| {
                    let dashboard = dashboard.clone();
                    view! {
                        <button
                            class="nav-btn"
                            class:active=move || current.get() == mode
                            on:click=move |_| dashboard.select(mode)
                        >
                            {nav_label(mode)}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[component]
fn SearchPanel(dashboard: Dashboard) -> impl IntoView {
    let area = search_area();

    move || {
        let dashboard = dashboard.clone();
        match area.get() {
            SearchArea::List => view! {
                <SearchBox
                    query=list_query()
                    placeholder="Filter coins by symbol"
                    on_submit=Callback::new(move |text: String| dashboard.submit_list_filter(&text))
                />
            }
            .into_view(),
            SearchArea::Chart => view! {
                <SearchBox
                    query=chart_query()
                    placeholder="Symbol to chart, e.g. btc"
                    on_submit=Callback::new(move |text: String| dashboard.submit_chart_filter(&text))
                />
            }
            .into_view(),
            SearchArea::Hidden => ().into_view(),
        }
    }
}

#[component]
fn SearchBox(query: RwSignal<String>, placeholder: &'static str, on_submit: Callback<String>) -> impl IntoView {
    view! {
        <form
            class="search-box"
            on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                on_submit.call(query.get_untracked());
            }
        >
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <button type="submit">"Search"</button>
        </form>
    }
}

#[component]
fn StatusLine() -> impl IntoView {
    let payload = chart_payload();
    let notice = last_notice();

    view! {
        <div class="status">
            {move || {
                payload.with(|p| {
                    p.as_ref().map(|p| format!("Tracking {} symbols, {} observations", p.series.len(), p.point_count()))
                })
            }}
            {move || notice.get().map(|n| view! { <span class="notice">{n.message}</span> })}
        </div>
    }
}

#[component]
fn CatalogGrid() -> impl IntoView {
    let cards = catalog_cards();

    view! {
        <div class="coin-grid">
            <For
                each=move || cards.get()
                key=|coin| coin.id.clone()
                children=move |coin| view! { <CoinCard coin=coin /> }
            />
        </div>
    }
}

#[component]
fn CoinCard(coin: Coin) -> impl IntoView {
    let (expanded, set_expanded) = create_signal(false);
    let ticker = coin.ticker.clone();
    let name = coin.name.clone();

    view! {
        <div class="coin-card">
            <div class="coin-symbol">{ticker}</div>
            <div class="coin-name">{name}</div>
            <button class="more-info" on:click=move |_| set_expanded.update(|open| *open = !*open)>
                {move || if expanded.get() { "Less Info" } else { "More Info" }}
            </button>
            {move || {
                expanded.get().then(|| {
                    view! {
                        <div class="coin-details">
                            <img src=coin.thumb.clone() alt=coin.name.clone() />
                            <ul>
                                {QuoteCurrency::iter()
                                    .map(|currency| view! { <li>{coin.price_label(currency)}</li> })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                })
            }}
        </div>
    }
}

#[component]
fn LiveChart(width: u32, height: u32) -> impl IntoView {
    let payload = chart_payload();
    let canvas_ref = create_node_ref::<Canvas>();
    let renderer = CanvasChartRenderer::new(CHART_CANVAS_ID, width, height);

    create_effect(move |_| {
        let Some(payload) = payload.get() else {
            return;
        };
        if canvas_ref.get().is_none() {
            return;
        }
        if let Err(err) = renderer.render(&payload) {
            log_warn!(LogComponent::Presentation("LiveChart"), "Chart draw failed: {:?}", err);
        }
    });

    view! {
        <div
            class="chart-wrapper"
            style:display=move || if payload.with(Option::is_some) { "block" } else { "none" }
        >
            <canvas id=CHART_CANVAS_ID node_ref=canvas_ref width=width height=height></canvas>
        </div>
    }
}

#[component]
fn TextPanels() -> impl IntoView {
    let placeholder = placeholder();
    let about = about_text();

    view! {
        {move || placeholder.get().map(|text| view! { <p class="placeholder">{text}</p> })}
        {move || about.get().map(|text| view! { <p class="about">{text}</p> })}
    }
}
