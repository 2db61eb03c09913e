use derive_more::Display;
use strum::{AsRefStr, EnumIter};

use super::live_poller::{LivePoller, PollLease, TickOutcome, TickTicket};
use crate::domain::{
    chart::{ChartConfig, ChartPayload, ChartRenderer},
    errors::{DashboardResult, Notice},
    logging::LogComponent,
    market_data::{Coin, CoinCatalog, FilterSlot, FilterState, PriceBatch, SeriesStore, Timestamp},
};
use crate::{log_debug, log_error, log_info};

pub const SEARCH_PLACEHOLDER: &str =
    "To display the graph, you have to search in search box by the symbol of the currency.";

pub const ABOUT_TEXT: &str = "A live dashboard for anyone interested in cryptocurrency. \
It loads the latest coin data from public market sources and lets you look up any coin by its symbol. \
Search for one or more symbols under Live Reports to follow their USD price on a chart that refreshes every two seconds.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, AsRefStr)]
pub enum ViewMode {
    #[default]
    #[display(fmt = "Catalog")]
    Catalog,
    #[display(fmt = "Live Reports")]
    LiveChart,
    #[display(fmt = "About")]
    About,
}

/// Which search box the UI shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchArea {
    List,
    Chart,
    Hidden,
}

/// Render instructions handed back to the UI layer, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    ShowSearch(SearchArea),
    ClearSearchInputs,
    ClearPanels,
    RenderCatalog(Vec<Coin>),
    RenderChart(ChartPayload),
    RenderPlaceholder(String),
    RenderAbout(String),
    Alert(Notice),
}

/// Result of a user action: what to draw, and a loop to drive if one was started.
#[derive(Debug, Default)]
pub struct Transition {
    pub commands: Vec<UiCommand>,
    pub poll: Option<PollLease>,
}

impl Transition {
    fn push(&mut self, command: UiCommand) {
        self.commands.push(command);
    }
}

/// Every piece of mutable session state, owned in one place.
#[derive(Debug, Default)]
pub struct SessionState {
    pub catalog: CoinCatalog,
    pub filters: FilterState,
    pub series: SeriesStore,
    pub poller: LivePoller,
    pub chart_config: ChartConfig,
}

/// Top-level state machine over the three display modes.
///
/// Lives on the UI thread; every handler runs to completion, so state changes
/// inside one handler are never observed half-done.
#[derive(Debug, Default)]
pub struct ViewController {
    mode: ViewMode,
    session: SessionState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chart_config(mut self, config: ChartConfig) -> Self {
        self.session.chart_config = config;
        self
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Apply the startup catalog fetch. On failure the catalog stays empty and
    /// the user is alerted once; nothing retries.
    pub fn catalog_loaded(&mut self, result: DashboardResult<Vec<Coin>>) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        match result {
            Ok(coins) => self.session.catalog.replace(coins),
            Err(err) => {
                log_error!(LogComponent::Application("ViewController"), "Catalog unavailable: {}", err);
                self.session.catalog.clear();
                commands.push(UiCommand::Alert(Notice::catalog_unavailable(&err)));
            }
        }
        if self.mode == ViewMode::Catalog {
            commands.push(UiCommand::RenderCatalog(self.visible_catalog()));
        }
        commands
    }

    pub fn select_catalog_view(&mut self) -> Transition {
        self.enter_catalog()
    }

    pub fn select_chart_view(&mut self) -> Transition {
        self.enter_chart()
    }

    pub fn select_about_view(&mut self) -> Transition {
        self.enter_about()
    }

    /// Set the list filter and re-enter the catalog view.
    pub fn submit_list_filter(&mut self, text: &str) -> Transition {
        let slot = FilterSlot::from_matches(&self.session.catalog.filter_by_symbol(text));
        log_debug!(LogComponent::Application("ViewController"), "List filter '{}' -> {:?}", text, slot);
        self.session.filters.set_list(slot);
        self.enter_catalog()
    }

    /// Set the chart filter and re-enter the live chart view.
    pub fn submit_chart_filter(&mut self, text: &str) -> Transition {
        let slot = FilterSlot::from_matches(&self.session.catalog.filter_by_symbol(text));
        log_debug!(LogComponent::Application("ViewController"), "Chart filter '{}' -> {:?}", text, slot);
        self.session.filters.set_chart(slot);
        self.enter_chart()
    }

    pub fn begin_tick(&self) -> Option<TickTicket> {
        self.session.poller.begin_tick()
    }

    /// Feed one tick's response back in. Stale responses yield no commands.
    pub fn complete_tick(
        &mut self,
        ticket: &TickTicket,
        result: DashboardResult<PriceBatch>,
        at: Timestamp,
    ) -> Vec<UiCommand> {
        let SessionState { poller, series, catalog, chart_config, .. } = &mut self.session;
        match poller.complete_tick(ticket, result, at, series) {
            TickOutcome::Recorded { .. } => {
                let payload = ChartRenderer::render(&series.snapshot(), chart_config, catalog);
                vec![UiCommand::RenderChart(payload)]
            }
            TickOutcome::Failed(notice) => vec![UiCommand::Alert(notice)],
            TickOutcome::Stale => Vec::new(),
        }
    }

    /// Catalog after the list filter; a filter that matched nothing shows everything.
    pub fn visible_catalog(&self) -> Vec<Coin> {
        match self.session.filters.list() {
            FilterSlot::Matched(symbols) => self.session.catalog.coins_for(symbols),
            FilterSlot::Unset | FilterSlot::NoMatch => self.session.catalog.coins().to_vec(),
        }
    }

    fn enter_catalog(&mut self) -> Transition {
        self.switch_to(ViewMode::Catalog);
        self.session.filters.clear_chart();

        let mut transition = Transition::default();
        transition.push(UiCommand::ClearPanels);
        transition.push(UiCommand::ShowSearch(SearchArea::List));
        transition.push(UiCommand::ClearSearchInputs);
        transition.push(UiCommand::RenderCatalog(self.visible_catalog()));
        transition
    }

    fn enter_chart(&mut self) -> Transition {
        self.switch_to(ViewMode::LiveChart);
        self.session.series.reset();
        self.session.filters.clear_list();

        let mut transition = Transition::default();
        transition.push(UiCommand::ClearPanels);
        transition.push(UiCommand::ShowSearch(SearchArea::Chart));

        let symbols = self.session.filters.chart().symbols().map(<[_]>::to_vec).unwrap_or_default();
        match self.session.poller.start(symbols) {
            Ok(lease) => {
                let payload = ChartRenderer::render(
                    &self.session.series.snapshot(),
                    &self.session.chart_config,
                    &self.session.catalog,
                );
                transition.push(UiCommand::RenderChart(payload));
                transition.poll = Some(lease);
            }
            Err(_) => {
                transition.push(UiCommand::RenderPlaceholder(SEARCH_PLACEHOLDER.to_string()));
            }
        }
        transition
    }

    fn enter_about(&mut self) -> Transition {
        self.switch_to(ViewMode::About);

        let mut transition = Transition::default();
        transition.push(UiCommand::ClearPanels);
        transition.push(UiCommand::ShowSearch(SearchArea::Hidden));
        transition.push(UiCommand::RenderAbout(ABOUT_TEXT.to_string()));
        transition
    }

    /// Common exit action: whatever the target, the running loop goes first.
    /// Leaving the live chart also discards its series.
    fn switch_to(&mut self, mode: ViewMode) {
        self.session.poller.stop();
        if self.mode == ViewMode::LiveChart {
            self.session.series.reset();
        }
        log_info!(LogComponent::Application("ViewController"), "{} -> {}", self.mode, mode);
        self.mode = mode;
    }
}
