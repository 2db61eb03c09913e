use leptos::*;
use once_cell::sync::OnceCell;

use crate::application::{SearchArea, ViewMode};
use crate::domain::{chart::ChartPayload, errors::Notice, market_data::Coin};

/// UI-facing signals. Written only by the command applier in `app.rs`.
pub struct Globals {
    pub view_mode: RwSignal<ViewMode>,
    pub search_area: RwSignal<SearchArea>,
    pub list_query: RwSignal<String>,
    pub chart_query: RwSignal<String>,
    pub catalog_cards: RwSignal<Vec<Coin>>,
    pub chart_payload: RwSignal<Option<ChartPayload>>,
    pub placeholder: RwSignal<Option<String>>,
    pub about_text: RwSignal<Option<String>>,
    pub last_notice: RwSignal<Option<Notice>>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        view_mode: create_rw_signal(ViewMode::Catalog),
        search_area: create_rw_signal(SearchArea::List),
        list_query: create_rw_signal(String::new()),
        chart_query: create_rw_signal(String::new()),
        catalog_cards: create_rw_signal(Vec::new()),
        chart_payload: create_rw_signal(None),
        placeholder: create_rw_signal(None),
        about_text: create_rw_signal(None),
        last_notice: create_rw_signal(None),
    })
}

crate::global_signals! {
    pub view_mode => view_mode: ViewMode,
    pub search_area => search_area: SearchArea,
    pub list_query => list_query: String,
    pub chart_query => chart_query: String,
    pub catalog_cards => catalog_cards: Vec<Coin>,
    pub chart_payload => chart_payload: Option<ChartPayload>,
    pub placeholder => placeholder: Option<String>,
    pub about_text => about_text: Option<String>,
    pub last_notice => last_notice: Option<Notice>,
}
