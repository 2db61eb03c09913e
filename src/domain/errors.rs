use serde::Serialize;
use strum::{AsRefStr, Display as StrumDisplay};
use thiserror::Error;

/// Error kinds surfaced to the user. `EmptyFilterResult` is deliberately absent:
/// an empty filter is a view policy, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr, Serialize)]
pub enum ErrorKind {
    CatalogFetchFailure,
    TickFetchFailure,
    ParseFailure,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Startup catalog request failed; fatal for the session.
    #[error("catalog fetch failed: {0}")]
    CatalogFetch(String),

    /// One live-price tick failed; the loop keeps running.
    #[error("price tick failed: {0}")]
    TickFetch(String),

    /// Upstream payload did not pass boundary validation.
    #[error("unexpected payload: {0}")]
    Parse(String),
}

impl DashboardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DashboardError::CatalogFetch(_) => ErrorKind::CatalogFetchFailure,
            DashboardError::TickFetch(_) => ErrorKind::TickFetchFailure,
            DashboardError::Parse(_) => ErrorKind::ParseFailure,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DashboardError::CatalogFetch(msg)
            | DashboardError::TickFetch(msg)
            | DashboardError::Parse(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

/// User-facing alert: a kind plus a message, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl Notice {
    /// Startup failure of any cause, network or parse. Same wording the
    /// dashboard always used.
    pub fn catalog_unavailable(_err: &DashboardError) -> Self {
        Self {
            kind: ErrorKind::CatalogFetchFailure,
            message: "please try again later.".to_string(),
        }
    }

    /// A failed tick, whatever broke it.
    pub fn tick_failed(err: &DashboardError) -> Self {
        Self {
            kind: ErrorKind::TickFetchFailure,
            message: format!("Error: {}", err.message()),
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(DashboardError::CatalogFetch("x".into()).kind(), ErrorKind::CatalogFetchFailure);
        assert_eq!(DashboardError::TickFetch("x".into()).kind(), ErrorKind::TickFetchFailure);
        assert_eq!(DashboardError::Parse("x".into()).kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn json_errors_become_parse_failures() {
        let err: DashboardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn tick_notice_carries_upstream_message() {
        let notice = Notice::tick_failed(&DashboardError::TickFetch("HTTP 500".into()));
        assert_eq!(notice.kind, ErrorKind::TickFetchFailure);
        assert_eq!(notice.message, "Error: HTTP 500");
        assert_eq!(notice.kind.to_string(), "TickFetchFailure");
    }

    #[test]
    fn parse_errors_alert_as_the_operation_they_broke() {
        let garbled = DashboardError::Parse("expected value at line 1".into());
        assert_eq!(Notice::catalog_unavailable(&garbled).kind, ErrorKind::CatalogFetchFailure);
        assert_eq!(Notice::tick_failed(&garbled).kind, ErrorKind::TickFetchFailure);
        assert_eq!(Notice::tick_failed(&garbled).message, "Error: expected value at line 1");
    }
}
