pub mod analytics;
pub mod blood_pressure;
pub mod health;
pub mod inr;

use chrono::{DateTime, Utc};

use crate::entities::common::ErrorResponse;
use crate::entities::queries::HistoryQueryParams;

// Re-export handlers for easier imports
pub use health::health_check;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Window and limit of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HistoryWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl TryFrom<&HistoryQueryParams> for HistoryWindow {
    type Error = ErrorResponse;

    fn try_from(params: &HistoryQueryParams) -> Result<Self, Self::Error> {
        let start = parse_instant(params.start_date.as_deref(), "start_date")?;
        let end = parse_instant(params.end_date.as_deref(), "end_date")?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ErrorResponse::bad_request("start_date must not be after end_date"));
            }
        }

        Ok(Self {
            start,
            end,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        })
    }
}

fn parse_instant(raw: Option<&str>, name: &str) -> Result<Option<DateTime<Utc>>, ErrorResponse> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|_| {
                ErrorResponse::bad_request(&format!(
                    "Invalid {} format. Use RFC 3339 (e.g. 2026-01-20T08:30:00Z)",
                    name
                ))
            })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_window_defaults_and_cap() {
        let window = HistoryWindow::try_from(&HistoryQueryParams::default()).unwrap();
        assert_eq!(window.limit, DEFAULT_LIMIT);
        assert!(window.start.is_none());

        let params = HistoryQueryParams {
            limit: Some(50_000),
            ..Default::default()
        };
        assert_eq!(HistoryWindow::try_from(&params).unwrap().limit, MAX_LIMIT);
    }

    #[test]
    fn test_history_window_rejects_bad_dates() {
        let params = HistoryQueryParams {
            start_date: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(HistoryWindow::try_from(&params).is_err());

        let params = HistoryQueryParams {
            start_date: Some("2026-01-21T00:00:00Z".to_string()),
            end_date: Some("2026-01-20T00:00:00Z".to_string()),
            limit: None,
        };
        assert!(HistoryWindow::try_from(&params).is_err());
    }
}
