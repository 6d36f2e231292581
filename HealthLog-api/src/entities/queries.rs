use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use health_log_domain::entities::Locale;

use super::common::ErrorResponse;

/// Query parameters selecting the message language
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LocaleQuery {
    /// `en` or `zh-CN` (default: server setting)
    pub locale: Option<String>,
}

/// Query parameters for listing readings
#[derive(Debug, Default, Deserialize, Clone, IntoParams, ToSchema)]
pub struct HistoryQueryParams {
    /// RFC 3339 start of the window (inclusive)
    pub start_date: Option<String>,

    /// RFC 3339 end of the window (inclusive)
    pub end_date: Option<String>,

    /// Maximum number of results (default: 100, max: 1000)
    pub limit: Option<usize>,
}

/// Query parameters for the trends and report endpoints
#[derive(Debug, Default, Deserialize, Clone, IntoParams, ToSchema)]
pub struct RangeQueryParams {
    /// `7d`, `30d`, `90d` or `custom` (default: 30d)
    pub range: Option<String>,

    /// First day of a custom range, `YYYY-MM-DD`
    pub start_date: Option<String>,

    /// Last day of a custom range, `YYYY-MM-DD`
    pub end_date: Option<String>,

    /// Message language for the report, `en` or `zh-CN`
    pub locale: Option<String>,
}

/// Parse an optional locale parameter, falling back to `default`
pub fn parse_locale(raw: Option<&str>, default: Locale) -> Result<Locale, ErrorResponse> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|e: String| ErrorResponse::bad_request(&e)),
        None => Ok(default),
    }
}
