use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Severity tier of a reading, ordered `Normal < Warning < Danger`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Normal,
    Warning,
    Danger,
}

impl AlertLevel {
    /// Palette tokens a front-end can use to render this tier
    pub fn color_hint(&self) -> ColorHint {
        match self {
            AlertLevel::Danger => ColorHint::new("bg-red-50", "text-red-700", "border-red-300"),
            AlertLevel::Warning => {
                ColorHint::new("bg-yellow-50", "text-yellow-700", "border-yellow-300")
            }
            AlertLevel::Normal => ColorHint::new("bg-white", "text-gray-900", "border-gray-200"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "normal",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation hint attached to an alert tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ColorHint {
    pub background: String,
    pub text: String,
    pub border: String,
}

impl ColorHint {
    fn new(background: &str, text: &str, border: &str) -> Self {
        Self {
            background: background.to_string(),
            text: text.to_string(),
            border: border.to_string(),
        }
    }
}

/// Outcome of evaluating a single reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthAlert {
    /// Whether anything about the reading deserves attention
    pub has_alert: bool,

    /// Worst tier found in the reading
    pub level: AlertLevel,

    /// Advisory messages, most relevant first
    pub messages: Vec<String>,
}

impl HealthAlert {
    /// Alert for a reading with nothing to report
    pub fn normal() -> Self {
        Self {
            has_alert: false,
            level: AlertLevel::Normal,
            messages: Vec::new(),
        }
    }
}

/// Language of advisory messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh-hans" => Ok(Locale::ZhCn),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}
