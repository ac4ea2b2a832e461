//! Side effects declared by the reducer and run by the dashboard.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Current,
    Forecast,
    Hourly,
}

impl FetchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchKind::Current => "current",
            FetchKind::Forecast => "forecast",
            FetchKind::Hourly => "hourly",
        }
    }

    pub const fn all() -> &'static [FetchKind] {
        &[FetchKind::Current, FetchKind::Forecast, FetchKind::Hourly]
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one kind of weather data for a location key, under a selection generation.
    Fetch { kind: FetchKind, key: String, generation: u64 },
}

impl Effect {
    pub fn fetch(kind: FetchKind, key: impl Into<String>, generation: u64) -> Self {
        Effect::Fetch { kind, key: key.into(), generation }
    }
}
