//! Economic calendar and news scoring
//!
//! Impact comes from a keyword table over the event title, raised one tier by
//! a large surprise. Direction compares the actual release with the forecast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relative surprise (`|actual - forecast| / |forecast|`) that raises impact one tier
pub const SURPRISE_THRESHOLD: f64 = 0.5;

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "interest rate",
    "rate decision",
    "non-farm",
    "nonfarm",
    "payrolls",
    "cpi",
    "consumer price",
    "gdp",
    "fomc",
    "central bank",
];

const MEDIUM_IMPACT_KEYWORDS: &[&str] = &[
    "pmi",
    "retail sales",
    "unemployment",
    "jobless",
    "trade balance",
    "ppi",
    "producer price",
    "consumer confidence",
    "industrial production",
];

const POSITIVE_TERMS: &[&str] = &[
    "beat", "beats", "surge", "surges", "rally", "rallies", "gain", "gains", "growth", "strong",
    "stronger", "rise", "rises", "upbeat", "optimism", "record high", "hawkish", "approval",
];

const NEGATIVE_TERMS: &[&str] = &[
    "miss", "misses", "plunge", "plunges", "drop", "drops", "fall", "falls", "weak", "weaker",
    "recession", "crash", "selloff", "sell-off", "fears", "dovish", "ban", "hack", "default",
];

/// Expected market impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Low,
    Medium,
    High,
}

impl EventImpact {
    fn raised(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }
}

/// Directional bias of an event or news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSentiment {
    Positive,
    Negative,
    Neutral,
    /// Not released yet; no directional call
    Pending,
}

/// Scheduled economic release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    pub title: String,
    pub currency: String,
    pub scheduled_at: DateTime<Utc>,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
}

/// News headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: Option<String>,
    pub currency: Option<String>,
}

/// Scored event or news item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventScore {
    pub impact: EventImpact,
    pub sentiment: EventSentiment,
}

/// Classifies calendar events and news
pub struct EconomicEventScorer;

impl EconomicEventScorer {
    /// Impact and direction of a calendar event
    pub fn score_event(event: &EconomicEvent) -> EventScore {
        let mut impact = Self::keyword_impact(&event.title);
        if let (Some(actual), Some(forecast)) = (event.actual, event.forecast) {
            if forecast != 0.0 && ((actual - forecast) / forecast).abs() >= SURPRISE_THRESHOLD {
                impact = impact.raised();
            }
        }

        EventScore {
            impact,
            sentiment: Self::direction(event.actual, event.forecast),
        }
    }

    /// Impact and tone of a news item
    pub fn score_news(item: &NewsItem) -> EventScore {
        let text = match &item.summary {
            Some(summary) => format!("{} {}", item.headline, summary),
            None => item.headline.clone(),
        };
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '-')
            .filter(|w| !w.is_empty())
            .collect();

        let hits = |terms: &[&str]| {
            terms
                .iter()
                .filter(|term| {
                    if term.contains(' ') {
                        lowered.contains(*term)
                    } else {
                        words.contains(term)
                    }
                })
                .count() as i64
        };
        let score = hits(POSITIVE_TERMS) - hits(NEGATIVE_TERMS);

        let sentiment = match score {
            s if s > 0 => EventSentiment::Positive,
            s if s < 0 => EventSentiment::Negative,
            _ => EventSentiment::Neutral,
        };

        EventScore {
            impact: Self::keyword_impact(&text),
            sentiment,
        }
    }

    /// Actual above forecast is favourable, below unfavourable
    pub fn direction(actual: Option<f64>, forecast: Option<f64>) -> EventSentiment {
        match (actual, forecast) {
            (Some(actual), Some(forecast)) if actual > forecast => EventSentiment::Positive,
            (Some(actual), Some(forecast)) if actual < forecast => EventSentiment::Negative,
            (Some(_), Some(_)) => EventSentiment::Neutral,
            _ => EventSentiment::Pending,
        }
    }

    fn keyword_impact(text: &str) -> EventImpact {
        let lowered = text.to_lowercase();
        let matches = |keywords: &[&str]| {
            keywords.iter().any(|keyword| {
                // short acronyms must stand alone ("cpi" but not "occupied")
                if keyword.len() <= 4 {
                    lowered
                        .split(|c: char| !c.is_alphanumeric() && c != '-')
                        .any(|word| word == *keyword)
                } else {
                    lowered.contains(keyword)
                }
            })
        };

        if matches(HIGH_IMPACT_KEYWORDS) {
            EventImpact::High
        } else if matches(MEDIUM_IMPACT_KEYWORDS) {
            EventImpact::Medium
        } else {
            EventImpact::Low
        }
    }
}
