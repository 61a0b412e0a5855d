use anyhow::Context;
use dotenv::dotenv;

const DEFAULT_WATCHLIST: &str = "EUR/USD,GBP/USD,USD/JPY,AUD/USD,USD/CHF,BTC/USD";

pub struct AnalystConfig {
    /// Endpoint of the external AI analyst; AI signals are disabled when unset
    pub ai_api_url: Option<String>,
    pub ai_timeout_secs: u64,
    pub ai_max_retries: u32,
    pub use_ai: bool,
    pub market_refresh_secs: u64,
    pub signal_refresh_secs: u64,
    pub watchlist: Vec<String>,
}

impl AnalystConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(AnalystConfig {
            ai_api_url: std::env::var("AI_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            ai_timeout_secs: parse_var("AI_TIMEOUT_SECS", 15)?,
            ai_max_retries: parse_var("AI_MAX_RETRIES", 2)?,
            use_ai: std::env::var("USE_AI")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            market_refresh_secs: parse_var("MARKET_REFRESH_SECS", 30)?,
            signal_refresh_secs: parse_var("SIGNAL_REFRESH_SECS", 300)?,
            watchlist: parse_watchlist(
                &std::env::var("WATCHLIST").unwrap_or_else(|_| DEFAULT_WATCHLIST.to_string()),
            ),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", name, raw)),
        _ => Ok(default),
    }
}

fn parse_watchlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|symbol| symbol.trim().to_uppercase())
        .filter(|symbol| !symbol.is_empty())
        .collect()
}
