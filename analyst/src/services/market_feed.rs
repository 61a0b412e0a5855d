//! Simulated quote feed
//!
//! Random-walk prices for the watchlist, used when no live market data
//! source is wired in. Each tick moves every instrument by at most its step
//! size in either direction.

use market_engine::prelude::{PriceSeriesStore, RandomSource};
use tracing::debug;

const FOREX_STEP: f64 = 0.0005;
const CRYPTO_STEP: f64 = 0.004;
const CRYPTO_ASSETS: [&str; 4] = ["BTC", "ETH", "SOL", "BNB"];

#[derive(Debug, Clone)]
struct FeedInstrument {
    symbol: String,
    price: f64,
    step: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedFeed {
    instruments: Vec<FeedInstrument>,
}

impl SimulatedFeed {
    pub fn new(watchlist: &[String]) -> Self {
        let instruments = watchlist
            .iter()
            .map(|symbol| FeedInstrument {
                symbol: symbol.clone(),
                price: starting_price(symbol),
                step: if is_crypto(symbol) { CRYPTO_STEP } else { FOREX_STEP },
            })
            .collect();

        Self { instruments }
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|i| i.symbol.as_str())
    }

    /// Current simulated price of an instrument
    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.instruments
            .iter()
            .find(|i| i.symbol == symbol)
            .map(|i| i.price)
    }

    /// Advance every instrument one step and record the new prices
    pub fn tick(&mut self, store: &mut PriceSeriesStore, rng: &mut dyn RandomSource) {
        for instrument in &mut self.instruments {
            let drift = rng.next_in(-instrument.step, instrument.step);
            instrument.price *= 1.0 + drift;
            store.record(&instrument.symbol, instrument.price);
        }
        debug!("Simulated feed ticked {} instruments", self.instruments.len());
    }

    /// Fill the store with `ticks` steps of history
    pub fn warm_up(&mut self, store: &mut PriceSeriesStore, ticks: usize, rng: &mut dyn RandomSource) {
        for _ in 0..ticks {
            self.tick(store, rng);
        }
    }
}

fn is_crypto(symbol: &str) -> bool {
    CRYPTO_ASSETS.iter().any(|asset| symbol.starts_with(asset))
}

fn starting_price(symbol: &str) -> f64 {
    match symbol {
        "EUR/USD" => 1.0850,
        "GBP/USD" => 1.2710,
        "USD/JPY" => 151.20,
        "AUD/USD" => 0.6600,
        "USD/CHF" => 0.8850,
        "USD/CAD" => 1.3600,
        "NZD/USD" => 0.6050,
        "BTC/USD" => 65_000.0,
        "ETH/USD" => 3_400.0,
        _ => 1.0,
    }
}
