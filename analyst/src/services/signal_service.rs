//! Signal service
//!
//! Produces one signal per instrument, preferring the external analyst and
//! falling back to the heuristic generator whenever it cannot be used.

use futures::future::join_all;
use market_engine::prelude::{
    EngineError, MarketEngine, MarketSnapshot, PriceSeries, RandomSource, Signal, SignalValidator,
};
use tracing::{debug, info, warn};

use super::ai_analyst::AiAnalystService;

pub struct SignalService {
    engine: MarketEngine,
    analyst: Option<AiAnalystService>,
}

impl SignalService {
    pub fn new(engine: MarketEngine, analyst: Option<AiAnalystService>) -> Self {
        Self { engine, analyst }
    }

    pub fn engine(&self) -> &MarketEngine {
        &self.engine
    }

    pub fn has_analyst(&self) -> bool {
        self.analyst.is_some()
    }

    /// Signal for one instrument
    ///
    /// The heuristic baseline is always computed first so the randomness
    /// consumed does not depend on whether the external call succeeds.
    pub async fn generate_signal(
        &self,
        snapshot: &MarketSnapshot,
        series: &PriceSeries,
        use_ai: bool,
        rng: &mut (dyn RandomSource + Send),
    ) -> Signal {
        let baseline = self.engine.generate_signal(snapshot, series, rng);
        self.resolve(snapshot, series, baseline, use_ai).await
    }

    /// Signals for every instrument in the basket, in basket order
    ///
    /// Baselines are drawn one after another from `rng`; the external
    /// requests then run concurrently, so one slow instrument does not delay
    /// the rest of the cycle.
    pub async fn generate_batch(
        &self,
        basket: &[PriceSeries],
        use_ai: bool,
        rng: &mut (dyn RandomSource + Send),
    ) -> Vec<Signal> {
        let mut pending = Vec::with_capacity(basket.len());
        for series in basket {
            let Some(snapshot) = MarketSnapshot::from_series(series) else {
                continue;
            };
            let baseline = self.engine.generate_signal(&snapshot, series, &mut *rng);
            pending.push((snapshot, series, baseline));
        }

        join_all(
            pending
                .into_iter()
                .map(|(snapshot, series, baseline)| async move {
                    self.resolve(&snapshot, series, baseline, use_ai).await
                }),
        )
        .await
    }

    async fn resolve(&self, snapshot: &MarketSnapshot, series: &PriceSeries, baseline: Signal, use_ai: bool) -> Signal {
        if !use_ai {
            return baseline;
        }

        match self.attempt_external(snapshot, series, &baseline).await {
            Ok(signal) => {
                info!(
                    "AI signal for {}: {} ({:.0}%)",
                    signal.symbol, signal.action, signal.confidence
                );
                signal
            }
            Err(err) => {
                warn!("AI analyst unavailable for {}, using heuristic signal: {}", snapshot.symbol, err);
                baseline
            }
        }
    }

    async fn attempt_external(
        &self,
        snapshot: &MarketSnapshot,
        series: &PriceSeries,
        baseline: &Signal,
    ) -> Result<Signal, EngineError> {
        let analyst = self
            .analyst
            .as_ref()
            .ok_or_else(|| EngineError::ExternalServiceUnavailable("no AI analyst configured".to_string()))?;

        let indicators = self.engine.compute_indicators(series);
        let signal = analyst.request_signal(snapshot, &indicators).await?;

        SignalValidator::validate(&signal)
            .map_err(|e| EngineError::MalformedExternalResponse(e.to_string()))?;

        if !SignalValidator::agrees_with(&signal, baseline) {
            warn!(
                "AI signal for {} ({}) disagrees with heuristic ({})",
                snapshot.symbol, signal.action, baseline.action
            );
        } else {
            debug!("AI signal for {} agrees with heuristic", snapshot.symbol);
        }

        Ok(signal)
    }
}
