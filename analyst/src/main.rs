use analyst::{AiAnalystService, AnalystConfig, SignalService, SimulatedFeed};
use anyhow::Result;
use market_engine::prelude::*;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing_subscriber::EnvFilter;

/// Ticks of history generated before the first analysis cycle
const WARM_UP_TICKS: usize = 60;

/// Minimum confidence for a signal to be tracked as an alert
const ALERT_MIN_CONFIDENCE: f64 = 60.0;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting market analyst...");

    let config = AnalystConfig::from_env()?;
    let engine = MarketEngine::new(EngineConfig::default());

    let analyst = config
        .ai_api_url
        .clone()
        .map(|url| AiAnalystService::with_config(url, config.ai_timeout_secs, config.ai_max_retries))
        .transpose()?;
    match &analyst {
        Some(service) => tracing::info!(
            "AI analyst enabled at {} (timeout {}s)",
            service.endpoint(),
            service.timeout_secs()
        ),
        None => tracing::info!("AI_API_URL not set, using heuristic signals only"),
    }

    let mut store = engine.new_store();
    let mut rng = StdRandom::from_entropy();
    let mut feed = SimulatedFeed::new(&config.watchlist);
    feed.warm_up(&mut store, WARM_UP_TICKS, &mut rng);

    // Signal cycles run on their own task so slow AI requests never hold up
    // market refreshes or shutdown. At most one cycle waits behind a running one.
    let (cycle_tx, mut cycle_rx) = mpsc::channel::<Vec<PriceSeries>>(1);
    let service = SignalService::new(engine.clone(), analyst);
    let use_ai = config.use_ai;
    let worker = tokio::spawn(async move {
        let mut alerts = AlertHistory::new();
        let mut rng = StdRandom::from_entropy();
        while let Some(basket) = cycle_rx.recv().await {
            run_signal_cycle(&service, &basket, &mut alerts, use_ai, &mut rng).await;
        }
    });

    let mut market_timer = interval(Duration::from_secs(config.market_refresh_secs.max(1)));
    market_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut signal_timer = interval(Duration::from_secs(config.signal_refresh_secs.max(1)));
    signal_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!("Watching {} instruments", config.watchlist.len());

    loop {
        tokio::select! {
            _ = market_timer.tick() => {
                feed.tick(&mut store, &mut rng);
                refresh_market(&engine, &store);
            }
            _ = signal_timer.tick() => {
                match cycle_tx.try_send(store.snapshot()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        tracing::warn!("Previous signal cycle still running, skipping this one");
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::error!("Signal worker stopped");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down market analyst");
                break;
            }
        }
    }

    drop(cycle_tx);
    worker.abort();

    Ok(())
}

fn refresh_market(engine: &MarketEngine, store: &PriceSeriesStore) {
    let basket = store.snapshot();

    for series in &basket {
        let indicators = engine.compute_indicators(series);
        let sentiment = engine.sentiment(&series.symbol, &indicators);
        for indicator in &indicators {
            tracing::debug!("{} {}: {:.4} ({})", series.symbol, indicator.name, indicator.value, indicator.signal);
        }
        tracing::info!(
            "{} sentiment {:?}: {:.0}% bullish / {:.0}% bearish / {:.0}% neutral",
            series.symbol, sentiment.overall, sentiment.bullish, sentiment.bearish, sentiment.neutral
        );
    }

    let snapshots: Vec<MarketSnapshot> = basket.iter().filter_map(MarketSnapshot::from_series).collect();
    for strength in engine.compute_currency_strength(&snapshots) {
        tracing::info!("{} strength {:+.1} ({:?})", strength.currency, strength.strength, strength.trend);
    }

    for pair in engine.compute_correlations(&basket) {
        tracing::debug!("{} / {}: {:+.2} ({:?})", pair.pair1, pair.pair2, pair.correlation, pair.strength);
    }
}

async fn run_signal_cycle(
    service: &SignalService,
    basket: &[PriceSeries],
    alerts: &mut AlertHistory,
    use_ai: bool,
    rng: &mut StdRandom,
) {
    for series in basket {
        let Some(price) = series.latest() else {
            continue;
        };
        match alerts.close_triggered(&series.symbol, price) {
            Ok(results) => {
                for result in results {
                    tracing::info!(
                        "{} alert closed at {:.5}: {:?} ({:+.5})",
                        series.symbol, result.exit_price, result.outcome, result.pnl
                    );
                }
            }
            Err(e) => tracing::error!("Failed to close alerts for {}: {}", series.symbol, e),
        }
    }

    for signal in service.generate_batch(basket, use_ai, rng).await {
        tracing::info!(
            "{} {} at {:.5} (stop {:.5}, target {:.5}, {:.0}% confidence, {:?})",
            signal.symbol,
            signal.action,
            signal.entry_price,
            signal.stop_loss,
            signal.take_profit,
            signal.confidence,
            signal.provenance
        );
        if SignalValidator::is_actionable(&signal, ALERT_MIN_CONFIDENCE) {
            alerts.record(&signal);
        }
    }

    let stats = alerts.statistics();
    tracing::info!(
        "Alerts: {} active, {} closed, win rate {:.1}%, total P&L {:+.5}",
        stats.active, stats.closed, stats.win_rate, stats.total_pnl
    );
}
