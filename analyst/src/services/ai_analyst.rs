//! External AI Analyst Service
//!
//! Client for the chat-completion style AI service that proposes trading
//! signals. Every failure is reported as an [`EngineError`] the caller can
//! recover from; nothing here panics on bad input from the service.

use chrono::Utc;
use market_engine::prelude::{EngineError, Indicator, MarketSnapshot, Provenance, RiskLevel, Signal, SignalAction};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a professional forex and crypto market analyst. \
Reply with a single JSON object and nothing else, using exactly these keys: \
\"action\" (\"BUY\", \"SELL\" or \"HOLD\"), \"confidence\" (0-100), \"entryPrice\", \
\"stopLoss\", \"takeProfit\", \"riskLevel\" (\"LOW\", \"MEDIUM\" or \"HIGH\") and \"reasoning\".";

#[derive(Debug, Clone)]
pub struct AiAnalystService {
    endpoint: String,
    timeout_secs: u64,
    max_retries: u32,
    client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalPayload {
    action: String,
    confidence: f64,
    entry_price: Option<f64>,
    stop_loss: f64,
    take_profit: f64,
    risk_level: Option<String>,
    reasoning: Option<String>,
}

impl AiAnalystService {
    /// Create a new analyst client with default timeout (15s) and retries (2)
    pub fn new(endpoint: String) -> Result<Self, EngineError> {
        Self::with_config(endpoint, 15, 2)
    }

    /// Create a new analyst client with custom configuration
    pub fn with_config(endpoint: String, timeout_secs: u64, max_retries: u32) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::ExternalServiceUnavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            timeout_secs,
            max_retries,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Ask the analyst for a signal on one instrument
    pub async fn request_signal(
        &self,
        snapshot: &MarketSnapshot,
        indicators: &[Indicator],
    ) -> Result<Signal, EngineError> {
        let messages = build_messages(snapshot, indicators);
        let completion = self.complete(&messages).await?;
        parse_signal(&completion, snapshot, indicators)
    }

    /// Send messages and return the raw completion text
    ///
    /// Transport failures and error statuses are retried up to `max_retries`
    /// times; a malformed body is returned immediately.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, EngineError> {
        let mut attempt = 0;
        loop {
            match self.send_once(messages).await {
                Ok(completion) => return Ok(completion),
                Err(err @ EngineError::ExternalServiceUnavailable(_)) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!("AI analyst attempt {} failed: {}; retrying", attempt, err);
                    tokio::time::sleep(Duration::from_millis(250 * attempt as u64)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(&self, messages: &[ChatMessage]) -> Result<String, EngineError> {
        let request = CompletionRequest { messages };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::ExternalServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EngineError::ExternalServiceUnavailable(format!(
                "AI analyst error ({}): {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::ExternalServiceUnavailable(e.to_string()))?;
        let envelope: CompletionResponse = serde_json::from_str(&body)?;
        debug!("AI analyst completion: {}", envelope.completion);

        Ok(envelope.completion)
    }
}

/// System and user messages describing one instrument
pub fn build_messages(snapshot: &MarketSnapshot, indicators: &[Indicator]) -> Vec<ChatMessage> {
    let mut prompt = format!(
        r#"Analyze {} and propose a trading signal.

**Market Data:**
- Price: {:.5}
- Change: {:+.2}%
- High: {:.5}
- Low: {:.5}

"#,
        snapshot.symbol, snapshot.price, snapshot.change_percent, snapshot.high, snapshot.low,
    );

    if !indicators.is_empty() {
        prompt.push_str("**Technical Indicators:**\n");
        for indicator in indicators {
            prompt.push_str(&format!(
                "- {}: {:.4} ({}, strength {:.0}) {}\n",
                indicator.name, indicator.value, indicator.signal, indicator.strength, indicator.description
            ));
        }
    }

    vec![
        ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: prompt,
        },
    ]
}

/// Parse a completion into a signal
///
/// Accepts the JSON object bare or wrapped in a markdown code fence.
pub fn parse_signal(
    completion: &str,
    snapshot: &MarketSnapshot,
    indicators: &[Indicator],
) -> Result<Signal, EngineError> {
    let json = extract_json(completion).ok_or_else(|| {
        EngineError::MalformedExternalResponse("completion contains no JSON object".to_string())
    })?;
    let payload: SignalPayload = serde_json::from_str(json)?;

    let action = match payload.action.trim().to_uppercase().as_str() {
        "BUY" => SignalAction::Buy,
        "SELL" => SignalAction::Sell,
        "HOLD" => SignalAction::Hold,
        other => {
            return Err(EngineError::MalformedExternalResponse(format!("unknown action {:?}", other)))
        }
    };

    let risk_level = match payload.risk_level.as_deref().map(|r| r.trim().to_uppercase()) {
        Some(level) if level == "LOW" => RiskLevel::Low,
        Some(level) if level == "HIGH" => RiskLevel::High,
        Some(level) if level == "MEDIUM" => RiskLevel::Medium,
        Some(other) => {
            return Err(EngineError::MalformedExternalResponse(format!("unknown risk level {:?}", other)))
        }
        None => RiskLevel::Medium,
    };

    Ok(Signal {
        symbol: snapshot.symbol.clone(),
        action,
        confidence: payload.confidence,
        entry_price: payload.entry_price.unwrap_or(snapshot.price),
        stop_loss: payload.stop_loss,
        take_profit: payload.take_profit,
        risk_level,
        reasoning: payload.reasoning.unwrap_or_default(),
        indicators: indicators.to_vec(),
        timestamp: Utc::now(),
        provenance: Provenance::External,
    })
}

fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot::new("EUR/USD", 1.0850, 0.35)
    }

    #[test]
    fn test_parse_plain_completion() {
        let completion = r#"{"action":"BUY","confidence":78,"entryPrice":1.085,"stopLoss":1.082,"takeProfit":1.092,"riskLevel":"MEDIUM","reasoning":"Momentum building"}"#;
        let signal = parse_signal(completion, &snapshot(), &[]).unwrap();

        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.confidence, 78.0);
        assert_eq!(signal.stop_loss, 1.082);
        assert_eq!(signal.risk_level, RiskLevel::Medium);
        assert_eq!(signal.provenance, Provenance::External);
        assert_eq!(signal.reasoning, "Momentum building");
    }

    #[test]
    fn test_parse_fenced_completion_with_defaults() {
        let completion = "Here you go:\n```json\n{\"action\":\"sell\",\"confidence\":61.5,\"stopLoss\":1.09,\"takeProfit\":1.07}\n```";
        let signal = parse_signal(completion, &snapshot(), &[]).unwrap();

        assert_eq!(signal.action, SignalAction::Sell);
        assert_eq!(signal.entry_price, 1.0850);
        assert_eq!(signal.risk_level, RiskLevel::Medium);
        assert!(signal.reasoning.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        let cases = [
            "I cannot help with that.",
            "{\"action\":\"BUY\"}",
            "{\"action\":\"SHORT\",\"confidence\":50,\"stopLoss\":1,\"takeProfit\":2}",
            "{\"action\":\"BUY\",\"confidence\":50,\"stopLoss\":1,\"takeProfit\":2,\"riskLevel\":\"EXTREME\"}",
            "} not json {",
        ];
        for completion in cases {
            let err = parse_signal(completion, &snapshot(), &[]).unwrap_err();
            assert!(matches!(err, EngineError::MalformedExternalResponse(_)), "{}", completion);
        }
    }

    #[test]
    fn test_client_settings() {
        let service = AiAnalystService::with_config("http://localhost:8080/complete".to_string(), 7, 1).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:8080/complete");
        assert_eq!(service.timeout_secs(), 7);
        assert_eq!(AiAnalystService::new("http://localhost".to_string()).unwrap().timeout_secs(), 15);
    }

    #[test]
    fn test_build_messages() {
        let indicators = vec![Indicator::new(
            "RSI",
            42.0,
            market_engine::prelude::IndicatorSignal::Neutral,
            16.0,
            "RSI in neutral zone: 42.00",
        )];
        let messages = build_messages(&snapshot(), &indicators);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("EUR/USD"));
        assert!(messages[1].content.contains("RSI: 42.0000"));

        let body = serde_json::to_value(CompletionRequest { messages: &messages }).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
    }
}
