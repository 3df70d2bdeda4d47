use axum::{extract::State, routing::post, Json, Router};
use sandscan_core::TransactionRecord;
use sandscan_detector::{detect_sandwiches, ingest, AnalysisResult, DetectionOptions, OverlapPolicy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub token_address: Option<String>,
    /// Número ou string numérica
    #[serde(default)]
    pub lookback_limit: Option<Value>,
    #[serde(flatten)]
    pub overrides: DetectionOverrides,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub options: DetectionOverrides,
}

/// Opções enviadas na requisição.
///
/// Chaves ausentes mantêm o valor configurado no servidor (bloco `detection`
/// do config.json), tanto em `/analyze` quanto em `/detect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionOverrides {
    #[serde(default)]
    pub dex_only: Option<bool>,
    #[serde(default)]
    pub include_unknown_direction: Option<bool>,
    #[serde(default)]
    pub max_bracket_seconds: Option<f64>,
    #[serde(default)]
    pub overlap_policy: Option<OverlapPolicy>,
}

impl DetectionOverrides {
    /// Aplica as chaves presentes sobre `base` e valida o resultado.
    pub fn apply(self, base: DetectionOptions) -> Result<DetectionOptions, ApiError> {
        let mut options = base;
        if let Some(dex_only) = self.dex_only {
            options = options.dex_only(dex_only);
        }
        if let Some(include) = self.include_unknown_direction {
            options = options.include_unknown_direction(include);
        }
        if let Some(max) = self.max_bracket_seconds {
            options = options.max_bracket_seconds(Some(max));
        }
        if let Some(policy) = self.overlap_policy {
            options = options.overlap_policy(policy);
        }
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_transactions: usize,
    pub dex_transactions: usize,
    pub potential_attacks: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub stats: AnalysisStats,
}

impl AnalysisResponse {
    fn success(token_address: Option<String>, fetched: usize, result: AnalysisResult) -> Self {
        let stats = AnalysisStats {
            total_transactions: fetched,
            dex_transactions: result.transactions.iter().filter(|tx| tx.is_dex).count(),
            potential_attacks: result.potential_sandwiches.len(),
        };
        Self {
            status: "success",
            token_address,
            result,
            stats,
        }
    }
}

/// POST /analyze - busca, classifica e analisa as transações de um token
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let limit = lookback_limit(payload.lookback_limit.as_ref(), state.default_lookback_limit)?
        .min(state.max_lookback_limit);

    let token_address = payload
        .token_address
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Token address is required".to_string()))?;

    let options = payload.overrides.apply(state.detection)?;

    tracing::info!(token = %token_address, limit, "iniciando análise");

    let raw = state.source.recent_transactions(&token_address, limit).await?;
    let records = ingest(&raw, state.classifier.as_ref(), &token_address);
    let result = detect_sandwiches(records, &options);

    Ok(Json(AnalysisResponse::success(Some(token_address), raw.len(), result)))
}

/// POST /detect - executa o motor sobre registros já classificados
pub async fn detect(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DetectRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let options = payload.options.apply(state.detection)?;
    let fetched = payload.transactions.len();
    let result = detect_sandwiches(payload.transactions, &options);
    Ok(Json(AnalysisResponse::success(None, fetched, result)))
}

/// Aceita inteiros positivos, como número ou string.
fn lookback_limit(raw: Option<&Value>, default: usize) -> Result<usize, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid lookback limit".to_string());
    let parsed = match raw {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub fn analysis_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/detect", post(detect))
        .with_state(state)
}
