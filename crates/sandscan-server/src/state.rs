use crate::config::AppConfig;
use sandscan_core::traits::{DirectionClassifier, TransactionSource};
use sandscan_detector::{DetectionOptions, ProgramAllowListClassifier};
use std::sync::Arc;

/// Estado compartilhado, imutável entre requisições
pub struct AppState {
    pub source: Arc<dyn TransactionSource>,
    pub classifier: Arc<dyn DirectionClassifier>,
    pub default_lookback_limit: usize,
    pub max_lookback_limit: usize,
    pub detection: DetectionOptions,
}

impl AppState {
    pub fn new(source: Arc<dyn TransactionSource>, config: &AppConfig) -> Self {
        Self {
            source,
            classifier: Arc::new(ProgramAllowListClassifier::new(config.file.dex_programs.iter().cloned())),
            default_lookback_limit: config.file.default_lookback_limit,
            max_lookback_limit: config.file.max_lookback_limit,
            detection: config.detection_options(),
        }
    }
}
