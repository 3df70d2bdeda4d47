use crate::deduplicator::OverlapPolicy;
use sandscan_core::{error::Result, Error};
use serde::{Deserialize, Serialize};

/// Opções reconhecidas pelo motor de detecção.
///
/// Os nomes serializados seguem o contrato consumido pelo front-end
/// (`dexOnly`, `includeUnknownDirection`, `maxBracketSeconds`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionOptions {
    /// Descarta do pool transações que não tocaram um programa de DEX
    pub dex_only: bool,
    /// Mantém no pool transações com direção desconhecida
    pub include_unknown_direction: bool,
    /// Limite superior para cada intervalo da janela; `None` = sem limite
    pub max_bracket_seconds: Option<f64>,
    /// Política de resolução de candidatos sobrepostos
    pub overlap_policy: OverlapPolicy,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            dex_only: true,
            include_unknown_direction: false,
            max_bracket_seconds: None,
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

impl DetectionOptions {
    pub fn dex_only(mut self, dex_only: bool) -> Self {
        self.dex_only = dex_only;
        self
    }

    pub fn include_unknown_direction(mut self, include: bool) -> Self {
        self.include_unknown_direction = include;
        self
    }

    pub fn max_bracket_seconds(mut self, seconds: Option<f64>) -> Self {
        self.max_bracket_seconds = seconds;
        self
    }

    pub fn overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Rejeita limites que descartariam toda janela em silêncio.
    ///
    /// `max_bracket_seconds` precisa ser finito e não negativo.
    pub fn validate(&self) -> Result<()> {
        match self.max_bracket_seconds {
            Some(max) if !max.is_finite() || max < 0.0 => Err(Error::ValidationError(format!(
                "maxBracketSeconds deve ser finito e não negativo, recebido {}",
                max
            ))),
            _ => Ok(()),
        }
    }
}
