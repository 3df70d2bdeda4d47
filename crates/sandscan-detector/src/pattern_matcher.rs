use crate::candidate::{PatternType, SandwichCandidate};
use sandscan_core::TransactionRecord;
use tracing::debug;

/// Varre o pool com uma janela de três posições consecutivas.
///
/// A janela é ancorada em índices consecutivos do pool *filtrado*: front,
/// vítima e back-run são a 1ª, 2ª e 3ª transações elegíveis em ordem de tempo,
/// não necessariamente vizinhas no fluxo bruto. Sandwiches cujas pernas estão
/// separadas por outra transação elegível não são detectados; a busca sobre
/// todas as triplas foi descartada para manter a varredura O(n).
pub struct PatternMatcher {
    max_bracket_seconds: Option<f64>,
}

impl PatternMatcher {
    pub fn new(max_bracket_seconds: Option<f64>) -> Self {
        Self { max_bracket_seconds }
    }

    pub fn find_candidates<'a>(&self, pool: &[&'a TransactionRecord]) -> Vec<SandwichCandidate<'a>> {
        pool.windows(3)
            .filter_map(|w| self.evaluate(w[0], w[1], w[2]))
            .collect()
    }

    /// Avalia uma única janela (front, vítima, back).
    pub fn evaluate<'a>(
        &self,
        front: &'a TransactionRecord,
        victim: &'a TransactionRecord,
        back: &'a TransactionRecord,
    ) -> Option<SandwichCandidate<'a>> {
        if !front.direction.is_known() || front.direction != victim.direction {
            return None;
        }
        if Some(back.direction) != front.direction.opposite() {
            return None;
        }

        if front.signature == victim.signature
            || victim.signature == back.signature
            || front.signature == back.signature
        {
            debug!(signature = %victim.signature, "janela com registros duplicados ignorada");
            return None;
        }

        let (t0, t1, t2) = match (front.timestamp, victim.timestamp, back.timestamp) {
            (Some(t0), Some(t1), Some(t2)) => (t0, t1, t2),
            _ => {
                debug!(front = %front.signature, "janela sem timestamp ignorada");
                return None;
            }
        };

        let diff1 = t1.saturating_sub(t0);
        let diff2 = t2.saturating_sub(t1);
        if diff1 < 0 || diff2 < 0 {
            debug!(
                front = %front.signature,
                diff1,
                diff2,
                "janela com timestamps decrescentes ignorada"
            );
            return None;
        }

        let time_diffs = [diff1 as f64, diff2 as f64];
        if let Some(max) = self.max_bracket_seconds {
            if time_diffs[0] > max || time_diffs[1] > max {
                return None;
            }
        }

        Some(SandwichCandidate {
            pattern_type: PatternType::new(front.direction, back.direction),
            transactions: [front, victim, back],
            time_diffs,
        })
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(None)
    }
}
