use crate::options::DetectionOptions;
use sandscan_core::TransactionRecord;
use tracing::debug;

/// Sequência ordenada por tempo e o pool de índices elegíveis ao casamento.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSequence {
    /// Todas as transações, ordenadas por `timestamp` (estável).
    /// Registros sem timestamp ficam no fim, na ordem original.
    pub transactions: Vec<TransactionRecord>,
    /// Índices em `transactions` que formam o pool do matcher
    pub pool: Vec<usize>,
}

impl NormalizedSequence {
    /// Pool de trabalho do matcher, na ordem temporal.
    pub fn pool(&self) -> Vec<&TransactionRecord> {
        self.pool.iter().map(|&i| &self.transactions[i]).collect()
    }
}

/// Ordena a entrada e separa o pool de casamento.
pub fn normalize(raw: Vec<TransactionRecord>, options: &DetectionOptions) -> NormalizedSequence {
    let mut transactions = raw;
    // sort_by_key é estável: empates preservam a ordem de busca
    transactions.sort_by_key(|tx| match tx.timestamp {
        Some(ts) => (0u8, ts),
        None => (1u8, 0),
    });

    let pool: Vec<usize> = transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| is_eligible(tx, options))
        .map(|(i, _)| i)
        .collect();

    debug!(
        total = transactions.len(),
        pool = pool.len(),
        dex_only = options.dex_only,
        include_unknown = options.include_unknown_direction,
        "sequência normalizada"
    );

    NormalizedSequence { transactions, pool }
}

fn is_eligible(tx: &TransactionRecord, options: &DetectionOptions) -> bool {
    if tx.timestamp.is_none() {
        return false;
    }
    if options.dex_only && !tx.is_dex {
        return false;
    }
    options.include_unknown_direction || tx.direction.is_known()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandscan_core::Direction;

    fn rec(sig: &str, ts: Option<i64>, dir: Direction, dex: bool) -> TransactionRecord {
        TransactionRecord { signature: sig.into(), timestamp: ts, direction: dir, is_dex: dex }
    }

    #[test]
    fn sorts_stably_and_puts_missing_timestamps_last() {
        let raw = vec![
            rec("late", Some(5), Direction::Buy, true),
            rec("none", None, Direction::Buy, true),
            rec("tie-a", Some(1), Direction::Buy, true),
            rec("tie-b", Some(1), Direction::Sell, true),
        ];
        let norm = normalize(raw, &DetectionOptions::default());
        let order: Vec<_> = norm.transactions.iter().map(|t| t.signature.as_str()).collect();
        assert_eq!(order, vec!["tie-a", "tie-b", "late", "none"]);
        assert_eq!(norm.pool, vec![0, 1, 2]);
    }

    #[test]
    fn dex_only_filters_pool_but_keeps_full_list() {
        let raw = vec![
            rec("a", Some(1), Direction::Buy, true),
            rec("b", Some(2), Direction::Buy, false),
        ];
        let norm = normalize(raw.clone(), &DetectionOptions::default());
        assert_eq!(norm.transactions.len(), 2);
        assert_eq!(norm.pool().len(), 1);

        let norm = normalize(raw, &DetectionOptions::default().dex_only(false));
        assert_eq!(norm.pool().len(), 2);
    }

    #[test]
    fn unknown_direction_toggle() {
        let raw = vec![rec("a", Some(1), Direction::Unknown, true)];
        assert!(normalize(raw.clone(), &DetectionOptions::default()).pool.is_empty());
        let opts = DetectionOptions::default().include_unknown_direction(true);
        assert_eq!(normalize(raw, &opts).pool, vec![0]);
    }
}
