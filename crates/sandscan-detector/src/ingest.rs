use sandscan_core::traits::DirectionClassifier;
use sandscan_core::{EnhancedTransaction, TransactionRecord};
use std::collections::HashSet;
use tracing::debug;

/// Converte transações do provedor em registros classificados.
///
/// Entradas sem assinatura são descartadas; assinaturas repetidas mantêm a
/// primeira ocorrência. Transações sem timestamp são mantidas e ficam fora do
/// pool na normalização.
pub fn ingest<C>(transactions: &[EnhancedTransaction], classifier: &C, target_mint: &str) -> Vec<TransactionRecord>
where
    C: DirectionClassifier + ?Sized,
{
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(transactions.len());

    for tx in transactions {
        let signature = match tx.signature.as_deref() {
            Some(sig) if !sig.is_empty() => sig,
            _ => {
                debug!("transação sem assinatura ignorada");
                continue;
            }
        };
        if !seen.insert(signature) {
            debug!(signature, "assinatura repetida ignorada");
            continue;
        }

        let classification = classifier.classify(tx, target_mint);
        records.push(TransactionRecord {
            signature: signature.to_string(),
            timestamp: tx.timestamp,
            direction: classification.direction,
            is_dex: classification.is_dex,
        });
    }

    records
}
