/*!
 * Sandscan Traits
 *
 * Contratos dos colaboradores externos do motor de detecção
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{Classification, EnhancedTransaction};

/// Classificador de direção e de interação com DEX.
///
/// O motor nunca classifica transações por conta própria; a implementação é
/// injetada por quem monta o pipeline.
pub trait DirectionClassifier: Send + Sync {
    /// Classifica uma transação em relação ao token `target_mint`
    fn classify(&self, tx: &EnhancedTransaction, target_mint: &str) -> Classification;
}

/// Fonte de transações recentes de um endereço (token ou conta)
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Obtém até `limit` transações, da mais recente para a mais antiga
    async fn recent_transactions(&self, address: &str, limit: usize) -> Result<Vec<EnhancedTransaction>>;
}
