use crate::deduplicator::CandidateDeduplicator;
use crate::normalizer::normalize;
use crate::options::DetectionOptions;
use crate::pattern_matcher::PatternMatcher;
use crate::result_assembler::{assemble, AnalysisResult};
use sandscan_core::TransactionRecord;
use tracing::info;

/// Executa o pipeline completo: normalização, casamento, deduplicação e
/// montagem do resultado.
///
/// Função pura sobre a entrada; nenhum estado é compartilhado entre chamadas.
pub fn detect_sandwiches(raw_transactions: Vec<TransactionRecord>, options: &DetectionOptions) -> AnalysisResult {
    let normalized = normalize(raw_transactions, options);
    let pool = normalized.pool();

    let candidates = PatternMatcher::new(options.max_bracket_seconds).find_candidates(&pool);
    let kept = CandidateDeduplicator::new(options.overlap_policy).dedupe(&candidates);

    info!(
        transactions = normalized.transactions.len(),
        pool = pool.len(),
        candidates = candidates.len(),
        potential_sandwiches = kept.len(),
        "análise de sandwich concluída"
    );

    assemble(&normalized.transactions, &kept)
}
