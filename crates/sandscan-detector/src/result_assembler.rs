use crate::candidate::{PatternType, SandwichCandidate};
use sandscan_core::TransactionRecord;
use serde::{Deserialize, Serialize};

/// Candidato final, desacoplado da sequência de origem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotentialSandwich {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub time_diffs: [f64; 2],
    /// (front-run, vítima, back-run)
    pub transactions: [TransactionRecord; 3],
}

impl PotentialSandwich {
    pub fn front(&self) -> &TransactionRecord {
        &self.transactions[0]
    }

    pub fn victim(&self) -> &TransactionRecord {
        &self.transactions[1]
    }

    pub fn back(&self) -> &TransactionRecord {
        &self.transactions[2]
    }
}

impl From<&SandwichCandidate<'_>> for PotentialSandwich {
    fn from(candidate: &SandwichCandidate<'_>) -> Self {
        Self {
            pattern_type: candidate.pattern_type,
            time_diffs: candidate.time_diffs,
            transactions: candidate.transactions.map(|tx| tx.clone()),
        }
    }
}

/// Resultado de uma análise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub transactions: Vec<TransactionRecord>,
    pub potential_sandwiches: Vec<PotentialSandwich>,
}

/// Empacota a sequência completa e os candidatos em um snapshot próprio,
/// sem referências para o estado do chamador.
pub fn assemble(full_sequence: &[TransactionRecord], candidates: &[SandwichCandidate<'_>]) -> AnalysisResult {
    AnalysisResult {
        transactions: full_sequence.to_vec(),
        potential_sandwiches: candidates.iter().map(PotentialSandwich::from).collect(),
    }
}
