use crate::candidate::SandwichCandidate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Política de resolução de candidatos que compartilham transações.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Prefere o bracket mais curto; empates pelo front mais antigo e depois
    /// pela menor assinatura do front.
    #[default]
    TightestBracket,
    /// Prefere o candidato que aparece primeiro no tempo.
    EarliestFirst,
    /// Não resolve sobreposição; devolve todos os candidatos.
    KeepAll,
}

/// Resolve candidatos sobrepostos em uma lista sem transações compartilhadas.
pub struct CandidateDeduplicator {
    policy: OverlapPolicy,
}

impl CandidateDeduplicator {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    /// Aceita candidatos gulosamente na ordem de preferência da política,
    /// descartando qualquer um que toque uma assinatura já aceita. O resultado
    /// sai ordenado pelo timestamp do front.
    pub fn dedupe<'a>(&self, candidates: &[SandwichCandidate<'a>]) -> Vec<SandwichCandidate<'a>> {
        let mut ranked = candidates.to_vec();
        match self.policy {
            OverlapPolicy::TightestBracket => ranked.sort_by(tightest_first),
            OverlapPolicy::EarliestFirst => ranked.sort_by(chronological),
            OverlapPolicy::KeepAll => {}
        }

        let mut claimed: HashSet<&'a str> = HashSet::new();
        let mut kept = Vec::with_capacity(ranked.len());
        for candidate in ranked {
            if self.policy != OverlapPolicy::KeepAll
                && candidate.signatures().any(|s| claimed.contains(s))
            {
                debug!(
                    front = %candidate.front().signature,
                    bracket = candidate.bracket_seconds(),
                    "candidato sobreposto descartado"
                );
                continue;
            }
            claimed.extend(candidate.signatures());
            kept.push(candidate);
        }

        kept.sort_by(chronological);
        kept
    }
}

impl Default for CandidateDeduplicator {
    fn default() -> Self {
        Self::new(OverlapPolicy::default())
    }
}

fn chronological(a: &SandwichCandidate<'_>, b: &SandwichCandidate<'_>) -> Ordering {
    a.front_timestamp()
        .cmp(&b.front_timestamp())
        .then_with(|| a.front().signature.cmp(&b.front().signature))
}

fn tightest_first(a: &SandwichCandidate<'_>, b: &SandwichCandidate<'_>) -> Ordering {
    a.bracket_seconds()
        .total_cmp(&b.bracket_seconds())
        .then_with(|| chronological(a, b))
}
