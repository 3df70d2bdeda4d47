use sandscan_core::{Direction, TransactionRecord};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Par de direções (front-run, back-run) que descreve o sandwich.
///
/// A vítima sempre opera na mesma direção do front-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternType {
    pub front: Direction,
    pub back: Direction,
}

impl PatternType {
    pub fn new(front: Direction, back: Direction) -> Self {
        Self { front, back }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.front, self.back)
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| match part {
            "buy" => Ok(Direction::Buy),
            "sell" => Ok(Direction::Sell),
            other => Err(format!("direção inválida: {}", other)),
        };
        let (front, back) = s
            .split_once('-')
            .ok_or_else(|| format!("tipo de padrão inválido: {}", s))?;
        Ok(Self::new(parse(front)?, parse(back)?))
    }
}

impl Serialize for PatternType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PatternType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Candidato a sandwich produzido pelo matcher.
///
/// Referencia os registros da sequência normalizada; nunca é alterado após a
/// criação.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandwichCandidate<'a> {
    pub pattern_type: PatternType,
    /// (front-run, vítima, back-run)
    pub transactions: [&'a TransactionRecord; 3],
    /// (vítima - front, back - vítima), em segundos
    pub time_diffs: [f64; 2],
}

impl<'a> SandwichCandidate<'a> {
    pub fn front(&self) -> &'a TransactionRecord {
        self.transactions[0]
    }

    pub fn victim(&self) -> &'a TransactionRecord {
        self.transactions[1]
    }

    pub fn back(&self) -> &'a TransactionRecord {
        self.transactions[2]
    }

    /// Duração total do bracket
    pub fn bracket_seconds(&self) -> f64 {
        self.time_diffs[0] + self.time_diffs[1]
    }

    /// Candidatos só existem com timestamps presentes
    pub fn front_timestamp(&self) -> i64 {
        self.front().timestamp.unwrap_or_default()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &'a str> {
        self.transactions.into_iter().map(|tx| tx.signature.as_str())
    }

    pub fn shares_transaction_with(&self, other: &SandwichCandidate<'_>) -> bool {
        self.signatures().any(|s| other.signatures().any(|o| o == s))
    }
}
