/*!
 * Sandscan Types
 *
 * Tipos comuns usados em toda a workspace Sandscan
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Alias para a assinatura (identificador único) de uma transação
pub type Signature = String;

/// Direção de um swap em relação ao token analisado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
    #[default]
    Unknown,
}

impl Direction {
    /// Direção oposta; `Unknown` não tem oposta.
    pub fn opposite(self) -> Option<Direction> {
        match self {
            Direction::Buy => Some(Direction::Sell),
            Direction::Sell => Some(Direction::Buy),
            Direction::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Direction::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
            Direction::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aceita `null` como o valor padrão do tipo (`Unknown`, lista vazia, zero).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Visão normalizada de uma transação já classificada.
///
/// Nunca é alterada depois da normalização; o motor de detecção apenas lê.
/// Registros sem `timestamp` ou sem direção continuam válidos para exibição,
/// mas não participam do casamento de padrões.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub signature: Signature,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub direction: Direction,
    #[serde(default)]
    pub is_dex: bool,
}

impl TransactionRecord {
    pub fn new(signature: impl Into<Signature>, timestamp: i64, direction: Direction, is_dex: bool) -> Self {
        Self {
            signature: signature.into(),
            timestamp: Some(timestamp),
            direction,
            is_dex,
        }
    }
}

/// Resultado do classificador de direção
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub direction: Direction,
    pub is_dex: bool,
}

/// Transação enriquecida no formato devolvido pela API de transações da Helius.
///
/// Apenas os campos consumidos pelo classificador são tipados; todos são
/// opcionais porque o provedor omite campos com frequência.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedTransaction {
    #[serde(default)]
    pub signature: Option<Signature>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub fee_payer: Option<String>,
    #[serde(default)]
    pub transaction_error: Option<serde_json::Value>,
    /// `None` quando a listagem veio sem instruções e precisa de detalhamento
    #[serde(default)]
    pub instructions: Option<Vec<InstructionInfo>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token_transfers: Vec<TokenTransfer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_transfers: Vec<NativeTransfer>,
}

impl EnhancedTransaction {
    pub fn is_successful(&self) -> bool {
        self.transaction_error.is_none()
    }

    /// Itera os program ids de todas as instruções, incluindo as internas.
    pub fn program_ids(&self) -> impl Iterator<Item = &str> {
        let mut ids = Vec::new();
        if let Some(instructions) = &self.instructions {
            for ix in instructions {
                ix.collect_program_ids(&mut ids);
            }
        }
        ids.into_iter()
    }
}

/// Instrução (ou instrução interna) de uma transação
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionInfo {
    #[serde(default)]
    pub program_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inner_instructions: Vec<InstructionInfo>,
}

impl InstructionInfo {
    fn collect_program_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(id) = &self.program_id {
            out.push(id.as_str());
        }
        for inner in &self.inner_instructions {
            inner.collect_program_ids(out);
        }
    }
}

/// Quantidade de tokens: número ou objeto `{ "amount": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenAmount {
    Number(f64),
    Raw { amount: String },
    Text(String),
}

impl TokenAmount {
    /// Valor numérico; entradas não numéricas valem zero.
    pub fn value(&self) -> f64 {
        match self {
            TokenAmount::Number(v) => *v,
            TokenAmount::Raw { amount } | TokenAmount::Text(amount) => amount.parse().unwrap_or(0.0),
        }
    }
}

/// Transferência SPL registrada na transação
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,
    #[serde(default)]
    pub to_user_account: Option<String>,
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub token_amount: Option<TokenAmount>,
}

impl TokenTransfer {
    pub fn amount(&self) -> f64 {
        self.token_amount.as_ref().map(TokenAmount::value).unwrap_or(0.0)
    }
}

/// Transferência de SOL nativo (lamports)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    #[serde(default)]
    pub from_user_account: Option<String>,
    #[serde(default)]
    pub to_user_account: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: u64,
}
