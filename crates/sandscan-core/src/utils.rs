/*!
 * Sandscan Utils
 *
 * Utilitários de exibição usados pelos binários e pela camada HTTP
 */

use chrono::{DateTime, Utc};

const SOLSCAN_TX_URL: &str = "https://solscan.io/tx/";

/// Abrevia uma assinatura para logs (`abcdefghij...0123456789`)
pub fn short_signature(signature: &str) -> String {
    let chars: Vec<char> = signature.chars().collect();
    if chars.len() <= 20 {
        return signature.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Link do explorer para uma transação
pub fn explorer_url(signature: &str) -> String {
    format!("{}{}", SOLSCAN_TX_URL, signature)
}

/// Formata um timestamp unix (segundos) em RFC 3339
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.to_rfc3339())
}
