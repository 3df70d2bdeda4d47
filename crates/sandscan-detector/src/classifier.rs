use sandscan_core::traits::DirectionClassifier;
use sandscan_core::{Classification, Direction, EnhancedTransaction};
use std::collections::HashSet;
use tracing::debug;

/// Programas de DEX mais comuns na mainnet da Solana
pub const KNOWN_DEX_PROGRAMS: &[&str] = &[
    "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8", // Raydium AMM v4
    "CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK", // Raydium CLMM
    "CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C", // Raydium CPMM
    "whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc", // Orca Whirlpool
    "JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4", // Jupiter v6
    "LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YN7HNyjp", // Meteora DLMM
    "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P", // pump.fun
];

/// Classificador baseado em uma lista de programas de DEX conhecidos.
///
/// A direção é inferida pelos fluxos de token do fee payer: recebeu o token
/// alvo e pagou com outro ativo = compra; enviou o token alvo e recebeu outro
/// ativo = venda.
pub struct ProgramAllowListClassifier {
    dex_programs: HashSet<String>,
}

impl ProgramAllowListClassifier {
    /// Cria um classificador a partir dos program ids de DEX.
    pub fn new<I, S>(dex_programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dex_programs: dex_programs.into_iter().map(Into::into).collect(),
        }
    }

    /// Classificador com [`KNOWN_DEX_PROGRAMS`]
    pub fn with_known_programs() -> Self {
        Self::new(KNOWN_DEX_PROGRAMS.iter().copied())
    }

    pub fn is_dex_interaction(&self, tx: &EnhancedTransaction) -> bool {
        tx.program_ids().any(|id| self.dex_programs.contains(id))
    }

    /// Direção do swap em relação a `target_mint`.
    pub fn swap_direction(tx: &EnhancedTransaction, target_mint: &str) -> Direction {
        if !tx.is_successful() {
            return Direction::Unknown;
        }
        let payer = match tx.fee_payer.as_deref() {
            Some(p) => p,
            None => return Direction::Unknown,
        };

        let mut target_in = 0.0;
        let mut target_out = 0.0;
        let mut other_in = false;
        let mut other_out = false;

        for transfer in &tx.token_transfers {
            let amount = transfer.amount();
            if amount <= 0.0 {
                continue;
            }
            let to_payer = transfer.to_user_account.as_deref() == Some(payer);
            let from_payer = transfer.from_user_account.as_deref() == Some(payer);
            if transfer.mint.as_deref() == Some(target_mint) {
                if to_payer {
                    target_in += amount;
                }
                if from_payer {
                    target_out += amount;
                }
            } else {
                other_in |= to_payer;
                other_out |= from_payer;
            }
        }

        for transfer in &tx.native_transfers {
            if transfer.amount == 0 {
                continue;
            }
            other_in |= transfer.to_user_account.as_deref() == Some(payer);
            other_out |= transfer.from_user_account.as_deref() == Some(payer);
        }

        if target_in > target_out && other_out {
            Direction::Buy
        } else if target_out > target_in && other_in {
            Direction::Sell
        } else {
            Direction::Unknown
        }
    }
}

impl DirectionClassifier for ProgramAllowListClassifier {
    fn classify(&self, tx: &EnhancedTransaction, target_mint: &str) -> Classification {
        let is_dex = self.is_dex_interaction(tx);
        let direction = Self::swap_direction(tx, target_mint);
        debug!(
            signature = tx.signature.as_deref().unwrap_or_default(),
            is_dex,
            %direction,
            "transação classificada"
        );
        Classification { direction, is_dex }
    }
}
