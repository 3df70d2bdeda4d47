use thiserror::Error;

/// Erros comuns da biblioteca Sandscan
#[derive(Error, Debug)]
pub enum Error {
    /// Erro de comunicação com o provedor de ledger
    #[error("Erro de RPC: {0}")]
    RpcError(String),

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Erro de validação
    #[error("Erro de validação: {0}")]
    ValidationError(String),

    /// Erro de configuração
    #[error("Erro de configuração: {0}")]
    ConfigError(String),

    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
