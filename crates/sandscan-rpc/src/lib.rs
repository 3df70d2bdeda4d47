/*!
 * Sandscan RPC
 *
 * Cliente para a API de transações enriquecidas da Helius
 */

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::{RequestBuilder, StatusCode};
use sandscan_core::{error::Result, traits::TransactionSource, EnhancedTransaction, Error};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Maior página aceita pelo endpoint de listagem
pub const MAX_PAGE_SIZE: usize = 100;

/// Configuração do cliente Helius
#[derive(Debug, Clone)]
pub struct HeliusConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Pausa entre chamadas consecutivas de uma mesma busca
    pub call_delay: Duration,
    pub page_size: usize,
    pub use_cache: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for HeliusConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.helius.xyz".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            call_delay: Duration::from_millis(100),
            page_size: MAX_PAGE_SIZE,
            use_cache: true,
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 128,
        }
    }
}

impl HeliusConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

type CacheKey = (String, usize);

/// Cliente HTTP para a Helius
pub struct HeliusClient {
    http: reqwest::Client,
    config: HeliusConfig,
    cache: Mutex<LruCache<CacheKey, (Vec<EnhancedTransaction>, Instant)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HeliusClient {
    /// Cria um novo cliente, validando a configuração
    pub fn new(config: HeliusConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::ConfigError("Chave da API Helius não informada".to_string()));
        }
        if config.page_size == 0 || config.page_size > MAX_PAGE_SIZE {
            return Err(Error::ConfigError(format!(
                "page_size deve estar entre 1 e {}",
                MAX_PAGE_SIZE
            )));
        }
        let capacity = NonZeroUsize::new(config.cache_capacity)
            .ok_or_else(|| Error::ConfigError("cache_capacity deve ser maior que zero".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::RpcError(format!("Falha ao criar cliente HTTP: {}", e)))?;

        Ok(Self {
            http,
            config,
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &HeliusConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Lista até `limit` transações de um endereço, da mais recente para a
    /// mais antiga, paginando com `before`.
    pub async fn fetch_token_transactions(&self, address: &str, limit: usize) -> Result<Vec<EnhancedTransaction>> {
        let url = format!("{}/v0/addresses/{}/transactions", self.base_url(), address);
        let mut out: Vec<EnhancedTransaction> = Vec::with_capacity(limit);
        let mut before: Option<String> = None;

        while out.len() < limit {
            if before.is_some() {
                tokio::time::sleep(self.config.call_delay).await;
            }
            let page_size = (limit - out.len()).min(self.config.page_size);

            let mut query = vec![
                ("api-key", self.config.api_key.clone()),
                ("limit", page_size.to_string()),
            ];
            if let Some(sig) = &before {
                query.push(("before", sig.clone()));
            }

            let payload = self
                .send_with_retry(|| self.http.get(&url).query(&query), "listagem de transações")
                .await?;
            // o cursor vem da página bruta: entradas descartadas na decodificação
            // ainda contam para a paginação
            let received = payload.as_array().map_or(0, Vec::len);
            let cursor = payload
                .as_array()
                .and_then(|entries| entries.last())
                .and_then(|entry| entry.get("signature"))
                .and_then(Value::as_str)
                .map(str::to_string);
            let page = decode_transactions(payload)?;
            debug!(address, received, before = before.as_deref(), "página de transações recebida");

            before = cursor;
            out.extend(page);

            if received < page_size || before.is_none() {
                break;
            }
        }

        out.truncate(limit);
        Ok(out)
    }

    /// Busca os detalhes completos de um conjunto de assinaturas.
    pub async fn fetch_transaction_details(&self, signatures: &[String]) -> Result<Vec<EnhancedTransaction>> {
        let url = format!("{}/v0/transactions", self.base_url());
        let mut out = Vec::with_capacity(signatures.len());

        for (i, chunk) in signatures.chunks(self.config.page_size).enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.call_delay).await;
            }
            let body = json!({ "transactions": chunk });
            let payload = self
                .send_with_retry(
                    || {
                        self.http
                            .post(&url)
                            .query(&[("api-key", self.config.api_key.as_str())])
                            .json(&body)
                    },
                    "detalhes de transações",
                )
                .await?;
            out.extend(decode_transactions(payload)?);
        }

        Ok(out)
    }

    /// Completa, in place, entradas da listagem que vieram sem instruções.
    async fn complete_details(&self, transactions: &mut [EnhancedTransaction]) {
        let missing: Vec<String> = transactions
            .iter()
            .filter(|tx| tx.instructions.is_none())
            .filter_map(|tx| tx.signature.clone())
            .collect();
        if missing.is_empty() {
            return;
        }

        let details = match self.fetch_transaction_details(&missing).await {
            Ok(details) => details,
            Err(e) => {
                warn!(error = %e, pending = missing.len(), "falha ao completar detalhes; usando a listagem");
                return;
            }
        };

        let mut by_signature: HashMap<String, EnhancedTransaction> = details
            .into_iter()
            .filter_map(|tx| tx.signature.clone().map(|sig| (sig, tx)))
            .collect();
        for tx in transactions.iter_mut().filter(|tx| tx.instructions.is_none()) {
            if let Some(detail) = tx.signature.as_ref().and_then(|sig| by_signature.remove(sig)) {
                *tx = detail;
            }
        }
    }

    async fn send_with_retry<F>(&self, build: F, context: &str) -> Result<Value>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let failure = match build().send().await {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json::<Value>()
                        .await
                        .map_err(|e| Error::DecodeError(format!("Resposta inválida em {}: {}", context, e)));
                }
                Ok(resp) if is_retryable(resp.status()) => format!("status {}", resp.status()),
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(Error::RpcError(format!(
                        "Falha em {}: status {} {}",
                        context, status, body
                    )));
                }
                Err(e) => e.to_string(),
            };

            if attempt >= self.config.max_retries {
                return Err(Error::RpcError(format!(
                    "Falha em {} após {} tentativas: {}",
                    context,
                    attempt + 1,
                    failure
                )));
            }
            attempt += 1;
            warn!(context, attempt, %failure, "nova tentativa de chamada à Helius");
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<Vec<EnhancedTransaction>> {
        let mut cache = self.cache.lock();
        match cache.get(key) {
            Some((data, stored)) if stored.elapsed() < self.config.cache_ttl => return Some(data.clone()),
            Some(_) => {}
            None => return None,
        }
        // expirado
        cache.pop(key);
        None
    }

    /// Limpa o cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Obtém estatísticas do cache
    pub fn cache_stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        let expired = cache
            .iter()
            .filter(|(_, (_, stored))| stored.elapsed() >= self.config.cache_ttl)
            .count();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            total_entries: cache.len(),
            expired_entries: expired,
            hits,
            misses,
            cache_hit_ratio: if lookups == 0 { 0.0 } else { hits as f64 / lookups as f64 },
        }
    }
}

#[async_trait]
impl TransactionSource for HeliusClient {
    /// Listagem completa com detalhes, servida do cache enquanto válida.
    async fn recent_transactions(&self, address: &str, limit: usize) -> Result<Vec<EnhancedTransaction>> {
        let key = (address.to_string(), limit);
        if self.config.use_cache {
            if let Some(data) = self.cached(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(address, limit, "transações servidas do cache");
                return Ok(data);
            }
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        let mut transactions = self.fetch_token_transactions(address, limit).await?;
        self.complete_details(&mut transactions).await;

        if self.config.use_cache {
            self.cache.lock().put(key, (transactions.clone(), Instant::now()));
        }
        Ok(transactions)
    }
}

/// Estatísticas do cache
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub cache_hit_ratio: f64,
}

fn is_retryable(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn decode_transactions(payload: Value) -> Result<Vec<EnhancedTransaction>> {
    let entries = match payload {
        Value::Array(entries) => entries,
        other => {
            return Err(Error::DecodeError(format!(
                "Esperada uma lista de transações, recebido: {}",
                other
            )))
        }
    };

    let total = entries.len();
    let decoded: Vec<EnhancedTransaction> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!(index, error = %e, "transação em formato inesperado ignorada");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!(total, decoded = decoded.len(), "página decodificada parcialmente");
    }
    Ok(decoded)
}
