use sandscan_core::{error::Result, Error};
use sandscan_detector::{DetectionOptions, OverlapPolicy};
use sandscan_rpc::HeliusConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Variável com o caminho alternativo do arquivo de configuração
pub const CONFIG_PATH_VAR: &str = "SANDSCAN_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_PORT: u16 = 5000;

/// Pastas do front-end servidas pelo backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrontendConfig {
    pub static_folder: PathBuf,
    pub template_folder: PathBuf,
}

/// Bloco `detection` do config.json
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    pub dex_only: bool,
    pub include_unknown_direction: bool,
    pub max_bracket_seconds: Option<f64>,
    pub overlap_policy: OverlapPolicy,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            dex_only: true,
            include_unknown_direction: false,
            max_bracket_seconds: Some(30.0),
            overlap_policy: OverlapPolicy::TightestBracket,
        }
    }
}

impl From<DetectionSettings> for DetectionOptions {
    fn from(s: DetectionSettings) -> Self {
        DetectionOptions::default()
            .dex_only(s.dex_only)
            .include_unknown_direction(s.include_unknown_direction)
            .max_bracket_seconds(s.max_bracket_seconds)
            .overlap_policy(s.overlap_policy)
    }
}

/// Conteúdo do config.json
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileConfig {
    pub default_lookback_limit: usize,
    pub max_lookback_limit: usize,
    pub dex_programs: Vec<String>,
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub detection: DetectionSettings,
}

impl FileConfig {
    /// Lê e valida o arquivo de configuração.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::ConfigError(format!("Falha ao ler {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = decode_text(bytes)?;
        let config: FileConfig = serde_json::from_str(&text)
            .map_err(|e| Error::ConfigError(format!("config.json inválido: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_lookback_limit == 0 || self.max_lookback_limit == 0 {
            return Err(Error::ConfigError("limites de lookback devem ser maiores que zero".into()));
        }
        if self.default_lookback_limit > self.max_lookback_limit {
            return Err(Error::ConfigError(
                "default_lookback_limit não pode ser maior que max_lookback_limit".into(),
            ));
        }
        if self.dex_programs.is_empty() || self.dex_programs.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::ConfigError("dex_programs deve ser uma lista de program ids".into()));
        }
        DetectionOptions::from(self.detection)
            .validate()
            .map_err(|e| Error::ConfigError(format!("bloco detection inválido: {}", e)))
    }
}

/// Configuração completa do serviço: arquivo + ambiente
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub file: FileConfig,
    pub helius_api_key: String,
    pub helius_base_url: Option<String>,
    pub port: u16,
}

impl AppConfig {
    /// Carrega `.env`, o config.json e as variáveis de ambiente.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file = FileConfig::from_path(&path)?;
        Self::from_parts(file, |name| std::env::var(name).ok())
    }

    /// Monta a configuração a partir de um leitor de variáveis.
    pub fn from_parts<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let helius_api_key = env("HELIUS_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::ConfigError("HELIUS_API_KEY não definida".into()))?;

        let port = match env("BACKEND_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::ConfigError(format!("BACKEND_PORT inválida: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            file,
            helius_api_key,
            helius_base_url: env("HELIUS_BASE_URL").filter(|u| !u.trim().is_empty()),
            port,
        })
    }

    pub fn detection_options(&self) -> DetectionOptions {
        self.file.detection.into()
    }

    pub fn helius_config(&self) -> HeliusConfig {
        let mut config = HeliusConfig::new(self.helius_api_key.clone());
        if let Some(url) = &self.helius_base_url {
            config.base_url = url.clone();
        }
        config
    }
}

/// UTF-8 (com ou sem BOM), com fallback para UTF-16 quando há BOM UTF-16.
fn decode_text(bytes: &[u8]) -> Result<String> {
    let utf8 = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(utf8) {
        return Ok(text.to_string());
    }

    let (body, little_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, true),
        [0xFE, 0xFF, rest @ ..] => (rest, false),
        _ => return Err(Error::ConfigError("config.json não está em UTF-8 nem UTF-16".into())),
    };
    if body.len() % 2 != 0 {
        return Err(Error::ConfigError("config.json UTF-16 truncado".into()));
    }

    let units = body.chunks_exact(2).map(|pair| {
        if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::ConfigError(format!("config.json UTF-16 inválido: {}", e)))
}
