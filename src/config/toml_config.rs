use crate::core::{ConfigProvider, RegistryKind};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub market: MarketSection,
    #[serde(default)]
    pub registries: RegistriesConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    pub name: String,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            name: "bookmarket".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistriesConfig {
    /// "memory" or "http"
    pub kind: String,
    pub book_endpoint: Option<String>,
    pub user_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            kind: "memory".to_string(),
            book_endpoint: None,
            user_endpoint: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub books: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub listings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    pub level: Option<String>,
}

/// Config path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "market.toml";

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const SEED_EXTENSIONS: [&str; 2] = ["csv", "tsv"];

impl MarketConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MarketError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the config named on the command line. Only the default path may
    /// be absent, in which case `None` is returned and defaults apply.
    pub fn load_for_cli(path: &str) -> Result<Option<Self>> {
        if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MarketError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOK_REGISTRY_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MarketError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn parse_kind(&self) -> Result<RegistryKind> {
        match self.registries.kind.as_str() {
            "memory" => Ok(RegistryKind::Memory),
            "http" => Ok(RegistryKind::Http),
            other => Err(MarketError::InvalidConfigValueError {
                field: "registries.kind".to_string(),
                value: other.to_string(),
                reason: "Valid kinds: memory, http".to_string(),
            }),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("market.name", &self.market.name)?;

        if self.parse_kind()? == RegistryKind::Http {
            let book = validation::validate_required_field(
                "registries.book_endpoint",
                &self.registries.book_endpoint,
            )?;
            validation::validate_url("registries.book_endpoint", book)?;

            let user = validation::validate_required_field(
                "registries.user_endpoint",
                &self.registries.user_endpoint,
            )?;
            validation::validate_url("registries.user_endpoint", user)?;
        }

        if let Some(timeout) = self.registries.timeout_seconds {
            validation::validate_positive_number("registries.timeout_seconds", timeout, 1)?;
        }

        for (field, files) in [
            ("seed.books", &self.seed.books),
            ("seed.users", &self.seed.users),
            ("seed.listings", &self.seed.listings),
        ] {
            for file in files {
                validation::validate_path(field, file)?;
            }
            validation::validate_file_extensions(field, files, &SEED_EXTENSIONS)?;
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for MarketConfig {
    fn registry_kind(&self) -> RegistryKind {
        // validate() 已檢查過
        self.parse_kind().unwrap_or(RegistryKind::Memory)
    }

    fn book_endpoint(&self) -> Option<&str> {
        self.registries.book_endpoint.as_deref()
    }

    fn user_endpoint(&self) -> Option<&str> {
        self.registries.user_endpoint.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.registries
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn seed_books(&self) -> &[String] {
        &self.seed.books
    }

    fn seed_users(&self) -> &[String] {
        &self.seed.users
    }

    fn seed_listings(&self) -> &[String] {
        &self.seed.listings
    }
}

impl Validate for MarketConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
