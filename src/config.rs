use std::path::Path;
use std::str::FromStr;

use chrono::Datelike;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppResult, ConfigError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "claim_inventory.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 分类服务地址
    pub base_url: String,
    /// 已索赔物品的本地存储文件（对应浏览器的 localStorage）
    pub claim_store_path: String,
    /// 索赔报告输出文件，为空时输出到标准输出
    pub report_path: Option<String>,
    /// 报告中物品链接的前缀
    pub link_base: String,
    /// 报告中的购买年份
    pub claim_year: i32,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 服务端处理中时的轮询间隔（秒）
    pub poll_interval_secs: u64,
    /// 最大轮询次数
    pub poll_max_attempts: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5003".to_string(),
            claim_store_path: "claimed_items.json".to_string(),
            report_path: None,
            link_base: "https://example.com".to_string(),
            claim_year: chrono::Local::now().year(),
            request_timeout_secs: 60,
            poll_interval_secs: 5,
            poll_max_attempts: 60,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（可选）→ 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            info!("📄 读取配置文件: {}", path);
            Self::from_file(&path)?
        } else {
            debug!("配置文件 {} 不存在，使用默认配置", path);
            Self::default()
        };
        base.with_env_overrides()
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    /// 用环境变量覆盖
    pub fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            base_url: std::env::var("BASE_URL").unwrap_or(self.base_url),
            claim_store_path: std::env::var("CLAIM_STORE_PATH").unwrap_or(self.claim_store_path),
            report_path: std::env::var("REPORT_PATH").ok().or(self.report_path),
            link_base: std::env::var("LINK_BASE").unwrap_or(self.link_base),
            claim_year: env_parse("CLAIM_YEAR", self.claim_year)?,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", self.request_timeout_secs)?,
            poll_interval_secs: env_parse("POLL_INTERVAL_SECS", self.poll_interval_secs)?,
            poll_max_attempts: env_parse("POLL_MAX_ATTEMPTS", self.poll_max_attempts)?,
            verbose_logging: env_parse("VERBOSE_LOGGING", self.verbose_logging)?,
        })
    }

    /// 去掉末尾斜杠的服务地址
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn env_parse<T: FromStr>(var_name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: std::any::type_name::<T>().to_string(),
        }),
        Err(_) => Ok(default),
    }
}
