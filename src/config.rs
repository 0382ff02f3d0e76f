use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 环境变量：覆盖服务基础地址
pub const ENV_BASE_URL: &str = "BASE_URL";
/// 环境变量：覆盖请求超时（秒）
pub const ENV_WAIT_SECONDS: &str = "WAIT_SECONDS";

/// 控制台配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Products 服务配置
    pub api: ApiConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 终端界面配置
    pub console: ConsoleConfig,
}

/// Products 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 服务基础地址，例如 http://localhost:8080
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志文件目录，未设置时不写文件
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 终端界面配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// 交互提示符
    pub prompt: String,
    /// 每个动作后是否打印表单
    pub echo_form: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            file_prefix: "product-console".to_string(),
            console_output: true,
            level: "warn".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "products> ".to_string(),
            echo_form: true,
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("{}: {}", path.as_ref().display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::FileWrite(format!("{}: {}", path.as_ref().display(), e)))
    }

    /// 用环境变量覆盖配置
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_WAIT_SECONDS).ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        wait_seconds: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }

        if let Some(seconds) = wait_seconds {
            self.api.timeout_seconds = seconds.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("{} 不是有效的秒数: {}", ENV_WAIT_SECONDS, seconds))
            })?;
        }

        Ok(())
    }

    /// 用命令行参数覆盖配置，优先级高于配置文件与环境变量
    pub fn apply_cli_overrides(&mut self, base_url: Option<&str>, level: Option<&str>) {
        if let Some(url) = base_url {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(level) = level {
            self.logging.level = level.to_ascii_lowercase();
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证服务配置
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation("服务地址不能为空".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "服务地址必须以 http:// 或 https:// 开头: {}",
                base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时必须大于0".to_string()));
        }

        // 验证界面配置
        if self.console.prompt.is_empty() {
            return Err(ConfigError::Validation("提示符不能为空".to_string()));
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 加载配置：显式路径优先，其次默认位置，最后使用默认值；随后应用环境变量
///
/// 不做验证，调用方在应用完命令行参数后再调用 [`Config::validate`]。
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match explicit {
        Some(path) => {
            info!("从配置文件加载: {}", path.display());
            Config::load_from_file(path)?
        }
        None => find_config_file()
            .map(|path| {
                info!("从配置文件加载: {}", path.display());
                Config::load_from_file(&path)
            })
            .transpose()?
            .unwrap_or_else(|| {
                warn!("未找到配置文件，使用默认配置");
                Config::default()
            }),
    };

    config.apply_env()?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    ["config.toml", "./config/config.toml"]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}
