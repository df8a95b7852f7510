//! 约定式注册选项

use infrastructure_common::{ConfigError, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

/// 默认配置文件（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/registration";

/// 环境变量前缀，例如 `ADSP__REGISTRATION__SPECIAL_INTERFACE_THRESHOLD=5`
pub const ENV_PREFIX: &str = "ADSP";

/// 约定式注册选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationOptions {
    /// 泛型契约被多少个实现使用后视为特殊契约
    pub special_interface_threshold: usize,
    /// 不参与扫描的模块名称前缀（不区分大小写）
    pub excluded_module_prefixes: Vec<String>,
    /// 类型目录缓存容量（每个模块占用 1 个单位）
    pub cache_capacity: u64,
    /// 类型目录缓存的滑动过期时间（秒）
    pub cache_entry_expiration_seconds: u64,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            special_interface_threshold: 3,
            excluded_module_prefixes: ["std", "core", "alloc", "proc_macro"]
                .into_iter()
                .map(String::from)
                .collect(),
            cache_capacity: 1024,
            cache_entry_expiration_seconds: 3600,
        }
    }
}

impl RegistrationOptions {
    /// 配置节名称
    pub const SECTION: &'static str = "registration";

    /// 从默认配置文件与环境变量加载选项
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// 从指定配置文件与环境变量加载选项
    ///
    /// 配置文件不存在时使用默认值；配置节缺失的字段同样回落到默认值。
    pub fn load_from(config_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.as_ref();
        debug!("加载注册选项: {}", config_file.display());

        let settings = config::Config::builder()
            .add_source(config::File::from(config_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("registration.excluded_module_prefixes")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                error!("配置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let options = match settings.get::<RegistrationOptions>(Self::SECTION) {
            Ok(options) => options,
            Err(config::ConfigError::NotFound(_)) => {
                debug!("未找到配置节 {}，使用默认注册选项", Self::SECTION);
                RegistrationOptions::default()
            }
            Err(e) => {
                error!("配置绑定失败: path={}, error={}", Self::SECTION, e);
                return Err(ConfigError::ParseError {
                    source: Box::new(e),
                });
            }
        };

        options.validate()?;
        Ok(options)
    }

    /// 验证选项
    pub fn validate(&self) -> ValidationResult<()> {
        let positive = [
            (
                "special_interface_threshold",
                self.special_interface_threshold as u64,
            ),
            ("cache_capacity", self.cache_capacity),
            (
                "cache_entry_expiration_seconds",
                self.cache_entry_expiration_seconds,
            ),
        ];
        for (field_name, value) in positive {
            if value == 0 {
                return Err(ValidationError::value_out_of_range(
                    field_name,
                    value.to_string(),
                    ">= 1",
                ));
            }
        }
        Ok(())
    }

    /// 缓存滑动过期时间
    pub fn cache_entry_expiration(&self) -> Duration {
        Duration::from_secs(self.cache_entry_expiration_seconds)
    }
}
