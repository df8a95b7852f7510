//! 错误类型定义

use crate::lifecycle::Lifetime;
use crate::metadata::TypeDescriptor;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {source}")]
    ValidationFailed {
        #[from]
        source: ValidationError,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("没有可用于生命周期 {lifetime} 的注册器")]
    UnsupportedLifetime { lifetime: Lifetime },
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("类型加载失败: {type_name}, 原因: {message}")]
    TypeLoadFailed { type_name: String, message: String },
}

impl ComponentError {
    /// 创建类型加载错误
    pub fn type_load_failed(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeLoadFailed {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 模块类型枚举的部分失败
///
/// `loaded` 保存成功加载的类型，`failures` 中每一项对应一个被丢弃的类型。
#[derive(Error, Debug)]
#[error("{} 个类型加载失败", .failures.len())]
pub struct TypeLoadError {
    /// 成功加载的类型
    pub loaded: Vec<TypeDescriptor>,
    /// 加载失败的类型
    pub failures: Vec<ComponentError>,
}

impl TypeLoadError {
    /// 创建新的部分加载错误
    pub fn new(loaded: Vec<TypeDescriptor>, failures: Vec<ComponentError>) -> Self {
        Self { loaded, failures }
    }
}

/// 验证错误类型
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("字段值超出范围: {field_name}, 值: {value}, 范围: {range}")]
    ValueOutOfRange {
        field_name: String,
        value: String,
        range: String,
    },
}

impl ValidationError {
    /// 创建值超出范围错误
    pub fn value_out_of_range(
        field_name: impl Into<String>,
        value: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        Self::ValueOutOfRange {
            field_name: field_name.into(),
            value: value.into(),
            range: range.into(),
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 验证结果类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;
