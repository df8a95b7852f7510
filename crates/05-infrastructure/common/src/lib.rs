//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn ADSP 平台服务注册基础设施的公共类型。
//!
//! ## 核心类型
//!
//! - [`TypeRef`] - 类型引用（含泛型形态）
//! - [`TypeDescriptor`] - 类型目录中的类型描述符
//! - [`RegistrationMarker`] / [`TargetingMarker`] - 声明式注册标记
//! - [`Lifetime`] - 组件生命周期
//! - [`ContractConventions`] - 契约分类约定
//!
//! ## 设计原则
//!
//! - 标记即数据：注册宏只负责把标记写入类型事实表
//! - 约定优于配置

pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
