//! # 约定式服务注册
//!
//! 扫描进程中已加载的模块，找出带有 `#[register]` 标记的实现类型，
//! 按约定决定注册形态并注册到服务集合。
//!
//! ## 组成
//!
//! - [`ModuleFilter`] - 选出参与扫描的模块
//! - [`TypeCatalogCache`] - 按模块缓存类型目录，容忍部分加载失败
//! - [`ContractUsageCounter`] - 泛型契约使用计数，用于识别特殊契约
//! - [`is_targeted`] - 目标服务判定
//! - [`RegistrationStrategySelector`] - 注册形态选择
//! - [`LoggingRegistrar`] - 执行注册并记录注册日志
//! - [`AttributedServiceScanner`] - 串联以上步骤的扫描器
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use di_impl::ServiceCollectionImpl;
//! use di_scanning::{RegistrationOptions, ServiceCollectionExt, TracingDiagnostics};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = RegistrationOptions::load()?;
//!     let mut services = ServiceCollectionImpl::new();
//!
//!     services.register_all_attributed_services(
//!         "ad-engine",
//!         &TracingDiagnostics::new(),
//!         &options,
//!         None,
//!     )?;
//!
//!     println!("已注册 {} 个服务", services.len());
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod component_scanner;
pub mod diagnostics;
pub mod module_filter;
pub mod modules;
pub mod options;
pub mod registrar;
pub mod strategy;
pub mod targeting;
pub mod type_cache;
pub mod usage_counter;

#[cfg(test)]
mod tests;

// 重新导出主要类型
pub use bootstrapper::{register_attributed_services, RegistrationBootstrapper};
pub use component_scanner::{AttributedServiceScanner, ScanReport, ServiceCollectionExt};
pub use diagnostics::TracingDiagnostics;
pub use module_filter::ModuleFilter;
pub use modules::{FactModule, LiveModuleProvider, StaticModule, StaticModuleProvider};
pub use options::RegistrationOptions;
pub use registrar::LoggingRegistrar;
pub use strategy::{
    resolve_for, RegistrationDecision, RegistrationPlan, RegistrationShape,
    RegistrationStrategySelector,
};
pub use targeting::is_targeted;
pub use type_cache::{CatalogCompleteness, CatalogEntry, TypeCatalogCache};
pub use usage_counter::ContractUsageCounter;

// 重新导出错误类型
pub use infrastructure_common::{DependencyError, InfrastructureError};
