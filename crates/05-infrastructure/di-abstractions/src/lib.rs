//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义约定式服务注册所依赖的协作者接口。
//!
//! ## 核心接口
//!
//! - [`ServiceCollection`] - 服务集合（容器注册原语）
//! - [`ServiceRegistrar`] - 按生命周期分派注册的注册器
//! - [`Module`] / [`ModuleProvider`] - 模块与类型目录能力
//! - [`RegistrationDiagnostics`] - 注册诊断日志接口

pub mod container;
pub mod diagnostics;
pub mod registry;
pub mod scanner;

pub use container::*;
pub use diagnostics::*;
pub use registry::*;
pub use scanner::*;
