//! 约定规范定义
//!
//! 提供契约分类的约定：哪些契约属于资源释放契约，哪些契约表示托管服务

use crate::metadata::TypeRef;

/// 资源释放相关契约，永远不会作为注册目标
pub const DISPOSAL_CONTRACTS: &[&str] = &["Drop", "AsyncDrop"];

/// 托管服务契约，实现它们的类型只按自身类型注册
pub const HOSTED_SERVICE_CONTRACTS: &[&str] = &["HostedService", "BackgroundService"];

/// 托管服务标记 trait
///
/// 由运行时管理启动与停止的长期运行单元。
pub trait HostedService: Send + Sync + 'static {}

/// 后台服务标记 trait
pub trait BackgroundService: Send + Sync + 'static {}

/// 契约约定规范
#[derive(Debug)]
pub struct ContractConventions;

impl ContractConventions {
    /// 是否为资源释放契约
    pub fn is_disposal(contract: &TypeRef) -> bool {
        DISPOSAL_CONTRACTS.contains(&contract.short_name())
    }

    /// 是否为托管服务契约
    pub fn is_hosted_service(contract: &TypeRef) -> bool {
        HOSTED_SERVICE_CONTRACTS.contains(&contract.short_name())
    }
}
