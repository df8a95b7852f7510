//! 服务注册器抽象接口

use crate::container::ServiceCollection;
use infrastructure_common::{DependencyError, Lifetime, TypeRef};

/// 服务注册器 trait
///
/// 将生命周期映射到服务集合的注册原语并调用它。
pub trait ServiceRegistrar: Send + Sync {
    /// 注册服务
    ///
    /// 生命周期没有对应的注册原语时返回 [`DependencyError::UnsupportedLifetime`]。
    fn register(
        &self,
        services: &mut dyn ServiceCollection,
        lifetime: Lifetime,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
    ) -> Result<(), DependencyError>;

    /// 是否支持指定的生命周期
    fn supports(&self, lifetime: Lifetime) -> bool;
}
