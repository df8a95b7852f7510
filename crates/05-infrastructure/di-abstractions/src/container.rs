//! 服务集合抽象接口
//!
//! 容器只暴露三个注册原语，分别对应三种生命周期

use infrastructure_common::{Lifetime, TypeRef};

/// 服务集合 trait
///
/// 约定式注册只调用这三个原语，不关心容器如何解析服务。
pub trait ServiceCollection {
    /// 注册单例服务
    fn add_singleton(&mut self, service_type: TypeRef, implementation_type: TypeRef);

    /// 注册作用域服务
    fn add_scoped(&mut self, service_type: TypeRef, implementation_type: TypeRef);

    /// 注册瞬时服务
    fn add_transient(&mut self, service_type: TypeRef, implementation_type: TypeRef);
}

/// 服务描述符
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceDescriptor {
    /// 服务（契约）类型
    pub service_type: TypeRef,
    /// 实现类型
    pub implementation_type: TypeRef,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// 创建新的服务描述符
    pub fn new(service_type: TypeRef, implementation_type: TypeRef, lifetime: Lifetime) -> Self {
        Self {
            service_type,
            implementation_type,
            lifetime,
        }
    }

    /// 是否按实现类型自身注册
    pub fn is_self_registration(&self) -> bool {
        self.service_type == self.implementation_type
    }
}
