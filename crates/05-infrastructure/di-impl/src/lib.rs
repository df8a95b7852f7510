//! # 依赖注入具体实现
//!
//! 提供具体的服务集合与按生命周期分派的服务注册器实现

use di_abstractions::{ServiceCollection, ServiceDescriptor, ServiceRegistrar};
use infrastructure_common::{DependencyError, Lifetime, TypeRef};
use std::collections::HashMap;
use tracing::debug;

/// 具体的服务集合实现
///
/// 按注册顺序记录服务描述符，不负责解析服务。
#[derive(Debug, Clone, Default)]
pub struct ServiceCollectionImpl {
    /// 已注册的服务描述符
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollectionImpl {
    /// 创建新的服务集合
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    fn add(&mut self, service_type: TypeRef, implementation_type: TypeRef, lifetime: Lifetime) {
        debug!(
            "添加服务描述符: {} -> {} ({})",
            service_type, implementation_type, lifetime
        );
        self.descriptors.push(ServiceDescriptor::new(
            service_type,
            implementation_type,
            lifetime,
        ));
    }

    /// 获取所有服务描述符
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// 已注册的服务数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否没有任何注册
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 检查服务类型是否已注册
    pub fn is_registered(&self, service_type: &TypeRef) -> bool {
        self.descriptors
            .iter()
            .any(|descriptor| &descriptor.service_type == service_type)
    }

    /// 查找指定服务与实现的注册
    pub fn find(
        &self,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
    ) -> Option<&ServiceDescriptor> {
        self.descriptors.iter().find(|descriptor| {
            &descriptor.service_type == service_type
                && &descriptor.implementation_type == implementation_type
        })
    }

    /// 获取某个实现类型的所有注册
    pub fn registrations_for(&self, implementation_type: &TypeRef) -> Vec<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| &descriptor.implementation_type == implementation_type)
            .collect()
    }
}

impl ServiceCollection for ServiceCollectionImpl {
    fn add_singleton(&mut self, service_type: TypeRef, implementation_type: TypeRef) {
        self.add(service_type, implementation_type, Lifetime::Singleton);
    }

    fn add_scoped(&mut self, service_type: TypeRef, implementation_type: TypeRef) {
        self.add(service_type, implementation_type, Lifetime::Scoped);
    }

    fn add_transient(&mut self, service_type: TypeRef, implementation_type: TypeRef) {
        self.add(service_type, implementation_type, Lifetime::Transient);
    }
}

/// 注册原语函数类型
type RegisterFn = fn(&mut dyn ServiceCollection, TypeRef, TypeRef);

fn add_singleton(services: &mut dyn ServiceCollection, service: TypeRef, implementation: TypeRef) {
    services.add_singleton(service, implementation);
}

fn add_scoped(services: &mut dyn ServiceCollection, service: TypeRef, implementation: TypeRef) {
    services.add_scoped(service, implementation);
}

fn add_transient(services: &mut dyn ServiceCollection, service: TypeRef, implementation: TypeRef) {
    services.add_transient(service, implementation);
}

/// 默认服务注册器
///
/// 持有生命周期到注册原语的映射表，表中没有的生命周期视为配置错误。
#[derive(Debug, Clone)]
pub struct DefaultServiceRegistrar {
    registrars: HashMap<Lifetime, RegisterFn>,
}

impl DefaultServiceRegistrar {
    /// 创建支持全部生命周期的注册器
    pub fn new() -> Self {
        Self::with_lifetimes(&Lifetime::ALL)
    }

    /// 创建只支持指定生命周期的注册器
    ///
    /// 用于只实现了部分生命周期的容器。
    pub fn with_lifetimes(lifetimes: &[Lifetime]) -> Self {
        let registrars = lifetimes
            .iter()
            .map(|&lifetime| (lifetime, Self::primitive_for(lifetime)))
            .collect();
        Self { registrars }
    }

    fn primitive_for(lifetime: Lifetime) -> RegisterFn {
        match lifetime {
            Lifetime::Singleton => add_singleton as RegisterFn,
            Lifetime::Scoped => add_scoped as RegisterFn,
            Lifetime::Transient => add_transient as RegisterFn,
        }
    }
}

impl Default for DefaultServiceRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistrar for DefaultServiceRegistrar {
    fn register(
        &self,
        services: &mut dyn ServiceCollection,
        lifetime: Lifetime,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
    ) -> Result<(), DependencyError> {
        let action = self
            .registrars
            .get(&lifetime)
            .ok_or(DependencyError::UnsupportedLifetime { lifetime })?;
        action(services, service_type.clone(), implementation_type.clone());
        Ok(())
    }

    fn supports(&self, lifetime: Lifetime) -> bool {
        self.registrars.contains_key(&lifetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrar_maps_each_lifetime_to_its_primitive() {
        let registrar = DefaultServiceRegistrar::new();
        let mut services = ServiceCollectionImpl::new();
        let service = TypeRef::new("app::Clock");
        let implementation = TypeRef::new("app::SystemClock");

        for lifetime in Lifetime::ALL {
            registrar
                .register(&mut services, lifetime, &service, &implementation)
                .unwrap();
        }

        let lifetimes: Vec<_> = services.descriptors().iter().map(|d| d.lifetime).collect();
        assert_eq!(lifetimes, Lifetime::ALL.to_vec());
    }

    #[test]
    fn test_missing_lifetime_is_rejected() {
        let registrar = DefaultServiceRegistrar::with_lifetimes(&[Lifetime::Singleton]);
        let mut services = ServiceCollectionImpl::new();

        let result = registrar.register(
            &mut services,
            Lifetime::Scoped,
            &TypeRef::new("app::Clock"),
            &TypeRef::new("app::SystemClock"),
        );

        assert!(matches!(
            result,
            Err(DependencyError::UnsupportedLifetime {
                lifetime: Lifetime::Scoped
            })
        ));
        assert!(services.is_empty());
        assert!(registrar.supports(Lifetime::Singleton));
        assert!(!registrar.supports(Lifetime::Transient));
    }
}
