//! 模块提供者实现
//!
//! - [`LiveModuleProvider`] 从注册宏写入的类型事实表聚合模块（每个 crate 一个模块）
//! - [`StaticModuleProvider`] 持有预先构造的模块，用于生成的目录或测试

use di_abstractions::{Module, ModuleProvider};
use infrastructure_common::{
    registered_type_facts, ComponentError, RegistrationMarker, TargetingMarker, TypeDescriptor,
    TypeFact, TypeFactRecord, TypeLoadError, TypeRef,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 静态模块
///
/// 类型目录在构造时给定，可以附带加载失败的类型来模拟部分加载。
#[derive(Debug, Clone, Default)]
pub struct StaticModule {
    name: Option<String>,
    dynamic: bool,
    types: Vec<TypeDescriptor>,
    load_failures: Vec<(String, String)>,
}

impl StaticModule {
    /// 创建具名的静态模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 创建无法解析名称的模块
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// 标记为动态生成的模块
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    /// 添加类型
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// 添加一个加载失败的类型
    pub fn with_load_failure(
        mut self,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.load_failures.push((type_name.into(), message.into()));
        self
    }
}

impl Module for StaticModule {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    fn defined_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError> {
        if self.load_failures.is_empty() {
            return Ok(self.types.clone());
        }
        let failures = self
            .load_failures
            .iter()
            .map(|(type_name, message)| ComponentError::type_load_failed(type_name, message))
            .collect();
        Err(TypeLoadError::new(self.types.clone(), failures))
    }
}

/// 静态模块提供者
#[derive(Debug, Clone, Default)]
pub struct StaticModuleProvider {
    modules: Vec<Arc<dyn Module>>,
}

impl StaticModuleProvider {
    /// 创建空的提供者
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加模块
    pub fn with_module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Arc::new(module));
        self
    }
}

impl From<Vec<Arc<dyn Module>>> for StaticModuleProvider {
    fn from(modules: Vec<Arc<dyn Module>>) -> Self {
        Self { modules }
    }
}

impl ModuleProvider for StaticModuleProvider {
    fn modules(&self) -> Vec<Arc<dyn Module>> {
        self.modules.clone()
    }
}

/// 由类型事实聚合出的模块
#[derive(Debug, Clone)]
pub struct FactModule {
    name: String,
    records: Vec<TypeFactRecord>,
}

impl FactModule {
    /// 由同一 crate 的事实记录创建模块
    pub fn new(name: impl Into<String>, records: Vec<TypeFactRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    fn build_descriptor(
        type_ref: &TypeRef,
        records: &[&TypeFactRecord],
    ) -> Result<TypeDescriptor, ComponentError> {
        let mut descriptor = TypeDescriptor::concrete(type_ref.clone())
            .with_module_path(records.first().map_or("", |record| record.module_path));

        for record in records {
            match &record.fact {
                TypeFact::Registration(marker) => {
                    if descriptor.registration.is_some() {
                        return Err(duplicate_marker(type_ref, RegistrationMarker::NAME));
                    }
                    descriptor.registration = Some(marker.clone());
                }
                TypeFact::Targeting(marker) => {
                    if descriptor.targeting.is_some() {
                        return Err(duplicate_marker(type_ref, TargetingMarker::NAME));
                    }
                    descriptor.targeting = Some(marker.clone());
                }
                TypeFact::Contract(contract) => {
                    if !descriptor.contracts.contains(contract) {
                        descriptor.contracts.push(contract.clone());
                    }
                }
            }
        }
        Ok(descriptor)
    }
}

fn duplicate_marker(type_ref: &TypeRef, marker: &str) -> ComponentError {
    ComponentError::type_load_failed(
        type_ref.name(),
        format!("重复的 #[{}] 标记", marker),
    )
}

impl Module for FactModule {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn defined_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError> {
        // 按类型首次出现的顺序分组
        let mut order: Vec<&TypeRef> = Vec::new();
        let mut grouped: HashMap<&TypeRef, Vec<&TypeFactRecord>> = HashMap::new();
        for record in &self.records {
            let entry = grouped.entry(&record.type_ref).or_default();
            if entry.is_empty() {
                order.push(&record.type_ref);
            }
            entry.push(record);
        }

        let mut loaded = Vec::with_capacity(order.len());
        let mut failures = Vec::new();
        for type_ref in order {
            match Self::build_descriptor(type_ref, &grouped[type_ref]) {
                Ok(descriptor) => loaded.push(descriptor),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.is_empty() {
            Ok(loaded)
        } else {
            Err(TypeLoadError::new(loaded, failures))
        }
    }
}

/// 实时模块提供者
///
/// 每次调用都从进程级类型事实表重新聚合，事实按 crate 分组。
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveModuleProvider;

impl LiveModuleProvider {
    /// 创建实时模块提供者
    pub fn new() -> Self {
        Self
    }
}

impl ModuleProvider for LiveModuleProvider {
    fn modules(&self) -> Vec<Arc<dyn Module>> {
        let mut order: Vec<&'static str> = Vec::new();
        let mut grouped: HashMap<&'static str, Vec<TypeFactRecord>> = HashMap::new();
        for record in registered_type_facts() {
            let module_name = record.module_name();
            let entry = grouped.entry(module_name).or_default();
            if entry.is_empty() {
                order.push(module_name);
            }
            entry.push(record);
        }

        debug!("实时模块提供者发现 {} 个模块", order.len());
        order
            .into_iter()
            .filter_map(|name| {
                grouped
                    .remove(name)
                    .map(|records| Arc::new(FactModule::new(name, records)) as Arc<dyn Module>)
            })
            .collect()
    }
}
