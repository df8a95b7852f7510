//! 约定式服务扫描与注册
//!
//! 一次扫描按固定顺序同步执行：
//!
//! 1. 过滤参与扫描的模块
//! 2. 对所有模块完成泛型契约计数
//! 3. 逐个模块、逐个实现候选地判定目标服务、选择注册形态并注册
//!
//! 第 3 步开始前计数必须全部完成，因为模块 A 的注册决策可能依赖模块 B 贡献的计数。

use crate::module_filter::ModuleFilter;
use crate::modules::LiveModuleProvider;
use crate::options::RegistrationOptions;
use crate::registrar::LoggingRegistrar;
use crate::strategy::{RegistrationDecision, RegistrationStrategySelector};
use crate::targeting::is_targeted;
use crate::type_cache::{CatalogCompleteness, TypeCatalogCache};
use crate::usage_counter::ContractUsageCounter;
use di_abstractions::{ModuleProvider, RegistrationDiagnostics, ServiceCollection, ServiceRegistrar};
use di_impl::DefaultServiceRegistrar;
use infrastructure_common::{DependencyError, TypeRef};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// 一次扫描的结果摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// 参与扫描的模块数量
    pub modules_scanned: usize,
    /// 目录不完整的模块数量
    pub partial_modules: usize,
    /// 遇到的实现候选数量
    pub candidates: usize,
    /// 因目标服务不匹配而跳过的候选数量
    pub untargeted: usize,
    /// 按执行顺序排列的注册决策
    pub registrations: Vec<RegistrationDecision>,
}

impl ScanReport {
    /// 执行的注册数量
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// 是否包含指定的注册
    pub fn contains(&self, service_type: &TypeRef, implementation_type: &TypeRef) -> bool {
        self.registrations.iter().any(|decision| {
            &decision.service_type == service_type
                && &decision.implementation_type == implementation_type
        })
    }
}

/// 约定式服务扫描器
///
/// 持有类型目录缓存与契约计数器。`register_all` 需要 `&mut self`，
/// 同一个扫描器同一时间只能执行一次扫描；不同扫描器的状态互相独立。
#[derive(Debug)]
pub struct AttributedServiceScanner {
    options: RegistrationOptions,
    filter: ModuleFilter,
    cache: TypeCatalogCache,
    counter: ContractUsageCounter,
    selector: RegistrationStrategySelector,
    registrar: LoggingRegistrar,
}

impl AttributedServiceScanner {
    /// 使用默认注册器创建扫描器
    pub fn new(options: RegistrationOptions) -> Self {
        Self::with_registrar(options, Arc::new(DefaultServiceRegistrar::new()))
    }

    /// 使用指定的注册器创建扫描器
    pub fn with_registrar(options: RegistrationOptions, registrar: Arc<dyn ServiceRegistrar>) -> Self {
        Self {
            filter: ModuleFilter::new(&options.excluded_module_prefixes),
            cache: TypeCatalogCache::new(options.cache_capacity, options.cache_entry_expiration()),
            counter: ContractUsageCounter::new(),
            selector: RegistrationStrategySelector::new(options.special_interface_threshold),
            registrar: LoggingRegistrar::new(registrar),
            options,
        }
    }

    /// 注册选项
    pub fn options(&self) -> &RegistrationOptions {
        &self.options
    }

    /// 类型目录缓存
    pub fn cache(&self) -> &TypeCatalogCache {
        &self.cache
    }

    /// 最近一次扫描的契约计数
    pub fn usage_counter(&self) -> &ContractUsageCounter {
        &self.counter
    }

    /// 扫描模块并注册所有带注册标记的服务
    ///
    /// 类型加载失败只会被记录，不会中断扫描；不支持的生命周期会立即中止扫描。
    pub fn register_all(
        &mut self,
        services: &mut dyn ServiceCollection,
        current_service_name: &str,
        diagnostics: &dyn RegistrationDiagnostics,
        module_provider: &dyn ModuleProvider,
    ) -> Result<ScanReport, DependencyError> {
        info!("开始约定式服务注册: service={}", current_service_name);

        let modules = self.filter.filter(module_provider.modules());
        let mut report = ScanReport {
            modules_scanned: modules.len(),
            ..ScanReport::default()
        };

        // 计数必须在任何注册决策之前对所有模块完成
        self.counter.reset();
        let mut catalogs = Vec::with_capacity(modules.len());
        for module in &modules {
            let entry = self.cache.get_types(module.as_ref(), diagnostics);
            self.counter.record_all(entry.types().iter());
            if entry.completeness() == CatalogCompleteness::Partial {
                report.partial_modules += 1;
            }
            catalogs.push((
                module.name().unwrap_or_default().to_string(),
                Arc::clone(entry.types()),
            ));
        }
        debug!("契约计数完成: {} 个泛型契约", self.counter.len());

        let mut registered: HashSet<(TypeRef, TypeRef)> = HashSet::new();
        for (module_name, types) in &catalogs {
            for descriptor in types.iter().filter(|d| d.is_implementation_candidate()) {
                report.candidates += 1;

                if !is_targeted(descriptor, current_service_name) {
                    debug!(
                        "跳过非目标服务的类型: {} (module={})",
                        descriptor.type_ref, module_name
                    );
                    report.untargeted += 1;
                    continue;
                }
                let Some(marker) = &descriptor.registration else {
                    continue;
                };

                let plan = self.selector.select(descriptor, marker, &self.counter);
                debug!(
                    "注册形态: {} -> {:?} ({} 项)",
                    descriptor.type_ref,
                    plan.shape,
                    plan.decisions.len()
                );
                for decision in plan.decisions {
                    let key = (
                        decision.service_type.clone(),
                        decision.implementation_type.clone(),
                    );
                    if !registered.insert(key) {
                        debug!(
                            "跳过重复注册: {} -> {}",
                            decision.service_type, decision.implementation_type
                        );
                        continue;
                    }
                    self.registrar.register(services, &decision, diagnostics)?;
                    report.registrations.push(decision);
                }
            }
        }

        info!(
            "约定式服务注册完成: service={}, modules={}, candidates={}, registrations={}",
            current_service_name,
            report.modules_scanned,
            report.candidates,
            report.registration_count()
        );
        Ok(report)
    }
}

/// 服务集合的约定式注册扩展
pub trait ServiceCollectionExt: ServiceCollection + Sized {
    /// 扫描并注册所有带注册标记的服务
    ///
    /// 每次调用使用新的扫描器；未提供模块提供者时使用 [`LiveModuleProvider`]。
    /// 返回服务集合本身以便链式调用。
    fn register_all_attributed_services(
        &mut self,
        current_service_name: &str,
        diagnostics: &dyn RegistrationDiagnostics,
        options: &RegistrationOptions,
        module_provider: Option<&dyn ModuleProvider>,
    ) -> Result<&mut Self, DependencyError> {
        let live = LiveModuleProvider::new();
        let provider = module_provider.unwrap_or(&live);
        AttributedServiceScanner::new(options.clone()).register_all(
            &mut *self,
            current_service_name,
            diagnostics,
            provider,
        )?;
        Ok(self)
    }
}

impl<T: ServiceCollection> ServiceCollectionExt for T {}
