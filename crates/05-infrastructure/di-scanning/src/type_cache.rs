//! 类型目录缓存
//!
//! 每个模块的类型目录只枚举一次，之后在缓存有效期内复用。
//! 完整目录使用滑动过期；部分加载的目录同样占用 1 个容量单位，但不设过期时间，
//! 只会被容量淘汰。

use di_abstractions::{Module, RegistrationDiagnostics};
use infrastructure_common::TypeDescriptor;
use moka::sync::Cache;
use moka::Expiry;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 目录完整性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCompleteness {
    /// 所有类型均成功加载
    Complete,
    /// 部分类型加载失败并被丢弃
    Partial,
}

/// 缓存中的类型目录
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    types: Arc<[TypeDescriptor]>,
    completeness: CatalogCompleteness,
}

impl CatalogEntry {
    /// 目录中的类型
    pub fn types(&self) -> &Arc<[TypeDescriptor]> {
        &self.types
    }

    /// 目录完整性
    pub fn completeness(&self) -> CatalogCompleteness {
        self.completeness
    }
}

/// 按目录完整性决定过期策略
struct CatalogExpiry {
    sliding: Duration,
}

impl Expiry<String, CatalogEntry> for CatalogExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CatalogEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value.completeness {
            CatalogCompleteness::Complete => Some(self.sliding),
            CatalogCompleteness::Partial => None,
        }
    }

    fn expire_after_read(
        &self,
        _key: &String,
        value: &CatalogEntry,
        _read_at: Instant,
        duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        match value.completeness {
            CatalogCompleteness::Complete => Some(self.sliding),
            CatalogCompleteness::Partial => duration_until_expiry,
        }
    }
}

/// 类型目录缓存
#[derive(Clone)]
pub struct TypeCatalogCache {
    cache: Cache<String, CatalogEntry>,
}

impl std::fmt::Debug for TypeCatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalogCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

impl TypeCatalogCache {
    /// 创建新的类型目录缓存
    ///
    /// `capacity` 以模块为单位，`sliding_expiration` 只作用于完整目录。
    pub fn new(capacity: u64, sliding_expiration: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .weigher(|_module: &String, _entry: &CatalogEntry| -> u32 { 1 })
            .expire_after(CatalogExpiry {
                sliding: sliding_expiration,
            })
            .build();
        Self { cache }
    }

    /// 获取模块的类型目录
    ///
    /// 未命中时枚举模块类型；部分加载失败时为每个失败的类型记录一条错误，
    /// 并缓存成功加载的部分。永远不会向调用方返回错误。
    ///
    /// 返回的目录项与写入缓存的一致，即使它随后被容量淘汰。
    pub fn get_types(
        &self,
        module: &dyn Module,
        diagnostics: &dyn RegistrationDiagnostics,
    ) -> CatalogEntry {
        let Some(name) = module.name() else {
            return Self::enumerate(module, diagnostics);
        };

        if let Some(entry) = self.cache.get(name) {
            debug!("类型目录缓存命中: {}", name);
            return entry;
        }

        let entry = Self::enumerate(module, diagnostics);
        debug!(
            "缓存类型目录: module={}, types={}, completeness={:?}",
            name,
            entry.types.len(),
            entry.completeness
        );
        self.cache.insert(name.to_string(), entry.clone());
        entry
    }

    fn enumerate(module: &dyn Module, diagnostics: &dyn RegistrationDiagnostics) -> CatalogEntry {
        let module_name = module.name().unwrap_or("<unnamed>");
        match module.defined_types() {
            Ok(types) => CatalogEntry {
                types: types.into(),
                completeness: CatalogCompleteness::Complete,
            },
            Err(error) => {
                warn!(
                    "模块 {} 部分类型加载失败: {}, 保留 {} 个类型",
                    module_name,
                    error,
                    error.loaded.len()
                );
                for failure in &error.failures {
                    diagnostics.log_type_load_failure(module_name, failure);
                }
                CatalogEntry {
                    types: error.loaded.into(),
                    completeness: CatalogCompleteness::Partial,
                }
            }
        }
    }

    /// 模块目录是否已缓存
    pub fn contains(&self, module_name: &str) -> bool {
        self.cache.contains_key(module_name)
    }

    /// 获取已缓存的目录项
    pub fn entry(&self, module_name: &str) -> Option<CatalogEntry> {
        self.cache.get(module_name)
    }

    /// 当前缓存的模块数量（近似值）
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::StaticModule;
    use crate::tests::{CountingModule, RecordingDiagnostics};

    fn cache() -> TypeCatalogCache {
        TypeCatalogCache::new(1024, Duration::from_secs(3600))
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let cache = cache();
        let diagnostics = RecordingDiagnostics::default();
        let module = CountingModule::new(
            StaticModule::new("orders").with_type(TypeDescriptor::concrete("orders::Service")),
        );

        let first = cache.get_types(&module, &diagnostics);
        let second = cache.get_types(&module, &diagnostics);

        assert_eq!(first.types().len(), 1);
        assert!(Arc::ptr_eq(first.types(), second.types()));
        assert_eq!(module.enumerations(), 1);
        assert!(cache.contains("orders"));
    }

    #[test]
    fn test_partial_catalog_is_cached_and_failures_logged_once() {
        let cache = cache();
        let diagnostics = RecordingDiagnostics::default();
        let module = CountingModule::new(
            StaticModule::new("billing")
                .with_type(TypeDescriptor::concrete("billing::Invoice"))
                .with_load_failure("billing::Broken", "missing symbol"),
        );

        let entry = cache.get_types(&module, &diagnostics);
        cache.get_types(&module, &diagnostics);

        assert_eq!(entry.types().len(), 1);
        assert_eq!(entry.completeness(), CatalogCompleteness::Partial);
        assert_eq!(module.enumerations(), 1);
        assert_eq!(diagnostics.load_failures().len(), 1);
        assert_eq!(diagnostics.load_failures()[0].0, "billing");
        assert_eq!(
            cache.entry("billing").unwrap().completeness(),
            CatalogCompleteness::Partial
        );
    }

    #[test]
    fn test_unnamed_module_is_not_cached() {
        let cache = cache();
        let diagnostics = RecordingDiagnostics::default();
        let module = CountingModule::new(StaticModule::unnamed());

        cache.get_types(&module, &diagnostics);
        cache.get_types(&module, &diagnostics);

        assert_eq!(module.enumerations(), 2);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_completeness_is_reported_when_entry_is_not_retained() {
        let cache = TypeCatalogCache::new(0, Duration::from_secs(3600));
        let diagnostics = RecordingDiagnostics::default();
        let module = StaticModule::new("billing")
            .with_type(TypeDescriptor::concrete("billing::Invoice"))
            .with_load_failure("billing::Broken", "missing symbol");

        let entry = cache.get_types(&module, &diagnostics);

        assert_eq!(entry.completeness(), CatalogCompleteness::Partial);
        assert_eq!(entry.types().len(), 1);
        assert_eq!(cache.entry_count(), 0);
    }
}
