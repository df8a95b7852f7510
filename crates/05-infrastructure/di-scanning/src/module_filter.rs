//! 模块过滤

use di_abstractions::Module;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 按名称前缀排除模块的过滤器
///
/// 动态生成的模块与无法解析名称的模块总是被排除。
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    /// 已转为小写的排除前缀
    excluded_prefixes: Vec<String>,
}

impl ModuleFilter {
    /// 创建新的模块过滤器
    pub fn new<I, S>(excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_prefixes: excluded_prefixes
                .into_iter()
                .map(|prefix| prefix.as_ref().to_lowercase())
                .filter(|prefix| !prefix.is_empty())
                .collect(),
        }
    }

    /// 检查模块是否参与扫描
    pub fn matches(&self, module: &dyn Module) -> bool {
        if module.is_dynamic() {
            return false;
        }
        let Some(name) = module.name() else {
            return false;
        };
        let name = name.to_lowercase();
        !self
            .excluded_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// 选出参与扫描的模块，按名称去重并保持原有顺序
    pub fn filter(&self, modules: Vec<Arc<dyn Module>>) -> Vec<Arc<dyn Module>> {
        let total = modules.len();
        let mut seen = HashSet::new();
        let eligible: Vec<_> = modules
            .into_iter()
            .filter(|module| self.matches(module.as_ref()))
            .filter(|module| {
                module
                    .name()
                    .map(|name| seen.insert(name.to_string()))
                    .unwrap_or(false)
            })
            .collect();

        debug!("模块过滤完成: {}/{} 个模块参与扫描", eligible.len(), total);
        eligible
    }
}
