//! 模块与类型目录抽象接口
//!
//! 扫描引擎只依赖这里的能力，不关心类型是如何被发现的：
//! 可以来自注册宏写入的事实表、静态生成的目录或测试替身。

use infrastructure_common::{TypeDescriptor, TypeLoadError};
use std::fmt::Debug;
use std::sync::Arc;

/// 模块 trait
///
/// 一个模块对应一组可枚举的类型，通常是一个 crate。
pub trait Module: Send + Sync + Debug {
    /// 模块名称，无法解析时返回 `None`
    fn name(&self) -> Option<&str>;

    /// 是否为动态生成的模块
    fn is_dynamic(&self) -> bool {
        false
    }

    /// 枚举模块中定义的所有类型
    ///
    /// 部分类型加载失败时返回 [`TypeLoadError`]，其中包含成功加载的类型。
    fn defined_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError>;
}

/// 模块提供者 trait
///
/// 提供当前进程中已加载的模块，可以替换为自定义实现（例如测试）。
pub trait ModuleProvider: Send + Sync {
    /// 获取已加载的模块
    fn modules(&self) -> Vec<Arc<dyn Module>>;
}
