//! 类型事实表
//!
//! 注册宏在进程启动时把类型的标记与契约写入进程级事实表，
//! 实时模块提供者再从这里按 crate 聚合出模块。

use crate::metadata::{RegistrationMarker, TargetingMarker, TypeRef};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// 类型事实
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFact {
    /// 注册标记
    Registration(RegistrationMarker),
    /// 目标服务标记
    Targeting(TargetingMarker),
    /// 实现的契约
    Contract(TypeRef),
}

/// 类型事实记录
#[derive(Debug, Clone)]
pub struct TypeFactRecord {
    /// 声明位置的模块路径
    pub module_path: &'static str,
    /// 事实所属的类型
    pub type_ref: TypeRef,
    /// 事实内容
    pub fact: TypeFact,
}

impl TypeFactRecord {
    /// 创建新的类型事实记录
    pub fn new(module_path: &'static str, type_ref: TypeRef, fact: TypeFact) -> Self {
        Self {
            module_path,
            type_ref,
            fact,
        }
    }

    /// 所属模块（crate）名称
    pub fn module_name(&self) -> &'static str {
        self.module_path
            .split("::")
            .next()
            .unwrap_or(self.module_path)
    }
}

/// 全局类型事实表
static TYPE_FACTS: Lazy<RwLock<Vec<TypeFactRecord>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 提交类型事实
///
/// 由注册宏生成的启动函数调用。
pub fn submit_type_fact(record: TypeFactRecord) {
    TYPE_FACTS.write().push(record);
}

/// 获取所有已提交的类型事实（按提交顺序）
pub fn registered_type_facts() -> Vec<TypeFactRecord> {
    TYPE_FACTS.read().clone()
}
