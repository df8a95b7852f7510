//! 泛型契约使用计数

use infrastructure_common::{TypeDescriptor, TypeRef};
use std::collections::HashMap;

/// 泛型契约使用计数器
///
/// 以未绑定的泛型定义为键，统计本次扫描中有多少个实现候选实现了它的某个封闭形式。
/// 每次扫描开始前必须 [`reset`](Self::reset)，计数不会跨扫描累积。
#[derive(Debug, Clone, Default)]
pub struct ContractUsageCounter {
    usage: HashMap<TypeRef, usize>,
}

impl ContractUsageCounter {
    /// 创建空的计数器
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空计数
    pub fn reset(&mut self) {
        self.usage.clear();
    }

    /// 记录一个类型的契约使用情况
    ///
    /// 非实现候选会被忽略；每个封闭泛型契约各计一次，
    /// 同时实现 `Handler<A>` 与 `Handler<B>` 的候选为 `Handler<>` 计 2。
    pub fn record(&mut self, descriptor: &TypeDescriptor) {
        if !descriptor.is_implementation_candidate() {
            return;
        }
        let definitions = descriptor
            .contracts
            .iter()
            .filter(|contract| contract.is_generic() && !contract.is_generic_definition())
            .filter_map(TypeRef::generic_definition);

        for definition in definitions {
            *self.usage.entry(definition).or_insert(0) += 1;
        }
    }

    /// 记录一组类型
    pub fn record_all<'a>(&mut self, descriptors: impl IntoIterator<Item = &'a TypeDescriptor>) {
        for descriptor in descriptors {
            self.record(descriptor);
        }
    }

    /// 泛型契约的使用次数，接受封闭泛型或泛型定义
    pub fn usage_of(&self, contract: &TypeRef) -> usize {
        contract
            .generic_definition()
            .and_then(|definition| self.usage.get(&definition).copied())
            .unwrap_or(0)
    }

    /// 泛型契约的使用次数是否达到阈值（阈值至少按 1 计）
    pub fn is_special(&self, contract: &TypeRef, threshold: usize) -> bool {
        contract.is_generic() && self.usage_of(contract) >= threshold.max(1)
    }

    /// 已统计的泛型定义数量
    pub fn len(&self) -> usize {
        self.usage.len()
    }

    /// 是否没有任何计数
    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }
}
