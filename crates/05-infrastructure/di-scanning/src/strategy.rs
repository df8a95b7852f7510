//! 注册策略选择
//!
//! 按以下优先级决定一个实现候选的注册形态：
//!
//! 1. 托管服务：只按自身类型注册
//! 2. 存在特殊契约（使用次数达到阈值的泛型契约）：按每个特殊契约注册，
//!    `register_self` 时再按自身注册；其余契约不注册
//! 3. 没有任何契约：按自身注册
//! 4. 其他情况：按全部契约注册，`register_self` 时再按自身注册
//!
//! 资源释放契约从不作为注册目标。

use crate::usage_counter::ContractUsageCounter;
use infrastructure_common::{ContractConventions, Lifetime, RegistrationMarker, TypeDescriptor, TypeRef};

/// 一次注册决策
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationDecision {
    /// 服务（契约）类型
    pub service_type: TypeRef,
    /// 实现类型
    pub implementation_type: TypeRef,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 产生该决策的标记名称
    pub source_marker: &'static str,
}

impl RegistrationDecision {
    fn new(service_type: TypeRef, implementation_type: TypeRef, lifetime: Lifetime) -> Self {
        Self {
            service_type,
            implementation_type,
            lifetime,
            source_marker: RegistrationMarker::NAME,
        }
    }
}

/// 注册形态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationShape {
    /// 托管服务，只按自身注册
    HostedService,
    /// 按特殊契约注册
    SpecialContracts,
    /// 没有契约，按自身注册
    SelfOnly,
    /// 按全部契约注册
    AllContracts,
}

/// 策略选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPlan {
    /// 注册形态
    pub shape: RegistrationShape,
    /// 注册决策，按执行顺序排列
    pub decisions: Vec<RegistrationDecision>,
}

/// 注册策略选择器
#[derive(Debug, Clone, Copy)]
pub struct RegistrationStrategySelector {
    special_interface_threshold: usize,
}

impl RegistrationStrategySelector {
    /// 创建策略选择器
    ///
    /// 阈值至少为 1，未被任何候选使用的泛型契约永远不是特殊契约。
    pub fn new(special_interface_threshold: usize) -> Self {
        Self {
            special_interface_threshold: special_interface_threshold.max(1),
        }
    }

    /// 特殊契约阈值
    pub fn threshold(&self) -> usize {
        self.special_interface_threshold
    }

    /// 为带注册标记的实现候选选择注册形态
    pub fn select(
        &self,
        descriptor: &TypeDescriptor,
        marker: &RegistrationMarker,
        counter: &ContractUsageCounter,
    ) -> RegistrationPlan {
        let implementation = &descriptor.type_ref;
        let lifetime = marker.lifetime;
        let self_decision =
            || RegistrationDecision::new(implementation.clone(), implementation.clone(), lifetime);

        if descriptor
            .contracts
            .iter()
            .any(ContractConventions::is_hosted_service)
        {
            return RegistrationPlan {
                shape: RegistrationShape::HostedService,
                decisions: vec![self_decision()],
            };
        }

        let contracts: Vec<&TypeRef> = descriptor
            .contracts
            .iter()
            .filter(|contract| !ContractConventions::is_disposal(contract))
            .collect();

        let special: Vec<&TypeRef> = contracts
            .iter()
            .copied()
            .filter(|contract| counter.is_special(contract, self.special_interface_threshold))
            .collect();

        let (shape, targets) = if !special.is_empty() {
            (RegistrationShape::SpecialContracts, special)
        } else if contracts.is_empty() {
            return RegistrationPlan {
                shape: RegistrationShape::SelfOnly,
                decisions: vec![self_decision()],
            };
        } else {
            (RegistrationShape::AllContracts, contracts)
        };

        let mut decisions: Vec<RegistrationDecision> = targets
            .into_iter()
            .map(|contract| {
                let (service_type, implementation_type) = resolve_for(contract, implementation);
                RegistrationDecision::new(service_type, implementation_type, lifetime)
            })
            .collect();
        if marker.register_self {
            decisions.push(self_decision());
        }

        RegistrationPlan { shape, decisions }
    }
}

/// 解析契约与实现的注册类型对
///
/// 契约与实现都是泛型时，按两侧未绑定的泛型定义注册。
pub fn resolve_for(contract: &TypeRef, implementation: &TypeRef) -> (TypeRef, TypeRef) {
    match (contract.generic_definition(), implementation.generic_definition()) {
        (Some(contract_definition), Some(implementation_definition)) => {
            (contract_definition, implementation_definition)
        }
        _ => (contract.clone(), implementation.clone()),
    }
}
