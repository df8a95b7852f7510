//! 带注册日志的注册器

use crate::strategy::RegistrationDecision;
use di_abstractions::{RegistrationDiagnostics, ServiceCollection, ServiceRegistrar};
use infrastructure_common::DependencyError;
use std::sync::Arc;
use tracing::error;

/// 执行注册决策并记录注册日志
///
/// 这是约定式注册唯一有副作用的边界。
#[derive(Clone)]
pub struct LoggingRegistrar {
    registrar: Arc<dyn ServiceRegistrar>,
}

impl LoggingRegistrar {
    /// 创建新的注册器
    pub fn new(registrar: Arc<dyn ServiceRegistrar>) -> Self {
        Self { registrar }
    }

    /// 执行一条注册决策
    ///
    /// 生命周期不受支持时立即返回错误，不写注册日志。
    pub fn register(
        &self,
        services: &mut dyn ServiceCollection,
        decision: &RegistrationDecision,
        diagnostics: &dyn RegistrationDiagnostics,
    ) -> Result<(), DependencyError> {
        self.registrar
            .register(
                services,
                decision.lifetime,
                &decision.service_type,
                &decision.implementation_type,
            )
            .map_err(|e| {
                error!(
                    "服务注册失败: {} -> {}, 错误: {}",
                    decision.service_type, decision.implementation_type, e
                );
                e
            })?;

        diagnostics.log_service_registration(
            &decision.service_type,
            &decision.implementation_type,
            decision.lifetime,
            decision.source_marker,
        );
        Ok(())
    }
}

impl std::fmt::Debug for LoggingRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingRegistrar").finish_non_exhaustive()
    }
}
