//! 基于 tracing 的注册诊断

use di_abstractions::RegistrationDiagnostics;
use infrastructure_common::{ComponentError, Lifetime, TypeRef};
use tracing::{error, info};

/// 将注册诊断写入 tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// 创建新的诊断实例
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationDiagnostics for TracingDiagnostics {
    fn log_service_registration(
        &self,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
        lifetime: Lifetime,
        source_marker: &str,
    ) {
        info!(
            service = %service_type,
            implementation = %implementation_type,
            lifetime = %lifetime,
            source = source_marker,
            "注册服务: {} -> {} ({}), 来源 #[{}]",
            service_type,
            implementation_type,
            lifetime,
            source_marker
        );
    }

    fn log_type_load_failure(&self, module: &str, failure: &ComponentError) {
        match failure {
            ComponentError::TypeLoadFailed { type_name, message } => {
                error!(
                    module,
                    type_name = type_name.as_str(),
                    error = message.as_str(),
                    "类型加载失败: module={}, type={}, 原因: {}",
                    module,
                    type_name,
                    message
                );
            }
            other => {
                error!(module, error = %other, "类型加载失败: {}", module);
            }
        }
    }
}
