//! 注册诊断接口

use infrastructure_common::{ComponentError, Lifetime, TypeRef};

/// 注册诊断 trait
///
/// 约定式注册的两类可观察输出：每次成功注册一条记录，
/// 每个加载失败的类型一条错误记录。
pub trait RegistrationDiagnostics: Send + Sync {
    /// 记录一次服务注册
    fn log_service_registration(
        &self,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
        lifetime: Lifetime,
        source_marker: &str,
    );

    /// 记录一个类型加载失败
    fn log_type_load_failure(&self, module: &str, failure: &ComponentError);
}
