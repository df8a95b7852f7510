//! 测试替身与测试工具


use crate::modules::StaticModule;
use di_abstractions::{Module, RegistrationDiagnostics};
use infrastructure_common::{ComponentError, Lifetime, TypeDescriptor, TypeLoadError, TypeRef};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub(crate) fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 注册日志：(服务, 实现, 生命周期, 来源标记)
pub(crate) type RegistrationRecord = (String, String, Lifetime, String);

/// 记录所有诊断输出的替身
#[derive(Debug, Default)]
pub(crate) struct RecordingDiagnostics {
    registrations: Mutex<Vec<RegistrationRecord>>,
    load_failures: Mutex<Vec<(String, String)>>,
}

impl RecordingDiagnostics {
    pub(crate) fn registrations(&self) -> Vec<RegistrationRecord> {
        self.registrations.lock().clone()
    }

    /// (模块, 失败描述)
    pub(crate) fn load_failures(&self) -> Vec<(String, String)> {
        self.load_failures.lock().clone()
    }
}

impl RegistrationDiagnostics for RecordingDiagnostics {
    fn log_service_registration(
        &self,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
        lifetime: Lifetime,
        source_marker: &str,
    ) {
        self.registrations.lock().push((
            service_type.to_string(),
            implementation_type.to_string(),
            lifetime,
            source_marker.to_string(),
        ));
    }

    fn log_type_load_failure(&self, module: &str, failure: &ComponentError) {
        self.load_failures
            .lock()
            .push((module.to_string(), failure.to_string()));
    }
}

/// 统计类型枚举次数的模块
#[derive(Debug)]
pub(crate) struct CountingModule {
    inner: StaticModule,
    enumerations: AtomicUsize,
}

impl CountingModule {
    pub(crate) fn new(inner: StaticModule) -> Self {
        Self {
            inner,
            enumerations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

impl Module for CountingModule {
    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn is_dynamic(&self) -> bool {
        self.inner.is_dynamic()
    }

    fn defined_types(&self) -> Result<Vec<TypeDescriptor>, TypeLoadError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.inner.defined_types()
    }
}
