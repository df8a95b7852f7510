//! 约定式注册启动器
//!
//! 在服务启动时组装注册选项、诊断与模块提供者，然后执行一次扫描。

use crate::component_scanner::{AttributedServiceScanner, ScanReport};
use crate::diagnostics::TracingDiagnostics;
use crate::modules::LiveModuleProvider;
use crate::options::{RegistrationOptions, DEFAULT_CONFIG_FILE};
use di_abstractions::{ModuleProvider, RegistrationDiagnostics, ServiceCollection};
use infrastructure_common::{ConfigError, InfrastructureError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// 约定式注册启动器
pub struct RegistrationBootstrapper {
    /// 当前服务名称，用于目标服务判定
    service_name: String,
    /// 配置文件路径（不含扩展名亦可）
    config_file: PathBuf,
    /// 显式指定的选项，优先于配置文件
    options: Option<RegistrationOptions>,
    /// 注册诊断
    diagnostics: Arc<dyn RegistrationDiagnostics>,
    /// 模块提供者
    module_provider: Arc<dyn ModuleProvider>,
}

impl RegistrationBootstrapper {
    /// 创建新的启动器
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            options: None,
            diagnostics: Arc::new(TracingDiagnostics::new()),
            module_provider: Arc::new(LiveModuleProvider::new()),
        }
    }

    /// 设置配置文件
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// 直接指定注册选项，不再读取配置文件
    pub fn with_options(mut self, options: RegistrationOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// 设置注册诊断
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn RegistrationDiagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// 设置模块提供者
    pub fn with_module_provider(mut self, module_provider: Arc<dyn ModuleProvider>) -> Self {
        self.module_provider = module_provider;
        self
    }

    /// 执行约定式注册
    pub fn bootstrap(
        self,
        services: &mut dyn ServiceCollection,
    ) -> Result<ScanReport, InfrastructureError> {
        if self.service_name.trim().is_empty() {
            error!("服务名称为空，无法执行约定式注册");
            return Err(InfrastructureError::BootstrapFailed {
                message: "服务名称不能为空".to_string(),
            });
        }

        info!("启动约定式注册: service={}", self.service_name);

        let options = match self.options {
            Some(options) => {
                options.validate().map_err(|e| {
                    error!("注册选项验证失败: {}", e);
                    ConfigError::from(e)
                })?;
                options
            }
            None => RegistrationOptions::load_from(&self.config_file)?,
        };

        let mut scanner = AttributedServiceScanner::new(options);
        let report = scanner.register_all(
            services,
            &self.service_name,
            self.diagnostics.as_ref(),
            self.module_provider.as_ref(),
        )?;

        info!(
            "约定式注册完成: service={}, 注册 {} 项, 部分加载模块 {} 个",
            self.service_name,
            report.registration_count(),
            report.partial_modules
        );
        Ok(report)
    }
}

impl std::fmt::Debug for RegistrationBootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationBootstrapper")
            .field("service_name", &self.service_name)
            .field("config_file", &self.config_file)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// 使用默认配置为当前服务注册所有带注册标记的服务
///
/// 选项从 `config/registration` 与环境变量读取，模块来自注册宏写入的类型事实表。
pub fn register_attributed_services<'a, S: ServiceCollection>(
    services: &'a mut S,
    service_name: &str,
) -> Result<&'a mut S, InfrastructureError> {
    RegistrationBootstrapper::new(service_name).bootstrap(&mut *services)?;
    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{StaticModule, StaticModuleProvider};
    use crate::tests::RecordingDiagnostics;
    use di_impl::ServiceCollectionImpl;
    use infrastructure_common::{Lifetime, RegistrationMarker, TypeDescriptor, TypeRef};
    use std::fs;
    use tempfile::TempDir;

    fn provider() -> Arc<dyn ModuleProvider> {
        Arc::new(
            StaticModuleProvider::new().with_module(
                StaticModule::new("bootstrap_app")
                    .with_type(
                        TypeDescriptor::concrete("bootstrap_app::Clock")
                            .with_registration(RegistrationMarker::new(Lifetime::Singleton)),
                    ),
            ),
        )
    }

    #[test]
    fn test_blank_service_name_is_rejected() {
        let mut services = ServiceCollectionImpl::new();

        let result = RegistrationBootstrapper::new("  ").bootstrap(&mut services);

        assert!(matches!(
            result,
            Err(InfrastructureError::BootstrapFailed { .. })
        ));
        assert!(services.is_empty());
    }

    #[test]
    fn test_bootstrap_reads_options_from_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registration.toml");
        fs::write(
            &path,
            "[registration]\nexcluded_module_prefixes = [\"bootstrap_\"]\n",
        )
        .unwrap();
        let mut services = ServiceCollectionImpl::new();

        let report = RegistrationBootstrapper::new("api")
            .with_config_file(&path)
            .with_diagnostics(Arc::new(RecordingDiagnostics::default()))
            .with_module_provider(provider())
            .bootstrap(&mut services)
            .unwrap();

        assert_eq!(report.modules_scanned, 0);
        assert!(services.is_empty());
    }

    #[test]
    fn test_bootstrap_with_explicit_options() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let mut services = ServiceCollectionImpl::new();

        let report = RegistrationBootstrapper::new("api")
            .with_options(RegistrationOptions::default())
            .with_diagnostics(diagnostics.clone())
            .with_module_provider(provider())
            .bootstrap(&mut services)
            .unwrap();

        let clock = TypeRef::new("bootstrap_app::Clock");
        assert!(report.contains(&clock, &clock));
        assert_eq!(services.find(&clock, &clock).unwrap().lifetime, Lifetime::Singleton);
        assert_eq!(diagnostics.registrations().len(), 1);
    }

    #[test]
    fn test_invalid_explicit_options_fail_bootstrap() {
        let mut services = ServiceCollectionImpl::new();
        let options = RegistrationOptions {
            special_interface_threshold: 0,
            ..RegistrationOptions::default()
        };

        let result = RegistrationBootstrapper::new("api")
            .with_options(options)
            .with_module_provider(provider())
            .bootstrap(&mut services);

        assert!(matches!(result, Err(InfrastructureError::ConfigError { .. })));
    }
}
