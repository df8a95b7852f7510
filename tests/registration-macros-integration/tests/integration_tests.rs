//! 注册宏 → 实时模块提供者 → 约定式注册扫描的端到端测试

use di_abstractions::RegistrationDiagnostics;
use di_impl::ServiceCollectionImpl;
use di_scanning::{AttributedServiceScanner, LiveModuleProvider, RegistrationOptions, ScanReport};
use infrastructure_common::{ComponentError, Lifetime, TypeRef};
use parking_lot::Mutex;
use std::sync::Once;

mod notifications {
    use registration_macros::{contract, register};

    pub trait Notifier {}

    pub trait Auditable {}

    #[register(scoped)]
    pub struct EmailNotifier;

    #[contract]
    impl Notifier for EmailNotifier {}

    #[contract]
    impl Auditable for EmailNotifier {}

    #[contract]
    impl Drop for EmailNotifier {
        fn drop(&mut self) {}
    }
}

mod clock {
    use registration_macros::register;

    #[register(singleton)]
    pub struct SystemClock;
}

mod jobs {
    use infrastructure_common::HostedService;
    use registration_macros::{contract, register};

    pub trait Reporter {}

    #[register(singleton, register_self)]
    pub struct Worker;

    #[contract]
    impl HostedService for Worker {}

    #[contract]
    impl Reporter for Worker {}
}

mod handlers {
    use registration_macros::{contract, register};
    use std::marker::PhantomData;

    pub trait Handler<T> {}

    pub struct Order;
    pub struct Invoice;
    pub struct Refund;

    #[register(scoped)]
    pub struct OrderHandler;

    #[contract]
    impl Handler<Order> for OrderHandler {}

    #[register(scoped)]
    pub struct InvoiceHandler;

    #[contract]
    impl Handler<Invoice> for InvoiceHandler {}

    pub struct Cached<T>(PhantomData<T>);

    #[register(scoped, register_self)]
    pub type RefundHandler = Cached<Refund>;

    #[contract]
    impl Handler<Refund> for Cached<Refund> {}
}

mod ledger {
    use registration_macros::{contract, register};

    pub trait Handler<T> {}

    pub trait Journal {}

    pub struct Entry;

    #[register(scoped)]
    pub struct EntryHandler;

    #[contract]
    impl Handler<Entry> for EntryHandler {}

    #[contract]
    impl Journal for EntryHandler {}
}

mod shipping {
    use registration_macros::{contract, register};

    pub trait Handler<T> {}

    pub trait Tracked {}

    pub struct Parcel;
    pub struct Pallet;
    pub struct Crate;

    #[register(transient)]
    pub struct ParcelHandler;

    #[contract]
    impl Handler<Parcel> for ParcelHandler {}

    #[contract]
    impl Tracked for ParcelHandler {}

    #[register(transient)]
    pub struct PalletHandler;

    #[contract]
    impl self::Handler<Pallet> for PalletHandler {}

    #[register(transient)]
    pub struct CrateHandler;

    #[contract]
    impl super::shipping::Handler<Crate> for CrateHandler {}
}

mod reporting {
    use registration_macros::{register, target_services};

    #[register(transient)]
    #[target_services("Reporting")]
    pub struct Exporter;
}

mod broken {
    use registration_macros::register;

    pub struct Unmarked;

    #[register(singleton)]
    #[register(scoped)]
    pub struct Twice;
}

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[derive(Debug, Default)]
struct CollectingDiagnostics {
    registrations: Mutex<Vec<(String, String, Lifetime)>>,
    failures: Mutex<Vec<String>>,
}

impl RegistrationDiagnostics for CollectingDiagnostics {
    fn log_service_registration(
        &self,
        service_type: &TypeRef,
        implementation_type: &TypeRef,
        lifetime: Lifetime,
        _source_marker: &str,
    ) {
        self.registrations.lock().push((
            service_type.to_string(),
            implementation_type.to_string(),
            lifetime,
        ));
    }

    fn log_type_load_failure(&self, module: &str, failure: &ComponentError) {
        self.failures.lock().push(format!("{}: {}", module, failure));
    }
}

fn scan(service_name: &str) -> (ServiceCollectionImpl, CollectingDiagnostics, ScanReport) {
    init_test_logger();
    let mut services = ServiceCollectionImpl::new();
    let diagnostics = CollectingDiagnostics::default();
    let report = AttributedServiceScanner::new(RegistrationOptions::default())
        .register_all(
            &mut services,
            service_name,
            &diagnostics,
            &LiveModuleProvider::new(),
        )
        .unwrap();
    (services, diagnostics, report)
}

fn services_for<T: ?Sized + 'static>(services: &ServiceCollectionImpl) -> Vec<String> {
    services
        .registrations_for(&TypeRef::of::<T>())
        .into_iter()
        .map(|descriptor| descriptor.service_type.short_name().to_string())
        .collect()
}

#[test]
fn test_contracts_are_registered_without_drop() {
    let (services, _, _) = scan("api");

    let mut contracts = services_for::<notifications::EmailNotifier>(&services);
    contracts.sort();
    assert_eq!(contracts, vec!["Auditable", "Notifier"]);
}

#[test]
fn test_plain_type_registers_itself() {
    let (services, _, _) = scan("api");

    let clock = TypeRef::of::<clock::SystemClock>();
    assert_eq!(
        services.find(&clock, &clock).map(|d| d.lifetime),
        Some(Lifetime::Singleton)
    );
}

#[test]
fn test_hosted_service_registers_once_by_concrete_type() {
    let (services, _, _) = scan("api");

    let registrations = services.registrations_for(&TypeRef::of::<jobs::Worker>());
    assert_eq!(registrations.len(), 1);
    assert!(registrations[0].is_self_registration());
}

#[test]
fn test_special_generic_contract_from_macros() {
    let (services, _, _) = scan("api");

    // 三个实现使用 Handler<_>，达到默认阈值
    assert_eq!(
        services_for::<handlers::OrderHandler>(&services),
        vec!["Handler"]
    );
    let handler = TypeRef::contract_of::<dyn handlers::Handler<handlers::Order>>()
        .generic_definition()
        .unwrap();
    let cached = TypeRef::of::<handlers::RefundHandler>();
    let unbound = cached.generic_definition().unwrap();
    let registration = services.find(&handler, &unbound).unwrap();
    assert_eq!(registration.lifetime, Lifetime::Scoped);
    assert!(services.find(&cached, &cached).is_some());
}

#[test]
fn test_same_named_traits_in_different_modules_are_counted_apart() {
    let (services, _, _) = scan("api");

    // 只有一个实现的 ledger::Handler<_> 不受 shipping::Handler<_> 计数影响
    let mut ledger = services_for::<ledger::EntryHandler>(&services);
    ledger.sort();
    assert_eq!(ledger, vec!["Handler", "Journal"]);
    let closed = TypeRef::contract_of::<dyn ledger::Handler<ledger::Entry>>();
    assert!(services
        .find(&closed, &TypeRef::of::<ledger::EntryHandler>())
        .is_some());

    // 不同写法的同一 trait 路径合并计数，三个实现达到阈值，普通契约不再注册
    assert_eq!(
        services_for::<shipping::ParcelHandler>(&services),
        vec!["Handler"]
    );
    let shipping = TypeRef::contract_of::<dyn shipping::Handler<shipping::Parcel>>()
        .generic_definition()
        .unwrap();
    for implementation in [
        TypeRef::of::<shipping::ParcelHandler>(),
        TypeRef::of::<shipping::PalletHandler>(),
        TypeRef::of::<shipping::CrateHandler>(),
    ] {
        let registrations = services.registrations_for(&implementation);
        assert_eq!(registrations.len(), 1);
        assert_eq!(
            registrations[0].service_type.generic_definition().as_ref(),
            Some(&shipping)
        );
        assert_eq!(registrations[0].lifetime, Lifetime::Transient);
    }
}

#[test]
fn test_targeting_follows_current_service() {
    let (api_services, _, _) = scan("api");
    let (reporting_services, _, _) = scan("reporting");

    assert!(services_for::<reporting::Exporter>(&api_services).is_empty());
    assert_eq!(
        services_for::<reporting::Exporter>(&reporting_services),
        vec!["Exporter"]
    );
}

#[test]
fn test_duplicate_marker_fails_only_that_type() {
    let (services, diagnostics, report) = scan("api");

    assert_eq!(report.partial_modules, 1);
    let failures = diagnostics.failures.lock().clone();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("Twice"));
    assert!(services_for::<broken::Twice>(&services).is_empty());
    assert!(services_for::<broken::Unmarked>(&services).is_empty());
    assert_eq!(diagnostics.registrations.lock().len(), services.len());
}
