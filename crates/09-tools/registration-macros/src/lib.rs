//! # Registration Macros
//!
//! 这个 crate 提供了声明式服务注册标记的过程宏。宏本身不做任何注册，
//! 只在进程启动时把标记写入 `infrastructure_common` 的类型事实表，
//! 由约定式注册扫描器读取。
//!
//! 使用这些宏的 crate 需要依赖 `infrastructure-common` 与 `ctor`。
//!
//! ## 核心宏
//!
//! - [`register`] - 注册标记（生命周期与是否按自身注册）
//! - [`target_services`] - 目标服务标记
//! - [`contract`] - 声明实现的契约
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use registration_macros::{contract, register, target_services};
//!
//! pub trait Notifier {}
//!
//! #[register(scoped, register_self)]
//! #[target_services("billing-api")]
//! pub struct EmailNotifier;
//!
//! #[contract]
//! impl Notifier for EmailNotifier {}
//! ```

use proc_macro::TokenStream;

mod contract;
mod register;
mod targeting;
mod utils;

/// 注册标记宏
///
/// 可用于结构体、枚举与非泛型类型别名（用于封闭泛型实现）。
///
/// # 参数
///
/// - `singleton` / `scoped` / `transient` - 生命周期（必填）
/// - `register_self` 或 `register_self = true` - 同时按自身类型注册
///
/// # 示例
///
/// ```rust,ignore
/// #[register(singleton)]
/// pub struct SystemClock;
///
/// #[register(scoped, register_self)]
/// type RefundHandler = Cached<Refund>;
/// ```
#[proc_macro_attribute]
pub fn register(args: TokenStream, input: TokenStream) -> TokenStream {
    register::register_impl(args, input)
}

/// 目标服务标记宏
///
/// 类型只在名称匹配（不区分大小写）的服务中注册。
///
/// # 示例
///
/// ```rust,ignore
/// #[register(transient)]
/// #[target_services("billing-api", "reporting")]
/// pub struct InvoiceExporter;
/// ```
#[proc_macro_attribute]
pub fn target_services(args: TokenStream, input: TokenStream) -> TokenStream {
    targeting::target_services_impl(args, input)
}

/// 契约声明宏
///
/// 标注在 trait 实现上，记录实现类型满足的契约。契约以 `dyn Trait` 的完整
/// 类型名标识，不同模块中的同名 trait 互不影响。
///
/// 不能作为 trait 对象的 trait（含泛型方法或未指定的关联类型）使用
/// `#[contract(by_name)]`，此时以源码中书写的路径标识契约。
///
/// # 示例
///
/// ```rust,ignore
/// #[contract]
/// impl Handler<Order> for OrderHandler {
///     // 方法
/// }
///
/// #[contract(by_name)]
/// impl Clone for OrderHandler {
///     fn clone(&self) -> Self { OrderHandler }
/// }
/// ```
#[proc_macro_attribute]
pub fn contract(args: TokenStream, input: TokenStream) -> TokenStream {
    contract::contract_impl(args, input)
}
