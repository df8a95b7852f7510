//! 宏工具函数

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{GenericParam, Generics, Ident, Item, Result, Type};

/// 可以携带注册标记的类型
pub struct MarkedType {
    /// 类型名称
    pub ident: Ident,
    /// 类型引用表达式
    pub type_ref: TokenStream2,
}

/// 从被标注的条目中提取类型
///
/// 支持结构体、枚举与类型别名。类型别名用于标注封闭泛型实现，
/// 例如 `type RefundHandler = Cached<Refund>;`。
pub fn marked_type(item: &Item) -> Result<MarkedType> {
    match item {
        Item::Struct(item) => Ok(MarkedType {
            ident: item.ident.clone(),
            type_ref: definition_type_ref(&item.ident, &item.generics),
        }),
        Item::Enum(item) => Ok(MarkedType {
            ident: item.ident.clone(),
            type_ref: definition_type_ref(&item.ident, &item.generics),
        }),
        Item::Type(item) => {
            if !item.generics.params.is_empty() {
                return Err(syn::Error::new_spanned(
                    &item.generics,
                    "泛型类型别名无法作为注册目标",
                ));
            }
            let ty = &item.ty;
            Ok(MarkedType {
                ident: item.ident.clone(),
                type_ref: quote! { ::infrastructure_common::TypeRef::of::<#ty>() },
            })
        }
        other => Err(syn::Error::new_spanned(
            other,
            "注册标记只能用于结构体、枚举或类型别名",
        )),
    }
}

/// 泛型参数个数（不含生命周期参数）
pub fn generic_arity(generics: &Generics) -> usize {
    generics
        .params
        .iter()
        .filter(|param| !matches!(param, GenericParam::Lifetime(_)))
        .count()
}

/// 生成声明位置类型的类型引用表达式
///
/// 非泛型类型直接使用 `TypeRef::of`，泛型类型生成未绑定的泛型定义。
pub fn definition_type_ref(ident: &Ident, generics: &Generics) -> TokenStream2 {
    if generics.params.is_empty() {
        return quote! { ::infrastructure_common::TypeRef::of::<#ident>() };
    }
    let arity = generic_arity(generics);
    quote! {
        ::infrastructure_common::TypeRef::definition(
            ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)),
            #arity,
        )
    }
}

/// 生成实现类型的类型引用表达式
///
/// 泛型实现按类型路径的最后一段生成泛型定义，要求类型与实现位于同一模块。
pub fn self_type_ref(self_ty: &Type, generics: &Generics) -> Result<TokenStream2> {
    if generics.params.is_empty() {
        return Ok(quote! { ::infrastructure_common::TypeRef::of::<#self_ty>() });
    }
    match self_ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last().ok_or_else(|| {
                syn::Error::new_spanned(self_ty, "无法解析实现类型")
            })?;
            let arity = match &segment.arguments {
                syn::PathArguments::AngleBracketed(args) => args
                    .args
                    .iter()
                    .filter(|arg| !matches!(arg, syn::GenericArgument::Lifetime(_)))
                    .count(),
                _ => 0,
            };
            let ident = &segment.ident;
            Ok(quote! {
                ::infrastructure_common::TypeRef::definition(
                    ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#ident)),
                    #arity,
                )
            })
        }
        other => Err(syn::Error::new_spanned(
            other,
            "#[contract] 的泛型实现只支持路径类型",
        )),
    }
}

/// 生成在进程启动时提交类型事实的代码
pub fn fact_submission(type_ref: &TokenStream2, fact: &TokenStream2) -> TokenStream2 {
    quote! {
        #[allow(dyn_drop)]
        const _: () = {
            // 使用 ctor 在程序启动时写入类型事实表
            #[ctor::ctor]
            fn __submit_type_fact() {
                ::infrastructure_common::submit_type_fact(
                    ::infrastructure_common::TypeFactRecord::new(
                        ::core::module_path!(),
                        #type_ref,
                        #fact,
                    ),
                );
            }
        };
    }
}
