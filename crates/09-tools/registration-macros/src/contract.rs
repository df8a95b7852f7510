//! 契约声明宏实现

use crate::utils::{fact_submission, self_type_ref};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::visit_mut::{self, VisitMut};
use syn::{parse_macro_input, GenericParam, Ident, ItemImpl, Lifetime, Path, Result, Type};

/// 契约身份的生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractIdentity {
    /// 使用 `dyn Trait` 的完整类型名
    TraitObject,
    /// 使用源码中书写的路径，用于不能作为 trait 对象的 trait
    ByName,
}

impl syn::parse::Parse for ContractIdentity {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Ok(Self::TraitObject);
        }
        let ident: Ident = input.parse()?;
        if ident != "by_name" || !input.is_empty() {
            return Err(syn::Error::new_spanned(ident, "#[contract] 只接受 by_name 参数"));
        }
        Ok(Self::ByName)
    }
}

/// 从 trait 实现中提取契约路径
pub fn contract_path(item: &ItemImpl) -> Result<&Path> {
    match &item.trait_ {
        Some((None, path, _)) => Ok(path),
        Some((Some(bang), _, _)) => Err(syn::Error::new_spanned(
            bang,
            "#[contract] 不能用于否定实现",
        )),
        None => Err(syn::Error::new_spanned(
            &item.self_ty,
            "#[contract] 只能用于 trait 实现",
        )),
    }
}

/// 实现 #[contract] 宏
pub fn contract_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let identity = match syn::parse::<ContractIdentity>(args) {
        Ok(identity) => identity,
        Err(e) => return e.to_compile_error().into(),
    };

    let item_impl = parse_macro_input!(input as ItemImpl);

    let expanded = match expand(&item_impl, identity) {
        Ok(submission) => quote! {
            #item_impl

            #submission
        },
        Err(e) => e.to_compile_error(),
    };

    TokenStream::from(expanded)
}

fn expand(item_impl: &ItemImpl, identity: ContractIdentity) -> Result<TokenStream2> {
    let path = contract_path(item_impl)?;
    let type_ref = self_type_ref(&item_impl.self_ty, &item_impl.generics)?;
    let contract = contract_type_ref(path, item_impl, identity);
    let fact = quote! {
        ::infrastructure_common::TypeFact::Contract(#contract)
    };
    Ok(fact_submission(&type_ref, &fact))
}

/// 生成契约的类型引用表达式
///
/// 泛型实现中的类型参数替换为 `()`，再取契约的未绑定泛型定义。
/// 带常量参数的泛型实现退回按名称生成。
fn contract_type_ref(path: &Path, item_impl: &ItemImpl, identity: ContractIdentity) -> TokenStream2 {
    let has_const_params = item_impl
        .generics
        .params
        .iter()
        .any(|param| matches!(param, GenericParam::Const(_)));
    if identity == ContractIdentity::ByName || has_const_params {
        return quote! {
            ::infrastructure_common::TypeRef::new(::core::stringify!(#path))
        };
    }

    let mut eraser = ImplParamEraser::new(item_impl);
    let mut erased = path.clone();
    eraser.visit_path_mut(&mut erased);

    if !eraser.erased {
        return quote! {
            ::infrastructure_common::TypeRef::contract_of::<dyn #erased>()
        };
    }
    quote! {
        {
            let contract = ::infrastructure_common::TypeRef::contract_of::<dyn #erased>();
            contract.generic_definition().unwrap_or(contract)
        }
    }
}

/// 把实现上的泛型参数从契约路径中擦除
struct ImplParamEraser {
    types: HashSet<Ident>,
    lifetimes: HashSet<Ident>,
    erased: bool,
}

impl ImplParamEraser {
    fn new(item_impl: &ItemImpl) -> Self {
        let mut types = HashSet::new();
        let mut lifetimes = HashSet::new();
        for param in &item_impl.generics.params {
            match param {
                GenericParam::Type(param) => {
                    types.insert(param.ident.clone());
                }
                GenericParam::Lifetime(param) => {
                    lifetimes.insert(param.lifetime.ident.clone());
                }
                GenericParam::Const(_) => {}
            }
        }
        Self {
            types,
            lifetimes,
            erased: false,
        }
    }
}

impl VisitMut for ImplParamEraser {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(type_path) = ty {
            if type_path.qself.is_none() {
                if let Some(ident) = type_path.path.get_ident() {
                    if self.types.contains(ident) {
                        *ty = syn::parse_quote!(());
                        self.erased = true;
                        return;
                    }
                }
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }

    fn visit_lifetime_mut(&mut self, lifetime: &mut Lifetime) {
        if self.lifetimes.contains(&lifetime.ident) {
            *lifetime = syn::parse_quote!('static);
        }
    }
}
