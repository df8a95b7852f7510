//! 注册标记宏实现

use crate::utils::{fact_submission, marked_type};
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, Item, Lit,
    Meta, Result, Token,
};

/// 注册生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterLifetime {
    Singleton,
    Scoped,
    Transient,
}

impl RegisterLifetime {
    fn tokens(self) -> TokenStream2 {
        match self {
            RegisterLifetime::Singleton => quote! { ::infrastructure_common::Lifetime::Singleton },
            RegisterLifetime::Scoped => quote! { ::infrastructure_common::Lifetime::Scoped },
            RegisterLifetime::Transient => quote! { ::infrastructure_common::Lifetime::Transient },
        }
    }
}

/// 注册标记参数
#[derive(Debug, Clone)]
pub struct RegisterArgs {
    /// 生命周期
    pub lifetime: RegisterLifetime,
    /// 是否同时按自身类型注册
    pub register_self: bool,
}

impl Parse for RegisterArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut lifetime = None;
        let mut register_self = false;

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    let parsed_lifetime = if path.is_ident("singleton") {
                        RegisterLifetime::Singleton
                    } else if path.is_ident("scoped") {
                        RegisterLifetime::Scoped
                    } else if path.is_ident("transient") {
                        RegisterLifetime::Transient
                    } else if path.is_ident("register_self") {
                        register_self = true;
                        continue;
                    } else {
                        return Err(syn::Error::new_spanned(path, "未知的注册参数"));
                    };
                    if lifetime.replace(parsed_lifetime).is_some() {
                        return Err(syn::Error::new_spanned(path, "生命周期只能指定一次"));
                    }
                }
                Meta::NameValue(nv) if nv.path.is_ident("register_self") => match nv.value {
                    Expr::Lit(expr_lit) => match expr_lit.lit {
                        Lit::Bool(lit_bool) => register_self = lit_bool.value,
                        other => {
                            return Err(syn::Error::new_spanned(other, "register_self 需要布尔值"))
                        }
                    },
                    other => {
                        return Err(syn::Error::new_spanned(other, "register_self 需要布尔值"))
                    }
                },
                other => return Err(syn::Error::new_spanned(other, "未知的注册参数")),
            }
        }

        let lifetime = lifetime.ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "必须指定生命周期 (singleton / scoped / transient)",
            )
        })?;

        Ok(Self {
            lifetime,
            register_self,
        })
    }
}

/// 实现 #[register] 宏
pub fn register_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let register_args = match syn::parse::<RegisterArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let item = parse_macro_input!(input as Item);
    let marked = match marked_type(&item) {
        Ok(marked) => marked,
        Err(e) => return e.to_compile_error().into(),
    };

    let lifetime = register_args.lifetime.tokens();
    let register_self = register_args.register_self;
    let fact = quote! {
        ::infrastructure_common::TypeFact::Registration(
            ::infrastructure_common::RegistrationMarker::new(#lifetime)
                .with_register_self(#register_self)
        )
    };
    let submission = fact_submission(&marked.type_ref, &fact);

    let expanded = quote! {
        #item

        #submission
    };

    TokenStream::from(expanded)
}
