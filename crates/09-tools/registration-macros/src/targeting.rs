//! 目标服务标记宏实现

use crate::utils::{fact_submission, marked_type};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Item, LitStr,
    Result, Token,
};

/// 目标服务参数
#[derive(Debug, Clone, Default)]
pub struct TargetServicesArgs {
    /// 目标服务名称
    pub services: Vec<String>,
}

impl Parse for TargetServicesArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let parsed = Punctuated::<LitStr, Token![,]>::parse_terminated(input)?;
        Ok(Self {
            services: parsed.iter().map(LitStr::value).collect(),
        })
    }
}

/// 实现 #[target_services] 宏
pub fn target_services_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let target_args = match syn::parse::<TargetServicesArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let item = parse_macro_input!(input as Item);
    let marked = match marked_type(&item) {
        Ok(marked) => marked,
        Err(e) => return e.to_compile_error().into(),
    };

    let services = &target_args.services;
    let count = services.len();
    let fact = quote! {
        ::infrastructure_common::TypeFact::Targeting(
            ::infrastructure_common::TargetingMarker::new::<[&'static str; #count], &'static str>(
                [#(#services),*]
            )
        )
    };
    let submission = fact_submission(&marked.type_ref, &fact);

    TokenStream::from(quote! {
        #item

        #submission
    })
}
