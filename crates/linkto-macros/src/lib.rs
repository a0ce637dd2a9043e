//! linkto 框架过程宏入口。
//!
//! # 设计意图（Why）
//! - 把“每个控制器一份替身适配”的模板代码下沉到编译期展开，业务侧只声明普通 impl 块；
//! - 保证生成实现遵循 `linkto-core::proxy::Interceptable` 契约，避免手写替身时
//!   遗漏捕获字段或写错派发协议；
//! - 通过过程宏维持统一风格，便于文档与样例引用同一套 API。
//!
//! # 集成方式（How）
//! - 在业务 crate 中将 `linkto_core` 引用重命名为 `linkto`，即可使用 `#[linkto::controller]`；
//! - 宏原样保留被标注的 impl 块，并追加三件生成物：`<类型名>StandIn` 替身结构体、
//!   目标类型的 `Interceptable` 实现、以及 `#[cfg(test)]` 下的契约审计函数；
//! - 替身方法与原方法同签名：先构造捕获记录并派发给拦截回调，`Suppress` 时以
//!   `Default::default()` 充当中性返回值，`Delegate` 且附着真实实例时才执行原方法体。
//!
//! # 约束与取舍（Trade-offs）
//! - 仅镜像 `&self` 同步方法；关联函数与非方法条目留在真实类型上，不进入替身表面；
//! - 方法参数类型需实现 `linkto::action::UriParam`，返回类型需实现 `Default`，
//!   两者由生成代码在使用处触发编译期检查；
//! - 宏假设调用方在编译单元中将 `linkto_core` 重命名为 `linkto`，否则路径解析会失败。

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Error, FnArg, ImplItem, ImplItemFn, ItemImpl, Pat, Type, parse_macro_input, spanned::Spanned,
};

/// 为控制器 impl 块生成替身适配，使该类型满足可拦截契约。
///
/// # 语义说明（What）
/// - **输入**：无泛型的固有 impl 块，目标类型为具名结构体路径；
/// - **输出**：原 impl 块 + `<类型名>StandIn` 结构体 + `Interceptable` 实现 + 契约审计函数；
/// - **前置条件**：被镜像方法的参数实现 `UriParam`，返回类型实现 `Default`；
/// - **后置条件**：替身方法调用恰好触发一次拦截派发，真实方法体仅在委托路径执行。
///
/// # 风险提示（Trade-offs）
/// - `&mut self` 与按值接收的方法无法在抑制路径上满足中性返回契约，直接拒绝；
/// - 控制器类型建议声明为 `pub`，否则生成的替身结构体可能触发可见性告警。
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new(
            proc_macro2::Span::call_site(),
            "#[linkto::controller] 不接受参数",
        )
        .to_compile_error()
        .into();
    }

    let block = parse_macro_input!(item as ItemImpl);
    expand_controller(block)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_controller(block: ItemImpl) -> Result<proc_macro2::TokenStream, Error> {
    if let Some((_, trait_path, _)) = &block.trait_ {
        return Err(Error::new(
            trait_path.span(),
            "#[linkto::controller] 仅支持固有 impl 块，不支持 trait impl",
        ));
    }

    if !block.generics.params.is_empty() || block.generics.where_clause.is_some() {
        return Err(Error::new(
            block.generics.span(),
            "#[linkto::controller] 暂不支持带泛型参数的 impl 块",
        ));
    }

    let self_ident = match block.self_ty.as_ref() {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path
                .path
                .segments
                .last()
                .ok_or_else(|| Error::new(type_path.span(), "目标类型路径为空"))?;
            if !segment.arguments.is_none() {
                return Err(Error::new(
                    segment.arguments.span(),
                    "#[linkto::controller] 暂不支持带泛型参数的目标类型",
                ));
            }
            segment.ident.clone()
        }
        other => {
            return Err(Error::new(
                other.span(),
                "#[linkto::controller] 要求目标类型为具名结构体路径",
            ));
        }
    };

    let stand_in_ident = format_ident!("{}StandIn", self_ident);
    let audit_ident = format_ident!("__linkto_controller_audit_{}", self_ident);
    let controller_name = self_ident.to_string();
    let stand_in_doc = format!(
        "`{controller_name}` 的替身类型：方法调用改道至拦截回调，真实方法体不执行。"
    );

    let mut mirrored_methods = Vec::new();
    for item in &block.items {
        let ImplItem::Fn(method) = item else {
            // 非方法条目（常量、关联类型等）留在真实类型上，不进入替身表面。
            continue;
        };
        if let Some(mirror) = mirror_method(&self_ident, method)? {
            mirrored_methods.push(mirror);
        }
    }

    let expanded = quote! {
        #block

        #[doc = #stand_in_doc]
        pub struct #stand_in_ident {
            __linkto_agent: linkto::proxy::InterceptAgent,
            __linkto_target: ::core::option::Option<#self_ident>,
        }

        impl #stand_in_ident {
            #(#mirrored_methods)*
        }

        impl linkto::proxy::Interceptable for #self_ident {
            type StandIn = #stand_in_ident;

            fn metadata() -> &'static linkto::action::ControllerMeta {
                static __LINKTO_META: linkto::action::ControllerMeta =
                    linkto::action::ControllerMeta::new(#controller_name);
                &__LINKTO_META
            }

            fn stand_in(
                agent: linkto::proxy::InterceptAgent,
            ) -> ::core::result::Result<Self::StandIn, linkto::proxy::ProxyError> {
                ::core::result::Result::Ok(#stand_in_ident {
                    __linkto_agent: agent,
                    __linkto_target: ::core::option::Option::None,
                })
            }

            fn stand_in_over(
                self,
                agent: linkto::proxy::InterceptAgent,
            ) -> ::core::result::Result<Self::StandIn, linkto::proxy::ProxyError> {
                ::core::result::Result::Ok(#stand_in_ident {
                    __linkto_agent: agent,
                    __linkto_target: ::core::option::Option::Some(self),
                })
            }
        }

        #[cfg(test)]
        #[allow(dead_code, non_snake_case)]
        fn #audit_ident() {
            /// 检查生成的适配满足可拦截契约，且替身类型绑定到生成的结构体。
            fn assert_interceptable<C, S>()
            where
                C: linkto::proxy::Interceptable<StandIn = S>,
            {
            }

            assert_interceptable::<#self_ident, #stand_in_ident>();
        }
    };

    Ok(expanded)
}

/// 为单个方法生成替身镜像；关联函数（无接收者）返回 `None` 表示跳过。
fn mirror_method(
    self_ident: &syn::Ident,
    method: &ImplItemFn,
) -> Result<Option<proc_macro2::TokenStream>, Error> {
    let mut inputs = method.sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver)) => {
            if receiver.reference.is_none() || receiver.mutability.is_some() {
                return Err(Error::new(
                    receiver.span(),
                    "#[linkto::controller] 仅镜像 `&self` 方法；`&mut self` 或按值接收无法满足替身契约",
                ));
            }
        }
        // 关联函数不属于实例调用表面，保留在真实类型上。
        _ => return Ok(None),
    }

    if method.sig.asyncness.is_some() {
        return Err(Error::new(
            method.sig.span(),
            "#[linkto::controller] 仅支持同步方法",
        ));
    }
    if method.sig.constness.is_some() || method.sig.unsafety.is_some() {
        return Err(Error::new(
            method.sig.span(),
            "#[linkto::controller] 不支持 const 或 unsafe 方法",
        ));
    }
    if !method.sig.generics.params.is_empty() || method.sig.generics.where_clause.is_some() {
        return Err(Error::new(
            method.sig.generics.span(),
            "#[linkto::controller] 暂不支持带泛型参数的方法",
        ));
    }

    let mut param_idents = Vec::new();
    for input in inputs {
        let FnArg::Typed(pat_type) = input else {
            return Err(Error::new(input.span(), "方法参数解析失败"));
        };
        match pat_type.pat.as_ref() {
            Pat::Ident(pat_ident) => param_idents.push(pat_ident.ident.clone()),
            other => {
                return Err(Error::new(
                    other.span(),
                    "#[linkto::controller] 要求参数使用具名标识符模式",
                ));
            }
        }
    }

    let attrs = &method.attrs;
    let vis = &method.vis;
    let sig = &method.sig;
    let method_ident = &method.sig.ident;
    let action_name = method_ident.to_string();
    let arity = param_idents.len();
    let arg_renders = param_idents.iter().map(|param| {
        let param_name = param.to_string();
        quote! {
            .with_arg(linkto::action::RenderedArg::new(
                #param_name,
                linkto::action::UriParam::render(&#param),
            ))
        }
    });

    Ok(Some(quote! {
        #(#attrs)*
        #vis #sig {
            let __linkto_record = linkto::action::InvocationRecord::new(
                <#self_ident as linkto::proxy::Interceptable>::metadata(),
                linkto::action::ActionSignature::new(#action_name, #arity),
            )#(#arg_renders)*;
            match self.__linkto_agent.dispatch(__linkto_record) {
                linkto::proxy::InterceptFlow::Suppress => ::core::default::Default::default(),
                linkto::proxy::InterceptFlow::Delegate => {
                    match self.__linkto_target.as_ref() {
                        ::core::option::Option::Some(__linkto_real) => {
                            __linkto_real.#method_ident(#(#param_idents),*)
                        }
                        ::core::option::Option::None => ::core::default::Default::default(),
                    }
                }
            }
        }
    }))
}
