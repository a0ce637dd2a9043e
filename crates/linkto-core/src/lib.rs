#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![allow(private_bounds)]
#![doc = "linkto-core: 反向路由核心契约——替身拦截协议与路由能力接口。"]
#![doc = ""]
#![doc = "== 职责边界 =="]
#![doc = "本 crate 固化三件事：控制器方法调用的捕获词汇（`action`）、把方法调用改道到回调的替身协议（`proxy`）、"]
#![doc = "以及核心消费的路由能力契约（`router`）。路由表的构建与模式语法属于外部协作方。"]
#![doc = ""]
#![doc = "== 内存分配依赖 =="]
#![doc = "`linkto-core` 定位于 `no_std + alloc` 场景：捕获记录与渲染结果依赖 [`alloc`] 中的 `String`、`Vec`、`Arc`。"]
#![doc = "纯 `no_std`（无分配器）环境不支持；`std` Feature 仅作为向下游传播的开关，本 crate 自身不依赖任何 `std` 设施。"]

extern crate alloc;

/// 框架门面命名空间。
///
/// # 设计目标（Why）
/// - 统一向外暴露 `#[linkto::controller]` 过程宏与生成代码依赖的模块路径，
///   避免业务代码直接依赖内部 crate 名称；
/// - 生成代码中的路径一律写作 `linkto::...`：既兼容 `use linkto_core as linkto;`
///   的整 crate 重命名，也兼容 `use linkto_core::linkto;` 的按模块导入。
///
/// # 使用方式（How）
/// - 任选一种导入方式后，即可直接书写 `#[linkto::controller]`；
/// - 若未来增加更多过程宏，只需在此模块追加 re-export 即可。
pub mod linkto {
    pub use crate::{action, error, http, prelude, proxy, router};
    pub use linkto_macros::controller;
}

pub use linkto_macros::controller;

mod sealed;

pub mod action;
pub mod error;
pub mod http;
pub mod prelude;
pub mod proxy;
pub mod router;

pub use action::{ActionSignature, ControllerMeta, InvocationRecord, RenderedArg, UriParam};
pub use error::{CoreError, ErrorCause, Result};
pub use http::{HttpMethod, HttpMethodSet};
pub use proxy::{
    CallInterceptor, InterceptAgent, InterceptFlow, Interceptable, Proxifier, ProxyError,
};
pub use router::{ResolvedRoute, RouteError, Router};

use alloc::boxed::Box;
use core::fmt;

/// `linkto-core` 中所有错误必须实现的 `no_std` 基础 Trait。
///
/// # 设计背景（Why）
/// - `std::error::Error` 在 `no_std` 环境不可用，需要一个对象安全、平台无关的错误抽象来串联错误链；
/// - 该 Trait 作为所有错误类型的“最小公共接口”，帮助在 `alloc` 场景下完成跨模块错误传递。
///
/// # 逻辑解析（How）
/// - 约束实现者提供 `Debug` 与 `Display`，便于日志与可观测性收集；
/// - `source` 递归返回链路上游错误，与 `std::error::Error::source` 语义一致。
///
/// # 契约说明（What）
/// - **前置条件**：作为 [`ErrorCause`] 装箱时，实现类型需满足 `Send + Sync + 'static`；
/// - **后置条件**：`source` 返回的引用生命周期受限于 `self`，防止悬垂。
///
/// # 设计取舍与风险（Trade-offs）
/// - 未在 Trait 上强加 `Send + Sync`，避免对 `no_std` 设备强加多余负担；
/// - 若底层错误不提供 `source`，错误链在此终止，这是设计允许的边界情况。
pub trait Error: fmt::Debug + fmt::Display + crate::sealed::Sealed {
    /// 返回当前错误的上游来源。
    fn source(&self) -> Option<&(dyn Error + 'static)>;
}

impl<E> Error for Box<E>
where
    E: Error + ?Sized,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        (**self).source()
    }
}
