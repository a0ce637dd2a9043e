#![allow(clippy::module_name_repetitions)]

//! # linkto-core Prelude
//!
//! ## 教案级说明（Why）
//! - **统一导入面**：为上层 crate 提供稳定、浅路径的导入入口，避免业务代码中出现大量
//!   `linkto_core::proxy::...` 深层路径，降低“复制粘贴 + 临时重定义”带来的契约分叉风险。
//! - **体系定位**：位于 `linkto-core` 最外层，面向使用者暴露“常用契约组合包”，
//!   是解析器实现与路由表实现共同的必经入口。
//!
//! ## 逻辑拆解（How）
//! 1. **错误语义**：透出 [`CoreError`]、[`Result`] 别名与稳定错误码模块；
//! 2. **捕获词汇**：控制器标识、动作签名、参数渲染与捕获记录一并导出；
//! 3. **拦截协议**：替身工厂、拦截代理与裁决枚举集中暴露；
//! 4. **路由契约**：消费侧需要的 [`Router`] 与渲染结果类型。
//!
//! ## 契约定义（What）
//! - Prelude 仅收录稳定契约；新增导出遵循 SemVer，可向后兼容。

pub use crate::Error;
pub use crate::action::{ActionSignature, ControllerMeta, InvocationRecord, RenderedArg, UriParam};
pub use crate::error::{CoreError, ErrorCause, Result, codes};
pub use crate::http::{HttpMethod, HttpMethodSet};
pub use crate::proxy::{
    CallInterceptor, InterceptAgent, InterceptFlow, Interceptable, Proxifier, ProxyError,
};
pub use crate::router::{ResolvedRoute, RouteError, Router};
