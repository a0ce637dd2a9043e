#![cfg_attr(not(feature = "std"), no_std)]

//! # linkto-routes
//!
//! ## 定位与职责（Why）
//! - 作为反向路由的装配层，把 `linkto-core` 的替身拦截协议与路由能力契约组合成
//!   可直接使用的解析器 [`DefaultRoutes`]，覆盖从“替身方法调用”到“URI 文本”的完整闭环；
//! - 自带 [`StaticRouter`] 作为开箱即用的 `Router` 实现，支持字面路径与 `{参数名}`
//!   模板两种登记形态，生产级路由表可在外部自行实现同一契约后替换接入。
//!
//! ## 架构嵌入（Where）
//! - `routes` 模块承载解析器：捕获回调、“最近一次成功”状态与失败暂存位；
//! - `static_router` 模块实现 `linkto_core::router::Router` 契约；
//! - `error` 模块集中定义错误类型，统一向 `linkto_core::CoreError` 的稳定错误码收敛。
//!
//! ## Feature 策略（Trade-offs）
//! - `std` 特性开启后派生 `thiserror::Error`，与生态错误链互操作；
//! - `alloc` 特性保证在无 `std` 的受限运行时内完成基础编译，错误展示退化为手写 `Display`。

#[cfg(not(feature = "std"))]
extern crate alloc;

/// 错误类型与诊断信息集中声明处。
///
/// - **意图说明 (Why)**：归并替身构造失败、路由未命中、实现内部故障等不同类别，
///   供上层精确分流处理；
/// - **契约定位 (What)**：所有变体均可经 `From` 转换为 `linkto_core::CoreError`，
///   携带稳定错误码；
/// - **风险提示 (Trade-offs)**：路由登记属静态配置，多数错误重试无意义，调用方应修正登记。
pub mod error;

/// 反向路由解析器的核心入口。
///
/// - **意图说明 (Why)**：把“在替身上调用控制器方法”翻译为“查询路由表并渲染 URI”；
/// - **契约定位 (What)**：对外暴露 `resolve` / `uri_for` / `uri` / `take_failure` /
///   `allowed_methods_for` 五个操作；
/// - **架构位置 (Where)**：持有 `Arc<dyn Router>`，不感知路由表的存储与匹配策略。
pub mod routes;

/// 静态路由表实现。
///
/// - **意图说明 (Why)**：为测试与小型应用提供零依赖的路由表，免去接入外部路由系统的成本；
/// - **契约定位 (What)**：实现 `linkto_core::router::Router`，登记项为
///   （HTTP 方法、URI 模板、控制器名、动作名）四元组；
/// - **扩展指引 (How)**：复杂匹配（正则、优先级、尾部通配）应在外部实现同一契约，不在此膨胀。
pub mod static_router;

pub use error::RoutesError;
pub use routes::DefaultRoutes;
pub use static_router::{RouteSpec, StaticRouter};
