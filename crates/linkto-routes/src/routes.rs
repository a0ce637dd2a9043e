//! # 反向路由解析器（DefaultRoutes）
//!
//! ## 核心意图（Why）
//! - 让“应该链接到哪个 URI”由控制器方法调用表达，而不是手写 URI 字符串：
//!   调用方在替身上发起一次方法调用，解析器立刻把捕获记录交给路由表渲染；
//! - URI 与控制器签名由此保持编译期同步，方法改名或参数变更会直接体现在调用点上。
//!
//! ## 协作方式（How）
//! 1. [`DefaultRoutes::resolve`] 为一次性用法：构造替身、执行闭包、读取本次结果；
//! 2. [`DefaultRoutes::uri_for`] 与 [`DefaultRoutes::uri`] 为两步式用法：替身方法返回的是
//!    控制器自身的签名类型，渲染失败无法经返回值传播，于是失败进入暂存位
//!    （[`DefaultRoutes::take_failure`] 领取），成功进入“最近一次成功”状态；
//! 3. [`DefaultRoutes::allowed_methods_for`] 直接转发路由表的方法集合查询。
//!
//! ## 状态契约（What）
//! - 成功写入会同时清空暂存失败；失败写入不触碰最近一次成功；
//! - 同一实例上的多次捕获遵循“最后一次调用生效”；
//! - [`DefaultRoutes::uri`] 只读最近一次成功，从不消费暂存失败。
//!
//! ## 风险提示（Trade-offs）
//! - 克隆解析器共享同一状态单元，跨任务并发捕获时结果按写入顺序覆盖；
//!   需要隔离结果的调用方应为每个工作流构造独立实例。

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
use std::{borrow::ToOwned, sync::Arc};

#[cfg(not(feature = "std"))]
use alloc::{borrow::ToOwned, sync::Arc};

use core::fmt;

use spin::Mutex;

use linkto_core::action::InvocationRecord;
use linkto_core::error::CoreError;
use linkto_core::http::HttpMethodSet;
use linkto_core::proxy::{CallInterceptor, InterceptAgent, InterceptFlow, Interceptable, Proxifier};
use linkto_core::router::{ResolvedRoute, Router};

use crate::error::RoutesError;

/// 解析器共享状态：最近一次成功与暂存失败分槽存放。
///
/// `generation` 在每次捕获写入时递增，[`DefaultRoutes::resolve`] 据此区分
/// “本次闭包没有触发捕获”与“状态来自历史调用”。
#[derive(Debug, Default)]
struct ResolverState {
    resolved: Option<ResolvedRoute>,
    failure: Option<RoutesError>,
    generation: u64,
}

/// 捕获回调：把替身方法调用翻译成路由查询，并写入共享状态。
struct CaptureInterceptor {
    router: Arc<dyn Router>,
    state: Arc<Mutex<ResolverState>>,
}

impl CallInterceptor for CaptureInterceptor {
    /// 对每次捕获查询路由表；两个分支都在同一次持锁内完成写入。
    ///
    /// - 成功：写入最近一次成功位并清空暂存失败，旧失败不再可领取；
    /// - 失败：写入暂存失败位，最近一次成功保持原值。
    fn intercept(&self, record: InvocationRecord) -> Result<InterceptFlow, CoreError> {
        let outcome = self.router.url_for(&record);
        let mut state = self.state.lock();
        state.generation = state.generation.wrapping_add(1);
        match outcome {
            Ok(route) => {
                state.resolved = Some(route);
                state.failure = None;
            }
            Err(error) => {
                state.failure = Some(RoutesError::from(error));
            }
        }
        Ok(InterceptFlow::Suppress)
    }
}

/// 反向路由解析器。
///
/// # 教案式说明
/// - **意图 (Why)**：以“替身方法调用”为输入、“URI 文本”为输出的解析门面，
///   路由表的存储与匹配策略经 [`Router`] 契约完全外置；
/// - **契约 (What)**：
///   - [`resolve`](Self::resolve) 是推荐入口，错误随返回值直接暴露；
///   - 两步式入口（[`uri_for`](Self::uri_for) + [`uri`](Self::uri)）保留
///     “先拿替身、多处调用、统一读取”的使用形态，失败经
///     [`take_failure`](Self::take_failure) 领取且恰好一次；
///   - 克隆共享同一状态单元与路由表引用。
/// - **执行逻辑 (How)**：每次构造替身都会装配一个写回共享状态的捕获回调，
///   替身方法调用同步完成“捕获、查表、写状态”三步后以中性值返回。
/// - **设计权衡 (Trade-offs)**：暂存失败只保留最近一次，旧失败被成功或更新的失败覆盖；
///   该取舍换来状态单元的恒定内存占用。
#[derive(Clone)]
pub struct DefaultRoutes {
    router: Arc<dyn Router>,
    proxifier: Proxifier,
    state: Arc<Mutex<ResolverState>>,
}

impl DefaultRoutes {
    /// 以路由表构造解析器，初始状态为空。
    pub fn new(router: Arc<dyn Router>) -> Self {
        Self {
            router,
            proxifier: Proxifier::new(),
            state: Arc::new(Mutex::new(ResolverState::default())),
        }
    }

    /// 装配一个写回共享状态的捕获代理。
    fn capture_agent(&self) -> InterceptAgent {
        InterceptAgent::new(Arc::new(CaptureInterceptor {
            router: Arc::clone(&self.router),
            state: Arc::clone(&self.state),
        }))
    }

    /// 构造控制器 `C` 的替身，其上的方法调用会被捕获并立刻解析。
    ///
    /// # 契约说明（What）
    /// - **输出**：未附着真实实例的替身；方法调用以中性值返回，真实方法体不执行；
    /// - **错误**：类型拒绝生成替身时返回 [`RoutesError::Unproxyable`]；
    /// - **后置条件**：替身上每次方法调用都会更新本解析器的共享状态。
    pub fn uri_for<C: Interceptable>(&self) -> Result<C::StandIn, RoutesError> {
        self.proxifier
            .proxify_with::<C>(self.capture_agent())
            .map_err(RoutesError::from)
    }

    /// 读取最近一次成功解析的 URI。
    ///
    /// 渲染失败不会清空该状态：上一次成功仍然可读，失败本身经
    /// [`take_failure`](Self::take_failure) 领取。实例上尚无任何成功时返回
    /// [`RoutesError::NoResolutionYet`]。
    pub fn uri(&self) -> Result<ResolvedRoute, RoutesError> {
        self.state
            .lock()
            .resolved
            .clone()
            .ok_or(RoutesError::NoResolutionYet)
    }

    /// 领取最近一次暂存的解析失败；领取后暂存位清空。
    ///
    /// 返回 `None` 表示没有待领取的失败：要么从未失败，要么已被领取，
    /// 要么后续成功已将其覆盖。
    pub fn take_failure(&self) -> Option<RoutesError> {
        self.state.lock().failure.take()
    }

    /// 一次性解析：构造替身、执行闭包、返回本次捕获的渲染结果。
    ///
    /// # 执行逻辑（How）
    /// 1. 记录当前捕获代数，构造替身并执行闭包；
    /// 2. 代数未变化说明闭包没有触发任何镜像方法，报告
    ///    [`RoutesError::CaptureMissing`]，历史状态不参与判定；
    /// 3. 闭包触发多次捕获时遵循“最后一次调用生效”：末次失败随返回值暴露
    ///    （暂存位同步清空），末次成功返回其 URI。
    ///
    /// # 契约说明（What）
    /// - 成功与失败都会照常写入共享状态：之后 [`uri`](Self::uri) 读到的是最近一次
    ///   成功的捕获，末次失败只随本次返回值暴露，不改写该读数。
    pub fn resolve<C, F>(&self, visit: F) -> Result<ResolvedRoute, RoutesError>
    where
        C: Interceptable,
        F: FnOnce(&C::StandIn),
    {
        let before = self.state.lock().generation;
        let stand_in = self.uri_for::<C>()?;
        visit(&stand_in);

        let mut state = self.state.lock();
        if state.generation == before {
            return Err(RoutesError::CaptureMissing {
                controller: C::metadata().name().to_owned(),
            });
        }
        if let Some(failure) = state.failure.take() {
            return Err(failure);
        }
        match state.resolved.clone() {
            Some(route) => Ok(route),
            None => Err(RoutesError::CaptureMissing {
                controller: C::metadata().name().to_owned(),
            }),
        }
    }

    /// 查询字面 URI 接受的 HTTP 方法集合。
    ///
    /// 空集合表示无路由命中，不构成错误。
    pub fn allowed_methods_for(&self, uri: &str) -> HttpMethodSet {
        self.router.allowed_methods_for(uri)
    }
}

impl fmt::Debug for DefaultRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DefaultRoutes")
            .field("resolved", &state.resolved)
            .field("failure_parked", &state.failure.is_some())
            .finish_non_exhaustive()
    }
}
