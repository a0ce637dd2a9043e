//! 替身拦截协议：以显式能力表取代运行时反射的“动态代理”。
//!
//! # 模块定位（Why）
//! - 反向路由要求“在替身上调用控制器方法，却不执行真实方法体”。在静态类型世界里，
//!   这不靠运行时子类化实现，而是由每个控制器类型提供一份 [`Interceptable`] 适配：
//!   一个镜像其可调用表面的替身类型，方法体内构造捕获记录并交给拦截回调裁决；
//! - 该适配通常由 `#[linkto::controller]` 过程宏生成，也允许手写，协议本身不感知来源。
//!
//! # 协议流程（How）
//! 1. 调用方把拦截回调装入 [`InterceptAgent`]，经 [`Proxifier`] 请求某控制器的替身；
//! 2. 替身方法被调用时，先把（控制器、动作、渲染后参数）打包为
//!    [`InvocationRecord`](crate::action::InvocationRecord)，随后同步派发给回调；
//! 3. 回调返回 [`InterceptFlow::Suppress`] 时，替身以 `Default::default()` 充当中性返回值；
//!    返回 [`InterceptFlow::Delegate`] 且替身附着真实实例时，才执行真实方法体；
//! 4. 回调返回错误时，错误被闩存在代理上（[`InterceptAgent::take_fault`]），
//!    方法调用仍以中性值完成，错误不会被吞掉。
//!
//! # 契约要点（What）
//! - 替身上的每次方法调用恰好触发一次拦截，且在方法返回前同步完成；
//! - 反向路由始终走 `Suppress` 路径；`Delegate` 是协议保留的“调用真实实现”选项；
//! - 替身构造可失败（[`ProxyError::Unsupported`]），生成的适配器恒成功，
//!   手写适配器可据此拒绝无法满足契约的类型。
//!
//! # 风险提示（Trade-offs）
//! - 未附着真实实例的替身收到 `Delegate` 时只能回退到中性值，该回退由测试钉死；
//! - 闩存的回调错误需要调用方主动领取，长期不领取只意味着信息滞留，不构成内存泄漏。

use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;

use spin::Mutex;

use crate::{
    Error,
    action::{ControllerMeta, InvocationRecord},
    error::{CoreError, codes},
};

/// 拦截回调对一次捕获的裁决结果。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterceptFlow {
    /// 抑制真实方法体，替身返回中性值。反向路由的唯一路径。
    Suppress,
    /// 要求执行真实实现；仅当替身附着真实实例时生效。
    Delegate,
}

/// 拦截回调契约：替身上的每次方法调用都会同步经过它。
///
/// # 契约说明（What）
/// - **输入**：`record` 为本次调用的完整捕获，所有权交给回调；
/// - **返回**：`Ok` 携带裁决结果；`Err` 表示回调内部失败，由代理闩存后以
///   [`InterceptFlow::Suppress`] 收尾，错误可经 [`InterceptAgent::take_fault`] 领取；
/// - **前置条件**：实现必须可跨线程共享（`Send + Sync`），替身可能随调用方移动线程。
pub trait CallInterceptor: Send + Sync {
    /// 裁决一次捕获。
    fn intercept(&self, record: InvocationRecord) -> Result<InterceptFlow, CoreError>;
}

/// 拦截代理：替身与回调之间的派发枢纽，同时承担错误闩存。
///
/// # 设计背景（Why）
/// - 替身方法的返回类型由控制器签名决定，回调错误无法借方法返回值向外传播；
///   代理以闩存姿态保存最近一次回调错误，调用方在方法调用结束后领取；
/// - 代理可克隆：替身持有一份，发起方保留一份，两者共享同一错误闩。
///
/// # 契约说明（What）
/// - [`dispatch`](Self::dispatch) 同步调用回调且恰好一次；回调错误被包装为
///   [`codes::PROXY_INTERCEPT_FAILED`] 并保留原因链；
/// - [`take_fault`](Self::take_fault) 领取后闩位清空，重复领取返回 `None`；
/// - 多次失败仅保留最近一次，旧错误被覆盖。
#[derive(Clone)]
pub struct InterceptAgent {
    handler: Arc<dyn CallInterceptor>,
    fault: Arc<Mutex<Option<CoreError>>>,
}

impl InterceptAgent {
    /// 以回调构造代理。
    pub fn new(handler: Arc<dyn CallInterceptor>) -> Self {
        Self {
            handler,
            fault: Arc::new(Mutex::new(None)),
        }
    }

    /// 派发一次捕获并返回裁决结果。
    ///
    /// # 执行逻辑（How）
    /// 1. 同步调用回调；`Ok` 时原样返回裁决；
    /// 2. `Err` 时以稳定错误码包装并闩存，随后返回 [`InterceptFlow::Suppress`]，
    ///    保证替身方法始终能够以中性值完成。
    pub fn dispatch(&self, record: InvocationRecord) -> InterceptFlow {
        match self.handler.intercept(record) {
            Ok(flow) => flow,
            Err(error) => {
                let latched = CoreError::new(
                    codes::PROXY_INTERCEPT_FAILED,
                    "interceptor callback returned an error",
                )
                .with_cause(error);
                *self.fault.lock() = Some(latched);
                InterceptFlow::Suppress
            }
        }
    }

    /// 领取最近一次闩存的回调错误；领取后闩位清空。
    pub fn take_fault(&self) -> Option<CoreError> {
        self.fault.lock().take()
    }
}

impl fmt::Debug for InterceptAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptAgent")
            .field("fault_latched", &self.fault.lock().is_some())
            .finish_non_exhaustive()
    }
}

/// 可拦截能力：控制器类型进入反向路由世界的入场券。
///
/// # 设计背景（Why）
/// - 运行时反射在静态类型语言中既不可得也不可取；本契约把“能生成替身”
///   变成类型系统里的显式能力，由代码生成或手写适配提供；
/// - 关联类型 `StandIn` 使替身类型对调用方静态可见，方法调用享受完整类型检查。
///
/// # 契约说明（What）
/// - [`metadata`](Self::metadata)：控制器稳定标识，生成期固定；
/// - [`stand_in`](Self::stand_in)：构造未附着真实实例的替身（反向路由的常规入口）；
/// - [`stand_in_over`](Self::stand_in_over)：把真实实例交给替身，保留
///   [`InterceptFlow::Delegate`] 调用真实实现的能力；
/// - 两个构造函数都可拒绝：返回 [`ProxyError::Unsupported`] 表示该类型无法满足替身契约。
pub trait Interceptable: Sized + 'static {
    /// 镜像控制器可调用表面的替身类型。
    type StandIn;

    /// 控制器的稳定标识。
    fn metadata() -> &'static ControllerMeta;

    /// 构造未附着真实实例的替身。
    fn stand_in(agent: InterceptAgent) -> Result<Self::StandIn, ProxyError>;

    /// 以真实实例为底座构造替身，保留委托执行能力。
    fn stand_in_over(self, agent: InterceptAgent) -> Result<Self::StandIn, ProxyError>;
}

/// 替身构造失败的原因。
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProxyError {
    /// 目标类型声明自己无法以替身形态呈现。
    ///
    /// - **意图 (Why)**：保留“并非所有类型都可被代理”的原始语义，手写适配器可显式拒绝；
    /// - **契约 (What)**：`controller` 为目标类型名，`reason` 为面向排障人员的解释；
    /// - **风险 (Trade-offs)**：该错误对本次反向解析是致命的，重试无意义。
    Unsupported {
        /// 目标类型名。
        controller: &'static str,
        /// 拒绝原因。
        reason: Cow<'static, str>,
    },
}

impl ProxyError {
    /// 构造“无法代理”错误。
    pub fn unsupported(controller: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Unsupported {
            controller,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { controller, reason } => {
                write!(f, "type `{controller}` cannot be proxied: {reason}")
            }
        }
    }
}

impl Error for ProxyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

impl From<ProxyError> for CoreError {
    fn from(value: ProxyError) -> Self {
        match &value {
            ProxyError::Unsupported { controller, reason } => CoreError::new(
                codes::PROXY_UNSUPPORTED,
                alloc::format!("type `{controller}` cannot be proxied: {reason}"),
            ),
        }
    }
}

/// 替身工厂：协议的统一入口。
///
/// # 契约说明（What）
/// - [`proxify`](Self::proxify)：以回调构造未附着替身，代理由工厂内部装配；
/// - [`proxify_over`](Self::proxify_over)：附着真实实例的变体；
/// - [`proxify_with`](Self::proxify_with)：调用方自备 [`InterceptAgent`] 的入口，
///   适用于需要在方法调用后检查错误闩的发起方（反向路由解析器即如此）。
#[derive(Clone, Copy, Debug, Default)]
pub struct Proxifier;

impl Proxifier {
    /// 构造替身工厂。零尺寸类型，可随处复制。
    pub const fn new() -> Self {
        Self
    }

    /// 以回调构造未附着替身。
    pub fn proxify<C: Interceptable>(
        &self,
        handler: Arc<dyn CallInterceptor>,
    ) -> Result<C::StandIn, ProxyError> {
        C::stand_in(InterceptAgent::new(handler))
    }

    /// 以回调与真实实例构造附着替身。
    pub fn proxify_over<C: Interceptable>(
        &self,
        target: C,
        handler: Arc<dyn CallInterceptor>,
    ) -> Result<C::StandIn, ProxyError> {
        target.stand_in_over(InterceptAgent::new(handler))
    }

    /// 以调用方自备的代理构造未附着替身。
    pub fn proxify_with<C: Interceptable>(
        &self,
        agent: InterceptAgent,
    ) -> Result<C::StandIn, ProxyError> {
        C::stand_in(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionSignature, RenderedArg, UriParam};
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    static GREETER_META: ControllerMeta = ControllerMeta::new("Greeter");

    /// 手写控制器：真实方法体会向日志追加记录，便于断言“是否执行过”。
    struct Greeter {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Greeter {
        fn wave(&self, times: u8) {
            self.log.lock().push(alloc::format!("real wave x{times}"));
        }
    }

    /// 手写替身：与过程宏生成物同构，镜像方法构造捕获记录并走派发协议。
    struct GreeterStandIn {
        agent: InterceptAgent,
        target: Option<Greeter>,
    }

    impl GreeterStandIn {
        fn wave(&self, times: u8) {
            let record = InvocationRecord::new(
                <Greeter as Interceptable>::metadata(),
                ActionSignature::new("wave", 1),
            )
            .with_arg(RenderedArg::new("times", UriParam::render(&times)));
            match self.agent.dispatch(record) {
                InterceptFlow::Suppress => Default::default(),
                InterceptFlow::Delegate => match self.target.as_ref() {
                    Some(target) => target.wave(times),
                    None => Default::default(),
                },
            }
        }
    }

    impl Interceptable for Greeter {
        type StandIn = GreeterStandIn;

        fn metadata() -> &'static ControllerMeta {
            &GREETER_META
        }

        fn stand_in(agent: InterceptAgent) -> Result<Self::StandIn, ProxyError> {
            Ok(GreeterStandIn {
                agent,
                target: None,
            })
        }

        fn stand_in_over(self, agent: InterceptAgent) -> Result<Self::StandIn, ProxyError> {
            Ok(GreeterStandIn {
                agent,
                target: Some(self),
            })
        }
    }

    /// 记录型回调：保存所有捕获并按固定裁决回应。
    struct RecordingInterceptor {
        seen: Mutex<Vec<InvocationRecord>>,
        flow: InterceptFlow,
    }

    impl RecordingInterceptor {
        fn new(flow: InterceptFlow) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                flow,
            }
        }
    }

    impl CallInterceptor for RecordingInterceptor {
        fn intercept(&self, record: InvocationRecord) -> Result<InterceptFlow, CoreError> {
            self.seen.lock().push(record);
            Ok(self.flow)
        }
    }

    /// 故障型回调：恒返回错误，用于验证错误闩存协议。
    struct FailingInterceptor;

    impl CallInterceptor for FailingInterceptor {
        fn intercept(&self, _record: InvocationRecord) -> Result<InterceptFlow, CoreError> {
            Err(CoreError::new(codes::ROUTE_INTERNAL, "boom"))
        }
    }

    /// 拒绝被代理的类型：验证 NotProxyable 语义在能力表世界仍然成立。
    struct Opaque;

    struct OpaqueStandIn;

    impl Interceptable for Opaque {
        type StandIn = OpaqueStandIn;

        fn metadata() -> &'static ControllerMeta {
            static META: ControllerMeta = ControllerMeta::new("Opaque");
            &META
        }

        fn stand_in(_agent: InterceptAgent) -> Result<Self::StandIn, ProxyError> {
            Err(ProxyError::unsupported("Opaque", "no callable surface"))
        }

        fn stand_in_over(self, agent: InterceptAgent) -> Result<Self::StandIn, ProxyError> {
            Self::stand_in(agent)
        }
    }

    /// 抑制路径：拦截恰好一次、捕获内容完整、真实方法体不执行。
    #[test]
    fn suppress_captures_once_and_keeps_real_body_idle() {
        let handler = Arc::new(RecordingInterceptor::new(InterceptFlow::Suppress));
        let proxifier = Proxifier::new();

        let stand_in = proxifier
            .proxify::<Greeter>(handler.clone())
            .expect("Greeter 应能生成替身");

        stand_in.wave(3);

        let seen = handler.seen.lock();
        assert_eq!(seen.len(), 1, "一次方法调用应恰好产生一次拦截");
        let record = &seen[0];
        assert_eq!(record.controller().name(), "Greeter");
        assert_eq!(record.action().name(), "wave");
        assert_eq!(record.action().arity(), 1);
        assert_eq!(record.arg("times"), Some("3"), "参数应以渲染文本形式捕获");
    }

    /// 委托路径：附着真实实例时执行真实方法体，未附着时回退中性值。
    #[test]
    fn delegate_runs_real_body_only_when_attached() {
        let proxifier = Proxifier::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let attached = proxifier
            .proxify_over(
                Greeter { log: log.clone() },
                Arc::new(RecordingInterceptor::new(InterceptFlow::Delegate)),
            )
            .expect("附着替身应构造成功");
        attached.wave(2);
        {
            let entries = log.lock();
            assert_eq!(entries.len(), 1, "附着替身收到 Delegate 时应执行真实方法体");
            assert_eq!(entries[0], "real wave x2");
        }

        let detached = proxifier
            .proxify::<Greeter>(Arc::new(RecordingInterceptor::new(InterceptFlow::Delegate)))
            .expect("未附着替身应构造成功");
        detached.wave(9);
        assert_eq!(log.lock().len(), 1, "未附着替身收到 Delegate 时只能回退中性值");
    }

    /// 错误闩存：回调错误被包装后闩存，方法调用以中性值完成，领取恰好一次。
    #[test]
    fn interceptor_fault_is_latched_exactly_once() {
        let agent = InterceptAgent::new(Arc::new(FailingInterceptor));
        let stand_in = Proxifier::new()
            .proxify_with::<Greeter>(agent.clone())
            .expect("替身应构造成功");

        stand_in.wave(1);

        let fault = agent.take_fault().expect("回调错误应被闩存");
        assert_eq!(fault.code(), codes::PROXY_INTERCEPT_FAILED);
        let cause = fault.cause().expect("闩存错误应保留原因链");
        assert_eq!(
            alloc::format!("{cause}"),
            "[route.internal] boom",
            "原因链应指向回调自身的错误"
        );
        assert!(agent.take_fault().is_none(), "错误闩领取后应清空");
    }

    /// NotProxyable：拒绝构造的适配器以稳定错误码对外呈现。
    #[test]
    fn refusing_adapter_surfaces_unsupported() {
        let outcome = Proxifier::new().proxify::<Opaque>(Arc::new(FailingInterceptor));
        let error = outcome.err().expect("Opaque 应拒绝生成替身");
        assert_eq!(
            error,
            ProxyError::unsupported("Opaque", "no callable surface")
        );

        let core: CoreError = error.into();
        assert_eq!(core.code(), codes::PROXY_UNSUPPORTED);
    }
}
