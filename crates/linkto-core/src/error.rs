use crate::Error;
use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

/// `CoreError` 表示反向路由各层共享的稳定错误域，是所有可观察错误的最终形态。
///
/// # 设计背景（Why）
/// - 替身层、路由能力与解析器在不同层次产生的故障需要合流为统一的错误码，
///   以便日志与告警系统执行精确的自动化治理。
/// - 契约层需兼容 `no_std + alloc` 场景，因此不依赖 `std::error::Error`，
///   而是复用 crate 内部定义的轻量 [`Error`] 抽象。
///
/// # 逻辑解析（How）
/// - 错误码 `code` 始终为 `'static` 字符串，承载稳定语义；`message` 面向排障人员；
///   `cause` 以装箱形式保留底层原因，通过 `source()` 暴露完整链路。
///
/// # 契约说明（What）
/// - **前置条件**：调用方必须使用 [`codes`] 模块或遵循 `<域>.<语义>` 约定的自定义码值。
/// - **返回值**：构造函数返回拥有所有权的 `CoreError`，可安全跨线程移动（`Send + Sync + 'static`）。
/// - **后置条件**：除非显式调用 [`with_cause`](Self::with_cause)，错误不包含底层原因。
///
/// # 设计取舍与风险（Trade-offs）
/// - 使用 `Cow` 保存消息，静态文案零分配，动态描述才触发堆分配；
/// - 结构体仅负责承载信息，不执行任何格式化或指标上报逻辑，由调用方处理。
#[derive(Debug)]
pub struct CoreError {
    code: &'static str,
    message: Cow<'static, str>,
    cause: Option<ErrorCause>,
}

impl CoreError {
    /// 构造核心错误。
    ///
    /// # 契约定义（What）
    /// - **输入参数**：
    ///   - `code`：遵循 `<领域>.<语义>` 约定的稳定错误码，通常取自 [`codes`]；
    ///   - `message`：面向排障人员的自然语言描述，可为 `&'static str` 或堆分配字符串。
    /// - **后置条件**：返回的错误不含底层原因，可稍后通过 [`with_cause`](Self::with_cause) 填充。
    ///
    /// # 示例（Examples）
    /// ```rust
    /// use linkto_core::CoreError;
    /// use linkto_core::error::codes;
    ///
    /// let err = CoreError::new(codes::ROUTE_NOT_FOUND, "no route for Profile::upload_form");
    /// assert_eq!(err.code(), codes::ROUTE_NOT_FOUND);
    /// assert!(err.cause().is_none(), "初始错误默认不含底层原因");
    /// ```
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// 附带底层原因并返回新的核心错误。
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 获取稳定错误码。
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// 获取描述。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 获取底层原因。
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }

    /// 返回适合排障会议或值班新人的“人话”描述。
    ///
    /// # 契约定义（What）
    /// - **返回值**：若错误码在官方表中登记，返回借用的静态文案；否则克隆核心消息。
    /// - **后置条件**：不会修改内部状态，可在日志格式化、告警聚合等路径安全复用。
    pub fn human(&self) -> Cow<'static, str> {
        lookup_human_and_hint(self.code)
            .map(|(human, _)| Cow::Borrowed(human))
            .unwrap_or_else(|| self.message.clone())
    }

    /// 返回修复建议，帮助值班人员快速完成处置。
    ///
    /// # 契约定义（What）
    /// - **返回值**：错误码登记在官方表中时返回 `Some(Cow::Borrowed(hint))`，否则为 `None`；
    /// - **前置条件**：无；本方法不会触发额外分配或 I/O。
    pub fn hint(&self) -> Option<Cow<'static, str>> {
        lookup_human_and_hint(self.code).and_then(|(_, hint)| hint.map(Cow::Borrowed))
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for CoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|boxed| boxed.as_ref() as &(dyn Error + 'static))
    }
}

/// 错误链中底层原因的统一装箱形态。
///
/// # 契约说明（What）
/// - 任何实现了 [`Error`] 且满足 `Send + Sync + 'static` 的类型都可以作为原因挂载；
/// - 链路通过 `source()` 递归展开，与 `std::error::Error` 的惯例保持一致。
pub type ErrorCause = Box<dyn Error + Send + Sync + 'static>;

/// 反向路由域的稳定错误码集合。
///
/// # 设计背景（Why）
/// - 替身构造失败、拦截回调异常、路由渲染缺失与取值时序错误是本域的高频故障模式，
///   必须提供标准化标识以便调用方实施兜底策略。
/// - 错误码遵循 `<领域>.<语义>` 命名约定，方便在跨组件日志中检索与聚合。
///
/// # 契约说明（What）
/// - **使用前提**：错误码应由实现者封装进 [`CoreError`](crate::CoreError) 或下游错误类型；
/// - **返回承诺**：调用方收到这些错误码后，可据此区分“调用方编程错误”与“路由配置缺口”。
pub mod codes {
    /// 目标类型无法以替身形态呈现。
    pub const PROXY_UNSUPPORTED: &str = "proxy.unsupported";
    /// 拦截回调返回错误。
    pub const PROXY_INTERCEPT_FAILED: &str = "proxy.intercept_failed";
    /// 路由表中不存在可渲染捕获记录的路由。
    pub const ROUTE_NOT_FOUND: &str = "route.not_found";
    /// 路由能力内部故障。
    pub const ROUTE_INTERNAL: &str = "route.internal";
    /// 解析闭包执行完毕但未发生任何拦截捕获。
    pub const ROUTES_CAPTURE_MISSING: &str = "routes.capture_missing";
    /// 在任何一次成功解析之前读取了解析结果。
    pub const ROUTES_STATE_EMPTY: &str = "routes.state_empty";
}

/// 集中维护错误码到“人话摘要 + 修复建议”的映射。
///
/// # 契约说明（What）
/// - **输入参数**：`code` 为遵循 `<领域>.<语义>` 规范的稳定错误码；
/// - **返回值**：命中预置表时返回 `(human, hint)`，`hint` 为空表示暂未提供自动化指引；
/// - **后置条件**：纯读操作，可在 `no_std + alloc` 环境下安全复用。
///
/// # 风险提示（Trade-offs）
/// - 新增错误码时需同步更新此表与集成测试，否则 `hint()` 返回 `None`。
fn lookup_human_and_hint(code: &str) -> Option<(&'static str, Option<&'static str>)> {
    match code {
        codes::ROUTE_NOT_FOUND => Some((
            "路由渲染失败：捕获到的控制器方法没有登记对应路由",
            Some("比对控制器名与动作名是否与路由表登记一致；确认路由规格在应用启动时已注册"),
        )),
        codes::ROUTES_STATE_EMPTY => Some((
            "读取时序错误：尚未完成任何一次成功的反向解析",
            Some("确认调用顺序为“获取替身 → 调用方法 → 读取 URI”；推荐改用一步式 resolve 接口"),
        )),
        codes::ROUTES_CAPTURE_MISSING => Some((
            "捕获缺失：解析闭包内没有对替身发起任何方法调用",
            Some("检查闭包体是否真的调用了替身方法；空闭包属于调用方编程错误"),
        )),
        codes::PROXY_UNSUPPORTED => Some((
            "替身构造失败：目标类型声明自己无法满足替身契约",
            Some("改用过程宏生成的适配器，或检查手写适配器拒绝构造的原因"),
        )),
        _ => None,
    }
}

/// `Result` 别名统一携带 [`CoreError`] 之外的领域错误类型。
pub type Result<T, E = CoreError> = core::result::Result<T, E>;

const _: fn() = || {
    fn assert_error_traits<T: Error + Send + Sync + 'static>() {}

    assert_error_traits::<CoreError>();
};
