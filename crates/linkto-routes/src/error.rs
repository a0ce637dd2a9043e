//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 为解析器对外暴露的错误语义提供集中定义，确保与 `linkto_core::CoreError` 对齐；
//! - 归档替身构造失败、路由未命中、实现内部故障、捕获缺失等不同类别，
//!   方便调用方按类分流与观测。
//!
//! ## 设计要求（What）
//! - 启用 `std` 特性时派生 `thiserror::Error`，兼容 `std::error::Error` 生态；
//! - 错误变体携带可读上下文（控制器名、动作名、后端错误码），展示文本保持英文，
//!   与核心层的错误展示约定一致；
//! - 保留细粒度枚举以支撑精确处理：路由登记属静态配置，未命中类错误重试无意义。
//!
//! ## 扩展建议（How）
//! - 新增变体时同步维护 `From<RoutesError> for CoreError` 的稳定错误码映射与
//!   `no_std` 下的手写 `Display` 分支。

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use core::fmt;

#[cfg(feature = "std")]
use std::{borrow::ToOwned, string::String};

#[cfg(not(feature = "std"))]
use alloc::{borrow::ToOwned, format, string::String};

use linkto_core::error::{CoreError, codes};
use linkto_core::proxy::ProxyError;
use linkto_core::router::RouteError;

#[cfg(feature = "std")]
use thiserror::Error;

/// 解析器错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：聚合反向解析全流程的失败形态，并为统一转换成 [`CoreError`] 做准备；
///   细粒度枚举帮助调用方区分“配置缺口”“类型能力缺失”与“实现缺陷”。
/// - **契约 (What)**：
///   - 所有变体均为 `Send + Sync + 'static`，可安全跨线程传播；
///   - 启用 `std` 特性时派生 [`thiserror::Error`]，保证与生态兼容；
///   - 通过 [`From<RoutesError>`](From) 自动转换为核心错误，便于调用方直接 `?` 传播。
/// - **执行逻辑 (How)**：底层的 [`ProxyError`] 与 [`RouteError`] 在进入本错误域时被摘取
///   关键坐标（类型名、动作名、错误码），`From<RoutesError> for CoreError` 再据此挑选
///   稳定错误码并拼装描述。
/// - **设计权衡 (Trade-offs)**：使用 `String` 保存上下文，牺牲少量堆分配换取
///   `Clone + Eq` 的断言友好性；原因链在摘取时展平为文本，不保留装箱错误。
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoutesError {
    /// 目标控制器类型拒绝生成替身。
    ///
    /// - **意图 (Why)**：保留“并非所有类型都可被代理”的语义，手写适配器可显式拒绝；
    /// - **契约 (What)**：`controller` 为目标类型名，`reason` 为适配器给出的拒绝解释；
    /// - **风险 (Trade-offs)**：该错误对本次解析是致命的，重试无意义，应改用可代理类型。
    #[cfg_attr(
        feature = "std",
        error("type `{controller}` cannot be proxied: {reason}")
    )]
    Unproxyable { controller: String, reason: String },

    /// 路由表中不存在可渲染该捕获记录的登记。
    ///
    /// - **意图 (Why)**：把“配置缺口”与实现内部故障区分开，直接指向路由登记；
    /// - **契约 (What)**：`controller` 与 `action` 复述捕获记录的关键坐标，便于日志定位；
    /// - **风险 (Trade-offs)**：路由是静态配置，调用方应修正登记而非重试。
    #[cfg_attr(
        feature = "std",
        error("no route registered for `{controller}::{action}`")
    )]
    NoRouteFound { controller: String, action: String },

    /// 路由实现内部故障，例如模板槽位缺少同名参数。
    ///
    /// - **意图 (Why)**：为路由实现的缺陷提供独立类别，避免与配置缺口混淆；
    /// - **契约 (What)**：`code` 为后端报告的稳定错误码，`detail` 为人类可读说明；
    /// - **风险 (Trade-offs)**：原因链展平为文本，深层排障需回看路由实现自身的日志。
    #[cfg_attr(feature = "std", error("router backend failed with [{code}]: {detail}"))]
    RouterInternal { code: &'static str, detail: String },

    /// `resolve` 的闭包结束时没有任何镜像方法被调用。
    ///
    /// - **意图 (Why)**：阻止“闭包忘记调用方法却拿到上一次结果”这类静默错误；
    /// - **契约 (What)**：`controller` 为本次请求替身的控制器类型名；
    /// - **风险 (Trade-offs)**：判定依据是本次调用内的捕获次数，与历史状态无关。
    #[cfg_attr(
        feature = "std",
        error("closure returned without touching any mirrored method on `{controller}`")
    )]
    CaptureMissing { controller: String },

    /// 实例上还没有任何一次成功解析。
    ///
    /// - **意图 (Why)**：两步式用法里“先读结果后发调用”属顺序颠倒，需显式报告；
    /// - **契约 (What)**：只在最近成功位为空时出现；失败暂存位不影响该判定；
    /// - **风险 (Trade-offs)**：调用方据此修正调用顺序即可，无需其他补救。
    #[cfg_attr(
        feature = "std",
        error("no URI has been resolved on this instance yet")
    )]
    NoResolutionYet,
}

impl From<ProxyError> for RoutesError {
    /// 摘取替身构造失败的坐标与解释。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：[`ProxyError`] 是声明为不可穷举的外部枚举，集中转换避免调用方
    ///   各自书写兜底分支；
    /// - **执行 (How)**：已知变体逐字段摘取；未来新增的变体落入内部故障兜底。
    fn from(value: ProxyError) -> Self {
        match &value {
            ProxyError::Unsupported { controller, reason } => RoutesError::Unproxyable {
                controller: (*controller).to_owned(),
                reason: reason.clone().into_owned(),
            },
            _ => RoutesError::RouterInternal {
                code: codes::ROUTE_INTERNAL,
                detail: format!("unrecognized proxy failure: {value}"),
            },
        }
    }
}

impl From<RouteError> for RoutesError {
    /// 摘取路由能力失败的坐标与错误码。
    fn from(value: RouteError) -> Self {
        match &value {
            RouteError::NotFound { controller, action } => RoutesError::NoRouteFound {
                controller: controller.clone().into_owned(),
                action: action.clone().into_owned(),
            },
            RouteError::Internal(cause) => RoutesError::RouterInternal {
                code: cause.code(),
                detail: cause.message().to_owned(),
            },
            _ => RoutesError::RouterInternal {
                code: codes::ROUTE_INTERNAL,
                detail: format!("unrecognized router failure: {value}"),
            },
        }
    }
}

impl From<RoutesError> for CoreError {
    /// 将解析器错误转换为统一的核心错误。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：上层组件以 [`CoreError`] 作为通用错误货币，通过 `From` 实现使
    ///   `?` 运算符直接生效。
    /// - **执行 (How)**：依据错误类别选择稳定错误码，并拼接带上下文的英文描述；
    ///   [`RoutesError::RouterInternal`] 保留后端原始错误码。
    /// - **契约 (What)**：返回的 [`CoreError`] 至少包含错误码与消息，人类可读文案经
    ///   `human()` / `hint()` 查询错误码登记表获得。
    fn from(value: RoutesError) -> Self {
        match value {
            RoutesError::Unproxyable { controller, reason } => CoreError::new(
                codes::PROXY_UNSUPPORTED,
                format!("type `{controller}` cannot be proxied: {reason}"),
            ),
            RoutesError::NoRouteFound { controller, action } => CoreError::new(
                codes::ROUTE_NOT_FOUND,
                format!("no route registered for `{controller}::{action}`"),
            ),
            RoutesError::RouterInternal { code, detail } => CoreError::new(code, detail),
            RoutesError::CaptureMissing { controller } => CoreError::new(
                codes::ROUTES_CAPTURE_MISSING,
                format!("closure returned without touching any mirrored method on `{controller}`"),
            ),
            RoutesError::NoResolutionYet => CoreError::new(
                codes::ROUTES_STATE_EMPTY,
                "no URI has been resolved on this instance yet",
            ),
        }
    }
}

#[cfg(not(feature = "std"))]
impl fmt::Display for RoutesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(unused_imports)]
        use RoutesError::*;

        match self {
            Unproxyable { controller, reason } => {
                write!(f, "type `{controller}` cannot be proxied: {reason}")
            }
            NoRouteFound { controller, action } => {
                write!(f, "no route registered for `{controller}::{action}`")
            }
            RouterInternal { code, detail } => {
                write!(f, "router backend failed with [{code}]: {detail}")
            }
            CaptureMissing { controller } => write!(
                f,
                "closure returned without touching any mirrored method on `{controller}`"
            ),
            NoResolutionYet => f.write_str("no URI has been resolved on this instance yet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkto_core::action::{ActionSignature, ControllerMeta, InvocationRecord};

    static PROFILE_META: ControllerMeta = ControllerMeta::new("Profile");

    /// 路由未命中在进入本错误域时保留捕获坐标，转回核心错误时映射稳定错误码。
    #[test]
    fn route_miss_keeps_coordinates_and_stable_code() {
        let record = InvocationRecord::new(&PROFILE_META, ActionSignature::new("upload_form", 0));
        let error = RoutesError::from(RouteError::not_found_for(&record));
        assert_eq!(
            error,
            RoutesError::NoRouteFound {
                controller: "Profile".to_owned(),
                action: "upload_form".to_owned(),
            }
        );

        let core: CoreError = error.into();
        assert_eq!(core.code(), codes::ROUTE_NOT_FOUND);
        assert_eq!(
            core.message(),
            "no route registered for `Profile::upload_form`"
        );
    }

    /// 路由后端的内部错误保留原始错误码，不被二次包装覆盖。
    #[test]
    fn backend_code_survives_the_round_trip() {
        let backend = RouteError::Internal(CoreError::new(
            codes::ROUTE_INTERNAL,
            "template slot without argument",
        ));
        let error = RoutesError::from(backend);
        assert_eq!(
            error,
            RoutesError::RouterInternal {
                code: codes::ROUTE_INTERNAL,
                detail: "template slot without argument".to_owned(),
            }
        );

        let core: CoreError = error.into();
        assert_eq!(core.code(), codes::ROUTE_INTERNAL);
    }

    /// 替身构造失败的拒绝解释完整透传到解析器错误域。
    #[test]
    fn proxy_refusal_carries_reason_text() {
        let error = RoutesError::from(ProxyError::unsupported("Opaque", "no callable surface"));
        assert_eq!(
            error,
            RoutesError::Unproxyable {
                controller: "Opaque".to_owned(),
                reason: "no callable surface".to_owned(),
            }
        );

        let core: CoreError = error.into();
        assert_eq!(core.code(), codes::PROXY_UNSUPPORTED);
    }
}
