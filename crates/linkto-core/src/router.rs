//! 路由能力契约：反向路由核心消费的外部接口。
//!
//! # 模块定位（Why）
//! - 路由表的构建与模式语法属于外部协作方；本模块只固化核心需要的两个问题：
//!   “这条捕获记录渲染成哪个 URI”与“这个字面 URI 接受哪些 HTTP 方法”；
//! - 契约保持对象安全，解析器以 `Arc<dyn Router>` 持有任意实现。
//!
//! # 契约要点（What）
//! - [`Router::url_for`]：渲染失败以 [`RouteError::NotFound`] 报告，路由是静态配置，
//!   该错误不可重试；
//! - [`Router::allowed_methods_for`]：永不失败，空集合就是“无路由命中”的答案；
//! - [`ResolvedRoute`]：渲染结果的值形态，解析器按“最近一次成功”语义持有。

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    action::InvocationRecord,
    error::{CoreError, codes},
    http::HttpMethodSet,
};

/// 渲染结果：一条可直接用于链接或重定向的 URI。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    uri: String,
}

impl ResolvedRoute {
    /// 以 URI 文本构造渲染结果。
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// 访问 URI 文本。
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// 取出 URI 文本所有权。
    pub fn into_uri(self) -> String {
        self.uri
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// 路由能力的失败形态。
#[derive(Debug)]
#[non_exhaustive]
pub enum RouteError {
    /// 路由表中不存在可渲染该捕获记录的路由。
    ///
    /// - **意图 (Why)**：把“配置缺口”与实现内部故障区分开，前者指向路由登记，后者指向实现缺陷；
    /// - **契约 (What)**：`controller` 与 `action` 复述捕获记录的关键坐标，便于日志定位；
    /// - **风险 (Trade-offs)**：路由是静态配置，重试无意义，调用方应直接修正登记。
    NotFound {
        /// 捕获记录中的控制器名。
        controller: Cow<'static, str>,
        /// 捕获记录中的动作名。
        action: Cow<'static, str>,
    },
    /// 路由实现内部故障。
    Internal(CoreError),
}

impl RouteError {
    /// 从捕获记录构造“未命中”错误，复述定位坐标。
    pub fn not_found_for(record: &InvocationRecord) -> Self {
        Self::NotFound {
            controller: Cow::Borrowed(record.controller().name()),
            action: Cow::Borrowed(record.action().name()),
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { controller, action } => {
                write!(f, "no route registered for `{controller}::{action}`")
            }
            Self::Internal(core) => write!(f, "router internal failure: {core}"),
        }
    }
}

impl Error for RouteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Internal(core) => Some(core as &(dyn Error + 'static)),
        }
    }
}

impl From<RouteError> for CoreError {
    fn from(value: RouteError) -> Self {
        match value {
            RouteError::NotFound { controller, action } => CoreError::new(
                codes::ROUTE_NOT_FOUND,
                alloc::format!("no route registered for `{controller}::{action}`"),
            ),
            RouteError::Internal(core) => core,
        }
    }
}

/// 路由能力契约。对象安全，实现方自由选择存储与匹配策略。
///
/// # 契约说明（What）
/// - [`url_for`](Self::url_for)：把捕获记录渲染为 URI；未命中返回
///   [`RouteError::NotFound`]，实现内部故障返回 [`RouteError::Internal`]；
/// - [`allowed_methods_for`](Self::allowed_methods_for)：查询字面 URI 接受的方法集合；
///   永不失败，空集合表示无命中；
/// - **前置条件**：查询为纯读操作，实现不得因查询修改路由表状态。
pub trait Router: Send + Sync + crate::sealed::Sealed {
    /// 把捕获记录渲染为 URI。
    fn url_for(&self, record: &InvocationRecord) -> Result<ResolvedRoute, RouteError>;

    /// 查询字面 URI 接受的方法集合。
    fn allowed_methods_for(&self, uri: &str) -> HttpMethodSet;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionSignature, ControllerMeta};
    use crate::http::HttpMethod;
    use alloc::format;

    static DEMO_META: ControllerMeta = ControllerMeta::new("Demo");

    /// 最小路由实现：固定返回同一 URI，验证契约的对象安全用法。
    struct FixedRouter;

    impl Router for FixedRouter {
        fn url_for(&self, _record: &InvocationRecord) -> Result<ResolvedRoute, RouteError> {
            Ok(ResolvedRoute::new("/fixed"))
        }

        fn allowed_methods_for(&self, uri: &str) -> HttpMethodSet {
            if uri == "/fixed" {
                [HttpMethod::Get].into_iter().collect()
            } else {
                HttpMethodSet::empty()
            }
        }
    }

    /// 契约可通过 trait object 消费，与解析器的持有方式一致。
    #[test]
    fn contract_is_object_safe() {
        let router: &dyn Router = &FixedRouter;
        let record = InvocationRecord::new(&DEMO_META, ActionSignature::new("show", 0));

        let resolved = router.url_for(&record).expect("固定路由应渲染成功");
        assert_eq!(resolved.uri(), "/fixed");
        assert!(router.allowed_methods_for("/fixed").contains(&HttpMethod::Get));
        assert!(router.allowed_methods_for("/absent").is_empty(), "未命中应返回空集合");
    }

    /// 未命中错误复述捕获坐标，并映射到稳定错误码。
    #[test]
    fn not_found_reports_capture_coordinates() {
        let record = InvocationRecord::new(&DEMO_META, ActionSignature::new("show", 0));
        let error = RouteError::not_found_for(&record);
        assert_eq!(format!("{error}"), "no route registered for `Demo::show`");

        let core: CoreError = error.into();
        assert_eq!(core.code(), codes::ROUTE_NOT_FOUND);
    }
}
