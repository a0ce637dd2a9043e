//! # 静态路由表（StaticRouter）
//!
//! ## 核心意图（Why）
//! - 为解析器提供一个零外部依赖的 [`Router`] 实现：登记项是
//!   （HTTP 方法、URI 模板、控制器名、动作名）四元组的平铺列表；
//! - 测试与小型应用据此即可组装完整闭环，生产级路由系统在外部实现同一契约后替换接入。
//!
//! ## 匹配规则（What）
//! - 渲染查询按（控制器名、动作名）寻找登记项，首条命中生效；
//! - 模板中的 `{参数名}` 槽位以捕获记录中的同名参数渲染值填充，
//!   槽位缺少同名参数属登记错误，以 [`RouteError::Internal`] 报告；
//! - 方法集合查询对字面 URI 做整体匹配：无槽位的模板要求全文相等，
//!   含槽位的模板逐段比对，含槽位的段按非空通配处理；命中项的方法取并集。
//!
//! ## 风险提示（Trade-offs）
//! - 线性扫描对小型路由表足够；大表应换用前缀树等结构的外部实现；
//! - 段级通配不校验槽位前后缀文本，`photo-{id}` 会命中任何非空段。

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
use std::{borrow::Cow, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
use alloc::{borrow::Cow, format, string::String, vec::Vec};

use linkto_core::action::InvocationRecord;
use linkto_core::error::{CoreError, codes};
use linkto_core::http::{HttpMethod, HttpMethodSet};
use linkto_core::router::{ResolvedRoute, RouteError, Router};

/// 一条路由登记：HTTP 方法、URI 模板与（控制器名、动作名）坐标。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSpec {
    method: HttpMethod,
    template: Cow<'static, str>,
    controller: Cow<'static, str>,
    action: Cow<'static, str>,
}

impl RouteSpec {
    /// 构造登记项。
    ///
    /// `template` 支持字面路径与 `{参数名}` 槽位混写；坐标通常取控制器类型名
    /// 与方法名的字面文本。
    pub fn new(
        method: HttpMethod,
        template: impl Into<Cow<'static, str>>,
        controller: impl Into<Cow<'static, str>>,
        action: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            method,
            template: template.into(),
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// 登记的 HTTP 方法。
    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    /// 登记的 URI 模板原文。
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// 平铺存储的静态路由表。
///
/// 登记顺序即匹配顺序：同一（控制器名、动作名）坐标出现多条登记时首条生效，
/// 该顺序由测试钉死。
#[derive(Debug, Default)]
pub struct StaticRouter {
    specs: Vec<RouteSpec>,
}

impl StaticRouter {
    /// 构造空路由表。
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// 链式登记，供构造现场一次写完整张表。
    #[must_use]
    pub fn with(mut self, spec: RouteSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// 追加登记。
    pub fn register(&mut self, spec: RouteSpec) {
        self.specs.push(spec);
    }
}

impl Router for StaticRouter {
    fn url_for(&self, record: &InvocationRecord) -> Result<ResolvedRoute, RouteError> {
        let spec = self
            .specs
            .iter()
            .find(|spec| {
                spec.controller == record.controller().name()
                    && spec.action == record.action().name()
            })
            .ok_or_else(|| RouteError::not_found_for(record))?;
        fill_template(&spec.template, record).map(ResolvedRoute::new)
    }

    fn allowed_methods_for(&self, uri: &str) -> HttpMethodSet {
        self.specs
            .iter()
            .filter(|spec| template_matches(&spec.template, uri))
            .map(|spec| spec.method.clone())
            .collect()
    }
}

/// 把模板中的 `{参数名}` 槽位替换为捕获记录中的同名参数渲染值。
///
/// 槽位未闭合或缺少同名参数均属登记错误，以 [`RouteError::Internal`] 报告；
/// 捕获记录中多余的参数被忽略。
fn fill_template(template: &str, record: &InvocationRecord) -> Result<String, RouteError> {
    let mut uri = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        uri.push_str(literal);
        let Some(close) = tail.find('}') else {
            return Err(RouteError::Internal(CoreError::new(
                codes::ROUTE_INTERNAL,
                format!("unterminated `{{` in route template `{template}`"),
            )));
        };
        let name = &tail[1..close];
        match record.arg(name) {
            Some(value) => uri.push_str(value),
            None => {
                return Err(RouteError::Internal(CoreError::new(
                    codes::ROUTE_INTERNAL,
                    format!(
                        "route template `{template}` references `{{{name}}}` \
                         but the capture carries no argument with that name"
                    ),
                )));
            }
        }
        rest = &tail[close + 1..];
    }
    uri.push_str(rest);
    Ok(uri)
}

/// 字面 URI 与模板的整体匹配。
///
/// 无槽位时要求全文相等；含槽位时逐段比对，含槽位的段要求对应段非空。
fn template_matches(template: &str, uri: &str) -> bool {
    if !template.contains('{') {
        return template == uri;
    }

    let mut template_segments = template.split('/');
    let mut uri_segments = uri.split('/');
    loop {
        match (template_segments.next(), uri_segments.next()) {
            (None, None) => return true,
            (Some(pattern), Some(actual)) => {
                if pattern.contains('{') {
                    if actual.is_empty() {
                        return false;
                    }
                } else if pattern != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
