//! HTTP 方法词汇表。
//!
//! ## 模块目标（Why）
//! - 为路由能力接口提供统一的方法 token 模型，避免在各层以裸字符串传递方法名；
//! - `allowed_methods_for` 的返回值需要一个“集合即答案”的类型：空集合表示无路由命中，
//!   而不是错误。
//!
//! ## 结构概览（What）
//! - [`HttpMethod`]：标准方法枚举，保留原始 token 的扩展分支；
//! - [`HttpMethodSet`]：方法集合，提供插入、查询、迭代与 `FromIterator` 支持。
//!
//! ## 实现策略（How）
//! - 标准方法以无数据变体表示，扩展方法持有 `Cow<'static, str>`，路由表静态登记时零分配；
//! - 集合底层使用 `BTreeSet`，迭代顺序稳定，便于测试断言与日志输出。

use alloc::borrow::Cow;
use alloc::borrow::ToOwned;
use alloc::collections::BTreeSet;
use core::fmt;

use serde::{Deserialize, Serialize};

/// HTTP 方法枚举，保留常见标准方法并支持自定义扩展。
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HttpMethod {
    /// RFC 9110 定义的 `GET`。
    Get,
    /// RFC 9110 定义的 `HEAD`。
    Head,
    /// RFC 9110 定义的 `POST`。
    Post,
    /// RFC 9110 定义的 `PUT`。
    Put,
    /// RFC 9110 定义的 `DELETE`。
    Delete,
    /// RFC 9110 定义的 `OPTIONS`。
    Options,
    /// RFC 9110 定义的 `TRACE`。
    Trace,
    /// RFC 5789 定义的 `PATCH`。
    Patch,
    /// 未被标准枚举覆盖的其它方法，使用原始 token。
    Extension(Cow<'static, str>),
}

impl HttpMethod {
    /// 根据输入 token 构造方法枚举。
    ///
    /// # 契约说明（What）
    /// - 匹配大小写敏感的标准 token；未命中时以 `Extension` 保留原文；
    /// - 扩展分支会克隆 token，路由表应优先使用标准方法或 `'static` 常量构造。
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            "PATCH" => Self::Patch,
            other => Self::Extension(Cow::Owned(other.to_owned())),
        }
    }

    /// 将方法枚举转换回文本表示。
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
            Self::Extension(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP 方法集合。空集合表示“无路由命中”，属于正常答案而非错误。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpMethodSet {
    tokens: BTreeSet<HttpMethod>,
}

impl HttpMethodSet {
    /// 构造空集合。
    pub fn empty() -> Self {
        Self::default()
    }

    /// 插入一个方法；重复插入幂等。
    pub fn insert(&mut self, method: HttpMethod) {
        self.tokens.insert(method);
    }

    /// 判断集合是否包含给定方法。
    pub fn contains(&self, method: &HttpMethod) -> bool {
        self.tokens.contains(method)
    }

    /// 集合内方法数量。
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 集合是否为空。
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 以稳定顺序迭代集合内方法。
    pub fn iter(&self) -> alloc::collections::btree_set::Iter<'_, HttpMethod> {
        self.tokens.iter()
    }
}

impl FromIterator<HttpMethod> for HttpMethodSet {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for HttpMethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, method) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(method.as_str())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 标准 token 与扩展 token 的双向转换保持原文。
    #[test]
    fn token_roundtrip_keeps_raw_text() {
        assert_eq!(HttpMethod::from_token("GET"), HttpMethod::Get);
        assert_eq!(HttpMethod::Get.as_str(), "GET");

        let custom = HttpMethod::from_token("PURGE");
        assert_eq!(custom.as_str(), "PURGE", "扩展方法应保留原始 token");
    }

    /// 集合语义：重复插入幂等，空集合是合法答案。
    #[test]
    fn set_deduplicates_and_reports_emptiness() {
        let mut set = HttpMethodSet::empty();
        assert!(set.is_empty(), "初始集合应为空");

        set.insert(HttpMethod::Get);
        set.insert(HttpMethod::Get);
        set.insert(HttpMethod::Post);
        assert_eq!(set.len(), 2, "重复插入不应改变集合大小");
        assert!(set.contains(&HttpMethod::Get));
        assert!(!set.contains(&HttpMethod::Delete));
    }
}
