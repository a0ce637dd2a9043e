//! 控制器动作词汇表：捕获记录及其组成单元。
//!
//! ## 模块目标（Why）
//! - 反向路由的核心输入是“调用方试图在替身上发起的那一次方法调用”，
//!   本模块给这次调用一个可传递、可打印的结构化形态；
//! - 路由能力只消费渲染后的文本参数，捕获记录因此与具体参数类型解耦。
//!
//! ## 结构概览（What）
//! - [`ControllerMeta`]：控制器的稳定标识，按类型名登记；
//! - [`ActionSignature`]：动作名与参数个数；
//! - [`UriParam`]：参数渲染契约，决定参数如何进入 URI；
//! - [`RenderedArg`]：按参数名保存的渲染结果；
//! - [`InvocationRecord`]：一次捕获的完整记录。
//!
//! ## 实现策略（How）
//! - 控制器名与动作名在代码生成期即为 `'static`，记录本身只在参数值上发生分配；
//! - 参数按声明顺序保存，同时携带参数名，路由模板既可按位也可按名取值。

use alloc::borrow::{Cow, ToOwned};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// 控制器的稳定标识。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerMeta {
    name: &'static str,
}

impl ControllerMeta {
    /// 以类型名构造控制器标识。
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// 访问控制器名。
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// 动作签名：方法名与声明参数个数。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSignature {
    name: &'static str,
    arity: usize,
}

impl ActionSignature {
    /// 构造动作签名。
    pub const fn new(name: &'static str, arity: usize) -> Self {
        Self { name, arity }
    }

    /// 访问动作名。
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// 访问声明参数个数。
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

/// 参数渲染契约：决定一个方法参数以怎样的文本进入 URI。
///
/// # 设计背景（Why）
/// - 路由模板填充的是文本占位符，捕获记录必须在拦截现场完成参数到文本的转换，
///   否则参数所有权无法越过替身方法的边界；
/// - 以显式 Trait 而非 `Display` 泛化，给日期、标识符等业务类型保留
///   “URI 形态不同于展示形态”的定制空间。
///
/// # 契约说明（What）
/// - **返回值**：参数的 URI 片段文本，不做百分号转义，转义属于路由表实现的职责；
/// - **实现要求**：渲染必须无副作用且不可失败，失败的候选值应在进入控制器签名前被拒绝。
pub trait UriParam {
    /// 渲染为 URI 片段文本。
    fn render(&self) -> String;
}

macro_rules! impl_uri_param_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl UriParam for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

impl_uri_param_via_display!(
    bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);

impl UriParam for str {
    fn render(&self) -> String {
        self.to_owned()
    }
}

impl UriParam for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl UriParam for Cow<'_, str> {
    fn render(&self) -> String {
        self.clone().into_owned()
    }
}

impl<T: UriParam + ?Sized> UriParam for &T {
    fn render(&self) -> String {
        (**self).render()
    }
}

/// 单个参数的渲染结果，按参数名归档。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedArg {
    name: &'static str,
    value: String,
}

impl RenderedArg {
    /// 以参数名与渲染文本构造。
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// 访问参数名。
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// 访问渲染文本。
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// 一次捕获的完整记录：控制器、动作与按序渲染的参数。
///
/// # 契约说明（What）
/// - 每次反向解析恰好产生一条记录，由替身方法在拦截现场构造；
/// - `args` 的长度与 [`ActionSignature::arity`] 一致，顺序与方法声明一致。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationRecord {
    controller: &'static ControllerMeta,
    action: ActionSignature,
    args: Vec<RenderedArg>,
}

impl InvocationRecord {
    /// 构造不含参数的记录。
    pub fn new(controller: &'static ControllerMeta, action: ActionSignature) -> Self {
        Self {
            controller,
            action,
            args: Vec::new(),
        }
    }

    /// 追加一个渲染后的参数并返回记录本身。
    pub fn with_arg(mut self, arg: RenderedArg) -> Self {
        self.args.push(arg);
        self
    }

    /// 访问控制器标识。
    pub fn controller(&self) -> &'static ControllerMeta {
        self.controller
    }

    /// 访问动作签名。
    pub fn action(&self) -> &ActionSignature {
        &self.action
    }

    /// 按声明顺序访问参数。
    pub fn args(&self) -> core::slice::Iter<'_, RenderedArg> {
        self.args.iter()
    }

    /// 按参数名查找渲染文本。
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|arg| arg.name == name)
            .map(RenderedArg::value)
    }
}

impl fmt::Display for InvocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.controller.name(), self.action.name())?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", arg.name(), arg.value())?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    static PROFILE_META: ControllerMeta = ControllerMeta::new("Profile");

    /// 记录按声明顺序保存参数，并支持按名查找。
    #[test]
    fn record_keeps_argument_order_and_names() {
        let record = InvocationRecord::new(&PROFILE_META, ActionSignature::new("save_photo", 2))
            .with_arg(RenderedArg::new("album", 7usize.render()))
            .with_arg(RenderedArg::new("photo", "cover.png".render()));

        let names: Vec<&str> = record.args().map(RenderedArg::name).collect();
        assert_eq!(names, ["album", "photo"], "参数应保持声明顺序");
        assert_eq!(record.arg("album"), Some("7"));
        assert_eq!(record.arg("missing"), None, "未知参数名应返回 None");
        assert_eq!(
            format!("{record}"),
            "Profile::save_photo(album=7, photo=cover.png)"
        );
    }

    /// 基础类型的渲染与引用透传。
    #[test]
    fn primitive_rendering_matches_display() {
        assert_eq!(true.render(), "true");
        assert_eq!(42u64.render(), "42");
        let text = String::from("upload");
        assert_eq!((&text).render(), "upload", "引用应透传到底层实现");
    }
}
