//! 内部 sealed 模块用于控制外部扩展边界。
//!
//! # 设计背景（Why）
//! - `linkto-core` 的基础 [`Error`](crate::Error) trait 面向全工作区暴露，需要在 SemVer
//!   框架下保留未来增加默认方法或强化约束的空间。
//! - 统一的 `Sealed` 标记让我们能够在不破坏公开 API 的情况下收紧实现者集合。
//!
//! # 逻辑解析（How）
//! - 定义私有模块级 Trait `Sealed`，并对所有类型提供 blanket 实现；
//! - 公开 Trait 通过 `: crate::sealed::Sealed` 间接依赖该标记；
//! - 若未来需要限制实现者，可收紧 blanket 实现条件而无需改动公开签名。
//!
//! # 契约说明（What）
//! - `Sealed` 无需调用方显式实现；任意类型默认满足该约束。
pub(crate) trait Sealed {}

impl<T: ?Sized> Sealed for T {}
