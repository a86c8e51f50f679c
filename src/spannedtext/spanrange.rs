use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use super::Span;

/// 标注在范围边界插入文本时的行为标志
///
/// 数值与平台的 `Spanned` 标志保持一致，原样传给渲染端。
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanFlags(pub u32);

impl SpanFlags {
    pub const INCLUSIVE_EXCLUSIVE: Self = Self(0x11);
    pub const INCLUSIVE_INCLUSIVE: Self = Self(0x12);
    pub const EXCLUSIVE_EXCLUSIVE: Self = Self(0x21);
    pub const EXCLUSIVE_INCLUSIVE: Self = Self(0x22);
}

impl Display for SpanFlags {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// 文本中的一个标注范围
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpanRange {
    // 标注内容
    pub span: Span,
    // 开始字节索引
    pub start: ByteIdx,
    // 结束字节索引（不包含）
    pub end: ByteIdx,
    // 边界行为
    pub flags: SpanFlags,
}
