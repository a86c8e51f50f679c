use std::fmt::{self, Display};

use crate::error::SpanError;
use crate::prelude::*;

pub use span::Span;
pub use spanrange::{SpanFlags, SpanRange};

mod span;
mod spanrange;

/// 带标注的字符串
///
/// 平台文本和 `CarText` 之间的边界类型：一段文本加上按插入顺序保存的标注范围。
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpannedText {
    // 被标注内容
    string: String,
    // 标注（保持插入顺序）
    spans: Vec<SpanRange>,
}

impl SpannedText {
    /// 新增标注
    ///
    /// # 参数
    /// - `span`: 标注内容。
    /// - `start`: 起始字节索引。
    /// - `end`: 结束字节索引（不包含）。
    /// - `flags`: 边界行为标志。
    ///
    /// # 错误
    /// 范围颠倒、越界或者不在字符边界上时返回 `SpanError`，文本保持不变。
    pub fn set_span(
        &mut self,
        span: impl Into<Span>,
        start: ByteIdx,
        end: ByteIdx,
        flags: SpanFlags,
    ) -> Result<(), SpanError> {
        self.check_range(start, end)?;
        self.spans.push(SpanRange {
            span: span.into(),
            start,
            end,
            flags,
        });
        Ok(())
    }

    /// 链式写法的 `set_span`
    pub fn with_span(
        mut self,
        span: impl Into<Span>,
        start: ByteIdx,
        end: ByteIdx,
        flags: SpanFlags,
    ) -> Result<Self, SpanError> {
        self.set_span(span, start, end, flags)?;
        Ok(self)
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    /// 按插入顺序返回所有标注
    pub fn spans(&self) -> &[SpanRange] {
        &self.spans
    }

    /// 拆分为字符串和标注
    pub fn into_parts(self) -> (String, Vec<SpanRange>) {
        (self.string, self.spans)
    }

    // 调用方负责保证每个范围都已通过 `check_range`
    pub(crate) fn from_checked_parts(string: String, spans: Vec<SpanRange>) -> Self {
        Self { string, spans }
    }

    // 检查范围是否合法
    fn check_range(&self, start: ByteIdx, end: ByteIdx) -> Result<(), SpanError> {
        check_range(&self.string, start, end)
    }
}

/// 检查 `string` 上的 `start..end` 是否是合法的标注范围
pub(crate) fn check_range(string: &str, start: ByteIdx, end: ByteIdx) -> Result<(), SpanError> {
    if start > end {
        return Err(SpanError::Inverted { start, end });
    }
    if end > string.len() {
        return Err(SpanError::OutOfBounds {
            start,
            end,
            len: string.len(),
        });
    }
    // 字节索引必须落在 UTF-8 字符边界上，否则切片会出错
    if let Some(index) = [start, end]
        .into_iter()
        .find(|idx| !string.is_char_boundary(*idx))
    {
        return Err(SpanError::NotCharBoundary { index });
    }
    Ok(())
}

impl From<&str> for SpannedText {
    fn from(string: &str) -> Self {
        Self::from(String::from(string))
    }
}

impl From<String> for SpannedText {
    fn from(string: String) -> Self {
        Self {
            string,
            spans: Vec::new(),
        }
    }
}

impl Display for SpannedText {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.string)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn spans_keep_insertion_order() {
        let mut text = SpannedText::from("hello world");
        text.set_span(Span::Bold, 6, 11, SpanFlags::EXCLUSIVE_EXCLUSIVE)
            .unwrap();
        text.set_span(Span::Italic, 0, 5, SpanFlags::INCLUSIVE_INCLUSIVE)
            .unwrap();

        let kinds: Vec<&Span> = text.spans().iter().map(|range| &range.span).collect();
        assert_eq!(kinds, vec![&Span::Bold, &Span::Italic]);
        assert_eq!(text.to_string(), "hello world");
    }

    #[test]
    fn rejects_inverted_range() {
        let mut text = SpannedText::from("abc");
        let err = text
            .set_span(Span::Bold, 2, 1, SpanFlags::default())
            .unwrap_err();
        assert_eq!(err, SpanError::Inverted { start: 2, end: 1 });
        assert!(text.spans().is_empty());
    }

    #[test]
    fn rejects_out_of_bounds_range() {
        let err = SpannedText::from("abc")
            .with_span(Span::Bold, 0, 4, SpanFlags::default())
            .unwrap_err();
        assert_eq!(
            err,
            SpanError::OutOfBounds {
                start: 0,
                end: 4,
                len: 3
            }
        );
    }

    #[test]
    fn rejects_split_char() {
        // "é" 占两个字节
        let err = SpannedText::from("é")
            .with_span(Span::Bold, 0, 1, SpanFlags::default())
            .unwrap_err();
        assert_eq!(err, SpanError::NotCharBoundary { index: 1 });
    }

    #[test]
    fn empty_range_at_end_is_allowed() {
        let text = SpannedText::from("abc")
            .with_span(Span::Underline, 3, 3, SpanFlags::default())
            .unwrap();
        assert_eq!(text.spans().len(), 1);
    }
}
