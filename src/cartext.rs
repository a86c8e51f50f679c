use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::SpanError;
use crate::prelude::*;
use crate::spannedtext::{self, Span, SpanRange, SpannedText};

pub use carcolor::CarColor;
pub use carspan::{CarIcon, CarSpan, Distance, DistanceUnit, IconAlignment, SpanKind};
pub use cartextconstraints::CarTextConstraints;
pub use spanwrapper::SpanWrapper;

mod carcolor;
mod carspan;
mod cartextconstraints;
mod spanwrapper;

/// 在车机屏幕上显示的文本
///
/// 由调用方传入的 `SpannedText` 构建，只保留 `CarSpan` 类型的标注，其余标注在构建时被静默丢弃。
/// 构建之后不可修改。
///
/// - `to_string` / `as_str` 返回纯文本。
/// - `to_spanned_text` 返回只包含车机标注的重建文本。
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCarText")]
pub struct CarText {
    text: String,
    spans: Vec<SpanWrapper>,
}

impl CarText {
    /// `car_text` 为 `None` 或者是空字符串时返回 `true`
    pub fn is_null_or_empty(car_text: Option<&Self>) -> bool {
        car_text.map_or(true, Self::is_empty)
    }

    /// 由带标注的文本创建 `CarText`
    ///
    /// 只有 `Span::Car` 会被保留（顺序、范围、标志都不变），其他标注被丢弃。
    pub fn create(text: impl Into<SpannedText>) -> Self {
        let (text, ranges) = text.into().into_parts();
        let spans = ranges
            .into_iter()
            .filter_map(|SpanRange { span, start, end, flags }| match span {
                Span::Car(span) => Some(SpanWrapper {
                    start,
                    end,
                    flags,
                    span,
                }),
                other => {
                    trace!(dropped = %other, start, end, "dropping non-car span");
                    None
                }
            })
            .collect();
        Self { text, spans }
    }

    /// 文本是否为空
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 保留下来的车机标注，保持原始顺序
    pub fn spans(&self) -> &[SpanWrapper] {
        &self.spans
    }

    /// 重建带标注的文本
    ///
    /// 创建时传入的非车机标注不会出现在返回值中。
    pub fn to_spanned_text(&self) -> SpannedText {
        let ranges = self
            .spans
            .iter()
            .map(|wrapper| SpanRange {
                span: Span::Car(wrapper.span.clone()),
                start: wrapper.start,
                end: wrapper.end,
                flags: wrapper.flags,
            })
            .collect();
        // 范围在创建或反序列化时已经检查过
        SpannedText::from_checked_parts(self.text.clone(), ranges)
    }

    /// 返回用于日志的缩短文本
    ///
    /// 超过 `MAX_SHORT_STRING_LENGTH` 个字素时只保留首尾各一半，中间用 `~` 连接。
    pub fn to_short_string(car_text: Option<&Self>) -> Option<String> {
        car_text.map(|car_text| shorten(&car_text.text))
    }

    // 只给约束过滤使用
    pub(crate) fn retain_spans(&self, keep: impl Fn(&SpanWrapper) -> bool) -> Self {
        Self {
            text: self.text.clone(),
            spans: self.spans.iter().filter(|&wrapper| keep(wrapper)).cloned().collect(),
        }
    }
}

// 按字素截断，避免切断组合字符
fn shorten(text: &str) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= MAX_SHORT_STRING_LENGTH {
        return String::from(text);
    }
    let half = MAX_SHORT_STRING_LENGTH / 2;
    let head = graphemes.iter().take(half).copied().collect::<String>();
    let tail = graphemes
        .iter()
        .skip(graphemes.len().saturating_sub(half))
        .copied()
        .collect::<String>();
    format!("{head}~{tail}")
}

impl From<&str> for CarText {
    fn from(text: &str) -> Self {
        Self::create(text)
    }
}

impl From<SpannedText> for CarText {
    fn from(text: SpannedText) -> Self {
        Self::create(text)
    }
}

impl Display for CarText {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.text)
    }
}

// 反序列化时的中间结构，用来检查外部传入的范围
#[derive(Deserialize)]
struct RawCarText {
    text: String,
    #[serde(default)]
    spans: Vec<SpanWrapper>,
}

impl TryFrom<RawCarText> for CarText {
    type Error = SpanError;

    fn try_from(raw: RawCarText) -> Result<Self, Self::Error> {
        for wrapper in &raw.spans {
            spannedtext::check_range(&raw.text, wrapper.start, wrapper.end)?;
        }
        Ok(Self {
            text: raw.text,
            spans: raw.spans,
        })
    }
}
