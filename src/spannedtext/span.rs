use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::cartext::CarSpan;

/// 可以挂在文本范围上的标注
///
/// 只有 `Span::Car` 属于车机屏幕的能力集合，其余都是平台文本渲染使用的标注，
/// 创建 `CarText` 时会被丢弃。
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Span {
    // 车机能力集合内的标注
    Car(CarSpan),
    // 加粗
    Bold,
    // 斜体
    Italic,
    // 下划线
    Underline,
    // 删除线
    Strikethrough,
    // 超链接
    Url(String),
    // 文字颜色（ARGB）
    TextColor(u32),
    // 背景颜色（ARGB）
    BackgroundColor(u32),
}

impl Span {
    /// 如果属于车机能力集合则返回对应的 `CarSpan`
    pub fn as_car_span(&self) -> Option<&CarSpan> {
        match self {
            Self::Car(car_span) => Some(car_span),
            _ => None,
        }
    }

    pub fn is_car_span(&self) -> bool {
        self.as_car_span().is_some()
    }
}

impl From<CarSpan> for Span {
    fn from(car_span: CarSpan) -> Self {
        Self::Car(car_span)
    }
}

impl Display for Span {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Car(car_span) => write!(formatter, "{car_span}"),
            Self::Bold => write!(formatter, "Bold"),
            Self::Italic => write!(formatter, "Italic"),
            Self::Underline => write!(formatter, "Underline"),
            Self::Strikethrough => write!(formatter, "Strikethrough"),
            Self::Url(url) => write!(formatter, "Url({url})"),
            Self::TextColor(color) => write!(formatter, "TextColor({color:#010x})"),
            Self::BackgroundColor(color) => write!(formatter, "BackgroundColor({color:#010x})"),
        }
    }
}
