//! 车机屏幕文本与后台任务参数的值类型
//!
//! - [`CarText`]: 文本加上只属于车机能力集合的标注，从 [`SpannedText`] 创建。
//! - [`Data`]: 只允许基本类型与数组的不可变键值容器，可以无损地序列化为字节流。

pub use cartext::{
    CarColor, CarIcon, CarSpan, CarText, CarTextConstraints, Distance, DistanceUnit,
    IconAlignment, SpanKind, SpanWrapper,
};
pub use data::{Data, DataBuilder, Value, ValueType};
pub use error::{CarTextError, DataError, SpanError};
pub use spannedtext::{Span, SpanFlags, SpanRange, SpannedText};

pub mod prelude;

mod cartext;
mod data;
mod error;
mod spannedtext;
