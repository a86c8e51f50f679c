use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::CarColor;

/// 车机屏幕能力集合内的标注
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarSpan {
    // 文字前景色
    ForegroundColor(CarColor),
    // 距离，由车机按本地化格式显示
    Distance(Distance),
    // 时长（秒）
    Duration(u64),
    // 可点击文本，点击后回调对应动作
    Clickable(String),
    // 行内图标
    Icon(CarIcon),
}

/// `CarSpan` 的类型（不带数据），用于描述某个 API 支持哪些标注
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    ForegroundColor,
    Distance,
    Duration,
    Clickable,
    Icon,
}

impl SpanKind {
    pub const ALL: [Self; 5] = [
        Self::ForegroundColor,
        Self::Distance,
        Self::Duration,
        Self::Clickable,
        Self::Icon,
    ];
}

impl CarSpan {
    pub fn kind(&self) -> SpanKind {
        match self {
            Self::ForegroundColor(_) => SpanKind::ForegroundColor,
            Self::Distance(_) => SpanKind::Distance,
            Self::Duration(_) => SpanKind::Duration,
            Self::Clickable(_) => SpanKind::Clickable,
            Self::Icon(_) => SpanKind::Icon,
        }
    }
}

impl Display for CarSpan {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ForegroundColor(color) => write!(formatter, "ForegroundCarColorSpan({color})"),
            Self::Distance(distance) => write!(formatter, "DistanceSpan({distance})"),
            Self::Duration(seconds) => write!(formatter, "DurationSpan({seconds}s)"),
            Self::Clickable(action) => write!(formatter, "ClickableSpan({action})"),
            Self::Icon(icon) => write!(formatter, "CarIconSpan({})", icon.resource),
        }
    }
}

/// 距离单位
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
    Yards,
}

impl DistanceUnit {
    fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Miles => "mi",
            Self::Feet => "ft",
            Self::Yards => "yd",
        }
    }
}

/// 带单位的距离
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }
}

// 按位比较浮点数，保证 Eq 与 Hash 一致（NaN 等于自身）
impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.value.to_bits() == other.value.to_bits() && self.unit == other.unit
    }
}

impl Eq for Distance {}

impl Hash for Distance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.to_bits().hash(state);
        self.unit.hash(state);
    }
}

impl Display for Distance {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}{}", self.value, self.unit.symbol())
    }
}

/// 图标与文本的对齐方式
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconAlignment {
    #[default]
    Baseline,
    Bottom,
    Center,
}

/// 行内图标，`resource` 是宿主可解析的资源标识
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarIcon {
    pub resource: String,
    pub alignment: IconAlignment,
}

impl CarIcon {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            alignment: IconAlignment::default(),
        }
    }

    pub fn with_alignment(mut self, alignment: IconAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}
