use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// 车机屏幕使用的颜色
///
/// 标准颜色由宿主根据主题决定实际色值；`Custom` 需要同时给出浅色与深色模式下的 ARGB 值。
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarColor {
    #[default]
    Default,
    Primary,
    Secondary,
    Red,
    Green,
    Blue,
    Yellow,
    Custom { color: u32, color_dark: u32 },
}

impl CarColor {
    pub fn custom(color: u32, color_dark: u32) -> Self {
        Self::Custom { color, color_dark }
    }
}

impl Display for CarColor {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Custom { color, color_dark } => {
                write!(formatter, "Custom({color:#010x}, dark: {color_dark:#010x})")
            }
            standard => write!(formatter, "{standard:?}"),
        }
    }
}
