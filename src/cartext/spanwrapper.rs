use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::spannedtext::SpanFlags;
use super::CarSpan;

/// 包装一个车机标注及其范围，随 `CarText` 一起发送给宿主
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanWrapper {
    pub start: ByteIdx,
    pub end: ByteIdx,
    pub flags: SpanFlags,
    #[serde(rename = "carSpan")]
    pub span: CarSpan,
}

impl Display for SpanWrapper {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "[{}: {}, {}, flags: {}]",
            self.span, self.start, self.end, self.flags
        )
    }
}
