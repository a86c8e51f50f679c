use tracing::trace;

use crate::error::CarTextError;
use super::{CarText, SpanKind};

/// 某个 API 支持的车机标注子集
///
/// 车机标注并不是在所有地方都被支持，例如行标题只接受颜色，导航提示只接受距离与时长。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarTextConstraints {
    allowed: &'static [SpanKind],
}

impl CarTextConstraints {
    /// 不允许任何标注
    pub const TEXT_ONLY: Self = Self::new(&[]);
    /// 只允许前景色
    pub const COLOR_ONLY: Self = Self::new(&[SpanKind::ForegroundColor]);
    /// 只允许行内图标
    pub const TEXT_AND_ICON: Self = Self::new(&[SpanKind::Icon]);
    /// 允许前景色与行内图标
    pub const TEXT_WITH_COLORS_AND_ICON: Self =
        Self::new(&[SpanKind::ForegroundColor, SpanKind::Icon]);
    /// 只允许距离与时长
    pub const CONSERVATIVE: Self = Self::new(&[SpanKind::Distance, SpanKind::Duration]);
    /// 只允许可点击文本
    pub const CLICKABLE_TEXT_ONLY: Self = Self::new(&[SpanKind::Clickable]);
    /// 允许所有车机标注
    pub const UNCONSTRAINED: Self = Self::new(&SpanKind::ALL);

    pub const fn new(allowed: &'static [SpanKind]) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, kind: SpanKind) -> bool {
        self.allowed.contains(&kind)
    }

    /// 检查 `car_text` 中的所有标注是否都被允许
    ///
    /// # 错误
    /// 返回第一个不被允许的标注。
    pub fn validate(&self, car_text: &CarText) -> Result<(), CarTextError> {
        match car_text
            .spans()
            .iter()
            .find(|wrapper| !self.allows(wrapper.span.kind()))
        {
            Some(wrapper) => Err(CarTextError::SpanNotAllowed {
                kind: wrapper.span.kind(),
                start: wrapper.start,
                end: wrapper.end,
            }),
            None => Ok(()),
        }
    }

    /// 返回去掉了不被允许的标注的副本
    pub fn filter(&self, car_text: &CarText) -> CarText {
        car_text.retain_spans(|wrapper| {
            let allowed = self.allows(wrapper.span.kind());
            if !allowed {
                trace!(kind = ?wrapper.span.kind(), "dropping span outside constraints");
            }
            allowed
        })
    }
}

impl Default for CarTextConstraints {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cartext::{CarColor, CarIcon, CarSpan};
    use crate::spannedtext::{SpanFlags, SpannedText};

    fn colored_with_icon() -> CarText {
        CarText::create(
            SpannedText::from("  Gas station")
                .with_span(CarSpan::Icon(CarIcon::new("ic_gas")), 0, 1, SpanFlags::default())
                .unwrap()
                .with_span(
                    CarSpan::ForegroundColor(CarColor::Red),
                    2,
                    13,
                    SpanFlags::default(),
                )
                .unwrap(),
        )
    }

    #[test]
    fn validate_reports_first_disallowed_span() {
        let err = CarTextConstraints::COLOR_ONLY
            .validate(&colored_with_icon())
            .unwrap_err();
        assert_eq!(
            err,
            CarTextError::SpanNotAllowed {
                kind: SpanKind::Icon,
                start: 0,
                end: 1
            }
        );
    }

    #[test]
    fn validate_accepts_allowed_spans() {
        assert!(CarTextConstraints::TEXT_WITH_COLORS_AND_ICON
            .validate(&colored_with_icon())
            .is_ok());
        assert!(CarTextConstraints::default()
            .validate(&colored_with_icon())
            .is_ok());
        assert!(CarTextConstraints::TEXT_ONLY
            .validate(&CarText::create("plain"))
            .is_ok());
    }

    #[test]
    fn filter_drops_disallowed_spans() {
        let filtered = CarTextConstraints::TEXT_AND_ICON.filter(&colored_with_icon());
        assert_eq!(filtered.as_str(), "  Gas station");
        assert_eq!(filtered.spans().len(), 1);
        assert_eq!(filtered.spans()[0].span.kind(), SpanKind::Icon);
        assert!(CarTextConstraints::TEXT_AND_ICON.validate(&filtered).is_ok());
    }

    #[test]
    fn text_only_strips_everything() {
        let filtered = CarTextConstraints::TEXT_ONLY.filter(&colored_with_icon());
        assert!(filtered.spans().is_empty());
        assert_eq!(filtered, CarText::create("  Gas station"));
    }
}
