//! Fixed-size dialog geometry
//!
//! A pure function of the request, the buttons and the configured metrics.
//! There is no font measurement here: every character is assumed to be
//! `glyph_width` pixels wide.

use super::{ButtonSpec, DialogRequest, Icon};
use crate::config::LayoutConfig;
use crate::platform::Rect;

/// Where one button and its caption go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonGeometry {
    pub rect: Rect,
    pub label_x: i32,
    pub baseline: i32,
}

/// Derived geometry, read-only for the lifetime of one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub width: u32,
    pub height: u32,
    pub content_height: u32,
    pub icon: Option<Rect>,
    pub text_x: i32,
    /// Baseline of each body line, top to bottom
    pub line_baselines: Vec<i32>,
    pub buttons: Vec<ButtonGeometry>,
}

impl LayoutMetrics {
    pub fn compute(request: &DialogRequest, buttons: &ButtonSpec, metrics: &LayoutConfig) -> Self {
        let lines = request.lines();
        let has_icon = request.icon != Icon::None;

        let longest_line = lines
            .iter()
            .map(|line| text_width(line, metrics.glyph_width))
            .max()
            .unwrap_or(0);
        let icon_width = if has_icon {
            metrics.icon_size + metrics.icon_spacing
        } else {
            0
        };
        let content_width = icon_width + longest_line;

        let count = buttons.len() as u32;
        let row_width =
            count * metrics.button_width + count.saturating_sub(1) * metrics.button_spacing;

        let width = content_width.max(row_width) + 2 * metrics.padding;

        let text_height = lines.len() as u32 * metrics.line_height;
        let content_height = text_height.max(if has_icon { metrics.icon_size } else { 0 });
        let height = content_height + 2 * metrics.padding + metrics.button_height + metrics.padding;

        let padding = metrics.padding as i32;

        let icon = has_icon.then(|| {
            let top = padding + (content_height - metrics.icon_size) as i32 / 2;
            Rect::new(padding, top, metrics.icon_size, metrics.icon_size)
        });

        let text_top = padding + (content_height - text_height) as i32 / 2;
        let line_height = metrics.line_height as i32;
        let line_baselines = (0..lines.len() as i32)
            .map(|i| text_top + i * line_height + line_height * 3 / 4)
            .collect();

        let row_left = (width - row_width) as i32 / 2;
        let row_top = (height - metrics.padding - metrics.button_height) as i32;
        let step = (metrics.button_width + metrics.button_spacing) as i32;
        let buttons = buttons
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let rect = Rect::new(
                    row_left + i as i32 * step,
                    row_top,
                    metrics.button_width,
                    metrics.button_height,
                );
                let label_width = text_width(&entry.label, metrics.glyph_width);
                ButtonGeometry {
                    rect,
                    label_x: rect.x + metrics.button_width.saturating_sub(label_width) as i32 / 2,
                    baseline: row_top + (metrics.button_height * 2 / 3) as i32,
                }
            })
            .collect();

        Self {
            width,
            height,
            content_height,
            icon,
            text_x: padding + icon_width as i32,
            line_baselines,
            buttons,
        }
    }

    /// Index of the button under the pointer
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(x, y))
    }
}

fn text_width(text: &str, glyph_width: u32) -> u32 {
    text.chars().count() as u32 * glyph_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ButtonSet;
    use crate::labels::{BuiltinLabels, LabelSource};

    fn layout(text: &str, buttons: ButtonSet, icon: Icon) -> LayoutMetrics {
        let request = DialogRequest::new("caption", text, buttons, icon);
        let spec = ButtonSpec::new(buttons, &BuiltinLabels.resolve("en"));
        LayoutMetrics::compute(&request, &spec, &LayoutConfig::default())
    }

    #[test]
    fn test_width_from_longest_line() {
        // 30 chars * 10 + 2 * 20
        let metrics = layout(&"x".repeat(30), ButtonSet::Ok, Icon::None);
        assert_eq!(metrics.width, 340);
        assert_eq!(metrics.text_x, 20);
    }

    #[test]
    fn test_icon_reserves_width_and_height() {
        let metrics = layout(&"x".repeat(30), ButtonSet::Ok, Icon::Info);
        assert_eq!(metrics.width, 36 + 10 + 300 + 40);
        assert_eq!(metrics.content_height, 36);
        assert_eq!(metrics.text_x, 20 + 46);
        assert_eq!(metrics.icon, Some(Rect::new(20, 20, 36, 36)));
    }

    #[test]
    fn test_short_text_uses_button_row_width() {
        let metrics = layout("Hi", ButtonSet::YesNo, Icon::None);
        // 2 * 100 + 10 + 2 * 20
        assert_eq!(metrics.width, 250);
    }

    #[test]
    fn test_height_formula() {
        let metrics = layout("a\nb\nc", ButtonSet::Ok, Icon::None);
        assert_eq!(metrics.content_height, 60);
        assert_eq!(metrics.height, 60 + 40 + 30 + 20);
        assert_eq!(metrics.line_baselines, vec![35, 55, 75]);
    }

    #[test]
    fn test_height_grows_with_lines() {
        for icon in [Icon::None, Icon::Warning] {
            let mut previous = 0;
            for n in 1..12 {
                let text = vec!["line"; n].join("\n");
                let height = layout(&text, ButtonSet::OkCancel, icon).height;
                assert!(height > previous, "{n} lines with {icon:?}: {height} <= {previous}");
                previous = height;
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let a = layout("Delete file?\nThis cannot be undone.", ButtonSet::OkCancel, Icon::Warning);
        let b = layout("Delete file?\nThis cannot be undone.", ButtonSet::OkCancel, Icon::Warning);
        assert_eq!(a, b);
    }

    #[test]
    fn test_button_row_is_centred() {
        let metrics = layout(&"x".repeat(40), ButtonSet::OkCancel, Icon::None);
        let first = metrics.buttons[0].rect;
        let last = metrics.buttons[1].rect;
        let left_gap = first.x;
        let right_gap = metrics.width as i32 - last.right();
        assert!((left_gap - right_gap).abs() <= 1);
        assert_eq!(last.x - first.right(), 10);
        assert_eq!(first.bottom(), (metrics.height - 20) as i32);
    }

    #[test]
    fn test_hit_test() {
        let metrics = layout("Question", ButtonSet::YesNo, Icon::Question);
        let yes = metrics.buttons[0].rect;
        let no = metrics.buttons[1].rect;
        assert_eq!(metrics.hit_test(yes.x + 5, yes.y + 5), Some(0));
        assert_eq!(metrics.hit_test(no.x + 5, no.y + 5), Some(1));
        assert_eq!(metrics.hit_test(yes.right() + 3, yes.y + 5), None);
        assert_eq!(metrics.hit_test(1, 1), None);
    }

    #[test]
    fn test_button_labels_centred_next_to_long_text() {
        // "Ok" is 20 px wide on a 100 px button; "Cancel" is 60 px
        let metrics = layout(&"x".repeat(40), ButtonSet::OkCancel, Icon::None);
        assert_eq!(metrics.width, 440);
        let ok = &metrics.buttons[0];
        let cancel = &metrics.buttons[1];
        assert_eq!(ok.label_x, ok.rect.x + 40);
        assert_eq!(cancel.label_x, cancel.rect.x + 20);
        assert_eq!(ok.baseline, ok.rect.y + 20);
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let ascii = layout(&"a".repeat(25), ButtonSet::Ok, Icon::None);
        let kana = layout(&"あ".repeat(25), ButtonSet::Ok, Icon::None);
        assert_eq!(ascii.width, kana.width);
    }
}
