//! Scroll position for a restored selection.

use crate::config::LinkConfig;

/// Document scroll offset that puts a selection near the top-left of the viewport.
///
/// `rect_left`/`rect_top` are the selection's viewport-relative bounding box
/// origin, `scroll_x`/`scroll_y` the current scroll offset. The result keeps
/// the configured padding between the viewport edge and the selection, and is
/// rounded to whole pixels.
pub fn scroll_target(
    rect_left: f64,
    rect_top: f64,
    scroll_x: f64,
    scroll_y: f64,
    config: &LinkConfig,
) -> (f64, f64) {
    let x = (rect_left + scroll_x - config.scroll_padding_x).round();
    let y = (rect_top + scroll_y - config.scroll_padding_y).round();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target_applies_padding() {
        let config = LinkConfig::default();
        assert_eq!(
            scroll_target(120.4, 300.6, 0.0, 1000.0, &config),
            (70.0, 1201.0)
        );
    }

    #[test]
    fn test_scroll_target_custom_padding() {
        let config = LinkConfig {
            scroll_padding_x: 0.0,
            scroll_padding_y: 0.0,
            ..LinkConfig::default()
        };
        assert_eq!(scroll_target(10.0, -20.0, 5.0, 40.0, &config), (15.0, 20.0));
    }
}
