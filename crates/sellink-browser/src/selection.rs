//! Reading and writing the DOM selection.
//!
//! Uses the Selection API to turn the user's current selection into a
//! [`DomRange`] and to put a decoded range back on screen.

use sellink_core::{DomRange, LinkConfig, PlatformError, scroll_target};

/// First range of the window selection, if there is one.
pub fn current_range(window: &web_sys::Window) -> Result<Option<DomRange<web_sys::Node>>, PlatformError> {
    let Some(selection) = window
        .get_selection()
        .map_err(|e| format!("get_selection failed: {:?}", e))?
    else {
        return Ok(None);
    };
    if selection.range_count() == 0 {
        return Ok(None);
    }

    let range = selection
        .get_range_at(0)
        .map_err(|e| format!("get_range_at failed: {:?}", e))?;
    dom_range_from(&range).map(Some)
}

/// Copy the endpoints out of a live `Range`.
pub fn dom_range_from(range: &web_sys::Range) -> Result<DomRange<web_sys::Node>, PlatformError> {
    let start_container = range
        .start_container()
        .map_err(|e| format!("start_container failed: {:?}", e))?;
    let start_offset = range
        .start_offset()
        .map_err(|e| format!("start_offset failed: {:?}", e))?;
    let end_container = range
        .end_container()
        .map_err(|e| format!("end_container failed: {:?}", e))?;
    let end_offset = range
        .end_offset()
        .map_err(|e| format!("end_offset failed: {:?}", e))?;

    Ok(DomRange {
        start_container,
        start_offset,
        end_container,
        end_offset,
    })
}

/// Replace the window selection with `range`.
///
/// Offsets past the end of their container make `setStart`/`setEnd` throw;
/// that surfaces as an error and the existing selection is left alone.
pub fn select_range(
    window: &web_sys::Window,
    document: &web_sys::Document,
    range: &DomRange<web_sys::Node>,
) -> Result<web_sys::Range, PlatformError> {
    let dom_range = document
        .create_range()
        .map_err(|e| format!("create_range failed: {:?}", e))?;
    dom_range
        .set_start(&range.start_container, range.start_offset)
        .map_err(|e| format!("set_start failed: {:?}", e))?;
    dom_range
        .set_end(&range.end_container, range.end_offset)
        .map_err(|e| format!("set_end failed: {:?}", e))?;

    let selection = window
        .get_selection()
        .map_err(|e| format!("get_selection failed: {:?}", e))?
        .ok_or("no selection object")?;
    selection
        .remove_all_ranges()
        .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
    selection
        .add_range(&dom_range)
        .map_err(|e| format!("add_range failed: {:?}", e))?;

    Ok(dom_range)
}

/// Document scroll offset that brings `range` into view with the configured padding.
pub fn range_scroll_target(
    window: &web_sys::Window,
    range: &web_sys::Range,
    config: &LinkConfig,
) -> (f64, f64) {
    let rect = range.get_bounding_client_rect();
    let scroll_x = window.scroll_x().unwrap_or_default();
    let scroll_y = window.scroll_y().unwrap_or_default();
    scroll_target(rect.x(), rect.y(), scroll_x, scroll_y, config)
}
