use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Smooth-scrolls to a section by element id. Returns false when the id is
/// not in the document, so callers can fall back to a hash jump.
pub fn scroll_to_section(id: &str) -> bool {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id));
    match element {
        Some(element) => {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            element.scroll_into_view_with_scroll_into_view_options(&options);
            true
        }
        None => false,
    }
}

/// Section jump for links that might render before their target exists.
pub fn jump_to_section(id: &str) {
    if !scroll_to_section(id) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(id);
        }
    }
}
