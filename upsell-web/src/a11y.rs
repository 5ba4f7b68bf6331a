// Accessibility helpers

/// Id of the polite live region rendered by the selector panel.
pub const STATUS_REGION_ID: &str = "selector-status";

/// Update the live region status for screen readers
///
/// Updates the text content of the status element if present, so changes to
/// the continue control's label are announced.
pub fn set_status(msg: &str) {
    if let Some(node) =
        crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}
