//! Error handling for JavaScript bindings

use comeview_core::ComeviewError;
use wasm_bindgen::JsError;

/// Message shown to JavaScript callers, prefixed with the error category
#[must_use]
pub fn error_message(err: &ComeviewError) -> String {
    format!("[{}] {}", err.category(), err)
}

/// Convert core ComeviewError to a thrown JavaScript `Error`
#[must_use]
pub fn comeview_error_to_js(err: &ComeviewError) -> JsError {
    JsError::new(&error_message(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_has_category() {
        let err = ComeviewError::invalid_input("Comment body cannot be blank");
        assert_eq!(
            error_message(&err),
            "[input] Invalid input: Comment body cannot be blank"
        );
    }
}
