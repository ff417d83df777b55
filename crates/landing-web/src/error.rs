#![forbid(unsafe_code)]

use thiserror::Error;

/// Failure while wiring a behavior to the page.
///
/// A missing optional element is not an error: the behavior is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no `document`")]
    NoDocument,
    #[error("`{call}` failed: {message}")]
    Js { call: &'static str, message: String },
}

impl BindError {
    #[must_use]
    pub fn js(call: &'static str, message: impl Into<String>) -> Self {
        Self::Js {
            call,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn js_errors_name_the_call() {
        let err = BindError::js("IntersectionObserver", "TypeError: bad margin");
        assert_eq!(
            err.to_string(),
            "`IntersectionObserver` failed: TypeError: bad margin"
        );
    }
}
