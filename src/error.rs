use thiserror::Error;

/// Error type produced by the renderer.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a
    /// browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// The requested mounting node cannot be located.
    #[error("failed to find DOM element with id `{0}`")]
    RootNotFound(String),
    /// An event handler or ref callback was placed under a name that does
    /// not accept one.
    #[error("attribute `{0}` does not accept a handler or ref value")]
    InvalidAttribute(String),
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<wasm_bindgen::JsValue> for RenderError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<RenderError> for wasm_bindgen::JsValue {
    fn from(value: RenderError) -> Self {
        Self::from(value.to_string())
    }
}
