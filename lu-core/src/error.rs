use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LuCoreError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimensions(String),

    /// A pivot fell at or below the configured threshold (or was NaN).
    /// `step` is the diagonal index where elimination or back substitution stopped.
    #[error("Matrix is singular: pivot {pivot:e} at step {step} is not above threshold {threshold:e}")]
    SingularMatrix {
        step: usize,
        pivot: f64,
        threshold: f64,
    },
}

pub type Result<T> = std::result::Result<T, LuCoreError>;

#[cfg(feature = "wasm")]
impl From<LuCoreError> for wasm_bindgen::JsValue {
    fn from(err: LuCoreError) -> Self {
        Self::from_str(&err.to_string())
    }
}
