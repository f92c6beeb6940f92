use thiserror::Error;

/// Errors from time-gated world actions
///
/// Like inventory errors these are never fatal; a timed action that is
/// not ready simply keeps accumulating progress.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InteractionError {
    #[error("action not ready: {elapsed_ms:.0}/{required_ms:.0} ms")]
    ActionNotReady { elapsed_ms: f64, required_ms: f64 },
}
