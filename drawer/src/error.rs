//! Overlay error types.

use thiserror::Error;

/// Errors that can occur preparing a frame of overlay rendering.
///
/// Numerical edge cases in the per-segment math (degenerate directions,
/// near-parallel unprojection rays) are handled inline with documented
/// fallbacks and never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The camera's projection matrix could not be inverted.
    #[error("projection matrix is not invertible")]
    SingularProjection,
    /// The view matrix could not be inverted to recover camera-to-world.
    #[error("view matrix is not invertible")]
    SingularView,
}
