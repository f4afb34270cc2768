//! Display surface error types.

use thiserror::Error;

/// Errors raised while delivering an update to a display surface.
///
/// The engine logs these and keeps ticking; a surface can never stop the
/// countdown.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The receiving side (usually the window) has gone away.
    #[error("display surface disconnected")]
    Disconnected,

    /// Writing the update failed.
    #[error("failed to write display update: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the update as JSON failed.
    #[error("failed to encode display update: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SurfaceError {
    /// Returns true if the surface will never accept updates again.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}
