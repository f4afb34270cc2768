//! Forwarding surface for the terminal window.
//!
//! The engine runs on the worker thread while the terminal belongs to the
//! main thread. Updates cross over a crossbeam channel and the UI drains it
//! between key events.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{DisplaySurface, DisplayUpdate, Notice, SurfaceError};

/// Messages sent from the engine to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Redraw the clock and status line
    Render(DisplayUpdate),
    /// Show a banner for an interval boundary
    Announce(Notice),
}

/// Display surface that forwards to the UI thread.
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    tx: Sender<UiUpdate>,
}

impl ChannelSurface {
    /// Creates the surface and the receiver the UI thread drains.
    pub fn new() -> (Self, Receiver<UiUpdate>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl DisplaySurface for ChannelSurface {
    fn render(&self, update: &DisplayUpdate) -> Result<(), SurfaceError> {
        self.tx
            .send(UiUpdate::Render(update.clone()))
            .map_err(|_| SurfaceError::Disconnected)
    }

    fn announce(&self, notice: &Notice) -> Result<(), SurfaceError> {
        self.tx
            .send(UiUpdate::Announce(*notice))
            .map_err(|_| SurfaceError::Disconnected)
    }
}
