//! Transient line buffering and screen-space quad generation for the
//! overdraw visualization overlay.
//!
//! Callers submit timed line segments and shapes tagged with a debug
//! channel; the overlay buffers them per channel, expires them, and each
//! frame converts the live, visible set into camera-facing quads whose
//! on-screen width follows the channel's width policy.
//!
//! # Architecture
//!
//! - [`DebugOverlay`] — the context object owning all state; submission API
//!   plus the per-frame pipeline (sweep → batch → project → generate → draw)
//! - [`CameraState`] / [`ScreenProjector`] — per-frame camera snapshot and
//!   fast world↔screen transforms (one projection inverse per frame)
//! - [`FrameRenderer`] — host boundary receiving line/quad vertex data,
//!   twice per batch (standard and occluded passes)
//! - [`overdraw_channels`] (re-exported as [`channels`]) — named channel
//!   registry with hierarchical visibility and per-channel render policy
//!
//! # Usage
//!
//! ```ignore
//! let mut overlay = DebugOverlay::new();
//! let physics = overlay.channels_mut().register("Physics", [0.2, 0.9, 0.3, 1.0], None);
//!
//! // Each frame:
//! overlay.begin_frame(now);
//! overlay.add_line(physics, hit.origin, hit.point, [1.0, 0.0, 0.0, 1.0], 0.5);
//! overlay.draw_box(physics, body.center, body.rotation, body.extents, [1.0; 4], 0.0);
//!
//! // After all other scene rendering, once per camera:
//! overlay.render(&camera_state, &mut frame_renderer)?;
//! ```

pub mod math;

mod batch;
mod draw_api;
mod error;
mod line;
mod overlay;
mod projector;
mod quad;
mod renderer;

pub use overdraw_channels as channels;
pub use overdraw_channels::{ChannelId, ChannelRegistry, RenderMode, RenderPolicy, WidthType};

pub use batch::{LineBatches, WidthBatch};
pub use error::OverlayError;
pub use line::{ChannelLineBuffer, LineRegistry, LineSegment};
pub use overlay::{DebugOverlay, OverlayConfig};
pub use projector::{CameraState, ScreenProjector, Viewport};
pub use renderer::{DrawPass, FrameRenderer, OverlayVertex};
