//! The overlay context object: owns all state, runs the per-frame pipeline.

use overdraw_channels::{ChannelId, ChannelRegistry, RenderMode, WidthType};

use crate::batch::LineBatches;
use crate::error::OverlayError;
use crate::line::{LineRegistry, LineSegment};
use crate::math::Vec3;
use crate::projector::{CameraState, ScreenProjector};
use crate::quad;
use crate::renderer::{DrawPass, FrameRenderer, OverlayVertex};

/// Tunables for a [`DebugOverlay`].
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Whether the overlay runs inside an editor/development context.
    /// Outside one, `EditorOnly` buffers are cleared every frame — their
    /// content must never reach end users.
    pub editor_context: bool,
    /// Conversion factor from a channel's width value to the world-space
    /// perturbation used by the World and Adaptive policies. Empirical
    /// default; not derived from camera FOV or DPI.
    pub world_width_scale: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            editor_context: false,
            world_width_scale: 0.001,
        }
    }
}

/// The line visualization overlay.
///
/// Owns the channel registry, the per-channel line buffers, and the
/// per-frame batching scratch. One instance per render subsystem; tests
/// construct as many independent instances as they like.
///
/// Per-frame protocol (cooperative, single-threaded around the frame
/// boundary): call [`begin_frame`](Self::begin_frame) with the current
/// time, submit lines from anywhere in the update, then call
/// [`render`](Self::render) once per camera after all other scene
/// rendering. Segments submitted during a render pass appear the next
/// frame.
pub struct DebugOverlay {
    channels: ChannelRegistry,
    lines: LineRegistry,
    batches: LineBatches,
    vertices: Vec<OverlayVertex>,
    config: OverlayConfig,
    time: f32,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default())
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        Self {
            channels: ChannelRegistry::new(),
            lines: LineRegistry::new(),
            batches: LineBatches::new(),
            vertices: Vec::new(),
            config,
            time: 0.0,
        }
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ChannelRegistry {
        &mut self.channels
    }

    pub fn lines(&self) -> &LineRegistry {
        &self.lines
    }

    pub fn config(&self) -> OverlayConfig {
        self.config
    }

    /// The timestamp of the current frame.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Start a new frame at `now` (seconds). All subsequent submissions use
    /// this timestamp for expiry; the next [`render`](Self::render) sweeps
    /// against it.
    ///
    /// Frame time must not decrease; a rewind is accepted but makes
    /// already-submitted segments outlive their intended duration.
    pub fn begin_frame(&mut self, now: f32) {
        if now < self.time {
            log::warn!(
                "overlay frame time went backwards ({} -> {now}); expiry of buffered segments will drift",
                self.time
            );
        }
        self.time = now;
    }

    /// Submit a line segment on `channel`, expiring `duration` seconds from
    /// the current frame time.
    ///
    /// `start == end` is legal and produces a degenerate segment. No
    /// visibility check happens here — disabled channels keep buffering so
    /// that re-enabling mid-lifetime shows whatever hasn't expired yet.
    pub fn add_line(
        &mut self,
        channel: ChannelId,
        start: Vec3,
        end: Vec3,
        color: [f32; 4],
        duration: f32,
    ) {
        let policy = self.channels.policy(channel);
        self.lines.buffer_mut(channel, policy).push(LineSegment {
            start,
            end,
            color,
            expiry_time: self.time + duration,
            width: policy.width,
        });
    }

    /// Run the frame pipeline: sweep expired segments, batch live visible
    /// ones by width type, generate vertices, and submit each populated
    /// batch to `target` twice (standard pass, occluded pass).
    pub fn render(
        &mut self,
        camera: &CameraState,
        target: &mut dyn FrameRenderer,
    ) -> Result<(), OverlayError> {
        self.lines.refresh_policies(&self.channels);
        self.lines.sweep(self.time, self.config.editor_context);
        self.batches.rebuild(&self.lines, &self.channels);
        if self.batches.total_len() == 0 {
            return Ok(());
        }

        let projector = ScreenProjector::new(camera)?;
        let scale = self.config.world_width_scale;

        for width_type in WidthType::ALL {
            let batch = self.batches.batch(width_type);
            if batch.is_empty() {
                continue;
            }
            match width_type {
                WidthType::SinglePixel => {
                    quad::generate_lines(batch, &mut self.vertices);
                    for pass in DrawPass::ALL {
                        target.draw_lines(pass, &self.vertices);
                    }
                }
                WidthType::Adaptive => {
                    #[cfg(feature = "parallel")]
                    quad::generate_quads_parallel(
                        batch,
                        width_type,
                        &projector,
                        scale,
                        &mut self.vertices,
                    );
                    #[cfg(not(feature = "parallel"))]
                    quad::generate_quads(batch, width_type, &projector, scale, &mut self.vertices);
                    for pass in DrawPass::ALL {
                        target.draw_quads(pass, &self.vertices);
                    }
                }
                WidthType::World | WidthType::Pixels => {
                    quad::generate_quads(batch, width_type, &projector, scale, &mut self.vertices);
                    for pass in DrawPass::ALL {
                        target.draw_quads(pass, &self.vertices);
                    }
                }
            }
        }
        Ok(())
    }

    /// Visit the live segments of visible `EditorOnly` channels, for the
    /// host editor's immediate-mode gizmo pass. `Runtime` buffers are never
    /// exposed here; they go through [`render`](Self::render).
    ///
    /// Expired segments are skipped even if the sweep hasn't removed them
    /// yet, so the hook may run before or after `render` within a frame.
    pub fn for_each_editor_line(&self, mut visit: impl FnMut(ChannelId, &LineSegment)) {
        for (id, buffer) in self.lines.iter() {
            if buffer.policy().mode != RenderMode::EditorOnly {
                continue;
            }
            if !self.channels.visualization_enabled(id) {
                continue;
            }
            for segment in buffer.segments() {
                if self.time > segment.expiry_time {
                    continue;
                }
                visit(id, segment);
            }
        }
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_snapshots_channel_width() {
        let mut overlay = DebugOverlay::new();
        let id = overlay.channels_mut().register("Nav", [1.0; 4], None);

        overlay.begin_frame(1.0);
        overlay.add_line(id, Vec3::zeros(), Vec3::x(), [1.0; 4], 2.0);

        let buffer = overlay.lines().get(id).unwrap();
        let segment = &buffer.segments()[0];
        assert_eq!(segment.width, 1.125);
        assert_eq!(segment.expiry_time, 3.0);
    }

    #[test]
    fn test_begin_frame_accepts_earlier_timestamp() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut overlay = DebugOverlay::new();
        overlay.begin_frame(5.0);
        // Rewinding warns but still takes effect
        overlay.begin_frame(2.0);
        assert_eq!(overlay.time(), 2.0);
    }

    #[test]
    fn test_editor_line_visitor_skips_expired_segments() {
        let mut overlay = DebugOverlay::with_config(OverlayConfig {
            editor_context: true,
            ..OverlayConfig::default()
        });
        let editor = overlay.channels_mut().register("Editor", [1.0; 4], None);
        let mut policy = overlay.channels().policy(editor);
        policy.mode = RenderMode::EditorOnly;
        overlay.channels_mut().set_policy(editor, policy);

        overlay.begin_frame(0.0);
        overlay.add_line(editor, Vec3::zeros(), Vec3::x(), [1.0; 4], 1.0);
        overlay.add_line(editor, Vec3::zeros(), Vec3::y(), [1.0; 4], 10.0);

        // New frame past the first segment's deadline, before any render:
        // the hook must only see the survivor even though the sweep hasn't
        // run yet
        overlay.begin_frame(2.0);
        let mut ends = Vec::new();
        overlay.for_each_editor_line(|_, segment| ends.push(segment.end));
        assert_eq!(ends, vec![Vec3::y()]);
    }

    #[test]
    fn test_editor_line_visitor_skips_runtime_buffers() {
        let mut overlay = DebugOverlay::with_config(OverlayConfig {
            editor_context: true,
            ..OverlayConfig::default()
        });
        let runtime = overlay.channels_mut().register("Runtime", [1.0; 4], None);
        let editor = overlay.channels_mut().register("Editor", [1.0; 4], None);
        let mut policy = overlay.channels().policy(editor);
        policy.mode = RenderMode::EditorOnly;
        overlay.channels_mut().set_policy(editor, policy);

        overlay.add_line(runtime, Vec3::zeros(), Vec3::x(), [1.0; 4], 1.0);
        overlay.add_line(editor, Vec3::zeros(), Vec3::y(), [1.0; 4], 1.0);

        let mut visited = Vec::new();
        overlay.for_each_editor_line(|id, _| visited.push(id));
        assert_eq!(visited, vec![editor]);
    }
}
