//! Named debug channel registry for the overdraw visualization overlay.
//!
//! A channel is a named, colored, hierarchical on/off switch controlling
//! whether a group of debug draw calls is visible. Channels are registered
//! explicitly at startup into a [`ChannelRegistry`] — a plain value with no
//! ambient static state, so tests can construct as many independent
//! registries as they need.
//!
//! Each channel carries a [`RenderPolicy`] telling the line renderer how to
//! draw its segments: buffered runtime quads vs. editor-immediate lines, and
//! which width policy applies.

mod registry;

pub use registry::{ChannelId, ChannelRegistry};

/// When a channel's buffered lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Lines only exist for the host editor's immediate gizmo pass and are
    /// cleared every frame outside an editor/development context.
    EditorOnly,
    /// Lines persist until expiry and are drawn by the frame renderer every
    /// frame, in any build.
    Runtime,
}

/// How the on-screen width of a channel's lines is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthType {
    /// Constant pixel width near the camera, distance-scaled world width far
    /// away — never thinner than the requested pixel width.
    Adaptive,
    /// Width in world units; shrinks with distance like ordinary geometry.
    World,
    /// Constant on-screen pixel width regardless of distance.
    Pixels,
    /// Raw line primitive at the host renderer's minimum thickness; the
    /// width value is ignored.
    SinglePixel,
}

impl WidthType {
    /// All width types, in batch-bucket order.
    pub const ALL: [WidthType; 4] = [
        WidthType::Adaptive,
        WidthType::World,
        WidthType::Pixels,
        WidthType::SinglePixel,
    ];

    /// Bucket index for per-width-type batching.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            WidthType::Adaptive => 0,
            WidthType::World => 1,
            WidthType::Pixels => 2,
            WidthType::SinglePixel => 3,
        }
    }
}

/// How one channel's line segments are rendered.
///
/// Mutable at any time via [`ChannelRegistry::set_policy`]; the renderer
/// picks up changes on the next frame's batching pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPolicy {
    pub mode: RenderMode,
    pub width_type: WidthType,
    /// Width scalar; meaning depends on `width_type` (pixels, world units,
    /// or ignored for [`WidthType::SinglePixel`]).
    pub width: f32,
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self {
            mode: RenderMode::Runtime,
            width_type: WidthType::Adaptive,
            width: 1.125,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_type_indices_cover_all_buckets() {
        let mut seen = [false; 4];
        for wt in WidthType::ALL {
            seen[wt.index()] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_default_policy() {
        let policy = RenderPolicy::default();
        assert_eq!(policy.mode, RenderMode::Runtime);
        assert_eq!(policy.width_type, WidthType::Adaptive);
        assert_eq!(policy.width, 1.125);
    }
}
