//! The draw-submission boundary between the overlay and the host renderer.

/// An overlay vertex: position + color.
///
/// For line submissions every pair of consecutive vertices forms one
/// segment; for quad submissions every group of four consecutive vertices
/// forms one camera-facing quad sharing a single color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// The two fixed material states each batch is drawn under.
///
/// Both passes receive identical vertex data; only the host material/shader
/// state differs. The occluded pass is what keeps debug geometry faintly
/// visible through solid objects without recomputing geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPass {
    /// Standard alpha-blended rendering.
    Standard,
    /// Depth-occluded translucent rendering of the same geometry.
    Occluded,
}

impl DrawPass {
    pub const ALL: [DrawPass; 2] = [DrawPass::Standard, DrawPass::Occluded];
}

/// Host renderer capability consumed once per frame, per camera.
///
/// The overlay invokes this after all other scene rendering so the host's
/// depth/stencil state is not disturbed mid-scene.
pub trait FrameRenderer {
    /// Submit line primitives: `vertices.len() / 2` segments.
    fn draw_lines(&mut self, pass: DrawPass, vertices: &[OverlayVertex]);

    /// Submit quads: `vertices.len() / 4` camera-facing quads.
    fn draw_quads(&mut self, pass: DrawPass, vertices: &[OverlayVertex]);
}
