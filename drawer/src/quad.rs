//! Conversion of batched line segments into camera-facing quads.
//!
//! All quad-producing width policies share one routine: project both
//! endpoints, build a screen-space perpendicular, pick a policy-specific
//! half-width per endpoint, offset, and unproject the four corners back to
//! world space. [`WidthType::SinglePixel`] bypasses quads entirely and
//! emits raw world-space line vertices.

use overdraw_channels::WidthType;

use crate::batch::WidthBatch;
use crate::math::{Vec2, Vec3};
use crate::projector::ScreenProjector;
use crate::renderer::OverlayVertex;

/// Below this squared screen-space length the segment direction is treated
/// as degenerate (the segment projects to a point) and a fixed perpendicular
/// is substituted to keep the offsets finite.
const MIN_PERP_LENGTH_SQ: f32 = 0.01;

fn fallback_perp() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Policy-selected screen-space half-width at one endpoint.
fn half_width(
    projector: &ScreenProjector,
    width_type: WidthType,
    width: f32,
    world_width_scale: f32,
    world_point: Vec3,
    screen_point: Vec3,
) -> f32 {
    match width_type {
        WidthType::Pixels => width * 0.5,
        WidthType::World => world_delta(projector, width, world_width_scale, world_point, screen_point),
        WidthType::Adaptive => {
            width * 0.5
                + world_delta(projector, width, world_width_scale, world_point, screen_point)
        }
        // SinglePixel segments never reach quad generation
        WidthType::SinglePixel => 0.0,
    }
}

/// Screen-space distance covered by a world-space perturbation of the
/// endpoint along camera up. This is what makes World/Adaptive widths
/// shrink with distance like ordinary geometry.
fn world_delta(
    projector: &ScreenProjector,
    width: f32,
    world_width_scale: f32,
    world_point: Vec3,
    screen_point: Vec3,
) -> f32 {
    let perturbed = world_point + projector.up() * (width * world_width_scale);
    let projected = projector.world_to_screen(perturbed);
    (Vec2::new(projected.x, projected.y) - Vec2::new(screen_point.x, screen_point.y)).norm()
}

/// The four world-space corners of one segment's quad, in emission order
/// `(q0, q1, q3, q2)`: both "plus" corners first is deliberately avoided so
/// the quad winds around its perimeter.
fn quad_corners(
    projector: &ScreenProjector,
    width_type: WidthType,
    world_width_scale: f32,
    start: Vec3,
    end: Vec3,
    width: f32,
) -> [Vec3; 4] {
    let screen_start = projector.world_to_screen(start);
    let screen_end = projector.world_to_screen(end);

    let dir = screen_end - screen_start;
    let mut perp = Vec3::new(-dir.y, dir.x, 0.0);
    if perp.norm_squared() < MIN_PERP_LENGTH_SQ {
        perp = fallback_perp();
    }
    let perp = perp.normalize();

    let start_half = half_width(projector, width_type, width, world_width_scale, start, screen_start);
    let end_half = half_width(projector, width_type, width, world_width_scale, end, screen_end);

    // perp.z is zero, so each corner keeps its endpoint's forward distance
    let q0 = projector.screen_to_world(screen_start + perp * start_half);
    let q1 = projector.screen_to_world(screen_start - perp * start_half);
    let q2 = projector.screen_to_world(screen_end + perp * end_half);
    let q3 = projector.screen_to_world(screen_end - perp * end_half);
    [q0, q1, q3, q2]
}

/// Generate quad vertices for one width-type batch, 4 vertices per segment.
pub(crate) fn generate_quads(
    batch: &WidthBatch,
    width_type: WidthType,
    projector: &ScreenProjector,
    world_width_scale: f32,
    out: &mut Vec<OverlayVertex>,
) {
    debug_assert!(width_type != WidthType::SinglePixel);
    out.clear();
    out.reserve(batch.len() * 4);
    for i in 0..batch.len() {
        let [start, end] = batch.points[i];
        let color = batch.colors[i];
        let corners = quad_corners(
            projector,
            width_type,
            world_width_scale,
            start,
            end,
            batch.widths[i],
        );
        for corner in corners {
            out.push(OverlayVertex {
                position: corner.into(),
                color,
            });
        }
    }
}

/// Data-parallel variant of [`generate_quads`].
///
/// Each segment writes a disjoint 4-vertex chunk through the same
/// per-segment routine as the sequential path, so the output is
/// numerically identical.
#[cfg(feature = "parallel")]
pub(crate) fn generate_quads_parallel(
    batch: &WidthBatch,
    width_type: WidthType,
    projector: &ScreenProjector,
    world_width_scale: f32,
    out: &mut Vec<OverlayVertex>,
) {
    use rayon::prelude::*;

    debug_assert!(width_type != WidthType::SinglePixel);
    out.clear();
    out.resize(batch.len() * 4, bytemuck::Zeroable::zeroed());
    out.par_chunks_exact_mut(4)
        .enumerate()
        .for_each(|(i, chunk)| {
            let [start, end] = batch.points[i];
            let color = batch.colors[i];
            let corners = quad_corners(
                projector,
                width_type,
                world_width_scale,
                start,
                end,
                batch.widths[i],
            );
            for (vertex, corner) in chunk.iter_mut().zip(corners) {
                *vertex = OverlayVertex {
                    position: corner.into(),
                    color,
                };
            }
        });
}

/// Emit raw world-space line vertices for a SinglePixel batch, 2 per
/// segment. No projection involved; the host draws these at its minimum
/// line thickness.
pub(crate) fn generate_lines(batch: &WidthBatch, out: &mut Vec<OverlayVertex>) {
    out.clear();
    out.reserve(batch.len() * 2);
    for i in 0..batch.len() {
        let [start, end] = batch.points[i];
        let color = batch.colors[i];
        out.push(OverlayVertex {
            position: start.into(),
            color,
        });
        out.push(OverlayVertex {
            position: end.into(),
            color,
        });
    }
}
