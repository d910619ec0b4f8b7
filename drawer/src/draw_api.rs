//! Shape helpers: pure geometry decomposed into [`DebugOverlay::add_line`]
//! calls around a common center/orientation. No additional state.

use overdraw_channels::ChannelId;

use crate::math::{Quat, Vec3};
use crate::overlay::DebugOverlay;

/// Diagonal shrink factor for burst markers (≈ 1/√3, so the diagonals reach
/// the same radius as the axis lines).
const BURST_DIAGONAL_SCALE: f32 = 1.0 / 1.73;

impl DebugOverlay {
    /// Draw the 12 edges of an oriented box. `size` is the full extents.
    pub fn draw_box(
        &mut self,
        channel: ChannelId,
        center: Vec3,
        rotation: Quat,
        size: Vec3,
        color: [f32; 4],
        duration: f32,
    ) {
        let r = nalgebra::UnitQuaternion::new_unchecked(rotation);
        let half = size * 0.5;
        let corner =
            |sx: f32, sy: f32, sz: f32| center + r * Vec3::new(half.x * sx, half.y * sy, half.z * sz);

        // right/left, up/down, forward/back
        let ruf = corner(1.0, 1.0, 1.0);
        let rub = corner(1.0, 1.0, -1.0);
        let rdf = corner(1.0, -1.0, 1.0);
        let rdb = corner(1.0, -1.0, -1.0);
        let luf = corner(-1.0, 1.0, 1.0);
        let lub = corner(-1.0, 1.0, -1.0);
        let ldf = corner(-1.0, -1.0, 1.0);
        let ldb = corner(-1.0, -1.0, -1.0);

        // Top face
        self.add_line(channel, ruf, rub, color, duration);
        self.add_line(channel, rub, lub, color, duration);
        self.add_line(channel, lub, luf, color, duration);
        self.add_line(channel, luf, ruf, color, duration);
        // Vertical edges
        self.add_line(channel, ruf, rdf, color, duration);
        self.add_line(channel, rub, rdb, color, duration);
        self.add_line(channel, lub, ldb, color, duration);
        self.add_line(channel, luf, ldf, color, duration);
        // Bottom face
        self.add_line(channel, rdf, rdb, color, duration);
        self.add_line(channel, rdb, ldb, color, duration);
        self.add_line(channel, ldb, ldf, color, duration);
        self.add_line(channel, ldf, rdf, color, duration);
    }

    /// Draw a burst marker: three axis-aligned through-lines plus the four
    /// body diagonals, all passing through `position`.
    pub fn draw_burst(
        &mut self,
        channel: ChannelId,
        position: Vec3,
        size: f32,
        color: [f32; 4],
        duration: f32,
    ) {
        let s = size;
        self.add_line(
            channel,
            position + Vec3::new(0.0, -s, 0.0),
            position + Vec3::new(0.0, s, 0.0),
            color,
            duration,
        );
        self.add_line(
            channel,
            position + Vec3::new(-s, 0.0, 0.0),
            position + Vec3::new(s, 0.0, 0.0),
            color,
            duration,
        );
        self.add_line(
            channel,
            position + Vec3::new(0.0, 0.0, -s),
            position + Vec3::new(0.0, 0.0, s),
            color,
            duration,
        );

        let d = size * BURST_DIAGONAL_SCALE;
        self.add_line(
            channel,
            position + Vec3::new(-d, -d, -d),
            position + Vec3::new(d, d, d),
            color,
            duration,
        );
        self.add_line(
            channel,
            position + Vec3::new(-d, -d, d),
            position + Vec3::new(d, d, -d),
            color,
            duration,
        );
        self.add_line(
            channel,
            position + Vec3::new(-d, d, d),
            position + Vec3::new(d, -d, -d),
            color,
            duration,
        );
        self.add_line(
            channel,
            position + Vec3::new(-d, d, -d),
            position + Vec3::new(d, -d, d),
            color,
            duration,
        );
    }

    /// Draw a plus marker: three axis-aligned through-lines of total length
    /// `size` centered on `center`.
    pub fn draw_plus(
        &mut self,
        channel: ChannelId,
        center: Vec3,
        size: f32,
        color: [f32; 4],
        duration: f32,
    ) {
        let half = size * 0.5;
        self.add_line(
            channel,
            center - Vec3::new(half, 0.0, 0.0),
            center + Vec3::new(half, 0.0, 0.0),
            color,
            duration,
        );
        self.add_line(
            channel,
            center - Vec3::new(0.0, half, 0.0),
            center + Vec3::new(0.0, half, 0.0),
            color,
            duration,
        );
        self.add_line(
            channel,
            center - Vec3::new(0.0, 0.0, half),
            center + Vec3::new(0.0, 0.0, half),
            color,
            duration,
        );
    }

    /// Draw a locator: rotated coordinate axes (R=X, G=Y, B=Z) of length
    /// `scale` from `position`.
    pub fn draw_locator(
        &mut self,
        channel: ChannelId,
        position: Vec3,
        scale: f32,
        rotation: Quat,
        duration: f32,
    ) {
        let r = nalgebra::UnitQuaternion::new_unchecked(rotation);
        self.add_line(
            channel,
            position,
            position + r * Vec3::new(scale, 0.0, 0.0),
            [1.0, 0.0, 0.0, 1.0],
            duration,
        );
        self.add_line(
            channel,
            position,
            position + r * Vec3::new(0.0, scale, 0.0),
            [0.0, 1.0, 0.0, 1.0],
            duration,
        );
        self.add_line(
            channel,
            position,
            position + r * Vec3::new(0.0, 0.0, scale),
            [0.0, 0.0, 1.0, 1.0],
            duration,
        );
    }
}
