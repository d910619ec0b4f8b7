//! Fast world↔screen transforms derived once per frame from the camera.
//!
//! Width computation calls these transforms several times per line segment,
//! and a batch may contain thousands of segments, so both directions avoid
//! a full 4x4 inverse per point: the only matrix inverted per frame is the
//! projection matrix, combined with the already-available camera-to-world
//! transform.

use crate::error::OverlayError;
use crate::math::{look_at_isometry, Mat4, Vec2, Vec3, Vec4};

/// Clip-space z of the reference plane used by [`ScreenProjector::screen_to_world`].
const NEAR_REFERENCE_NDC_Z: f32 = 0.95;

/// Minimum magnitude of the camera-ray distance to the reference plane
/// before unprojection gives up and returns the zero vector.
const MIN_PLANE_DISTANCE: f32 = 1e-6;

/// Pixel-space viewport rectangle, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// A viewport with its minimum corner at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::zeros(),
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Per-frame camera parameters consumed from the host rendering context.
///
/// The host guarantees these describe a valid active camera; no validation
/// happens here. `forward`/`up`/`position` are derived from
/// `camera_to_world` by the constructors.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    pub view: Mat4,
    pub camera_to_world: Mat4,
    pub projection: Mat4,
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub viewport: Viewport,
    pub perspective: bool,
}

impl CameraState {
    /// Build from view and camera-to-world matrices the host already has.
    pub fn from_matrices(
        view: Mat4,
        camera_to_world: Mat4,
        projection: Mat4,
        viewport: Viewport,
        perspective: bool,
    ) -> Self {
        // RH camera basis: column 2 of camera-to-world points backward
        let position = camera_to_world.column(3).xyz();
        let forward = -camera_to_world.column(2).xyz();
        let up = camera_to_world.column(1).xyz();
        Self {
            view,
            camera_to_world,
            projection,
            position,
            forward,
            up,
            viewport,
            perspective,
        }
    }

    /// Build from a view matrix alone, inverting it to recover
    /// camera-to-world. One general inverse per frame, not per point.
    pub fn from_view(
        view: Mat4,
        projection: Mat4,
        viewport: Viewport,
        perspective: bool,
    ) -> Result<Self, OverlayError> {
        let camera_to_world = view.try_inverse().ok_or(OverlayError::SingularView)?;
        Ok(Self::from_matrices(
            view,
            camera_to_world,
            projection,
            viewport,
            perspective,
        ))
    }

    /// Look-at convenience. The camera-to-world transform is the exact
    /// rigid inverse of the view isometry.
    pub fn look_at(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Mat4,
        viewport: Viewport,
        perspective: bool,
    ) -> Self {
        let iso = look_at_isometry(&eye, &target, &up);
        Self::from_matrices(
            iso.to_homogeneous(),
            iso.inverse().to_homogeneous(),
            projection,
            viewport,
            perspective,
        )
    }
}

/// Cached world↔screen transforms for one frame.
pub struct ScreenProjector {
    view_projection: Mat4,
    clip_to_world: Mat4,
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    viewport: Viewport,
    perspective: bool,
}

impl ScreenProjector {
    pub fn new(camera: &CameraState) -> Result<Self, OverlayError> {
        let inv_projection = camera
            .projection
            .try_inverse()
            .ok_or(OverlayError::SingularProjection)?;
        Ok(Self {
            view_projection: camera.projection * camera.view,
            clip_to_world: camera.camera_to_world * inv_projection,
            position: camera.position,
            forward: camera.forward,
            up: camera.up,
            viewport: camera.viewport,
            perspective: camera.perspective,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Project a world-space point into the pixel rectangle.
    ///
    /// The returned `z` is the signed distance from the camera position
    /// along camera forward — not clip depth — which is what the
    /// perspective-correct width math downstream needs.
    pub fn world_to_screen(&self, point: Vec3) -> Vec3 {
        let clip = self.view_projection * Vec4::new(point.x, point.y, point.z, 1.0);
        let mut x = clip.x;
        let mut y = clip.y;
        if self.perspective {
            x /= clip.w;
            y /= clip.w;
        }
        let sx = self.viewport.min.x + (x * 0.5 + 0.5) * self.viewport.width();
        let sy = self.viewport.min.y + (y * 0.5 + 0.5) * self.viewport.height();
        let depth = (point - self.position).dot(&self.forward);
        Vec3::new(sx, sy, depth)
    }

    /// Unproject a screen point (`x`, `y` in pixels, `z` = signed distance
    /// along camera forward) back to world space.
    ///
    /// The pixel remap is inverted onto a fixed reference plane
    /// (clip z = 0.95), then the result is moved along the camera ray so
    /// its forward distance matches `screen.z`. If the ray is nearly
    /// parallel to the reference plane the result is the zero vector — a
    /// documented approximation, not an error.
    pub fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let ndc_x = ((screen.x - self.viewport.min.x) / self.viewport.width()) * 2.0 - 1.0;
        let ndc_y = ((screen.y - self.viewport.min.y) / self.viewport.height()) * 2.0 - 1.0;

        let clip = Vec4::new(ndc_x, ndc_y, NEAR_REFERENCE_NDC_Z, 1.0);
        let homogeneous = self.clip_to_world * clip;
        let reference = if self.perspective {
            homogeneous.xyz() / homogeneous.w
        } else {
            homogeneous.xyz()
        };

        let to_reference = reference - self.position;
        let plane_distance = to_reference.dot(&self.forward);
        if self.perspective {
            if plane_distance.abs() < MIN_PLANE_DISTANCE {
                return Vec3::zeros();
            }
            self.position + to_reference * (screen.z / plane_distance)
        } else {
            reference + self.forward * (screen.z - plane_distance)
        }
    }
}
