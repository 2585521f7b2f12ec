//! Fixed overhead camera and pointer picking.

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3, Vec4, Vec4Swizzles};

use skirmish_sim::geometry::ray_ground_plane_intersection;
use skirmish_sim::SimError;

use crate::settings::Settings;

/// Downward tilt of the view about +X.
pub const CAMERA_PITCH: f32 = PI / 2.5;
/// Passed to the projection as radians.
pub const FIELD_OF_VIEW: f32 = 45.0;
pub const ASPECT_RATIO: f32 = 1.0;
pub const Z_NEAR: f32 = 1.0;
pub const Z_FAR: f32 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    view: Mat4,
    projection: Mat4,
    window: Vec2,
}

impl Camera {
    pub fn new(position: Vec3, window_width: u32, window_height: u32) -> Self {
        let view = Mat4::from_rotation_x(CAMERA_PITCH) * Mat4::from_translation(-position);
        let projection = Mat4::perspective_rh_gl(FIELD_OF_VIEW, ASPECT_RATIO, Z_NEAR, Z_FAR);
        Self {
            position,
            view,
            projection,
            window: Vec2::new(window_width as f32, window_height as f32),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.camera_pos,
            settings.window_width,
            settings.window_height,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Window pixel to normalised device coordinates, y up.
    pub fn window_to_ndc(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(
            -1.0 + px / self.window.x * 2.0,
            1.0 - py / self.window.y * 2.0,
        )
    }

    pub fn ndc_to_window(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * self.window.x,
            (1.0 - ndc.y) / 2.0 * self.window.y,
        )
    }

    /// World-space direction of the ray through `ndc`, starting at the camera.
    pub fn screen_to_ray(&self, ndc: Vec2) -> Vec3 {
        let mut eye = self.projection.inverse() * Vec4::new(ndc.x, ndc.y, -1.0, 0.0);
        eye.z = -1.0;
        eye.w = 0.0;
        (self.view.inverse() * eye).xyz().normalize()
    }

    /// Where `point` lands in normalised device coordinates, or `None` behind the camera.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.projection * self.view * point.extend(1.0);
        (clip.w > 0.0).then(|| clip.xy() / clip.w)
    }

    /// Ground point under the window pixel `(px, py)`.
    pub fn pick_ground(&self, px: f32, py: f32) -> Result<Vec3, SimError> {
        let ray = self.screen_to_ray(self.window_to_ndc(px, py));
        ray_ground_plane_intersection(ray, self.position)
    }
}
