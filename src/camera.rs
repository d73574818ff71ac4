//! Virtual camera: rotation + perspective from world space to screen space.
//!
//! Rotation is applied axis by axis to the already-rotated coordinates:
//! X by `rx`, then Y by `ry`, then Z by `rz`. The order is part of the
//! contract; swapping it changes every projected position.

use std::f32::consts::PI;

use crate::config::ViewConfig;
use crate::scene::Vec3;

/// A world point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen x (px)
    pub x: f32,
    /// Screen y (px)
    pub y: f32,
    /// Camera-relative depth `z' + distance`. Larger is farther.
    pub depth: f32,
}

impl Projected {
    /// `false` when the point sits on or behind the camera plane.
    #[inline]
    pub fn in_front(&self) -> bool {
        self.depth > 0.0
    }
}

/// Camera state. Angles are radians and unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub zoom: f32,
    pub distance: f32,
    pub focal_length: f32,
    /// Viewport centre, refreshed from the widget rect every frame
    pub center: [f32; 2],
}

impl Camera {
    pub fn new(cfg: &ViewConfig) -> Self {
        Self {
            rx: 0.0,
            ry: 0.0,
            rz: 0.0,
            zoom: 1.0,
            distance: cfg.camera_distance,
            focal_length: cfg.focal_length,
            center: [0.0, 0.0],
        }
    }

    /// Back to the front view at zoom 1. The viewport centre is kept.
    pub fn reset(&mut self, cfg: &ViewConfig) {
        let center = self.center;
        *self = Self::new(cfg);
        self.center = center;
    }

    pub fn set_viewport_center(&mut self, cx: f32, cy: f32) {
        self.center = [cx, cy];
    }

    /// World → camera space (rotation only).
    pub fn rotate(&self, p: Vec3) -> Vec3 {
        // X axis
        let (sx, cx) = self.rx.sin_cos();
        let y1 = p.y * cx - p.z * sx;
        let z1 = p.y * sx + p.z * cx;

        // Y axis
        let (sy, cy) = self.ry.sin_cos();
        let x2 = p.x * cy + z1 * sy;
        let z2 = -p.x * sy + z1 * cy;

        // Z axis
        let (sz, cz) = self.rz.sin_cos();
        let x3 = x2 * cz - y1 * sz;
        let y3 = x2 * sz + y1 * cz;

        Vec3::new(x3, y3, z2)
    }

    /// Camera-relative depth of a world point (`z' + distance`).
    #[inline]
    pub fn depth_of(&self, p: Vec3) -> f32 {
        self.rotate(p).z + self.distance
    }

    /// Project a world point to the screen.
    ///
    /// Points on or behind the camera plane land exactly on the viewport
    /// centre.
    pub fn project(&self, p: Vec3) -> Projected {
        let r = self.rotate(p);
        let depth = r.z + self.distance;
        if depth <= 0.0 {
            return Projected {
                x: self.center[0],
                y: self.center[1],
                depth,
            };
        }
        let scale = self.focal_length / depth * self.zoom;
        Projected {
            x: r.x * scale + self.center[0],
            y: r.y * scale + self.center[1],
            depth,
        }
    }

    /// Undo the yaw for a camera-space offset in the horizontal plane.
    ///
    /// Returns the matching world `(dx, dz)`.
    pub fn unrotate_yaw(&self, dx: f32, dz: f32) -> (f32, f32) {
        let (s, c) = (-self.ry).sin_cos();
        (dx * c + dz * s, -dx * s + dz * c)
    }
}

// ── Slider mappings ──

/// Rotation slider range `[-100, 100]` → `[-π, π]`.
pub fn angle_from_slider(value: f32) -> f32 {
    value / 100.0 * PI
}

/// Inverse of [`angle_from_slider`]; the angle is wrapped into `[-π, π]` first.
pub fn slider_from_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    wrapped / PI * 100.0
}

/// Zoom slider range `[10, 300]` → zoom `[0.1, 3.0]`.
pub fn zoom_from_slider(value: f32) -> f32 {
    value / 100.0
}

pub fn slider_from_zoom(zoom: f32) -> f32 {
    zoom * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        let mut cam = Camera::new(&ViewConfig::default());
        cam.set_viewport_center(400.0, 300.0);
        cam
    }

    #[test]
    fn origin_projects_to_center() {
        let cam = camera();
        let p = cam.project(Vec3::ZERO);
        assert_eq!((p.x, p.y), (400.0, 300.0));
        assert_eq!(p.depth, 600.0);
    }

    #[test]
    fn projection_is_pure() {
        let mut cam = camera();
        cam.rx = 0.7;
        cam.ry = -1.3;
        cam.zoom = 1.7;
        let p = Vec3::new(120.0, -45.0, 33.0);
        let before = cam.clone();
        let a = cam.project(p);
        let b = cam.project(p);
        assert_eq!(a, b);
        assert_eq!(cam, before);
    }

    #[test]
    fn behind_camera_clamps_to_center() {
        let cam = camera();
        for z in [-600.0, -601.0, -5000.0] {
            let p = cam.project(Vec3::new(250.0, -80.0, z));
            assert_eq!((p.x, p.y), (400.0, 300.0));
            assert!(!p.in_front());
        }
    }

    #[test]
    fn perspective_scale() {
        let cam = camera();
        // depth 400 → scale 1000 / 400 = 2.5
        let p = cam.project(Vec3::new(10.0, 4.0, -200.0));
        assert_abs_diff_eq!(p.x, 425.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.y, 310.0, epsilon = 1e-3);
    }

    #[test]
    fn rotation_order_is_x_then_y() {
        let mut cam = camera();
        cam.rx = std::f32::consts::FRAC_PI_2;
        cam.ry = std::f32::consts::FRAC_PI_2;
        // X: (0,1,0) → (0,0,1); then Y: (0,0,1) → (1,0,0)
        let r = cam.rotate(Vec3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(r.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r.z, 0.0, epsilon = 1e-5);

        // The opposite order would leave the point on the z axis.
        let mut swapped = camera();
        swapped.ry = std::f32::consts::FRAC_PI_2;
        let y_first = swapped.rotate(Vec3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(y_first.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn unrotate_yaw_inverts_rotation() {
        let mut cam = camera();
        cam.ry = 0.9;
        let (wx, wz) = cam.unrotate_yaw(3.0, -2.0);
        let back = cam.rotate(Vec3::new(wx, 0.0, wz));
        assert_abs_diff_eq!(back.x, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.z, -2.0, epsilon = 1e-4);
    }

    #[test]
    fn reset_keeps_viewport() {
        let mut cam = camera();
        cam.rx = 2.0;
        cam.zoom = 2.5;
        cam.reset(&ViewConfig::default());
        assert_eq!(cam.rx, 0.0);
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.center, [400.0, 300.0]);
    }

    #[test]
    fn slider_mappings() {
        assert_abs_diff_eq!(angle_from_slider(100.0), PI, epsilon = 1e-6);
        assert_abs_diff_eq!(angle_from_slider(-50.0), -PI / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(slider_from_angle(PI / 2.0 + 2.0 * PI), 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(zoom_from_slider(10.0), 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(zoom_from_slider(300.0), 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(slider_from_zoom(1.5), 150.0, epsilon = 1e-4);
    }
}
