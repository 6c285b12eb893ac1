//! Camera, viewport and screen-space projection.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// Size of the on-screen drawing area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport, clamping each side to at least one pixel.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Returns width / height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl From<(u32, u32)> for Viewport {
    #[allow(clippy::cast_precision_loss)]
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Returns the point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A 3D camera for viewing the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Half height of the view volume (used when `projection_mode` is Orthographic).
    pub ortho_scale: f32,
}

impl Camera {
    /// Creates a perspective camera looking from `position` at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * aspect_ratio;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        self.projection_matrix(aspect_ratio) * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Projects a world-space point to screen pixels (origin top-left, y down).
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, viewport: Viewport) -> Vec2 {
        let clip = self.view_projection_matrix(viewport.aspect_ratio()) * point.extend(1.0);
        let w = if clip.w.abs() < f32::EPSILON {
            f32::EPSILON.copysign(clip.w)
        } else {
            clip.w
        };
        let ndc = clip.truncate() / w;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }

    /// Builds the world-space ray under a screen pixel.
    ///
    /// Perspective rays start at the camera position, orthographic rays on the near plane.
    #[must_use]
    pub fn screen_ray(&self, screen: Vec2, viewport: Viewport) -> Ray {
        let ndc_x = (screen.x / viewport.width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen.y / viewport.height) * 2.0;

        let inv_view_proj = self.view_projection_matrix(viewport.aspect_ratio()).inverse();

        // wgpu-style NDC depth [0, 1]
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let direction = (far - near).normalize_or(self.forward());
        let origin = match self.projection_mode {
            ProjectionMode::Perspective => self.position,
            ProjectionMode::Orthographic => near,
        };
        Ray { origin, direction }
    }

    /// Returns how many world units one screen pixel covers at `point`.
    #[must_use]
    pub fn world_units_per_pixel(&self, point: Vec3, viewport: Viewport) -> f32 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                let depth = (point - self.position).dot(self.forward()).max(self.near);
                2.0 * depth * (self.fov * 0.5).tan() / viewport.height
            }
            ProjectionMode::Orthographic => 2.0 * self.ortho_scale / viewport.height,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.01,
            far: 1000.0,
            projection_mode: ProjectionMode::Perspective,
            ortho_scale: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 450.0)
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::default();
        let screen = camera.world_to_screen(Vec3::ZERO, viewport());
        assert!((screen - Vec2::new(400.0, 225.0)).length() < 1e-3);
    }

    #[test]
    fn test_screen_ray_hits_projected_point() {
        let camera = Camera::default();
        let point = Vec3::new(1.0, 0.5, -0.25);
        let screen = camera.world_to_screen(point, viewport());
        let ray = camera.screen_ray(screen, viewport());

        assert_eq!(ray.origin, camera.position);
        let t = (point - ray.origin).dot(ray.direction);
        assert!((ray.at(t) - point).length() < 1e-3);
    }

    #[test]
    fn test_orthographic_ray_is_parallel_to_forward() {
        let mut camera = Camera::default();
        camera.projection_mode = ProjectionMode::Orthographic;
        let ray = camera.screen_ray(Vec2::new(10.0, 20.0), viewport());
        assert!((ray.direction - camera.forward()).length() < 1e-4);
        assert_ne!(ray.origin, camera.position);
    }

    #[test]
    fn test_world_units_per_pixel_grows_with_distance() {
        let camera = Camera::default();
        let near = camera.world_units_per_pixel(Vec3::new(4.0, 4.0, 4.0), viewport());
        let far = camera.world_units_per_pixel(Vec3::ZERO, viewport());
        assert!(far > near);
    }
}
