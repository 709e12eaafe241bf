#![warn(missing_docs)]
//! Device camera pose and screen-space ray casting.

use glam::{Mat4, Vec3};
use serde::Deserialize;

/// Pitch is kept just short of straight up/down so the basis stays defined.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Device camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Nearest distance at which geometry is considered in front of the camera.
    pub near: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect: 9.0 / 16.0,              // portrait phone
            near: 0.01,
        }
    }
}

impl Camera {
    /// Create a camera at `position` looking along `yaw`/`pitch`.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            ..Default::default()
        };
        camera.rotate(yaw, pitch);
        camera
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Get the up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Camera-to-world transform; column 3 is the camera position.
    pub fn world_transform(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Rotate the camera (add to yaw and pitch).
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Normalize yaw to [0, 2π]
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Ray from the camera through a normalized screen point.
    ///
    /// `(0, 0)` is the top-left corner, `(1, 1)` the bottom-right, and
    /// `(0.5, 0.5)` the centre of the view.
    pub fn screen_ray(&self, u: f32, v: f32) -> Ray {
        let ndc_x = u * 2.0 - 1.0;
        let ndc_y = 1.0 - v * 2.0;
        let half_height = (self.fov * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = self.forward()
            + self.right() * (ndc_x * half_width)
            + self.up() * (ndc_y * half_height);
        Ray {
            origin: self.position,
            direction: direction.normalize(),
        }
    }
}

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin in world coordinates.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the closest approach of `point`, and the
    /// perpendicular distance from the ray at that parameter.
    ///
    /// The parameter is negative when `point` lies behind the origin.
    pub fn closest_approach(&self, point: Vec3) -> (f32, f32) {
        let t = (point - self.origin).dot(self.direction);
        (t, self.at(t).distance(point))
    }
}

/// Serialized camera pose, as recorded in tracking traces.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CameraPose {
    /// Camera position `[x, y, z]`.
    pub position: [f32; 3],
    /// Yaw in radians.
    #[serde(default)]
    pub yaw: f32,
    /// Pitch in radians.
    #[serde(default)]
    pub pitch: f32,
}

impl From<CameraPose> for Camera {
    fn from(pose: CameraPose) -> Self {
        Camera::new(Vec3::from_array(pose.position), pose.yaw, pose.pitch)
    }
}
