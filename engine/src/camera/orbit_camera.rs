//! Orbit Camera for the 3D Model View
//!
//! A spherical-coordinate camera circling the model. Middle mouse drag
//! orbits, the scroll wheel zooms. The right button is taken by the brush,
//! so there is no pan; the target follows the model center instead.

use glam::{Mat4, Vec3};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default horizontal angle in degrees.
const DEFAULT_AZIMUTH: f32 = 35.0;
/// Default vertical angle in degrees.
const DEFAULT_ELEVATION: f32 = 30.0;
/// Default distance from target, in world units (one cell is 3.8).
const DEFAULT_DISTANCE: f32 = 90.0;
/// Default field of view in degrees.
const DEFAULT_FOV: f32 = 45.0;
const DEFAULT_NEAR: f32 = 0.5;
const DEFAULT_FAR: f32 = 2000.0;

const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 600.0;

/// Elevation limits in degrees.
const MIN_ELEVATION: f32 = -89.0;
const MAX_ELEVATION: f32 = 89.0;

/// Degrees per pixel of mouse movement.
const ORBIT_SENSITIVITY: f32 = 0.3;
/// How much each scroll tick affects distance.
const SCROLL_FACTOR: f32 = 0.1;

// ============================================================================
// ORBIT CAMERA
// ============================================================================

/// Camera orbiting `target` at (azimuth, elevation, distance). Y is up.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal angle in degrees (wraps around).
    pub azimuth: f32,
    /// Vertical angle in degrees (clamped to [-89, 89]).
    pub elevation: f32,
    pub distance: f32,
    pub target: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    is_orbiting: bool,
    last_mouse: Option<[f32; 2]>,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
            distance: DEFAULT_DISTANCE,
            target: Vec3::ZERO,
            aspect,
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            is_orbiting: false,
            last_mouse: None,
        }
    }

    // ========================================================================
    // MATRIX COMPUTATION
    // ========================================================================

    pub fn eye_position(&self) -> Vec3 {
        let azim_rad = self.azimuth.to_radians();
        let elev_rad = self.elevation.to_radians();

        let cos_elev = elev_rad.cos();
        let offset = Vec3::new(
            self.distance * cos_elev * azim_rad.sin(),
            self.distance * elev_rad.sin(),
            self.distance * cos_elev * azim_rad.cos(),
        );

        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Right-handed perspective with wgpu's [0, 1] depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// `projection * view`, column-major, ready for a uniform buffer.
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        (self.projection_matrix() * self.view_matrix()).to_cols_array_2d()
    }

    // ========================================================================
    // INPUT HANDLING
    // ========================================================================

    /// Start or stop orbiting (middle button).
    pub fn set_orbiting(&mut self, orbiting: bool) {
        self.is_orbiting = orbiting;
    }

    /// Call with every pointer position; rotates only while orbiting.
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        if let Some([lx, ly]) = self.last_mouse {
            if self.is_orbiting {
                self.azimuth += (x - lx) * ORBIT_SENSITIVITY;
                self.elevation = (self.elevation - (y - ly) * ORBIT_SENSITIVITY)
                    .clamp(MIN_ELEVATION, MAX_ELEVATION);
            }
        }
        self.last_mouse = Some([x, y]);
    }

    /// Multiplicative zoom. Positive delta zooms in.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * SCROLL_FACTOR;
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn is_orbiting(&self) -> bool {
        self.is_orbiting
    }
}

// ============================================================================
// TESTS
// ============================================================================
