//! Camera Module
//!
//! Camera state and math for the 3D model view. Window-system agnostic.

pub mod orbit_camera;

pub use orbit_camera::OrbitCamera;
