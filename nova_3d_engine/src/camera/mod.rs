//! Camera module - camera, frustum, and bounding spheres.

mod camera;
mod frustum;
mod bounding_sphere;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use bounding_sphere::BoundingSphere;
