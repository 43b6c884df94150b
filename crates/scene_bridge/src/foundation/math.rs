//! Math types used at the store boundary
//!
//! Component field accessors move vectors across the store boundary by value;
//! all transform math happens inside the authoritative runtime, so only the
//! value types live here.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;
