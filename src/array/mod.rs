pub mod geometry;
pub mod propagation;

pub use geometry::ArraySpec;
pub use propagation::{SensorNoiseConfig, propagate_plane_wave};
