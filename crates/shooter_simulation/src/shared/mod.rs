//! Общая математика: углы, сглаживание, кривые

pub mod angle;
pub mod curve;

pub use angle::{
    forward_from_yaw, interp_to, normalize_axis, normalized_delta, right_from_yaw,
    yaw_from_direction, yaw_of, yaw_rotation,
};
pub use curve::FloatCurve;
