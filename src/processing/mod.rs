pub mod kinematics;
pub mod stress;

pub use kinematics::{angular_rate, linear_strain, RigGeometry};
pub use stress::{engineering_stress_left, engineering_stress_right};
