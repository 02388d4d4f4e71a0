//! Per-command definitions.
//!
//! Each command lives in its own module holding a marker type implementing
//! [`Command`](crate::envelope::Command), its `Request`, its `Response` and its own `Status` set.
//! Commands without a payload reuse the bare envelopes.

use crate::macros::bare_command;

pub mod connect;
pub mod get_cartesian_limit;
pub mod set_cartesian_impedance;
pub mod set_collision_behavior;
pub mod set_controller_mode;
pub mod set_ee_to_k;
pub mod set_f_to_ee;
pub mod set_guiding_mode;
pub mod set_joint_impedance;
pub mod set_load;
pub mod set_time_scaling_factor;
pub mod start_motion_generator;

bare_command!(
    /// Stop the active motion generator.
    StopMotionGenerator
);
bare_command!(
    /// Start the external controller.
    StartController
);
bare_command!(
    /// Stop the external controller.
    StopController
);
bare_command!(
    /// Let the arm recover from errors on its own.
    AutomaticErrorRecovery
);
bare_command!(
    /// Reset the recorded maxima of external torque and force.
    ResetExternalTorqueAndForceMax
);

pub use automatic_error_recovery::AutomaticErrorRecovery;
pub use connect::Connect;
pub use get_cartesian_limit::GetCartesianLimit;
pub use reset_external_torque_and_force_max::ResetExternalTorqueAndForceMax;
pub use set_cartesian_impedance::SetCartesianImpedance;
pub use set_collision_behavior::SetCollisionBehavior;
pub use set_controller_mode::SetControllerMode;
pub use set_ee_to_k::SetEEToK;
pub use set_f_to_ee::SetFToEE;
pub use set_guiding_mode::SetGuidingMode;
pub use set_joint_impedance::SetJointImpedance;
pub use set_load::SetLoad;
pub use set_time_scaling_factor::SetTimeScalingFactor;
pub use start_controller::StartController;
pub use start_motion_generator::StartMotionGenerator;
pub use stop_controller::StopController;
pub use stop_motion_generator::StopMotionGenerator;
