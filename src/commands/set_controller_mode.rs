//! Selecting the control law.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::{default_status, wire_enum},
};

/// Marker type of the `SetControllerMode` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetControllerMode;

impl Command for SetControllerMode {
    const FUNCTION: Function = Function::SetControllerMode;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// The control laws the arm can run. Exactly one is active.
///
/// There is no default law; every request names one.
///
/// ```compile_fail
/// use armlink::commands::set_controller_mode::ControllerMode;
///
/// let _ = ControllerMode::default();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ControllerMode {
    /// Motor PD control.
    MotorPD,
    /// Joint position control.
    JointPosition,
    /// Joint impedance control.
    JointImpedance,
    /// Cartesian impedance control.
    CartesianImpedance,
}

wire_enum!(
    ControllerMode,
    "controller mode",
    [MotorPD, JointPosition, JointImpedance, CartesianImpedance]
);

/// Switches the control law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Wire)]
pub struct Request {
    base: RequestBase<SetControllerMode>,
    mode: ControllerMode,
}

impl Request {
    /// Create a request selecting `mode`.
    pub fn new(mode: ControllerMode) -> Self {
        Self {
            base: RequestBase::new(),
            mode,
        }
    }

    /// The selected mode.
    pub fn mode(&self) -> ControllerMode {
        self.mode
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetControllerMode>;
