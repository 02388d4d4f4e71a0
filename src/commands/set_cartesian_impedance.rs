//! Cartesian stiffness.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetCartesianImpedance` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCartesianImpedance;

impl Command for SetCartesianImpedance {
    const FUNCTION: Function = Function::SetCartesianImpedance;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Sets the stiffness along x, y, z and about roll, pitch, yaw.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetCartesianImpedance>,
    k_x: [f64; 6],
}

impl Request {
    /// Create a request with one stiffness value per cartesian axis.
    pub fn new(k_x: [f64; 6]) -> Self {
        Self {
            base: RequestBase::new(),
            k_x,
        }
    }

    /// Cartesian stiffness values.
    pub fn k_x(&self) -> [f64; 6] {
        self.k_x
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetCartesianImpedance>;
