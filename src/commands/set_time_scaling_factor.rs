//! Slowing down or speeding up motion execution.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetTimeScalingFactor` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTimeScalingFactor;

impl Command for SetTimeScalingFactor {
    const FUNCTION: Function = Function::SetTimeScalingFactor;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Sets the time scaling factor.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetTimeScalingFactor>,
    time_scaling_factor: f64,
}

impl Request {
    /// Create a request with the given factor.
    pub fn new(time_scaling_factor: f64) -> Self {
        Self {
            base: RequestBase::new(),
            time_scaling_factor,
        }
    }

    /// The factor.
    pub fn time_scaling_factor(&self) -> f64 {
        self.time_scaling_factor
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetTimeScalingFactor>;
