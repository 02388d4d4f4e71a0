//! The end effector to stiffness frame transform.
use armlink_derive::Wire;

use crate::{
    Transform,
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetEEToK` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetEEToK;

impl Command for SetEEToK {
    const FUNCTION: Function = Function::SetEEToK;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Places the stiffness frame K relative to the end effector.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetEEToK>,
    ee_t_k: Transform,
}

impl Request {
    /// Create a request from a column-major transform.
    pub fn new(ee_t_k: Transform) -> Self {
        Self {
            base: RequestBase::new(),
            ee_t_k,
        }
    }

    /// Pose of K in the end effector frame, column-major.
    pub fn ee_t_k(&self) -> Transform {
        self.ee_t_k
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetEEToK>;
