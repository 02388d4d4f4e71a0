//! The flange to end effector transform.
use armlink_derive::Wire;

use crate::{
    Transform,
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetFToEE` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFToEE;

impl Command for SetFToEE {
    const FUNCTION: Function = Function::SetFToEE;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Places the end effector relative to the flange.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetFToEE>,
    f_t_ee: Transform,
}

impl Request {
    /// Create a request from a column-major transform.
    pub fn new(f_t_ee: Transform) -> Self {
        Self {
            base: RequestBase::new(),
            f_t_ee,
        }
    }

    /// Pose of the end effector in the flange frame, column-major.
    pub fn f_t_ee(&self) -> Transform {
        self.f_t_ee
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetFToEE>;
