//! Hand guiding.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetGuidingMode` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetGuidingMode;

impl Command for SetGuidingMode {
    const FUNCTION: Function = Function::SetGuidingMode;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Chooses which cartesian axes can be moved by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Wire)]
pub struct Request {
    base: RequestBase<SetGuidingMode>,
    guiding_mode: [bool; 6],
    nullspace: bool,
}

impl Request {
    /// Create a request. `guiding_mode` holds x, y, z, roll, pitch, yaw.
    pub fn new(guiding_mode: [bool; 6], nullspace: bool) -> Self {
        Self {
            base: RequestBase::new(),
            guiding_mode,
            nullspace,
        }
    }

    /// Per-axis guiding flags.
    pub fn guiding_mode(&self) -> [bool; 6] {
        self.guiding_mode
    }

    /// Whether the nullspace can be moved by hand.
    pub fn nullspace(&self) -> bool {
        self.nullspace
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetGuidingMode>;
