//! Joint stiffness.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetJointImpedance` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetJointImpedance;

impl Command for SetJointImpedance {
    const FUNCTION: Function = Function::SetJointImpedance;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Sets the stiffness of each of the 7 joints.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetJointImpedance>,
    k_theta: [f64; 7],
}

impl Request {
    /// Create a request with one stiffness value per joint.
    pub fn new(k_theta: [f64; 7]) -> Self {
        Self {
            base: RequestBase::new(),
            k_theta,
        }
    }

    /// Joint stiffness values.
    pub fn k_theta(&self) -> [f64; 7] {
        self.k_theta
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetJointImpedance>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Wire;

    #[test]
    fn test_roundtrip() {
        let request = Request::new([3000.0, 3000.0, 3000.0, 2500.0, 2500.0, 2000.0, 2000.0]);
        let mut buf = [0u8; Request::SIZE];
        assert_eq!(request.encode_to_slice(&mut buf), Ok(4 + 7 * 8));
        assert_eq!(Request::decode_from_slice(&buf), Ok(request));
    }
}
