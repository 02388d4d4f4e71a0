//! The external load carried by the arm.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
};

/// Marker type of the `SetLoad` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetLoad;

impl Command for SetLoad {
    const FUNCTION: Function = Function::SetLoad;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Describes the load: its mass, center of mass and inertia.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetLoad>,
    m_load: f64,
    f_x_cload: [f64; 3],
    i_load: [f64; 9],
}

impl Request {
    /// Create a request. `i_load` is the 3x3 inertia tensor, column-major.
    pub fn new(m_load: f64, f_x_cload: [f64; 3], i_load: [f64; 9]) -> Self {
        Self {
            base: RequestBase::new(),
            m_load,
            f_x_cload,
            i_load,
        }
    }

    /// Mass in kilograms.
    pub fn m_load(&self) -> f64 {
        self.m_load
    }

    /// Center of mass in the flange frame.
    pub fn f_x_cload(&self) -> [f64; 3] {
        self.f_x_cload
    }

    /// Inertia tensor, column-major.
    pub fn i_load(&self) -> [f64; 9] {
        self.i_load
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetLoad>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Wire;

    #[test]
    fn test_roundtrip() {
        let request = Request::new(
            0.73,
            [0.0, 0.0, 0.05],
            [0.001, 0.0, 0.0, 0.0, 0.0025, 0.0, 0.0, 0.0, 0.0017],
        );
        let mut buf = [0u8; Request::SIZE];
        assert_eq!(Request::SIZE, 4 + 8 + 3 * 8 + 9 * 8);
        request.encode_to_slice(&mut buf).unwrap();
        assert_eq!(&buf[4..12], &0.73f64.to_le_bytes());
        assert_eq!(Request::decode_from_slice(&buf), Ok(request));
    }
}
