//! Reading the cartesian limit box configured on the arm.
use armlink_derive::Wire;

use crate::{
    Transform,
    envelope::{Command, Reply, RequestBase, ResponseBase},
    function::Function,
};

/// Marker type of the `GetCartesianLimit` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCartesianLimit;

impl Command for GetCartesianLimit {
    const FUNCTION: Function = Function::GetCartesianLimit;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

/// Whether the limit arrived with the reply or is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, armlink_derive::Status)]
#[repr(u32)]
pub enum Status {
    /// The reply carries the limit.
    Success,
    /// The request was received; the limit follows later.
    Received,
}

/// The request is the bare envelope.
pub type Request = RequestBase<GetCartesianLimit>;

/// The limit box, its frame and whether it is active.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Response {
    base: ResponseBase<GetCartesianLimit>,
    object_p_min: [f64; 3],
    object_p_max: [f64; 3],
    object_frame: Transform,
    object_activation: bool,
}

impl Response {
    /// Create a response with a zeroed limit, as sent with a deferred reply.
    pub fn new(status: Status) -> Self {
        Self::with_limit(status, [0.0; 3], [0.0; 3], [0.0; 16], false)
    }

    /// Create a response carrying a limit box.
    pub fn with_limit(
        status: Status,
        object_p_min: [f64; 3],
        object_p_max: [f64; 3],
        object_frame: Transform,
        object_activation: bool,
    ) -> Self {
        Self {
            base: ResponseBase::new(status),
            object_p_min,
            object_p_max,
            object_frame,
            object_activation,
        }
    }

    /// Minimum corner of the box, in the box frame.
    pub fn object_p_min(&self) -> [f64; 3] {
        self.object_p_min
    }

    /// Maximum corner of the box, in the box frame.
    pub fn object_p_max(&self) -> [f64; 3] {
        self.object_p_max
    }

    /// Pose of the box frame, column-major.
    pub fn object_frame(&self) -> Transform {
        self.object_frame
    }

    /// Is the limit enforced?
    pub fn object_activation(&self) -> bool {
        self.object_activation
    }
}

impl Reply for Response {
    type Status = Status;

    fn function(&self) -> Function {
        self.base.function()
    }

    fn status(&self) -> Status {
        self.base.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Wire, WireError};

    fn translation(x: f64, y: f64, z: f64) -> Transform {
        let mut frame = [0.0; 16];
        frame[0] = 1.0;
        frame[5] = 1.0;
        frame[10] = 1.0;
        frame[15] = 1.0;
        frame[12] = x;
        frame[13] = y;
        frame[14] = z;
        frame
    }

    #[test]
    fn test_layout() {
        // envelope (8) + 3 + 3 + 16 doubles + 1 flag byte
        assert_eq!(Response::SIZE, 8 + 22 * 8 + 1);
    }

    #[test]
    fn test_deferred_reply_is_zeroed() {
        let response = Response::new(Status::Received);
        assert_eq!(response.status(), Status::Received);
        assert_eq!(response.object_frame(), [0.0; 16]);
        assert!(!response.object_activation());
    }

    #[test]
    fn test_roundtrip_keeps_column_major_frame() {
        let response = Response::with_limit(
            Status::Success,
            [-0.5, -0.5, 0.0],
            [0.5, 0.5, 1.0],
            translation(0.1, 0.2, 0.3),
            true,
        );
        let mut buf = [0u8; Response::SIZE];
        response.encode_to_slice(&mut buf).unwrap();

        // translation sits in elements 12..15, after the envelope and both corners
        let offset = 8 + 6 * 8 + 12 * 8;
        assert_eq!(&buf[offset..offset + 8], &0.1f64.to_le_bytes());
        assert_eq!(buf[Response::SIZE - 1], 1);

        assert_eq!(Response::decode_from_slice(&buf), Ok(response));
    }

    #[test]
    fn test_bad_activation_byte() {
        let response = Response::new(Status::Success);
        let mut buf = [0u8; Response::SIZE];
        response.encode_to_slice(&mut buf).unwrap();
        buf[Response::SIZE - 1] = 7;
        assert_eq!(
            Response::decode_from_slice(&buf),
            Err(WireError::InvalidBool(7))
        );
    }
}
