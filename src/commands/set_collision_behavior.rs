//! Collision thresholds used by the arm's own safety reflex.
//!
//! The thresholds are evaluated on the arm, never by this crate. Lengths are part of the type:
//! 14 joint torque values per vector and 12 cartesian force values per vector. Slices of any
//! other length are refused by [`Request::try_from_slices`] instead of being truncated.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::default_status,
    wire::{WireError, fixed},
};

/// Number of joint torque thresholds per vector.
pub const TORQUE_THRESHOLDS: usize = 14;
/// Number of cartesian force thresholds per vector.
pub const FORCE_THRESHOLDS: usize = 12;

/// Marker type of the `SetCollisionBehavior` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCollisionBehavior;

impl Command for SetCollisionBehavior {
    const FUNCTION: Function = Function::SetCollisionBehavior;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

default_status!();

/// Configures the collision thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Wire)]
pub struct Request {
    base: RequestBase<SetCollisionBehavior>,
    torque_thresholds_acceleration: [f64; TORQUE_THRESHOLDS],
    torque_thresholds_nominal: [f64; TORQUE_THRESHOLDS],
    force_thresholds_acceleration: [f64; FORCE_THRESHOLDS],
    force_thresholds_nominal: [f64; FORCE_THRESHOLDS],
}

impl Request {
    /// Create a request from fixed-length threshold vectors.
    pub fn new(
        torque_thresholds_acceleration: [f64; TORQUE_THRESHOLDS],
        torque_thresholds_nominal: [f64; TORQUE_THRESHOLDS],
        force_thresholds_acceleration: [f64; FORCE_THRESHOLDS],
        force_thresholds_nominal: [f64; FORCE_THRESHOLDS],
    ) -> Self {
        Self {
            base: RequestBase::new(),
            torque_thresholds_acceleration,
            torque_thresholds_nominal,
            force_thresholds_acceleration,
            force_thresholds_nominal,
        }
    }

    /// Create a request from slices, failing with [`WireError::LengthMismatch`] on any slice of
    /// the wrong length.
    pub fn try_from_slices(
        torque_thresholds_acceleration: &[f64],
        torque_thresholds_nominal: &[f64],
        force_thresholds_acceleration: &[f64],
        force_thresholds_nominal: &[f64],
    ) -> Result<Self, WireError> {
        Ok(Self::new(
            fixed(torque_thresholds_acceleration)?,
            fixed(torque_thresholds_nominal)?,
            fixed(force_thresholds_acceleration)?,
            fixed(force_thresholds_nominal)?,
        ))
    }

    /// Joint torque thresholds during acceleration.
    pub fn torque_thresholds_acceleration(&self) -> [f64; TORQUE_THRESHOLDS] {
        self.torque_thresholds_acceleration
    }

    /// Joint torque thresholds during nominal operation.
    pub fn torque_thresholds_nominal(&self) -> [f64; TORQUE_THRESHOLDS] {
        self.torque_thresholds_nominal
    }

    /// Cartesian force thresholds during acceleration.
    pub fn force_thresholds_acceleration(&self) -> [f64; FORCE_THRESHOLDS] {
        self.force_thresholds_acceleration
    }

    /// Cartesian force thresholds during nominal operation.
    pub fn force_thresholds_nominal(&self) -> [f64; FORCE_THRESHOLDS] {
        self.force_thresholds_nominal
    }
}

/// The bare envelope.
pub type Response = ResponseBase<SetCollisionBehavior>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Wire;

    #[test]
    fn test_layout() {
        assert_eq!(Request::SIZE, 4 + (14 + 14 + 12 + 12) * 8);
    }

    #[test]
    fn test_slices_of_exact_length() {
        let torque = [20.0; 14];
        let force = [10.0; 12];
        let request = Request::try_from_slices(&torque, &torque, &force, &force).unwrap();
        assert_eq!(request.torque_thresholds_nominal(), torque);
        assert_eq!(request.force_thresholds_acceleration(), force);
    }

    #[test]
    fn test_short_torque_vector_is_refused() {
        let force = [10.0; 12];
        assert_eq!(
            Request::try_from_slices(&[20.0; 7], &[20.0; 14], &force, &force),
            Err(WireError::LengthMismatch {
                expected: 14,
                actual: 7
            })
        );
    }

    #[test]
    fn test_long_force_vector_is_refused() {
        let torque = [20.0; 14];
        assert_eq!(
            Request::try_from_slices(&torque, &torque, &[10.0; 12], &[10.0; 13]),
            Err(WireError::LengthMismatch {
                expected: 12,
                actual: 13
            })
        );
    }

    #[test]
    fn test_field_order() {
        let mut torque_acc = [0.0; 14];
        torque_acc[0] = 1.0;
        let mut force_nominal = [0.0; 12];
        force_nominal[11] = 2.0;
        let request = Request::new(torque_acc, [0.0; 14], [0.0; 12], force_nominal);

        let mut buf = [0u8; Request::SIZE];
        request.encode_to_slice(&mut buf).unwrap();
        assert_eq!(&buf[4..12], &1.0f64.to_le_bytes());
        assert_eq!(&buf[Request::SIZE - 8..], &2.0f64.to_le_bytes());
        assert_eq!(Request::decode_from_slice(&buf), Ok(request));
    }
}
