//! The version handshake.
//!
//! Connect gates the session: no other command is valid until it succeeds, and a version
//! mismatch ends the session.
use armlink_derive::Wire;

use crate::{
    VERSION, Version,
    envelope::{Command, Reply, RequestBase, ResponseBase},
    function::Function,
};

/// Marker type of the `Connect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connect;

impl Command for Connect {
    const FUNCTION: Function = Function::Connect;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

/// Outcome of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, armlink_derive::Status)]
#[repr(u32)]
pub enum Status {
    /// Both ends speak the same protocol version.
    Success,
    /// The client library speaks a different protocol version than the arm.
    IncompatibleLibraryVersion,
}

/// Opens the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Wire)]
pub struct Request {
    base: RequestBase<Connect>,
    version: Version,
    udp_port: u16,
}

impl Request {
    /// Create a request announcing this crate's [`VERSION`] and the port the client listens on
    /// for the real-time channel.
    pub fn new(udp_port: u16) -> Self {
        Self::with_version(VERSION, udp_port)
    }

    /// Create a request announcing an explicit version.
    pub fn with_version(version: Version, udp_port: u16) -> Self {
        Self {
            base: RequestBase::new(),
            version,
            udp_port,
        }
    }

    /// The client's protocol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The port the client listens on for the real-time channel.
    pub fn udp_port(&self) -> u16 {
        self.udp_port
    }
}

/// The arm's answer, carrying the arm's own version whatever the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Wire)]
pub struct Response {
    base: ResponseBase<Connect>,
    version: Version,
}

impl Response {
    /// Create a response stamped with this crate's [`VERSION`].
    pub fn new(status: Status) -> Self {
        Self::with_version(status, VERSION)
    }

    /// Create a response carrying an explicit arm version.
    pub fn with_version(status: Status, version: Version) -> Self {
        Self {
            base: ResponseBase::new(status),
            version,
        }
    }

    /// Answer `request` as an arm speaking `arm_version`.
    pub fn answer(request: &Request, arm_version: Version) -> Self {
        let status = if request.version() == arm_version {
            Status::Success
        } else {
            Status::IncompatibleLibraryVersion
        };
        Self::with_version(status, arm_version)
    }

    /// Answer `request` as an arm speaking this crate's [`VERSION`].
    pub fn for_request(request: &Request) -> Self {
        Self::answer(request, VERSION)
    }

    /// The arm's protocol version.
    pub fn version(&self) -> Version {
        self.version
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
    use crate::wire::Wire;

    #[test]
    fn test_request_layout() {
        let request = Request::new(4000);
        let mut buf = [0u8; Request::SIZE];
        assert_eq!(Request::SIZE, 8);
        request.encode_to_slice(&mut buf).unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..6], &VERSION.to_le_bytes());
        assert_eq!(&buf[6..], &4000u16.to_le_bytes());

        assert_eq!(Request::decode_from_slice(&buf), Ok(request));
    }

    #[test]
    fn test_matching_version_succeeds() {
        let response = Response::for_request(&Request::new(4000));
        assert_eq!(response.status(), Status::Success);
        assert_eq!(response.version(), VERSION);
        assert_eq!(response.function(), Function::Connect);
    }

    #[test]
    fn test_mismatched_version_is_incompatible() {
        let response = Response::for_request(&Request::with_version(VERSION + 1, 4000));
        assert_eq!(response.status(), Status::IncompatibleLibraryVersion);
        assert_eq!(response.version(), VERSION);

        let response = Response::answer(&Request::new(4000), 7);
        assert_eq!(response.status(), Status::IncompatibleLibraryVersion);
        assert_eq!(response.version(), 7);
    }

    #[test]
    fn test_response_roundtrip() {
        let response = Response::with_version(Status::IncompatibleLibraryVersion, 3);
        let mut buf = [0u8; Response::SIZE];
        assert_eq!(Response::SIZE, 10);
        response.encode_to_slice(&mut buf).unwrap();
        assert_eq!(Response::decode_from_slice(&buf), Ok(response));
    }
}
