//! Handshake-gated command exchange over a byte stream.
//!
//! The channel does not open connections: hand it any stream that is already connected.
//! [`CommandChannel`] is the client side. It refuses every command until [`Connect`] succeeds,
//! treats a version mismatch as fatal for the whole session, and allows one outstanding request
//! at a time. [`ArmEndpoint`] is the matching arm side, mostly useful for simulators and tests.
use std::io::{self, Read, Write};

use log::{debug, info, trace, warn};

use crate::{
    VERSION, Version, cfg,
    commands::{Connect, connect},
    dispatch::{AnyRequest, peek_function},
    envelope::{Command, Reply},
    function::Function,
    status::Status,
    wire::{Wire, WireError},
};

/// Errors raised by the command channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// A message could not be encoded or decoded.
    #[error("malformed message: {0}")]
    Wire(#[from] WireError),
    /// Client and arm speak different protocol versions. The session is over.
    #[error("incompatible protocol version: client speaks {client}, arm speaks {arm}")]
    IncompatibleVersion {
        /// The client's version.
        client: Version,
        /// The version reported by the arm.
        arm: Version,
    },
    /// A command other than Connect was issued before the handshake succeeded.
    #[error("{0} issued before a successful handshake")]
    NotConnected(Function),
    /// The handshake failed earlier; no command can be issued anymore.
    #[error("session aborted after a failed handshake")]
    Aborted,
    /// A request is still waiting for its response.
    #[error("{pending} is still waiting for its response")]
    RequestPending {
        /// The command awaiting its response.
        pending: Function,
    },
    /// A response was requested for a command that has no outstanding request.
    #[error("no {0} request is waiting for a response")]
    NotPending(Function),
    /// The response awaited belongs to a different command than the one requested.
    #[error("awaiting the {pending} response, not {requested}")]
    UnexpectedResponse {
        /// The command whose response is outstanding.
        pending: Function,
        /// The command the caller asked for.
        requested: Function,
    },
    /// Connect was issued directly instead of through [`CommandChannel::connect`].
    #[error("the handshake can only run through CommandChannel::connect")]
    HandshakeBypassed,
    /// The arm answered with a status other than success.
    #[error("{function} failed with status {status}")]
    Rejected {
        /// The command that failed.
        function: Function,
        /// The raw status value.
        status: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Disconnected,
    Connected { arm_version: Version },
    Aborted,
}

/// The client side of the command channel.
#[derive(Debug)]
pub struct CommandChannel<T>
where
    T: Read + Write,
{
    stream: T,
    session: Session,
    pending: Option<Function>,
}

impl<T> CommandChannel<T>
where
    T: Read + Write,
{
    /// Wrap a connected stream. No handshake happens until [`CommandChannel::connect`].
    pub fn new(stream: T) -> Self {
        Self {
            stream,
            session: Session::Disconnected,
            pending: None,
        }
    }

    /// Run the version handshake, announcing `udp_port` for the real-time channel.
    ///
    /// Returns the arm's version. On a mismatch the channel is aborted for good.
    pub fn connect(&mut self, udp_port: u16) -> Result<Version, ChannelError> {
        self.transmit::<Connect>(&connect::Request::new(udp_port))?;
        let response = self.await_response::<Connect>()?;
        let arm = response.version();

        if response.status() != connect::Status::Success || arm != VERSION {
            warn!("Handshake rejected: client speaks version {VERSION}, arm speaks {arm}");
            self.session = Session::Aborted;
            return Err(ChannelError::IncompatibleVersion {
                client: VERSION,
                arm,
            });
        }

        info!("Connected to arm speaking protocol version {arm}");
        self.session = Session::Connected { arm_version: arm };
        Ok(arm)
    }

    /// Has the handshake succeeded?
    pub fn is_connected(&self) -> bool {
        matches!(self.session, Session::Connected { .. })
    }

    /// Has a failed handshake ended the session?
    pub fn is_aborted(&self) -> bool {
        self.session == Session::Aborted
    }

    /// The version reported by the arm, once connected.
    pub fn arm_version(&self) -> Option<Version> {
        match self.session {
            Session::Connected { arm_version } => Some(arm_version),
            _ => None,
        }
    }

    /// The command awaiting its response, if any.
    pub fn pending(&self) -> Option<Function> {
        self.pending
    }

    /// Send a request without waiting for the response.
    ///
    /// [`Connect`] is refused here; the handshake only runs through [`CommandChannel::connect`].
    pub fn send<C: Command>(&mut self, request: &C::Request) -> Result<(), ChannelError> {
        if C::FUNCTION == Function::Connect {
            return Err(ChannelError::HandshakeBypassed);
        }
        self.transmit::<C>(request)
    }

    fn transmit<C: Command>(&mut self, request: &C::Request) -> Result<(), ChannelError> {
        match self.session {
            Session::Aborted => return Err(ChannelError::Aborted),
            Session::Disconnected if C::FUNCTION != Function::Connect => {
                return Err(ChannelError::NotConnected(C::FUNCTION));
            }
            _ => {}
        }
        if let Some(pending) = self.pending {
            return Err(ChannelError::RequestPending { pending });
        }

        let bytes = request.to_bytes()?;
        if cfg::should_trace_frames() {
            trace!("-> {:02x?}", bytes);
        }
        self.stream.write_all(&bytes)?;
        self.stream.flush()?;

        debug!("Sent {} request", C::FUNCTION);
        self.pending = Some(C::FUNCTION);
        Ok(())
    }

    /// Wait for the response to the outstanding `C` request.
    pub fn receive<C: Command>(&mut self) -> Result<C::Response, ChannelError> {
        if C::FUNCTION == Function::Connect {
            return Err(ChannelError::HandshakeBypassed);
        }
        self.await_response::<C>()
    }

    fn await_response<C: Command>(&mut self) -> Result<C::Response, ChannelError> {
        if self.session == Session::Aborted {
            return Err(ChannelError::Aborted);
        }
        match self.pending {
            Some(pending) if pending == C::FUNCTION => {}
            Some(pending) => {
                return Err(ChannelError::UnexpectedResponse {
                    pending,
                    requested: C::FUNCTION,
                });
            }
            None => return Err(ChannelError::NotPending(C::FUNCTION)),
        }

        let mut bytes = vec![0; C::Response::SIZE];
        self.stream.read_exact(&mut bytes)?;
        self.pending = None;
        if cfg::should_trace_frames() {
            trace!("<- {:02x?}", bytes);
        }

        let response = C::Response::decode_from_slice(&bytes)?;
        debug!("{} answered {:?}", C::FUNCTION, response.status());
        Ok(response)
    }

    /// Send a request and wait for its response.
    ///
    /// A non-success status is returned in the response for the caller to branch on.
    pub fn execute<C: Command>(&mut self, request: &C::Request) -> Result<C::Response, ChannelError> {
        self.send::<C>(request)?;
        self.receive::<C>()
    }

    /// Like [`CommandChannel::execute`], but turns a non-success status into
    /// [`ChannelError::Rejected`].
    pub fn execute_checked<C: Command>(
        &mut self,
        request: &C::Request,
    ) -> Result<C::Response, ChannelError> {
        let response = self.execute::<C>(request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Rejected {
                function: C::FUNCTION,
                status: status.as_raw(),
            });
        }
        Ok(response)
    }

    /// Get the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> T {
        self.stream
    }
}

/// The arm side of the command channel.
#[derive(Debug)]
pub struct ArmEndpoint<T>
where
    T: Read + Write,
{
    stream: T,
    version: Version,
}

impl<T> ArmEndpoint<T>
where
    T: Read + Write,
{
    /// Serve a connected stream as an arm speaking `version`.
    pub fn new(stream: T, version: Version) -> Self {
        Self { stream, version }
    }

    /// The version this endpoint answers handshakes with.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Read the next request, whatever its command.
    pub fn receive_request(&mut self) -> Result<AnyRequest, ChannelError> {
        let mut bytes = vec![0; Function::SIZE];
        self.stream.read_exact(&mut bytes)?;

        let function = peek_function(&bytes)?;
        bytes.resize(AnyRequest::size_of(function), 0);
        self.stream.read_exact(&mut bytes[Function::SIZE..])?;
        if cfg::should_trace_frames() {
            trace!("<- {:02x?}", bytes);
        }

        debug!("Received {function} request");
        Ok(AnyRequest::decode(&bytes)?)
    }

    /// Send a response.
    pub fn respond<R: Reply>(&mut self, response: &R) -> Result<(), ChannelError> {
        let bytes = response.to_bytes()?;
        if cfg::should_trace_frames() {
            trace!("-> {:02x?}", bytes);
        }
        self.stream.write_all(&bytes)?;
        self.stream.flush()?;
        debug!("Answered {} with {:?}", response.function(), response.status());
        Ok(())
    }

    /// Answer a handshake, checking the client's version against this endpoint's.
    pub fn answer_connect(
        &mut self,
        request: &connect::Request,
    ) -> Result<connect::Status, ChannelError> {
        let response = connect::Response::answer(request, self.version);
        self.respond(&response)?;
        if response.status() != connect::Status::Success {
            warn!(
                "Refused client speaking version {}, arm speaks {}",
                request.version(),
                self.version
            );
        }
        Ok(response.status())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::commands::{
        StopController, start_motion_generator, stop_controller,
        start_motion_generator::{MotionGeneratorMode, StartMotionGenerator},
    };

    /// Replays canned arm output and records what the client writes.
    pub struct Loopback {
        incoming: Cursor<Vec<u8>>,
        pub outgoing: Vec<u8>,
    }

    impl Loopback {
        pub fn new(replies: &[Vec<u8>]) -> Self {
            Self {
                incoming: Cursor::new(replies.concat()),
                outgoing: Vec::new(),
            }
        }
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.incoming.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.outgoing.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn connect_ok() -> Vec<u8> {
        connect::Response::new(connect::Status::Success)
            .to_bytes()
            .unwrap()
    }

    #[test]
    fn test_commands_need_handshake() {
        let mut channel = CommandChannel::new(Loopback::new(&[]));
        let err = channel
            .execute::<StopController>(&stop_controller::Request::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ChannelError::NotConnected(Function::StopController)
        ));
        assert!(channel.get_ref().outgoing.is_empty());
    }

    #[test]
    fn test_handshake_then_command() {
        let replies = [
            connect_ok(),
            stop_controller::Response::new(stop_controller::Status::Success)
                .to_bytes()
                .unwrap(),
        ];
        let mut channel = CommandChannel::new(Loopback::new(&replies));
        assert_eq!(channel.connect(4000).unwrap(), VERSION);
        assert!(channel.is_connected());
        assert_eq!(channel.arm_version(), Some(VERSION));

        let response = channel
            .execute_checked::<StopController>(&stop_controller::Request::new())
            .unwrap();
        assert!(response.status().is_success());

        let written = channel.into_inner().outgoing;
        assert_eq!(
            written.len(),
            connect::Request::SIZE + stop_controller::Request::SIZE
        );
        assert_eq!(
            peek_function(&written[connect::Request::SIZE..]),
            Ok(Function::StopController)
        );
    }

    #[test]
    fn test_version_mismatch_aborts_session() {
        let replies = [connect::Response::with_version(
            connect::Status::IncompatibleLibraryVersion,
            VERSION + 1,
        )
        .to_bytes()
        .unwrap()];
        let mut channel = CommandChannel::new(Loopback::new(&replies));

        match channel.connect(4000) {
            Err(ChannelError::IncompatibleVersion { client, arm }) => {
                assert_eq!(client, VERSION);
                assert_eq!(arm, VERSION + 1);
            }
            other => panic!("unexpected handshake result: {other:?}"),
        }
        assert!(channel.is_aborted());
        assert!(matches!(
            channel.execute::<StopController>(&stop_controller::Request::new()),
            Err(ChannelError::Aborted)
        ));
        assert!(matches!(channel.connect(4000), Err(ChannelError::Aborted)));
    }

    #[test]
    fn test_one_outstanding_request() {
        let mut channel = CommandChannel::new(Loopback::new(&[connect_ok()]));
        channel.connect(4000).unwrap();

        let request = start_motion_generator::Request::new(MotionGeneratorMode::JointPosition);
        channel.send::<StartMotionGenerator>(&request).unwrap();
        assert_eq!(channel.pending(), Some(Function::StartMotionGenerator));

        assert!(matches!(
            channel.send::<StopController>(&stop_controller::Request::new()),
            Err(ChannelError::RequestPending {
                pending: Function::StartMotionGenerator
            })
        ));
        assert!(matches!(
            channel.receive::<StopController>(),
            Err(ChannelError::UnexpectedResponse {
                pending: Function::StartMotionGenerator,
                requested: Function::StopController,
            })
        ));
    }

    #[test]
    fn test_connect_only_through_handshake() {
        let replies = [
            connect_ok(),
            stop_controller::Response::new(stop_controller::Status::Success)
                .to_bytes()
                .unwrap(),
        ];
        let mut channel = CommandChannel::new(Loopback::new(&replies));
        channel.connect(4000).unwrap();
        let written = channel.get_ref().outgoing.len();

        let stale = connect::Request::with_version(VERSION + 1, 4000);
        assert!(matches!(
            channel.execute::<Connect>(&stale),
            Err(ChannelError::HandshakeBypassed)
        ));
        assert!(matches!(
            channel.receive::<Connect>(),
            Err(ChannelError::HandshakeBypassed)
        ));
        assert_eq!(channel.get_ref().outgoing.len(), written);
        assert_eq!(channel.pending(), None);

        assert!(channel
            .execute_checked::<StopController>(&stop_controller::Request::new())
            .is_ok());
    }

    #[test]
    fn test_success_with_other_version_aborts() {
        let replies = [connect::Response::with_version(
            connect::Status::Success,
            VERSION + 5,
        )
        .to_bytes()
        .unwrap()];
        let mut channel = CommandChannel::new(Loopback::new(&replies));

        assert!(matches!(
            channel.connect(4000),
            Err(ChannelError::IncompatibleVersion { arm, .. }) if arm == VERSION + 5
        ));
        assert!(channel.is_aborted());
        assert_eq!(channel.arm_version(), None);
    }

    #[test]
    fn test_receive_without_request() {
        let mut channel = CommandChannel::new(Loopback::new(&[connect_ok()]));
        channel.connect(4000).unwrap();
        assert!(matches!(
            channel.receive::<StopController>(),
            Err(ChannelError::NotPending(Function::StopController))
        ));
    }

    #[test]
    fn test_rejection_is_surfaced() {
        let replies = [
            connect_ok(),
            start_motion_generator::Response::new(start_motion_generator::Status::Rejected)
                .to_bytes()
                .unwrap(),
            start_motion_generator::Response::new(start_motion_generator::Status::Rejected)
                .to_bytes()
                .unwrap(),
        ];
        let mut channel = CommandChannel::new(Loopback::new(&replies));
        channel.connect(4000).unwrap();

        let request = start_motion_generator::Request::new(MotionGeneratorMode::JointPosition);
        let response = channel.execute::<StartMotionGenerator>(&request).unwrap();
        assert_eq!(response.status(), start_motion_generator::Status::Rejected);

        assert!(matches!(
            channel.execute_checked::<StartMotionGenerator>(&request),
            Err(ChannelError::Rejected {
                function: Function::StartMotionGenerator,
                status: 4
            })
        ));
    }

    #[test]
    fn test_foreign_response_is_malformed() {
        let replies = [
            connect_ok(),
            stop_controller::Response::new(stop_controller::Status::Success)
                .to_bytes()
                .unwrap(),
        ];
        let mut channel = CommandChannel::new(Loopback::new(&replies));
        channel.connect(4000).unwrap();

        let mode = MotionGeneratorMode::JointPosition;
        assert!(matches!(
            channel.execute::<StartMotionGenerator>(&start_motion_generator::Request::new(mode)),
            Err(ChannelError::Wire(WireError::FunctionMismatch {
                expected: Function::StartMotionGenerator,
                actual: Function::StopController
            }))
        ));
        assert_eq!(channel.pending(), None);
    }

    #[test]
    fn test_arm_endpoint_reads_any_request() {
        let mut incoming = connect::Request::with_version(VERSION + 1, 4000)
            .to_bytes()
            .unwrap();
        incoming.extend(stop_controller::Request::new().to_bytes().unwrap());

        let mut arm = ArmEndpoint::new(Loopback::new(&[incoming]), VERSION);
        let AnyRequest::Connect(request) = arm.receive_request().unwrap() else {
            panic!("expected a Connect request");
        };
        assert_eq!(request.udp_port(), 4000);
        assert_eq!(
            arm.answer_connect(&request).unwrap(),
            connect::Status::IncompatibleLibraryVersion
        );
        assert_eq!(
            arm.receive_request().unwrap().function(),
            Function::StopController
        );
    }
}
