//! Starting a motion generator.
//!
//! The status of this command is overloaded. The first report acknowledges the start
//! (`Success`) or refuses it (`InvalidType`, `Rejected`); a started generator later reports its
//! terminal outcome (`Finished`, `Aborted`) through the same field. [`MotionLifecycle`] keeps
//! track of which of the two a report can be.
use armlink_derive::Wire;

use crate::{
    envelope::{Command, RequestBase, ResponseBase},
    function::Function,
    macros::wire_enum,
};

/// Marker type of the `StartMotionGenerator` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartMotionGenerator;

impl Command for StartMotionGenerator {
    const FUNCTION: Function = Function::StartMotionGenerator;
    type Status = Status;
    type Request = Request;
    type Response = Response;
}

/// Which setpoints the motion generator streams.
///
/// There is no default mode; every start request names one.
///
/// ```compile_fail
/// use armlink::commands::start_motion_generator::MotionGeneratorMode;
///
/// let _ = MotionGeneratorMode::default();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MotionGeneratorMode {
    /// Joint positions.
    JointPosition,
    /// Joint velocities.
    JointVelocity,
    /// Cartesian poses.
    CartesianPosition,
    /// Cartesian velocities.
    CartesianVelocity,
}

wire_enum!(
    MotionGeneratorMode,
    "motion generator mode",
    [
        JointPosition,
        JointVelocity,
        CartesianPosition,
        CartesianVelocity
    ]
);

/// Start acknowledgment or terminal outcome of a motion generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, armlink_derive::Status)]
#[repr(u32)]
pub enum Status {
    /// The generator started.
    Success,
    /// The requested mode is not supported.
    InvalidType,
    /// The generator ran to completion.
    Finished,
    /// The generator was stopped by a safety condition.
    Aborted,
    /// The start preconditions were not met.
    Rejected,
}

impl Status {
    /// Does this status end a running generator?
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Finished | Status::Aborted)
    }

    /// Can this status answer the start request itself?
    pub const fn is_acknowledgment(self) -> bool {
        matches!(self, Status::Success | Status::InvalidType | Status::Rejected)
    }
}

/// Asks the arm to start a motion generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Wire)]
pub struct Request {
    base: RequestBase<StartMotionGenerator>,
    mode: MotionGeneratorMode,
}

impl Request {
    /// Create a request for the given mode.
    pub fn new(mode: MotionGeneratorMode) -> Self {
        Self {
            base: RequestBase::new(),
            mode,
        }
    }

    /// The requested mode.
    pub fn mode(&self) -> MotionGeneratorMode {
        self.mode
    }
}

/// The bare envelope; only the status matters.
pub type Response = ResponseBase<StartMotionGenerator>;

/// Where a motion generator session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Start requested, no report yet.
    Requested,
    /// The arm acknowledged the start.
    Running,
    /// The arm refused to start the generator.
    Refused,
    /// The generator completed.
    Finished,
    /// The generator was aborted.
    Aborted,
}

impl Phase {
    /// Has the session ended?
    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Refused | Phase::Finished | Phase::Aborted)
    }
}

/// A status report that does not fit the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// The report is not valid in the current phase.
    #[error("{status:?} is not a valid report while the motion generator is {phase:?}")]
    UnexpectedStatus {
        /// Phase before the report.
        phase: Phase,
        /// The offending report.
        status: Status,
    },
    /// A report arrived after the session ended.
    #[error("motion generator session already ended as {0:?}")]
    Ended(Phase),
}

/// Follows one motion generator session through its status reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionLifecycle {
    mode: MotionGeneratorMode,
    phase: Phase,
}

impl MotionLifecycle {
    /// Track a session started with `request`.
    pub fn new(request: &Request) -> Self {
        Self {
            mode: request.mode(),
            phase: Phase::Requested,
        }
    }

    /// The mode the session was started in.
    pub fn mode(&self) -> MotionGeneratorMode {
        self.mode
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Apply a status report, returning the new phase.
    ///
    /// `Success` is only valid as the start acknowledgment; a running generator must end with
    /// `Finished` or `Aborted`.
    pub fn observe(&mut self, status: Status) -> Result<Phase, LifecycleError> {
        let next = match (self.phase, status) {
            (phase, _) if phase.is_over() => return Err(LifecycleError::Ended(phase)),
            (Phase::Requested, Status::Success) => Phase::Running,
            (Phase::Requested, Status::InvalidType | Status::Rejected) => Phase::Refused,
            (Phase::Requested | Phase::Running, Status::Aborted) => Phase::Aborted,
            (Phase::Running, Status::Finished) => Phase::Finished,
            (phase, status) => return Err(LifecycleError::UnexpectedStatus { phase, status }),
        };
        self.phase = next;
        Ok(next)
    }
}
