//! The command catalog.
//!
//! Identifiers are append-only: an ordinal is never reassigned, and new commands go at the end.
//! Catalog disagreements between client and arm are caught by the handshake version, never
//! inferred from identifier values.
use core::fmt;

use crate::wire::{Decoder, Encoder, Wire, WireError};

/// Identifies which command a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Function {
    /// Version handshake.
    Connect = 0,
    /// Start a motion generator.
    StartMotionGenerator = 1,
    /// Stop the active motion generator.
    StopMotionGenerator = 2,
    /// Start the external controller.
    StartController = 3,
    /// Stop the external controller.
    StopController = 4,
    /// Read the cartesian limit box.
    GetCartesianLimit = 5,
    /// Select the control law.
    SetControllerMode = 6,
    /// Configure collision thresholds.
    SetCollisionBehavior = 7,
    /// Configure joint stiffness.
    SetJointImpedance = 8,
    /// Configure cartesian stiffness.
    SetCartesianImpedance = 9,
    /// Configure guiding mode axes.
    SetGuidingMode = 10,
    /// Set the end effector to stiffness frame transform.
    SetEEToK = 11,
    /// Set the flange to end effector transform.
    SetFToEE = 12,
    /// Set the external load.
    SetLoad = 13,
    /// Set the time scaling factor.
    SetTimeScalingFactor = 14,
    /// Recover from errors automatically.
    AutomaticErrorRecovery = 15,
    /// Reset the recorded external torque and force maxima.
    ResetExternalTorqueAndForceMax = 16,
}

impl Function {
    /// Every identifier, in ordinal order.
    pub const ALL: [Function; 17] = [
        Function::Connect,
        Function::StartMotionGenerator,
        Function::StopMotionGenerator,
        Function::StartController,
        Function::StopController,
        Function::GetCartesianLimit,
        Function::SetControllerMode,
        Function::SetCollisionBehavior,
        Function::SetJointImpedance,
        Function::SetCartesianImpedance,
        Function::SetGuidingMode,
        Function::SetEEToK,
        Function::SetFToEE,
        Function::SetLoad,
        Function::SetTimeScalingFactor,
        Function::AutomaticErrorRecovery,
        Function::ResetExternalTorqueAndForceMax,
    ];

    /// The wire value of this identifier.
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// The command name.
    pub const fn name(self) -> &'static str {
        match self {
            Function::Connect => "Connect",
            Function::StartMotionGenerator => "StartMotionGenerator",
            Function::StopMotionGenerator => "StopMotionGenerator",
            Function::StartController => "StartController",
            Function::StopController => "StopController",
            Function::GetCartesianLimit => "GetCartesianLimit",
            Function::SetControllerMode => "SetControllerMode",
            Function::SetCollisionBehavior => "SetCollisionBehavior",
            Function::SetJointImpedance => "SetJointImpedance",
            Function::SetCartesianImpedance => "SetCartesianImpedance",
            Function::SetGuidingMode => "SetGuidingMode",
            Function::SetEEToK => "SetEEToK",
            Function::SetFToEE => "SetFToEE",
            Function::SetLoad => "SetLoad",
            Function::SetTimeScalingFactor => "SetTimeScalingFactor",
            Function::AutomaticErrorRecovery => "AutomaticErrorRecovery",
            Function::ResetExternalTorqueAndForceMax => "ResetExternalTorqueAndForceMax",
        }
    }
}

impl TryFrom<u32> for Function {
    type Error = WireError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Function::ALL
            .get(raw as usize)
            .copied()
            .ok_or(WireError::UnknownFunction(raw))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Wire for Function {
    const SIZE: usize = u32::SIZE;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        self.as_raw().encode(encoder)
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        Function::try_from(u32::decode(decoder)?)
    }
}
