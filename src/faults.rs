//! Safety and limit violations reported by the arm.
//!
//! The arm reports these out of band, as a 32-bit word in its state, never inside a command
//! response. Each [`Fault`] names one bit position; the bits are independent and carry no
//! priority. Positions are part of the compatibility contract and must never be reordered.
//!
//! The arm firmware's own list has 33 entries, one more than the word can hold. Its
//! `StartElbowSignInconsistent` entry (position 24 there) is not represented here because
//! [`Fault::CartesianMotionGeneratorElbowSignInconsistent`] covers the same condition. Every
//! fault from [`Fault::CommunicationConstraintsViolation`] through
//! [`Fault::ControllerTorqueDiscontinuity`] therefore sits one position lower than in the
//! firmware list: positions 24..=31 here are firmware positions 25..=32.
use core::fmt;

use bitflags::bitflags;

use crate::wire::{Decoder, Encoder, Wire, WireError};

/// One safety or limit violation. The discriminant is its bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Fault {
    /// A joint left its position range.
    JointPositionLimitsViolation = 0,
    /// The end effector left the cartesian limit box.
    CartesianPositionLimitsViolation = 1,
    /// Self-collision avoidance triggered.
    SelfcollisionAvoidanceViolation = 2,
    /// A joint exceeded its velocity limit.
    JointVelocityViolation = 3,
    /// The end effector exceeded its velocity limit.
    CartesianVelocityViolation = 4,
    /// Force control left its safe envelope.
    ForceControlSafetyViolation = 5,
    /// The joint collision reflex fired.
    JointReflex = 6,
    /// The cartesian collision reflex fired.
    CartesianReflex = 7,
    /// The final pose deviated too far from the goal.
    MaxGoalPoseDeviationViolation = 8,
    /// The pose deviated too far from the commanded path.
    MaxPathPoseDeviationViolation = 9,
    /// The cartesian velocity profile is unsafe.
    CartesianVelocityProfileSafetyViolation = 10,
    /// The first joint position setpoint does not match the current pose.
    JointPositionMotionGeneratorStartPoseInvalid = 11,
    /// A joint setpoint is outside the position range.
    JointMotionGeneratorPositionLimitsViolation = 12,
    /// A joint setpoint exceeds the velocity limit.
    JointMotionGeneratorVelocityLimitsViolation = 13,
    /// Joint setpoints jump in velocity.
    JointMotionGeneratorVelocityDiscontinuity = 14,
    /// Joint setpoints jump in acceleration.
    JointMotionGeneratorAccelerationDiscontinuity = 15,
    /// The first cartesian pose setpoint does not match the current pose.
    CartesianPositionMotionGeneratorStartPoseInvalid = 16,
    /// The elbow setpoint is outside its range.
    CartesianMotionGeneratorElbowLimitViolation = 17,
    /// A cartesian setpoint exceeds the velocity limit.
    CartesianMotionGeneratorVelocityLimitsViolation = 18,
    /// Cartesian setpoints jump in velocity.
    CartesianMotionGeneratorVelocityDiscontinuity = 19,
    /// Cartesian setpoints jump in acceleration.
    CartesianMotionGeneratorAccelerationDiscontinuity = 20,
    /// The elbow sign changed between setpoints.
    CartesianMotionGeneratorElbowSignInconsistent = 21,
    /// The first elbow setpoint does not match the current elbow.
    CartesianMotionGeneratorStartElbowInvalid = 22,
    /// The commanded force was not reached within tolerance.
    ForceControllerDesiredForceToleranceViolation = 23,
    /// Setpoints arrived too late or too irregularly.
    CommunicationConstraintsViolation = 24,
    /// The arm exceeded its power limit.
    PowerLimitViolation = 25,
    /// A cartesian setpoint needs a joint position outside its range.
    CartesianMotionGeneratorJointPositionLimitsViolation = 26,
    /// A cartesian setpoint needs a joint velocity above its limit.
    CartesianMotionGeneratorJointVelocityLimitsViolation = 27,
    /// Cartesian setpoints make a joint jump in velocity.
    CartesianMotionGeneratorJointVelocityDiscontinuity = 28,
    /// Cartesian setpoints make a joint jump in acceleration.
    CartesianMotionGeneratorJointAccelerationDiscontinuity = 29,
    /// A cartesian pose setpoint is not a valid transform.
    CartesianPositionMotionGeneratorInvalidFrame = 30,
    /// Commanded torques jump between cycles.
    ControllerTorqueDiscontinuity = 31,
}

impl Fault {
    /// Every fault, in bit order.
    pub const ALL: [Fault; 32] = [
        Fault::JointPositionLimitsViolation,
        Fault::CartesianPositionLimitsViolation,
        Fault::SelfcollisionAvoidanceViolation,
        Fault::JointVelocityViolation,
        Fault::CartesianVelocityViolation,
        Fault::ForceControlSafetyViolation,
        Fault::JointReflex,
        Fault::CartesianReflex,
        Fault::MaxGoalPoseDeviationViolation,
        Fault::MaxPathPoseDeviationViolation,
        Fault::CartesianVelocityProfileSafetyViolation,
        Fault::JointPositionMotionGeneratorStartPoseInvalid,
        Fault::JointMotionGeneratorPositionLimitsViolation,
        Fault::JointMotionGeneratorVelocityLimitsViolation,
        Fault::JointMotionGeneratorVelocityDiscontinuity,
        Fault::JointMotionGeneratorAccelerationDiscontinuity,
        Fault::CartesianPositionMotionGeneratorStartPoseInvalid,
        Fault::CartesianMotionGeneratorElbowLimitViolation,
        Fault::CartesianMotionGeneratorVelocityLimitsViolation,
        Fault::CartesianMotionGeneratorVelocityDiscontinuity,
        Fault::CartesianMotionGeneratorAccelerationDiscontinuity,
        Fault::CartesianMotionGeneratorElbowSignInconsistent,
        Fault::CartesianMotionGeneratorStartElbowInvalid,
        Fault::ForceControllerDesiredForceToleranceViolation,
        Fault::CommunicationConstraintsViolation,
        Fault::PowerLimitViolation,
        Fault::CartesianMotionGeneratorJointPositionLimitsViolation,
        Fault::CartesianMotionGeneratorJointVelocityLimitsViolation,
        Fault::CartesianMotionGeneratorJointVelocityDiscontinuity,
        Fault::CartesianMotionGeneratorJointAccelerationDiscontinuity,
        Fault::CartesianPositionMotionGeneratorInvalidFrame,
        Fault::ControllerTorqueDiscontinuity,
    ];

    /// Bit position of this fault in the fault word.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// The fault word with only this fault set.
    pub const fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// The fault at bit position `bit`.
    pub const fn from_bit(bit: u32) -> Option<Self> {
        if bit < 32 {
            Some(Self::ALL[bit as usize])
        } else {
            None
        }
    }

    /// The fault name.
    pub const fn name(self) -> &'static str {
        match self {
            Fault::JointPositionLimitsViolation => "JointPositionLimitsViolation",
            Fault::CartesianPositionLimitsViolation => "CartesianPositionLimitsViolation",
            Fault::SelfcollisionAvoidanceViolation => "SelfcollisionAvoidanceViolation",
            Fault::JointVelocityViolation => "JointVelocityViolation",
            Fault::CartesianVelocityViolation => "CartesianVelocityViolation",
            Fault::ForceControlSafetyViolation => "ForceControlSafetyViolation",
            Fault::JointReflex => "JointReflex",
            Fault::CartesianReflex => "CartesianReflex",
            Fault::MaxGoalPoseDeviationViolation => "MaxGoalPoseDeviationViolation",
            Fault::MaxPathPoseDeviationViolation => "MaxPathPoseDeviationViolation",
            Fault::CartesianVelocityProfileSafetyViolation => "CartesianVelocityProfileSafetyViolation",
            Fault::JointPositionMotionGeneratorStartPoseInvalid => "JointPositionMotionGeneratorStartPoseInvalid",
            Fault::JointMotionGeneratorPositionLimitsViolation => "JointMotionGeneratorPositionLimitsViolation",
            Fault::JointMotionGeneratorVelocityLimitsViolation => "JointMotionGeneratorVelocityLimitsViolation",
            Fault::JointMotionGeneratorVelocityDiscontinuity => "JointMotionGeneratorVelocityDiscontinuity",
            Fault::JointMotionGeneratorAccelerationDiscontinuity => "JointMotionGeneratorAccelerationDiscontinuity",
            Fault::CartesianPositionMotionGeneratorStartPoseInvalid => "CartesianPositionMotionGeneratorStartPoseInvalid",
            Fault::CartesianMotionGeneratorElbowLimitViolation => "CartesianMotionGeneratorElbowLimitViolation",
            Fault::CartesianMotionGeneratorVelocityLimitsViolation => "CartesianMotionGeneratorVelocityLimitsViolation",
            Fault::CartesianMotionGeneratorVelocityDiscontinuity => "CartesianMotionGeneratorVelocityDiscontinuity",
            Fault::CartesianMotionGeneratorAccelerationDiscontinuity => "CartesianMotionGeneratorAccelerationDiscontinuity",
            Fault::CartesianMotionGeneratorElbowSignInconsistent => "CartesianMotionGeneratorElbowSignInconsistent",
            Fault::CartesianMotionGeneratorStartElbowInvalid => "CartesianMotionGeneratorStartElbowInvalid",
            Fault::ForceControllerDesiredForceToleranceViolation => "ForceControllerDesiredForceToleranceViolation",
            Fault::CommunicationConstraintsViolation => "CommunicationConstraintsViolation",
            Fault::PowerLimitViolation => "PowerLimitViolation",
            Fault::CartesianMotionGeneratorJointPositionLimitsViolation => "CartesianMotionGeneratorJointPositionLimitsViolation",
            Fault::CartesianMotionGeneratorJointVelocityLimitsViolation => "CartesianMotionGeneratorJointVelocityLimitsViolation",
            Fault::CartesianMotionGeneratorJointVelocityDiscontinuity => "CartesianMotionGeneratorJointVelocityDiscontinuity",
            Fault::CartesianMotionGeneratorJointAccelerationDiscontinuity => "CartesianMotionGeneratorJointAccelerationDiscontinuity",
            Fault::CartesianPositionMotionGeneratorInvalidFrame => "CartesianPositionMotionGeneratorInvalidFrame",
            Fault::ControllerTorqueDiscontinuity => "ControllerTorqueDiscontinuity",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A fault word: any combination of [`Fault`] bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[repr(transparent)]
    pub struct Faults: u32 {
        /// See [`Fault::JointPositionLimitsViolation`].
        const JOINT_POSITION_LIMITS_VIOLATION = Fault::JointPositionLimitsViolation.mask();
        /// See [`Fault::CartesianPositionLimitsViolation`].
        const CARTESIAN_POSITION_LIMITS_VIOLATION = Fault::CartesianPositionLimitsViolation.mask();
        /// See [`Fault::SelfcollisionAvoidanceViolation`].
        const SELFCOLLISION_AVOIDANCE_VIOLATION = Fault::SelfcollisionAvoidanceViolation.mask();
        /// See [`Fault::JointVelocityViolation`].
        const JOINT_VELOCITY_VIOLATION = Fault::JointVelocityViolation.mask();
        /// See [`Fault::CartesianVelocityViolation`].
        const CARTESIAN_VELOCITY_VIOLATION = Fault::CartesianVelocityViolation.mask();
        /// See [`Fault::ForceControlSafetyViolation`].
        const FORCE_CONTROL_SAFETY_VIOLATION = Fault::ForceControlSafetyViolation.mask();
        /// See [`Fault::JointReflex`].
        const JOINT_REFLEX = Fault::JointReflex.mask();
        /// See [`Fault::CartesianReflex`].
        const CARTESIAN_REFLEX = Fault::CartesianReflex.mask();
        /// See [`Fault::MaxGoalPoseDeviationViolation`].
        const MAX_GOAL_POSE_DEVIATION_VIOLATION = Fault::MaxGoalPoseDeviationViolation.mask();
        /// See [`Fault::MaxPathPoseDeviationViolation`].
        const MAX_PATH_POSE_DEVIATION_VIOLATION = Fault::MaxPathPoseDeviationViolation.mask();
        /// See [`Fault::CartesianVelocityProfileSafetyViolation`].
        const CARTESIAN_VELOCITY_PROFILE_SAFETY_VIOLATION = Fault::CartesianVelocityProfileSafetyViolation.mask();
        /// See [`Fault::JointPositionMotionGeneratorStartPoseInvalid`].
        const JOINT_POSITION_MOTION_GENERATOR_START_POSE_INVALID = Fault::JointPositionMotionGeneratorStartPoseInvalid.mask();
        /// See [`Fault::JointMotionGeneratorPositionLimitsViolation`].
        const JOINT_MOTION_GENERATOR_POSITION_LIMITS_VIOLATION = Fault::JointMotionGeneratorPositionLimitsViolation.mask();
        /// See [`Fault::JointMotionGeneratorVelocityLimitsViolation`].
        const JOINT_MOTION_GENERATOR_VELOCITY_LIMITS_VIOLATION = Fault::JointMotionGeneratorVelocityLimitsViolation.mask();
        /// See [`Fault::JointMotionGeneratorVelocityDiscontinuity`].
        const JOINT_MOTION_GENERATOR_VELOCITY_DISCONTINUITY = Fault::JointMotionGeneratorVelocityDiscontinuity.mask();
        /// See [`Fault::JointMotionGeneratorAccelerationDiscontinuity`].
        const JOINT_MOTION_GENERATOR_ACCELERATION_DISCONTINUITY = Fault::JointMotionGeneratorAccelerationDiscontinuity.mask();
        /// See [`Fault::CartesianPositionMotionGeneratorStartPoseInvalid`].
        const CARTESIAN_POSITION_MOTION_GENERATOR_START_POSE_INVALID = Fault::CartesianPositionMotionGeneratorStartPoseInvalid.mask();
        /// See [`Fault::CartesianMotionGeneratorElbowLimitViolation`].
        const CARTESIAN_MOTION_GENERATOR_ELBOW_LIMIT_VIOLATION = Fault::CartesianMotionGeneratorElbowLimitViolation.mask();
        /// See [`Fault::CartesianMotionGeneratorVelocityLimitsViolation`].
        const CARTESIAN_MOTION_GENERATOR_VELOCITY_LIMITS_VIOLATION = Fault::CartesianMotionGeneratorVelocityLimitsViolation.mask();
        /// See [`Fault::CartesianMotionGeneratorVelocityDiscontinuity`].
        const CARTESIAN_MOTION_GENERATOR_VELOCITY_DISCONTINUITY = Fault::CartesianMotionGeneratorVelocityDiscontinuity.mask();
        /// See [`Fault::CartesianMotionGeneratorAccelerationDiscontinuity`].
        const CARTESIAN_MOTION_GENERATOR_ACCELERATION_DISCONTINUITY = Fault::CartesianMotionGeneratorAccelerationDiscontinuity.mask();
        /// See [`Fault::CartesianMotionGeneratorElbowSignInconsistent`].
        const CARTESIAN_MOTION_GENERATOR_ELBOW_SIGN_INCONSISTENT = Fault::CartesianMotionGeneratorElbowSignInconsistent.mask();
        /// See [`Fault::CartesianMotionGeneratorStartElbowInvalid`].
        const CARTESIAN_MOTION_GENERATOR_START_ELBOW_INVALID = Fault::CartesianMotionGeneratorStartElbowInvalid.mask();
        /// See [`Fault::ForceControllerDesiredForceToleranceViolation`].
        const FORCE_CONTROLLER_DESIRED_FORCE_TOLERANCE_VIOLATION = Fault::ForceControllerDesiredForceToleranceViolation.mask();
        /// See [`Fault::CommunicationConstraintsViolation`].
        const COMMUNICATION_CONSTRAINTS_VIOLATION = Fault::CommunicationConstraintsViolation.mask();
        /// See [`Fault::PowerLimitViolation`].
        const POWER_LIMIT_VIOLATION = Fault::PowerLimitViolation.mask();
        /// See [`Fault::CartesianMotionGeneratorJointPositionLimitsViolation`].
        const CARTESIAN_MOTION_GENERATOR_JOINT_POSITION_LIMITS_VIOLATION = Fault::CartesianMotionGeneratorJointPositionLimitsViolation.mask();
        /// See [`Fault::CartesianMotionGeneratorJointVelocityLimitsViolation`].
        const CARTESIAN_MOTION_GENERATOR_JOINT_VELOCITY_LIMITS_VIOLATION = Fault::CartesianMotionGeneratorJointVelocityLimitsViolation.mask();
        /// See [`Fault::CartesianMotionGeneratorJointVelocityDiscontinuity`].
        const CARTESIAN_MOTION_GENERATOR_JOINT_VELOCITY_DISCONTINUITY = Fault::CartesianMotionGeneratorJointVelocityDiscontinuity.mask();
        /// See [`Fault::CartesianMotionGeneratorJointAccelerationDiscontinuity`].
        const CARTESIAN_MOTION_GENERATOR_JOINT_ACCELERATION_DISCONTINUITY = Fault::CartesianMotionGeneratorJointAccelerationDiscontinuity.mask();
        /// See [`Fault::CartesianPositionMotionGeneratorInvalidFrame`].
        const CARTESIAN_POSITION_MOTION_GENERATOR_INVALID_FRAME = Fault::CartesianPositionMotionGeneratorInvalidFrame.mask();
        /// See [`Fault::ControllerTorqueDiscontinuity`].
        const CONTROLLER_TORQUE_DISCONTINUITY = Fault::ControllerTorqueDiscontinuity.mask();
    }
}

impl Faults {
    /// Decode a raw fault word. Every bit is defined.
    pub const fn from_word(word: u32) -> Self {
        Self::from_bits_retain(word)
    }

    /// Is `fault` set?
    pub const fn has(self, fault: Fault) -> bool {
        self.bits() & fault.mask() != 0
    }

    /// The set faults, in bit order.
    pub fn iter_faults(self) -> impl Iterator<Item = Fault> {
        Fault::ALL.into_iter().filter(move |fault| self.has(*fault))
    }
}

impl From<Fault> for Faults {
    fn from(fault: Fault) -> Self {
        Self::from_word(fault.mask())
    }
}

impl FromIterator<Fault> for Faults {
    fn from_iter<I: IntoIterator<Item = Fault>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Faults::empty(), |faults, fault| faults | Faults::from(fault))
    }
}

impl Wire for Faults {
    const SIZE: usize = u32::SIZE;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        self.bits().encode(encoder)
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        Ok(Self::from_word(u32::decode(decoder)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_bit() {
        assert_eq!(Fault::ALL.len(), 32);
        let mut seen = 0u32;
        for (i, fault) in Fault::ALL.iter().enumerate() {
            assert_eq!(fault.bit() as usize, i);
            assert_eq!(seen & fault.mask(), 0, "{fault} shares a bit");
            seen |= fault.mask();
        }
        assert_eq!(seen, u32::MAX);
        assert_eq!(Faults::all().bits(), u32::MAX);
    }

    #[test]
    fn test_names_are_distinct() {
        for (i, a) in Fault::ALL.iter().enumerate() {
            for b in &Fault::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_known_positions() {
        assert_eq!(Fault::JointPositionLimitsViolation.bit(), 0);
        assert_eq!(Fault::JointReflex.bit(), 6);
        assert_eq!(Fault::CommunicationConstraintsViolation.bit(), 24);
        assert_eq!(Fault::ControllerTorqueDiscontinuity.bit(), 31);
        assert_eq!(Fault::from_bit(31), Some(Fault::ControllerTorqueDiscontinuity));
        assert_eq!(Fault::from_bit(32), None);
    }

    #[test]
    fn test_positions_below_elbow_sign_gap() {
        assert_eq!(Fault::CartesianMotionGeneratorElbowSignInconsistent.bit(), 21);
        assert_eq!(Fault::ForceControllerDesiredForceToleranceViolation.bit(), 23);
        assert_eq!(
            Fault::ALL[24..]
                .iter()
                .map(|fault| fault.name())
                .collect::<Vec<_>>(),
            [
                "CommunicationConstraintsViolation",
                "PowerLimitViolation",
                "CartesianMotionGeneratorJointPositionLimitsViolation",
                "CartesianMotionGeneratorJointVelocityLimitsViolation",
                "CartesianMotionGeneratorJointVelocityDiscontinuity",
                "CartesianMotionGeneratorJointAccelerationDiscontinuity",
                "CartesianPositionMotionGeneratorInvalidFrame",
                "ControllerTorqueDiscontinuity",
            ]
        );
    }

    #[test]
    fn test_word_decoding() {
        let word = Fault::JointReflex.mask() | Fault::PowerLimitViolation.mask();
        let faults = Faults::from_word(word);
        assert!(faults.has(Fault::JointReflex));
        assert!(faults.contains(Faults::POWER_LIMIT_VIOLATION));
        assert!(!faults.has(Fault::CartesianReflex));

        let set: Vec<Fault> = faults.iter_faults().collect();
        assert_eq!(set, vec![Fault::JointReflex, Fault::PowerLimitViolation]);
        assert_eq!(set.into_iter().collect::<Faults>(), faults);
    }

    #[test]
    fn test_wire_roundtrip() {
        let faults = Faults::from(Fault::ControllerTorqueDiscontinuity);
        let mut buf = [0u8; 4];
        faults.encode_to_slice(&mut buf).unwrap();
        assert_eq!(buf, [0, 0, 0, 0x80]);
        assert_eq!(Faults::decode_from_slice(&buf), Ok(faults));
    }
}
