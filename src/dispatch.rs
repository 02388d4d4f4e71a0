//! Decoding any message of the catalog.
//!
//! The function tag leads every message, so one channel can carry every command without a
//! separate header: read the tag, then decode the matching payload.
use crate::{
    commands,
    envelope::Command,
    function::Function,
    wire::{Decoder, Wire, WireError},
};

/// Read the function tag at the start of `bytes` without consuming anything.
pub fn peek_function(bytes: &[u8]) -> Result<Function, WireError> {
    Function::decode(&mut Decoder::new(bytes))
}

macro_rules! any_message {
    ($(#[$meta: meta])* $name: ident, $assoc: ident, [$($command: ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $(
                #[doc = concat!("A `", stringify!($command), "` message.")]
                $command(<commands::$command as Command>::$assoc),
            )+
        }

        impl $name {
            /// Size of the largest message of this kind.
            pub const MAX_SIZE: usize = {
                let mut max = 0;
                $(
                    let size = <<commands::$command as Command>::$assoc as Wire>::SIZE;
                    if size > max {
                        max = size;
                    }
                )+
                max
            };

            /// Encoded size of the message belonging to `function`.
            pub const fn size_of(function: Function) -> usize {
                match function {
                    $(
                        Function::$command => <<commands::$command as Command>::$assoc as Wire>::SIZE,
                    )+
                }
            }

            /// The command this message belongs to.
            pub fn function(&self) -> Function {
                match self {
                    $(
                        $name::$command(_) => Function::$command,
                    )+
                }
            }

            /// Decode a message spanning all of `bytes`, choosing the command from its tag.
            pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
                match peek_function(bytes)? {
                    $(
                        Function::$command => Ok($name::$command(
                            <<commands::$command as Command>::$assoc as Wire>::decode_from_slice(bytes)?,
                        )),
                    )+
                }
            }

            /// Encode into the start of `buf`, returning the number of bytes written.
            pub fn encode_to_slice(&self, buf: &mut [u8]) -> Result<usize, WireError> {
                match self {
                    $(
                        $name::$command(message) => message.encode_to_slice(buf),
                    )+
                }
            }

            /// Encode into a freshly allocated buffer.
            #[cfg(feature = "std")]
            pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
                match self {
                    $(
                        $name::$command(message) => message.to_bytes(),
                    )+
                }
            }
        }

        $(
            impl From<<commands::$command as Command>::$assoc> for $name {
                fn from(message: <commands::$command as Command>::$assoc) -> Self {
                    $name::$command(message)
                }
            }
        )+
    };
}

any_message!(
    /// A request of any command.
    AnyRequest,
    Request,
    [
        Connect,
        StartMotionGenerator,
        StopMotionGenerator,
        StartController,
        StopController,
        GetCartesianLimit,
        SetControllerMode,
        SetCollisionBehavior,
        SetJointImpedance,
        SetCartesianImpedance,
        SetGuidingMode,
        SetEEToK,
        SetFToEE,
        SetLoad,
        SetTimeScalingFactor,
        AutomaticErrorRecovery,
        ResetExternalTorqueAndForceMax,
    ]
);

any_message!(
    /// A response of any command.
    AnyResponse,
    Response,
    [
        Connect,
        StartMotionGenerator,
        StopMotionGenerator,
        StartController,
        StopController,
        GetCartesianLimit,
        SetControllerMode,
        SetCollisionBehavior,
        SetJointImpedance,
        SetCartesianImpedance,
        SetGuidingMode,
        SetEEToK,
        SetFToEE,
        SetLoad,
        SetTimeScalingFactor,
        AutomaticErrorRecovery,
        ResetExternalTorqueAndForceMax,
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{
        connect, get_cartesian_limit, set_collision_behavior, set_controller_mode, set_ee_to_k,
        set_f_to_ee, set_guiding_mode, set_joint_impedance, set_cartesian_impedance, set_load,
        set_time_scaling_factor, start_motion_generator,
    };

    fn every_request() -> Vec<AnyRequest> {
        vec![
            connect::Request::new(4000).into(),
            start_motion_generator::Request::new(
                start_motion_generator::MotionGeneratorMode::JointVelocity,
            )
            .into(),
            commands::stop_motion_generator::Request::new().into(),
            commands::start_controller::Request::new().into(),
            commands::stop_controller::Request::new().into(),
            get_cartesian_limit::Request::new().into(),
            set_controller_mode::Request::new(set_controller_mode::ControllerMode::MotorPD).into(),
            set_collision_behavior::Request::new([1.0; 14], [2.0; 14], [3.0; 12], [4.0; 12])
                .into(),
            set_joint_impedance::Request::new([1000.0; 7]).into(),
            set_cartesian_impedance::Request::new([200.0; 6]).into(),
            set_guiding_mode::Request::new([false, true, false, true, false, true], false).into(),
            set_ee_to_k::Request::new([0.5; 16]).into(),
            set_f_to_ee::Request::new([0.25; 16]).into(),
            set_load::Request::new(1.5, [0.0, 0.0, 0.1], [0.01; 9]).into(),
            set_time_scaling_factor::Request::new(0.8).into(),
            commands::automatic_error_recovery::Request::new().into(),
            commands::reset_external_torque_and_force_max::Request::new().into(),
        ]
    }

    #[test]
    fn test_every_request_decodes_to_its_command() {
        let requests = every_request();
        assert_eq!(requests.len(), Function::ALL.len());

        for (request, function) in requests.iter().zip(Function::ALL) {
            assert_eq!(request.function(), function);

            let bytes = request.to_bytes().unwrap();
            assert_eq!(bytes.len(), AnyRequest::size_of(function));
            assert!(bytes.len() <= AnyRequest::MAX_SIZE);
            assert_eq!(peek_function(&bytes), Ok(function));
            assert_eq!(&AnyRequest::decode(&bytes).unwrap(), request);
        }
    }

    #[test]
    fn test_response_decodes_by_tag() {
        let response: AnyResponse = get_cartesian_limit::Response::with_limit(
            get_cartesian_limit::Status::Success,
            [0.0; 3],
            [1.0; 3],
            [0.0; 16],
            true,
        )
        .into();
        let bytes = response.to_bytes().unwrap();
        assert_eq!(AnyResponse::decode(&bytes).unwrap(), response);
        assert_eq!(AnyResponse::MAX_SIZE, AnyResponse::size_of(Function::GetCartesianLimit));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            AnyRequest::decode(&42u32.to_le_bytes()),
            Err(WireError::UnknownFunction(42))
        );
        assert_eq!(
            peek_function(&[1, 0]),
            Err(WireError::BufferTooSmall {
                needed: 4,
                available: 2
            })
        );
    }
}
