/// Declares a process-wide atomic switch with a getter and a setter.
macro_rules! cfg_value {
    ($name: ident, $at_type: ty, $inner: ty, $default: expr, set: $set_vis: vis $set_prefix: ident, get: $get_vis: vis $get_prefix: ident) => {
        cfg_value!(
            $name,
            $at_type,
            $inner,
            $default,
            ::core::sync::atomic::Ordering::Relaxed,
            ::core::sync::atomic::Ordering::Relaxed,
            $get_vis $get_prefix,
            $set_vis $set_prefix
        );
    };

    ($name: ident, $at_type: ty, $inner: ty, $default: expr, $store_type: path, $load_type: path, $get_vis: vis $get_prefix: ident, $set_vis: vis $set_prefix: ident) => {
        static $name: $at_type = <$at_type>::new($default);

        pastey::paste! {
            #[doc = concat!("Sets the `", stringify!($name), "` switch.")]
            $set_vis fn [<$set_prefix _ $name:lower>](value: $inner) {
                $name.store(value, $store_type);
            }
            #[doc = concat!("Reads the `", stringify!($name), "` switch.")]
            $get_vis fn [<$get_prefix _ $name:lower>]() -> $inner {
                $name.load($load_type)
            }
        }
    };
}

/// Declares the single-variant status set that commands without domain outcomes own.
///
/// Each invocation produces a distinct enum, so no two commands share a status type.
macro_rules! default_status {
    () => {
        /// Outcome of the command. Only success is defined.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, armlink_derive::Status)]
        #[repr(u32)]
        pub enum Status {
            /// The arm accepted the command.
            Success,
        }
    };
}

/// Declares a command that carries no payload in either direction.
macro_rules! bare_command {
    ($(#[$meta: meta])* $name: ident) => {
        pastey::paste! {
            $(#[$meta])*
            pub mod [<$name:snake>] {
                use crate::{
                    envelope::{Command, RequestBase, ResponseBase},
                    function::Function,
                };

                #[doc = concat!("Marker type of the `", stringify!($name), "` command.")]
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub struct $name;

                impl Command for $name {
                    const FUNCTION: Function = Function::$name;
                    type Status = Status;
                    type Request = Request;
                    type Response = Response;
                }

                crate::macros::default_status!();

                /// The request is the bare envelope.
                pub type Request = RequestBase<$name>;
                /// The response is the bare envelope with its status.
                pub type Response = ResponseBase<$name>;
            }
        }
    };
}

/// Implements `Wire` for a fieldless `#[repr(u32)]` payload enumeration.
macro_rules! wire_enum {
    ($name: ident, $kind: literal, [$($variant: ident),+ $(,)?]) => {
        impl crate::wire::Wire for $name {
            const SIZE: usize = <u32 as crate::wire::Wire>::SIZE;

            fn encode(
                &self,
                encoder: &mut crate::wire::Encoder<'_>,
            ) -> Result<(), crate::wire::WireError> {
                crate::wire::Wire::encode(&(*self as u32), encoder)
            }

            fn decode(
                decoder: &mut crate::wire::Decoder<'_>,
            ) -> Result<Self, crate::wire::WireError> {
                let raw = <u32 as crate::wire::Wire>::decode(decoder)?;
                $(
                    if raw == $name::$variant as u32 {
                        return Ok($name::$variant);
                    }
                )+
                Err(crate::wire::WireError::InvalidDiscriminant {
                    kind: $kind,
                    value: raw,
                })
            }
        }
    };
}

pub(crate) use bare_command;
pub(crate) use cfg_value;
pub(crate) use default_status;
pub(crate) use wire_enum;
