//! Command protocol used to configure and supervise a robotic arm's control modes.
//!
//! Every command is bound to a stable [`Function`] identifier and owns a request payload, a
//! response payload and its own [`Status`] set. The [`faults`] module decodes the arm's 32-bit
//! safety-violation word, which travels outside the command exchange.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`status`] | The contract every status enum satisfies, checked at build time |
//! | [`function`] | The append-only command catalog |
//! | [`envelope`] | Request/response bases stamping the owning command's identifier |
//! | [`wire`] | Little-endian, padding-free codec |
//! | [`commands`] | One module per command |
//! | [`dispatch`] | Decoding any message by its function tag |
//! | [`channel`] | Handshake-gated request/response channel over a byte stream (`std`) |
//! | [`faults`] | Safety-violation catalog and bitmask |
#![cfg_attr(not(feature = "std"), no_std)]

// Lets the derive macros name `::armlink` paths from inside this crate too.
extern crate self as armlink;

pub mod cfg;
#[cfg(feature = "std")]
pub mod channel;
pub mod commands;
pub mod dispatch;
pub mod envelope;
pub mod faults;
pub mod function;
pub(crate) mod macros;
pub mod status;
pub mod wire;

pub use envelope::{Command, Reply, RequestBase, ResponseBase};
pub use faults::{Fault, Faults};
pub use function::Function;
pub use status::Status;
pub use wire::{Wire, WireError};

/// Protocol revision exchanged during the handshake.
pub type Version = u16;

/// Protocol revision implemented by this crate.
/// Bump this whenever any payload shape changes.
pub const VERSION: Version = 1;

/// Well-known port of the command channel.
pub const COMMAND_PORT: u16 = 1337;

/// A homogeneous 4x4 transform, stored column-major.
pub type Transform = [f64; 16];

#[allow(unused)]
pub(crate) mod test_log {
    #[cfg(all(test, unix))]
    mod log_internal {

        use ctor::ctor;

        #[ctor]
        static INIT: () = {
            env_logger::builder().is_test(true).init();
        };
    }
}
