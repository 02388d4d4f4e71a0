//! The contract every command status set satisfies.
//!
//! A status is a 32-bit enumeration whose zero value is `Success`, so a generic dispatcher can
//! treat `0 == success` uniformly. Implement it with `#[derive(Status)]`, which rejects anything
//! else at build time. [`Status::CONTRACT`] repeats the width and zero checks generically and is
//! evaluated whenever a response is built for the type.
use core::fmt::Debug;

pub use armlink_derive::Status;

#[doc(hidden)]
pub mod __private {
    /// Implemented by `#[derive(Status)]` and nothing else.
    pub trait Sealed {}
}

/// A per-command outcome code.
///
/// Only `#[derive(Status)]` can implement this trait:
///
/// ```
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// #[repr(u32)]
/// enum Outcome {
///     Success,
///     Busy,
/// }
///
/// assert_eq!(Outcome::SUCCESS_RAW, 0);
/// assert_eq!(Outcome::from_raw(1), Some(Outcome::Busy));
/// ```
///
/// A hand-written implementation does not build:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct NotAnEnum(u32);
///
/// impl Status for NotAnEnum {
///     const SUCCESS: Self = NotAnEnum(7);
///     const SUCCESS_RAW: u32 = 0;
///
///     fn as_raw(self) -> u32 {
///         self.0
///     }
///
///     fn from_raw(raw: u32) -> Option<Self> {
///         Some(NotAnEnum(raw))
///     }
/// }
/// ```
///
/// The enum must be `#[repr(u32)]`:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// enum Outcome {
///     Success,
///     Busy,
/// }
/// ```
///
/// `Success` must come first:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// #[repr(u32)]
/// enum Outcome {
///     Busy,
///     Success,
/// }
/// ```
///
/// `Success` must be 0:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// #[repr(u32)]
/// enum Outcome {
///     Success = 1,
///     Busy,
/// }
/// ```
///
/// Variants cannot carry data:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// #[repr(u32)]
/// enum Outcome {
///     Success,
///     Busy(u8),
/// }
/// ```
///
/// Structs are rejected:
///
/// ```compile_fail
/// use armlink::status::Status;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Status)]
/// #[repr(transparent)]
/// struct Outcome(u32);
/// ```
pub trait Status: __private::Sealed + Copy + Eq + Debug + 'static {
    /// The unconditional success variant.
    const SUCCESS: Self;
    /// Raw value of [`Status::SUCCESS`], computed from it by the derive. Always 0.
    const SUCCESS_RAW: u32;

    /// Fails the build if the implementing type breaks the status contract.
    #[doc(hidden)]
    const CONTRACT: () = {
        assert!(
            core::mem::size_of::<Self>() == 4,
            "status codes must be 32 bits wide"
        );
        assert!(Self::SUCCESS_RAW == 0, "status success must have the value 0");
    };

    /// The wire value of this status.
    fn as_raw(self) -> u32;

    /// Looks up the status with the given wire value.
    fn from_raw(raw: u32) -> Option<Self>;

    /// Is this the success variant?
    fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}
