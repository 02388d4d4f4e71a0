//! Request and response envelopes.
//!
//! Every message starts with the function identifier of its owning command. The identifier is
//! read from [`Command::FUNCTION`] when the envelope is built, never supplied by the caller, so
//! a message cannot claim the wrong command.
use core::{fmt::Debug, marker::PhantomData};

use crate::{
    function::Function,
    status::Status,
    wire::{Decoder, Encoder, Wire, WireError},
};

/// A command definition: its identifier, status set and payload shapes.
pub trait Command: Copy + Eq + Debug + 'static {
    /// The catalog entry of this command.
    const FUNCTION: Function;
    /// The status set owned by this command.
    type Status: Status;
    /// The request message.
    type Request: Wire;
    /// The response message.
    type Response: Reply<Status = Self::Status>;
}

/// A response message, exposing its envelope.
pub trait Reply: Wire {
    /// The status set of the owning command.
    type Status: Status;

    /// The function identifier stamped on the message.
    fn function(&self) -> Function;

    /// The outcome reported by the arm.
    fn status(&self) -> Self::Status;
}

/// The envelope of a request. Carries nothing but the function identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestBase<C: Command> {
    function: Function,
    _command: PhantomData<C>,
}

impl<C: Command> RequestBase<C> {
    /// Create an envelope stamped with `C::FUNCTION`.
    pub fn new() -> Self {
        Self {
            function: C::FUNCTION,
            _command: PhantomData,
        }
    }

    /// The stamped function identifier.
    pub fn function(&self) -> Function {
        self.function
    }
}

impl<C: Command> Default for RequestBase<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> Wire for RequestBase<C> {
    const SIZE: usize = Function::SIZE;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        self.function.encode(encoder)
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        expect_function::<C>(decoder)?;
        Ok(Self::new())
    }
}

/// The envelope of a response: the function identifier and the command's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseBase<C: Command> {
    function: Function,
    status: C::Status,
    _command: PhantomData<C>,
}

impl<C: Command> ResponseBase<C> {
    /// Create an envelope stamped with `C::FUNCTION` carrying `status`.
    pub fn new(status: C::Status) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = <C::Status as Status>::CONTRACT;
        Self {
            function: C::FUNCTION,
            status,
            _command: PhantomData,
        }
    }

    /// The stamped function identifier.
    pub fn function(&self) -> Function {
        self.function
    }

    /// The status carried by the envelope.
    pub fn status(&self) -> C::Status {
        self.status
    }
}

impl<C: Command> Wire for ResponseBase<C> {
    const SIZE: usize = Function::SIZE + u32::SIZE;

    fn encode(&self, encoder: &mut Encoder<'_>) -> Result<(), WireError> {
        self.function.encode(encoder)?;
        self.status.as_raw().encode(encoder)
    }

    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, WireError> {
        expect_function::<C>(decoder)?;
        let raw = u32::decode(decoder)?;
        let status = C::Status::from_raw(raw).ok_or(WireError::UnknownStatus {
            function: C::FUNCTION,
            value: raw,
        })?;
        Ok(Self::new(status))
    }
}

impl<C: Command> Reply for ResponseBase<C> {
    type Status = C::Status;

    fn function(&self) -> Function {
        self.function
    }

    fn status(&self) -> C::Status {
        self.status
    }
}

fn expect_function<C: Command>(decoder: &mut Decoder<'_>) -> Result<(), WireError> {
    let actual = Function::decode(decoder)?;
    if actual != C::FUNCTION {
        return Err(WireError::FunctionMismatch {
            expected: C::FUNCTION,
            actual,
        });
    }
    Ok(())
}
