//! Debugger control protocol.
//!
//! Sub-modules:
//! - [`token`]      — Message-type tags for each direction.
//! - [`types`]      — Typed requests, responses and their items.
//! - [`payload`]    — Line splitting and payload parsers.
//! - [`marshaller`] — Encoders, validating decoders and run correlation.

pub mod marshaller;
mod payload;
pub mod token;
pub mod types;

pub use marshaller::Marshaller;
pub use token::{RequestToken, ResponseToken};
pub use types::{
    Breakpoint, DebuggerRequest, DebuggerResponse, RequestArguments, RequestId, ResponseResult,
    Scope, Stackframe, Variable,
};
