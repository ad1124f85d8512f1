//! Validating marshaller for a line-oriented debugger control protocol.
//!
//! Every message is one line, `<requestID> <token> [payload]`. The
//! [`Marshaller`] turns typed commands and responses into such lines and
//! validates inbound lines before turning them back into typed values.
//!
//! ```
//! use debug_marshal::{Breakpoint, Marshaller, RequestArguments};
//!
//! let mut marshaller = Marshaller::new();
//! let line = marshaller.marshall_set_breakpoints_request(9, &[Breakpoint::new("x.js", 1, 2)]);
//! assert_eq!(line, r#"9 breakpoint-add-command [{"filePath":"x.js","line":1,"column":2}]"#);
//!
//! let request = marshaller.unmarshall_request(&line).unwrap();
//! assert!(matches!(request.arguments, RequestArguments::Breakpoint { .. }));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod protocol;

pub use error::{MarshalError, Result};
pub use protocol::{
    Breakpoint, DebuggerRequest, DebuggerResponse, Marshaller, RequestArguments, RequestId,
    RequestToken, ResponseResult, ResponseToken, Scope, Stackframe, Variable,
};
