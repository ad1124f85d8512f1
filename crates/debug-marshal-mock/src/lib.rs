//! A scripted stand-in for the execution engine.
//!
//! [`MockEngine`] answers command lines with the response lines a
//! well-behaved engine would send, so clients of the protocol can be tested
//! without a real debuggee:
//!
//! ```
//! use debug_marshal::Breakpoint;
//! use debug_marshal_mock::MockEngine;
//!
//! let mut engine = MockEngine::new().with_stop(Breakpoint::new("/app.js", 3, 1));
//! assert_eq!(engine.greeting(), "0 ready-response");
//! engine
//!     .handle(r#"1 breakpoint-add-command [{"filePath":"/app.js","line":3,"column":1}]"#)
//!     .unwrap();
//! assert_eq!(
//!     engine.handle("2 run-command").unwrap(),
//!     vec!["2 breakpoint-stopped-response /app.js 3 1".to_string()]
//! );
//! assert_eq!(engine.handle("3 run-command").unwrap(), vec!["3 prepack-finish-response".to_string()]);
//! ```

use debug_marshal::{
    Breakpoint, MarshalError, Marshaller, RequestArguments, Scope, Stackframe, Variable,
};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    #[error("execution already finished")]
    Finished,
}

/// Engine peer driven by a script of stop locations.
#[derive(Debug, Default)]
pub struct MockEngine {
    marshaller: Marshaller,
    planned_stops: VecDeque<Breakpoint>,
    breakpoints: Vec<Breakpoint>,
    stackframes: Vec<Stackframe>,
    scopes: HashMap<i64, Vec<Scope>>,
    variables: HashMap<i64, Vec<Variable>>,
    finished: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location execution passes through, in order. The engine only
    /// pauses there when a breakpoint was added for it.
    pub fn with_stop(mut self, location: Breakpoint) -> Self {
        self.planned_stops.push_back(location);
        self
    }

    pub fn with_stackframes(mut self, stackframes: Vec<Stackframe>) -> Self {
        self.stackframes = stackframes;
        self
    }

    pub fn with_scopes(mut self, frame_id: i64, scopes: Vec<Scope>) -> Self {
        self.scopes.insert(frame_id, scopes);
        self
    }

    pub fn with_variables(mut self, variables_reference: i64, variables: Vec<Variable>) -> Self {
        self.variables.insert(variables_reference, variables);
        self
    }

    /// The line sent once the engine is up.
    pub fn greeting(&self) -> String {
        self.marshaller.marshall_ready_response(0)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Handle one command line and return the lines sent back.
    pub fn handle(&mut self, line: &str) -> Result<Vec<String>, EngineError> {
        let request = self.marshaller.unmarshall_request(line)?;
        let id = request.id;
        debug!(id, command = %request.command(), "mock engine handling request");

        let reply = match request.arguments {
            RequestArguments::Run => {
                if self.finished {
                    return Err(EngineError::Finished);
                }
                self.resume()
            }
            RequestArguments::Breakpoint { breakpoints } => {
                let reply = self
                    .marshaller
                    .marshall_breakpoints_acknowledge(id, &breakpoints);
                self.breakpoints.extend(breakpoints);
                reply
            }
            RequestArguments::Stackframe => self
                .marshaller
                .marshall_stackframes_response(id, &self.stackframes),
            RequestArguments::Scopes { frame_id } => {
                let scopes = self.scopes.get(&frame_id).map(Vec::as_slice).unwrap_or(&[]);
                self.marshaller.marshall_scopes_response(id, scopes)
            }
            RequestArguments::Variables {
                variables_reference,
            } => {
                let variables = self
                    .variables
                    .get(&variables_reference)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                self.marshaller.marshall_variables_response(id, variables)
            }
        };
        Ok(vec![reply])
    }

    fn resume(&mut self) -> String {
        while let Some(location) = self.planned_stops.pop_front() {
            if self.breakpoints.contains(&location) {
                return self.marshaller.marshall_breakpoint_stopped(&location);
            }
        }
        self.finished = true;
        self.marshaller.marshall_finish()
    }
}
