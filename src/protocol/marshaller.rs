//! Encoding and validating decoding of wire lines.

use super::payload::{json_sequence, parse_integer, split_envelope, Direction, PayloadParser};
use super::token::{RequestToken, ResponseToken};
use super::types::{
    Breakpoint, DebuggerRequest, DebuggerResponse, RequestArguments, RequestId, ResponseResult,
    Scope, Stackframe, Variable,
};
use crate::Result;
use serde::Serialize;
use tracing::{debug, error, trace, warn};

/// Converts debugger messages to and from wire lines.
///
/// One instance belongs to one debugging session. Besides the pure encoders
/// it keeps the id of the most recent run request, which is stamped onto the
/// `breakpoint-stopped` and `finish` notifications the engine emits on its own.
/// No locking is done internally; a session that reads and writes from
/// different threads must guard the instance itself.
#[derive(Debug, Clone, Default)]
pub struct Marshaller {
    last_run_request_id: RequestId,
}

impl Marshaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the last decoded run request, 0 before any.
    pub fn last_run_request_id(&self) -> RequestId {
        self.last_run_request_id
    }

    // ── requests ────────────────────────────────────────────────────────────

    pub fn marshall_continue_request(&self, id: RequestId) -> String {
        self.encode_request(&DebuggerRequest::new(id, RequestArguments::Run))
    }

    pub fn marshall_set_breakpoints_request(&self, id: RequestId, breakpoints: &[Breakpoint]) -> String {
        wire_line(id, RequestToken::BreakpointAdd.as_str(), Some(to_json(breakpoints)))
    }

    pub fn marshall_stackframes_request(&self, id: RequestId) -> String {
        self.encode_request(&DebuggerRequest::new(id, RequestArguments::Stackframe))
    }

    pub fn marshall_scopes_request(&self, id: RequestId, frame_id: i64) -> String {
        self.encode_request(&DebuggerRequest::new(id, RequestArguments::Scopes { frame_id }))
    }

    pub fn marshall_variables_request(&self, id: RequestId, variables_reference: i64) -> String {
        self.encode_request(&DebuggerRequest::new(
            id,
            RequestArguments::Variables {
                variables_reference,
            },
        ))
    }

    /// Encode any request in canonical form.
    pub fn encode_request(&self, request: &DebuggerRequest) -> String {
        let token = request.command().as_str();
        debug!(id = request.id, token, "encoding request");
        let payload = match &request.arguments {
            RequestArguments::Run | RequestArguments::Stackframe => None,
            RequestArguments::Breakpoint { breakpoints } => Some(to_json(breakpoints)),
            RequestArguments::Scopes { frame_id } => Some(frame_id.to_string()),
            RequestArguments::Variables {
                variables_reference,
            } => Some(variables_reference.to_string()),
        };
        wire_line(request.id, token, payload)
    }

    // ── responses ───────────────────────────────────────────────────────────

    pub fn marshall_ready_response(&self, id: RequestId) -> String {
        self.encode_response(&DebuggerResponse::new(id, ResponseResult::Ready))
    }

    pub fn marshall_debugger_attached(&self, id: RequestId) -> String {
        self.encode_response(&DebuggerResponse::new(id, ResponseResult::Attached))
    }

    pub fn marshall_breakpoints_acknowledge(&self, id: RequestId, breakpoints: &[Breakpoint]) -> String {
        wire_line(id, ResponseToken::BreakpointAdd.as_str(), Some(to_json(breakpoints)))
    }

    /// Notification that execution paused at `breakpoint`, stamped with the
    /// last run request id.
    pub fn marshall_breakpoint_stopped(&self, breakpoint: &Breakpoint) -> String {
        self.encode_response(&DebuggerResponse::new(
            self.last_run_request_id,
            ResponseResult::stopped_at(breakpoint.clone()),
        ))
    }

    /// Notification that the engine finished, stamped with the last run
    /// request id.
    pub fn marshall_finish(&self) -> String {
        self.encode_response(&DebuggerResponse::new(
            self.last_run_request_id,
            ResponseResult::Finish,
        ))
    }

    pub fn marshall_stackframes_response(&self, id: RequestId, stackframes: &[Stackframe]) -> String {
        wire_line(id, ResponseToken::Stackframes.as_str(), Some(to_json(stackframes)))
    }

    pub fn marshall_scopes_response(&self, id: RequestId, scopes: &[Scope]) -> String {
        wire_line(id, ResponseToken::Scopes.as_str(), Some(to_json(scopes)))
    }

    pub fn marshall_variables_response(&self, id: RequestId, variables: &[Variable]) -> String {
        wire_line(id, ResponseToken::Variables.as_str(), Some(to_json(variables)))
    }

    /// Encode any response in canonical form, using its own id.
    pub fn encode_response(&self, response: &DebuggerResponse) -> String {
        let token = response.token();
        debug!(
            id = response.id,
            %token,
            notification = token.is_notification(),
            "encoding response"
        );
        let token = token.as_str();
        let payload = match &response.result {
            ResponseResult::Ready | ResponseResult::Finish | ResponseResult::Attached => None,
            ResponseResult::BreakpointAdd { breakpoints } => Some(to_json(breakpoints)),
            ResponseResult::BreakpointStopped {
                file_path,
                line,
                column,
            } => {
                if file_path.is_empty() || file_path.contains(char::is_whitespace) {
                    warn!(
                        file_path = %file_path,
                        "breakpoint-stopped path is not a single token and will not decode"
                    );
                }
                Some(format!("{} {} {}", file_path, line, column))
            }
            ResponseResult::Stackframe { stackframes } => Some(to_json(stackframes)),
            ResponseResult::Scopes { scopes } => Some(to_json(scopes)),
            ResponseResult::Variables { variables } => Some(to_json(variables)),
        };
        wire_line(response.id, token, payload)
    }

    // ── decoding ────────────────────────────────────────────────────────────

    /// Decode and validate a command line.
    ///
    /// A run command records its id as the correlation id for later
    /// notifications.
    pub fn unmarshall_request(&mut self, line: &str) -> Result<DebuggerRequest> {
        trace!(line, "decoding request");
        let direction = Direction::Request;
        let envelope = split_envelope(line, direction)?;
        let token = RequestToken::from_wire(envelope.token).ok_or_else(|| {
            direction.error(format!("unrecognized command: {:?}", envelope.token))
        })?;
        let arguments = request_parser(token).parse(envelope.rest, direction)?;

        if token == RequestToken::Run {
            self.last_run_request_id = envelope.id;
        }
        debug!(id = envelope.id, %token, "decoded request");
        Ok(DebuggerRequest::new(envelope.id, arguments))
    }

    /// Decode and validate a response or notification line.
    pub fn unmarshall_response(&self, line: &str) -> Result<DebuggerResponse> {
        trace!(line, "decoding response");
        let direction = Direction::Response;
        let envelope = split_envelope(line, direction)?;
        let Some(token) = ResponseToken::from_wire(envelope.token) else {
            // The engine only sends tokens from the fixed set, so this is a
            // broken peer rather than noisy input.
            error!(token = envelope.token, "unexpected response type from engine");
            return Err(direction.error(format!(
                "unexpected response type: {:?}",
                envelope.token
            )));
        };
        let result = response_parser(token).parse(envelope.rest, direction)?;
        debug!(id = envelope.id, %token, "decoded response");
        Ok(DebuggerResponse::new(envelope.id, result))
    }
}

fn request_parser(token: RequestToken) -> PayloadParser<RequestArguments> {
    const DIR: Direction = Direction::Request;
    match token {
        RequestToken::Run => PayloadParser::Empty(|| RequestArguments::Run),
        RequestToken::Stackframes => PayloadParser::Empty(|| RequestArguments::Stackframe),
        RequestToken::BreakpointAdd => PayloadParser::Json(|text| {
            Ok(RequestArguments::Breakpoint {
                breakpoints: json_sequence(text, DIR)?,
            })
        }),
        RequestToken::Scopes => PayloadParser::Scalar(|frame_id| {
            Ok(RequestArguments::Scopes {
                frame_id: parse_integer(frame_id, "frameId", DIR)?,
            })
        }),
        RequestToken::Variables => PayloadParser::Scalar(|reference| {
            Ok(RequestArguments::Variables {
                variables_reference: parse_integer(reference, "variablesReference", DIR)?,
            })
        }),
    }
}

fn response_parser(token: ResponseToken) -> PayloadParser<ResponseResult> {
    const DIR: Direction = Direction::Response;
    match token {
        ResponseToken::Ready => PayloadParser::Empty(|| ResponseResult::Ready),
        ResponseToken::Finish => PayloadParser::Empty(|| ResponseResult::Finish),
        ResponseToken::Attached => PayloadParser::Empty(|| ResponseResult::Attached),
        ResponseToken::BreakpointAdd => PayloadParser::Json(|text| {
            Ok(ResponseResult::BreakpointAdd {
                breakpoints: json_sequence(text, DIR)?,
            })
        }),
        ResponseToken::BreakpointStopped => PayloadParser::Triple(|[file_path, line, column]| {
            Ok(ResponseResult::BreakpointStopped {
                file_path: file_path.to_string(),
                line: parse_integer(line, "line", DIR)?,
                column: parse_integer(column, "column", DIR)?,
            })
        }),
        ResponseToken::Stackframes => PayloadParser::Json(|text| {
            Ok(ResponseResult::Stackframe {
                stackframes: json_sequence(text, DIR)?,
            })
        }),
        ResponseToken::Scopes => PayloadParser::Json(|text| {
            Ok(ResponseResult::Scopes {
                scopes: json_sequence(text, DIR)?,
            })
        }),
        ResponseToken::Variables => PayloadParser::Json(|text| {
            Ok(ResponseResult::Variables {
                variables: json_sequence(text, DIR)?,
            })
        }),
    }
}

fn wire_line(id: RequestId, token: &str, payload: Option<String>) -> String {
    match payload {
        Some(payload) => format!("{} {} {}", id, token, payload),
        None => format!("{} {}", id, token),
    }
}

fn to_json<T: Serialize>(items: &[T]) -> String {
    // Message items are plain structs with string keys; serialization cannot fail.
    serde_json::to_string(items).expect("message items serialize to JSON")
}
