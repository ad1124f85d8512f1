//! Typed debugger messages.
//!
//! Field names serialize in camelCase and in declaration order, which is the
//! canonical order the encoders put on the wire.

use super::token::{RequestToken, ResponseToken};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the request a message belongs to.
pub type RequestId = u64;

/// A source location to pause at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub file_path: String,
    pub line: i64,
    pub column: i64,
}

impl Breakpoint {
    pub fn new(file_path: impl Into<String>, line: i64, column: i64) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stackframe {
    pub id: i64,
    pub file_name: String,
    pub line: i64,
    pub column: i64,
    pub function_name: String,
}

impl fmt::Display for Stackframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = if self.function_name.is_empty() {
            "<anonymous>"
        } else {
            &self.function_name
        };
        write!(
            f,
            "#{} {} at {}:{}:{}",
            self.id, function, self.file_name, self.line, self.column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub name: String,
    pub variables_reference: i64,
    pub expensive: bool,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ref {})", self.name, self.variables_reference)?;
        if self.expensive {
            write!(f, " [expensive]")?;
        }
        Ok(())
    }
}

/// A variable as displayed by the debugger.
///
/// `variables_reference` is non-zero when the value has children that can be
/// fetched with a further variables request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub variables_reference: i64,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)?;
        if self.variables_reference != 0 {
            write!(f, " (ref {})", self.variables_reference)?;
        }
        Ok(())
    }
}

/// Arguments of a command, one variant per request token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RequestArguments {
    Run,
    Stackframe,
    Breakpoint {
        breakpoints: Vec<Breakpoint>,
    },
    #[serde(rename_all = "camelCase")]
    Scopes {
        frame_id: i64,
    },
    #[serde(rename_all = "camelCase")]
    Variables {
        variables_reference: i64,
    },
}

impl RequestArguments {
    pub fn token(&self) -> RequestToken {
        match self {
            RequestArguments::Run => RequestToken::Run,
            RequestArguments::Stackframe => RequestToken::Stackframes,
            RequestArguments::Breakpoint { .. } => RequestToken::BreakpointAdd,
            RequestArguments::Scopes { .. } => RequestToken::Scopes,
            RequestArguments::Variables { .. } => RequestToken::Variables,
        }
    }
}

/// A decoded command.
///
/// Serializes as `{"id":..,"command":"<token>","arguments":{"kind":..}}`. The
/// `command` field is derived from the arguments; when deserializing it may be
/// omitted, but if present it must agree with `arguments.kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RequestRepr")]
pub struct DebuggerRequest {
    pub id: RequestId,
    pub arguments: RequestArguments,
}

impl DebuggerRequest {
    pub fn new(id: RequestId, arguments: RequestArguments) -> Self {
        Self { id, arguments }
    }

    pub fn command(&self) -> RequestToken {
        self.arguments.token()
    }
}

#[derive(Serialize, Deserialize)]
struct RequestRepr {
    id: RequestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<RequestToken>,
    arguments: RequestArguments,
}

impl TryFrom<RequestRepr> for DebuggerRequest {
    type Error = String;

    fn try_from(repr: RequestRepr) -> std::result::Result<Self, Self::Error> {
        let implied = repr.arguments.token();
        match repr.command {
            Some(command) if command != implied => Err(format!(
                "command `{}` does not match arguments for `{}`",
                command, implied
            )),
            _ => Ok(Self {
                id: repr.id,
                arguments: repr.arguments,
            }),
        }
    }
}

impl Serialize for DebuggerRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RequestRepr {
            id: self.id,
            command: Some(self.command()),
            arguments: self.arguments.clone(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for DebuggerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.id)?;
        match &self.arguments {
            RequestArguments::Run => write!(f, "run"),
            RequestArguments::Stackframe => write!(f, "stackframes"),
            RequestArguments::Breakpoint { breakpoints } => {
                write!(f, "add {} breakpoint(s)", breakpoints.len())?;
                for bp in breakpoints {
                    write!(f, "\n    {}", bp)?;
                }
                Ok(())
            }
            RequestArguments::Scopes { frame_id } => write!(f, "scopes of frame {}", frame_id),
            RequestArguments::Variables {
                variables_reference,
            } => write!(f, "variables of ref {}", variables_reference),
        }
    }
}

/// Result payload of a response, one variant per response token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResponseResult {
    Ready,
    Finish,
    Attached,
    BreakpointAdd {
        breakpoints: Vec<Breakpoint>,
    },
    #[serde(rename_all = "camelCase")]
    BreakpointStopped {
        file_path: String,
        line: i64,
        column: i64,
    },
    Stackframe {
        stackframes: Vec<Stackframe>,
    },
    Scopes {
        scopes: Vec<Scope>,
    },
    Variables {
        variables: Vec<Variable>,
    },
}

impl ResponseResult {
    pub fn token(&self) -> ResponseToken {
        match self {
            ResponseResult::Ready => ResponseToken::Ready,
            ResponseResult::Finish => ResponseToken::Finish,
            ResponseResult::Attached => ResponseToken::Attached,
            ResponseResult::BreakpointAdd { .. } => ResponseToken::BreakpointAdd,
            ResponseResult::BreakpointStopped { .. } => ResponseToken::BreakpointStopped,
            ResponseResult::Stackframe { .. } => ResponseToken::Stackframes,
            ResponseResult::Scopes { .. } => ResponseToken::Scopes,
            ResponseResult::Variables { .. } => ResponseToken::Variables,
        }
    }

    pub fn stopped_at(breakpoint: Breakpoint) -> Self {
        ResponseResult::BreakpointStopped {
            file_path: breakpoint.file_path,
            line: breakpoint.line,
            column: breakpoint.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebuggerResponse {
    pub id: RequestId,
    pub result: ResponseResult,
}

impl DebuggerResponse {
    pub fn new(id: RequestId, result: ResponseResult) -> Self {
        Self { id, result }
    }

    pub fn token(&self) -> ResponseToken {
        self.result.token()
    }
}

impl fmt::Display for DebuggerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.id)?;
        match &self.result {
            ResponseResult::Ready => write!(f, "engine ready"),
            ResponseResult::Finish => write!(f, "execution finished"),
            ResponseResult::Attached => write!(f, "debugger attached"),
            ResponseResult::BreakpointAdd { breakpoints } => {
                write!(f, "{} breakpoint(s) acknowledged", breakpoints.len())?;
                for bp in breakpoints {
                    write!(f, "\n    {}", bp)?;
                }
                Ok(())
            }
            ResponseResult::BreakpointStopped {
                file_path,
                line,
                column,
            } => write!(f, "stopped at {}:{}:{}", file_path, line, column),
            ResponseResult::Stackframe { stackframes } => {
                write!(f, "{} frame(s)", stackframes.len())?;
                for frame in stackframes {
                    write!(f, "\n    {}", frame)?;
                }
                Ok(())
            }
            ResponseResult::Scopes { scopes } => {
                write!(f, "{} scope(s)", scopes.len())?;
                for scope in scopes {
                    write!(f, "\n    {}", scope)?;
                }
                Ok(())
            }
            ResponseResult::Variables { variables } => {
                write!(f, "{} variable(s)", variables.len())?;
                for var in variables {
                    write!(f, "\n    {}", var)?;
                }
                Ok(())
            }
        }
    }
}
