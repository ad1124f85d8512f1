//! Message-type tags carried in the second field of every wire line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags of commands sent to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestToken {
    #[serde(rename = "run-command")]
    Run,
    #[serde(rename = "stackframes-command")]
    Stackframes,
    #[serde(rename = "breakpoint-add-command")]
    BreakpointAdd,
    #[serde(rename = "scopes-command")]
    Scopes,
    #[serde(rename = "variables-command")]
    Variables,
}

impl RequestToken {
    pub const ALL: [RequestToken; 5] = [
        RequestToken::Run,
        RequestToken::Stackframes,
        RequestToken::BreakpointAdd,
        RequestToken::Scopes,
        RequestToken::Variables,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestToken::Run => "run-command",
            RequestToken::Stackframes => "stackframes-command",
            RequestToken::BreakpointAdd => "breakpoint-add-command",
            RequestToken::Scopes => "scopes-command",
            RequestToken::Variables => "variables-command",
        }
    }

    /// Look up a wire token. Matching is case-sensitive.
    pub fn from_wire(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags of responses and asynchronous notifications sent by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseToken {
    #[serde(rename = "ready-response")]
    Ready,
    #[serde(rename = "breakpoint-add-acknowledge")]
    BreakpointAdd,
    #[serde(rename = "breakpoint-stopped-response")]
    BreakpointStopped,
    #[serde(rename = "stackframes-response")]
    Stackframes,
    #[serde(rename = "scopes-response")]
    Scopes,
    #[serde(rename = "variables-response")]
    Variables,
    #[serde(rename = "prepack-finish-response")]
    Finish,
    #[serde(rename = "debugger-attached")]
    Attached,
}

impl ResponseToken {
    pub const ALL: [ResponseToken; 8] = [
        ResponseToken::Ready,
        ResponseToken::BreakpointAdd,
        ResponseToken::BreakpointStopped,
        ResponseToken::Stackframes,
        ResponseToken::Scopes,
        ResponseToken::Variables,
        ResponseToken::Finish,
        ResponseToken::Attached,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseToken::Ready => "ready-response",
            ResponseToken::BreakpointAdd => "breakpoint-add-acknowledge",
            ResponseToken::BreakpointStopped => "breakpoint-stopped-response",
            ResponseToken::Stackframes => "stackframes-response",
            ResponseToken::Scopes => "scopes-response",
            ResponseToken::Variables => "variables-response",
            ResponseToken::Finish => "prepack-finish-response",
            ResponseToken::Attached => "debugger-attached",
        }
    }

    pub fn from_wire(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == token)
    }

    /// Notifications are emitted by the engine on its own and are stamped with
    /// the last run request id instead of a fresh one.
    pub fn is_notification(self) -> bool {
        matches!(
            self,
            ResponseToken::BreakpointStopped | ResponseToken::Finish
        )
    }
}

impl fmt::Display for ResponseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
