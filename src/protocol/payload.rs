//! Line splitting and the two payload strategies.
//!
//! A wire line is `<id> <token> [payload]`. The token decides whether the
//! payload is absent, a JSON array, or a fixed number of positional scalars.
//! Each strategy is a small parser here so new message kinds only add a case
//! in the dispatch table.

use super::types::RequestId;
use crate::{MarshalError, Result};
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// Which side of the protocol is being decoded; selects the error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Request,
    Response,
}

impl Direction {
    pub(crate) fn error(self, detail: impl Into<String>) -> MarshalError {
        match self {
            Direction::Request => MarshalError::MalformedRequest(detail.into()),
            Direction::Response => MarshalError::MalformedResponse(detail.into()),
        }
    }
}

/// The fixed leading fields of a line plus the unparsed remainder.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Envelope<'a> {
    pub id: RequestId,
    pub token: &'a str,
    pub rest: &'a str,
}

/// Split `line` into id, token and remainder.
pub(crate) fn split_envelope(line: &str, direction: Direction) -> Result<Envelope<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(3, ' ');
    let (Some(id), Some(token)) = (parts.next(), parts.next()) else {
        return Err(direction.error(format!(
            "expected `<id> <token>`, got {:?}",
            line
        )));
    };
    let id = parse_integer(id, "requestID", direction)?;
    Ok(Envelope {
        id,
        token,
        rest: parts.next().unwrap_or(""),
    })
}

/// How the text after `<id> <token>` is turned into a value of `T`.
///
/// Each variant carries a decoder that receives the payload already cut to
/// its shape, so a decoder can never see the wrong kind of payload.
pub(crate) enum PayloadParser<T> {
    /// Nothing follows the token; trailing text is ignored.
    Empty(fn() -> T),
    /// A JSON array of objects.
    Json(fn(&str) -> Result<T>),
    /// Exactly one scalar token.
    Scalar(fn(&str) -> Result<T>),
    /// Exactly three whitespace-separated scalar tokens.
    Triple(fn([&str; 3]) -> Result<T>),
}

impl<T> PayloadParser<T> {
    pub(crate) fn parse(&self, rest: &str, direction: Direction) -> Result<T> {
        match self {
            PayloadParser::Empty(build) => Ok(build()),
            PayloadParser::Json(decode) => decode(rest),
            PayloadParser::Scalar(decode) => {
                let [token] = scalars::<1>(rest, direction)?;
                decode(token)
            }
            PayloadParser::Triple(decode) => decode(scalars::<3>(rest, direction)?),
        }
    }
}

/// Split a positional payload into exactly `N` tokens.
pub(crate) fn scalars<const N: usize>(rest: &str, direction: Direction) -> Result<[&str; N]> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    <[&str; N]>::try_from(tokens).map_err(|tokens| {
        direction.error(format!(
            "expected {} payload token(s), got {}",
            N,
            tokens.len()
        ))
    })
}

/// Parse a decimal integer field, naming it in the error.
pub(crate) fn parse_integer<T: FromStr>(text: &str, field: &str, direction: Direction) -> Result<T> {
    text.parse::<T>().map_err(|_| {
        direction.error(format!("`{}` is not a valid integer: {:?}", field, text))
    })
}

/// Decode a JSON array into typed items.
///
/// Any failure (syntax, non-array value, missing field, wrong field type,
/// trailing characters) is reported with the path of the offending element.
pub(crate) fn json_sequence<T: DeserializeOwned>(text: &str, direction: Direction) -> Result<Vec<T>> {
    let mut de = serde_json::Deserializer::from_str(text);
    let items: Vec<T> = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| direction.error(format!("invalid JSON payload: {}", e)))?;
    de.end()
        .map_err(|e| direction.error(format!("invalid JSON payload: {}", e)))?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::Breakpoint;

    #[test]
    fn envelope_keeps_rest_verbatim() {
        let env = split_envelope("3 tok a  b c\n", Direction::Response).unwrap();
        assert_eq!(
            env,
            Envelope {
                id: 3,
                token: "tok",
                rest: "a  b c"
            }
        );
    }

    #[test]
    fn envelope_needs_two_fields() {
        for line in ["", "7", "7\n"] {
            let err = split_envelope(line, Direction::Request).unwrap_err();
            assert_eq!(err.label(), "malformed-request");
        }
    }

    #[test]
    fn envelope_rejects_bad_id() {
        for line in ["x run-command", "-1 run-command", "1.5 run-command"] {
            let err = split_envelope(line, Direction::Response).unwrap_err();
            assert!(err.detail().contains("requestID"), "{}", err);
        }
    }

    #[test]
    fn scalars_need_exact_arity() {
        assert_eq!(
            scalars::<3>("/a.js 1 2", Direction::Response).unwrap(),
            ["/a.js", "1", "2"]
        );
        assert!(scalars::<3>("/a b.js 1 2", Direction::Response).is_err());
        let err = scalars::<1>("", Direction::Request).unwrap_err();
        assert_eq!(err.detail(), "expected 1 payload token(s), got 0");
    }

    #[test]
    fn parser_hands_decoder_its_shape() {
        let parser: PayloadParser<String> = PayloadParser::Triple(|[path, line, column]| {
            Ok(format!("{}@{}:{}", path, line, column))
        });
        assert_eq!(
            parser.parse("/a.js 3 4", Direction::Response).unwrap(),
            "/a.js@3:4"
        );
        assert!(parser.parse("/a.js 3", Direction::Response).is_err());

        let parser: PayloadParser<u8> = PayloadParser::Empty(|| 7);
        assert_eq!(parser.parse("ignored tail", Direction::Request).unwrap(), 7);
    }

    #[test]
    fn integers_may_be_negative() {
        assert_eq!(parse_integer::<i64>("-1", "frameId", Direction::Request).unwrap(), -1);
        assert_eq!(
            parse_integer::<i64>("4294967296", "line", Direction::Response).unwrap(),
            4_294_967_296
        );
        let err = parse_integer::<i64>("1.5", "line", Direction::Response).unwrap_err();
        assert!(err.detail().contains("`line`"), "{}", err);
    }

    #[test]
    fn json_sequence_reports_missing_field() {
        let err = json_sequence::<Breakpoint>(
            r#"[{"filePath":"a.js","line":1,"column":2},{"filePath":"b.js","line":3}]"#,
            Direction::Request,
        )
        .unwrap_err();
        assert!(err.detail().contains("[1]"), "{}", err);
        assert!(err.detail().contains("column"), "{}", err);
    }

    #[test]
    fn json_sequence_rejects_single_object() {
        let err = json_sequence::<Breakpoint>(
            r#"{"filePath":"a.js","line":1,"column":2}"#,
            Direction::Request,
        )
        .unwrap_err();
        assert!(err.detail().contains("sequence"), "{}", err);
    }

    #[test]
    fn json_sequence_rejects_trailing_text() {
        assert!(json_sequence::<Breakpoint>("[] junk", Direction::Request).is_err());
        assert!(json_sequence::<Breakpoint>("[] ", Direction::Request).is_ok());
    }
}
