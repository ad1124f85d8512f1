use debug_marshal::{
    Breakpoint, DebuggerRequest, DebuggerResponse, Marshaller, RequestArguments, RequestToken,
    ResponseResult, Scope, Stackframe, Variable,
};

fn frames() -> Vec<Stackframe> {
    vec![
        Stackframe {
            id: 0,
            file_name: "/src/app.js".to_string(),
            line: 12,
            column: 4,
            function_name: "handler".to_string(),
        },
        Stackframe {
            id: 1,
            file_name: "/src/main.js".to_string(),
            line: 3,
            column: 0,
            function_name: String::new(),
        },
    ]
}

fn all_requests() -> Vec<DebuggerRequest> {
    vec![
        DebuggerRequest::new(0, RequestArguments::Run),
        DebuggerRequest::new(1, RequestArguments::Stackframe),
        DebuggerRequest::new(
            2,
            RequestArguments::Breakpoint {
                breakpoints: vec![Breakpoint::new("/a.js", 1, 2), Breakpoint::new("/b.js", 30, 0)],
            },
        ),
        DebuggerRequest::new(3, RequestArguments::Scopes { frame_id: 7 }),
        DebuggerRequest::new(
            4,
            RequestArguments::Variables {
                variables_reference: 1_000_000,
            },
        ),
    ]
}

fn all_responses() -> Vec<DebuggerResponse> {
    vec![
        DebuggerResponse::new(0, ResponseResult::Ready),
        DebuggerResponse::new(1, ResponseResult::Finish),
        DebuggerResponse::new(1, ResponseResult::Attached),
        DebuggerResponse::new(
            2,
            ResponseResult::BreakpointAdd {
                breakpoints: vec![Breakpoint::new("/a.js", 1, 2)],
            },
        ),
        DebuggerResponse::new(3, ResponseResult::stopped_at(Breakpoint::new("/a/b.js", 10, 4))),
        DebuggerResponse::new(4, ResponseResult::Stackframe { stackframes: frames() }),
        DebuggerResponse::new(
            5,
            ResponseResult::Scopes {
                scopes: vec![
                    Scope {
                        name: "Locals".to_string(),
                        variables_reference: 1,
                        expensive: false,
                    },
                    Scope {
                        name: "Globals".to_string(),
                        variables_reference: 2,
                        expensive: true,
                    },
                ],
            },
        ),
        DebuggerResponse::new(
            6,
            ResponseResult::Variables {
                variables: vec![Variable {
                    name: "s".to_string(),
                    value: "\"quoted \\\" value\"".to_string(),
                    variables_reference: 0,
                }],
            },
        ),
    ]
}

#[test]
fn every_request_variant_round_trips() {
    let mut marshaller = Marshaller::new();
    for request in all_requests() {
        let line = marshaller.encode_request(&request);
        assert!(line.starts_with(&format!("{} {}", request.id, request.command())));
        assert_eq!(marshaller.unmarshall_request(&line).unwrap(), request);
    }
}

#[test]
fn every_response_variant_round_trips() {
    let marshaller = Marshaller::new();
    for response in all_responses() {
        let line = marshaller.encode_response(&response);
        assert_eq!(marshaller.unmarshall_response(&line).unwrap(), response, "{}", line);
    }
}

#[test]
fn canonical_lines_re_encode_byte_for_byte() {
    let mut marshaller = Marshaller::new();
    for line in [
        "5 run-command",
        "6 stackframes-command",
        "7 scopes-command 3",
        "8 variables-command 12",
        r#"9 breakpoint-add-command [{"filePath":"x.js","line":1,"column":2}]"#,
    ] {
        let request = marshaller.unmarshall_request(line).unwrap();
        assert_eq!(marshaller.encode_request(&request), line);
    }
    for line in [
        "0 ready-response",
        "5 prepack-finish-response",
        "3 breakpoint-stopped-response /a/b.js 10 4",
        r#"4 scopes-response [{"name":"Locals","variablesReference":1,"expensive":false}]"#,
        r#"4 variables-response [{"name":"x","value":"1","variablesReference":0}]"#,
    ] {
        let response = marshaller.unmarshall_response(line).unwrap();
        assert_eq!(marshaller.encode_response(&response), line);
    }
}

#[test]
fn decoded_run_stamps_next_notifications() {
    let mut marshaller = Marshaller::new();
    for id in [0, 1, 17, u64::MAX] {
        let line = marshaller.marshall_continue_request(id);
        marshaller.unmarshall_request(&line).unwrap();
        assert!(marshaller.marshall_finish().starts_with(&format!("{} ", id)));
        assert!(marshaller
            .marshall_breakpoint_stopped(&Breakpoint::new("/x.js", 1, 1))
            .starts_with(&format!("{} ", id)));
    }
}

#[test]
fn sessions_do_not_share_correlation() {
    let mut first = Marshaller::new();
    let second = Marshaller::new();
    first.unmarshall_request("12 run-command").unwrap();
    assert_eq!(first.marshall_finish(), "12 prepack-finish-response");
    assert_eq!(second.marshall_finish(), "0 prepack-finish-response");
}

#[test]
fn short_lines_fail_with_typed_errors() {
    let mut marshaller = Marshaller::new();
    for line in ["", "1", "run-command", "42\n"] {
        assert_eq!(
            marshaller.unmarshall_request(line).unwrap_err().label(),
            "malformed-request"
        );
        assert_eq!(
            marshaller.unmarshall_response(line).unwrap_err().label(),
            "malformed-response"
        );
    }
}

#[test]
fn breakpoint_without_column_names_the_field() {
    let err = Marshaller::new()
        .unmarshall_request(r#"1 breakpoint-add-command [{"filePath":"a.js","line":1}]"#)
        .unwrap_err();
    assert_eq!(err.label(), "malformed-request");
    assert!(err.detail().contains("column"), "{}", err);
}

#[test]
fn breakpoint_fields_must_be_numeric() {
    let err = Marshaller::new()
        .unmarshall_request(r#"1 breakpoint-add-command [{"filePath":"a.js","line":"one","column":1}]"#)
        .unwrap_err();
    assert_eq!(err.label(), "malformed-request");
    assert!(err.detail().contains("line"), "{}", err);
}

#[test]
fn numeric_fields_accept_any_integer() {
    let request = Marshaller::new()
        .unmarshall_request(
            r#"1 breakpoint-add-command [{"filePath":"a.js","line":-1,"column":4294967296}]"#,
        )
        .unwrap();
    assert_eq!(
        request.arguments,
        RequestArguments::Breakpoint {
            breakpoints: vec![Breakpoint::new("a.js", -1, 4_294_967_296)]
        }
    );

    let response = Marshaller::new()
        .unmarshall_response(
            r#"2 scopes-response [{"name":"Locals","variablesReference":-3,"expensive":true}]"#,
        )
        .unwrap();
    let ResponseResult::Scopes { scopes } = response.result else {
        panic!("expected scopes, got {:?}", response.result);
    };
    assert_eq!(scopes[0].variables_reference, -3);
}

#[test]
fn text_and_flag_fields_keep_their_json_type() {
    let marshaller = Marshaller::new();
    for (line, field) in [
        (r#"1 breakpoint-add-acknowledge [{"filePath":7,"line":1,"column":1}]"#, "filePath"),
        (r#"1 scopes-response [{"name":"L","variablesReference":1,"expensive":0}]"#, "expensive"),
    ] {
        let err = marshaller.unmarshall_response(line).unwrap_err();
        assert!(err.detail().contains(field), "{} -> {}", line, err);
    }
}

#[test]
fn breakpoint_payload_must_be_json_array() {
    let mut marshaller = Marshaller::new();
    for line in [
        "1 breakpoint-add-command",
        "1 breakpoint-add-command [{",
        r#"1 breakpoint-add-command {"filePath":"a.js","line":1,"column":1}"#,
        "1 breakpoint-add-command 3",
    ] {
        assert_eq!(
            marshaller.unmarshall_request(line).unwrap_err().label(),
            "malformed-request",
            "{}",
            line
        );
    }
}

#[test]
fn extra_json_fields_are_tolerated() {
    let request = Marshaller::new()
        .unmarshall_request(
            r#"1 breakpoint-add-command [{"column":2,"verified":true,"line":1,"filePath":"a.js"}]"#,
        )
        .unwrap();
    assert_eq!(
        request.arguments,
        RequestArguments::Breakpoint {
            breakpoints: vec![Breakpoint::new("a.js", 1, 2)]
        }
    );
}

#[test]
fn stopped_line_decodes_positionally() {
    let response = Marshaller::new()
        .unmarshall_response("3 breakpoint-stopped-response /a/b.js 10 4")
        .unwrap();
    assert_eq!(
        response,
        DebuggerResponse::new(
            3,
            ResponseResult::BreakpointStopped {
                file_path: "/a/b.js".to_string(),
                line: 10,
                column: 4,
            }
        )
    );
}

#[test]
fn scopes_command_needs_numeric_frame() {
    let mut marshaller = Marshaller::new();
    let request = marshaller.unmarshall_request("5 scopes-command 7").unwrap();
    assert_eq!(request.command(), RequestToken::Scopes);
    assert_eq!(request.arguments, RequestArguments::Scopes { frame_id: 7 });
    let request = marshaller.unmarshall_request("5 scopes-command -1").unwrap();
    assert_eq!(request.arguments, RequestArguments::Scopes { frame_id: -1 });

    for line in ["5 scopes-command abc", "5 scopes-command", "5 variables-command 1x"] {
        assert_eq!(
            marshaller.unmarshall_request(line).unwrap_err().label(),
            "malformed-request"
        );
    }
}

#[test]
fn set_breakpoints_encoding_is_exact() {
    assert_eq!(
        Marshaller::new().marshall_set_breakpoints_request(9, &[Breakpoint::new("x.js", 1, 2)]),
        "9 breakpoint-add-command [{\"filePath\":\"x.js\",\"line\":1,\"column\":2}]"
    );
}

#[test]
fn response_items_require_all_fields() {
    let marshaller = Marshaller::new();
    for (line, field) in [
        (r#"1 scopes-response [{"name":"Locals","variablesReference":1}]"#, "expensive"),
        (r#"1 variables-response [{"name":"x","variablesReference":0}]"#, "value"),
        (
            r#"1 stackframes-response [{"fileName":"a.js","line":1,"column":1,"functionName":"f"}]"#,
            "id",
        ),
        (r#"1 breakpoint-add-acknowledge [{"line":1,"column":1}]"#, "filePath"),
    ] {
        let err = marshaller.unmarshall_response(line).unwrap_err();
        assert_eq!(err.label(), "malformed-response");
        assert!(err.detail().contains(field), "{} -> {}", line, err);
    }
}

#[test]
fn requests_are_not_responses() {
    let marshaller = Marshaller::new();
    let err = marshaller.unmarshall_response("1 stackframes-command").unwrap_err();
    assert!(err.detail().contains("stackframes-command"));
}
