use crate::cli::args::{CompletionsArgs, DecodeArgs, EncodeArgs, NotifyArgs, NotifyKind};
use crate::cli::report::{ErrorReporter, Flow};
use crate::config::{DecodeDirection, ErrorPolicy, MarshalConfig, OutputFormat};
use crate::{Breakpoint, DebuggerRequest, DebuggerResponse, Marshaller, Result as MarshalResult};
use anyhow::{bail, Context, Result};
use clap::CommandFactory;
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Settings for one decode pass, after merging flags over the config file.
#[derive(Debug, Clone, Copy)]
pub struct DecodeSettings {
    pub direction: DecodeDirection,
    pub format: OutputFormat,
    pub on_error: ErrorPolicy,
    pub color: bool,
}

impl DecodeSettings {
    pub fn resolve(args: &DecodeArgs, config: &MarshalConfig) -> Self {
        let color = !args.no_color
            && config
                .output
                .color
                .unwrap_or_else(|| io::stderr().is_terminal());
        Self {
            direction: args.direction.unwrap_or(config.decode.direction),
            format: args.format.unwrap_or(config.output.format),
            on_error: if args.keep_going {
                ErrorPolicy::Skip
            } else {
                config.decode.on_error
            },
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    pub decoded: usize,
    pub failed: usize,
}

/// A decoded line of either direction.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Decoded {
    Request(DebuggerRequest),
    Response(DebuggerResponse),
}

/// Input accepted by `encode`: `{"request": {...}}` or `{"response": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMessage {
    Request(DebuggerRequest),
    Response(DebuggerResponse),
}

/// Execute the decode command.
#[tracing::instrument(skip_all)]
pub fn decode(args: DecodeArgs, config: &MarshalConfig) -> Result<()> {
    let settings = DecodeSettings::resolve(&args, config);
    info!(
        "Decoding {:?} lines from {}",
        settings.direction,
        describe_input(args.input.as_deref())
    );

    let input = open_input(args.input.as_deref())?;
    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = decode_lines(input, &mut stdout.lock(), &mut stderr.lock(), settings)?;

    info!(
        "Decoded {} line(s), {} malformed",
        summary.decoded, summary.failed
    );
    if summary.failed > 0 {
        bail!("{} line(s) failed to decode", summary.failed);
    }
    Ok(())
}

/// Decode every non-blank line of `input` with one marshaller, so run
/// correlation carries across lines.
pub fn decode_lines<R: BufRead, W: Write, E: Write>(
    input: R,
    out: &mut W,
    err: &mut E,
    settings: DecodeSettings,
) -> Result<DecodeSummary> {
    let mut marshaller = Marshaller::new();
    let mut reporter = ErrorReporter::new(settings.on_error, settings.color);
    let mut summary = DecodeSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let decoded: MarshalResult<Decoded> = match settings.direction {
            DecodeDirection::Request => marshaller.unmarshall_request(&line).map(Decoded::Request),
            DecodeDirection::Response => {
                marshaller.unmarshall_response(&line).map(Decoded::Response)
            }
        };

        match decoded {
            Ok(message) => {
                summary.decoded += 1;
                write_decoded(out, &message, settings.format)?;
            }
            Err(e) => {
                summary.failed += 1;
                if reporter.report(err, index + 1, &e)? == Flow::Stop {
                    break;
                }
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

fn write_decoded<W: Write>(out: &mut W, message: &Decoded, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, message)?;
            writeln!(out)?;
        }
        OutputFormat::Pretty => match message {
            Decoded::Request(request) => writeln!(out, "{}", request)?,
            Decoded::Response(response) => writeln!(out, "{}", response)?,
        },
    }
    Ok(())
}

/// Execute the encode command.
#[tracing::instrument(skip_all)]
pub fn encode(args: EncodeArgs) -> Result<()> {
    let input = open_input(args.input.as_deref())?;
    let stdout = io::stdout();
    let count = encode_lines(input, &mut stdout.lock())?;
    info!("Encoded {} message(s)", count);
    Ok(())
}

/// Encode each JSON line of `input` into its canonical wire line.
pub fn encode_lines<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<usize> {
    let marshaller = Marshaller::new();
    let mut count = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        let message: WireMessage = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid message JSON", index + 1))?;
        let wire = match &message {
            WireMessage::Request(request) => marshaller.encode_request(request),
            WireMessage::Response(response) => marshaller.encode_response(response),
        };
        writeln!(out, "{}", wire)?;
        count += 1;
    }

    out.flush()?;
    Ok(count)
}

/// Execute the notify command.
pub fn notify(args: NotifyArgs) -> Result<()> {
    let line = notification_line(&args)?;
    println!("{}", line);
    Ok(())
}

/// Build the notification line the engine would send after the given run.
pub fn notification_line(args: &NotifyArgs) -> Result<String> {
    let mut marshaller = Marshaller::new();
    let run = marshaller.marshall_continue_request(args.run_id);
    marshaller
        .unmarshall_request(&run)
        .context("failed to record run request")?;

    Ok(match &args.kind {
        NotifyKind::Stopped {
            file_path,
            line,
            column,
        } => {
            if file_path.is_empty() || file_path.contains(char::is_whitespace) {
                bail!(
                    "file path {:?} cannot be sent in a breakpoint-stopped notification",
                    file_path
                );
            }
            marshaller.marshall_breakpoint_stopped(&Breakpoint::new(file_path.clone(), *line, *column))
        }
        NotifyKind::Finish => marshaller.marshall_finish(),
    })
}

/// Execute the completions command.
pub fn completions(args: CompletionsArgs) -> Result<()> {
    let mut command = crate::cli::Cli::command();
    clap_complete::generate(args.shell, &mut command, "debug-marshal", &mut io::stdout());
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn describe_input(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string())
}
