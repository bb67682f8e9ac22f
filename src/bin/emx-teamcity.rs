//! emx-teamcity CLI
//!
//! Replay JSON-lines lifecycle events as TeamCity service messages.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use emx_teamcity::{replay, Hook, Reporter, ReporterConfig, StreamSink, BoxedSink};

#[derive(Parser, Debug)]
#[command(name = "emx-teamcity")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "Translate BDD lifecycle events into TeamCity service messages")]
struct Cli {
    /// JSON-lines event file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Host diagnostic log tailed on failed steps [default: /tmp/php-errors]
    #[arg(long = "error-log", conflicts_with = "no_error_log")]
    error_log: Option<PathBuf>,

    /// Do not read an error log; errorLog metadata is reported empty
    #[arg(long = "no-error-log")]
    no_error_log: bool,

    /// Also emit a `message` for every beforeStep event
    #[arg(long = "step-messages")]
    step_messages: bool,

    /// Stream receiving the service messages
    #[arg(long = "output", value_enum, default_value_t = Output::Stderr)]
    output: Output,

    /// List the hooks the reporter subscribes to and exit
    #[arg(long = "list-hooks")]
    list_hooks: bool,

    /// Print a replay summary when done, on the stream not used for messages
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Stderr,
    Stdout,
}

impl Output {
    /// The stream left free for logs and the summary
    fn diagnostics(self) -> Output {
        match self {
            Output::Stderr => Output::Stdout,
            Output::Stdout => Output::Stderr,
        }
    }

    fn make_writer(self) -> BoxMakeWriter {
        match self {
            Output::Stderr => BoxMakeWriter::new(std::io::stderr),
            Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        }
    }

    fn print_line(self, line: &str) {
        match self {
            Output::Stderr => eprintln!("{}", line),
            Output::Stdout => println!("{}", line),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.output.diagnostics());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // keep the error on its own line, clear of any message frame
            eprintln!("\nerror: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to `stream`, never to the one carrying service messages.
fn init_tracing(stream: Output) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stream.make_writer())
        .with_target(false)
        .try_init();
    if let Err(err) = result {
        stream.print_line(&format!("tracing init skipped: {err}"));
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ReporterConfig::from_env();
    if let Some(path) = cli.error_log {
        config = config.error_log(path);
    }
    if cli.no_error_log {
        config = config.no_error_log();
    }
    if cli.step_messages {
        config = config.step_messages(true);
    }

    let sink: BoxedSink = match cli.output {
        Output::Stderr => Box::new(StreamSink::stderr()),
        Output::Stdout => Box::new(StreamSink::stdout()),
    };
    let mut reporter = Reporter::new(config, sink);

    if cli.list_hooks {
        print_hooks(&reporter);
        return Ok(());
    }

    let (input, source_name): (Box<dyn BufRead>, String) = match cli.input {
        Some(ref path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            (Box::new(BufReader::new(file)), path.display().to_string())
        }
        _ => (Box::new(std::io::stdin().lock()), "<stdin>".to_string()),
    };

    let summary = replay(input, &source_name, &mut reporter)
        .with_context(|| format!("replaying {}", source_name))?;

    if cli.verbose {
        cli.output.diagnostics().print_line(&summary.summary());
    }
    Ok(())
}

fn print_hooks(reporter: &Reporter) {
    println!("Hooks:");
    println!();
    for hook in Hook::ALL {
        let mark = if reporter.is_subscribed(hook) { "subscribed" } else { "-" };
        println!("  {:<16} {}", hook.name(), mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_avoid_message_stream() {
        assert_eq!(Output::Stderr.diagnostics(), Output::Stdout);
        assert_eq!(Output::Stdout.diagnostics(), Output::Stderr);
    }

    #[test]
    fn test_output_flag_parses() {
        let cli = Cli::try_parse_from(["emx-teamcity", "--output", "stdout", "-v"]).unwrap();
        assert_eq!(cli.output, Output::Stdout);
        assert!(cli.verbose);
        assert_eq!(cli.output.diagnostics(), Output::Stderr);

        let cli = Cli::try_parse_from(["emx-teamcity"]).unwrap();
        assert_eq!(cli.output, Output::Stderr);
    }
}
