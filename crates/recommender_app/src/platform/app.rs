use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use recommender_core::{update, AppState, FailureReason, Msg, Phase, ResponseOutcome};
use recommender_engine::EngineHandle;
use recommender_logging::{rec_info, rec_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::render::{render, OutputFormat};

const QUIT_COMMAND: &str = ":q";
const LIMIT_COMMAND: &str = ":k";

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::initialize(cli.log);

    let config = AppConfig::load(&cli)?;
    rec_info!("Using endpoint {}", config.endpoint);
    let response_wait = config.response_wait();
    let engine = EngineHandle::new(config.client_settings())
        .context("Failed to start recommendation engine")?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    let mut session = Session::new(EffectRunner::new(engine), format, response_wait);
    session.apply(Msg::ResultLimitChanged(config.default_result_limit));

    match cli.prompt {
        Some(prompt) => Ok(exit_code(session.run_once(prompt))),
        None => session.run_interactive(),
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    format: OutputFormat,
    response_wait: Duration,
}

impl Session {
    fn new(runner: EffectRunner, format: OutputFormat, response_wait: Duration) -> Self {
        Self {
            state: AppState::new(),
            runner,
            format,
            response_wait,
        }
    }

    /// Submits a single prompt and returns the phase it ended in.
    fn run_once(&mut self, prompt: String) -> Phase {
        self.submit(prompt);
        self.state.phase()
    }

    fn run_interactive(&mut self) -> Result<ExitCode> {
        println!(
            "Enter a hiring prompt ({LIMIT_COMMAND} N sets the number of recommendations, {QUIT_COMMAND} quits)."
        );
        let stdin = io::stdin();
        loop {
            print!("[{}] > ", self.state.input().result_limit());
            io::stdout().flush().context("Failed to flush stdout")?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line).context("Failed to read stdin")? == 0 {
                break;
            }
            if self.handle_line(&line).is_break() {
                break;
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    fn handle_line(&mut self, line: &str) -> ControlFlow<()> {
        let command = line.trim();
        if command == QUIT_COMMAND {
            return ControlFlow::Break(());
        }
        match limit_argument(command) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(limit) => {
                    self.apply(Msg::ResultLimitChanged(limit));
                    println!("Total recommendations: {}", self.state.input().result_limit());
                }
                Err(_) => eprintln!("Usage: {LIMIT_COMMAND} <number between 1 and 20>"),
            },
            None => self.submit(line.to_string()),
        }
        ControlFlow::Continue(())
    }

    /// Submits `prompt` and blocks until the request resolves.
    fn submit(&mut self, prompt: String) {
        self.apply(Msg::PromptChanged(prompt));
        self.dispatch(Msg::Submitted);

        while let Some(request_id) = self.state.in_flight() {
            let msg = self.runner.next_msg(self.response_wait).unwrap_or_else(|| {
                rec_warn!("No response for request {} within {:?}", request_id, self.response_wait);
                Msg::ResponseReceived {
                    request_id,
                    outcome: ResponseOutcome::Failed(FailureReason::Timeout),
                }
            });
            self.dispatch(msg);
        }
    }

    /// Applies an input edit without rendering.
    fn apply(&mut self, msg: Msg) {
        let (state, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn dispatch(&mut self, msg: Msg) {
        self.apply(msg);
        if self.state.consume_dirty() {
            print!("{}", render(&self.state.view(), self.format));
        }
    }
}

fn exit_code(phase: Phase) -> ExitCode {
    if phase == Phase::Succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Argument of a `:k` command, or `None` when the first token is anything else.
fn limit_argument(command: &str) -> Option<&str> {
    let (head, rest) = command
        .split_once(char::is_whitespace)
        .unwrap_or((command, ""));
    (head == LIMIT_COMMAND).then(|| rest.trim())
}
