use crate::infra::{build_gateway, build_renderer, parse_action, ScriptedAction};
use crate::replay::run_replay;
use crate::session::{Console, OutputFormat};
use clap::{Args, Parser, Subcommand};
use eligibility_wizard::config::AppConfig;
use eligibility_wizard::error::AppError;
use eligibility_wizard::telemetry;
use std::io::{self, Write};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Eligibility Wizard",
    about = "Run the eligibility questionnaire from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer the questionnaire interactively (default command)
    Run(SessionArgs),
    /// Replay a scripted sequence of answers and print the final screen
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SessionArgs {
    /// Override the configured submission endpoint
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Keep submissions in memory instead of posting them
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// Print screens as JSON view models
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
    /// Comma separated actions: yes, no, back, restart
    #[arg(long, value_delimiter = ',', value_parser = parse_action)]
    pub(crate) actions: Vec<ScriptedAction>,
    /// Email submitted when the script ends on a screen with an email form
    #[arg(long)]
    pub(crate) email: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(SessionArgs::default()));

    let session_args = match &command {
        Command::Run(args) => args.clone(),
        Command::Replay(args) => args.session.clone(),
    };
    let mut console = build_console(session_args)?;

    let stdout = io::stdout();
    let mut output = stdout.lock();
    match command {
        Command::Run(_) => {
            let stdin = io::stdin();
            console.run(stdin.lock(), &mut output).await?;
        }
        Command::Replay(args) => {
            run_replay(&mut console, &args.actions, args.email, &mut output).await?;
        }
    }
    output.flush()?;
    Ok(())
}

fn build_console(args: SessionArgs) -> Result<Console, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(endpoint) = args.endpoint {
        config.gateway.endpoint = endpoint;
    }

    telemetry::init(&config.telemetry)?;

    let gateway = build_gateway(&config.gateway, args.dry_run)?;
    let renderer = build_renderer(&config);
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    info!(
        environment = ?config.environment,
        endpoint = %config.gateway.endpoint,
        dry_run = args.dry_run,
        "eligibility questionnaire ready"
    );

    Ok(Console::new(renderer, gateway, format))
}
