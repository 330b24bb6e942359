use std::io::Write;

use color_eyre::eyre::{bail, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use orbital::adapters::frame_source_for;
use orbital::api::ApiClient;
use orbital::cli::{
    format_table, parse_args, parse_input, usage, version_line, ChatInput, CliCommand,
    PlainRenderer,
};
use orbital::config::ChatConfig;
use orbital::models::CellValue;
use orbital::session::{ChatController, SendOutcome};

/// Filter used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "orbital=warn";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

async fn print_datasets(api: &ApiClient) {
    match api.list_datasets().await {
        Ok(datasets) if datasets.is_empty() => println!("No datasets loaded"),
        Ok(datasets) => {
            let columns = ["dataset", "rows", "columns"].map(String::from);
            let rows: Vec<Vec<CellValue>> = datasets
                .iter()
                .map(|d| {
                    vec![
                        CellValue::String(d.name.clone()),
                        CellValue::Number(d.rows.into()),
                        CellValue::Number(d.columns.into()),
                    ]
                })
                .collect();
            for line in format_table(&columns, &rows) {
                println!("{}", line);
            }
        }
        Err(e) => eprintln!("Could not list datasets: {}", e),
    }
}

/// `--check`: health check plus dataset listing
async fn run_check(config: ChatConfig) -> Result<()> {
    let api = ApiClient::new(config);
    let health = api.health_check().await?;
    if !health.is_ok() {
        bail!("backend reported status '{}'", health.status);
    }
    println!(
        "{} is up ({})",
        api.config().base_url,
        health.service.as_deref().unwrap_or("unknown service")
    );
    print_datasets(&api).await;
    Ok(())
}

async fn run_chat(config: ChatConfig) -> Result<()> {
    let api = ApiClient::new(config.clone());
    let renderer = PlainRenderer::stdout(config.clone());
    let mut controller =
        ChatController::new(frame_source_for(&config)).with_observer(Box::new(renderer));

    println!(
        "{} ({} via {}). Type /help for commands.",
        version_line(),
        config.base_url,
        config.transport
    );
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let was_streaming = controller.is_streaming();

        tokio::select! {
            line = lines.next_line() => {
                // EOF ends the session
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    ChatInput::Question(question) => {
                        if controller.send(&question) == SendOutcome::AlreadyStreaming {
                            eprintln!("Still answering. Use /stop or Ctrl+C to cancel.");
                        }
                    }
                    ChatInput::Stop => controller.stop(),
                    ChatInput::Clear => {
                        controller.clear_session();
                        println!("Started a new session");
                    }
                    ChatInput::Datasets => print_datasets(&api).await,
                    ChatInput::Help => println!("{}", usage()),
                    ChatInput::Quit => break,
                    ChatInput::Empty => {}
                    ChatInput::Unknown(command) => eprintln!("Unknown command: {}", command),
                }
                if !controller.is_streaming() {
                    prompt();
                }
            }
            Some(update) = controller.next_update() => {
                controller.apply_update(update);
                if was_streaming && !controller.is_streaming() {
                    prompt();
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                if !controller.is_streaming() {
                    break;
                }
                controller.stop();
                println!();
                prompt();
            }
        }
    }

    controller.stop();
    println!();
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args())?;
    let config = match &command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        CliCommand::Check(options) | CliCommand::Chat(options) => {
            options.apply(ChatConfig::from_env()?)?
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    match command {
        CliCommand::Check(_) => runtime.block_on(run_check(config)),
        _ => runtime.block_on(run_chat(config)),
    }
}
