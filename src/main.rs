mod cli;

use cli::{Args, Command};
use hub_integration::config::{discover_config, load_config_from_path, ConfigFile};
use hub_integration::prelude::*;
use owo_colors::OwoColorize;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\n{} {}", "Caused by:".yellow(), cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

/// Scan failures exit with 1 so CI can tell them from a broken setup
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<HubError>()
        .map(HubError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let client = create_client(&args, &config)?;
    let progress_reporter = StderrProgressReporter::new();

    match args.command {
        Command::WaitScan {
            project,
            project_version,
            timeout_ms,
        } => {
            let tracker = ScanCompletionTracker::new(
                client,
                SystemClock::new(),
                progress_reporter,
                config
                    .scan_timeout_ms
                    .unwrap_or(DEFAULT_SCAN_TIMEOUT_MS as i64),
            );
            let mut request = ScanWaitRequest::new(project, project_version);
            if let Some(timeout_ms) = timeout_ms {
                request = request.with_timeout_ms(timeout_ms);
            }
            tracker.execute(&request).await?;
        }
        Command::Notifications { start, end, rules } => {
            let policy_rules = if rules.is_empty() {
                config.policy_rules.clone().unwrap_or_default()
            } else {
                rules
            };
            let use_case =
                TransformNotificationsUseCase::new(CachingResourceFetcher::new(client), progress_reporter)
                    .with_max_concurrent(
                        config
                            .max_concurrent_notifications
                            .unwrap_or(DEFAULT_MAX_CONCURRENT),
                    );
            let results = use_case
                .execute(&NotificationRequest::new(start, end, policy_rules))
                .await?;
            println!("{}", serde_json::to_string_pretty(&results.items)?);
        }
        Command::PolicyStatus {
            project,
            project_version,
        } => {
            let use_case = DescribePolicyStatusUseCase::new(client);
            let description = use_case.execute(&project, &project_version).await?;
            println!("{}", description.message);
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => load_config_from_path(path),
        None => {
            let current_dir = std::env::current_dir()?;
            Ok(discover_config(&current_dir)?.unwrap_or_default())
        }
    }
}

fn create_client(args: &Args, config: &ConfigFile) -> Result<HubRestClient> {
    let Some(server_url) = args.server_url.clone().or_else(|| config.server_url.clone()) else {
        anyhow::bail!(
            "No hub server URL configured.\n\n💡 Hint: Pass --server-url or set server_url in {}.",
            hub_integration::config::CONFIG_FILENAME
        );
    };
    let Some(api_token) = config.api_token_or_env() else {
        anyhow::bail!(
            "No hub API token configured.\n\n💡 Hint: Set api_token in the config file or the {} environment variable.",
            hub_integration::config::API_TOKEN_ENV
        );
    };

    HubRestClient::new(HubConnection {
        server_url,
        api_token,
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
    })
}
