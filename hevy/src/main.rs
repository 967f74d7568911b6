//! Hevy CLI — list and manage workouts, routine folders, exercise templates, and webhooks.

mod output;

use clap::{Parser, Subcommand, ValueEnum};
use hevy_lib::helpers::parse_time;
use hevy_lib::{
    get_api_key, CreateRoutineFolderRequest, HevyClient, ReqwestTransport, WebhookSubscription,
    Workout, API_BASE,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hevy")]
#[command(about = "Hevy CLI — list and manage workouts, routine folders, exercise templates, and webhooks", long_about = None)]
#[command(subcommand_required = false)]
struct Cli {
    /// Output format: plain (human-readable), json (structured).
    #[arg(short, long, default_value = "plain", value_enum, global = true)]
    output: OutputFormatArg,

    /// API root to send requests to.
    #[arg(long, env = "HEVY_BASE_URL", default_value = API_BASE, global = true)]
    base_url: String,

    /// Page number for list commands.
    #[arg(long, global = true)]
    page: Option<u32>,

    /// Page size for list commands.
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// When no subcommand is given, the first page of workouts is printed.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List workouts
    Workouts,
    /// Show one workout
    Workout { workout_id: String },
    /// Show the total number of workouts
    WorkoutCount,
    /// List workout updates and deletions
    WorkoutEvents {
        /// Only events after this time (ISO 8601). Defaults to the Unix epoch.
        #[arg(long)]
        since: Option<String>,
    },
    /// Create a workout from a JSON file (`-` reads stdin)
    CreateWorkout {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a workout from a JSON file (`-` reads stdin)
    UpdateWorkout {
        workout_id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// List routine folders
    RoutineFolders,
    /// Show one routine folder
    RoutineFolder { folder_id: u64 },
    /// Create a routine folder
    CreateRoutineFolder { title: String },
    /// List exercise templates
    ExerciseTemplates,
    /// Show one exercise template
    ExerciseTemplate { template_id: String },
    /// Show the webhook subscription
    Webhook,
    /// Subscribe a URL to workout webhooks
    CreateWebhook {
        #[arg(long)]
        url: String,
        /// Sent back by Hevy in the Authorization header of each webhook call
        #[arg(long, env = "HEVY_WEBHOOK_AUTH_TOKEN")]
        auth_token: String,
    },
    /// Remove the webhook subscription
    DeleteWebhook,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        println!("hevy {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let (api_key, source) = match get_api_key() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(source = source.var_name(), "resolved API key");

    let client = match build_client(api_key, &cli.base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let format = match cli.output {
        OutputFormatArg::Plain => output::OutputFormat::Plain,
        OutputFormatArg::Json => output::OutputFormat::Json,
    };
    let paging = Paging {
        page: cli.page,
        page_size: cli.page_size,
    };

    let cmd = cli.command.unwrap_or(Commands::Workouts);
    match run(&client, cmd, paging, format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_client(api_key: String, base_url: &str) -> Result<HevyClient<ReqwestTransport>, String> {
    let transport = ReqwestTransport::new().map_err(|e| e.to_string())?;
    HevyClient::with_base_path(transport, api_key, base_url).map_err(|e| e.to_string())
}

#[derive(Clone, Copy)]
struct Paging {
    page: Option<u32>,
    page_size: Option<u32>,
}

async fn run(
    client: &HevyClient<ReqwestTransport>,
    cmd: Commands,
    paging: Paging,
    format: output::OutputFormat,
) -> Result<(), String> {
    let print_value = |v: &Value| -> Result<(), String> {
        let text = output::render(v, format).map_err(|e| e.to_string())?;
        println!("{}", text.trim_end());
        Ok(())
    };

    match cmd {
        Commands::Workouts => {
            let page = client
                .get_workouts(paging.page, paging.page_size)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&page)?;
        }
        Commands::Workout { workout_id } => {
            let workout = client
                .get_workout(&workout_id)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&workout)?;
        }
        Commands::WorkoutCount => {
            let count = client
                .get_workout_count()
                .await
                .map_err(|e| e.to_string())?;
            print_value(&Value::from(count))?;
        }
        Commands::WorkoutEvents { since } => {
            let since = since.as_deref().map(parse_time).transpose()?;
            let events = client
                .get_workout_events(paging.page, paging.page_size, since)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&events)?;
        }
        Commands::CreateWorkout { file } => {
            let workout = read_workout(&file)?;
            let created = client
                .create_workout(&workout)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&created)?;
        }
        Commands::UpdateWorkout { workout_id, file } => {
            let workout = read_workout(&file)?;
            let updated = client
                .update_workout(&workout_id, &workout)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&updated)?;
        }
        Commands::RoutineFolders => {
            let page = client
                .get_routine_folders(paging.page, paging.page_size)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&to_value(&page)?)?;
        }
        Commands::RoutineFolder { folder_id } => {
            let folder = client
                .get_routine_folder(folder_id)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&to_value(&folder)?)?;
        }
        Commands::CreateRoutineFolder { title } => {
            let created = client
                .create_routine_folder(&CreateRoutineFolderRequest { title })
                .await
                .map_err(|e| e.to_string())?;
            print_value(&to_value(&created)?)?;
        }
        Commands::ExerciseTemplates => {
            let page = client
                .get_exercise_templates(paging.page, paging.page_size)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&to_value(&page)?)?;
        }
        Commands::ExerciseTemplate { template_id } => {
            let template = client
                .get_exercise_template(&template_id)
                .await
                .map_err(|e| e.to_string())?;
            print_value(&to_value(&template)?)?;
        }
        Commands::Webhook => {
            match client
                .get_webhook_subscription()
                .await
                .map_err(|e| e.to_string())?
            {
                Some(sub) => print_value(&sub)?,
                None => println!("No webhook subscription configured."),
            }
        }
        Commands::CreateWebhook { url, auth_token } => {
            client
                .create_webhook_subscription(&WebhookSubscription { url, auth_token })
                .await
                .map_err(|e| e.to_string())?;
            println!("Webhook subscription created.");
        }
        Commands::DeleteWebhook => {
            client
                .delete_webhook_subscription()
                .await
                .map_err(|e| e.to_string())?;
            println!("Webhook subscription deleted.");
        }
        Commands::Version => {}
    }
    Ok(())
}

fn to_value<T: serde::Serialize>(v: &T) -> Result<Value, String> {
    serde_json::to_value(v).map_err(|e| e.to_string())
}

fn read_workout(file: &Path) -> Result<Workout, String> {
    let text = if file == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(file).map_err(|e| format!("{}: {}", file.display(), e))?
    };
    serde_json::from_str(&text).map_err(|e| format!("invalid workout JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["hevy"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.page, None);
        assert_eq!(cli.page_size, None);
    }

    #[test]
    fn paging_flags_apply_after_subcommand() {
        let cli =
            Cli::try_parse_from(["hevy", "routine-folders", "--page", "2", "--page-size", "10"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::RoutineFolders)));
        assert_eq!(cli.page, Some(2));
        assert_eq!(cli.page_size, Some(10));
    }

    #[test]
    fn read_workout_reports_bad_json() {
        let dir = std::env::temp_dir().join(format!("hevy-cli-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("workout.json");
        std::fs::write(&file, "{\"title\": 1}").unwrap();
        let err = read_workout(&file).unwrap_err();
        assert!(err.starts_with("invalid workout JSON"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
