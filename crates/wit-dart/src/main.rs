use clap::{Parser, Subcommand};
use starbase::{App, AppResult, AppSession};
use wit_dart::commands::run_generate;
use wit_dart::logging::init_tracing;

/// wit-dart - Dart bindings for WIT worlds
#[derive(Parser)]
#[command(name = "wit-dart")]
#[command(about = "Generate Dart bindings from WIT", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `wit_dart_binding=trace` (defaults to RUST_LOG, then `info`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Generate a Dart file from a WIT world
    Generate {
        /// <witInputPath> [<dartFilePath>] followed by `--[no-]<flag>[=true|false]` flags
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Application session for the wit-dart CLI
#[derive(Clone)]
struct WitDartSession {
    command: Commands,
}

#[async_trait::async_trait]
impl AppSession for WitDartSession {
    async fn execute(&mut self) -> AppResult {
        match &self.command {
            Commands::Generate { args } => run_generate(args.clone()).await,
        }
    }
}

#[tokio::main]
async fn main() -> starbase::MainResult {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let session = WitDartSession {
        command: cli.command,
    };

    let exit_code = App::default()
        .run(
            session,
            |mut session| async move { session.execute().await },
        )
        .await?;

    Ok(std::process::ExitCode::from(exit_code))
}
