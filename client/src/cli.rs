use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use serde_json::Value;
use tracing::debug;
use viper_client::api::IsApiError;
use viper_client::api::client::ViperClient;
use viper_client::api::client::health::health;
use viper_client::api::client::health::status;
use viper_client::api::client::reset::reset;
use viper_client::api::client::view::View;
use viper_client::api::client::view::view;
use viper_client::config::BackendConfig;
use viper_client::form::FormValues;
use viper_client::submit::OutputSink;
use viper_client::submit::render_error;
use viper_client::submit::render_json;
use viper_client::submit::submit;
use viper_client::tracing::enable_tracing;

/// Client for the Viper Vegas backend.
#[derive(Parser, Debug)]
#[command(name = "viper", version)]
struct Cli {
    /// Base URL of the backend. Defaults to $BACKEND_URL, or http://127.0.0.1:8000.
    #[arg(long)]
    backend_url: Option<String>,

    /// Timeout of GET requests.
    #[arg(long, default_value = "4s", value_parser = humantime::parse_duration)]
    read_timeout: Duration,

    /// Timeout of POST requests.
    #[arg(long, default_value = "7s", value_parser = humantime::parse_duration)]
    write_timeout: Duration,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submits a spin and prints the response.
    Spin {
        /// The number, converted like JavaScript's Number(): blank is 0.
        #[arg(long, allow_hyphen_values = true)]
        numero: String,

        #[arg(long)]
        modo: String,
    },

    /// Prints whether the engine is online.
    Status,

    /// Checks the health of the backend.
    Health,

    /// Clears the history and statistics of the backend.
    Reset,

    /// Prints one of: stats, historico, scores-terminal, scores-padrao,
    /// scores-terminal-padrao, heatmap-terminal, heatmap-roda-eu.
    View {
        view: View,

        /// Number of spins the heatmaps are computed over.
        #[arg(long)]
        window: Option<u32>,
    },
}

impl Cli {
    fn config(&self) -> BackendConfig {
        let mut config = match &self.backend_url {
            Some(backend_url) => BackendConfig::new(backend_url.as_str()),
            None => BackendConfig::from_env(),
        };
        config.read_timeout = self.read_timeout;
        config.write_timeout = self.write_timeout;
        config
    }
}

/// Prints results on stdout and errors on stderr.
struct Terminal;

impl OutputSink for Terminal {
    fn show_result(&self, text: &str) {
        println!("{text}");
    }

    fn show_error(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = enable_tracing() {
        eprintln!("{error}");
    }
    let config = cli.config();
    debug!(?config, "Backend");
    let client = match ViperClient::native(config) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let output = Terminal;
    match cli.command {
        Command::Spin { numero, modo } => {
            match submit(&FormValues::new(numero, modo), &client, &output).await {
                Ok(_) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Command::Status => show(&output, status(&client).await),
        Command::Health => show(&output, health(&client).await),
        Command::Reset => show(&output, reset(&client).await),
        Command::View { view: v, window } => show(&output, view(&client, v, window).await),
    }
}

fn show(output: &impl OutputSink, result: Result<Value, impl IsApiError>) -> ExitCode {
    match result {
        Ok(value) => {
            output.show_result(&render_json(&value));
            ExitCode::SUCCESS
        }
        Err(error) => {
            output.show_error(&render_error(&error));
            ExitCode::FAILURE
        }
    }
}
