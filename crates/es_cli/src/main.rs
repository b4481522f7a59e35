use anyhow::{Context, Result};
use clap::Parser;
use es_inference::{Config, SummaryRequester};
use es_web::AppState;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a company's quarterly earnings report with Gemini", long_about = None)]
pub struct Cli {
    /// Gemini API key. Without it the gemini backend fails every analysis with a configuration error.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "GEMINI_MODEL", default_value = es_inference::DEFAULT_MODEL_NAME)]
    model_name: String,
    #[arg(long, env = "GEMINI_BASE_URL", default_value = es_inference::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, default_value = "gemini", help = "Model backend to use. Available backends: gemini (default), dummy")]
    model: String,
    /// Request timeout for the model call, in seconds
    #[arg(long, default_value_t = 60)]
    timeout: u64,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Summarize one company and quarter and print the result as JSON
    Analyze {
        #[arg(long)]
        company: String,
        #[arg(long)]
        quarter: String,
        /// Print the model's raw reply instead of the parsed record
        #[arg(long)]
        raw: bool,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            api_key: self.api_key.clone(),
            backend: self.model.clone(),
            model_name: self.model_name.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let config = cli.config();
    let model = es_inference::create_model(&config).context("failed to initialize inference model")?;
    info!("🧠 Inference model initialized (using {})", model.name());
    let requester = SummaryRequester::new(config, model);

    match cli.command.unwrap_or(Commands::Serve {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
    }) {
        Commands::Serve { host, port } => {
            let listener = tokio::net::TcpListener::bind((host.as_str(), port))
                .await
                .with_context(|| format!("failed to bind {}:{}", host, port))?;
            es_web::serve(listener, AppState { requester }).await?;
        }
        Commands::Analyze { company, quarter, raw } => {
            if raw {
                println!("{}", requester.request_summary(&company, &quarter).await?);
                return Ok(());
            }

            let record = requester.summarize(&company, &quarter).await;
            println!("{}", serde_json::to_string_pretty(&record)?);
            if record.has_error() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "es", "--model", "dummy", "--timeout", "5", "analyze", "--company", "Acme", "--quarter", "Q1 2025",
        ])
        .unwrap();

        let config = cli.config();
        assert_eq!(config.backend, "dummy");
        assert_eq!(config.timeout, Duration::from_secs(5));
        match cli.command {
            Some(Commands::Analyze { company, quarter, raw }) => {
                assert_eq!(company, "Acme");
                assert_eq!(quarter, "Q1 2025");
                assert!(!raw);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["es", "serve"]).unwrap();
        match cli.command {
            Some(Commands::Serve { host, port }) => {
                assert_eq!(host, DEFAULT_HOST);
                assert_eq!(port, DEFAULT_PORT);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
