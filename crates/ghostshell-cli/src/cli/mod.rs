//! Command-line arguments for the `ghostshell` binary.

pub mod chat;

use clap::Parser;

use ghostshell_core::agent::DEFAULT_CHANNEL;
use ghostshell_infra::secret::API_KEY_ENV;
use ghostshell_types::config::GlobalConfig;

/// Chat with a language model from your terminal.
#[derive(Parser, Debug)]
#[command(name = "ghostshell", version, about, long_about = None)]
pub struct Cli {
    /// Model source: glm, openai, gemini or mistral [default: glm]
    #[arg(long, env = "GHOSTSHELL_SOURCE")]
    pub source: Option<String>,

    /// API key for the model provider.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name, e.g. glm-4.7-flash or glm-4.7 [default: glm-4.7-flash]
    #[arg(long, env = "GHOSTSHELL_MODEL")]
    pub model: Option<String>,

    /// Override the source's API base URL.
    #[arg(long, env = "GHOSTSHELL_BASE_URL")]
    pub base_url: Option<String>,

    /// Context enhancer to apply to every message (repeatable).
    #[arg(long = "enhancer", value_name = "NAME")]
    pub enhancers: Vec<String>,

    /// Input channel messages are routed through.
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,

    /// Print each response as JSON instead of styled text.
    #[arg(long)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// `EnvFilter` directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,ghostshell=debug",
            _ => "trace",
        }
    }

    /// Layer flags (and their environment variables) over the file config.
    pub fn apply_overrides(&self, mut config: GlobalConfig) -> GlobalConfig {
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        if !self.enhancers.is_empty() {
            config.enhancers = self.enhancers.clone();
        }
        config
    }
}
