use crate::app::report::OutputFormat;
use crate::config::IngestConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ingest")]
#[command(about = "Fetch weather and tweets from public APIs and load them into stores")]
pub struct Cli {
    /// Optional TOML configuration file (environment and flags override it)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Total attempts for the fetch and load steps (1 = no retry)
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Directory for transformed records whose load failed
    #[arg(long, global = true)]
    pub staging_dir: Option<String>,

    /// Fetch and transform, but keep the result in memory instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Append the current weather for a city to the weather_data table
    Weather {
        #[arg(long)]
        city: Option<String>,
    },
    /// Insert a user's recent tweets into the tweets collection
    Tweets {
        #[arg(long)]
        user_id: Option<String>,

        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Print the most frequent hashtags in the tweets collection
    TopHashtags {
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Cli {
    /// Flags are the last layer on top of file and environment.
    pub fn apply(&self, config: &mut IngestConfig) {
        if let Some(n) = self.max_attempts {
            config.retry.max_attempts = n;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry.delay_ms = ms;
        }
        if let Some(dir) = &self.staging_dir {
            config.staging_dir = Some(dir.clone());
        }

        match &self.command {
            Command::Weather { city } => {
                if let Some(city) = city {
                    config.weather.city = city.clone();
                }
            }
            Command::Tweets {
                user_id,
                max_results,
            } => {
                if let Some(user_id) = user_id {
                    config.tweets.user_id = user_id.clone();
                }
                if let Some(n) = max_results {
                    config.tweets.max_results = *n;
                }
            }
            Command::TopHashtags { limit, .. } => {
                if let Some(n) = limit {
                    config.tweets.top_n = *n;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "ingest",
            "--max-attempts",
            "3",
            "tweets",
            "--user-id",
            "99",
            "--max-results",
            "20",
        ]);
        let mut config = IngestConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.tweets.user_id, "99");
        assert_eq!(config.tweets.max_results, 20);
    }

    #[test]
    fn test_top_hashtags_format() {
        let cli = Cli::parse_from(["ingest", "top-hashtags", "--limit", "5", "--format", "csv"]);
        let mut config = IngestConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.tweets.top_n, 5);
        assert!(matches!(
            cli.command,
            Command::TopHashtags {
                format: OutputFormat::Csv,
                ..
            }
        ));
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli = Cli::parse_from(["ingest", "weather", "--city", "Ottawa,CA", "--dry-run"]);
        assert!(cli.dry_run);

        let mut config = IngestConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.weather.city, "Ottawa,CA");
    }
}
