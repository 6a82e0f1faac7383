use anyhow::{anyhow, Result};
use clap::Parser;

use crate::indexer::IndexerSettings;
use crate::router::{self, Route};
use crate::theme::Theme;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.subquery.network/sq/TaoStats/bittensor-indexer";
pub const DEFAULT_HISTORICAL_URL: &str = "https://api.subquery.network/sq/TaoStats/bittensor-historical";

/// taox - terminal explorer for Subtensor chains
///
/// Browses extrinsics, events, calls, accounts and subnet owners from a
/// GraphQL indexer. Configuration priority: CLI args > Environment
/// variables (and `.env`) > Defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "taox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal explorer for Subtensor chains", long_about = None)]
pub struct CliArgs {
    /// Route to open on startup (e.g. taox://v1/extrinsic/3014339-0002)
    #[arg(value_name = "ROUTE")]
    pub route: Option<String>,

    /// Same as the positional ROUTE
    #[arg(long, env = "TAOX_OPEN")]
    pub open: Option<String>,

    /// GraphQL endpoint for events, extrinsics, calls and subnets
    #[arg(long, env = "TAOX_DICTIONARY_URL")]
    pub dictionary_url: Option<String>,

    /// GraphQL endpoint for historical series (account statistics)
    #[arg(long, env = "TAOX_HISTORICAL_URL")]
    pub historical_url: Option<String>,

    /// Bearer token sent to both indexers
    #[arg(long, env = "TAOX_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Rows per page (5-100)
    #[arg(long, env = "TAOX_PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Indexer request timeout in milliseconds (1000-60000)
    #[arg(long, env = "TAOX_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Retries on 429/5xx and transport errors (0-10)
    #[arg(long, env = "TAOX_RETRIES")]
    pub retries: Option<u8>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "TAOX_RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Color theme: subnet, nord, amber, mono
    #[arg(long, env = "TAOX_THEME")]
    pub theme: Option<String>,

    /// Network name shown in the header
    #[arg(long, env = "TAOX_NETWORK")]
    pub network: Option<String>,

    /// SS58 address prefix of the network (0-16383)
    #[arg(long, env = "TAOX_SS58_PREFIX")]
    pub ss58_prefix: Option<u16>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub dictionary_url: String,
    pub historical_url: String,
    pub auth_token: Option<String>,
    pub page_size: u32,
    pub timeout_ms: u64,
    pub retries: u8,
    pub render_fps: u32,
    pub theme: Theme,
    pub network: String,
    pub ss58_prefix: u16,
    pub initial_route: Route,
}

impl Config {
    pub fn indexer_settings(&self) -> IndexerSettings {
        IndexerSettings {
            dictionary_url: self.dictionary_url.clone(),
            historical_url: self.historical_url.clone(),
            auth_token: self.auth_token.clone(),
            timeout_ms: self.timeout_ms,
            retries: self.retries,
        }
    }

    pub fn log_summary(&self) {
        log::info!("[config] dictionary={} historical={}", self.dictionary_url, self.historical_url);
        log::info!(
            "[config] network={} ss58={} page_size={} timeout={}ms retries={} fps={} theme={}",
            self.network,
            self.ss58_prefix,
            self.page_size,
            self.timeout_ms,
            self.retries,
            self.render_fps,
            self.theme
        );
        if self.auth_token.is_some() {
            log::info!("[config] indexer auth: configured");
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Build a [`Config`] from parsed arguments (env values are already folded
/// in by clap).
pub fn from_args(args: CliArgs) -> Result<Config> {
    let dictionary_url = args.dictionary_url.unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string());
    validate_url(&dictionary_url, "TAOX_DICTIONARY_URL")?;
    let historical_url = args.historical_url.unwrap_or_else(|| DEFAULT_HISTORICAL_URL.to_string());
    validate_url(&historical_url, "TAOX_HISTORICAL_URL")?;

    let page_size = validate_in_range(args.page_size.unwrap_or(25), 5, 100, "TAOX_PAGE_SIZE")?;
    let timeout_ms = validate_in_range(args.timeout_ms.unwrap_or(8000), 1000, 60000, "TAOX_TIMEOUT_MS")?;
    let retries = validate_in_range(args.retries.unwrap_or(2), 0, 10, "TAOX_RETRIES")?;
    let render_fps = validate_in_range(args.render_fps.unwrap_or(30), 1, 120, "TAOX_RENDER_FPS")?;
    let ss58_prefix = validate_in_range(args.ss58_prefix.unwrap_or(42), 0, 16383, "TAOX_SS58_PREFIX")?;

    let theme = match args.theme.as_deref() {
        Some(name) => name.parse()?,
        None => Theme::default(),
    };

    let initial_route = match args.route.or(args.open).filter(|r| !r.trim().is_empty()) {
        Some(raw) => router::parse(&raw).ok_or_else(|| anyhow!("Unrecognized route '{raw}'"))?,
        None => Route::Home,
    };

    Ok(Config {
        dictionary_url,
        historical_url,
        auth_token: args.auth_token.filter(|t| !t.is_empty()),
        page_size,
        timeout_ms,
        retries,
        render_fps,
        theme,
        network: args.network.unwrap_or_else(|| "bittensor".to_string()),
        ss58_prefix,
        initial_route,
    })
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["taox"];
        argv.extend_from_slice(args);
        from_args(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults() {
        let cfg = from_args(CliArgs::default()).unwrap();
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.retries, 2);
        assert_eq!(cfg.ss58_prefix, 42);
        assert_eq!(cfg.theme, Theme::Subnet);
        assert_eq!(cfg.initial_route, Route::Home);
        assert!(cfg.auth_token.is_none());
    }

    #[test]
    fn flags_override() {
        let cfg = parse(&[
            "--page-size",
            "50",
            "--theme",
            "amber",
            "--dictionary-url",
            "http://localhost:3000",
            "taox://v1/extrinsic/1-0001",
        ])
        .unwrap();
        assert_eq!(cfg.page_size, 50);
        assert_eq!(cfg.theme, Theme::Amber);
        assert_eq!(cfg.dictionary_url, "http://localhost:3000");
        assert_eq!(cfg.initial_route, Route::Extrinsic { id: "1-0001".into() });
        assert_eq!(cfg.indexer_settings().dictionary_url, "http://localhost:3000");
    }

    #[test]
    fn out_of_range_is_rejected() {
        let err = parse(&["--page-size", "1000"]).unwrap_err();
        assert!(err.to_string().contains("TAOX_PAGE_SIZE"));
        assert!(parse(&["--timeout-ms", "10"]).is_err());
    }

    #[test]
    fn bad_url_and_route_are_rejected() {
        assert!(parse(&["--historical-url", "ftp://x"]).is_err());
        assert!(parse(&["taox://v9/nothing"]).is_err());
        assert!(parse(&["--theme", "neon"]).is_err());
    }
}
