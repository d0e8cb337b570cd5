use clap::Parser;
use std::time::Duration;

use barrage_core::{
    Config, DEFAULT_CONNECTIONS, DEFAULT_DURATION, DEFAULT_PORT, DEFAULT_REQUEST_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT,
};

fn parse_interval(input: &str) -> Result<f64, String> {
    let s = input.trim();
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("invalid interval '{s}' (expected seconds, e.g. 1, 0.5)"))?;
    barrage_core::interval_from_secs(secs).map_err(|err| err.to_string())?;
    Ok(secs)
}

#[derive(Debug, Parser)]
#[command(
    name = "barrage",
    author,
    version,
    about = "Batched HTTP load generator",
    long_about = "barrage sends batches of concurrent HTTP GET requests to a single host for a fixed duration, then reports throughput and latency.\n\nEach batch launches `--connections` requests at once and waits for all of them (success, error status or failure) before pausing for `--interval` seconds. The duration is only checked before a batch starts, so the last batch always runs to completion.",
    after_help = "Examples:\n  barrage example.com\n  barrage example.com -p 8080 -c 50 -d 30 -i 0.5\n  barrage example.com -p 443 --https -v"
)]
pub struct Cli {
    /// Target host to load test
    pub host: String,

    /// Target port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of concurrent requests per batch
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CONNECTIONS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub connections: u64,

    /// Test duration in seconds
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DURATION.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub duration: u64,

    /// Use HTTPS
    #[arg(long)]
    pub https: bool,

    /// Log every request and batch
    #[arg(short, long)]
    pub verbose: bool,

    /// Pause between batches in seconds
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_REQUEST_INTERVAL.as_secs_f64(),
        value_parser = parse_interval
    )]
    pub interval: f64,
}

impl Cli {
    pub fn config(&self) -> barrage_core::Result<Config> {
        let cfg = Config {
            host: self.host.clone(),
            port: self.port,
            use_tls: self.https,
            connections: self.connections,
            duration: Duration::from_secs(self.duration),
            request_interval: barrage_core::interval_from_secs(self.interval)?,
            verbose: self.verbose,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_interval_accepts_fractions() {
        assert_eq!(parse_interval("0.5"), Ok(0.5));
        assert_eq!(parse_interval("0"), Ok(0.0));
        assert_eq!(parse_interval(" 2 "), Ok(2.0));
    }

    #[test]
    fn parse_interval_rejects_invalid_values() {
        assert!(parse_interval("").is_err());
        assert!(parse_interval("abc").is_err());
        assert!(parse_interval("-1").is_err());
        assert!(parse_interval("inf").is_err());
        assert!(parse_interval("NaN").is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = match Cli::try_parse_from(["barrage", "example.com"]) {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };

        assert_eq!(cli.host, "example.com");
        assert_eq!(cli.port, 80);
        assert_eq!(cli.connections, 150);
        assert_eq!(cli.duration, 60);
        assert!(!cli.https);
        assert!(!cli.verbose);
        assert_eq!(cli.interval, 1.0);

        let cfg = match cli.config() {
            Ok(v) => v,
            Err(err) => panic!("invalid config: {err}"),
        };
        assert_eq!(cfg, Config::new("example.com"));
    }

    #[test]
    fn cli_parses_short_and_long_flags() {
        let parsed = Cli::try_parse_from([
            "barrage", "localhost", "-p", "8443", "-c", "4", "-d", "2", "--https", "-v", "-i",
            "0.25",
        ]);
        let cli = match parsed {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };

        let cfg = match cli.config() {
            Ok(v) => v,
            Err(err) => panic!("invalid config: {err}"),
        };
        assert_eq!(cfg.port, 8443);
        assert_eq!(cfg.connections, 4);
        assert_eq!(cfg.duration, Duration::from_secs(2));
        assert!(cfg.use_tls);
        assert!(cfg.verbose);
        assert_eq!(cfg.request_interval, Duration::from_millis(250));
        assert_eq!(cfg.target_url(), "https://localhost:8443/");

        let parsed = Cli::try_parse_from([
            "barrage",
            "localhost",
            "--port",
            "81",
            "--connections",
            "3",
            "--duration",
            "5",
            "--interval",
            "2",
            "--verbose",
        ]);
        let cli = match parsed {
            Ok(v) => v,
            Err(err) => panic!("failed to parse args: {err}"),
        };
        assert_eq!(cli.port, 81);
        assert_eq!(cli.connections, 3);
        assert_eq!(cli.duration, 5);
        assert_eq!(cli.interval, 2.0);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["barrage"]).is_err());
        assert!(Cli::try_parse_from(["barrage", "h", "-c", "0"]).is_err());
        assert!(Cli::try_parse_from(["barrage", "h", "-d", "0"]).is_err());
        assert!(Cli::try_parse_from(["barrage", "h", "-p", "70000"]).is_err());
        assert!(Cli::try_parse_from(["barrage", "h", "-i", "-0.5"]).is_err());
    }
}
