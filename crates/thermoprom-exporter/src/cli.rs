//! Command-line flags.
//!
//! Long flags accept the single-dash spelling too (`-listen-address :9010`),
//! which is how existing deployments of this exporter were started.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "thermoprom")]
#[command(about = "Exports the CPU package temperature from `sensors` as Prometheus metrics")]
#[command(version)]
pub struct Cli {
    /// The address to listen on for HTTP requests.
    #[arg(long = "listen-address", default_value = ":9010")]
    pub listen_address: String,

    /// Interval between scrapes in seconds.
    #[arg(long = "scrape-interval", default_value_t = 10)]
    pub scrape_interval: u64,
}

const LONG_FLAGS: [&str; 2] = ["listen-address", "scrape-interval"];

/// Rewrite `-flag` / `-flag=value` into clap's `--flag` form.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::<String>::into)
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            if LONG_FLAGS.iter().any(|f| *f == name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

impl Cli {
    /// Parse from an argv-like iterator (program name first).
    pub fn try_parse_args<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}
