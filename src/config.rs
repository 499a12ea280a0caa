use clap::Parser;

/// tsh - a tiny interactive shell
#[derive(Parser, Debug)]
#[command(name = "tsh", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "tsh=trace")
    #[arg(long, env = "TSH_LOG", default_value = "warn")]
    pub log_level: String,

    /// Name prefixed to diagnostics
    #[arg(long, env = "TSH_NAME", default_value = "tsh")]
    pub name: String,
}
