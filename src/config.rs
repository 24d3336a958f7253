use std::env;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_CSV: &str = "data/statcast.csv";

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Root directory of static assets; `path=` queries resolve under it.
    pub public_dir: PathBuf,
    /// Default CSV source, relative to `public_dir`.
    pub default_csv: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr =
            env::var("STATBOARD_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let public_dir = env::var("STATBOARD_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_DIR));
        let default_csv = env::var("STATBOARD_DEFAULT_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV));
        Self {
            bind_addr,
            public_dir,
            default_csv,
        }
    }
}
