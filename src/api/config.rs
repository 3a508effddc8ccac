use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ApiConfig {
    /// Interface the HTTP server binds to
    #[clap(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP server listens on
    #[clap(long, env, default_value_t = 5000)]
    pub port: u16,

    /// Directory holding the browser front end (index.html, styles.css, script.js)
    #[clap(long, env)]
    pub static_dir: Option<PathBuf>,
}

impl ApiConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}
