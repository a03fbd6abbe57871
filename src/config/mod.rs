// Configuration module entry point
// Layered loading: built-in defaults, optional TOML file, environment overrides

mod state;
mod types;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::ServerState;
pub use types::{Config, LoggingConfig, RoutesConfig, ServerConfig};

impl Config {
    /// Load configuration from `vidserve.toml` (if present) and
    /// `VIDSERVE_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("vidserve")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("VIDSERVE"))
            .set_default("server.host", "localhost")?
            .set_default("server.port", 3000)?
            .set_default("logging.access_log", true)?
            .set_default("routes.demo_page", "/apps/demo/demo.html")?
            .set_default("routes.index_files", vec!["index.html", "index.htm"])?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `host:port` to a bindable socket address
    ///
    /// Goes through the resolver so hostnames like `localhost` work, not just
    /// IP literals.
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("could not resolve address for {}", self.server.host),
                )
            })
    }

    /// Resolve and canonicalize the serving root
    ///
    /// Uses the configured `server.root`, or the directory containing the
    /// running executable when unset. The canonical form anchors the
    /// path-containment check in the file handler.
    pub fn resolve_root(&self) -> io::Result<PathBuf> {
        let base = match &self.server.root {
            Some(path) => path.clone(),
            None => {
                let exe = std::env::current_exe()?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        "executable has no parent directory",
                    )
                })?
            }
        };
        base.canonicalize()
    }

    /// Base URL shown in the startup banner
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.root, None);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.routes.demo_page, "/apps/demo/demo.html");
        assert_eq!(cfg.routes.index_files, vec!["index.html", "index.htm"]);
    }

    #[test]
    fn test_socket_addr_resolves_localhost() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_base_url() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:3000");
    }
}
