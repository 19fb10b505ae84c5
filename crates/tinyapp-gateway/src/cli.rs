use crate::session::{PlainCookieSession, SessionAccessor, SignedCookieSession};
use anyhow::bail;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_cookies::Key;
use tracing::warn;

pub const LISTEN_ADDR_ENV: &str = "TINYAPP_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "TINYAPP_PUBLIC_BASE_URL";
pub const SESSION_MODE_ENV: &str = "TINYAPP_SESSION_MODE";
pub const SESSION_SECRET_ENV: &str = "TINYAPP_SESSION_SECRET";
pub const LOG_FORMAT_ENV: &str = "TINYAPP_LOG_FORMAT";
pub const SEED_DEMO_ENV: &str = "TINYAPP_SEED_DEMO";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Minimum secret length accepted for signing session cookies.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionModeArg {
    #[value(name = "signed")]
    Signed,
    #[value(name = "plain")]
    Plain,
}

impl Display for SessionModeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionModeArg::Signed => write!(f, "signed"),
            SessionModeArg::Plain => write!(f, "plain"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinyapp-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base used when rendering short links, e.g. `https://tiny.example`.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = SESSION_MODE_ENV,
        value_enum,
        default_value_t = SessionModeArg::Signed
    )]
    pub session_mode: SessionModeArg,

    /// Key material for signed sessions, at least 64 bytes. A random key is
    /// used when absent.
    #[arg(long, env = SESSION_SECRET_ENV, hide_env_values = true)]
    pub session_secret: Option<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Starts with two anonymous demo links.
    #[arg(long, env = SEED_DEMO_ENV)]
    pub seed_demo: bool,
}

impl CLI {
    pub fn session_accessor(&self) -> anyhow::Result<Arc<dyn SessionAccessor>> {
        match self.session_mode {
            SessionModeArg::Plain => {
                warn!("plain session cookies are forgeable, use signed sessions outside development");
                Ok(Arc::new(PlainCookieSession))
            }
            SessionModeArg::Signed => match &self.session_secret {
                Some(secret) => {
                    if secret.len() < MIN_SESSION_SECRET_LEN {
                        bail!(
                            "session secret must be at least {MIN_SESSION_SECRET_LEN} bytes, got {}",
                            secret.len()
                        );
                    }
                    Ok(Arc::new(SignedCookieSession::new(Key::from(
                        secret.as_bytes(),
                    ))))
                }
                None => {
                    warn!("no session secret configured, sessions will not survive a restart");
                    Ok(Arc::new(SignedCookieSession::ephemeral()))
                }
            },
        }
    }
}
