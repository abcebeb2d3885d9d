// ABOUTME: Startup helpers: listener settings with a fallback, and a bind that walks past busy ports.
// ABOUTME: The listener that wins the probe is the one served on, so there is no close/rebind window.

use std::io::ErrorKind;

use enroll_core::{DEFAULT_WEB_HOST, WebConfig};
use enroll_store::ConfigStore;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors that stop the service from getting a listener.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("cannot listen on {host}:{port}: {source}")]
    Io {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[error("every port from {start} upward is busy on {host}")]
    Exhausted { host: String, start: u16 },
}

/// Listener settings for startup. If the configuration cannot be loaded the
/// defaults are used, so the editor still comes up and can repair the file.
pub fn startup_web_config(store: &ConfigStore) -> WebConfig {
    let mut web = match store.load() {
        Ok(cfg) => cfg.web,
        Err(e) => {
            tracing::warn!(
                "cannot read {}, listening with defaults: {}",
                store.path().display(),
                e
            );
            WebConfig::default()
        }
    };
    if web.host.trim().is_empty() {
        web.host = DEFAULT_WEB_HOST.to_string();
    }
    web
}

/// Bind `host:port`, moving to the next port while the current one is taken.
/// Returns the listener together with the port it ended up on.
pub async fn bind_with_fallback(host: &str, port: u16) -> Result<(TcpListener, u16), BindError> {
    let mut candidate = port;
    loop {
        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => {
                let bound = listener.local_addr().map(|a| a.port()).unwrap_or(candidate);
                return Ok((listener, bound));
            }
            Err(e) if matches!(e.kind(), ErrorKind::AddrInUse | ErrorKind::PermissionDenied) => {
                tracing::debug!("port {} unavailable on {}: {}", candidate, host, e);
                candidate = candidate.checked_add(1).ok_or_else(|| BindError::Exhausted {
                    host: host.to_string(),
                    start: port,
                })?;
            }
            Err(source) => {
                return Err(BindError::Io {
                    host: host.to_string(),
                    port: candidate,
                    source,
                });
            }
        }
    }
}

/// The URL an operator should open to reach the editor.
pub fn editor_url(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::EnrollConfig;

    #[tokio::test]
    async fn busy_port_moves_to_a_higher_one() {
        let occupied = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let busy = occupied.local_addr().unwrap().port();

        let (listener, port) = bind_with_fallback("127.0.0.1", busy).await.unwrap();

        assert!(port > busy, "expected a port above {busy}, got {port}");
        assert_eq!(listener.local_addr().unwrap().port(), port);
    }

    #[tokio::test]
    async fn free_port_is_used_as_is() {
        let probe = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let free = probe.local_addr().unwrap().port();
        drop(probe);

        let (_listener, port) = bind_with_fallback("127.0.0.1", free).await.unwrap();

        assert_eq!(port, free);
    }

    #[test]
    fn unreadable_config_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("missing.json"));

        assert_eq!(startup_web_config(&store), WebConfig::default());
    }

    #[test]
    fn loaded_config_supplies_listener() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let mut cfg = EnrollConfig::default();
        cfg.web.host = "0.0.0.0".into();
        cfg.web.port = 9000;
        store.save(&cfg).unwrap();

        let web = startup_web_config(&store);
        assert_eq!(web.host, "0.0.0.0");
        assert_eq!(web.port, 9000);
    }

    #[test]
    fn stray_flag_keeps_configured_port_and_auth() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"bark":{"enabled":"true"},
                "web":{"port":7777,"auth":{"enabled":"1","username":"u","password":"p"}}}"#,
        )
        .unwrap();

        let web = startup_web_config(&ConfigStore::new(&path));

        assert_eq!(web.port, 7777);
        assert!(web.auth.is_enabled());
    }

    #[tokio::test]
    async fn last_port_busy_exhausts_the_range() {
        // Held if free; if something else already owns it, it is busy either way.
        let _held = TcpListener::bind(("127.0.0.1", u16::MAX)).await.ok();

        let err = bind_with_fallback("127.0.0.1", u16::MAX).await.unwrap_err();

        assert!(
            matches!(err, BindError::Exhausted { start: u16::MAX, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn blank_host_uses_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        let mut cfg = EnrollConfig::default();
        cfg.web.host = String::new();
        store.save(&cfg).unwrap();

        assert_eq!(startup_web_config(&store).host, DEFAULT_WEB_HOST);
    }

    #[test]
    fn editor_url_brackets_ipv6() {
        assert_eq!(editor_url("127.0.0.1", 6688), "http://127.0.0.1:6688");
        assert_eq!(editor_url("::1", 6688), "http://[::1]:6688");
    }
}
