//! Configuration parsing for the accelerator gateway.
//!
//! The runner reads its settings from a single JSON config file. The
//! top-level structure contains logging metadata and a `channel` block
//! selecting the page backend and poll parameters.
//!
//! # Example config
//!
//! ```json
//! {
//!   "module_name": "axl-runner",
//!   "log_path": "/tmp/log",
//!   "channel": {
//!     "mode": "xdma",
//!     "device_path": "/dev/xdma0",
//!     "poll": { "timeout_ms": 1000, "spin_iters": 10000, "sleep_us": 10 }
//!   }
//! }
//! ```

use serde::Deserialize;

/// Default device node for the real (XDMA) backend.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/xdma0";

/// Top-level application config, deserialized from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Module name (used as the log file prefix).
    pub module_name: Option<String>,

    /// Directory for daily-rotating log files.
    pub log_path: Option<String>,

    /// Register channel configuration.
    pub channel: ChannelConfig,
}

/// Which backend provides the device page.
///
/// Selected once at startup by the factory — the protocol engine itself never
/// branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    /// Self-initialized heap page with an in-process peer model.
    Sim,
    /// Memory-mapped window of a real device node.
    Xdma,
}

/// Register channel configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// Backend selection.
    pub mode: ChannelMode,

    /// Device node path for `xdma` mode (default: `/dev/xdma0`).
    pub device_path: Option<String>,

    /// Handshake poll parameters. All fields optional.
    pub poll: Option<PollSettings>,
}

impl ChannelConfig {
    /// A simulated-mode config with all defaults — used when the runner is
    /// started without a config file.
    pub fn simulated() -> Self {
        Self { mode: ChannelMode::Sim, device_path: None, poll: None }
    }

    /// Returns the effective device path for `xdma` mode.
    pub fn effective_device_path(&self) -> &str {
        self.device_path.as_deref().unwrap_or(DEFAULT_DEVICE_PATH)
    }
}

/// Poll parameters for the control/status handshake.
///
/// Every wait is bounded — there is deliberately no way to configure an
/// infinite timeout.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    /// Deadline for a single handshake (default: 1000 ms).
    pub timeout_ms: Option<u64>,

    /// Number of busy-spin reads before the poll starts sleeping
    /// (default: 10_000).
    pub spin_iters: Option<u32>,

    /// Sleep between polls after the spin phase (default: 10 µs).
    pub sleep_us: Option<u64>,
}

/// Load and parse a JSON config file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "channel": { "mode": "sim" } }"#).unwrap();
        assert_eq!(cfg.channel.mode, ChannelMode::Sim);
        assert_eq!(cfg.channel.effective_device_path(), DEFAULT_DEVICE_PATH);
        assert!(cfg.channel.poll.is_none());
    }

    #[test]
    fn parse_full() {
        let cfg: AppConfig = serde_json::from_str(
            r#"{
                "module_name": "axl-runner",
                "channel": {
                    "mode": "xdma",
                    "device_path": "/dev/xdma1",
                    "poll": { "timeout_ms": 250, "spin_iters": 500, "sleep_us": 50 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.channel.mode, ChannelMode::Xdma);
        assert_eq!(cfg.channel.effective_device_path(), "/dev/xdma1");
        let poll = cfg.channel.poll.unwrap();
        assert_eq!(poll.timeout_ms, Some(250));
        assert_eq!(poll.spin_iters, Some(500));
        assert_eq!(poll.sleep_us, Some(50));
    }

    #[test]
    fn unknown_mode_rejected() {
        let res: Result<AppConfig, _> =
            serde_json::from_str(r#"{ "channel": { "mode": "pcie" } }"#);
        assert!(res.is_err());
    }
}
