//! Backend factory — turns a [`ChannelConfig`] into a live channel.
//!
//! The backend is selected here, once, at startup. Protocol code above the
//! [`RegisterPage`] trait never branches on the mode again.

use axl_core::config::{ChannelConfig, ChannelMode};
use axl_core::error::AxlError;
use tracing::info;

use crate::channel::{PollConfig, RegisterChannel};
use crate::page::RegisterPage;
use crate::sim::SimPage;

/// A channel over whichever backend the config selects.
pub type DynChannel = RegisterChannel<Box<dyn RegisterPage + Send>>;

/// Acquire a page per the config and wrap it in a channel.
pub fn open_channel(config: &ChannelConfig) -> Result<DynChannel, AxlError> {
    let poll = config.poll.as_ref().map(PollConfig::from).unwrap_or_default();

    let page: Box<dyn RegisterPage + Send> = match config.mode {
        ChannelMode::Sim => {
            info!("opening simulated register channel");
            Box::new(SimPage::new()?)
        }
        #[cfg(unix)]
        ChannelMode::Xdma => {
            let path = config.effective_device_path();
            info!("opening XDMA register channel on {path}");
            Box::new(crate::xdma::XdmaPage::open(path)?)
        }
        #[cfg(not(unix))]
        ChannelMode::Xdma => {
            return Err(AxlError::DeviceUnavailable(
                "xdma mode requires a unix target".into(),
            ));
        }
    };

    Ok(RegisterChannel::new(page, poll))
}

#[cfg(test)]
mod tests {
    use axl_core::config::PollSettings;

    use super::*;

    #[test]
    fn sim_mode_opens() {
        let channel = open_channel(&ChannelConfig::simulated()).unwrap();
        assert_eq!(channel.latency_ns(), 100.0);
    }

    #[test]
    fn poll_settings_applied_with_defaults() {
        let settings =
            PollSettings { timeout_ms: Some(250), spin_iters: None, sleep_us: Some(5) };
        let poll = PollConfig::from(&settings);
        assert_eq!(poll.timeout, std::time::Duration::from_millis(250));
        assert_eq!(poll.spin_iters, PollConfig::default().spin_iters);
        assert_eq!(poll.sleep, std::time::Duration::from_micros(5));
    }

    #[cfg(unix)]
    #[test]
    fn xdma_mode_missing_device() {
        let config = ChannelConfig {
            mode: ChannelMode::Xdma,
            device_path: Some("/dev/axl-missing".into()),
            poll: None,
        };
        match open_channel(&config) {
            Err(AxlError::DeviceUnavailable(_)) => {}
            Err(other) => panic!("expected DeviceUnavailable, got {other}"),
            Ok(_) => panic!("open_channel succeeded on a missing device"),
        }
    }
}
