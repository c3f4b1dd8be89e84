use clap::Parser;
use url::Url;

/// IPL cricket dashboard service
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-dashboard", version, about)]
pub struct Config {
    /// Aggregated IPL data endpoint returning the snapshot JSON
    #[arg(
        long,
        env = "FEED_URL",
        default_value = "http://127.0.0.1:3000/api/ipl-data"
    )]
    pub feed_url: String,

    /// Snapshot polling interval in seconds
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value = "30")]
    pub poll_interval_secs: u64,

    /// Delay between successive notification toasts in milliseconds
    #[arg(long, env = "TOAST_STAGGER_MS", default_value = "200")]
    pub toast_stagger_ms: u64,

    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Grant desktop-style notifications (otherwise the permission request
    /// resolves to denied and only toasts are issued)
    #[arg(long, env = "DESKTOP_NOTIFICATIONS", default_value = "false")]
    pub desktop_notifications: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if Url::parse(&self.feed_url).is_err() {
            anyhow::bail!("feed_url is not a valid URL: {}", self.feed_url);
        }
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            feed_url: "http://127.0.0.1:3000/api/ipl-data".to_string(),
            poll_interval_secs: 30,
            toast_stagger_ms: 200,
            dashboard_addr: "0.0.0.0:8080".to_string(),
            desktop_notifications: false,
        }
    }

    #[test]
    fn default_shape_validates() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_malformed_feed_url() {
        let mut config = base();
        config.feed_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let mut config = base();
        config.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }
}
