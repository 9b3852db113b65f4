//! Tests for configuration validators

#[cfg(test)]
mod tests {
    use crate::config::Validate;
    use crate::config::models::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ServerConfig::default().validate().is_ok());
        assert!(AgentConfig::default().validate().is_ok());
        assert!(DatabaseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_server_address_must_have_port() {
        let config = ServerConfig {
            address: "localhost".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            address: "http://127.0.0.1:9090/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_agent_rejects_zero_workers() {
        let config = AgentConfig {
            rate_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_agent_rejects_zero_intervals() {
        let config = AgentConfig {
            poll_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_settings_bounds() {
        let mut retry = RetrySettings::delivery();
        assert!(retry.validate().is_ok());

        retry.max_backoff_ms = Some(10);
        assert!(retry.validate().is_err());

        retry.max_backoff_ms = None;
        retry.attempts = 0;
        assert!(retry.validate().is_err());
    }

    #[test]
    fn test_check_maps_to_config_error() {
        let config = AgentConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        let err = config.check("Agent").unwrap_err();
        assert!(err.to_string().contains("Agent config error"));
    }
}
