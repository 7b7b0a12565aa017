use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub redis_url: Option<String>,
    pub sms_gateway_url: Option<String>,
    pub sms_gateway_token: Option<String>,
    pub sms_sender_id: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            redis_url: env::var("REDIS_URL").ok().or_else(|| {
                warn!("REDIS_URL not set, falling back to redis://localhost:6379");
                None
            }),
            sms_gateway_url: env::var("SMS_GATEWAY_URL").ok().filter(|v| !v.is_empty()),
            sms_gateway_token: env::var("SMS_GATEWAY_TOKEN").ok().filter(|v| !v.is_empty()),
            sms_sender_id: env::var("SMS_SENDER_ID")
                .unwrap_or_else(|_| "DentalClinic".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| match p.parse::<u16>() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("PORT '{}' is not a valid port, using 3000", p);
                        None
                    }
                })
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        if !config.is_sms_configured() {
            warn!("SMS gateway not configured - one-time codes will only be logged as sent");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_service_key.is_empty()
    }

    pub fn is_sms_configured(&self) -> bool {
        self.sms_gateway_url.is_some() && self.sms_gateway_token.is_some()
    }

    pub fn redis_url(&self) -> String {
        self.redis_url
            .clone()
            .unwrap_or_else(|| "redis://localhost:6379".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "service-key".to_string(),
            redis_url: None,
            sms_gateway_url: None,
            sms_gateway_token: None,
            sms_sender_id: "DentalClinic".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_redis_url_defaults_to_localhost() {
        let config = base_config();
        assert_eq!(config.redis_url(), "redis://localhost:6379");
    }

    #[test]
    fn test_sms_requires_url_and_token() {
        let mut config = base_config();
        config.sms_gateway_url = Some("https://sms.example.com/send".to_string());
        assert!(!config.is_sms_configured());

        config.sms_gateway_token = Some("token".to_string());
        assert!(config.is_sms_configured());
    }

    #[test]
    fn test_is_configured_needs_supabase() {
        let mut config = base_config();
        assert!(config.is_configured());

        config.supabase_service_key = String::new();
        assert!(!config.is_configured());
    }
}
