use std::sync::Arc;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub redis_url: Option<String>,
    pub sms_gateway_url: Option<String>,
    pub sms_gateway_token: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
            redis_url: std::env::var("REDIS_TEST_URL").ok(),
            sms_gateway_url: None,
            sms_gateway_token: None,
        }
    }
}

impl TestConfig {
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_sms_gateway(mut self, url: &str, token: &str) -> Self {
        self.sms_gateway_url = Some(url.to_string());
        self.sms_gateway_token = Some(token.to_string());
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            redis_url: self.redis_url.clone(),
            sms_gateway_url: self.sms_gateway_url.clone(),
            sms_gateway_token: self.sms_gateway_token.clone(),
            sms_sender_id: "DentalClinic".to_string(),
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn active_dentists_response(ids: &[Uuid]) -> serde_json::Value {
        json!(ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>())
    }

    pub fn clinic_event_response(id: Uuid, code: &str, title: &str) -> serde_json::Value {
        json!([{
            "id": id,
            "code": code,
            "title": title,
            "description": null,
            "start_date": "2026-12-24T08:00:00Z",
            "end_date": "2026-12-26T18:00:00Z",
            "is_published": true,
            "is_deleted": false,
            "created_by_code": "ADM-001",
            "created_at": "2026-10-01T00:00:00Z"
        }])
    }

    pub fn schedule_block_response(dentist_ref: Uuid, reason_ref: Uuid, label: &str) -> serde_json::Value {
        json!([{
            "id": Uuid::new_v4(),
            "dentist_ref": dentist_ref,
            "start": "2026-12-24T08:00:00Z",
            "end": "2026-12-26T18:00:00Z",
            "reason_kind": "event",
            "reason_ref": reason_ref,
            "label": label,
            "created_by_code": "ADM-001",
            "created_at": "2026-10-01T00:00:00Z"
        }])
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::with_supabase_url("http://mock");
        let app_config = config.to_app_config();

        assert_eq!(app_config.supabase_url, "http://mock");
        assert_eq!(app_config.supabase_service_key, "test-service-key");
        assert!(!app_config.is_sms_configured());
    }

    #[test]
    fn test_active_dentists_response_shape() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let body = MockSupabaseResponses::active_dentists_response(&ids);

        assert_eq!(body.as_array().map(|a| a.len()), Some(2));
        assert_eq!(body[0]["id"], json!(ids[0]));
    }
}
