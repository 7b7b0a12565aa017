use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const OTP_LENGTH: usize = 6;
pub const OTP_TTL_MINUTES: i64 = 15;

/// The only rejection reason ever reported. Wrong code, wrong number,
/// expired and already used all look the same to the caller.
pub const INVALID_OR_EXPIRED: &str = "invalid_or_expired";

/// A one-time code tied to an appointment and the phone number it was sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    pub owner_id: Uuid,
    pub code: String,
    pub contact_value: String,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpState {
    Issued,
    Verified,
    Expired,
}

impl OneTimeCode {
    pub fn new(owner_id: Uuid, code: String, contact_value: String, now: DateTime<Utc>) -> Self {
        Self {
            owner_id,
            code,
            contact_value,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
            verified: false,
            created_at: now,
        }
    }

    pub fn state(&self, now: DateTime<Utc>) -> OtpState {
        if self.verified {
            OtpState::Verified
        } else if now >= self.expires_at {
            OtpState::Expired
        } else {
            OtpState::Issued
        }
    }

    /// True only for an unused, unexpired record whose code and contact both
    /// match exactly.
    pub fn accepts(&self, code: &str, contact_value: &str, now: DateTime<Utc>) -> bool {
        self.state(now) == OtpState::Issued
            && self.code == code
            && self.contact_value == contact_value
    }
}

/// Result of issuing a code. The code itself is for the delivery channel
/// only and is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedCode {
    pub owner_id: Uuid,
    #[serde(skip_serializing)]
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl OtpValidation {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected() -> Self {
        Self {
            valid: false,
            reason: Some(INVALID_OR_EXPIRED.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueOtpRequest {
    pub appointment_id: Uuid,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub appointment_id: Uuid,
    pub code: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(now: DateTime<Utc>) -> OneTimeCode {
        OneTimeCode::new(Uuid::new_v4(), "123456".to_string(), "0771234567".to_string(), now)
    }

    #[test]
    fn test_new_record_expires_after_fifteen_minutes() {
        let now = Utc::now();
        let otp = record(now);

        assert_eq!(otp.expires_at - otp.created_at, Duration::minutes(15));
        assert!(!otp.verified);
        assert_eq!(otp.state(now), OtpState::Issued);
    }

    #[test]
    fn test_state_transitions() {
        let now = Utc::now();
        let mut otp = record(now);

        assert_eq!(otp.state(now + Duration::minutes(15)), OtpState::Expired);

        otp.verified = true;
        assert_eq!(otp.state(now), OtpState::Verified);
    }

    #[test]
    fn test_accepts_requires_exact_match() {
        let now = Utc::now();
        let otp = record(now);

        assert!(otp.accepts("123456", "0771234567", now));
        assert!(!otp.accepts("123457", "0771234567", now));
        assert!(!otp.accepts("123456", "0771234568", now));
        assert!(!otp.accepts("123456", "0771234567", now + Duration::minutes(16)));
    }

    #[test]
    fn test_rejection_reason_is_uniform() {
        let json = serde_json::to_value(OtpValidation::rejected()).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["reason"], "invalid_or_expired");

        let json = serde_json::to_value(OtpValidation::accepted()).unwrap();
        assert_eq!(json["valid"], true);
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_issued_code_never_serializes_code() {
        let issued = IssuedCode {
            owner_id: Uuid::new_v4(),
            code: "654321".to_string(),
            expires_at: Utc::now(),
        };

        let json = serde_json::to_value(&issued).unwrap();
        assert!(json.get("code").is_none());
    }
}
