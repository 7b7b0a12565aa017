use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_utils::contact::{is_valid_contact, mask_contact, normalize_contact};

use crate::error::OtpError;
use crate::models::{IssuedCode, OneTimeCode, OtpValidation, OTP_LENGTH};
use crate::services::notification::CodeSender;
use crate::services::store::OtpStore;

const MAX_ISSUE_ATTEMPTS: usize = 5;

pub struct OtpService {
    store: Arc<dyn OtpStore>,
    sender: Arc<dyn CodeSender>,
}

impl OtpService {
    pub fn new(store: Arc<dyn OtpStore>, sender: Arc<dyn CodeSender>) -> Self {
        Self { store, sender }
    }

    /// Create a fresh code for the appointment, store it unverified with a
    /// 15 minute expiry and hand it to the SMS channel. A failed delivery is
    /// logged; the code stays valid.
    pub async fn issue(&self, owner_id: Uuid, contact_value: &str) -> Result<IssuedCode, OtpError> {
        let contact = normalize_contact(contact_value);
        if !is_valid_contact(&contact) {
            return Err(OtpError::InvalidContact(mask_contact(&contact)));
        }

        let mut stored = None;
        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let record = OneTimeCode::new(owner_id, generate_code(OTP_LENGTH), contact.clone(), Utc::now());
            if self.store.insert(&record).await? {
                stored = Some(record);
                break;
            }
            debug!("Code collision for appointment {} on attempt {}", owner_id, attempt);
        }

        let record = stored.ok_or(OtpError::CodeSpaceExhausted {
            attempts: MAX_ISSUE_ATTEMPTS,
        })?;

        if let Err(e) = self.sender.send_code(&contact, &record.code).await {
            warn!(
                "Verification code for appointment {} could not be delivered to {}: {}",
                owner_id,
                mask_contact(&contact),
                e
            );
        }

        info!(
            "Issued verification code for appointment {} to {}, expires at {}",
            owner_id,
            mask_contact(&contact),
            record.expires_at
        );

        Ok(IssuedCode {
            owner_id,
            code: record.code,
            expires_at: record.expires_at,
        })
    }

    /// Accept the code at most once. Code and phone must match the stored
    /// record exactly as issued; every failure, whatever its cause, yields
    /// the same `invalid_or_expired` rejection.
    pub async fn validate(
        &self,
        owner_id: Uuid,
        code: &str,
        contact_value: &str,
    ) -> Result<OtpValidation, OtpError> {
        if !is_well_formed(code) || contact_value.is_empty() {
            debug!("Rejected malformed verification attempt for appointment {}", owner_id);
            return Ok(OtpValidation::rejected());
        }

        if self.store.consume(owner_id, code, contact_value, Utc::now()).await? {
            info!("Appointment {} verified via one-time code", owner_id);
            Ok(OtpValidation::accepted())
        } else {
            debug!("Verification attempt for appointment {} rejected", owner_id);
            Ok(OtpValidation::rejected())
        }
    }
}

fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}
