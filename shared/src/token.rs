//! Bearer token codec.
//!
//! Decodes the claims embedded in a JWT-shaped bearer token so the console
//! can read role, identity and expiry locally. This is a display and
//! UI-gating hint only: no signature verification happens here, and the
//! server rejects invalid or expired tokens on every request regardless.

use crate::date::Timestamp;
use crate::AdminRole;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

// =========================================================
// Errors
// =========================================================

/// Local decode failure. Treated upstream as "not authenticated",
/// never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTokenError {
    /// The token string is empty.
    Missing,
    /// Not a three-segment dotted token.
    BadStructure,
    /// The payload segment is not valid base64url.
    BadEncoding(String),
    /// The payload decoded but is not the expected JSON object.
    BadPayload(String),
}

impl core::fmt::Display for MalformedTokenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MalformedTokenError::Missing => write!(f, "token is missing"),
            MalformedTokenError::BadStructure => write!(f, "token is not structurally valid"),
            MalformedTokenError::BadEncoding(msg) => {
                write!(f, "token payload is not valid base64url: {}", msg)
            }
            MalformedTokenError::BadPayload(msg) => {
                write!(f, "token payload is not valid claims JSON: {}", msg)
            }
        }
    }
}

impl std::error::Error for MalformedTokenError {}

// =========================================================
// Claims
// =========================================================

/// Claims embedded in the bearer token.
///
/// Never stored independently: always recomputed from the current token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Subject identity (the admin's username).
    #[serde(default)]
    pub sub: String,
    /// The admin's record id, used for the self-deletion pre-check.
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub role: AdminRole,
    /// Expiry, unix seconds.
    #[serde(default)]
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> Timestamp {
        Timestamp::from_secs(self.exp)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at() <= now
    }
}

/// Decode the claims segment of a bearer token.
///
/// Pure function over the string; no network, no trust decision.
pub fn decode(token: &str) -> Result<Claims, MalformedTokenError> {
    if token.is_empty() {
        return Err(MalformedTokenError::Missing);
    }

    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(MalformedTokenError::BadStructure);
    };

    // Some issuers pad the segment even though JWT forbids it.
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| MalformedTokenError::BadEncoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| MalformedTokenError::BadPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned token carrying the given JSON payload.
    pub(crate) fn fake_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn decodes_role_identity_and_expiry() {
        let token = fake_token(r#"{"sub":"root","id":7,"role":"super_admin","exp":1900000000}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.sub, "root");
        assert_eq!(claims.id, 7);
        assert_eq!(claims.role, AdminRole::SuperAdmin);
        assert_eq!(claims.expires_at(), Timestamp::from_secs(1_900_000_000));
    }

    #[test]
    fn missing_claims_fall_back_to_defaults() {
        let token = fake_token(r#"{"exp":123}"#);
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, AdminRole::Unknown);
        assert_eq!(claims.sub, "");
    }

    #[test]
    fn rejects_empty_token() {
        assert_eq!(decode("").unwrap_err(), MalformedTokenError::Missing);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(
            decode("onlyonesegment").unwrap_err(),
            MalformedTokenError::BadStructure
        );
        assert_eq!(
            decode("a.b").unwrap_err(),
            MalformedTokenError::BadStructure
        );
        assert_eq!(
            decode("a.b.c.d").unwrap_err(),
            MalformedTokenError::BadStructure
        );
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(matches!(
            decode("head.!!not-base64!!.sig").unwrap_err(),
            MalformedTokenError::BadEncoding(_)
        ));
    }

    #[test]
    fn rejects_non_json_payload() {
        let body = URL_SAFE_NO_PAD.encode(b"plain text");
        assert!(matches!(
            decode(&format!("h.{body}.s")).unwrap_err(),
            MalformedTokenError::BadPayload(_)
        ));
    }

    #[test]
    fn tolerates_padded_payloads() {
        let body = URL_SAFE_NO_PAD.encode(br#"{"exp":5}"#);
        let token = format!("h.{body}==.s");
        assert_eq!(decode(&token).unwrap().exp, 5);
    }

    #[test]
    fn maximal_expiry_is_far_future_not_expired() {
        // exp values past i64::MAX / 1000 must not wrap when scaled to
        // milliseconds; the token simply never expires locally.
        let token = fake_token(r#"{"exp":9223372036854775807}"#);
        let claims = decode(&token).unwrap();
        assert!(!claims.is_expired(Timestamp::from_secs(1_900_000_000)));
    }

    #[test]
    fn expiry_comparison_is_half_open() {
        let claims = decode(&fake_token(r#"{"exp":100}"#)).unwrap();
        assert!(claims.is_expired(Timestamp::from_secs(100)));
        assert!(claims.is_expired(Timestamp::from_secs(101)));
        assert!(!claims.is_expired(Timestamp::from_secs(99)));
    }
}
