//! Bearer token payload decoding.
//!
//! The backend issues JWTs; we never verify signatures client-side, we only
//! read the payload claims to recover the user id for chat routing.

use base64::engine::general_purpose;

/// Common error type for token decoding
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token payload has no user id")]
    MissingUserId,
}

/// Decode the claims object from a JWT without verifying the signature
pub fn decode_claims(token: &str) -> Result<serde_json::Value, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| TokenError::Malformed("missing payload segment".to_string()))?;

    let bytes = base64::Engine::decode(&general_purpose::URL_SAFE_NO_PAD, payload)
        .map_err(|e| TokenError::Malformed(format!("payload is not base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("payload is not JSON: {}", e)))
}

/// Recover the numeric user id from a token.
///
/// Checks `user_id`, then `sub`, then `id`; accepts either a JSON number or
/// a numeric string since the backend has shipped both over time.
pub fn user_id_from_token(token: &str) -> Result<i64, TokenError> {
    let claims = decode_claims(token)?;

    ["user_id", "sub", "id"]
        .iter()
        .filter_map(|key| claims.get(key))
        .find_map(claim_as_id)
        .ok_or(TokenError::MissingUserId)
}

fn claim_as_id(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_token(claims: serde_json::Value) -> String {
        let header =
            base64::Engine::encode(&general_purpose::URL_SAFE_NO_PAD, r#"{"alg":"HS256"}"#);
        let payload =
            base64::Engine::encode(&general_purpose::URL_SAFE_NO_PAD, claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_user_id_claim() {
        let token = make_token(json!({"user_id": 42, "email": "a@b.com"}));
        assert_eq!(user_id_from_token(&token).expect("decode"), 42);
    }

    #[test]
    fn test_sub_claim_as_string() {
        let token = make_token(json!({"sub": "17"}));
        assert_eq!(user_id_from_token(&token).expect("decode"), 17);
    }

    #[test]
    fn test_id_claim_fallback() {
        let token = make_token(json!({"id": 3}));
        assert_eq!(user_id_from_token(&token).expect("decode"), 3);
    }

    #[test]
    fn test_claim_priority_order() {
        let token = make_token(json!({"user_id": 1, "sub": 2, "id": 3}));
        assert_eq!(user_id_from_token(&token).expect("decode"), 1);
    }

    #[test]
    fn test_non_numeric_sub_falls_through() {
        let token = make_token(json!({"sub": "not-a-number", "id": 9}));
        assert_eq!(user_id_from_token(&token).expect("decode"), 9);
    }

    #[test]
    fn test_malformed_token_is_an_error_not_a_panic() {
        assert!(matches!(
            user_id_from_token("garbage"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            user_id_from_token("a.%%%.c"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            user_id_from_token(""),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_payload_without_id_claims() {
        let token = make_token(json!({"email": "a@b.com"}));
        assert!(matches!(
            user_id_from_token(&token),
            Err(TokenError::MissingUserId)
        ));
    }
}
