// SPDX-License-Identifier: MIT

//! JWT session token tests.
//!
//! These tests verify that tokens created by the auth routes can be decoded
//! by the auth middleware, catching compatibility issues early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use onroute::middleware::auth::{create_jwt, Claims};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    // A token created by the signup/login handlers must decode with the
    // middleware's Claims struct and algorithm. If either side changes,
    // this test fails first.
    let token = create_jwt("user-abc123", "ada@example.com", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "user-abc123");
    assert_eq!(token_data.claims.email, "ada@example.com");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_rejects_wrong_key() {
    let token = create_jwt("user-abc123", "ada@example.com", SIGNING_KEY).unwrap();

    let wrong_key = DecodingKey::from_secret(b"another_signing_key_32_bytes!!!!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &wrong_key, &validation).is_err());
}

#[test]
fn test_jwt_expiration_is_seven_days() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("user-abc123", "ada@example.com", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Sessions last 7 days, same as the cookie Max-Age
    assert!(
        token_data.claims.exp > now + 86400 * 6,
        "Token expiration should be ~7 days in the future"
    );
    assert!(
        token_data.claims.exp <= now + 86400 * 7 + 60,
        "Token expiration should not exceed 7 days"
    );
}
