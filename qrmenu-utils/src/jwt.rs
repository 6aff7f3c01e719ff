//! JSON Web Token (JWT) utilities for encoding and decoding tokens.
use jsonwebtoken::{
    decode, encode, errors::Error as JwtError, Algorithm, DecodingKey, EncodingKey, Header,
    TokenData, Validation,
};
use serde::{de::DeserializeOwned, Serialize};

#[inline]
pub fn encode_jwt<T: Serialize>(
    claims: &T,
    secret: &[u8],
    algorithm: Option<Algorithm>,
) -> Result<String, JwtError> {
    let header = Header::new(algorithm.unwrap_or(Algorithm::HS256));
    encode(&header, claims, &EncodingKey::from_secret(secret))
}

/// Decodes and validates `token`. `exp` is always checked; pass `issuer` to
/// pin the `iss` claim as well.
#[inline]
pub fn decode_jwt<T: DeserializeOwned>(
    token: &str,
    secret: &[u8],
    issuer: Option<&str>,
) -> Result<TokenData<T>, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }
    decode::<T>(token, &DecodingKey::from_secret(secret), &validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        iss: String,
        exp: i64,
    }

    fn claims(exp_offset: i64) -> TestClaims {
        TestClaims {
            sub: "admin@localhost".into(),
            iss: "qrmenu".into(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
        }
    }

    #[test]
    fn test_encode_then_decode() {
        let claims = claims(600);
        let token = encode_jwt(&claims, b"secret", None).unwrap();
        let data = decode_jwt::<TestClaims>(&token, b"secret", Some("qrmenu")).unwrap();
        assert_eq!(data.claims, claims);
    }

    #[test]
    fn test_rejects_wrong_secret_issuer_and_expired() {
        let token = encode_jwt(&claims(600), b"secret", None).unwrap();
        assert!(decode_jwt::<TestClaims>(&token, b"other", None).is_err());
        assert!(decode_jwt::<TestClaims>(&token, b"secret", Some("someone-else")).is_err());

        let expired = encode_jwt(&claims(-600), b"secret", None).unwrap();
        assert!(decode_jwt::<TestClaims>(&expired, b"secret", None).is_err());
    }
}
