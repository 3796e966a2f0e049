use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEX_LEN: usize = 64;

/// Lowercase hex HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac accepts any key length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Checks `signature` against the HMAC-SHA256 of `message`.
///
/// Only the canonical lowercase hex form is accepted, so two distinct strings
/// can never both verify. The digest comparison itself is constant-time.
pub fn verify_hmac_sha256_hex(key: &[u8], message: &[u8], signature: &str) -> bool {
    if signature.len() != SIGNATURE_HEX_LEN
        || !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return false;
    }

    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(message);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let signature = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
        assert!(verify_hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?", &signature));
    }

    #[test]
    fn test_rejects_uppercase_and_malformed() {
        let signature = hmac_sha256_hex(b"key", b"message");
        assert!(!verify_hmac_sha256_hex(b"key", b"message", &signature.to_uppercase()));
        assert!(!verify_hmac_sha256_hex(b"key", b"message", &signature[1..]));
        assert!(!verify_hmac_sha256_hex(b"key", b"message", ""));
        assert!(!verify_hmac_sha256_hex(b"key", b"message", &"z".repeat(64)));
    }

    #[test]
    fn test_rejects_wrong_key() {
        let signature = hmac_sha256_hex(b"key", b"message");
        assert!(!verify_hmac_sha256_hex(b"other", b"message", &signature));
    }
}
