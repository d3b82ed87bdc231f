//! Signed `state` values for the Discord OAuth round trip.
//!
//! A state is `{nonce}.{hex(hmac_sha256(secret, nonce))}`, so the callback can
//! check it was minted here without keeping server-side storage.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use ulid::Ulid;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, PartialEq)]
pub enum Error {
    Malformed,
    InvalidSignature,
}

fn mac(secret: &str) -> HmacSha256 {
    // HMAC accepts keys of any length
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

pub fn generate(secret: &str) -> String {
    let nonce = Ulid::new().to_string();
    let mut mac = mac(secret);
    mac.update(nonce.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{}.{}", nonce, signature)
}

pub fn verify(secret: &str, state: &str) -> Result<(), Error> {
    let (nonce, signature) = state.split_once('.').ok_or(Error::Malformed)?;
    let signature = hex::decode(signature).map_err(|_| Error::Malformed)?;

    let mut mac = mac(secret);
    mac.update(nonce.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| Error::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_state_verifies_with_same_secret() {
        let state = generate("secret");
        assert_eq!(verify("secret", &state), Ok(()));
    }

    #[test]
    fn state_from_another_secret_is_rejected() {
        let state = generate("secret");
        assert_eq!(verify("other", &state), Err(Error::InvalidSignature));
    }

    #[test]
    fn tampered_nonce_is_rejected() {
        let state = generate("secret");
        let (_, signature) = state.split_once('.').unwrap();
        let forged = format!("{}.{}", Ulid::new(), signature);
        assert_eq!(verify("secret", &forged), Err(Error::InvalidSignature));
    }

    #[test]
    fn malformed_state_is_rejected() {
        assert_eq!(verify("secret", "no-dot-here"), Err(Error::Malformed));
        assert_eq!(verify("secret", "nonce.not-hex"), Err(Error::Malformed));
    }
}
