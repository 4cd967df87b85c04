use crate::core::config::DigestAlgorithm;
use crate::core::errors::PayUError;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the signed transaction fields
pub const SIGNATURE_SEPARATOR: char = '~';

/// Signer trait for transaction signatures
///
/// Implementations must be pure: identical inputs always give the identical
/// digest and nothing outside the arguments and the signing key is consulted.
pub trait Signer: Send + Sync {
    /// Sign the ordered transaction fields and return a lowercase hex digest
    ///
    /// # Arguments
    /// * `merchant_id` - Merchant identifier
    /// * `reference_code` - Merchant reference of the order
    /// * `amount` - Decimal amount, used exactly as given
    /// * `currency` - ISO 4217 code
    fn sign(
        &self,
        merchant_id: &str,
        reference_code: &str,
        amount: &str,
        currency: &str,
    ) -> Result<String, PayUError>;
}

/// Canonical tilde-joined form of the signed fields
pub fn canonical_string(merchant_id: &str, reference_code: &str, amount: &str, currency: &str) -> String {
    [merchant_id, reference_code, amount, currency].join(&SIGNATURE_SEPARATOR.to_string())
}

/// Keyed digest signer over `merchantId~referenceCode~amount~currency`
///
/// `Md5` and `Sha256` prefix the API key to the canonical string, which is the
/// gateway's legacy scheme; `HmacSha256` keys the MAC with the API key instead.
pub struct DigestSigner {
    api_key: Secret<String>,
    algorithm: DigestAlgorithm,
}

impl DigestSigner {
    pub fn new(api_key: String, algorithm: DigestAlgorithm) -> Self {
        Self {
            api_key: Secret::new(api_key),
            algorithm,
        }
    }

    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl std::fmt::Debug for DigestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestSigner")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Signer for DigestSigner {
    fn sign(
        &self,
        merchant_id: &str,
        reference_code: &str,
        amount: &str,
        currency: &str,
    ) -> Result<String, PayUError> {
        let canonical = canonical_string(merchant_id, reference_code, amount, currency);
        let api_key = self.api_key.expose_secret();

        match self.algorithm {
            DigestAlgorithm::Md5 => {
                let keyed = format!("{}{}{}", api_key, SIGNATURE_SEPARATOR, canonical);
                Ok(hex::encode(Md5::digest(keyed.as_bytes())))
            }
            DigestAlgorithm::Sha256 => {
                let keyed = format!("{}{}{}", api_key, SIGNATURE_SEPARATOR, canonical);
                Ok(hex::encode(Sha256::digest(keyed.as_bytes())))
            }
            DigestAlgorithm::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(api_key.as_bytes()).map_err(|e| {
                    PayUError::ConfigurationError(format!("Invalid signing key: {}", e))
                })?;
                mac.update(canonical.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(algorithm: DigestAlgorithm) -> DigestSigner {
        DigestSigner::new("4Vj8eK4rloUd272L48hsrarnUA".to_string(), algorithm)
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(
            canonical_string("508029", "TestPayU", "3", "USD"),
            "508029~TestPayU~3~USD"
        );
    }

    #[test]
    fn test_md5_matches_gateway_reference_value() {
        // reference pair published with the gateway's sandbox credentials
        let digest = signer(DigestAlgorithm::Md5)
            .sign("508029", "TestPayU", "3", "USD")
            .unwrap();
        assert_eq!(digest, "ba9ffa71559580175585e45ce70b6c37");
    }

    #[test]
    fn test_sign_is_deterministic() {
        for algorithm in [
            DigestAlgorithm::Md5,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::HmacSha256,
        ] {
            let s = signer(algorithm);
            let a = s.sign("508029", "ref-1", "100.00", "COP").unwrap();
            let b = s.sign("508029", "ref-1", "100.00", "COP").unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_changing_any_input_changes_digest() {
        let s = signer(DigestAlgorithm::Md5);
        let base = s.sign("508029", "ref-1", "100.00", "COP").unwrap();
        let variants = [
            s.sign("508030", "ref-1", "100.00", "COP").unwrap(),
            s.sign("508029", "ref-2", "100.00", "COP").unwrap(),
            s.sign("508029", "ref-1", "100.0", "COP").unwrap(),
            s.sign("508029", "ref-1", "100.00", "USD").unwrap(),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let s = signer(DigestAlgorithm::Md5);
        let printed = format!("{:?}", s);
        assert!(!printed.contains("4Vj8eK4rloUd272L48hsrarnUA"));
        assert!(printed.contains("Md5"));
        assert_eq!(
            s.sign("508029", "TestPayU", "3", "USD").unwrap(),
            "ba9ffa71559580175585e45ce70b6c37"
        );
    }

    #[test]
    fn test_digest_lengths() {
        let md5 = signer(DigestAlgorithm::Md5).sign("1", "r", "1", "COP").unwrap();
        let sha = signer(DigestAlgorithm::Sha256).sign("1", "r", "1", "COP").unwrap();
        let hmac = signer(DigestAlgorithm::HmacSha256).sign("1", "r", "1", "COP").unwrap();
        assert_eq!(md5.len(), 32);
        assert_eq!(sha.len(), 64);
        assert_eq!(hmac.len(), 64);
        assert_ne!(sha, hmac);
    }
}
