use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of characters in a transaction identifier.
pub const TRANSACTION_ID_LEN: usize = 20;

/// Symbols a transaction identifier is drawn from.
pub const TRANSACTION_ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Opaque identifier of a placed order.
///
/// Generated client-side from a non-cryptographic RNG. No lookup against
/// existing records is made: 62^20 (~10^35) possible values make a collision
/// negligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh identifier from the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates an identifier from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..TRANSACTION_ID_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..TRANSACTION_ID_ALPHABET.len());
                TRANSACTION_ID_ALPHABET[idx] as char
            })
            .collect();
        Self(id)
    }

    /// Returns true if `s` has the length and alphabet of a generated id.
    pub fn is_well_formed(s: &str) -> bool {
        s.len() == TRANSACTION_ID_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
