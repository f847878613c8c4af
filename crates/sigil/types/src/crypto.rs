//! Credential hashing and token derivation.
//!
//! All digests are BLAKE3 with domain-separation tags, so a password digest
//! can never collide with a token digest for the same input bytes. Only
//! digests are persisted; plaintext passwords and tokens never enter stored
//! state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Timestamp};

const PASSWORD_TAG: &[u8] = b"sigil-password-v1:";
const TOKEN_TAG: &[u8] = b"sigil-authkey-v1:";
const TOKEN_SEED_TAG: &[u8] = b"sigil-authkey-seed-v1:";

/// A 32-byte BLAKE3 digest of a secret.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest a password candidate.
    pub fn of_password(candidate: &str) -> Self {
        tagged(PASSWORD_TAG, &[candidate.as_bytes()])
    }

    /// Digest an authorization token.
    pub fn of_token(token: &str) -> Self {
        tagged(TOKEN_TAG, &[token.as_bytes()])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}..)", hex::encode(&self.0[..4]))
    }
}

fn tagged(tag: &[u8], parts: &[&[u8]]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    Digest(*hasher.finalize().as_bytes())
}

/// A freshly issued authorization token.
///
/// The plaintext exists only in the return value of issuance and in the
/// `AuthKeyGenerated` receipt. Stored state keeps the digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Derive a token from the issuing caller, the issuance time, and a
    /// random nonce. The nonce keeps same-second reissues distinct.
    pub fn derive(caller: &Address, at: Timestamp, nonce: &[u8; 32]) -> Self {
        let seed = tagged(
            TOKEN_SEED_TAG,
            &[
                caller.as_str().as_bytes(),
                b":",
                &at.secs().to_le_bytes(),
                b":",
                nonce,
            ],
        );
        Self(seed.to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The digest under which this token is stored and later matched.
    pub fn digest(&self) -> Digest {
        Digest::of_token(&self.0)
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
