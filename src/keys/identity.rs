//! Signing identity derivation.
//!
//! # Responsibilities
//! - Derive a secp256k1 signing key from a BIP-39 mnemonic
//! - Derive the bech32 account address from the public key
//! - Sign arbitrary payloads deterministically (RFC 6979)

use bech32::{Bech32, Hrp};
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use k256::ecdsa::signature::Signer;
use k256::ecdsa::{Signature, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// BIP-44 derivation path for account 0. Coin type 330 is the ledger's
/// registered type; changing it changes every derived address.
const DERIVATION_PATH: &str = "m/44'/330'/0'/0/0";

/// A named signing identity: a key derived from a mnemonic seed plus its
/// account address. Immutable once derived.
#[derive(Clone)]
pub struct Identity {
    name: String,
    address: String,
    signing_key: SigningKey,
    public_key: [u8; 33],
}

impl Identity {
    /// Derive an identity from a BIP-39 mnemonic phrase.
    ///
    /// Derivation is pure: the same phrase always yields the same key and
    /// address. Fails with a signing error if the phrase is not a valid
    /// mnemonic.
    pub fn from_mnemonic(name: &str, phrase: &str, prefix: &str) -> Result<Self> {
        let mnemonic = Mnemonic::parse(phrase)
            .map_err(|e| Error::Signing(format!("invalid mnemonic for '{}': {}", name, e)))?;
        let seed = mnemonic.to_seed("");

        let path: DerivationPath = DERIVATION_PATH
            .parse()
            .map_err(|e| Error::Signing(format!("invalid derivation path: {}", e)))?;
        let xprv = XPrv::derive_from_path(seed, &path)
            .map_err(|e| Error::Signing(format!("key derivation failed for '{}': {}", name, e)))?;
        let signing_key = xprv.private_key().clone();

        let point = signing_key.verifying_key().to_encoded_point(true);
        let mut public_key = [0u8; 33];
        public_key.copy_from_slice(point.as_bytes());

        let address = account_address(prefix, &public_key)?;

        Ok(Self {
            name: name.to_string(),
            address,
            signing_key,
            public_key,
        })
    }

    /// The identity's name in the key table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived account address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The compressed secp256k1 public key.
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// Sign a payload with ECDSA over SHA-256.
    ///
    /// Returns the 64-byte `r || s` signature the ledger expects. The
    /// signature is normalized to low-s form; high-s signatures are
    /// rejected by the chain.
    pub fn sign(&self, payload: &[u8]) -> Result<[u8; 64]> {
        let signature: Signature = self
            .signing_key
            .try_sign(payload)
            .map_err(|e| Error::Signing(format!("signing failed for '{}': {}", self.name, e)))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(signature.to_bytes().as_slice());
        Ok(bytes)
    }
}

// Key material must never appear in logs.
impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish()
    }
}

/// Derive the bech32 account address from a compressed public key:
/// `bech32(prefix, ripemd160(sha256(pubkey)))`.
fn account_address(prefix: &str, public_key: &[u8; 33]) -> Result<String> {
    let sha = Sha256::digest(public_key);
    let rip = Ripemd160::digest(sha);
    let hrp = Hrp::parse(prefix)
        .map_err(|e| Error::Signing(format!("invalid address prefix '{}': {}", prefix, e)))?;
    bech32::encode::<Bech32>(hrp, rip.as_slice())
        .map_err(|e| Error::Signing(format!("address encoding failed: {}", e)))
}
