//! Per-realm key material cache.
//!
//! Holds at most one decoded public and one decoded private key,
//! decoded lazily from the realm's PEM fields. The cache belongs to a
//! single manager instance; it is never shared across instances, so a
//! replacement elsewhere is only observed through the realm record.

use std::sync::Arc;

use parking_lot::RwLock;

use idm_crypto::{CryptoError, DerPrivateKey, DerPublicKey};

/// Lazily decoded key pair for one realm aggregate instance.
#[derive(Debug, Default)]
pub struct KeyPairCache {
    public: RwLock<Option<Arc<DerPublicKey>>>,
    private: RwLock<Option<Arc<DerPrivateKey>>>,
}

impl KeyPairCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached public key, decoding `pem` on first access.
    ///
    /// # Errors
    ///
    /// Returns a [`CryptoError`] if the PEM text does not decode; the
    /// cache stays empty in that case.
    pub fn public_or_decode(
        &self,
        pem: Option<&str>,
    ) -> Result<Option<Arc<DerPublicKey>>, CryptoError> {
        if let Some(key) = self.public.read().clone() {
            return Ok(Some(key));
        }
        let Some(pem) = pem else {
            return Ok(None);
        };
        let key = Arc::new(DerPublicKey::from_pem(pem)?);
        *self.public.write() = Some(Arc::clone(&key));
        Ok(Some(key))
    }

    /// Returns the cached private key, decoding `pem` on first access.
    ///
    /// # Errors
    ///
    /// Returns a [`CryptoError`] if the PEM text does not decode.
    pub fn private_or_decode(
        &self,
        pem: Option<&str>,
    ) -> Result<Option<Arc<DerPrivateKey>>, CryptoError> {
        if let Some(key) = self.private.read().clone() {
            return Ok(Some(key));
        }
        let Some(pem) = pem else {
            return Ok(None);
        };
        let key = Arc::new(DerPrivateKey::from_pem(pem)?);
        *self.private.write() = Some(Arc::clone(&key));
        Ok(Some(key))
    }

    /// Drops the cached public key (PEM field replaced).
    pub fn invalidate_public(&self) {
        *self.public.write() = None;
    }

    /// Drops the cached private key (PEM field replaced).
    pub fn invalidate_private(&self) {
        *self.private.write() = None;
    }

    /// Caches an already-decoded public key.
    pub fn store_public(&self, key: DerPublicKey) {
        *self.public.write() = Some(Arc::new(key));
    }

    /// Caches an already-decoded private key.
    pub fn store_private(&self, key: DerPrivateKey) {
        *self.private.write() = Some(Arc::new(key));
    }
}
