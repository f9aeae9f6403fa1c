//! PEM body decode/encode for key material.
//!
//! Realm records store keys as PEM *bodies*, base64 DER without the
//! BEGIN/END markers. Decoding tolerates full PEM text (markers and
//! line breaks are stripped first) and validates that the result is a
//! well-formed top-level DER SEQUENCE; it does not interpret the key
//! beyond that.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CryptoError;

/// A decoded public key (`SubjectPublicKeyInfo` DER).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerPublicKey {
    der: Vec<u8>,
}

/// A decoded private key (PKCS#8 DER).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerPrivateKey {
    der: Vec<u8>,
}

impl DerPublicKey {
    /// Decodes a PEM body or full PEM text.
    ///
    /// # Errors
    ///
    /// Returns an error if the base64 payload or the DER framing is
    /// invalid.
    pub fn from_pem(text: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            der: decode_pem_body(text)?,
        })
    }

    /// Wraps raw DER bytes after checking the framing.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a well-formed SEQUENCE.
    pub fn from_der(der: Vec<u8>) -> Result<Self, CryptoError> {
        check_der(&der)?;
        Ok(Self { der })
    }

    /// Encodes back to a marker-free PEM body.
    #[must_use]
    pub fn to_pem_body(&self) -> String {
        STANDARD.encode(&self.der)
    }

    /// Returns the DER bytes.
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

impl DerPrivateKey {
    /// Decodes a PEM body or full PEM text.
    ///
    /// # Errors
    ///
    /// Returns an error if the base64 payload or the DER framing is
    /// invalid.
    pub fn from_pem(text: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            der: decode_pem_body(text)?,
        })
    }

    /// Wraps raw DER bytes after checking the framing.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a well-formed SEQUENCE.
    pub fn from_der(der: Vec<u8>) -> Result<Self, CryptoError> {
        check_der(&der)?;
        Ok(Self { der })
    }

    /// Encodes back to a marker-free PEM body.
    #[must_use]
    pub fn to_pem_body(&self) -> String {
        STANDARD.encode(&self.der)
    }

    /// Returns the DER bytes.
    #[must_use]
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

/// Strips PEM markers and whitespace, then base64-decodes and checks
/// DER framing.
fn decode_pem_body(text: &str) -> Result<Vec<u8>, CryptoError> {
    let body: String = text
        .lines()
        .filter(|line| !line.trim_start().starts_with("-----"))
        .collect::<Vec<_>>()
        .concat()
        .split_whitespace()
        .collect();

    if body.is_empty() {
        return Err(CryptoError::InvalidPem("empty PEM body".to_string()));
    }

    let der = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| CryptoError::InvalidPem(e.to_string()))?;
    check_der(&der)?;
    Ok(der)
}

/// Checks that the bytes form exactly one top-level DER SEQUENCE.
fn check_der(der: &[u8]) -> Result<(), CryptoError> {
    if der.first() != Some(&0x30) {
        return Err(CryptoError::InvalidDer("expected SEQUENCE".to_string()));
    }
    let (len, header) = read_length(der, 1)?;
    if header + len != der.len() {
        return Err(CryptoError::InvalidDer(
            "length does not cover the buffer".to_string(),
        ));
    }
    Ok(())
}

/// Reads an ASN.1 length field; returns (length, position after it).
fn read_length(data: &[u8], pos: usize) -> Result<(usize, usize), CryptoError> {
    let first = *data
        .get(pos)
        .ok_or_else(|| CryptoError::InvalidDer("unexpected end of data".to_string()))?;

    if first < 0x80 {
        return Ok((first as usize, pos + 1));
    }

    let num_bytes = (first & 0x7F) as usize;
    if num_bytes == 0 || num_bytes > 4 {
        return Err(CryptoError::InvalidDer("length too large".to_string()));
    }
    let mut len = 0usize;
    for i in 0..num_bytes {
        let byte = *data
            .get(pos + 1 + i)
            .ok_or_else(|| CryptoError::InvalidDer("unexpected end of length".to_string()))?;
        len = (len << 8) | (byte as usize);
    }
    Ok((len, pos + 1 + num_bytes))
}
