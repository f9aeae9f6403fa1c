//! # idm-crypto
//!
//! Asymmetric key material as the identity core sees it: PEM text in
//! realm records, decoded DER bytes in the per-realm key cache.
//!
//! This crate is the narrow contract the core relies on: PEM body
//! decode/encode with a shallow DER well-formedness check. Signing and
//! verification belong to the callers that consume the DER bytes.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod pem;

pub use error::CryptoError;
pub use pem::{DerPrivateKey, DerPublicKey};
