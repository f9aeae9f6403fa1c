//! # idm-credential
//!
//! Credential validation and update strategies for the identity core.
//!
//! The realm aggregate manager delegates all credential-type logic to
//! [`CredentialHandler`] implementations. Handlers are explicit
//! dependency objects bundled in [`CredentialHandlers`] and injected at
//! manager construction, so different realms and tests can supply
//! different strategies.
//!
//! ## Provided handlers
//!
//! - [`PasswordCredentialHandler`]: Argon2id hashing and verification
//! - [`OtpCredentialHandler`]: one-time-password stub; validation is
//!   not implemented and always fails

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod handler;
pub mod otp;
pub mod password;

pub use error::{CredentialError, CredentialResult};
pub use handler::{CredentialHandler, CredentialHandlers, CredentialStatus};
pub use otp::OtpCredentialHandler;
pub use password::{PasswordCredentialHandler, PasswordPolicy};
