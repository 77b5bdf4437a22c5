//! Session and access-control core.
//!
//! A credential is an opaque token persisted by the [`store::CredentialStore`],
//! decoded by [`codec`] into one logical [`claims::Claims`] shape regardless
//! of which of the two wire encodings carried it, evaluated on demand by
//! [`session::SessionEvaluator`], and consulted by
//! [`authorizer::AccessAuthorizer`] to gate navigation.

pub mod authorizer;
pub mod claims;
pub mod codec;
pub mod error;
pub mod role;
pub mod session;
pub mod store;
