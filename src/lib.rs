//! # Biglietto
//!
//! Client for an event ticketing service: browse the event catalog, register,
//! log in, and exercise role-gated actions (event creation, management
//! console) against a remote backend.
//!
//! The interesting part is the session and access-control core:
//!
//! - [`auth`] holds the credential codec (two wire encodings, one logical
//!   claims shape), the durable credential store, the on-demand session
//!   evaluator, and the route authorizer.
//! - [`client`] talks to the remote service and degrades deliberately: the
//!   catalog falls back to a fixed local data set when the backend is
//!   unreachable or demands auth the caller lacks, and login falls back to a
//!   local directory of test identities only when the service cannot be
//!   reached at all. A reachable service that rejects credentials is a hard
//!   failure, never a fallback.

pub mod auth;
pub mod cli;
pub mod client;
