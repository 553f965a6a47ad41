//! Request middleware.
//!
//! [`Trace`] scopes a per-request trace identifier, echoes it in the
//! `trace-id` response header and logs request completion.

pub mod trace;

pub use trace::Trace;
