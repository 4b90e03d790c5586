//! Session handling. Sign-in and sign-out belong to the external identity
//! provider; this service only verifies the bearer tokens it issues.

pub mod session;

pub use session::Session;
