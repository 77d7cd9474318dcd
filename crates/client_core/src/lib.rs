//! Signup form core: validation, submission status, and the HTTP signup client.

pub mod config;
pub mod controller;
pub mod service;
pub mod validation;

pub use config::{load_settings, ClientSettings};
pub use controller::{status_for_outcome, FormEvent, SignupFormController};
pub use service::{HttpSignupService, SignupAccepted, SignupError, SignupService};
pub use validation::validate;
