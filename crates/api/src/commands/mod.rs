//! UI-facing commands
//!
//! Each command takes the shared [`AppContext`](crate::context::AppContext),
//! runs inside [`execute_command`](crate::utils::execute_command) and returns
//! the domain error unchanged so the shell can branch on its category.

mod agents;
mod import;
mod organizations;
mod sales;
mod session;

pub use agents::*;
pub use import::*;
pub use organizations::*;
pub use sales::*;
pub use session::*;

use partnerhub_common::validation::ValidationError;
use partnerhub_domain::{PartnerHubError, Result};

/// Trimmed `value`, or `InvalidInput` naming `field` when it is blank
fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PartnerHubError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed)
}

fn validation_failed(errors: ValidationError) -> PartnerHubError {
    PartnerHubError::Validation(errors.messages().join("\n"))
}
