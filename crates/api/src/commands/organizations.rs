//! Partner organization commands

use partnerhub_common::validation::ValidationError;
use partnerhub_domain::constants::COMPONENT_ORGANIZATIONS;
use partnerhub_domain::{
    Organization, OrganizationFilters, OrganizationInput, Page, PageRequest, Result,
};

use super::{required, validation_failed};
use crate::context::AppContext;
use crate::utils::execute_command;

/// One page of organizations matching `filters`
pub async fn list_organizations(
    ctx: &AppContext,
    filters: OrganizationFilters,
    page: PageRequest,
) -> Result<Page<Organization>> {
    execute_command("organizations::list", || async {
        let scope = ctx.scope(COMPONENT_ORGANIZATIONS);
        let response = ctx.organizations.list(&filters, page, &scope).await?;
        Ok(Page::from_response(response, &page))
    })
    .await
}

pub async fn get_organization(ctx: &AppContext, id: &str) -> Result<Organization> {
    execute_command("organizations::get", || async {
        let id = required("organization id", id)?;
        ctx.organizations.get(id, &ctx.scope(COMPONENT_ORGANIZATIONS)).await
    })
    .await
}

/// Create an organization after local validation of `input`
pub async fn create_organization(
    ctx: &AppContext,
    input: OrganizationInput,
) -> Result<Organization> {
    execute_command("organizations::create", || async {
        validate_input(&input)?;
        ctx.organizations.create(&input, &ctx.scope(COMPONENT_ORGANIZATIONS)).await
    })
    .await
}

pub async fn update_organization(
    ctx: &AppContext,
    id: &str,
    input: OrganizationInput,
) -> Result<Organization> {
    execute_command("organizations::update", || async {
        let id = required("organization id", id)?;
        validate_input(&input)?;
        ctx.organizations.update(id, &input, &ctx.scope(COMPONENT_ORGANIZATIONS)).await
    })
    .await
}

pub async fn delete_organization(ctx: &AppContext, id: &str) -> Result<()> {
    execute_command("organizations::delete", || async {
        let id = required("organization id", id)?;
        ctx.organizations.delete(id, &ctx.scope(COMPONENT_ORGANIZATIONS)).await
    })
    .await
}

fn validate_input(input: &OrganizationInput) -> Result<()> {
    let mut errors = ValidationError::new();
    if input.name.trim().is_empty() {
        errors.add_error_with_code("name", "Organization name is required", "required");
    }
    if let Some(email) = input.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if !email.contains('@') {
            let message = format!("Invalid email address: {email}");
            errors.add_error_with_code("email", message, "format");
        }
    }
    errors.into_result(()).map_err(validation_failed)
}

#[cfg(test)]
mod tests {
    use partnerhub_domain::PartnerHubError;

    use super::*;

    #[test]
    fn input_requires_name() {
        let err = validate_input(&OrganizationInput::default()).unwrap_err();
        assert_eq!(err, PartnerHubError::Validation("Organization name is required".into()));
    }

    #[test]
    fn input_reports_every_violation() {
        let input = OrganizationInput {
            name: "  ".into(),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let Err(PartnerHubError::Validation(message)) = validate_input(&input) else {
            panic!("expected validation error");
        };
        assert_eq!(message.lines().count(), 2);
    }

    #[test]
    fn blank_email_is_ignored() {
        let input = OrganizationInput {
            name: "LAPO".into(),
            email: Some(" ".into()),
            ..Default::default()
        };
        assert!(validate_input(&input).is_ok());
    }
}
