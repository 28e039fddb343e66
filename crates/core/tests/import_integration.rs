//! Integration tests for the CSV import workflow
//!
//! Local validation must report every violation at once and keep rejected
//! files away from the upload endpoint.

mod support;

use std::sync::Arc;

use partnerhub_core::import::{codes, generate_template, REQUIRED_HEADERS};
use partnerhub_core::{ImportError, ImportService, RequestScope};
use partnerhub_domain::PartnerHubError;
use support::ports::RecordingImportPort;

fn row(partner_id: &str, customer: &str) -> String {
    REQUIRED_HEADERS
        .iter()
        .map(|header| match *header {
            "Partner ID" => partner_id.to_string(),
            "Customer" => customer.to_string(),
            _ => "value".to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn service() -> (ImportService, Arc<RecordingImportPort>) {
    let port = Arc::new(RecordingImportPort::default());
    (ImportService::new(Arc::clone(&port) as _), port)
}

#[tokio::test]
async fn every_violation_reported_before_upload() {
    let content = [
        REQUIRED_HEADERS.join(","),
        row("", "Missing One"),
        row("P-7", "First"),
        row("P-7", "Second"),
        row("  ", "Missing Two"),
    ]
    .join("\n");
    let (service, port) = service();

    let err = service
        .import_file("partners.csv", content.as_bytes(), &RequestScope::new("csv_import"))
        .await
        .expect_err("import must be rejected");

    let ImportError::Rejected(validation) = &err else {
        panic!("expected local rejection, got {err:?}");
    };
    assert_eq!(validation.error_count(), 3);
    let missing = validation.errors_with_code(codes::MISSING_PARTNER_ID);
    assert_eq!(missing.len(), 2);
    assert!(missing[0].message.contains("Row 2"));
    assert!(missing[1].message.contains("Row 5"));
    let duplicates = validation.errors_with_code(codes::DUPLICATE_PARTNER_ID);
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].message.contains("rows 3, 4"));

    assert_eq!(port.uploads(), 0);
}

#[tokio::test]
async fn wrong_file_type_never_uploads() {
    let (service, port) = service();

    let err = service
        .import_file("partners.xlsx", b"anything", &RequestScope::new("csv_import"))
        .await
        .expect_err("rejected");

    assert_eq!(err.violations()[0].code.as_deref(), Some(codes::INVALID_EXTENSION));
    assert_eq!(port.uploads(), 0);
}

#[tokio::test]
async fn valid_file_is_uploaded_once() {
    let content = [REQUIRED_HEADERS.join(","), row("P-1", "Ada"), String::new(), row("P-2", "Obi")]
        .join("\n");
    let (service, port) = service();

    let summary = service
        .import_file("partners.csv", content.as_bytes(), &RequestScope::new("csv_import"))
        .await
        .expect("import succeeds");

    assert_eq!(port.uploads(), 1);
    assert_eq!(summary.summary.total_rows, 2);
    let rows = port.uploaded_rows();
    assert_eq!(rows[1]["Partner ID"], "P-2");
    assert_eq!(rows[1]["Customer"], "Obi");
}

#[tokio::test]
async fn template_is_accepted_by_importer() {
    let (service, port) = service();
    let template = generate_template().expect("template");

    service
        .import_file("template.csv", template.as_bytes(), &RequestScope::new("csv_import"))
        .await
        .expect("template imports");

    assert_eq!(port.uploads(), 1);
}

#[test]
fn rejection_maps_to_validation_error() {
    let (service, _) = service();
    let err = service.validate("partners.csv", b"Partner ID\n").expect_err("rejected");

    let mapped = PartnerHubError::from(err);
    assert!(matches!(mapped, PartnerHubError::Validation(ref msg) if msg.contains("Missing required column")));
}
