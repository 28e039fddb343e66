//! Integration tests for the domain API clients
//!
//! **Coverage:**
//! - Envelope normalization across the three backend list shapes
//! - Query shaping (page → limit/offset, dropped empties, repeated keys)
//! - Exports, CSV upload, agent decisions and record CRUD
//! - A list view driven end to end over the real organizations client

mod support;

use std::sync::Arc;
use std::time::Duration;

use partnerhub_common::tracking::RequestTracker;
use partnerhub_core::{
    AgentsPort, CsvImportPort, FetchOutcome, ListViewModel, OrganizationsPort,
    OrganizationsSource, RequestScope, SalesPort, ViewOptions,
};
use partnerhub_domain::{
    AgentDecision, AgentStatus, ExportFormat, ImportRow, OrganizationFilters, OrganizationInput,
    PageInfo, PageRequest, Pagination, PartnerHubError, SalesFilters, StoveIdFilters,
};
use partnerhub_infra::{AgentsClient, CsvImportClient, OrganizationsClient, SalesClient};
use serde_json::json;
use support::{api_client, organization_json, organizations_json};
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scope(component: &'static str) -> RequestScope {
    RequestScope::new(component)
}

/// The same logical listing in the three envelopes the backend uses
#[tokio::test]
async fn list_envelopes_normalize_identically() {
    let rows = organizations_json(2);
    let pagination = json!({"limit": 10, "offset": 0, "total": 2});
    let envelopes = [
        ("/bare", json!(rows)),
        ("/single", json!({"data": rows, "pagination": pagination})),
        ("/double", json!({"success": true, "data": {"data": rows, "pagination": pagination}})),
    ];

    let mut normalized = Vec::new();
    for (prefix, body) in envelopes {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{prefix}/organizations")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = OrganizationsClient::new(api_client(
            &format!("{}{prefix}", server.uri()),
            Arc::new(RequestTracker::new()),
        ));
        let response = client
            .list(&OrganizationFilters::default(), PageRequest::new(1, 10), &scope("organizations"))
            .await
            .expect("list should succeed");
        normalized.push(response);
    }

    let (bare, rest) = normalized.split_first().expect("three responses");
    assert!(bare.success);
    assert_eq!(bare.data.len(), 2);
    // a bare array has no pagination block; derive it from the request
    let derived = bare.pagination_or(&PageRequest::new(1, 10));
    assert_eq!(derived, Pagination { limit: 10, offset: 0, total: 2 });
    for other in rest {
        assert_eq!(other.data, bare.data);
        assert_eq!(other.pagination, Some(derived));
        assert!(other.success);
    }
}

#[tokio::test]
async fn search_page_two_sends_offset_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("search", "LAPO"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "10"))
        .and(query_param_is_missing("state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": organizations_json(5),
            "pagination": {"total": 15, "limit": 10, "offset": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrganizationsClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let filters = OrganizationFilters {
        search: Some("LAPO".into()),
        state: Some(String::new()),
        ..Default::default()
    };
    let page = PageRequest::new(2, 10);
    let response =
        client.list(&filters, page, &scope("organizations")).await.expect("list should succeed");

    assert_eq!(response.data.len(), 5);
    assert_eq!(
        PageInfo::from_pagination(&response.pagination_or(&page)),
        PageInfo { page: 2, limit: 10, total: 15, total_pages: 2 }
    );
}

#[tokio::test]
async fn view_model_pages_through_real_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": organizations_json(10), "pagination": {"total": 15, "limit": 10, "offset": 0}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("offset", "10"))
        .and(query_param("search", "LAPO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": organizations_json(5),
            "pagination": {"total": 15, "limit": 10, "offset": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracker = Arc::new(RequestTracker::new());
    let client = OrganizationsClient::new(api_client(&server.uri(), Arc::clone(&tracker)));
    let vm = ListViewModel::new(
        OrganizationsSource::new(Arc::new(client)),
        Arc::clone(&tracker),
        ViewOptions { debounce: Duration::ZERO, page_size: 10, stale_after: Duration::from_secs(30) },
    );

    let filters = OrganizationFilters { search: Some("LAPO".into()), ..Default::default() };
    assert_eq!(vm.update_filters(filters).await.expect("task"), FetchOutcome::Loaded);
    assert_eq!(vm.set_page(2).await, FetchOutcome::Loaded);

    let state = vm.state();
    assert_eq!(state.data.len(), 5);
    assert_eq!(state.page, PageInfo { page: 2, limit: 10, total: 15, total_pages: 2 });
    assert!(tracker.is_empty());
}

#[tokio::test]
async fn unsupported_envelope_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = OrganizationsClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let result = client
        .list(&OrganizationFilters::default(), PageRequest::default(), &scope("organizations"))
        .await;

    assert!(matches!(result, Err(PartnerHubError::InvalidResponse(_))), "got {result:?}");
}

#[tokio::test]
async fn organization_crud() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/org-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": organization_json("org-1", "LAPO")})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/organizations"))
        .and(body_json(json!({"name": "LAPO Ikeja", "state": "Lagos"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"success": true, "data": organization_json("org-2", "LAPO Ikeja")})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/organizations/org-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organization_json("org-2", "LAPO Yaba")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/organizations/org-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrganizationsClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let scope = scope("organizations");

    let fetched = client.get("org-1", &scope).await.expect("get");
    assert_eq!(fetched.name, "LAPO");

    let input = OrganizationInput {
        name: "LAPO Ikeja".into(),
        state: Some("Lagos".into()),
        ..Default::default()
    };
    let created = client.create(&input, &scope).await.expect("create");
    assert_eq!(created.id, "org-2");

    let renamed = OrganizationInput { name: "LAPO Yaba".into(), ..input };
    assert_eq!(client.update("org-2", &renamed, &scope).await.expect("update").name, "LAPO Yaba");

    client.delete("org-2", &scope).await.expect("delete");
}

#[tokio::test]
async fn sales_filters_repeat_state_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales-advanced"))
        .and(query_param("state", "Lagos"))
        .and(query_param("state", "Oyo"))
        .and(query_param("date_from", "2024-01-01"))
        .and(query_param("sort_order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "s1", "state": "lagos", "quantity": 3}],
            "pagination": {"limit": 10, "offset": 0, "total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SalesClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let filters = SalesFilters {
        states: vec!["Lagos".into(), "Oyo".into()],
        date_from: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
        sort_order: Some(partnerhub_domain::SortOrder::Desc),
        ..Default::default()
    };
    let response =
        client.list_advanced(&filters, PageRequest::default(), &scope("sales")).await.expect("list");

    assert_eq!(response.data[0].quantity, 3);
}

#[tokio::test]
async fn export_returns_raw_payload() {
    let csv = "Sales Reference,Quantity\nSR-1,3\n";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales-advanced"))
        .and(query_param("format", "csv"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv.as_bytes().to_vec(), "text/csv"))
        .expect(1)
        .mount(&server)
        .await;

    let client = SalesClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let payload = client
        .export(&SalesFilters::default(), ExportFormat::Csv, &scope("sales"))
        .await
        .expect("export");

    assert_eq!(payload.format, ExportFormat::Csv);
    assert_eq!(payload.content, csv.as_bytes());
    assert!(payload.file_name.ends_with(".csv"));
}

#[tokio::test]
async fn stove_ids_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stove-ids"))
        .and(query_param("status", "sold"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"data": [{"stove_id": "STV-001", "status": "sold"}]}
        })))
        .mount(&server)
        .await;

    let client = SalesClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let filters = StoveIdFilters { status: Some("sold".into()), ..Default::default() };
    let response = client
        .list_stove_ids(&filters, PageRequest::default(), &scope("stove_ids"))
        .await
        .expect("stove ids");

    assert_eq!(response.data[0].stove_id, "STV-001");
}

#[tokio::test]
async fn csv_upload_posts_rows_and_reads_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/csv-import"))
        .and(body_json(json!({"data": [{"Partner ID": "P-1", "Partner Name": "LAPO"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "summary": {"total_rows": 1, "organizations_created": 1, "organizations_updated": 0, "errors_count": 0},
                "created": [{"id": "org-9", "partner_id": "P-1", "partner_name": "LAPO"}],
                "updated": [],
                "errors": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CsvImportClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let row: ImportRow = [("Partner ID", "P-1"), ("Partner Name", "LAPO")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let summary = client.upload(&[row], &scope("csv_import")).await.expect("upload");

    assert_eq!(summary.summary.organizations_created, 1);
    assert_eq!(summary.created[0].name.as_deref(), Some("LAPO"));
}

#[tokio::test]
async fn agent_decisions_hit_action_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/a-1/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "a-1", "full_name": "Ada Obi", "status": "approved"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/agents/a-2/reject"))
        .and(body_json(json!({"reason": "duplicate registration"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "a-2", "full_name": "Bola Ade", "status": "rejected",
                     "rejection_reason": "duplicate registration"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentsClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let scope = scope("agents");

    let approved = client.decide("a-1", &AgentDecision::Approve, &scope).await.expect("approve");
    assert_eq!(approved.status, AgentStatus::Approved);

    let rejected = client
        .decide("a-2", &AgentDecision::Reject { reason: " duplicate registration ".into() }, &scope)
        .await
        .expect("reject");
    assert_eq!(rejected.status, AgentStatus::Rejected);

    let blank = client.decide("a-3", &AgentDecision::Reject { reason: "  ".into() }, &scope).await;
    assert!(matches!(blank, Err(PartnerHubError::InvalidInput(_))));
}

#[tokio::test]
async fn cancelled_scope_stops_client_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = OrganizationsClient::new(api_client(&server.uri(), Arc::new(RequestTracker::new())));
    let scope = scope("organizations");
    scope.cancel();

    let result = client.get("org-1", &scope).await;
    assert!(matches!(result, Err(PartnerHubError::Cancelled(_))), "got {result:?}");
}
