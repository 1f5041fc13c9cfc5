//! Cache-through behavior of the fetch services against a mocked AppSheet
//! backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitedash_api::appsheet::AppSheetClient;
use sitedash_api::cache::{CacheKey, ReportCache, TtlSettings};
use sitedash_api::config::AppSheetConfig;
use sitedash_api::services::AppServices;

fn config_for(server: &MockServer) -> AppSheetConfig {
    AppSheetConfig {
        app_id: "app-123".to_string(),
        access_key: "V2-secret".to_string(),
        base_url: server.uri(),
        locale: "en-US".to_string(),
        location: "47.623098, -122.330184".to_string(),
        timezone: "Pacific Standard Time".to_string(),
        request_timeout_secs: 5,
    }
}

fn services_for(server: &MockServer) -> (AppServices, Arc<ReportCache>) {
    let client = Arc::new(AppSheetClient::new(config_for(server)).unwrap());
    let cache = Arc::new(ReportCache::with_system_clock(TtlSettings::default()));
    (AppServices::new(client, cache.clone()), cache)
}

#[tokio::test]
async fn project_list_is_served_from_cache_after_the_first_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Projects/Action"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"Name": "Tower B"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let first = services.projects.list_projects().await;
    let second = services.projects.list_projects().await;

    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    // the mock's expect(1) verifies the second read never hit the backend
}

#[tokio::test]
async fn failed_project_fetch_degrades_to_empty_and_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Projects/Action"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let (services, cache) = services_for(&server);
    assert!(services.projects.list_projects().await.is_empty());
    // errors must not poison the cache with an empty success
    assert!(cache.get::<Vec<serde_json::Value>>(&CacheKey::AllProjects).is_none());
    assert!(services.projects.list_projects().await.is_empty());
}

#[tokio::test]
async fn missing_project_is_none_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Projects/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let found = services.projects.project_by_name("Ghost Yard").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn blank_project_name_issues_no_request() {
    let server = MockServer::start().await;
    // no mock mounted: any request would 404 and the mock server would flag it

    let (services, _cache) = services_for(&server);
    let result = services.projects.project_by_name("   ").await;
    assert!(result.is_err());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn sheet_totals_fetch_inventory_by_id_membership() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Sheets/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Sheet ID": "sh-1", "Project ID": "Tower B", "Sheet Number": "S-01"},
            {"Sheet ID": "sh-2", "Project ID": "Tower B", "Sheet Number": "S-02",
             "Quantity in Factory": 9, "Quantity in Store": -2}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/SheetInventory/Action"))
        .and(body_partial_json(json!({
            "Properties": {
                "Selector":
                    "Filter(SheetInventory, OR(Sheet ID=\"sh-1\", Sheet ID=\"sh-2\"))"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Inventory ID": "inv-1", "Sheet ID": "sh-1", "Quantity": 10},
            {"Inventory ID": "inv-2", "Sheet ID": "sh-1", "Quantity": "-4"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let totals = services.sheets.totals("Tower B").await.unwrap();

    assert_eq!(totals.len(), 2);
    // sh-1 has movements: sign-partitioned sums
    assert_eq!(totals[0].total_received, 10.0);
    assert_eq!(totals[0].total_used, 4.0);
    // sh-2 has none: stored-quantity fallback
    assert_eq!(totals[1].total_received, 9.0);
    assert_eq!(totals[1].total_used, 2.0);
}

#[tokio::test]
async fn materials_summary_joins_and_merges_across_tables() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/ItemRequests/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Item Request ID": "r1", "Project ID": "Tower B", "Order ID": "o-1",
             "Item ID": "it-1", "Category": "Angles", "Quantity": 50},
            {"Item Request ID": "r2", "Project ID": "Tower B", "Order ID": "o-1",
             "Item ID": "it-1", "Category": "Angles", "Quantity": 30},
            {"Item Request ID": "r3", "Project ID": "Tower B", "Order ID": "o-1",
             "Item ID": "it-2", "Category": "Shims", "Quantity": 5}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Orders/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Order ID": "o-1", "Project ID": "Tower B", "Order Number": "PO-7",
             "Status": "Open", "Requested By": "R. Chen"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Items/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Item ID": "it-1", "Name": "Wall angle", "Specification": "40x40"}
        ])))
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let groups = services.materials.summary("Tower B").await.unwrap();

    let angles = groups
        .iter()
        .find(|g| g.category.to_string() == "Angles")
        .unwrap();
    assert_eq!(angles.entries.len(), 1);
    assert_eq!(angles.entries[0].total, 80.0);
    assert_eq!(angles.entries[0].item_name, "Wall angle");
    assert_eq!(angles.entries[0].order_number, "PO-7");

    // unknown category lands in Others
    let others = groups
        .iter()
        .find(|g| g.category.to_string() == "Others")
        .unwrap();
    assert_eq!(others.entries.len(), 1);
    assert_eq!(others.entries[0].item_id, "it-2");
}

#[tokio::test]
async fn trips_drop_unparseable_timestamps_and_accumulate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Deliveries/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Docket ID": "d1", "Project ID": "Tower B", "Ready at": "15/3/2024 10:00:00"},
            {"Docket ID": "d2", "Project ID": "Tower B", "Ready at": "16/3/2024 09:00:00"},
            {"Docket ID": "d3", "Project ID": "Tower B", "Ready at": "whenever"}
        ])))
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let report = services.deliveries.trips("Tower B").await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].date, "2024-03-15");
    assert_eq!(report[0].cumulative, 1);
    assert_eq!(report[1].date, "2024-03-16");
    assert_eq!(report[1].cumulative, 2);
}

#[tokio::test]
async fn allowances_carry_their_classification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Allowances/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Allowance ID": "al-1", "Project ID": "Tower B", "Type": "Installer",
             "Category": "Labour", "Days Allowed": 100, "Days Used": 95},
            {"Allowance ID": "al-2", "Project ID": "Tower B", "Type": "Supervisor",
             "Category": "Labour", "Days Allowed": 10, "Days Used": 12}
        ])))
        .mount(&server)
        .await;

    let (services, _cache) = services_for(&server);
    let statuses = services.allowances.statuses("Tower B").await.unwrap();

    assert_eq!(statuses[0].alert, "warning");
    assert_eq!(statuses[0].bar_color, "yellowgreen");
    assert_eq!(statuses[1].alert, "danger");
    assert_eq!(statuses[1].bar_color, "red");
}

#[tokio::test]
async fn project_cache_eviction_forces_a_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apps/app-123/tables/Deliveries/Action"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Docket ID": "d1", "Project ID": "Tower B", "Ready at": "15/3/2024 10:00:00"}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let (services, cache) = services_for(&server);
    services.deliveries.trips("Tower B").await.unwrap();
    cache.invalidate_project("Tower B");
    services.deliveries.trips("Tower B").await.unwrap();
    // expect(2) on the mock verifies the eviction forced the second fetch
}
