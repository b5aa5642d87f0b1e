//! Integration tests for the Pay Reconciliation Engine.
//!
//! This test suite covers:
//! - Reconciliation scenarios against hand-built snapshots
//! - Expected pay from the shipped rate tables
//! - State tax rules by residence
//! - The HTTP endpoints and their error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use pay_recon::api::{AppState, create_router};
use pay_recon::calculation::build_expected_snapshot;
use pay_recon::comparison::{ThresholdConfig, compare};
use pay_recon::config::ConfigLoader;
use pay_recon::models::{ExpectedSnapshot, LineItem, MemberProfile, PayPeriod, Section, Severity};

// =============================================================================
// Test Helpers
// =============================================================================

fn loader() -> ConfigLoader {
    ConfigLoader::load("./config/rates").expect("Failed to load rate tables")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(loader().into_tables()))
}

fn march_2025() -> PayPeriod {
    PayPeriod::new(2025, 3).unwrap()
}

fn empty_snapshot() -> ExpectedSnapshot {
    ExpectedSnapshot::empty(march_2025())
}

fn profile_json() -> Value {
    json!({
        "member_id": "mbr_001",
        "pay_grade": "E05",
        "years_of_service": 6,
        "location_key": "CA024",
        "has_dependents": true,
        "filing_status": "single",
        "state_of_residence": "TX",
        "tsp_rate_percent": "5",
        "sgli_coverage_cents": 50000000,
        "dental_plan": "single",
        "special_pays": []
    })
}

fn profile() -> MemberProfile {
    serde_json::from_value(profile_json()).unwrap()
}

/// A statement that matches the E05 San Diego profile to the cent, apart from
/// federal withholding which is within its estimate tolerance.
fn clean_statement() -> Value {
    json!([
        { "section": "ALLOWANCE", "code": "BASE_PAY", "amount_cents": 423990, "ytd_cents": 1271970 },
        { "section": "ALLOWANCE", "code": "BAH", "amount_cents": 402900 },
        { "section": "ALLOWANCE", "code": "BAS", "amount_cents": 46577 },
        { "section": "DEDUCTION", "code": "TSP", "amount_cents": 43673 },
        { "section": "DEDUCTION", "code": "SGLI", "amount_cents": 3100 },
        { "section": "DEDUCTION", "code": "DENTAL", "amount_cents": 1404 },
        { "section": "TAX", "code": "FICA", "amount_cents": 26287 },
        { "section": "TAX", "code": "MEDICARE", "amount_cents": 6148 },
        { "section": "TAX", "code": "FITW", "amount_cents": 36500 },
        { "section": "ADJUSTMENT", "code": "NET_PAY", "amount_cents": 756355 }
    ])
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn flag_codes(result: &Value) -> Vec<String> {
    result["result"]["flags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Reconciliation Scenarios
// =============================================================================

#[test]
fn test_scenario_a_underpaid_housing_is_one_mismatch() {
    let mut snapshot = empty_snapshot();
    snapshot.bah_cents = Some(200_000);
    let items = vec![LineItem::new(Section::Allowance, "BAH", 150_000)];
    let thresholds = ThresholdConfig::default().with_override("BAH", 5_000);

    let result = compare(&items, &snapshot, &thresholds);

    assert_eq!(result.flags.len(), 1);
    assert_eq!(result.flags[0].code, "BAH_MISMATCH");
    assert_eq!(result.flags[0].delta_cents, 50_000);
}

#[test]
fn test_scenario_b_cola_not_due_is_unexpected() {
    let mut snapshot = empty_snapshot();
    snapshot.cola_cents = Some(0);
    let items = vec![LineItem::new(Section::Allowance, "COLA", 30_000)];

    let result = compare(&items, &snapshot, &ThresholdConfig::default());

    assert_eq!(result.flags.len(), 1);
    assert_eq!(result.flags[0].code, "COLA_UNEXPECTED");
}

#[test]
fn test_scenario_c_net_pay_within_tolerance_is_confirmed() {
    let mut snapshot = empty_snapshot();
    snapshot.net_pay_cents = Some(321_000);
    let items = vec![LineItem::new(Section::Adjustment, "NET_PAY", 320_000)];
    let thresholds = ThresholdConfig::default().with_override("NET_PAY", 5_000);

    let result = compare(&items, &snapshot, &thresholds);

    assert_eq!(result.flags.len(), 1);
    assert_eq!(result.flags[0].code, "NET_PAY_VERIFIED");
    assert_eq!(result.flags[0].severity, Severity::Green);
    assert!(result.flag("NET_PAY_MISMATCH").is_none());
}

#[test]
fn test_scenario_d_absent_net_pay_needs_verification() {
    let mut snapshot = empty_snapshot();
    snapshot.base_pay_cents = Some(400_000);
    snapshot.net_pay_cents = Some(321_000);
    let items = vec![LineItem::new(Section::Allowance, "BASE_PAY", 400_000)];

    let result = compare(&items, &snapshot, &ThresholdConfig::default());

    let net: Vec<_> = result.flags_for("NET_PAY").collect();
    assert_eq!(net.len(), 1);
    assert_eq!(net[0].code, "NET_PAY_VERIFICATION_NEEDED");
    assert_eq!(net[0].delta_cents, 0);
}

#[test]
fn test_scenario_e_empty_statement_has_no_flags() {
    let mut snapshot = empty_snapshot();
    snapshot.base_pay_cents = Some(400_000);

    let result = compare(&[], &snapshot, &ThresholdConfig::default());

    assert!(result.flags.is_empty());
    assert_eq!(result.totals.allowances.actual_cents, 0);
    assert_eq!(result.totals.allowances.expected_cents, 400_000);
    assert_eq!(result.totals.allowances.delta_cents, 400_000);
}

#[test]
fn test_comparison_is_idempotent() {
    let snapshot = build_expected_snapshot(&profile(), &march_2025(), loader().tables()).unwrap();
    let items: Vec<LineItem> = serde_json::from_value(clean_statement()).unwrap();
    let thresholds = ThresholdConfig::default();

    let first = serde_json::to_vec(&compare(&items, &snapshot, &thresholds)).unwrap();
    let second = serde_json::to_vec(&compare(&items, &snapshot, &thresholds)).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Expected Pay From Rate Tables
// =============================================================================

#[test]
fn test_e05_san_diego_snapshot() {
    let snapshot = build_expected_snapshot(&profile(), &march_2025(), loader().tables()).unwrap();

    assert_eq!(snapshot.base_pay_cents, Some(423_990));
    assert_eq!(snapshot.bah_cents, Some(402_900));
    assert_eq!(snapshot.bas_cents, Some(46_577));
    assert_eq!(snapshot.cola_cents, Some(0));
    assert_eq!(snapshot.taxable_gross_cents, Some(423_990));
    assert_eq!(snapshot.total_pay_cents, Some(873_467));
    assert_eq!(snapshot.tsp_cents, Some(43_673));
    assert_eq!(snapshot.sgli_cents, Some(3_100));
    assert_eq!(snapshot.dental_cents, Some(1_404));
    assert_eq!(snapshot.fica_cents, Some(26_287));
    assert_eq!(snapshot.medicare_cents, Some(6_148));
    assert_eq!(snapshot.federal_tax_cents, Some(35_879));
    assert_eq!(snapshot.state_tax_cents, Some(0));
    assert_eq!(snapshot.net_pay_cents, Some(756_976));
    assert!(snapshot.tax_estimates_low_confidence);
}

#[test]
fn test_prior_year_uses_prior_tables() {
    let period = PayPeriod::new(2024, 6).unwrap();
    let snapshot = build_expected_snapshot(&profile(), &period, loader().tables()).unwrap();

    assert_eq!(snapshot.base_pay_cents, Some(406_890));
    assert_eq!(snapshot.bah_cents, Some(384_600));
}

#[test]
fn test_unknown_location_leaves_housing_absent() {
    let mut profile = profile();
    profile.location_key = "ZZ999".to_string();
    let snapshot = build_expected_snapshot(&profile, &march_2025(), loader().tables()).unwrap();

    assert_eq!(snapshot.bah_cents, None);
    assert!(snapshot.diagnostic_for("BAH").is_some());
    assert_eq!(snapshot.base_pay_cents, Some(423_990));
    assert_eq!(snapshot.fica_cents, Some(26_287));
    assert_eq!(snapshot.net_pay_cents, None);
}

#[test]
fn test_state_of_residence_selects_rule() {
    let tables = loader();
    let mut profile = profile();

    profile.state_of_residence = Some("CA".to_string());
    let ca = build_expected_snapshot(&profile, &march_2025(), tables.tables()).unwrap();
    assert_eq!(ca.state_tax_cents, Some(19_080));

    profile.state_of_residence = Some("VA".to_string());
    let va = build_expected_snapshot(&profile, &march_2025(), tables.tables()).unwrap();
    assert_eq!(va.state_tax_cents, Some(20_546));

    profile.state_of_residence = Some("OH".to_string());
    let oh = build_expected_snapshot(&profile, &march_2025(), tables.tables()).unwrap();
    assert_eq!(oh.state_tax_cents, Some(0));

    profile.state_of_residence = Some("ZZ".to_string());
    let unknown = build_expected_snapshot(&profile, &march_2025(), tables.tables()).unwrap();
    assert_eq!(unknown.state_tax_cents, None);
}

#[test]
fn test_cola_location_is_taxable() {
    let mut profile = profile();
    profile.location_key = "NY349".to_string();
    let snapshot = build_expected_snapshot(&profile, &march_2025(), loader().tables()).unwrap();

    assert_eq!(snapshot.cola_cents, Some(12_300));
    assert_eq!(snapshot.bah_cents, Some(513_600));
    assert_eq!(snapshot.taxable_gross_cents, Some(423_990 + 12_300));
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_clean_statement_is_green() {
    let body = json!({
        "profile": profile_json(),
        "period": { "year": 2025, "month": 3 },
        "line_items": clean_statement()
    });

    let (status, result) = post_json(create_router_for_test(), "/reconcile", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["sanity"]["valid"], json!(true));
    let codes = flag_codes(&result);
    assert!(codes.contains(&"BASE_PAY_VERIFIED".to_string()));
    assert!(codes.contains(&"FITW_VERIFIED".to_string()));
    assert_eq!(codes.last().unwrap(), "NET_PAY_VERIFIED");
    assert!(
        result["result"]["flags"]
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["severity"] == "green")
    );
    assert_eq!(result["result"]["totals"]["net_pay"]["delta_cents"], json!(621));
}

#[tokio::test]
async fn test_api_missing_housing_is_red() {
    let mut items = clean_statement();
    items
        .as_array_mut()
        .unwrap()
        .retain(|item| item["code"] != "BAH");
    let body = json!({
        "profile": profile_json(),
        "period": { "year": 2025, "month": 3 },
        "line_items": items
    });

    let (status, result) = post_json(create_router_for_test(), "/reconcile", body).await;

    assert_eq!(status, StatusCode::OK);
    let flag = result["result"]["flags"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["code"] == "BAH_MISSING")
        .unwrap()
        .clone();
    assert_eq!(flag["severity"], "red");
    assert_eq!(flag["delta_cents"], json!(402900));
}

#[tokio::test]
async fn test_api_warn_policy_reports_implausible_profile() {
    let mut profile = profile_json();
    profile["pay_grade"] = json!("O08");
    profile["years_of_service"] = json!(6);
    let body = json!({
        "profile": profile,
        "period": { "year": 2025, "month": 3 },
        "sanity_policy": "warn"
    });

    let (status, result) = post_json(create_router_for_test(), "/expected-pay", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["sanity"]["valid"], json!(false));
    // The tables carry no O08 row, so base pay is absent rather than guessed
    assert!(result["snapshot"]["base_pay_cents"].is_null());
}

#[tokio::test]
async fn test_api_block_policy_is_default() {
    let mut profile = profile_json();
    profile["pay_grade"] = json!("E03");
    profile["years_of_service"] = json!(18);
    let body = json!({
        "profile": profile,
        "period": { "year": 2025, "month": 3 },
        "line_items": []
    });

    let (status, error) = post_json(create_router_for_test(), "/reconcile", body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "IMPLAUSIBLE_PROFILE");
}

#[tokio::test]
async fn test_api_invalid_period() {
    let body = json!({
        "profile": profile_json(),
        "period": { "year": 2025, "month": 0 }
    });

    let (status, error) = post_json(create_router_for_test(), "/expected-pay", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_api_unknown_section_is_rejected() {
    let body = json!({
        "profile": profile_json(),
        "period": { "year": 2025, "month": 3 },
        "line_items": [{ "section": "BONUS", "code": "X", "amount_cents": 1 }]
    });

    let (status, error) = post_json(create_router_for_test(), "/reconcile", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_api_server_thresholds_apply() {
    let thresholds = ConfigLoader::load_thresholds("./config/thresholds.yaml").unwrap();
    let router = create_router(AppState::with_thresholds(
        loader().into_tables(),
        thresholds,
    ));
    let mut profile = profile_json();
    profile["state_of_residence"] = json!("CA");
    // 19,080 expected; 11,000 short is outside the 10,000 default but
    // inside the 12,500 server override
    let body = json!({
        "profile": profile,
        "period": { "year": 2025, "month": 3 },
        "line_items": [{ "section": "TAX", "code": "SITW", "amount_cents": 8080 }]
    });

    let (status, result) = post_json(router, "/reconcile", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(flag_codes(&result).contains(&"SITW_VERIFIED".to_string()));
}
