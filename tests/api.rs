//! In-process HTTP tests: the router is driven with `tower::ServiceExt::oneshot`
//! against a pre-populated in-memory table, so no dataset file is needed.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use lca_data_api::dataset::{
    COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, GWP_COLUMNS, PROCESS_NAME_COLUMN,
};
use lca_data_api::server::{router, AppState};
use lca_data_api::types::{Table, Value};

fn sample_table() -> Table {
    let mut columns = vec![
        COUNTRY_CODE_COLUMN.to_string(),
        COUNTRY_NAME_COLUMN.to_string(),
        PROCESS_NAME_COLUMN.to_string(),
    ];
    columns.extend(GWP_COLUMNS.iter().map(|c| c.to_string()));

    Table::new(
        columns,
        vec![
            sample_row("US", "United States", "propylene production", [10.0, 5.0, 0.0, 0.0, 0.0]),
            sample_row("US", "United States", "ethylene production", [20.0, 0.0, 0.0, 0.0, 0.0]),
            sample_row("DE", "Germany", "propane production", [7.5, 1.0, 0.25, 0.5, 0.125]),
        ],
    )
}

fn sample_row(code: &str, name: &str, process: &str, gwp: [f64; 5]) -> Vec<Value> {
    let mut row = vec![
        Value::Utf8(code.to_string()),
        Value::Utf8(name.to_string()),
        Value::Utf8(process.to_string()),
    ];
    row.extend(gwp.into_iter().map(Value::Float64));
    row
}

fn app() -> Router {
    router(AppState::with_table(sample_table()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

#[tokio::test]
async fn home_returns_welcome_message() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Welcome to FastAPI!" }));
}

#[tokio::test]
async fn home_works_regardless_of_dataset_state() {
    // A state pointing at a missing file must not affect the root route.
    let app = router(AppState::new("does/not/exist.xlsx"));
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to FastAPI!");
}

#[tokio::test]
async fn data_returns_headers_and_row_objects() {
    let (status, body) = get(app(), "/data").await;
    assert_eq!(status, StatusCode::OK);

    let headers = body["headers"].as_array().unwrap();
    assert_eq!(headers.len(), 8);
    assert_eq!(headers[0], COUNTRY_CODE_COLUMN);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0][COUNTRY_CODE_COLUMN], "US");
    assert_eq!(data[2][PROCESS_NAME_COLUMN], "propane production");
}

#[tokio::test]
async fn country_path_filters_case_insensitively() {
    let (status, body) = get(app(), "/data/country/us").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r[COUNTRY_CODE_COLUMN] == "US"));
}

#[tokio::test]
async fn country_path_unknown_code_is_404_with_detail() {
    let (status, body) = get(app(), "/data/country/FR").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No matching data found");
}

#[tokio::test]
async fn country_query_param_filters_rows() {
    let (status, body) = get(app(), "/data/country?country_code=de").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn country_query_param_is_required() {
    let (status, _) = get(app(), "/data/country").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_matches_iso_code_first() {
    let (status, body) = get(app(), "/data/search?query=us").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_falls_back_to_country_name() {
    let (status, body) = get(app(), "/data/search?query=germany").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][COUNTRY_NAME_COLUMN], "Germany");
}

#[tokio::test]
async fn search_miss_is_404() {
    let (status, _) = get(app(), "/data/search?query=atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn process_route_matches_whole_name_case_insensitively() {
    let (status, body) = get(app(), "/data/process/Propane%20Production").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][COUNTRY_CODE_COLUMN], "DE");

    let (status, _) = get(app(), "/data/process/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gwp_aggregate_reports_country_and_total() {
    let (status, body) = get(app(), "/data/gwp/aggregate/US").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "United States");
    assert_eq!(body["total_GWP100"], 35.0);
}

#[tokio::test]
async fn aggregate_total_equals_sum_of_by_column() {
    let (status, body) = get(app(), "/data/aggregate/US").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country"], "United States");
    assert_eq!(body["total_GWP100"], 35.0);
    assert_eq!(body["min_GWP100"], 0.0);
    assert_eq!(body["max_GWP100"], 30.0);

    let by_column = body["total_GWP100_by_column"].as_object().unwrap();
    assert_eq!(by_column.len(), 5);
    let sum: f64 = by_column.values().map(|v| v.as_f64().unwrap()).sum();
    assert_eq!((sum * 100.0).round() / 100.0, body["total_GWP100"].as_f64().unwrap());
    for v in by_column.values() {
        let v = v.as_f64().unwrap();
        assert!(body["min_GWP100"].as_f64().unwrap() <= v);
        assert!(v <= body["max_GWP100"].as_f64().unwrap());
    }
}

#[tokio::test]
async fn aggregate_unknown_country_is_404() {
    let (status, _) = get(app(), "/data/gwp/aggregate/XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app(), "/data/aggregate/XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn process_names_without_query_lists_all_distinct_names() {
    let (status, body) = get(app(), "/data/process_names/search").await;
    assert_eq!(status, StatusCode::OK);
    let names = body["process_names"].as_array().unwrap();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "propylene production");
}

#[tokio::test]
async fn process_names_prefix_query_filters() {
    let (status, body) = get(app(), "/data/process_names/search?query=pro").await;
    assert_eq!(status, StatusCode::OK);
    let names = body["process_names"].as_array().unwrap();
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn process_names_miss_returns_sentinel_message() {
    let (status, body) = get(app(), "/data/process_names/search?query=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "No Process Name found" }));
}

#[tokio::test]
async fn missing_key_column_is_a_500_schema_error() {
    // A table without the ISO code column: country routes must 500, not 404.
    let table = Table::new(
        vec!["other".to_string()],
        vec![vec![Value::Utf8("x".to_string())]],
    );
    let app = router(AppState::with_table(table));

    let (status, body) = get(app, "/data/country/US").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        format!("Missing '{COUNTRY_CODE_COLUMN}' column in dataset")
    );
}

#[tokio::test]
async fn missing_dataset_file_maps_to_404_on_data_routes() {
    let app = router(AppState::new("does/not/exist.xlsx"));
    let (status, body) = get(app, "/data/country/US").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "File not found in uploads folder");
}
