// The courier API has shipped several shapes for the create-manifest
// response across integration versions. These tests pin the reconciliation
// behavior for each known variant through the full pipeline.

use httpmock::prelude::*;
use manifest_etl::core::{Pipeline, PickupLocation, ShipmentDefaults};
use manifest_etl::{AppConfig, CourierClient, LocalStorage, ManifestPipeline, PipelineError};
use tempfile::TempDir;

const ORDERS_CSV: &str = "\
Sale Order Number,Customer Name,Quantity Ordered,Unit Item Price
A1,Asha Rao,1,100.00
A2,Vikram Shah,1,200.00
A3,Meera Iyer,1,300.00
";

fn pipeline_for(
    server: &MockServer,
    temp_dir: &TempDir,
) -> ManifestPipeline<LocalStorage, AppConfig> {
    let input = temp_dir.path().join("orders.csv");
    std::fs::write(&input, ORDERS_CSV).unwrap();

    let config = AppConfig {
        input_file: input.to_str().unwrap().to_string(),
        output_path: temp_dir.path().to_str().unwrap().to_string(),
        selected_orders: vec!["A1".to_string(), "A2".to_string(), "A3".to_string()],
        dry_run: false,
        defaults: ShipmentDefaults::default(),
        pickup: PickupLocation {
            name: "MainWarehouse".to_string(),
            city: "Kolkata".to_string(),
            pin: "700107".to_string(),
            country: "India".to_string(),
        },
    };
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    ManifestPipeline::new(LocalStorage::new(".".to_string()), config, courier)
}

async fn reconcile_against(
    server: &MockServer,
    temp_dir: &TempDir,
) -> Result<Vec<(String, String)>, PipelineError> {
    let pipeline = pipeline_for(server, temp_dir);
    let rows = pipeline.extract().await?;
    let built = pipeline.transform(rows).await?;
    let outcome = pipeline.manifest(&built).await?;
    Ok(outcome
        .results
        .into_iter()
        .map(|r| (r.order, r.waybill))
        .collect())
}

fn mock_response(server: &MockServer, body: serde_json::Value) {
    server.mock(|when, then| {
        when.method(POST).path("/api/cmu/create.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    });
}

#[tokio::test]
async fn test_packages_collection_shape() {
    let server = MockServer::start();
    mock_response(
        &server,
        serde_json::json!({
            "packages": [{"order": "A2", "waybill": "WB2"}]
        }),
    );

    let temp_dir = TempDir::new().unwrap();
    let results = reconcile_against(&server, &temp_dir).await.unwrap();
    assert_eq!(
        results,
        vec![
            ("A1".to_string(), "".to_string()),
            ("A2".to_string(), "WB2".to_string()),
            ("A3".to_string(), "".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_shipments_collection_with_alias_keys() {
    let server = MockServer::start();
    mock_response(
        &server,
        serde_json::json!({
            "shipments": [
                {"order_id": "A1", "wbn": "WB1"},
                {"reference": "A3", "awb": "WB3"}
            ]
        }),
    );

    let temp_dir = TempDir::new().unwrap();
    let results = reconcile_against(&server, &temp_dir).await.unwrap();
    assert_eq!(results[0].1, "WB1");
    assert_eq!(results[1].1, "");
    assert_eq!(results[2].1, "WB3");
}

#[tokio::test]
async fn test_collections_wrapped_in_response_envelope() {
    let server = MockServer::start();
    mock_response(
        &server,
        serde_json::json!({
            "response": {
                "packages": [{"order": "A1", "waybill": "WB1"}]
            }
        }),
    );

    let temp_dir = TempDir::new().unwrap();
    let results = reconcile_against(&server, &temp_dir).await.unwrap();
    assert_eq!(results[0].1, "WB1");
}

#[tokio::test]
async fn test_error_object_without_collections_yields_empty_waybills() {
    let server = MockServer::start();
    mock_response(
        &server,
        serde_json::json!({
            "success": false,
            "rmk": "ClientWarehouse matching query does not exist"
        }),
    );

    let temp_dir = TempDir::new().unwrap();
    let results = reconcile_against(&server, &temp_dir).await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|(_, waybill)| waybill.is_empty()));
}

#[tokio::test]
async fn test_array_response_is_a_shape_error() {
    let server = MockServer::start();
    mock_response(&server, serde_json::json!([{"order": "A1"}]));

    let temp_dir = TempDir::new().unwrap();
    let err = reconcile_against(&server, &temp_dir).await.unwrap_err();
    assert!(matches!(err, PipelineError::ResponseShape { .. }));
}
