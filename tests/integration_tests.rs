use httpmock::prelude::*;
use manifest_etl::core::{PickupLocation, ShipmentDefaults};
use manifest_etl::{AppConfig, CourierClient, Engine, LocalStorage, ManifestPipeline, PipelineError};
use std::io::Read;
use tempfile::TempDir;

const ORDERS_CSV: &str = "\
Sale Order Number,Customer Name,Customer Phone,Shipping Address Line1,Shipping City,Shipping State,Shipping Pincode,Payment Mode,Transport Mode,Quantity Ordered,Unit Item Price,Weight (gm),Item Sku Name
PZ1001,Asha Rao,9876543210,12 Lake Road,Kolkata,West Bengal,700107,COD,Surface,2,450.00,\"1,250\",Oversized Tee
PZ1002,Vikram Shah,9123456780,4 Hill View,Pune,Maharashtra,411001,Prepaid,Express,1,899.00,500,Linen Shirt
,Missing Id,0000000000,Nowhere,Delhi,Delhi,110001,COD,Surface,1,100.00,100,Ghost Row
";

fn write_orders_csv(dir: &TempDir) -> String {
    let path = dir.path().join("orders.csv");
    std::fs::write(&path, ORDERS_CSV).unwrap();
    path.to_str().unwrap().to_string()
}

fn app_config(input: String, output: String) -> AppConfig {
    AppConfig {
        input_file: input,
        output_path: output,
        selected_orders: vec![],
        dry_run: false,
        defaults: ShipmentDefaults {
            consignee_gst_amount: "150.00".to_string(),
            integrated_gst_amount: "275.50".to_string(),
            gst_cess_amount: "35.25".to_string(),
            consignee_gst_tin: "27ABCDE1234F1Z5".to_string(),
            hsn_code: Some("851770".to_string()),
            country: "India".to_string(),
        },
        pickup: PickupLocation {
            name: "MainWarehouse".to_string(),
            city: "Kolkata".to_string(),
            pin: "700107".to_string(),
            country: "India".to_string(),
        },
    }
}

#[tokio::test]
async fn test_end_to_end_manifest_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_orders_csv(&temp_dir);
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/cmu/create.json")
            .body_contains("format=json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "success": true,
                "packages": [
                    {"order": "PZ1002", "waybill": "WB-2002", "status": "Success"},
                    {"order": "PZ1001", "waybill": "WB-2001", "status": "Success"}
                ]
            }));
    });

    let config = app_config(input, output_path.clone());
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    let storage = LocalStorage::new(".".to_string());
    let pipeline = ManifestPipeline::new(storage, config, courier);
    let engine = Engine::new(pipeline);

    let output_file = engine.run().await.unwrap();
    api_mock.assert();
    assert!(output_file.ends_with("manifest_output.zip"));

    let full_path = std::path::Path::new(&output_path).join("manifest_output.zip");
    assert!(full_path.exists());

    let zip_data = std::fs::read(&full_path).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["manifest_results.csv", "payload.json", "response.json"]
    );

    // Results come back in selection order, not remote order.
    let mut csv_content = String::new();
    archive
        .by_name("manifest_results.csv")
        .unwrap()
        .read_to_string(&mut csv_content)
        .unwrap();
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines[0], "order,waybill,status");
    assert_eq!(lines[1], "PZ1001,WB-2001,Success");
    assert_eq!(lines[2], "PZ1002,WB-2002,Success");

    // Payload carries the canonical shipments; the skipped row never shows up.
    let mut payload_content = String::new();
    archive
        .by_name("payload.json")
        .unwrap()
        .read_to_string(&mut payload_content)
        .unwrap();
    let payload: serde_json::Value = serde_json::from_str(&payload_content).unwrap();
    let shipments = payload["shipments"].as_array().unwrap();
    assert_eq!(shipments.len(), 2);
    assert_eq!(shipments[0]["order"], "PZ1001");
    assert_eq!(shipments[0]["payment_mode"], "COD");
    assert_eq!(shipments[0]["weight"], 1250);
    assert_eq!(shipments[0]["total_amount"], 900.0);
    assert_eq!(shipments[1]["shipping_mode"], "Express");
    assert_eq!(payload["pickup_location"]["name"], "MainWarehouse");
}

#[tokio::test]
async fn test_end_to_end_with_partial_remote_response() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_orders_csv(&temp_dir);
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/cmu/create.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "packages": [{"order": "PZ1002", "waybill": "WB-ONLY"}]
            }));
    });

    let mut config = app_config(input, output_path.clone());
    config.selected_orders = vec!["PZ1001".to_string(), "PZ1002".to_string()];
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    let pipeline = ManifestPipeline::new(LocalStorage::new(".".to_string()), config, courier);

    Engine::new(pipeline).run().await.unwrap();
    api_mock.assert();

    let zip_data =
        std::fs::read(std::path::Path::new(&output_path).join("manifest_output.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    let mut csv_content = String::new();
    archive
        .by_name("manifest_results.csv")
        .unwrap()
        .read_to_string(&mut csv_content)
        .unwrap();

    // Every selected order gets a row even when the remote omitted it.
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "PZ1001,,");
    assert_eq!(lines[2], "PZ1002,WB-ONLY,");
}

#[tokio::test]
async fn test_dry_run_builds_payload_without_calling_the_courier() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_orders_csv(&temp_dir);
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/cmu/create.json");
        then.status(200).json_body(serde_json::json!({}));
    });

    let mut config = app_config(input, output_path.clone());
    config.dry_run = true;
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    let pipeline = ManifestPipeline::new(LocalStorage::new(".".to_string()), config, courier);

    Engine::new(pipeline).run().await.unwrap();
    api_mock.assert_hits(0);

    let zip_data =
        std::fs::read(std::path::Path::new(&output_path).join("manifest_output.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
    assert_eq!(archive.len(), 1);
    assert!(archive.by_name("payload.json").is_ok());
}

#[tokio::test]
async fn test_remote_failure_surfaces_as_pipeline_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_orders_csv(&temp_dir);
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/cmu/create.json");
        then.status(500);
    });

    let config = app_config(input, output_path);
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    let pipeline = ManifestPipeline::new(LocalStorage::new(".".to_string()), config, courier);

    let err = Engine::new(pipeline).run().await.unwrap_err();
    api_mock.assert();
    assert!(matches!(err, PipelineError::Api(_)));
}

#[tokio::test]
async fn test_selection_of_unknown_orders_is_rejected_before_the_remote_call() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_orders_csv(&temp_dir);
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/cmu/create.json");
        then.status(200).json_body(serde_json::json!({}));
    });

    let mut config = app_config(input, output_path);
    config.selected_orders = vec!["DOES-NOT-EXIST".to_string()];
    let courier = CourierClient::new(server.base_url(), "test-token", 30);
    let pipeline = ManifestPipeline::new(LocalStorage::new(".".to_string()), config, courier);

    let err = Engine::new(pipeline).run().await.unwrap_err();
    api_mock.assert_hits(0);
    assert!(matches!(err, PipelineError::EmptySelection));
}
