use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dealership_catalog::models::vehicle::PLACEHOLDER_IMAGE;
use dealership_catalog::{CatalogClient, InventoryPage, LoadState, SortOption, VehicleCondition};

fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

fn vehicle(id: &str, make: &str, model: &str, price: f64, featured: bool, created_at: &str) -> Value {
    json!({
        "id": id,
        "make": make,
        "model": model,
        "year": 2021,
        "price": price,
        "mileage": 12000,
        "featured": featured,
        "images": [format!("https://cdn.example.com/{}.jpg", id)],
        "condition": "Foreign Used",
        "createdAt": created_at
    })
}

fn inventory() -> Value {
    json!([
        vehicle("1", "Toyota", "Camry", 15000.0, true, "2024-01-01T00:00:00.000Z"),
        vehicle("2", "Honda", "Accord", 18000.0, true, "2024-03-01T00:00:00.000Z"),
        vehicle("3", "Toyota", "Corolla", 11000.0, false, "2024-02-01T00:00:00.000Z"),
        vehicle("4", "Lexus", "RX 350", 38000.0, true, "2024-05-01T00:00:00.000Z"),
        vehicle("5", "Toyota", "RAV4", 22000.0, true, "2024-04-01T00:00:00.000Z"),
    ])
}

async fn mount_inventory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(inventory())))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_fetch_vehicles_normalizes_partial_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "id": "sparse" }
        ]))))
        .mount(&mock_server)
        .await;

    let vehicles = client_for(&mock_server).fetch_vehicles().await;

    assert_eq!(vehicles.len(), 1);
    let vehicle = &vehicles[0];
    assert_eq!(vehicle.make, "Unknown");
    assert_eq!(vehicle.model, "Unknown");
    assert_eq!(vehicle.price, 0.0);
    assert_eq!(vehicle.images, vec![PLACEHOLDER_IMAGE.to_string()]);
    assert_eq!(vehicle.condition, VehicleCondition::NigerianUsed);
    assert_eq!(vehicle.body_type, "Sedan");
    assert!(vehicle.created_at.is_some());
}

#[tokio::test]
async fn test_mixed_record_types_keep_good_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            vehicle("1", "Toyota", "Camry", 15000.0, false, "2024-01-01T00:00:00.000Z"),
            { "id": 2, "make": "Honda", "model": "Civic", "year": "2019", "price": "12500" },
            { "id": "3", "make": "Kia", "year": 2020.0, "images": "broken" },
            "not a vehicle"
        ]))))
        .mount(&mock_server)
        .await;

    let vehicles = client_for(&mock_server).fetch_vehicles().await;
    let ids: Vec<&str> = vehicles.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    assert_eq!(vehicles[1].year, 2019);
    assert_eq!(vehicles[1].price, 12500.0);
    assert_eq!(vehicles[2].year, 2020);
    assert_eq!(vehicles[2].images, vec![PLACEHOLDER_IMAGE.to_string()]);
}

#[tokio::test]
async fn test_fetch_vehicles_swallows_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.fetch_vehicles().await.is_empty());
    assert!(client.try_fetch_vehicles().await.is_err());
}

#[tokio::test]
async fn test_unsuccessful_envelope_yields_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Failed to fetch vehicles",
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.fetch_vehicles().await.is_empty());

    let error = client.try_fetch_vehicles().await.unwrap_err();
    assert!(error.to_string().contains("Failed to fetch vehicles"));
}

#[tokio::test]
async fn test_featured_vehicles_newest_first() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server).await;

    let featured = client_for(&mock_server).get_featured_vehicles(3).await;
    let ids: Vec<&str> = featured.iter().map(|v| v.id.as_str()).collect();

    assert_eq!(ids, vec!["4", "5", "2"]);
}

#[tokio::test]
async fn test_featured_limit_over_mixed_inventory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            vehicle("f1", "Toyota", "Camry", 15000.0, true, "2024-01-10T00:00:00.000Z"),
            vehicle("n1", "Honda", "Fit", 7000.0, false, "2024-12-01T00:00:00.000Z"),
            vehicle("f2", "Lexus", "ES", 30000.0, true, "2024-06-10T00:00:00.000Z"),
            vehicle("f3", "Kia", "Rio", 8000.0, true, "2024-03-10T00:00:00.000Z"),
            vehicle("n2", "Ford", "Edge", 21000.0, false, "2024-11-01T00:00:00.000Z"),
            vehicle("f4", "BMW", "X3", 35000.0, true, "2024-08-10T00:00:00.000Z"),
            vehicle("f5", "Audi", "A4", 28000.0, true, "2024-02-10T00:00:00.000Z"),
        ]))))
        .mount(&mock_server)
        .await;

    let featured = client_for(&mock_server).get_featured_vehicles(3).await;
    let ids: Vec<&str> = featured.iter().map(|v| v.id.as_str()).collect();

    assert_eq!(ids, vec!["f4", "f2", "f3"]);
    assert!(featured.iter().all(|v| v.featured));
}

#[tokio::test]
async fn test_vehicle_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vehicle("3", "Toyota", "Corolla", 11000.0, false, "2024-02-01T00:00:00.000Z"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vehicles/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let found = client.get_vehicle_by_id("3").await.unwrap();
    assert_eq!(found.model, "Corolla");

    assert!(client.get_vehicle_by_id("missing").await.is_none());
}

#[tokio::test]
async fn test_related_vehicles_share_make() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/vehicles/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vehicle("1", "Toyota", "Camry", 15000.0, true, "2024-01-01T00:00:00.000Z"),
        )))
        .mount(&mock_server)
        .await;

    let related = client_for(&mock_server).get_related_vehicles("1", 4).await;
    let ids: Vec<&str> = related.iter().map(|v| v.id.as_str()).collect();

    assert_eq!(ids, vec!["3", "5"]);
}

#[tokio::test]
async fn test_inventory_page_retry_after_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_inventory(&mock_server).await;

    let mut page = InventoryPage::new(client_for(&mock_server));
    assert!(page.is_loading());

    page.load().await;
    assert!(matches!(page.state(), LoadState::Failed(_)));
    assert!(page.error().is_some());
    assert!(page.visible().is_empty());

    page.retry().await;
    assert_eq!(page.state(), &LoadState::Ready);
    assert_eq!(page.visible().len(), 5);
    assert_eq!(page.makes(), ["Honda", "Lexus", "Toyota"]);
}

#[tokio::test]
async fn test_inventory_page_debounced_search() {
    let mock_server = MockServer::start().await;
    mount_inventory(&mock_server).await;

    let mut page = InventoryPage::with_search_delay(client_for(&mock_server), Duration::from_millis(300));
    page.load().await;

    tokio::time::pause();

    page.type_search("toy");
    page.type_search("toyota");
    assert_eq!(page.search_input(), "toyota");
    assert_eq!(page.visible().len(), 5);

    tokio::time::sleep(Duration::from_millis(350)).await;

    page.view_mut().set_sort(SortOption::PriceLow);
    let prices: Vec<f64> = page.visible().iter().map(|v| v.price).collect();
    assert_eq!(prices, vec![11000.0, 15000.0, 22000.0]);

    page.reset_filters();
    assert_eq!(page.search_input(), "");
    assert_eq!(page.visible().len(), 5);
}
