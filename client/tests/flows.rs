//! End-to-end flow tests against a mock backend: the chained sign-in flow,
//! catalog paging, the unauthenticated favorites guard, and the booking
//! lifecycle.

use motorlot_client::{
    ApiClient, ApiError, CarDraft, ClientConfig, ImageUpload, Notice, notice_channel,
};
use motorlot_types::{
    BookingId, CarFilter, CarId, CarStatus, FuelType, PageQuery, Role, Route, TestDriveStatus,
    Transmission, UserId, UserProfile,
};
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> (ApiClient, UnboundedReceiver<Notice>) {
    let config =
        ClientConfig::from_toml_str(&format!("api_base_url = \"{}\"", server.uri())).unwrap();
    let (notices, rx) = notice_channel();
    (ApiClient::new(&config, notices).unwrap(), rx)
}

fn customer_profile() -> UserProfile {
    UserProfile {
        id: UserId::new(2),
        email: "jo@example.com".into(),
        full_name: "Jo Smith".into(),
        role: Role::Customer,
    }
}

fn ok_envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "message": "ok",
        "data": data
    }))
}

fn car_json(id: i64, make: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "make": make,
        "model": "Corolla",
        "year": 2021,
        "price": 18500.0,
        "transmission": "AUTOMATIC",
        "fuelType": "HYBRID",
        "status": "AVAILABLE",
        "images": [],
        "deleted": false
    })
}

fn booking_json(id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "carId": 5,
        "carMake": "Toyota",
        "carModel": "Corolla",
        "customerId": 2,
        "customerName": "Jo Smith",
        "customerEmail": "jo@example.com",
        "appointmentDate": "2026-08-20T14:30:00",
        "status": status
    })
}

async fn mount_login_and_me(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "jo@example.com",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true, "message": "Login successful"})),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ok_envelope(serde_json::json!({
            "id": 2,
            "email": "jo@example.com",
            "fullName": "Jo Smith",
            "role": role
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn admin_sign_in_lands_on_dashboard() {
    let server = MockServer::start().await;
    mount_login_and_me(&server, "ADMIN").await;

    let (client, _rx) = client_for(&server).await;
    let signed_in = client.auth().sign_in("jo@example.com", "pw").await.unwrap();

    assert_eq!(signed_in.user.role, Role::Admin);
    assert_eq!(signed_in.destination, Route::AdminDashboard);
    assert_eq!(client.session().current_route(), Route::AdminDashboard);
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn customer_sign_in_lands_on_home() {
    let server = MockServer::start().await;
    mount_login_and_me(&server, "CUSTOMER").await;

    let (client, _rx) = client_for(&server).await;
    let signed_in = client.auth().sign_in("jo@example.com", "pw").await.unwrap();

    assert_eq!(signed_in.destination, Route::Home);
    assert_eq!(client.session().role(), Some(Role::Customer));
}

#[tokio::test]
async fn failed_login_never_fetches_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({"success": false, "message": "Invalid email or password"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    let err = client.auth().sign_in("jo@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn catalog_pages_are_disjoint_slices() {
    let server = MockServer::start().await;

    let first_page: Vec<serde_json::Value> =
        (1..=12).map(|id| car_json(id, "Toyota")).collect();
    let second_page: Vec<serde_json::Value> =
        (13..=24).map(|id| car_json(id, "Toyota")).collect();

    Mock::given(method("GET"))
        .and(path("/cars"))
        .and(query_param("make", "Toyota"))
        .and(query_param("page", "0"))
        .and(query_param("size", "12"))
        .respond_with(ok_envelope(serde_json::json!({
            "content": first_page,
            "page": 0,
            "size": 12,
            "totalElements": 24,
            "totalPages": 2,
            "last": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cars"))
        .and(query_param("make", "Toyota"))
        .and(query_param("page", "1"))
        .respond_with(ok_envelope(serde_json::json!({
            "content": second_page,
            "page": 1,
            "size": 12,
            "totalElements": 24,
            "totalPages": 2,
            "last": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    let filter = CarFilter {
        make: Some("Toyota".into()),
        ..CarFilter::default()
    };
    let query = PageQuery::default();

    let page0 = client.cars().list(&filter, &query).await.unwrap();
    assert_eq!(page0.len(), 12);
    assert_eq!(page0.total_elements, 24);

    let page1 = client.cars().list(&filter, &query.at_page(1)).await.unwrap();
    assert_eq!(page1.len(), 12);
    assert!(page1.last);

    let ids0: Vec<i64> = page0.content.iter().map(|car| car.id.value()).collect();
    let ids1: Vec<i64> = page1.content.iter().map(|car| car.id.value()).collect();
    assert!(ids0.iter().all(|id| !ids1.contains(id)));
}

#[tokio::test]
async fn unauthenticated_favorite_add_stays_local() {
    let server = MockServer::start().await;

    // Any favorites traffic at all fails the test.
    Mock::given(method("POST"))
        .and(path("/favorites/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, mut rx) = client_for(&server).await;
    let err = client.favorites().add(CarId::new(5)).await.unwrap_err();

    assert!(matches!(err, ApiError::LoginRequired));
    assert_eq!(rx.try_recv().unwrap(), Notice::LoginRequired);
    assert_eq!(client.session().current_route(), Route::Login);
}

#[tokio::test]
async fn favorite_round_trip_when_signed_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/favorites/5"))
        .respond_with(ok_envelope(serde_json::json!({
            "userId": 2,
            "carId": 5,
            "createdAt": "2026-08-01T10:15:30Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/favorites/with-details"))
        .respond_with(ok_envelope(serde_json::json!([car_json(5, "Toyota")])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/favorites/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true, "message": "Favorite removed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    client.session().set_auth(customer_profile());

    let favorite = client.favorites().add(CarId::new(5)).await.unwrap();
    assert_eq!(favorite.car_id, CarId::new(5));

    let cars = client.favorites().list_with_details().await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].make, "Toyota");

    let ack = client.favorites().remove(CarId::new(5)).await.unwrap();
    assert_eq!(ack, "Favorite removed");
}

#[tokio::test]
async fn pending_booking_cancel_issues_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-drives/my-bookings"))
        .respond_with(ok_envelope(serde_json::json!([
            booking_json(11, "PENDING"),
            booking_json(12, "APPROVED"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/test-drives/11"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true, "message": "Booking cancelled"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    client.session().set_auth(customer_profile());

    let bookings = client.test_drives().my_bookings().await.unwrap();
    let cancellable: Vec<_> = bookings
        .iter()
        .filter(|b| b.status.is_cancellable())
        .collect();
    assert_eq!(cancellable.len(), 1);
    assert_eq!(cancellable[0].id, BookingId::new(11));

    let ack = client.test_drives().cancel(BookingId::new(11)).await.unwrap();
    assert_eq!(ack, "Booking cancelled");
}

#[tokio::test]
async fn admin_approves_pending_booking() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/admin/test-drives/11/status"))
        .and(body_json(serde_json::json!({"status": "APPROVED"})))
        .respond_with(ok_envelope(booking_json(11, "APPROVED")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    let booking = client
        .admin_test_drives()
        .set_status(BookingId::new(11), TestDriveStatus::Approved)
        .await
        .unwrap();
    assert_eq!(booking.status, TestDriveStatus::Approved);
}

#[tokio::test]
async fn admin_creates_listing_with_images() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/cars"))
        .and(query_param("primaryIndex", "0"))
        .and(body_string_contains("name=\"data\""))
        .and(body_string_contains("\"make\":\"Toyota\""))
        .and(body_string_contains("name=\"images\""))
        .and(body_string_contains("front.jpg"))
        .respond_with(ok_envelope(car_json(31, "Toyota")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    let draft = CarDraft {
        make: "Toyota".into(),
        model: "Corolla".into(),
        year: 2021,
        price: 18500.0,
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Hybrid,
        description: Some("One owner".into()),
    };
    let images = vec![ImageUpload {
        file_name: "front.jpg".into(),
        bytes: b"fake-jpeg-bytes".to_vec(),
    }];

    let car = client.admin_cars().create(&draft, &images, Some(0)).await.unwrap();
    assert_eq!(car.id, CarId::new(31));
}

#[tokio::test]
async fn admin_inventory_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/admin/cars/31/status"))
        .and(body_json(serde_json::json!({"status": "SOLD"})))
        .respond_with(ok_envelope({
            let mut car = car_json(31, "Toyota");
            car["status"] = serde_json::json!("SOLD");
            car
        }))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/admin/cars/31"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true, "message": "Car deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/admin/cars/31/restore"))
        .respond_with(ok_envelope(car_json(31, "Toyota")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;

    let sold = client
        .admin_cars()
        .set_status(CarId::new(31), CarStatus::Sold)
        .await
        .unwrap();
    assert_eq!(sold.status, CarStatus::Sold);

    client.admin_cars().delete(CarId::new(31)).await.unwrap();
    let restored = client.admin_cars().restore(CarId::new(31)).await.unwrap();
    assert_eq!(restored.id, CarId::new(31));
}

#[tokio::test]
async fn profile_update_refreshes_session() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/users/profile"))
        .and(body_json(serde_json::json!({"fullName": "Jo Renamed"})))
        .respond_with(ok_envelope(serde_json::json!({
            "id": 2,
            "email": "jo@example.com",
            "fullName": "Jo Renamed",
            "role": "CUSTOMER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _rx) = client_for(&server).await;
    client.session().set_auth(customer_profile());

    let updated = client.auth().update_profile("Jo Renamed").await.unwrap();
    assert_eq!(updated.full_name, "Jo Renamed");
    assert_eq!(
        client.session().snapshot().user().unwrap().full_name,
        "Jo Renamed"
    );
}
