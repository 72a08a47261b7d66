//! API integration tests
//!
//! These run against a live server (cargo run) with a clean-ish database and
//! the default bootstrap admin. Run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Unique email/title suffix so tests can re-run against the same database
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn login(client: &Client, email: &str, password: &str, role: &str) -> String {
    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": password, "role": role }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", email);

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn admin_token(client: &Client) -> String {
    login(client, "admin@biblios.local", "admin", "admin").await
}

/// Create a member via the admin API and log them in
async fn create_member(client: &Client, admin_token: &str) -> (String, String) {
    let email = format!("{}@example.com", unique("member"));

    let response = client
        .post(format!("{}/add-user", BASE_URL))
        .bearer_auth(admin_token)
        .json(&json!({
            "name": "Test Member",
            "email": email,
            "role": "member",
            "password": "memberpass"
        }))
        .send()
        .await
        .expect("Failed to send add-user request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let token = login(client, &email, "memberpass", "member").await;
    (email, token)
}

/// Create a book via the admin API and return its id from the catalog
async fn create_book(client: &Client, admin_token: &str, title: &str, copies: i32) -> i64 {
    let form = reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("author", "Test Author".to_string())
        .text("category", "Testing".to_string())
        .text("total_copies", copies.to_string());

    let response = client
        .post(format!("{}/add-book", BASE_URL))
        .bearer_auth(admin_token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to send add-book request");

    assert_eq!(response.status(), StatusCode::CREATED);

    book_by_title(client, title).await["id"]
        .as_i64()
        .expect("No book id")
}

async fn book_by_title(client: &Client, title: &str) -> Value {
    let books: Vec<Value> = client
        .get(format!("{}/see-books", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch books")
        .json()
        .await
        .expect("Failed to parse books");

    books
        .into_iter()
        .find(|b| b["title"] == title)
        .expect("Book not found in catalog")
}

async fn borrow(client: &Client, token: &str, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrow-book", BASE_URL))
        .bearer_auth(token)
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send borrow request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "email": "admin@biblios.local",
            "password": "wrong",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_role_rejected() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (email, _) = create_member(&client, &admin).await;

    // Correct credentials, wrong role claim
    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({ "email": email, "password": "memberpass", "role": "admin" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_requests_rejected() {
    let client = Client::new();

    for path in ["/logout", "/history/data", "/borrowed-books/data"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_admin_endpoints_reject_members() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, member) = create_member(&client, &admin).await;

    let add_user = client
        .post(format!("{}/add-user", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({
            "name": "Sneaky",
            "email": format!("{}@example.com", unique("sneaky")),
            "role": "admin",
            "password": "password"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(add_user.status(), StatusCode::FORBIDDEN);

    let form = reqwest::multipart::Form::new()
        .text("title", "Forbidden")
        .text("author", "Nobody")
        .text("category", "None")
        .text("total_copies", "1");
    let add_book = client
        .post(format!("{}/add-book", BASE_URL))
        .bearer_auth(&member)
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(add_book.status(), StatusCode::FORBIDDEN);

    let report = client
        .get(format!("{}/borrowed-books/data", BASE_URL))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(report.status(), StatusCode::FORBIDDEN);

    let delete = client
        .delete(format!("{}/borrowed-books/delete/1", BASE_URL))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_borrow_rejected_for_admin() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, &unique("Admin Borrow"), 1).await;

    let response = borrow(&client, &admin, book_id).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore]
async fn test_add_book_appears_in_catalog() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let title = unique("Catalog Book");

    create_book(&client, &admin, &title, 3).await;

    let book = book_by_title(&client, &title).await;
    assert_eq!(book["total_copies"], 3);
    assert_eq!(book["available_copies"], 3);
    assert_eq!(book["author"], "Test Author");
}

#[tokio::test]
#[ignore]
async fn test_add_book_missing_fields() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let form = reqwest::multipart::Form::new()
        .text("title", "Incomplete")
        .text("author", "Nobody");

    let response = client
        .post(format!("{}/add-book", BASE_URL))
        .bearer_auth(&admin)
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_borrow_decrements_and_records_history() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (email, member) = create_member(&client, &admin).await;
    let title = unique("Borrowable");
    let book_id = create_book(&client, &admin, &title, 2).await;

    let response = borrow(&client, &member, book_id).await;
    assert!(response.status().is_success());
    let text = response.text().await.expect("Failed to read body");
    assert!(text.contains(&title));

    let book = book_by_title(&client, &title).await;
    assert_eq!(book["available_copies"], 1);

    // The member sees an open record for the book
    let history: Vec<Value> = client
        .get(format!("{}/history/data", BASE_URL))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to fetch history")
        .json()
        .await
        .expect("Failed to parse history");

    let entry = history
        .iter()
        .find(|h| h["title"] == title.as_str())
        .expect("No history entry for borrowed book");
    assert!(entry["return_date"].is_null());

    // The admin report attributes it to the member
    let report: Vec<Value> = client
        .get(format!("{}/borrowed-books/data", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse report");

    assert!(report
        .iter()
        .any(|r| r["book_title"] == title.as_str() && r["user_email"] == email.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_borrow_limit_enforced() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, member) = create_member(&client, &admin).await;
    let book_id = create_book(&client, &admin, &unique("Limit Book"), 5).await;

    assert!(borrow(&client, &member, book_id).await.status().is_success());
    assert!(borrow(&client, &member, book_id).await.status().is_success());

    let third = borrow(&client, &member, book_id).await;
    assert_eq!(third.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_borrow_without_copies_rejected() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, first) = create_member(&client, &admin).await;
    let (_, second) = create_member(&client, &admin).await;
    let book_id = create_book(&client, &admin, &unique("Single Copy"), 1).await;

    assert!(borrow(&client, &first, book_id).await.status().is_success());

    let response = borrow(&client, &second, book_id).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_return_flow() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, member) = create_member(&client, &admin).await;
    let title = unique("Returnable");
    let book_id = create_book(&client, &admin, &title, 1).await;

    assert!(borrow(&client, &member, book_id).await.status().is_success());

    let history: Vec<Value> = client
        .get(format!("{}/history/data", BASE_URL))
        .bearer_auth(&member)
        .send()
        .await
        .expect("Failed to fetch history")
        .json()
        .await
        .expect("Failed to parse history");
    let history_id = history
        .iter()
        .find(|h| h["title"] == title.as_str() && h["return_date"].is_null())
        .and_then(|h| h["history_id"].as_i64())
        .expect("No open record");

    let response = client
        .post(format!("{}/return-book", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({ "history_id": history_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send return request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(body["return_date"].is_string());

    let book = book_by_title(&client, &title).await;
    assert_eq!(book["available_copies"], 1);

    // Second return of the same record fails
    let again = client
        .post(format!("{}/return-book", BASE_URL))
        .bearer_auth(&member)
        .json(&json!({ "history_id": history_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send return request");
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrow_of_last_copy() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, first) = create_member(&client, &admin).await;
    let (_, second) = create_member(&client, &admin).await;
    let title = unique("Contended");
    let book_id = create_book(&client, &admin, &title, 1).await;

    let (a, b) = tokio::join!(
        borrow(&client, &first, book_id),
        borrow(&client, &second, book_id)
    );

    let statuses = [a.status(), b.status()];
    let successes = statuses.iter().filter(|s| s.is_success()).count();
    assert_eq!(successes, 1, "exactly one borrow must win, got {:?}", statuses);

    assert_eq!(book_by_title(&client, &title).await["available_copies"], 0);
}

#[tokio::test]
#[ignore]
async fn test_delete_open_record_restores_availability() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (email, member) = create_member(&client, &admin).await;
    let title = unique("Deletable");
    let book_id = create_book(&client, &admin, &title, 1).await;

    assert!(borrow(&client, &member, book_id).await.status().is_success());
    assert_eq!(book_by_title(&client, &title).await["available_copies"], 0);

    let report: Vec<Value> = client
        .get(format!("{}/borrowed-books/data", BASE_URL))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to fetch report")
        .json()
        .await
        .expect("Failed to parse report");
    let record_id = report
        .iter()
        .find(|r| r["book_title"] == title.as_str() && r["user_email"] == email.as_str())
        .and_then(|r| r["id"].as_i64())
        .expect("Record not in report");

    let response = client
        .delete(format!("{}/borrowed-books/delete/{}", BASE_URL, record_id))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send delete request");
    assert!(response.status().is_success());

    assert_eq!(book_by_title(&client, &title).await["available_copies"], 1);

    // Deleting the same record again is a 404
    let again = client
        .delete(format!("{}/borrowed-books/delete/{}", BASE_URL, record_id))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_history_scoped_to_member() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let (_, first) = create_member(&client, &admin).await;
    let (_, second) = create_member(&client, &admin).await;
    let first_title = unique("First Member Book");
    let second_title = unique("Second Member Book");
    let first_book = create_book(&client, &admin, &first_title, 1).await;
    let second_book = create_book(&client, &admin, &second_title, 1).await;

    assert!(borrow(&client, &first, first_book).await.status().is_success());
    assert!(borrow(&client, &second, second_book).await.status().is_success());

    let history: Vec<Value> = client
        .get(format!("{}/history/data", BASE_URL))
        .bearer_auth(&first)
        .send()
        .await
        .expect("Failed to fetch history")
        .json()
        .await
        .expect("Failed to parse history");

    assert!(history.iter().any(|h| h["title"] == first_title.as_str()));
    assert!(!history.iter().any(|h| h["title"] == second_title.as_str()));
}
