//! Client against a live server on an ephemeral port

use book_catalog::prelude::*;
use book_catalog_client::{BookUpload, CatalogClient, ClientError};
use reqwest::StatusCode;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];

async fn spawn_server(repository: InMemoryBookRepository) -> CatalogClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = AppState::new(repository).with_default_page_size(2);
    let app = Server::new(Config::default()).layered(router(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    CatalogClient::new(format!("http://{addr}/api/v2"))
}

#[tokio::test]
async fn test_create_fetch_update_delete() {
    let client = spawn_server(InMemoryBookRepository::new()).await;

    let created = client
        .create_book(
            &BookUpload::new("Dune", ReadingList::ToRead)
                .with_author("Frank Herbert")
                .with_subtitle("")
                .with_cover(PNG),
        )
        .await
        .unwrap();
    assert_eq!(created.title, "Dune");
    assert_eq!(created.subtitle, None);
    assert_eq!(created.cover, format!("/api/v2/books/covers/{}", created.id));

    let fetched = client.get_book(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(client.get_cover(created.id).await.unwrap(), PNG);

    let updated = client
        .update_book(
            &BookUpload::new("Dune Messiah", ReadingList::ReadingNow).with_id(created.id),
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.author, None);
    assert_eq!(client.get_cover(created.id).await.unwrap(), PNG);

    client.delete_book(created.id).await.unwrap();
    let missing = client.get_book(created.id).await.unwrap_err();
    assert_eq!(missing.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_list_and_reading_list() {
    let repository = InMemoryBookRepository::with_books([
        NewBook::new("Emma", ReadingList::AlreadyRead).with_author("Jane Austen"),
        NewBook::new("Persuasion", ReadingList::ToRead).with_author("Jane Austen"),
        NewBook::new("Beloved", ReadingList::ToRead).with_author("Toni Morrison"),
        NewBook::new("Sense and Sensibility", ReadingList::ToRead).with_author("Jane Austen"),
    ])
    .await
    .unwrap();
    let client = spawn_server(repository).await;

    let page = client
        .list_books(&ListQuery::new().with_author("austen").with_order_by("title"))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next);
    let titles: Vec<_> = page.results.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Emma", "Persuasion"]);

    let to_read = client.reading_list(ReadingList::ToRead).await.unwrap();
    assert_eq!(to_read.list, ReadingList::ToRead);
    assert_eq!(to_read.books.len(), 3);
}

#[tokio::test]
async fn test_cover_of_unknown_book_is_placeholder() {
    let client = spawn_server(InMemoryBookRepository::new()).await;
    let cover = client.get_cover(999).await.unwrap();
    assert_eq!(cover, book_catalog::representation::PLACEHOLDER_COVER);
}

#[tokio::test]
async fn test_validation_failure_carries_field_errors() {
    let client = spawn_server(InMemoryBookRepository::new()).await;

    let error = client
        .create_book(&BookUpload::new("", ReadingList::ToRead))
        .await
        .unwrap_err();

    assert!(matches!(error, ClientError::Status { .. }));
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    let body = error.error_response().unwrap();
    assert!(body.errors.iter().any(|e| e.field == "title"));
}

#[tokio::test]
async fn test_update_of_missing_book_is_not_found() {
    let client = spawn_server(InMemoryBookRepository::new()).await;

    let error = client
        .update_book(&BookUpload::new("Ghost", ReadingList::ToRead).with_id(7))
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
}
