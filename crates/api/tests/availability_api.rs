//! Integration tests for the availability admin endpoints.

mod common;

use axum::http::{header, StatusCode};
use sqlx::SqlitePool;

use common::{
    body_json, body_text, build_test_app, current_default, get, post, post_csrf, post_form_csrf,
    seed_availability, seed_product, set_default, test_csrf_token,
};
use shopkit_db::repositories::ProductRepo;

const LIST_PATH: &str = "/admin/product/availability/list/";
const SETTING_PATH: &str = "/admin/product/availability/setting/";

fn delete_path(id: i64) -> String {
    format!("/admin/product/availability/delete/{id}")
}

fn delete_confirm_path(id: i64) -> String {
    format!("/admin/product/availability/delete_confirm/{id}")
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_returns_grid_of_availabilities(pool: SqlitePool) {
    seed_availability(&pool, "Out of stock").await;
    seed_availability(&pool, "In stock").await;

    let response = get(build_test_app(pool), LIST_PATH).await;
    assert_eq!(response.status(), StatusCode::OK);

    let grid = body_json(response).await;
    assert_eq!(grid["columns"][0]["id"], "name");
    assert_eq!(grid["columns"][0]["sortable"], true);
    assert_eq!(grid["columns"][1]["id"], "actions");
    assert_eq!(grid["columns"][1]["sortable"], false);

    // Default ordering is by name, ascending.
    assert_eq!(grid["rows"][0]["name"], "In stock");
    assert_eq!(grid["rows"][1]["name"], "Out of stock");

    assert_eq!(grid["paging"]["page"], 1);
    assert_eq!(grid["paging"]["total_count"], 2);
    assert_eq!(grid["order"]["order_by"], "name");
    assert_eq!(grid["order"]["direction"], "asc");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_honors_ordering_params(pool: SqlitePool) {
    seed_availability(&pool, "Banana").await;
    seed_availability(&pool, "Apple").await;
    seed_availability(&pool, "Cherry").await;

    let response = get(
        build_test_app(pool),
        &format!("{LIST_PATH}?order_by=id&direction=desc"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let grid = body_json(response).await;
    assert_eq!(grid["rows"][0]["name"], "Cherry");
    assert_eq!(grid["rows"][1]["name"], "Apple");
    assert_eq!(grid["rows"][2]["name"], "Banana");
    assert_eq!(grid["order"]["order_by"], "id");
    assert_eq!(grid["order"]["direction"], "desc");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_paginates(pool: SqlitePool) {
    seed_availability(&pool, "Apple").await;
    seed_availability(&pool, "Banana").await;
    seed_availability(&pool, "Cherry").await;

    let response = get(
        build_test_app(pool),
        &format!("{LIST_PATH}?per_page=2&page=2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let grid = body_json(response).await;
    assert_eq!(grid["rows"].as_array().unwrap().len(), 1);
    assert_eq!(grid["rows"][0]["name"], "Cherry");
    assert_eq!(grid["paging"]["page"], 2);
    assert_eq!(grid["paging"]["per_page"], 2);
    assert_eq!(grid["paging"]["total_count"], 3);
    assert_eq!(grid["paging"]["total_pages"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rejects_unknown_sort_key(pool: SqlitePool) {
    let response = get(build_test_app(pool), &format!("{LIST_PATH}?order_by=price")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_unused_availability(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;

    let response = post_csrf(build_test_app(pool.clone()), &delete_path(on_request)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        LIST_PATH
    );

    let body = body_json(response).await;
    assert_eq!(body["flashes"][0]["kind"], "success");
    assert_eq!(
        body["flashes"][0]["message"],
        "Availability \"On request\" has been deleted."
    );

    let list = body_json(get(build_test_app(pool), LIST_PATH).await).await;
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
    assert_eq!(list["rows"][0]["name"], "In stock");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_with_replacement_moves_products(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;
    let product = seed_product(&pool, "Walnut desk", on_request).await;

    let response = post_csrf(
        build_test_app(pool.clone()),
        &format!("{}?new_id={in_stock}", delete_path(on_request)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_json(response).await;
    assert_eq!(body["flashes"][0]["kind"], "success");
    assert_eq!(
        body["flashes"][0]["message"],
        "Availability \"On request\" has been replaced by \"In stock\" and deleted."
    );

    let moved = ProductRepo::find_by_id(&pool, product)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.availability_id, in_stock);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_default_with_replacement_repoints_setting(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;
    set_default(&pool, in_stock).await;

    let response = post_csrf(
        build_test_app(pool.clone()),
        &format!("{}?new_id={on_request}", delete_path(in_stock)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(current_default(&pool).await, Some(on_request));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_id_flashes_error(pool: SqlitePool) {
    let response = post_csrf(build_test_app(pool), &delete_path(999)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_json(response).await;
    assert_eq!(body["flashes"][0]["kind"], "error");
    assert_eq!(
        body["flashes"][0]["message"],
        "The selected availability does not exist."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_unresolvable_replacement_flashes_error(pool: SqlitePool) {
    let on_request = seed_availability(&pool, "On request").await;

    let response = post_csrf(
        build_test_app(pool.clone()),
        &format!("{}?new_id=999", delete_path(on_request)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_json(response).await;
    assert_eq!(body["flashes"][0]["kind"], "error");
    assert_eq!(
        body["flashes"][0]["message"],
        "The selected replacement availability does not exist."
    );

    // Nothing was deleted.
    let list = body_json(get(build_test_app(pool), LIST_PATH).await).await;
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_rejects_replacement_equal_to_target(pool: SqlitePool) {
    let on_request = seed_availability(&pool, "On request").await;

    let response = post_csrf(
        build_test_app(pool),
        &format!("{}?new_id={on_request}", delete_path(on_request)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_default_without_replacement_is_conflict(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    set_default(&pool, in_stock).await;

    let response = post_csrf(build_test_app(pool.clone()), &delete_path(in_stock)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(
        body["error"],
        "The default in-stock availability cannot be deleted without choosing a replacement."
    );

    assert_eq!(current_default(&pool).await, Some(in_stock));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_used_without_replacement_is_conflict(pool: SqlitePool) {
    let on_request = seed_availability(&pool, "On request").await;
    seed_product(&pool, "Walnut desk", on_request).await;

    let response = post_csrf(build_test_app(pool.clone()), &delete_path(on_request)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");

    // The record survives.
    let list = body_json(get(build_test_app(pool), LIST_PATH).await).await;
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_requires_csrf_token(pool: SqlitePool) {
    let on_request = seed_availability(&pool, "On request").await;

    let response = post(build_test_app(pool.clone()), &delete_path(on_request)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["code"], "FORBIDDEN");

    let list = body_json(get(build_test_app(pool), LIST_PATH).await).await;
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_rejects_invalid_csrf_token(pool: SqlitePool) {
    let on_request = seed_availability(&pool, "On request").await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri(delete_path(on_request))
        .header("x-csrf-token", "0000")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(build_test_app(pool), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Delete confirmation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_confirm_missing_id_is_404(pool: SqlitePool) {
    let response = get(build_test_app(pool), &delete_confirm_path(999)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_text(response).await,
        "The selected availability does not exist."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_confirm_unused_is_plain_confirm(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;

    let response = get(build_test_app(pool), &delete_confirm_path(on_request)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let dialog = body_json(response).await;
    assert_eq!(dialog["mode"], "confirm");
    assert_eq!(
        dialog["message"],
        "Do you really want to permanently remove availability \"On request\"? It is not used anywhere."
    );
    assert_eq!(dialog["delete_route"], "admin_availability_delete");
    assert_eq!(
        dialog["delete_url"],
        format!("/admin/product/availability/delete/{on_request}")
    );
    assert_eq!(dialog["id"], on_request);
    assert!(dialog["candidates"].as_object().unwrap().is_empty());
    assert_eq!(dialog["csrf_token"], test_csrf_token());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_confirm_used_asks_for_replacement(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;
    seed_product(&pool, "Walnut desk", on_request).await;

    let response = get(build_test_app(pool), &delete_confirm_path(on_request)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let dialog = body_json(response).await;
    assert_eq!(dialog["mode"], "set_new_and_delete");
    let message = dialog["message"].as_str().unwrap();
    assert!(message.contains("is still used for some products"));
    assert!(message.starts_with("Availability \"On request\""));

    let candidates = dialog["candidates"].as_object().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[&in_stock.to_string()], "In stock");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_confirm_default_wins_over_used(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    seed_availability(&pool, "On request").await;
    seed_product(&pool, "Walnut desk", in_stock).await;
    set_default(&pool, in_stock).await;

    let response = get(build_test_app(pool), &delete_confirm_path(in_stock)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let dialog = body_json(response).await;
    assert_eq!(dialog["mode"], "set_new_and_delete");
    let message = dialog["message"].as_str().unwrap();
    assert!(message.contains("is set as the default availability for in-stock goods"));
    assert!(!message.contains("still used"));
}

// ---------------------------------------------------------------------------
// Default-availability setting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_form_shows_current_default(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    seed_availability(&pool, "On request").await;
    set_default(&pool, in_stock).await;

    let response = get(build_test_app(pool), SETTING_PATH).await;
    assert_eq!(response.status(), StatusCode::OK);

    let view = body_json(response).await;
    assert_eq!(view["availabilities"].as_array().unwrap().len(), 2);
    assert_eq!(view["availabilities"][0]["name"], "In stock");
    assert_eq!(view["data"]["default_in_stock_availability"], in_stock);
    assert!(view["errors"].as_array().unwrap().is_empty());
    assert_eq!(view["csrf_token"], test_csrf_token());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_form_default_absent_when_unset(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;

    let view = body_json(get(build_test_app(pool), SETTING_PATH).await).await;
    assert!(view["data"]["default_in_stock_availability"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_submit_updates_default(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;
    let on_request = seed_availability(&pool, "On request").await;

    let response = post_form_csrf(
        build_test_app(pool.clone()),
        SETTING_PATH,
        &format!("default_in_stock_availability={on_request}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        LIST_PATH
    );

    let body = body_json(response).await;
    assert_eq!(body["flashes"][0]["kind"], "success");
    assert_eq!(
        body["flashes"][0]["message"],
        "The default availability for in-stock goods has been updated."
    );

    assert_eq!(current_default(&pool).await, Some(on_request));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_submit_blank_is_unprocessable(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;

    let response = post_form_csrf(
        build_test_app(pool.clone()),
        SETTING_PATH,
        "default_in_stock_availability=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = body_json(response).await;
    assert_eq!(
        view["errors"][0],
        "Please choose the default availability for in-stock goods."
    );
    assert_eq!(view["availabilities"].as_array().unwrap().len(), 1);

    assert_eq!(current_default(&pool).await, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_submit_unknown_id_is_unprocessable(pool: SqlitePool) {
    seed_availability(&pool, "In stock").await;

    let response = post_form_csrf(
        build_test_app(pool.clone()),
        SETTING_PATH,
        "default_in_stock_availability=999",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = body_json(response).await;
    assert_eq!(view["errors"][0], "The selected availability does not exist.");

    assert_eq!(current_default(&pool).await, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_submit_requires_csrf_token(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri(SETTING_PATH)
        .header(
            axum::http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(axum::body::Body::from(format!(
            "default_in_stock_availability={in_stock}"
        )))
        .unwrap();
    let response = tower::ServiceExt::oneshot(build_test_app(pool.clone()), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(current_default(&pool).await, None);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unused_availability_lifecycle(pool: SqlitePool) {
    let in_stock = seed_availability(&pool, "In stock").await;
    let out_of_stock = seed_availability(&pool, "Out of stock").await;
    set_default(&pool, in_stock).await;

    // Confirmation is the plain variant: not default, not used.
    let dialog = body_json(
        get(
            build_test_app(pool.clone()),
            &delete_confirm_path(out_of_stock),
        )
        .await,
    )
    .await;
    assert_eq!(dialog["mode"], "confirm");
    assert_eq!(
        dialog["message"],
        "Do you really want to permanently remove availability \"Out of stock\"? It is not used anywhere."
    );

    let response = post_csrf(build_test_app(pool.clone()), &delete_path(out_of_stock)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let body = body_json(response).await;
    assert_eq!(
        body["flashes"][0]["message"],
        "Availability \"Out of stock\" has been deleted."
    );

    let list = body_json(get(build_test_app(pool.clone()), LIST_PATH).await).await;
    assert_eq!(list["rows"].as_array().unwrap().len(), 1);
    assert_eq!(list["rows"][0]["name"], "In stock");
    assert_eq!(current_default(&pool).await, Some(in_stock));
}
