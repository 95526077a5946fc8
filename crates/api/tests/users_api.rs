//! HTTP-level integration tests for the directory and admin user management.

mod common;

use axum::http::StatusCode;
use common::{
    admin_session, body_json, get_auth, login, patch_json_auth, post_json, post_json_auth,
    seed_user, TEST_PASSWORD,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_project(pool: &PgPool, token: &str, name: &str) -> Value {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/projects",
        json!({ "name": name }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["project"].clone()
}

// ---------------------------------------------------------------------------
// Admin creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_user_with_employee_code(pool: PgPool) {
    let (admin, token) = admin_session(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/users",
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "password": "secret123",
            "role": "MANAGER",
            "manager": admin.employee_code,
            "skills": ["rust", "sql"],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    let user = &json["data"]["user"];
    assert_eq!(user["role"], "MANAGER");
    assert_eq!(user["fullName"], "Ada Lovelace");
    assert_eq!(user["isFirstLogin"], true);
    assert_eq!(user["manager"]["employeeId"], admin.employee_code.as_str());
    assert_eq!(user["skills"], json!(["rust", "sql"]));

    // Codes within a year are sequential after the seeded admin.
    let admin_seq: u32 = admin.employee_code[9..].parse().unwrap();
    let new_seq: u32 = user["employeeId"].as_str().unwrap()[9..].parse().unwrap();
    assert_eq!(new_seq, admin_seq + 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_duplicate_email_any_case(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/admin/users",
        json!({
            "firstName": "Copy",
            "lastName": "Cat",
            "email": "ADMIN@Example.com",
            "password": "secret123",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "User with this email already exists"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_unknown_manager_is_not_found(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/admin/users",
        json!({
            "firstName": "No",
            "lastName": "Boss",
            "email": "noboss@example.com",
            "password": "secret123",
            "manager": "EMP-1999-0001",
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Admin updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_past_projects_merge_is_idempotent(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;
    let alpha = create_project(&pool, &token, "Alpha").await;
    let beta = create_project(&pool, &token, "Beta").await;
    let uri = format!("/api/admin/users/{}", emp.employee_code);

    let first = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "pastProjects": [alpha["projectCode"]] }),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "pastProjects": [beta["id"], alpha["id"]] }),
        &token,
    )
    .await;
    let again = patch_json_auth(
        common::build_test_app(pool),
        &uri,
        json!({ "pastProjects": [beta["id"], alpha["id"]] }),
        &token,
    )
    .await;

    let second = body_json(second).await;
    let again = body_json(again).await;
    let codes = |v: &Value| -> Vec<String> {
        v["data"]["user"]["pastProjects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["projectCode"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(codes(&second), vec!["PROJ-ALP-001", "PROJ-BET-001"]);
    assert_eq!(codes(&second), codes(&again));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manager_cannot_be_self(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;

    let response = patch_json_auth(
        common::build_test_app(pool),
        &format!("/api/admin/users/{}", emp.id),
        json!({ "manager": emp.id }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["message"],
        "A user cannot be their own manager"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clearing_current_project_with_null(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;
    let project = create_project(&pool, &token, "Nimbus").await;
    let uri = format!("/api/admin/users/{}", emp.id);

    let set = patch_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "currentProject": project["projectCode"], "designation": "Engineer" }),
        &token,
    )
    .await;
    let set = body_json(set).await;
    assert_eq!(set["data"]["user"]["currentProject"]["name"], "Nimbus");

    let cleared = patch_json_auth(
        common::build_test_app(pool),
        &uri,
        json!({ "currentProject": null }),
        &token,
    )
    .await;
    let cleared = body_json(cleared).await;
    assert!(cleared["data"]["user"]["currentProject"].is_null());
    assert_eq!(cleared["data"]["user"]["designation"], "Engineer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_disable_and_reset_password(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;

    let disabled = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/admin/users/{}/status", emp.employee_code),
        json!({ "isActive": false }),
        &token,
    )
    .await;
    assert_eq!(disabled.status(), StatusCode::OK);
    assert_eq!(body_json(disabled).await["message"], "User disabled successfully");

    let blocked = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": "emp@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(body_json(blocked).await["code"], "ACCOUNT_DISABLED");

    patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/admin/users/{}/status", emp.id),
        json!({ "isActive": true }),
        &token,
    )
    .await;
    let reset = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/admin/users/{}/reset-password", emp.id),
        json!({ "newPassword": "brand-new-pw" }),
        &token,
    )
    .await;
    assert_eq!(reset.status(), StatusCode::OK);

    login(common::build_test_app(pool), "emp@example.com", "brand-new-pw").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_list_filters(pool: PgPool) {
    let (_, token) = admin_session(&pool).await;
    seed_user(&pool, "m1@example.com", "MANAGER").await;
    seed_user(&pool, "e1@example.com", "EMPLOYEE").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/admin/users?role=MANAGER&isActive=true",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["results"], 1);
    assert_eq!(json["data"]["users"][0]["email"], "m1@example.com");

    let bad = get_auth(
        common::build_test_app(pool),
        "/api/admin/users?sort=name",
        &token,
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Directory and self-service
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_directory_lookup_by_code(pool: PgPool) {
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;
    let token = login(common::build_test_app(pool.clone()), "emp@example.com", TEST_PASSWORD).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/users/{}", emp.employee_code),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user"]["id"], emp.id.as_str());

    let directory = get_auth(common::build_test_app(pool), "/api/users", &token).await;
    assert_eq!(body_json(directory).await["results"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_employee_updates_own_profile(pool: PgPool) {
    seed_user(&pool, "emp@example.com", "EMPLOYEE").await;
    let token = login(common::build_test_app(pool.clone()), "emp@example.com", TEST_PASSWORD).await;

    let response = patch_json_auth(
        common::build_test_app(pool),
        "/api/users/me",
        json!({ "firstName": "  Eve ", "phone": "", "skills": ["go"] }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Profile updated successfully");
    assert_eq!(json["data"]["user"]["firstName"], "Eve");
    assert!(json["data"]["user"]["phone"].is_null());
    assert_eq!(json["data"]["user"]["skills"], json!(["go"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_employee_cannot_update_someone_else(pool: PgPool) {
    seed_user(&pool, "emp@example.com", "EMPLOYEE").await;
    let other = seed_user(&pool, "other@example.com", "EMPLOYEE").await;
    let token = login(common::build_test_app(pool.clone()), "emp@example.com", TEST_PASSWORD).await;

    let response = patch_json_auth(
        common::build_test_app(pool),
        &format!("/api/users/{}", other.id),
        json!({ "firstName": "Hacked" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "You can only update your own profile"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reports_require_manager_role(pool: PgPool) {
    let (_, admin_token) = admin_session(&pool).await;
    let manager = seed_user(&pool, "boss@example.com", "MANAGER").await;
    let emp = seed_user(&pool, "emp@example.com", "EMPLOYEE").await;

    patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/admin/users/{}", emp.id),
        json!({ "manager": manager.employee_code }),
        &admin_token,
    )
    .await;

    let boss_token =
        login(common::build_test_app(pool.clone()), "boss@example.com", TEST_PASSWORD).await;
    let reports = get_auth(
        common::build_test_app(pool.clone()),
        "/api/users/me/reports",
        &boss_token,
    )
    .await;
    assert_eq!(reports.status(), StatusCode::OK);
    let json = body_json(reports).await;
    assert_eq!(json["results"], 1);
    assert_eq!(json["data"]["users"][0]["id"], emp.id.as_str());

    let emp_token = login(common::build_test_app(pool.clone()), "emp@example.com", TEST_PASSWORD).await;
    let denied = get_auth(common::build_test_app(pool), "/api/users/me/reports", &emp_token).await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}
