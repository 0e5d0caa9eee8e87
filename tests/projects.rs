mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{create_project, create_task, init_app, register_and_login, send, with_token};

#[actix_rt::test]
async fn test_project_crud_flow() {
    let app = init_app().await;
    let user = register_and_login(&app, "owner@example.com").await;

    let (status, created) = send(
        &app,
        with_token(test::TestRequest::post().uri("/api/projects"), &user.token)
            .set_json(json!({ "title": "Garden", "description": "Spring planting" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Create failed: {}", created);
    assert_eq!(created["title"], "Garden");
    assert_eq!(created["description"], "Spring planting");
    assert_eq!(created["owner_user_id"], user.id);
    assert_eq!(created["task_count"], 0);
    assert_eq!(created["completed_task_count"], 0);
    let project_id = created["id"].as_i64().expect("project id missing");

    let (status, fetched) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id)),
            &user.token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        with_token(
            test::TestRequest::put().uri(&format!("/api/projects/{}", project_id)),
            &user.token,
        )
        .set_json(json!({ "title": "Vegetable garden" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {}", updated);
    assert_eq!(updated["title"], "Vegetable garden");
    assert!(updated["description"].is_null(), "Description is replaced");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, listed) = send(
        &app,
        with_token(test::TestRequest::get().uri("/api/projects"), &user.token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], project_id);

    let (status, body) = send(
        &app,
        with_token(
            test::TestRequest::delete().uri(&format!("/api/projects/{}", project_id)),
            &user.token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id)),
            &user.token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_project_counts_follow_tasks() {
    let app = init_app().await;
    let user = register_and_login(&app, "counts@example.com").await;
    let project_id = create_project(&app, &user, "Counted").await;
    let done = create_task(&app, &user, project_id, "Done").await;
    create_task(&app, &user, project_id, "Open").await;

    let (status, _) = send(
        &app,
        with_token(
            test::TestRequest::put()
                .uri(&format!("/api/projects/{}/tasks/{}", project_id, done)),
            &user.token,
        )
        .set_json(json!({ "title": "Done", "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, project) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id)),
            &user.token,
        ),
    )
    .await;
    assert_eq!(project["task_count"], 2);
    assert_eq!(project["completed_task_count"], 1);
}

#[test_log::test(actix_rt::test)]
async fn test_foreign_project_looks_missing() {
    let app = init_app().await;
    let alice = register_and_login(&app, "alice@example.com").await;
    let bob = register_and_login(&app, "bob@example.com").await;
    let project_id = create_project(&app, &alice, "Private").await;

    let (foreign_status, foreign_body) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id)),
            &bob.token,
        ),
    )
    .await;
    let (missing_status, missing_body) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id + 1000)),
            &bob.token,
        ),
    )
    .await;

    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body, missing_body);
    assert_eq!(
        foreign_body,
        json!({ "kind": "not_found", "message": "Project not found or access denied" })
    );

    // Writes are refused the same way and leave the project untouched.
    let (status, _) = send(
        &app,
        with_token(
            test::TestRequest::put().uri(&format!("/api/projects/{}", project_id)),
            &bob.token,
        )
        .set_json(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        with_token(
            test::TestRequest::delete().uri(&format!("/api/projects/{}", project_id)),
            &bob.token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, project) = send(
        &app,
        with_token(
            test::TestRequest::get().uri(&format!("/api/projects/{}", project_id)),
            &alice.token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["title"], "Private");

    let (_, bobs_projects) = send(
        &app,
        with_token(test::TestRequest::get().uri("/api/projects"), &bob.token),
    )
    .await;
    assert_eq!(bobs_projects, json!([]));
}

#[actix_rt::test]
async fn test_project_validation_and_bad_ids() {
    let app = init_app().await;
    let user = register_and_login(&app, "validate@example.com").await;

    for payload in [
        json!({ "title": "" }),
        json!({ "title": "t".repeat(201) }),
        json!({ "title": "ok", "description": "d".repeat(1001) }),
    ] {
        let (status, body) = send(
            &app,
            with_token(test::TestRequest::post().uri("/api/projects"), &user.token)
                .set_json(&payload),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
        assert_eq!(body["kind"], "validation_error");
    }

    let (status, _) = send(
        &app,
        with_token(test::TestRequest::get().uri("/api/projects/abc"), &user.token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
