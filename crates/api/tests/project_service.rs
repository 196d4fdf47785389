//! Integration tests for the project service against an in-memory store.

mod common;

use assert_matches::assert_matches;
use tally_api::error::AppError;
use tally_core::error::CoreError;
use tally_db::models::project::{CreateProject, UpdateProject};
use tally_db::models::report::CreateReport;

fn new_project(name: &str, description: &str) -> CreateProject {
    CreateProject {
        name: Some(name.to_string()),
        description: Some(description.to_string()),
    }
}

fn rename(name: &str) -> UpdateProject {
    UpdateProject {
        name: Some(name.to_string()),
        description: None,
    }
}

// ---------------------------------------------------------------------------
// create_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_trims_fields_and_assigns_unique_ids() {
    let (projects, _) = common::services().await;

    let first = projects
        .create_project(&new_project("  Test Project ", "\tTest Description\n"))
        .await
        .unwrap();
    let second = projects
        .create_project(&new_project("Other", "Other"))
        .await
        .unwrap();

    assert_eq!(first.name, "Test Project");
    assert_eq!(first.description, "Test Description");
    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn create_rejects_blank_or_missing_fields() {
    let (projects, _) = common::services().await;

    for input in [
        new_project("", "Test Description"),
        new_project("   ", "Test Description"),
        new_project("Test Project", ""),
        CreateProject {
            name: Some("Test Project".to_string()),
            description: None,
        },
    ] {
        let err = projects.create_project(&input).await.unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::Validation(ref msg))
                if msg == "Name and description are required and cannot be empty"
        );
    }

    assert!(projects.list_projects().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// get_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_is_idempotent() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Get Me", "Desc"))
        .await
        .unwrap();

    let a = projects.get_project(&created.id).await.unwrap();
    let b = projects.get_project(&created.id).await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a, created);
}

#[tokio::test]
async fn get_trims_the_id() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Padded", "Desc"))
        .await
        .unwrap();

    let found = projects
        .get_project(&format!("  {}  ", created.id))
        .await
        .unwrap();
    assert_eq!(found.id, created.id);
}

#[tokio::test]
async fn get_rejects_blank_id() {
    let (projects, _) = common::services().await;
    for id in ["", "   "] {
        let err = projects.get_project(id).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg == "Project ID is required");
    }
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let (projects, _) = common::services().await;
    let err = projects.get_project("non-existent-id").await.unwrap_err();
    assert_eq!(err.to_string(), "Project with ID non-existent-id not found");
    assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Project", .. }));
}

// ---------------------------------------------------------------------------
// update_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_name_only_keeps_description() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Original Name", "Original Description"))
        .await
        .unwrap();

    let updated = projects
        .update_project(&created.id, &rename("X"))
        .await
        .unwrap();
    assert_eq!(updated.name, "X");
    assert_eq!(updated.description, "Original Description");

    let reread = projects.get_project(&created.id).await.unwrap();
    assert_eq!(reread, updated);
}

#[tokio::test]
async fn update_description_only_and_both_fields() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Original Name", "Original Description"))
        .await
        .unwrap();

    let updated = projects
        .update_project(
            &created.id,
            &UpdateProject {
                name: None,
                description: Some(" Updated Description ".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Original Name");
    assert_eq!(updated.description, "Updated Description");

    let updated = projects
        .update_project(
            &created.id,
            &UpdateProject {
                name: Some("Updated Name".to_string()),
                description: Some("Final".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Updated Name");
    assert_eq!(updated.description, "Final");
}

#[tokio::test]
async fn update_without_fields_is_rejected() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Name", "Desc"))
        .await
        .unwrap();

    let err = projects
        .update_project(&created.id, &UpdateProject::default())
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg.contains("At least one field"));
}

#[tokio::test]
async fn update_with_blank_field_is_rejected() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Name", "Desc"))
        .await
        .unwrap();

    let err = projects
        .update_project(&created.id, &rename(""))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg == "Name cannot be empty");

    let err = projects
        .update_project(
            &created.id,
            &UpdateProject {
                name: Some("Fine".to_string()),
                description: Some("  ".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg == "Description cannot be empty");

    // Nothing was written, not even the valid name.
    let unchanged = projects.get_project(&created.id).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn rejected_update_performs_no_store_writes() {
    let store = common::CountingStore::new().await;
    let (projects, _) = common::wire(store.clone());
    let created = projects
        .create_project(&new_project("Name", "Desc"))
        .await
        .unwrap();
    let writes_after_create = store.executes();

    let _ = projects
        .update_project(&created.id, &UpdateProject::default())
        .await
        .unwrap_err();
    let _ = projects
        .update_project(
            &created.id,
            &UpdateProject {
                name: Some("ok".to_string()),
                description: Some("".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(store.executes(), writes_after_create);
}

#[tokio::test]
async fn update_unknown_project_is_not_found() {
    let (projects, _) = common::services().await;
    let err = projects
        .update_project("non-existent-id", &rename("Updated Name"))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// delete_project
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_project() {
    let (projects, _) = common::services().await;
    let created = projects
        .create_project(&new_project("Project to Delete", "Description to Delete"))
        .await
        .unwrap();

    projects.delete_project(&created.id).await.unwrap();

    let err = projects.get_project(&created.id).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));
}

#[tokio::test]
async fn delete_cascades_to_reports_only_of_that_project() {
    let (projects, reports) = common::services().await;
    let doomed = projects
        .create_project(&new_project("Doomed", "Desc"))
        .await
        .unwrap();
    let kept = projects
        .create_project(&new_project("Kept", "Desc"))
        .await
        .unwrap();

    for (project_id, text) in [(&doomed.id, "a"), (&doomed.id, "b"), (&kept.id, "c")] {
        reports
            .create_report(&CreateReport {
                text: Some(text.to_string()),
                project_id: Some(project_id.clone()),
            })
            .await
            .unwrap();
    }

    projects.delete_project(&doomed.id).await.unwrap();

    assert!(reports
        .list_reports_by_project(&doomed.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(reports.list_reports().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_rejects_blank_and_unknown_ids() {
    let (projects, _) = common::services().await;

    let err = projects.delete_project("").await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg == "Project ID is required");

    let err = projects.delete_project("non-existent-id").await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// list_projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_projects_in_insertion_order() {
    let (projects, _) = common::services().await;
    let a = projects.create_project(&new_project("A", "a")).await.unwrap();
    let b = projects.create_project(&new_project("B", "b")).await.unwrap();

    let all = projects.list_projects().await.unwrap();
    assert_eq!(all, vec![a, b]);
}

#[tokio::test]
async fn not_found_message_shows_trimmed_id() {
    let (projects, _) = common::services().await;
    let err = projects.get_project("  missing-id \t").await.unwrap_err();
    assert_eq!(err.to_string(), "Project with ID missing-id not found");
}
