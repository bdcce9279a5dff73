//! End-to-end: the client library against a live server on a local port.

use staffdir::{create_router, init_pool, run_migrations, AppState};
use staffdir_client::{
    DirectoryController, EmployeeApi, HttpEmployeeClient, LoadState, SaveOutcome, ToastKind,
};
use staffdir_core::{Department, EmployeeInput};

/// Serve a fresh in-memory app and return its base URL.
async fn spawn_server() -> String {
    let pool = init_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let app = create_router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn seeded_controller() -> DirectoryController<HttpEmployeeClient> {
    let client = HttpEmployeeClient::new(spawn_server().await);
    for (name, email, department) in [
        ("Ann Lee", "ann@co.com", Department::Engineering),
        ("Bob Stone", "bob@co.com", Department::Sales),
    ] {
        client
            .create(&EmployeeInput::new(name, email, department, "Staff"))
            .await
            .unwrap();
    }

    let mut controller = DirectoryController::new(client);
    controller.load().await;
    controller
}

fn id_of(controller: &DirectoryController<HttpEmployeeClient>, name: &str) -> String {
    controller
        .employees()
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.id.clone())
        .unwrap()
}

#[tokio::test]
async fn test_load_lists_server_records() {
    let controller = seeded_controller().await;

    assert_eq!(controller.load_state(), &LoadState::Ready);
    let names: Vec<&str> = controller
        .employees()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob Stone", "Ann Lee"]);
}

#[tokio::test]
async fn test_load_failure_is_retryable() {
    // Nothing listens on this port
    let mut controller = DirectoryController::new(HttpEmployeeClient::new("http://127.0.0.1:1"));
    controller.load().await;

    assert!(matches!(controller.load_state(), LoadState::Failed(_)));
    assert_eq!(
        controller.toast().unwrap().message,
        "Failed to load employees"
    );
}

#[tokio::test]
async fn test_delete_commits_after_countdown() {
    let mut controller = seeded_controller().await;
    let id = id_of(&controller, "Ann Lee");

    assert!(controller.delete(&id).await);
    assert_eq!(controller.undo_prompt().unwrap().message, "Ann Lee deleted");

    for _ in 0..5 {
        controller.tick().await;
    }

    assert!(controller.undo_prompt().is_none());
    let toast = controller.toast().unwrap();
    assert_eq!(toast.message, "Ann Lee permanently deleted");
    assert_eq!(toast.kind, ToastKind::Success);

    let err = controller.api().get(&id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_undo_never_reaches_server() {
    let mut controller = seeded_controller().await;
    let id = id_of(&controller, "Ann Lee");

    controller.delete(&id).await;
    controller.tick().await;
    assert!(controller.undo());

    assert_eq!(
        controller.toast().unwrap().message,
        "Delete undone successfully"
    );
    assert!(controller.employees().iter().any(|e| e.id == id));
    assert!(controller.api().get(&id).await.is_ok());
}

#[tokio::test]
async fn test_commit_of_already_deleted_record_counts_as_removed() {
    let mut controller = seeded_controller().await;
    let id = id_of(&controller, "Bob Stone");

    controller.delete(&id).await;
    // Someone else deletes it first
    controller.api().delete(&id).await.unwrap();
    controller.dismiss_undo().await;

    let toast = controller.toast().unwrap();
    assert_eq!(toast.message, "Bob Stone removed");
    assert_eq!(toast.kind, ToastKind::Success);
    assert!(!controller.employees().iter().any(|e| e.id == id));
}

#[tokio::test]
async fn test_save_surfaces_server_messages() {
    let mut controller = seeded_controller().await;

    controller.open_create_form();
    let input = EmployeeInput::new("Ann Twin", "ANN@co.com", Department::Finance, "Analyst");
    let outcome = controller.save(input).await;

    assert_eq!(outcome, SaveOutcome::Failed);
    let toast = controller.toast().unwrap();
    assert_eq!(toast.message, "Employee with this email already exists");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(controller.employees().len(), 2);
}

#[tokio::test]
async fn test_save_create_and_edit() {
    let mut controller = seeded_controller().await;

    controller.open_create_form();
    let input = EmployeeInput::new("Cara Ng", "cara@co.com", Department::Marketing, "Lead");
    let outcome = controller.save(input).await;
    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(controller.employees()[0].name, "Cara Ng");
    assert_eq!(
        controller.toast().unwrap().message,
        "Employee added successfully!"
    );

    let id = id_of(&controller, "Cara Ng");
    assert!(controller.open_edit_form(&id));
    let mut input = controller.form().unwrap().initial_input();
    input.position = Some("Director".to_string());
    assert_eq!(controller.save(input).await, SaveOutcome::Saved);

    assert_eq!(
        controller.toast().unwrap().message,
        "Employee updated successfully!"
    );
    let stored = controller.api().get(&id).await.unwrap();
    assert_eq!(stored.position, "Director");
    assert_eq!(controller.employees().len(), 3);
}

#[tokio::test]
async fn test_edit_keeps_joining_time() {
    let client = HttpEmployeeClient::new(spawn_server().await);
    let input = EmployeeInput::new("Dana Kim", "dana@co.com", Department::Finance, "Analyst")
        .with_joining_date("2024-03-01T15:30:00Z");
    let created = client.create(&input).await.unwrap();

    let mut controller = DirectoryController::new(client);
    controller.load().await;
    assert!(controller.open_edit_form(&created.id));
    let mut input = controller.form().unwrap().initial_input();
    input.position = Some("Senior Analyst".to_string());
    assert_eq!(controller.save(input).await, SaveOutcome::Saved);

    let stored = controller.api().get(&created.id).await.unwrap();
    assert_eq!(stored.position, "Senior Analyst");
    assert_eq!(stored.joining_date, created.joining_date);
}
