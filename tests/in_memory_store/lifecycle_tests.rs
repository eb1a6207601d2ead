//! In-memory integration tests for task lifecycle flows.

use super::helpers::{TestService, seed_tasks, service};
use checklist::task::{
    domain::{Task, TaskFilter, TaskStatus, prepare_submission, project},
    services::TaskStoreError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_text_is_created_and_listed(service: TestService) -> Result<(), eyre::Report> {
    let text = prepare_submission("   buy milk ")
        .ok_or_else(|| eyre::eyre!("submission should be accepted"))?;
    let id = service.create(text).await?;

    let tasks = service.list().await?;
    let created: Vec<&Task> = tasks.iter().filter(|task| task.id() == id).collect();

    eyre::ensure!(created.len() == 1, "expected exactly one created task");
    let task = created
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one task"))?;
    eyre::ensure!(task.text() == "buy milk", "unexpected text {:?}", task.text());
    eyre::ensure!(task.status() == TaskStatus::Active, "new task should be active");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_sorted_newest_first(service: TestService) -> Result<(), eyre::Report> {
    seed_tasks(&service, &["one", "two", "three", "four"]).await?;

    let tasks = service.list().await?;
    let sorted = tasks
        .windows(2)
        .all(|pair| matches!(pair, [newer, older] if newer.created_at() >= older.created_at()));

    eyre::ensure!(sorted, "tasks are not ordered newest first");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_reaches_expected_views(service: TestService) -> Result<(), eyre::Report> {
    let ids = seed_tasks(&service, &["laundry", "groceries", "taxes", "gym", "read"]).await?;
    let (Some(laundry), Some(taxes), Some(gym)) = (ids.first(), ids.get(2), ids.get(3)) else {
        return Err(eyre::eyre!("expected five ids"));
    };

    service.toggle(*laundry).await?;
    service.toggle(*taxes).await?;
    service.edit(*gym, "gym at 6pm").await?;

    let tasks = service.list().await?;
    let completed = project(&tasks, TaskFilter::Completed);
    let active = project(&tasks, TaskFilter::Active);
    eyre::ensure!(completed.visible().len() == 2, "expected two completed");
    eyre::ensure!(active.visible().len() == 3, "expected three active");
    eyre::ensure!(active.active_count() == completed.active_count(), "count depends on filter");

    let removed = service.clear_completed().await?;
    eyre::ensure!(removed == 2, "expected two removals, got {removed}");

    let remaining = service.list().await?;
    eyre::ensure!(remaining.len() == 3, "expected three remaining tasks");
    eyre::ensure!(
        remaining.iter().any(|task| task.text() == "gym at 6pm"),
        "edited text should persist"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_and_delete_differ_on_missing_ids(service: TestService) -> Result<(), eyre::Report> {
    let ids = seed_tasks(&service, &["ephemeral"]).await?;
    let id = *ids.first().ok_or_else(|| eyre::eyre!("expected one id"))?;
    service.delete(id).await?;

    let toggled = service.toggle(id).await;
    eyre::ensure!(
        matches!(toggled, Err(TaskStoreError::NotFound(missing)) if missing == id),
        "toggle of deleted task should be NotFound, got {toggled:?}"
    );
    service.delete(id).await?;
    Ok(())
}
