//! Given steps for task store BDD scenarios.

use super::world::{TaskStoreWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an empty task list")]
fn empty_task_list(world: &mut TaskStoreWorld) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list()).wrap_err("list tasks")?;
    eyre::ensure!(tasks.is_empty(), "expected an empty store, found {}", tasks.len());
    Ok(())
}

#[given("{count:usize} tasks have been created")]
fn tasks_have_been_created(
    world: &mut TaskStoreWorld,
    count: usize,
) -> Result<(), eyre::Report> {
    for index in 0..count {
        let id = run_async(world.service.create(format!("task {index}")))
            .wrap_err("create task for scenario setup")?;
        world.created_ids.push(id);
    }
    Ok(())
}

#[given("{count:usize} of them are completed")]
fn some_are_completed(world: &mut TaskStoreWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        count <= world.created_ids.len(),
        "cannot complete {count} of {} tasks",
        world.created_ids.len()
    );
    let targets: Vec<_> = world.created_ids.iter().copied().take(count).collect();
    for id in targets {
        run_async(world.service.toggle(id)).wrap_err("complete task for scenario setup")?;
    }
    Ok(())
}
