//! Starter session used when no snapshot exists yet.

use chrono::Duration;

use crate::error::Result;
use crate::model::{NewProject, NewTask, ProjectDna};
use crate::store::Store;

/// Fill an empty store with three projects and five tasks, deadlines
/// relative to the store's clock.
pub fn populate(store: &mut Store) -> Result<()> {
    let now = store.now();
    let due = |days: i64| now + Duration::days(days);

    let capstone = store.add_project(
        NewProject::new("Capstone Project", ProjectDna::DeepWork, 5).with_burnout(40.0),
    )?;
    let hackathon = store.add_project(
        NewProject::new("Hackathon Prep", ProjectDna::BurstCreativity, 4).with_burnout(60.0),
    )?;
    let freelance = store.add_project(
        NewProject::new("Freelance Gig", ProjectDna::ClientCommunication, 3).with_burnout(25.0),
    )?;

    store.add_tasks(vec![
        NewTask::new(
            capstone.clone(),
            "Write Chapter 2 of Thesis on Advanced Machine Learning Techniques",
            due(5),
            8,
        )
        .critical(),
        NewTask::new(
            hackathon.clone(),
            "Brainstorm main feature ideas and create user flow diagrams",
            due(2),
            4,
        ),
        NewTask::new(
            capstone,
            "Gather and annotate the dataset for the primary experiment",
            due(10),
            6,
        ),
        NewTask::new(
            freelance,
            "Client feedback implementation for the dashboard UI",
            due(3),
            7,
        )
        .critical(),
        NewTask::new(
            hackathon,
            "Set up the initial repository and CI/CD pipeline",
            due(4),
            5,
        ),
    ])?;
    Ok(())
}
