//! Escape Room Walkthrough
//!
//! This demo plays a three-puzzle room with the press modality, pausing once
//! halfway through.
//!
//! Key concepts:
//! - Building tasks from the bundled puzzle kinds
//! - Driving the room from a frame loop
//! - Pause and resume keeping the same session
//! - The session record handed back at the end
//!
//! Run with: cargo run --example escape_room
//! Set RUST_LOG=rehab_escape=debug to watch every transition.

use rehab_escape::config::RoomConfig;
use rehab_escape::room::{Modality, RecordingHost, Room, RoomError, RoomState, SessionContext};
use rehab_escape::task::kinds::{ClockTask, CryptexTask, PipesTask};
use rehab_escape::task::{GrtTask, Interaction};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const FRAME: Duration = Duration::from_millis(16);
const STEP: Duration = Duration::from_millis(48);

fn build_room(host: RecordingHost) -> Result<Room, RoomError> {
    let tasks = vec![
        GrtTask::new("tower clock", ClockTask::with_interval((9, 0), (10, 15), STEP))?,
        GrtTask::new("vault", CryptexTask::with_interval(6, vec![3, 1, 5], STEP))?,
        GrtTask::new("aqueduct", PipesTask::with_interval(vec![0, 1, 2], vec![1, 1, 0], STEP))?,
    ];
    Room::new(
        RoomConfig::single_track(tasks.len()),
        tasks,
        SessionContext::new("demo-player"),
        host,
    )
}

/// Run frames until the task at `index` is solved or the room leaves play.
fn play_until_solved(room: &mut Room, index: usize) -> Result<u32, RoomError> {
    let mut frames = 0;
    while !room.task(index).is_some_and(GrtTask::is_solved) {
        if !matches!(room.state(), Some(RoomState::Playing(_))) {
            break;
        }
        room.update(FRAME)?;
        frames += 1;
    }
    Ok(frames)
}

/// Run frames until the cursor's task has been brought into play.
fn bring_next_into_play(room: &mut Room) -> Result<(), RoomError> {
    while matches!(room.state(), Some(RoomState::Playing(_))) && !room.next_task_prepared() {
        room.update(FRAME)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_env_filter(EnvFilter::from_default_env().add_directive("rehab_escape=info".parse()?))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Escape Room Walkthrough ===\n");

    let host = RecordingHost::new();
    let mut room = build_room(host.clone())?;
    room.set_state(RoomState::Ready)?;
    room.start(Modality::Press)?;

    // Clock: hour hand forward one, minute hand forward three.
    room.begin_solving(0)?;
    room.interact(0, 0, Interaction::Press)?;
    room.interact(0, 1, Interaction::Slide(3.0))?;
    let frames = play_until_solved(&mut room, 0)?;
    println!("clock solved after {frames} frames");

    bring_next_into_play(&mut room)?;

    // Cryptex: dial the code, then take a break before finishing.
    room.begin_solving(1)?;
    room.interact(1, 0, Interaction::Slide(3.0))?;
    room.interact(1, 1, Interaction::Press)?;
    room.update(FRAME)?;

    room.pause()?;
    println!("paused at cursor {}", room.cursor());
    room.resume()?;

    room.interact(1, 2, Interaction::Slide(-1.0))?;
    let frames = play_until_solved(&mut room, 1)?;
    println!("cryptex solved after {frames} more frames");

    bring_next_into_play(&mut room)?;

    // Pipes: two tiles need turning.
    room.begin_solving(2)?;
    room.interact(2, 0, Interaction::Press)?;
    room.interact(2, 2, Interaction::Slide(2.0))?;
    let frames = play_until_solved(&mut room, 2)?;
    println!("pipes solved after {frames} frames");

    info!(state = ?room.state(), "walkthrough finished");
    println!("\nHost saw {} milestones:", host.milestones().len());
    for event in host.milestones() {
        println!("  {event:?}");
    }

    let session = room.into_session();
    if let Some(record) = session.sessions().last() {
        println!("\nSession {} ({})", record.id, record.modality);
        println!("  completed: {}", record.completed);
        println!("  play time: {:?}", record.duration);
        for task in &record.tasks {
            println!(
                "  {:<12} {:<8} {:>2} interactions in {:?}",
                task.name,
                task.kind,
                task.metrics.total_interactions(),
                task.metrics.solving_time
            );
        }
        println!("\n{}", serde_json::to_string_pretty(record)?);
    }

    Ok(())
}
