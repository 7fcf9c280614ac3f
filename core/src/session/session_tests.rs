//! Tests for the brew session driver
//!
//! All tests run on tokio's paused clock, so sleeping advances time
//! deterministically through the tick schedule.

use std::sync::Arc;
use std::time::Duration;

use brewlog_types::AudioSettings;

use crate::audio::AudioCues;
use crate::audio::test_support::{AudioRecord, RecordingBackend};
use crate::timeline::{RecipeStep, RecipeTimeline};
use crate::timer::RunState;

use super::{BrewSession, SessionError, SessionHandle, SessionOptions};

fn three_pour() -> Arc<RecipeTimeline> {
    Arc::new(
        RecipeTimeline::new(vec![
            RecipeStep::new(0, 40, 40.0, "Bloom"),
            RecipeStep::new(40, 40, 120.0, "Pour1"),
            RecipeStep::new(80, 40, 220.0, "Pour2"),
        ])
        .unwrap(),
    )
}

fn spawn_session() -> (SessionHandle, RecordingBackend) {
    let backend = RecordingBackend::new();
    let audio = AudioCues::new(Box::new(backend.clone()), &AudioSettings::default());
    let handle = BrewSession::spawn(three_pour(), audio, SessionOptions::default());
    (handle, backend)
}

async fn sleep_secs(secs: f64) {
    tokio::time::sleep(Duration::from_secs_f64(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn test_idle_session_does_not_tick() {
    let (handle, _backend) = spawn_session();
    sleep_secs(30.0).await;

    let state = handle.state();
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.elapsed_secs, 0);
    assert_eq!(state.current_step, Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_running_session_ticks_once_per_second() {
    let (handle, _backend) = spawn_session();

    let state = handle.toggle().await.unwrap();
    assert_eq!(state.run_state, RunState::Running);
    assert_eq!(state.elapsed_secs, 0);

    sleep_secs(40.5).await;
    let state = handle.state();
    assert_eq!(state.elapsed_secs, 40);
    assert_eq!(state.current_step, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_clock() {
    let (handle, _backend) = spawn_session();
    handle.toggle().await.unwrap();
    sleep_secs(10.5).await;

    let paused = handle.toggle().await.unwrap();
    assert_eq!(paused.run_state, RunState::Paused);
    assert_eq!(paused.elapsed_secs, 10);

    sleep_secs(60.0).await;
    assert_eq!(handle.state(), paused);
}

#[tokio::test(start_paused = true)]
async fn test_resume_waits_a_full_period() {
    let (handle, backend) = spawn_session();
    handle.toggle().await.unwrap();
    sleep_secs(10.5).await;
    handle.toggle().await.unwrap();
    sleep_secs(5.0).await;

    handle.toggle().await.unwrap();
    sleep_secs(0.6).await;
    assert_eq!(handle.state().elapsed_secs, 10);

    sleep_secs(0.5).await;
    assert_eq!(handle.state().elapsed_secs, 11);
    assert_eq!(backend.transition_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_session_finishes_and_stops_ticking() {
    let (handle, backend) = spawn_session();
    handle.toggle().await.unwrap();

    sleep_secs(130.0).await;
    let state = handle.state();
    assert_eq!(state.run_state, RunState::Finished);
    assert_eq!(state.elapsed_secs, 120);
    assert_eq!(state.current_step, Some(2));
    assert_eq!(backend.transition_count(), 2);
    assert_eq!(backend.completion_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_ticking() {
    let (handle, _backend) = spawn_session();
    handle.toggle().await.unwrap();
    sleep_secs(20.5).await;

    let state = handle.reset().await.unwrap();
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.elapsed_secs, 0);

    sleep_secs(10.0).await;
    assert_eq!(handle.state().elapsed_secs, 0);
}

#[tokio::test(start_paused = true)]
async fn test_set_sound_reported_in_snapshot() {
    let (handle, _backend) = spawn_session();
    handle.toggle().await.unwrap();

    let state = handle.set_sound(false).await.unwrap();
    assert!(!state.sound_enabled);
    assert_eq!(state.run_state, RunState::Running);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_ticks() {
    let (handle, _backend) = spawn_session();
    let mut updates = handle.subscribe();
    handle.toggle().await.unwrap();
    updates.borrow_and_update();

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().elapsed_secs, 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_releases_audio_and_closes() {
    let (mut handle, backend) = spawn_session();
    handle.toggle().await.unwrap();
    sleep_secs(3.5).await;

    handle.shutdown().await.unwrap();

    assert!(handle.is_closed());
    assert_eq!(handle.state().run_state, RunState::Idle);
    assert_eq!(backend.records().last(), Some(&AudioRecord::Released));
    assert_eq!(handle.toggle().await, Err(SessionError::Closed));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_aborts_session() {
    let (handle, backend) = spawn_session();
    handle.toggle().await.unwrap();
    drop(handle);

    sleep_secs(1.0).await;
    assert_eq!(backend.records().last(), Some(&AudioRecord::Released));
}
