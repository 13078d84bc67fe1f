//! Polling and acceleration under virtual time.

use std::time::Duration;

use podrace_core::{AccelerationDispatcher, Poller, RaceService, RaceStatus, ReferenceId};
use podrace_harness::{ScriptedService, ServiceCall, SimEnv, snapshot};

const INTERVAL: Duration = Duration::from_millis(500);

#[tokio::test]
async fn fetch_failure_keeps_schedule() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env.clone(), 1).with_statuses([
        Err("HTTP 502".into()),
        Ok(snapshot(RaceStatus::InProgress, &[(1, 4, None)])),
        Ok(snapshot(RaceStatus::Finished, &[(1, 50, Some(1))])),
    ]);
    let mut ticks = Vec::new();

    let terminal = Poller::new(service.clone(), env.clone(), INTERVAL)
        .run(ReferenceId(0), |s| ticks.push(s.clone()))
        .await;

    assert_eq!(terminal.status, RaceStatus::Finished);
    assert_eq!(ticks.len(), 1);
    assert_eq!(service.status_fetch_times(), [
        Duration::from_millis(500),
        Duration::from_millis(1000),
        Duration::from_millis(1500),
    ]);
}

#[tokio::test]
async fn unknown_status_is_skipped() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env.clone(), 1).with_statuses([
        Ok(snapshot(RaceStatus::Other("paused".into()), &[(1, 4, None)])),
        Ok(snapshot(RaceStatus::InProgress, &[(1, 6, None)])),
        Ok(snapshot(RaceStatus::Finished, &[(1, 50, Some(1))])),
    ]);
    let mut ticks = Vec::new();

    Poller::new(service.clone(), env, INTERVAL)
        .run(ReferenceId(0), |s| ticks.push(s.status.clone()))
        .await;

    assert_eq!(ticks, [RaceStatus::InProgress]);
    assert_eq!(service.status_fetch_times().len(), 3);
}

#[tokio::test]
async fn work_within_period_keeps_schedule() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env.clone(), 1).with_statuses([
        Ok(snapshot(RaceStatus::InProgress, &[(1, 1, None)])),
        Ok(snapshot(RaceStatus::InProgress, &[(1, 2, None)])),
        Ok(snapshot(RaceStatus::Finished, &[(1, 50, Some(1))])),
    ]);

    let poll_env = env.clone();
    Poller::new(service.clone(), env, INTERVAL)
        .run(ReferenceId(0), |_| poll_env.advance(Duration::from_millis(200)))
        .await;

    assert_eq!(service.status_fetch_times(), [
        Duration::from_millis(500),
        Duration::from_millis(1000),
        Duration::from_millis(1500),
    ]);
}

#[tokio::test]
async fn overrun_fetches_immediately_then_rejoins_schedule() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env.clone(), 1).with_statuses([
        Ok(snapshot(RaceStatus::InProgress, &[(1, 1, None)])),
        Ok(snapshot(RaceStatus::InProgress, &[(1, 2, None)])),
        Ok(snapshot(RaceStatus::Finished, &[(1, 50, Some(1))])),
    ]);

    let poll_env = env.clone();
    let mut ticks = 0;
    Poller::new(service.clone(), env, INTERVAL)
        .run(ReferenceId(0), |_| {
            ticks += 1;
            if ticks == 1 {
                poll_env.advance(Duration::from_millis(700));
            }
        })
        .await;

    // The 1000 ms deadline has passed by the time the first tick returns.
    assert_eq!(service.status_fetch_times(), [
        Duration::from_millis(500),
        Duration::from_millis(1200),
        Duration::from_millis(1500),
    ]);
}

#[tokio::test]
async fn acceleration_failure_is_only_logged() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env, 1).failing_accelerate("HTTP 500");
    let dispatcher = AccelerationDispatcher::new(service.clone());

    dispatcher.fire(ReferenceId(41)).await.unwrap();

    assert_eq!(service.calls(), [ServiceCall::Accelerate(ReferenceId(41))]);
    assert!(service.accelerate(ReferenceId(41)).await.is_err());
}

#[tokio::test]
async fn overlapping_accelerations_all_arrive() {
    let env = SimEnv::new();
    let service = ScriptedService::new(env, 1);
    let dispatcher = AccelerationDispatcher::new(service.clone());

    let handles: Vec<_> = (0..5).map(|_| dispatcher.fire(ReferenceId(41))).collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let calls = service.calls();
    assert_eq!(calls.len(), 5);
    assert!(calls.iter().all(|c| *c == ServiceCall::Accelerate(ReferenceId(41))));
}
