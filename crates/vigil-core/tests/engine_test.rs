#![allow(clippy::unwrap_used)]
// Integration tests for `SiteEngine`: transition semantics, journal
// bounds, bulk dispatch, feeds, and simulator lifecycle.

use std::time::Duration;

use chrono::Utc;
use pretty_assertions::assert_eq;
use vigil_core::{
    EngineConfig, EngineError, EventKind, FixedSeeder, RandomSeeder, SiteEngine, SiteStatus,
    TransitionSource,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn fixed_fleet(size: u32) -> SiteEngine {
    let config = EngineConfig {
        fleet_size: size,
        ..EngineConfig::default()
    };
    let mut seeder = FixedSeeder {
        status: SiteStatus::NotGuarded,
        battery: 80,
        last_activity: Utc::now(),
    };
    SiteEngine::with_seeder(config, &mut seeder)
}

// ── Transition semantics ────────────────────────────────────────────

#[test]
fn transition_updates_status_activity_and_journal() {
    let engine = fixed_fleet(400);
    let before = Utc::now();

    let outcome = engine
        .apply_transition(5, SiteStatus::Guarded, TransitionSource::Admin)
        .unwrap();

    assert_eq!(outcome.site.id, 5);
    assert_eq!(outcome.site.status, SiteStatus::Guarded);
    assert!(outcome.site.last_activity >= before);
    assert!(!outcome.alert);

    let event = outcome.event.unwrap();
    assert_eq!(event.kind, EventKind::GuardOn);
    assert_eq!(event.site_id, 5);
    assert_eq!(event.source, TransitionSource::Admin);
    assert_eq!(event.message, "Site #5: armed");

    assert_eq!(engine.site(5).unwrap().status, SiteStatus::Guarded);
}

#[test]
fn repeating_a_status_journals_every_time() {
    let engine = fixed_fleet(10);

    engine
        .apply_transition(4, SiteStatus::Guarded, TransitionSource::Admin)
        .unwrap();
    engine
        .apply_transition(4, SiteStatus::Guarded, TransitionSource::Admin)
        .unwrap();

    let events = engine.events(None);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == EventKind::GuardOn));
    assert!(events[0].id > events[1].id);
}

#[test]
fn every_status_is_reachable_from_every_status() {
    let engine = fixed_fleet(3);
    let all = [
        SiteStatus::Guarded,
        SiteStatus::NotGuarded,
        SiteStatus::Emergency,
        SiteStatus::Alarm,
        SiteStatus::Suspended,
    ];

    for from in all {
        for to in all {
            engine
                .apply_transition(1, from, TransitionSource::Admin)
                .unwrap();
            let outcome = engine
                .apply_transition(1, to, TransitionSource::Client)
                .unwrap();
            assert_eq!(outcome.site.status, to);
        }
    }
}

#[test]
fn suspension_changes_status_without_journaling() {
    let engine = fixed_fleet(10);

    let outcome = engine
        .apply_transition(3, SiteStatus::Suspended, TransitionSource::Admin)
        .unwrap();

    assert_eq!(outcome.site.status, SiteStatus::Suspended);
    assert!(outcome.event.is_none());
    assert!(!outcome.alert);
    assert_eq!(engine.event_count(), 0);
}

#[test]
fn unknown_site_fails_without_side_effects() {
    let engine = fixed_fleet(400);

    let err = engine
        .apply_transition(999, SiteStatus::Guarded, TransitionSource::Admin)
        .unwrap_err();

    assert_eq!(err, EngineError::SiteNotFound { id: 999 });
    assert_eq!(engine.event_count(), 0);
    assert_eq!(engine.site_count(), 400);
}

// ── Bulk dispatch ───────────────────────────────────────────────────

#[test]
fn bulk_isolates_failures_and_orders_ascending() {
    let engine = fixed_fleet(400);

    let report = engine.apply_bulk(&[2, 999, 5], SiteStatus::Guarded, TransitionSource::Admin);

    let ids: Vec<u32> = report.entries.iter().map(|e| e.site_id).collect();
    assert_eq!(ids, vec![2, 5, 999]);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);

    assert!(report.entries[0].outcome.is_ok());
    assert!(report.entries[1].outcome.is_ok());
    assert_eq!(
        report.entries[2].outcome.as_ref().unwrap_err(),
        &EngineError::SiteNotFound { id: 999 }
    );

    for id in [2, 5] {
        assert_eq!(engine.site(id).unwrap().status, SiteStatus::Guarded);
    }
    let events = engine.events(None);
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == EventKind::GuardOn));
}

#[test]
fn bulk_collapses_duplicate_ids() {
    let engine = fixed_fleet(10);

    let report = engine.apply_bulk(&[7, 7, 7], SiteStatus::Alarm, TransitionSource::Admin);

    assert_eq!(report.entries.len(), 1);
    assert_eq!(engine.event_count(), 1);
}

// ── Journal bounds ──────────────────────────────────────────────────

#[test]
fn journal_retains_the_newest_hundred() {
    let engine = fixed_fleet(400);

    for id in 1..=101 {
        engine
            .apply_transition(id, SiteStatus::Guarded, TransitionSource::Admin)
            .unwrap();
    }

    assert_eq!(engine.event_count(), 100);
    let events = engine.events(None);
    assert_eq!(events.len(), 100);
    // Newest first: the first append (site 1, event id 0) fell off.
    assert_eq!(events.first().unwrap().site_id, 101);
    assert_eq!(events.last().unwrap().site_id, 2);
    assert!(events.iter().all(|e| e.id != 0));
}

#[test]
fn events_limit_truncates_from_the_newest_end() {
    let engine = fixed_fleet(10);
    for id in 1..=5 {
        engine
            .apply_transition(id, SiteStatus::Guarded, TransitionSource::Admin)
            .unwrap();
    }

    let events = engine.events(Some(2));
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].site_id, 5);
    assert_eq!(events[1].site_id, 4);
}

// ── Concurrency ─────────────────────────────────────────────────────

#[test]
fn concurrent_transitions_on_one_site_never_lose_an_append() {
    let engine = fixed_fleet(20);

    std::thread::scope(|s| {
        let a = engine.clone();
        s.spawn(move || {
            a.apply_transition(9, SiteStatus::Guarded, TransitionSource::Admin)
                .unwrap();
        });
        let b = engine.clone();
        s.spawn(move || {
            b.apply_transition(9, SiteStatus::NotGuarded, TransitionSource::Client)
                .unwrap();
        });
    });

    let events = engine.events(None);
    assert_eq!(events.len(), 2);

    let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&EventKind::GuardOn));
    assert!(kinds.contains(&EventKind::GuardOff));

    // The newest journal entry agrees with the winning status write.
    let site = engine.site(9).unwrap();
    assert_eq!(events[0].kind, site.status.event_kind().unwrap());
}

#[test]
fn parallel_transitions_across_the_fleet_all_land() {
    let engine = fixed_fleet(64);

    std::thread::scope(|s| {
        for chunk in [(1u32, 16u32), (17, 32), (33, 48), (49, 64)] {
            let worker = engine.clone();
            s.spawn(move || {
                for id in chunk.0..=chunk.1 {
                    worker
                        .apply_transition(id, SiteStatus::Guarded, TransitionSource::Admin)
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(engine.event_count(), 64);
    let summary = engine.summary();
    assert_eq!(summary.guarded, 64);
    assert_eq!(summary.not_guarded, 0);
}

// ── Feeds ───────────────────────────────────────────────────────────

#[tokio::test]
async fn scenario_alarm_from_client_terminal() {
    let engine = fixed_fleet(400);
    let mut alerts = engine.subscribe_alerts();
    let mut events = engine.subscribe_events();

    let outcome = engine
        .apply_transition(17, SiteStatus::Alarm, TransitionSource::Client)
        .unwrap();
    assert!(outcome.alert);

    let journal = engine.events(None);
    assert_eq!(journal[0].site_id, 17);
    assert_eq!(journal[0].kind, EventKind::Alarm);
    assert_eq!(journal[0].source, TransitionSource::Client);
    assert_eq!(journal[0].message, "Site #17: alarm triggered (client)");
    assert_eq!(engine.site(17).unwrap().status, SiteStatus::Alarm);

    let alert = alerts.recv().await.unwrap();
    assert_eq!(alert.site_id, 17);
    assert_eq!(alert.status, SiteStatus::Alarm);
    assert_eq!(alert.event.id, journal[0].id);

    let broadcast = events.recv().await.unwrap();
    assert_eq!(broadcast.id, journal[0].id);
}

#[tokio::test]
async fn guard_transitions_do_not_alert() {
    let engine = fixed_fleet(10);
    let mut alerts = engine.subscribe_alerts();

    engine
        .apply_transition(1, SiteStatus::Guarded, TransitionSource::Admin)
        .unwrap();
    engine
        .apply_transition(2, SiteStatus::Emergency, TransitionSource::Admin)
        .unwrap();

    // Only the emergency reaches the alert feed.
    let alert = alerts.recv().await.unwrap();
    assert_eq!(alert.site_id, 2);
    assert!(alerts.try_recv().is_err());
}

#[tokio::test]
async fn fleet_stream_tracks_mutations() {
    let engine = fixed_fleet(5);
    let mut stream = engine.subscribe();
    assert_eq!(stream.current().len(), 5);

    engine
        .apply_transition(3, SiteStatus::Alarm, TransitionSource::Admin)
        .unwrap();

    let snap = stream.changed().await.unwrap();
    let site = snap.iter().find(|s| s.id == 3).unwrap();
    assert_eq!(site.status, SiteStatus::Alarm);
}

#[tokio::test]
async fn fleet_stream_converts_to_a_futures_stream() {
    use futures_util::StreamExt;

    let engine = fixed_fleet(3);
    let mut stream = engine.subscribe().into_stream();

    // Watch streams yield the value at subscription time first.
    let first = stream.next().await.unwrap();
    assert_eq!(first.len(), 3);

    engine
        .apply_transition(2, SiteStatus::Emergency, TransitionSource::Admin)
        .unwrap();
    let second = stream.next().await.unwrap();
    let site = second.iter().find(|s| s.id == 2).unwrap();
    assert_eq!(site.status, SiteStatus::Emergency);
}

// ── Seeding ─────────────────────────────────────────────────────────

#[test]
fn seeded_fleets_are_reproducible() {
    let config = EngineConfig {
        fleet_size: 50,
        ..EngineConfig::default()
    };
    let first = SiteEngine::with_seeder(config.clone(), &mut RandomSeeder::seeded(7));
    let second = SiteEngine::with_seeder(config, &mut RandomSeeder::seeded(7));

    let left = first.snapshot();
    let right = second.snapshot();
    assert_eq!(left.len(), right.len());
    for (a, b) in left.iter().zip(right.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.status, b.status);
        assert_eq!(a.battery, b.battery);
        assert_eq!(a.address, b.address);
    }
}

// ── Simulator lifecycle ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn simulator_injects_admin_alarms_on_its_period() {
    let engine = fixed_fleet(400);
    let handle = engine.start_simulator(Duration::from_secs(60));

    tokio::time::sleep(Duration::from_secs(185)).await;
    let injected = engine.event_count();
    assert!((1..=3).contains(&injected), "got {injected} events");

    for event in engine.events(None) {
        assert_eq!(event.kind, EventKind::Alarm);
        assert_eq!(event.source, TransitionSource::Admin);
        assert!((1..=400).contains(&event.site_id));
        assert_eq!(
            engine.site(event.site_id).unwrap().status,
            SiteStatus::Alarm
        );
    }

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopping_the_simulator_halts_injection() {
    let engine = fixed_fleet(400);
    let handle = engine.start_simulator(Duration::from_secs(60));

    tokio::time::sleep(Duration::from_secs(185)).await;
    let before_stop = engine.event_count();
    assert!(before_stop <= 3);

    handle.stop().await;
    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(engine.event_count(), before_stop);
}

#[tokio::test(start_paused = true)]
async fn stop_before_the_first_tick_injects_nothing() {
    let engine = fixed_fleet(400);
    let handle = engine.start_simulator(Duration::from_secs(300));

    handle.stop().await;
    tokio::time::sleep(Duration::from_secs(3600)).await;
    assert_eq!(engine.event_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_period_falls_back_to_the_default() {
    let engine = fixed_fleet(400);
    let handle = engine.start_simulator(Duration::ZERO);

    // Default period is five minutes; one tick lands inside six.
    tokio::time::sleep(Duration::from_secs(360)).await;
    assert_eq!(engine.event_count(), 1);

    handle.stop().await;
}
