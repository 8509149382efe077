//! Integration tests for the tween scheduler
//!
//! These tests verify that:
//! - Producers on other threads can spawn and control tweens
//! - Large frame deltas resolve every boundary crossing
//! - Readers on other threads can query tweens while the owner ticks
//! - Owner binding stops tweens once their owner is dropped
//! - Presets loaded from TOML drive real tweens

use glide_tween::{
    Color, ColorTween, Ease, EasingSelection, FloatTween, KeyframeCurve, Quat, QuatTween,
    TweenHandle, TweenScheduler, TweenSettings, TweenSpec, Vec3, Vec3Tween,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    (count.clone(), count)
}

/// Spawns from several threads all become live on the next tick
#[test]
fn test_cross_thread_spawning() {
    let scheduler = TweenScheduler::new();
    let (completed, completed_seen) = counter();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let producer = scheduler.handle();
            let completed = completed.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|_| {
                        let completed = completed.clone();
                        producer.spawn(
                            TweenSpec::new(0.5).on_complete(move || {
                                completed.fetch_add(1, Ordering::SeqCst);
                            }),
                            FloatTween::new(0.0, 1.0, |_| {}),
                        )
                    })
                    .collect::<Vec<TweenHandle>>()
            })
        })
        .collect();

    let mut handles = Vec::new();
    for worker in workers {
        handles.extend(worker.join().unwrap());
    }

    assert_eq!(handles.len(), 100);
    assert!(handles.iter().all(|h| h.is_valid()));
    let mut unique = handles.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 100);

    assert!(scheduler.tick(0.25));
    assert_eq!(scheduler.live_count(), 100);
    assert!(handles.iter().all(|h| scheduler.is_active(*h)));

    assert!(!scheduler.tick(0.25));
    assert_eq!(completed_seen.load(Ordering::SeqCst), 100);
}

/// A producer thread can cancel a tween while the owner ticks
#[test]
fn test_cross_thread_cancel() {
    let scheduler = TweenScheduler::new();
    let target = Arc::new(Mutex::new(0.0_f32));
    let handle = scheduler.spawn(
        TweenSpec::new(10.0),
        FloatTween::shared(0.0, 100.0, target.clone()),
    );
    scheduler.tick(1.0);

    let producer = scheduler.handle();
    thread::spawn(move || producer.cancel(handle, true))
        .join()
        .unwrap();

    assert!(!scheduler.tick(1.0));
    assert_eq!(*target.lock(), 100.0);
}

/// A reader thread polls `is_active` while the owner thread ticks
#[test]
fn test_concurrent_is_active_reader() {
    let scheduler = TweenScheduler::new();
    let target = Arc::new(Mutex::new(0.0_f32));
    let tween = scheduler.spawn(
        TweenSpec::new(0.5),
        FloatTween::shared(0.0, 1.0, target.clone()),
    );
    let background = scheduler.spawn(
        TweenSpec::new(0.1).looping(0),
        FloatTween::new(0.0, 1.0, |_| {}),
    );
    scheduler.tick(0.01);
    assert!(scheduler.is_active(tween));

    let reader = scheduler.handle();
    let polling = thread::spawn(move || {
        while reader.is_active(tween) {
            assert!(reader.is_active(background));
            thread::yield_now();
        }
    });

    for _ in 0..100 {
        scheduler.tick(0.01);
        thread::yield_now();
    }
    polling.join().unwrap();

    assert!(!scheduler.is_active(tween));
    assert!(scheduler.is_active(background));
    assert_eq!(*target.lock(), 1.0);
}

/// A huge delta on an endless loop returns promptly instead of spinning
#[test]
fn test_huge_delta_on_endless_loop_returns() {
    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        let scheduler = TweenScheduler::new();
        let handle = scheduler.spawn(
            TweenSpec::new(1.0).looping(0),
            FloatTween::new(0.0, 1.0, |_| {}),
        );
        scheduler.tick(1.0e8);
        let _ = done.send(scheduler.is_active(handle));
    });

    let still_active = finished.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(still_active);
}

/// Loop with a count of three, crossed in a single stalled frame
#[test]
fn test_frame_stall_loop() {
    let scheduler = TweenScheduler::new();
    let (loops, loops_seen) = counter();
    let (completes, completes_seen) = counter();
    let target = Arc::new(Mutex::new(0.0_f32));

    scheduler.spawn(
        TweenSpec::new(1.0)
            .looping(3)
            .on_loop(move || {
                loops.fetch_add(1, Ordering::SeqCst);
            })
            .on_complete(move || {
                completes.fetch_add(1, Ordering::SeqCst);
            }),
        FloatTween::shared(0.0, 1.0, target.clone()),
    );

    assert!(!scheduler.tick(3.5));
    assert_eq!(loops_seen.load(Ordering::SeqCst), 2);
    assert_eq!(completes_seen.load(Ordering::SeqCst), 1);
    assert_eq!(*target.lock(), 1.0);
}

/// Ping-pong for two pairs, crossed in a single stalled frame
#[test]
fn test_frame_stall_ping_pong() {
    let scheduler = TweenScheduler::new();
    let (flips, flips_seen) = counter();
    let (completes, completes_seen) = counter();

    scheduler.spawn(
        TweenSpec::new(1.0)
            .ping_pong(2)
            .on_ping_pong(move || {
                flips.fetch_add(1, Ordering::SeqCst);
            })
            .on_complete(move || {
                completes.fetch_add(1, Ordering::SeqCst);
            }),
        FloatTween::new(0.0, 1.0, |_| {}),
    );

    assert!(!scheduler.tick(4.0));
    assert_eq!(flips_seen.load(Ordering::SeqCst), 4);
    assert_eq!(completes_seen.load(Ordering::SeqCst), 1);
}

/// Backward loop finishes on the end value
#[test]
fn test_backward_loop_completion() {
    let scheduler = TweenScheduler::new();
    let (loops, loops_seen) = counter();
    let (completes, completes_seen) = counter();
    let target = Arc::new(Mutex::new(0.0_f32));

    scheduler.spawn(
        TweenSpec::new(1.0)
            .reversed()
            .looping(2)
            .on_loop(move || {
                loops.fetch_add(1, Ordering::SeqCst);
            })
            .on_complete(move || {
                completes.fetch_add(1, Ordering::SeqCst);
            }),
        FloatTween::shared(0.0, 1.0, target.clone()),
    );

    assert!(!scheduler.tick(2.0));
    assert_eq!(loops_seen.load(Ordering::SeqCst), 1);
    assert_eq!(completes_seen.load(Ordering::SeqCst), 1);
    assert_eq!(*target.lock(), 1.0);
}

/// Backward ping-pong counts a pair on each return to the initial direction
#[test]
fn test_backward_ping_pong_completion() {
    let scheduler = TweenScheduler::new();
    let (flips, flips_seen) = counter();
    let (completes, completes_seen) = counter();
    let target = Arc::new(Mutex::new(0.0_f32));

    let handle = scheduler.spawn(
        TweenSpec::new(1.0)
            .reversed()
            .ping_pong(2)
            .on_ping_pong(move || {
                flips.fetch_add(1, Ordering::SeqCst);
            })
            .on_complete(move || {
                completes.fetch_add(1, Ordering::SeqCst);
            }),
        FloatTween::shared(0.0, 1.0, target.clone()),
    );

    // One full pair plus half a leg back toward the start
    assert!(scheduler.tick(2.5));
    assert!(scheduler.is_active(handle));
    assert_eq!(flips_seen.load(Ordering::SeqCst), 2);
    assert!((*target.lock() - 0.5).abs() < 1e-5);

    assert!(!scheduler.tick(1.5));
    assert_eq!(flips_seen.load(Ordering::SeqCst), 4);
    assert_eq!(completes_seen.load(Ordering::SeqCst), 1);
    assert_eq!(*target.lock(), 1.0);
}

/// Many small frames and one big frame land on the same value
#[test]
fn test_frame_rate_independence() {
    let stepped = Arc::new(Mutex::new(0.0_f32));
    let stalled = Arc::new(Mutex::new(0.0_f32));
    let spec = || TweenSpec::new(0.4).ping_pong(0).ease(Ease::InOutQuad);

    let stepper = TweenScheduler::new();
    stepper.spawn(spec(), FloatTween::shared(0.0, 1.0, stepped.clone()));
    for _ in 0..50 {
        stepper.tick(0.02);
    }

    let staller = TweenScheduler::new();
    staller.spawn(spec(), FloatTween::shared(0.0, 1.0, stalled.clone()));
    staller.tick(1.0);

    // 1.0s into a 0.4s ping-pong is halfway through the third leg
    assert!((*stalled.lock() - 0.5).abs() < 1e-4);
    assert!((*stepped.lock() - *stalled.lock()).abs() < 1e-3);
}

/// Owner-bound tweens stop once the owner is dropped
#[test]
fn test_owner_bound_tween() {
    let scheduler = TweenScheduler::new();
    let widget = Arc::new(String::from("button"));
    let target = Arc::new(Mutex::new(Vec3::ZERO));
    let handle = scheduler.spawn(
        TweenSpec::new(1.0).owned_by(&widget),
        Vec3Tween::shared(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), target.clone()),
    );

    scheduler.tick(0.5);
    assert!(scheduler.is_active(handle));

    drop(widget);
    assert!(!scheduler.tick(0.1));
    assert!(!scheduler.is_active(handle));
    assert!((target.lock().x - 5.0).abs() < 1e-4);
}

/// Rotation and color tweens through the scheduler
#[test]
fn test_typed_strategies() {
    let scheduler = TweenScheduler::new();
    let rotation = Arc::new(Mutex::new(Quat::IDENTITY));
    let color = Arc::new(Mutex::new(Color::BLACK));

    let end = Quat::from_axis_angle(Vec3::UP, 2.0);
    scheduler.spawn(
        TweenSpec::new(1.0),
        QuatTween::shared(Quat::IDENTITY, end, rotation.clone()),
    );
    scheduler.spawn(
        TweenSpec::new(1.0).ease(Ease::OutBack),
        ColorTween::shared(Color::BLACK, Color::WHITE, color.clone()),
    );

    scheduler.tick(0.5);
    let halfway = Quat::from_axis_angle(Vec3::UP, 1.0);
    assert!(rotation.lock().approx_eq(&halfway, 1e-4));

    // OutBack overshoots, but color channels stay in range
    scheduler.tick(0.3);
    let c = *color.lock();
    assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);

    scheduler.tick(0.5);
    assert_eq!(*rotation.lock(), end);
    assert_eq!(*color.lock(), Color::WHITE);
}

/// Sampled curves drive the easing
#[test]
fn test_curve_easing() {
    let scheduler = TweenScheduler::new();
    let target = Arc::new(Mutex::new(0.0_f32));
    let curve = KeyframeCurve::new([(0.0, 0.0), (0.5, 1.0), (1.0, 1.0)]);

    scheduler.spawn(
        TweenSpec::new(1.0).easing(EasingSelection::curve(Arc::new(curve))),
        FloatTween::shared(0.0, 4.0, target.clone()),
    );
    scheduler.tick(0.25);
    assert!((*target.lock() - 2.0).abs() < 1e-4);
}

/// Presets from a settings file drive scheduled tweens
#[test]
fn test_preset_driven_tween() {
    let settings = TweenSettings::from_toml_str(
        r#"
        [scheduler]
        initial_capacity = 8

        [presets.blink]
        duration = 0.25
        wrap_mode = "loop"
        loop_count = 2
        delay = 0.5
        "#,
    )
    .unwrap();

    let scheduler = TweenScheduler::with_config(settings.scheduler.clone());
    let (loops, loops_seen) = counter();
    let target = Arc::new(Mutex::new(0.0_f32));
    let spec = settings.spec("blink").unwrap().on_loop(move || {
        loops.fetch_add(1, Ordering::SeqCst);
    });
    let handle = scheduler.spawn(spec, FloatTween::shared(0.0, 1.0, target.clone()));

    scheduler.tick(0.5);
    assert!(scheduler.is_active(handle));
    assert_eq!(*target.lock(), 0.0);

    assert!(!scheduler.tick(0.5));
    assert_eq!(loops_seen.load(Ordering::SeqCst), 1);
    assert_eq!(*target.lock(), 1.0);
}
