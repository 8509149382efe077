//! Frame Stall Demo
//!
//! Drives a looping and a ping-pong tween through steady 60 FPS frames, then
//! simulates a long stall and shows every skipped boundary still firing.
//!
//! Run with: RUST_LOG=glide_tween=debug cargo run -p glide_tween --example frame_stall

use glide_tween::{Ease, FloatTween, TweenScheduler, TweenSettings, TweenSpec};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SETTINGS: &str = r#"
[scheduler]
initial_capacity = 8

[presets.spin]
duration = 0.5
wrap_mode = "loop"
loop_count = 6
ease = "in-out-sine"

[presets.pulse]
duration = 0.25
wrap_mode = "ping-pong"
ease = "out-quad"
"#;

fn main() -> glide_tween::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = TweenSettings::from_toml_str(SETTINGS)?;
    let scheduler = TweenScheduler::with_config(settings.scheduler.clone());

    let angle = Arc::new(Mutex::new(0.0_f32));
    let scale = Arc::new(Mutex::new(1.0_f32));

    let spin = settings
        .spec("spin")?
        .on_loop(|| tracing::info!("spin looped"))
        .on_complete(|| tracing::info!("spin complete"));
    scheduler.spawn(spin, FloatTween::shared(0.0, 360.0, angle.clone()));

    let pulse = settings
        .spec("pulse")?
        .on_ping_pong(|| tracing::info!("pulse flipped"));
    let pulse = scheduler.spawn(pulse, FloatTween::shared(1.0, 1.2, scale.clone()));

    let fade = TweenSpec::new(0.3)
        .delay(0.1)
        .ease(Ease::OutCubic)
        .on_complete(|| tracing::info!("fade complete"));
    scheduler.spawn(fade, FloatTween::new(0.0, 1.0, |_| {}));

    for frame in 0..30 {
        scheduler.tick(1.0 / 60.0);
        if frame % 10 == 0 {
            tracing::info!(frame, angle = *angle.lock(), scale = *scale.lock(), "steady");
        }
    }

    tracing::info!("stalling for 1.7s");
    scheduler.tick(1.7);
    tracing::info!(
        angle = *angle.lock(),
        scale = *scale.lock(),
        live = scheduler.live_count(),
        "after stall"
    );

    scheduler.cancel(pulse, true);
    scheduler.tick(0.0);
    tracing::info!(scale = *scale.lock(), live = scheduler.live_count(), "pulse cancelled");

    Ok(())
}
