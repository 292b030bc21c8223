//! Headless cube demo.
//!
//! Spawns a row of cubes that tween up and down from the position settings and
//! a row of host-owned cubes that shake from the shake settings. Triggers fire
//! on scripted frames instead of key presses.
//!
//! Usage: `cube-tweens [settings.json]`

use glam::Vec3;
use zap_tween::{
    tick_record, EntityId, PositionTweener, TickOutcome, Transform, TweenData, TweenRequest, TweenSettings,
    TweenStore,
};

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 300;
const WORKERS: usize = 4;
const CUBES_PER_ROW: u32 = 8;

/// Frame on which the position trigger fires.
const TWEEN_FRAME: u32 = 0;
/// Frame on which the shake trigger fires.
const SHAKE_FRAME: u32 = 90;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => include_str!("../settings.json").to_string(),
    };
    let settings = TweenSettings::from_json(&json)?;

    // Row 0: store-owned cubes driven by position tweens.
    let mut movers = TweenStore::new(PositionTweener);
    for i in 0..CUBES_PER_ROW {
        movers.spawn(EntityId(i), Transform::from_position(Vec3::new(i as f32 * 1.5, 0.0, 0.0)));
    }

    // Row 1: host-owned storage, ticked record by record.
    let shaker = settings.shake.tweener();
    let mut shake_cubes: Vec<Transform> = (0..CUBES_PER_ROW)
        .map(|i| Transform::from_position(Vec3::new(i as f32 * 1.5, -3.0, 0.0)))
        .collect();
    let mut shake_records: Vec<TweenData<Vec3>> = vec![TweenData::default(); shake_cubes.len()];

    for frame in 0..FRAMES {
        if frame == TWEEN_FRAME {
            if let Some(builder) = settings.position.to_builder() {
                log::info!("frame {}: create tween", frame);
                for i in 0..CUBES_PER_ROW {
                    // Keep each cube in its own column.
                    let target = builder.target() + Vec3::new(i as f32 * 1.5, 0.0, 0.0);
                    let builder = builder.with_target(target);
                    movers.push_request(TweenRequest::new(EntityId(i), builder));
                }
            }
        }

        if frame == SHAKE_FRAME {
            if let (Some(shaker), Some(builder)) = (shaker.as_ref(), settings.shake.to_builder()) {
                log::info!("frame {}: create shake", frame);
                for (record, cube) in shake_records.iter_mut().zip(shake_cubes.iter()) {
                    builder.build(shaker, record, cube)?;
                }
            }
        }

        let finished = movers.tick_parallel(FRAME_DT, WORKERS);
        if finished > 0 {
            log::info!("frame {}: {} tweens finished", frame, finished);
        }

        if let Some(shaker) = shaker.as_ref() {
            let mut settled = 0;
            for (record, cube) in shake_records.iter_mut().zip(shake_cubes.iter_mut()) {
                if tick_record(shaker, record, cube, FRAME_DT) == TickOutcome::Finished {
                    settled += 1;
                }
            }
            if settled > 0 {
                log::info!("frame {}: {} shakes settled", frame, settled);
            }
        }

        if frame % 60 == 0 {
            report(frame, &movers, &shake_cubes);
        }
    }

    report(FRAMES, &movers, &shake_cubes);
    Ok(())
}

fn report(frame: u32, movers: &TweenStore<PositionTweener>, shake_cubes: &[Transform]) {
    let heights: Vec<String> = movers.iter().map(|(_, t)| format!("{:.2}", t.position.y)).collect();
    let offsets: Vec<String> = shake_cubes
        .iter()
        .map(|t| format!("({:.2},{:.2})", t.position.x, t.position.y + 3.0))
        .collect();
    log::info!(
        "frame {}: {} tweening, heights [{}], shake [{}]",
        frame,
        movers.active_count(),
        heights.join(" "),
        offsets.join(" ")
    );
}
