//! Two-camera ranking walkthrough.
//!
//! Builds plausible collaborator bundles for two cameras, runs two ticks
//! with a switch in between, and prints the `SCORE` messages a transport
//! layer would publish.

use aircast_models::{
    AudioBundle, DetectionBundle, KeywordHit, SceneBundle, ScoreMessage, TrackingBundle,
};
use aircast_ranker::{CameraRanker, RankerConfig, TickInput};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let ranker = CameraRanker::new(RankerConfig::from_env());

    let wide_shot = TickInput::new(
        "cam-wide",
        DetectionBundle {
            bbox_occupancy: 0.15,
            avg_velocity: 12.0,
            max_velocity: 30.0,
            ..Default::default()
        },
    );

    let speaker_cam = TickInput::new(
        "cam-speaker",
        DetectionBundle {
            face_conf_max: 0.93,
            face_area: 0.25,
            bbox_occupancy: 0.42,
            avg_velocity: 8.0,
            max_velocity: 15.0,
            ..Default::default()
        },
    )
    .with_audio(AudioBundle {
        text: "and that is the announcement we have all been waiting for".to_string(),
        keywords: vec![KeywordHit::new("announcement", 1.2)],
        energy_db: -18.0,
        speech_present: true,
    })
    .with_scene(
        SceneBundle::new("a presenter speaking to a full room", 4)
            .with_tags(vec!["presenter".to_string(), "audience".to_string()])
            .with_scene_type("stage")
            .with_activity_level("medium"),
    )
    .with_tracking(TrackingBundle::with_main_subject(11, 0.9, 2));

    // Tick 1: nothing on air yet.
    let results = ranker.rank(&[wide_shot.clone(), speaker_cam.clone()]);
    for result in &results {
        println!("{}", serde_json::to_string_pretty(&ScoreMessage::new(result.clone()))?);
    }

    let winner = &results[0];
    println!("\n--> switching to {} ({})\n", winner.camera_id, winner.reason);
    ranker.update_active_camera(&winner.camera_id, Some(11));

    // Tick 2: the winner now carries the active-camera continuity bonus,
    // the loser starts earning novelty back.
    for result in ranker.rank(&[wide_shot, speaker_cam]) {
        println!(
            "{}  score={:.3}  continuity={:.2}  novelty={:.2}  ({})",
            result.camera_id,
            result.score,
            result.features.continuity_bonus,
            result.features.novelty_decay,
            result.reason
        );
    }

    Ok(())
}
