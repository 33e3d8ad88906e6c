use super::model::{Scene, SceneType, ScriptStats, VoiceKind, VoiceLine};

pub(crate) fn compute_stats(scenes: &[Scene], voice_lines: &[VoiceLine]) -> ScriptStats {
    let mut stats = ScriptStats {
        total_scenes: scenes.len(),
        total_shots: scenes.iter().map(|scene| scene.shots.len()).sum(),
        total_voice_overs: scenes.iter().map(|scene| scene.voice_overs.len()).sum(),
        off_screen_lines: voice_lines
            .iter()
            .filter(|line| line.kind == VoiceKind::OffScreen)
            .count(),
        ..ScriptStats::default()
    };

    for scene in scenes {
        *stats
            .scene_types
            .entry(scene.scene_type.to_string())
            .or_default() += 1;
        match scene.scene_type {
            SceneType::Flashback => stats.flashback_scenes += 1,
            SceneType::Montage => stats.montage_scenes += 1,
            SceneType::Present | SceneType::Dream => {}
        }
        for shot in &scene.shots {
            *stats.shot_types.entry(shot.shot_type.clone()).or_default() += 1;
            if shot.dialogue.is_empty() {
                stats.action_shots += 1;
            } else {
                stats.dialogue_shots += 1;
            }
        }
        for transition in [&scene.transition_in, &scene.transition_out]
            .into_iter()
            .flatten()
        {
            *stats
                .transitions
                .entry(transition.kind.clone())
                .or_default() += 1;
        }
    }
    stats
}
