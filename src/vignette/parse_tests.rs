use super::{character_appearances, parse_vignettes, VignetteRules};
use crate::vignette::model::SegmentKind;

const HEALTH_SPOTS: &str = "ES Health Vignettes

Vignette #1: Morning at the Farm
Video: Wide shot of a farmhouse at sunrise. Meet Michael Grant, a retired farmer.
Year: 1998
On screen text: \"Michael, 67\"
VO: Every morning starts the same way.
Digital assistant voice: Good morning, Michael.

Vignette #2: Clinic Visit
Video: Close on a hospital waiting room. Time: 9:30 am
Dr. Roy walks in.
Patient voice: (Lanie) I was nervous that day.
CUT TO the parking lot.
";

fn rules() -> VignetteRules {
    VignetteRules {
        known_characters: vec!["Dr. Roy".to_string()],
        ..VignetteRules::default()
    }
}

#[test]
fn numbered_markers_split_vignettes_and_segments() {
    let script = parse_vignettes(HEALTH_SPOTS, &rules());
    assert_eq!(script.vignettes.len(), 2);

    let farm = &script.vignettes[0];
    assert_eq!(farm.scene_title, "Morning at the Farm");
    assert_eq!(farm.segments.len(), 2);
    let video = &farm.segments[0];
    assert_eq!(video.segment_id, "1-001");
    assert_eq!(video.kind, SegmentKind::Video);
    assert_eq!(
        video.content,
        "Wide shot of a farmhouse at sunrise. Meet Michael Grant, a retired farmer.\nYear: 1998"
    );
    assert_eq!(video.on_screen_text, "Michael, 67");
    assert_eq!(video.time_period, "1998");
    assert_eq!(video.location, "Farmhouse");
    assert_eq!(video.characters_mentioned, vec!["Michael Grant"]);

    let voice = &farm.segments[1];
    assert_eq!(voice.kind, SegmentKind::Vo);
    assert_eq!(voice.content, "Every morning starts the same way.");
    assert_eq!(voice.narration, "Digital Assistant: Good morning, Michael.");

    let clinic = &script.vignettes[1];
    assert_eq!(clinic.scene_title, "Clinic Visit");
    assert_eq!(clinic.characters, vec!["Dr. Roy", "Lanie"]);
    assert_eq!(clinic.locations, vec!["Hospital"]);
    assert_eq!(clinic.transitions, vec!["CUT TO"]);
    assert_eq!(clinic.segments[0].narration, "Lanie: I was nervous that day.");
    assert_eq!(clinic.segments[0].time_period, "9:30 am");
}

#[test]
fn statistics_collect_unique_sorted_values() {
    let stats = parse_vignettes(HEALTH_SPOTS, &rules()).stats;
    assert_eq!(stats.total_scenes, 2);
    assert_eq!(stats.total_segments, 3);
    assert_eq!(stats.total_video_segments, 2);
    assert_eq!(stats.total_vo_segments, 1);
    assert_eq!(stats.total_text_overlays, 0);
    assert_eq!(stats.characters, vec!["Dr. Roy", "Lanie", "Michael Grant"]);
    assert_eq!(stats.locations, vec!["Farmhouse", "Hospital"]);
    assert_eq!(stats.time_periods, vec!["1998", "9:30 am"]);
}

#[test]
fn transition_markers_split_unnumbered_scripts() {
    let content = "Text overlay: Caring for every generation
Video: A family dinner at home, laughter around the table and warm light.
TRANSITION TO.
Video: An office window at dusk with a single lamp still burning late.
";
    let script = parse_vignettes(content, &VignetteRules::default());
    assert_eq!(script.vignettes.len(), 2);

    let first = &script.vignettes[0];
    assert_eq!(first.segments[0].kind, SegmentKind::TextOverlay);
    assert_eq!(first.segments[0].content, "Caring for every generation");
    assert_eq!(first.segments[1].segment_id, "1-002");
    assert_eq!(script.vignettes[1].locations, vec!["Office"]);
    assert_eq!(script.stats.total_text_overlays, 1);
    assert_eq!(script.stats.locations, vec!["Home", "Office"]);
}

#[test]
fn short_scripts_become_a_single_untitled_vignette() {
    let script = parse_vignettes("Spot\nVO: Thanks for watching.\n", &VignetteRules::default());
    assert_eq!(script.vignettes.len(), 1);
    assert_eq!(script.vignettes[0].scene_title, "Vignette 1");
    assert_eq!(script.vignettes[0].segments[0].content, "Thanks for watching.");
}

#[test]
fn appearances_point_at_segments() {
    let script = parse_vignettes(HEALTH_SPOTS, &rules());
    let appearances = character_appearances(&script.vignettes);
    let lanie = &appearances["Lanie"];
    assert_eq!(lanie.len(), 1);
    assert_eq!(lanie[0].vignette, 2);
    assert_eq!(lanie[0].segment, "2-001");
    assert_eq!(lanie[0].kind, SegmentKind::Video);
}
