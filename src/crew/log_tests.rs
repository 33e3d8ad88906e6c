use super::*;
use serde_json::json;

fn entry(department: Department, scene: u32, shot: u32, seconds: f64, failed: bool) -> AgentLog {
    AgentLog {
        agent_name: department.name().to_string(),
        agent_role: department.role().to_string(),
        timestamp: "2026-01-01T09:00:00".to_string(),
        scene_number: scene,
        shot_number: shot,
        input_data: json!({}),
        output_data: json!({}),
        execution_time: seconds,
        status: if failed {
            ExecutionStatus::Failed
        } else {
            ExecutionStatus::Success
        },
        errors: if failed {
            vec!["LM command failed".to_string()]
        } else {
            Vec::new()
        },
    }
}

fn sample_book() -> AgentLogBook {
    let mut book = AgentLogBook::default();
    book.record(
        Department::CameraDirector,
        entry(Department::CameraDirector, 1, 1, 0.5, false),
    );
    book.record(
        Department::CameraDirector,
        entry(Department::CameraDirector, 2, 1, 1.5, true),
    );
    book.record(
        Department::SoundDesigner,
        entry(Department::SoundDesigner, 10, 3, 0.25, false),
    );
    book
}

#[test]
fn log_files_are_grouped_by_department_key() {
    let book = sample_book();
    let paths: Vec<String> = book.log_files().map(|(path, _)| path).collect();
    assert_eq!(
        paths,
        vec![
            "Agent_Logs/camera_director/scene1_shot1.json",
            "Agent_Logs/camera_director/scene2_shot1.json",
            "Agent_Logs/sound_designer/scene10_shot3.json",
        ]
    );
}

#[test]
fn report_summarizes_agents_scenes_and_errors() {
    let report = sample_book().report("2026-01-01T09:00:05");
    assert_eq!(report.total_executions, 3);

    let camera = &report.agents_summary["camera_director"];
    assert_eq!(camera.name, "Camera Director Agent");
    assert_eq!(camera.executions, 2);
    assert!((camera.avg_execution_time - 1.0).abs() < 1e-9);
    assert!((camera.success_rate - 50.0).abs() < 1e-9);
    assert!(!report.agents_summary.contains_key("music_director"));

    let metrics = &report.performance_metrics;
    assert!((metrics.total_execution_time - 2.25).abs() < 1e-9);
    assert_eq!(metrics.fastest_agent.as_deref(), Some("Sound Designer Agent"));
    assert_eq!(metrics.slowest_agent.as_deref(), Some("Camera Director Agent"));

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].scene, 2);
}

#[test]
fn scene_coverage_serializes_in_numeric_order() {
    let report = sample_book().report("now");
    let text = serde_json::to_string(&report).unwrap();
    let first = text.find("\"scene_2\"").unwrap();
    let second = text.find("\"scene_10\"").unwrap();
    assert!(first < second, "{text}");

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value["scene_coverage"]["scene_1"]["agents_involved"],
        json!(["Camera Director Agent"])
    );
}

#[test]
fn empty_book_reports_no_metrics() {
    let report = AgentLogBook::default().report("now");
    assert_eq!(report.total_executions, 0);
    assert_eq!(report.performance_metrics.fastest_agent, None);
}
