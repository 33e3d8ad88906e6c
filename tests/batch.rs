//! End-to-end runs of `filmcrew batch`.

mod common;

use common::{stderr, stdout, Project};
use std::fs;

const SCRIPTS: [&str; 3] = ["coffee_shop.txt", "health_vignettes.txt", "night_train.txt"];

#[test]
fn n_scripts_make_n_output_folders() {
    let project = Project::init();
    for name in SCRIPTS {
        project.add_script(name);
    }
    project.write_script("README.md", "not a script");

    let output = project.run(&["batch"], &[]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("3 of 3 scripts processed"));

    let entries = project.output_entries();
    let (reports, folders): (Vec<&String>, Vec<&String>) = entries
        .iter()
        .partition(|name| name.starts_with("batch_report_"));
    assert_eq!(reports.len(), 1);
    assert_eq!(folders.len(), SCRIPTS.len());
    for (folder, script) in folders.iter().zip(SCRIPTS) {
        let stem = script.trim_end_matches(".txt");
        assert!(folder.starts_with(&format!("{stem}_")), "{folder}");
        assert!(project.output_dir().join(folder).join("MASTER_INDEX.json").is_file());
    }

    let report = fs::read_to_string(project.output_dir().join(reports[0])).unwrap();
    assert!(report.contains("Total Scripts: 3\nSuccessful: 3\nFailed: 0\n"));
}

#[test]
fn a_failing_script_fails_the_batch_but_not_the_others() {
    let project = Project::init();
    project.add_script("coffee_shop.txt");
    project.write_script("legacy.doc", "binary word document");
    project.add_script("night_train.txt");

    let output = project.run(&["batch", "--natural-only", "--no-exports"], &[]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("FAILED legacy.doc"));

    let entries = project.output_entries();
    assert_eq!(entries.len(), 3, "{entries:?}");
    let report_name = entries
        .iter()
        .find(|name| name.starts_with("batch_report_"))
        .unwrap();
    let report = fs::read_to_string(project.output_dir().join(report_name)).unwrap();
    assert!(report.contains("Successful: 2\nFailed: 1\n"));
    assert!(report.contains("legacy.doc FAILED"));
}

#[test]
fn empty_scripts_folder_is_an_error() {
    let project = Project::init();
    let output = project.run(&["batch"], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no script files found"));
}
