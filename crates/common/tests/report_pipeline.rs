//! Report pipeline over a recorded Playwright results artifact

use std::path::PathBuf;

use translit_common::{
    LengthType, ReportPipeline, ResultTree, StaticStore, StaticTestCase, Status, UI_COVERED,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn store() -> StaticStore {
    let case = |id: &str, name: &str, input: &str, expected: &str| StaticTestCase {
        id: id.to_string(),
        name: name.to_string(),
        input: input.to_string(),
        expected: expected.to_string(),
    };
    StaticStore::new(vec![
        case("TC_0001", "Simple greeting", "aayuboovan", "ආයුබෝවන්"),
        case(
            "TC_0002",
            "Simple present tense sentence",
            "mama gedhara yanavaa",
            "මම ගෙදර යනවා",
        ),
        case("TC_0003", "Question form", "oyaata kohomadha?", "ඔයාට කොහොමද?"),
    ])
}

#[test]
fn recorded_run_produces_one_record_per_spec() {
    let tree = ResultTree::from_file(&fixture("results.json")).unwrap();
    let store = store();
    let records = ReportPipeline::with_defaults(&store).run(&tree);

    let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
    assert_eq!(
        ids,
        vec![
            "Pos_Fun_0001",
            "Neg_Fun_0001",
            "Neg_Fun_0002",
            "Pos_UI_0001",
            "Pos_Fun_0002",
        ]
    );

    let summary = records.summary();
    assert_eq!((summary.total, summary.passed, summary.failed), (5, 3, 2));
}

#[test]
fn first_attempt_and_first_annotation_win() {
    let tree = ResultTree::from_file(&fixture("results.json")).unwrap();
    let store = store();
    let records = ReportPipeline::with_defaults(&store).run(&tree);

    let flaky = &records.records()[1];
    assert_eq!(flaky.status(), Status::Fail);
    assert_eq!(flaky.actual(), "මම ගෙදර යනවාා");
    assert_eq!(flaky.input(), "mama gedhara yanavaa");
}

#[test]
fn unmatched_and_ui_records() {
    let tree = ResultTree::from_file(&fixture("results.json")).unwrap();
    let store = store();
    let records = ReportPipeline::with_defaults(&store).run(&tree);

    let removed = &records.records()[2];
    assert_eq!(removed.name(), "");
    assert_eq!(removed.input(), "");
    assert_eq!(removed.actual(), "");
    assert_eq!(removed.length_type(), LengthType::Short);

    let ui = &records.records()[3];
    assert_eq!(ui.name(), "Output updates in real-time");
    assert_eq!(ui.actual(), "ම");
    assert_eq!(ui.covered(), UI_COVERED);
}
