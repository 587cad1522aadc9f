mod common;

use common::TestWorkspace;
use proptest::prelude::*;
use teabox_data::{
    Document, FileStore, FormatError, LineKind, MemoryStore, Record, Row, Table,
};

#[test]
fn round_trip_keeps_comments_and_blank_lines() {
    let lines = vec![
        "// header comment",
        "",
        "!Brick\tAmount // titles",
        "B1\t4",
        "   ",
        "B2\t7 //trailing",
        "http://example.com\t9",
    ];
    let document = Document::from_lines(&lines);
    let mut expected = lines.clone();
    // Whitespace-only lines carry no content and come back empty.
    expected[4] = "";
    assert_eq!(document.write_lines(), expected);
}

#[test]
fn data_lines_realign_to_canonical_columns() {
    let mut document = Document::with_columns(["A", "B", "C", "D"]);
    let mut first = Record::new();
    first.set_named("C", "c1");
    first.set_named("A", "a1");
    let mut second = Record::new();
    second.set_named("D", "d2");
    second.set_named("B", "b2");
    second.set_named("Z", "ignored");
    document.push(first);
    document.push(second);

    assert_eq!(document.write_lines(), vec!["a1\t\tc1\t", "\tb2\t\td2"]);
}

#[test]
fn preset_columns_win_over_title_line() {
    let mut document = Document::with_columns(["X", "Y"]);
    document.read_lines(["!A\tB", "1\t2"]);
    assert_eq!(document.columns(), vec!["X", "Y"]);
    assert_eq!(document.get(1).expect("data").get_named("X"), "1");
}

#[test]
fn only_first_title_line_sets_columns() {
    let document = Document::from_lines(["!A\tB", "!C\tD", "1\t2"]);
    assert_eq!(document.columns(), vec!["A", "B"]);
    assert_eq!(document.write_lines()[1], "!C\tD");
}

#[test]
fn data_before_titles_uses_later_titles() {
    let document = Document::from_lines(["1\t2", "!A\tB"]);
    assert_eq!(document.get(0).expect("data").get_named("B"), "2");
}

#[test]
fn untitled_data_is_written_as_is() {
    let lines = ["one\ttwo", "three"];
    let document = Document::from_lines(lines);
    assert_eq!(document.write_lines(), vec!["one\ttwo", "three"]);
}

#[test]
fn add_binds_record_to_canonical_columns() {
    let mut document = Document::from_lines(["!Name\tAge"]);
    let mut record = Record::new();
    record.set_fields(["Ann", "41"]);
    let id = document.add(record);

    assert!(document.contains(id));
    let added = document.find(id).expect("added record");
    assert!(added.shares_columns_with(document.column_list()));
    assert_eq!(added.get_named("Age"), "41");
    assert_eq!(document.write_lines(), vec!["!Name\tAge", "Ann\t41"]);
}

#[test]
fn insert_and_remove_by_identity() {
    let mut document = Document::from_lines(["!A", "x"]);
    let mut comment = Record::with_kind(LineKind::Other);
    comment.set_comment(" inserted");
    let id = document.insert(1, comment);
    assert_eq!(document.position(id), Some(1));
    assert_eq!(document.write_lines(), vec!["!A", "// inserted", "x"]);

    let removed = document.remove(id).expect("removed");
    assert_eq!(removed.id(), id);
    assert!(!document.contains(id));
    assert!(document.remove(id).is_none());
    assert_eq!(document.len(), 2);
}

#[test]
fn table_view_is_detached() {
    let document = Document::from_lines(["!A\tB", "1\t2", "// note", "3\t4"]);
    let mut table = document.data();
    assert_eq!(table.len(), 2);
    assert_eq!(table.columns(), ["A", "B"]);

    table.get_mut(0).expect("row").set_named("A", "changed");
    assert_eq!(document.get(1).expect("data").get_named("A"), "1");
    assert_eq!(table.get(0).expect("row").get_named("A"), "changed");
}

#[test]
fn document_from_table_writes_titles_then_rows() {
    let mut table = Table::new(["Id", "Name"]);
    let mut row = Row::new();
    row.set_named("Name", "Bob");
    row.set_named("Id", "7");
    table.push(row);

    let store = MemoryStore::new();
    let mut document = Document::from_table(table, store.clone()).expect("from table");
    document.save().expect("save");
    assert_eq!(store.lines(), vec!["!Id\tName", "7\tBob"]);
}

#[test]
fn missing_file_is_source_not_found() {
    let workspace = TestWorkspace::new();
    let path = workspace.file("absent.txt");
    let err = Document::open(FileStore::new(&path)).unwrap_err();
    assert!(matches!(err, FormatError::SourceNotFound { .. }));
    assert!(err.to_string().starts_with("Can't find file:"));
}

#[test]
fn missing_file_tolerated_then_created_on_save() {
    let workspace = TestWorkspace::new();
    let path = workspace.file("new.txt");
    let mut document =
        Document::open(FileStore::create_if_missing(&path)).expect("open missing");
    assert!(document.is_empty());

    let mut record = Record::new();
    record.set_fields(["hello"]);
    document.add(record);
    document.save().expect("save");
    assert_eq!(workspace.read_lines("new.txt"), vec!["hello"]);
}

#[test]
fn file_round_trip_through_disk() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_lines("data.txt", &["!A\tB", "1\t2 // c", "", "//end"]);
    let mut document = Document::open(FileStore::new(&path)).expect("open");
    document.save().expect("save");
    assert_eq!(
        workspace.read_lines("data.txt"),
        vec!["!A\tB", "1\t2 // c", "", "//end"]
    );
}

#[test]
fn crlf_files_are_read_without_carriage_returns() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("crlf.txt", "!A\tB\r\n1\t2\r\n");
    let document = Document::open(FileStore::new(&path)).expect("open");
    assert_eq!(document.columns(), vec!["A", "B"]);
    assert_eq!(document.get(1).expect("data").get_named("B"), "2");
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .:-]{0,6}[A-Za-z0-9]"
}

fn comment_strategy() -> impl Strategy<Value = String> {
    proptest::option::of("[ A-Za-z0-9/]{1,10}").prop_map(|comment| comment.unwrap_or_default())
}

fn document_strategy() -> impl Strategy<Value = Vec<String>> {
    (1usize..5).prop_flat_map(|width| {
        let titles = Just((0..width).map(|idx| format!("Column {idx}")).collect::<Vec<_>>());
        let data_line = (
            proptest::collection::vec(value_strategy(), width),
            comment_strategy(),
        )
            .prop_map(|(fields, comment)| {
                let mut line = fields.join("\t");
                if !comment.is_empty() {
                    line.push_str(" //");
                    line.push_str(&comment);
                }
                line
            });
        let other_line = prop_oneof![
            Just(String::new()),
            "[ A-Za-z0-9]{1,10}".prop_map(|text| format!("//{text}")),
        ];
        let body = proptest::collection::vec(prop_oneof![3 => data_line, 1 => other_line], 0..12);
        (titles, body).prop_map(|(titles, body)| {
            let mut lines = vec![format!("!{}", titles.join("\t"))];
            lines.extend(body);
            lines
        })
    })
}

proptest! {
    #[test]
    fn write_after_read_reproduces_canonical_lines(lines in document_strategy()) {
        let document = Document::from_lines(&lines);
        prop_assert_eq!(document.write_lines(), lines);
    }
}
