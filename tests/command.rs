//! Command parsing and cell reference tests.

use std::path::PathBuf;

use reportsheets::command::ReplCommand;
use reportsheets::state::{CellPosition, column_label};

#[test]
fn parses_file_commands() {
    assert_eq!(ReplCommand::parse(":w"), Some(ReplCommand::Write));
    assert_eq!(
        ReplCommand::parse(":w out.xlsx"),
        Some(ReplCommand::WriteTo(PathBuf::from("out.xlsx")))
    );
    assert_eq!(ReplCommand::parse(":w!"), Some(ReplCommand::ForceWrite));
    assert_eq!(ReplCommand::parse(":wq"), Some(ReplCommand::WriteQuit));
    assert_eq!(ReplCommand::parse(":q"), Some(ReplCommand::Quit));
    assert_eq!(ReplCommand::parse(":q!"), Some(ReplCommand::ForceQuit));
    assert_eq!(
        ReplCommand::parse(":e report.xlsx"),
        Some(ReplCommand::Edit(PathBuf::from("report.xlsx")))
    );
    assert_eq!(
        ReplCommand::parse(":view report.xlsx"),
        Some(ReplCommand::View(PathBuf::from("report.xlsx")))
    );
    assert_eq!(ReplCommand::parse(":new"), Some(ReplCommand::New));
    assert_eq!(ReplCommand::parse(":reset"), Some(ReplCommand::Reset));
}

#[test]
fn file_commands_needing_a_path_reject_bare_forms() {
    assert_eq!(ReplCommand::parse(":e"), None);
    assert_eq!(ReplCommand::parse(":view "), None);
}

#[test]
fn parses_cell_commands() {
    assert_eq!(
        ReplCommand::parse("select B2"),
        Some(ReplCommand::Select(CellPosition::new(1, 1)))
    );
    assert_eq!(
        ReplCommand::parse("select b10"),
        Some(ReplCommand::Select(CellPosition::new(9, 1)))
    );
    assert_eq!(
        ReplCommand::parse("set Hello world"),
        Some(ReplCommand::Input("Hello world".to_string()))
    );
    assert_eq!(ReplCommand::parse("set"), Some(ReplCommand::Input(String::new())));
    assert_eq!(ReplCommand::parse("commit"), Some(ReplCommand::Commit));
    assert_eq!(ReplCommand::parse("enter"), Some(ReplCommand::Commit));
    assert_eq!(ReplCommand::parse("show"), Some(ReplCommand::Show));
    assert_eq!(ReplCommand::parse("help"), Some(ReplCommand::Help));
}

#[test]
fn rejects_unknown_and_malformed_input() {
    assert_eq!(ReplCommand::parse("bogus"), None);
    assert_eq!(ReplCommand::parse(":zz"), None);
    assert_eq!(ReplCommand::parse("select 5"), None);
    assert_eq!(ReplCommand::parse("select Z0"), None);
}

#[test]
fn trims_surrounding_whitespace() {
    assert_eq!(ReplCommand::parse("  :q  "), Some(ReplCommand::Quit));
}

#[test]
fn cell_references_round_trip() {
    for pos in [
        CellPosition::new(0, 0),
        CellPosition::new(9, 1),
        CellPosition::new(0, 25),
        CellPosition::new(0, 26),
        CellPosition::new(99, 51),
    ] {
        let reference = pos.to_reference();
        assert_eq!(CellPosition::parse_reference(&reference), Some(pos));
    }
}

#[test]
fn column_labels_extend_past_z() {
    assert_eq!(column_label(0), "A");
    assert_eq!(column_label(25), "Z");
    assert_eq!(column_label(26), "AA");
    assert_eq!(column_label(27), "AB");
}
