use teabox_data::{Document, Row, Table, table::render_table};

#[test]
fn rendered_preview_pads_each_column_to_its_widest_cell() {
    let document = Document::from_lines(["!Sku\tCount", "A1\t5", "B22\t17 // restocked"]);
    let rendered = document.data().render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["Sku  Count", "---  -----", "A1   5", "B22  17"]);
}

#[test]
fn cells_with_line_breaks_render_on_one_line() {
    let mut table = Table::new(["Remark"]);
    let mut row = Row::new();
    row.set_named("Remark", "first\r\nsecond\tthird");
    table.push(row);

    let rendered = table.render();
    let lines: Vec<&str> = rendered.lines().collect();

    let separator = "-".repeat("first  second third".len());
    assert_eq!(lines, vec!["Remark", separator.as_str(), "first  second third"]);
}

#[test]
fn render_table_counts_characters_not_bytes() {
    let headers = vec!["résumé".to_string(), "status".to_string()];
    let rows = vec![vec!["café".to_string(), "ok".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "résumé  status");
    assert_eq!(lines[2], "café    ok");
}

#[test]
fn grid_follows_table_columns() {
    let document = Document::from_lines(["!Brick\tAmount", "B1\t3", "B2"]);
    let (headers, cells) = document.data().grid();
    assert_eq!(headers, vec!["Brick", "Amount"]);
    assert_eq!(
        cells,
        vec![
            vec!["B1".to_string(), "3".to_string()],
            vec!["B2".to_string(), String::new()],
        ]
    );
}

#[test]
fn grid_without_columns_uses_positional_headers() {
    let document = Document::from_lines(["a\tb\tc", "d"]);
    let table = document.data();
    let (headers, cells) = table.grid();
    assert_eq!(headers, vec!["field_1", "field_2", "field_3"]);
    assert_eq!(cells[1], vec!["d", "", ""]);
}

#[test]
fn rows_built_in_code_render_by_name() {
    let mut table = Table::new(["X", "Y"]);
    let mut row = Row::new();
    row.set_named("Y", "y1");
    table.push(row);
    let rendered = table.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec!["X  Y", "---  ---", "   y1"]);
}
