use lsif_parser::{parse, ErrorKind};
use lsif_type::{EdgeLabel, ElementTrait, Id, Vertex};
use pretty_assertions::assert_eq;

const DUMP: &str = r#"{"id":1,"type":"vertex","label":"metaData","version":"0.6.0","positionEncoding":"utf-16","toolInfo":{"name":"lsif","args":[]}}
{"id":2,"type":"vertex","label":"project","kind":"typescript","name":"demo"}
{"id":3,"type":"vertex","label":"$event","kind":"begin","scope":"project","data":2}
{"id":4,"type":"vertex","label":"document","uri":"file:///demo/a.ts","languageId":"typescript"}
{"id":5,"type":"vertex","label":"range","start":{"line":0,"character":13},"end":{"line":0,"character":14},"tag":{"type":"definition","text":"x","kind":13,"fullRange":{"start":{"line":0,"character":13},"end":{"line":0,"character":35}}}}
{"id":6,"type":"vertex","label":"resultSet"}
{"id":7,"type":"edge","label":"next","outV":5,"inV":6}
{"id":8,"type":"vertex","label":"moniker","scheme":"lsif","identifier":"a:x","unique":"group","kind":"export"}
{"id":9,"type":"edge","label":"moniker","outV":6,"inV":8}
{"id":10,"type":"edge","label":"contains","outV":4,"inVs":[5]}
{"id":11,"type":"edge","label":"contains","outV":2,"inVs":[4]}
{"id":12,"type":"vertex","label":"$event","kind":"end","scope":"project","data":2}
"#;

#[test]
fn decodes_a_well_formed_dump() {
    let parse = parse(DUMP);
    assert!(parse.is_ok(), "{:?}", parse.errors);
    let labels: Vec<&str> = parse.entries.iter().map(|e| e.element.get_label()).collect();
    assert_eq!(
        labels,
        vec![
            "metaData", "project", "$event", "document", "range", "resultSet", "next", "moniker",
            "moniker", "contains", "contains", "$event"
        ]
    );
    match parse.entries[7].as_vertex() {
        Some(Vertex::Moniker(moniker)) => assert_eq!(moniker.identifier, "a:x"),
        other => panic!("expected a moniker, got {:?}", other),
    }
    let entries = parse.into_result().unwrap();
    assert_eq!(entries.last().map(|e| e.id.clone()), Some(Id::Number(12)));
}

#[test]
fn collects_every_bad_line_and_rejects_with_the_first() {
    let mut lines: Vec<String> = DUMP.lines().map(str::to_owned).collect();
    lines[2] = r#"{"id":3,"type":"vertex","label":"$event","kind":"begin","scope":"workspace","data":2}"#.to_owned();
    lines[6] = r#"{"id":7,"type":"edge","label":"next","outV":5,"inVs":[6]}"#.to_owned();
    lines[9] = "{\"id\":10,".to_owned();
    let parse = parse(&lines.join("\n"));

    let failed: Vec<usize> = parse.errors.iter().map(|e| e.line).collect();
    assert_eq!(failed, vec![3, 7, 10]);
    assert_eq!(parse.entries.len(), 9);
    assert!(parse
        .entries
        .iter()
        .all(|e| e.as_edge().map_or(true, |edge| edge.label() != EdgeLabel::Next)));

    let error = parse.into_result().unwrap_err();
    assert_eq!(error.line, 3);
    assert!(matches!(error.kind, ErrorKind::Schema(_)));
    assert!(error.to_string().starts_with("line 3: schema violation:"));
}

#[test]
fn rejects_foreign_position_encodings() {
    let text = r#"{"id":1,"type":"vertex","label":"metaData","version":"0.6.0","positionEncoding":"utf-8"}"#;
    let error = parse(text).into_result().unwrap_err();
    assert!(error.to_string().contains("positionEncoding"));
}
