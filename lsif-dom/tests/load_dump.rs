use lsif_dom::{load, Error, Mode};
use lsif_type::{Edge, Id};
use pretty_assertions::assert_eq;
use rstest::rstest;

const HEAD: &str = r#"{"id":1,"type":"vertex","label":"metaData","version":"0.6.0","positionEncoding":"utf-16"}
{"id":2,"type":"vertex","label":"project","kind":"typescript","name":"demo"}
{"id":3,"type":"vertex","label":"document","uri":"file:///demo/a.ts","languageId":"typescript"}"#;

fn decode(body: &str) -> Vec<lsif_type::Entry> {
    lsif_parser::parse(&format!("{}\n{}", HEAD, body))
        .into_result()
        .unwrap()
}

#[rstest]
#[case(Mode::Strict)]
#[case(Mode::Buffered)]
fn ordered_dump_loads_in_both_modes(#[case] mode: Mode) {
    let entries = decode(
        r#"{"id":4,"type":"vertex","label":"range","start":{"line":0,"character":0},"end":{"line":0,"character":1}}
{"id":5,"type":"edge","label":"contains","outV":3,"inVs":[4]}
{"id":6,"type":"edge","label":"contains","outV":2,"inVs":[3]}"#,
    );
    let graph = load(entries, mode).unwrap();
    assert_eq!(graph.len(), 6);
    assert_eq!(graph.metadata().map(|m| m.version.as_str()), Some("0.6.0"));
    assert_eq!(
        graph.get(&Id::Number(5)).and_then(|e| e.as_edge()),
        Some(&Edge::contains(3.into(), vec![4.into()]))
    );
    let counts: Vec<(&str, usize)> = graph.label_counts().into_iter().collect();
    assert_eq!(
        counts,
        vec![("metaData", 1), ("project", 1), ("document", 1), ("range", 1), ("contains", 2)]
    );
}

#[test]
fn item_shard_must_resolve() {
    let entries = decode(
        r#"{"id":4,"type":"vertex","label":"referenceResult"}
{"id":5,"type":"vertex","label":"range","start":{"line":0,"character":0},"end":{"line":0,"character":1}}
{"id":6,"type":"edge","label":"item","outV":4,"inVs":[5],"shard":42,"property":"references"}"#,
    );
    assert_eq!(
        load(entries, Mode::Strict),
        Err(Error::UnresolvedReference {
            id: Id::Number(6),
            missing: Id::Number(42)
        })
    );
}

#[test]
fn duplicate_ids_are_fatal() {
    let entries = decode(r#"{"id":3,"type":"vertex","label":"resultSet"}"#);
    assert_eq!(load(entries, Mode::Buffered), Err(Error::DuplicateId(Id::Number(3))));
}

#[rstest]
#[case(Mode::Strict)]
#[case(Mode::Buffered)]
fn reused_id_is_reported_before_its_missing_target(#[case] mode: Mode) {
    let entries = decode(
        r#"{"id":4,"type":"vertex","label":"resultSet"}
{"id":4,"type":"edge","label":"next","outV":4,"inV":9}"#,
    );
    assert_eq!(load(entries, mode), Err(Error::DuplicateId(Id::Number(4))));
}
