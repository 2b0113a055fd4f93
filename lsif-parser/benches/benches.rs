use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn dump(documents: u32) -> String {
    let mut lines = vec![
        r#"{"id":1,"type":"vertex","label":"metaData","version":"0.6.0","positionEncoding":"utf-16"}"#
            .to_owned(),
        r#"{"id":2,"type":"vertex","label":"project","kind":"typescript","name":"bench"}"#.to_owned(),
    ];
    let mut id = 3;
    for doc in 0..documents {
        let document = id;
        lines.push(format!(
            r#"{{"id":{},"type":"vertex","label":"document","uri":"file:///bench/{}.ts","languageId":"typescript"}}"#,
            document, doc
        ));
        id += 1;
        let mut ranges = Vec::new();
        for line in 0..50 {
            lines.push(format!(
                r#"{{"id":{},"type":"vertex","label":"range","start":{{"line":{},"character":4}},"end":{{"line":{},"character":9}},"tag":{{"type":"reference","text":"value"}}}}"#,
                id, line, line
            ));
            ranges.push(id.to_string());
            id += 1;
        }
        lines.push(format!(
            r#"{{"id":{},"type":"edge","label":"contains","outV":{},"inVs":[{}]}}"#,
            id,
            document,
            ranges.join(",")
        ));
        id += 1;
    }
    lines.join("\n")
}

fn bench_decode(c: &mut Criterion) {
    let element = r#"{ "id": 5, "type": "edge", "label": "contains", "outV": 1, "inVs": [4] }"#;
    c.bench_function("decode_line", |b| {
        b.iter(|| lsif_parser::decode_line(black_box(element)))
    });

    let text = dump(20);
    c.bench_function("parse_dump", |b| b.iter(|| lsif_parser::parse(black_box(&text))));
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
