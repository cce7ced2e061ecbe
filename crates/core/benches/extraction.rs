use blockport_core::{Category, CategoryTable, Document, ExtractConfig, classify_blocks, extract_body, project_document};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn article_html() -> String {
    std::fs::read_to_string("../../tests/fixtures/note_article.html").unwrap()
}

/// Synthetic body with `sections` heading/paragraph/list/link-card groups
fn synthetic_html(sections: usize) -> String {
    let mut body = String::new();
    for i in 0..sections {
        body.push_str(&format!(
            r#"<h2>見出し{i}</h2>
            <p>段落{i}の本文。<a href="https://example.com/{i}">リンク</a>を含みます。</p>
            <ul><li>項目A</li><li><a href="/b">項目B</a></li></ul>
            <div class="note-embed"><a href="https://note.com/n/n{i}">カード</a></div>
            <div><div><p>ネストした段落{i}</p></div></div>"#
        ));
    }
    format!(r#"<html><body><div class="note-common-styles__textnote-body">{body}</div></body></html>"#)
}

fn bench_parse(c: &mut Criterion) {
    let html = article_html();

    c.bench_function("parse_article", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_classification(c: &mut Criterion) {
    let config = ExtractConfig::default();
    let mut group = c.benchmark_group("classify_blocks");

    for sections in [10, 100, 1000] {
        let doc = Document::parse(&synthetic_html(sections));
        let container = doc.select_first(&config.primary_selector).unwrap().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(sections), &container, |b, container| {
            b.iter(|| classify_blocks(black_box(container), black_box(&config)))
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let doc = Document::parse(&synthetic_html(100));
    let blocks = extract_body(&doc, &ExtractConfig::default()).unwrap().blocks;

    c.bench_function("project_document", |b| b.iter(|| project_document(black_box(&blocks))));
}

fn bench_tagging(c: &mut Criterion) {
    let doc = Document::parse(&synthetic_html(100));
    let blocks = extract_body(&doc, &ExtractConfig::default()).unwrap().blocks;
    let table = CategoryTable::default();

    c.bench_function("suggest_tags", |b| {
        b.iter(|| blockport_core::suggest_tags(black_box(&blocks), Category::Tips, &table))
    });
}

criterion_group!(benches, bench_parse, bench_classification, bench_projection, bench_tagging);
criterion_main!(benches);
