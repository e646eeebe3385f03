use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pith_core::{Document, LeashParams, TagSets, analyze, clean, extract, minify, select_region};

fn fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/article.html").unwrap()
}

/// A long page: navigation, many sections of paragraphs, and a footer
fn synthetic(sections: usize) -> String {
    let mut html = String::from("<html><head><title>Bench</title></head><body><nav>");
    for i in 0..50 {
        html.push_str(&format!("<a href=\"/{}\">link {}</a> ", i, i));
    }
    html.push_str("</nav>");
    for s in 0..sections {
        html.push_str(&format!("<section class=\"s{}\"><h2>Section {}</h2>", s, s));
        for p in 0..10 {
            html.push_str(&format!(
                "<p>Paragraph {} of section {} with <b>some</b> inline <a href=\"#\">markup</a> and    spacing.</p>",
                p, s
            ));
        }
        html.push_str("<script>var x = 1;</script></section>");
    }
    html.push_str("<footer>footer</footer></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let small = fixture();
    let large = synthetic(200);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "3KB"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)).to_tree())
    });

    group.bench_with_input(BenchmarkId::new("large", "400KB"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)).to_tree())
    });

    group.finish();
}

fn bench_clean_and_minify(c: &mut Criterion) {
    let html = synthetic(200);
    let tree = Document::parse(&html).to_tree().unwrap();
    let tags = TagSets::standard();

    c.bench_function("clean_and_minify", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            let body = tree.find_element("body").unwrap();
            clean(&mut tree, body, &tags);
            minify(&mut tree, body, &tags);
            tree
        })
    });
}

fn bench_density_and_region(c: &mut Criterion) {
    let html = synthetic(200);
    let mut tree = Document::parse(&html).to_tree().unwrap();
    let body = tree.find_element("body").unwrap();
    let tags = TagSets::standard();
    clean(&mut tree, body, &tags);
    minify(&mut tree, body, &tags);
    let params = LeashParams::default();

    c.bench_function("density_and_region", |b| {
        b.iter(|| {
            let records = analyze(black_box(&tree), body, &tags);
            select_region(&records, &params)
        })
    });
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("full_extraction", |b| b.iter(|| extract(black_box(&html)).and_then(|a| a.html())));
}

criterion_group!(benches, bench_parse, bench_clean_and_minify, bench_density_and_region, bench_full_extraction);
criterion_main!(benches);
