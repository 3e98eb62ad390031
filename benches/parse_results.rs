use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docket::scrape::parser::{DocketTableParser, ResultsParser};

/// Build a results page with `rows` case rows
fn results_page(rows: usize) -> String {
    let mut html = String::from("<html><body><table class=\"results\">");
    for i in 0..rows {
        html.push_str(&format!(
            "<tr class=\"case-row\">\
             <td class=\"case-number\">{:02}-CV-{:05}</td>\
             <td class=\"parties\">Plaintiff {} vs. Defendant {}</td>\
             <td class=\"filed\">Filed 2023-{:02}-15</td>\
             <td class=\"status\">{}</td>\
             </tr>",
            20 + (i % 5),
            i,
            i,
            i + 1,
            (i % 12) + 1,
            if i % 2 == 0 { "Active" } else { "Closed" },
        ));
    }
    html.push_str("</table></body></html>");
    html
}

/// Benchmark results-page extraction across page sizes
fn bench_parse_results(c: &mut Criterion) {
    let parser = DocketTableParser;

    let mut group = c.benchmark_group("parse_results");
    for rows in [10usize, 100, 500] {
        let page = results_page(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &page, |b, page| {
            b.iter(|| parser.parse(black_box(page)).unwrap());
        });
    }
    group.finish();
}

/// Benchmark the no-results and unrecognized-page short circuits
fn bench_parse_edge_pages(c: &mut Criterion) {
    let parser = DocketTableParser;
    let no_results = r#"<html><body><div class="no-results">No matches.</div></body></html>"#;

    c.bench_function("parse_no_results_page", |b| {
        b.iter(|| parser.parse(black_box(no_results)).unwrap());
    });
}

criterion_group!(benches, bench_parse_results, bench_parse_edge_pages);
criterion_main!(benches);
