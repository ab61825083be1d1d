use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inflation_map::choropleth::Classifier;
use inflation_map::fred::{RateTable, StateRate};
use inflation_map::states::STATES;
use inflation_map::svg::enhance_svg;

fn sample_map() -> String {
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.a{}</style><g class="state">"#);
    for (abbr, name) in STATES {
        let _ = write!(
            svg,
            r#"<path class="{}" d="M0 0 L10 10 L20 0 Z"><title>{name}</title></path>"#,
            abbr.to_ascii_lowercase()
        );
    }
    svg.push_str("</g></svg>");
    svg
}

fn sample_rates() -> RateTable {
    STATES
        .iter()
        .enumerate()
        .map(|(i, (abbr, _))| {
            #[allow(clippy::cast_precision_loss)]
            let rate = 2.0 + (i % 17) as f64 * 0.3;
            (*abbr, StateRate { date: None, rate: Some(rate) })
        })
        .collect()
}

fn benchmark_svg_enhance(c: &mut Criterion) {
    let svg = sample_map();
    let rates = sample_rates();

    c.bench_function("classify_states", |b| {
        b.iter(|| Classifier::from_values(black_box(&rates).rates()));
    });

    c.bench_function("enhance_svg", |b| {
        b.iter(|| enhance_svg(black_box(&svg), black_box(&rates), "data-inflation"));
    });
}

criterion_group!(benches, benchmark_svg_enhance);
criterion_main!(benches);
