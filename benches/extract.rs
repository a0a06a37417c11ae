// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use dv_records::specs::{entrant, visa};

const CONFIRMATION: &str = "Entrant Name: DOE, JANE\nConfirmation Number: 2025ABCDEF1234\nYear of Birth: 1990\n";

fn application_form() -> String {
    let cards = [
        ("1. Name", "a. Last/Family Name DOE b. First Name JANE c. Middle Name NO MIDDLE NAME"),
        ("2. Gender", "Female"),
        ("5. Country Where You Were Born", "Morocco"),
        ("10. Phone Number", "+212600000000"),
        ("11. E-mail Address", "jane@example.com\nConfirm"),
        ("13. What is your current marital status?", "Married and my spouse is NOT a U.S. citizen"),
        ("14. Number of Children", "2"),
    ];
    let body: String = cards
        .iter()
        .map(|(h, b)| format!(r#"<div class="card"><div class="card-header">{h}</div><div class="card-body">{b}</div></div>"#))
        .collect();
    format!("<html><head><title>Electronic Diversity Visa Program</title></head><body>{body}</body></html>")
}

fn bench_extract(c: &mut Criterion) {
    let form = application_form();

    c.bench_function("entrant_text", |b| {
        b.iter(|| {
            let m = entrant::extract(black_box(CONFIRMATION));
            black_box(m.len())
        })
    });

    c.bench_function("visa_html", |b| {
        b.iter(|| {
            let m = visa::extract_html(black_box(&form));
            black_box(m.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
