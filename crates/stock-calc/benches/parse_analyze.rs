use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stock_calc::{ReportParser, StockAnalyzer};
use stock_core::{CapacityConfig, MaterialCapacity, StorageTypeSettings};

const STORAGE_TYPES: [&str; 4] = ["MKT", "LAG", "QS", "SPE"];

fn report(materials: usize) -> String {
    let mut text =
        String::from("Artikel\tArtikelkurztext\tVerfügbarer Bestand\tST\tLagertyp\tGesamt\n");
    for m in 0..materials {
        for (i, storage_type) in STORAGE_TYPES.iter().enumerate() {
            let qty = (m * 7 + i * 13) % 250;
            text.push_str(&format!(
                "{:06}\tArtikel {}\t{}\tST\t{}\t{}\n",
                m, m, qty, storage_type, qty
            ));
        }
    }
    text
}

fn config(materials: usize) -> CapacityConfig {
    let settings = StorageTypeSettings::default()
        .with_type("LAG", true, 200)
        .with_type("QS", true, 50);
    (0..materials).fold(CapacityConfig::new().with_storage_types(settings), |config, m| {
        let material = MaterialCapacity::new(format!("{:06}", m), 120);
        let material = if m % 3 == 0 {
            material.with_promotion(240, None)
        } else {
            material
        };
        config.with_material(material)
    })
}

fn bench_parse_analyze(c: &mut Criterion) {
    let text = report(5_000);
    let analyzer = StockAnalyzer::new(config(5_000))
        .with_reference_date(NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());

    c.bench_function("parse_report_5000", |b| {
        b.iter(|| ReportParser::parse(black_box(&text)))
    });

    let ledger = ReportParser::parse(&text);
    c.bench_function("analyze_stock_5000", |b| {
        b.iter(|| analyzer.analyze(black_box(&ledger)))
    });
}

criterion_group!(benches, bench_parse_analyze);
criterion_main!(benches);
