//! LX02 庫存檢查示例
//!
//! 用法：cargo run --example check_stock -- <報表.txt> [容量配置.json]

use anyhow::Context;
use lagerbestand::{CapacityConfig, ReportParser, StockAnalyzer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let report_path = args
        .next()
        .context("缺少報表路徑：check_stock <報表.txt> [容量配置.json]")?;

    let text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("無法讀取報表 {}", report_path))?;

    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("無法讀取容量配置 {}", path))?;
            CapacityConfig::from_json(&json)?
        }
        None => CapacityConfig::new(),
    };

    let outcome = ReportParser::parse_with_stats(&text);
    let analyzer = StockAnalyzer::try_new(config).context("容量配置驗證失敗")?;
    let result = analyzer.analyze(&outcome.ledger);

    println!("=== 庫存檢查：{} ===\n", report_path);
    println!(
        "物料: {}，警示: {}，儲位類型: {}（略過 {} 行）\n",
        result.total_materials,
        result.total_alerts,
        result.storage_locations,
        outcome.stats.dropped()
    );

    for group in &result.alerts_only().material_groups {
        println!("{} {}（合計 {}）", group.material, group.material_name, group.total_stock);
        for row in &group.rows {
            for alert in &row.alerts {
                println!("  - {}: {}", row.storage_type, alert.message);
            }
        }
    }

    Ok(())
}
