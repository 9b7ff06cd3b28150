//! # Stock Calculation Engine
//!
//! LX02 報表解析與容量分析引擎

pub mod analyzer;
pub mod batch;
pub mod capacity;
pub mod parser;

// Re-export 主要類型
pub use analyzer::StockAnalyzer;
pub use batch::{aggregate, BatchAnalysis, BatchMaterialGroup, NamedReport, ReportAnalysis};
pub use capacity::{CapacityCheck, CapacityResolver};
pub use parser::{ParseOutcome, ParseStats, ReportParser};

use stock_core::{AnalysisResult, CapacityConfig, StockLedger};

/// 解析 LX02 報表文字為庫存帳本
pub fn parse_report(text: &str) -> StockLedger {
    ReportParser::parse(text)
}

/// 以今天為基準日期分析帳本（不驗證配置）
pub fn analyze_stock(ledger: &StockLedger, config: &CapacityConfig) -> AnalysisResult {
    StockAnalyzer::new(config.clone()).analyze(ledger)
}
