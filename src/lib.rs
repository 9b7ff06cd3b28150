//! # Lagerbestand
//!
//! LX02 倉庫庫存報表分析：報表解析 → 庫存帳本 → 容量分析

pub use stock_calc::{
    aggregate, analyze_stock, parse_report, BatchAnalysis, BatchMaterialGroup, CapacityCheck,
    CapacityResolver, NamedReport, ParseOutcome, ParseStats, ReportAnalysis, ReportParser,
    StockAnalyzer,
};
pub use stock_core::{
    AlertSeverity, AnalysisResult, CapacityConfig, CapacityInfo, CapacityTier, MaterialCapacity,
    MaterialGroup, PromotionWindow, StockAlert, StockError, StockLedger, StockRow,
    StorageTypeSettings, MKT,
};
