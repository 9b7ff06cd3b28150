//! # Stock Core
//!
//! 核心資料模型與類型定義（LX02 庫存報表）

pub mod analysis;
pub mod config;
pub mod ledger;
pub mod promotion;
pub mod validation;

// Re-export 主要類型
pub use analysis::{
    AlertSeverity, AnalysisResult, CapacityInfo, CapacityTier, MaterialGroup, StockAlert,
    StockRow,
};
pub use config::{CapacityConfig, MaterialCapacity, StorageTypeSettings, MKT};
pub use ledger::{LocationStock, MaterialStock, StockLedger};
pub use promotion::PromotionWindow;

/// 庫存分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("無效的物料代碼 '{code}': {reason}")]
    InvalidMaterialCode { code: String, reason: String },

    #[error("物料 {material} 的容量無效: {value}（上限 {max}）")]
    InvalidCapacity {
        material: String,
        value: u64,
        max: u64,
    },

    #[error("物料 {material} 的促銷結束日期超出範圍: {date}")]
    PromoEndDateOutOfRange {
        material: String,
        date: chrono::NaiveDate,
    },

    #[error("容量配置解析失敗: {0}")]
    ConfigDecode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StockError>;
