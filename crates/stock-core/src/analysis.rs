//! 庫存分析結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 警示等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// 超出容量
    Danger,
}

/// 容量來源層級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityTier {
    /// 促銷容量
    Promo,
    /// 一般容量（基本容量、儲位專屬容量或預設容量）
    Normal,
}

/// 容量警示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub message: String,
    pub capacity_type: CapacityTier,
}

impl StockAlert {
    /// 超出容量警示："Over capacity (qty/capacity)"
    pub fn over_capacity(qty: u64, capacity: u64, tier: CapacityTier) -> Self {
        Self {
            severity: AlertSeverity::Danger,
            message: format!("Over capacity ({}/{})", qty, capacity),
            capacity_type: tier,
        }
    }
}

/// 實際採用的容量資訊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInfo {
    pub effective_capacity: u64,
    pub capacity_type: CapacityTier,
    pub is_promo_active: bool,
}

/// 單一 (物料, 儲位) 的分析列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    /// 物料代碼
    pub material: String,

    /// 物料描述
    pub material_name: String,

    /// 儲位類型
    pub storage_type: String,

    /// 該儲位庫存
    pub qty: u64,

    /// 處理到此列時的物料累計庫存
    pub running_total: u64,

    /// 警示
    pub alerts: Vec<StockAlert>,

    /// 本列的容量資訊（未檢查時為 None）
    pub capacity: Option<CapacityInfo>,

    /// 容量使用率（百分比，兩位小數）
    pub utilization_pct: Option<Decimal>,
}

impl StockRow {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// 物料分組摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialGroup {
    pub material: String,
    pub material_name: String,

    /// 所有儲位庫存合計
    pub total_stock: u64,

    /// 各儲位分析列（依帳本順序）
    pub rows: Vec<StockRow>,

    pub has_multiple_storage_types: bool,

    /// 最後一個完成容量計算的儲位之容量資訊
    ///
    /// 多儲位物料只保留最後計算者；逐列資訊見 [`StockRow::capacity`]。
    pub capacity_info: Option<CapacityInfo>,
}

impl MaterialGroup {
    pub fn alert_count(&self) -> usize {
        self.rows.iter().map(|r| r.alerts.len()).sum()
    }
}

/// 庫存分析結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 物料分組（依帳本中首次出現順序）
    pub material_groups: Vec<MaterialGroup>,

    /// 物料數
    pub total_materials: usize,

    /// 警示總數
    pub total_alerts: usize,

    /// 出現過的儲位類型數
    pub storage_locations: usize,
}

impl AnalysisResult {
    /// 只保留有警示的列；沒有警示列的物料分組整組移除，統計數字保持不變
    pub fn alerts_only(&self) -> Self {
        let material_groups = self
            .material_groups
            .iter()
            .filter_map(|group| {
                let rows: Vec<StockRow> = group
                    .rows
                    .iter()
                    .filter(|row| row.has_alerts())
                    .cloned()
                    .collect();
                if rows.is_empty() {
                    None
                } else {
                    Some(MaterialGroup {
                        rows,
                        ..group.clone()
                    })
                }
            })
            .collect();

        Self {
            material_groups,
            ..self.clone()
        }
    }

    /// 依物料代碼查詢分組
    pub fn group(&self, material: &str) -> Option<&MaterialGroup> {
        self.material_groups.iter().find(|g| g.material == material)
    }

    pub fn has_alerts(&self) -> bool {
        self.total_alerts > 0
    }
}
