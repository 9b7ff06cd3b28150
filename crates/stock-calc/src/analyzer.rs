//! 庫存分析器

use chrono::NaiveDate;
use stock_core::{
    AnalysisResult, CapacityConfig, MaterialGroup, MaterialStock, StockAlert, StockLedger,
    StockRow,
};

use crate::capacity::{utilization_pct, CapacityResolver};

/// 庫存分析器
pub struct StockAnalyzer {
    /// 容量配置（分析期間唯讀）
    config: CapacityConfig,

    /// 促銷判斷用的基準日期
    today: NaiveDate,
}

impl StockAnalyzer {
    /// 創建新的分析器（基準日期為今天，不驗證配置）
    pub fn new(config: CapacityConfig) -> Self {
        Self {
            config,
            today: stock_core::promotion::today(),
        }
    }

    /// 驗證配置後創建分析器
    pub fn try_new(config: CapacityConfig) -> stock_core::Result<Self> {
        let analyzer = Self::new(config);
        analyzer.config.validate(analyzer.today)?;
        Ok(analyzer)
    }

    /// 建構器模式：固定基準日期
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// 分析帳本
    ///
    /// 物料與儲位都依帳本順序輸出。沒有容量配置的物料照常輸出，但不產生警示。
    pub fn analyze(&self, ledger: &StockLedger) -> AnalysisResult {
        tracing::info!(
            "開始庫存分析：物料 {} 筆，儲位類型 {} 種，基準日期 {}",
            ledger.material_count(),
            ledger.storage_locations().len(),
            self.today
        );
        let start_time = std::time::Instant::now();

        let resolver = CapacityResolver::new(&self.config, self.today);
        let material_groups: Vec<MaterialGroup> = ledger
            .materials()
            .iter()
            .map(|stock| {
                let name = ledger.description(&stock.material).unwrap_or_default();
                Self::analyze_material(&resolver, stock, name)
            })
            .collect();

        let total_alerts = material_groups.iter().map(MaterialGroup::alert_count).sum();

        let result = AnalysisResult {
            total_materials: material_groups.len(),
            material_groups,
            total_alerts,
            storage_locations: ledger.storage_locations().len(),
        };

        tracing::info!(
            "庫存分析完成，耗時 {:?}，警示 {} 筆",
            start_time.elapsed(),
            result.total_alerts
        );

        result
    }

    /// 單物料分析
    fn analyze_material(
        resolver: &CapacityResolver<'_>,
        stock: &MaterialStock,
        material_name: &str,
    ) -> MaterialGroup {
        let mut total_stock: u64 = 0;
        let mut capacity_info = None;
        let mut rows = Vec::with_capacity(stock.locations.len());

        for location in &stock.locations {
            let qty = location.quantity;
            total_stock = total_stock.saturating_add(qty);

            let check = resolver.resolve(&stock.material, &location.storage_type);
            let info = check.info();
            let mut alerts = Vec::new();

            if let Some(info) = info {
                if qty > info.effective_capacity {
                    tracing::debug!(
                        "物料 {} 儲位 {} 超出容量：{} > {}",
                        stock.material,
                        location.storage_type,
                        qty,
                        info.effective_capacity
                    );
                    alerts.push(StockAlert::over_capacity(
                        qty,
                        info.effective_capacity,
                        info.capacity_type,
                    ));
                }
                // 物料層級只保留最後一個完成計算的儲位
                capacity_info = Some(info);
            } else {
                tracing::debug!(
                    "物料 {} 儲位 {} 不檢查容量：{:?}",
                    stock.material,
                    location.storage_type,
                    check
                );
            }

            rows.push(StockRow {
                material: stock.material.clone(),
                material_name: material_name.to_string(),
                storage_type: location.storage_type.clone(),
                qty,
                running_total: total_stock,
                alerts,
                capacity: info,
                utilization_pct: info.and_then(|i| utilization_pct(qty, i.effective_capacity)),
            });
        }

        MaterialGroup {
            material: stock.material.clone(),
            material_name: material_name.to_string(),
            total_stock,
            has_multiple_storage_types: rows.len() > 1,
            rows,
            capacity_info,
        }
    }

    /// 獲取容量配置引用
    pub fn config(&self) -> &CapacityConfig {
        &self.config
    }

    /// 獲取基準日期
    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }
}
