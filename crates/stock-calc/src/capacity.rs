//! 有效容量解析

use chrono::NaiveDate;
use rust_decimal::Decimal;
use stock_core::{CapacityConfig, CapacityInfo, CapacityTier, MKT};

/// 單一 (物料, 儲位) 的容量檢查結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityCheck {
    /// 儲位類型停用，不檢查
    Disabled,
    /// 物料沒有容量配置，不檢查
    Unconfigured,
    /// 已解析出有效容量
    Evaluated(CapacityInfo),
}

impl CapacityCheck {
    pub fn info(&self) -> Option<CapacityInfo> {
        match self {
            CapacityCheck::Evaluated(info) => Some(*info),
            _ => None,
        }
    }
}

/// 有效容量解析器
///
/// 促銷只適用於賣場（MKT）：賣場在促銷有效且設有促銷容量時採用促銷容量，
/// 否則採用基本容量；其他儲位採用物料專屬容量，沒有則採用儲位類型預設容量。
/// 設為 0 的促銷容量、專屬容量與預設容量一律視同未設定。
pub struct CapacityResolver<'a> {
    config: &'a CapacityConfig,
    today: NaiveDate,
}

impl<'a> CapacityResolver<'a> {
    pub fn new(config: &'a CapacityConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// 解析 (物料, 儲位) 的有效容量
    pub fn resolve(&self, material: &str, storage_type: &str) -> CapacityCheck {
        if !self.config.is_storage_type_enabled(storage_type) {
            return CapacityCheck::Disabled;
        }

        let Some(material_config) = self.config.material(material) else {
            return CapacityCheck::Unconfigured;
        };

        let is_mkt = storage_type == MKT;
        let is_promo_active = is_mkt && material_config.promotion().is_active_on(self.today);
        let promo_capacity = material_config.promo_capacity().filter(|_| is_promo_active);

        let effective_capacity = if is_mkt {
            promo_capacity.unwrap_or(material_config.capacity)
        } else {
            material_config
                .location_capacity(storage_type)
                .unwrap_or_else(|| self.config.default_capacity_for(storage_type))
        };

        let capacity_type = if promo_capacity.is_some() {
            CapacityTier::Promo
        } else {
            CapacityTier::Normal
        };

        CapacityCheck::Evaluated(CapacityInfo {
            effective_capacity,
            capacity_type,
            is_promo_active,
        })
    }
}

/// 容量使用率（百分比，四捨五入到兩位小數）；容量為零時無意義
pub fn utilization_pct(qty: u64, capacity: u64) -> Option<Decimal> {
    if capacity == 0 {
        return None;
    }
    let pct = Decimal::from(qty) * Decimal::ONE_HUNDRED / Decimal::from(capacity);
    Some(pct.round_dp(2))
}
