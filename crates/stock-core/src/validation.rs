//! 容量配置驗證（配置進入分析器前的邊界檢查）

use chrono::NaiveDate;

use crate::config::{CapacityConfig, MaterialCapacity};
use crate::promotion::accepted_end_date_range;
use crate::{Result, StockError};

/// 物料代碼最大長度
pub const MAX_MATERIAL_CODE_LEN: usize = 50;

/// 容量上限
pub const MAX_CAPACITY: u64 = 999_999;

/// 驗證物料代碼：非空、長度上限、僅允許英數字、底線與連字號
pub fn validate_material_code(code: &str) -> Result<()> {
    let trimmed = code.trim();
    let invalid = |reason: &str| StockError::InvalidMaterialCode {
        code: code.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("代碼為空"));
    }
    if trimmed.chars().count() > MAX_MATERIAL_CODE_LEN {
        return Err(invalid("代碼過長"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("包含無效字元"));
    }
    Ok(())
}

/// 驗證容量上限
pub fn validate_capacity(material: &str, value: u64) -> Result<()> {
    if value > MAX_CAPACITY {
        return Err(StockError::InvalidCapacity {
            material: material.to_string(),
            value,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

/// 驗證促銷結束日期是否在可接受範圍內
pub fn validate_promo_end_date(material: &str, date: NaiveDate, today: NaiveDate) -> Result<()> {
    let (min, max) = accepted_end_date_range(today);
    if date < min || date > max {
        return Err(StockError::PromoEndDateOutOfRange {
            material: material.to_string(),
            date,
        });
    }
    Ok(())
}

/// 驗證單一物料配置
pub fn validate_material(material: &MaterialCapacity, today: NaiveDate) -> Result<()> {
    validate_material_code(&material.code)?;
    validate_capacity(&material.code, material.capacity)?;

    if let Some(promo) = material.promo_capacity {
        validate_capacity(&material.code, promo)?;
    }
    for &capacity in material.capacities.values() {
        validate_capacity(&material.code, capacity)?;
    }
    if let Some(end) = material.promo_end_date {
        validate_promo_end_date(&material.code, end, today)?;
    }
    Ok(())
}

/// 驗證整份配置
pub fn validate_config(config: &CapacityConfig, today: NaiveDate) -> Result<()> {
    for material in config.materials.values() {
        validate_material(material, today)?;
    }
    for (storage_type, &capacity) in &config.storage_types.default_capacities {
        validate_capacity(storage_type, capacity)?;
    }
    Ok(())
}
