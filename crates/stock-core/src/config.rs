//! 容量配置模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::promotion::PromotionWindow;

/// 賣場儲位類型：唯一適用促銷容量的儲位
pub const MKT: &str = "MKT";

/// 未設定預設容量的儲位類型所使用的容量
pub const FALLBACK_DEFAULT_CAPACITY: u64 = 100;

/// 物料容量配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCapacity {
    /// 物料代碼
    #[serde(default)]
    pub code: String,

    /// 物料名稱
    #[serde(default)]
    pub name: String,

    /// 賣場（MKT）基本容量
    pub capacity: u64,

    /// 促銷期間的賣場容量
    #[serde(default)]
    pub promo_capacity: Option<u64>,

    /// 促銷旗標
    #[serde(default)]
    pub promo_active: bool,

    /// 促銷結束日期
    #[serde(default)]
    pub promo_end_date: Option<NaiveDate>,

    /// 非賣場儲位的物料專屬容量
    #[serde(default)]
    pub capacities: HashMap<String, u64>,
}

impl MaterialCapacity {
    /// 創建新的物料容量配置
    pub fn new(code: impl Into<String>, capacity: u64) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            capacity,
            promo_capacity: None,
            promo_active: false,
            promo_end_date: None,
            capacities: HashMap::new(),
        }
    }

    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置促銷（容量與可選的結束日期）
    pub fn with_promotion(mut self, promo_capacity: u64, end_date: Option<NaiveDate>) -> Self {
        self.promo_capacity = Some(promo_capacity);
        self.promo_active = true;
        self.promo_end_date = end_date;
        self
    }

    /// 建構器模式：設置儲位專屬容量
    pub fn with_location_capacity(
        mut self,
        storage_type: impl Into<String>,
        capacity: u64,
    ) -> Self {
        self.capacities.insert(storage_type.into(), capacity);
        self
    }

    /// 促銷期間
    pub fn promotion(&self) -> PromotionWindow {
        PromotionWindow::new(self.promo_active, self.promo_end_date)
    }

    /// 查詢儲位專屬容量；設為 0 視同未設定
    pub fn location_capacity(&self, storage_type: &str) -> Option<u64> {
        self.capacities
            .get(storage_type)
            .copied()
            .filter(|&capacity| capacity > 0)
    }

    /// 設定的促銷容量；設為 0 視同未設定
    pub fn promo_capacity(&self) -> Option<u64> {
        self.promo_capacity.filter(|&capacity| capacity > 0)
    }
}

/// 自訂儲位類型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStorageType {
    #[serde(rename = "type")]
    pub storage_type: String,
    pub capacity: u64,
    pub enabled: bool,
}

/// 儲位類型設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageTypeSettings {
    /// 是否檢查容量
    #[serde(default)]
    pub enabled_types: BTreeMap<String, bool>,

    /// 儲位類型預設容量
    #[serde(default)]
    pub default_capacities: BTreeMap<String, u64>,

    /// 使用者自訂儲位類型
    #[serde(default)]
    pub custom_types: Vec<CustomStorageType>,
}

impl Default for StorageTypeSettings {
    /// 預設只檢查賣場（MKT）
    fn default() -> Self {
        let enabled_types = [(MKT, true), ("LAG", false), ("QS", false), ("SPE", false)]
            .into_iter()
            .map(|(t, e)| (t.to_string(), e))
            .collect();
        let default_capacities = [(MKT, 100), ("LAG", 200), ("QS", 50), ("SPE", 25)]
            .into_iter()
            .map(|(t, c)| (t.to_string(), c))
            .collect();

        Self {
            enabled_types,
            default_capacities,
            custom_types: Vec::new(),
        }
    }
}

impl StorageTypeSettings {
    /// 沒有任何儲位類型的空設定（全部停用）
    pub fn empty() -> Self {
        Self {
            enabled_types: BTreeMap::new(),
            default_capacities: BTreeMap::new(),
            custom_types: Vec::new(),
        }
    }

    /// 建構器模式：設置儲位類型
    pub fn with_type(
        mut self,
        storage_type: impl Into<String>,
        enabled: bool,
        default_capacity: u64,
    ) -> Self {
        let storage_type = storage_type.into();
        self.enabled_types.insert(storage_type.clone(), enabled);
        self.default_capacities.insert(storage_type, default_capacity);
        self
    }

    /// 檢查儲位類型是否啟用容量檢查（未知類型視為停用）
    pub fn is_enabled(&self, storage_type: &str) -> bool {
        self.enabled_types.get(storage_type).copied().unwrap_or(false)
    }

    /// 儲位類型的預設容量（未設定或為 0 時採用 100）
    pub fn default_capacity_for(&self, storage_type: &str) -> u64 {
        self.default_capacities
            .get(storage_type)
            .copied()
            .filter(|&capacity| capacity > 0)
            .unwrap_or(FALLBACK_DEFAULT_CAPACITY)
    }

    /// 所有啟用的儲位類型
    pub fn enabled_types(&self) -> Vec<&str> {
        self.enabled_types
            .iter()
            .filter(|&(_, &enabled)| enabled)
            .map(|(t, _)| t.as_str())
            .collect()
    }

    pub fn set_enabled(&mut self, storage_type: &str, enabled: bool) {
        self.enabled_types.insert(storage_type.to_string(), enabled);
    }

    /// 新增自訂儲位類型（啟用並登記預設容量）
    ///
    /// 已存在的自訂類型不會被覆寫，返回 false。
    pub fn add_custom_type(&mut self, storage_type: &str, capacity: u64) -> bool {
        if self
            .custom_types
            .iter()
            .any(|ct| ct.storage_type == storage_type)
        {
            return false;
        }

        self.custom_types.push(CustomStorageType {
            storage_type: storage_type.to_string(),
            capacity,
            enabled: true,
        });
        self.enabled_types.insert(storage_type.to_string(), true);
        self.default_capacities
            .insert(storage_type.to_string(), capacity);
        true
    }

    /// 移除自訂儲位類型及其設定
    pub fn remove_custom_type(&mut self, storage_type: &str) {
        self.custom_types.retain(|ct| ct.storage_type != storage_type);
        self.enabled_types.remove(storage_type);
        self.default_capacities.remove(storage_type);
    }
}

/// 容量配置快照（分析期間唯讀）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityConfig {
    /// 物料代碼 → 容量配置
    #[serde(default)]
    pub materials: HashMap<String, MaterialCapacity>,

    /// 儲位類型設定
    #[serde(default)]
    pub storage_types: StorageTypeSettings,
}

impl CapacityConfig {
    /// 創建使用預設儲位設定的空配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入物料
    pub fn with_material(mut self, material: MaterialCapacity) -> Self {
        self.insert_material(material);
        self
    }

    /// 建構器模式：設置儲位類型設定
    pub fn with_storage_types(mut self, storage_types: StorageTypeSettings) -> Self {
        self.storage_types = storage_types;
        self
    }

    pub fn insert_material(&mut self, material: MaterialCapacity) {
        self.materials.insert(material.code.clone(), material);
    }

    pub fn material(&self, code: &str) -> Option<&MaterialCapacity> {
        self.materials.get(code)
    }

    pub fn is_storage_type_enabled(&self, storage_type: &str) -> bool {
        self.storage_types.is_enabled(storage_type)
    }

    pub fn default_capacity_for(&self, storage_type: &str) -> u64 {
        self.storage_types.default_capacity_for(storage_type)
    }

    /// 從 JSON 載入配置
    ///
    /// 物料清單以代碼為鍵；物料本身未帶代碼時以鍵補上。
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut config: CapacityConfig = serde_json::from_str(json)?;
        for (code, material) in config.materials.iter_mut() {
            if material.code.is_empty() {
                material.code = code.clone();
            }
        }
        Ok(config)
    }

    /// 驗證配置（物料代碼、容量上限、促銷日期範圍）
    pub fn validate(&self, today: NaiveDate) -> crate::Result<()> {
        crate::validation::validate_config(self, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_storage_types() {
        let settings = StorageTypeSettings::default();

        assert!(settings.is_enabled("MKT"));
        assert!(!settings.is_enabled("LAG"));
        assert!(!settings.is_enabled("916"));
        assert_eq!(settings.default_capacity_for("LAG"), 200);
        assert_eq!(settings.default_capacity_for("SPE"), 25);
        assert_eq!(settings.default_capacity_for("916"), FALLBACK_DEFAULT_CAPACITY);
        assert_eq!(settings.enabled_types(), vec!["MKT"]);
    }

    #[test]
    fn test_custom_storage_type() {
        let mut settings = StorageTypeSettings::default();

        assert!(settings.add_custom_type("916", 40));
        assert!(!settings.add_custom_type("916", 80));
        assert!(settings.is_enabled("916"));
        assert_eq!(settings.default_capacity_for("916"), 40);

        settings.remove_custom_type("916");
        assert!(!settings.is_enabled("916"));
        assert!(settings.custom_types.is_empty());
    }

    #[test]
    fn test_material_builder() {
        let end = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
        let material = MaterialCapacity::new("4711", 100)
            .with_name("Servietten")
            .with_promotion(250, Some(end))
            .with_location_capacity("LAG", 50);

        assert_eq!(material.promo_capacity, Some(250));
        assert!(material.promotion().is_active_on(end));
        assert_eq!(material.location_capacity("LAG"), Some(50));
        assert_eq!(material.location_capacity("QS"), None);
    }

    #[test]
    fn test_from_json_fills_codes() {
        let json = r#"{
            "materials": {
                "4711": { "capacity": 100, "promoActive": true, "promoCapacity": 300, "promoEndDate": "2025-12-24" },
                "0815": { "code": "0815", "capacity": 20, "capacities": { "LAG": 60 } }
            },
            "storageTypes": {
                "enabledTypes": { "MKT": true, "LAG": true },
                "defaultCapacities": { "MKT": 100, "LAG": 200 }
            }
        }"#;

        let config = CapacityConfig::from_json(json).unwrap();
        let napkins = config.material("4711").unwrap();
        assert_eq!(napkins.code, "4711");
        assert_eq!(napkins.promo_capacity, Some(300));
        assert_eq!(
            napkins.promo_end_date,
            NaiveDate::from_ymd_opt(2025, 12, 24)
        );
        assert_eq!(config.material("0815").unwrap().location_capacity("LAG"), Some(60));
        assert!(config.is_storage_type_enabled("LAG"));
        assert!(!config.is_storage_type_enabled("QS"));
    }

    #[test]
    fn test_zero_capacities_count_as_unset() {
        let material = MaterialCapacity::new("4711", 100)
            .with_promotion(0, None)
            .with_location_capacity("LAG", 0);
        assert_eq!(material.promo_capacity(), None);
        assert_eq!(material.location_capacity("LAG"), None);

        let settings = StorageTypeSettings::empty().with_type("LAG", true, 0);
        assert_eq!(settings.default_capacity_for("LAG"), FALLBACK_DEFAULT_CAPACITY);
    }

    #[test]
    fn test_from_json_partial_storage_types() {
        let json = r#"{ "storageTypes": { "enabledTypes": { "LAG": true } } }"#;

        let config = CapacityConfig::from_json(json).unwrap();
        assert!(config.is_storage_type_enabled("LAG"));
        assert!(!config.is_storage_type_enabled("MKT"));
        assert!(config.storage_types.default_capacities.is_empty());
        assert_eq!(config.default_capacity_for("LAG"), FALLBACK_DEFAULT_CAPACITY);

        let json = r#"{ "storageTypes": { "defaultCapacities": { "LAG": 75 } } }"#;
        let config = CapacityConfig::from_json(json).unwrap();
        assert!(config.storage_types.enabled_types.is_empty());
        assert_eq!(config.default_capacity_for("LAG"), 75);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(CapacityConfig::from_json("{ not json").is_err());
    }
}
