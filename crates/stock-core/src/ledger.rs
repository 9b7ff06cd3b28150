//! 庫存帳本模型（報表解析結果）

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// 單一儲位類型的庫存
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStock {
    /// 儲位類型（MKT、LAG、916 ...）
    pub storage_type: String,

    /// 累計可用庫存
    pub quantity: u64,
}

/// 單一物料在各儲位的庫存
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStock {
    /// 物料代碼
    pub material: String,

    /// 儲位庫存（依首次出現順序）
    pub locations: Vec<LocationStock>,
}

impl MaterialStock {
    fn new(material: String) -> Self {
        Self {
            material,
            locations: Vec::new(),
        }
    }

    /// 所有儲位的庫存合計
    pub fn total_quantity(&self) -> u64 {
        self.locations
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// 查詢指定儲位的庫存
    pub fn quantity_at(&self, storage_type: &str) -> Option<u64> {
        self.locations
            .iter()
            .find(|l| l.storage_type == storage_type)
            .map(|l| l.quantity)
    }

    fn add(&mut self, storage_type: &str, quantity: u64) {
        match self
            .locations
            .iter_mut()
            .find(|l| l.storage_type == storage_type)
        {
            Some(location) => {
                location.quantity = location.quantity.saturating_add(quantity);
            }
            None => self.locations.push(LocationStock {
                storage_type: storage_type.to_string(),
                quantity,
            }),
        }
    }
}

/// 庫存帳本
///
/// 物料 → 儲位 → 數量。物料與儲位都保留首次出現的順序，
/// 同一 (物料, 儲位) 的數量只會累加，不會被覆寫。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLedger {
    /// 物料庫存（依首次出現順序）
    stock_by_material: Vec<MaterialStock>,

    /// 報表中每個物料最後一個非零的總庫存
    total_reported_by_material: BTreeMap<String, u64>,

    /// 所有出現過的儲位類型（依首次出現順序）
    storage_locations: Vec<String>,

    /// 物料描述（首次出現者優先）
    material_descriptions: BTreeMap<String, String>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl StockLedger {
    /// 創建空帳本
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加物料在指定儲位的庫存，並登記儲位類型
    pub fn add_stock(&mut self, material: &str, storage_type: &str, quantity: u64) {
        let idx = match self.index.get(material) {
            Some(&idx) => idx,
            None => {
                self.stock_by_material
                    .push(MaterialStock::new(material.to_string()));
                let idx = self.stock_by_material.len() - 1;
                self.index.insert(material.to_string(), idx);
                idx
            }
        };
        self.stock_by_material[idx].add(storage_type, quantity);

        if !self.storage_locations.iter().any(|s| s == storage_type) {
            self.storage_locations.push(storage_type.to_string());
        }
    }

    /// 登記物料描述；已有描述或描述為空時不做任何事
    pub fn record_description(&mut self, material: &str, description: &str) {
        if description.is_empty() {
            return;
        }
        self.material_descriptions
            .entry(material.to_string())
            .or_insert_with(|| description.to_string());
    }

    /// 登記報表總庫存；只有正數會覆寫先前的值
    pub fn record_total_reported(&mut self, material: &str, total: u64) {
        if total > 0 {
            self.total_reported_by_material
                .insert(material.to_string(), total);
        }
    }

    /// 依首次出現順序的物料庫存
    pub fn materials(&self) -> &[MaterialStock] {
        &self.stock_by_material
    }

    /// 查詢單一物料
    pub fn material(&self, material: &str) -> Option<&MaterialStock> {
        self.index
            .get(material)
            .map(|&idx| &self.stock_by_material[idx])
    }

    /// 查詢 (物料, 儲位) 的累計庫存
    pub fn quantity(&self, material: &str, storage_type: &str) -> Option<u64> {
        self.material(material)
            .and_then(|m| m.quantity_at(storage_type))
    }

    pub fn total_reported(&self, material: &str) -> Option<u64> {
        self.total_reported_by_material.get(material).copied()
    }

    pub fn description(&self, material: &str) -> Option<&str> {
        self.material_descriptions.get(material).map(String::as_str)
    }

    pub fn storage_locations(&self) -> &[String] {
        &self.storage_locations
    }

    pub fn material_count(&self) -> usize {
        self.stock_by_material.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock_by_material.is_empty()
    }
}
