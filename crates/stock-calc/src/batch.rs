//! 多份報表批次分析與彙總

use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use stock_core::{AnalysisResult, MaterialGroup};

use crate::analyzer::StockAnalyzer;
use crate::capacity::utilization_pct;
use crate::parser::{ParseStats, ReportParser};

/// 具名報表（通常是檔名 + 解碼後的文字）
#[derive(Debug, Clone, Copy)]
pub struct NamedReport<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

impl<'a> NamedReport<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }
}

/// 單份報表的分析結果
#[derive(Debug, Clone)]
pub struct ReportAnalysis {
    pub name: String,
    pub stats: ParseStats,
    pub analysis: AnalysisResult,
}

/// 彙總後的物料分組
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMaterialGroup {
    #[serde(flatten)]
    pub group: MaterialGroup,

    /// 出現此物料的報表名稱（依輸入順序，不重複）
    pub sources: Vec<String>,
}

/// 批次彙總結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysis {
    pub material_groups: Vec<BatchMaterialGroup>,
    pub total_materials: usize,
    pub total_alerts: usize,
    pub storage_locations: usize,

    /// 已處理的報表數
    pub file_count: usize,
}

impl StockAnalyzer {
    /// 並行解析並分析多份報表，結果依輸入順序排列
    pub fn analyze_reports(&self, reports: &[NamedReport<'_>]) -> Vec<ReportAnalysis> {
        reports
            .par_iter()
            .map(|report| {
                let outcome = ReportParser::parse_with_stats(report.text);
                ReportAnalysis {
                    name: report.name.to_string(),
                    stats: outcome.stats,
                    analysis: self.analyze(&outcome.ledger),
                }
            })
            .collect()
    }

    /// 分析多份報表並彙總
    pub fn analyze_batch(&self, reports: &[NamedReport<'_>]) -> BatchAnalysis {
        aggregate(&self.analyze_reports(reports))
    }
}

/// 彙總多份報表的分析結果
///
/// 同一物料的列依儲位類型合併：數量相加、警示串接；新的儲位類型附加在後。
pub fn aggregate(reports: &[ReportAnalysis]) -> BatchAnalysis {
    let mut groups: Vec<BatchMaterialGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total_alerts = 0;

    for report in reports {
        total_alerts += report.analysis.total_alerts;

        for group in &report.analysis.material_groups {
            let idx = *index.entry(group.material.clone()).or_insert_with(|| {
                groups.push(BatchMaterialGroup {
                    group: MaterialGroup {
                        rows: Vec::new(),
                        ..group.clone()
                    },
                    sources: Vec::new(),
                });
                groups.len() - 1
            });
            let merged = &mut groups[idx];

            if !merged.sources.iter().any(|s| s == &report.name) {
                merged.sources.push(report.name.clone());
            }

            for row in &group.rows {
                match merged
                    .group
                    .rows
                    .iter_mut()
                    .find(|r| r.storage_type == row.storage_type)
                {
                    Some(existing) => {
                        existing.qty = existing.qty.saturating_add(row.qty);
                        existing.alerts.extend(row.alerts.iter().cloned());
                    }
                    None => merged.group.rows.push(row.clone()),
                }
            }
        }
    }

    let mut storage_types = BTreeSet::new();
    for merged in &mut groups {
        recompute_totals(&mut merged.group);
        storage_types.extend(merged.group.rows.iter().map(|r| r.storage_type.clone()));
    }

    tracing::info!(
        "批次彙總完成：報表 {} 份，物料 {} 筆，警示 {} 筆",
        reports.len(),
        groups.len(),
        total_alerts
    );

    BatchAnalysis {
        total_materials: groups.len(),
        material_groups: groups,
        total_alerts,
        storage_locations: storage_types.len(),
        file_count: reports.len(),
    }
}

/// 合併後重新計算累計庫存、使用率與總量
fn recompute_totals(group: &mut MaterialGroup) {
    let mut running: u64 = 0;
    for row in &mut group.rows {
        running = running.saturating_add(row.qty);
        row.running_total = running;
        row.utilization_pct = row
            .capacity
            .and_then(|info| utilization_pct(row.qty, info.effective_capacity));
    }
    group.total_stock = running;
    group.has_multiple_storage_types = group.rows.len() > 1;
}
