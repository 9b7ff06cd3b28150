//! LX02 報表解析
//!
//! 欄位配置（Tab 分隔）：
//! 物料 | 物料描述 | 可用庫存 | 單位 | 儲位類型 | ... | 總庫存（最後一欄）

use serde::Serialize;
use stock_core::StockLedger;

const COL_MATERIAL: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_AVAILABLE: usize = 2;
const COL_STORAGE_TYPE: usize = 4;

/// 解析診斷統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// 非空白行數（含表頭）
    pub lines_seen: usize,

    /// 第一行是否被當作表頭略過
    pub header_skipped: bool,

    /// 缺少物料代碼或儲位類型而略過的行數
    pub dropped_missing_code: usize,

    /// 可用庫存與總庫存皆為零而略過的行數
    pub dropped_zero_quantity: usize,

    /// 寫入帳本的行數
    pub accepted: usize,
}

impl ParseStats {
    pub fn dropped(&self) -> usize {
        self.dropped_missing_code + self.dropped_zero_quantity
    }
}

/// 解析結果（帳本 + 診斷統計）
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub ledger: StockLedger,
    pub stats: ParseStats,
}

/// 單行分類結果
#[derive(Debug, PartialEq, Eq)]
enum LineOutcome<'a> {
    Header,
    MissingCode,
    ZeroQuantity,
    Accepted(ReportLine<'a>),
}

/// 一筆有效的報表行
#[derive(Debug, PartialEq, Eq)]
struct ReportLine<'a> {
    material: &'a str,
    description: &'a str,
    available: u64,
    storage_type: &'a str,
    total_reported: u64,
}

/// 報表解析器
pub struct ReportParser;

impl ReportParser {
    /// 解析報表文字為庫存帳本
    pub fn parse(text: &str) -> StockLedger {
        Self::parse_with_stats(text).ledger
    }

    /// 解析報表文字，並回傳略過行數等診斷資訊
    ///
    /// 格式錯誤的行一律略過，不會回傳錯誤；空白或只有表頭的輸入得到空帳本。
    pub fn parse_with_stats(text: &str) -> ParseOutcome {
        let outcome = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .fold(ParseOutcome::default(), |mut acc, (idx, line)| {
                acc.stats.lines_seen += 1;
                match Self::classify(line, idx == 0) {
                    LineOutcome::Header => acc.stats.header_skipped = true,
                    LineOutcome::MissingCode => {
                        tracing::debug!("第 {} 行缺少物料代碼或儲位類型，略過", idx + 1);
                        acc.stats.dropped_missing_code += 1;
                    }
                    LineOutcome::ZeroQuantity => {
                        tracing::debug!("第 {} 行庫存為零，略過", idx + 1);
                        acc.stats.dropped_zero_quantity += 1;
                    }
                    LineOutcome::Accepted(row) => {
                        acc.ledger.record_description(row.material, row.description);
                        acc.ledger
                            .add_stock(row.material, row.storage_type, row.available);
                        acc.ledger
                            .record_total_reported(row.material, row.total_reported);
                        acc.stats.accepted += 1;
                    }
                }
                acc
            });

        tracing::debug!(
            "報表解析完成：物料 {} 筆，儲位類型 {} 種，略過 {} 行",
            outcome.ledger.material_count(),
            outcome.ledger.storage_locations().len(),
            outcome.stats.dropped()
        );

        outcome
    }

    /// 分類單行；表頭判斷只套用於第一個非空白行
    fn classify(line: &str, first_line: bool) -> LineOutcome<'_> {
        let cols: Vec<&str> = line.split('\t').collect();

        if first_line && is_header(cols[COL_MATERIAL]) {
            return LineOutcome::Header;
        }

        let column = |idx: usize| cols.get(idx).copied().map(str::trim).unwrap_or("");

        let material = column(COL_MATERIAL);
        let storage_type = column(COL_STORAGE_TYPE);
        if material.is_empty() || storage_type.is_empty() {
            return LineOutcome::MissingCode;
        }

        let available = parse_quantity(column(COL_AVAILABLE));
        let total_reported = parse_quantity(column(cols.len() - 1));
        if available == 0 && total_reported == 0 {
            return LineOutcome::ZeroQuantity;
        }

        LineOutcome::Accepted(ReportLine {
            material,
            description: column(COL_DESCRIPTION),
            available,
            storage_type,
            total_reported,
        })
    }
}

fn is_header(first_column: &str) -> bool {
    let lower = first_column.to_lowercase();
    lower.contains("material") || lower.contains("artikel")
}

/// 解析數量：取開頭的整數部分（"12 ST" → 12，"1.200" → 1），
/// 非數字或負數視為 0
pub fn parse_quantity(raw: &str) -> u64 {
    let raw = raw.trim();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        });

    if negative {
        0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("120", 120)]
    #[case(" 30 ", 30)]
    #[case("12 ST", 12)]
    #[case("1.200", 1)]
    #[case("+7", 7)]
    #[case("-5", 0)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("MKT", 0)]
    fn test_parse_quantity(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(parse_quantity(raw), expected);
    }

    #[test]
    fn test_classify_short_line_uses_last_column_as_total() {
        // 只有五欄時最後一欄就是儲位類型，總庫存解析為 0
        let outcome = ReportParser::classify("4711\tServietten\t0\tST\tMKT", false);
        assert_eq!(outcome, LineOutcome::ZeroQuantity);

        let outcome = ReportParser::classify("4711\tServietten\t5\tST\tMKT", false);
        assert_eq!(
            outcome,
            LineOutcome::Accepted(ReportLine {
                material: "4711",
                description: "Servietten",
                available: 5,
                storage_type: "MKT",
                total_reported: 0,
            })
        );
    }

    #[test]
    fn test_classify_missing_columns() {
        assert_eq!(ReportParser::classify("4711", false), LineOutcome::MissingCode);
        assert_eq!(
            ReportParser::classify("\tServietten\t5\tST\tMKT\t5", false),
            LineOutcome::MissingCode
        );
    }

    #[test]
    fn test_parse_with_stats() {
        let text = "Material\tText\tBestand\tME\tLagertyp\tGesamt\n\
                    4711\tServietten\t10\tST\tMKT\t10\n\
                    \n\
                    \tSumme\t10\t\t\t10\n\
                    0815\tBecher\t0\tST\tLAG\t0\n\
                    0815\tBecher\t4\tST\tLAG\t4\n";

        let outcome = ReportParser::parse_with_stats(text);
        assert_eq!(
            outcome.stats,
            ParseStats {
                lines_seen: 5,
                header_skipped: true,
                dropped_missing_code: 1,
                dropped_zero_quantity: 1,
                accepted: 2,
            }
        );
        assert_eq!(outcome.ledger.material_count(), 2);
        assert_eq!(outcome.stats.dropped(), 2);
    }

    #[test]
    fn test_first_line_with_empty_material_keeps_columns() {
        // 第一欄為空時不可讓其餘欄位左移
        let text = "\tText\t5\tST\tMKT\t5\n4711\tServietten\t3\tST\tMKT\t3";

        let outcome = ReportParser::parse_with_stats(text);
        assert_eq!(outcome.stats.dropped_missing_code, 1);
        assert!(!outcome.stats.header_skipped);
        assert_eq!(outcome.ledger.material_count(), 1);
        assert!(outcome.ledger.material("Text").is_none());
        assert_eq!(outcome.ledger.storage_locations(), &["MKT".to_string()]);
        assert_eq!(outcome.ledger.quantity("4711", "MKT"), Some(3));
    }

    #[test]
    fn test_header_after_leading_blank_lines() {
        let text = "\n\n  \nArtikel\tText\tBestand\tME\tLagertyp\tGesamt\n\
                    4711\tServietten\t3\tST\tMKT\t3";

        let outcome = ReportParser::parse_with_stats(text);
        assert!(outcome.stats.header_skipped);
        assert_eq!(outcome.stats.lines_seen, 2);
        assert_eq!(outcome.stats.accepted, 1);
        assert!(outcome.ledger.material("Artikel").is_none());
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let text = "4711\tX\t18446744073709551615\tST\tMKT\t1\n\
                    4711\tX\t18446744073709551615\tST\tMKT\t1\n\
                    4711\tX\t5\tST\tMKT\t1";

        let ledger = ReportParser::parse(text);
        assert_eq!(ledger.quantity("4711", "MKT"), Some(u64::MAX));
        assert_eq!(ledger.material("4711").unwrap().total_quantity(), u64::MAX);
    }

    #[test]
    fn test_header_sniff_is_case_insensitive() {
        let ledger = ReportParser::parse("ARTIKELNUMMER\tText\t1\tST\tMKT\t1\n4711\tX\t1\tST\tMKT\t1");
        assert_eq!(ledger.material_count(), 1);
        assert!(ledger.material("ARTIKELNUMMER").is_none());
    }

    #[test]
    fn test_first_data_line_is_not_header() {
        let ledger = ReportParser::parse("4711\tServietten\t3\tST\tMKT\t3");
        assert_eq!(ledger.quantity("4711", "MKT"), Some(3));
    }

    #[test]
    fn test_crlf_line_endings() {
        let ledger = ReportParser::parse("4711\tServietten\t3\tST\tMKT\t3\r\n4711\tServietten\t2\tST\tMKT\t5\r\n");
        assert_eq!(ledger.quantity("4711", "MKT"), Some(5));
        assert_eq!(ledger.total_reported("4711"), Some(5));
    }

    #[test]
    fn test_empty_input() {
        let outcome = ReportParser::parse_with_stats("  \n\n ");
        assert!(outcome.ledger.is_empty());
        assert_eq!(outcome.stats, ParseStats::default());
    }
}
