//! Row-oriented report: one-to-many flattening of invoices into fixed
//! 27-column rows and the tabular sink that persists them.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ReportError;
use crate::model::InvoiceInfo;

/// Fixed column set, in output order.
pub const HEADERS: [&str; 27] = [
    "序号",
    "发票代码",
    "发票号码",
    "数电发票号码",
    "销方识别号",
    "销方名称",
    "购方识别号",
    "购买方名称",
    "开票日期",
    "税收分类编码",
    "特定业务类型",
    "货物或应税劳务名称",
    "规格型号",
    "单位",
    "数量",
    "单价",
    "金额",
    "税率",
    "税额",
    "价税合计",
    "发票来源",
    "发票票种",
    "发票状态",
    "是否正数发票",
    "发票风险等级",
    "开票人",
    "备注",
];

pub const COL_SERIAL: usize = 0;
pub const COL_INVOICE_CODE: usize = 1;
pub const COL_INVOICE_NUMBER: usize = 2;
pub const COL_DIGITAL_INVOICE_NUMBER: usize = 3;
pub const COL_SELLER_TAX_ID: usize = 4;
pub const COL_SELLER_NAME: usize = 5;
pub const COL_BUYER_TAX_ID: usize = 6;
pub const COL_BUYER_NAME: usize = 7;
pub const COL_INVOICE_DATE: usize = 8;
pub const COL_ITEM_NAME: usize = 11;
pub const COL_SPECIFICATION: usize = 12;
pub const COL_UNIT: usize = 13;
pub const COL_QUANTITY: usize = 14;
pub const COL_UNIT_PRICE: usize = 15;
pub const COL_AMOUNT: usize = 16;
pub const COL_TAX_RATE: usize = 17;
pub const COL_TAX_AMOUNT: usize = 18;
pub const COL_TOTAL_WITH_TAX: usize = 19;
pub const COL_POSITIVE_FLAG: usize = 23;
pub const COL_REMARKS: usize = 26;

/// One emitted row. `is_error` flags per-file failure rows so that
/// styling-capable sinks can distinguish them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub cells: Vec<String>,
    pub is_error: bool,
}

impl ReportRow {
    fn blank(serial: u64) -> Self {
        let mut cells = vec![String::new(); HEADERS.len()];
        cells[COL_SERIAL] = serial.to_string();
        Self {
            cells,
            is_error: false,
        }
    }
}

/// Sink consuming normalized rows. The header set is fixed; sinks emit it on
/// creation.
pub trait RowSink {
    fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError>;
    fn finish(&mut self) -> Result<(), ReportError>;
}

/// Flattens one invoice into output rows, one per line item, duplicating
/// every header field across the invoice's rows. An invoice with no
/// recognized line items still contributes exactly one row with the item
/// columns left empty. `serial` advances once per emitted row.
pub fn invoice_rows(serial: &mut u64, info: &InvoiceInfo) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(info.items.len().max(1));

    if info.items.is_empty() {
        let mut row = ReportRow::blank(*serial);
        *serial += 1;
        fill_header_cells(&mut row, info);
        rows.push(row);
        return rows;
    }

    for item in &info.items {
        let mut row = ReportRow::blank(*serial);
        *serial += 1;
        fill_header_cells(&mut row, info);
        row.cells[COL_ITEM_NAME] = item.name.clone();
        row.cells[COL_SPECIFICATION] = item.specification.clone();
        row.cells[COL_UNIT] = item.unit.clone();
        row.cells[COL_QUANTITY] = item.quantity.to_string();
        row.cells[COL_UNIT_PRICE] = item.unit_price.to_string();
        row.cells[COL_AMOUNT] = item.amount.to_string();
        row.cells[COL_TAX_RATE] = item.tax_rate.clone();
        row.cells[COL_TAX_AMOUNT] = item.tax_amount.to_string();
        // Whatever the source provided; never recomputed here.
        row.cells[COL_TOTAL_WITH_TAX] = item.total_with_tax.to_string();
        rows.push(row);
    }

    rows
}

/// Produces the single row emitted for a file whose interpretation failed:
/// serial number plus a readable description in the remarks column, all
/// structured columns empty.
pub fn failure_row(serial: &mut u64, file_name: &str, error: &str) -> ReportRow {
    let mut row = ReportRow::blank(*serial);
    *serial += 1;
    row.cells[COL_REMARKS] = format!("解析失败 (文件: {}): {}", file_name, error);
    row.is_error = true;
    row
}

fn fill_header_cells(row: &mut ReportRow, info: &InvoiceInfo) {
    // 发票代码 and 发票号码 stay empty: neither is extractable from the PDF;
    // the digital invoice number carries the identity.
    row.cells[COL_DIGITAL_INVOICE_NUMBER] = info.invoice_number.clone();
    row.cells[COL_SELLER_TAX_ID] = info.seller_tax_id.clone();
    row.cells[COL_SELLER_NAME] = info.seller_name.clone();
    row.cells[COL_BUYER_TAX_ID] = info.buyer_tax_id.clone();
    row.cells[COL_BUYER_NAME] = info.buyer_name.clone();
    row.cells[COL_INVOICE_DATE] = info.invoice_date.clone();
    row.cells[9] = info.tax_classification_code.clone();
    row.cells[10] = info.special_business_type.clone();
    row.cells[20] = info.invoice_source.clone();
    row.cells[21] = info.invoice_type.clone();
    row.cells[22] = info.invoice_status.clone();
    row.cells[COL_POSITIVE_FLAG] = if info.is_positive_invoice {
        "是".to_string()
    } else {
        "否".to_string()
    };
    row.cells[24] = info.invoice_risk_level.clone();
    row.cells[25] = info.issuer.clone();
    row.cells[COL_REMARKS] = info.remarks.clone();
}

/// Artifact file name carrying the generation timestamp, so repeated runs in
/// the same directory never overwrite each other.
pub fn artifact_name(generated_at: DateTime<Local>) -> String {
    format!("发票数据汇总_{}.csv", generated_at.format("%Y%m%d_%H%M%S"))
}

/// CSV-backed sink. The header record is written on creation.
pub struct CsvReport {
    writer: csv::Writer<std::fs::File>,
    path: PathBuf,
}

impl CsvReport {
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Create {
            path: path.to_path_buf(),
            source: e,
        })?;
        writer.write_record(HEADERS)?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSink for CsvReport {
    fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.writer.write_record(&row.cells)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InvoiceItem;
    use serde_json::Number;
    use tempfile::TempDir;

    fn two_item_invoice() -> InvoiceInfo {
        let mut info = InvoiceInfo {
            invoice_number: "24322000000479248343".to_string(),
            seller_name: "苏州诚利恩服装科技有限公司".to_string(),
            buyer_name: "至信搏远（安徽）新材料科技有限公司".to_string(),
            ..Default::default()
        };
        info.items.push(InvoiceItem {
            name: "*服装*净化服".to_string(),
            quantity: Number::from(24),
            amount: Number::from_f64(1168.14).unwrap(),
            tax_amount: Number::from_f64(151.86).unwrap(),
            total_with_tax: Number::from_f64(1320.0).unwrap(),
            ..Default::default()
        });
        info.items.push(InvoiceItem {
            name: "*鞋*防砸鞋".to_string(),
            quantity: Number::from(18),
            amount: Number::from_f64(1162.83).unwrap(),
            tax_amount: Number::from_f64(151.17).unwrap(),
            total_with_tax: Number::from_f64(1314.0).unwrap(),
            ..Default::default()
        });
        info
    }

    #[test]
    fn test_header_column_count_is_fixed() {
        assert_eq!(HEADERS.len(), 27);
        assert_eq!(HEADERS[COL_SERIAL], "序号");
        assert_eq!(HEADERS[COL_TOTAL_WITH_TAX], "价税合计");
        assert_eq!(HEADERS[COL_REMARKS], "备注");
    }

    #[test]
    fn test_two_item_invoice_flattens_to_two_rows() {
        let mut serial = 1;
        let rows = invoice_rows(&mut serial, &two_item_invoice());

        assert_eq!(rows.len(), 2);
        assert_eq!(serial, 3);
        assert_eq!(rows[0].cells[COL_SERIAL], "1");
        assert_eq!(rows[1].cells[COL_SERIAL], "2");

        // Header fields are duplicated across both rows.
        for row in &rows {
            assert_eq!(row.cells[COL_DIGITAL_INVOICE_NUMBER], "24322000000479248343");
            assert_eq!(row.cells[COL_SELLER_NAME], "苏州诚利恩服装科技有限公司");
            assert_eq!(row.cells[COL_POSITIVE_FLAG], "是");
            assert!(!row.is_error);
        }

        // Item columns come from the item, totals pass through unmodified.
        assert_eq!(rows[0].cells[COL_AMOUNT], "1168.14");
        assert_eq!(rows[0].cells[COL_TAX_AMOUNT], "151.86");
        assert_eq!(rows[1].cells[COL_AMOUNT], "1162.83");
        assert_eq!(rows[1].cells[COL_TAX_AMOUNT], "151.17");
        assert_eq!(rows[1].cells[COL_TOTAL_WITH_TAX], "1314.0");
    }

    #[test]
    fn test_invoice_without_items_still_emits_one_row() {
        let info = InvoiceInfo {
            invoice_number: "123".to_string(),
            issuer: "沈辰虹".to_string(),
            ..Default::default()
        };

        let mut serial = 7;
        let rows = invoice_rows(&mut serial, &info);

        assert_eq!(rows.len(), 1);
        assert_eq!(serial, 8);
        assert_eq!(rows[0].cells[COL_SERIAL], "7");
        assert_eq!(rows[0].cells[COL_DIGITAL_INVOICE_NUMBER], "123");
        assert_eq!(rows[0].cells[COL_ITEM_NAME], "");
        assert_eq!(rows[0].cells[COL_QUANTITY], "");
    }

    #[test]
    fn test_negative_invoice_renders_no_token() {
        let info = InvoiceInfo {
            is_positive_invoice: false,
            ..Default::default()
        };
        let mut serial = 1;
        let rows = invoice_rows(&mut serial, &info);
        assert_eq!(rows[0].cells[COL_POSITIVE_FLAG], "否");
    }

    #[test]
    fn test_failure_row_carries_only_serial_and_description() {
        let mut serial = 1;
        let row = failure_row(&mut serial, "bad.pdf", "LLM call failed: rate limited");

        assert_eq!(serial, 2);
        assert!(row.is_error);
        assert_eq!(row.cells[COL_SERIAL], "1");
        assert!(row.cells[COL_REMARKS].contains("bad.pdf"));
        assert!(row.cells[COL_REMARKS].contains("rate limited"));
        for (i, cell) in row.cells.iter().enumerate() {
            if i != COL_SERIAL && i != COL_REMARKS {
                assert_eq!(cell, "", "column {} must be empty", i);
            }
        }
    }

    #[test]
    fn test_artifact_name_embeds_timestamp() {
        use chrono::TimeZone;
        let at = Local.with_ymd_and_hms(2025, 1, 31, 9, 5, 7).unwrap();
        assert_eq!(artifact_name(at), "发票数据汇总_20250131_090507.csv");
    }

    #[test]
    fn test_csv_report_writes_header_and_rows() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");

        let mut report = CsvReport::create(&path).unwrap();
        let mut serial = 1;
        for row in invoice_rows(&mut serial, &two_item_invoice()) {
            report.write_row(&row).unwrap();
        }
        report.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("序号,发票代码,发票号码"));
        assert!(lines[1].contains("*服装*净化服"));
        assert!(lines[2].contains("*鞋*防砸鞋"));
    }
}
