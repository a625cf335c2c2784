//! Normalized invoice record: header fields plus ordered line items.
//!
//! Every field the LLM may omit has a defined default, applied declaratively
//! through `#[serde(default)]` so a missing key can never fail deserialization
//! and a newly added field cannot bypass the default policy. Numeric item
//! fields are kept as [`serde_json::Number`] so the upstream value passes
//! through unmodified; the pipeline does not recompute or verify the seller's
//! arithmetic.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One taxable line item. Owned by its parent [`InvoiceInfo`]; item order is
/// document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    /// 货物名称
    pub name: String,
    /// 规格型号
    pub specification: String,
    /// 单位
    pub unit: String,
    /// 数量
    pub quantity: Number,
    /// 单价
    pub unit_price: Number,
    /// 金额
    pub amount: Number,
    /// 税率 (may carry a percent sign, e.g. "13%")
    pub tax_rate: String,
    /// 税额
    pub tax_amount: Number,
    /// 价税合计
    pub total_with_tax: Number,
}

impl Default for InvoiceItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            specification: String::new(),
            unit: String::new(),
            quantity: Number::from(0),
            unit_price: Number::from(0),
            amount: Number::from(0),
            tax_rate: String::new(),
            tax_amount: Number::from(0),
            total_with_tax: Number::from(0),
        }
    }
}

/// One invoice document. String fields default to empty rather than absent so
/// downstream tabular rendering never has to deal with missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceInfo {
    /// 数电发票号码
    pub invoice_number: String,
    /// 销方识别号
    pub seller_tax_id: String,
    /// 销方名称
    pub seller_name: String,
    /// 购方识别号
    pub buyer_tax_id: String,
    /// 购买方名称
    pub buyer_name: String,
    /// 开票日期
    pub invoice_date: String,
    /// 税收分类编码
    pub tax_classification_code: String,
    /// 特定业务类型
    pub special_business_type: String,
    /// 货物列表, insertion order = document order
    pub items: Vec<InvoiceItem>,
    /// 发票来源
    pub invoice_source: String,
    /// 发票票种
    pub invoice_type: String,
    /// 发票状态
    pub invoice_status: String,
    /// 是否正数发票
    pub is_positive_invoice: bool,
    /// 发票风险等级
    pub invoice_risk_level: String,
    /// 开票人
    pub issuer: String,
    /// 备注
    pub remarks: String,
}

impl Default for InvoiceInfo {
    fn default() -> Self {
        Self {
            invoice_number: String::new(),
            seller_tax_id: String::new(),
            seller_name: String::new(),
            buyer_tax_id: String::new(),
            buyer_name: String::new(),
            invoice_date: String::new(),
            tax_classification_code: String::new(),
            special_business_type: String::new(),
            items: Vec::new(),
            invoice_source: String::new(),
            invoice_type: String::new(),
            invoice_status: String::new(),
            is_positive_invoice: true,
            invoice_risk_level: String::new(),
            issuer: String::new(),
            remarks: String::new(),
        }
    }
}
