use super::source_ref::SourceReference;
use super::stats::MatchSummary;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// 输出中追加汇总时使用的键
pub const SUMMARY_KEY: &str = "_match_summary";

/// 抽取字段的原始值 (数字按原写法保留)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
    Other(Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Other(Value::Null))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Other(Value::Null))
    }

    /// 文本形式, 数字为 `250.0` / `12345` 这样的原始写法
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Other(v) => Cow::Owned(v.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::number(value)
    }
}

/// 显式 `null` 读作 `Some(Other(Null))`, 输出时原样保留该键; 缺失的键仍为 `None`
fn nullable<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// 病历时间线中的一次就诊事件
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedicalEvent {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub date: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub provider: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub encounter_type: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub summary: Option<FieldValue>,
    #[serde(default)]
    pub diagnosis_codes: Vec<FieldValue>,
    #[serde(default)]
    pub source_refs: Vec<SourceReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 病历时间线文档
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chronology {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<FieldValue>,
    pub events: Vec<MedicalEvent>,
    #[serde(default)]
    pub source_refs: Vec<SourceReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 账单明细行
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BillLineItem {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub date_of_service: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub cpt_code: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub charged_amount: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub allowed_amount: Option<FieldValue>,
    #[serde(default)]
    pub source_refs: Vec<SourceReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 医疗账单文档
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bill {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<FieldValue>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<FieldValue>,
    pub line_items: Vec<BillLineItem>,
    #[serde(default)]
    pub source_refs: Vec<SourceReference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 抽取结果 - 入口处判定一次文档类型
///
/// 含 `events` 为时间线, 含 `line_items` 为账单, 其他原样透传。
/// 带有上述键但无法按类型读取的记录同样透传。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Chronology(Chronology),
    Bill(Bill),
    Unrecognized(Map<String, Value>),
}

impl ExtractedRecord {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        map.remove(SUMMARY_KEY);

        let value = Value::Object(map);
        let parsed = if value.get("events").is_some() {
            Chronology::deserialize(&value).map(ExtractedRecord::Chronology)
        } else if value.get("line_items").is_some() {
            Bill::deserialize(&value).map(ExtractedRecord::Bill)
        } else {
            return Self::passthrough(value);
        };

        match parsed {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Record has a known shape but could not be read, passing through: {}", e);
                Self::passthrough(value)
            }
        }
    }

    fn passthrough(value: Value) -> Self {
        match value {
            Value::Object(map) => ExtractedRecord::Unrecognized(map),
            _ => ExtractedRecord::Unrecognized(Map::new()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ExtractedRecord::Chronology(_) => "chronology",
            ExtractedRecord::Bill(_) => "bill",
            ExtractedRecord::Unrecognized(_) => "unrecognized",
        }
    }
}

impl<'de> Deserialize<'de> for ExtractedRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(map))
    }
}

/// 链接后的记录: 与输入同形, 末尾追加 `_match_summary`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ExtractedRecord,
    #[serde(rename = "_match_summary")]
    pub match_summary: MatchSummary,
}
