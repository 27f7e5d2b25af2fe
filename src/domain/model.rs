use serde::{Deserialize, Serialize};
use std::fmt;

/// 表單上送出的原始字串欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub gender: String,
    pub birth_place: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Some(Gender::Male),
            "female" | "f" | "女" => Some(Gender::Female),
            "other" | "其他" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 單次提交時由表單建立的查詢；數值欄位無法解析時為 `None`
///
/// 只有通過驗證的查詢才會被送出，此時所有 `Option` 欄位皆為 `Some`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthQuery {
    pub name: String,
    pub gender: Option<Gender>,
    #[serde(skip)]
    pub gender_input: String,
    pub birth_place: String,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
    pub birth_datetime: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Gender,
    BirthPlace,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "姓名",
            Field::Gender => "性别",
            Field::BirthPlace => "出生地点",
            Field::Year => "出生年份",
            Field::Month => "出生月份",
            Field::Day => "出生日期",
            Field::Hour => "小时",
            Field::Minute => "分钟",
            Field::Second => "秒数",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Required(Field),
    NotANumber(Field),
    OutOfRange(Field),
    UnknownGender(String),
    NonexistentDate,
}

impl Violation {
    pub fn field(&self) -> Option<Field> {
        match self {
            Violation::Required(f) | Violation::NotANumber(f) | Violation::OutOfRange(f) => {
                Some(*f)
            }
            Violation::UnknownGender(_) => Some(Field::Gender),
            Violation::NonexistentDate => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Violation::Required(Field::Name) => "请输入姓名".to_string(),
            Violation::Required(Field::Gender) => "请选择性别".to_string(),
            Violation::Required(Field::BirthPlace) => "请输入出生地点".to_string(),
            Violation::Required(field) => format!("请填写{}", field.label()),
            Violation::NotANumber(field) => format!("{}必须是整数", field.label()),
            Violation::OutOfRange(Field::Year) => "请输入有效的出生年份(1900-2030)".to_string(),
            Violation::OutOfRange(Field::Month) => "请选择有效的出生月份".to_string(),
            Violation::OutOfRange(Field::Day) => "请输入有效的出生日期".to_string(),
            Violation::OutOfRange(Field::Hour) => "请输入有效的小时(0-23)".to_string(),
            Violation::OutOfRange(Field::Minute) => "请输入有效的分钟(0-59)".to_string(),
            Violation::OutOfRange(Field::Second) => "请输入有效的秒数(0-59)".to_string(),
            Violation::OutOfRange(field) => format!("请输入有效的{}", field.label()),
            Violation::UnknownGender(value) => format!("无法识别的性别: {}", value),
            Violation::NonexistentDate => "请输入存在的日期".to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// 工作流回傳的分析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisData {
    pub name: String,
    pub basic_info: BasicInfo,
    pub bazi_analysis: BaziAnalysis,
    pub fortune_summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub birth_date: String,
    pub birth_place: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaziAnalysis {
    pub year_pillar: String,
    pub month_pillar: String,
    pub day_pillar: String,
    pub hour_pillar: String,
    pub five_elements: FiveElements,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveElements {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

/// 三個互斥的畫面區塊
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Input,
    Loading,
    Result,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Input, Panel::Loading, Panel::Result];

    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::Input => "input",
            Panel::Loading => "loading",
            Panel::Result => "result",
        }
    }
}
