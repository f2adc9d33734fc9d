use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct CreateExamRequest {
    pub clazz: Option<i64>,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct UpdateExamRequest {
    pub clazz: Option<i64>,
    pub date: Option<NaiveDate>,
    pub topic: Option<String>,
    pub details: Option<String>,
}
