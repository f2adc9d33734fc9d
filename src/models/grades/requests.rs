use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeRequest {
    pub value: Option<f64>,
}
