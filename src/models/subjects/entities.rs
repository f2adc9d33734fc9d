use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "subject.ts")]
pub struct Subject {
    pub id: i64,
    pub title: String,
}
