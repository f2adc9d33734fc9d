use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    pub id: i64,
    // 年级
    pub number: i32,
    // 班级字母
    pub letter: String,
}

impl Class {
    /// 形如 `10A`
    pub fn title(&self) -> String {
        format!("{}{}", self.number, self.letter)
    }
}
