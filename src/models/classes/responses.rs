use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use super::entities::Class;

/// 按年级分组的班级列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct GroupedClassesResponse(pub BTreeMap<i32, Vec<Class>>);

impl GroupedClassesResponse {
    pub fn from_classes(classes: Vec<Class>) -> Self {
        let mut grouped: BTreeMap<i32, Vec<Class>> = BTreeMap::new();
        for class in classes {
            grouped.entry(class.number).or_default().push(class);
        }
        Self(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64, number: i32, letter: &str) -> Class {
        Class {
            id,
            number,
            letter: letter.to_string(),
        }
    }

    #[test]
    fn test_groups_by_number() {
        let grouped = GroupedClassesResponse::from_classes(vec![
            class(1, 10, "A"),
            class(2, 11, "B"),
            class(3, 10, "V"),
        ]);
        let body = serde_json::to_value(&grouped).unwrap();
        assert_eq!(body["10"].as_array().unwrap().len(), 2);
        assert_eq!(body["11"][0]["letter"], "B");
    }
}
