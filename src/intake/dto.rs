use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    #[serde(default)]
    pub food_data: Vec<Value>,
    #[serde(default)]
    pub total_nutrients: Value,
}

impl CommitRequest {
    /// A null or empty-object aggregate is treated as "nothing to commit".
    pub fn has_totals(&self) -> bool {
        match &self.total_nutrients {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }
}
