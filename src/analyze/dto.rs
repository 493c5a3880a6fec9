use serde::Serialize;

use crate::nutrition::NutritionInfo;

#[derive(Debug, Clone, Serialize)]
pub struct FoodRecord {
    pub name: String,
    pub confidence: f64,
    pub nutrition: NutritionInfo,
    pub warnings: Vec<String>,
}
