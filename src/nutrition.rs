use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::UsdaConfig;
use crate::error::{LookupError, ProviderError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitamins {
    pub a: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Minerals {
    pub iron: f64,
    pub calcium: f64,
    pub potassium: f64,
}

/// Per-food nutrient profile. Any field the provider does not report stays
/// at zero; absence is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub vitamins: Vitamins,
    pub minerals: Minerals,
}

#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn lookup(&self, food_name: &str) -> Result<NutritionInfo, LookupError>;
}

// --- USDA FoodData Central wire types ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodHit>,
}

#[derive(Debug, Deserialize)]
struct FoodHit {
    #[serde(rename = "foodNutrients", default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
pub struct FoodNutrient {
    #[serde(rename = "nutrientName")]
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl UsdaClient {
    pub fn new(config: &UsdaConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NutritionLookup for UsdaClient {
    async fn lookup(&self, food_name: &str) -> Result<NutritionInfo, LookupError> {
        let url = format!("{}/foods/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", food_name),
                ("dataType", "Survey (FNDDS)"),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, food = %food_name, "nutrition search request failed");
                ProviderError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, food = %food_name, "nutrition search returned error status");
            return Err(ProviderError::Request(format!("{status}: {body}")).into());
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let food = parsed.foods.first().ok_or(LookupError::NotFound)?;
        Ok(extract_nutrition(&food.food_nutrients))
    }
}

fn exact(nutrients: &[FoodNutrient], name: &str) -> f64 {
    nutrients
        .iter()
        .find(|n| n.name == name)
        .map(|n| n.value)
        .unwrap_or(0.0)
}

fn containing(nutrients: &[FoodNutrient], fragment: &str) -> f64 {
    nutrients
        .iter()
        .find(|n| n.name.contains(fragment))
        .map(|n| n.value)
        .unwrap_or(0.0)
}

/// Pick the named fields out of an unordered nutrient list. Macros match on
/// the provider's exact names, vitamins and minerals on a name fragment.
pub fn extract_nutrition(nutrients: &[FoodNutrient]) -> NutritionInfo {
    NutritionInfo {
        calories: exact(nutrients, "Energy"),
        protein: exact(nutrients, "Protein"),
        carbs: exact(nutrients, "Carbohydrate, by difference"),
        fat: exact(nutrients, "Total lipid (fat)"),
        fiber: exact(nutrients, "Fiber, total dietary"),
        vitamins: Vitamins {
            a: containing(nutrients, "Vitamin A"),
            c: containing(nutrients, "Vitamin C"),
            d: containing(nutrients, "Vitamin D"),
            e: containing(nutrients, "Vitamin E"),
        },
        minerals: Minerals {
            iron: containing(nutrients, "Iron"),
            calcium: containing(nutrients, "Calcium"),
            potassium: containing(nutrients, "Potassium"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(name: &str, value: f64) -> FoodNutrient {
        FoodNutrient {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn extracts_named_fields() {
        let nutrients = vec![
            nutrient("Energy", 52.0),
            nutrient("Protein", 0.3),
            nutrient("Carbohydrate, by difference", 13.8),
            nutrient("Total lipid (fat)", 0.2),
            nutrient("Fiber, total dietary", 2.4),
            nutrient("Vitamin C, total ascorbic acid", 4.6),
            nutrient("Iron, Fe", 0.1),
        ];

        let info = extract_nutrition(&nutrients);
        assert_eq!(info.calories, 52.0);
        assert_eq!(info.protein, 0.3);
        assert_eq!(info.carbs, 13.8);
        assert_eq!(info.fat, 0.2);
        assert_eq!(info.fiber, 2.4);
        assert_eq!(info.vitamins.c, 4.6);
        assert_eq!(info.minerals.iron, 0.1);
    }

    #[test]
    fn missing_nutrients_default_to_zero() {
        let nutrients = vec![nutrient("Energy", 100.0)];

        let info = extract_nutrition(&nutrients);
        assert_eq!(info.calories, 100.0);
        assert_eq!(info.protein, 0.0);
        assert_eq!(info.fiber, 0.0);
        assert_eq!(info.vitamins.a, 0.0);
        assert_eq!(info.minerals.potassium, 0.0);
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(extract_nutrition(&[]), NutritionInfo::default());
    }
}
