use bytes::Bytes;
use tracing::debug;

use crate::error::{LookupError, ProviderError};
use crate::llm::LlmClient;
use crate::nutrition::NutritionLookup;

use super::dto::FoodRecord;
use super::risk;

const FOOD_ID_PROMPT: &str = "What food items are in this image? \
List each item on its own line and name only the edible items.";

/// The vision provider reports no per-item score, so records carry a fixed
/// placeholder.
const PLACEHOLDER_CONFIDENCE: f64 = 0.95;

/// Split the raw vision reply into candidate food names. No validation that
/// the lines are actual foods.
pub fn parse_food_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Identify foods in the image, then look up nutrition for each. Foods the
/// provider has no match for are skipped; a provider fault aborts the whole
/// analysis.
pub async fn analyze_image(
    llm: &dyn LlmClient,
    lookup: &dyn NutritionLookup,
    image: Bytes,
    mime_type: &str,
) -> Result<Vec<FoodRecord>, ProviderError> {
    let raw = llm.generate_with_image(FOOD_ID_PROMPT, image, mime_type).await?;

    let mut records = Vec::new();
    for name in parse_food_lines(&raw) {
        match lookup.lookup(&name).await {
            Ok(nutrition) => records.push(FoodRecord {
                warnings: risk::annotate(&name),
                confidence: PLACEHOLDER_CONFIDENCE,
                nutrition,
                name,
            }),
            Err(LookupError::NotFound) => {
                debug!(food = %name, "no nutrition match, skipping");
            }
            Err(LookupError::Provider(e)) => return Err(e),
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::nutrition::NutritionInfo;

    struct FixedVision(&'static str);

    #[async_trait]
    impl LlmClient for FixedVision {
        async fn generate_with_image(
            &self,
            _prompt: &str,
            _image: Bytes,
            _mime_type: &str,
        ) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }

        async fn generate_with_text(
            &self,
            _system_prompt: &str,
            _user_message: &str,
        ) -> Result<String, ProviderError> {
            Ok(String::new())
        }
    }

    struct MissOnDragonfruit;

    #[async_trait]
    impl NutritionLookup for MissOnDragonfruit {
        async fn lookup(&self, food_name: &str) -> Result<NutritionInfo, LookupError> {
            if food_name.eq_ignore_ascii_case("dragonfruit") {
                Err(LookupError::NotFound)
            } else {
                Ok(NutritionInfo::default())
            }
        }
    }

    #[test]
    fn parse_food_lines_trims_and_drops_blanks() {
        let lines = parse_food_lines("Apple\n  Banana  \n\n   \nToast\n");
        assert_eq!(lines, vec!["Apple", "Banana", "Toast"]);
    }

    #[tokio::test]
    async fn unmatched_foods_are_skipped_and_warnings_attached() {
        let vision = FixedVision("sugar cookie\ndragonfruit\n");
        let records = analyze_image(
            &vision,
            &MissOnDragonfruit,
            Bytes::from_static(b"jpegbytes"),
            "image/jpeg",
        )
        .await
        .expect("analysis should succeed");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "sugar cookie");
        assert_eq!(records[0].confidence, 0.95);
        assert_eq!(records[0].warnings.len(), 1);
        assert!(records[0].warnings[0].starts_with("Contains sugar"));
    }

    #[tokio::test]
    async fn lookup_fault_aborts_the_analysis() {
        struct Faulty;

        #[async_trait]
        impl NutritionLookup for Faulty {
            async fn lookup(&self, _food_name: &str) -> Result<NutritionInfo, LookupError> {
                Err(ProviderError::Request("connection refused".into()).into())
            }
        }

        let vision = FixedVision("apple\n");
        let result = analyze_image(
            &vision,
            &Faulty,
            Bytes::from_static(b"jpegbytes"),
            "image/jpeg",
        )
        .await;

        assert!(result.is_err());
    }
}
