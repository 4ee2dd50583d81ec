use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const CHAT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_NLU_PERSONA: &str = "general";

pub const PERSONAS: [(&str, &str); 5] = [
    ("student", "Student"),
    ("salaried", "Salaried professional"),
    ("parent", "Parent"),
    ("freelancer", "Freelancer"),
    ("retiree", "Retiree"),
];

// Requests. Income, expenses and transactions stay opaque JSON.

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetRequest {
    pub income: Value,
    pub expenses: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsightsRequest {
    pub transactions: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub persona: Option<String>,
    pub stream: bool,
    pub max_tokens: u32,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, persona: Option<String>) -> Self {
        GenerateRequest {
            prompt: prompt.into(),
            persona,
            stream: false,
            max_tokens: CHAT_MAX_TOKENS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NluRequest {
    pub text: String,
    pub persona: String,
}

impl NluRequest {
    pub fn new(text: impl Into<String>, persona: Option<String>) -> Self {
        NluRequest {
            text: text.into(),
            persona: persona
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_NLU_PERSONA.to_string()),
        }
    }
}

// Responses

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings_rate: f64,
    #[serde(deserialize_with = "ordered_shares")]
    pub category_percentages: Vec<(String, f64)>,
    #[serde(default)]
    pub suggestion_list: Vec<String>,
}

/// Keeps the server's key order, which `serde_json` preserves for us.
fn ordered_shares<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
    Ok(map
        .into_iter()
        .map(|(k, v)| (k, v.as_f64().unwrap_or(0.0)))
        .collect())
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpendingInsights {
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub top_categories: Option<Vec<CategorySpend>>,
}

impl SpendingInsights {
    /// `None` when there is nothing to chart.
    pub fn chartable_categories(&self) -> Option<&[CategorySpend]> {
        self.top_categories
            .as_deref()
            .filter(|categories| !categories.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GenerateMeta {
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GenerateResponse {
    pub answer: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub meta: Option<GenerateMeta>,
}

impl GenerateResponse {
    pub fn caption(&self) -> Option<String> {
        let confidence = self.meta.as_ref().and_then(|m| m.confidence);
        match (self.model.as_deref(), confidence) {
            (Some(model), Some(c)) => Some(format!("{} · {:.0}% confidence", model, c * 100.0)),
            (Some(model), None) => Some(model.to_string()),
            (None, Some(c)) => Some(format!("{:.0}% confidence", c * 100.0)),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub value: String,
}

impl Entity {
    pub fn label(&self) -> String {
        format!("{}: {} ({})", self.kind, self.text, self.value)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NluResult {
    pub sentiment: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_carries_fixed_options() {
        let body = serde_json::to_value(GenerateRequest::new("How do I save?", None)).unwrap();
        assert_eq!(
            body,
            json!({"prompt": "How do I save?", "persona": null, "stream": false, "max_tokens": 512})
        );

        let body =
            serde_json::to_value(GenerateRequest::new("Hi", Some("student".into()))).unwrap();
        assert_eq!(body["persona"], "student");
    }

    #[test]
    fn nlu_persona_defaults_to_general() {
        assert_eq!(NluRequest::new("spent $5", None).persona, "general");
        assert_eq!(NluRequest::new("spent $5", Some(String::new())).persona, "general");
        assert_eq!(NluRequest::new("spent $5", Some("parent".into())).persona, "parent");
    }

    #[test]
    fn budget_summary_keeps_category_order() {
        let raw = r#"{
            "total_income": 5700,
            "total_expenses": 2050,
            "savings_rate": 64.04,
            "category_percentages": {"Rent": 58.5, "Groceries": 19.5, "Entertainment": 7.3},
            "suggestion_list": ["Keep it up"]
        }"#;
        let summary: BudgetSummary = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = summary
            .category_percentages
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["Rent", "Groceries", "Entertainment"]);
        assert_eq!(summary.suggestion_list, ["Keep it up"]);
    }

    #[test]
    fn insights_without_top_categories_are_not_chartable() {
        let absent: SpendingInsights =
            serde_json::from_str(r#"{"red_flags": [], "recommendations": ["Cook more"]}"#).unwrap();
        assert!(absent.chartable_categories().is_none());

        let empty: SpendingInsights = serde_json::from_str(
            r#"{"red_flags": [], "recommendations": [], "top_categories": []}"#,
        )
        .unwrap();
        assert!(empty.chartable_categories().is_none());

        let some: SpendingInsights = serde_json::from_str(
            r#"{"red_flags": [], "recommendations": [],
                "top_categories": [{"category": "Food", "amount": 450.0, "percentage": 40.5}]}"#,
        )
        .unwrap();
        assert_eq!(some.chartable_categories().map(|c| c.len()), Some(1));
    }

    #[test]
    fn entity_label_reads_type_text_value() {
        let result: NluResult = serde_json::from_str(
            r#"{"sentiment": "neutral",
                "entities": [{"type": "AMOUNT", "text": "$50", "value": "50"}],
                "keywords": ["spent"]}"#,
        )
        .unwrap();
        assert_eq!(result.entities[0].label(), "AMOUNT: $50 (50)");
    }

    #[test]
    fn generate_caption_uses_model_and_confidence() {
        let full: GenerateResponse = serde_json::from_str(
            r#"{"answer": "Save more", "model": "granite", "meta": {"persona": "student", "confidence": 0.95}}"#,
        )
        .unwrap();
        assert_eq!(full.caption().as_deref(), Some("granite · 95% confidence"));

        let bare: GenerateResponse = serde_json::from_str(r#"{"answer": "Save more"}"#).unwrap();
        assert_eq!(bare.caption(), None);
    }
}
