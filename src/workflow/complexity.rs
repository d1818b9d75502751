use serde::Serialize;
use utoipa::ToSchema;

use super::model::{Order, Suggestion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
    VeryComplex,
}

impl ComplexityLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=15 => ComplexityLevel::Simple,
            16..=30 => ComplexityLevel::Medium,
            31..=50 => ComplexityLevel::Complex,
            _ => ComplexityLevel::VeryComplex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ComplexityFactors {
    pub item_count: u32,
    pub category_diversity: u32,
    pub has_special_instructions: bool,
    pub cooking_technique_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ComplexityAnalysis {
    pub complexity_score: u32,
    pub complexity_level: ComplexityLevel,
    pub factors: ComplexityFactors,
    pub recommendations: Vec<Suggestion>,
}

pub fn analyze_complexity(order: &Order) -> ComplexityAnalysis {
    let factors = ComplexityFactors {
        item_count: order.item_count(),
        category_diversity: u32::try_from(order.categories().len()).unwrap_or(u32::MAX),
        has_special_instructions: order.has_special_instructions(),
        cooking_technique_count: u32::try_from(order.techniques().len()).unwrap_or(u32::MAX),
    };

    let complexity_score = factors
        .item_count
        .saturating_mul(2)
        .saturating_add(factors.category_diversity.saturating_mul(5))
        .saturating_add(if factors.has_special_instructions { 10 } else { 0 })
        .saturating_add(factors.cooking_technique_count.saturating_mul(3));

    let mut recommendations = Vec::new();
    if factors.item_count > 5 {
        recommendations.push(Suggestion::new(
            "split_preparation",
            format!("{} items: split preparation across cooks", factors.item_count),
        ));
    }
    if factors.category_diversity > 3 {
        recommendations.push(Suggestion::new(
            "coordinate_stations",
            format!(
                "{} food categories: coordinate stations so items finish together",
                factors.category_diversity
            ),
        ));
    }
    if factors.has_special_instructions {
        recommendations.push(Suggestion::new(
            "check_instructions",
            "Special instructions present: double-check before plating",
        ));
    }
    if factors.cooking_technique_count > 2 {
        recommendations.push(Suggestion::new(
            "assign_experienced_cook",
            format!(
                "{} cooking techniques: assign an experienced cook",
                factors.cooking_technique_count
            ),
        ));
    }

    ComplexityAnalysis {
        complexity_score,
        complexity_level: ComplexityLevel::from_score(complexity_score),
        factors,
        recommendations,
    }
}
