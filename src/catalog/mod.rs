pub mod options;

use options::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Choice,
    FreeText,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKey {
    InitialInfo,
    OverallRating,
    RestaurantStyle,
    Ambiance,
    ServiceEfficiency,
    ServiceAttitude,
    StaffKnowledge,
    MainDishFlavor,
    MainDishTexture,
    DishPortion,
    SideDishQuality,
    BeverageQuality,
    DessertQuality,
    IngredientFreshness,
    CookingTechnique,
    Cleanliness,
    ValueForMoney,
    WouldRecommend,
    FinalThoughts,
    Photos,
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionStep {
    pub key: StepKey,
    pub prompt: &'static str,
    pub kind: StepKind,
}

// The wizard order. Fixed at compile time; the six-options-per-choice-step
// convention is presentational and checked in tests, not relied on by the
// composer.
pub const STEPS: &[QuestionStep] = &[
    QuestionStep {
        key: StepKey::InitialInfo,
        prompt: "First, what is the restaurant called, and what was the signature dish?",
        kind: StepKind::FreeText,
    },
    QuestionStep {
        key: StepKey::OverallRating,
        prompt: "How many stars would you give the visit overall?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::RestaurantStyle,
        prompt: "What style of restaurant is this?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::Ambiance,
        prompt: "How did the atmosphere feel?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::ServiceEfficiency,
        prompt: "Were you happy with the speed of service?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::ServiceAttitude,
        prompt: "How was the staff's attitude?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::StaffKnowledge,
        prompt: "How well did the staff know the menu and drinks?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::MainDishFlavor,
        prompt: "How did the signature dish taste?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::MainDishTexture,
        prompt: "How was the signature dish's texture?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::DishPortion,
        prompt: "How did the portion feel?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::SideDishQuality,
        prompt: "How were the sides and small plates?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::BeverageQuality,
        prompt: "Did you order a drink? How was it?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::DessertQuality,
        prompt: "Did you try a dessert? How did it do?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::IngredientFreshness,
        prompt: "How fresh did the ingredients seem?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::CookingTechnique,
        prompt: "What impression did the cooking leave?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::Cleanliness,
        prompt: "How clean was the restaurant?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::ValueForMoney,
        prompt: "How was the value for money?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::WouldRecommend,
        prompt: "Would you recommend this restaurant to a friend?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::FinalThoughts,
        prompt: "Finally, any other thoughts about the visit?",
        kind: StepKind::Choice,
    },
    QuestionStep {
        key: StepKey::Photos,
        prompt: "Attach photos of the meal (optional) - almost done!",
        kind: StepKind::Upload,
    },
];

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn step_at(index: usize) -> Option<&'static QuestionStep> {
    STEPS.get(index)
}

pub fn find_step(key: StepKey) -> &'static QuestionStep {
    &STEPS[key.index()]
}

impl StepKey {
    pub fn index(self) -> usize {
        match self {
            StepKey::InitialInfo => 0,
            StepKey::OverallRating => 1,
            StepKey::RestaurantStyle => 2,
            StepKey::Ambiance => 3,
            StepKey::ServiceEfficiency => 4,
            StepKey::ServiceAttitude => 5,
            StepKey::StaffKnowledge => 6,
            StepKey::MainDishFlavor => 7,
            StepKey::MainDishTexture => 8,
            StepKey::DishPortion => 9,
            StepKey::SideDishQuality => 10,
            StepKey::BeverageQuality => 11,
            StepKey::DessertQuality => 12,
            StepKey::IngredientFreshness => 13,
            StepKey::CookingTechnique => 14,
            StepKey::Cleanliness => 15,
            StepKey::ValueForMoney => 16,
            StepKey::WouldRecommend => 17,
            StepKey::FinalThoughts => 18,
            StepKey::Photos => 19,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepKey::InitialInfo => "initialInfo",
            StepKey::OverallRating => "overallRating",
            StepKey::RestaurantStyle => "restaurantStyle",
            StepKey::Ambiance => "ambiance",
            StepKey::ServiceEfficiency => "serviceEfficiency",
            StepKey::ServiceAttitude => "serviceAttitude",
            StepKey::StaffKnowledge => "staffKnowledge",
            StepKey::MainDishFlavor => "mainDishFlavor",
            StepKey::MainDishTexture => "mainDishTexture",
            StepKey::DishPortion => "dishPortion",
            StepKey::SideDishQuality => "sideDishQuality",
            StepKey::BeverageQuality => "beverageQuality",
            StepKey::DessertQuality => "dessertQuality",
            StepKey::IngredientFreshness => "ingredientFreshness",
            StepKey::CookingTechnique => "cookingTechnique",
            StepKey::Cleanliness => "cleanliness",
            StepKey::ValueForMoney => "valueForMoney",
            StepKey::WouldRecommend => "wouldRecommend",
            StepKey::FinalThoughts => "finalThoughts",
            StepKey::Photos => "photos",
        }
    }

    pub fn cards(self) -> Option<&'static [Card]> {
        match self {
            StepKey::InitialInfo | StepKey::Photos => None,
            StepKey::OverallRating => Some(OverallRating::CARDS),
            StepKey::RestaurantStyle => Some(RestaurantStyle::CARDS),
            StepKey::Ambiance => Some(Ambiance::CARDS),
            StepKey::ServiceEfficiency => Some(ServiceEfficiency::CARDS),
            StepKey::ServiceAttitude => Some(ServiceAttitude::CARDS),
            StepKey::StaffKnowledge => Some(StaffKnowledge::CARDS),
            StepKey::MainDishFlavor => Some(MainDishFlavor::CARDS),
            StepKey::MainDishTexture => Some(MainDishTexture::CARDS),
            StepKey::DishPortion => Some(DishPortion::CARDS),
            StepKey::SideDishQuality => Some(SideDishQuality::CARDS),
            StepKey::BeverageQuality => Some(BeverageQuality::CARDS),
            StepKey::DessertQuality => Some(DessertQuality::CARDS),
            StepKey::IngredientFreshness => Some(IngredientFreshness::CARDS),
            StepKey::CookingTechnique => Some(CookingTechnique::CARDS),
            StepKey::Cleanliness => Some(Cleanliness::CARDS),
            StepKey::ValueForMoney => Some(ValueForMoney::CARDS),
            StepKey::WouldRecommend => Some(WouldRecommend::CARDS),
            StepKey::FinalThoughts => Some(FinalThoughts::CARDS),
        }
    }
}

// Identifies this revision of the catalog. Drafts record it so a draft
// written against a different option set is detected instead of half-applied.
pub fn fingerprint() -> String {
    let mut hasher = Sha256::new();
    for step in STEPS {
        hasher.update(step.key.as_str().as_bytes());
        hasher.update(b"\n");
        if let Some(cards) = step.key.cards() {
            for card in cards {
                hasher.update(card.id.as_bytes());
                hasher.update(b";");
            }
        }
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_steps_ending_in_upload() {
        assert_eq!(step_count(), 20);
        let last = step_at(step_count() - 1).unwrap();
        assert_eq!(last.kind, StepKind::Upload);
        assert!(last.key.cards().is_none());
    }

    #[test]
    fn choice_steps_all_carry_six_cards() {
        for step in STEPS {
            match step.kind {
                StepKind::Choice => assert_eq!(step.key.cards().map(<[Card]>::len), Some(6)),
                StepKind::FreeText | StepKind::Upload => assert!(step.key.cards().is_none()),
            }
        }
    }

    #[test]
    fn find_step_resolves_every_key() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.key.index(), i);
            assert_eq!(find_step(step.key).key, step.key);
        }
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint(), fingerprint());
        assert_eq!(fingerprint().len(), 64);
    }
}
