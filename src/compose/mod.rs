pub mod bank;
pub mod commentary;
pub mod template;

pub use bank::{BankError, TemplateBank};
pub use template::PlaceholderValues;

use crate::session::SelectionState;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FALLBACK_RESTAURANT: &str = "this restaurant";
pub const FALLBACK_DISH: &str = "this signature dish";
pub const FALLBACK_PRICE: &str = "unspecified";

// The whole pipeline: resolve the template through the fallback chain,
// substitute placeholders, draw each alternative group, append commentary.
// Pure - a fixed RNG seed reproduces the output byte for byte.
pub fn compose(selections: &SelectionState, bank: &TemplateBank, rng: &mut impl Rng) -> String {
    let restaurant_name = selections
        .restaurant_name
        .as_deref()
        .unwrap_or(FALLBACK_RESTAURANT);
    let dish_name = selections.dish_name.as_deref().unwrap_or(FALLBACK_DISH);
    let price = selections.price.as_deref().unwrap_or(FALLBACK_PRICE);

    let template = bank.resolve(selections.overall_rating, selections.restaurant_style);
    let mut text = template.render(
        &PlaceholderValues {
            restaurant_name,
            dish_name,
            price,
        },
        rng,
    );

    for paragraph in commentary::paragraphs(selections, dish_name) {
        text.push_str("\n\n");
        text.push_str(&paragraph);
    }
    text
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedReview {
    pub id: String,
    pub restaurant_name: String,
    pub body: String,
    pub selections: SelectionState,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ComposedReview {
    pub fn new(
        selections: &SelectionState,
        images: &[String],
        bank: &TemplateBank,
        rng: &mut impl Rng,
    ) -> ComposedReview {
        let now = Utc::now().to_rfc3339();
        ComposedReview {
            id: Uuid::new_v4().to_string(),
            restaurant_name: selections
                .restaurant_name
                .clone()
                .unwrap_or_else(|| FALLBACK_RESTAURANT.to_string()),
            body: compose(selections, bank, rng),
            selections: selections.clone(),
            images: images.to_vec(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    // Editing an existing review: id and created_at survive, everything
    // derived from the answers is rebuilt.
    pub fn recompose(
        &mut self,
        selections: &SelectionState,
        images: &[String],
        bank: &TemplateBank,
        rng: &mut impl Rng,
    ) {
        self.restaurant_name = selections
            .restaurant_name
            .clone()
            .unwrap_or_else(|| FALLBACK_RESTAURANT.to_string());
        self.body = compose(selections, bank, rng);
        self.selections = selections.clone();
        self.images = images.to_vec();
        self.updated_at = Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::options::{OverallRating, RestaurantStyle};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn missing_free_text_uses_fixed_fallbacks() {
        let mut state = SelectionState::default();
        state.overall_rating = Some(OverallRating::ThreeStars);
        state.restaurant_style = Some(RestaurantStyle::FastFood);
        let bank = TemplateBank::builtin().unwrap();
        let text = compose(&state, &bank, &mut StdRng::seed_from_u64(1));
        assert!(text.contains(FALLBACK_RESTAURANT));
    }

    #[test]
    fn recompose_preserves_id_and_created_at() {
        let bank = TemplateBank::builtin().unwrap();
        let mut state = SelectionState::default();
        state.restaurant_name = Some("Joe's Diner".to_string());
        state.dish_name = Some("Burger".to_string());
        state.overall_rating = Some(OverallRating::FourStars);
        state.restaurant_style = Some(RestaurantStyle::CasualEatery);

        let mut review =
            ComposedReview::new(&state, &[], &bank, &mut StdRng::seed_from_u64(3));
        let id = review.id.clone();
        let created = review.created_at.clone();

        state.overall_rating = Some(OverallRating::OneStar);
        review.recompose(&state, &[], &bank, &mut StdRng::seed_from_u64(4));
        assert_eq!(review.id, id);
        assert_eq!(review.created_at, created);
        assert_eq!(
            review.selections.overall_rating,
            Some(OverallRating::OneStar)
        );
    }
}
