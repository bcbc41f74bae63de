pub mod interactive;

use crate::catalog::options::*;
use crate::catalog::{self, StepKey, StepKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("step {step} does not take a choice")]
    NotAChoiceStep { step: &'static str },
    #[error("step {step} does not take text input")]
    NotATextStep { step: &'static str },
    #[error("current step is {current}, not {requested}")]
    StepMismatch {
        current: &'static str,
        requested: &'static str,
    },
    #[error("unknown option '{id}' for step {step}")]
    UnknownOption { step: &'static str, id: String },
    #[error("{field} is required before moving on")]
    MissingRequired { field: &'static str },
    #[error("step {step} has no selection yet")]
    MissingSelection { step: &'static str },
    #[error("the wizard is already at the preview stage")]
    AtPreview,
}

// Everything the user has answered so far. Choice answers are typed; the
// camelCase ids appear only in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectionState {
    pub restaurant_name: Option<String>,
    pub dish_name: Option<String>,
    pub price: Option<String>,
    pub overall_rating: Option<OverallRating>,
    pub restaurant_style: Option<RestaurantStyle>,
    pub ambiance: Option<Ambiance>,
    pub service_efficiency: Option<ServiceEfficiency>,
    pub service_attitude: Option<ServiceAttitude>,
    pub staff_knowledge: Option<StaffKnowledge>,
    pub main_dish_flavor: Option<MainDishFlavor>,
    pub main_dish_texture: Option<MainDishTexture>,
    pub dish_portion: Option<DishPortion>,
    pub side_dish_quality: Option<SideDishQuality>,
    pub beverage_quality: Option<BeverageQuality>,
    pub dessert_quality: Option<DessertQuality>,
    pub ingredient_freshness: Option<IngredientFreshness>,
    pub cooking_technique: Option<CookingTechnique>,
    pub cleanliness: Option<Cleanliness>,
    pub value_for_money: Option<ValueForMoney>,
    pub would_recommend: Option<WouldRecommend>,
    pub final_thoughts: Option<FinalThoughts>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self == &SelectionState::default()
    }

    fn record(&mut self, key: StepKey, id: &str) -> Result<(), TransitionError> {
        let unknown = || TransitionError::UnknownOption {
            step: key.as_str(),
            id: id.to_string(),
        };
        match key {
            StepKey::OverallRating => {
                self.overall_rating = Some(OverallRating::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::RestaurantStyle => {
                self.restaurant_style = Some(RestaurantStyle::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::Ambiance => self.ambiance = Some(Ambiance::from_id(id).ok_or_else(unknown)?),
            StepKey::ServiceEfficiency => {
                self.service_efficiency = Some(ServiceEfficiency::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::ServiceAttitude => {
                self.service_attitude = Some(ServiceAttitude::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::StaffKnowledge => {
                self.staff_knowledge = Some(StaffKnowledge::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::MainDishFlavor => {
                self.main_dish_flavor = Some(MainDishFlavor::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::MainDishTexture => {
                self.main_dish_texture = Some(MainDishTexture::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::DishPortion => {
                self.dish_portion = Some(DishPortion::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::SideDishQuality => {
                self.side_dish_quality = Some(SideDishQuality::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::BeverageQuality => {
                self.beverage_quality = Some(BeverageQuality::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::DessertQuality => {
                self.dessert_quality = Some(DessertQuality::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::IngredientFreshness => {
                self.ingredient_freshness =
                    Some(IngredientFreshness::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::CookingTechnique => {
                self.cooking_technique = Some(CookingTechnique::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::Cleanliness => {
                self.cleanliness = Some(Cleanliness::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::ValueForMoney => {
                self.value_for_money = Some(ValueForMoney::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::WouldRecommend => {
                self.would_recommend = Some(WouldRecommend::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::FinalThoughts => {
                self.final_thoughts = Some(FinalThoughts::from_id(id).ok_or_else(unknown)?)
            }
            StepKey::InitialInfo | StepKey::Photos => {
                return Err(TransitionError::NotAChoiceStep { step: key.as_str() });
            }
        }
        Ok(())
    }

    fn has_choice(&self, key: StepKey) -> bool {
        match key {
            StepKey::OverallRating => self.overall_rating.is_some(),
            StepKey::RestaurantStyle => self.restaurant_style.is_some(),
            StepKey::Ambiance => self.ambiance.is_some(),
            StepKey::ServiceEfficiency => self.service_efficiency.is_some(),
            StepKey::ServiceAttitude => self.service_attitude.is_some(),
            StepKey::StaffKnowledge => self.staff_knowledge.is_some(),
            StepKey::MainDishFlavor => self.main_dish_flavor.is_some(),
            StepKey::MainDishTexture => self.main_dish_texture.is_some(),
            StepKey::DishPortion => self.dish_portion.is_some(),
            StepKey::SideDishQuality => self.side_dish_quality.is_some(),
            StepKey::BeverageQuality => self.beverage_quality.is_some(),
            StepKey::DessertQuality => self.dessert_quality.is_some(),
            StepKey::IngredientFreshness => self.ingredient_freshness.is_some(),
            StepKey::CookingTechnique => self.cooking_technique.is_some(),
            StepKey::Cleanliness => self.cleanliness.is_some(),
            StepKey::ValueForMoney => self.value_for_money.is_some(),
            StepKey::WouldRecommend => self.would_recommend.is_some(),
            StepKey::FinalThoughts => self.final_thoughts.is_some(),
            StepKey::InitialInfo | StepKey::Photos => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    RestaurantName,
    DishName,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Step(usize),
    Preview,
}

// The wizard proper: one state per catalog index plus Preview. The saved-
// review browser is a side view handled by the CLI, not a wizard state.
#[derive(Debug, Clone)]
pub struct WizardSession {
    stage: Stage,
    selections: SelectionState,
    images: Vec<String>,
}

impl Default for WizardSession {
    fn default() -> Self {
        WizardSession::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        WizardSession {
            stage: Stage::Step(0),
            selections: SelectionState::default(),
            images: Vec::new(),
        }
    }

    // Re-enter a session from a stored draft or a review being edited.
    pub fn resume(selections: SelectionState, images: Vec<String>, step_index: usize) -> Self {
        WizardSession {
            stage: Stage::Step(step_index.min(catalog::step_count() - 1)),
            selections,
            images,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn selections(&self) -> &SelectionState {
        &self.selections
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.stage {
            Stage::Step(i) => Some(i),
            Stage::Preview => None,
        }
    }

    fn current_step(&self) -> Result<(usize, &'static catalog::QuestionStep), TransitionError> {
        match self.stage {
            Stage::Step(i) => Ok((i, catalog::step_at(i).unwrap_or(&catalog::STEPS[0]))),
            Stage::Preview => Err(TransitionError::AtPreview),
        }
    }

    // Records a choice and auto-advances. Revisited steps overwrite the
    // earlier selection for the same key.
    pub fn choose(&mut self, key: StepKey, option_id: &str) -> Result<Stage, TransitionError> {
        let (index, step) = self.current_step()?;
        if step.kind != StepKind::Choice {
            return Err(TransitionError::NotAChoiceStep {
                step: step.key.as_str(),
            });
        }
        if step.key != key {
            return Err(TransitionError::StepMismatch {
                current: step.key.as_str(),
                requested: key.as_str(),
            });
        }
        self.selections.record(key, option_id)?;
        self.stage = if index + 1 < catalog::step_count() {
            Stage::Step(index + 1)
        } else {
            Stage::Preview
        };
        Ok(self.stage)
    }

    // Text fields do not auto-advance; the info step holds several of them.
    pub fn submit_text(&mut self, field: TextField, value: &str) -> Result<(), TransitionError> {
        let (_, step) = self.current_step()?;
        if step.kind != StepKind::FreeText {
            return Err(TransitionError::NotATextStep {
                step: step.key.as_str(),
            });
        }
        let trimmed = value.trim();
        let stored = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        match field {
            TextField::RestaurantName => self.selections.restaurant_name = stored,
            TextField::DishName => self.selections.dish_name = stored,
            TextField::Price => self.selections.price = stored,
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Stage, TransitionError> {
        let (index, step) = self.current_step()?;
        match step.kind {
            StepKind::FreeText => {
                if self.selections.restaurant_name.is_none() {
                    return Err(TransitionError::MissingRequired {
                        field: "restaurant name",
                    });
                }
                if self.selections.dish_name.is_none() {
                    return Err(TransitionError::MissingRequired { field: "dish name" });
                }
            }
            StepKind::Choice => {
                if !self.selections.has_choice(step.key) {
                    return Err(TransitionError::MissingSelection {
                        step: step.key.as_str(),
                    });
                }
            }
            StepKind::Upload => {}
        }
        self.stage = if index + 1 < catalog::step_count() {
            Stage::Step(index + 1)
        } else {
            Stage::Preview
        };
        Ok(self.stage)
    }

    // Saturates at step 0; from Preview it re-enters the wizard at the
    // final catalog step.
    pub fn retreat(&mut self) -> Stage {
        self.stage = match self.stage {
            Stage::Step(i) => Stage::Step(i.saturating_sub(1)),
            Stage::Preview => Stage::Step(catalog::step_count() - 1),
        };
        self.stage
    }

    pub fn restart(&mut self) {
        self.selections = SelectionState::default();
        self.images.clear();
        self.stage = Stage::Step(0);
    }

    pub fn attach_image(&mut self, stored_ref: String) {
        self.images.push(stored_ref);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }
}
