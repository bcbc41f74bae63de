use crate::catalog::options::*;
use crate::session::SelectionState;

// Secondary commentary: each cluster maps its answers through a fixed
// table and yields at most one paragraph. Options with nothing worth
// saying map to None and the cluster is skipped when every clause is.

fn efficiency_clause(value: ServiceEfficiency) -> Option<&'static str> {
    match value {
        ServiceEfficiency::VeryEfficient => Some("service was strikingly quick"),
        ServiceEfficiency::SlowInefficient | ServiceEfficiency::UnacceptableSlow => {
            Some("the pace of service dragged")
        }
        ServiceEfficiency::Efficient
        | ServiceEfficiency::AverageEfficiency
        | ServiceEfficiency::BeyondExpectation => None,
    }
}

fn attitude_clause(value: ServiceAttitude) -> Option<&'static str> {
    match value {
        ServiceAttitude::ExtremelyPolite | ServiceAttitude::ProfessionalAttitude => {
            Some("the staff were warm and courteous")
        }
        ServiceAttitude::RudeIndifferent => Some("the attitude on the floor felt cold"),
        ServiceAttitude::AverageAttitude
        | ServiceAttitude::OverlyEnthusiastic
        | ServiceAttitude::CalmComposed => None,
    }
}

fn knowledge_clause(value: StaffKnowledge) -> Option<&'static str> {
    match value {
        StaffKnowledge::VeryKnowledgeable | StaffKnowledge::HighlyRecommendExpert => {
            Some("they knew the menu inside out")
        }
        StaffKnowledge::LacksKnowledge | StaffKnowledge::JustMenuItemReader => {
            Some("they knew little about what they were serving")
        }
        StaffKnowledge::SomewhatKnowledgeable | StaffKnowledge::NoKnowledgeNeeded => None,
    }
}

fn flavor_clause(value: MainDishFlavor, dish: &str) -> Option<String> {
    match value {
        MainDishFlavor::ExcellentFlavor
        | MainDishFlavor::UniqueFlavor
        | MainDishFlavor::ClassicPerfect => {
            Some(format!("the flavor of the {dish} was beyond reproach"))
        }
        MainDishFlavor::AverageFlavor | MainDishFlavor::PoorFlavor => {
            Some(format!("the {dish} tasted flat and could use work"))
        }
        MainDishFlavor::GoodFlavor => None,
    }
}

fn texture_clause(value: MainDishTexture, dish: &str) -> Option<String> {
    match value {
        MainDishTexture::PerfectTexture
        | MainDishTexture::GoodTexture
        | MainDishTexture::UnexpectedTexture
        | MainDishTexture::ChewyPerfect => Some(format!("the texture of the {dish} was spot on")),
        MainDishTexture::PoorTexture => Some(format!("the texture of the {dish} missed the mark")),
        MainDishTexture::AverageTexture => None,
    }
}

fn portion_clause(value: DishPortion) -> Option<&'static str> {
    match value {
        DishPortion::GenerousPortion
        | DishPortion::OverwhelmingPortion
        | DishPortion::FamilyStyle => Some("portions were more than generous"),
        DishPortion::SmallPortion | DishPortion::TastingMenuSize => {
            Some("portions ran small and might leave you hungry")
        }
        DishPortion::JustRightPortion => None,
    }
}

fn sides_clause(value: SideDishQuality) -> Option<&'static str> {
    match value {
        SideDishQuality::ExcellentSides
        | SideDishQuality::CreativeSides
        | SideDishQuality::ComplementarySides => Some("even the sides held a high standard"),
        SideDishQuality::PoorSides => Some("the sides fell short and dragged things down"),
        SideDishQuality::GoodSides | SideDishQuality::AverageSides => None,
    }
}

fn beverage_clause(value: BeverageQuality) -> Option<&'static str> {
    match value {
        BeverageQuality::ExcellentBeverage | BeverageQuality::SignatureBeverage => {
            Some("the drinks were a real highlight")
        }
        BeverageQuality::DisappointingBeverage => Some("the drinks were a letdown"),
        BeverageQuality::GoodBeverage => Some("the drinks were solid"),
        BeverageQuality::AverageBeverage => Some("the drinks were unremarkable"),
        BeverageQuality::NoBeverage => None,
    }
}

fn dessert_clause(value: DessertQuality) -> Option<&'static str> {
    match value {
        DessertQuality::ExcellentDessert | DessertQuality::InnovativeDessert => {
            Some("dessert closed the meal perfectly")
        }
        DessertQuality::OverlySweet => Some("dessert was cloyingly sweet"),
        DessertQuality::GoodDessert => Some("dessert did its job nicely"),
        DessertQuality::AverageDessert => Some("dessert was ordinary"),
        DessertQuality::NoDessert => None,
    }
}

fn freshness_clause(value: IngredientFreshness) -> Option<&'static str> {
    match value {
        IngredientFreshness::TopFresh
        | IngredientFreshness::LocalOrganic
        | IngredientFreshness::SeasonalHighlight => {
            Some("the ingredients were strikingly fresh, true to their own taste")
        }
        IngredientFreshness::PoorFreshness => {
            Some("the ingredients raised some doubts about freshness")
        }
        IngredientFreshness::Fresh | IngredientFreshness::AverageFreshness => None,
    }
}

fn technique_clause(value: CookingTechnique) -> Option<&'static str> {
    match value {
        CookingTechnique::MasterfulTechnique
        | CookingTechnique::InnovativeTechnique
        | CookingTechnique::AuthenticTraditional => {
            Some("the cooking showed a master's hand")
        }
        CookingTechnique::PoorTechnique => Some("the cooking felt rough and hurt the result"),
        CookingTechnique::SkilledTechnique | CookingTechnique::AverageTechnique => None,
    }
}

fn cleanliness_paragraph(value: Cleanliness) -> Option<String> {
    match value {
        Cleanliness::SpotlessClean | Cleanliness::PristineBathrooms
        | Cleanliness::TablewareCleanliness => Some(format!(
            "As for the room itself: {}, which made the meal an easy one to relax into.",
            match value {
                Cleanliness::SpotlessClean => "spotless throughout",
                Cleanliness::PristineBathrooms => "clean down to the bathrooms",
                _ => "the tableware gleamed",
            }
        )),
        Cleanliness::AverageCleanliness | Cleanliness::StickyTables => Some(format!(
            "On the other hand, the state of the room - {} - needs attention.",
            match value {
                Cleanliness::AverageCleanliness => "visible mess in places",
                _ => "sticky tables",
            }
        )),
        Cleanliness::GenerallyClean => None,
    }
}

fn value_paragraph(value: ValueForMoney) -> Option<&'static str> {
    match value {
        ValueForMoney::ExcellentValue => {
            Some("For what it costs, the meal over-delivers - a genuine bargain.")
        }
        ValueForMoney::GoodValue => Some("The bill lined up fairly with what reached the table."),
        ValueForMoney::LuxuryJustified => {
            Some("It is not cheap, but the experience earns its price.")
        }
        ValueForMoney::PoorValue | ValueForMoney::OverpricedExperience => {
            Some("The bill outran the experience; value for money is not the draw here.")
        }
        ValueForMoney::AverageValue => None,
    }
}

fn final_thoughts_paragraph(value: FinalThoughts) -> Option<&'static str> {
    match value {
        FinalThoughts::MemorableExperience => {
            Some("All told, this was a visit worth remembering.")
        }
        FinalThoughts::StandardExperience => {
            Some("All told, a routine visit that met expectations and stopped there.")
        }
        FinalThoughts::MinorIssue => {
            Some("All told, a good visit with a few hiccups along the way.")
        }
        FinalThoughts::MajorProblem => {
            Some("All told, one serious problem cast a shadow over the whole meal.")
        }
        FinalThoughts::EagerToReturn => {
            Some("All told, I left already planning the next visit.")
        }
        FinalThoughts::NoSpecialThoughts => None,
    }
}

fn recommendation_line(value: WouldRecommend) -> &'static str {
    match value {
        WouldRecommend::DefinitelyRecommend => "Highly recommended!",
        WouldRecommend::MightRecommend => "Worth a recommendation!",
        WouldRecommend::NeutralRecommend => "Recommended - in the right circumstances!",
        WouldRecommend::NotRecommend => "Not one I would recommend!",
        WouldRecommend::ExclusiveRecommendation => {
            "A recommendation reserved for a few friends with the right taste!"
        }
        WouldRecommend::AvoidAtAllCosts => "Steer clear of this one!",
    }
}

// Paragraph order is fixed: service, food, room, value, closing thoughts,
// then the recommendation as the final line.
pub fn paragraphs(selections: &SelectionState, dish: &str) -> Vec<String> {
    let mut out = Vec::new();

    let service: Vec<&str> = [
        selections.service_efficiency.and_then(efficiency_clause),
        selections.service_attitude.and_then(attitude_clause),
        selections.staff_knowledge.and_then(knowledge_clause),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !service.is_empty() {
        out.push(format!("On the service side, {}.", service.join(", ")));
    }

    let food: Vec<String> = [
        selections.main_dish_flavor.and_then(|v| flavor_clause(v, dish)),
        selections.main_dish_texture.and_then(|v| texture_clause(v, dish)),
        selections.dish_portion.and_then(|v| portion_clause(v).map(str::to_string)),
        selections.side_dish_quality.and_then(|v| sides_clause(v).map(str::to_string)),
        selections.beverage_quality.and_then(|v| beverage_clause(v).map(str::to_string)),
        selections.dessert_quality.and_then(|v| dessert_clause(v).map(str::to_string)),
        selections
            .ingredient_freshness
            .and_then(|v| freshness_clause(v).map(str::to_string)),
        selections
            .cooking_technique
            .and_then(|v| technique_clause(v).map(str::to_string)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !food.is_empty() {
        out.push(format!("On the food, {}.", food.join(", ")));
    }

    if let Some(paragraph) = selections.cleanliness.and_then(cleanliness_paragraph) {
        out.push(paragraph);
    }
    if let Some(paragraph) = selections.value_for_money.and_then(value_paragraph) {
        out.push(paragraph.to_string());
    }
    if let Some(paragraph) = selections.final_thoughts.and_then(final_thoughts_paragraph) {
        out.push(paragraph.to_string());
    }
    if let Some(recommend) = selections.would_recommend {
        out.push(recommendation_line(recommend).to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selections_produce_no_paragraphs() {
        assert!(paragraphs(&SelectionState::default(), "this dish").is_empty());
    }

    #[test]
    fn service_clauses_join_into_one_paragraph() {
        let mut state = SelectionState::default();
        state.service_efficiency = Some(ServiceEfficiency::VeryEfficient);
        state.service_attitude = Some(ServiceAttitude::ExtremelyPolite);
        state.staff_knowledge = Some(StaffKnowledge::VeryKnowledgeable);
        let out = paragraphs(&state, "burger");
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("On the service side, "));
        assert!(out[0].contains("strikingly quick"));
        assert!(out[0].contains("warm and courteous"));
        assert!(out[0].contains("menu inside out"));
    }

    #[test]
    fn no_comment_options_are_skipped() {
        let mut state = SelectionState::default();
        state.service_efficiency = Some(ServiceEfficiency::AverageEfficiency);
        state.beverage_quality = Some(BeverageQuality::NoBeverage);
        state.dessert_quality = Some(DessertQuality::NoDessert);
        state.final_thoughts = Some(FinalThoughts::NoSpecialThoughts);
        state.cleanliness = Some(Cleanliness::GenerallyClean);
        assert!(paragraphs(&state, "burger").is_empty());
    }

    #[test]
    fn dish_name_flows_into_food_clauses() {
        let mut state = SelectionState::default();
        state.main_dish_flavor = Some(MainDishFlavor::ExcellentFlavor);
        let out = paragraphs(&state, "beef noodles");
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("beef noodles"));
    }

    #[test]
    fn recommendation_is_always_last() {
        let mut state = SelectionState::default();
        state.would_recommend = Some(WouldRecommend::AvoidAtAllCosts);
        state.value_for_money = Some(ValueForMoney::PoorValue);
        state.cleanliness = Some(Cleanliness::StickyTables);
        let out = paragraphs(&state, "burger");
        assert_eq!(out.last().map(String::as_str), Some("Steer clear of this one!"));
    }
}
