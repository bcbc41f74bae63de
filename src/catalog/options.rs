use crate::catalog::Card;
use serde::{Deserialize, Serialize};

// Each choice step carries a closed set of six options. The string ids are
// the wire/persistence form; inside the crate only the enums circulate.
macro_rules! choice_options {
    (
        $name:ident {
            $($variant:ident => ($id:literal, $label:literal, $desc:literal)),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $id)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub const CARDS: &'static [Card] = &[
                $(Card { id: $id, label: $label, description: $desc },)+
            ];

            pub fn id(self) -> &'static str {
                match self { $($name::$variant => $id,)+ }
            }

            pub fn label(self) -> &'static str {
                match self { $($name::$variant => $label,)+ }
            }

            pub fn description(self) -> &'static str {
                match self { $($name::$variant => $desc,)+ }
            }

            pub fn from_id(id: &str) -> Option<$name> {
                match id { $($id => Some($name::$variant),)+ _ => None }
            }
        }
    };
}

choice_options!(OverallRating {
    OneStar => ("1star", "1 star", "Dreadful, hard to accept"),
    TwoStars => ("2stars", "2 stars", "Unsatisfying, plenty of room to improve"),
    ThreeStars => ("3stars", "3 stars", "Middle of the road, no surprises and no real problems"),
    FourStars => ("4stars", "4 stars", "Very good, worth recommending"),
    FiveStars => ("5stars", "5 stars", "Flawless, as good as it gets"),
    HalfStarBonus => ("halfstar", "Extra half star", "Hard to call, rounding up"),
});

impl OverallRating {
    pub fn stars(self) -> f32 {
        match self {
            OverallRating::OneStar => 1.0,
            OverallRating::TwoStars => 2.0,
            OverallRating::ThreeStars => 3.0,
            OverallRating::FourStars => 4.0,
            OverallRating::FiveStars => 5.0,
            OverallRating::HalfStarBonus => 3.5,
        }
    }
}

choice_options!(RestaurantStyle {
    FineDining => ("fineDining", "Fine dining", "Refined food, service and setting"),
    CasualEatery => ("casualEatery", "Casual eatery", "Relaxed, everyday dining"),
    BistroCafe => ("bistroCafe", "Bistro / cafe", "Comfortable spot for a small gathering"),
    ThemeRestaurant => ("themeRestaurant", "Theme restaurant", "A distinctive experience and atmosphere"),
    FastFood => ("fastFood", "Fast food", "Quick, convenient, affordable"),
    StreetFood => ("streetFood", "Street food", "Local flavor, part of daily life"),
});

choice_options!(Ambiance {
    CozyQuiet => ("cozyQuiet", "Cozy and quiet", "Easy to relax and talk softly"),
    LivelyBustling => ("livelyBustling", "Lively and bustling", "Full of energy and laughter"),
    ElegantLuxurious => ("elegantLuxurious", "Elegant and luxurious", "Polished decor, refined tone"),
    ModernMinimalist => ("modernMinimalist", "Modern and minimalist", "Strong design sense, clean lines"),
    RusticCharming => ("rusticCharming", "Rustic and charming", "Natural, unpretentious, warm"),
    IndustrialChic => ("industrialChic", "Industrial chic", "Raw, distinctive, full of character"),
});

choice_options!(ServiceEfficiency {
    VeryEfficient => ("veryEfficient", "Lightning fast", "Responsive, no waiting at all"),
    Efficient => ("efficient", "Efficient enough", "Kept up, no obvious delays"),
    AverageEfficiency => ("averageEfficiency", "Average", "Occasional waits, still acceptable"),
    SlowInefficient => ("slowInefficient", "Slow", "Long waits, needed reminders"),
    UnacceptableSlow => ("unacceptableSlow", "Unacceptable", "Excessive waiting spoiled the meal"),
    BeyondExpectation => ("beyondExpectation", "Beyond expectation", "Startling efficiency, a step ahead"),
});

choice_options!(ServiceAttitude {
    ExtremelyPolite => ("extremelyPolite", "Warm and courteous", "All smiles, attentive throughout"),
    ProfessionalAttitude => ("professionalAttitude", "Professional", "Well trained, handled everything properly"),
    AverageAttitude => ("averageAttitude", "Nothing special", "Went through the motions"),
    RudeIndifferent => ("rudeIndifferent", "Cold or rude", "Left a sour impression"),
    OverlyEnthusiastic => ("overlyEnthusiastic", "Overly enthusiastic", "Friendly but a little intrusive"),
    CalmComposed => ("calmComposed", "Calm and reserved", "Quiet but attentive to detail"),
});

choice_options!(StaffKnowledge {
    VeryKnowledgeable => ("veryKnowledgeable", "Very knowledgeable", "Explained dishes in depth, offered advice"),
    SomewhatKnowledgeable => ("somewhatKnowledgeable", "Adequate", "Could answer the basics"),
    LacksKnowledge => ("lacksKnowledge", "Not well informed", "Struggled to give useful answers"),
    HighlyRecommendExpert => ("highlyRecommendExpert", "Expert recommendations", "Suggested pairings like a pro"),
    JustMenuItemReader => ("justMenuItemReader", "Just reads the menu", "Knew little beyond the card"),
    NoKnowledgeNeeded => ("noKnowledgeNeeded", "Didn't need it", "Never asked, not a factor"),
});

choice_options!(MainDishFlavor {
    ExcellentFlavor => ("excellentFlavor", "Astonishing", "Layered, delicious, unforgettable"),
    GoodFlavor => ("goodFlavor", "Tasty", "Satisfying, well seasoned"),
    AverageFlavor => ("averageFlavor", "Bland", "Nothing distinctive about it"),
    PoorFlavor => ("poorFlavor", "Off", "Hard to finish, clear flaws"),
    UniqueFlavor => ("uniqueFlavor", "One of a kind", "A flavor I'd never met before"),
    ClassicPerfect => ("classicPerfect", "Classic done perfectly", "A traditional taste at its best"),
});

choice_options!(MainDishTexture {
    PerfectTexture => ("perfectTexture", "Perfect texture", "Crisp, tender or springy exactly where it should be"),
    GoodTexture => ("goodTexture", "Good texture", "As expected, nothing off"),
    AverageTexture => ("averageTexture", "Unremarkable", "Nothing stood out, slightly lacking"),
    PoorTexture => ("poorTexture", "Poor texture", "Dry, greasy or gluey"),
    UnexpectedTexture => ("unexpectedTexture", "Surprising texture", "An unexpected feel that was fun to eat"),
    ChewyPerfect => ("chewyPerfect", "Perfectly springy", "Soft yet bouncy, great to chew"),
});

choice_options!(DishPortion {
    GenerousPortion => ("generousPortion", "Generous", "Filling, great bang for the buck"),
    JustRightPortion => ("justRightPortion", "Just right", "Enough without waste"),
    SmallPortion => ("smallPortion", "On the small side", "Might need to order more"),
    OverwhelmingPortion => ("overwhelmingPortion", "Huge", "Too much to finish, take-home territory"),
    TastingMenuSize => ("tastingMenuSize", "Tasting-size", "A refined bite, made for sampling"),
    FamilyStyle => ("familyStyle", "Made for sharing", "Sized for a table, not a plate"),
});

choice_options!(SideDishQuality {
    ExcellentSides => ("excellentSides", "Above and beyond", "The supporting cast shone too"),
    GoodSides => ("goodSides", "Well matched", "Rounded out the meal nicely"),
    AverageSides => ("averageSides", "Middle of the road", "No highlights, no missteps"),
    PoorSides => ("poorSides", "An afterthought", "Sloppy enough to drag things down"),
    CreativeSides => ("creativeSides", "Creative", "Broke with tradition in a good way"),
    ComplementarySides => ("complementarySides", "Perfect complement", "Set off the main dish beautifully"),
});

choice_options!(BeverageQuality {
    ExcellentBeverage => ("excellentBeverage", "Outstanding", "The house pour or coffee amazed"),
    GoodBeverage => ("goodBeverage", "Good", "Easy to drink, did its job"),
    AverageBeverage => ("averageBeverage", "Average", "Neither here nor there"),
    NoBeverage => ("noBeverage", "Didn't order any", "Skipped the drinks"),
    SignatureBeverage => ("signatureBeverage", "House signature", "A recipe you only get here"),
    DisappointingBeverage => ("disappointingBeverage", "Disappointing", "Off flavor or quality problems"),
});

choice_options!(DessertQuality {
    ExcellentDessert => ("excellentDessert", "The perfect finish", "Closed the meal beautifully"),
    GoodDessert => ("goodDessert", "Good", "Right sweetness, pleasant texture"),
    AverageDessert => ("averageDessert", "Ordinary", "Nothing to write about"),
    NoDessert => ("noDessert", "Didn't order any", "Skipped dessert"),
    InnovativeDessert => ("innovativeDessert", "Inventive", "Strong design, novel flavor"),
    OverlySweet => ("overlySweet", "Cloyingly sweet", "Too much sugar, tired of it fast"),
});

choice_options!(IngredientFreshness {
    TopFresh => ("topFresh", "Impeccably fresh", "You can taste the ingredients themselves"),
    Fresh => ("fresh", "Fresh", "Solid quality produce"),
    AverageFreshness => ("averageFreshness", "Average", "Some ingredients fell short"),
    PoorFreshness => ("poorFreshness", "Questionable", "Doubts about the quality"),
    LocalOrganic => ("localOrganic", "Local and organic", "Provenance front and center"),
    SeasonalHighlight => ("seasonalHighlight", "Seasonal showcase", "Made the most of what's in season"),
});

choice_options!(CookingTechnique {
    MasterfulTechnique => ("masterfulTechnique", "Masterful", "Heat and seasoning without a fault"),
    SkilledTechnique => ("skilledTechnique", "Skilled", "Cooked properly, let the food speak"),
    AverageTechnique => ("averageTechnique", "Passable", "Some dishes missed their mark"),
    PoorTechnique => ("poorTechnique", "Rough", "Over, under, or unbalanced"),
    InnovativeTechnique => ("innovativeTechnique", "Innovative", "Unusual methods, used well"),
    AuthenticTraditional => ("authenticTraditional", "Authentically traditional", "Faithful to the original flavors"),
});

choice_options!(Cleanliness {
    SpotlessClean => ("spotlessClean", "Spotless", "Reassuringly clean everywhere"),
    GenerallyClean => ("generallyClean", "Generally tidy", "Clean where it counts"),
    AverageCleanliness => ("averageCleanliness", "Needs work", "Visible mess in places"),
    PristineBathrooms => ("pristineBathrooms", "Even the bathrooms shine", "The details were looked after"),
    TablewareCleanliness => ("tablewareCleanliness", "Gleaming tableware", "Cutlery and glasses without a smudge"),
    StickyTables => ("stickyTables", "Sticky tables", "Cleaning clearly behind schedule"),
});

choice_options!(ValueForMoney {
    ExcellentValue => ("excellentValue", "A steal", "Priced low for startling quality"),
    GoodValue => ("goodValue", "Good value", "Price matched the quality"),
    AverageValue => ("averageValue", "So-so", "A bit dear for what arrived"),
    PoorValue => ("poorValue", "Overpriced", "The bill outran the experience"),
    LuxuryJustified => ("luxuryJustified", "Expensive but worth it", "High price, matching experience"),
    OverpricedExperience => ("overpricedExperience", "Not worth the bill", "Reputation outruns the plate"),
});

choice_options!(WouldRecommend {
    DefinitelyRecommend => ("definitelyRecommend", "Highly recommended", "A must-visit, worth the trip"),
    MightRecommend => ("mightRecommend", "Would recommend", "A solid choice, worth considering"),
    NeutralRecommend => ("neutralRecommend", "Depends", "Only for the right occasion"),
    NotRecommend => ("notRecommend", "Wouldn't recommend", "Better options exist"),
    ExclusiveRecommendation => ("exclusiveRecommendation", "For a select few", "Only for friends with particular taste"),
    AvoidAtAllCosts => ("avoidAtAllCosts", "Steer clear", "Save yourself the visit"),
});

choice_options!(FinalThoughts {
    MemorableExperience => ("memorableExperience", "A memorable visit", "Something to keep thinking about"),
    StandardExperience => ("standardExperience", "A routine visit", "Met expectations, no highlights"),
    MinorIssue => ("minorIssue", "A few hiccups", "Small flaws, nothing fatal"),
    MajorProblem => ("majorProblem", "A serious problem", "Something truly soured the meal"),
    NoSpecialThoughts => ("noSpecialThoughts", "Nothing in particular", "It was all perfectly normal"),
    EagerToReturn => ("eagerToReturn", "Can't wait to go back", "Left wanting another round"),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_id() {
        for rating in OverallRating::ALL {
            assert_eq!(OverallRating::from_id(rating.id()), Some(*rating));
        }
        for style in RestaurantStyle::ALL {
            assert_eq!(RestaurantStyle::from_id(style.id()), Some(*style));
        }
        assert_eq!(RestaurantStyle::from_id("driveThru"), None);
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&OverallRating::FiveStars).unwrap();
        assert_eq!(json, "\"5stars\"");
        let back: OverallRating = serde_json::from_str("\"halfstar\"").unwrap();
        assert_eq!(back, OverallRating::HalfStarBonus);
    }

    #[test]
    fn rating_star_weights() {
        assert_eq!(OverallRating::OneStar.stars(), 1.0);
        assert_eq!(OverallRating::HalfStarBonus.stars(), 3.5);
    }

    #[test]
    fn every_choice_step_has_six_cards() {
        assert_eq!(OverallRating::CARDS.len(), 6);
        assert_eq!(RestaurantStyle::CARDS.len(), 6);
        assert_eq!(FinalThoughts::CARDS.len(), 6);
    }
}
