use crate::catalog::options::{OverallRating, RestaurantStyle};
use crate::compose::template::{Template, TemplateError};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("template for {bucket}/{style} is malformed: {source}")]
    Invalid {
        bucket: &'static str,
        style: &'static str,
        source: TemplateError,
    },
}

type RawEntry = (OverallRating, Option<RestaurantStyle>, &'static str);

// Read-only once constructed. A later entry for the same (bucket, style)
// key overrides an earlier one.
#[derive(Debug)]
pub struct TemplateBank {
    entries: BTreeMap<(OverallRating, Option<RestaurantStyle>), Template>,
    global: Template,
}

impl TemplateBank {
    pub fn builtin() -> Result<TemplateBank, BankError> {
        TemplateBank::from_entries(BUILTIN, GLOBAL_DEFAULT)
    }

    // The global default is a constructor argument, not an entry: a bank
    // without one cannot be built, so the lookup chain below is total.
    pub fn from_entries(entries: &[RawEntry], global: &str) -> Result<TemplateBank, BankError> {
        let global = Template::parse(global).map_err(|source| BankError::Invalid {
            bucket: "global",
            style: "default",
            source,
        })?;
        let mut parsed = BTreeMap::new();
        for &(bucket, style, raw) in entries {
            let template = Template::parse(raw).map_err(|source| BankError::Invalid {
                bucket: bucket.id(),
                style: style.map_or("default", RestaurantStyle::id),
                source,
            })?;
            parsed.insert((bucket, style), template);
        }
        Ok(TemplateBank {
            entries: parsed,
            global,
        })
    }

    pub fn get(&self, bucket: OverallRating, style: RestaurantStyle) -> Option<&Template> {
        self.entries.get(&(bucket, Some(style)))
    }

    pub fn get_default(&self, bucket: OverallRating) -> Option<&Template> {
        self.entries.get(&(bucket, None))
    }

    pub fn global_default(&self) -> &Template {
        &self.global
    }

    // bucket+style -> bucket default -> global default. Total by construction.
    pub fn resolve(
        &self,
        bucket: Option<OverallRating>,
        style: Option<RestaurantStyle>,
    ) -> &Template {
        if let Some(bucket) = bucket {
            if let Some(style) = style
                && let Some(template) = self.get(bucket, style)
            {
                return template;
            }
            if let Some(template) = self.get_default(bucket) {
                return template;
            }
        }
        &self.global
    }
}

const GLOBAL_DEFAULT: &str = "A meal at {restaurantName} that left me with \
    [plenty to think about|a clear impression]. The {dishName} set the tone for the visit.";

const BUILTIN: &[RawEntry] = &[
    // -- five stars --------------------------------------------------------
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::FineDining),
        "{restaurantName} is a true temple for the palate. From the moment you step inside, the \
         [elegant decor|luxurious styling|warm glow of the room] signals something special. The staff \
         are [professional and precise|warm and attentive], and their command of the [menu|wine list] \
         made the whole evening [effortless|feel like a privilege].\n\nThe signature {dishName} was \
         [astonishing|flawless from first bite to last], with [pristine ingredients|masterful technique] \
         on full display. Even the [sides|dessert|drinks] held the same standard, fitting together \
         seamlessly.\n\nThe price runs [a little high|true to its ambitions], but set against \
         [unmatched quality|an evening this memorable] it is [money well spent|an indulgence worth \
         having]. Wholeheartedly recommended to anyone chasing [top-flight cooking|a proper \
         celebration].",
    ),
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::CasualEatery),
        "Goodness. The {dishName} at {restaurantName} is [pure delight|a flavor bomb]! The place \
         itself is [plainly furnished|loud and busy], but the cooking is the kind that [keeps you \
         coming back|wins you over in one bite].\n\nService stays [friendly without hovering|polite \
         even at full tilt], and the kitchen is [surprisingly quick|steadily reliable] even at \
         [peak hours|the weekend rush].\n\nThe {dishName} arrives [in a generous pile|without \
         skimping], [seasoned just right|smelling fantastic], and the ingredients [taste fresh|are \
         clearly handled with care]. Value for money is [off the charts|almost hard to believe] - \
         the obvious pick for [an everyday meal|anyone eating on a budget]. Heartily recommended!",
    ),
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::BistroCafe),
        "{restaurantName} is a [genuinely characterful|wonderfully relaxed] little spot. It blends \
         [ease and polish|coffee and proper cooking] into [an ideal place to pause|a fine place to \
         meet], and the service lands [exactly where it should|without ever intruding].\n\nI ordered \
         the {dishName}: [mellow and warming|sturdy and satisfying], lovely alongside [a rich \
         coffee|one of the house drinks]. Dessert [was a quiet triumph|came as a pleasant surprise] \
         and rounded the visit off properly.\n\nPrices feel [entirely fair|about right for the \
         experience], and I [will be back|will be sending friends].",
    ),
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::ThemeRestaurant),
        "Walking into {restaurantName} is like [crossing into another world|starting a small \
         adventure] - the [theming|staging] grabs you immediately. This is not just a meal, it is \
         [an immersive show|a treat for the eyes and the plate at once].\n\nService [slows a touch \
         when the room fills|stays in character without losing competence], and the staff work hard \
         to keep [the illusion|guests] [intact|entertained].\n\nThe {dishName} is [a visual \
         stunner|built with real imagination] and tastes [better than it has any right to|well \
         beyond expectation], proof that a theme house can still cook.\n\nIt costs [a bit more than \
         an ordinary dinner|what you would guess], but for [the sheer novelty|how carefully the \
         details are done] it earns every cent. Perfect for anyone [chasing something new|who wants \
         dinner to be an event].",
    ),
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::FastFood),
        "{restaurantName} is [fast-food done right|the efficient choice that still delivers]! \
         Counter service or not, the {dishName} is [unexpectedly good|reliably excellent], the \
         portion [plentiful|exactly right] - the [obvious stop|easy answer] when [time is \
         short|you want zero fuss].\n\nThe room is [clean and bright|simple and comfortable], the \
         crew [quick-handed|unfailingly friendly], and the whole visit runs [smooth and \
         efficient|light and easy]. The [fried chicken|burgers|fries] are [mandatory ordering|the \
         thing I crave later].\n\nAt {price} the value is [outstanding|hard to argue with]; for \
         anyone after [speed and thrift|simple food done well] it deserves [a try|regular \
         visits].",
    ),
    (
        OverallRating::FiveStars,
        Some(RestaurantStyle::StreetFood),
        "This stall is [a buried treasure|a genuine find]! {restaurantName} has [no decor to speak \
         of|nothing fancy about it], but the [honest local flavor|irresistible smell] of the \
         {dishName} [stays with you|calls you back], everything street food [should be|exists to \
         be].\n\nThe owner [greets everyone like a regular|works with practiced hands], and the \
         cooking happens [clean and quick|right in front of you], so the wait is [part of the \
         show|never dull].\n\nThe {dishName} comes [straight off the heat|made to order], \
         [texture spot on|layered with flavor], clearly [honest ingredients|made with pride].\n\n\
         At {price} it is [absurdly cheap|generous for the money]; value [without rival|through the \
         roof]. [Stop if you pass by|Seek it out] - this is [the real local taste|a hidden gem].",
    ),
    (
        OverallRating::FiveStars,
        None,
        "{restaurantName} was simply superb. Setting, service and - above all - the food added up to \
         [a meal to remember|complete satisfaction]. The {dishName} in particular won me over \
         entirely.",
    ),
    // -- four stars --------------------------------------------------------
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::FineDining),
        "Enjoyed [a thoroughly pleasant dinner|a satisfying lunch] at {restaurantName}. The room is \
         [tastefully done|comfortable and composed], with [a genuine sense of occasion|a relaxing \
         air]. Staff were [professional and reasonably brisk|courteous and friendly], knew the menu \
         [well enough|in real detail], and despite [small lapses|minor rough edges] the service \
         came off [rather well|deserving of praise].\n\nThe {dishName} was [excellent|pleasing in \
         texture], the ingredients [fresh|handled with obvious skill]. The [sides|dessert|drinks] \
         [held their own|had their moments], and portions sat [just right|on the refined side].\n\n\
         Value is [reasonable|a touch steep]; still [a worthwhile meal|somewhere I would return \
         to]. Recommended for anyone [who takes food seriously|planning a proper night out].",
    ),
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::CasualEatery),
        "{restaurantName} is [a good pick|worth a look]. The [easy-going room|no-frills setting] \
         puts you at ease, and service is [quick enough|perfectly agreeable], with [food arriving \
         promptly|staff taking things in stride].\n\nThe {dishName} they are known for is \
         [genuinely tasty|distinctive], portions [sensible|generous], ingredients [fresh enough|\
         cooked with care]. The [sides|snacks] [do their part|add some fun].\n\nPrices are [very \
         fair|easy on the wallet] - a fine spot for [family dinners|catching up with friends]. \
         I would point [anyone after relaxed, tasty food|the budget-minded] this way.",
    ),
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::BistroCafe),
        "{restaurantName} is a [bookish, easy-going|made-for-lingering] cafe, well suited to \
         [an idle afternoon|a small get-together]. The mood is [lovely|soft-lit and calm], and \
         service is [warm without the fine-dining ceremony|attentive without hovering].\n\nDrinks \
         are [full-flavored|nicely textured], and the {dishName} is [carefully made|not overly \
         sweet]; the kitchen [runs above cafe standard|quietly exceeds expectations].\n\nGood \
         [value|reason to linger]; I would send [anyone needing to unwind|coffee-and-a-bite \
         people] here.",
    ),
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::ThemeRestaurant),
        "The concept at {restaurantName} is [great fun|genuinely imaginative], and it makes the \
         meal [full of small surprises|unlike the usual night out]. The room is [carefully \
         dressed|dense with detail], with real [atmosphere|playfulness] - good for [family \
         outings|a date]. Staff [lean into the theme|keep the interaction lively], which keeps \
         things [cheerful|easy].\n\nThe food [serves the concept|shows real effort], and the \
         {dishName} [looks terrific|tastes better than it needs to], with portions [adequate|\
         enough to fill you].\n\nThe cooking alone is not the whole story, but the [setting|fun \
         of the thing] makes the price [feel justified|worth paying]. [I would go again|Worth \
         telling people about].",
    ),
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::FastFood),
        "{restaurantName} is [quick and painless|exactly what fast food promises]. The {dishName} \
         is [better than it needs to be|consistent visit to visit], the portion [fair|filling], \
         and the whole stop [smooth|cheap and cheerful].\n\nThe room stays [tidy|bright], the \
         crew [move fast|stay pleasant], and at {price} there is [little to complain about|real \
         value]. A [dependable|sensible] choice when [the clock is against you|you just want \
         feeding].",
    ),
    (
        OverallRating::FourStars,
        Some(RestaurantStyle::StreetFood),
        "{restaurantName} serves [proper local flavor|street food worth the detour]. The stall is \
         [bare-bones|nothing to look at], but the {dishName} is [fresh off the heat|full of \
         character] and the price at {price} [stays friendly|is honest].\n\nThe owner [knows the \
         trade|keeps the line moving], and you [eat well|leave satisfied] for very little. [Worth \
         a stop|Easy to recommend] whenever you pass.",
    ),
    (
        OverallRating::FourStars,
        None,
        "{restaurantName} delivered [a very good meal|plenty to like]. A few details could \
         sharpen, but the {dishName} [carried the visit|made the trip worth it] and I left \
         [content|planning a return].",
    ),
    // -- three stars -------------------------------------------------------
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::FineDining),
        "A decent meal at {restaurantName}; service and kitchen both stayed [within acceptable \
         bounds|on the right side of fine].\n\nNothing dazzled, and nothing went notably wrong. \
         Workable for diners [with standards but no illusions|who want a safe pair of hands].",
    ),
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::CasualEatery),
        "A pretty good outing at {restaurantName}, well suited to [family meals|an easy night with \
         friends].\n\nThe room is comfortable and the staff friendly. The {dishName} tasted \
         [solid|fine], and nobody left unhappy.",
    ),
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::BistroCafe),
        "{restaurantName} is a fair choice, especially for [light-bites-and-coffee people|a low-key \
         afternoon].\n\nDrinks and snacks hold a [respectable|steady] standard and the service is \
         in place when you need it. A reasonable spot to [let an hour go by|reset].",
    ),
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::ThemeRestaurant),
        "The theming at {restaurantName} is [plainly a labor of love|carried through the whole \
         room], and the menu plays along.\n\nThe {dishName} [looks the part|is put together with \
         some wit] and tastes fine; just do not expect the kitchen to outshine the set dressing.",
    ),
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::FastFood),
        "For a quick bite, {restaurantName} does the job.\n\nFast food, yes, but the ingredients \
         taste fresh and the {dishName} is [quick and satisfying|fine for the price]. Handy for \
         [office workers|students] on a tight schedule.",
    ),
    (
        OverallRating::ThreeStars,
        Some(RestaurantStyle::StreetFood),
        "The stall at {restaurantName} serves [honest local flavor|the real neighborhood taste].\n\n\
         The {dishName} is tasty, and the bare surroundings [do nothing to spoil it|are part of \
         the deal].",
    ),
    (
        OverallRating::ThreeStars,
        None,
        "{restaurantName} was thoroughly middle-of-the-road - no surprises, no real complaints.",
    ),
    // -- two stars ---------------------------------------------------------
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::FineDining),
        "The meal at {restaurantName} left me [somewhat disappointed|wanting more than I got]. The \
         room is [elegant|beautifully finished], but service and kitchen both fell short of the \
         setting.\n\nStaff were [pleasant|friendly] enough, yet at peak hours the floor turned \
         [visibly frantic|slow to respond].\n\nThe {dishName} arrived [prettily plated|looking the \
         part] but tasted [flat|forgettable].\n\nNot a bad evening, just [an unremarkable \
         one|below what the prices promise]; diners chasing real quality should [look \
         further|weigh other options].",
    ),
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::CasualEatery),
        "{restaurantName} is [passable for an everyday meal|okay if expectations stay modest].\n\n\
         The room is [clean|comfortable] and the staff [polite|friendly]. The {dishName} came out \
         [without much delay|at a fair pace] and tasted [about right for the price|fine if \
         unmemorable].\n\nNothing here astonishes, but in this price range it [holds up|is an \
         acceptable fallback].",
    ),
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::BistroCafe),
        "{restaurantName} is an adequate little place for [a casual drink|an unhurried chat].\n\n\
         The mood is pleasant and the staff willing; the drinks and small plates [do their \
         job|pass muster] without leaving much impression.",
    ),
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::ThemeRestaurant),
        "{restaurantName} offers a [novel|carefully staged] experience, and the decor shows real \
         effort.\n\nThe trouble is the food: with so much energy spent on the theme, the \
         {dishName} tasted [like an afterthought|noticeably compromised].",
    ),
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::FastFood),
        "{restaurantName} works as [a fast stop|an emergency meal], and the {dishName} is \
         [served quickly|at least consistent].\n\nBeyond speed there is little to remember it by.",
    ),
    (
        OverallRating::TwoStars,
        Some(RestaurantStyle::StreetFood),
        "The {dishName} at {restaurantName} carries [some genuine local character|a taste of the \
         neighborhood], though [the execution wobbles|quality seems to drift] from visit to \
         visit.\n\nCheap enough to forgive, not good enough to seek out.",
    ),
    (
        OverallRating::TwoStars,
        None,
        "{restaurantName} was [serviceable and no more|a meal I will not think about again] - \
         neither a surprise nor a catastrophe, but hard to praise.",
    ),
    // -- one star ----------------------------------------------------------
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::FineDining),
        "{restaurantName} trades on [its setting|white tablecloths] and delivers [very little \
         else|remarkably little]. Service was [distracted|cold], the pacing [glacial|chaotic], and \
         for a room this formal that is [inexcusable|hard to forgive].\n\nThe {dishName} - the \
         supposed signature - arrived [lukewarm|carelessly assembled] and tasted [of almost \
         nothing|plainly off]. At these prices the kitchen [owes diners far better|has no \
         excuses].\n\nI left [annoyed at the bill|regretting the booking] and will not return.",
    ),
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::CasualEatery),
        "A [frustrating|thoroughly disappointing] meal at {restaurantName}. The room was \
         [untidy|noisy and neglected], service [indifferent|absent for long stretches], and the \
         {dishName} [limp and under-seasoned|nothing like its billing].\n\nEven at casual-eatery \
         prices this [fails the basics|is not worth the stop].",
    ),
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::BistroCafe),
        "{restaurantName} looks the part and [squanders it|stops there]. The coffee was \
         [burnt|stale], the {dishName} [tired|clearly not made today], and the staff [too busy to \
         care|impossible to flag down].\n\nPlenty of better corners in town to [sit with a \
         drink|spend an afternoon].",
    ),
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::ThemeRestaurant),
        "All set, no show at {restaurantName}: the theme is [loud|everywhere] and the cooking \
         [an afterthought|genuinely poor]. The {dishName} [photographs better than it eats|was \
         cold before it reached the table].\n\nThe premium you pay for the staging buys [no \
         flavor at all|a meal below food-court standard]. Skip it.",
    ),
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::FastFood),
        "Even by fast-food standards {restaurantName} [missed badly|disappoints]. The wait was \
         [long|longer than any sit-down meal], the counter [disorganized|short-staffed], and the \
         {dishName} [stale|barely warm].\n\nSpeed and price are the whole pitch here, and \
         [neither held up|both failed]. Not worth the queue.",
    ),
    (
        OverallRating::OneStar,
        Some(RestaurantStyle::StreetFood),
        "I wanted to like this stall, but the {dishName} at {restaurantName} was [greasy and \
         tired|sitting out far too long], and the [hygiene|state of the stand] [did not inspire \
         confidence|made me uneasy].\n\nStreet food lives on freshness, and that was [exactly \
         what was missing|nowhere to be found].",
    ),
    (
        OverallRating::OneStar,
        None,
        "{restaurantName} got [almost nothing right|very little right]. The {dishName} was the \
         low point of [a meal best forgotten|an evening I want back].",
    ),
    // -- half-star bonus: resolves through the bucket default only ---------
    (
        OverallRating::HalfStarBonus,
        None,
        "Hard to score {restaurantName} cleanly, so it earns [the extra half star|a nudge \
         upward] for effort. The {dishName} shows [what the kitchen could be|real promise], even \
         if the visit [did not fully come together|left some doubts].",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_parses() {
        TemplateBank::builtin().unwrap();
    }

    #[test]
    fn every_rating_and_style_pair_resolves() {
        let bank = TemplateBank::builtin().unwrap();
        for rating in OverallRating::ALL {
            for style in RestaurantStyle::ALL {
                // Never "no text": the chain must bottom out somewhere.
                let _ = bank.resolve(Some(*rating), Some(*style));
            }
            assert!(
                bank.get_default(*rating).is_some(),
                "bucket {} has no default entry",
                rating.id()
            );
        }
    }

    #[test]
    fn half_star_falls_back_to_its_bucket_default() {
        let bank = TemplateBank::builtin().unwrap();
        assert!(bank.get(OverallRating::HalfStarBonus, RestaurantStyle::FastFood).is_none());
        let resolved = bank.resolve(
            Some(OverallRating::HalfStarBonus),
            Some(RestaurantStyle::FastFood),
        );
        assert_eq!(
            Some(resolved),
            bank.get_default(OverallRating::HalfStarBonus)
        );
    }

    #[test]
    fn missing_bucket_uses_global_default() {
        let bank = TemplateBank::builtin().unwrap();
        let resolved = bank.resolve(None, Some(RestaurantStyle::FineDining));
        assert_eq!(resolved, bank.global_default());
    }

    #[test]
    fn later_entries_override_earlier_ones() {
        let entries: &[RawEntry] = &[
            (OverallRating::ThreeStars, None, "first"),
            (OverallRating::ThreeStars, None, "second"),
        ];
        let bank = TemplateBank::from_entries(entries, "global").unwrap();
        let resolved = bank.resolve(Some(OverallRating::ThreeStars), None);
        assert_eq!(Some(resolved), bank.get_default(OverallRating::ThreeStars));
        assert_eq!(resolved, &Template::parse("second").unwrap());
    }

    #[test]
    fn malformed_entry_is_rejected_at_load() {
        let entries: &[RawEntry] = &[(
            OverallRating::OneStar,
            Some(RestaurantStyle::FastFood),
            "broken [group",
        )];
        let err = TemplateBank::from_entries(entries, "global").unwrap_err();
        assert!(format!("{err}").contains("1star/fastFood"));
    }
}
