use bitewrite::catalog::{self, StepKind};
use bitewrite::compose::{ComposedReview, TemplateBank};
use bitewrite::config::AppConfig;
use bitewrite::session::interactive::{self, WizardOptions};
use bitewrite::session::{SelectionState, Stage, TextField, WizardSession};
use bitewrite::store::{Persistence, ReviewStore, draft_record};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

fn open_store(dir: &Path) -> ReviewStore {
    ReviewStore::open(&dir.join("reviews.db"), 5 * 1024 * 1024).unwrap()
}

fn wizard_opts(dir: &Path) -> WizardOptions {
    WizardOptions {
        images_dir: dir.join("images"),
        log: Some(dir.join("events.ndjson")),
        seed: Some(11),
        discard_draft: false,
        edit_id: None,
    }
}

fn drive_with(input: &str, store: &ReviewStore, opts: &WizardOptions) {
    let cfg = AppConfig::default();
    let mut output = Vec::new();
    interactive::drive(Cursor::new(input.to_string()), &mut output, &cfg, store, opts).unwrap();
}

// Walk the whole catalog in order through the state machine itself.
#[test]
fn full_walk_reaches_preview_with_every_step_answered() {
    let mut session = WizardSession::new();
    session
        .submit_text(TextField::RestaurantName, "Joe's Diner")
        .unwrap();
    session.submit_text(TextField::DishName, "Burger").unwrap();
    session.submit_text(TextField::Price, "$10").unwrap();
    session.advance().unwrap();

    while let Some(index) = session.current_index() {
        let step = catalog::step_at(index).unwrap();
        match step.kind {
            StepKind::Choice => {
                let card = &step.key.cards().unwrap()[2];
                session.choose(step.key, card.id).unwrap();
            }
            StepKind::Upload => {
                session.advance().unwrap();
            }
            StepKind::FreeText => unreachable!("info step already answered"),
        }
    }
    assert_eq!(session.stage(), Stage::Preview);

    let bank = TemplateBank::builtin().unwrap();
    let review = ComposedReview::new(
        session.selections(),
        session.images(),
        &bank,
        &mut StdRng::seed_from_u64(1),
    );
    assert!(review.body.contains("Joe's Diner"));
}

#[test]
fn scripted_interview_saves_a_review_and_clears_the_draft() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    let mut input = String::from("Joe's Diner\nBurger\n$10\n");
    for _ in 0..18 {
        input.push_str("1\n");
    }
    input.push_str("done\n");
    input.push_str("s\n");

    drive_with(&input, &store, &opts);

    let reviews = store.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].restaurant_name, "Joe's Diner");
    assert!(reviews[0].body.contains("Joe's Diner"));
    assert!(store.load_draft().unwrap().is_none());

    let log = std::fs::read_to_string(tmp.path().join("events.ndjson")).unwrap();
    assert!(log.contains("\"event\":\"review_saved\""));
    assert!(log.contains("\"event\":\"step_answered\""));
}

#[test]
fn quitting_mid_interview_leaves_a_resumable_draft() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    // Info step answered, then EOF at the rating step.
    drive_with("Joe's Diner\nBurger\n\n", &store, &opts);

    let draft = store.load_draft().unwrap().unwrap();
    assert_eq!(
        draft.selections.restaurant_name.as_deref(),
        Some("Joe's Diner")
    );
    assert_eq!(draft.step_index, 1);
    assert_eq!(draft.catalog_fingerprint, catalog::fingerprint());
}

#[test]
fn declining_the_draft_offer_clears_it() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    let mut selections = SelectionState::default();
    selections.restaurant_name = Some("Joe's Diner".to_string());
    selections.dish_name = Some("Burger".to_string());
    store
        .save_draft(&draft_record(&selections, &[], 1))
        .unwrap();

    // "n" declines; EOF then ends the fresh session.
    drive_with("n\n", &store, &opts);
    assert!(store.load_draft().unwrap().is_none());
}

#[test]
fn accepting_the_draft_offer_resumes_where_it_left_off() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    let mut selections = SelectionState::default();
    selections.restaurant_name = Some("Joe's Diner".to_string());
    selections.dish_name = Some("Burger".to_string());
    store
        .save_draft(&draft_record(&selections, &[], 1))
        .unwrap();

    // Resume at the rating step, answer the remaining 18 choices, compose, save.
    let mut input = String::from("y\n");
    for _ in 0..18 {
        input.push_str("2\n");
    }
    input.push_str("done\ns\n");
    drive_with(&input, &store, &opts);

    let reviews = store.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].restaurant_name, "Joe's Diner");
}

#[test]
fn stale_draft_from_an_older_catalog_is_discarded() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    let mut selections = SelectionState::default();
    selections.restaurant_name = Some("Joe's Diner".to_string());
    let mut draft = draft_record(&selections, &[], 5);
    draft.catalog_fingerprint = "deadbeef".to_string();
    store.save_draft(&draft).unwrap();

    // No resume prompt: the stale draft goes away and the session starts fresh.
    drive_with("", &store, &opts);
    assert!(store.load_draft().unwrap().is_none());
}

#[test]
fn restart_clears_the_stored_draft() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let opts = wizard_opts(tmp.path());

    // Answer the info step and one rating, then restart, then EOF.
    drive_with("Joe's Diner\nBurger\n\n1\nr\n", &store, &opts);
    assert!(store.load_draft().unwrap().is_none());
    assert!(store.list_reviews().unwrap().is_empty());
}

#[test]
fn editing_a_saved_review_keeps_id_and_created_at() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let bank = TemplateBank::builtin().unwrap();

    let mut selections = SelectionState::default();
    selections.restaurant_name = Some("Joe's Diner".to_string());
    selections.dish_name = Some("Burger".to_string());
    selections.overall_rating = Some(bitewrite::catalog::options::OverallRating::FourStars);
    selections.restaurant_style =
        Some(bitewrite::catalog::options::RestaurantStyle::CasualEatery);
    let review = ComposedReview::new(&selections, &[], &bank, &mut StdRng::seed_from_u64(3));
    store.upsert_review(&review).unwrap();

    let opts = WizardOptions {
        edit_id: Some(review.id.clone()),
        ..wizard_opts(tmp.path())
    };
    drive_with("done\ns\n", &store, &opts);

    let reviews = store.list_reviews().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, review.id);
    assert_eq!(reviews[0].created_at, review.created_at);
}
