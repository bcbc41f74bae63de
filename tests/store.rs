use bitewrite::catalog;
use bitewrite::catalog::options::{OverallRating, RestaurantStyle};
use bitewrite::compose::{ComposedReview, TemplateBank};
use bitewrite::session::SelectionState;
use bitewrite::store::{DraftRecord, Persistence, ReviewStore, draft_record};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

fn open_store(dir: &std::path::Path) -> ReviewStore {
    ReviewStore::open(&dir.join("reviews.db"), 5 * 1024 * 1024).unwrap()
}

fn selections(name: &str, rating: OverallRating) -> SelectionState {
    let mut state = SelectionState::default();
    state.restaurant_name = Some(name.to_string());
    state.dish_name = Some("Burger".to_string());
    state.overall_rating = Some(rating);
    state.restaurant_style = Some(RestaurantStyle::CasualEatery);
    state
}

fn composed(name: &str, rating: OverallRating, seed: u64) -> ComposedReview {
    let bank = TemplateBank::builtin().unwrap();
    ComposedReview::new(
        &selections(name, rating),
        &[],
        &bank,
        &mut StdRng::seed_from_u64(seed),
    )
}

#[test]
fn draft_slot_round_trips_and_clears() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    assert!(store.load_draft().unwrap().is_none());

    let draft = draft_record(
        &selections("Joe's Diner", OverallRating::FourStars),
        &["a.jpg".to_string()],
        7,
    );
    store.save_draft(&draft).unwrap();

    let loaded = store.load_draft().unwrap().unwrap();
    assert_eq!(loaded.selections, draft.selections);
    assert_eq!(loaded.images, vec!["a.jpg".to_string()]);
    assert_eq!(loaded.step_index, 7);
    assert_eq!(loaded.catalog_fingerprint, catalog::fingerprint());

    store.clear_draft().unwrap();
    assert!(store.load_draft().unwrap().is_none());
}

#[test]
fn draft_slot_keeps_only_the_last_write() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    store
        .save_draft(&draft_record(
            &selections("First", OverallRating::OneStar),
            &[],
            1,
        ))
        .unwrap();
    store
        .save_draft(&draft_record(
            &selections("Second", OverallRating::TwoStars),
            &[],
            2,
        ))
        .unwrap();

    let loaded = store.load_draft().unwrap().unwrap();
    assert_eq!(loaded.selections.restaurant_name.as_deref(), Some("Second"));
    assert_eq!(loaded.step_index, 2);
}

#[test]
fn stale_fingerprints_are_visible_to_callers() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    let mut draft = draft_record(&selections("Joe's Diner", OverallRating::FourStars), &[], 3);
    draft.catalog_fingerprint = "deadbeef".to_string();
    store.save_draft(&draft).unwrap();

    let loaded = store.load_draft().unwrap().unwrap();
    assert_ne!(loaded.catalog_fingerprint, catalog::fingerprint());
}

#[test]
fn deleting_one_review_leaves_the_others_untouched() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    let a = composed("Alpha", OverallRating::ThreeStars, 1);
    let b = composed("Beta", OverallRating::FourStars, 2);
    let c = composed("Gamma", OverallRating::FiveStars, 3);
    for review in [&a, &b, &c] {
        store.upsert_review(review).unwrap();
    }

    assert!(store.delete_review(&b.id).unwrap());
    assert!(!store.delete_review(&b.id).unwrap());

    let remaining = store.list_reviews().unwrap();
    assert_eq!(remaining.len(), 2);
    let got_a = remaining.iter().find(|r| r.id == a.id).unwrap();
    assert_eq!(got_a.created_at, a.created_at);
    assert_eq!(got_a.body, a.body);
    let got_c = remaining.iter().find(|r| r.id == c.id).unwrap();
    assert_eq!(got_c.created_at, c.created_at);
    assert_eq!(got_c.body, c.body);
}

#[test]
fn editing_preserves_id_and_created_at_but_replaces_body() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let bank = TemplateBank::builtin().unwrap();

    let original = composed("Joe's Diner", OverallRating::FiveStars, 4);
    store.upsert_review(&original).unwrap();

    let mut edited = store.get_review(&original.id).unwrap().unwrap();
    edited.recompose(
        &selections("Joe's Diner", OverallRating::OneStar),
        &[],
        &bank,
        &mut StdRng::seed_from_u64(5),
    );
    store.upsert_review(&edited).unwrap();

    let reloaded = store.get_review(&original.id).unwrap().unwrap();
    assert_eq!(reloaded.id, original.id);
    assert_eq!(reloaded.created_at, original.created_at);
    assert_ne!(reloaded.body, original.body);
    assert_eq!(
        reloaded.selections.overall_rating,
        Some(OverallRating::OneStar)
    );
    assert_eq!(store.list_reviews().unwrap().len(), 1);
}

#[test]
fn reviews_round_trip_selections_and_images() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let bank = TemplateBank::builtin().unwrap();

    let state = selections("Joe's Diner", OverallRating::HalfStarBonus);
    let review = ComposedReview::new(
        &state,
        &["one.jpg".to_string(), "two.jpg".to_string()],
        &bank,
        &mut StdRng::seed_from_u64(6),
    );
    store.upsert_review(&review).unwrap();

    let reloaded = store.get_review(&review.id).unwrap().unwrap();
    assert_eq!(reloaded, review);
}

#[test]
fn usage_estimate_reports_nonzero_and_quota_passes_through() {
    let tmp = tempdir().unwrap();
    let store = ReviewStore::open(&tmp.path().join("reviews.db"), 1234).unwrap();
    assert!(store.usage_estimate().unwrap() > 0);
    assert_eq!(store.quota(), 1234);
}

#[test]
fn missing_review_is_none_not_an_error() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    assert!(store.get_review("no-such-id").unwrap().is_none());
    let _unused: Option<DraftRecord> = store.load_draft().unwrap();
}
