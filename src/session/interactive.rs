use crate::catalog::{self, StepKind};
use crate::compose::{ComposedReview, TemplateBank};
use crate::config::AppConfig;
use crate::logging::{SessionEvent, ndjson};
use crate::media::ImagePipeline;
use crate::session::{Stage, TextField, WizardSession};
use crate::store::{self, Persistence};
use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub images_dir: PathBuf,
    pub log: Option<PathBuf>,
    pub seed: Option<u64>,
    pub discard_draft: bool,
    pub edit_id: Option<String>,
}

pub fn run_wizard(cfg: &AppConfig, store: &dyn Persistence, opts: &WizardOptions) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    drive(stdin.lock(), stdout.lock(), cfg, store, opts)
}

fn log_event(opts: &WizardOptions, ev: SessionEvent) {
    if let Some(path) = &opts.log {
        let _ = ndjson::mirror_event(path, &ev);
    }
}

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn human_bytes(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

// A draft save never aborts the wizard; in-memory state survives a failing
// store and the user just sees the warning.
fn save_draft_best_effort<W: Write>(
    out: &mut W,
    store: &dyn Persistence,
    session: &WizardSession,
    opts: &WizardOptions,
) {
    if session.selections().is_empty() && session.images().is_empty() {
        return;
    }
    let index = session
        .current_index()
        .unwrap_or(catalog::step_count() - 1);
    let record = store::draft_record(session.selections(), session.images(), index);
    match store.save_draft(&record) {
        Ok(()) => log_event(opts, SessionEvent::new("draft_saved", None, json!({"step": index}))),
        Err(err) => {
            let _ = writeln!(out, "warning: could not save draft: {err:#}");
        }
    }
}

fn clear_draft_best_effort<W: Write>(out: &mut W, store: &dyn Persistence) {
    if let Err(err) = store.clear_draft() {
        let _ = writeln!(out, "warning: could not clear draft: {err:#}");
    }
}

fn open_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    store: &dyn Persistence,
    opts: &WizardOptions,
) -> Result<(WizardSession, Option<ComposedReview>)> {
    if let Some(id) = &opts.edit_id {
        let review = store
            .get_review(id)?
            .ok_or_else(|| anyhow!("no saved review with id {id}"))?;
        let session = WizardSession::resume(
            review.selections.clone(),
            review.images.clone(),
            catalog::step_count() - 1,
        );
        writeln!(out, "Editing review of {} from {}.", review.restaurant_name, review.created_at)?;
        return Ok((session, Some(review)));
    }

    if opts.discard_draft {
        clear_draft_best_effort(out, store);
        return Ok((WizardSession::new(), None));
    }

    match store.load_draft() {
        Ok(Some(draft)) => {
            if draft.catalog_fingerprint != catalog::fingerprint() {
                writeln!(out, "Found a draft from an older question set; discarding it.")?;
                clear_draft_best_effort(out, store);
                return Ok((WizardSession::new(), None));
            }
            if draft.selections.is_empty() && draft.images.is_empty() {
                return Ok((WizardSession::new(), None));
            }
            let answer = read_line(input, out, "An unfinished draft exists. Resume it? [y/N] ")?;
            if matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")) {
                let session =
                    WizardSession::resume(draft.selections, draft.images, draft.step_index);
                return Ok((session, None));
            }
            clear_draft_best_effort(out, store);
            Ok((WizardSession::new(), None))
        }
        Ok(None) => Ok((WizardSession::new(), None)),
        Err(err) => {
            writeln!(out, "warning: could not read draft: {err:#}")?;
            Ok((WizardSession::new(), None))
        }
    }
}

pub fn drive<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    cfg: &AppConfig,
    store: &dyn Persistence,
    opts: &WizardOptions,
) -> Result<()> {
    let bank = TemplateBank::builtin().context("load built-in template bank")?;
    let mut rng: StdRng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut pipeline = ImagePipeline::new(&opts.images_dir, cfg.images.max_width, cfg.images.quality)?;

    if let Ok(usage) = store.usage_estimate() {
        let quota = store.quota();
        let status = match store::classify_usage(usage, quota) {
            store::StorageStatus::Normal => "normal",
            store::StorageStatus::Warning => "getting full",
            store::StorageStatus::Critical => "nearly full",
        };
        writeln!(
            out,
            "Storage: {} of {} used ({status}).",
            human_bytes(usage),
            human_bytes(quota)
        )?;
    }

    let (mut session, mut editing) = open_session(&mut input, &mut out, store, opts)?;
    let mut review: Option<ComposedReview> = None;
    let autosave_interval = Duration::from_secs(cfg.autosave.interval_secs);
    let mut last_save = Instant::now();

    loop {
        // Photo jobs land whenever they finish, in completion order.
        for (source, outcome) in pipeline.drain() {
            match outcome {
                Ok(stored) => {
                    writeln!(out, "Attached {} as {stored}.", source.display())?;
                    log_event(opts, SessionEvent::new("image_attached", None, json!({"ref": stored})));
                    session.attach_image(stored);
                }
                Err(err) => {
                    writeln!(out, "warning: skipped {}: {err}", source.display())?;
                    log_event(
                        opts,
                        SessionEvent::new(
                            "image_failed",
                            None,
                            json!({"path": source.display().to_string()}),
                        ),
                    );
                }
            }
        }

        if last_save.elapsed() >= autosave_interval {
            save_draft_best_effort(&mut out, store, &session, opts);
            last_save = Instant::now();
        }

        match session.stage() {
            Stage::Step(index) => {
                let step = match catalog::step_at(index) {
                    Some(step) => step,
                    None => return Err(anyhow!("wizard reached step {index} out of range")),
                };
                match step.kind {
                    StepKind::FreeText => {
                        writeln!(out, "\n[{}/{}] {}", index + 1, catalog::step_count(), step.prompt)?;
                        let fields = [
                            ("Restaurant name", TextField::RestaurantName, session.selections().restaurant_name.clone()),
                            ("Signature dish", TextField::DishName, session.selections().dish_name.clone()),
                            ("Price paid (optional)", TextField::Price, session.selections().price.clone()),
                        ];
                        for (label, field, current) in fields {
                            let prompt = match &current {
                                Some(value) => format!("{label} [{value}]: "),
                                None => format!("{label}: "),
                            };
                            let Some(line) = read_line(&mut input, &mut out, &prompt)? else {
                                save_draft_best_effort(&mut out, store, &session, opts);
                                return Ok(());
                            };
                            if !line.is_empty() {
                                session.submit_text(field, &line)?;
                            }
                        }
                        match session.advance() {
                            Ok(_) => {
                                log_event(opts, SessionEvent::new("step_answered", Some(step.key.as_str()), json!({})));
                                save_draft_best_effort(&mut out, store, &session, opts);
                                last_save = Instant::now();
                            }
                            Err(err) => writeln!(out, "{err}")?,
                        }
                    }
                    StepKind::Choice => {
                        let cards = step.key.cards().unwrap_or(&[]);
                        writeln!(out, "\n[{}/{}] {}", index + 1, catalog::step_count(), step.prompt)?;
                        for (i, card) in cards.iter().enumerate() {
                            writeln!(out, "  {}. {} - {}", i + 1, card.label, card.description)?;
                        }
                        let Some(line) = read_line(
                            &mut input,
                            &mut out,
                            "Pick a number ('b' back, 'r' restart, 'q' save and quit): ",
                        )? else {
                            save_draft_best_effort(&mut out, store, &session, opts);
                            return Ok(());
                        };
                        match line.as_str() {
                            "b" => {
                                session.retreat();
                            }
                            "r" => {
                                session.restart();
                                editing = None;
                                review = None;
                                clear_draft_best_effort(&mut out, store);
                                log_event(opts, SessionEvent::new("wizard_restarted", None, json!({})));
                            }
                            "q" => {
                                save_draft_best_effort(&mut out, store, &session, opts);
                                return Ok(());
                            }
                            other => match other.parse::<usize>() {
                                Ok(n) if (1..=cards.len()).contains(&n) => {
                                    let id = cards[n - 1].id;
                                    session.choose(step.key, id)?;
                                    log_event(
                                        opts,
                                        SessionEvent::new("step_answered", Some(step.key.as_str()), json!({"option": id})),
                                    );
                                    save_draft_best_effort(&mut out, store, &session, opts);
                                    last_save = Instant::now();
                                }
                                _ => writeln!(out, "Unrecognized input '{other}'.")?,
                            },
                        }
                    }
                    StepKind::Upload => {
                        writeln!(out, "\n[{}/{}] {}", index + 1, catalog::step_count(), step.prompt)?;
                        if !session.images().is_empty() {
                            writeln!(out, "Attached so far:")?;
                            for (i, image) in session.images().iter().enumerate() {
                                writeln!(out, "  {}. {image}", i + 1)?;
                            }
                        }
                        if pipeline.pending() > 0 {
                            writeln!(out, "({} photo(s) still processing)", pipeline.pending())?;
                        }
                        let Some(line) = read_line(
                            &mut input,
                            &mut out,
                            "Photo path to attach ('rm N' remove, 'b' back, 'done' compose, 'q' save and quit): ",
                        )? else {
                            save_draft_best_effort(&mut out, store, &session, opts);
                            return Ok(());
                        };
                        match line.as_str() {
                            "" => {}
                            "b" => {
                                session.retreat();
                            }
                            "q" => {
                                save_draft_best_effort(&mut out, store, &session, opts);
                                return Ok(());
                            }
                            "done" => {
                                for (source, outcome) in pipeline.finish() {
                                    match outcome {
                                        Ok(stored) => {
                                            log_event(opts, SessionEvent::new("image_attached", None, json!({"ref": stored})));
                                            session.attach_image(stored);
                                        }
                                        Err(err) => {
                                            writeln!(out, "warning: skipped {}: {err}", source.display())?;
                                        }
                                    }
                                }
                                session.advance()?;
                                review = None;
                            }
                            removal if removal.starts_with("rm ") => {
                                match removal[3..].trim().parse::<usize>() {
                                    Ok(n) if n >= 1 => match session.remove_image(n - 1) {
                                        Some(removed) => {
                                            let _ = std::fs::remove_file(opts.images_dir.join(&removed));
                                            writeln!(out, "Removed {removed}.")?;
                                        }
                                        None => writeln!(out, "No photo at position {n}.")?,
                                    },
                                    _ => writeln!(out, "Usage: rm N")?,
                                }
                            }
                            path => {
                                pipeline.submit(PathBuf::from(path));
                                writeln!(out, "Processing {path} in the background.")?;
                            }
                        }
                    }
                }
            }
            Stage::Preview => {
                match review.as_mut() {
                    Some(existing) => {
                        existing.recompose(session.selections(), session.images(), &bank, &mut rng);
                    }
                    None => {
                        let composed = match editing.as_mut() {
                            Some(original) => {
                                original.recompose(session.selections(), session.images(), &bank, &mut rng);
                                original.clone()
                            }
                            None => ComposedReview::new(session.selections(), session.images(), &bank, &mut rng),
                        };
                        log_event(opts, SessionEvent::new("review_composed", None, json!({"id": composed.id})));
                        review = Some(composed);
                    }
                }

                if let Some(current) = review.as_ref() {
                    writeln!(out, "\n----- {} -----", current.restaurant_name)?;
                    if let Some(rating) = current.selections.overall_rating {
                        writeln!(out, "({:.1} stars)", rating.stars())?;
                    }
                    writeln!(out, "{}\n", current.body)?;
                    if !current.images.is_empty() {
                        writeln!(out, "({} photo(s) attached)", current.images.len())?;
                    }
                }
                let Some(line) = read_line(
                    &mut input,
                    &mut out,
                    "(s)ave, (a)nother rendering, (b)ack, (r)estart, (q)uit: ",
                )? else {
                    save_draft_best_effort(&mut out, store, &session, opts);
                    return Ok(());
                };
                match line.as_str() {
                    "s" => {
                        if let Some(r) = review.as_ref() {
                            match store.upsert_review(r) {
                                Ok(()) => {
                                    clear_draft_best_effort(&mut out, store);
                                    log_event(opts, SessionEvent::new("review_saved", None, json!({"id": r.id})));
                                    writeln!(out, "Saved review {}.", r.id)?;
                                    return Ok(());
                                }
                                // The rendered text stays in memory; saving can retry.
                                Err(err) => writeln!(out, "warning: review not saved: {err:#}")?,
                            }
                        }
                    }
                    "a" => {
                        // Keep id and created_at, redraw every random group.
                    }
                    "b" => {
                        session.retreat();
                    }
                    "r" => {
                        session.restart();
                        editing = None;
                        review = None;
                        clear_draft_best_effort(&mut out, store);
                        log_event(opts, SessionEvent::new("wizard_restarted", None, json!({})));
                    }
                    "q" => {
                        save_draft_best_effort(&mut out, store, &session, opts);
                        return Ok(());
                    }
                    other => writeln!(out, "Unrecognized input '{other}'.")?,
                }
            }
        }
    }
}
