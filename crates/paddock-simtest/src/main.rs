//! Paddock Headless Training Harness
//!
//! Validates the pure training rules against a stable roster without the
//! game client. Runs entirely in-process: no DB, no networking, no UI.
//!
//! Usage:
//!   cargo run -p paddock-simtest
//!   cargo run -p paddock-simtest -- --verbose
//!   cargo run -p paddock-simtest -- --rules rules.toml --roster stable.json --days 60

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use paddock_logic::config::{validate_rules, TrainingRules};
use paddock_logic::cooldown::{self, CooldownDisplay};
use paddock_logic::disciplines::{self, Discipline, DisciplineCategory};
use paddock_logic::eligibility::{
    count_by_state_with, evaluate_with, filter_by_state_with, EligibilityState, Horse,
};
use paddock_logic::history::{self, SortDirection, SortField, SortState, TrainingHistoryEntry};
use paddock_logic::modifiers::{self, TraitAnalysis, TraitModifier};
use paddock_logic::session::{self, TrainingRequest};
use paddock_logic::timestamp;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ── Sample stable (same JSON shape the game API exports) ───────────────
const SAMPLE_STABLE_JSON: &str = include_str!("../../../data/sample_stable.json");

#[derive(Debug, Parser)]
#[command(name = "paddock-simtest", about = "Validate Paddock training rules headlessly")]
struct Args {
    /// Print every check, not only failures.
    #[arg(short, long)]
    verbose: bool,

    /// TOML file overriding the default training rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Stable roster JSON (defaults to the bundled sample).
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Evaluation instant (RFC 3339); defaults to the roster's `now`.
    #[arg(long)]
    now: Option<String>,

    /// Days to simulate in the training season sweep.
    #[arg(long, default_value_t = 90)]
    days: u32,
}

#[derive(Debug, Deserialize)]
struct Stable {
    now: Option<DateTime<Utc>>,
    horses: Vec<Horse>,
    #[serde(default)]
    modifiers: Vec<TraitModifier>,
    #[serde(default)]
    history: Vec<TrainingHistoryEntry>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let rules = load_rules(args.rules.as_deref())?;
    let stable = load_stable(args.roster.as_deref())?;
    let now = match &args.now {
        Some(raw) => timestamp::parse_iso(raw).with_context(|| format!("invalid --now {raw:?}"))?,
        None => stable.now.unwrap_or_else(Utc::now),
    };

    println!("=== Paddock Training Harness ===\n");
    log::info!(
        "{} horses, {} modifiers, {} history entries, now={}",
        stable.horses.len(),
        stable.modifiers.len(),
        stable.history.len(),
        now
    );

    let mut results = Vec::new();

    // 1. Discipline catalog
    results.extend(validate_catalog(args.verbose));

    // 2. Training rules
    results.extend(validate_training_rules(&rules, args.verbose));

    // 3. Roster eligibility
    results.extend(validate_eligibility(&stable, &rules, now, args.verbose));

    // 4. Cooldown countdowns
    results.extend(validate_countdowns(&stable, now, args.verbose));

    // 5. Trait modifiers across the catalog
    results.extend(validate_modifiers(&stable, &rules, args.verbose));

    // 6. Training season simulation (needs consistent rules)
    if validate_rules(&rules).is_empty() {
        results.extend(validate_season(&stable, &rules, now, args.days, args.verbose));
    } else {
        log::warn!("skipping training season: rules are invalid");
    }

    // 7. History views
    results.extend(validate_history(&stable, &rules, args.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        bail!("{failed} checks failed");
    }
    Ok(())
}

fn load_rules(path: Option<&Path>) -> anyhow::Result<TrainingRules> {
    let Some(path) = path else {
        return Ok(TrainingRules::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules from {}", path.display()))?;
    let rules: TrainingRules =
        toml::from_str(&text).with_context(|| format!("parsing rules in {}", path.display()))?;
    log::info!("loaded rules from {}", path.display());
    Ok(rules)
}

fn load_stable(path: Option<&Path>) -> anyhow::Result<Stable> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading roster from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing roster in {}", path.display()))
        }
        None => serde_json::from_str(SAMPLE_STABLE_JSON).context("parsing bundled sample stable"),
    }
}

// ── 1. Discipline Catalog ───────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Discipline Catalog ---");
    let mut results = Vec::new();

    let all = disciplines::list_disciplines();
    results.push(check(
        "catalog_size",
        all.len() == 23,
        format!("{} disciplines", all.len()),
    ));

    let sizes: Vec<usize> = DisciplineCategory::all()
        .iter()
        .map(|&c| disciplines::count_in(c))
        .collect();
    results.push(check(
        "catalog_partition",
        sizes == [7, 6, 7, 3],
        format!("western/english/specialized/racing = {:?}", sizes),
    ));

    let unique_ids: HashSet<_> = all.iter().map(|d| d.id).collect();
    results.push(check(
        "catalog_unique_ids",
        unique_ids.len() == all.len(),
        format!("{} unique ids", unique_ids.len()),
    ));

    let names_match = Discipline::all()
        .iter()
        .all(|d| disciplines::display_name(d.id()) == d.name());
    results.push(check(
        "catalog_display_names",
        names_match,
        "every id resolves to its catalog name",
    ));

    let fallback = disciplines::display_name("mounted_archery");
    results.push(check(
        "catalog_humanized_fallback",
        fallback == "Mounted Archery",
        format!("mounted_archery -> {fallback}"),
    ));

    if verbose {
        for (category, members) in disciplines::grouped_by_category() {
            let names: Vec<_> = members.iter().map(|d| d.name).collect();
            println!("  {category}: {}", names.join(", "));
        }
    }

    results
}

// ── 2. Training Rules ───────────────────────────────────────────────────

fn validate_training_rules(rules: &TrainingRules, verbose: bool) -> Vec<TestResult> {
    println!("--- Training Rules ---");
    let errors = validate_rules(rules);
    if verbose {
        println!(
            "  ages {}..={}, cooldown {}d, base gain {}, page size {}, cap {}",
            rules.min_age,
            rules.max_age,
            rules.cooldown_days,
            rules.base_gain,
            rules.page_size,
            rules.caps.discipline_cap
        );
    }
    vec![check(
        "rules_valid",
        errors.is_empty(),
        if errors.is_empty() {
            "rules are consistent".to_string()
        } else {
            format!("{errors:?}")
        },
    )]
}

// ── 3. Eligibility ──────────────────────────────────────────────────────

fn validate_eligibility(
    stable: &Stable,
    rules: &TrainingRules,
    now: DateTime<Utc>,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Eligibility ---");
    let mut results = Vec::new();

    let counts = count_by_state_with(&stable.horses, now, rules);
    results.push(check(
        "eligibility_counts_cover_roster",
        counts.total() == stable.horses.len(),
        format!("{counts:?}"),
    ));

    let consistent = EligibilityState::all()
        .iter()
        .all(|&s| counts.get(s) == filter_by_state_with(&stable.horses, s, now, rules).len());
    results.push(check(
        "eligibility_filters_match_counts",
        consistent,
        "filter_by_state agrees with count_by_state",
    ));

    let age_first = stable.horses.iter().all(|h| {
        let state = evaluate_with(h, now, rules);
        match state {
            EligibilityState::TooYoung => h.age < rules.min_age,
            EligibilityState::TooOld => h.age > rules.max_age,
            EligibilityState::Cooldown => h.is_cooling_down(now),
            EligibilityState::Ready => !h.is_cooling_down(now),
        }
    });
    results.push(check(
        "eligibility_precedence",
        age_first,
        "age bounds checked before cooldown",
    ));

    let stable_again = stable
        .horses
        .iter()
        .all(|h| evaluate_with(h, now, rules) == evaluate_with(h, now, rules));
    results.push(check(
        "eligibility_idempotent",
        stable_again,
        "same inputs give the same state",
    ));

    let malformed: Vec<&Horse> = stable
        .horses
        .iter()
        .filter(|h| {
            h.training_cooldown
                .as_ref()
                .is_some_and(|c| c.resolve().is_err())
        })
        .collect();
    let ids: Vec<_> = malformed.iter().map(|h| h.id.as_str()).collect();
    results.push(check(
        "eligibility_malformed_cooldowns",
        malformed
            .iter()
            .all(|h| evaluate_with(h, now, rules) != EligibilityState::Cooldown),
        format!("{} treated as no cooldown: {:?}", ids.len(), ids),
    ));

    if verbose {
        for h in &stable.horses {
            println!(
                "  {:<8} {:<14} age {:>2} -> {}",
                h.id,
                h.name.as_deref().unwrap_or("-"),
                h.age,
                evaluate_with(h, now, rules)
            );
        }
    }

    results
}

// ── 4. Countdowns ───────────────────────────────────────────────────────

fn validate_countdowns(stable: &Stable, now: DateTime<Utc>, verbose: bool) -> Vec<TestResult> {
    println!("--- Cooldown Countdowns ---");
    let mut results = Vec::new();

    let sweep = [
        (Duration::zero(), "Ready to train"),
        (Duration::minutes(30), "30m remaining"),
        (Duration::minutes(135), "2h 15m remaining"),
        (Duration::days(1), "1 day"),
        (Duration::days(4), "4 days"),
    ];
    for (offset, expected) in sweep {
        let got = cooldown::format_remaining(now + offset, now).to_string();
        results.push(check(
            &format!("countdown_{}", expected.replace(' ', "_")),
            got == expected,
            format!("got {got:?}"),
        ));
    }

    let week = cooldown::format_remaining(now + Duration::days(7), now);
    results.push(check(
        "countdown_date_form",
        matches!(week, CooldownDisplay::Date(_)),
        format!("7 days -> {week}"),
    ));

    let consistent = stable.horses.iter().all(|h| {
        match cooldown::format_horse_cooldown(h, now) {
            Some(display) => display.is_ready() != h.is_cooling_down(now),
            None => !h.is_cooling_down(now),
        }
    });
    results.push(check(
        "countdown_matches_cooling",
        consistent,
        "countdown shows time left exactly when cooling down",
    ));

    if verbose {
        for h in &stable.horses {
            if let Some(display) = cooldown::format_horse_cooldown(h, now) {
                println!("  {:<8} {}", h.id, display);
            }
        }
    }

    results
}

// ── 5. Trait Modifiers ──────────────────────────────────────────────────

fn validate_modifiers(stable: &Stable, rules: &TrainingRules, verbose: bool) -> Vec<TestResult> {
    println!("--- Trait Modifiers ---");
    let mut results = Vec::new();

    let mut arithmetic_ok = true;
    let mut with_modifiers = 0;
    for d in Discipline::all() {
        let applied = modifiers::applicable_modifiers(d.id(), &stable.modifiers);
        let effect_sum: i32 = applied.iter().map(|m| m.effect).sum();
        let analysis = modifiers::analyze(rules.base_gain, applied.iter().copied());
        if analysis.net().total != rules.base_gain + effect_sum {
            arithmetic_ok = false;
        }
        if let TraitAnalysis::Modifiers { groups, net } = &analysis {
            with_modifiers += 1;
            if groups.len() != applied.len() {
                arithmetic_ok = false;
            }
            if verbose {
                println!(
                    "  {:<18} {} = {} (+{} / -{} / {} neutral)",
                    d.name(),
                    net.breakdown(),
                    net.total,
                    groups.positive.len(),
                    groups.negative.len(),
                    groups.neutral.len()
                );
            }
        }
    }
    results.push(check(
        "modifiers_net_arithmetic",
        arithmetic_ok,
        format!("{with_modifiers} disciplines with modifiers"),
    ));

    let empty = modifiers::analyze(rules.base_gain, &[]);
    let zero = [TraitModifier::new("even_tempered", "Even Tempered", 0).for_all()];
    let neutral = modifiers::analyze(rules.base_gain, &zero);
    results.push(check(
        "modifiers_empty_vs_neutral",
        !empty.has_modifiers() && neutral.has_modifiers() && neutral.is_neutral(),
        "no-modifier and all-neutral are distinguishable",
    ));

    let mut reversed = stable.modifiers.clone();
    reversed.reverse();
    let commutes = modifiers::net_effect(rules.base_gain, &stable.modifiers)
        == modifiers::net_effect(rules.base_gain, &reversed);
    results.push(check(
        "modifiers_order_independent",
        commutes,
        "net effect ignores modifier order",
    ));

    results
}

// ── 6. Training Season ──────────────────────────────────────────────────

fn validate_season(
    stable: &Stable,
    rules: &TrainingRules,
    start: DateTime<Utc>,
    days: u32,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Training Season ({days} days) ---");
    let mut results = Vec::new();

    let mut horses = stable.horses.clone();
    let mut season: Vec<TrainingHistoryEntry> = Vec::new();
    let mut sessions_per_horse = vec![0usize; horses.len()];
    let mut rejected_while_resting = 0;
    let mut arithmetic_ok = true;
    let mut cooldown_ok = true;

    for day in 0..days {
        let now = start + Duration::days(i64::from(day));
        for (i, horse) in horses.iter_mut().enumerate() {
            // Rotate through the catalog so every discipline sees sessions.
            let discipline = Discipline::all()[(i + day as usize) % Discipline::all().len()];
            let request = TrainingRequest::new(discipline.id());
            let verdict = session::check_eligibility(horse, discipline.id(), now, rules);

            match session::train(horse, &request, &stable.modifiers, now, rules) {
                Ok(out) => {
                    if !verdict.eligible {
                        cooldown_ok = false;
                    }
                    let entry = &out.entry;
                    if entry.new_score - entry.previous_score != entry.score_gain
                        || out.horse.score(discipline.id()) != out.new_score
                    {
                        arithmetic_ok = false;
                    }
                    if evaluate_with(&out.horse, now, rules) != EligibilityState::Cooldown {
                        cooldown_ok = false;
                    }
                    season.push(out.entry);
                    sessions_per_horse[i] += 1;
                    *horse = out.horse;
                }
                Err(err) => {
                    if verdict.eligible {
                        log::warn!("{} rejected despite eligible verdict: {}", horse.id, err);
                        cooldown_ok = false;
                    }
                    if verdict.state == Some(EligibilityState::Cooldown) {
                        rejected_while_resting += 1;
                    }
                }
            }
        }
    }

    let trainable = stable
        .horses
        .iter()
        .filter(|h| (rules.min_age..=rules.max_age).contains(&h.age))
        .count();
    results.push(check(
        "season_sessions_recorded",
        days == 0 || trainable == 0 || !season.is_empty(),
        format!(
            "{} sessions for {} trainable horses, {} rejected while resting",
            season.len(),
            trainable,
            rejected_while_resting
        ),
    ));
    results.push(check(
        "season_score_arithmetic",
        arithmetic_ok,
        "new - previous == gain, score written back",
    ));
    results.push(check(
        "season_cooldown_enforced",
        cooldown_ok,
        "sessions only when eligible, cooldown restarted after each",
    ));

    let max_per_horse = (days as usize).div_ceil(rules.cooldown_days.max(1) as usize);
    let spaced = sessions_per_horse.iter().all(|&n| n <= max_per_horse);
    results.push(check(
        "season_spacing",
        spaced,
        format!("at most {max_per_horse} sessions per horse"),
    ));

    if verbose {
        let summary = history::summarize(&season);
        for d in summary.disciplines.iter().take(5) {
            println!(
                "  {:<18} {} sessions, total {}",
                d.name,
                d.sessions,
                history::format_gain(d.total_gain)
            );
        }
    }

    results
}

// ── 7. History Views ────────────────────────────────────────────────────

fn validate_history(stable: &Stable, rules: &TrainingRules, verbose: bool) -> Vec<TestResult> {
    println!("--- History Views ---");
    let mut results = Vec::new();
    let entries = &stable.history;

    let gains_ok = entries
        .iter()
        .all(|e| e.new_score - e.previous_score == e.score_gain);
    results.push(check(
        "history_gain_consistent",
        gains_ok,
        format!("{} entries", entries.len()),
    ));

    let state = SortState::default().toggle(SortField::Date);
    let sorted = state.apply(entries);
    let newest_first = sorted.windows(2).all(|w| w[0].date >= w[1].date);
    results.push(check(
        "history_sort_date_desc",
        state.direction == SortDirection::Descending && newest_first,
        "second click on date sorts newest first",
    ));

    let mut rebuilt = Vec::new();
    let mut paging_ok = true;
    let pages = history::page_count(sorted.len(), rules.page_size).max(1);
    for n in 1..=pages {
        match history::paginate(&sorted, rules.page_size, n) {
            Ok(page) => {
                paging_ok &= page.has_previous() == (n > 1);
                paging_ok &= page.has_next() == (n < page.page_count);
                rebuilt.extend_from_slice(page.rows);
            }
            Err(err) => {
                log::warn!("page {n}: {err}");
                paging_ok = false;
            }
        }
    }
    paging_ok &= history::paginate(&sorted, rules.page_size, pages + 1).is_err();
    results.push(check(
        "history_pages_round_trip",
        paging_ok && rebuilt == sorted,
        format!("{pages} page(s) of {}", rules.page_size),
    ));

    let by_name = history::sort(entries, SortField::Discipline, SortDirection::Ascending);
    let names: Vec<String> = by_name.iter().map(|e| e.discipline_name()).collect();
    results.push(check(
        "history_sort_discipline_name",
        names.windows(2).all(|w| w[0] <= w[1]),
        format!("{names:?}"),
    ));

    let summary = history::summarize(entries);
    let total: i32 = summary.disciplines.iter().map(|d| d.total_gain).sum();
    results.push(check(
        "history_summary_totals",
        total == summary.total_gain && summary.total_sessions == entries.len(),
        format!("total gain {}", history::format_gain(summary.total_gain)),
    ));

    if verbose {
        for e in &sorted {
            println!(
                "  {} {:<16} {:>4} traits: {}",
                e.date.format("%Y-%m-%d"),
                e.discipline_name(),
                history::format_gain(e.score_gain),
                if e.trait_names().is_empty() {
                    "-".to_string()
                } else {
                    e.trait_names().join(", ")
                }
            );
        }
    }

    results
}
