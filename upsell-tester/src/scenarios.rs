//! Named end-to-end scenarios driven against a recorded landing session
use anyhow::{Result, bail, ensure};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::collections::BTreeSet;
use upsell_core::{LandingConfig, Product, SessionPhase, StartOutcome};

use crate::recording::{Dispatch, Harness, HarnessOptions};

pub struct ScenarioCtx<'a> {
    pub config: &'a LandingConfig,
    pub rng: ChaCha20Rng,
    pub verbose: bool,
}

pub type ScenarioFn = fn(&mut ScenarioCtx<'_>) -> Result<()>;

pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "smoke",
        description: "Two-product walkthrough: select, price, confirm",
        run: smoke,
    },
    Scenario {
        key: "empty-catalog",
        description: "No products: toggles ignored, continue stays disabled",
        run: empty_catalog,
    },
    Scenario {
        key: "toggle-parity",
        description: "Random toggle sequences leave odd-count products selected",
        run: toggle_parity,
    },
    Scenario {
        key: "double-toggle",
        description: "Toggling the same product twice restores every observable",
        run: double_toggle,
    },
    Scenario {
        key: "confirm-dispatch",
        description: "Confirmation reports, records, marks completion, then navigates",
        run: confirm_dispatch,
    },
    Scenario {
        key: "completed-guard",
        description: "A completed visitor is redirected without a page view",
        run: completed_guard,
    },
    Scenario {
        key: "recorder-outage",
        description: "A failing recorder still lets the visitor move on",
        run: recorder_outage,
    },
];

#[must_use]
pub fn all_scenarios() -> &'static [Scenario] {
    SCENARIOS
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.key == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

fn product_ids(config: &LandingConfig) -> Vec<String> {
    config.catalog().iter().map(|p| p.id.clone()).collect()
}

/// Pick a product id, or occasionally an id the catalog does not know.
fn random_id(rng: &mut ChaCha20Rng, ids: &[String]) -> String {
    if ids.is_empty() || rng.gen_ratio(1, 8) {
        return "not-in-catalog".to_string();
    }
    ids[rng.gen_range(0..ids.len())].clone()
}

fn smoke(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let config = LandingConfig {
        products: vec![
            Product::new("bracelet", 100, "Bracelet"),
            Product::new("card", 50, "Card"),
        ],
        ..ctx.config.clone()
    };
    let mut harness = Harness::new(&config, HarnessOptions::default());
    ensure!(harness.session.start() == StartOutcome::Ready, "session did not start");
    ensure!(
        !harness.session.affordance_state().enabled,
        "continue enabled before any selection"
    );

    harness.session.toggle("bracelet");
    let affordance = harness.session.affordance_state();
    ensure!(affordance.enabled, "continue disabled after selecting bracelet");
    ensure!(
        affordance.label == config.labels.continue_label(100),
        "unexpected label {:?}",
        affordance.label
    );

    harness.session.toggle("card");
    ensure!(
        harness.session.controller().total_price() == 150,
        "total should be 150"
    );

    harness.session.toggle("bracelet");
    ensure!(
        harness.session.controller().total_price() == 50,
        "total should drop back to 50"
    );

    ensure!(
        !harness.session.controller().is_selected("bracelet"),
        "bracelet still selected"
    );

    let Some(summary) = harness.session.confirm() else {
        bail!("confirm returned nothing with card selected");
    };
    ensure!(
        summary.selected_ids == BTreeSet::from(["card".to_string()]),
        "summary selection {:?}",
        summary.selected_ids
    );
    ensure!(summary.total_price == 50, "summary total {}", summary.total_price);
    if ctx.verbose {
        println!("  smoke journal: {:?}", harness.journal.labels());
    }
    Ok(())
}

fn empty_catalog(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let config = LandingConfig {
        products: Vec::new(),
        ..ctx.config.clone()
    };
    let mut harness = Harness::new(&config, HarnessOptions::default());
    harness.session.start();
    for _ in 0..ctx.rng.gen_range(1..16) {
        let id = random_id(&mut ctx.rng, &[]);
        ensure!(
            harness.session.toggle(&id).is_none(),
            "toggle of {id} changed an empty catalog"
        );
    }
    let affordance = harness.session.affordance_state();
    ensure!(!affordance.enabled, "continue enabled on an empty catalog");
    ensure!(
        affordance.label == config.labels.empty,
        "unexpected empty label {:?}",
        affordance.label
    );
    ensure!(harness.session.confirm().is_none(), "empty confirm produced a summary");
    ensure!(
        harness.journal.labels() == ["report:page_viewed"],
        "unexpected dispatches {:?}",
        harness.journal.labels()
    );
    Ok(())
}

fn toggle_parity(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let ids = product_ids(ctx.config);
    let catalog = ctx.config.catalog();
    let mut harness = Harness::new(ctx.config, HarnessOptions::default());
    harness.session.start();

    let mut expected: BTreeSet<String> = BTreeSet::new();
    for _ in 0..ctx.rng.gen_range(1..64) {
        let id = random_id(&mut ctx.rng, &ids);
        let display = harness.session.toggle(&id);
        if catalog.contains(&id) {
            if !expected.remove(&id) {
                expected.insert(id.clone());
            }
            let Some(display) = display else {
                bail!("known product {id} returned no display");
            };
            ensure!(
                display.state.is_selected() == expected.contains(&id),
                "display state of {id} disagrees with parity"
            );
        } else {
            ensure!(display.is_none(), "unknown id {id} produced a display");
        }

        let controller = harness.session.controller();
        ensure!(controller.selection() == &expected, "selection drifted");
        let expected_total: u64 = expected
            .iter()
            .filter_map(|id| catalog.price_of(id))
            .map(u64::from)
            .sum();
        ensure!(
            controller.total_price() == expected_total,
            "total {} != {expected_total}",
            controller.total_price()
        );
        ensure!(
            harness.session.affordance_state().enabled == !expected.is_empty(),
            "affordance enabled flag out of step"
        );
    }
    Ok(())
}

fn double_toggle(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let ids = product_ids(ctx.config);
    let mut harness = Harness::new(ctx.config, HarnessOptions::default());
    harness.session.start();
    for _ in 0..ctx.rng.gen_range(0..8) {
        let id = random_id(&mut ctx.rng, &ids);
        harness.session.toggle(&id);
    }

    for id in &ids {
        let controller = harness.session.controller();
        let before = (
            controller.selection().clone(),
            controller.total_price(),
            controller.displays(),
            controller.affordance_state(),
        );
        harness.session.toggle(id);
        harness.session.toggle(id);
        let controller = harness.session.controller();
        let after = (
            controller.selection().clone(),
            controller.total_price(),
            controller.displays(),
            controller.affordance_state(),
        );
        ensure!(before == after, "double toggle of {id} was not idempotent");
    }
    Ok(())
}

fn confirm_dispatch(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let ids = product_ids(ctx.config);
    if ids.is_empty() {
        return Ok(());
    }
    let mut harness = Harness::new(ctx.config, HarnessOptions::default());
    harness.session.start();
    for _ in 0..ctx.rng.gen_range(1..16) {
        let id = random_id(&mut ctx.rng, &ids);
        harness.session.toggle(&id);
    }
    // guarantee at least one selection
    if harness.session.controller().selection().is_empty() {
        harness.session.toggle(&ids[0]);
    }
    let selected = harness.session.controller().selection().clone();
    let total = harness.session.controller().total_price();

    let Some(summary) = harness.session.confirm() else {
        bail!("confirm returned nothing with {selected:?} selected");
    };
    ensure!(summary.selected_ids == selected, "summary selection drifted");
    ensure!(summary.total_price == total, "summary total drifted");
    ensure!(summary.timestamp == harness.clock.0, "summary not stamped by the clock");
    ensure!(
        harness.session.phase() == SessionPhase::Confirmed,
        "phase after confirm is {:?}",
        harness.session.phase()
    );
    ensure!(
        harness.journal.labels()
            == [
                "report:page_viewed",
                "report:confirmed",
                "record",
                "mark_completed",
                "navigate"
            ],
        "dispatch order {:?}",
        harness.journal.labels()
    );

    let entries = harness.journal.entries();
    let Dispatch::Record(payload) = &entries[2] else {
        bail!("third dispatch was not a record");
    };
    ensure!(payload.variant == ctx.config.experiment.variant, "variant mismatch");
    ensure!(payload.total_price == total, "recorded total mismatch");
    ensure!(payload.flags.len() == ids.len(), "one flag per product expected");
    for (id, flag) in &payload.flags {
        ensure!(
            (*flag == 1) == selected.contains(id),
            "flag for {id} disagrees with the selection"
        );
    }

    ensure!(
        harness.session.toggle(&ids[0]).is_none(),
        "toggle accepted after confirmation"
    );
    ensure!(harness.session.confirm().is_none(), "second confirm accepted");
    ensure!(harness.journal.entries().len() == 5, "late input dispatched");
    Ok(())
}

fn completed_guard(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let ids = product_ids(ctx.config);
    let mut harness = Harness::new(
        ctx.config,
        HarnessOptions {
            already_completed: true,
            ..HarnessOptions::default()
        },
    );
    ensure!(
        harness.session.start() == StartOutcome::AlreadyCompleted,
        "completed visitor was not redirected"
    );
    ensure!(!harness.session.page_view_sent(), "page view sent after redirect");
    let id = random_id(&mut ctx.rng, &ids);
    ensure!(harness.session.toggle(&id).is_none(), "toggle accepted after redirect");
    ensure!(harness.session.confirm().is_none(), "confirm accepted after redirect");
    ensure!(
        harness.journal.labels() == ["navigate"],
        "unexpected dispatches {:?}",
        harness.journal.labels()
    );
    Ok(())
}

fn recorder_outage(ctx: &mut ScenarioCtx<'_>) -> Result<()> {
    let ids = product_ids(ctx.config);
    if ids.is_empty() {
        return Ok(());
    }
    let mut harness = Harness::new(
        ctx.config,
        HarnessOptions {
            recorder_offline: true,
            ..HarnessOptions::default()
        },
    );
    harness.session.start();
    let id = &ids[ctx.rng.gen_range(0..ids.len())];
    harness.session.toggle(id);
    ensure!(harness.session.confirm().is_some(), "confirm failed with recorder down");
    ensure!(
        harness.journal.labels()
            == [
                "report:page_viewed",
                "report:confirmed",
                "mark_completed",
                "navigate"
            ],
        "dispatch order {:?}",
        harness.journal.labels()
    );
    Ok(())
}
