//! CLI commands

use crate::context::AppContext;
use depositbox_admission::AdmissionDecision;
use depositbox_core::{ActorId, DepositBoxConfig, DepositRecord};
use depositbox_summary::{format_percentage, Summary};
use std::path::Path;

/// Regenerate the summary from the full log.
///
/// A running `DepositBox` sees the result only after `reload_snapshot`.
pub fn summary(ctx: &AppContext, prize_pool: Option<u64>) -> anyhow::Result<Summary> {
    let prize_pool = prize_pool.unwrap_or(ctx.config.default_prize_pool);
    let summary = ctx.summary.generate_summary(ctx.log.records(), prize_pool)?;

    println!(
        "✅ Deposit summary generated: {} actors, {} deposited, prize pool {} sats",
        summary.actor_count(),
        summary.grand_total,
        summary.prize_pool
    );
    for (actor, row) in summary.snapshot.iter() {
        println!(
            "   {:<20} {:>10} {:>7}% {:>10} sats",
            actor.as_str(),
            row.total_deposited,
            format_percentage(row.percentage),
            row.sats_reward
        );
    }
    println!("   Written to {}", ctx.paths().summary_dir().display());

    Ok(summary)
}

/// Log entries in append order, optionally for one actor
pub fn deposits(ctx: &AppContext, actor: Option<&str>) -> Vec<DepositRecord> {
    let actor = actor.map(ActorId::from);
    let records: Vec<DepositRecord> = ctx
        .log
        .records()
        .iter()
        .filter(|r| actor.as_ref().map_or(true, |a| &r.actor_id == a))
        .cloned()
        .collect();

    if records.is_empty() {
        println!("No deposits recorded");
    }
    for record in &records {
        println!(
            "{}  {:<20} {:>10}",
            record.timestamp.to_rfc3339(),
            record.actor_id.as_str(),
            record.amount.value()
        );
    }

    records
}

/// Would the actor's next deposit be admitted?
pub fn check(ctx: &AppContext, actor: &str) -> AdmissionDecision {
    let actor = ActorId::from(actor);
    let snapshot = ctx.snapshot();
    let total = snapshot.total_for(&actor);

    let decision =
        ctx.policy
            .should_accept(&snapshot, Some(&actor), 0, ctx.policy.tracked_resource());

    println!(
        "{}: {} on last summary, limit {}",
        actor,
        total,
        ctx.policy.max_deposit_limit()
    );
    match &decision {
        AdmissionDecision::Accept => println!("✅ Next deposit would be accepted"),
        AdmissionDecision::Reject(reason) => {
            println!("❌ Next deposit would be rejected ({})", reason.code())
        }
    }

    decision
}

/// Write the default config unless one exists. Returns true if created.
pub fn init_config(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(false);
    }

    DepositBoxConfig::default().save(path)?;
    println!("✅ Default config written to {}", path.display());
    Ok(true)
}
