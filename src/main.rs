// This is the entry point of the antenna moderator.
//
// **Architecture Overview:**
// - `core/` = Business logic (classification and the moderation workflow)
// - `infra/` = Implementations of core traits (REST client, config loading)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run one sweep over the antenna
// 4. Log what happened
//
// The process exits after a single pass. Run it from cron or a systemd timer.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use anyhow::Context;

use crate::core::moderation::{ModerationService, NoteOutcome, RunReport};
use crate::infra::config::BotConfig;
use crate::infra::misskey::MisskeyApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    let config = BotConfig::load().context("Failed to load configuration")?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let client = MisskeyApiClient::new(
        config.base_url.clone(),
        config.token.clone(),
        config.http_timeout,
    )
    .context("Failed to create API client")?;
    let service = ModerationService::new(client, config.antenna_id.clone());

    tracing::info!(
        base_url = %config.base_url,
        antenna_id = %config.antenna_id,
        "Starting antenna sweep"
    );

    match service.run().await {
        Ok(report) => log_summary(&report),
        // A failed fetch means nothing was processed; the next scheduled run retries.
        Err(e) => tracing::error!("Antenna sweep aborted: {}", e),
    }

    Ok(())
}

fn log_summary(report: &RunReport) {
    let ignored = report
        .outcomes
        .iter()
        .filter(|outcome| matches!(outcome, NoteOutcome::Ignored { .. }))
        .count();
    let flagged = report.flagged().count();
    let incomplete: Vec<_> = report
        .flagged()
        .filter(|flagged| !flagged.is_complete())
        .collect();

    for flagged in &incomplete {
        tracing::warn!(
            note_id = %flagged.note_id,
            user_id = %flagged.user_id,
            note_deleted = ?flagged.note_deleted,
            account_deleted = ?flagged.account_deleted,
            host_block = ?flagged.host_block,
            "Flagged note was only partially handled"
        );
    }
    let elapsed = report.finished_at - report.started_at;

    tracing::info!(
        scanned = report.scanned(),
        ignored,
        malformed = report.malformed_count(),
        flagged,
        incomplete = incomplete.len(),
        hosts_added = ?report.hosts_added(),
        elapsed_ms = elapsed.num_milliseconds(),
        "Antenna sweep finished"
    );
}
