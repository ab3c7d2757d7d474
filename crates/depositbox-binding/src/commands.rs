//! Command handlers
//!
//! Chat and console commands forwarded by the host. In-world actors are
//! gated by permissions; the operator console is trusted.

use crate::depositbox::DepositBox;
use crate::error::CommandError;
use crate::host::Host;
use crate::messages::Message;
use depositbox_core::ActorId;
use depositbox_summary::Summary;

/// Permission required to receive a deposit box
pub const PERM_PLACE: &str = "depositbox.place";

/// Permission required to trigger a summary from in-world
pub const PERM_ADMIN_CHECK: &str = "depositbox.admincheck";

/// Who issued a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    Console,
    Actor(ActorId),
}

/// Prize pool from the first command argument.
///
/// Missing, unparsable or non-positive values fall back to `default`.
pub fn parse_prize_pool(args: &[&str], default: u64) -> u64 {
    args.first()
        .and_then(|arg| arg.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value as u64)
        .unwrap_or(default)
}

/// `depositsummary [prize_pool]`
pub fn deposit_summary<H: Host>(
    dbox: &mut DepositBox<H>,
    sender: &CommandSender,
    args: &[&str],
) -> Result<Summary, CommandError> {
    if let CommandSender::Actor(actor) = sender {
        if !dbox.host().has_permission(actor, PERM_ADMIN_CHECK) {
            dbox.host_mut()
                .send_message(actor, &Message::SummaryNoPermission.to_string());
            return Err(CommandError::PermissionDenied {
                actor: actor.clone(),
                permission: PERM_ADMIN_CHECK,
            });
        }
    }

    let prize_pool = parse_prize_pool(args, dbox.config().default_prize_pool);
    let summary = dbox.generate_summary(prize_pool)?;

    match sender {
        CommandSender::Actor(actor) => {
            dbox.host_mut()
                .send_message(actor, &Message::SummarySaved { prize_pool }.to_string());
        }
        CommandSender::Console => {
            tracing::info!(prize_pool, "Deposit summary generated via console command");
        }
    }

    Ok(summary)
}

/// `depositbox`: hand the actor one managed container item
pub fn give_deposit_box<H: Host>(
    dbox: &mut DepositBox<H>,
    actor: &ActorId,
) -> Result<(), CommandError> {
    if !dbox.host().has_permission(actor, PERM_PLACE) {
        dbox.host_mut()
            .send_message(actor, &Message::NoPermission.to_string());
        return Err(CommandError::PermissionDenied {
            actor: actor.clone(),
            permission: PERM_PLACE,
        });
    }

    let item = dbox.config().container_item;
    let skin = dbox.config().container_skin;
    if !dbox.host_mut().give_item(actor, item, 1, skin) {
        return Err(CommandError::GiveFailed(actor.clone()));
    }

    dbox.host_mut()
        .send_message(actor, &Message::BoxGiven.to_string());
    tracing::info!(actor = %actor, "Deposit box given");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_pool_parsed() {
        assert_eq!(parse_prize_pool(&["5000"], 100_000), 5000);
        assert_eq!(parse_prize_pool(&[" 42 ", "ignored"], 100_000), 42);
    }

    #[test]
    fn test_prize_pool_falls_back() {
        assert_eq!(parse_prize_pool(&[], 100_000), 100_000);
        assert_eq!(parse_prize_pool(&["lots"], 100_000), 100_000);
        assert_eq!(parse_prize_pool(&["0"], 100_000), 100_000);
        assert_eq!(parse_prize_pool(&["-5"], 100_000), 100_000);
    }
}
