use super::*;

use tempo_engine::CancelError;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    match ctx.engine.cancel(ctx.audience_key, ctx.person) {
        Ok(cancelled) => Ok(vec![format!(
            "Cancelled running timebox: {}",
            format_timebox(ctx.person, &cancelled)
        )]),
        Err(CancelError::NothingRunning) => Err(CommandError::Rejected(format!(
            "No running timeboxes found for {} in {}.",
            ctx.person, ctx.audience_key
        ))),
    }
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {}cancel.  Cancel your currently running timebox.",
        prefix
    )
}
