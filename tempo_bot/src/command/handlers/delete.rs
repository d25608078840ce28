use super::*;

use tempo_engine::DeleteError;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    match ctx.engine.delete(ctx.audience_key, ctx.person) {
        Ok(deleted) => Ok(vec![format!(
            "Deleted the last completed timebox: {}",
            format_timebox(ctx.person, &deleted)
        )]),
        Err(DeleteError::NoTimeboxes) => Err(CommandError::Rejected(format!(
            "No timeboxes found for {} in {}.",
            ctx.person, ctx.audience_key
        ))),
        Err(DeleteError::StillRunning(running)) => Err(CommandError::Warning(format!(
            "Another timebox is in progress in {}: {}.  \
             First cancel the running timebox with {p}cancel.  \
             Then delete the last completed timebox with {p}delete.",
            ctx.audience_key,
            format_timebox(ctx.person, &running),
            p = ctx.prefix
        ))),
    }
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {}delete.  Delete your last completed timebox in current channel.",
        prefix
    )
}
