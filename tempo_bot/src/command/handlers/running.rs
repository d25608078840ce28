use super::*;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    let running = ctx.engine.running_in(ctx.audience_key);
    if running.is_empty() {
        return Ok(vec![format!(
            "No running timeboxes found in {}.",
            ctx.audience_key
        )]);
    }

    let mut lines = vec![format!(
        "Timeboxes currently running in {}:",
        ctx.audience_key
    )];
    lines.extend(
        running
            .iter()
            .map(|(person, timebox)| format_timebox(person, timebox)),
    );
    Ok(lines)
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {}running.  List all running timeboxes of the channel.",
        prefix
    )
}
