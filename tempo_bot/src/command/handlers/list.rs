use super::*;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(
            ctx.prefix,
            ctx.engine.policy(),
        )));
    }

    let completed = ctx.engine.completed_in(ctx.audience_key);
    if completed.is_empty() {
        return Ok(vec![format!(
            "No completed timeboxes found in {}.",
            ctx.audience_key
        )]);
    }

    let max_print = ctx.engine.policy().max_print(ctx.private);
    let mut lines = vec![format!("Completed timeboxes in {}:", ctx.audience_key)];
    lines.extend(
        completed
            .iter()
            .take(max_print)
            .map(|(person, timebox)| format_timebox(person, timebox)),
    );
    Ok(lines)
}

pub(super) fn usage(prefix: &str, policy: &Policy) -> String {
    format!(
        "Usage: {p}list.  List completed timeboxes in current channel.  \
         Only most recent {keep} timeboxes started within the last {window} are available.  \
         A maximum of {channel} timeboxes are listed in channel.  \
         A maximum of {private} timeboxes are listed in private.",
        p = prefix,
        keep = policy.keep_timeboxes,
        window = format_duration(policy.keep_duration_seconds),
        channel = policy.max_print_channel,
        private = policy.max_print_private,
    )
}
