use super::*;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    let (count, minutes) = ctx.engine.totals();
    if count == 0 {
        return Ok(vec!["No timeboxes completed yet.".to_string()]);
    }

    let average = (minutes as f64 / count as f64).round() as i64;
    Ok(vec![format!(
        "I have run {} timeboxes across all channels, totalling {} minutes.  \
         The average length of each timebox is {} minutes.",
        count, minutes, average
    )])
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {}summary.  Show a summary of all timeboxes completed across all channels.",
        prefix
    )
}
