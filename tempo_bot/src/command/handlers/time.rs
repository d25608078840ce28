use super::*;

use chrono::{TimeZone, Utc};

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    let rendered = match Utc.timestamp_opt(ctx.now, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        _ => ctx.now.to_string(),
    };
    Ok(vec![rendered])
}

pub(super) fn usage(prefix: &str) -> String {
    format!("Usage: {}time.  Show current UTC time.", prefix)
}
