use super::*;

use tempo_engine::BeginError;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if params.is_empty() {
        return Err(CommandError::Rejected(usage(
            ctx.prefix,
            ctx.engine.policy(),
        )));
    }

    let (duration, summary_words) = if is_all_digits(params[0]) {
        if params.len() == 1 {
            return Err(CommandError::Rejected(
                "Duration must be followed by task summary.".to_string(),
            ));
        }
        // A run of digits too long for i64 is still over any sane maximum
        let duration = params[0].parse::<i64>().map_err(|_| {
            CommandError::Rejected(format!(
                "Duration must not exceed {} minutes.",
                ctx.engine.policy().max_duration_minutes
            ))
        })?;
        (duration, &params[1..])
    } else {
        (ctx.engine.policy().default_duration_minutes, params)
    };
    let summary = summary_words.join(" ");

    match ctx.engine.begin(
        ctx.audience_key,
        ctx.person,
        ctx.audience,
        duration,
        &summary,
        ctx.now,
    ) {
        Ok(timebox) => Ok(vec![format!(
            "Started timebox in {}: {}",
            ctx.audience_key,
            format_timebox(ctx.person, &timebox)
        )]),
        Err(BeginError::TooShort { min }) => Err(CommandError::Rejected(format!(
            "Duration must be at least {} minutes.",
            min
        ))),
        Err(BeginError::TooLong { max }) => Err(CommandError::Rejected(format!(
            "Duration must not exceed {} minutes.",
            max
        ))),
        Err(BeginError::NotMultiple { step }) => Err(CommandError::Rejected(format!(
            "Duration must be a multiple of {} minutes.",
            step
        ))),
        Err(BeginError::InProgress(running)) => Err(CommandError::Rejected(format!(
            "Another timebox is in progress in {}: {}.  \
             Send {}cancel to cancel the currently running timebox before starting a new timebox.",
            ctx.audience_key,
            format_timebox(ctx.person, &running),
            ctx.prefix
        ))),
    }
}

pub(super) fn usage(prefix: &str, policy: &Policy) -> String {
    let mut text = format!(
        "Usage: {p}begin [MINUTES] SUMMARY.  \
         Example #1: {p}begin Read SICP.  \
         Example #2: {p}begin 45 Review article.  \
         Start a new timebox for the specified number of MINUTES.  \
         MINUTES must be ",
        p = prefix
    );
    if policy.duration_multiple_minutes > 1 {
        text.push_str(&format!(
            "a multiple of {}, ",
            policy.duration_multiple_minutes
        ));
    }
    text.push_str(&format!(
        "between {} and {}, inclusive.  If MINUTES is not specified, default to {} minutes.",
        policy.min_duration_minutes, policy.max_duration_minutes, policy.default_duration_minutes
    ));
    text
}

fn is_all_digits(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}
