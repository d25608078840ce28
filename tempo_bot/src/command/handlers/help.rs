use super::*;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if params.is_empty() {
        return Ok(vec![usage(ctx.prefix)]);
    }

    // The topic may be given with or without the command prefix
    let word = params[0].strip_prefix(ctx.prefix).unwrap_or(params[0]);
    let matches = BotCommand::resolve(word);
    match matches.len() {
        0 => Err(CommandError::UnknownCommand),
        1 => Ok(vec![super::usage(
            matches[0],
            ctx.prefix,
            ctx.engine.policy(),
        )]),
        _ => Err(CommandError::Ambiguous(matches)),
    }
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {p}help [COMMAND].  Available commands: {commands}.",
        p = prefix,
        commands = BotCommand::command_list(prefix)
    )
}
