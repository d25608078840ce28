use super::*;

pub(super) fn handle(ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    if !params.is_empty() {
        return Err(CommandError::Rejected(usage(ctx.prefix)));
    }

    Ok(vec![format!(
        "Tempo {}.  An IRC channel timebox keeper.  \
         This is free and open source software available under the terms of the MIT license.",
        env!("CARGO_PKG_VERSION")
    )])
}

pub(super) fn usage(prefix: &str) -> String {
    format!(
        "Usage: {}version.  Show version, copyright, and license details.",
        prefix
    )
}
