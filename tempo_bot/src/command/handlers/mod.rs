//! One module per command. Each exposes `handle` plus the `usage` text the
//! help command resolves to.

use super::{BotCommand, CommandContext, CommandError, CommandResult};
use tempo_engine::{format_duration, format_timebox, Policy};

mod begin;
mod cancel;
mod delete;
mod help;
mod list;
mod mine;
mod running;
mod summary;
mod time;
mod version;

/// Execute the resolved command. The match is exhaustive over
/// [`BotCommand`], so a command without a handler cannot compile.
pub fn dispatch(command: BotCommand, ctx: &mut CommandContext, params: &[&str]) -> CommandResult {
    match command {
        BotCommand::Begin => begin::handle(ctx, params),
        BotCommand::Cancel => cancel::handle(ctx, params),
        BotCommand::Delete => delete::handle(ctx, params),
        BotCommand::List => list::handle(ctx, params),
        BotCommand::Mine => mine::handle(ctx, params),
        BotCommand::Running => running::handle(ctx, params),
        BotCommand::Summary => summary::handle(ctx, params),
        BotCommand::Time => time::handle(ctx, params),
        BotCommand::Help => help::handle(ctx, params),
        BotCommand::Version => version::handle(ctx, params),
    }
}

/// The usage text for a command, as shown by `help`.
pub fn usage(command: BotCommand, prefix: &str, policy: &Policy) -> String {
    match command {
        BotCommand::Begin => begin::usage(prefix, policy),
        BotCommand::Cancel => cancel::usage(prefix),
        BotCommand::Delete => delete::usage(prefix),
        BotCommand::List => list::usage(prefix, policy),
        BotCommand::Mine => mine::usage(prefix, policy),
        BotCommand::Running => running::usage(prefix),
        BotCommand::Summary => summary::usage(prefix),
        BotCommand::Time => time::usage(prefix),
        BotCommand::Help => help::usage(prefix),
        BotCommand::Version => version::usage(prefix),
    }
}
