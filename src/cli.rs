//! CLI command tree construction and argument lowering.
//!
//! Options are declared as [`OptSpec`] descriptors; every spelling of an
//! option (canonical key and each alias) is registered as its own clap
//! argument so values stay attributed to the spelling the user typed, the
//! way the option resolver expects them.
use clap::{
    Arg, ArgAction, ArgMatches, Command, builder::BoolishValueParser,
};

use crate::opts::{ArgBag, ArgValue, OptKind, OptSpec};

/// Namespace prefix for environment-variable bindings, e.g.
/// `RELNOTES_AUTH_TOKEN` for `--auth-token`.
pub const ENV_PREFIX: &str = "RELNOTES";

/// Build the root command with both subcommands attached.
pub fn command() -> Command {
    Command::new("relnotes")
        .about(
            "Lint release notes against a package manifest and publish \
             versioned GitHub releases",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging."),
        )
        .subcommand(crate::command::lint::command())
        .subcommand(crate::command::release::command())
}

/// Register every spelling of an option on a subcommand.
///
/// The canonical key carries the help text, default value, and environment
/// binding; aliases are registered as hidden arguments.
pub fn register(mut cmd: Command, spec: &OptSpec) -> Command {
    for alias in spec.aliases.iter().copied() {
        cmd = cmd.arg(arg_for(spec, alias, false));
    }
    cmd.arg(arg_for(spec, spec.key, true))
}

fn arg_for(spec: &OptSpec, spelling: &'static str, canonical: bool) -> Arg {
    let mut arg = Arg::new(spelling);

    if spelling.len() == 1 {
        if let Some(short) = spelling.chars().next() {
            arg = arg.short(short);
        }
    } else {
        arg = arg.long(spelling);
    }

    arg = match spec.kind {
        // booleans accept an optional explicit value so default-true flags
        // can be disabled: `--draft`, `--draft true`, `--draft false`
        OptKind::Bool => arg
            .value_parser(BoolishValueParser::new())
            .num_args(0..=1)
            .default_missing_value("true"),
        OptKind::Str | OptKind::Num => arg.num_args(1),
        OptKind::StrList => arg.action(ArgAction::Append).num_args(1),
    };

    if canonical {
        arg = arg.help(spec.help).env(env_name(spec.key));
        if let Some(default) = spec.default {
            arg = arg.default_value(default);
        }
    } else {
        arg = arg.hide(true);
    }

    arg
}

fn env_name(key: &str) -> String {
    format!("{ENV_PREFIX}_{}", key.to_uppercase().replace('-', "_"))
}

/// Lower parsed matches into an [`ArgBag`] keyed by option spelling.
pub fn bag_from_matches(matches: &ArgMatches, specs: &[&OptSpec]) -> ArgBag {
    let mut bag = ArgBag::new();

    for spec in specs {
        for spelling in spec.spellings() {
            match spec.kind {
                OptKind::Bool => {
                    if let Some(value) = matches.get_one::<bool>(spelling) {
                        bag.insert(
                            spelling.to_string(),
                            ArgValue::Bool(*value),
                        );
                    }
                }
                OptKind::Str | OptKind::Num | OptKind::StrList => {
                    if let Some(values) = matches.get_many::<String>(spelling)
                    {
                        let mut items: Vec<ArgValue> =
                            values.cloned().map(ArgValue::Str).collect();
                        let value = if items.len() == 1 {
                            items.remove(0)
                        } else {
                            ArgValue::List(items)
                        };
                        bag.insert(spelling.to_string(), value);
                    }
                }
            }
        }
    }

    bag
}
