//! Option resolution — which options are visible when a command runs.

use std::collections::HashMap;

use crate::command::CommandRef;
use crate::opt::Opt;

/// Options keyed by every name and alias they answer to.
pub type OptMap<'a> = HashMap<&'a str, &'a Opt>;

/// Options visible when `cmd` runs.
///
/// Walks the path from the root down to `cmd`. Each command first adds its
/// own options under their names and aliases, replacing inherited entries
/// with the same key, then removes every key bound to an option it
/// suppresses. Computed fresh on each call.
pub fn all_opts(cmd: CommandRef<'_>) -> OptMap<'_> {
    let mut map = OptMap::new();
    for node in cmd.path() {
        put_opts(&mut map, node.opts());
        for name in node.suppressed() {
            suppress(&mut map, name);
        }
    }
    tracing::debug!(
        command = %cmd.name(),
        keys = map.len(),
        "Resolved visible options"
    );
    map
}

pub(crate) fn put_opts<'a>(map: &mut OptMap<'a>, opts: &'a [Opt]) {
    for opt in opts {
        map.insert(opt.name(), opt);
        for alias in opt.aliases() {
            map.insert(alias.as_str(), opt);
        }
    }
}

// Removes `name`, the bound option's own name and every one of its aliases,
// whatever those keys map to now.
fn suppress(map: &mut OptMap<'_>, name: &str) {
    let Some(target) = map.get(name).copied() else {
        return;
    };
    map.remove(name);
    map.remove(target.name());
    for alias in target.aliases() {
        map.remove(alias.as_str());
    }
    tracing::trace!(option = %target.name(), "Suppressed inherited option");
}
