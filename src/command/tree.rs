//! Command arena and borrowed command views.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::command::resolve::{self, OptMap};
use crate::command::{Command, Hooks};
use crate::opt::{Opt, Value};

/// Index of a command inside its [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

pub(crate) struct Node {
    name: String,
    aliases: Vec<String>,
    synopsis: String,
    description: String,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
    opts: Vec<Opt>,
    suppressed: BTreeSet<String>,
    pub(crate) hooks: Hooks,
}

/// Arena holding every command of a CLI. The root is always the first node.
///
/// Parent links are indices, children are owned by position in the arena;
/// both sides are only written by [`CommandTree::attach`] and construction,
/// so they never disagree.
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    pub fn new(root: Command) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(None, root);
        tree
    }

    pub fn root(&self) -> CommandRef<'_> {
        CommandRef {
            tree: self,
            id: CommandId(0),
        }
    }

    pub fn get(&self, id: CommandId) -> Option<CommandRef<'_>> {
        (id.0 < self.nodes.len()).then_some(CommandRef { tree: self, id })
    }

    /// Follows `names` from the root, matching names and aliases.
    pub fn find(&self, names: &[&str]) -> Option<CommandRef<'_>> {
        names
            .iter()
            .try_fold(self.root(), |cmd, name| cmd.find_sub(name))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds `cmd` (and its subcommands) as the last child of `parent`.
    pub fn attach(&mut self, parent: CommandId, cmd: Command) -> Option<CommandId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let id = self.insert(Some(parent), cmd);
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    fn insert(&mut self, parent: Option<CommandId>, cmd: Command) -> CommandId {
        let id = CommandId(self.nodes.len());
        let Command {
            name,
            aliases,
            synopsis,
            description,
            mut opts,
            suppressed,
            children,
            hooks,
        } = cmd;
        for opt in &mut opts {
            opt.attach(id);
        }
        self.nodes.push(Node {
            name,
            aliases,
            synopsis,
            description,
            parent,
            children: Vec::new(),
            opts,
            suppressed,
            hooks,
        });
        for child in children {
            let child_id = self.insert(Some(id), child);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }
}

impl fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.nodes.iter().map(|n| &n.name))
            .finish()
    }
}

/// Borrowed view of one command in a tree.
#[derive(Clone, Copy)]
pub struct CommandRef<'a> {
    tree: &'a CommandTree,
    id: CommandId,
}

impl<'a> CommandRef<'a> {
    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    pub(crate) fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn aliases(&self) -> &'a [String] {
        &self.node().aliases
    }

    pub fn synopsis(&self) -> &'a str {
        &self.node().synopsis
    }

    pub fn description(&self) -> &'a str {
        &self.node().description
    }

    /// Options declared directly on this command.
    pub fn opts(&self) -> &'a [Opt] {
        &self.node().opts
    }

    /// Inherited option names hidden at this command.
    pub fn suppressed(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.node().suppressed.iter().map(String::as_str)
    }

    pub fn parent(&self) -> Option<CommandRef<'a>> {
        self.node().parent.map(|id| CommandRef {
            tree: self.tree,
            id,
        })
    }

    pub fn children(&self) -> impl Iterator<Item = CommandRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| CommandRef { tree, id })
    }

    /// A leaf has no subcommands and must run something itself.
    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    pub fn root(&self) -> CommandRef<'a> {
        self.tree.root()
    }

    /// Commands from the root down to and including this one.
    pub fn path(&self) -> Vec<CommandRef<'a>> {
        let mut path = vec![*self];
        let mut cur = *self;
        while let Some(parent) = cur.parent() {
            path.push(parent);
            cur = parent;
        }
        path.reverse();
        path
    }

    /// This command's own options keyed by name and alias.
    pub fn opt_map(&self) -> OptMap<'a> {
        let mut map = OptMap::new();
        resolve::put_opts(&mut map, self.opts());
        map
    }

    /// Every option visible when this command runs; see [`resolve::all_opts`].
    pub fn all_opts(&self) -> OptMap<'a> {
        resolve::all_opts(*self)
    }

    /// Looks up one visible option by name or alias.
    pub fn opt(&self, name: &str) -> Option<&'a Opt> {
        self.all_opts().get(name).copied()
    }

    /// Effective values of the visible options, keyed by canonical name.
    pub fn values(&self) -> BTreeMap<&'a str, Value> {
        self.all_opts()
            .into_values()
            .filter_map(|opt| opt.effective().map(|v| (opt.name(), v)))
            .collect()
    }
}

impl PartialEq for CommandRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for CommandRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.path().iter().map(|c| c.name()).collect();
        write!(f, "CommandRef({})", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opt::OptType;

    fn sample() -> CommandTree {
        Command::new("root")
            .with_opt(Opt::new("debug", OptType::Bool))
            .with_subs([
                Command::new("a").with_sub(Command::new("deep")),
                Command::new("b").with_aliases(["bb"]),
            ])
            .build()
    }

    #[test]
    fn test_parent_and_children_agree() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        for id in 0..tree.len() {
            let cmd = tree.get(CommandId(id)).unwrap();
            for child in cmd.children() {
                assert_eq!(child.parent(), Some(cmd));
            }
            if let Some(parent) = cmd.parent() {
                assert!(parent.children().any(|c| c == cmd));
            }
        }
    }

    #[test]
    fn test_path_runs_root_to_leaf() {
        let tree = sample();
        let deep = tree.find(&["a", "deep"]).unwrap();
        let names: Vec<&str> = deep.path().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["root", "a", "deep"]);
        assert_eq!(deep.root(), tree.root());
        assert!(deep.is_leaf());
        assert!(!tree.root().is_leaf());
    }

    #[test]
    fn test_opts_know_their_parent() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.opts()[0].parent(), Some(root.id()));
    }

    #[test]
    fn test_attach_links_both_sides() {
        let mut tree = sample();
        let b = tree.find(&["bb"]).unwrap().id();
        let c = tree.attach(b, Command::new("c")).unwrap();
        let c = tree.get(c).unwrap();
        assert_eq!(c.parent().map(|p| p.name()), Some("b"));
        assert_eq!(tree.find(&["b", "c"]), Some(c));
        assert!(tree.attach(CommandId(99), Command::new("x")).is_none());
    }
}
