//! Menu nesting tracked while a label is walked
//!
//! The walk is breadth-first, so lines of different menu options arrive
//! interleaved. Each option gets its own branch buffer; a node goes into the
//! deepest branch that already holds all of its local predecessors, or
//! after the menu when its predecessors sit in different branches. Buffers are
//! spliced back under their menu once the label is complete.

use std::collections::HashSet;

use super::writer::Line;

/// Where a line is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    /// The label body
    Root,
    Branch { scope: usize, branch: usize },
}

#[derive(Debug)]
enum Entry {
    Line(Line),
    /// Placeholder for the options of `scopes[idx]`
    Menu(usize),
}

#[derive(Debug)]
struct Branch<'g> {
    header: Line,
    /// Ids emitted inside this option, nested branches included
    body: HashSet<&'g str>,
    entries: Vec<Entry>,
}

#[derive(Debug)]
struct MenuScope<'g> {
    menu: &'g str,
    /// Level of the `menu:` line
    level: usize,
    depth: usize,
    parent: Container,
    branches: Vec<Branch<'g>>,
}

/// Tree of menu scopes for one label body
#[derive(Debug, Default)]
pub(crate) struct Layout<'g> {
    root: Vec<Entry>,
    scopes: Vec<MenuScope<'g>>,
}

impl<'g> Layout<'g> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Deepest branch holding every predecessor
    pub(crate) fn locate(&self, predecessors: &[&str]) -> Container {
        if predecessors.is_empty() {
            return Container::Root;
        }

        let mut best: Option<(usize, Container)> = None;
        for (scope_idx, scope) in self.scopes.iter().enumerate() {
            if best.is_some_and(|(depth, _)| depth >= scope.depth) {
                continue;
            }
            let found = scope
                .branches
                .iter()
                .position(|branch| predecessors.iter().all(|id| branch.body.contains(id)));
            if let Some(branch) = found {
                best = Some((
                    scope.depth,
                    Container::Branch {
                        scope: scope_idx,
                        branch,
                    },
                ));
            }
        }
        best.map_or(Container::Root, |(_, container)| container)
    }

    /// Indentation level of lines appended to `container`
    pub(crate) fn level(&self, container: Container) -> usize {
        match container {
            Container::Root => 1,
            Container::Branch { scope, .. } => self.scopes[scope].level + 2,
        }
    }

    pub(crate) fn push(&mut self, container: Container, line: Line) {
        self.entries_mut(container).push(Entry::Line(line));
    }

    /// Mark `id` as emitted inside `container` and every branch around it
    pub(crate) fn record(&mut self, container: Container, id: &'g str) {
        let mut current = container;
        while let Container::Branch { scope, branch } = current {
            self.scopes[scope].branches[branch].body.insert(id);
            current = self.scopes[scope].parent;
        }
    }

    /// Start a menu scope whose `menu:` line was pushed at `level`
    pub(crate) fn open_menu(&mut self, container: Container, menu: &'g str, level: usize) -> usize {
        let depth = match container {
            Container::Root => 1,
            Container::Branch { scope, .. } => self.scopes[scope].depth + 1,
        };
        let idx = self.scopes.len();
        self.scopes.push(MenuScope {
            menu,
            level,
            depth,
            parent: container,
            branches: Vec::new(),
        });
        self.entries_mut(container).push(Entry::Menu(idx));
        idx
    }

    /// Scope of the menu an option hangs off, latest first
    pub(crate) fn menu_scope(&self, predecessors: &[&str]) -> Option<usize> {
        self.scopes
            .iter()
            .rposition(|scope| predecessors.contains(&scope.menu))
    }

    /// Level of the option lines of `scope`
    pub(crate) fn option_level(&self, scope: usize) -> usize {
        self.scopes[scope].level + 1
    }

    /// Add an option below `scope`; its body lines go into the returned branch
    pub(crate) fn open_branch(&mut self, scope: usize, item: &'g str, header: Line) -> Container {
        let branch = self.scopes[scope].branches.len();
        self.scopes[scope].branches.push(Branch {
            header,
            body: HashSet::new(),
            entries: Vec::new(),
        });
        let container = Container::Branch { scope, branch };
        self.record(container, item);
        container
    }

    /// Flatten the tree into lines, options spliced under their menus
    pub(crate) fn into_lines(mut self, lines: &mut Vec<Line>) {
        let root = std::mem::take(&mut self.root);
        self.flatten(root, lines);
    }

    fn flatten(&mut self, entries: Vec<Entry>, lines: &mut Vec<Line>) {
        for entry in entries {
            match entry {
                Entry::Line(line) => lines.push(line),
                Entry::Menu(idx) => {
                    let branches = std::mem::take(&mut self.scopes[idx].branches);
                    for branch in branches {
                        lines.push(branch.header);
                        self.flatten(branch.entries, lines);
                    }
                }
            }
        }
    }

    fn entries_mut(&mut self, container: Container) -> &mut Vec<Entry> {
        match container {
            Container::Root => &mut self.root,
            Container::Branch { scope, branch } => &mut self.scopes[scope].branches[branch].entries,
        }
    }
}
