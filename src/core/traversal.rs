//! Record traversal engine
//!
//! Walks the scope chain from the root down to the record's own attributes,
//! maintaining the current group path. Every attribute goes through the
//! hook chain, is resolved, optionally rewritten, and then either expanded
//! (groups) or handed to the printer (leaves). A group is announced to the
//! printer only once its first leaf is printed, so groups left without
//! printable leaves produce no output. Deferred actions collected along the
//! way run in reverse order once the walk is done.

use super::attr::Attr;
use super::config::ReplaceAttr;
use super::hook::{run_chain, AttrHook, ChainOutcome, DeferredAction};
use super::printer::AttrPrinter;
use super::scope::ScopeNode;
use super::value::Value;

/// Counters gathered while walking one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TraversalStats {
    pub printed: u64,
    pub suppressed: u64,
    pub deferred_run: u64,
}

pub(crate) struct Traversal<'a> {
    out: String,
    groups: Vec<String>,
    /// Leading groups already announced with `enter_group`
    entered: usize,
    hooks: &'a [AttrHook],
    replace_attr: Option<&'a ReplaceAttr>,
    printer: Box<dyn AttrPrinter + 'a>,
    deferred: Vec<DeferredAction>,
    stats: TraversalStats,
}

impl<'a> Traversal<'a> {
    /// `out` already holds the rendered preamble
    pub fn new(
        out: String,
        hooks: &'a [AttrHook],
        replace_attr: Option<&'a ReplaceAttr>,
        printer: Box<dyn AttrPrinter + 'a>,
    ) -> Self {
        Self {
            out,
            groups: Vec::new(),
            entered: 0,
            hooks,
            replace_attr,
            printer,
            deferred: Vec::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Walk `chain`, ordered root first
    pub fn walk(&mut self, chain: &[&ScopeNode]) {
        let Some((node, rest)) = chain.split_first() else {
            return;
        };

        let group = node.group();
        if let Some(name) = group {
            self.groups.push(name.to_string());
        }

        for attr in node.attrs() {
            self.print_attr(attr.clone());
        }
        self.walk(rest);

        if group.is_some() {
            self.leave_group();
        }
    }

    /// Announce every pending group on the path, outermost first
    fn enter_pending(&mut self) {
        while self.entered < self.groups.len() {
            self.entered += 1;
            self.printer.enter_group(&mut self.out, &self.groups[..self.entered]);
        }
    }

    fn leave_group(&mut self) {
        if self.entered == self.groups.len() {
            self.printer.exit_group(&mut self.out, &self.groups);
            self.entered -= 1;
        }
        self.groups.pop();
    }

    fn print_attr(&mut self, attr: Attr) {
        if attr.is_empty() {
            return;
        }

        let attr = match run_chain(self.hooks, &self.groups, attr, &mut self.deferred) {
            ChainOutcome::Print(attr) => attr,
            ChainOutcome::Suppressed => {
                self.stats.suppressed += 1;
                return;
            }
        };

        let attr = self.resolve(attr);
        if attr.is_empty() {
            return;
        }

        match attr.value {
            Value::Group(children) => {
                if children.is_empty() {
                    return;
                }
                if attr.key.is_empty() {
                    for child in children {
                        self.print_attr(child);
                    }
                    return;
                }

                self.groups.push(attr.key);
                for child in children {
                    self.print_attr(child);
                }
                self.leave_group();
            }
            _ => {
                self.enter_pending();
                self.printer.print(&mut self.out, &self.groups, &attr);
                self.stats.printed += 1;
            }
        }
    }

    fn resolve(&self, attr: Attr) -> Attr {
        let resolved = Attr {
            key: attr.key,
            value: attr.value.resolve(),
        };
        match self.replace_attr {
            Some(replace) if !resolved.value.is_group() => replace(&self.groups, resolved),
            _ => resolved,
        }
    }

    /// Run deferred actions, last registered first, and return the buffer
    pub fn finish(mut self) -> (String, TraversalStats) {
        while let Some(action) = self.deferred.pop() {
            if action.run(&mut self.out).is_ok() {
                self.stats.deferred_run += 1;
            }
        }
        (self.out, self.stats)
    }
}
