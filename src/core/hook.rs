//! Attribute hooks
//!
//! A hook sees every attribute before it is printed, together with the
//! current group path. It may leave the attribute alone, replace it, or
//! suppress it, and it may schedule a [`DeferredAction`] that writes extra
//! output once all attributes of the record are printed.
//!
//! Returning `None` from a hook means "no effect". Suppression is an explicit
//! [`AttrAction::Suppress`]: the attribute is dropped and later hooks are not
//! consulted for it. Deferred actions registered before (or together with)
//! the suppression still run.

use super::attr::Attr;
use std::fmt;
use std::sync::Arc;

/// Interceptor called with `(group path, attribute)` for every attribute
pub type AttrHook = Arc<dyn Fn(&[String], &Attr) -> Option<HandleAttr> + Send + Sync>;

/// Build an [`AttrHook`] from a closure
pub fn attr_hook<F>(f: F) -> AttrHook
where
    F: Fn(&[String], &Attr) -> Option<HandleAttr> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What happens to the hooked attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AttrAction {
    /// Print the attribute as it is
    #[default]
    Keep,
    /// Print this attribute instead; later hooks see the replacement
    Replace(Attr),
    /// Print nothing for this attribute
    Suppress,
}

/// Output produced after the record's attributes
///
/// Actions run in reverse registration order and append to the line buffer
/// before the trailing newline.
pub struct DeferredAction(Box<dyn FnOnce(&mut dyn fmt::Write) -> fmt::Result + Send>);

impl DeferredAction {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut dyn fmt::Write) -> fmt::Result + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Deferred action writing fixed text
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |w| w.write_str(&text))
    }

    pub(crate) fn run(self, out: &mut dyn fmt::Write) -> fmt::Result {
        (self.0)(out)
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredAction(..)")
    }
}

/// Result of one hook invocation
#[derive(Debug, Default)]
pub struct HandleAttr {
    pub action: AttrAction,
    pub deferred: Option<DeferredAction>,
}

impl HandleAttr {
    pub fn replace(attr: Attr) -> Self {
        Self {
            action: AttrAction::Replace(attr),
            deferred: None,
        }
    }

    pub fn suppress() -> Self {
        Self {
            action: AttrAction::Suppress,
            deferred: None,
        }
    }

    pub fn defer(action: DeferredAction) -> Self {
        Self {
            action: AttrAction::Keep,
            deferred: Some(action),
        }
    }

    #[must_use]
    pub fn with_deferred(mut self, action: DeferredAction) -> Self {
        self.deferred = Some(action);
        self
    }
}

/// Outcome of running the whole chain on one attribute
#[derive(Debug)]
pub(crate) enum ChainOutcome {
    Print(Attr),
    Suppressed,
}

/// Run `hooks` in order, collecting deferred actions into `deferred`
pub(crate) fn run_chain(
    hooks: &[AttrHook],
    groups: &[String],
    attr: Attr,
    deferred: &mut Vec<DeferredAction>,
) -> ChainOutcome {
    let mut attr = attr;
    for hook in hooks {
        let Some(handle) = hook(groups, &attr) else {
            continue;
        };
        if let Some(action) = handle.deferred {
            deferred.push(action);
        }
        match handle.action {
            AttrAction::Keep => {}
            AttrAction::Replace(replacement) => attr = replacement,
            AttrAction::Suppress => return ChainOutcome::Suppressed,
        }
    }
    ChainOutcome::Print(attr)
}
