//! Compiled filter objects with caching and invalidation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ConfigEvents, Subscription};
use crate::expr::evaluator::evaluate;
use crate::expr::parser::Parser;
use crate::expr::{FilterResult, Sequence};
use crate::matcher::MatcherRegistry;
use crate::node::Node;

/// A compiled, cached filter expression.
///
/// The filter string is immutable after construction. The compiled expression
/// tree is built lazily on the first match test and cached on the filter; a
/// configuration change of the form `columns/<name>/type` for a referenced
/// column discards the whole tree (including every block's per-leaf matcher
/// state), and the next match test transparently re-parses and re-resolves.
///
/// Everything here is single-threaded: parsing, evaluation and the
/// notification callback all run on the caller's thread. Multi-threaded hosts
/// must serialize access to a filter externally.
pub struct Filter {
    state: Rc<FilterState>,
    _subscription: Subscription,
}

struct FilterState {
    text: String,
    registry: Rc<dyn MatcherRegistry>,
    ast: RefCell<Option<Sequence>>,
}

impl Filter {
    /// Creates a filter over the given expression text.
    ///
    /// The filter subscribes to `events` for live column-type changes; the
    /// subscription is released when the filter is dropped. The expression is
    /// not parsed here — compilation is deferred to the first
    /// [`is_match`](Filter::is_match) call, where parse errors surface.
    pub fn new(
        text: impl Into<String>,
        registry: Rc<dyn MatcherRegistry>,
        events: &ConfigEvents,
    ) -> Self {
        let state = Rc::new(FilterState {
            text: text.into(),
            registry,
            ast: RefCell::new(None),
        });

        let weak = Rc::downgrade(&state);
        let subscription = events.subscribe(move |key| {
            if let Some(state) = weak.upgrade() {
                state.on_config_changed(key);
            }
        });

        Self {
            state,
            _subscription: subscription,
        }
    }

    /// The original filter expression text.
    pub fn text(&self) -> &str {
        &self.state.text
    }

    /// Returns true if the expression tree is currently compiled and cached.
    pub fn is_compiled(&self) -> bool {
        self.state.ast.borrow().is_some()
    }

    /// Tests a node against the filter, compiling on first use.
    ///
    /// # Errors
    ///
    /// Parse errors (invalid syntax, unknown column) surface on the call that
    /// triggers compilation; no partial tree is retained. Evaluation errors
    /// abort the current test immediately but do not poison the cached tree —
    /// a later call with a different node may still succeed.
    pub fn is_match(&self, node: &dyn Node) -> FilterResult<bool> {
        self.state.ensure_compiled()?;

        let ast = self.state.ast.borrow();
        // ensure_compiled guarantees the slot is filled
        let sequence = ast.as_ref().expect("filter compiled above");
        evaluate(sequence, node)
    }
}

impl FilterState {
    /// Parses and caches the expression tree if it is not already cached.
    fn ensure_compiled(&self) -> FilterResult<()> {
        if self.ast.borrow().is_some() {
            return Ok(());
        }
        let sequence = Parser::new(self.registry.as_ref()).parse(&self.text)?;
        *self.ast.borrow_mut() = Some(sequence);
        Ok(())
    }

    /// Reacts to a configuration change notification.
    ///
    /// Only keys of the form `columns/<name>/type` matter. When the cached
    /// tree references the changed column, the whole tree is discarded — not
    /// just the affected block — and re-parsing is deferred to the next match
    /// test. Invalidation never fails; re-parse errors surface there.
    fn on_config_changed(&self, key: &str) {
        let Some(column) = column_type_key(key) else {
            return;
        };

        let stale = match self.ast.borrow().as_ref() {
            Some(sequence) => sequence.references_column(column),
            None => false,
        };
        if stale {
            self.ast.borrow_mut().take();
        }
    }
}

/// Extracts `<name>` from a `columns/<name>/type` configuration key.
fn column_type_key(key: &str) -> Option<&str> {
    key.strip_prefix("columns/")?.strip_suffix("/type")
}
