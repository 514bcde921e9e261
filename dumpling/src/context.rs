//! Per-dump traversal state: depth counter and ancestor stack.

use std::cell::RefCell;

use crate::reflect::NodeIdentity;

/// Mutable state owned by one `dump` invocation.
///
/// Created at the start of a dump, destroyed at the end, never shared across
/// concurrent dumps. The ancestor stack is identity-keyed: a node is circular
/// iff it is reference-identical to an ancestor currently being visited.
/// Value types and strings are never tracked.
pub struct VisitContext {
    ancestors: Vec<NodeIdentity>,
    depth: usize,
    max_depth: usize,
}

impl VisitContext {
    /// Fresh context for a dump with the given depth cap.
    pub fn new(max_depth: usize) -> Self {
        Self {
            ancestors: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the current node is beyond the depth cap.
    pub fn is_max_depth(&self) -> bool {
        self.depth > self.max_depth
    }

    /// Whether the identity is on the in-progress ancestor stack.
    pub fn is_visited(&self, identity: NodeIdentity) -> bool {
        self.ancestors.contains(&identity)
    }
}

/// Scoped depth increment; the decrement runs on every exit path.
pub(crate) struct DepthGuard<'a> {
    ctx: &'a RefCell<VisitContext>,
}

impl<'a> DepthGuard<'a> {
    pub(crate) fn enter(ctx: &'a RefCell<VisitContext>) -> Self {
        ctx.borrow_mut().depth += 1;
        Self { ctx }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.ctx.borrow_mut().depth -= 1;
    }
}

/// Scoped ancestor push; the pop runs on every exit path.
pub(crate) struct AncestorGuard<'a> {
    ctx: &'a RefCell<VisitContext>,
}

impl<'a> AncestorGuard<'a> {
    pub(crate) fn push(ctx: &'a RefCell<VisitContext>, identity: NodeIdentity) -> Self {
        ctx.borrow_mut().ancestors.push(identity);
        Self { ctx }
    }
}

impl Drop for AncestorGuard<'_> {
    fn drop(&mut self) {
        self.ctx.borrow_mut().ancestors.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflect;

    #[test]
    fn test_depth_guard_unwinds_on_early_return() {
        let ctx = RefCell::new(VisitContext::new(10));

        fn descend(ctx: &RefCell<VisitContext>, early: bool) {
            let _guard = DepthGuard::enter(ctx);
            assert_eq!(ctx.borrow().depth(), 1);
            if early {
                return;
            }
            let _inner = DepthGuard::enter(ctx);
            assert_eq!(ctx.borrow().depth(), 2);
        }

        descend(&ctx, true);
        assert_eq!(ctx.borrow().depth(), 0);
        descend(&ctx, false);
        assert_eq!(ctx.borrow().depth(), 0);
    }

    #[test]
    fn test_ancestor_guard() {
        let ctx = RefCell::new(VisitContext::new(10));
        let node = String::from("node");
        let identity = (&node as &dyn Reflect).identity();

        assert!(!ctx.borrow().is_visited(identity));
        {
            let _guard = AncestorGuard::push(&ctx, identity);
            assert!(ctx.borrow().is_visited(identity));
        }
        assert!(!ctx.borrow().is_visited(identity));
    }

    #[test]
    fn test_max_depth_boundary() {
        let ctx = RefCell::new(VisitContext::new(2));
        let _a = DepthGuard::enter(&ctx);
        assert!(!ctx.borrow().is_max_depth());
        let _b = DepthGuard::enter(&ctx);
        assert!(!ctx.borrow().is_max_depth());
        let _c = DepthGuard::enter(&ctx);
        assert!(ctx.borrow().is_max_depth());
    }
}
