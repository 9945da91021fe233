use std::cell::Cell;

thread_local! {
    /// Whether operations on the current thread record graph nodes.
    static GRAD_ENABLED: Cell<bool> = Cell::new(true);
}

/// Returns `true` if operations on the current thread build a computation graph.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|flag| flag.get())
}

/// Scope guard returned by [`no_grad`].
///
/// While it is alive, operations return untracked tensors without graph nodes.
/// Dropping it restores the mode that was active before, including during a
/// panic unwind.
#[must_use = "gradient tracking is re-enabled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct NoGradGuard {
    previous: bool,
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.previous));
    }
}

/// Disables gradient tracking on the current thread until the guard is dropped.
///
/// ```
/// use minigrad_core::autograd::{is_grad_enabled, no_grad};
///
/// {
///     let _guard = no_grad();
///     assert!(!is_grad_enabled());
/// }
/// assert!(is_grad_enabled());
/// ```
pub fn no_grad() -> NoGradGuard {
    let previous = GRAD_ENABLED.with(|flag| flag.replace(false));
    NoGradGuard { previous }
}

/// Runs `f` with gradient tracking disabled.
pub fn with_no_grad<R>(f: impl FnOnce() -> R) -> R {
    let _guard = no_grad();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_guards_restore_in_order() {
        assert!(is_grad_enabled());
        let outer = no_grad();
        {
            let _inner = no_grad();
            assert!(!is_grad_enabled());
        }
        // inner restored the outer (disabled) state
        assert!(!is_grad_enabled());
        drop(outer);
        assert!(is_grad_enabled());
    }

    #[test]
    fn test_mode_restored_after_panic() {
        let result = std::panic::catch_unwind(|| {
            with_no_grad(|| {
                assert!(!is_grad_enabled());
                panic!("boom");
            })
        });
        assert!(result.is_err());
        assert!(is_grad_enabled());
    }
}
