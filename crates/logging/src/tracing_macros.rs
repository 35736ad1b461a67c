//! crates/logging/src/tracing_macros.rs
//! Convenience macros for subsystem-scoped tracing.
//!
//! Each macro forwards to the standard `tracing` macro at the subsystem's
//! usual level, on the subsystem's target. Calling crates must depend on
//! `tracing` themselves.

/// Emit a resolver trace.
///
/// # Example
/// ```ignore
/// trace_resolve!(remote = %name, "falling back to origin");
/// ```
#[macro_export]
macro_rules! trace_resolve {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lfs::resolve", $($arg)*);
    };
}

/// Emit an alias rewrite trace.
///
/// # Example
/// ```ignore
/// trace_alias!("rewrote {} to {}", from, to);
/// ```
#[macro_export]
macro_rules! trace_alias {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lfs::alias", $($arg)*);
    };
}

/// Emit a classifier trace.
///
/// # Example
/// ```ignore
/// trace_classify!(kind = ?kind, "classified {}", raw);
/// ```
#[macro_export]
macro_rules! trace_classify {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "lfs::classify", $($arg)*);
    };
}

/// Emit an access-mode trace.
///
/// # Example
/// ```ignore
/// trace_access!(url = %url, mode = %mode, "access mode updated");
/// ```
#[macro_export]
macro_rules! trace_access {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lfs::access", $($arg)*);
    };
}

/// Emit a FETCH_HEAD trace.
///
/// # Example
/// ```ignore
/// trace_fetch_head!("using remote URL {}", url);
/// ```
#[macro_export]
macro_rules! trace_fetch_head {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "lfs::fetch_head", $($arg)*);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_expand_without_subscriber() {
        trace_resolve!("resolve {}", 1);
        trace_alias!(from = "ex:", "alias");
        trace_classify!("classify");
        trace_access!(mode = %"basic", "access");
        trace_fetch_head!("fetch head");
    }
}
