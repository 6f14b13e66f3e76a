//! Error types for attach-time contract violations.
//!
//! All of these are programmer-error conditions raised synchronously at the
//! call that violates the contract. None are transient and none are retried.
//! Note that the observed [`SplitView`](crate::SplitView) deliberately does
//! NOT error when the live panel count drops below 2 — it removes its handles
//! and waits. Only the static [`SplitPair`](crate::SplitPair) is strict about
//! child counts.

/// Errors raised when attaching or configuring a split.
#[derive(Debug, thiserror::Error)]
pub enum SashError {
    /// No container was supplied in the options.
    #[error("no container was supplied")]
    MissingContainer,

    /// The static two-panel variant was attached to a container whose panel
    /// count is not exactly 2.
    #[error("container must hold exactly 2 panels, found {0}")]
    InvalidChildCount(usize),

    /// `attach()` was called twice without an intervening `detach()`.
    #[error("already attached; call detach() first")]
    AlreadyAttached,

    /// An option value is outside its valid range.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
