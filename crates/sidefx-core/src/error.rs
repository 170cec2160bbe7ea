use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// A `TaskScope` was used after its owning group left composition.
    #[error("task scope is disposed; its component has left composition")]
    ScopeDisposed,
    /// The recomposer was shut down.
    #[error("recomposer is disposed")]
    Disposed,
}
