/// Result alias used by the fallible constructors in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Misuse reported by the containers. Missing keys are not errors; lookups and
/// removals report them with `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument can never produce a usable container.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}
