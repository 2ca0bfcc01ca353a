use std::any::type_name;

/// Type alias for boxed errors that can be sent across threads.
///
/// Resolvers and receivers may fail with any error convertible into this type.
pub type StdError = Box<dyn std::error::Error + Send + Sync>;

/// Alias to [`core::result::Result`] with [`Error`] as the default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur while binding, resolving or injecting abstractions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resolver declares a parameter of the abstraction it returns.
    #[error("resolver depends on the abstraction it returns: {0}")]
    SelfDependency(&'static str),
    /// No binding is registered for the requested abstraction and name.
    #[error("no concrete found for: {}", display_key(.abstraction, .name))]
    UnresolvedDependency {
        abstraction: &'static str,
        name: String,
    },
    /// Resolution re-entered a binding that is already being materialized.
    #[error("cyclic dependency detected: {0}")]
    CyclicDependency(String),
    /// Nested resolution went deeper than the configured limit.
    #[error("resolution depth exceeded the limit of {0}")]
    DepthExceeded(usize),
    /// A field declares an inject tag other than `type` or `name`.
    #[error("{0} has an invalid inject tag")]
    InvalidFieldTag(String),
    /// A tagged field could not be resolved.
    #[error("cannot make {0} field")]
    CannotPopulateField(String),
    /// An error returned by a resolver or a receiver.
    #[error(transparent)]
    Resolver(StdError),
}

impl Error {
    pub(crate) fn unresolved<T>(name: &str) -> Self
    where
        T: 'static,
    {
        Self::UnresolvedDependency {
            abstraction: type_name::<T>(),
            name: name.to_owned(),
        }
    }

    /// Wraps an application error returned by a resolver or a receiver.
    ///
    /// Errors produced by the container itself and passed back through a
    /// resolver are unwrapped, so they reach the caller unchanged.
    pub fn from_resolver(err: impl Into<StdError>) -> Self {
        match err.into().downcast::<Error>() {
            Ok(err) => *err,
            Err(err) => Self::Resolver(err),
        }
    }

    /// Returns the application error if this error came from a resolver.
    pub fn resolver_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Resolver(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

fn display_key(abstraction: &str, name: &str) -> String {
    if name.is_empty() {
        abstraction.to_owned()
    } else {
        format!("{abstraction} (named {name:?})")
    }
}
