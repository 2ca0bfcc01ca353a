use crate::Error;

/// Converts container errors into panics.
///
/// Useful during application wiring, where a missing or failing binding is a
/// programming error rather than a recoverable condition.
///
/// ```rust,should_panic
/// use std::rc::Rc;
///
/// use modular::{Container, Must as _};
///
/// let container = Container::new();
/// let _value = container.resolve::<Rc<u8>>().must();
/// ```
pub trait Must<T> {
    /// Returns the contained value or panics with the error message.
    fn must(self) -> T;
}

impl<T> Must<T> for Result<T, Error> {
    #[track_caller]
    fn must(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
