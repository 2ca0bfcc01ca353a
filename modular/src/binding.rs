use std::any::type_name;
use std::cell::RefCell;

use crate::{Container, Produced, Result};

/// Lifecycle of a binding, fixed at bind time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The first produced value is cached and shared by every resolution.
    Singleton,
    /// The resolver is invoked on every resolution.
    Transient,
}

/// When a resolver is invoked for the first time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timing {
    /// At bind time.
    Eager,
    /// At the first resolution.
    Lazy,
}

pub(crate) type BoxedResolver<T> = Box<dyn Fn(&Container) -> Produced<T>>;

/// A resolver together with its lifecycle and cached instance.
pub(crate) struct Binding<T> {
    resolver: BoxedResolver<T>,
    concrete: RefCell<Option<T>>,
    lifecycle: Lifecycle,
}

impl<T> Binding<T>
where
    T: Clone + 'static,
{
    pub(crate) fn new(resolver: BoxedResolver<T>, concrete: Option<T>, lifecycle: Lifecycle) -> Self {
        Self {
            resolver,
            concrete: RefCell::new(concrete),
            lifecycle,
        }
    }

    /// Returns the cached instance or invokes the resolver.
    ///
    /// A singleton caches whatever value the resolver produced, including a
    /// value returned alongside an error. A failure without a value leaves the
    /// binding uncached, so the next call invokes the resolver again.
    pub(crate) fn make(&self, container: &Container) -> Result<T> {
        if let Some(instance) = self.cached() {
            tracing::trace!(abstraction = type_name::<T>(), "singleton cache hit");
            return Ok(instance);
        }
        tracing::trace!(
            abstraction = type_name::<T>(),
            lifecycle = ?self.lifecycle,
            "invoking resolver"
        );
        let produced = (self.resolver)(container);
        if self.lifecycle == Lifecycle::Singleton
            && let Some(instance) = produced.instance()
        {
            self.concrete.replace(Some(instance.clone()));
        }
        produced.into_result()
    }

    fn cached(&self) -> Option<T> {
        match self.lifecycle {
            Lifecycle::Singleton => self.concrete.borrow().clone(),
            Lifecycle::Transient => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::Error;

    fn counting(calls: &Rc<Cell<usize>>, fail_first: bool) -> BoxedResolver<Rc<usize>> {
        let calls = Rc::clone(calls);
        Box::new(move |_: &Container| {
            calls.set(calls.get() + 1);
            if fail_first && calls.get() == 1 {
                return Produced::Failed(Error::from_resolver("app: error"));
            }
            Produced::Instance(Rc::new(calls.get()))
        })
    }

    #[test]
    fn test_singleton_caches() {
        let container = Container::new();
        let calls = Rc::new(Cell::new(0));
        let binding = Binding::new(counting(&calls, false), None, Lifecycle::Singleton);
        let first = binding.make(&container).unwrap();
        let second = binding.make(&container).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_singleton_with_eager_instance() {
        let container = Container::new();
        let calls = Rc::new(Cell::new(0));
        let binding = Binding::new(counting(&calls, false), Some(Rc::new(42)), Lifecycle::Singleton);
        assert_eq!(*binding.make(&container).unwrap(), 42);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_singleton_retries_after_failure() {
        let container = Container::new();
        let calls = Rc::new(Cell::new(0));
        let binding = Binding::new(counting(&calls, true), None, Lifecycle::Singleton);
        assert!(binding.make(&container).is_err());
        assert_eq!(*binding.make(&container).unwrap(), 2);
        assert_eq!(*binding.make(&container).unwrap(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_singleton_caches_partial() {
        let container = Container::new();
        let binding = Binding::new(
            Box::new(|_: &Container| Produced::Partial(Rc::new(1), Error::from_resolver("app: error"))),
            None,
            Lifecycle::Singleton,
        );
        assert!(binding.make(&container).is_err());
        assert_eq!(*binding.make(&container).unwrap(), 1);
    }

    #[test]
    fn test_transient_never_caches() {
        let container = Container::new();
        let calls = Rc::new(Cell::new(0));
        let binding = Binding::new(counting(&calls, false), Some(Rc::new(42)), Lifecycle::Transient);
        assert_eq!(*binding.make(&container).unwrap(), 1);
        assert_eq!(*binding.make(&container).unwrap(), 2);
        assert_eq!(calls.get(), 2);
    }
}
