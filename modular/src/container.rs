use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::binding::{Binding, Lifecycle, Timing};
use crate::{ContainerConfig, Error, Fields, Fill, Receiver, Resolver, Result};

/// Runtime dependency resolution container.
///
/// The container maps abstractions (any `Clone + 'static` type, typically a
/// shared pointer to a trait object) and an optional name to resolvers.
/// Resolvers declare their own dependencies as parameters, which are resolved
/// from the default (unnamed) bindings of the container.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use modular::Container;
///
/// trait Shape {
///     fn set_area(&self, area: i32);
///     fn area(&self) -> i32;
/// }
///
/// struct Circle(Cell<i32>);
///
/// impl Shape for Circle {
///     fn set_area(&self, area: i32) {
///         self.0.set(area);
///     }
///
///     fn area(&self) -> i32 {
///         self.0.get()
///     }
/// }
///
/// # fn main() -> Result<(), modular::Error> {
/// let mut container = Container::new();
/// container.singleton(|| -> Rc<dyn Shape> { Rc::new(Circle(Cell::new(13))) })?;
///
/// container.call(|shape: Rc<dyn Shape>| shape.set_area(666))?;
///
/// let shape = container.resolve::<Rc<dyn Shape>>()?;
/// assert_eq!(shape.area(), 666);
/// # Ok(())
/// # }
/// ```
pub struct Container {
    bindings: HashMap<TypeId, HashMap<String, Rc<dyn Any>>>,
    resolving: RefCell<Vec<ResolutionKey>>,
    config: ContainerConfig,
}

impl Container {
    /// Creates an empty container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Creates an empty container with the provided configuration.
    ///
    /// A `max_depth` of 0 is raised to 1.
    pub fn with_config(config: ContainerConfig) -> Self {
        let max_depth = config.max_depth;
        Self {
            bindings: HashMap::new(),
            resolving: RefCell::new(Vec::new()),
            config: config.with_max_depth(max_depth),
        }
    }

    /// Returns the configuration the container was created with.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Registers a resolver for the abstraction it returns.
    ///
    /// All the `singleton*` and `transient*` methods delegate to this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfDependency`] if the resolver declares a parameter
    /// of the abstraction it returns. With [`Timing::Eager`] the resolver is
    /// invoked immediately and its error is returned; nothing is registered
    /// in that case.
    pub fn bind<Args, R>(
        &mut self,
        name: impl Into<String>,
        lifecycle: Lifecycle,
        timing: Timing,
        resolver: R,
    ) -> Result<()>
    where
        R: Resolver<Args>,
    {
        let name = name.into();
        let abstraction = TypeId::of::<R::Abstraction>();
        if resolver
            .parameters()
            .iter()
            .any(|parameter| parameter.type_id() == abstraction)
        {
            return Err(Error::SelfDependency(type_name::<R::Abstraction>()));
        }
        let concrete = match timing {
            Timing::Eager => Some(resolver.produce(self).into_result()?),
            Timing::Lazy => None,
        };
        let concrete = concrete.filter(|_| lifecycle == Lifecycle::Singleton);
        let binding = Binding::new(
            Box::new(move |container: &Container| resolver.produce(container)),
            concrete,
            lifecycle,
        );
        tracing::debug!(
            abstraction = type_name::<R::Abstraction>(),
            name = %name,
            ?lifecycle,
            ?timing,
            "binding registered"
        );
        self.bindings
            .entry(abstraction)
            .or_default()
            .insert(name, Rc::new(binding));
        Ok(())
    }

    /// Binds an eagerly created singleton.
    pub fn singleton<Args, R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind("", Lifecycle::Singleton, Timing::Eager, resolver)
    }

    /// Binds a singleton created at the first resolution.
    pub fn singleton_lazy<Args, R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind("", Lifecycle::Singleton, Timing::Lazy, resolver)
    }

    /// Binds an eagerly created singleton under `name`.
    pub fn named_singleton<Args, R>(&mut self, name: impl Into<String>, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind(name, Lifecycle::Singleton, Timing::Eager, resolver)
    }

    /// Binds a singleton under `name`, created at the first resolution.
    pub fn named_singleton_lazy<Args, R>(
        &mut self,
        name: impl Into<String>,
        resolver: R,
    ) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind(name, Lifecycle::Singleton, Timing::Lazy, resolver)
    }

    /// Binds a transient whose resolver is also invoked once at bind time.
    pub fn transient<Args, R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind("", Lifecycle::Transient, Timing::Eager, resolver)
    }

    /// Binds a transient whose resolver runs only on resolution.
    pub fn transient_lazy<Args, R>(&mut self, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind("", Lifecycle::Transient, Timing::Lazy, resolver)
    }

    /// Binds a transient under `name`, also invoked once at bind time.
    pub fn named_transient<Args, R>(&mut self, name: impl Into<String>, resolver: R) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind(name, Lifecycle::Transient, Timing::Eager, resolver)
    }

    /// Binds a transient under `name` whose resolver runs only on resolution.
    pub fn named_transient_lazy<Args, R>(
        &mut self,
        name: impl Into<String>,
        resolver: R,
    ) -> Result<()>
    where
        R: Resolver<Args>,
    {
        self.bind(name, Lifecycle::Transient, Timing::Lazy, resolver)
    }

    /// Invokes `receiver` with its parameters resolved from default bindings.
    ///
    /// # Errors
    ///
    /// Returns the first parameter resolution error, in which case the
    /// receiver is not invoked, or the error returned by the receiver.
    pub fn call<Args, F>(&self, receiver: F) -> Result<()>
    where
        F: Receiver<Args>,
    {
        receiver.receive(self)
    }

    /// Resolves the default binding of `T`.
    pub fn resolve<T>(&self) -> Result<T>
    where
        T: Clone + 'static,
    {
        self.named_resolve("")
    }

    /// Resolves the binding of `T` registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedDependency`] if there is no such binding,
    /// otherwise the error of the resolver, unchanged.
    pub fn named_resolve<T>(&self, name: &str) -> Result<T>
    where
        T: Clone + 'static,
    {
        self.materialize(name)
    }

    /// Populates the fields `structure` declares as injectable.
    ///
    /// # Errors
    ///
    /// Stops at the first field that cannot be populated. Fields populated
    /// before it keep their new values.
    pub fn fill<S>(&self, structure: &mut S) -> Result<()>
    where
        S: Fill + ?Sized,
    {
        structure.fill(&Fields::new(self))
    }

    /// Returns `true` if a default binding of `T` is registered.
    pub fn has<T>(&self) -> bool
    where
        T: 'static,
    {
        self.has_named::<T>("")
    }

    /// Returns `true` if a binding of `T` is registered under `name`.
    pub fn has_named<T>(&self, name: &str) -> bool
    where
        T: 'static,
    {
        self.bindings
            .get(&TypeId::of::<T>())
            .is_some_and(|named| named.contains_key(name))
    }

    /// Removes every binding together with its cached instance.
    pub fn reset(&mut self) {
        tracing::debug!(abstractions = self.bindings.len(), "container reset");
        self.bindings.clear();
    }

    /// Resolves a parameter of a resolver or a receiver.
    pub(crate) fn argument<T>(&self) -> Result<T>
    where
        T: Clone + 'static,
    {
        self.materialize("")
    }

    fn materialize<T>(&self, name: &str) -> Result<T>
    where
        T: Clone + 'static,
    {
        let binding = self
            .binding::<T>(name)
            .ok_or_else(|| Error::unresolved::<T>(name))?;
        let _guard = self.enter::<T>(name)?;
        binding.make(self)
    }

    fn binding<T>(&self, name: &str) -> Option<Rc<Binding<T>>>
    where
        T: Clone + 'static,
    {
        let binding = self.bindings.get(&TypeId::of::<T>())?.get(name)?;
        Rc::clone(binding).downcast::<Binding<T>>().ok()
    }

    fn enter<T>(&self, name: &str) -> Result<ResolutionGuard<'_>>
    where
        T: 'static,
    {
        let key = ResolutionKey {
            type_id: TypeId::of::<T>(),
            abstraction: type_name::<T>(),
            name: name.to_owned(),
        };
        let mut stack = self.resolving.borrow_mut();
        if let Some(start) = stack.iter().position(|entry| *entry == key) {
            let path = stack[start..]
                .iter()
                .chain([&key])
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::CyclicDependency(path));
        }
        if stack.len() >= self.config.max_depth {
            return Err(Error::DepthExceeded(self.config.max_depth));
        }
        stack.push(key);
        Ok(ResolutionGuard {
            stack: &self.resolving,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("abstractions", &self.bindings.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A binding currently being materialized.
struct ResolutionKey {
    type_id: TypeId,
    abstraction: &'static str,
    name: String,
}

impl PartialEq for ResolutionKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl fmt::Display for ResolutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.abstraction)
        } else {
            write!(f, "{}[{}]", self.abstraction, self.name)
        }
    }
}

/// Pops the resolution stack when the materialization finishes.
struct ResolutionGuard<'a> {
    stack: &'a RefCell<Vec<ResolutionKey>>,
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}
