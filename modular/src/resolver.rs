//! Capabilities of closures accepted by the [`Container`].
//!
//! A resolver is any `Fn(A1, .., An) -> R` closure whose parameters are
//! abstractions registered in the container and whose return type implements
//! [`IntoInstance`]. A receiver passed to [`Container::call`] is any
//! `FnOnce(A1, .., An) -> R` with `R: IntoCallResult`. Both are supported up to
//! twelve parameters.

use std::any::{TypeId, type_name};
use std::rc::Rc;
use std::sync::Arc;

use crate::{Container, Error, StdError};

/// Type identity of a resolver or receiver parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameter {
    type_id: TypeId,
    type_name: &'static str,
}

impl Parameter {
    /// Describes a parameter of type `T`.
    pub fn of<T>() -> Self
    where
        T: 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the parameter type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the name of the parameter type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Outcome of a single resolver invocation.
#[derive(Debug)]
pub enum Produced<T> {
    /// The resolver returned a value.
    Instance(T),
    /// The resolver, or the resolution of one of its parameters, failed.
    Failed(Error),
    /// The resolver returned a value alongside an error.
    Partial(T, Error),
}

impl<T> Produced<T> {
    /// Returns the produced value, if any, even when an error was reported.
    pub fn instance(&self) -> Option<&T> {
        match self {
            Self::Instance(instance) | Self::Partial(instance, _) => Some(instance),
            Self::Failed(_) => None,
        }
    }

    /// Converts into a result, preferring the error when one was reported.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Instance(instance) => Ok(instance),
            Self::Failed(err) | Self::Partial(_, err) => Err(err),
        }
    }
}

/// Return shapes a resolver may use.
///
/// For shared pointers `P` (`Rc` and `Arc`) the accepted shapes are `P<T>`,
/// `Result<P<T>, E>` and `(P<T>, Option<E>)`, where `E: Into<StdError>`.
/// The produced abstraction is `P<T>` in every case.
pub trait IntoInstance {
    type Abstraction: Clone + 'static;

    /// Converts the resolver return value into a resolution outcome.
    fn into_instance(self) -> Produced<Self::Abstraction>;
}

macro_rules! impl_into_instance {
    ($ptr:ident) => {
        impl<T> IntoInstance for $ptr<T>
        where
            T: ?Sized + 'static,
        {
            type Abstraction = $ptr<T>;

            fn into_instance(self) -> Produced<Self::Abstraction> {
                Produced::Instance(self)
            }
        }

        impl<T, E> IntoInstance for core::result::Result<$ptr<T>, E>
        where
            T: ?Sized + 'static,
            E: Into<StdError>,
        {
            type Abstraction = $ptr<T>;

            fn into_instance(self) -> Produced<Self::Abstraction> {
                match self {
                    Ok(instance) => Produced::Instance(instance),
                    Err(err) => Produced::Failed(Error::from_resolver(err)),
                }
            }
        }

        impl<T, E> IntoInstance for ($ptr<T>, Option<E>)
        where
            T: ?Sized + 'static,
            E: Into<StdError>,
        {
            type Abstraction = $ptr<T>;

            fn into_instance(self) -> Produced<Self::Abstraction> {
                match self {
                    (instance, None) => Produced::Instance(instance),
                    (instance, Some(err)) => Produced::Partial(instance, Error::from_resolver(err)),
                }
            }
        }
    };
}

impl_into_instance!(Rc);
impl_into_instance!(Arc);

/// Return shapes a receiver may use: `()` or `Result<(), E>`.
pub trait IntoCallResult {
    /// Converts the receiver return value into a container result.
    fn into_call_result(self) -> Result<(), Error>;
}

impl IntoCallResult for () {
    fn into_call_result(self) -> Result<(), Error> {
        Ok(())
    }
}

impl<E> IntoCallResult for core::result::Result<(), E>
where
    E: Into<StdError>,
{
    fn into_call_result(self) -> Result<(), Error> {
        self.map_err(Error::from_resolver)
    }
}

/// A factory for an abstraction whose parameters are resolved from the container.
pub trait Resolver<Args>: 'static {
    /// The abstraction this resolver produces.
    type Abstraction: Clone + 'static;

    /// Returns the types of the declared parameters, in order.
    fn parameters(&self) -> Vec<Parameter>;

    /// Resolves the parameters and invokes the resolver.
    fn produce(&self, container: &Container) -> Produced<Self::Abstraction>;
}

/// A closure invoked once with parameters resolved from the container.
pub trait Receiver<Args> {
    /// Resolves the parameters and invokes the closure.
    fn receive(self, container: &Container) -> Result<(), Error>;
}

macro_rules! impl_callables {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> Resolver<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + 'static,
            R: IntoInstance,
            $($arg: Clone + 'static,)*
        {
            type Abstraction = R::Abstraction;

            fn parameters(&self) -> Vec<Parameter> {
                vec![$(Parameter::of::<$arg>()),*]
            }

            #[allow(non_snake_case, unused_variables)]
            fn produce(&self, container: &Container) -> Produced<Self::Abstraction> {
                $(
                    let $arg = match container.argument::<$arg>() {
                        Ok(value) => value,
                        Err(err) => return Produced::Failed(err),
                    };
                )*
                self($($arg),*).into_instance()
            }
        }

        impl<F, R, $($arg,)*> Receiver<($($arg,)*)> for F
        where
            F: FnOnce($($arg),*) -> R,
            R: IntoCallResult,
            $($arg: Clone + 'static,)*
        {
            #[allow(non_snake_case, unused_variables)]
            fn receive(self, container: &Container) -> Result<(), Error> {
                $(let $arg = container.argument::<$arg>()?;)*
                self($($arg),*).into_call_result()
            }
        }
    };
}

impl_callables!();
impl_callables!(A1);
impl_callables!(A1, A2);
impl_callables!(A1, A2, A3);
impl_callables!(A1, A2, A3, A4);
impl_callables!(A1, A2, A3, A4, A5);
impl_callables!(A1, A2, A3, A4, A5, A6);
impl_callables!(A1, A2, A3, A4, A5, A6, A7);
impl_callables!(A1, A2, A3, A4, A5, A6, A7, A8);
impl_callables!(A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_callables!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_callables!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_callables!(A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
