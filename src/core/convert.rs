//! Generic value conversion behind identifier translation
//!
//! A [`ConversionService`] converts a value from one type to another. The
//! [`DelegatingConversionService`] holds an ordered list of services and
//! hands each conversion to the first service that claims to support the
//! (source, target) pair; the support check and the delegation use the same
//! predicate, so a service is never asked to convert a pair it was never
//! asked permission for. Registration order is significant and is the
//! tie-break when several services could handle the same pair.

use crate::core::error::{ConvertError, RelError};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a conversion endpoint type: its `TypeId` plus a readable name
/// for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Descriptor for a concrete type
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the described type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The full type name, for error messages
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A source of type-to-type conversions
pub trait ConversionService: Send + Sync {
    /// Whether this service can convert the given pair
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool;

    /// Convert `value` (of the `source` type) into the `target` type
    ///
    /// Implementations must only be called for pairs they reported `true`
    /// for in [`can_convert`](ConversionService::can_convert).
    fn convert(
        &self,
        value: &dyn Any,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Box<dyn Any>, RelError>;
}

type BoxedConverter = Box<dyn Fn(&dyn Any) -> Result<Box<dyn Any>, String> + Send + Sync>;

/// Conversion service backed by closures registered per (source, target) pair
///
/// This is the leaf implementation the delegating service is usually stacked
/// from. Converters may be infallible (plain rendering) or fallible
/// (parsing).
#[derive(Default)]
pub struct SimpleConversionService {
    converters: HashMap<(TypeId, TypeId), BoxedConverter>,
}

impl SimpleConversionService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an infallible converter from `S` to `T`
    pub fn add_converter<S, T>(&mut self, f: impl Fn(&S) -> T + Send + Sync + 'static)
    where
        S: 'static,
        T: 'static,
    {
        self.add_fallible_converter(move |source: &S| Ok(f(source)));
    }

    /// Register a fallible converter from `S` to `T`
    ///
    /// The error string ends up in the `ConversionFailed` diagnostics.
    pub fn add_fallible_converter<S, T>(
        &mut self,
        f: impl Fn(&S) -> Result<T, String> + Send + Sync + 'static,
    ) where
        S: 'static,
        T: 'static,
    {
        let key = (TypeId::of::<S>(), TypeId::of::<T>());
        let converter: BoxedConverter = Box::new(move |value: &dyn Any| {
            let source = value
                .downcast_ref::<S>()
                .ok_or_else(|| "value does not match the declared source type".to_string())?;
            f(source).map(|converted| Box::new(converted) as Box<dyn Any>)
        });
        self.converters.insert(key, converter);
    }
}

impl ConversionService for SimpleConversionService {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.converters.contains_key(&(source.id(), target.id()))
    }

    fn convert(
        &self,
        value: &dyn Any,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Box<dyn Any>, RelError> {
        let converter = self
            .converters
            .get(&(source.id(), target.id()))
            .ok_or(ConvertError::ConverterNotFound {
                source: *source,
                target: *target,
            })?;

        converter(value).map_err(|message| {
            RelError::from(ConvertError::ConversionFailed {
                source: *source,
                target: *target,
                message,
            })
        })
    }
}

/// Ordered chain of conversion services
///
/// `convert` rolls through the registered services and delegates to the
/// first one whose `can_convert` reports `true` for the pair. When none
/// does, it fails with `ConverterNotFound` carrying both type descriptors.
/// Adding a service never removes or reorders existing ones.
#[derive(Default, Clone)]
pub struct DelegatingConversionService {
    services: Vec<Arc<dyn ConversionService>>,
}

impl DelegatingConversionService {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain preloaded with the standard identifier conversions:
    /// `String` to and from `Uuid` and `i64`
    pub fn with_defaults() -> Self {
        let mut standard = SimpleConversionService::new();
        standard.add_fallible_converter(|s: &String| {
            Uuid::parse_str(s.trim()).map_err(|e| e.to_string())
        });
        standard.add_converter(|u: &Uuid| u.to_string());
        standard.add_fallible_converter(|s: &String| {
            s.trim().parse::<i64>().map_err(|e| e.to_string())
        });
        standard.add_converter(|n: &i64| n.to_string());

        let mut chain = Self::new();
        chain.add_service(Arc::new(standard));
        chain
    }

    /// Append a service to the chain; earlier registrants take priority
    pub fn add_service(&mut self, service: Arc<dyn ConversionService>) {
        self.services.push(service);
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Typed conversion convenience, deriving both descriptors from the
    /// static types
    pub fn convert_to<S, T>(&self, value: &S) -> Result<T, RelError>
    where
        S: 'static,
        T: 'static,
    {
        let source = TypeDescriptor::of::<S>();
        let target = TypeDescriptor::of::<T>();
        let converted = ConversionService::convert(self, value, &source, &target)?;

        converted.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            RelError::from(ConvertError::ConversionFailed {
                source,
                target,
                message: "converter produced a value of the wrong type".to_string(),
            })
        })
    }
}

impl ConversionService for DelegatingConversionService {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.services
            .iter()
            .any(|service| service.can_convert(source, target))
    }

    fn convert(
        &self,
        value: &dyn Any,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<Box<dyn Any>, RelError> {
        for service in &self.services {
            if service.can_convert(source, target) {
                return service.convert(value, source, target);
            }
        }

        Err(ConvertError::ConverterNotFound {
            source: *source,
            target: *target,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Conversion service that counts how often it is invoked
    struct CountingService {
        inner: SimpleConversionService,
        invocations: Arc<AtomicUsize>,
    }

    impl ConversionService for CountingService {
        fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
            self.inner.can_convert(source, target)
        }

        fn convert(
            &self,
            value: &dyn Any,
            source: &TypeDescriptor,
            target: &TypeDescriptor,
        ) -> Result<Box<dyn Any>, RelError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.inner.convert(value, source, target)
        }
    }

    #[test]
    fn test_simple_service_converts_registered_pair() {
        let mut service = SimpleConversionService::new();
        service.add_converter(|n: &i64| n.to_string());

        let source = TypeDescriptor::of::<i64>();
        let target = TypeDescriptor::of::<String>();
        assert!(service.can_convert(&source, &target));

        let converted = service.convert(&42i64, &source, &target).unwrap();
        assert_eq!(*converted.downcast::<String>().unwrap(), "42");
    }

    #[test]
    fn test_simple_service_rejects_unregistered_pair() {
        let service = SimpleConversionService::new();
        let source = TypeDescriptor::of::<i64>();
        let target = TypeDescriptor::of::<String>();
        assert!(!service.can_convert(&source, &target));
    }

    #[test]
    fn test_delegates_to_first_supporting_service_only() {
        // A supports i64 -> String, B supports String -> i64. Converting
        // String -> i64 must go to B and never touch A.
        let a_count = Arc::new(AtomicUsize::new(0));
        let b_count = Arc::new(AtomicUsize::new(0));

        let mut a_inner = SimpleConversionService::new();
        a_inner.add_converter(|n: &i64| n.to_string());
        let a = CountingService {
            inner: a_inner,
            invocations: a_count.clone(),
        };

        let mut b_inner = SimpleConversionService::new();
        b_inner.add_fallible_converter(|s: &String| s.parse::<i64>().map_err(|e| e.to_string()));
        let b = CountingService {
            inner: b_inner,
            invocations: b_count.clone(),
        };

        let mut chain = DelegatingConversionService::new();
        chain.add_service(Arc::new(a));
        chain.add_service(Arc::new(b));

        let parsed: i64 = chain.convert_to(&"17".to_string()).unwrap();
        assert_eq!(parsed, 17);
        assert_eq!(a_count.load(Ordering::SeqCst), 0);
        assert_eq!(b_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_earlier_registrant_takes_priority() {
        let mut first = SimpleConversionService::new();
        first.add_converter(|_: &i64| "first".to_string());
        let mut second = SimpleConversionService::new();
        second.add_converter(|_: &i64| "second".to_string());

        let mut chain = DelegatingConversionService::new();
        chain.add_service(Arc::new(first));
        chain.add_service(Arc::new(second));

        let rendered: String = chain.convert_to(&1i64).unwrap();
        assert_eq!(rendered, "first");
    }

    #[test]
    fn test_converter_not_found_carries_descriptors() {
        let chain = DelegatingConversionService::new();
        let result: Result<i64, _> = chain.convert_to(&"17".to_string());

        match result {
            Err(RelError::Convert(ConvertError::ConverterNotFound { source, target })) => {
                assert!(source.name().contains("String"));
                assert!(target.name().contains("i64"));
            }
            other => panic!("expected ConverterNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_default_chain_round_trips_uuid() {
        let chain = DelegatingConversionService::with_defaults();
        let id = Uuid::new_v4();

        let rendered: String = chain.convert_to(&id).unwrap();
        let parsed: Uuid = chain.convert_to(&rendered).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_default_chain_reports_parse_failures() {
        let chain = DelegatingConversionService::with_defaults();
        let result: Result<i64, _> = chain.convert_to(&"not-a-number".to_string());

        assert!(matches!(
            result,
            Err(RelError::Convert(ConvertError::ConversionFailed { .. }))
        ));
    }

    #[test]
    fn test_can_convert_checks_all_services_in_order() {
        let mut only_render = SimpleConversionService::new();
        only_render.add_converter(|n: &i64| n.to_string());

        let mut chain = DelegatingConversionService::new();
        chain.add_service(Arc::new(only_render));

        let source = TypeDescriptor::of::<i64>();
        let target = TypeDescriptor::of::<String>();
        assert!(chain.can_convert(&source, &target));
        assert!(!chain.can_convert(&target, &source));
    }
}
