pub mod abstract_factory;
pub mod builder;
pub mod factory;
pub mod object_pool;
pub mod prototype;
pub mod singleton;

use crate::core::example::ExampleDef;

/// Creational examples in catalog order.
pub fn examples() -> impl Iterator<Item = &'static ExampleDef> {
    abstract_factory::EXAMPLES
        .iter()
        .chain(factory::EXAMPLES)
        .chain(prototype::EXAMPLES)
        .chain(singleton::EXAMPLES)
        .chain(object_pool::EXAMPLES)
        .chain(builder::EXAMPLES)
}
