pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod flyweight;

use crate::core::example::ExampleDef;

/// Structural examples in catalog order.
pub fn examples() -> impl Iterator<Item = &'static ExampleDef> {
    adapter::EXAMPLES
        .iter()
        .chain(bridge::EXAMPLES)
        .chain(composite::EXAMPLES)
        .chain(flyweight::EXAMPLES)
}
