pub mod chain_of_responsibility;
pub mod iterator;
pub mod mediator;
pub mod memento;
pub mod observer;
pub mod strategy;

use crate::core::example::ExampleDef;

/// Behavioral examples in catalog order.
pub fn examples() -> impl Iterator<Item = &'static ExampleDef> {
    chain_of_responsibility::EXAMPLES
        .iter()
        .chain(iterator::EXAMPLES)
        .chain(mediator::EXAMPLES)
        .chain(memento::EXAMPLES)
        .chain(observer::EXAMPLES)
        .chain(strategy::EXAMPLES)
}
