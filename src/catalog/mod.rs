//! Built-in pattern demonstrations, grouped by GoF family.

pub mod behavioral;
pub mod creational;
pub mod structural;

use crate::core::example::ExampleDef;
use crate::core::registry::Registry;
use crate::utils::error::Result;
use crate::utils::validation::validate_example_id;

/// Every built-in example in registration order.
pub fn examples() -> impl Iterator<Item = &'static ExampleDef> {
    behavioral::examples()
        .chain(creational::examples())
        .chain(structural::examples())
}

/// Registers the built-in catalog into an existing registry.
pub fn register_all(registry: &mut Registry) -> Result<()> {
    for def in examples() {
        validate_example_id(def.id)?;
        registry.register(*def)?;
    }
    Ok(())
}

/// 建立內建範例目錄
pub fn build_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    register_all(&mut registry)?;
    tracing::debug!("Catalog loaded with {} examples", registry.len());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use crate::utils::error::CatalogError;

    #[test]
    fn test_build_registry() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 46);
        assert_eq!(registry.ids().next(), Some("chain-of-responsibility/structural"));
        assert!(registry.contains("flyweight/money-drop"));
    }

    #[test]
    fn test_every_category_populated() {
        let registry = build_registry().unwrap();
        for category in Category::ALL {
            assert!(registry.list(Some(category)).count() > 0, "{}", category);
        }
        assert_eq!(registry.list(Some(Category::Structural)).count(), 12);
    }

    #[test]
    fn test_registering_twice_collides() {
        let mut registry = build_registry().unwrap();
        let err = register_all(&mut registry).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
        assert_eq!(registry.len(), 46);
    }
}
