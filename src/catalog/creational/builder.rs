use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[ExampleDef::new(
    "builder/pizza",
    Category::Creational,
    "Cook assembling pizzas step by step through interchangeable builders",
    pizza,
)];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Pizza {
    name: String,
    dough: String,
    sauce: String,
    topping: String,
}

impl Pizza {
    fn open(&self, out: &mut Transcript) {
        out.line(format!(
            "{} pizza with {} dough, {} sauce and {} topping.",
            self.name, self.dough, self.sauce, self.topping
        ));
        out.blank();
    }
}

trait PizzaBuilder {
    fn pizza(&mut self) -> &mut Pizza;

    fn build_name(&mut self);
    fn build_dough(&mut self);
    fn build_sauce(&mut self);
    fn build_topping(&mut self);

    fn reset(&mut self) {
        *self.pizza() = Pizza::default();
    }

    fn take(&mut self) -> Pizza {
        std::mem::take(self.pizza())
    }
}

/// Declares a builder whose every step sets a fixed value.
macro_rules! fixed_builder {
    ($ty:ident { $name:expr, $dough:expr, $sauce:expr, $topping:expr }) => {
        #[derive(Default)]
        struct $ty {
            pizza: Pizza,
        }

        impl PizzaBuilder for $ty {
            fn pizza(&mut self) -> &mut Pizza {
                &mut self.pizza
            }

            fn build_name(&mut self) {
                self.pizza.name = $name.to_string();
            }

            fn build_dough(&mut self) {
                self.pizza.dough = $dough.to_string();
            }

            fn build_sauce(&mut self) {
                self.pizza.sauce = $sauce.to_string();
            }

            fn build_topping(&mut self) {
                self.pizza.topping = $topping.to_string();
            }
        }
    };
}

fixed_builder!(SpicyPizzaBuilder { "Spicy", "pan baked", "hot", "pepperoni + salami" });
fixed_builder!(IsraeliPizzaBuilder { "Israeli", "oven baked", "tomato sauce", "olives + onion" });
fixed_builder!(HawaiianPizzaBuilder { "Hawaiian", "cross", "mild", "ham + pineapple" });

/// The director: knows the order of the steps, not what they do.
struct Cook;

impl Cook {
    fn construct(&self, builder: &mut dyn PizzaBuilder) -> Pizza {
        builder.reset();
        builder.build_name();
        builder.build_dough();
        builder.build_sauce();
        builder.build_topping();
        builder.take()
    }
}

fn pizza(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let cook = Cook;
    let mut builders: [Box<dyn PizzaBuilder>; 3] = [
        Box::new(SpicyPizzaBuilder::default()),
        Box::new(IsraeliPizzaBuilder::default()),
        Box::new(HawaiianPizzaBuilder::default()),
    ];
    for builder in builders.iter_mut() {
        cook.construct(builder.as_mut()).open(out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cook_builds_each_pizza() {
        let mut out = Transcript::new();
        pizza(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "Spicy pizza with pan baked dough, hot sauce and pepperoni + salami topping.",
                "",
                "Israeli pizza with oven baked dough, tomato sauce sauce and olives + onion topping.",
                "",
                "Hawaiian pizza with cross dough, mild sauce and ham + pineapple topping.",
                "",
            ]
        );
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut builder = SpicyPizzaBuilder::default();
        let first = Cook.construct(&mut builder);
        let second = Cook.construct(&mut builder);
        assert_eq!(first, second);
        assert_eq!(builder.pizza, Pizza::default());
    }
}
