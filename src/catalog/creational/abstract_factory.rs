use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "abstract-factory/structural",
        Category::Creational,
        "Two factories producing matching product families",
        structural,
    ),
    ExampleDef::new(
        "abstract-factory/animal-world",
        Category::Creational,
        "Continent factories populating a food chain",
        animal_world,
    ),
    ExampleDef::new(
        "abstract-factory/phone-vendors",
        Category::Creational,
        "Vendor factories pairing a smart phone with a dumb phone",
        phone_vendors,
    ),
];

trait Product {
    fn name(&self) -> &'static str;

    fn interact(&self, other: &dyn Product, out: &mut Transcript) {
        out.line(format!("{} interacts with {}", self.name(), other.name()));
    }
}

struct Named(&'static str);

impl Product for Named {
    fn name(&self) -> &'static str {
        self.0
    }
}

trait AbstractFactory {
    fn create_product_a(&self) -> Box<dyn Product>;
    fn create_product_b(&self) -> Box<dyn Product>;
}

struct ConcreteFactory1;

impl AbstractFactory for ConcreteFactory1 {
    fn create_product_a(&self) -> Box<dyn Product> {
        Box::new(Named("ProductA1"))
    }

    fn create_product_b(&self) -> Box<dyn Product> {
        Box::new(Named("ProductB1"))
    }
}

struct ConcreteFactory2;

impl AbstractFactory for ConcreteFactory2 {
    fn create_product_a(&self) -> Box<dyn Product> {
        Box::new(Named("ProductA2"))
    }

    fn create_product_b(&self) -> Box<dyn Product> {
        Box::new(Named("ProductB2"))
    }
}

/// Only ever sees the factory and product traits.
struct Client {
    product_a: Box<dyn Product>,
    product_b: Box<dyn Product>,
}

impl Client {
    fn new(factory: &dyn AbstractFactory) -> Self {
        Self {
            product_a: factory.create_product_a(),
            product_b: factory.create_product_b(),
        }
    }

    fn run(&self, out: &mut Transcript) {
        self.product_a.interact(self.product_b.as_ref(), out);
        self.product_b.interact(self.product_a.as_ref(), out);
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let factories: [&dyn AbstractFactory; 2] = [&ConcreteFactory1, &ConcreteFactory2];
    for factory in factories {
        Client::new(factory).run(out);
    }
    Ok(())
}

trait Herbivore {
    fn name(&self) -> &'static str;

    fn eat(&self, plant: &str, out: &mut Transcript) {
        out.line(format!("{} eats {}", self.name(), plant));
    }
}

trait Carnivore {
    fn name(&self) -> &'static str;

    fn eat(&self, prey: &dyn Herbivore, out: &mut Transcript) {
        out.line(format!("{} eats {}", self.name(), prey.name()));
    }
}

macro_rules! animal {
    ($ty:ident: $role:ident) => {
        struct $ty;

        impl $role for $ty {
            fn name(&self) -> &'static str {
                stringify!($ty)
            }
        }
    };
}

animal!(Wildebeest: Herbivore);
animal!(Bison: Herbivore);
animal!(Lion: Carnivore);
animal!(Wolf: Carnivore);

trait ContinentFactory {
    fn create_herbivore(&self) -> Box<dyn Herbivore>;
    fn create_carnivore(&self) -> Box<dyn Carnivore>;
}

struct Africa;

impl ContinentFactory for Africa {
    fn create_herbivore(&self) -> Box<dyn Herbivore> {
        Box::new(Wildebeest)
    }

    fn create_carnivore(&self) -> Box<dyn Carnivore> {
        Box::new(Lion)
    }
}

struct America;

impl ContinentFactory for America {
    fn create_herbivore(&self) -> Box<dyn Herbivore> {
        Box::new(Bison)
    }

    fn create_carnivore(&self) -> Box<dyn Carnivore> {
        Box::new(Wolf)
    }
}

struct AnimalWorld {
    herbivore: Box<dyn Herbivore>,
    carnivore: Box<dyn Carnivore>,
}

impl AnimalWorld {
    fn new(continent: &dyn ContinentFactory) -> Self {
        Self {
            herbivore: continent.create_herbivore(),
            carnivore: continent.create_carnivore(),
        }
    }

    fn run_food_chain(&self, out: &mut Transcript) {
        self.carnivore.eat(self.herbivore.as_ref(), out);
        self.herbivore.eat("grass", out);
    }
}

fn animal_world(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    AnimalWorld::new(&Africa).run_food_chain(out);
    AnimalWorld::new(&America).run_food_chain(out);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Vendor {
    Samsung,
    Htc,
    Nokia,
    Apple,
}

impl Vendor {
    const ALL: [Vendor; 4] = [Vendor::Samsung, Vendor::Htc, Vendor::Nokia, Vendor::Apple];

    fn label(self) -> &'static str {
        match self {
            Vendor::Samsung => "SAMSUNG",
            Vendor::Htc => "HTC",
            Vendor::Nokia => "NOKIA",
            Vendor::Apple => "APPLE",
        }
    }

    fn factory(self) -> Box<dyn PhoneFactory> {
        match self {
            Vendor::Samsung => Box::new(PhoneLine("GalaxyS5", "Primo")),
            Vendor::Htc => Box::new(PhoneLine("Titan", "Genie")),
            Vendor::Nokia => Box::new(PhoneLine("Lumia", "Asha")),
            Vendor::Apple => Box::new(PhoneLine("iPhone6", "iPhone")),
        }
    }
}

trait PhoneFactory {
    fn smart(&self) -> &'static str;
    fn dumb(&self) -> &'static str;
}

/// One vendor's product line: (smart, dumb).
struct PhoneLine(&'static str, &'static str);

impl PhoneFactory for PhoneLine {
    fn smart(&self) -> &'static str {
        self.0
    }

    fn dumb(&self) -> &'static str {
        self.1
    }
}

fn phone_vendors(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    for vendor in Vendor::ALL {
        let factory = vendor.factory();
        out.line(format!(
            "{}:\nSmart Phone: {}\nDumb Phone: {}\n",
            vendor.label(),
            factory.smart(),
            factory.dumb()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_stay_within_family() {
        let mut out = Transcript::new();
        structural(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "ProductA1 interacts with ProductB1",
                "ProductB1 interacts with ProductA1",
                "ProductA2 interacts with ProductB2",
                "ProductB2 interacts with ProductA2",
            ]
        );
    }

    #[test]
    fn test_food_chain_per_continent() {
        let mut out = Transcript::new();
        animal_world(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec!["Lion eats Wildebeest", "Wildebeest eats grass", "Wolf eats Bison", "Bison eats grass"]
        );
    }

    #[test]
    fn test_each_vendor_lists_its_pair() {
        let mut out = Transcript::new();
        phone_vendors(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines.len(), 16);
        assert_eq!(&lines[..4], &["SAMSUNG:", "Smart Phone: GalaxyS5", "Dumb Phone: Primo", ""]);
        assert_eq!(&lines[12..], &["APPLE:", "Smart Phone: iPhone6", "Dumb Phone: iPhone", ""]);
    }
}
