use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "flyweight/characters",
        Category::Structural,
        "Shared glyph objects rendered at varying point sizes",
        characters,
    ),
    ExampleDef::new(
        "flyweight/money-drop",
        Category::Structural,
        "Thousands of falling notes and coins backed by two shared objects",
        money_drop,
    ),
    ExampleDef::new(
        "flyweight/coffee-flavours",
        Category::Structural,
        "Coffee flavours shared across orders and racing threads",
        coffee_flavours,
    ),
];

/// Intrinsic glyph metrics shared by every occurrence of a character.
#[derive(Debug)]
struct Glyph {
    symbol: char,
    width: u32,
    ascent: u32,
}

impl Glyph {
    /// `point_size` is extrinsic state supplied by the caller.
    fn display(&self, point_size: u32, out: &mut Transcript) {
        tracing::trace!(symbol = %self.symbol, width = self.width, ascent = self.ascent, point_size);
        out.line(format!("{} (Point size {} )", self.symbol, point_size));
    }
}

#[derive(Debug)]
struct UnknownGlyph(char);

impl fmt::Display for UnknownGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Character {} is NOT implemented.", self.0)
    }
}

impl std::error::Error for UnknownGlyph {}

#[derive(Default)]
struct GlyphFactory {
    glyphs: HashMap<char, Rc<Glyph>>,
}

impl GlyphFactory {
    fn get(&mut self, symbol: char) -> Result<Rc<Glyph>, UnknownGlyph> {
        if let Some(glyph) = self.glyphs.get(&symbol) {
            return Ok(Rc::clone(glyph));
        }
        let (width, ascent) = match symbol {
            'A' => (120, 70),
            'B' => (140, 72),
            'Z' => (100, 68),
            other => return Err(UnknownGlyph(other)),
        };
        let glyph = Rc::new(Glyph {
            symbol,
            width,
            ascent,
        });
        self.glyphs.insert(symbol, Rc::clone(&glyph));
        Ok(glyph)
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }
}

fn characters(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut factory = GlyphFactory::default();
    let mut point_size = 10;

    for symbol in "AAZZBRBZBCDAB".chars() {
        match factory.get(symbol) {
            Ok(glyph) => {
                glyph.display(point_size, out);
                point_size += 1;
            }
            Err(e) => out.line(e.to_string()),
        }
    }
    tracing::debug!(glyphs = factory.len(), "flyweights created");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MoneyKind {
    Metallic,
    Paper,
}

struct Money {
    kind: MoneyKind,
}

impl Money {
    fn display_falling(&self, value: u32, out: &mut Transcript) {
        out.line(format!(
            "Displaying a graphical object of {:?} currency of value ${} falling from sky.",
            self.kind, value
        ));
    }
}

#[derive(Default)]
struct MoneyFactory {
    objects: HashMap<MoneyKind, Rc<Money>>,
}

impl MoneyFactory {
    fn get(&mut self, kind: MoneyKind) -> Rc<Money> {
        Rc::clone(self.objects.entry(kind).or_insert_with(|| Rc::new(Money { kind })))
    }

    fn objects_created(&self) -> usize {
        self.objects.len()
    }
}

// Stands in for one million.
const TARGET_SUM: u32 = 10_000;
const DENOMINATIONS: [u32; 6] = [1, 5, 10, 20, 50, 100];

fn money_drop(out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut factory = MoneyFactory::default();
    let mut sum = 0;

    while sum <= TARGET_SUM {
        let value = DENOMINATIONS[entropy.index(DENOMINATIONS.len())];
        let kind = if value == 1 || value == 5 {
            MoneyKind::Metallic
        } else {
            MoneyKind::Paper
        };
        factory.get(kind).display_falling(value, out);
        sum += value;
    }

    out.line(format!("Total number of objects created is: {}", factory.objects_created()));
    Ok(())
}

/// Immutable value object; two flavours with the same name are equal.
#[derive(Debug, PartialEq, Eq, Hash)]
struct CoffeeFlavour {
    flavour: String,
}

trait FlavourFactory: Sync {
    fn name(&self) -> &'static str;
    fn get(&self, flavour: &str) -> anyhow::Result<Arc<CoffeeFlavour>>;
    fn cached(&self) -> anyhow::Result<usize>;
}

/// Readers never wait on each other. Two threads missing the cache at once
/// may each build a copy; only the first is stored.
#[derive(Default)]
struct ReducedFootprint {
    cache: RwLock<HashMap<String, Arc<CoffeeFlavour>>>,
}

impl FlavourFactory for ReducedFootprint {
    fn name(&self) -> &'static str {
        "ReducedMemoryFootprint"
    }

    fn get(&self, flavour: &str) -> anyhow::Result<Arc<CoffeeFlavour>> {
        if let Some(hit) = self
            .cache
            .read()
            .map_err(|_| anyhow::anyhow!("flavour cache lock poisoned"))?
            .get(flavour)
        {
            return Ok(Arc::clone(hit));
        }

        let fresh = Arc::new(CoffeeFlavour {
            flavour: flavour.to_string(),
        });
        let mut cache = self
            .cache
            .write()
            .map_err(|_| anyhow::anyhow!("flavour cache lock poisoned"))?;
        cache.entry(flavour.to_string()).or_insert_with(|| Arc::clone(&fresh));
        Ok(fresh)
    }

    fn cached(&self) -> anyhow::Result<usize> {
        Ok(self
            .cache
            .read()
            .map_err(|_| anyhow::anyhow!("flavour cache lock poisoned"))?
            .len())
    }
}

/// One lock for lookup and insert, so every caller shares a single object per flavour.
#[derive(Default)]
struct MinimumFootprint {
    cache: Mutex<HashMap<String, Arc<CoffeeFlavour>>>,
}

impl FlavourFactory for MinimumFootprint {
    fn name(&self) -> &'static str {
        "MinimumMemoryFootprint"
    }

    fn get(&self, flavour: &str) -> anyhow::Result<Arc<CoffeeFlavour>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| anyhow::anyhow!("flavour cache lock poisoned"))?;
        let shared = cache.entry(flavour.to_string()).or_insert_with(|| {
            Arc::new(CoffeeFlavour {
                flavour: flavour.to_string(),
            })
        });
        Ok(Arc::clone(shared))
    }

    fn cached(&self) -> anyhow::Result<usize> {
        Ok(self
            .cache
            .lock()
            .map_err(|_| anyhow::anyhow!("flavour cache lock poisoned"))?
            .len())
    }
}

const ORDERS: [&str; 7] = [
    "Cappuccino",
    "Espresso",
    "Frappe",
    "Espresso",
    "Cappuccino",
    "Frappe",
    "Espresso",
];
const BARISTAS: usize = 4;

/// Every barista takes the whole order list at the same time.
fn rush_hour(factory: &dyn FlavourFactory) -> anyhow::Result<Vec<Arc<CoffeeFlavour>>> {
    std::thread::scope(|scope| {
        let baristas: Vec<_> = (0..BARISTAS)
            .map(|_| scope.spawn(|| ORDERS.iter().map(|order| factory.get(order)).collect::<anyhow::Result<Vec<_>>>()))
            .collect();

        let mut served = Vec::new();
        for barista in baristas {
            let cups = barista
                .join()
                .map_err(|_| anyhow::anyhow!("barista thread panicked"))??;
            served.extend(cups);
        }
        Ok(served)
    })
}

fn coffee_flavours(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let counter = MinimumFootprint::default();
    for (table, order) in ORDERS.iter().enumerate() {
        let flavour = counter.get(order)?;
        out.line(format!("Serving {} to table {}", flavour.flavour, table + 1));
    }
    out.line(format!("Flavour objects created: {}", counter.cached()?));
    out.blank();

    let reduced = ReducedFootprint::default();
    let minimum = MinimumFootprint::default();
    let factories: [&dyn FlavourFactory; 2] = [&reduced, &minimum];
    for factory in factories {
        let served = rush_hour(factory)?;
        let mut distinct: Vec<*const CoffeeFlavour> = served.iter().map(Arc::as_ptr).collect();
        distinct.sort();
        distinct.dedup();
        // Varies with scheduling for the reduced factory.
        tracing::trace!(factory = factory.name(), objects = distinct.len(), "flavour objects handed out");

        let all_known = served.iter().all(|cup| ORDERS.iter().any(|order| *order == cup.flavour));
        out.line(format!("{}: {} cups served by {} baristas", factory.name(), served.len(), BARISTAS));
        out.line(format!("  flavours cached: {}", factory.cached()?));
        out.line(format!("  every cup matches an order: {}", all_known));
    }
    Ok(())
}
