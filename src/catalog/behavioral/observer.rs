use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "observer/inventory-store",
        Category::Behavioral,
        "Store customers notified when the inventory grows",
        inventory_store,
    ),
    ExampleDef::new(
        "observer/stock-investors",
        Category::Behavioral,
        "Investors notified of stock price changes",
        stock_investors,
    ),
    ExampleDef::new(
        "observer/baggage-claim",
        Category::Behavioral,
        "Arrival monitors subscribed to a baggage claim feed",
        baggage_claim,
    ),
    ExampleDef::new(
        "observer/shop-prices",
        Category::Behavioral,
        "Shops following a product price through a list and through callbacks",
        shop_prices,
    ),
];

struct Customer {
    name: &'static str,
}

impl Customer {
    fn update(&self, out: &mut Transcript) {
        out.line(format!("{}: A new product has arrived at the store", self.name));
    }
}

#[derive(Default)]
struct Store {
    inventory: u32,
    customers: Vec<Rc<Customer>>,
}

impl Store {
    fn subscribe(&mut self, customer: Rc<Customer>) {
        self.customers.push(customer);
    }

    fn unsubscribe(&mut self, customer: &Rc<Customer>) {
        self.customers.retain(|c| !Rc::ptr_eq(c, customer));
    }

    /// Only an increase is announced.
    fn set_inventory(&mut self, value: u32, out: &mut Transcript) {
        if value > self.inventory {
            for customer in &self.customers {
                customer.update(out);
            }
        }
        self.inventory = value;
    }
}

fn inventory_store(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut store = Store::default();

    let first = Rc::new(Customer { name: "Observer 1" });
    store.subscribe(Rc::clone(&first));
    store.subscribe(Rc::new(Customer { name: "Observer 2" }));
    store.set_inventory(store.inventory + 1, out);
    out.blank();

    store.unsubscribe(&first);
    store.subscribe(Rc::new(Customer { name: "Observer 3" }));
    store.set_inventory(store.inventory + 1, out);
    out.blank();

    store.set_inventory(store.inventory + 1, out);
    Ok(())
}

struct Shop {
    name: &'static str,
    price: Cell<f32>,
}

impl Shop {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            price: Cell::new(0.0),
        })
    }

    fn update(&self, price: f32, out: &mut Transcript) {
        self.price.set(price);
        out.line(format!("Price at {} is now {}", self.name, price));
    }
}

type PriceCallback = Box<dyn Fn(f32, &mut Transcript)>;

/// Two ways of holding observers: a plain list of shops, and keyed callbacks.
/// The list is always notified first.
#[derive(Default)]
struct Product {
    shops: Vec<Rc<Shop>>,
    callbacks: Vec<(usize, PriceCallback)>,
    next_key: usize,
}

impl Product {
    fn attach(&mut self, shop: &Rc<Shop>) {
        self.shops.push(Rc::clone(shop));
    }

    fn detach(&mut self, shop: &Rc<Shop>) {
        self.shops.retain(|s| !Rc::ptr_eq(s, shop));
    }

    fn on_price_change(&mut self, shop: &Rc<Shop>) -> usize {
        let shop = Rc::clone(shop);
        let key = self.next_key;
        self.next_key += 1;
        self.callbacks.push((key, Box::new(move |price, out| shop.update(price, out))));
        key
    }

    fn remove_callback(&mut self, key: usize) {
        self.callbacks.retain(|(k, _)| *k != key);
    }

    fn change_price(&self, price: f32, out: &mut Transcript) {
        for shop in &self.shops {
            shop.update(price, out);
        }
        for (_, callback) in &self.callbacks {
            callback(price, out);
        }
    }
}

fn shop_prices(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut product = Product::default();
    let shops: Vec<Rc<Shop>> = ["Shop 1", "Shop 2", "Shop 3", "Shop 4"].into_iter().map(Shop::new).collect();

    product.attach(&shops[0]);
    product.attach(&shops[1]);
    product.on_price_change(&shops[2]);
    let fourth = product.on_price_change(&shops[3]);
    product.change_price(10.0, out);
    out.blank();

    product.detach(&shops[1]);
    product.remove_callback(fourth);
    product.change_price(16.0, out);
    out.blank();

    let fifth = Shop::new("Shop 5");
    let sixth = Shop::new("Shop 6");
    product.attach(&fifth);
    product.on_price_change(&sixth);
    product.change_price(25.0, out);

    tracing::trace!(shop = shops[1].name, price = shops[1].price.get(), "detached shop keeps its last price");
    Ok(())
}

trait Investor {
    fn update(&self, symbol: &str, price: f64, out: &mut Transcript);
}

struct NamedInvestor(&'static str);

impl Investor for NamedInvestor {
    fn update(&self, symbol: &str, price: f64, out: &mut Transcript) {
        out.line(format!("Notified {} of {}'s change to ${:.2}", self.0, symbol, price));
    }
}

struct Stock {
    symbol: &'static str,
    price: f64,
    investors: Vec<Box<dyn Investor>>,
}

impl Stock {
    fn new(symbol: &'static str, price: f64) -> Self {
        Self {
            symbol,
            price,
            investors: Vec::new(),
        }
    }

    fn attach(&mut self, investor: Box<dyn Investor>) {
        self.investors.push(investor);
    }

    /// Notifies only when the price actually moves.
    fn set_price(&mut self, price: f64, out: &mut Transcript) {
        if self.price == price {
            return;
        }
        self.price = price;
        for investor in &self.investors {
            investor.update(self.symbol, self.price, out);
        }
        out.blank();
    }
}

fn stock_investors(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut ibm = Stock::new("IBM", 120.00);
    ibm.attach(Box::new(NamedInvestor("Sorros")));
    ibm.attach(Box::new(NamedInvestor("Berkshire")));

    for price in [120.10, 121.00, 120.50, 120.75] {
        ibm.set_price(price, out);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BaggageInfo {
    flight: u32,
    from: String,
    carousel: u32,
}

/// Observer side of the baggage feed: keeps a sorted board and reprints it
/// whenever it changes.
struct ArrivalsMonitor {
    name: &'static str,
    board: Vec<String>,
}

impl ArrivalsMonitor {
    fn new(name: &'static str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            board: Vec::new(),
        }))
    }

    fn on_next(&mut self, info: &BaggageInfo, out: &mut Transcript) {
        let updated = if info.carousel == 0 {
            let flight = format!("{:>5}", info.flight);
            let before = self.board.len();
            self.board.retain(|row| row.get(21..26) != Some(flight.as_str()));
            self.board.len() != before
        } else {
            let row = format!("{:<20} {:>5}  {:>3}", info.from, info.flight, info.carousel);
            if self.board.contains(&row) {
                false
            } else {
                self.board.push(row);
                true
            }
        };

        if updated {
            self.board.sort();
            out.line(format!("Arrivals information from {}", self.name));
            for row in &self.board {
                out.line(row.as_str());
            }
            out.blank();
        }
    }

    fn on_completed(&mut self) {
        self.board.clear();
    }
}

/// The provider. Keeps the flights currently unloading and replays them to
/// late subscribers.
#[derive(Default)]
struct BaggageHandler {
    flights: Vec<BaggageInfo>,
    observers: Vec<Rc<RefCell<ArrivalsMonitor>>>,
}

impl BaggageHandler {
    fn subscribe(&mut self, monitor: &Rc<RefCell<ArrivalsMonitor>>, out: &mut Transcript) {
        if self.observers.iter().any(|o| Rc::ptr_eq(o, monitor)) {
            return;
        }
        self.observers.push(Rc::clone(monitor));
        for flight in &self.flights {
            monitor.borrow_mut().on_next(flight, out);
        }
    }

    fn unsubscribe(&mut self, monitor: &Rc<RefCell<ArrivalsMonitor>>) {
        self.observers.retain(|o| !Rc::ptr_eq(o, monitor));
        monitor.borrow_mut().board.clear();
    }

    fn arrived(&mut self, flight: u32, from: &str, carousel: u32, out: &mut Transcript) {
        let info = BaggageInfo {
            flight,
            from: from.to_string(),
            carousel,
        };
        if self.flights.contains(&info) {
            return;
        }
        for observer in &self.observers {
            observer.borrow_mut().on_next(&info, out);
        }
        self.flights.push(info);
    }

    fn unloaded(&mut self, flight: u32, out: &mut Transcript) {
        if !self.flights.iter().any(|f| f.flight == flight) {
            return;
        }
        let done = BaggageInfo {
            flight,
            from: String::new(),
            carousel: 0,
        };
        for observer in &self.observers {
            observer.borrow_mut().on_next(&done, out);
        }
        self.flights.retain(|f| f.flight != flight);
    }

    fn last_baggage_claimed(&mut self) {
        for observer in self.observers.drain(..) {
            observer.borrow_mut().on_completed();
        }
    }
}

fn baggage_claim(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut provider = BaggageHandler::default();
    let claim_monitor = ArrivalsMonitor::new("BaggageClaimMonitor1");
    let security_exit = ArrivalsMonitor::new("SecurityExit");

    provider.arrived(712, "Detroit", 3, out);
    provider.subscribe(&claim_monitor, out);

    provider.arrived(712, "Kalamazoo", 3, out);
    provider.arrived(400, "New York-Kennedy", 1, out);
    provider.arrived(712, "Detroit", 3, out);

    provider.subscribe(&security_exit, out);

    provider.arrived(511, "San Francisco", 2, out);
    provider.unloaded(712, out);

    provider.unsubscribe(&security_exit);

    provider.unloaded(400, out);
    provider.last_baggage_claimed();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(from: &str, flight: u32, carousel: u32) -> String {
        format!("{:<20} {:>5}  {:>3}", from, flight, carousel)
    }

    #[test]
    fn test_inventory_store_notifies_current_subscribers() {
        let mut out = Transcript::new();
        inventory_store(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "Observer 1: A new product has arrived at the store",
                "Observer 2: A new product has arrived at the store",
                "",
                "Observer 2: A new product has arrived at the store",
                "Observer 3: A new product has arrived at the store",
                "",
                "Observer 2: A new product has arrived at the store",
                "Observer 3: A new product has arrived at the store",
            ]
        );
    }

    #[test]
    fn test_inventory_decrease_is_silent() {
        let mut store = Store::default();
        store.subscribe(Rc::new(Customer { name: "Observer 1" }));
        let mut out = Transcript::new();
        store.set_inventory(2, &mut out);
        let mut quiet = Transcript::new();
        store.set_inventory(1, &mut quiet);
        assert_eq!(out.into_lines().len(), 1);
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_shop_prices_list_before_callbacks() {
        let mut out = Transcript::new();
        shop_prices(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "Price at Shop 1 is now 10",
                "Price at Shop 2 is now 10",
                "Price at Shop 3 is now 10",
                "Price at Shop 4 is now 10",
                "",
                "Price at Shop 1 is now 16",
                "Price at Shop 3 is now 16",
                "",
                "Price at Shop 1 is now 25",
                "Price at Shop 5 is now 25",
                "Price at Shop 3 is now 25",
                "Price at Shop 6 is now 25",
            ]
        );
    }

    #[test]
    fn test_investors_notified_per_change() {
        let mut out = Transcript::new();
        stock_investors(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Notified Sorros of IBM's change to $120.10");
        assert_eq!(lines[1], "Notified Berkshire of IBM's change to $120.10");
        assert_eq!(lines[2], "");
        assert_eq!(lines[10], "Notified Berkshire of IBM's change to $120.75");
    }

    #[test]
    fn test_unchanged_price_is_silent() {
        let mut stock = Stock::new("IBM", 1.0);
        stock.attach(Box::new(NamedInvestor("Sorros")));
        let mut out = Transcript::new();
        stock.set_price(1.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_board_row_layout() {
        assert_eq!(row("Detroit", 712, 3), "Detroit                712    3");
        assert_eq!(row("Detroit", 712, 3).get(21..26), Some("  712"));
    }

    #[test]
    fn test_baggage_claim_transcript() {
        let mut out = Transcript::new();
        baggage_claim(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines[0], "Arrivals information from BaggageClaimMonitor1");
        assert_eq!(lines[1], row("Detroit", 712, 3));

        let headers: Vec<&str> = lines
            .iter()
            .filter(|l| l.starts_with("Arrivals information"))
            .map(|l| l.trim_start_matches("Arrivals information from "))
            .collect();
        assert_eq!(
            headers,
            vec![
                "BaggageClaimMonitor1",
                "BaggageClaimMonitor1",
                "BaggageClaimMonitor1",
                "SecurityExit",
                "SecurityExit",
                "SecurityExit",
                "BaggageClaimMonitor1",
                "SecurityExit",
                "BaggageClaimMonitor1",
                "SecurityExit",
                "BaggageClaimMonitor1",
            ]
        );

        let tail: Vec<&str> = lines.iter().rev().take(3).map(String::as_str).collect();
        assert_eq!(tail, vec!["", row("San Francisco", 511, 2).as_str(), "Arrivals information from BaggageClaimMonitor1"]);
    }
}
