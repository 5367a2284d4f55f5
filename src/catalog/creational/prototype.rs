use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "prototype/structural",
        Category::Creational,
        "Concrete prototypes cloning themselves",
        structural,
    ),
    ExampleDef::new(
        "prototype/record-factory",
        Category::Creational,
        "Record factory handing out clones of registered prototypes",
        record_factory,
    ),
    ExampleDef::new(
        "prototype/document-reader",
        Category::Creational,
        "Cloning an analysed document instead of fetching it again",
        document_reader,
    ),
    ExampleDef::new(
        "prototype/employees",
        Category::Creational,
        "Employee templates copied and then customised",
        employees,
    ),
    ExampleDef::new(
        "prototype/country-clones",
        Category::Creational,
        "Shallow and deep copies of country prototypes",
        country_clones,
    ),
    ExampleDef::new(
        "prototype/protagonist",
        Category::Creational,
        "Game protagonist copied for saving and for detail edits",
        protagonist,
    ),
];

trait Prototype {
    fn id(&self) -> &str;
    fn clone_box(&self) -> Box<dyn Prototype>;
}

#[derive(Clone)]
struct ConcretePrototype1 {
    id: String,
}

#[derive(Clone)]
struct ConcretePrototype2 {
    id: String,
}

impl Prototype for ConcretePrototype1 {
    fn id(&self) -> &str {
        &self.id
    }

    fn clone_box(&self) -> Box<dyn Prototype> {
        Box::new(self.clone())
    }
}

impl Prototype for ConcretePrototype2 {
    fn id(&self) -> &str {
        &self.id
    }

    fn clone_box(&self) -> Box<dyn Prototype> {
        Box::new(self.clone())
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let prototypes: [Box<dyn Prototype>; 2] = [
        Box::new(ConcretePrototype1 { id: "I".to_string() }),
        Box::new(ConcretePrototype2 { id: "II".to_string() }),
    ];
    for prototype in &prototypes {
        let copy = prototype.clone_box();
        out.line(format!("Cloned: {}", copy.id()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RecordKind {
    Car,
    Bike,
    Train,
    Animal,
    Person,
}

#[derive(Debug, Clone, PartialEq)]
enum Record {
    Car { name: String, number: u32 },
    Bike { name: String, number: u32 },
    Train { name: String, number: u32 },
    Animal { kind: String, age: u32 },
    Person { name: String, age: u32 },
}

impl Record {
    fn print(&self, out: &mut Transcript) {
        match self {
            Record::Car { name, number } => {
                out.line(format!("Car Record\nName  : {}\nNumber: {}", name, number));
            }
            Record::Bike { name, number } => {
                out.line(format!("Bike Record\nName  : {}\nNumber: {}", name, number));
            }
            Record::Train { name, number } => {
                out.line(format!("Train Record\nName  : {}\nNumber: {}", name, number));
            }
            Record::Animal { kind, age } => {
                out.line(format!("Animal Record\nType : {}\nAge  : {}", kind, age));
            }
            Record::Person { name, age } => {
                out.line(format!("Person Record\nName : {}\nAge  : {}", name, age));
            }
        }
        out.blank();
    }
}

/// Holds one prototype per kind and hands out clones.
struct RecordFactory {
    prototypes: HashMap<RecordKind, Record>,
}

impl RecordFactory {
    fn new() -> Self {
        let prototypes = HashMap::from([
            (
                RecordKind::Car,
                Record::Car {
                    name: "Ferrari".to_string(),
                    number: 5050,
                },
            ),
            (
                RecordKind::Bike,
                Record::Bike {
                    name: "Yamaha".to_string(),
                    number: 2525,
                },
            ),
            (
                RecordKind::Train,
                Record::Train {
                    name: "Blue Train".to_string(),
                    number: 762,
                },
            ),
            (
                RecordKind::Animal,
                Record::Animal {
                    kind: "Dog".to_string(),
                    age: 3,
                },
            ),
            (
                RecordKind::Person,
                Record::Person {
                    name: "Bob".to_string(),
                    age: 25,
                },
            ),
        ]);
        Self { prototypes }
    }

    fn create(&self, kind: RecordKind) -> anyhow::Result<Record> {
        self.prototypes
            .get(&kind)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no prototype registered for {:?}", kind))
    }
}

fn record_factory(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let factory = RecordFactory::new();
    for kind in [
        RecordKind::Car,
        RecordKind::Bike,
        RecordKind::Train,
        RecordKind::Animal,
        RecordKind::Person,
    ] {
        factory.create(kind)?.print(out);
    }
    Ok(())
}

/// Result of analysing a page. Building one is the expensive part; copies are not.
#[derive(Debug, Clone, PartialEq)]
struct DocumentReader {
    page_title: String,
    header_count: usize,
    body: String,
}

impl DocumentReader {
    fn analyse(html: &str) -> anyhow::Result<Self> {
        let title = between(html, "<title>", "</title>").ok_or_else(|| anyhow::anyhow!("page has no title"))?;
        let body = between(html, "<p>", "</p>").unwrap_or_default();
        Ok(Self {
            page_title: title.to_string(),
            header_count: html.matches("<h1>").count() + html.matches("<h2>").count(),
            body: body.to_string(),
        })
    }

    fn print_page_data(&self, out: &mut Transcript) {
        out.line(format!(
            "Page title: {}, Header count: {}, Body: {}",
            self.page_title, self.header_count, self.body
        ));
    }
}

fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

const HOMEPAGE: &str =
    "<html><title>Homepage</title><h1>Hello</h1><h2>News</h2><p>Welcome to my homepage</p></html>";

fn document_reader(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let reader = DocumentReader::analyse(HOMEPAGE)?;
    reader.print_page_data(out);

    let copy = reader.clone();
    copy.print_page_data(out);
    Ok(())
}

trait Employee {
    fn clone_employee(&self) -> Box<dyn Employee>;
    fn details(&self) -> String;
}

#[derive(Clone)]
struct Developer {
    name: String,
    role: String,
    preferred_language: String,
}

#[derive(Clone)]
struct Typist {
    name: String,
    role: String,
    words_per_minute: u32,
}

impl Employee for Developer {
    fn clone_employee(&self) -> Box<dyn Employee> {
        Box::new(self.clone())
    }

    fn details(&self) -> String {
        format!("Name: {}\nRole: {}\nLanguage: {}\n", self.name, self.role, self.preferred_language)
    }
}

impl Employee for Typist {
    fn clone_employee(&self) -> Box<dyn Employee> {
        Box::new(self.clone())
    }

    fn details(&self) -> String {
        format!("Name: {}\nRole: {}\nWords per minute: {}\n", self.name, self.role, self.words_per_minute)
    }
}

fn employees(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let dev = Developer {
        name: "Michael".to_string(),
        role: "Software Engineer".to_string(),
        preferred_language: "C#".to_string(),
    };
    let mut dev_copy = dev.clone();
    dev_copy.name = "Bob".to_string();

    let typist = Typist {
        name: "Tom".to_string(),
        role: "Typist".to_string(),
        words_per_minute: 150,
    };
    let mut typist_copy = typist.clone();
    typist_copy.name = "Jerry".to_string();
    typist_copy.words_per_minute = 110;

    let staff: [&dyn Employee; 4] = [&dev, &dev_copy, &typist, &typist_copy];
    for employee in staff {
        let template = employee.clone_employee();
        out.line(template.details());
    }
    Ok(())
}

/// `language` sits behind a shared cell so a shallow copy can alias it.
#[derive(Clone)]
struct Country {
    country: String,
    capital: String,
    language: Rc<RefCell<String>>,
}

impl Country {
    fn new(country: &str, capital: &str, language: &str) -> Self {
        Self {
            country: country.to_string(),
            capital: capital.to_string(),
            language: Rc::new(RefCell::new(language.to_string())),
        }
    }

    fn shallow_copy(&self) -> Self {
        self.clone()
    }

    fn deep_copy(&self) -> Self {
        Self {
            language: Rc::new(RefCell::new(self.language.borrow().clone())),
            ..self.clone()
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t->{}", self.country, self.capital, self.language.borrow())
    }
}

struct CountryCatalog {
    prototypes: HashMap<&'static str, Country>,
}

impl CountryCatalog {
    fn new() -> Self {
        Self {
            prototypes: HashMap::from([
                ("Italy", Country::new("Italy    ", "Rome    ", "Italian")),
                ("Germany", Country::new("Germany  ", "Berlin  ", "German")),
                ("Australia", Country::new("Australia", "Canberra", "English")),
            ]),
        }
    }

    fn get(&self, key: &str) -> anyhow::Result<&Country> {
        self.prototypes
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("no country prototype named {}", key))
    }
}

fn compare(out: &mut Transcript, heading: &str, prototype: &Country, clone: &Country) {
    out.line(format!("\n{}", heading));
    out.line(format!("Prototype\t{}\nClone\t\t{}", prototype, clone));
}

fn country_clones(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let rule = "=========================================================";
    let catalog = CountryCatalog::new();

    out.line(format!("List of available prototypes\n{}", rule));
    for key in ["Italy", "Germany", "Australia"] {
        out.line(format!("Prototype\t{}", catalog.get(key)?));
    }

    let australia = catalog.get("Australia")?;
    let mut shallow = australia.shallow_copy();
    compare(out, &format!("\nShallow cloning Australia\n{}", rule), australia, &shallow);
    shallow.capital = "Sydney  ".to_string();
    compare(out, "Altered Clone's shallow state, prototype unaffected", australia, &shallow);
    *shallow.language.borrow_mut() = "Chinese ".to_string();
    compare(out, "Altering Clone's deep state, prototype affected", australia, &shallow);

    let germany = catalog.get("Germany")?;
    let mut deep = germany.deep_copy();
    compare(out, &format!("\nDeep cloning Germany\n{}", &rule[1..]), germany, &deep);
    deep.capital = "Munich  ".to_string();
    compare(out, "Altering Clone's shallow state, prototype unaffected", germany, &deep);
    *deep.language.borrow_mut() = "Turkish ".to_string();
    compare(out, "Altering Clone's deep state, prototype unaffected", germany, &deep);
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
struct Details {
    charisma: u32,
    fitness: u32,
}

#[derive(Debug, Clone, Default)]
struct Protagonist {
    health: u32,
    felony: u32,
    money: f64,
    details: Details,
}

impl Protagonist {
    fn stats(&self) -> String {
        format!("Health: {}, Felony: {}, Money: {}", self.health, self.felony, self.money)
    }

    fn detail_line(&self) -> String {
        format!("Charisma: {}, Fitness: {}", self.details.charisma, self.details.fitness)
    }
}

fn protagonist(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let player = Protagonist {
        health: 1,
        felony: 10,
        money: 2.0,
        ..Protagonist::default()
    };
    out.line("Original Player stats:");
    out.line(player.stats());

    let to_save = player.clone();
    out.line("\nCopy of player to save on disk:");
    out.line(to_save.stats());

    // Every copy owns its details, so edits never reach the original.
    for label in ["Shallow", "Deep", "ICloneable Deep"] {
        let original = Protagonist {
            details: Details {
                charisma: 5,
                fitness: 5,
            },
            ..player.clone()
        };
        let mut copy = original.clone();
        copy.details.charisma = 10;
        copy.details.fitness = 10;

        out.line("\nOriginal Object:");
        out.line(original.detail_line());
        out.line(format!("\n{} Cloned Object:", label));
        out.line(copy.detail_line());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_clones_keep_id() {
        let mut out = Transcript::new();
        structural(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(out.into_lines(), vec!["Cloned: I", "Cloned: II"]);
    }

    #[test]
    fn test_clone_is_independent_of_prototype() {
        let factory = RecordFactory::new();
        let mut copy = factory.create(RecordKind::Person).unwrap();
        if let Record::Person { age, .. } = &mut copy {
            *age = 99;
        }
        assert_eq!(
            factory.create(RecordKind::Person).unwrap(),
            Record::Person {
                name: "Bob".to_string(),
                age: 25
            }
        );
    }

    #[test]
    fn test_record_factory_transcript() {
        let mut out = Transcript::new();
        record_factory(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines.len(), 20);
        assert_eq!(&lines[..4], &["Car Record", "Name  : Ferrari", "Number: 5050", ""]);
        assert_eq!(&lines[12..15], &["Animal Record", "Type : Dog", "Age  : 3"]);
        assert_eq!(&lines[16..19], &["Person Record", "Name : Bob", "Age  : 25"]);
    }

    #[test]
    fn test_document_reader_copy_prints_same_data() {
        let mut out = Transcript::new();
        document_reader(&mut out, &mut Entropy::seeded(0)).unwrap();
        let line = "Page title: Homepage, Header count: 2, Body: Welcome to my homepage";
        assert_eq!(out.into_lines(), vec![line, line]);
    }

    #[test]
    fn test_document_without_title_is_rejected() {
        assert!(DocumentReader::analyse("<p>hi</p>").is_err());
    }

    #[test]
    fn test_employee_copies_are_customised() {
        let mut out = Transcript::new();
        employees(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines.len(), 16);
        assert_eq!(&lines[..4], &["Name: Michael", "Role: Software Engineer", "Language: C#", ""]);
        assert_eq!(lines[4], "Name: Bob");
        assert_eq!(&lines[12..15], &["Name: Jerry", "Role: Typist", "Words per minute: 110"]);
    }

    #[test]
    fn test_shallow_copy_shares_language() {
        let australia = Country::new("Australia", "Canberra", "English");
        let shallow = australia.shallow_copy();
        let deep = australia.deep_copy();
        *shallow.language.borrow_mut() = "Chinese".to_string();

        assert_eq!(australia.language.borrow().as_str(), "Chinese");
        assert_eq!(deep.language.borrow().as_str(), "English");
    }

    #[test]
    fn test_country_clones_transcript() {
        let mut out = Transcript::new();
        country_clones(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines[0], "List of available prototypes");
        assert_eq!(lines[2], "Prototype\tItaly    \tRome    \t->Italian");
        assert_eq!(&lines[5..8], &["", "", "Shallow cloning Australia"]);
        assert_eq!(lines[9], "Prototype\tAustralia\tCanberra\t->English");
        assert!(lines.contains(&"Prototype\tAustralia\tCanberra\t->Chinese".to_string()));
        assert_eq!(
            &lines[lines.len() - 2..],
            &["Prototype\tGermany  \tBerlin  \t->German", "Clone\t\tGermany  \tMunich  \t->Turkish "]
        );
        assert_eq!(lines.len(), 33);
    }

    #[test]
    fn test_protagonist_copies_leave_original_alone() {
        let mut out = Transcript::new();
        protagonist(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(&lines[..2], &["Original Player stats:", "Health: 1, Felony: 10, Money: 2"]);
        assert_eq!(&lines[2..5], &["", "Copy of player to save on disk:", "Health: 1, Felony: 10, Money: 2"]);
        assert_eq!(
            &lines[5..11],
            &[
                "",
                "Original Object:",
                "Charisma: 5, Fitness: 5",
                "",
                "Shallow Cloned Object:",
                "Charisma: 10, Fitness: 10"
            ]
        );
        assert_eq!(lines[lines.len() - 2], "ICloneable Deep Cloned Object:");
        assert_eq!(lines.len(), 23);
    }
}
