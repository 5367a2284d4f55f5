use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "bridge/structural",
        Category::Structural,
        "Abstraction delegating to an implementor swapped at run time",
        structural,
    ),
    ExampleDef::new(
        "bridge/customers",
        Category::Structural,
        "Customer business object bridged to a swappable data implementation",
        customers,
    ),
];

trait Implementor {
    fn operation(&self, out: &mut Transcript);
}

struct ConcreteImplementorA;
struct ConcreteImplementorB;

impl Implementor for ConcreteImplementorA {
    fn operation(&self, out: &mut Transcript) {
        out.line("ConcreteImplementorA Operation");
    }
}

impl Implementor for ConcreteImplementorB {
    fn operation(&self, out: &mut Transcript) {
        out.line("ConcreteImplementorB Operation");
    }
}

#[derive(Default)]
struct RefinedAbstraction {
    implementor: Option<Box<dyn Implementor>>,
}

impl RefinedAbstraction {
    fn set_implementor(&mut self, implementor: Box<dyn Implementor>) {
        self.implementor = Some(implementor);
    }

    fn operation(&self, out: &mut Transcript) -> anyhow::Result<()> {
        let implementor = self
            .implementor
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("abstraction has no implementor"))?;
        implementor.operation(out);
        Ok(())
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut abstraction = RefinedAbstraction::default();
    abstraction.set_implementor(Box::new(ConcreteImplementorA));
    abstraction.operation(out)?;
    abstraction.set_implementor(Box::new(ConcreteImplementorB));
    abstraction.operation(out)?;
    Ok(())
}

/// Implementor side of the bridge.
trait DataSource {
    fn next_record(&mut self);
    fn add_record(&mut self, name: &str);
    fn current(&self) -> Option<&str>;
    fn all(&self) -> &[String];
}

struct CustomersData {
    current: usize,
    customers: Vec<String>,
}

impl Default for CustomersData {
    fn default() -> Self {
        Self {
            current: 0,
            customers: ["Jim Jones", "Samual Jackson", "Allen Good", "Ann Stills", "Lisa Giolani"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl DataSource for CustomersData {
    // Stops on the last record rather than running past it.
    fn next_record(&mut self) {
        if self.current + 1 < self.customers.len() {
            self.current += 1;
        }
    }

    fn add_record(&mut self, name: &str) {
        self.customers.push(name.to_string());
    }

    fn current(&self) -> Option<&str> {
        self.customers.get(self.current).map(String::as_str)
    }

    fn all(&self) -> &[String] {
        &self.customers
    }
}

/// Abstraction side: business-level operations over any [`DataSource`].
struct Customers {
    group: String,
    data: Box<dyn DataSource>,
}

impl Customers {
    fn new(group: &str, data: Box<dyn DataSource>) -> Self {
        Self {
            group: group.to_string(),
            data,
        }
    }

    fn next(&mut self) {
        self.data.next_record();
    }

    fn add(&mut self, name: &str) {
        self.data.add_record(name);
    }

    fn show(&self, out: &mut Transcript) -> anyhow::Result<()> {
        let current = self
            .data
            .current()
            .ok_or_else(|| anyhow::anyhow!("customer group {} is empty", self.group))?;
        out.line(current);
        Ok(())
    }

    fn show_all(&self, out: &mut Transcript) {
        out.blank();
        out.line("------------------------");
        out.line(format!("Customer Group: {}", self.group));
        for customer in self.data.all() {
            out.line(format!(" {}", customer));
        }
        out.line("------------------------");
    }
}

fn customers(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut customers = Customers::new("Chicago", Box::new(CustomersData::default()));

    customers.show(out)?;
    customers.next();
    customers.show(out)?;
    customers.next();
    customers.show(out)?;
    customers.add("Henry Velasquez");
    customers.add("Mikhail Jacques");
    customers.next();
    customers.show(out)?;
    customers.add("Tom Jerry");
    customers.show_all(out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implementor_swapped_between_calls() {
        let mut out = Transcript::new();
        structural(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec!["ConcreteImplementorA Operation", "ConcreteImplementorB Operation"]
        );
    }

    #[test]
    fn test_abstraction_without_implementor_errors() {
        let abstraction = RefinedAbstraction::default();
        assert!(abstraction.operation(&mut Transcript::new()).is_err());
    }

    #[test]
    fn test_customers_transcript() {
        let mut out = Transcript::new();
        customers(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(&lines[..4], &["Jim Jones", "Samual Jackson", "Allen Good", "Ann Stills"]);
        assert_eq!(&lines[4..7], &["", "------------------------", "Customer Group: Chicago"]);
        assert_eq!(lines[7], " Jim Jones");
        assert_eq!(lines[14], " Tom Jerry");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut customers = Customers::new("Test", Box::new(CustomersData::default()));
        for _ in 0..10 {
            customers.next();
        }
        let mut out = Transcript::new();
        customers.show(&mut out).unwrap();
        assert_eq!(out.into_lines(), vec!["Lisa Giolani"]);

        customers.add("Tom Jerry");
        customers.next();
        let mut out = Transcript::new();
        customers.show(&mut out).unwrap();
        assert_eq!(out.into_lines(), vec!["Tom Jerry"]);
    }

    #[test]
    fn test_show_on_empty_group_errors() {
        let empty = CustomersData {
            current: 0,
            customers: Vec::new(),
        };
        let customers = Customers::new("Empty", Box::new(empty));
        assert!(customers.show(&mut Transcript::new()).is_err());
    }
}
