use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::ops::Range;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "chain-of-responsibility/structural",
        Category::Behavioral,
        "Integer requests passed along four range handlers",
        structural,
    ),
    ExampleDef::new(
        "chain-of-responsibility/purchase-approval",
        Category::Behavioral,
        "Director, vice president and president approving purchases",
        purchase_approval,
    ),
    ExampleDef::new(
        "chain-of-responsibility/daycare-staff",
        Category::Behavioral,
        "Teacher, manager and director escalating parent requests",
        daycare_staff,
    ),
    ExampleDef::new(
        "chain-of-responsibility/value-sign",
        Category::Behavioral,
        "Handlers split by the sign of the request value",
        value_sign,
    ),
];

struct RangeHandler {
    name: &'static str,
    accepts: Range<i32>,
    successor: Option<Box<RangeHandler>>,
}

impl RangeHandler {
    fn new(name: &'static str, accepts: Range<i32>) -> Self {
        Self {
            name,
            accepts,
            successor: None,
        }
    }

    fn then(mut self, successor: RangeHandler) -> Self {
        self.successor = Some(Box::new(successor));
        self
    }

    // Requests nobody accepts fall off the end of the chain silently.
    fn handle(&self, request: i32, out: &mut Transcript) {
        if self.accepts.contains(&request) {
            out.line(format!("{} handled request {}", self.name, request));
        } else if let Some(next) = &self.successor {
            next.handle(request, out);
        }
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let h4 = RangeHandler::new("ConcreteHandler4", 30..40);
    let h3 = RangeHandler::new("ConcreteHandler3", 20..30).then(h4);
    let h2 = RangeHandler::new("ConcreteHandler2", 10..20).then(h3);
    let h1 = RangeHandler::new("ConcreteHandler1", 0..10).then(h2);

    for request in [2, 5, 14, 22, 18, 3, 27, 20, 3, 35, 50, 39, 42, 32] {
        h1.handle(request, out);
    }
    Ok(())
}

struct Purchase {
    number: u32,
    amount: f64,
    purpose: &'static str,
}

#[derive(Clone, Copy)]
enum Approver {
    Director,
    VicePresident,
    President,
}

impl Approver {
    fn name(self) -> &'static str {
        match self {
            Approver::Director => "Director",
            Approver::VicePresident => "VicePresident",
            Approver::President => "President",
        }
    }

    fn limit(self) -> f64 {
        match self {
            Approver::Director => 10_000.0,
            Approver::VicePresident => 25_000.0,
            Approver::President => 100_000.0,
        }
    }

    fn successor(self) -> Option<Approver> {
        match self {
            Approver::Director => Some(Approver::VicePresident),
            Approver::VicePresident => Some(Approver::President),
            Approver::President => None,
        }
    }

    fn process(self, purchase: &Purchase, out: &mut Transcript) {
        if purchase.amount < self.limit() {
            out.line(format!(
                "{} approved request# {} for {}",
                self.name(),
                purchase.number,
                purchase.purpose
            ));
            return;
        }
        match self.successor() {
            Some(next) => next.process(purchase, out),
            None => out.line(format!("Request# {} requires an executive meeting!", purchase.number)),
        }
    }
}

fn purchase_approval(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let purchases = [
        Purchase {
            number: 2034,
            amount: 350.00,
            purpose: "Assets",
        },
        Purchase {
            number: 2035,
            amount: 32_590.10,
            purpose: "Project X",
        },
        Purchase {
            number: 2036,
            amount: 92_100.00,
            purpose: "Project Y",
        },
        Purchase {
            number: 2037,
            amount: 122_100.00,
            purpose: "Project Y",
        },
    ];

    for purchase in &purchases {
        Approver::Director.process(purchase, out);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Responsibility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Teacher,
    Manager,
    Director,
}

impl Role {
    fn handles(self) -> Responsibility {
        match self {
            Role::Teacher => Responsibility::Low,
            Role::Manager => Responsibility::Medium,
            Role::Director => Responsibility::High,
        }
    }

    fn introduction(self) -> &'static str {
        match self {
            Role::Teacher => "I am a teacher in this daycare facility.",
            Role::Manager => "I am a manager in this daycare facility.",
            Role::Director => "I am a director of this daycare facility.",
        }
    }
}

struct Staff {
    name: &'static str,
    role: Role,
    boss: Option<Box<Staff>>,
}

impl Staff {
    fn new(name: &'static str, role: Role) -> Self {
        Self {
            name,
            role,
            boss: None,
        }
    }

    fn reporting_to(mut self, boss: Staff) -> Self {
        self.boss = Some(Box::new(boss));
        self
    }

    fn process(&self, level: Responsibility, out: &mut Transcript) -> anyhow::Result<()> {
        if level == self.role.handles() {
            let closing = if self.role == Role::Director { "" } else { "\n" };
            out.line(format!(
                "This is {}.\n{}\nI have approved your request.{}",
                self.name,
                self.role.introduction(),
                closing
            ));
            return Ok(());
        }

        let Some(boss) = &self.boss else {
            anyhow::bail!("No boss assigned.");
        };

        let (apology, closing) = match self.role {
            Role::Teacher => ("", "\n"),
            Role::Manager => ("Sorry, ", "\n"),
            Role::Director => ("", ""),
        };
        out.line(format!(
            "This is {}.\n{}\n{}I am not able to process your request.\nMy boss {} will review your request.{}",
            self.name,
            self.role.introduction(),
            apology,
            boss.name,
            closing
        ));
        boss.process(level, out)
    }
}

fn daycare_staff(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let director = Staff::new("Susan", Role::Director);
    let manager = Staff::new("Jerry", Role::Manager).reporting_to(director);
    let teacher = Staff::new("Tom", Role::Teacher).reporting_to(manager);

    let requests = [
        (
            "The parent requests to have a copy of their kid's daily status.",
            Responsibility::Low,
        ),
        ("The parent requests to pay the tuition fees.", Responsibility::Medium),
        (
            "Mr. Jacques requests to schedule a visit for all his kids.",
            Responsibility::High,
        ),
    ];

    for (i, (description, level)) in requests.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.line(format!("Request Info: {}\n", description));
        teacher.process(*level, out)?;
    }
    Ok(())
}

/// Template-method flavour: `handle` is shared, only the acceptance test
/// differs per handler.
trait SignHandler {
    fn accept(&self, description: &str, value: i32, out: &mut Transcript) -> bool;
    fn successor(&self) -> Option<&dyn SignHandler>;

    fn handle(&self, description: &str, value: i32, out: &mut Transcript) {
        if !self.accept(description, value, out) {
            if let Some(next) = self.successor() {
                next.handle(description, value, out);
            }
        }
    }
}

struct SignRule {
    name: &'static str,
    label: &'static str,
    matches: fn(i32) -> bool,
    successor: Option<Box<dyn SignHandler>>,
}

impl SignHandler for SignRule {
    fn accept(&self, description: &str, value: i32, out: &mut Transcript) -> bool {
        if !(self.matches)(value) {
            return false;
        }
        out.line(format!("{} values are handled by {}: ", self.label, self.name));
        out.line(format!("\t{}.HandleRequest : {}{}", self.name, description, value));
        true
    }

    fn successor(&self) -> Option<&dyn SignHandler> {
        self.successor.as_deref()
    }
}

fn value_sign(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let zero = SignRule {
        name: "ConcreteHandlerThree",
        label: "Zero",
        matches: |v| v == 0,
        successor: None,
    };
    let positive = SignRule {
        name: "ConcreteHandlerTwo",
        label: "Positive",
        matches: |v| v > 0,
        successor: Some(Box::new(zero)),
    };
    let negative = SignRule {
        name: "ConcreteHandlerOne",
        label: "Negative",
        matches: |v| v < 0,
        successor: Some(Box::new(positive)),
    };

    let requests = [
        ("Negative Value ", -1),
        ("Zero Value ", 0),
        ("Positive Value ", 1),
        ("Positive Value ", 2),
        ("Negative Value ", -5),
    ];
    for (description, value) in requests {
        negative.handle(description, value, out);
    }
    Ok(())
}
