use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::fmt::Display;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "memento/structural",
        Category::Behavioral,
        "Originator state saved by a caretaker and restored",
        structural,
    ),
    ExampleDef::new(
        "memento/sales-prospect",
        Category::Behavioral,
        "Saving and restoring a sales prospect's state",
        sales_prospect,
    ),
    ExampleDef::new(
        "memento/state-history",
        Category::Behavioral,
        "Generic caretaker keeping a numbered history of states",
        state_history,
    ),
];

struct SwitchMemento {
    state: String,
}

impl SwitchMemento {
    fn new(state: &str, out: &mut Transcript) -> Self {
        out.line("\nSaving Originator state...");
        out.line("Originator state has been saved\n");
        Self {
            state: state.to_string(),
        }
    }
}

struct Switch {
    state: String,
}

impl Switch {
    fn new(state: &str, out: &mut Transcript) -> Self {
        out.line(format!("Originator current state: {}", state));
        Self {
            state: state.to_string(),
        }
    }

    fn set_state(&mut self, state: &str, out: &mut Transcript) {
        self.state = state.to_string();
        out.line(format!("Originator state has been changed to: {}", self.state));
    }

    fn create_memento(&self, out: &mut Transcript) -> SwitchMemento {
        SwitchMemento::new(&self.state, out)
    }

    fn set_memento(&mut self, memento: &SwitchMemento, out: &mut Transcript) {
        out.line("\nRestoring Originator state...");
        self.set_state(&memento.state, out);
        out.line("Originator state has been restored\n");
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut originator = Switch::new("On", out);
    let caretaker = originator.create_memento(out);
    originator.set_state("Off", out);
    originator.set_memento(&caretaker, out);

    originator.set_state("Off", out);
    let caretaker = originator.create_memento(out);
    originator.set_state("On", out);
    originator.set_memento(&caretaker, out);
    Ok(())
}

/// Opaque snapshot. Only [`SalesProspect`] can read it back.
#[derive(Debug, Clone)]
struct Memento {
    name: String,
    phone: String,
    budget: f64,
}

#[derive(Debug, Default)]
struct SalesProspect {
    name: String,
    phone: String,
    budget: f64,
}

impl SalesProspect {
    fn set_name(&mut self, name: &str, out: &mut Transcript) {
        self.name = name.to_string();
        out.line(format!("Name:  {}", self.name));
    }

    fn set_phone(&mut self, phone: &str, out: &mut Transcript) {
        self.phone = phone.to_string();
        out.line(format!("Phone: {}", self.phone));
    }

    fn set_budget(&mut self, budget: f64, out: &mut Transcript) {
        self.budget = budget;
        out.line(format!("Budget: {}", self.budget));
    }

    fn save(&self, out: &mut Transcript) -> Memento {
        out.line("\nSaving state --\n");
        Memento {
            name: self.name.clone(),
            phone: self.phone.clone(),
            budget: self.budget,
        }
    }

    fn restore(&mut self, memento: &Memento, out: &mut Transcript) {
        out.line("\nRestoring state --\n");
        self.set_name(&memento.name, out);
        self.set_phone(&memento.phone, out);
        self.set_budget(memento.budget, out);
    }
}

/// Caretaker: holds the memento without looking inside.
#[derive(Default)]
struct ProspectMemory {
    memento: Option<Memento>,
}

fn sales_prospect(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut prospect = SalesProspect::default();
    prospect.set_name("Bob Northrop", out);
    prospect.set_phone("(705) 123-4567", out);
    prospect.set_budget(17000.0, out);

    let mut memory = ProspectMemory::default();
    memory.memento = Some(prospect.save(out));

    prospect.set_name("Eve Ugly", out);
    prospect.set_phone("(416) 456-1239", out);
    prospect.set_budget(700000.0, out);

    let memento = memory
        .memento
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no saved state to restore"))?;
    prospect.restore(memento, out);
    Ok(())
}

struct Snapshot<T> {
    state: T,
}

#[derive(Default)]
struct Originator<T> {
    state: T,
}

impl<T: Clone + Display> Originator<T> {
    fn set_state(&mut self, state: T) {
        self.state = state;
    }

    fn create_memento(&self) -> Snapshot<T> {
        Snapshot {
            state: self.state.clone(),
        }
    }

    fn set_memento(&mut self, snapshot: &Snapshot<T>) {
        self.state = snapshot.state.clone();
    }

    fn show_state(&self, out: &mut Transcript) {
        out.line(format!("{}\n", self.state));
    }
}

/// Append-only history; entries are addressed by the order they were saved.
struct History<T> {
    snapshots: Vec<Snapshot<T>>,
}

impl<T: Clone + Display> History<T> {
    fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    fn save(&mut self, originator: &Originator<T>, out: &mut Transcript) {
        out.line("Saving Originator state...");
        self.snapshots.push(originator.create_memento());
        out.line("Originator state has been saved.");
    }

    fn restore(&self, originator: &mut Originator<T>, index: usize, out: &mut Transcript) -> anyhow::Result<()> {
        out.line("Restoring Originator state...");
        let snapshot = self
            .snapshots
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("no saved state #{} ({} saved)", index, self.snapshots.len()))?;
        originator.set_memento(snapshot);
        out.line("Originator state has been restored.");
        Ok(())
    }
}

fn state_history(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut originator = Originator::<String>::default();
    let mut history = History::new();

    for state in ["State 0", "State 1", "State 2"] {
        originator.set_state(state.to_string());
        history.save(&originator, out);
        originator.show_state(out);
    }

    for index in [0, 1] {
        history.restore(&mut originator, index, out)?;
        originator.show_state(out);
    }
    Ok(())
}
