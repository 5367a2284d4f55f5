use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::rc::Rc;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "composite/structural",
        Category::Structural,
        "Tree of leaves and composites displayed by depth",
        structural,
    ),
    ExampleDef::new(
        "composite/drawing",
        Category::Structural,
        "Drawing tree of primitives and nested groups",
        drawing,
    ),
    ExampleDef::new(
        "composite/employee-directory",
        Category::Structural,
        "Managers and their reports walked two levels deep",
        employee_directory,
    ),
    ExampleDef::new(
        "composite/happiness",
        Category::Structural,
        "Supervisors reporting their own and their team's happiness",
        happiness,
    ),
    ExampleDef::new(
        "composite/graphics",
        Category::Structural,
        "Composite graphic printing nested shapes",
        graphics,
    ),
];

trait Component {
    fn name(&self) -> &str;

    fn add(&mut self, _component: Rc<dyn Component>, out: &mut Transcript) {
        out.line("Cannot add to a leaf");
    }

    fn remove(&mut self, _component: &Rc<dyn Component>, out: &mut Transcript) {
        out.line("Cannot remove from a leaf");
    }

    fn display(&self, depth: usize, out: &mut Transcript) {
        out.line(format!("{}{}", "-".repeat(depth), self.name()));
    }
}

struct Leaf {
    name: String,
}

impl Component for Leaf {
    fn name(&self) -> &str {
        &self.name
    }
}

struct Composite {
    name: String,
    children: Vec<Rc<dyn Component>>,
}

impl Component for Composite {
    fn name(&self) -> &str {
        &self.name
    }

    fn add(&mut self, component: Rc<dyn Component>, _out: &mut Transcript) {
        self.children.push(component);
    }

    /// Removes by identity, not by name.
    fn remove(&mut self, component: &Rc<dyn Component>, _out: &mut Transcript) {
        if let Some(pos) = self.children.iter().position(|c| Rc::ptr_eq(c, component)) {
            self.children.remove(pos);
        }
    }

    fn display(&self, depth: usize, out: &mut Transcript) {
        out.line(format!("{}{}", "-".repeat(depth), self.name));
        for child in &self.children {
            child.display(depth + 2, out);
        }
    }
}

fn leaf(name: &str) -> Rc<dyn Component> {
    Rc::new(Leaf { name: name.to_string() })
}

fn branch(name: &str, leaves: &[&str], out: &mut Transcript) -> Composite {
    let mut composite = Composite {
        name: name.to_string(),
        children: Vec::new(),
    };
    for leaf_name in leaves {
        composite.add(leaf(leaf_name), out);
    }
    composite
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut root = branch("root", &["Leaf A", "Leaf B"], out);
    let x = branch("Composite X", &["Leaf XA", "Leaf XB"], out);
    root.add(Rc::new(x), out);

    // Y is only shared once Z is in it.
    let mut y = branch("Composite Y", &["Leaf YA", "Leaf YB"], out);
    let z = branch("Composite Z", &["Leaf ZA", "Leaf ZB"], out);
    y.add(Rc::new(z), out);
    root.add(Rc::new(y), out);

    root.add(leaf("Leaf C"), out);
    let d = leaf("Leaf D");
    root.add(Rc::clone(&d), out);
    root.remove(&d, out);

    root.display(1, out);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DrawingElement {
    Primitive(String),
    Composite {
        name: String,
        children: Vec<DrawingElement>,
    },
}

impl DrawingElement {
    fn primitive(name: &str) -> Self {
        DrawingElement::Primitive(name.to_string())
    }

    fn composite(name: &str) -> Self {
        DrawingElement::Composite {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    fn add(&mut self, element: DrawingElement) -> anyhow::Result<()> {
        match self {
            DrawingElement::Composite { children, .. } => {
                children.push(element);
                Ok(())
            }
            DrawingElement::Primitive(_) => anyhow::bail!("Cannot add to a PrimitiveElement"),
        }
    }

    /// Removes the first child equal to `element`.
    fn remove(&mut self, element: &DrawingElement) -> anyhow::Result<()> {
        match self {
            DrawingElement::Composite { children, .. } => {
                if let Some(pos) = children.iter().position(|c| c == element) {
                    children.remove(pos);
                }
                Ok(())
            }
            DrawingElement::Primitive(_) => anyhow::bail!("Cannot remove from a PrimitiveElement"),
        }
    }

    fn display(&self, indent: usize, out: &mut Transcript) {
        let dashes = "-".repeat(indent);
        match self {
            DrawingElement::Primitive(name) => out.line(format!("{} {}", dashes, name)),
            DrawingElement::Composite { name, children } => {
                out.line(format!("{}+ {}", dashes, name));
                for child in children {
                    child.display(indent + 2, out);
                }
            }
        }
    }
}

fn drawing(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut root = DrawingElement::composite("Picture");
    root.add(DrawingElement::primitive("Red Line"))?;
    root.add(DrawingElement::primitive("Blue Circle"))?;
    root.add(DrawingElement::primitive("Green Box"))?;

    let mut circles = DrawingElement::composite("Two Circles");
    circles.add(DrawingElement::primitive("Black Circle"))?;
    circles.add(DrawingElement::primitive("White Circle"))?;
    root.add(circles)?;

    let mut squares = DrawingElement::composite("Two Squares");
    squares.add(DrawingElement::primitive("Red Square"))?;
    squares.add(DrawingElement::primitive("Blue Square"))?;
    root.add(squares)?;

    root.add(DrawingElement::primitive("Green Line"))?;
    let yellow = DrawingElement::primitive("Yellow Line");
    root.add(yellow.clone())?;
    root.remove(&yellow)?;

    root.display(1, out);
    Ok(())
}

enum Staff {
    Employee {
        id: u32,
        name: &'static str,
        subordinates: Vec<Staff>,
    },
    Contractor {
        id: u32,
        name: &'static str,
    },
}

impl Staff {
    fn employee(id: u32, name: &'static str, subordinates: Vec<Staff>) -> Self {
        Staff::Employee { id, name, subordinates }
    }

    fn label(&self) -> String {
        match self {
            Staff::Employee { id, name, .. } | Staff::Contractor { id, name } => {
                format!("EmpID={}, Name={}", id, name)
            }
        }
    }

    /// An employee yields their reports; a contractor yields only themselves.
    fn members(&self) -> Box<dyn Iterator<Item = &Staff> + '_> {
        match self {
            Staff::Employee { subordinates, .. } => Box::new(subordinates.iter()),
            Staff::Contractor { .. } => Box::new(std::iter::once(self)),
        }
    }
}

fn employee_directory(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let carol = Staff::employee(
        6,
        "Carol",
        vec![
            Staff::Contractor { id: 8, name: "Sam" },
            Staff::Contractor { id: 9, name: "Tim" },
        ],
    );
    let frank = Staff::employee(7, "Frank", vec![Staff::Contractor { id: 10, name: "Kaka" }]);
    let tom = Staff::employee(
        2,
        "Tom",
        vec![Staff::employee(4, "Bob", Vec::new()), Staff::employee(5, "Alice", Vec::new())],
    );
    let jerry = Staff::employee(3, "Jerry", vec![carol, frank]);
    let michael = Staff::employee(1, "Michael", vec![tom, jerry]);

    out.line(michael.label());
    for manager in michael.members() {
        out.line(format!("\n\t{}", manager.label()));
        for employee in manager.members() {
            out.line(format!("\n\t\t{}", employee.label()));
        }
    }
    Ok(())
}

trait Happiness {
    fn show_happiness(&self, out: &mut Transcript);
}

struct Worker {
    name: &'static str,
    happiness: u8,
}

impl Happiness for Worker {
    fn show_happiness(&self, out: &mut Transcript) {
        out.line(format!("\tWorker {} showed happiness level of {}", self.name, self.happiness));
    }
}

struct Supervisor {
    name: &'static str,
    happiness: u8,
    subordinates: Vec<Box<dyn Happiness>>,
}

impl Supervisor {
    fn new(name: &'static str, happiness: u8) -> Self {
        Self {
            name,
            happiness,
            subordinates: Vec::new(),
        }
    }

    fn add_subordinate(&mut self, employee: Box<dyn Happiness>) {
        self.subordinates.push(employee);
    }
}

impl Happiness for Supervisor {
    fn show_happiness(&self, out: &mut Transcript) {
        out.line(format!("Supervisor {} showed happiness level of {}", self.name, self.happiness));
        for subordinate in &self.subordinates {
            subordinate.show_happiness(out);
        }
    }
}

fn happiness(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut jerry = Supervisor::new("Jerry", 7);
    let mut mary = Supervisor::new("Mary", 6);
    let mut bob = Supervisor::new("Bob", 9);

    mary.add_subordinate(Box::new(Worker { name: "Tom", happiness: 5 }));
    bob.add_subordinate(Box::new(Worker { name: "Jimmy", happiness: 8 }));
    bob.add_subordinate(Box::new(Worker { name: "Alice", happiness: 6 }));
    jerry.add_subordinate(Box::new(mary));
    jerry.add_subordinate(Box::new(bob));

    jerry.show_happiness(out);
    Ok(())
}

trait Graphic {
    fn print(&self, out: &mut Transcript);
}

struct Circle;
struct Ellipse;

impl Graphic for Circle {
    fn print(&self, out: &mut Transcript) {
        out.line("Circle");
    }
}

impl Graphic for Ellipse {
    fn print(&self, out: &mut Transcript) {
        out.line("Ellipse");
    }
}

#[derive(Default)]
struct CompositeGraphic {
    graphics: Vec<Box<dyn Graphic>>,
}

impl CompositeGraphic {
    fn add(&mut self, graphic: Box<dyn Graphic>) {
        self.graphics.push(graphic);
    }

    fn add_range(&mut self, graphics: impl IntoIterator<Item = Box<dyn Graphic>>) {
        self.graphics.extend(graphics);
    }
}

impl Graphic for CompositeGraphic {
    fn print(&self, out: &mut Transcript) {
        for graphic in &self.graphics {
            graphic.print(out);
        }
    }
}

fn graphics(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut first = CompositeGraphic::default();
    let mut second = CompositeGraphic::default();
    let mut third = CompositeGraphic::default();

    second.add(Box::new(Ellipse));
    third.add_range([Box::new(Ellipse) as Box<dyn Graphic>, Box::new(Circle)]);
    first.add_range([Box::new(Circle) as Box<dyn Graphic>, Box::new(second), Box::new(third)]);

    first.print(out);
    Ok(())
}
