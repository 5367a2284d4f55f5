use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[ExampleDef::new(
    "iterator/structural",
    Category::Behavioral,
    "Cursor walking an aggregate without exposing its storage",
    structural,
)];

#[derive(Debug, Default)]
struct Aggregate {
    items: Vec<String>,
}

impl Aggregate {
    fn insert(&mut self, index: usize, item: &str) {
        self.items.insert(index, item.to_string());
    }

    fn cursor(&self) -> Cursor<'_> {
        Cursor {
            aggregate: self,
            current: 0,
        }
    }
}

/// External iterator over an [`Aggregate`]. Keeps its own position so the
/// aggregate can hand out several independent cursors.
struct Cursor<'a> {
    aggregate: &'a Aggregate,
    current: usize,
}

impl<'a> Iterator for Cursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.aggregate.items.get(self.current)?;
        self.current += 1;
        Some(item.as_str())
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut aggregate = Aggregate::default();
    for (i, item) in ["Item A", "Item B", "Item C", "Item D", "Bob"].iter().enumerate() {
        aggregate.insert(i, item);
    }

    out.line("Iterating over collection:");
    for item in aggregate.cursor() {
        out.line(item);
    }
    Ok(())
}
