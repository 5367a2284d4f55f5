use crate::core::entropy::Entropy;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use crate::domain::ports::Example;

pub type RunFn = fn(&mut Transcript, &mut Entropy) -> anyhow::Result<()>;

/// Static example definition backed by a plain function.
#[derive(Debug, Clone, Copy)]
pub struct ExampleDef {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub run_fn: RunFn,
}

impl ExampleDef {
    pub const fn new(id: &'static str, category: Category, title: &'static str, run_fn: RunFn) -> Self {
        Self {
            id,
            title,
            category,
            run_fn,
        }
    }
}

impl Example for ExampleDef {
    fn id(&self) -> &str {
        self.id
    }

    fn category(&self) -> Category {
        self.category
    }

    fn title(&self) -> &str {
        self.title
    }

    fn run(&self, out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()> {
        (self.run_fn)(out, entropy)
    }
}
