use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "strategy/structural",
        Category::Behavioral,
        "Context delegating to interchangeable algorithm objects",
        structural,
    ),
    ExampleDef::new(
        "strategy/sorted-list",
        Category::Behavioral,
        "Student list re-sorted with swappable sort strategies",
        sorted_list,
    ),
];

trait Strategy {
    fn algorithm_interface(&self, out: &mut Transcript);
}

struct ConcreteStrategy(&'static str);

impl Strategy for ConcreteStrategy {
    fn algorithm_interface(&self, out: &mut Transcript) {
        out.line(format!("Called ConcreteStrategy{}.AlgorithmInterface()", self.0));
    }
}

struct Context {
    strategy: Box<dyn Strategy>,
}

impl Context {
    fn context_interface(&self, out: &mut Transcript) {
        self.strategy.algorithm_interface(out);
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    for variant in ["A", "B", "C"] {
        let context = Context {
            strategy: Box::new(ConcreteStrategy(variant)),
        };
        context.context_interface(out);
    }
    Ok(())
}

trait SortStrategy {
    fn label(&self) -> &'static str;
    fn sort(&self, items: &mut Vec<String>);
}

struct QuickSort;

impl SortStrategy for QuickSort {
    fn label(&self) -> &'static str {
        "QuickSorted"
    }

    fn sort(&self, items: &mut Vec<String>) {
        items.sort_unstable();
    }
}

struct ShellSort;

impl SortStrategy for ShellSort {
    fn label(&self) -> &'static str {
        "ShellSorted"
    }

    fn sort(&self, items: &mut Vec<String>) {
        let mut gap = items.len() / 2;
        while gap > 0 {
            for i in gap..items.len() {
                let mut j = i;
                while j >= gap && items[j - gap] > items[j] {
                    items.swap(j - gap, j);
                    j -= gap;
                }
            }
            gap /= 2;
        }
    }
}

struct MergeSort;

impl SortStrategy for MergeSort {
    fn label(&self) -> &'static str {
        "MergeSorted"
    }

    fn sort(&self, items: &mut Vec<String>) {
        if items.len() < 2 {
            return;
        }
        let mut right = items.split_off(items.len() / 2);
        let mut left = std::mem::take(items);
        self.sort(&mut left);
        self.sort(&mut right);

        let mut left = left.into_iter().peekable();
        let mut right = right.into_iter().peekable();
        loop {
            let take_left = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) => l <= r,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_left { left.next() } else { right.next() };
            items.extend(next);
        }
    }
}

#[derive(Default)]
struct SortedList {
    items: Vec<String>,
    strategy: Option<Box<dyn SortStrategy>>,
}

impl SortedList {
    fn add(&mut self, name: &str) {
        self.items.push(name.to_string());
    }

    fn set_sort_strategy(&mut self, strategy: Box<dyn SortStrategy>) {
        self.strategy = Some(strategy);
    }

    fn sort(&mut self, out: &mut Transcript) -> anyhow::Result<()> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no sort strategy set"))?;
        strategy.sort(&mut self.items);
        out.line(format!("{} list ", strategy.label()));
        Ok(())
    }

    fn print(&self, out: &mut Transcript) {
        for name in &self.items {
            out.line(format!(" {}", name));
        }
        out.blank();
    }
}

fn sorted_list(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut records = SortedList::default();
    for name in ["Samual", "Jimmy", "Sandra", "Vivek", "Anna", "Mike"] {
        records.add(name);
    }
    records.print(out);

    let strategies: [Box<dyn SortStrategy>; 3] = [Box::new(QuickSort), Box::new(ShellSort), Box::new(MergeSort)];
    for strategy in strategies {
        records.set_sort_strategy(strategy);
        records.sort(out)?;
        records.print(out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_structural_calls_each_strategy() {
        let mut out = Transcript::new();
        structural(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "Called ConcreteStrategyA.AlgorithmInterface()",
                "Called ConcreteStrategyB.AlgorithmInterface()",
                "Called ConcreteStrategyC.AlgorithmInterface()",
            ]
        );
    }

    #[test]
    fn test_every_strategy_sorts() {
        let strategies: [Box<dyn SortStrategy>; 3] = [Box::new(QuickSort), Box::new(ShellSort), Box::new(MergeSort)];
        for strategy in strategies {
            let mut items = names(&["d", "a", "c", "e", "b"]);
            strategy.sort(&mut items);
            assert_eq!(items, names(&["a", "b", "c", "d", "e"]), "{}", strategy.label());
        }
    }

    #[test]
    fn test_sort_without_strategy_errors() {
        let mut list = SortedList::default();
        assert!(list.sort(&mut Transcript::new()).is_err());
    }

    #[test]
    fn test_sorted_list_transcript() {
        let mut out = Transcript::new();
        sorted_list(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(lines[0], " Samual");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "QuickSorted list ");
        assert_eq!(lines[8], " Anna");
        assert_eq!(lines[13], " Vivek");
        assert_eq!(lines[15], "ShellSorted list ");
        assert_eq!(lines[23], "MergeSorted list ");
        assert_eq!(lines.len(), 31);
    }
}
