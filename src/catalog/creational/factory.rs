use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "factory/structural",
        Category::Creational,
        "Creators whose factory method picks the concrete product",
        structural,
    ),
    ExampleDef::new(
        "factory/documents",
        Category::Creational,
        "Documents whose factory method decides which pages they contain",
        documents,
    ),
];

trait Product {
    fn type_name(&self) -> &'static str;
}

struct ConcreteProductA;
struct ConcreteProductB;

impl Product for ConcreteProductA {
    fn type_name(&self) -> &'static str {
        "ConcreteProductA"
    }
}

impl Product for ConcreteProductB {
    fn type_name(&self) -> &'static str {
        "ConcreteProductB"
    }
}

trait Creator {
    fn factory_method(&self) -> Box<dyn Product>;
}

struct ConcreteCreatorA;
struct ConcreteCreatorB;

impl Creator for ConcreteCreatorA {
    fn factory_method(&self) -> Box<dyn Product> {
        Box::new(ConcreteProductA)
    }
}

impl Creator for ConcreteCreatorB {
    fn factory_method(&self) -> Box<dyn Product> {
        Box::new(ConcreteProductB)
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let creators: [&dyn Creator; 2] = [&ConcreteCreatorA, &ConcreteCreatorB];
    for creator in creators {
        let product = creator.factory_method();
        out.line(format!("Created {}", product.type_name()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Skills,
    Education,
    Experience,
    Introduction,
    Results,
    Conclusion,
    Summary,
    Bibliography,
}

impl Page {
    fn name(self) -> &'static str {
        match self {
            Page::Skills => "SkillsPage",
            Page::Education => "EducationPage",
            Page::Experience => "ExperiencePage",
            Page::Introduction => "IntroductionPage",
            Page::Results => "ResultsPage",
            Page::Conclusion => "ConclusionPage",
            Page::Summary => "SummaryPage",
            Page::Bibliography => "BibliographyPage",
        }
    }
}

trait Document {
    fn name(&self) -> &'static str;

    /// The factory method.
    fn create_pages(&self) -> Vec<Page>;
}

struct Resume;

impl Document for Resume {
    fn name(&self) -> &'static str {
        "Resume"
    }

    fn create_pages(&self) -> Vec<Page> {
        vec![Page::Skills, Page::Education, Page::Experience]
    }
}

struct Report;

impl Document for Report {
    fn name(&self) -> &'static str {
        "Report"
    }

    fn create_pages(&self) -> Vec<Page> {
        vec![
            Page::Introduction,
            Page::Results,
            Page::Conclusion,
            Page::Summary,
            Page::Bibliography,
        ]
    }
}

fn documents(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let documents: [Box<dyn Document>; 2] = [Box::new(Resume), Box::new(Report)];
    for document in &documents {
        out.line(format!("\n{}--", document.name()));
        for page in document.create_pages() {
            out.line(format!(" {}", page.name()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creators_pick_products() {
        let mut out = Transcript::new();
        structural(&mut out, &mut Entropy::seeded(0)).unwrap();
        assert_eq!(out.into_lines(), vec!["Created ConcreteProductA", "Created ConcreteProductB"]);
    }

    #[test]
    fn test_document_pages() {
        let mut out = Transcript::new();
        documents(&mut out, &mut Entropy::seeded(0)).unwrap();
        let lines = out.into_lines();

        assert_eq!(&lines[..5], &["", "Resume--", " SkillsPage", " EducationPage", " ExperiencePage"]);
        assert_eq!(&lines[5..7], &["", "Report--"]);
        assert_eq!(lines.last().unwrap(), " BibliographyPage");
        assert_eq!(lines.len(), 12);
    }
}
