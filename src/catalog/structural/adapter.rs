use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "adapter/structural",
        Category::Structural,
        "Adapter forwarding a target call to an incompatible adaptee",
        structural,
    ),
    ExampleDef::new(
        "adapter/vendor-products",
        Category::Structural,
        "Shopping portal reading a vendor catalogue through an adapter",
        vendor_products,
    ),
];

trait Target {
    fn request(&self, out: &mut Transcript) {
        out.line("Called Target Request()");
    }
}

struct Adaptee;

impl Adaptee {
    fn specific_request(&self, out: &mut Transcript) {
        out.line("Called SpecificRequest()");
    }
}

struct Adapter {
    adaptee: Adaptee,
}

impl Target for Adapter {
    fn request(&self, out: &mut Transcript) {
        self.adaptee.specific_request(out);
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let target: Box<dyn Target> = Box::new(Adapter { adaptee: Adaptee });
    target.request(out);
    Ok(())
}

/// What the portal expects.
trait ProductSource {
    fn products(&self) -> Vec<String>;
}

/// What the vendor actually offers.
struct VendorCatalogue;

impl VendorCatalogue {
    fn list_of_products(&self) -> Vec<&'static str> {
        vec![
            "Books",
            "Gadgets",
            "Widgets",
            "Television",
            "Gaming Consoles",
            "Musical Instruments",
            "Tools",
        ]
    }
}

struct VendorAdapter(VendorCatalogue);

impl ProductSource for VendorAdapter {
    fn products(&self) -> Vec<String> {
        self.0.list_of_products().into_iter().map(String::from).collect()
    }
}

fn vendor_products(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let source: &dyn ProductSource = &VendorAdapter(VendorCatalogue);
    for product in source.products() {
        out.line(product);
    }
    Ok(())
}
