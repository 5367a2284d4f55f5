use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::collections::VecDeque;

pub const EXAMPLES: &[ExampleDef] = &[ExampleDef::new(
    "object-pool/resources",
    Category::Creational,
    "Pool recycling reset resources before creating new ones",
    resources,
)];

#[derive(Debug)]
struct Resource {
    id: u32,
    value: i32,
}

impl Resource {
    fn reset(&mut self) {
        self.value = 0;
    }
}

/// Resources are identified by a serial number instead of an address so the
/// transcript does not depend on the allocator.
#[derive(Default)]
struct ObjectPool {
    idle: VecDeque<Resource>,
    created: u32,
}

impl ObjectPool {
    fn acquire(&mut self, out: &mut Transcript) -> Resource {
        match self.idle.pop_front() {
            Some(resource) => {
                out.line("Reusing an existing Resource.");
                resource
            }
            None => {
                out.line("Creating a new Resource.");
                self.created += 1;
                Resource {
                    id: self.created,
                    value: 0,
                }
            }
        }
    }

    fn release(&mut self, mut resource: Resource) {
        resource.reset();
        self.idle.push_back(resource);
    }
}

fn show(out: &mut Transcript, label: &str, resource: &Resource) {
    out.line(format!("{} = {} [resource #{}]", label, resource.value, resource.id));
}

fn resources(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut pool = ObjectPool::default();

    let mut r1 = pool.acquire(out);
    r1.value = 10;
    show(out, "r1", &r1);
    let mut r2 = pool.acquire(out);
    r2.value = 20;
    show(out, "r2", &r2);
    let mut r3 = pool.acquire(out);
    r3.value = 30;
    show(out, "r3", &r3);

    pool.release(r1);
    pool.release(r2);

    let r1 = pool.acquire(out);
    show(out, "r1", &r1);
    let r2 = pool.acquire(out);
    show(out, "r2", &r2);
    // r3 is still checked out, so the pool is empty again here.
    let r4 = pool.acquire(out);
    show(out, "r3", &r4);
    drop(r3);
    Ok(())
}
