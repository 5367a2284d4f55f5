use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, RwLock};

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "singleton/structural",
        Category::Creational,
        "Lazily constructed sole instance",
        structural,
    ),
    ExampleDef::new(
        "singleton/load-balancer",
        Category::Creational,
        "Single load balancer dispatching to random servers",
        load_balancer,
    ),
    ExampleDef::new(
        "singleton/double-checked",
        Category::Creational,
        "Load balancer created behind a double-checked lock",
        double_checked,
    ),
    ExampleDef::new(
        "singleton/site-structure",
        Category::Creational,
        "Eagerly constructed site structure",
        site_structure,
    ),
    ExampleDef::new(
        "singleton/thread-safe",
        Category::Creational,
        "Lock-based and once-cell initialisation raced by worker threads",
        thread_safe,
    ),
];

const WORKER_THREADS: usize = 8;

// Each run gets its own holder instead of a process-wide static, otherwise
// the construction message would only appear on the first run.
struct Singleton;

fn instance<'a>(holder: &'a OnceLock<Singleton>, out: &mut Transcript) -> &'a Singleton {
    holder.get_or_init(|| {
        out.line("Constructing first Singleton instance");
        Singleton
    })
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let holder = OnceLock::new();
    let s1 = instance(&holder, out);
    let s2 = instance(&holder, out);
    if std::ptr::eq(s1, s2) {
        out.line("Objects are the same instance");
    }
    Ok(())
}

struct Server {
    name: &'static str,
    ip: &'static str,
}

struct LoadBalancer {
    servers: Vec<Server>,
}

impl LoadBalancer {
    fn new() -> Self {
        let servers = [
            ("Server1", "120.14.220.18"),
            ("Server2", "120.14.220.19"),
            ("Server3", "120.14.220.20"),
            ("Server4", "120.14.220.21"),
            ("Server5", "120.14.220.22"),
        ]
        .into_iter()
        .map(|(name, ip)| Server { name, ip })
        .collect();
        Self { servers }
    }

    fn next_server(&self, entropy: &mut Entropy) -> Option<&Server> {
        entropy.choose(&self.servers)
    }
}

fn load_balancer(out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()> {
    let holder = OnceLock::new();
    let get = || holder.get_or_init(LoadBalancer::new);

    let (b1, b2, b3, b4) = (get(), get(), get(), get());
    if std::ptr::eq(b1, b2) && std::ptr::eq(b2, b3) && std::ptr::eq(b3, b4) {
        out.line("Same instance\n");
    }

    let balancer = get();
    for _ in 0..10 {
        let server = balancer
            .next_server(entropy)
            .ok_or_else(|| anyhow::anyhow!("load balancer has no servers"))?;
        tracing::trace!(server = server.name, ip = server.ip, "dispatching");
        out.line(format!("Dispatch request to: {}", server.name));
    }
    Ok(())
}

/// Checks under the read lock first, and again under the write lock before
/// building.
fn balancer_instance(slot: &RwLock<Option<Arc<LoadBalancer>>>) -> anyhow::Result<Arc<LoadBalancer>> {
    if let Some(existing) = slot
        .read()
        .map_err(|_| anyhow::anyhow!("load balancer lock poisoned"))?
        .as_ref()
    {
        return Ok(Arc::clone(existing));
    }

    let mut guard = slot.write().map_err(|_| anyhow::anyhow!("load balancer lock poisoned"))?;
    let balancer = guard.get_or_insert_with(|| Arc::new(LoadBalancer::new()));
    Ok(Arc::clone(balancer))
}

fn double_checked(out: &mut Transcript, entropy: &mut Entropy) -> anyhow::Result<()> {
    let slot = RwLock::new(None);
    let balancers = (0..4)
        .map(|_| balancer_instance(&slot))
        .collect::<anyhow::Result<Vec<_>>>()?;
    if balancers.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])) {
        out.line("Same instance\n");
    }

    let balancer = balancer_instance(&slot)?;
    for _ in 0..10 {
        let server = balancer
            .next_server(entropy)
            .ok_or_else(|| anyhow::anyhow!("load balancer has no servers"))?;
        out.line(format!("Dispatch Request to: {}", server.name));
    }
    Ok(())
}

struct SiteStructure {
    pages: Vec<String>,
}

/// Built up front, before anyone asks for it.
struct SiteHolder {
    instance: SiteStructure,
}

impl SiteHolder {
    fn new(out: &mut Transcript) -> Self {
        out.line("Constructing first Singleton instance");
        Self {
            instance: SiteStructure {
                pages: Vec::with_capacity(10),
            },
        }
    }

    fn instance(&self) -> &SiteStructure {
        &self.instance
    }
}

fn site_structure(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let holder = SiteHolder::new(out);
    let s1 = holder.instance();
    let s2 = holder.instance();
    if std::ptr::eq(s1, s2) {
        out.line("Objects are the same instance");
    }
    tracing::trace!(capacity = s1.pages.capacity(), "site structure ready");
    Ok(())
}

struct Shared;

impl Shared {
    fn build(constructed: &AtomicUsize) -> Arc<Shared> {
        constructed.fetch_add(1, Ordering::SeqCst);
        Arc::new(Shared)
    }
}

/// Double-checked style: the lock guards the empty check and the store.
fn race_locked(constructed: &AtomicUsize) -> anyhow::Result<Vec<Arc<Shared>>> {
    let slot: Mutex<Option<Arc<Shared>>> = Mutex::new(None);
    race(|| {
        let mut guard = slot.lock().map_err(|_| anyhow::anyhow!("instance lock poisoned"))?;
        let shared = guard.get_or_insert_with(|| Shared::build(constructed));
        Ok(Arc::clone(shared))
    })
}

fn race_once(constructed: &AtomicUsize) -> anyhow::Result<Vec<Arc<Shared>>> {
    let cell: OnceLock<Arc<Shared>> = OnceLock::new();
    race(|| Ok(Arc::clone(cell.get_or_init(|| Shared::build(constructed)))))
}

fn race<F>(acquire: F) -> anyhow::Result<Vec<Arc<Shared>>>
where
    F: Fn() -> anyhow::Result<Arc<Shared>> + Sync,
{
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..WORKER_THREADS).map(|_| scope.spawn(&acquire)).collect();
        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .map_err(|_| anyhow::anyhow!("singleton worker thread panicked"))?
            })
            .collect()
    })
}

fn thread_safe(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    type Strategy = fn(&AtomicUsize) -> anyhow::Result<Vec<Arc<Shared>>>;
    let strategies: [(&str, Strategy); 2] = [("Mutex", race_locked), ("OnceLock", race_once)];

    for (label, strategy) in strategies {
        let constructed = AtomicUsize::new(0);
        let handles = strategy(&constructed)?;
        let same = handles.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1]));

        out.line(format!("{} singleton raced by {} threads", label, handles.len()));
        out.line(format!("  instances constructed: {}", constructed.load(Ordering::SeqCst)));
        out.line(format!("  every thread holds the same instance: {}", same));
    }
    Ok(())
}
