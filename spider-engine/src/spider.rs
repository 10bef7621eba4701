//! The depth-first walk and its preemption-retry loop.

use crate::config::SpiderConfig;
use crate::report::SpiderReport;
use spider_protocol::{
    Budget, ContainerId, PropertyModel, PropertyPath, Scheduler, SpiderError, Visit, Visitor,
};
use std::collections::HashSet;

/// Walks the container graph reachable from a root, once per container.
///
/// Generic over `M: PropertyModel` and `S: Scheduler`. Both are borrowed
/// for the duration of each walk; the visited set and path stack are
/// created per call and dropped at its end, so one `GraphSpider` can run
/// any number of independent walks.
pub struct GraphSpider<M, S> {
    model: M,
    scheduler: S,
    config: SpiderConfig,
}

impl<M: PropertyModel, S: Scheduler> GraphSpider<M, S> {
    /// Create a spider with the default configuration.
    pub fn new(model: M, scheduler: S) -> Self {
        Self {
            model,
            scheduler,
            config: SpiderConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SpiderConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    /// The property model being walked.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The scheduler the walk cooperates with.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Visit every container reachable from `root`.
    ///
    /// The visitor is called once per distinct container, root included,
    /// in depth-first pre-order, with the property names that led there.
    /// A non-container root is a no-op. Preempted reads are retried after
    /// one yield; any other failure aborts the walk and is returned with
    /// the path where it happened.
    pub async fn spider<V>(
        &self,
        root: &M::Value,
        visitor: &mut V,
    ) -> Result<SpiderReport, SpiderError>
    where
        V: Visitor<M::Value> + ?Sized,
    {
        traverse(&self.model, &self.scheduler, &self.config, root, visitor).await
    }
}

/// One-shot walk with the default configuration.
pub async fn spider_with<M, S, V>(
    model: &M,
    scheduler: &S,
    root: &M::Value,
    visitor: &mut V,
) -> Result<SpiderReport, SpiderError>
where
    M: PropertyModel + ?Sized,
    S: Scheduler + ?Sized,
    V: Visitor<M::Value> + ?Sized,
{
    traverse(model, scheduler, &SpiderConfig::default(), root, visitor).await
}

async fn traverse<M, S, V>(
    model: &M,
    scheduler: &S,
    config: &SpiderConfig,
    root: &M::Value,
    visitor: &mut V,
) -> Result<SpiderReport, SpiderError>
where
    M: PropertyModel + ?Sized,
    S: Scheduler + ?Sized,
    V: Visitor<M::Value> + ?Sized,
{
    if !model.is_container(root) {
        return Ok(SpiderReport::default());
    }

    let caller_budget = scheduler.current_budget();
    let budget = caller_budget.min(config.budget_cap);
    scheduler.set_budget(budget);
    // Restores on every exit, including the future being dropped mid-walk.
    let _restore = config.restore_budget.then(|| RestoreBudget {
        scheduler,
        budget: caller_budget,
    });
    tracing::debug!(%budget, cap = %config.budget_cap, "spider.start");

    let mut walk = Walk {
        model,
        scheduler,
        visited: HashSet::new(),
        path: PropertyPath::new(),
        report: SpiderReport::default(),
    };
    let result = walk.run(root, visitor).await;
    match result {
        Ok(()) => {
            debug_assert!(walk.path.is_empty());
            let report = walk.report;
            tracing::debug!(
                visited = report.visited,
                reads = report.properties_read,
                preemptions = report.preemptions,
                "spider.done"
            );
            Ok(report)
        }
        Err(err) => {
            tracing::debug!(error = %err, "spider.aborted");
            Err(err)
        }
    }
}

/// Puts the caller's budget back when dropped.
struct RestoreBudget<'a, S: Scheduler + ?Sized> {
    scheduler: &'a S,
    budget: Budget,
}

impl<S: Scheduler + ?Sized> Drop for RestoreBudget<'_, S> {
    fn drop(&mut self) {
        self.scheduler.set_budget(self.budget);
    }
}

/// The root is borrowed from the caller; everything below it was read
/// out of the model and is owned by the frame.
enum Node<'r, T> {
    Root(&'r T),
    Child(T),
}

impl<T> Node<'_, T> {
    fn get(&self) -> &T {
        match self {
            Node::Root(v) => v,
            Node::Child(v) => v,
        }
    }
}

/// A container being descended: the remaining names to read.
struct Frame<'r, T> {
    node: Node<'r, T>,
    names: std::vec::IntoIter<String>,
}

struct Walk<'a, M: ?Sized, S: ?Sized> {
    model: &'a M,
    scheduler: &'a S,
    visited: HashSet<ContainerId>,
    path: PropertyPath,
    report: SpiderReport,
}

impl<M, S> Walk<'_, M, S>
where
    M: PropertyModel + ?Sized,
    S: Scheduler + ?Sized,
{
    async fn run<V>(&mut self, root: &M::Value, visitor: &mut V) -> Result<(), SpiderError>
    where
        V: Visitor<M::Value> + ?Sized,
    {
        // Invariant: every frame above the root owns exactly one path segment.
        let mut stack = Vec::new();
        if let Some(frame) = self.enter(Node::Root(root), visitor)? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(name) = frame.names.next() else {
                stack.pop();
                if !stack.is_empty() {
                    self.path.pop();
                }
                continue;
            };

            self.path.push(name.clone());
            let child = self.read(frame.node.get(), &name).await?;
            match self.enter(Node::Child(child), visitor)? {
                Some(next) => stack.push(next),
                None => {
                    self.path.pop();
                }
            }
        }
        Ok(())
    }

    /// Visit `node` if it is an unvisited container. Returns the frame to
    /// descend into, or `None` for leaves, repeats and pruned containers.
    fn enter<'r, V>(
        &mut self,
        node: Node<'r, M::Value>,
        visitor: &mut V,
    ) -> Result<Option<Frame<'r, M::Value>>, SpiderError>
    where
        V: Visitor<M::Value> + ?Sized,
    {
        let Some(id) = self.model.container_id(node.get()) else {
            return Ok(None);
        };
        if !self.visited.insert(id) {
            return Ok(None);
        }

        let depth = self.path.depth();
        self.report.visited += 1;
        self.report.max_depth = self.report.max_depth.max(depth as u64);
        tracing::trace!(%id, depth, path = %self.path, "spider.visit");

        match visitor.visit(node.get(), &self.path) {
            Ok(Visit::Prune) => {
                self.report.pruned += 1;
                Ok(None)
            }
            Ok(Visit::Descend) => {
                let names = self.model.own_property_names(node.get());
                Ok(Some(Frame {
                    node,
                    names: names.into_iter(),
                }))
            }
            Err(source) => Err(SpiderError::Visitor {
                path: std::mem::take(&mut self.path),
                source,
            }),
        }
    }

    /// Read one property, yielding and retrying for as long as the read
    /// comes back preempted.
    async fn read(&mut self, container: &M::Value, name: &str) -> Result<M::Value, SpiderError> {
        let mut retries = 0u64;
        loop {
            match self.model.read_property(container, name).await {
                Ok(value) => {
                    self.report.properties_read += 1;
                    return Ok(value);
                }
                Err(err) if err.is_preemption() => {
                    retries += 1;
                    self.report.preemptions += 1;
                    tracing::debug!(path = %self.path, retries, "spider.preempted");
                    self.scheduler.yield_tick().await;
                }
                Err(source) => {
                    return Err(SpiderError::Read {
                        path: std::mem::take(&mut self.path),
                        source,
                    });
                }
            }
        }
    }
}
