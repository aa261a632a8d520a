// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loader adapters: invoke, cancel, and cache loader results per surface.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use action_menu_model::{
    LoaderError, LoaderFn, LoaderFuture, LoaderOutput, LoaderQuery, LoaderResolver, LoaderResult,
    LoaderSpec, SurfaceId,
};
use futures::executor::LocalPool;
use futures::future::{AbortHandle, Aborted, abortable};
use futures::task::LocalSpawnExt as _;
use hashbrown::HashMap;

/// One loader invocation request.
pub struct LoaderRequest<T> {
    /// Surface the loader fills; also the cache key.
    pub surface: SurfaceId,
    /// The loader.
    pub loader: LoaderSpec<T>,
    /// Input for the invocation.
    pub query: LoaderQuery,
}

impl<T> Clone for LoaderRequest<T> {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            loader: self.loader.clone(),
            query: self.query.clone(),
        }
    }
}

impl<T> fmt::Debug for LoaderRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRequest")
            .field("surface", &self.surface)
            .field("loader", &self.loader)
            .field("query", &self.query)
            .finish()
    }
}

/// Pluggable loader execution.
///
/// Any implementation must accept the three loader forms: a static result, a
/// function returning a result, and a function returning a future.
pub trait LoaderAdapter<T> {
    /// Current result of `loader` for `surface` under `query`.
    ///
    /// Invokes the loader when its identity or input changed since the last
    /// call, aborting any invocation still in flight for that surface.
    fn use_loader(&mut self, surface: &SurfaceId, loader: &LoaderSpec<T>, query: &LoaderQuery) -> Option<LoaderResult<T>>;

    /// Drives in-flight invocations and reports whether any result changed
    /// since the last call, clearing that record.
    fn poll(&mut self) -> bool;

    /// Drives in-flight invocations without consuming the change record, so
    /// a later [`LoaderAdapter::poll`] still reports what settled here.
    fn drive(&mut self) {}

    /// The surface closed: abort its invocation and drop its result.
    fn release(&mut self, _surface: &SurfaceId) {}

    /// The whole tree closed: abort everything.
    fn release_all(&mut self) {}

    /// Invokes every request (all in the same turn), drives them once, and
    /// returns the results by surface.
    fn use_loaders(&mut self, requests: &[LoaderRequest<T>]) -> HashMap<SurfaceId, LoaderResult<T>> {
        let mut results = HashMap::with_capacity(requests.len());
        for request in requests {
            self.use_loader(&request.surface, &request.loader, &request.query);
        }
        self.drive();
        for request in requests {
            if let Some(result) = self.use_loader(&request.surface, &request.loader, &request.query) {
                results.insert(request.surface.clone(), result);
            }
        }
        results
    }
}

struct SlotState<T> {
    generation: u64,
    result: Option<LoaderResult<T>>,
    changed: bool,
}

struct Slot<T> {
    loader: LoaderFn<T>,
    query: LoaderQuery,
    state: Rc<RefCell<SlotState<T>>>,
    abort: Option<AbortHandle>,
}

impl<T> Slot<T> {
    fn matches(&self, loader: &LoaderFn<T>, query: &LoaderQuery) -> bool {
        Rc::ptr_eq(&self.loader, loader) && self.query == *query
    }

    fn current(&self) -> Option<LoaderResult<T>> {
        self.state.borrow().result.clone()
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
    }
}

/// The default adapter, running asynchronous loaders on a local executor.
///
/// Each surface owns one slot. A new invocation bumps the slot's generation
/// and aborts the previous one; a completion that finds a newer generation is
/// discarded, so a slow stale response can never overwrite a fresh one.
/// While a refetch is in flight the previous data stays visible with
/// `is_fetching` set.
pub struct DefaultLoaderAdapter<T> {
    pool: LocalPool,
    slots: HashMap<SurfaceId, Slot<T>>,
}

impl<T> Default for DefaultLoaderAdapter<T> {
    fn default() -> Self {
        Self {
            pool: LocalPool::new(),
            slots: HashMap::new(),
        }
    }
}

impl<T> fmt::Debug for DefaultLoaderAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultLoaderAdapter")
            .field("slots", &self.slots.len())
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

impl<T> DefaultLoaderAdapter<T> {
    /// Number of invocations still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.slots.values().filter(|slot| slot.abort.is_some()).count()
    }
}

impl<T: 'static> DefaultLoaderAdapter<T> {
    /// Creates an adapter with no cached results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `surface`, without invoking anything.
    #[must_use]
    pub fn result(&self, surface: &SurfaceId) -> Option<LoaderResult<T>> {
        self.slots.get(surface).and_then(Slot::current)
    }

    /// Aborts the invocation for `surface` and forgets its result.
    pub fn cancel(&mut self, surface: &SurfaceId) {
        if let Some(mut slot) = self.slots.remove(surface) {
            tracing::debug!(surface = %surface, "loader cancelled");
            slot.cancel();
        }
    }

    /// Aborts every invocation and forgets all results.
    pub fn cancel_all(&mut self) {
        for (_, mut slot) in self.slots.drain() {
            slot.cancel();
        }
        self.pool.run_until_stalled();
    }

    fn invoke(&mut self, surface: &SurfaceId, loader: &LoaderFn<T>, query: &LoaderQuery) -> Option<LoaderResult<T>> {
        let slot = self
            .slots
            .entry(surface.clone())
            .or_insert_with(|| Slot {
                loader: Rc::clone(loader),
                query: query.clone(),
                state: Rc::new(RefCell::new(SlotState {
                    generation: 0,
                    result: None,
                    changed: false,
                })),
                abort: None,
            });
        slot.cancel();
        slot.loader = Rc::clone(loader);
        slot.query = query.clone();
        let generation = {
            let mut state = slot.state.borrow_mut();
            state.generation += 1;
            state.generation
        };
        tracing::debug!(surface = %surface, query = %query.query, open = query.open, generation, "invoke loader");

        match loader(query) {
            LoaderOutput::Ready(result) => {
                let result = if result.is_empty_shape() {
                    tracing::warn!(surface = %surface, "loader returned neither data nor flags; treating as empty");
                    LoaderResult::ready(Vec::new())
                } else {
                    result
                };
                let mut state = slot.state.borrow_mut();
                state.result = Some(result);
                state.changed = true;
            }
            LoaderOutput::Pending(future) => {
                {
                    let mut state = slot.state.borrow_mut();
                    state.result = Some(match state.result.take() {
                        Some(previous) if previous.data.is_some() => LoaderResult {
                            is_error: false,
                            error: None,
                            ..previous.refetching()
                        },
                        _ => LoaderResult::loading(),
                    });
                    state.changed = true;
                }
                let (task, handle) = track(future, Rc::clone(&slot.state), generation, surface.clone());
                if let Err(error) = self.pool.spawner().spawn_local(task) {
                    tracing::warn!(surface = %surface, %error, "could not spawn loader");
                    let mut state = slot.state.borrow_mut();
                    state.result = Some(LoaderResult::failed(LoaderError::Failed(error.to_string())));
                } else {
                    slot.abort = Some(handle);
                }
            }
        }
        slot.current()
    }
}

fn track<T: 'static>(
    future: LoaderFuture<T>,
    state: Rc<RefCell<SlotState<T>>>,
    generation: u64,
    surface: SurfaceId,
) -> (impl Future<Output = ()>, AbortHandle) {
    let (future, handle) = abortable(future);
    let task = async move {
        let outcome = future.await;
        let mut state = state.borrow_mut();
        if state.generation != generation {
            tracing::debug!(surface = %surface, generation, "stale loader result discarded");
            return;
        }
        let result = match outcome {
            Ok(Ok(nodes)) => LoaderResult::ready(nodes),
            Ok(Err(error)) => {
                tracing::debug!(surface = %surface, %error, "loader failed");
                LoaderResult::failed(error)
            }
            Err(Aborted) => return,
        };
        tracing::debug!(surface = %surface, generation, "loader settled");
        state.result = Some(result);
        state.changed = true;
    };
    (task, handle)
}

impl<T: 'static> LoaderAdapter<T> for DefaultLoaderAdapter<T> {
    fn use_loader(&mut self, surface: &SurfaceId, loader: &LoaderSpec<T>, query: &LoaderQuery) -> Option<LoaderResult<T>> {
        let loader = match loader {
            LoaderSpec::Static(result) => return Some(result.clone()),
            LoaderSpec::Function(loader) => loader,
        };
        match self.slots.get(surface) {
            Some(slot) if slot.matches(loader, query) => slot.current(),
            _ => self.invoke(surface, loader, query),
        }
    }

    fn poll(&mut self) -> bool {
        self.drive();
        let mut changed = false;
        for slot in self.slots.values() {
            changed |= core::mem::take(&mut slot.state.borrow_mut().changed);
        }
        changed
    }

    fn drive(&mut self) {
        self.pool.run_until_stalled();
        for slot in self.slots.values_mut() {
            if slot
                .state
                .borrow()
                .result
                .as_ref()
                .is_some_and(|result| !result.is_fetching)
            {
                slot.abort = None;
            }
        }
    }

    fn release(&mut self, surface: &SurfaceId) {
        self.cancel(surface);
    }

    fn release_all(&mut self) {
        self.cancel_all();
    }
}

impl<T: 'static> LoaderResolver<T> for DefaultLoaderAdapter<T> {
    fn resolve(&self, surface: &SurfaceId, loader: &LoaderSpec<T>) -> Option<LoaderResult<T>> {
        match loader {
            LoaderSpec::Static(result) => Some(result.clone()),
            LoaderSpec::Function(_) => self.result(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use action_menu_model::{ItemDef, NodeDef};
    use futures::channel::oneshot;

    use super::*;

    fn query(text: &str) -> LoaderQuery {
        LoaderQuery {
            query: text.to_owned(),
            open: true,
        }
    }

    fn ids(result: &LoaderResult<()>) -> Vec<String> {
        result.nodes().iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn static_results_pass_through() {
        let mut adapter = DefaultLoaderAdapter::<()>::new();
        let spec = LoaderSpec::Static(LoaderResult::ready(vec![ItemDef::new("a").into()]));
        let result = adapter.use_loader(&SurfaceId::root(), &spec, &query("")).unwrap();
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn sync_loader_runs_once_per_input() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let spec = LoaderSpec::<()>::from_fn(move |q| {
            counter.set(counter.get() + 1);
            LoaderResult::ready(vec![ItemDef::new(q.query.clone()).into()])
        });
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        adapter.use_loader(&surface, &spec, &query("a"));
        let result = adapter.use_loader(&surface, &spec, &query("a")).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(ids(&result), vec!["a"]);
        adapter.use_loader(&surface, &spec, &query("ab"));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn empty_shape_is_treated_as_empty_data() {
        let spec = LoaderSpec::<()>::from_fn(|_| LoaderResult::default());
        let mut adapter = DefaultLoaderAdapter::new();
        let result = adapter.use_loader(&SurfaceId::root(), &spec, &query("")).unwrap();
        assert_eq!(result.data.as_deref().map(<[NodeDef<()>]>::len), Some(0));
        assert!(!result.is_loading);
    }

    #[test]
    fn async_loader_reports_loading_then_data() {
        let spec = LoaderSpec::<()>::from_async(|q| {
            let id = q.query.clone();
            async move { Ok(vec![ItemDef::new(id).into()]) }
        });
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        let first = adapter.use_loader(&surface, &spec, &query("x")).unwrap();
        assert!(first.is_loading && first.is_fetching);
        assert_eq!(adapter.in_flight(), 1);
        assert!(format!("{adapter:?}").contains("in_flight: 1"));

        assert!(adapter.poll());
        let settled = adapter.use_loader(&surface, &spec, &query("x")).unwrap();
        assert!(!settled.is_loading && !settled.is_fetching);
        assert_eq!(ids(&settled), vec!["x"]);
        assert_eq!(adapter.in_flight(), 0);
        assert!(!adapter.poll());
    }

    #[test]
    fn superseded_invocation_is_discarded() {
        let senders: Rc<RefCell<Vec<oneshot::Sender<Vec<NodeDef<()>>>>>> = Rc::default();
        let sink = Rc::clone(&senders);
        let spec = LoaderSpec::<()>::from_async(move |_| {
            let (tx, rx) = oneshot::channel();
            sink.borrow_mut().push(tx);
            async move { rx.await.map_err(|_| LoaderError::Aborted) }
        });
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        adapter.use_loader(&surface, &spec, &query("a"));
        adapter.use_loader(&surface, &spec, &query("ab"));
        adapter.poll();

        let mut senders = senders.borrow_mut();
        assert_eq!(senders.len(), 2);
        let fresh = senders.pop().unwrap();
        let stale = senders.pop().unwrap();
        // The first invocation was aborted; its receiver is gone.
        assert!(stale.send(vec![ItemDef::new("stale").into()]).is_err());
        fresh.send(vec![ItemDef::new("fresh").into()]).unwrap();
        drop(senders);

        adapter.poll();
        let result = adapter.result(&surface).unwrap();
        assert_eq!(ids(&result), vec!["fresh"]);
    }

    #[test]
    fn refetch_keeps_previous_data_visible() {
        let spec = LoaderSpec::<()>::from_async(|q| {
            let id = q.query.clone();
            async move { Ok(vec![ItemDef::new(id).into()]) }
        });
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        adapter.use_loader(&surface, &spec, &query("a"));
        adapter.poll();
        let refetching = adapter.use_loader(&surface, &spec, &query("b")).unwrap();
        assert!(refetching.is_fetching);
        assert!(!refetching.is_loading);
        assert_eq!(ids(&refetching), vec!["a"]);
    }

    #[test]
    fn failures_are_data() {
        let spec = LoaderSpec::<()>::from_async(|_| async { Err(LoaderError::Failed("offline".into())) });
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        adapter.use_loader(&surface, &spec, &query("a"));
        adapter.poll();
        let result = adapter.result(&surface).unwrap();
        assert!(result.is_error);
        assert_eq!(result.error, Some(LoaderError::Failed("offline".into())));
    }

    #[test]
    fn use_loaders_starts_everything_before_driving() {
        let started = Rc::new(Cell::new(0));
        let make = |name: &'static str| {
            let started = Rc::clone(&started);
            LoaderSpec::<()>::from_async(move |_| {
                started.set(started.get() + 1);
                async move { Ok(vec![ItemDef::new(name).into()]) }
            })
        };
        let requests = vec![
            LoaderRequest {
                surface: SurfaceId::from_path("root::a"),
                loader: make("a1"),
                query: query("q"),
            },
            LoaderRequest {
                surface: SurfaceId::from_path("root::b"),
                loader: make("b1"),
                query: query("q"),
            },
        ];
        let mut adapter = DefaultLoaderAdapter::new();
        let results = adapter.use_loaders(&requests);
        assert_eq!(started.get(), 2);
        assert_eq!(results.len(), 2);
        assert_eq!(ids(&results[&SurfaceId::from_path("root::b")]), vec!["b1"]);
    }

    #[test]
    fn batch_loading_leaves_other_changes_for_poll() {
        let own = LoaderSpec::<()>::from_async(|q| {
            let id = q.query.clone();
            async move { Ok(vec![ItemDef::new(id).into()]) }
        });
        let nested = LoaderSpec::<()>::from_async(|_| async { Ok(vec![ItemDef::new("team").into()]) });
        let mut adapter = DefaultLoaderAdapter::new();
        let root = SurfaceId::root();
        adapter.use_loader(&root, &own, &query("a"));
        adapter.poll();

        adapter.use_loader(&root, &own, &query("zz"));
        adapter.use_loaders(&[LoaderRequest {
            surface: SurfaceId::from_path("root::teams"),
            loader: nested,
            query: query("zz"),
        }]);
        let settled = adapter.result(&root).unwrap();
        assert_eq!(ids(&settled), vec!["zz"]);
        assert!(adapter.poll(), "the root refetch settled during the batch and must still be reported");
        assert!(!adapter.poll());
    }

    #[test]
    fn cancel_forgets_results() {
        let spec = LoaderSpec::<()>::from_async(|_| futures::future::pending());
        let mut adapter = DefaultLoaderAdapter::new();
        let surface = SurfaceId::root();
        adapter.use_loader(&surface, &spec, &query("a"));
        assert_eq!(adapter.in_flight(), 1);
        adapter.cancel(&surface);
        assert_eq!(adapter.in_flight(), 0);
        assert!(adapter.result(&surface).is_none());
    }
}
