// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loader specifications and results.
//!
//! A loader supplies the node list of a submenu (or of the root) and reports
//! loading, fetching, and error flags alongside it. Three forms are accepted:
//!
//! - a static [`LoaderResult`],
//! - a function returning a static result,
//! - a function returning a future of nodes.
//!
//! Errors are data: they live in [`LoaderResult::error`] and are never
//! propagated as `Err` out of the engine.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::def::NodeDef;

/// Failure reported by a loader.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoaderError {
    /// The loader ran and failed.
    #[error("loader failed: {0}")]
    Failed(String),
    /// The invocation was superseded by a newer query or open state.
    #[error("loader invocation was aborted")]
    Aborted,
    /// The loader produced a result the engine could not interpret.
    #[error("unexpected loader result: {0}")]
    UnexpectedShape(String),
}

/// Input handed to a loader function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LoaderQuery {
    /// Effective (debounced) query.
    pub query: String,
    /// Whether the owning surface is open.
    pub open: bool,
}

/// Future produced by an asynchronous loader.
pub type LoaderFuture<T> = LocalBoxFuture<'static, Result<Vec<NodeDef<T>>, LoaderError>>;

/// What a loader function returns.
pub enum LoaderOutput<T> {
    /// A result that is available immediately.
    Ready(LoaderResult<T>),
    /// Nodes that will arrive later.
    Pending(LoaderFuture<T>),
}

impl<T> fmt::Debug for LoaderOutput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(result) => f
                .debug_struct("Ready")
                .field("status", &result.status())
                .finish_non_exhaustive(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Loader function.
pub type LoaderFn<T> = Rc<dyn Fn(&LoaderQuery) -> LoaderOutput<T>>;

/// A pluggable source of nodes.
pub enum LoaderSpec<T> {
    /// A fixed result.
    Static(LoaderResult<T>),
    /// A function of the current query.
    Function(LoaderFn<T>),
}

impl<T> LoaderSpec<T> {
    /// Wraps a function returning a static result.
    pub fn from_fn(f: impl Fn(&LoaderQuery) -> LoaderResult<T> + 'static) -> Self {
        Self::Function(Rc::new(move |query| LoaderOutput::Ready(f(query))))
    }

    /// Wraps a function returning a future of nodes.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(&LoaderQuery) -> Fut + 'static,
        Fut: Future<Output = Result<Vec<NodeDef<T>>, LoaderError>> + 'static,
    {
        Self::Function(Rc::new(move |query| LoaderOutput::Pending(Box::pin(f(query)))))
    }

    /// Returns `true` for loaders that need no invocation.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// Identity of a function loader, used to tell two specs apart.
    #[must_use]
    pub fn same_loader(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> Clone for LoaderSpec<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(result) => Self::Static(result.clone()),
            Self::Function(f) => Self::Function(Rc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for LoaderSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(result) => f.debug_tuple("Static").field(&result.status()).finish(),
            Self::Function(_) => f.write_str("Function"),
        }
    }
}

/// Loading flags without the data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStatus {
    /// No data yet; a first load is in flight.
    pub is_loading: bool,
    /// The last load failed.
    pub is_error: bool,
    /// A load is in flight (possibly with stale data shown).
    pub is_fetching: bool,
    /// Error of the last failed load.
    pub error: Option<LoaderError>,
}

/// Loader state: data plus flags.
pub struct LoaderResult<T> {
    /// Loaded nodes, if any.
    pub data: Option<Vec<NodeDef<T>>>,
    /// No data yet; a first load is in flight.
    pub is_loading: bool,
    /// The last load failed.
    pub is_error: bool,
    /// A load is in flight.
    pub is_fetching: bool,
    /// Error of the last failed load.
    pub error: Option<LoaderError>,
}

impl<T> LoaderResult<T> {
    /// A settled result with data.
    pub fn ready(data: Vec<NodeDef<T>>) -> Self {
        Self {
            data: Some(data),
            is_loading: false,
            is_error: false,
            is_fetching: false,
            error: None,
        }
    }

    /// A first load in flight.
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_error: false,
            is_fetching: true,
            error: None,
        }
    }

    /// A failed load.
    pub fn failed(error: LoaderError) -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: true,
            is_fetching: false,
            error: Some(error),
        }
    }

    /// Marks a refetch in flight while keeping the current data.
    #[must_use]
    pub fn refetching(mut self) -> Self {
        self.is_fetching = true;
        self.is_loading = self.data.is_none();
        self
    }

    /// The flags of this result.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        LoadStatus {
            is_loading: self.is_loading,
            is_error: self.is_error,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }

    /// Loaded nodes, or an empty slice.
    #[must_use]
    pub fn nodes(&self) -> &[NodeDef<T>] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if the result carries neither data nor any in-flight or error flag.
    #[must_use]
    pub fn is_empty_shape(&self) -> bool {
        self.data.is_none() && !self.is_loading && !self.is_error && !self.is_fetching
    }
}

impl<T> Clone for LoaderResult<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
            is_fetching: self.is_fetching,
            error: self.error.clone(),
        }
    }
}

impl<T> Default for LoaderResult<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_error: false,
            is_fetching: false,
            error: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LoaderResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderResult")
            .field("data", &self.data)
            .field("is_loading", &self.is_loading)
            .field("is_error", &self.is_error)
            .field("is_fetching", &self.is_fetching)
            .field("error", &self.error)
            .finish()
    }
}
