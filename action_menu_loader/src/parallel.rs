// Copyright 2025 the Action Menu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot concurrent loading.

use action_menu_model::{LoaderOutput, LoaderQuery, LoaderResult, LoaderSpec, SurfaceId};
use futures::future::join_all;
use hashbrown::HashMap;

use crate::adapter::LoaderRequest;

/// Invokes a loader without awaiting it.
pub fn start_loader<T>(loader: &LoaderSpec<T>, query: &LoaderQuery) -> LoaderOutput<T> {
    match loader {
        LoaderSpec::Static(result) => LoaderOutput::Ready(result.clone()),
        LoaderSpec::Function(f) => f(query),
    }
}

/// Waits for a started loader to settle.
pub async fn settle<T>(output: LoaderOutput<T>) -> LoaderResult<T> {
    match output {
        LoaderOutput::Ready(result) => result,
        LoaderOutput::Pending(future) => match future.await {
            Ok(nodes) => LoaderResult::ready(nodes),
            Err(error) => LoaderResult::failed(error),
        },
    }
}

/// Runs one loader to completion.
pub async fn run_loader<T>(loader: &LoaderSpec<T>, query: &LoaderQuery) -> LoaderResult<T> {
    settle(start_loader(loader, query)).await
}

/// Runs every request concurrently and collects the results by surface.
///
/// Every loader is invoked before any is awaited. One failing loader only
/// affects its own entry.
pub async fn load_all<T>(requests: &[LoaderRequest<T>]) -> HashMap<SurfaceId, LoaderResult<T>> {
    let started: Vec<_> = requests
        .iter()
        .map(|request| (request.surface.clone(), start_loader(&request.loader, &request.query)))
        .collect();
    tracing::debug!(count = started.len(), "loading in parallel");
    let pending = started
        .into_iter()
        .map(|(surface, output)| async move { (surface, settle(output).await) });
    join_all(pending).await.into_iter().collect()
}
