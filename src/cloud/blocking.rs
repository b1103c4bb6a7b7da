// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapter for synchronous cloud clients.

use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::error::CloudError;
use crate::state::ApplianceState;

use super::{CloudService, Discovery, DiscoveryRequest};

/// A cloud client with a blocking API.
pub trait BlockingCloudService: Send + Sync + 'static {
    /// Authenticated session handle.
    type Session: Send + Sync + 'static;

    /// Authenticates and lists the account's appliances, blocking.
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Authentication` if the credentials are rejected.
    fn authenticate_and_list(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Discovery<Self::Session>, CloudError>;

    /// Queries the appliance at `address`, blocking.
    ///
    /// # Errors
    ///
    /// Returns `CloudError` if the probe could not be performed.
    fn probe(
        &self,
        address: Ipv4Addr,
        session: &Self::Session,
    ) -> Result<Option<ApplianceState>, CloudError>;
}

/// Runs a [`BlockingCloudService`] on tokio's blocking thread pool.
///
/// Each call is dispatched with [`tokio::task::spawn_blocking`] and awaited,
/// so the flow suspends instead of blocking the runtime.
///
/// # Examples
///
/// ```ignore
/// use midea_dehumidifier_lan::cloud::BlockingCloud;
///
/// let cloud = BlockingCloud::new(MySyncClient::default());
/// let flow = ConfigFlow::user(cloud, entries);
/// ```
#[derive(Debug)]
pub struct BlockingCloud<T> {
    inner: Arc<T>,
}

impl<T: BlockingCloudService> BlockingCloud<T> {
    /// Wraps a blocking client.
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the wrapped client.
    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> Clone for BlockingCloud<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: BlockingCloudService> CloudService for BlockingCloud<T> {
    type Session = Arc<T::Session>;

    async fn authenticate_and_list(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Discovery<Self::Session>, CloudError> {
        let inner = Arc::clone(&self.inner);
        let request = request.clone();

        let discovery =
            tokio::task::spawn_blocking(move || inner.authenticate_and_list(&request))
                .await
                .map_err(|e| CloudError::Worker(e.to_string()))??;

        Ok(Discovery {
            session: Arc::new(discovery.session),
            appliances: discovery.appliances,
        })
    }

    async fn probe(
        &self,
        address: Ipv4Addr,
        session: &Self::Session,
    ) -> Result<Option<ApplianceState>, CloudError> {
        let inner = Arc::clone(&self.inner);
        let session = Arc::clone(session);

        tokio::task::spawn_blocking(move || inner.probe(address, &session))
            .await
            .map_err(|e| CloudError::Worker(e.to_string()))?
    }
}
