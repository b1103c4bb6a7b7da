// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cloud and local network collaborator.
//!
//! The setup flow does not talk to the Midea cloud or to appliances itself.
//! It consumes a [`CloudService`] with two operations:
//!
//! - [`authenticate_and_list`](CloudService::authenticate_and_list) logs in
//!   and returns the appliances registered to the account, with the local
//!   address of those found on the network.
//! - [`probe`](CloudService::probe) asks a single address for its state.
//!
//! Clients with a synchronous API can be wrapped in [`BlockingCloud`], which
//! runs every call on tokio's blocking pool so the flow stays responsive.

mod blocking;

pub use blocking::{BlockingCloud, BlockingCloudService};

use std::future::Future;
use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;

use crate::appliance::ApplianceRecord;
use crate::error::CloudError;
use crate::state::ApplianceState;

/// Account and application credentials for the cloud.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Application key.
    pub appkey: String,
    /// Application id.
    pub appid: u32,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("appkey", &self.appkey)
            .field("appid", &self.appid)
            .finish()
    }
}

/// Parameters of a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Cloud credentials.
    pub credentials: Credentials,
    /// Networks to scan. Empty means every reachable subnet.
    pub networks: Vec<Ipv4Network>,
}

/// Result of a successful discovery run.
#[derive(Debug)]
pub struct Discovery<S> {
    /// Authenticated cloud session, reused for probes.
    pub session: S,
    /// Appliances registered to the account, in inventory order.
    pub appliances: Vec<ApplianceRecord>,
}

/// The cloud/LAN collaborator consumed by the setup flow.
///
/// No timeout or retry is applied on top of these calls; that policy
/// belongs to the implementation.
pub trait CloudService: Send + Sync {
    /// Authenticated session handle.
    type Session: Send + Sync + 'static;

    /// Authenticates and lists the account's appliances.
    ///
    /// Appliances seen on the local network carry their address; the others
    /// are [`Unresolved`](crate::appliance::ApplianceAddress::Unresolved).
    ///
    /// # Errors
    ///
    /// Returns `CloudError::Authentication` if the credentials are rejected.
    fn authenticate_and_list(
        &self,
        request: &DiscoveryRequest,
    ) -> impl Future<Output = Result<Discovery<Self::Session>, CloudError>> + Send;

    /// Queries the appliance at `address`.
    ///
    /// Returns `Ok(None)` when nothing answers.
    ///
    /// # Errors
    ///
    /// Returns `CloudError` if the probe itself could not be performed.
    fn probe(
        &self,
        address: Ipv4Addr,
        session: &Self::Session,
    ) -> impl Future<Output = Result<Option<ApplianceState>, CloudError>> + Send;
}
