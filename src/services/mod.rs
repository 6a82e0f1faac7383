//! Per-domain fetch services and the request/outcome plumbing between the
//! app and background fetch tasks.
//!
//! Services take an [`IndexerTransport`], run a query and transform the raw
//! nodes into render-ready entities before anything reaches a table.

pub mod accounts;
pub mod calls;
pub mod events;
pub mod extrinsics;
pub mod subnets;

use anyhow::Result;
use serde_json::Value;

use crate::fetch::Ticket;
use crate::indexer::IndexerTransport;
use crate::pagination::{ItemsResponse, PaginationOptions};
use crate::types::{Account, AccountStats, Call, Event, Extrinsic, SubnetOwner};

/// A fetch the app wants run, tagged with the ticket of the slot that
/// issued it.
#[derive(Clone, Debug)]
pub enum FetchRequest {
    Extrinsic { ticket: Ticket, id: String },
    Event { ticket: Ticket, id: String },
    Call { ticket: Ticket, id: String },
    Account { ticket: Ticket, address: String },
    Events {
        ticket: Ticket,
        filter: Value,
        order: String,
        options: PaginationOptions,
    },
    /// Events named `Pallet.Event`.
    EventsByName {
        ticket: Ticket,
        name: String,
        order: String,
        options: PaginationOptions,
    },
    Extrinsics {
        ticket: Ticket,
        filter: Value,
        order: String,
        options: PaginationOptions,
    },
    ExtrinsicsByName {
        ticket: Ticket,
        name: String,
        order: String,
        options: PaginationOptions,
    },
    AccountStats {
        ticket: Ticket,
        order: String,
        options: PaginationOptions,
    },
    SubnetOwners { ticket: Ticket, options: PaginationOptions },
}

impl FetchRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchRequest::Extrinsic { ticket, .. }
            | FetchRequest::Event { ticket, .. }
            | FetchRequest::Call { ticket, .. }
            | FetchRequest::Account { ticket, .. }
            | FetchRequest::Events { ticket, .. }
            | FetchRequest::EventsByName { ticket, .. }
            | FetchRequest::Extrinsics { ticket, .. }
            | FetchRequest::ExtrinsicsByName { ticket, .. }
            | FetchRequest::AccountStats { ticket, .. }
            | FetchRequest::SubnetOwners { ticket, .. } => *ticket,
        }
    }
}

/// Result of a [`FetchRequest`], carrying the same ticket.
#[derive(Debug)]
pub enum FetchOutcome {
    Extrinsic { ticket: Ticket, result: Result<Option<Extrinsic>> },
    Event { ticket: Ticket, result: Result<Option<Event>> },
    Call { ticket: Ticket, result: Result<Option<Call>> },
    Account { ticket: Ticket, result: Result<Option<Account>> },
    Events { ticket: Ticket, result: Result<ItemsResponse<Event>> },
    Extrinsics { ticket: Ticket, result: Result<ItemsResponse<Extrinsic>> },
    AccountStats { ticket: Ticket, result: Result<ItemsResponse<AccountStats>> },
    SubnetOwners { ticket: Ticket, result: Result<ItemsResponse<SubnetOwner>> },
}

impl FetchOutcome {
    pub fn is_err(&self) -> bool {
        match self {
            FetchOutcome::Extrinsic { result, .. } => result.is_err(),
            FetchOutcome::Event { result, .. } => result.is_err(),
            FetchOutcome::Call { result, .. } => result.is_err(),
            FetchOutcome::Account { result, .. } => result.is_err(),
            FetchOutcome::Events { result, .. } => result.is_err(),
            FetchOutcome::Extrinsics { result, .. } => result.is_err(),
            FetchOutcome::AccountStats { result, .. } => result.is_err(),
            FetchOutcome::SubnetOwners { result, .. } => result.is_err(),
        }
    }
}

/// Run one request against `transport`.
pub async fn execute(transport: &dyn IndexerTransport, request: FetchRequest) -> FetchOutcome {
    match request {
        FetchRequest::Extrinsic { ticket, id } => FetchOutcome::Extrinsic {
            ticket,
            result: extrinsics::get_extrinsic(transport, extrinsics::by_id(&id)).await,
        },
        FetchRequest::Event { ticket, id } => FetchOutcome::Event {
            ticket,
            result: events::get_event(transport, events::by_id(&id)).await,
        },
        FetchRequest::Call { ticket, id } => FetchOutcome::Call {
            ticket,
            result: calls::get_call(transport, calls::by_id(&id)).await,
        },
        FetchRequest::Account { ticket, address } => FetchOutcome::Account {
            ticket,
            result: accounts::get_account(&address).map(Some),
        },
        FetchRequest::Events {
            ticket,
            filter,
            order,
            options,
        } => FetchOutcome::Events {
            ticket,
            result: events::get_events(transport, filter, &order, &options).await,
        },
        FetchRequest::EventsByName {
            ticket,
            name,
            order,
            options,
        } => FetchOutcome::Events {
            ticket,
            result: events::get_events_by_name(transport, &name, &order, &options).await,
        },
        FetchRequest::Extrinsics {
            ticket,
            filter,
            order,
            options,
        } => FetchOutcome::Extrinsics {
            ticket,
            result: extrinsics::get_extrinsics(transport, filter, &order, &options).await,
        },
        FetchRequest::ExtrinsicsByName {
            ticket,
            name,
            order,
            options,
        } => FetchOutcome::Extrinsics {
            ticket,
            result: extrinsics::get_extrinsics_by_name(transport, &name, &order, &options).await,
        },
        FetchRequest::AccountStats { ticket, order, options } => FetchOutcome::AccountStats {
            ticket,
            result: accounts::get_account_stats(transport, options.offset, options.limit, &order).await,
        },
        FetchRequest::SubnetOwners { ticket, options } => FetchOutcome::SubnetOwners {
            ticket,
            result: subnets::get_subnet_owners(transport, &options).await,
        },
    }
}

/// Split `Pallet.Name` into its two halves.
pub(crate) fn split_name(name: &str) -> Result<(&str, &str)> {
    match name.trim().split_once('.') {
        Some((pallet, item)) if !pallet.is_empty() && !item.is_empty() => Ok((pallet, item)),
        _ => Err(anyhow::anyhow!("expected a name like Pallet.Name, got {name:?}")),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::indexer::{Endpoint, IndexerTransport};

    /// A recorded request.
    #[derive(Clone, Debug)]
    pub struct Sent {
        pub endpoint: Endpoint,
        pub query: String,
        pub variables: Value,
    }

    /// Replays canned `data` payloads in order and records what was asked.
    #[derive(Default)]
    pub struct MockIndexer {
        replies: Mutex<VecDeque<Result<Value>>>,
        pub sent: Mutex<Vec<Sent>>,
    }

    impl MockIndexer {
        pub fn replying(replies: Vec<Value>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(Ok).collect()),
                sent: Mutex::default(),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([Err(anyhow!(message.to_string()))])),
                sent: Mutex::default(),
            }
        }

        pub fn last(&self) -> Sent {
            self.sent.lock().unwrap().last().cloned().expect("no request sent")
        }
    }

    #[async_trait]
    impl IndexerTransport for MockIndexer {
        async fn query(&self, endpoint: Endpoint, query: &str, variables: Value) -> Result<Value> {
            self.sent.lock().unwrap().push(Sent {
                endpoint,
                query: query.to_string(),
                variables,
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("no canned reply")))
        }
    }
}
