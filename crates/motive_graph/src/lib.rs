// SPDX-License-Identifier: MIT OR Apache-2.0
//! Behavior graph engine for Motive.
//!
//! A typed dataflow runtime: small networks of nodes with typed ports,
//! connected by directed edges, drive live properties (position,
//! rotation, scale, visibility, opacity) of externally-owned target
//! objects over time.
//!
//! ## Architecture
//!
//! - Typed input/output ports with an enumerated conversion table
//! - A closed node kind catalog (time source, oscillators, arithmetic,
//!   target-property bindings)
//! - Eager, synchronous push propagation with a re-entrancy guard
//! - A single frame-paced scheduler for time-varying nodes
//! - An exact round-trip document format with relink-by-stable-id

pub mod clock;
pub mod connection;
pub mod document;
pub mod graph;
pub mod kinds;
pub mod node;
pub mod port;
pub mod target;

pub use clock::{Scheduler, NOMINAL_RATE_HZ};
pub use connection::Connection;
pub use document::{DocumentError, GraphDocument};
pub use graph::{EvalContext, Graph, GraphError};
pub use kinds::{NodeKind, ParamValue};
pub use node::{Node, NodeId};
pub use port::{Port, PortDirection, Value, ValueType};
pub use target::{NoTargets, TargetId, TargetObject, TargetStore};
