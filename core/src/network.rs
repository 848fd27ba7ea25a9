//! Probe primitives. Every function here is stateless: nothing is shared
//! between two calls, and no probe failure is ever returned as a fatal error.

pub mod http;
pub mod interface;
pub mod tcp;
