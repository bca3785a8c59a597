//! Middleware consumed at the edge

pub mod route_gate;

pub use route_gate::route_gate_middleware;
