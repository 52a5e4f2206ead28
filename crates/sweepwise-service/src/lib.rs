/// Sweepwise Service: the operation surface offered to a frontend.
///
/// This crate wires the core collaborators together and exposes the
/// operations a presentation layer calls. Business logic lives in
/// `sweepwise-core`.
///
/// - [`service`]: `SweepService` for scans, health score, latest metrics.
/// - [`bridge`]: statically typed JSON request/response shapes.
pub mod bridge;
pub mod service;

pub use bridge::{dispatch, dispatch_json, BridgeRequest, BridgeResponse};
pub use service::SweepService;
