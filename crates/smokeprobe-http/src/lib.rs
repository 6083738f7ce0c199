mod client;
mod probe;

pub use client::{HttpClient, HttpResponse, ProbeError};
pub use probe::{Probe, classify};
