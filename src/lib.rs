// Paperlens: numerical analysis engine for research-paper corpora.
//
// This is the library root. Each module corresponds to one analysis
// engine (or a shared layer they build on); the `analysis` module is
// the orchestrator that turns a corpus plus a requested analysis set
// into a single result envelope.

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod corpus;
pub mod gaps;
pub mod impact;
pub mod output;
pub mod similarity;
pub mod topics;
pub mod trends;
pub mod vectorize;
