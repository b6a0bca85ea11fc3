// Adapters layer: concrete implementations for external systems (passive HTTP sources).

pub mod sources;
