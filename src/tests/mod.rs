//! iri-profile lib test modules

mod options;
mod overrides;
mod scenario;
