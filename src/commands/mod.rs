// ABOUTME: Command module aggregator for the stevedore CLI.
// ABOUTME: Re-exports the deploy command handler.

mod deploy;

pub use deploy::deploy;
