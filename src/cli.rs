mod args;

pub use args::{Cli, Command, PlanArgs, SmokeArgs};
