mod example;
mod list;
mod run;

pub use example::{ExampleArg, cmd_example};
pub use list::cmd_list;
pub use run::{RunArgs, cmd_run};
