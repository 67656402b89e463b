// Application layer: the external caller of the booking core (command execution and the stdin shell).

pub mod commands;
pub mod shell;
