mod handler;

pub use handler::handle_aliases_command;
