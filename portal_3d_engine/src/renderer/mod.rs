/// Renderer module - render-state contract between the portal sequencer and backends

// Module declarations
pub mod command_list;
pub mod render_state;

#[cfg(test)]
pub mod mock_command_list;

// Re-export everything
pub use command_list::*;
pub use render_state::*;
