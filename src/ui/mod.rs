// Presentation layer
// Renders widget snapshots for the terminal

pub mod text;
