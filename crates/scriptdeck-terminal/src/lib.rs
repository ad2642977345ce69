pub mod color;
pub mod console;
pub mod interpreter;
pub mod style;
pub mod transcript;

pub use console::Console;
pub use interpreter::Interpreter;
pub use style::{Color, SpanStyle, StyleState};
pub use transcript::{OutputElement, Transcript};
