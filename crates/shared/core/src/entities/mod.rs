mod buffer;
mod choice;
mod economy;
mod position;
mod side;

pub use buffer::TypingBuffer;
pub use choice::{ChoiceCatalog, ChoiceOption};
pub use economy::{EconomyState, TradeOutcome};
pub use position::Position;
pub use side::TradeSide;
