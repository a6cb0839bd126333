use rust_decimal::Decimal;

/// Currency amount - uses Decimal for precision
pub type Cash = Decimal;

/// Price value - uses Decimal for precision
/// Always clamped to a positive floor by the market
pub type Price = Decimal;

/// Ticker symbol of a tradable stock
pub type Symbol = String;
