//! Foreign-exchange conversion into the local currency.

pub mod conversion;
pub mod exchange;

#[cfg(test)]
mod props;

pub use conversion::{DISPLAY_DECIMAL_PLACES, convert_amount, round_for_display, round_to_whole};
pub use exchange::FxRate;
