//! Plain-text rendering of a [`FeeQuote`].
use crate::models::FeeQuote;

const AMOUNT_WIDTH: usize = 30;

/// Renders the fee breakdown as three right-aligned lines, all amounts in wei.
///
/// ```text
///    L2 fee:                       45000000 = 45000*1000
///    L1 fee:                           2100
/// Fee total:                       45002100
/// ```
pub fn format_report(quote: &FeeQuote) -> String {
    let l2_fee = quote.l2_fee().to_string();
    let l1_fee = quote.l1_fee().to_string();
    let total = quote.total().to_string();

    format!(
        "   L2 fee: {l2_fee:>AMOUNT_WIDTH$} = {}*{}\n   L1 fee: {l1_fee:>AMOUNT_WIDTH$}\nFee total: {total:>AMOUNT_WIDTH$}",
        quote.l2_gas_used(),
        quote.l2_gas_price(),
    )
}
