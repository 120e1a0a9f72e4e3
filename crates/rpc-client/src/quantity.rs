//! Conversions between the boundary's base-10 string amounts and the
//! JSON-RPC wire's 0x-prefixed hex quantities.

use crate::error::RpcError;

/// Encodes a base-10 integer string as a JSON-RPC hex quantity.
///
/// The broadcaster boundary carries amounts as decimal strings so no precision
/// is lost; the node expects `0x`-prefixed hex with no leading zeros.
pub fn to_hex_quantity(decimal: &str) -> Result<String, RpcError> {
    let value: u128 = decimal
        .parse()
        .map_err(|_| RpcError::InvalidQuantity(format!("not a base-10 integer: {decimal:?}")))?;
    Ok(format!("{value:#x}"))
}

/// Decodes a JSON-RPC hex quantity (e.g. a block number) into a u64.
pub fn parse_hex_quantity(hex: &str) -> Result<u64, RpcError> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidQuantity(format!("missing 0x prefix: {hex:?}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|_| RpcError::InvalidQuantity(format!("not a hex quantity: {hex:?}")))
}
