//! Builds the canonical [`UnsignedTransaction`] for a contract call.
use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Function, JsonAbi},
    primitives::Bytes,
};

use crate::models::{ContractHandle, EncodingError, UnsignedTransaction};

/// Picks the first overload of `method` taking `arg_count` arguments that `accept` succeeds on.
///
/// When every same-arity overload is rejected, the first rejection is returned.
fn select_function<'a, T>(
    abi: &'a JsonAbi,
    contract: &str,
    method: &str,
    arg_count: usize,
    mut accept: impl FnMut(&'a Function) -> Result<T, EncodingError>,
) -> Result<(&'a Function, T), EncodingError> {
    let overloads = abi
        .function(method)
        .ok_or_else(|| EncodingError::UnknownMethod {
            contract: contract.to_string(),
            method: method.to_string(),
        })?;

    let mut first_rejection = None;
    for function in overloads
        .iter()
        .filter(|function| function.inputs.len() == arg_count)
    {
        match accept(function) {
            Ok(accepted) => return Ok((function, accepted)),
            Err(e) => {
                first_rejection.get_or_insert(e);
            }
        }
    }

    Err(first_rejection.unwrap_or_else(|| EncodingError::ArgumentCount {
        method: method.to_string(),
        expected: overloads
            .iter()
            .map(|function| function.inputs.len().to_string())
            .collect::<Vec<_>>()
            .join(" or "),
        actual: arg_count,
    }))
}

fn parameter_types(function: &Function) -> Result<Vec<DynSolType>, EncodingError> {
    function
        .inputs
        .iter()
        .enumerate()
        .map(|(index, param)| {
            param.resolve().map_err(|e| EncodingError::ArgumentType {
                method: function.name.clone(),
                index,
                reason: format!("unsupported parameter type {}: {e}", param.ty),
            })
        })
        .collect()
}

/// Coerces command-line strings into typed values for `method`'s parameters.
pub fn parse_args(
    abi: &JsonAbi,
    contract: &str,
    method: &str,
    raw_args: &[String],
) -> Result<Vec<DynSolValue>, EncodingError> {
    let (_, args) = select_function(abi, contract, method, raw_args.len(), |function| {
        parameter_types(function)?
            .iter()
            .zip(raw_args)
            .enumerate()
            .map(|(index, (ty, raw))| {
                ty.coerce_str(raw).map_err(|e| EncodingError::ArgumentType {
                    method: method.to_string(),
                    index,
                    reason: format!("cannot parse {raw:?} as {ty}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(args)
}

/// ABI-encodes a call to `method` (selector followed by arguments).
pub fn encode_call(
    abi: &JsonAbi,
    contract: &str,
    method: &str,
    args: &[DynSolValue],
) -> Result<Bytes, EncodingError> {
    let (function, ()) = select_function(abi, contract, method, args.len(), |function| {
        let types = parameter_types(function)?;
        match types.iter().zip(args).position(|(ty, value)| !ty.matches(value)) {
            Some(index) => Err(EncodingError::ArgumentType {
                method: method.to_string(),
                index,
                reason: format!("expected {}", types[index]),
            }),
            None => Ok(()),
        }
    })?;

    function
        .abi_encode_input(args)
        .map(Bytes::from)
        .map_err(|e| EncodingError::Encode {
            method: method.to_string(),
            reason: e.to_string(),
        })
}

/// Builds the transaction for calling `method` on `handle`.
///
/// Gas fields are left at zero for the caller to fill in with
/// [`UnsignedTransaction::with_gas`].
pub fn build_unsigned_transaction(
    handle: &ContractHandle,
    method: &str,
    args: &[DynSolValue],
) -> Result<UnsignedTransaction, EncodingError> {
    let data = encode_call(handle.abi(), handle.name(), method, args)?;
    let tx = UnsignedTransaction::new(handle.address(), data, 0, 0);

    debug_assert!(
        tx.to_call_request().from.is_none(),
        "fee-quote transactions must not carry a sender"
    );

    Ok(tx)
}
